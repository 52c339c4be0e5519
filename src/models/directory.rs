//! Read-only reference data: sites, reporting periods and photos.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::cell_string;

/// Site type value marking a farm site.
pub const SITE_TYPE_FARM: &str = "مزرعة";

/// A participating site and its shared access password.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SiteDirectoryEntry {
    #[serde(default, deserialize_with = "cell_string")]
    pub mosque_code: String,
    #[serde(rename = "المسجد", default, deserialize_with = "cell_string")]
    pub name: String,
    #[serde(rename = "نوع الموقع", default, deserialize_with = "cell_string")]
    pub site_type: String,
    /// Never leaves the portal.
    #[serde(default, deserialize_with = "cell_string", skip_serializing)]
    pub pwd: String,
}

/// A valid reporting day or night.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PeriodDirectoryEntry {
    #[serde(default, deserialize_with = "cell_string")]
    pub code_day: String,
    #[serde(default, deserialize_with = "cell_string")]
    pub label: String,
}

/// Photo row consumed by the dashboard carousel. Opaque to the portal, so
/// any JSON value is accepted.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct PhotoRecord(pub Value);

/// Find a site by code.
pub fn find_site<'a>(sites: &'a [SiteDirectoryEntry], code: &str) -> Option<&'a SiteDirectoryEntry> {
    sites.iter().find(|s| s.mosque_code == code)
}

/// Find a period by code.
pub fn find_period<'a>(
    periods: &'a [PeriodDirectoryEntry],
    code: &str,
) -> Option<&'a PeriodDirectoryEntry> {
    periods.iter().find(|p| p.code_day == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_not_serialized() {
        let site: SiteDirectoryEntry = serde_json::from_str(
            r#"{"mosque_code": "M1", "المسجد": "جامع النور", "نوع الموقع": "مسجد", "pwd": 1234}"#,
        )
        .unwrap();
        assert_eq!(site.pwd, "1234");

        let json = serde_json::to_value(&site).unwrap();
        assert!(json.get("pwd").is_none());
        assert_eq!(json["المسجد"], "جامع النور");
    }

    #[test]
    fn test_find_site() {
        let sites = vec![SiteDirectoryEntry {
            mosque_code: "M7".into(),
            name: "مزرعة الخير".into(),
            site_type: SITE_TYPE_FARM.into(),
            pwd: "x".into(),
        }];
        let site = find_site(&sites, "M7").unwrap();
        assert_eq!(site.site_type, SITE_TYPE_FARM);
        assert!(find_site(&sites, "M8").is_none());
    }
}
