//! Data gateway envelopes.

use serde::{Deserialize, Serialize};

use super::{
    cell_opt_string, truthy, FieldReport, MaintenanceReport, PeriodDirectoryEntry, PhotoRecord,
    SiteDirectoryEntry,
};

/// The five collections returned by one gateway read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sheets {
    #[serde(rename = "daily_mosque_report", default)]
    pub field_reports: Vec<FieldReport>,
    #[serde(rename = "Maintenance_Report", default)]
    pub maintenance_reports: Vec<MaintenanceReport>,
    #[serde(rename = "photo", default)]
    pub photos: Vec<PhotoRecord>,
    #[serde(rename = "mosque", default)]
    pub sites: Vec<SiteDirectoryEntry>,
    #[serde(rename = "Dayd", default)]
    pub periods: Vec<PeriodDirectoryEntry>,
}

/// Response to a gateway GET.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotResponse {
    #[serde(default, deserialize_with = "truthy")]
    pub success: bool,
    #[serde(default)]
    pub sheets: Option<Sheets>,
}

/// Response to a gateway POST.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SaveResponse {
    #[serde(default, deserialize_with = "truthy")]
    pub success: bool,
    #[serde(default, deserialize_with = "cell_opt_string")]
    pub record_id: Option<String>,
}

impl SaveResponse {
    /// Stand-in for a response body that could not be read.
    pub fn optimistic() -> Self {
        Self {
            success: true,
            record_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_with_missing_collections() {
        let resp: SnapshotResponse = serde_json::from_value(json!({
            "success": true,
            "sheets": {
                "mosque": [{"mosque_code": "M1", "المسجد": "جامع", "pwd": "1"}],
                "Dayd": [{"code_day": "D1", "label": "اليوم الأول"}]
            }
        }))
        .unwrap();

        let sheets = resp.sheets.unwrap();
        assert!(resp.success);
        assert_eq!(sheets.sites.len(), 1);
        assert_eq!(sheets.periods[0].label, "اليوم الأول");
        assert!(sheets.field_reports.is_empty());
        assert!(sheets.photos.is_empty());
    }

    #[test]
    fn test_photo_rows_of_any_shape() {
        let resp: SnapshotResponse = serde_json::from_value(json!({
            "success": true,
            "sheets": {"photo": [{"url": "https://example.org/1.jpg"}, "https://example.org/2.jpg", 42, null]}
        }))
        .unwrap();

        let photos = resp.sheets.unwrap().photos;
        assert_eq!(photos.len(), 4);
        assert_eq!(photos[1].0, json!("https://example.org/2.jpg"));
    }

    #[test]
    fn test_save_response() {
        let resp: SaveResponse =
            serde_json::from_value(json!({"success": true, "record_id": "MRJ-9"})).unwrap();
        assert!(resp.success);
        assert_eq!(resp.record_id.as_deref(), Some("MRJ-9"));

        let resp: SaveResponse = serde_json::from_value(json!({"error": "boom"})).unwrap();
        assert!(!resp.success);
    }
}
