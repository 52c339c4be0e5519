//! Daily maintenance and cleaning report.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{cell_opt_string, cell_string, ApprovalStatus, Report, Sheet};

/// Editable column headers of the `Maintenance_Report` sheet.
pub mod columns {
    pub const DAY: &str = "اليوم";
    pub const CLEANING_COUNT: &str = "أعمال_النظافة_عدد";
    pub const MAINTENANCE_COUNT: &str = "أعمال_الصيانة_عدد";
    pub const WATER_CARTONS: &str = "عدد_كراتين_الماء_الواقعي";
    pub const CLEANING_NARRATIVE: &str = "أعمال_النظافة_سرد";
    pub const MAINTENANCE_NARRATIVE: &str = "أعمال_الصيانة_سرد";

    pub const TEXT: [&str; 2] = [CLEANING_NARRATIVE, MAINTENANCE_NARRATIVE];
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MaintenanceReport {
    #[serde(default, deserialize_with = "cell_string")]
    pub record_id: String,
    #[serde(default, deserialize_with = "cell_string")]
    pub mosque_code: String,
    #[serde(rename = "المسجد", default, deserialize_with = "cell_string")]
    pub mosque_name: String,
    #[serde(rename = "اليوم", default, deserialize_with = "cell_string")]
    pub day: String,
    /// Timestamp the draft was opened, RFC 3339.
    #[serde(rename = "التاريخ", default, deserialize_with = "cell_string")]
    pub date: String,
    #[serde(rename = "أعمال_النظافة_عدد", default, deserialize_with = "cell_string")]
    pub cleaning_count: String,
    #[serde(rename = "أعمال_الصيانة_عدد", default, deserialize_with = "cell_string")]
    pub maintenance_count: String,
    #[serde(rename = "عدد_كراتين_الماء_الواقعي", default, deserialize_with = "cell_string")]
    pub water_cartons: String,
    #[serde(rename = "أعمال_النظافة_سرد", default, deserialize_with = "cell_string")]
    pub cleaning_narrative: String,
    #[serde(rename = "أعمال_الصيانة_سرد", default, deserialize_with = "cell_string")]
    pub maintenance_narrative: String,
    #[serde(rename = "الاعتماد", default)]
    pub approval: ApprovalStatus,
    #[serde(
        default,
        deserialize_with = "cell_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MaintenanceReport {
    pub fn column_mut(&mut self, column: &str) -> Option<&mut String> {
        use columns::*;

        let field = match column {
            CLEANING_COUNT => &mut self.cleaning_count,
            MAINTENANCE_COUNT => &mut self.maintenance_count,
            WATER_CARTONS => &mut self.water_cartons,
            CLEANING_NARRATIVE => &mut self.cleaning_narrative,
            MAINTENANCE_NARRATIVE => &mut self.maintenance_narrative,
            _ => return None,
        };
        Some(field)
    }
}

impl Report for MaintenanceReport {
    const SHEET: Sheet = Sheet::MaintenanceReport;

    fn record_id(&self) -> &str {
        &self.record_id
    }

    fn site_name(&self) -> &str {
        &self.mosque_name
    }

    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    fn approval(&self) -> ApprovalStatus {
        self.approval
    }

    fn set_approval(&mut self, status: ApprovalStatus) {
        self.approval = status;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.mosque_name]
    }
}
