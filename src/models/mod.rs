//! Data models for the Ramadan field portal.
//!
//! Records are keyed by the spreadsheet column headers the data gateway uses, so
//! they serialize straight back into the sheet they were read from.

mod approval;
mod cell;
mod directory;
pub mod field_report;
mod koan;
pub mod maintenance;
mod snapshot;

pub use approval::*;
pub use cell::*;
pub use directory::*;
pub use field_report::FieldReport;
pub use koan::*;
pub use maintenance::MaintenanceReport;
pub use snapshot::*;

use serde::Serialize;

/// Target collection of a save request, sent as the `sheet` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sheet {
    #[serde(rename = "daily_mosque_report")]
    DailyMosqueReport,
    #[serde(rename = "Maintenance_Report")]
    MaintenanceReport,
}

impl Sheet {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sheet::DailyMosqueReport => "daily_mosque_report",
            Sheet::MaintenanceReport => "Maintenance_Report",
        }
    }
}

/// Behaviour shared by the two submittable report kinds.
pub trait Report: Clone + Serialize + Send + Sync + 'static {
    /// Sheet the record is upserted into.
    const SHEET: Sheet;

    fn record_id(&self) -> &str;

    fn site_name(&self) -> &str;

    /// Raw creation timestamp as stored by the gateway, if any.
    fn created_at(&self) -> Option<&str>;

    fn approval(&self) -> ApprovalStatus;

    fn set_approval(&mut self, status: ApprovalStatus);

    /// Text fields a list search term is matched against.
    fn search_fields(&self) -> Vec<&str>;
}
