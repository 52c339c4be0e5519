//! Reviewer disposition on a submitted report.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Approval status. Any value may be set to any other by a reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Resubmit,
}

impl ApprovalStatus {
    /// Wire value stored in the `الاعتماد` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "قيد المراجعة",
            ApprovalStatus::Approved => "يعتمد",
            ApprovalStatus::Rejected => "مرفوض",
            ApprovalStatus::Resubmit => "يعاد التقرير",
        }
    }

    /// Parse a cell value. Empty and unrecognized values read as pending.
    pub fn from_cell(s: &str) -> Self {
        match s.trim() {
            "يعتمد" | "معتمد" => ApprovalStatus::Approved,
            "مرفوض" => ApprovalStatus::Rejected,
            "يعاد التقرير" => ApprovalStatus::Resubmit,
            "" | "قيد المراجعة" => ApprovalStatus::Pending,
            other => {
                tracing::debug!(status = other, "Unrecognized approval status, treating as pending");
                ApprovalStatus::Pending
            }
        }
    }

    /// Parse the portal's own API spelling (`pending`, `approved`, ...).
    pub fn from_api(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ApprovalStatus::Pending),
            "approved" => Some(ApprovalStatus::Approved),
            "rejected" => Some(ApprovalStatus::Rejected),
            "resubmit" => Some(ApprovalStatus::Resubmit),
            _ => None,
        }
    }
}

impl Serialize for ApprovalStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ApprovalStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = super::cell_string(deserializer)?;
        Ok(ApprovalStatus::from_cell(&raw))
    }
}
