//! Daily field report submitted for one site and one day/night.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{cell_opt_string, cell_string, ApprovalStatus, Report, Sheet, SITE_TYPE_FARM};

/// Column headers of the `daily_mosque_report` sheet that forms can edit.
pub mod columns {
    pub const ATTENDEES_MEN: &str = "عدد_المصلين_رجال";
    pub const ATTENDEES_WOMEN: &str = "عدد_المصلين_نساء";
    pub const IFTAR_SUPPORTED: &str = "عدد_وجبات_افطار_المدعومة";
    pub const IFTAR_ACTUAL: &str = "عدد_وجبات_الافطار_فعلي";
    pub const WATER_CARTONS: &str = "عدد_كراتين_ماء";
    pub const GUEST_BENEFICIARIES: &str = "عدد_مستفيدي_الضيافة";
    pub const CIRCLE_STUDENTS_MALE: &str = "عدد_طلاب_الحلقات";
    pub const CIRCLE_PAGES_MALE: &str = "عدد_الاوجه_طلاب";
    pub const CIRCLE_STUDENTS_FEMALE: &str = "عدد_طالبات_الحلقات";
    pub const CIRCLE_PAGES_FEMALE: &str = "عدد_الاوجه_طالبات";
    pub const LECTURES_MEN: &str = "عدد_الكلمات_الرجالية";
    pub const LECTURES_WOMEN: &str = "عدد_الكلمات_النسائية";
    pub const LECTURE_ATTENDEES: &str = "عدد_مستفيدي_الكلمات";
    pub const COMPETITIONS: &str = "عدد_المسابقات";
    pub const NURSERY_CHILDREN: &str = "عدد_اطفال_الحضانة";
    pub const SUPERVISORS: &str = "عدد المشرفين";
    pub const VOLUNTEERS: &str = "عدد_المتطوعين";
    pub const COMMUNITY_PROGRAM: &str = "البرنامج_المجتمعي";
    pub const COMMUNITY_BENEFICIARIES: &str = "عدد_المستفيدين";
    pub const PROGRAM_DESCRIPTION: &str = "وصف_البرنامج";
    pub const RETREAT_MEN: &str = "عدد_المعتكفين_رجال";
    pub const SUHOOR_MEN: &str = "عدد_وجبات_السحور_رجال";
    pub const RETREAT_WOMEN: &str = "عدد_المعتكفين_نساء";
    pub const SUHOOR_WOMEN: &str = "عدد_وجبات_السحور_نساء";
    pub const NOTES: &str = "ملاحظات";
    pub const DAY_LABEL: &str = "label_day";

    /// Attendee counts, hidden on farm sites.
    pub const ATTENDANCE: [&str; 2] = [ATTENDEES_MEN, ATTENDEES_WOMEN];

    /// Seclusion/retreat and suhoor counts, shown only late in the month.
    pub const RETREAT: [&str; 4] = [RETREAT_MEN, SUHOOR_MEN, RETREAT_WOMEN, SUHOOR_WOMEN];

    /// Free-text columns. Every other editable column is numeric.
    pub const TEXT: [&str; 3] = [COMMUNITY_PROGRAM, PROGRAM_DESCRIPTION, NOTES];
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FieldReport {
    #[serde(default, deserialize_with = "cell_string")]
    pub record_id: String,
    #[serde(default, deserialize_with = "cell_string")]
    pub mosque_code: String,
    #[serde(rename = "المسجد", default, deserialize_with = "cell_string")]
    pub mosque_name: String,
    #[serde(rename = "نوع الموقع", default, deserialize_with = "cell_string")]
    pub site_type: String,
    #[serde(default, deserialize_with = "cell_string")]
    pub code_day: String,
    #[serde(default, deserialize_with = "cell_string")]
    pub label_day: String,
    #[serde(rename = "تاريخ_هجري", default, deserialize_with = "cell_string")]
    pub hijri_date: String,

    #[serde(rename = "عدد_المصلين_رجال", default, deserialize_with = "cell_string")]
    pub attendees_men: String,
    #[serde(rename = "عدد_المصلين_نساء", default, deserialize_with = "cell_string")]
    pub attendees_women: String,
    #[serde(rename = "عدد_وجبات_افطار_المدعومة", default, deserialize_with = "cell_string")]
    pub iftar_supported: String,
    #[serde(rename = "عدد_وجبات_الافطار_فعلي", default, deserialize_with = "cell_string")]
    pub iftar_actual: String,
    #[serde(rename = "عدد_كراتين_ماء", default, deserialize_with = "cell_string")]
    pub water_cartons: String,
    #[serde(rename = "عدد_مستفيدي_الضيافة", default, deserialize_with = "cell_string")]
    pub guest_beneficiaries: String,

    #[serde(rename = "عدد_طلاب_الحلقات", default, deserialize_with = "cell_string")]
    pub circle_students_male: String,
    #[serde(rename = "عدد_الاوجه_طلاب", default, deserialize_with = "cell_string")]
    pub circle_pages_male: String,
    #[serde(rename = "عدد_طالبات_الحلقات", default, deserialize_with = "cell_string")]
    pub circle_students_female: String,
    #[serde(rename = "عدد_الاوجه_طالبات", default, deserialize_with = "cell_string")]
    pub circle_pages_female: String,

    #[serde(rename = "عدد_الكلمات_الرجالية", default, deserialize_with = "cell_string")]
    pub lectures_men: String,
    #[serde(rename = "عدد_الكلمات_النسائية", default, deserialize_with = "cell_string")]
    pub lectures_women: String,
    #[serde(rename = "عدد_مستفيدي_الكلمات", default, deserialize_with = "cell_string")]
    pub lecture_attendees: String,
    #[serde(rename = "عدد_المسابقات", default, deserialize_with = "cell_string")]
    pub competitions: String,
    #[serde(rename = "عدد_اطفال_الحضانة", default, deserialize_with = "cell_string")]
    pub nursery_children: String,

    #[serde(rename = "عدد المشرفين", default, deserialize_with = "cell_string")]
    pub supervisors: String,
    #[serde(rename = "عدد_المتطوعين", default, deserialize_with = "cell_string")]
    pub volunteers: String,

    #[serde(rename = "البرنامج_المجتمعي", default, deserialize_with = "cell_string")]
    pub community_program: String,
    #[serde(rename = "عدد_المستفيدين", default, deserialize_with = "cell_string")]
    pub community_beneficiaries: String,
    #[serde(rename = "وصف_البرنامج", default, deserialize_with = "cell_string")]
    pub program_description: String,

    #[serde(rename = "عدد_المعتكفين_رجال", default, deserialize_with = "cell_string")]
    pub retreat_men: String,
    #[serde(rename = "عدد_وجبات_السحور_رجال", default, deserialize_with = "cell_string")]
    pub suhoor_men: String,
    #[serde(rename = "عدد_المعتكفين_نساء", default, deserialize_with = "cell_string")]
    pub retreat_women: String,
    #[serde(rename = "عدد_وجبات_السحور_نساء", default, deserialize_with = "cell_string")]
    pub suhoor_women: String,

    #[serde(rename = "الاعتماد", default)]
    pub approval: ApprovalStatus,
    #[serde(rename = "ملاحظات", default, deserialize_with = "cell_string")]
    pub notes: String,
    #[serde(
        default,
        deserialize_with = "cell_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,

    /// Columns this portal does not model, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FieldReport {
    pub fn is_farm(&self) -> bool {
        self.site_type == SITE_TYPE_FARM
    }

    /// Mutable access to an editable column by its header.
    pub fn column_mut(&mut self, column: &str) -> Option<&mut String> {
        use columns::*;

        let field = match column {
            ATTENDEES_MEN => &mut self.attendees_men,
            ATTENDEES_WOMEN => &mut self.attendees_women,
            IFTAR_SUPPORTED => &mut self.iftar_supported,
            IFTAR_ACTUAL => &mut self.iftar_actual,
            WATER_CARTONS => &mut self.water_cartons,
            GUEST_BENEFICIARIES => &mut self.guest_beneficiaries,
            CIRCLE_STUDENTS_MALE => &mut self.circle_students_male,
            CIRCLE_PAGES_MALE => &mut self.circle_pages_male,
            CIRCLE_STUDENTS_FEMALE => &mut self.circle_students_female,
            CIRCLE_PAGES_FEMALE => &mut self.circle_pages_female,
            LECTURES_MEN => &mut self.lectures_men,
            LECTURES_WOMEN => &mut self.lectures_women,
            LECTURE_ATTENDEES => &mut self.lecture_attendees,
            COMPETITIONS => &mut self.competitions,
            NURSERY_CHILDREN => &mut self.nursery_children,
            SUPERVISORS => &mut self.supervisors,
            VOLUNTEERS => &mut self.volunteers,
            COMMUNITY_PROGRAM => &mut self.community_program,
            COMMUNITY_BENEFICIARIES => &mut self.community_beneficiaries,
            PROGRAM_DESCRIPTION => &mut self.program_description,
            RETREAT_MEN => &mut self.retreat_men,
            SUHOOR_MEN => &mut self.suhoor_men,
            RETREAT_WOMEN => &mut self.retreat_women,
            SUHOOR_WOMEN => &mut self.suhoor_women,
            NOTES => &mut self.notes,
            _ => return None,
        };
        Some(field)
    }
}

impl Report for FieldReport {
    const SHEET: Sheet = Sheet::DailyMosqueReport;

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
        vec![&self.mosque_name, &self.label_day]
    }
}
