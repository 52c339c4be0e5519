use chrono::{DateTime, Utc};

use super::{form_state, normalize_digits, FieldErrors, FormError, FormView, InvalidForm, Sections, SiteGate};
use crate::hijri;
use crate::models::field_report::columns;
use crate::models::{find_period, find_site, ApprovalStatus, FieldReport, PeriodDirectoryEntry, SiteDirectoryEntry};

/// Day labels of the last third of Ramadan. Selecting one of them shows the
/// seclusion/retreat section.
pub const LATE_RAMADAN_DAYS: [&str; 11] = [
    "اليوم العشرون",
    "اليوم الحادي والعشرون",
    "اليوم الثاني والعشرون",
    "اليوم الثالث والعشرون",
    "اليوم الرابع والعشرون",
    "اليوم الخامس والعشرون",
    "اليوم السادس والعشرون",
    "اليوم السابع والعشرون",
    "اليوم الثامن والعشرون",
    "اليوم التاسع والعشرون",
    "اليوم الثلاثون",
];

const DAY_REQUIRED: &str = "يجب اختيار اليوم أو الليلة (حقل إلزامي)";

/// Controller for the daily field report form.
#[derive(Debug, Clone)]
pub struct FieldReportForm {
    draft: FieldReport,
    gate: SiteGate,
    errors: FieldErrors,
    admin: bool,
    submitting: bool,
}

impl FieldReportForm {
    /// Empty draft with a fresh record id and today's Hijri date.
    pub fn new(admin: bool, now: DateTime<Utc>) -> Self {
        let draft = FieldReport {
            record_id: format!("MRJ-{}", now.timestamp_millis()),
            hijri_date: hijri::HijriDate::from_gregorian(now.date_naive())
                .map(|date| date.to_arabic_string())
                .unwrap_or_default(),
            ..FieldReport::default()
        };
        Self::with_draft(draft, admin)
    }

    /// Draft copied from an existing record.
    pub fn edit(record: FieldReport, admin: bool) -> Self {
        Self::with_draft(record, admin)
    }

    fn with_draft(draft: FieldReport, admin: bool) -> Self {
        let gate = SiteGate::new(admin, draft.mosque_code.clone());
        Self {
            draft,
            gate,
            errors: FieldErrors::new(),
            admin,
            submitting: false,
        }
    }

    pub fn draft(&self) -> &FieldReport {
        &self.draft
    }

    pub fn select_site(&mut self, code: &str, sites: &[SiteDirectoryEntry]) {
        self.gate.select_site(code, sites);
        if let Some(site) = find_site(sites, code) {
            self.draft.mosque_code = site.mosque_code.clone();
            self.draft.mosque_name = site.name.clone();
            self.draft.site_type = site.site_type.clone();
        }
    }

    pub fn enter_password(&mut self, entered: &str, sites: &[SiteDirectoryEntry]) {
        self.gate.enter_password(entered, sites);
    }

    /// Select the reporting day/night by code. Unknown codes clear the label.
    pub fn select_day(
        &mut self,
        code: &str,
        periods: &[PeriodDirectoryEntry],
    ) -> Result<(), FormError> {
        self.gate.ensure_unlocked()?;
        self.draft.code_day = code.to_string();
        self.draft.label_day = find_period(periods, code)
            .map(|p| p.label.clone())
            .unwrap_or_default();
        self.errors.remove(columns::DAY_LABEL);
        Ok(())
    }

    /// Update one column. Numeric columns are normalized to ASCII digits.
    pub fn set_field(&mut self, column: &str, value: &str) -> Result<(), FormError> {
        self.gate.ensure_unlocked()?;

        if columns::ATTENDANCE.contains(&column) && !self.shows_attendance() {
            return Err(FormError::Hidden(column.to_string()));
        }
        if columns::RETREAT.contains(&column) && !self.shows_retreat() {
            return Err(FormError::Hidden(column.to_string()));
        }

        let numeric = !columns::TEXT.contains(&column);
        let field = self
            .draft
            .column_mut(column)
            .ok_or_else(|| FormError::UnknownField(column.to_string()))?;
        *field = if numeric {
            normalize_digits(value)
        } else {
            value.to_string()
        };

        self.errors.remove(column);
        Ok(())
    }

    pub fn set_approval(&mut self, status: ApprovalStatus) -> Result<(), FormError> {
        if !self.admin {
            return Err(FormError::AdminOnly);
        }
        self.draft.approval = status;
        Ok(())
    }

    /// Farm sites do not report attendees.
    pub fn shows_attendance(&self) -> bool {
        !self.draft.is_farm()
    }

    pub fn shows_retreat(&self) -> bool {
        self.admin
            || LATE_RAMADAN_DAYS
                .iter()
                .any(|label| self.draft.label_day.contains(label))
    }

    /// Validate and hand back the record to save.
    pub fn submit(&mut self) -> Result<FieldReport, FormError> {
        self.gate.ensure_unlocked()?;

        if self.draft.label_day.trim().is_empty() {
            let mut errors = FieldErrors::new();
            errors.insert(columns::DAY_LABEL.to_string(), DAY_REQUIRED.to_string());
            self.errors = errors.clone();
            return Err(FormError::Invalid(InvalidForm {
                errors,
                scroll_to_top: true,
            }));
        }

        self.errors.clear();
        self.submitting = true;
        Ok(self.draft.clone())
    }

    /// Return to the editable state after a failed save.
    pub fn submit_failed(&mut self) {
        self.submitting = false;
    }

    pub fn view(&self) -> FormView<'_, FieldReport> {
        FormView {
            kind: "fieldReport",
            state: form_state(&self.gate, self.submitting),
            site_code: self.gate.site_code(),
            draft: &self.draft,
            errors: &self.errors,
            sections: Sections {
                attendance: Some(self.shows_attendance()),
                retreat: Some(self.shows_retreat()),
                approval: self.admin,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FormState;
    use chrono::TimeZone;

    fn sites() -> Vec<SiteDirectoryEntry> {
        vec![
            SiteDirectoryEntry {
                mosque_code: "M1".into(),
                name: "جامع النور".into(),
                site_type: "مسجد".into(),
                pwd: "1111".into(),
            },
            SiteDirectoryEntry {
                mosque_code: "F1".into(),
                name: "مزرعة البركة".into(),
                site_type: "مزرعة".into(),
                pwd: "3333".into(),
            },
        ]
    }

    fn periods() -> Vec<PeriodDirectoryEntry> {
        vec![
            PeriodDirectoryEntry {
                code_day: "D1".into(),
                label: "اليوم الأول".into(),
            },
            PeriodDirectoryEntry {
                code_day: "D21".into(),
                label: "اليوم الحادي والعشرون".into(),
            },
        ]
    }

    fn unlocked(code: &str, pwd: &str) -> FieldReportForm {
        let mut form = FieldReportForm::new(false, Utc::now());
        form.select_site(code, &sites());
        form.enter_password(pwd, &sites());
        form
    }

    #[test]
    fn test_new_draft_defaults() {
        let now = Utc.with_ymd_and_hms(2026, 2, 18, 12, 0, 0).unwrap();
        let form = FieldReportForm::new(false, now);
        let draft = form.draft();

        assert_eq!(draft.record_id, format!("MRJ-{}", now.timestamp_millis()));
        assert_eq!(draft.hijri_date, "١ رمضان ١٤٤٧");
        assert_eq!(draft.attendees_men, "");
        assert_eq!(draft.approval, ApprovalStatus::Pending);
        assert_eq!(form.view().state, FormState::Locked);
    }

    #[test]
    fn test_locked_form_rejects_edits() {
        let mut form = FieldReportForm::new(false, Utc::now());
        assert_eq!(
            form.set_field(columns::ATTENDEES_MEN, "5"),
            Err(FormError::Locked)
        );
        assert_eq!(form.select_day("D1", &periods()), Err(FormError::Locked));
        assert_eq!(form.submit(), Err(FormError::Locked));
    }

    #[test]
    fn test_select_site_copies_directory_fields() {
        let form = unlocked("F1", "3333");
        assert_eq!(form.draft().mosque_code, "F1");
        assert_eq!(form.draft().mosque_name, "مزرعة البركة");
        assert!(form.draft().is_farm());
        assert_eq!(form.view().state, FormState::Unlocked);
    }

    #[test]
    fn test_numeric_fields_are_normalized() {
        let mut form = unlocked("M1", "1111");
        form.set_field(columns::ATTENDEES_MEN, "٢٥٠ مصلٍ").unwrap();
        form.set_field(columns::NOTES, "ازدحام ٣").unwrap();

        assert_eq!(form.draft().attendees_men, "250");
        assert_eq!(form.draft().notes, "ازدحام ٣");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut form = unlocked("M1", "1111");
        assert_eq!(
            form.set_field("record_id", "X"),
            Err(FormError::UnknownField("record_id".into()))
        );
    }

    #[test]
    fn test_farm_hides_attendance() {
        let mut form = unlocked("F1", "3333");
        assert!(!form.shows_attendance());
        assert_eq!(
            form.set_field(columns::ATTENDEES_WOMEN, "4"),
            Err(FormError::Hidden(columns::ATTENDEES_WOMEN.into()))
        );
        form.set_field(columns::IFTAR_SUPPORTED, "40").unwrap();
    }

    #[test]
    fn test_retreat_section_visibility() {
        let mut form = unlocked("M1", "1111");
        assert!(!form.shows_retreat());

        form.select_day("D1", &periods()).unwrap();
        assert!(!form.shows_retreat());
        assert!(matches!(
            form.set_field(columns::RETREAT_MEN, "3"),
            Err(FormError::Hidden(_))
        ));

        form.select_day("D21", &periods()).unwrap();
        assert!(form.shows_retreat());
        form.set_field(columns::RETREAT_MEN, "3").unwrap();
    }

    #[test]
    fn test_retreat_section_for_every_late_label() {
        for label in LATE_RAMADAN_DAYS {
            let mut form = unlocked("M1", "1111");
            let periods = vec![PeriodDirectoryEntry {
                code_day: "X".into(),
                label: label.into(),
            }];
            form.select_day("X", &periods).unwrap();
            assert!(form.shows_retreat(), "{label}");
        }
    }

    #[test]
    fn test_admin_sees_retreat_and_approval() {
        let mut form = FieldReportForm::new(true, Utc::now());
        assert!(form.shows_retreat());
        assert!(form.view().sections.approval);
        form.set_approval(ApprovalStatus::Approved).unwrap();
        assert_eq!(form.draft().approval, ApprovalStatus::Approved);
    }

    #[test]
    fn test_non_admin_cannot_set_approval() {
        let mut form = unlocked("M1", "1111");
        assert_eq!(
            form.set_approval(ApprovalStatus::Approved),
            Err(FormError::AdminOnly)
        );
    }

    #[test]
    fn test_submit_without_day_sets_one_error() {
        let mut form = unlocked("M1", "1111");
        let err = form.submit().unwrap_err();

        let FormError::Invalid(invalid) = err else {
            panic!("expected validation error");
        };
        assert_eq!(invalid.errors.len(), 1);
        assert!(invalid.errors.contains_key("label_day"));
        assert!(invalid.scroll_to_top);
        assert_eq!(form.view().errors.len(), 1);
        assert_eq!(form.view().state, FormState::Unlocked);
    }

    #[test]
    fn test_blank_day_label_counts_as_missing() {
        let mut form = unlocked("M1", "1111");
        form.draft.label_day = "   ".into();

        assert!(matches!(form.submit(), Err(FormError::Invalid(_))));
        assert!(form.view().errors.contains_key("label_day"));
    }

    #[test]
    fn test_selecting_day_clears_error_and_submit_succeeds() {
        let mut form = unlocked("M1", "1111");
        let _ = form.submit();
        form.select_day("D1", &periods()).unwrap();
        assert!(form.view().errors.is_empty());

        let record = form.submit().unwrap();
        assert_eq!(record.code_day, "D1");
        assert_eq!(record.label_day, "اليوم الأول");
        assert_eq!(form.view().state, FormState::Submitting);

        form.submit_failed();
        assert_eq!(form.view().state, FormState::Unlocked);
    }

    #[test]
    fn test_editing_existing_record_requires_password() {
        let record = FieldReport {
            record_id: "MRJ-1".into(),
            mosque_code: "M1".into(),
            mosque_name: "جامع النور".into(),
            ..FieldReport::default()
        };

        let mut form = FieldReportForm::edit(record.clone(), false);
        assert_eq!(form.view().state, FormState::Locked);
        form.enter_password("1111", &sites());
        assert_eq!(form.view().state, FormState::Unlocked);

        let admin_form = FieldReportForm::edit(record, true);
        assert_eq!(admin_form.view().state, FormState::Unlocked);
    }
}
