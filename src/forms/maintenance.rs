use chrono::{DateTime, SecondsFormat, Utc};

use super::{form_state, normalize_digits, FieldErrors, FormError, FormView, InvalidForm, Sections, SiteGate};
use crate::models::maintenance::columns;
use crate::models::{find_period, find_site, ApprovalStatus, MaintenanceReport, PeriodDirectoryEntry, SiteDirectoryEntry};

const DAY_REQUIRED: &str = "يرجى اختيار اليوم";

/// Controller for the maintenance report form.
#[derive(Debug, Clone)]
pub struct MaintenanceForm {
    draft: MaintenanceReport,
    gate: SiteGate,
    errors: FieldErrors,
    admin: bool,
    submitting: bool,
}

impl MaintenanceForm {
    pub fn new(admin: bool, now: DateTime<Utc>) -> Self {
        let draft = MaintenanceReport {
            record_id: format!("MNT-{}", now.timestamp_millis()),
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            ..MaintenanceReport::default()
        };
        Self::with_draft(draft, admin)
    }

    pub fn edit(record: MaintenanceReport, admin: bool) -> Self {
        Self::with_draft(record, admin)
    }

    fn with_draft(draft: MaintenanceReport, admin: bool) -> Self {
        let gate = SiteGate::new(admin, draft.mosque_code.clone());
        Self {
            draft,
            gate,
            errors: FieldErrors::new(),
            admin,
            submitting: false,
        }
    }

    pub fn draft(&self) -> &MaintenanceReport {
        &self.draft
    }

    pub fn select_site(&mut self, code: &str, sites: &[SiteDirectoryEntry]) {
        self.gate.select_site(code, sites);
        self.draft.mosque_code = code.to_string();
        self.draft.mosque_name = find_site(sites, code)
            .map(|s| s.name.clone())
            .unwrap_or_default();
    }

    pub fn enter_password(&mut self, entered: &str, sites: &[SiteDirectoryEntry]) {
        self.gate.enter_password(entered, sites);
    }

    /// Select the day by code; the record stores its label.
    pub fn select_day(
        &mut self,
        code: &str,
        periods: &[PeriodDirectoryEntry],
    ) -> Result<(), FormError> {
        self.gate.ensure_unlocked()?;
        self.draft.day = find_period(periods, code)
            .map(|p| p.label.clone())
            .unwrap_or_default();
        self.errors.remove(columns::DAY);
        Ok(())
    }

    pub fn set_field(&mut self, column: &str, value: &str) -> Result<(), FormError> {
        self.gate.ensure_unlocked()?;

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

    pub fn submit(&mut self) -> Result<MaintenanceReport, FormError> {
        self.gate.ensure_unlocked()?;

        if self.draft.day.trim().is_empty() {
            let mut errors = FieldErrors::new();
            errors.insert(columns::DAY.to_string(), DAY_REQUIRED.to_string());
            self.errors = errors.clone();
            return Err(FormError::Invalid(InvalidForm {
                errors,
                scroll_to_top: false,
            }));
        }

        self.errors.clear();
        self.submitting = true;
        Ok(self.draft.clone())
    }

    pub fn submit_failed(&mut self) {
        self.submitting = false;
    }

    pub fn view(&self) -> FormView<'_, MaintenanceReport> {
        FormView {
            kind: "maintenance",
            state: form_state(&self.gate, self.submitting),
            site_code: self.gate.site_code(),
            draft: &self.draft,
            errors: &self.errors,
            sections: Sections {
                attendance: None,
                retreat: None,
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
        vec![SiteDirectoryEntry {
            mosque_code: "M1".into(),
            name: "جامع النور".into(),
            site_type: "مسجد".into(),
            pwd: "1111".into(),
        }]
    }

    fn periods() -> Vec<PeriodDirectoryEntry> {
        vec![PeriodDirectoryEntry {
            code_day: "D3".into(),
            label: "اليوم الثالث".into(),
        }]
    }

    #[test]
    fn test_new_draft() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 8, 30, 0).unwrap();
        let form = MaintenanceForm::new(false, now);

        assert_eq!(form.draft().record_id, format!("MNT-{}", now.timestamp_millis()));
        assert_eq!(form.draft().date, "2026-03-01T08:30:00.000Z");
        assert_eq!(form.view().state, FormState::Locked);
        assert!(form.view().sections.retreat.is_none());
    }

    #[test]
    fn test_full_flow() {
        let mut form = MaintenanceForm::new(false, Utc::now());
        form.select_site("M1", &sites());
        assert_eq!(form.draft().mosque_name, "جامع النور");
        form.enter_password("1111", &sites());

        form.set_field(columns::CLEANING_COUNT, "۱۲").unwrap();
        form.set_field(columns::CLEANING_NARRATIVE, "تنظيف السجاد").unwrap();
        form.select_day("D3", &periods()).unwrap();

        let record = form.submit().unwrap();
        assert_eq!(record.cleaning_count, "12");
        assert_eq!(record.cleaning_narrative, "تنظيف السجاد");
        assert_eq!(record.day, "اليوم الثالث");
    }

    #[test]
    fn test_submit_without_day() {
        let mut form = MaintenanceForm::new(true, Utc::now());
        let Err(FormError::Invalid(invalid)) = form.submit() else {
            panic!("expected validation error");
        };
        assert_eq!(invalid.errors.len(), 1);
        assert!(invalid.errors.contains_key("اليوم"));
        assert!(!invalid.scroll_to_top);
    }

    #[test]
    fn test_changing_site_relocks() {
        let mut form = MaintenanceForm::new(false, Utc::now());
        form.select_site("M1", &sites());
        form.enter_password("1111", &sites());
        assert_eq!(form.view().state, FormState::Unlocked);

        form.select_site("M1", &sites());
        assert_eq!(form.view().state, FormState::Locked);
    }
}
