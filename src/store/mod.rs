//! Client data store: the last snapshot read from the gateway plus the
//! portal's view state.
//!
//! All state lives behind one async mutex. Gateway calls are made without
//! holding it, so a slow gateway never blocks readers.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;

use crate::errors::AppError;
use crate::forms::{FieldReportForm, MaintenanceForm};
use crate::gateway::DataGateway;
use crate::models::{ApprovalStatus, FieldReport, MaintenanceReport, Report, SaveResponse, Sheets};

pub const LOAD_FAILED: &str = "فشل في تحميل البيانات";
pub const SYNC_FAILED: &str = "فشل في مزامنة البيانات";
pub const SAVED: &str = "تم حفظ التقرير بنجاح";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient message shown until dismissed or replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: &str) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.to_string(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.to_string(),
        }
    }
}

/// Screen names as exchanged with the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    Dashboard,
    RecordList,
    RecordForm,
    MaintenanceForm,
    MaintenanceList,
}

/// The one screen currently shown. Form screens own the form being edited,
/// so no draft can outlive its screen.
#[derive(Debug, Clone, Default)]
pub enum View {
    #[default]
    Dashboard,
    RecordList,
    MaintenanceList,
    RecordForm(Box<FieldReportForm>),
    MaintenanceForm(Box<MaintenanceForm>),
}

impl View {
    pub fn screen(&self) -> Screen {
        match self {
            View::Dashboard => Screen::Dashboard,
            View::RecordList => Screen::RecordList,
            View::MaintenanceList => Screen::MaintenanceList,
            View::RecordForm(_) => Screen::RecordForm,
            View::MaintenanceForm(_) => Screen::MaintenanceForm,
        }
    }

    /// Serializable view of the open form, if any.
    pub fn form_json(&self) -> Result<Option<serde_json::Value>, AppError> {
        let value = match self {
            View::RecordForm(form) => serde_json::to_value(form.view()),
            View::MaintenanceForm(form) => serde_json::to_value(form.view()),
            _ => return Ok(None),
        };
        value
            .map(Some)
            .map_err(|e| AppError::Internal(format!("Failed to encode form: {}", e)))
    }

    /// Put the open form back into its editable state.
    fn submit_failed(&mut self, record_id: &str) {
        match self {
            View::RecordForm(form) if form.draft().record_id == record_id => form.submit_failed(),
            View::MaintenanceForm(form) if form.draft().record_id == record_id => {
                form.submit_failed()
            }
            _ => {}
        }
    }
}

/// A validated draft on its way to the gateway.
#[derive(Debug, Clone)]
pub enum Submission {
    FieldReport(FieldReport),
    Maintenance(MaintenanceReport),
}

#[derive(Debug, Default)]
pub struct PortalState {
    pub sheets: Sheets,
    pub view: View,
    pub admin: bool,
    pub notification: Option<Notification>,
}

impl PortalState {
    /// Navigate to a screen that carries no form.
    pub fn show(&mut self, screen: Screen) -> Result<(), AppError> {
        self.view = match screen {
            Screen::Dashboard => View::Dashboard,
            Screen::RecordList => View::RecordList,
            Screen::MaintenanceList => View::MaintenanceList,
            Screen::RecordForm | Screen::MaintenanceForm => {
                return Err(AppError::BadRequest(
                    "Forms are opened through /api/forms".to_string(),
                ))
            }
        };
        Ok(())
    }

    /// Open the field report form, empty or on a copy of an existing record.
    pub fn open_field_report(&mut self, record_id: Option<&str>) -> Result<(), AppError> {
        let form = match record_id {
            Some(id) => {
                let record = self
                    .sheets
                    .field_reports
                    .iter()
                    .find(|r| r.record_id == id)
                    .cloned()
                    .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;
                FieldReportForm::edit(record, self.admin)
            }
            None => FieldReportForm::new(self.admin, Utc::now()),
        };
        tracing::debug!(record_id = %form.draft().record_id, "Opened field report form");
        self.view = View::RecordForm(Box::new(form));
        Ok(())
    }

    pub fn open_maintenance(&mut self, record_id: Option<&str>) -> Result<(), AppError> {
        let form = match record_id {
            Some(id) => {
                let record = self
                    .sheets
                    .maintenance_reports
                    .iter()
                    .find(|r| r.record_id == id)
                    .cloned()
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Maintenance report {} not found", id))
                    })?;
                MaintenanceForm::edit(record, self.admin)
            }
            None => MaintenanceForm::new(self.admin, Utc::now()),
        };
        tracing::debug!(record_id = %form.draft().record_id, "Opened maintenance form");
        self.view = View::MaintenanceForm(Box::new(form));
        Ok(())
    }

    pub fn select_site(&mut self, code: &str) -> Result<(), AppError> {
        match &mut self.view {
            View::RecordForm(form) => form.select_site(code, &self.sheets.sites),
            View::MaintenanceForm(form) => form.select_site(code, &self.sheets.sites),
            _ => return Err(AppError::NoActiveForm),
        }
        Ok(())
    }

    pub fn enter_password(&mut self, entered: &str) -> Result<(), AppError> {
        match &mut self.view {
            View::RecordForm(form) => form.enter_password(entered, &self.sheets.sites),
            View::MaintenanceForm(form) => form.enter_password(entered, &self.sheets.sites),
            _ => return Err(AppError::NoActiveForm),
        }
        Ok(())
    }

    pub fn select_day(&mut self, code: &str) -> Result<(), AppError> {
        match &mut self.view {
            View::RecordForm(form) => form.select_day(code, &self.sheets.periods)?,
            View::MaintenanceForm(form) => form.select_day(code, &self.sheets.periods)?,
            _ => return Err(AppError::NoActiveForm),
        }
        Ok(())
    }

    pub fn set_field(&mut self, column: &str, value: &str) -> Result<(), AppError> {
        match &mut self.view {
            View::RecordForm(form) => form.set_field(column, value)?,
            View::MaintenanceForm(form) => form.set_field(column, value)?,
            _ => return Err(AppError::NoActiveForm),
        }
        Ok(())
    }

    pub fn set_approval(&mut self, status: ApprovalStatus) -> Result<(), AppError> {
        match &mut self.view {
            View::RecordForm(form) => form.set_approval(status)?,
            View::MaintenanceForm(form) => form.set_approval(status)?,
            _ => return Err(AppError::NoActiveForm),
        }
        Ok(())
    }

    /// Validate the open form and take its draft for saving.
    pub fn take_submission(&mut self) -> Result<Submission, AppError> {
        match &mut self.view {
            View::RecordForm(form) => Ok(Submission::FieldReport(form.submit()?)),
            View::MaintenanceForm(form) => Ok(Submission::Maintenance(form.submit()?)),
            _ => Err(AppError::NoActiveForm),
        }
    }
}

pub struct Store {
    gateway: DataGateway,
    state: Arc<Mutex<PortalState>>,
    pending_refresh: std::sync::Mutex<Option<JoinHandle<()>>>,
    refresh_delay: Duration,
}

impl Store {
    pub fn new(gateway: DataGateway, refresh_delay: Duration) -> Self {
        Self {
            gateway,
            state: Arc::new(Mutex::new(PortalState::default())),
            pending_refresh: std::sync::Mutex::new(None),
            refresh_delay,
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, PortalState> {
        self.state.lock().await
    }

    /// Re-read the snapshot. On failure the previous snapshot is kept and an
    /// error notification is raised.
    pub async fn refresh(&self) -> Result<(), AppError> {
        load_snapshot(&self.gateway, &self.state).await
    }

    /// Save the open form's draft. A failed save leaves the form open with
    /// its draft intact.
    pub async fn submit_current(&self) -> Result<SaveResponse, AppError> {
        let submission = self.lock().await.take_submission()?;

        let (record_id, result) = match submission {
            Submission::FieldReport(record) => {
                (record.record_id.clone(), self.save(record).await)
            }
            Submission::Maintenance(record) => {
                (record.record_id.clone(), self.save(record).await)
            }
        };

        if result.is_err() {
            self.lock().await.view.submit_failed(&record_id);
        }
        result
    }

    /// Upsert one record through the gateway.
    ///
    /// Non-admin saves always go out as pending review. On success the view
    /// returns to the dashboard and a delayed refresh is scheduled.
    pub async fn save<R: Report>(&self, mut record: R) -> Result<SaveResponse, AppError> {
        let admin = self.lock().await.admin;
        if !admin && record.approval() != ApprovalStatus::Pending {
            tracing::debug!(
                record_id = record.record_id(),
                "Non-reviewer save, resetting approval to pending"
            );
            record.set_approval(ApprovalStatus::Pending);
        }

        let saved = match self.gateway.save(&record).await {
            Ok(resp) if resp.success => Ok(resp),
            Ok(_) => Err(AppError::Gateway(
                "Gateway rejected the record".to_string(),
            )),
            Err(e) => Err(e),
        };

        let mut state = self.lock().await;
        match saved {
            Ok(resp) => {
                tracing::info!(
                    record_id = record.record_id(),
                    site = record.site_name(),
                    sheet = R::SHEET.as_str(),
                    "Record saved"
                );
                state.notification = Some(Notification::success(SAVED));
                state.view = View::Dashboard;
                drop(state);
                self.schedule_refresh();
                Ok(resp)
            }
            Err(e) => {
                tracing::error!(record_id = record.record_id(), error = %e, "Save failed");
                state.notification = Some(Notification::error(SYNC_FAILED));
                Err(e)
            }
        }
    }

    /// Re-read the snapshot after `refresh_delay`, replacing any refresh
    /// still waiting.
    fn schedule_refresh(&self) {
        let gateway = self.gateway.clone();
        let state = Arc::clone(&self.state);
        let delay = self.refresh_delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = load_snapshot(&gateway, &state).await {
                tracing::warn!(error = %e, "Delayed refresh failed");
            }
        });

        let mut pending = match self.pending_refresh.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        let pending = match self.pending_refresh.get_mut() {
            Ok(pending) => pending.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(handle) = pending {
            handle.abort();
        }
    }
}

async fn load_snapshot(gateway: &DataGateway, state: &Mutex<PortalState>) -> Result<(), AppError> {
    match gateway.fetch_snapshot().await {
        Ok(sheets) => {
            tracing::debug!(
                reports = sheets.field_reports.len(),
                maintenance = sheets.maintenance_reports.len(),
                sites = sheets.sites.len(),
                "Snapshot loaded"
            );
            state.lock().await.sheets = sheets;
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Snapshot refresh failed");
            state.lock().await.notification = Some(Notification::error(LOAD_FAILED));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SiteDirectoryEntry;

    fn unreachable_store() -> Store {
        let gateway = DataGateway::new("http://127.0.0.1:9/exec").unwrap();
        Store::new(gateway, Duration::from_millis(10))
    }

    fn sheets() -> Sheets {
        Sheets {
            field_reports: vec![FieldReport {
                record_id: "MRJ-1".into(),
                mosque_code: "M1".into(),
                ..FieldReport::default()
            }],
            sites: vec![SiteDirectoryEntry {
                mosque_code: "M1".into(),
                name: "جامع النور".into(),
                site_type: "مسجد".into(),
                pwd: "1111".into(),
            }],
            ..Sheets::default()
        }
    }

    #[test]
    fn test_show_rejects_form_screens() {
        let mut state = PortalState::default();
        state.show(Screen::RecordList).unwrap();
        assert_eq!(state.view.screen(), Screen::RecordList);
        assert!(state.show(Screen::RecordForm).is_err());
        assert_eq!(state.view.screen(), Screen::RecordList);
    }

    #[test]
    fn test_open_existing_and_missing_record() {
        let mut state = PortalState {
            sheets: sheets(),
            ..PortalState::default()
        };

        state.open_field_report(Some("MRJ-1")).unwrap();
        assert_eq!(state.view.screen(), Screen::RecordForm);

        let err = state.open_field_report(Some("MRJ-404")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(matches!(
            state.open_maintenance(Some("MNT-404")),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_form_actions_need_an_open_form() {
        let mut state = PortalState::default();
        assert!(matches!(state.select_site("M1"), Err(AppError::NoActiveForm)));
        assert!(matches!(state.take_submission(), Err(AppError::NoActiveForm)));
        assert_eq!(state.view.form_json().unwrap(), None);
    }

    #[test]
    fn test_form_flow_through_state() {
        let mut state = PortalState {
            sheets: sheets(),
            ..PortalState::default()
        };
        state.open_maintenance(None).unwrap();

        assert!(matches!(state.set_field("أعمال_النظافة_عدد", "3"), Err(AppError::Locked)));
        state.select_site("M1").unwrap();
        state.enter_password("1111").unwrap();
        state.set_field("أعمال_النظافة_عدد", "٣").unwrap();

        let form = state.view.form_json().unwrap().unwrap();
        assert_eq!(form["kind"], "maintenance");
        assert_eq!(form["state"], "unlocked");
        assert_eq!(form["draft"]["أعمال_النظافة_عدد"], "3");
        assert_eq!(form["draft"]["المسجد"], "جامع النور");
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_snapshot() {
        let store = unreachable_store();
        store.lock().await.sheets = sheets();

        assert!(store.refresh().await.is_err());

        let state = store.lock().await;
        assert_eq!(state.sheets.field_reports.len(), 1);
        assert_eq!(state.notification, Some(Notification::error(LOAD_FAILED)));
    }

    #[tokio::test]
    async fn test_failed_save_keeps_draft() {
        let store = unreachable_store();
        {
            let mut state = store.lock().await;
            state.admin = true;
            state.open_field_report(None).unwrap();
            state.select_day("").unwrap();
            state.set_field("ملاحظات", "مسودة").unwrap();
        }

        // Empty day label fails validation before any request is made.
        assert!(matches!(store.submit_current().await, Err(AppError::Validation { .. })));
        assert!(store.lock().await.notification.is_none());

        {
            let mut state = store.lock().await;
            if let View::RecordForm(form) = &mut state.view {
                let periods = vec![crate::models::PeriodDirectoryEntry {
                    code_day: "D1".into(),
                    label: "اليوم الأول".into(),
                }];
                form.select_day("D1", &periods).unwrap();
            }
        }

        assert!(store.submit_current().await.is_err());

        let state = store.lock().await;
        assert_eq!(state.notification, Some(Notification::error(SYNC_FAILED)));
        let form = state.view.form_json().unwrap().unwrap();
        assert_eq!(form["state"], "unlocked");
        assert_eq!(form["draft"]["ملاحظات"], "مسودة");
    }

    fn pending_abort_handle(store: &Store) -> tokio::task::AbortHandle {
        store.pending_refresh.lock().unwrap().as_ref().unwrap().abort_handle()
    }

    async fn settle(handle: &tokio::task::AbortHandle) {
        for _ in 0..100 {
            if handle.is_finished() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    #[tokio::test]
    async fn test_rescheduling_aborts_waiting_refresh() {
        let gateway = DataGateway::new("http://127.0.0.1:9/exec").unwrap();
        let store = Store::new(gateway, Duration::from_secs(60));

        store.schedule_refresh();
        let first = pending_abort_handle(&store);
        store.schedule_refresh();
        let second = pending_abort_handle(&store);

        settle(&first).await;
        assert!(first.is_finished());
        assert!(!second.is_finished());

        drop(store);
        settle(&second).await;
        assert!(second.is_finished());
    }
}
