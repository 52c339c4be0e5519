//! Form controllers for field and maintenance reports.
//!
//! A form owns its own copy of the draft. Non-admin forms stay locked until the
//! selected site's shared password has been entered.

mod field_report;
mod maintenance;

pub use field_report::*;
pub use maintenance::*;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::auth::site_password_matches;
use crate::models::{find_site, SiteDirectoryEntry};

/// Field-level error messages keyed by column header.
pub type FieldErrors = BTreeMap<String, String>;

/// Lifecycle of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormState {
    Locked,
    Unlocked,
    Submitting,
}

/// A submit that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidForm {
    pub errors: FieldErrors,
    pub scroll_to_top: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    Locked,
    AdminOnly,
    UnknownField(String),
    Hidden(String),
    Invalid(InvalidForm),
}

/// Map Arabic-Indic and Extended Arabic-Indic digits to ASCII and drop every
/// other non-digit character.
pub fn normalize_digits(input: &str) -> String {
    input
        .chars()
        .filter_map(|c| match c {
            '0'..='9' => Some(c),
            '\u{0660}'..='\u{0669}' => char::from_digit(c as u32 - 0x0660, 10),
            '\u{06F0}'..='\u{06F9}' => char::from_digit(c as u32 - 0x06F0, 10),
            _ => None,
        })
        .collect()
}

/// Per-site password gate shared by both form kinds.
#[derive(Debug, Clone)]
pub struct SiteGate {
    admin: bool,
    site_code: String,
    entered_password: String,
    verified: bool,
}

impl SiteGate {
    pub fn new(admin: bool, site_code: impl Into<String>) -> Self {
        Self {
            admin,
            site_code: site_code.into(),
            entered_password: String::new(),
            verified: false,
        }
    }

    pub fn site_code(&self) -> &str {
        &self.site_code
    }

    /// Switch site. Any password typed for the previous site is discarded.
    pub fn select_site(&mut self, code: &str, sites: &[SiteDirectoryEntry]) {
        self.site_code = code.to_string();
        self.entered_password.clear();
        self.reevaluate(sites);
    }

    pub fn enter_password(&mut self, entered: &str, sites: &[SiteDirectoryEntry]) {
        self.entered_password = entered.to_string();
        self.reevaluate(sites);
    }

    fn reevaluate(&mut self, sites: &[SiteDirectoryEntry]) {
        if self.admin {
            return;
        }
        self.verified = find_site(sites, &self.site_code)
            .is_some_and(|site| site_password_matches(site, &self.entered_password));
    }

    pub fn is_unlocked(&self) -> bool {
        self.admin || self.verified
    }

    pub fn ensure_unlocked(&self) -> Result<(), FormError> {
        if self.is_unlocked() {
            Ok(())
        } else {
            Err(FormError::Locked)
        }
    }
}

/// Which sections of a form are currently shown.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sections {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retreat: Option<bool>,
    pub approval: bool,
}

/// Serializable snapshot of a form for the UI.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView<'a, R: Serialize> {
    pub kind: &'static str,
    pub state: FormState,
    pub site_code: &'a str,
    pub draft: &'a R,
    pub errors: &'a FieldErrors,
    pub sections: Sections,
}

fn form_state(gate: &SiteGate, submitting: bool) -> FormState {
    if !gate.is_unlocked() {
        FormState::Locked
    } else if submitting {
        FormState::Submitting
    } else {
        FormState::Unlocked
    }
}
