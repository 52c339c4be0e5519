//! Reviewer gate and site password checks.
//!
//! Both checks only decide what the portal shows and accepts. Neither is a
//! security boundary: the data gateway accepts writes from anyone who can
//! reach it.

use subtle::ConstantTimeEq;

use crate::models::SiteDirectoryEntry;

/// Decides whether an entered string unlocks reviewer mode.
#[derive(Debug, Clone)]
pub struct AdminGate {
    secret: Option<String>,
}

impl AdminGate {
    pub fn new(secret: Option<String>) -> Self {
        Self { secret }
    }

    pub fn is_enabled(&self) -> bool {
        self.secret.is_some()
    }

    /// True when the entered password equals the configured secret.
    pub fn verify(&self, entered: &str) -> bool {
        match &self.secret {
            Some(secret) => constant_time_compare(entered, secret),
            None => false,
        }
    }
}

/// True when the entered password matches the site's shared password.
/// Surrounding whitespace is ignored on both sides.
pub fn site_password_matches(site: &SiteDirectoryEntry, entered: &str) -> bool {
    constant_time_compare(entered.trim(), site.pwd.trim())
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    a_bytes.ct_eq(b_bytes).into()
}
