//! Meditation app models.

use serde::{Deserialize, Serialize};

/// A short reflection and its attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Koan {
    pub text: String,
    pub source: String,
}

/// Display language of the meditation app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ar,
    #[default]
    En,
}
