use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The triage variant. Selects which vocabulary, question and association
/// tables the engine consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Mode {
    /// General triage with free-text detail questions.
    Normal,
    /// Directed/guided triage with targeted questions and phrase parsing.
    Dcg,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Normal, Mode::Dcg];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Dcg => "dcg",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Mode::Normal),
            "dcg" => Ok(Mode::Dcg),
            other => Err(CoreError::UnknownMode(other.to_string())),
        }
    }
}
