use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::session::Tier;

/// A recognized symptom within one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Symptom {
    pub id: String,
    /// Free-text detail from the tier-2 answer for this symptom, if any.
    pub detail: Option<String>,
    /// The tier in which the symptom was first recognized.
    pub recognized_in: Tier,
}

impl Symptom {
    pub fn reported(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            detail: None,
            recognized_in: Tier::Symptoms,
        }
    }

    pub fn mentioned(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            detail: None,
            recognized_in: Tier::Detail,
        }
    }
}
