use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::mode::Mode;

/// Where a session stands in the three-tier protocol.
///
/// Ordering follows progression: a session only ever moves to a greater
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionState {
    AwaitingTier1,
    AwaitingTier2,
    AwaitingTier3,
    Done,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::AwaitingTier1 => "awaiting tier 1",
            SessionState::AwaitingTier2 => "awaiting tier 2",
            SessionState::AwaitingTier3 => "awaiting tier 3",
            SessionState::Done => "done",
        };
        f.write_str(label)
    }
}

/// A round of the questioning protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Tier {
    /// Initial free-text symptom report.
    Symptoms,
    /// Symptom-detail clarification.
    Detail,
    /// Trigger-pattern follow-up.
    Trigger,
}

impl Tier {
    pub fn number(&self) -> u8 {
        match self {
            Tier::Symptoms => 1,
            Tier::Detail => 2,
            Tier::Trigger => 3,
        }
    }

    /// The state a session must be in to accept a submission for this tier.
    pub fn accepted_in(&self) -> SessionState {
        match self {
            Tier::Symptoms => SessionState::AwaitingTier1,
            Tier::Detail => SessionState::AwaitingTier2,
            Tier::Trigger => SessionState::AwaitingTier3,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier {}", self.number())
    }
}

/// Read-only view of a session, safe to hand to the boundary layer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionSummary {
    pub id: Uuid,
    pub mode: Mode,
    pub state: SessionState,
    pub symptoms: Vec<String>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}
