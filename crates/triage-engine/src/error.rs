use thiserror::Error;

use triage_core::models::session::{SessionState, Tier};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no recognizable symptoms in input")]
    EmptyInput,

    #[error("cannot accept {attempted} answers while the session is {state}")]
    InvalidTransition { state: SessionState, attempted: Tier },

    #[error("no diagnosis yet: session is {state}")]
    NotFinished { state: SessionState },
}
