use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown triage mode: {0}")]
    UnknownMode(String),

    #[error("invalid uuid: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
