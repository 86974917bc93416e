use thiserror::Error;

use crate::tables::ValidationError;

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("failed to read knowledge file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed knowledge file: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("knowledge format_version {found} is newer than this build supports ({supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("protocol '{protocol}' failed validation: {}", format_errors(.errors))]
    Validation {
        protocol: String,
        errors: Vec<ValidationError>,
    },
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.subject, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}
