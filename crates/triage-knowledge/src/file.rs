//! Protocol tables loaded from a JSON file at startup.
//!
//! Lets a deployment replace a built-in protocol without a rebuild. Files
//! carry a `format_version`; anything newer than [`FORMAT_VERSION`] is
//! refused, as is any file whose tables fail validation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use triage_core::models::mode::Mode;

use crate::error::KnowledgeError;
use crate::tables::{DetailPattern, DiseaseProfile, QuestionSet, SymptomTerm, TriggerRule};
use crate::TriageProtocol;

/// Current file format. Bump this when the table shape changes.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolFile {
    /// Missing or 0 is treated as version 1.
    #[serde(default)]
    pub format_version: u32,
    pub mode: Mode,
    pub name: String,
    pub vocabulary: Vec<SymptomTerm>,
    #[serde(default)]
    pub detail_questions: Vec<QuestionSet>,
    #[serde(default)]
    pub detail_patterns: Vec<DetailPattern>,
    #[serde(default)]
    pub triggers: Vec<TriggerRule>,
    pub diseases: Vec<DiseaseProfile>,
}

impl ProtocolFile {
    /// Parse and validate protocol tables from JSON text.
    pub fn from_json(contents: &str) -> Result<Self, KnowledgeError> {
        let file: ProtocolFile = serde_json::from_str(contents)?;
        if file.format_version > FORMAT_VERSION {
            return Err(KnowledgeError::UnsupportedVersion {
                found: file.format_version,
                supported: FORMAT_VERSION,
            });
        }

        let errors = file.validate();
        if !errors.is_empty() {
            return Err(KnowledgeError::Validation {
                protocol: file.name.clone(),
                errors,
            });
        }
        Ok(file)
    }

    /// Capture a protocol's tables, e.g. to write out a starting point for a
    /// custom file.
    pub fn from_protocol(protocol: &dyn TriageProtocol) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            mode: protocol.mode(),
            name: protocol.name().to_string(),
            vocabulary: protocol.vocabulary().to_vec(),
            detail_questions: protocol.detail_questions().to_vec(),
            detail_patterns: protocol.detail_patterns().to_vec(),
            triggers: protocol.triggers().to_vec(),
            diseases: protocol.diseases().to_vec(),
        }
    }
}

/// Read a protocol file from disk.
pub fn load_protocol_file(path: &Path) -> Result<ProtocolFile, KnowledgeError> {
    let contents = std::fs::read_to_string(path).map_err(|source| KnowledgeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let file = ProtocolFile::from_json(&contents)?;
    tracing::info!(
        path = %path.display(),
        mode = %file.mode,
        diseases = file.diseases.len(),
        "protocol file loaded"
    );
    Ok(file)
}

impl TriageProtocol for ProtocolFile {
    fn mode(&self) -> Mode {
        self.mode
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn vocabulary(&self) -> &[SymptomTerm] {
        &self.vocabulary
    }

    fn detail_questions(&self) -> &[QuestionSet] {
        &self.detail_questions
    }

    fn detail_patterns(&self) -> &[DetailPattern] {
        &self.detail_patterns
    }

    fn triggers(&self) -> &[TriggerRule] {
        &self.triggers
    }

    fn diseases(&self) -> &[DiseaseProfile] {
        &self.diseases
    }
}
