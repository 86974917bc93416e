use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use eyre::{bail, WrapErr};
use jiff::SignedDuration;

use triage_core::models::mode::Mode;
use triage_engine::inference::{InferenceSettings, DEFAULT_MIN_PROBABILITY};
use triage_engine::Engine;
use triage_knowledge::file::load_protocol_file;
use triage_knowledge::Knowledge;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_SESSION_TTL_SECS: i64 = 30 * 60;

/// Server settings, read from `TRIAGE_*` environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub session_ttl: SignedDuration,
    pub min_probability: f64,
    /// Replacement knowledge files; the built-in tables are used otherwise.
    pub normal_knowledge: Option<PathBuf>,
    pub dcg_knowledge: Option<PathBuf>,
    /// Set when the Lambda runtime API is present.
    pub lambda: bool,
}

impl ServerConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup. Unset keys take defaults; set
    /// but invalid values are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let bind_addr = lookup("TRIAGE_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .wrap_err_with(|| format!("invalid TRIAGE_BIND_ADDR: {bind_addr}"))?;

        let session_ttl = match lookup("TRIAGE_SESSION_TTL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .wrap_err_with(|| format!("invalid TRIAGE_SESSION_TTL_SECS: {raw}"))?,
            None => DEFAULT_SESSION_TTL_SECS,
        };
        if session_ttl <= 0 {
            bail!("TRIAGE_SESSION_TTL_SECS must be positive, got {session_ttl}");
        }

        let min_probability = match lookup("TRIAGE_MIN_PROBABILITY") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .wrap_err_with(|| format!("invalid TRIAGE_MIN_PROBABILITY: {raw}"))?,
            None => DEFAULT_MIN_PROBABILITY,
        };
        if !(0.0..=100.0).contains(&min_probability) {
            bail!("TRIAGE_MIN_PROBABILITY must be within 0..=100, got {min_probability}");
        }

        Ok(Self {
            bind_addr,
            session_ttl: SignedDuration::from_secs(session_ttl),
            min_probability,
            normal_knowledge: lookup("TRIAGE_NORMAL_KNOWLEDGE").map(PathBuf::from),
            dcg_knowledge: lookup("TRIAGE_DCG_KNOWLEDGE").map(PathBuf::from),
            lambda: lookup("AWS_LAMBDA_RUNTIME_API").is_some(),
        })
    }

    /// Load the configured knowledge and build the engine.
    pub fn engine(&self) -> eyre::Result<Engine> {
        let mut knowledge = Knowledge::builtin();
        for (mode, path) in [
            (Mode::Normal, &self.normal_knowledge),
            (Mode::Dcg, &self.dcg_knowledge),
        ] {
            if let Some(path) = path {
                knowledge = replace_protocol(knowledge, mode, path)?;
            }
        }

        Ok(Engine::new(
            knowledge,
            InferenceSettings {
                min_probability: self.min_probability,
            },
        ))
    }
}

fn replace_protocol(knowledge: Knowledge, mode: Mode, path: &Path) -> eyre::Result<Knowledge> {
    let file = load_protocol_file(path)?;
    if file.mode != mode {
        bail!(
            "{} holds a {} protocol, expected {mode}",
            path.display(),
            file.mode
        );
    }
    Ok(knowledge.with_protocol(Box::new(file))?)
}
