//! triage-core
//!
//! Pure domain types shared by the knowledge base, the engine and the HTTP
//! boundary. No decision logic lives here; this is the shared vocabulary of
//! the triage system.

pub mod error;
pub mod models;
