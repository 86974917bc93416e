//! The three-tier interview and the final diagnosis, one route set per mode.
//!
//! Handlers only translate between form fields and engine types. The session
//! store lock is held for the synchronous engine call and nothing else.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use triage_core::error::CoreError;
use triage_core::models::answer::{AnswerSet, QuestionMap};
use triage_core::models::diagnosis::DiagnosisOutcome;
use triage_core::models::mode::Mode;
use triage_engine::error::EngineError;

use crate::error::ApiError;
use crate::state::AppState;

/// Request header carrying the id returned by tier 1.
pub const SESSION_HEADER: &str = "x-session-id";

const DETAIL_SUFFIX: &str = "_detail";

pub const NO_SYMPTOMS_MESSAGE: &str = "No recognized symptoms. Please describe them in other words.";

pub const TIER3_PROCESSED_MESSAGE: &str = "tier 3 processed";

#[derive(Deserialize)]
pub struct SymptomReport {
    #[serde(default)]
    symptoms: String,
}

#[derive(Serialize)]
pub struct Tier1Response {
    session_id: Uuid,
    symptoms: Vec<String>,
    tier2_questions: QuestionMap,
}

#[derive(Serialize)]
struct NothingRecognized {
    tier2_questions: QuestionMap,
    message: &'static str,
}

#[derive(Serialize)]
pub struct Tier2Response {
    tier3_questions: QuestionMap,
}

#[derive(Serialize)]
pub struct Processed {
    message: &'static str,
}

#[derive(Serialize)]
pub struct VocabularyEntry {
    id: String,
    name: String,
}

fn parse_mode(raw: &str) -> Result<Mode, ApiError> {
    Ok(raw.parse::<Mode>()?)
}

fn session_id(headers: &HeaderMap) -> Result<Uuid, ApiError> {
    let value = headers
        .get(SESSION_HEADER)
        .ok_or_else(|| ApiError::BadRequest(format!("missing {SESSION_HEADER} header")))?
        .to_str()
        .map_err(|_| ApiError::BadRequest(format!("unreadable {SESSION_HEADER} header")))?;
    Ok(Uuid::parse_str(value.trim()).map_err(CoreError::from)?)
}

fn session_not_found(id: Uuid, mode: Mode) -> ApiError {
    ApiError::NotFound(format!("no {mode} session {id}"))
}

/// Build an answer set from form fields. Repeated fields for one subject are
/// joined in form order, one part per prompt, with blank fields keeping
/// their place. `strip` removes a per-field suffix such as `_detail`.
fn collect_answers(fields: Vec<(String, String)>, strip: Option<&str>) -> AnswerSet {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in fields {
        let subject = strip
            .and_then(|suffix| key.strip_suffix(suffix))
            .unwrap_or(&key)
            .to_string();
        grouped.entry(subject).or_default().push(value);
    }

    let mut answers = AnswerSet::new();
    for (subject, parts) in grouped {
        answers.push_parts(subject, &parts);
    }
    answers
}

pub async fn list_symptoms(
    State(state): State<AppState>,
    Path(mode): Path<String>,
) -> Result<Json<Vec<VocabularyEntry>>, ApiError> {
    let mode = parse_mode(&mode)?;
    let vocabulary = state
        .engine
        .protocol(mode)
        .vocabulary()
        .iter()
        .map(|term| VocabularyEntry {
            id: term.id.clone(),
            name: term.name.clone(),
        })
        .collect();
    Ok(Json(vocabulary))
}

pub async fn process_tier1(
    State(state): State<AppState>,
    Path(mode): Path<String>,
    Form(report): Form<SymptomReport>,
) -> Result<Response, ApiError> {
    let mode = parse_mode(&mode)?;
    let mut session = state.engine.start(mode);

    match session.submit_tier1(&state.engine, &report.symptoms) {
        Ok(_) => {}
        Err(EngineError::EmptyInput) => {
            return Ok(Json(NothingRecognized {
                tier2_questions: QuestionMap::new(),
                message: NO_SYMPTOMS_MESSAGE,
            })
            .into_response());
        }
        Err(e) => return Err(e.into()),
    }

    let body = Tier1Response {
        session_id: session.id(),
        symptoms: session.reported_symptoms(),
        tier2_questions: session.tier2_questions().clone(),
    };
    state.sessions.lock().await.insert(session);
    Ok(Json(body).into_response())
}

pub async fn process_tier2(
    State(state): State<AppState>,
    Path(mode): Path<String>,
    headers: HeaderMap,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Json<Tier2Response>, ApiError> {
    let mode = parse_mode(&mode)?;
    let id = session_id(&headers)?;
    let answers = collect_answers(fields, Some(DETAIL_SUFFIX));

    let mut sessions = state.sessions.lock().await;
    let session = sessions
        .get_mut(id, mode)
        .ok_or_else(|| session_not_found(id, mode))?;
    let tier3_questions = session.submit_tier2(&state.engine, answers)?.clone();

    Ok(Json(Tier2Response { tier3_questions }))
}

pub async fn process_tier3(
    State(state): State<AppState>,
    Path(mode): Path<String>,
    headers: HeaderMap,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Json<Processed>, ApiError> {
    let mode = parse_mode(&mode)?;
    let id = session_id(&headers)?;
    let answers = collect_answers(fields, None);

    let mut sessions = state.sessions.lock().await;
    let session = sessions
        .get_mut(id, mode)
        .ok_or_else(|| session_not_found(id, mode))?;
    session.submit_tier3(&state.engine, answers)?;

    Ok(Json(Processed {
        message: TIER3_PROCESSED_MESSAGE,
    }))
}

pub async fn diagnose(
    State(state): State<AppState>,
    Path(mode): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DiagnosisOutcome>, ApiError> {
    let mode = parse_mode(&mode)?;
    let id = session_id(&headers)?;

    let mut sessions = state.sessions.lock().await;
    let session = sessions
        .get_mut(id, mode)
        .ok_or_else(|| session_not_found(id, mode))?;

    Ok(Json(session.diagnosis()?.clone()))
}
