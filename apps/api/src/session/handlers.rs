//! Axum route handlers for the session API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::{follow_up_prompt, run_analysis, AnalysisKind};
use crate::errors::AppError;
use crate::extract::{extract, Extraction, ExtractionStatus};
use crate::grammar::GrammarClient;
use crate::llm_client::LlmClient;
use crate::session::{ChatTurn, Role, Session};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ExtractionSummary {
    pub status: ExtractionStatus,
    pub chars: usize,
    pub warnings: Vec<String>,
}

impl From<&Extraction> for ExtractionSummary {
    fn from(extraction: &Extraction) -> Self {
        Self {
            status: extraction.status,
            chars: extraction.text.len(),
            warnings: extraction.warnings.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
    pub resume: ExtractionSummary,
    pub job: ExtractionSummary,
}

#[derive(Debug, Serialize)]
pub struct SessionSummaryResponse {
    pub session_id: Uuid,
    pub selected_kind: Option<AnalysisKind>,
    pub last_result: Option<String>,
    pub resume: ExtractionSummary,
    pub job: ExtractionSummary,
    pub turns: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub kind: AnalysisKind,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub result: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub turns: Vec<ChatTurn>,
}

// ────────────────────────────────────────────────────────────────────────────
// Upload parsing
// ────────────────────────────────────────────────────────────────────────────

struct UploadedDocument {
    filename: String,
    data: Vec<u8>,
}

struct UploadForm {
    api_key: Option<String>,
    resume: UploadedDocument,
    job: UploadedDocument,
}

/// Parse the multipart session-creation form: `api_key` (optional text
/// field), `resume` and `job` (file fields).
async fn parse_upload(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut api_key: Option<String> = None;
    let mut resume: Option<UploadedDocument> = None;
    let mut job: Option<UploadedDocument> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("failed to read form field: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "api_key" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read api_key: {e}")))?;
                if !value.is_empty() {
                    api_key = Some(value);
                }
            }
            "resume" | "job" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        AppError::Validation(format!("failed to read '{name}' file: {e}"))
                    })?
                    .to_vec();
                let document = UploadedDocument { filename, data };
                if name == "resume" {
                    resume = Some(document);
                } else {
                    job = Some(document);
                }
            }
            _ => {
                // Ignore unknown fields
                let _ = field.bytes().await;
            }
        }
    }

    Ok(UploadForm {
        api_key,
        resume: resume.ok_or_else(|| AppError::Validation("resume file is required".into()))?,
        job: job.ok_or_else(|| AppError::Validation("job description file is required".into()))?,
    })
}

/// Writes the upload to a uniquely named temp file carrying the original
/// extension, then runs extraction on it. The temp file is removed when the
/// guard drops.
fn extract_upload(document: &UploadedDocument) -> Result<Extraction, AppError> {
    let suffix = std::path::Path::new(&document.filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    let file = tempfile::Builder::new()
        .prefix("upload_")
        .suffix(&suffix)
        .tempfile()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("cannot create temp file: {e}")))?;
    std::fs::write(file.path(), &document.data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("cannot write temp file: {e}")))?;

    extract(file.path())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
///
/// Creates a session from the uploaded resume and job description.
/// Extraction degrades rather than failing; the summaries carry the status
/// and warnings so the client can decide whether to proceed.
pub async fn handle_create_session(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SessionCreatedResponse>, AppError> {
    let form = parse_upload(multipart).await?;

    let api_key = form
        .api_key
        .or_else(|| state.config.gemini_api_key.clone())
        .ok_or_else(|| {
            AppError::Validation("api_key is required (no server fallback configured)".into())
        })?;

    let resume = extract_upload(&form.resume)?;
    let job = extract_upload(&form.job)?;

    let session = Session::new(api_key, resume, job);
    let response = SessionCreatedResponse {
        session_id: session.id,
        resume: ExtractionSummary::from(&session.resume),
        job: ExtractionSummary::from(&session.job),
    };

    info!(session_id = %session.id, "session created");
    state.sessions.insert(session);

    Ok(Json(response))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSummaryResponse>, AppError> {
    let summary = state.sessions.with_session(id, |s| SessionSummaryResponse {
        session_id: s.id,
        selected_kind: s.selected_kind,
        last_result: s.last_result.clone(),
        resume: ExtractionSummary::from(&s.resume),
        job: ExtractionSummary::from(&s.job),
        turns: s.transcript.len(),
        created_at: s.created_at,
    })?;
    Ok(Json(summary))
}

/// POST /api/v1/sessions/:id/select
///
/// Selecting a different kind clears the previous result and transcript.
pub async fn handle_select(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectRequest>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .with_session_mut(id, |s| s.select_kind(request.kind))?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/generate
///
/// Runs the selected analysis and resets the transcript. A model-call
/// failure fails the action; the previous result is left untouched.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GenerateResponse>, AppError> {
    let (api_key, resume_text, job_text, kind) = state.sessions.with_session(id, |s| {
        (
            s.api_key.clone(),
            s.resume.text.clone(),
            s.job.text.clone(),
            s.selected_kind,
        )
    })?;

    let kind = kind.ok_or_else(|| {
        AppError::Validation("select an analysis kind before generating".into())
    })?;

    info!(session_id = %id, kind = kind.label(), "generating analysis");

    // No lock is held across the remote call(s).
    let llm = LlmClient::new(state.http.clone(), api_key);
    let grammar = GrammarClient::new(state.http.clone(), state.config.languagetool_url.clone());
    let result = run_analysis(kind, &resume_text, &job_text, &llm, &grammar).await?;

    state
        .sessions
        .with_session_mut(id, |s| s.record_result(result.clone()))?;

    Ok(Json(GenerateResponse { result }))
}

/// POST /api/v1/sessions/:id/chat
///
/// Appends a follow-up question and the model's reply to the transcript.
/// The prompt re-embeds the resume and job text plus the question only —
/// prior turns are not sent back to the model.
pub async fn handle_chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let question = request.question.trim().to_string();
    if question.is_empty() {
        return Err(AppError::Validation("question cannot be empty".into()));
    }

    let (api_key, resume_text, job_text, has_result) = state.sessions.with_session(id, |s| {
        (
            s.api_key.clone(),
            s.resume.text.clone(),
            s.job.text.clone(),
            s.last_result.is_some(),
        )
    })?;

    if !has_result {
        return Err(AppError::Validation(
            "generate an analysis before asking follow-up questions".into(),
        ));
    }

    state
        .sessions
        .with_session_mut(id, |s| s.push_turn(Role::User, question.clone()))?;

    let llm = LlmClient::new(state.http.clone(), api_key);
    let prompt = follow_up_prompt(&question, &resume_text, &job_text);
    let reply = llm
        .call(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("follow-up failed: {e}")))?;

    state
        .sessions
        .with_session_mut(id, |s| s.push_turn(Role::Assistant, reply.clone()))?;

    Ok(Json(ChatResponse { reply }))
}

/// GET /api/v1/sessions/:id/transcript
pub async fn handle_transcript(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TranscriptResponse>, AppError> {
    let turns = state.sessions.with_session(id, |s| s.transcript.clone())?;
    Ok(Json(TranscriptResponse { turns }))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id)?;
    info!(session_id = %id, "session removed");
    Ok(StatusCode::NO_CONTENT)
}
