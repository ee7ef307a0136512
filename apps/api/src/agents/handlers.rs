//! Axum route handlers for the six agents.
//!
//! Every handler requires an `AuthSession`. Model failures never surface here: the
//! invoker always hands back a fully populated schema value.

use std::collections::HashSet;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::{Datelike, Local};
use serde::Deserialize;
use tracing::{debug, info};

use crate::agents::code::{analyze_code, language_for_file_name, UNKNOWN_LANGUAGE};
use crate::agents::document_qa::analyze_document;
use crate::agents::email::{generate_email, EmailBrief};
use crate::agents::extract::{extract_for_qa, extract_text, DocumentKind};
use crate::agents::meeting::{schedule_meeting, MeetingBrief};
use crate::agents::news::{search_query, validate_news, NewsReport, SourceLink};
use crate::agents::resume::{analyze_resume, ResumeReport};
use crate::auth::{sha256_hex, AuthSession};
use crate::errors::AppError;
use crate::models::{CodeAnalysis, EmailContent, MeetingProposal, QAResponse};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NewsRequest {
    pub content: String,
    #[serde(default)]
    pub sources: Vec<SourceLink>,
}

#[derive(Debug, Deserialize)]
pub struct CodeRequest {
    pub code: String,
    pub language: Option<String>,
    pub file_name: Option<String>,
}

/// A file part pulled out of a multipart body.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl Upload {
    fn kind(&self) -> Result<DocumentKind, AppError> {
        DocumentKind::detect(self.content_type.as_deref(), Some(&self.file_name)).ok_or_else(
            || {
                AppError::UnsupportedMedia(format!(
                    "Unsupported file format for '{}': {}",
                    self.file_name,
                    self.content_type.as_deref().unwrap_or("unknown")
                ))
            },
        )
    }
}

/// Text fields and file parts of a multipart form, in arrival order.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<Upload>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let data = field.bytes().await?;
                    form.files.push(Upload {
                        file_name,
                        content_type,
                        data,
                    });
                }
                None => {
                    let value = field.text().await?;
                    form.fields.push((name, value));
                }
            }
        }
        Ok(form)
    }

    /// First non-blank text field called `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, v)| n == name && !v.trim().is_empty())
            .map(|(_, v)| v.as_str())
    }
}

/// Runs an extractor on the blocking pool; PDF parsing is CPU-bound.
async fn extract_off_thread<F>(upload: &Upload, extract: F) -> Result<String, AppError>
where
    F: FnOnce(DocumentKind, &[u8]) -> Result<String, AppError> + Send + 'static,
{
    let kind = upload.kind()?;
    let data = upload.data.clone();
    tokio::task::spawn_blocking(move || extract(kind, &data))
        .await
        .map_err(|e| AppError::Internal(e.into()))?
}

fn require_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/agents/resume
///
/// Multipart: `job_description` text plus one or more résumé files (PDF or TXT).
/// Each file is analyzed on its own; repeated file names are analyzed once.
pub async fn handle_resume(
    State(state): State<AppState>,
    session: AuthSession,
    multipart: Multipart,
) -> Result<Json<Vec<ResumeReport>>, AppError> {
    let form = UploadForm::read(multipart).await?;
    let job_description = form
        .field("job_description")
        .ok_or_else(|| AppError::Validation("job_description cannot be empty".to_string()))?;
    if form.files.is_empty() {
        return Err(AppError::Validation("At least one resume file is required".to_string()));
    }

    let reports = analyze_uploads(&state, job_description, &form.files).await?;
    info!(user = %session.username, count = reports.len(), "resumes analyzed");
    Ok(Json(reports))
}

/// Validates every upload before spending any model calls, then analyzes them in order.
pub async fn analyze_uploads(
    state: &AppState,
    job_description: &str,
    files: &[Upload],
) -> Result<Vec<ResumeReport>, AppError> {
    let mut seen = HashSet::new();
    let mut texts = Vec::new();
    for upload in files {
        if !seen.insert(upload.file_name.as_str()) {
            continue;
        }
        let text = extract_off_thread(upload, extract_text).await?;
        texts.push((upload.file_name.clone(), text));
    }

    let mut reports = Vec::with_capacity(texts.len());
    let mut fallbacks = 0;
    for (file_name, text) in texts {
        debug!(file = %file_name, "analyzing resume");
        let outcome = analyze_resume(&state.llm, job_description, &text).await;
        if outcome.is_fallback() {
            fallbacks += 1;
        }
        reports.push(ResumeReport {
            file_name,
            analysis: outcome.into_value(),
        });
    }
    if fallbacks > 0 {
        debug!(fallbacks, total = reports.len(), "some resumes got default analyses");
    }
    Ok(reports)
}

/// POST /api/v1/agents/news
///
/// Repeat submissions of identical content are served from the caller's cache.
pub async fn handle_news(
    State(state): State<AppState>,
    session: AuthSession,
    Json(request): Json<NewsRequest>,
) -> Result<Json<NewsReport>, AppError> {
    require_text(&request.content, "content")?;

    let today = Local::now().date_naive();
    let search_query = search_query(&request.content, today.year());
    let content_hash = sha256_hex(&request.content);
    if let Some(cached) = state
        .accounts
        .cached_news(&session.username, &content_hash)
        .await
    {
        debug!(user = %session.username, "news analysis served from cache");
        return Ok(Json(NewsReport {
            analysis: cached,
            search_query,
        }));
    }

    debug!(%search_query, "validating news");
    let outcome = validate_news(&state.llm, &request.content, &request.sources, today).await;
    // Fallback defaults are not cached so a later retry can reach the model.
    match outcome.failure() {
        Some(failure) => debug!(%failure, "news analysis fell back, not caching"),
        None => {
            state
                .accounts
                .cache_news(&session.username, content_hash, outcome.value().clone())
                .await
        }
    }
    Ok(Json(NewsReport {
        analysis: outcome.into_value(),
        search_query,
    }))
}

/// POST /api/v1/agents/code
pub async fn handle_code(
    State(state): State<AppState>,
    _session: AuthSession,
    Json(request): Json<CodeRequest>,
) -> Result<Json<CodeAnalysis>, AppError> {
    require_text(&request.code, "code")?;

    let language = match (&request.language, &request.file_name) {
        (Some(lang), _) if !lang.trim().is_empty() => lang.trim().to_string(),
        (_, Some(file_name)) => language_for_file_name(file_name).to_string(),
        _ => UNKNOWN_LANGUAGE.to_string(),
    };

    let analysis = analyze_code(&state.llm, &request.code, &language)
        .await
        .into_value();
    Ok(Json(analysis))
}

/// POST /api/v1/agents/document-qa
///
/// Multipart: one `file` (PDF or TXT) and a `question`.
pub async fn handle_document_qa(
    State(state): State<AppState>,
    _session: AuthSession,
    multipart: Multipart,
) -> Result<Json<QAResponse>, AppError> {
    let form = UploadForm::read(multipart).await?;
    let question = form
        .field("question")
        .ok_or_else(|| AppError::Validation("question cannot be empty".to_string()))?;
    let upload = form
        .files
        .first()
        .ok_or_else(|| AppError::Validation("A document file is required".to_string()))?;

    let answer = answer_upload(&state, upload, question).await?;
    Ok(Json(answer))
}

pub async fn answer_upload(
    state: &AppState,
    upload: &Upload,
    question: &str,
) -> Result<QAResponse, AppError> {
    let text = extract_off_thread(upload, extract_for_qa).await?;
    if text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "Failed to extract text from document".to_string(),
        ));
    }
    Ok(analyze_document(&state.llm, &text, question)
        .await
        .into_value())
}

/// POST /api/v1/agents/email
pub async fn handle_email(
    State(state): State<AppState>,
    _session: AuthSession,
    Json(brief): Json<EmailBrief>,
) -> Result<Json<EmailContent>, AppError> {
    require_text(&brief.purpose, "purpose")?;
    Ok(Json(generate_email(&state.llm, &brief).await.into_value()))
}

/// POST /api/v1/agents/meeting
pub async fn handle_meeting(
    State(state): State<AppState>,
    _session: AuthSession,
    Json(brief): Json<MeetingBrief>,
) -> Result<Json<MeetingProposal>, AppError> {
    brief.validate()?;
    require_text(&brief.purpose, "purpose")?;
    Ok(Json(schedule_meeting(&state.llm, &brief).await.into_value()))
}
