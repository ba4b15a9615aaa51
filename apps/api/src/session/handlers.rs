use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use percent_encoding::{percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::analysis::client::ENHANCE_FAILURE_NOTICE;
use crate::analysis::{AnalysisError, Assessed, AtsAnalysis, JobMatchAnalysis};
use crate::editor::{self, Snapshot};
use crate::errors::AppError;
use crate::export::ExportFormat;
use crate::models::{EducationField, EntryId, ResumeDocument, ScalarField, TemplateVariant, WorkField};
use crate::session::{Action, EditorSession, InFlightGuard, InFlightStatus, NavEvent, SessionError, View};
use crate::state::AppState;

const EXPORT_NOTICE_HEADER: HeaderName = HeaderName::from_static("x-export-notice");

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub view: View,
    pub document: Option<ResumeDocument>,
    pub in_flight: InFlightStatus,
}

impl SessionResponse {
    fn of(session: &EditorSession) -> Self {
        Self {
            id: session.id(),
            created_at: session.created_at(),
            view: session.view(),
            document: session.document().ok().map(|doc| ResumeDocument::clone(doc)),
            in_flight: session.flags().status(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<EntryId>,
    pub document: ResumeDocument,
}

impl EditResponse {
    fn new(doc: Snapshot, entry_id: Option<EntryId>) -> Json<Self> {
        Json(Self {
            entry_id,
            document: ResumeDocument::clone(&doc),
        })
    }
}

#[derive(Deserialize)]
pub struct FieldValue {
    pub value: String,
}

#[derive(Deserialize)]
pub struct WorkFieldUpdate {
    pub field: WorkField,
    pub value: String,
}

#[derive(Deserialize)]
pub struct EducationFieldUpdate {
    pub field: EducationField,
    pub value: String,
}

#[derive(Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PreviewFormat {
    #[default]
    Json,
    Html,
}

#[derive(Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub format: PreviewFormat,
}

#[derive(Deserialize)]
pub struct ExportRequest {
    pub format: ExportFormat,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceEntryRequest {
    pub entry_id: EntryId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceEntryResponse {
    pub entry_id: EntryId,
    pub enhanced_text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptEnhancementRequest {
    pub entry_id: EntryId,
    pub text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatchRequest {
    pub job_description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Session lifecycle
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let id = state.sessions.create().await;
    info!("Created session {id}");
    let session = state
        .sessions
        .read(id, SessionResponse::of)
        .await
        .ok_or_else(|| AppError::session_not_found(id))?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    state
        .sessions
        .read(id, SessionResponse::of)
        .await
        .map(Json)
        .ok_or_else(|| AppError::session_not_found(id))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        info!("Discarded session {id}");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::session_not_found(id))
    }
}

/// POST /api/v1/sessions/:id/navigate
pub async fn handle_navigate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(event): Json<NavEvent>,
) -> Result<Json<SessionResponse>, AppError> {
    let response = state
        .sessions
        .write(id, |session| -> Result<_, SessionError> {
            session.navigate(event)?;
            Ok(SessionResponse::of(session))
        })
        .await
        .ok_or_else(|| AppError::session_not_found(id))??;
    Ok(Json(response))
}

// ────────────────────────────────────────────────────────────────────────────
// Editing
// ────────────────────────────────────────────────────────────────────────────

async fn apply_edit<R: Send>(
    state: &AppState,
    id: Uuid,
    op: impl FnOnce(&Snapshot) -> (Snapshot, R) + Send,
) -> Result<(Snapshot, R), AppError> {
    let result = state
        .sessions
        .write(id, |session| session.edit(op))
        .await
        .ok_or_else(|| AppError::session_not_found(id))??;
    Ok(result)
}

/// PUT /api/v1/sessions/:id/fields/:field
pub async fn handle_set_field(
    State(state): State<AppState>,
    Path((id, field)): Path<(Uuid, ScalarField)>,
    Json(req): Json<FieldValue>,
) -> Result<Json<EditResponse>, AppError> {
    let (doc, ()) = apply_edit(&state, id, |doc| {
        (editor::set_field(doc, field, &req.value), ())
    })
    .await?;
    Ok(EditResponse::new(doc, None))
}

/// POST /api/v1/sessions/:id/work
pub async fn handle_add_work_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<EditResponse>), AppError> {
    let (doc, entry_id) = apply_edit(&state, id, editor::add_work_entry).await?;
    Ok((StatusCode::CREATED, EditResponse::new(doc, Some(entry_id))))
}

/// PATCH /api/v1/sessions/:id/work/:entry_id
pub async fn handle_update_work_entry(
    State(state): State<AppState>,
    Path((id, entry_id)): Path<(Uuid, EntryId)>,
    Json(req): Json<WorkFieldUpdate>,
) -> Result<Json<EditResponse>, AppError> {
    let (doc, ()) = apply_edit(&state, id, |doc| {
        (
            editor::update_work_entry(doc, &entry_id, req.field, &req.value),
            (),
        )
    })
    .await?;
    Ok(EditResponse::new(doc, None))
}

/// DELETE /api/v1/sessions/:id/work/:entry_id
/// Removing the last remaining entry is a no-op.
pub async fn handle_remove_work_entry(
    State(state): State<AppState>,
    Path((id, entry_id)): Path<(Uuid, EntryId)>,
) -> Result<Json<EditResponse>, AppError> {
    let (doc, ()) = apply_edit(&state, id, |doc| {
        (editor::remove_work_entry(doc, &entry_id), ())
    })
    .await?;
    Ok(EditResponse::new(doc, None))
}

/// POST /api/v1/sessions/:id/education
pub async fn handle_add_education_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<EditResponse>), AppError> {
    let (doc, entry_id) = apply_edit(&state, id, editor::add_education_entry).await?;
    Ok((StatusCode::CREATED, EditResponse::new(doc, Some(entry_id))))
}

/// PATCH /api/v1/sessions/:id/education/:entry_id
pub async fn handle_update_education_entry(
    State(state): State<AppState>,
    Path((id, entry_id)): Path<(Uuid, EntryId)>,
    Json(req): Json<EducationFieldUpdate>,
) -> Result<Json<EditResponse>, AppError> {
    let (doc, ()) = apply_edit(&state, id, |doc| {
        (
            editor::update_education_entry(doc, &entry_id, req.field, &req.value),
            (),
        )
    })
    .await?;
    Ok(EditResponse::new(doc, None))
}

/// DELETE /api/v1/sessions/:id/education/:entry_id
pub async fn handle_remove_education_entry(
    State(state): State<AppState>,
    Path((id, entry_id)): Path<(Uuid, EntryId)>,
) -> Result<Json<EditResponse>, AppError> {
    let (doc, ()) = apply_edit(&state, id, |doc| {
        (editor::remove_education_entry(doc, &entry_id), ())
    })
    .await?;
    Ok(EditResponse::new(doc, None))
}

// ────────────────────────────────────────────────────────────────────────────
// Preview & export
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:id/preview[?format=html]
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PreviewQuery>,
) -> Result<Response, AppError> {
    let rendered = state
        .sessions
        .read(id, |session| session.rendered())
        .await
        .ok_or_else(|| AppError::session_not_found(id))??;

    Ok(match query.format {
        PreviewFormat::Json => Json(rendered).into_response(),
        PreviewFormat::Html => Html(crate::render::to_markup(&rendered)).into_response(),
    })
}

/// POST /api/v1/sessions/:id/export
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let (target, base_name, _guard) = state
        .sessions
        .read(id, |session| -> Result<_, SessionError> {
            let guard = session.begin(Action::Export)?;
            let base_name = session
                .document()
                .map(|doc| doc.export_base_name().to_string())
                .unwrap_or_else(|_| "Resume".to_string());
            Ok((session.preview().cloned(), base_name, guard))
        })
        .await
        .ok_or_else(|| AppError::session_not_found(id))??;

    let outcome = state
        .exporter
        .export_as(target.as_ref(), req.format, &base_name)
        .await?;

    let artifact = outcome.artifact;
    let mut response = (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(artifact.content_type)),
            (header::CONTENT_DISPOSITION, content_disposition(&artifact.file_name)),
        ],
        artifact.bytes,
    )
        .into_response();

    if let Some(notice) = outcome.notice {
        response
            .headers_mut()
            .insert(EXPORT_NOTICE_HEADER, HeaderValue::from_static(notice));
    }

    Ok(response)
}

/// RFC 5987 `attr-char`: alphanumerics plus `-._~` stay literal.
const FILENAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// `attachment` disposition with an ASCII fallback name and the exact UTF-8
/// name in `filename*`.
fn content_disposition(file_name: &str) -> HeaderValue {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let encoded = percent_encode(file_name.as_bytes(), FILENAME_ENCODE_SET);

    HeaderValue::from_str(&format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}"
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

// ────────────────────────────────────────────────────────────────────────────
// Analysis
// ────────────────────────────────────────────────────────────────────────────

/// Clones the open document and claims the action's flag.
async fn begin_with_document(
    state: &AppState,
    id: Uuid,
    action: Action,
) -> Result<(Snapshot, InFlightGuard), AppError> {
    let claimed = state
        .sessions
        .read(id, |session| -> Result<_, SessionError> {
            let doc = Arc::clone(session.document()?);
            let guard = session.begin(action)?;
            Ok((doc, guard))
        })
        .await
        .ok_or_else(|| AppError::session_not_found(id))??;
    Ok(claimed)
}

/// POST /api/v1/sessions/:id/enhance
/// Returns the rewritten responsibilities; the document is not changed until
/// the caller accepts them.
pub async fn handle_enhance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<EnhanceEntryRequest>,
) -> Result<Json<EnhanceEntryResponse>, AppError> {
    let (doc, _guard) = begin_with_document(&state, id, Action::Enhance).await?;

    let entry = doc
        .work_experience
        .iter()
        .find(|entry| entry.id == req.entry_id)
        .ok_or_else(|| AppError::NotFound(format!("Work entry {} not found", req.entry_id)))?;

    let enhanced_text = state
        .analysis
        .enhance_text(&entry.responsibilities)
        .await
        .map_err(|e| match e {
            AnalysisError::Validation(msg) => AppError::Validation(msg.to_string()),
            AnalysisError::Collaborator(msg) => {
                error!("Enhancement failed for entry {}: {msg}", req.entry_id);
                AppError::Collaborator(ENHANCE_FAILURE_NOTICE.to_string())
            }
        })?;

    Ok(Json(EnhanceEntryResponse {
        entry_id: req.entry_id,
        enhanced_text,
    }))
}

/// POST /api/v1/sessions/:id/enhance/accept
pub async fn handle_accept_enhancement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AcceptEnhancementRequest>,
) -> Result<Json<EditResponse>, AppError> {
    let (doc, ()) = apply_edit(&state, id, |doc| {
        (editor::accept_enhancement(doc, &req.entry_id, &req.text), ())
    })
    .await?;
    Ok(EditResponse::new(doc, None))
}

/// POST /api/v1/sessions/:id/ats-check
pub async fn handle_ats_check(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Assessed<AtsAnalysis>>, AppError> {
    let (doc, _guard) = begin_with_document(&state, id, Action::AtsCheck).await?;
    Ok(Json(state.analysis.ats_check(&doc).await))
}

/// POST /api/v1/sessions/:id/job-match
pub async fn handle_job_match(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<JobMatchRequest>,
) -> Result<Json<Assessed<JobMatchAnalysis>>, AppError> {
    let (doc, _guard) = begin_with_document(&state, id, Action::JobMatch).await?;
    let assessed = state.analysis.job_match(&doc, &req.job_description).await?;
    Ok(Json(assessed))
}

#[derive(Serialize)]
pub struct TemplateListResponse {
    pub templates: [TemplateVariant; 3],
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<TemplateListResponse> {
    Json(TemplateListResponse {
        templates: TemplateVariant::ALL,
    })
}
