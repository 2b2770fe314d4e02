//! HTTP handlers for cycle endpoints.
//!
//! These handlers connect axum routes to the application layer. Each one
//! parses path and body input at the boundary, builds a command or query,
//! and maps the resulting `CycleError` onto a status code.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::cycle::{
    CreateCycleCommand, CreateCycleHandler, DeleteCycleCommand, DeleteCycleHandler,
    FinalizeCycleCommand, FinalizeCycleHandler, GetCycleHandler, GetCycleProgressHandler,
    GetCycleProgressQuery, GetCycleQuery, GetLatestOpenCycleHandler, ListReceivedCyclesHandler,
    ListReceivedCyclesQuery, ListSentCyclesHandler, ReviseGoalsCommand, ReviseGoalsHandler,
    SaveCycleCommand, SaveCycleHandler, TransitionCycleCommand, TransitionCycleHandler,
    UpdateCycleCommand, UpdateCycleHandler,
};
use crate::application::CatalogProjector;
use crate::domain::cycle::CycleError;
use crate::domain::foundation::{CycleId, ErrorCode, StatusFilter, ValidationError};
use crate::ports::{CycleRepository, Page, SubjectProfile};

use super::super::middleware::Caller;
use super::dto::{
    CreateCycleRequest, CycleContentRequest, CycleDetailResponse, ErrorResponse,
    FinalizeResponse, MessageResponse, ReviseGoalsRequest, TransitionCycleRequest,
    UpdateCycleRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the cycle routes.
#[derive(Clone)]
pub struct CycleAppState {
    pub cycle_repository: Arc<dyn CycleRepository>,
    pub subject_profile: Arc<dyn SubjectProfile>,
    pub projector: Arc<CatalogProjector>,
}

impl CycleAppState {
    pub fn new(
        cycle_repository: Arc<dyn CycleRepository>,
        subject_profile: Arc<dyn SubjectProfile>,
        projector: Arc<CatalogProjector>,
    ) -> Self {
        Self {
            cycle_repository,
            subject_profile,
            projector,
        }
    }

    pub fn create_cycle_handler(&self) -> CreateCycleHandler {
        CreateCycleHandler::new(self.cycle_repository.clone(), self.projector.clone())
    }

    pub fn update_cycle_handler(&self) -> UpdateCycleHandler {
        UpdateCycleHandler::new(self.cycle_repository.clone(), self.projector.clone())
    }

    pub fn save_cycle_handler(&self) -> SaveCycleHandler {
        SaveCycleHandler::new(self.cycle_repository.clone(), self.projector.clone())
    }

    pub fn transition_cycle_handler(&self) -> TransitionCycleHandler {
        TransitionCycleHandler::new(self.cycle_repository.clone(), self.projector.clone())
    }

    pub fn delete_cycle_handler(&self) -> DeleteCycleHandler {
        DeleteCycleHandler::new(self.cycle_repository.clone())
    }

    pub fn finalize_cycle_handler(&self) -> FinalizeCycleHandler {
        FinalizeCycleHandler::new(self.cycle_repository.clone(), self.subject_profile.clone())
    }

    pub fn revise_goals_handler(&self) -> ReviseGoalsHandler {
        ReviseGoalsHandler::new(self.cycle_repository.clone(), self.subject_profile.clone())
    }

    pub fn get_cycle_handler(&self) -> GetCycleHandler {
        GetCycleHandler::new(self.cycle_repository.clone(), self.projector.clone())
    }

    pub fn get_cycle_progress_handler(&self) -> GetCycleProgressHandler {
        GetCycleProgressHandler::new(self.cycle_repository.clone(), self.projector.clone())
    }

    pub fn get_latest_open_cycle_handler(&self) -> GetLatestOpenCycleHandler {
        GetLatestOpenCycleHandler::new(self.cycle_repository.clone(), self.projector.clone())
    }

    pub fn list_received_cycles_handler(&self) -> ListReceivedCyclesHandler {
        ListReceivedCyclesHandler::new(self.cycle_repository.clone(), self.projector.clone())
    }

    pub fn list_sent_cycles_handler(&self) -> ListSentCyclesHandler {
        ListSentCyclesHandler::new(self.cycle_repository.clone(), self.projector.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Boundary parsing
// ════════════════════════════════════════════════════════════════════════════════

fn parse_cycle_id(raw: &str) -> Result<CycleId, CycleApiError> {
    CycleId::parse(raw).map_err(|e| {
        CycleApiError::BadRequest(ErrorResponse::new(e.code, e.message).with_field("id"))
    })
}

/// Well-formed JSON with missing or mistyped fields is invalid input;
/// anything else is a bad request.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, CycleApiError> {
    payload.map(|Json(value)| value).map_err(|rejection| {
        let response = match rejection {
            JsonRejection::JsonDataError(_) => {
                ErrorResponse::new(ErrorCode::InvalidInput, rejection.body_text())
            }
            _ => ErrorResponse::bad_request(rejection.body_text()),
        };
        CycleApiError::BadRequest(response)
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /cycles - Open a cycle for the caller
pub async fn create_cycle(
    State(state): State<CycleAppState>,
    Caller(ctx): Caller,
    payload: Result<Json<CreateCycleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CycleApiError> {
    let request = body(payload)?;

    let cmd = CreateCycleCommand {
        reviewer_email: request.reviewer()?,
        window: request.window()?,
        quantitative_skills: request.quantitative_skills,
        hard_skills: request.hard_skills,
        comment: request.comment,
    };

    let result = state.create_cycle_handler().handle(cmd, ctx).await?;
    Ok(Json(result.display))
}

/// POST /cycles/:id - Overwrite a cycle, including status and review state
pub async fn update_cycle(
    State(state): State<CycleAppState>,
    Path(id): Path<String>,
    Caller(ctx): Caller,
    payload: Result<Json<UpdateCycleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CycleApiError> {
    let cycle_id = parse_cycle_id(&id)?;
    let request = body(payload)?;

    let cmd = UpdateCycleCommand {
        cycle_id,
        content: request.content.into_content()?,
        status: request.status,
        state: request.state,
    };

    let display = state.update_cycle_handler().handle(cmd, ctx).await?;
    Ok(Json(display))
}

/// POST /cycles/save/:id - Overwrite content, keeping status and review state
pub async fn save_cycle(
    State(state): State<CycleAppState>,
    Path(id): Path<String>,
    Caller(ctx): Caller,
    payload: Result<Json<CycleContentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CycleApiError> {
    let cycle_id = parse_cycle_id(&id)?;
    let content = body(payload)?.into_content()?;

    let display = state
        .save_cycle_handler()
        .handle(SaveCycleCommand { cycle_id, content }, ctx)
        .await?;
    Ok(Json(display))
}

/// POST /cycles/:id/status - Move a cycle one step forward
pub async fn transition_cycle(
    State(state): State<CycleAppState>,
    Path(id): Path<String>,
    Caller(ctx): Caller,
    payload: Result<Json<TransitionCycleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CycleApiError> {
    let cycle_id = parse_cycle_id(&id)?;
    let target = body(payload)?.status;

    let display = state
        .transition_cycle_handler()
        .handle(TransitionCycleCommand { cycle_id, target }, ctx)
        .await?;
    Ok(Json(display))
}

/// DELETE /cycles/:id
pub async fn delete_cycle(
    State(state): State<CycleAppState>,
    Path(id): Path<String>,
    Caller(ctx): Caller,
) -> Result<impl IntoResponse, CycleApiError> {
    let cycle_id = parse_cycle_id(&id)?;

    state
        .delete_cycle_handler()
        .handle(DeleteCycleCommand { cycle_id }, ctx)
        .await?;
    Ok(Json(MessageResponse::new(format!("Cycle {} deleted", cycle_id))))
}

/// POST /cycles/update/:id - Write final scores into the subject profile
pub async fn finalize_cycle(
    State(state): State<CycleAppState>,
    Path(id): Path<String>,
    Caller(ctx): Caller,
) -> Result<impl IntoResponse, CycleApiError> {
    let cycle_id = parse_cycle_id(&id)?;

    let outcome = state
        .finalize_cycle_handler()
        .handle(FinalizeCycleCommand { cycle_id }, ctx)
        .await
        .map_err(CycleApiError::with_store_status)?;
    Ok(Json(FinalizeResponse::from(outcome)))
}

/// PUT /cycles/goal - Revise goals on the caller's open cycle
pub async fn revise_goals(
    State(state): State<CycleAppState>,
    Caller(ctx): Caller,
    payload: Result<Json<ReviseGoalsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CycleApiError> {
    let request = body(payload)?;
    let cmd = ReviseGoalsCommand {
        revisions: request.hard_skills.into_iter().map(Into::into).collect(),
    };

    state
        .revise_goals_handler()
        .handle(cmd, ctx)
        .await
        .map_err(CycleApiError::with_store_status)?;
    Ok(Json(serde_json::json!({})))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /cycles/:id
pub async fn get_cycle(
    State(state): State<CycleAppState>,
    Path(id): Path<String>,
    Caller(_ctx): Caller,
) -> Result<impl IntoResponse, CycleApiError> {
    let cycle_id = parse_cycle_id(&id)?;

    let result = state
        .get_cycle_handler()
        .handle(GetCycleQuery { cycle_id })
        .await?;
    Ok(Json(CycleDetailResponse::from(result)))
}

/// GET /cycles/progress/:id
pub async fn get_cycle_progress(
    State(state): State<CycleAppState>,
    Path(id): Path<String>,
    Caller(_ctx): Caller,
) -> Result<impl IntoResponse, CycleApiError> {
    let cycle_id = parse_cycle_id(&id)?;

    let rows = state
        .get_cycle_progress_handler()
        .handle(GetCycleProgressQuery { cycle_id })
        .await?;
    Ok(Json(rows))
}

/// GET /cycles/email/latest - The caller's most recent cycle in progress
pub async fn get_latest_open_cycle(
    State(state): State<CycleAppState>,
    Caller(ctx): Caller,
) -> Result<impl IntoResponse, CycleApiError> {
    let display = state
        .get_latest_open_cycle_handler()
        .handle(ctx)
        .await
        .map_err(CycleApiError::as_bad_request)?;
    Ok(Json(display))
}

/// GET /cycles/email/:status/:page - The caller's reviewer inbox
pub async fn list_received_cycles(
    State(state): State<CycleAppState>,
    Path((status, page)): Path<(String, String)>,
    Caller(ctx): Caller,
) -> Result<impl IntoResponse, CycleApiError> {
    let filter: StatusFilter = status.parse()?;
    let page = page
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::invalid_format("page", "page must be a whole number"))
        .and_then(Page::new)?;

    let rows = state
        .list_received_cycles_handler()
        .handle(ListReceivedCyclesQuery { filter, page }, ctx)
        .await
        .map_err(CycleApiError::with_store_status)?;
    Ok(Json(rows))
}

/// GET /cycles/email/user - Cycles the caller opened
pub async fn list_sent_cycles(
    State(state): State<CycleAppState>,
    Caller(ctx): Caller,
) -> Result<impl IntoResponse, CycleApiError> {
    let rows = state
        .list_sent_cycles_handler()
        .handle(ctx)
        .await
        .map_err(CycleApiError::with_store_status)?;
    Ok(Json(rows))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Status reported for store failures on listing, finalize and revise.
pub const STORE_FAILURE_STATUS: u16 = 450;

/// API error type that converts cycle errors to HTTP responses.
#[derive(Debug)]
pub enum CycleApiError {
    BadRequest(ErrorResponse),
    NotFound(ErrorResponse),
    StoreFailure(ErrorResponse),
    Internal(ErrorResponse),
}

impl CycleApiError {
    /// Maps store failures to [`STORE_FAILURE_STATUS`] instead of 500.
    pub fn with_store_status(err: CycleError) -> Self {
        match err {
            CycleError::Infrastructure(_) | CycleError::Unavailable(_) => {
                CycleApiError::StoreFailure(response_for(&err))
            }
            other => other.into(),
        }
    }

    /// Reports every failure as 400.
    pub fn as_bad_request(err: CycleError) -> Self {
        CycleApiError::BadRequest(response_for(&err))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CycleApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CycleApiError::NotFound(_) => StatusCode::NOT_FOUND,
            CycleApiError::StoreFailure(_) => StatusCode::from_u16(STORE_FAILURE_STATUS)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            CycleApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn response_for(err: &CycleError) -> ErrorResponse {
    let response = ErrorResponse::new(err.code(), err.message());
    match err {
        CycleError::ValidationFailed { field, .. } => response.with_field(field),
        _ => response,
    }
}

impl From<CycleError> for CycleApiError {
    fn from(err: CycleError) -> Self {
        let body = response_for(&err);
        match err {
            CycleError::NotFound(_) | CycleError::NoOpenCycle(_) => CycleApiError::NotFound(body),
            CycleError::EmptySkillSet
            | CycleError::GoalScoreMismatch { .. }
            | CycleError::InvalidTransition { .. }
            | CycleError::ValidationFailed { .. } => CycleApiError::BadRequest(body),
            CycleError::Infrastructure(_) | CycleError::Unavailable(_) => {
                tracing::error!(code = %err.code(), error = %err.message(), "cycle request failed");
                CycleApiError::Internal(body)
            }
        }
    }
}

impl From<ValidationError> for CycleApiError {
    fn from(err: ValidationError) -> Self {
        CycleError::from(err).into()
    }
}

impl IntoResponse for CycleApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = match self {
            CycleApiError::BadRequest(body)
            | CycleApiError::NotFound(body)
            | CycleApiError::StoreFailure(body)
            | CycleApiError::Internal(body) => body,
        };

        (status, Json(body)).into_response()
    }
}
