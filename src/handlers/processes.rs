// src/handlers/processes.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::process::{
        CreateProcessPayload, CreateStatusPayload, MaterializeStepsPayload, Process,
        ProcessStatus, ProcessStep, ProcessWithProgress, SetStepCompletionPayload,
    },
};

// POST /api/process-statuses
#[utoipa::path(
    post,
    path = "/api/process-statuses",
    tag = "Processos",
    request_body = CreateStatusPayload,
    responses((status = 201, description = "Status de processo criado", body = ProcessStatus)),
    security(("api_jwt" = []))
)]
pub async fn create_status(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let status = app_state.process_service.create_status(payload).await?;
    Ok((StatusCode::CREATED, Json(status)))
}

// GET /api/process-statuses
#[utoipa::path(
    get,
    path = "/api/process-statuses",
    tag = "Processos",
    responses((status = 200, description = "Catálogo de etapas", body = Vec<ProcessStatus>)),
    security(("api_jwt" = []))
)]
pub async fn list_statuses(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let statuses = app_state.process_service.list_statuses().await?;
    Ok((StatusCode::OK, Json(statuses)))
}

// POST /api/processes
#[utoipa::path(
    post,
    path = "/api/processes",
    tag = "Processos",
    request_body = CreateProcessPayload,
    responses(
        (status = 201, description = "Processo aberto", body = Process),
        (status = 403, description = "Cliente não vinculado à viagem"),
        (status = 409, description = "Já existe processo para (viagem, cliente)")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_process(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateProcessPayload>,
) -> Result<impl IntoResponse, AppError> {
    let process = app_state
        .process_service
        .create_process(payload, Some(user.id))
        .await?;
    Ok((StatusCode::CREATED, Json(process)))
}

// GET /api/processes/{id}
#[utoipa::path(
    get,
    path = "/api/processes/{id}",
    tag = "Processos",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses(
        (status = 200, description = "Processo com progresso derivado", body = ProcessWithProgress),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_process(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let view = app_state.process_service.get_with_progress(id).await?;
    Ok((StatusCode::OK, Json(view)))
}

// POST /api/processes/{id}/steps/materialize
#[utoipa::path(
    post,
    path = "/api/processes/{id}/steps/materialize",
    tag = "Processos",
    params(("id" = Uuid, Path, description = "ID do processo")),
    request_body = MaterializeStepsPayload,
    responses(
        (status = 200, description = "Etapas materializadas (idempotente)", body = ProcessWithProgress),
        (status = 400, description = "Proporção fora de [0, 1]")
    ),
    security(("api_jwt" = []))
)]
pub async fn materialize_steps(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MaterializeStepsPayload>,
) -> Result<impl IntoResponse, AppError> {
    let view = app_state
        .process_service
        .materialize_steps(id, payload.proportion)
        .await?;
    Ok((StatusCode::OK, Json(view)))
}

// PATCH /api/process-steps/{id}
#[utoipa::path(
    patch,
    path = "/api/process-steps/{id}",
    tag = "Processos",
    params(("id" = Uuid, Path, description = "ID da etapa")),
    request_body = SetStepCompletionPayload,
    responses(
        (status = 200, description = "Etapa atualizada", body = ProcessStep),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_step_completion(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetStepCompletionPayload>,
) -> Result<impl IntoResponse, AppError> {
    let step = app_state
        .process_service
        .set_step_completion(id, payload.completed)
        .await?;
    Ok((StatusCode::OK, Json(step)))
}
