// src/handlers/finance.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::finance::{FinancialRecord, SetRecordStatusPayload, UpdateRecordNotesPayload},
};

// GET /api/trips/{id}/financial-records
#[utoipa::path(
    get,
    path = "/api/trips/{id}/financial-records",
    tag = "Financeiro",
    params(("id" = Uuid, Path, description = "ID da viagem")),
    responses(
        (status = 200, description = "Registros financeiros da viagem", body = Vec<FinancialRecord>),
        (status = 404, description = "Viagem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_records_for_trip(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let records = app_state.finance_service.list_records_for_trip(id).await?;
    Ok((StatusCode::OK, Json(records)))
}

// POST /api/trips/{id}/financial-records/ensure
#[utoipa::path(
    post,
    path = "/api/trips/{id}/financial-records/ensure",
    tag = "Financeiro",
    params(("id" = Uuid, Path, description = "ID da viagem")),
    responses(
        (status = 200, description = "Registros criados nesta chamada (pode ser vazio)", body = Vec<FinancialRecord>),
        (status = 404, description = "Viagem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn ensure_records(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let created = app_state
        .finance_service
        .ensure_records_for_trip_id(id, Some(user.id))
        .await?;
    Ok((StatusCode::OK, Json(created)))
}

// GET /api/financial-records/{id}
#[utoipa::path(
    get,
    path = "/api/financial-records/{id}",
    tag = "Financeiro",
    params(("id" = Uuid, Path, description = "ID do registro")),
    responses(
        (status = 200, description = "Registro financeiro", body = FinancialRecord),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_record(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let record = app_state.finance_service.get_record(id).await?;
    Ok((StatusCode::OK, Json(record)))
}

// PATCH /api/financial-records/{id}/status
#[utoipa::path(
    patch,
    path = "/api/financial-records/{id}/status",
    tag = "Financeiro",
    params(("id" = Uuid, Path, description = "ID do registro")),
    request_body = SetRecordStatusPayload,
    responses(
        (status = 200, description = "Status atualizado; PAID de titular cascateia para dependentes", body = FinancialRecord),
        (status = 400, description = "PAID sem data de pagamento"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_record_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetRecordStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let record = app_state
        .finance_service
        .set_record_status(id, payload)
        .await?;
    Ok((StatusCode::OK, Json(record)))
}

// PATCH /api/financial-records/{id}
#[utoipa::path(
    patch,
    path = "/api/financial-records/{id}",
    tag = "Financeiro",
    params(("id" = Uuid, Path, description = "ID do registro")),
    request_body = UpdateRecordNotesPayload,
    responses(
        (status = 200, description = "Observações/assessor atualizados", body = FinancialRecord),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_record(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRecordNotesPayload>,
) -> Result<impl IntoResponse, AppError> {
    let record = app_state
        .finance_service
        .update_record_notes(id, payload.notes.as_deref(), payload.advisor_id)
        .await?;
    Ok((StatusCode::OK, Json(record)))
}
