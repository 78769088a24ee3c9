// src/handlers/clients.rs

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
    models::clients::{Client, CreateClientPayload, CreatePartnerPayload, Partner},
};

// POST /api/clients
#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "Clientes",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Client),
        (status = 400, description = "Dados inválidos (inclui dependente de dependente)"),
        (status = 409, description = "E-mail ou CPF já em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state.client_service.create_client(payload).await?;

    Ok((StatusCode::CREATED, Json(client)))
}

// GET /api/clients
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clientes",
    responses((status = 200, description = "Lista de clientes", body = Vec<Client>)),
    security(("api_jwt" = []))
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let clients = app_state.client_service.list_clients().await?;
    Ok((StatusCode::OK, Json(clients)))
}

// GET /api/clients/{id}
#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente", body = Client),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_client(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let client = app_state.client_service.get_client(id).await?;
    Ok((StatusCode::OK, Json(client)))
}

// GET /api/clients/{id}/dependents
#[utoipa::path(
    get,
    path = "/api/clients/{id}/dependents",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do titular")),
    responses((status = 200, description = "Dependentes do titular", body = Vec<Client>)),
    security(("api_jwt" = []))
)]
pub async fn list_dependents(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let dependents = app_state.client_service.list_dependents(id).await?;
    Ok((StatusCode::OK, Json(dependents)))
}

// DELETE /api/clients/{id}
#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 204, description = "Cliente removido (dependentes em cascata)"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.client_service.delete_client(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/partners
#[utoipa::path(
    post,
    path = "/api/partners",
    tag = "Clientes",
    request_body = CreatePartnerPayload,
    responses(
        (status = 201, description = "Parceiro criado", body = Partner),
        (status = 409, description = "E-mail ou CPF já em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_partner(
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePartnerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let partner = app_state.client_service.create_partner(payload).await?;
    Ok((StatusCode::CREATED, Json(partner)))
}

// GET /api/partners
#[utoipa::path(
    get,
    path = "/api/partners",
    tag = "Clientes",
    responses((status = 200, description = "Lista de parceiros", body = Vec<Partner>)),
    security(("api_jwt" = []))
)]
pub async fn list_partners(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let partners = app_state.client_service.list_partners().await?;
    Ok((StatusCode::OK, Json(partners)))
}
