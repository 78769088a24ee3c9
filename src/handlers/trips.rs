// src/handlers/trips.rs

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
    models::trips::{Country, CreateTripPayload, LinkClientPayload, Trip, VisaType},
};

// GET /api/catalog/countries
#[utoipa::path(
    get,
    path = "/api/catalog/countries",
    tag = "Viagens",
    responses((status = 200, description = "Países de destino", body = Vec<Country>)),
    security(("api_jwt" = []))
)]
pub async fn list_countries(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let countries = app_state.trip_service.list_countries().await?;
    Ok((StatusCode::OK, Json(countries)))
}

// GET /api/catalog/countries/{id}/visa-types
#[utoipa::path(
    get,
    path = "/api/catalog/countries/{id}/visa-types",
    tag = "Viagens",
    params(("id" = Uuid, Path, description = "ID do país")),
    responses((status = 200, description = "Tipos de visto do país", body = Vec<VisaType>)),
    security(("api_jwt" = []))
)]
pub async fn list_visa_types(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let visa_types = app_state.trip_service.list_visa_types(id).await?;
    Ok((StatusCode::OK, Json(visa_types)))
}

// POST /api/trips
#[utoipa::path(
    post,
    path = "/api/trips",
    tag = "Viagens",
    request_body = CreateTripPayload,
    responses(
        (status = 201, description = "Viagem criada (financeiro garantido junto)", body = Trip),
        (status = 400, description = "Datas ou tipo de visto inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_trip(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateTripPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let trip = app_state
        .trip_service
        .create_trip(payload, Some(user.id))
        .await?;

    Ok((StatusCode::CREATED, Json(trip)))
}

// GET /api/trips
#[utoipa::path(
    get,
    path = "/api/trips",
    tag = "Viagens",
    responses((status = 200, description = "Lista de viagens", body = Vec<Trip>)),
    security(("api_jwt" = []))
)]
pub async fn list_trips(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let trips = app_state.trip_service.list_trips().await?;
    Ok((StatusCode::OK, Json(trips)))
}

// GET /api/trips/{id}
#[utoipa::path(
    get,
    path = "/api/trips/{id}",
    tag = "Viagens",
    params(("id" = Uuid, Path, description = "ID da viagem")),
    responses(
        (status = 200, description = "Viagem", body = Trip),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_trip(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let trip = app_state.trip_service.get_trip(id).await?;
    Ok((StatusCode::OK, Json(trip)))
}

// POST /api/trips/{id}/clients
#[utoipa::path(
    post,
    path = "/api/trips/{id}/clients",
    tag = "Viagens",
    params(("id" = Uuid, Path, description = "ID da viagem")),
    request_body = LinkClientPayload,
    responses(
        (status = 200, description = "Cliente vinculado; registro financeiro garantido", body = Trip),
        (status = 404, description = "Viagem ou cliente inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_client(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<LinkClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    let trip = app_state
        .trip_service
        .add_client(id, payload.client_id, Some(user.id))
        .await?;
    Ok((StatusCode::OK, Json(trip)))
}

// DELETE /api/trips/{id}/clients/{client_id}
#[utoipa::path(
    delete,
    path = "/api/trips/{id}/clients/{client_id}",
    tag = "Viagens",
    params(
        ("id" = Uuid, Path, description = "ID da viagem"),
        ("client_id" = Uuid, Path, description = "ID do cliente")
    ),
    responses(
        (status = 204, description = "Vínculo removido (financeiro preservado)"),
        (status = 404, description = "Vínculo inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_client(
    State(app_state): State<AppState>,
    Path((id, client_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    app_state.trip_service.remove_client(id, client_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/trips/{id}/clients
#[utoipa::path(
    get,
    path = "/api/trips/{id}/clients",
    tag = "Viagens",
    params(("id" = Uuid, Path, description = "ID da viagem")),
    responses((status = 200, description = "IDs dos clientes vinculados", body = Vec<Uuid>)),
    security(("api_jwt" = []))
)]
pub async fn list_trip_clients(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let client_ids = app_state.trip_service.list_trip_clients(id).await?;
    Ok((StatusCode::OK, Json(client_ids)))
}

// DELETE /api/trips/{id}
#[utoipa::path(
    delete,
    path = "/api/trips/{id}",
    tag = "Viagens",
    params(("id" = Uuid, Path, description = "ID da viagem")),
    responses(
        (status = 204, description = "Viagem removida com respostas, processos e financeiro"),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_trip(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.trip_service.delete_trip(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
