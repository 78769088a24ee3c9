// src/handlers/questionnaires.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::questionnaire::{
        Answer, AnswerView, CreateOptionPayload, CreateQuestionPayload,
        CreateQuestionnairePayload, Question, QuestionOption, Questionnaire,
        RecordAnswerPayload,
    },
};

// POST /api/questionnaires
#[utoipa::path(
    post,
    path = "/api/questionnaires",
    tag = "Questionários",
    request_body = CreateQuestionnairePayload,
    responses(
        (status = 201, description = "Questionário criado", body = Questionnaire),
        (status = 409, description = "O tipo de visto já tem questionário")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_questionnaire(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateQuestionnairePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let questionnaire = app_state
        .questionnaire_service
        .create_questionnaire(payload)
        .await?;

    Ok((StatusCode::CREATED, Json(questionnaire)))
}

// GET /api/visa-types/{id}/questionnaire
#[utoipa::path(
    get,
    path = "/api/visa-types/{id}/questionnaire",
    tag = "Questionários",
    params(("id" = Uuid, Path, description = "ID do tipo de visto")),
    responses(
        (status = 200, description = "Questionário do tipo de visto", body = Questionnaire),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_by_visa_type(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let questionnaire = app_state
        .questionnaire_service
        .get_by_visa_type(id)
        .await?;
    Ok((StatusCode::OK, Json(questionnaire)))
}

// POST /api/questionnaires/{id}/questions
#[utoipa::path(
    post,
    path = "/api/questionnaires/{id}/questions",
    tag = "Questionários",
    params(("id" = Uuid, Path, description = "ID do questionário")),
    request_body = CreateQuestionPayload,
    responses(
        (status = 201, description = "Pergunta criada", body = Question),
        (status = 409, description = "Ordem já usada no questionário")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_question(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateQuestionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let question = app_state
        .questionnaire_service
        .add_question(id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(question)))
}

// GET /api/questionnaires/{id}/questions
#[utoipa::path(
    get,
    path = "/api/questionnaires/{id}/questions",
    tag = "Questionários",
    params(("id" = Uuid, Path, description = "ID do questionário")),
    responses((status = 200, description = "Perguntas em ordem", body = Vec<Question>)),
    security(("api_jwt" = []))
)]
pub async fn list_questions(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let questions = app_state.questionnaire_service.list_questions(id).await?;
    Ok((StatusCode::OK, Json(questions)))
}

// POST /api/questions/{id}/options
#[utoipa::path(
    post,
    path = "/api/questions/{id}/options",
    tag = "Questionários",
    params(("id" = Uuid, Path, description = "ID da pergunta")),
    request_body = CreateOptionPayload,
    responses(
        (status = 201, description = "Opção criada", body = QuestionOption),
        (status = 400, description = "Pergunta não é de seleção única"),
        (status = 409, description = "Ordem já usada na pergunta")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_option(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateOptionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let option = app_state
        .questionnaire_service
        .add_option(id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(option)))
}

// GET /api/questions/{id}/options
#[utoipa::path(
    get,
    path = "/api/questions/{id}/options",
    tag = "Questionários",
    params(("id" = Uuid, Path, description = "ID da pergunta")),
    responses((status = 200, description = "Opções em ordem", body = Vec<QuestionOption>)),
    security(("api_jwt" = []))
)]
pub async fn list_options(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let options = app_state.questionnaire_service.list_options(id).await?;
    Ok((StatusCode::OK, Json(options)))
}

// PUT /api/questions/{id}/answer
#[utoipa::path(
    put,
    path = "/api/questions/{id}/answer",
    tag = "Questionários",
    params(("id" = Uuid, Path, description = "ID da pergunta")),
    request_body = RecordAnswerPayload,
    responses(
        (status = 200, description = "Resposta gravada (upsert)", body = Answer),
        (status = 400, description = "Valor inválido para o tipo da pergunta"),
        (status = 403, description = "Cliente não vinculado à viagem")
    ),
    security(("api_jwt" = []))
)]
pub async fn record_answer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordAnswerPayload>,
) -> Result<impl IntoResponse, AppError> {
    let answer = app_state
        .questionnaire_service
        .record_answer(id, payload)
        .await?;
    Ok((StatusCode::OK, Json(answer)))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredQuery {
    pub trip_id: Uuid,
    pub client_id: Uuid,
}

// GET /api/visa-types/{id}/questionnaire/answers?tripId=...&clientId=...
#[utoipa::path(
    get,
    path = "/api/visa-types/{id}/questionnaire/answers",
    tag = "Questionários",
    params(
        ("id" = Uuid, Path, description = "ID do tipo de visto"),
        AnsweredQuery
    ),
    responses((status = 200, description = "Perguntas ativas com exibição resolvida", body = Vec<AnswerView>)),
    security(("api_jwt" = []))
)]
pub async fn answered_questionnaire(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AnsweredQuery>,
) -> Result<impl IntoResponse, AppError> {
    let views = app_state
        .questionnaire_service
        .answered_questionnaire(id, query.trip_id, query.client_id)
        .await?;
    Ok((StatusCode::OK, Json(views)))
}
