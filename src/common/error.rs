use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Erro de domínio apontando um campo específico (mesmo formato de código
    // curto usado na validação dinâmica: "required", "invalid_date_format"...).
    #[error("Campo inválido: {field} ({code})")]
    FieldValidation { field: String, code: String },

    // Uma invariante de unicidade seria violada (questionário duplicado para o
    // tipo de visto, processo duplicado para (viagem, cliente), e-mail em uso...).
    #[error("Violação de unicidade: {0}")]
    UniquenessViolation(String),

    // Cliente não vinculado à viagem alvo da operação.
    #[error("Cliente não vinculado à viagem")]
    ClientNotLinked,

    #[error("{0} não encontrado")]
    NotFound(&'static str),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Atalho para erros de campo com código curto.
    pub fn field(field: impl Into<String>, code: impl Into<String>) -> Self {
        AppError::FieldValidation {
            field: field.into(),
            code: code.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação de payload.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            // Erros de domínio com campo apontado seguem o mesmo formato.
            AppError::FieldValidation { field, code } => {
                let mut details = std::collections::HashMap::new();
                details.insert(field, vec![code]);
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::UniquenessViolation(what) => {
                let body = Json(json!({ "error": format!("Registro duplicado: {what}.") }));
                return (StatusCode::CONFLICT, body).into_response();
            }
            AppError::ClientNotLinked => (
                StatusCode::FORBIDDEN,
                "O cliente não está vinculado a esta viagem.".to_string(),
            ),
            AppError::NotFound(what) => {
                (StatusCode::NOT_FOUND, format!("{what} não encontrado."))
            }
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "E-mail ou senha inválidos.".to_string(),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
