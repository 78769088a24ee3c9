// src/models/clients.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- CLIENTE ---

// principal_id nulo = titular; não nulo = dependente daquele titular.
// A profundidade é de exatamente um nível: o serviço recusa dependente de
// dependente antes do insert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,

    #[schema(example = "Maria da Silva")]
    pub full_name: String,

    #[schema(value_type = Option<String>, format = Date, example = "1990-05-20")]
    pub birth_date: Option<NaiveDate>,

    #[schema(example = "Brasileira")]
    pub nationality: Option<String>,

    #[schema(example = "maria@email.com")]
    pub email: String,

    #[schema(example = "12345678900")]
    pub cpf: Option<String>,
    pub phone: Option<String>,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub principal_id: Option<Uuid>,
    pub partner_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Papel do cliente na hierarquia titular/dependente.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientRole {
    Principal,
    Dependent { principal_id: Uuid },
}

impl Client {
    pub fn role(&self) -> ClientRole {
        match self.principal_id {
            None => ClientRole::Principal,
            Some(principal_id) => ClientRole::Dependent { principal_id },
        }
    }

    pub fn is_principal(&self) -> bool {
        self.principal_id.is_none()
    }
}

// --- PARCEIRO (indicador) ---

// Entidade opcional de indicação; nada no financeiro ou nos processos pode
// assumir que um cliente sempre tem parceiro.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: Uuid,

    #[schema(example = "Agência Voar Mais")]
    pub name: String,

    pub email: Option<String>,
    pub cpf: Option<String>,
    pub phone: Option<String>,

    pub created_at: DateTime<Utc>,
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Maria da Silva")]
    pub full_name: String,

    #[schema(value_type = Option<String>, format = Date, example = "1990-05-20")]
    pub birth_date: Option<NaiveDate>,

    pub nationality: Option<String>,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "maria@email.com")]
    pub email: String,

    #[schema(example = "12345678900")]
    pub cpf: Option<String>,
    pub phone: Option<String>,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,

    // Presente = cadastra como dependente deste titular.
    pub principal_id: Option<Uuid>,
    pub partner_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartnerPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Agência Voar Mais")]
    pub name: String,

    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    pub cpf: Option<String>,
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_client(principal_id: Option<Uuid>) -> Client {
        Client {
            id: Uuid::new_v4(),
            full_name: "Maria da Silva".into(),
            birth_date: None,
            nationality: None,
            email: "maria@email.com".into(),
            cpf: None,
            phone: None,
            password_hash: "hash".into(),
            principal_id,
            partner_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn client_without_principal_is_principal() {
        let client = sample_client(None);
        assert!(client.is_principal());
        assert_eq!(client.role(), ClientRole::Principal);
    }

    #[test]
    fn client_with_principal_is_dependent() {
        let principal_id = Uuid::new_v4();
        let client = sample_client(Some(principal_id));
        assert!(!client.is_principal());
        assert_eq!(client.role(), ClientRole::Dependent { principal_id });
    }
}
