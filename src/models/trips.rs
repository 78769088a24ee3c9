// src/models/trips.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- CATÁLOGO DE REFERÊNCIA ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: Uuid,

    #[schema(example = "Estados Unidos")]
    pub name: String,

    #[schema(example = "US")]
    pub iso_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisaType {
    pub id: Uuid,
    pub country_id: Uuid,

    #[schema(example = "B1/B2 Turismo")]
    pub name: String,
}

// --- VIAGEM ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: Uuid,
    pub country_id: Uuid,
    pub visa_type_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2026-03-01")]
    pub departure_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2026-03-20")]
    pub return_date: NaiveDate,

    // Honorários de assessoria da viagem inteira.
    #[schema(example = "800.00")]
    pub advisory_fee: Decimal,

    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripPayload {
    pub country_id: Uuid,
    pub visa_type_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2026-03-01")]
    pub departure_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2026-03-20")]
    pub return_date: NaiveDate,

    #[schema(example = "800.00")]
    pub advisory_fee: Decimal,

    // Clientes já vinculados na criação (opcional).
    pub client_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkClientPayload {
    pub client_id: Uuid,
}
