// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::clients::ClientRole;

// --- ENUMS (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "record_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    Pending,   // Em aberto
    Paid,      // Quitado
    Cancelled, // Cancelado
}

// --- REGISTRO FINANCEIRO ---

// Um registro por (viagem, cliente); client_id nulo é o registro avulso de
// uma viagem ainda sem clientes vinculados.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub client_id: Option<Uuid>,

    #[schema(example = "400.00")]
    pub amount: Decimal,

    pub status: RecordStatus,

    #[schema(value_type = Option<String>, format = Date, example = "2026-01-10")]
    pub payment_date: Option<NaiveDate>,

    pub notes: Option<String>,
    pub advisor_id: Option<Uuid>,
    pub created_by: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Regra de propagação do "pago": quando o registro de um cliente TITULAR é
/// quitado, os registros já existentes dos dependentes dele na mesma viagem
/// devem ser quitados junto. A função devolve os ids de registro a atualizar.
///
/// Três decisões moram aqui:
/// - dependente sem registro na viagem é pulado (a propagação nunca cria
///   registros, só atualiza os que existem);
/// - pagamento de dependente não propaga em direção alguma;
/// - registro avulso (sem cliente) também não propaga.
pub fn propagation_targets(
    payer_role: Option<ClientRole>,
    dependent_ids: &[Uuid],
    trip_records: &[FinancialRecord],
) -> Vec<Uuid> {
    match payer_role {
        Some(ClientRole::Principal) => dependent_ids
            .iter()
            .filter_map(|dep| {
                trip_records
                    .iter()
                    .find(|r| r.client_id == Some(*dep))
                    .map(|r| r.id)
            })
            .collect(),
        Some(ClientRole::Dependent { .. }) | None => Vec::new(),
    }
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetRecordStatusPayload {
    pub status: RecordStatus,

    // Data do pagamento; exigida quando status = PAID.
    #[schema(value_type = Option<String>, format = Date, example = "2026-01-10")]
    pub payment_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordNotesPayload {
    pub notes: Option<String>,
    pub advisor_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(trip_id: Uuid, client_id: Option<Uuid>, status: RecordStatus) -> FinancialRecord {
        FinancialRecord {
            id: Uuid::new_v4(),
            trip_id,
            client_id,
            amount: dec!(400.00),
            status,
            payment_date: None,
            notes: None,
            advisor_id: None,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn principal_payment_targets_existing_dependent_records() {
        let trip = Uuid::new_v4();
        let dep_a = Uuid::new_v4();
        let dep_b = Uuid::new_v4();
        let rec_a = record(trip, Some(dep_a), RecordStatus::Pending);
        let rec_b = record(trip, Some(dep_b), RecordStatus::Pending);
        let records = vec![rec_a.clone(), rec_b.clone()];

        let targets = propagation_targets(
            Some(ClientRole::Principal),
            &[dep_a, dep_b],
            &records,
        );
        assert_eq!(targets, vec![rec_a.id, rec_b.id]);
    }

    #[test]
    fn dependent_without_record_is_skipped_not_fabricated() {
        let trip = Uuid::new_v4();
        let dep_with = Uuid::new_v4();
        let dep_without = Uuid::new_v4();
        let rec = record(trip, Some(dep_with), RecordStatus::Pending);
        let records = vec![rec.clone()];

        let targets = propagation_targets(
            Some(ClientRole::Principal),
            &[dep_with, dep_without],
            &records,
        );
        // Só o registro existente entra; nada é criado para o outro.
        assert_eq!(targets, vec![rec.id]);
    }

    #[test]
    fn dependent_payment_never_propagates() {
        let trip = Uuid::new_v4();
        let principal = Uuid::new_v4();
        let records = vec![record(trip, Some(principal), RecordStatus::Pending)];

        let targets = propagation_targets(
            Some(ClientRole::Dependent {
                principal_id: principal,
            }),
            &[],
            &records,
        );
        assert!(targets.is_empty());
    }

    #[test]
    fn clientless_record_never_propagates() {
        let trip = Uuid::new_v4();
        let records = vec![record(trip, None, RecordStatus::Pending)];
        let targets = propagation_targets(None, &[], &records);
        assert!(targets.is_empty());
    }

    #[test]
    fn retargeting_already_paid_dependents_is_idempotent() {
        let trip = Uuid::new_v4();
        let dep = Uuid::new_v4();
        let rec = record(trip, Some(dep), RecordStatus::Paid);
        let records = vec![rec.clone()];

        // Repetir o pagamento do titular devolve o mesmo alvo; o UPDATE
        // resultante regrava os mesmos valores, sem efeito colateral novo.
        let first = propagation_targets(Some(ClientRole::Principal), &[dep], &records);
        let second = propagation_targets(Some(ClientRole::Principal), &[dep], &records);
        assert_eq!(first, second);
        assert_eq!(first, vec![rec.id]);
    }
}
