// src/services/finance_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{Acquire, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, FinanceRepository, TripRepository},
    models::{
        finance::{propagation_targets, FinancialRecord, RecordStatus, SetRecordStatusPayload},
        trips::Trip,
    },
};

#[derive(Clone)]
pub struct FinanceService {
    finance_repo: FinanceRepository,
    trip_repo: TripRepository,
    client_repo: ClientRepository,
    pool: PgPool,
}

impl FinanceService {
    pub fn new(
        finance_repo: FinanceRepository,
        trip_repo: TripRepository,
        client_repo: ClientRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            finance_repo,
            trip_repo,
            client_repo,
            pool,
        }
    }

    /// Garante os registros financeiros de uma viagem. Chamada explícita nos
    /// dois pontos que alteram o conjunto (criação da viagem e vínculo de
    /// cliente), nunca um observador implícito.
    ///
    /// Com honorários positivos: um registro PENDING por cliente vinculado que
    /// ainda não tenha o seu; sem nenhum cliente, exatamente um registro
    /// avulso. Só adiciona — jamais mexe nos registros que já existem.
    pub async fn ensure_records_for_trip<'a, A>(
        &self,
        conn: A,
        trip: &Trip,
        created_by: Option<Uuid>,
    ) -> Result<Vec<FinancialRecord>, AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;

        if trip.advisory_fee <= Decimal::ZERO {
            tx.commit().await?;
            return Ok(Vec::new());
        }

        let linked = self
            .trip_repo
            .list_linked_client_ids(&mut *tx, trip.id)
            .await?;
        let existing = self.finance_repo.list_by_trip(&mut *tx, trip.id).await?;

        let mut created = Vec::new();
        if linked.is_empty() {
            if !existing.iter().any(|r| r.client_id.is_none()) {
                let record = self
                    .finance_repo
                    .create_record(
                        &mut *tx,
                        trip.id,
                        None,
                        trip.advisory_fee,
                        None,
                        created_by,
                    )
                    .await?;
                created.push(record);
            }
        } else {
            for client_id in linked {
                if !existing.iter().any(|r| r.client_id == Some(client_id)) {
                    let record = self
                        .finance_repo
                        .create_record(
                            &mut *tx,
                            trip.id,
                            Some(client_id),
                            trip.advisory_fee,
                            None,
                            created_by,
                        )
                        .await?;
                    created.push(record);
                }
            }
        }

        tx.commit().await?;
        Ok(created)
    }

    pub async fn ensure_records_for_trip_id(
        &self,
        trip_id: Uuid,
        created_by: Option<Uuid>,
    ) -> Result<Vec<FinancialRecord>, AppError> {
        let trip = self
            .trip_repo
            .find_by_id(trip_id)
            .await?
            .ok_or(AppError::NotFound("Viagem"))?;
        self.ensure_records_for_trip(&self.pool, &trip, created_by)
            .await
    }

    /// Muda o status de um registro. Quando o novo valor é PAID e o registro
    /// pertence a um cliente TITULAR, a quitação cascateia para os registros
    /// já existentes dos dependentes na mesma viagem — tudo na mesma
    /// transação, para nunca deixar o livro meio-propagado. A regra dispara
    /// pelo valor novo, independente do anterior (CANCELLED → PAID também
    /// cascateia); dependente pagando não propaga em direção alguma.
    pub async fn set_record_status(
        &self,
        record_id: Uuid,
        payload: SetRecordStatusPayload,
    ) -> Result<FinancialRecord, AppError> {
        if payload.status == RecordStatus::Paid && payload.payment_date.is_none() {
            return Err(AppError::field("payment_date", "required"));
        }

        let record = self
            .finance_repo
            .find_by_id(record_id)
            .await?
            .ok_or(AppError::NotFound("Registro financeiro"))?;

        let payer = match record.client_id {
            Some(client_id) => Some(
                self.client_repo
                    .find_by_id(client_id)
                    .await?
                    .ok_or(AppError::NotFound("Cliente"))?,
            ),
            None => None,
        };

        let mut tx = self.pool.begin().await?;

        let updated = self
            .finance_repo
            .set_status(&mut *tx, record_id, payload.status, payload.payment_date)
            .await?
            .ok_or(AppError::NotFound("Registro financeiro"))?;

        if payload.status == RecordStatus::Paid {
            if let Some(ref payer) = payer {
                let dependents = self.client_repo.list_dependents(&mut *tx, payer.id).await?;
                let dependent_ids: Vec<Uuid> = dependents.iter().map(|c| c.id).collect();
                let trip_records = self
                    .finance_repo
                    .list_by_trip(&mut *tx, record.trip_id)
                    .await?;

                let targets =
                    propagation_targets(Some(payer.role()), &dependent_ids, &trip_records);

                // A data quitada do titular acompanha a cascata.
                let payment_date = updated
                    .payment_date
                    .unwrap_or_else(|| Utc::now().date_naive());
                let cascaded = self
                    .finance_repo
                    .mark_paid_many(&mut *tx, &targets, payment_date)
                    .await?;

                if cascaded > 0 {
                    tracing::info!(
                        "💸 Pagamento do titular {} propagado para {} registro(s) de dependentes na viagem {}.",
                        payer.id,
                        cascaded,
                        record.trip_id
                    );
                }
            }
        }

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn get_record(&self, record_id: Uuid) -> Result<FinancialRecord, AppError> {
        self.finance_repo
            .find_by_id(record_id)
            .await?
            .ok_or(AppError::NotFound("Registro financeiro"))
    }

    pub async fn list_records_for_trip(
        &self,
        trip_id: Uuid,
    ) -> Result<Vec<FinancialRecord>, AppError> {
        self.trip_repo
            .find_by_id(trip_id)
            .await?
            .ok_or(AppError::NotFound("Viagem"))?;
        self.finance_repo.list_by_trip(&self.pool, trip_id).await
    }

    pub async fn update_record_notes(
        &self,
        record_id: Uuid,
        notes: Option<&str>,
        advisor_id: Option<Uuid>,
    ) -> Result<FinancialRecord, AppError> {
        self.finance_repo
            .update_notes(record_id, notes, advisor_id)
            .await?
            .ok_or(AppError::NotFound("Registro financeiro"))
    }
}
