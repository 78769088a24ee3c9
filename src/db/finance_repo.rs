// src/db/finance_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::map_unique_violation, error::AppError},
    models::finance::{FinancialRecord, RecordStatus},
};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Cria um registro PENDING. client_id nulo = registro avulso da viagem.
    /// Os índices únicos parciais garantem no máximo um registro por par e um
    /// avulso por viagem; a corrida vira UniquenessViolation.
    pub async fn create_record<'e, E>(
        &self,
        executor: E,
        trip_id: Uuid,
        client_id: Option<Uuid>,
        amount: Decimal,
        advisor_id: Option<Uuid>,
        created_by: Option<Uuid>,
    ) -> Result<FinancialRecord, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let record = sqlx::query_as::<_, FinancialRecord>(
            r#"
            INSERT INTO financial_records (trip_id, client_id, amount, advisor_id, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(trip_id)
        .bind(client_id)
        .bind(amount)
        .bind(advisor_id)
        .bind(created_by)
        .fetch_one(executor)
        .await
        .map_err(|e| map_unique_violation(e, "registro financeiro para (viagem, cliente)"))?;

        Ok(record)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<FinancialRecord>, AppError> {
        let maybe =
            sqlx::query_as::<_, FinancialRecord>("SELECT * FROM financial_records WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(maybe)
    }

    pub async fn list_by_trip<'e, E>(
        &self,
        executor: E,
        trip_id: Uuid,
    ) -> Result<Vec<FinancialRecord>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let records = sqlx::query_as::<_, FinancialRecord>(
            "SELECT * FROM financial_records WHERE trip_id = $1 ORDER BY created_at ASC",
        )
        .bind(trip_id)
        .fetch_all(executor)
        .await?;
        Ok(records)
    }

    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        record_id: Uuid,
        status: RecordStatus,
        payment_date: Option<NaiveDate>,
    ) -> Result<Option<FinancialRecord>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe = sqlx::query_as::<_, FinancialRecord>(
            r#"
            UPDATE financial_records
            SET status = $2, payment_date = $3, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(record_id)
        .bind(status)
        .bind(payment_date)
        .fetch_optional(executor)
        .await?;
        Ok(maybe)
    }

    /// Quita um lote de registros já existentes (a cascata do titular).
    pub async fn mark_paid_many<'e, E>(
        &self,
        executor: E,
        record_ids: &[Uuid],
        payment_date: NaiveDate,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if record_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            r#"
            UPDATE financial_records
            SET status = 'PAID', payment_date = $2, updated_at = now()
            WHERE id = ANY($1)
            "#,
        )
        .bind(record_ids)
        .bind(payment_date)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn update_notes(
        &self,
        record_id: Uuid,
        notes: Option<&str>,
        advisor_id: Option<Uuid>,
    ) -> Result<Option<FinancialRecord>, AppError> {
        let maybe = sqlx::query_as::<_, FinancialRecord>(
            r#"
            UPDATE financial_records
            SET notes = $2, advisor_id = $3, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(record_id)
        .bind(notes)
        .bind(advisor_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }
}
