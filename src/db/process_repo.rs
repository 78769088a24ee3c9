// src/db/process_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::map_unique_violation, error::AppError},
    models::process::{Process, ProcessStatus, ProcessStep},
};

#[derive(Clone)]
pub struct ProcessRepository {
    pool: PgPool,
}

impl ProcessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CATÁLOGO DE ETAPAS (StatusProcesso)
    // =========================================================================

    pub async fn create_status<'e, E>(
        &self,
        executor: E,
        name: &str,
        default_deadline_days: i32,
        position: i32,
        visa_type_id: Option<Uuid>,
    ) -> Result<ProcessStatus, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let status = sqlx::query_as::<_, ProcessStatus>(
            r#"
            INSERT INTO process_statuses (name, default_deadline_days, position, visa_type_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(default_deadline_days)
        .bind(position)
        .bind(visa_type_id)
        .fetch_one(executor)
        .await?;

        Ok(status)
    }

    pub async fn find_status(&self, id: Uuid) -> Result<Option<ProcessStatus>, AppError> {
        let maybe =
            sqlx::query_as::<_, ProcessStatus>("SELECT * FROM process_statuses WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(maybe)
    }

    pub async fn list_statuses(&self) -> Result<Vec<ProcessStatus>, AppError> {
        let statuses = sqlx::query_as::<_, ProcessStatus>(
            "SELECT * FROM process_statuses ORDER BY position ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(statuses)
    }

    /// Etapas aplicáveis a um tipo de visto: as escopadas para ele mais as
    /// gerais (visa_type_id nulo), em ordem de exibição.
    pub async fn list_statuses_for_visa_type<'e, E>(
        &self,
        executor: E,
        visa_type_id: Uuid,
    ) -> Result<Vec<ProcessStatus>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let statuses = sqlx::query_as::<_, ProcessStatus>(
            r#"
            SELECT * FROM process_statuses
            WHERE visa_type_id IS NULL OR visa_type_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(visa_type_id)
        .fetch_all(executor)
        .await?;
        Ok(statuses)
    }

    // =========================================================================
    //  PROCESSOS
    // =========================================================================

    pub async fn create_process<'e, E>(
        &self,
        executor: E,
        trip_id: Uuid,
        client_id: Uuid,
        status_id: Option<Uuid>,
        deadline_days: i32,
        notes: Option<&str>,
        advisor_id: Option<Uuid>,
    ) -> Result<Process, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let process = sqlx::query_as::<_, Process>(
            r#"
            INSERT INTO processes (trip_id, client_id, status_id, deadline_days, notes, advisor_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(trip_id)
        .bind(client_id)
        .bind(status_id)
        .bind(deadline_days)
        .bind(notes)
        .bind(advisor_id)
        .fetch_one(executor)
        .await
        .map_err(|e| map_unique_violation(e, "processo para (viagem, cliente)"))?;

        Ok(process)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Process>, AppError> {
        let maybe = sqlx::query_as::<_, Process>("SELECT * FROM processes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    // =========================================================================
    //  ETAPAS
    // =========================================================================

    /// Upsert por (processo, status): repetir a materialização não duplica
    /// etapa, só regrava posição, conclusão e prazo.
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert_step<'e, E>(
        &self,
        executor: E,
        process_id: Uuid,
        status_id: Uuid,
        position: i32,
        completed: bool,
        completed_at: Option<NaiveDate>,
        deadline_days: i32,
    ) -> Result<ProcessStep, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let step = sqlx::query_as::<_, ProcessStep>(
            r#"
            INSERT INTO process_steps (
                process_id, status_id, position, completed, completed_at, deadline_days
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (process_id, status_id) DO UPDATE SET
                position      = EXCLUDED.position,
                completed     = EXCLUDED.completed,
                completed_at  = EXCLUDED.completed_at,
                deadline_days = EXCLUDED.deadline_days
            RETURNING *
            "#,
        )
        .bind(process_id)
        .bind(status_id)
        .bind(position)
        .bind(completed)
        .bind(completed_at)
        .bind(deadline_days)
        .fetch_one(executor)
        .await?;

        Ok(step)
    }

    pub async fn find_step(&self, id: Uuid) -> Result<Option<ProcessStep>, AppError> {
        let maybe = sqlx::query_as::<_, ProcessStep>("SELECT * FROM process_steps WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    pub async fn list_steps(&self, process_id: Uuid) -> Result<Vec<ProcessStep>, AppError> {
        let steps = sqlx::query_as::<_, ProcessStep>(
            "SELECT * FROM process_steps WHERE process_id = $1 ORDER BY position ASC",
        )
        .bind(process_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(steps)
    }

    /// Marca/desmarca uma etapa isolada; completed_at acompanha o booleano.
    pub async fn set_step_completion(
        &self,
        step_id: Uuid,
        completed: bool,
        completed_at: Option<NaiveDate>,
    ) -> Result<Option<ProcessStep>, AppError> {
        let maybe = sqlx::query_as::<_, ProcessStep>(
            r#"
            UPDATE process_steps
            SET completed = $2, completed_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(step_id)
        .bind(completed)
        .bind(completed_at)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }
}
