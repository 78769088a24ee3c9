// src/services/process_service.rs

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ProcessRepository, TripRepository},
    models::process::{
        materialization_plan, CreateProcessPayload, CreateStatusPayload, Process, ProcessStatus,
        ProcessStep, ProcessWithProgress,
    },
};

#[derive(Clone)]
pub struct ProcessService {
    repo: ProcessRepository,
    trip_repo: TripRepository,
    pool: PgPool,
}

impl ProcessService {
    pub fn new(repo: ProcessRepository, trip_repo: TripRepository, pool: PgPool) -> Self {
        Self {
            repo,
            trip_repo,
            pool,
        }
    }

    // =========================================================================
    //  CATÁLOGO DE ETAPAS
    // =========================================================================

    pub async fn create_status(
        &self,
        payload: CreateStatusPayload,
    ) -> Result<ProcessStatus, AppError> {
        if let Some(visa_type_id) = payload.visa_type_id {
            self.trip_repo
                .find_visa_type(visa_type_id)
                .await?
                .ok_or(AppError::NotFound("Tipo de visto"))?;
        }
        self.repo
            .create_status(
                &self.pool,
                &payload.name,
                payload.default_deadline_days,
                payload.position,
                payload.visa_type_id,
            )
            .await
    }

    pub async fn list_statuses(&self) -> Result<Vec<ProcessStatus>, AppError> {
        self.repo.list_statuses().await
    }

    // =========================================================================
    //  PROCESSOS
    // =========================================================================

    /// Abre o processo único de (viagem, cliente). O cliente precisa estar
    /// vinculado à viagem; o índice único do banco recusa o segundo processo
    /// do mesmo par. Prazo zerado herda o padrão do status inicial.
    pub async fn create_process(
        &self,
        payload: CreateProcessPayload,
        advisor_id: Option<Uuid>,
    ) -> Result<Process, AppError> {
        self.trip_repo
            .find_by_id(payload.trip_id)
            .await?
            .ok_or(AppError::NotFound("Viagem"))?;

        let linked = self
            .trip_repo
            .is_client_linked(&self.pool, payload.trip_id, payload.client_id)
            .await?;
        if !linked {
            return Err(AppError::ClientNotLinked);
        }

        let mut deadline_days = payload.deadline_days;
        if let Some(status_id) = payload.status_id {
            let status = self
                .repo
                .find_status(status_id)
                .await?
                .ok_or(AppError::NotFound("Status de processo"))?;
            if deadline_days <= 0 && status.default_deadline_days > 0 {
                deadline_days = status.default_deadline_days;
            }
        }

        self.repo
            .create_process(
                &self.pool,
                payload.trip_id,
                payload.client_id,
                payload.status_id,
                deadline_days,
                payload.notes.as_deref(),
                advisor_id,
            )
            .await
    }

    pub async fn get_with_progress(&self, process_id: Uuid) -> Result<ProcessWithProgress, AppError> {
        let process = self
            .repo
            .find_by_id(process_id)
            .await?
            .ok_or(AppError::NotFound("Processo"))?;
        let steps = self.repo.list_steps(process_id).await?;
        // Progresso sempre derivado das etapas no momento da leitura.
        Ok(ProcessWithProgress::assemble(process, steps))
    }

    // =========================================================================
    //  ETAPAS
    // =========================================================================

    /// Materializa as etapas do processo a partir do catálogo aplicável ao
    /// tipo de visto da viagem. As primeiras floor(total × p) nascem
    /// concluídas com data de hoje. Upsert por (processo, status): repetir
    /// com os mesmos argumentos não duplica nada. Tudo em uma transação.
    pub async fn materialize_steps(
        &self,
        process_id: Uuid,
        proportion: f64,
    ) -> Result<ProcessWithProgress, AppError> {
        if !(0.0..=1.0).contains(&proportion) {
            return Err(AppError::field("proportion", "out_of_range"));
        }

        let process = self
            .repo
            .find_by_id(process_id)
            .await?
            .ok_or(AppError::NotFound("Processo"))?;
        let trip = self
            .trip_repo
            .find_by_id(process.trip_id)
            .await?
            .ok_or(AppError::NotFound("Viagem"))?;

        let mut tx = self.pool.begin().await?;

        let statuses = self
            .repo
            .list_statuses_for_visa_type(&mut *tx, trip.visa_type_id)
            .await?;
        let plan = materialization_plan(&statuses, proportion);
        let today = Utc::now().date_naive();

        for (idx, ((status_id, completed), status)) in
            plan.into_iter().zip(statuses.iter()).enumerate()
        {
            let completed_at = completed.then_some(today);
            self.repo
                .upsert_step(
                    &mut *tx,
                    process.id,
                    status_id,
                    (idx + 1) as i32,
                    completed,
                    completed_at,
                    status.default_deadline_days,
                )
                .await?;
        }

        tx.commit().await?;

        self.get_with_progress(process_id).await
    }

    /// Marca/desmarca uma etapa isolada. Sem pré-condição de ordem: qualquer
    /// etapa pode mudar a qualquer momento (escolha de regra, não descuido).
    pub async fn set_step_completion(
        &self,
        step_id: Uuid,
        completed: bool,
    ) -> Result<ProcessStep, AppError> {
        let completed_at = completed.then(|| Utc::now().date_naive());
        self.repo
            .set_step_completion(step_id, completed, completed_at)
            .await?
            .ok_or(AppError::NotFound("Etapa de processo"))
    }
}
