// src/services/trip_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, TripRepository},
    models::trips::{Country, CreateTripPayload, Trip, VisaType},
    services::finance_service::FinanceService,
};

#[derive(Clone)]
pub struct TripService {
    repo: TripRepository,
    client_repo: ClientRepository,
    finance_service: FinanceService,
    pool: PgPool,
}

impl TripService {
    pub fn new(
        repo: TripRepository,
        client_repo: ClientRepository,
        finance_service: FinanceService,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            client_repo,
            finance_service,
            pool,
        }
    }

    /// Cria a viagem, vincula os clientes iniciais e garante o financeiro —
    /// tudo em uma transação só.
    pub async fn create_trip(
        &self,
        payload: CreateTripPayload,
        created_by: Option<Uuid>,
    ) -> Result<Trip, AppError> {
        if payload.return_date < payload.departure_date {
            return Err(AppError::field("return_date", "before_departure"));
        }

        let visa_type = self
            .repo
            .find_visa_type(payload.visa_type_id)
            .await?
            .ok_or(AppError::NotFound("Tipo de visto"))?;
        if visa_type.country_id != payload.country_id {
            return Err(AppError::field("visa_type_id", "wrong_country"));
        }

        // Valida os clientes antes de abrir a transação.
        let client_ids = payload.client_ids.unwrap_or_default();
        for client_id in &client_ids {
            self.client_repo
                .find_by_id(*client_id)
                .await?
                .ok_or(AppError::NotFound("Cliente"))?;
        }

        let mut tx = self.pool.begin().await?;

        let trip = self
            .repo
            .create_trip(
                &mut *tx,
                payload.country_id,
                payload.visa_type_id,
                payload.departure_date,
                payload.return_date,
                payload.advisory_fee,
                created_by,
            )
            .await?;

        for client_id in &client_ids {
            self.repo.link_client(&mut *tx, trip.id, *client_id).await?;
        }

        self.finance_service
            .ensure_records_for_trip(&mut *tx, &trip, created_by)
            .await?;

        tx.commit().await?;

        tracing::info!("🧳 Viagem {} criada com {} cliente(s).", trip.id, client_ids.len());
        Ok(trip)
    }

    /// Vincula um cliente a uma viagem existente e garante o registro
    /// financeiro dele na mesma transação.
    pub async fn add_client(
        &self,
        trip_id: Uuid,
        client_id: Uuid,
        actor: Option<Uuid>,
    ) -> Result<Trip, AppError> {
        let trip = self
            .repo
            .find_by_id(trip_id)
            .await?
            .ok_or(AppError::NotFound("Viagem"))?;
        self.client_repo
            .find_by_id(client_id)
            .await?
            .ok_or(AppError::NotFound("Cliente"))?;

        let mut tx = self.pool.begin().await?;
        self.repo.link_client(&mut *tx, trip_id, client_id).await?;
        self.finance_service
            .ensure_records_for_trip(&mut *tx, &trip, actor)
            .await?;
        tx.commit().await?;

        Ok(trip)
    }

    /// Desvincula sem apagar o registro financeiro do par — remoção de
    /// registro só acontece pela cascata de exclusão da viagem.
    pub async fn remove_client(&self, trip_id: Uuid, client_id: Uuid) -> Result<(), AppError> {
        let removed = self.repo.unlink_client(trip_id, client_id).await?;
        if !removed {
            return Err(AppError::NotFound("Vínculo viagem-cliente"));
        }
        Ok(())
    }

    pub async fn get_trip(&self, id: Uuid) -> Result<Trip, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Viagem"))
    }

    pub async fn list_trips(&self) -> Result<Vec<Trip>, AppError> {
        self.repo.list_trips().await
    }

    pub async fn list_trip_clients(&self, trip_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        self.get_trip(trip_id).await?;
        self.repo.list_linked_client_ids(&self.pool, trip_id).await
    }

    /// Apaga a viagem; o banco cascateia vínculos, respostas, processos,
    /// etapas e registros financeiros.
    pub async fn delete_trip(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete_trip(id).await?;
        if !deleted {
            return Err(AppError::NotFound("Viagem"));
        }
        Ok(())
    }

    pub async fn list_countries(&self) -> Result<Vec<Country>, AppError> {
        self.repo.list_countries().await
    }

    pub async fn list_visa_types(&self, country_id: Uuid) -> Result<Vec<VisaType>, AppError> {
        self.repo.list_visa_types(country_id).await
    }
}
