// src/db/trip_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::trips::{Country, Trip, VisaType},
};

#[derive(Clone)]
pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CATÁLOGO (Países / Tipos de Visto)
    // =========================================================================

    pub async fn list_countries(&self) -> Result<Vec<Country>, AppError> {
        let countries =
            sqlx::query_as::<_, Country>("SELECT * FROM countries ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(countries)
    }

    pub async fn list_visa_types(&self, country_id: Uuid) -> Result<Vec<VisaType>, AppError> {
        let visa_types = sqlx::query_as::<_, VisaType>(
            "SELECT * FROM visa_types WHERE country_id = $1 ORDER BY name ASC",
        )
        .bind(country_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(visa_types)
    }

    pub async fn find_visa_type(&self, id: Uuid) -> Result<Option<VisaType>, AppError> {
        let maybe = sqlx::query_as::<_, VisaType>("SELECT * FROM visa_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    // =========================================================================
    //  VIAGENS
    // =========================================================================

    pub async fn create_trip<'e, E>(
        &self,
        executor: E,
        country_id: Uuid,
        visa_type_id: Uuid,
        departure_date: NaiveDate,
        return_date: NaiveDate,
        advisory_fee: Decimal,
        created_by: Option<Uuid>,
    ) -> Result<Trip, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (
                country_id, visa_type_id, departure_date, return_date,
                advisory_fee, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(country_id)
        .bind(visa_type_id)
        .bind(departure_date)
        .bind(return_date)
        .bind(advisory_fee)
        .bind(created_by)
        .fetch_one(executor)
        .await?;

        Ok(trip)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Trip>, AppError> {
        let maybe_trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_trip)
    }

    pub async fn list_trips(&self) -> Result<Vec<Trip>, AppError> {
        let trips =
            sqlx::query_as::<_, Trip>("SELECT * FROM trips ORDER BY departure_date DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(trips)
    }

    /// Cascata do banco remove vínculos, respostas, processos e financeiro.
    pub async fn delete_trip(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  VÍNCULO VIAGEM ↔ CLIENTE
    // =========================================================================

    pub async fn link_client<'e, E>(
        &self,
        executor: E,
        trip_id: Uuid,
        client_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO trip_clients (trip_id, client_id)
            VALUES ($1, $2)
            ON CONFLICT (trip_id, client_id) DO NOTHING
            "#,
        )
        .bind(trip_id)
        .bind(client_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Desvincular NÃO apaga o registro financeiro do par (decisão da regra:
    /// remoção explícita só pela cascata da viagem).
    pub async fn unlink_client(&self, trip_id: Uuid, client_id: Uuid) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM trip_clients WHERE trip_id = $1 AND client_id = $2")
                .bind(trip_id)
                .bind(client_id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn is_client_linked<'e, E>(
        &self,
        executor: E,
        trip_id: Uuid,
        client_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let linked: Option<(i32,)> = sqlx::query_as(
            "SELECT 1 FROM trip_clients WHERE trip_id = $1 AND client_id = $2",
        )
        .bind(trip_id)
        .bind(client_id)
        .fetch_optional(executor)
        .await?;
        Ok(linked.is_some())
    }

    pub async fn list_linked_client_ids<'e, E>(
        &self,
        executor: E,
        trip_id: Uuid,
    ) -> Result<Vec<Uuid>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows: Vec<(Uuid,)> =
            sqlx::query_as("SELECT client_id FROM trip_clients WHERE trip_id = $1")
                .bind(trip_id)
                .fetch_all(executor)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
