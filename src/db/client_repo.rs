// src/db/client_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::map_unique_violation, error::AppError},
    models::clients::{Client, Partner},
};

#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CLIENTES
    // =========================================================================

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let maybe_client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_client)
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        let clients = sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY full_name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(clients)
    }

    /// Dependentes diretos de um titular (a relação inversa do principal_id).
    pub async fn list_dependents<'e, E>(
        &self,
        executor: E,
        principal_id: Uuid,
    ) -> Result<Vec<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let dependents = sqlx::query_as::<_, Client>(
            "SELECT * FROM clients WHERE principal_id = $1 ORDER BY full_name ASC",
        )
        .bind(principal_id)
        .fetch_all(executor)
        .await?;
        Ok(dependents)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_client<'e, E>(
        &self,
        executor: E,
        full_name: &str,
        birth_date: Option<NaiveDate>,
        nationality: Option<&str>,
        email: &str,
        cpf: Option<&str>,
        phone: Option<&str>,
        password_hash: &str,
        principal_id: Option<Uuid>,
        partner_id: Option<Uuid>,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (
                full_name, birth_date, nationality, email, cpf, phone,
                password_hash, principal_id, partner_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(full_name)
        .bind(birth_date)
        .bind(nationality)
        .bind(email)
        .bind(cpf)
        .bind(phone)
        .bind(password_hash)
        .bind(principal_id)
        .bind(partner_id)
        .fetch_one(executor)
        .await
        .map_err(|e| map_unique_violation(e, "e-mail ou CPF de cliente"))?;

        Ok(client)
    }

    /// Apagar um titular leva os dependentes junto (cascade do banco).
    pub async fn delete_client(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  PARCEIROS
    // =========================================================================

    pub async fn create_partner<'e, E>(
        &self,
        executor: E,
        name: &str,
        email: Option<&str>,
        cpf: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Partner, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let partner = sqlx::query_as::<_, Partner>(
            r#"
            INSERT INTO partners (name, email, cpf, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(cpf)
        .bind(phone)
        .fetch_one(executor)
        .await
        .map_err(|e| map_unique_violation(e, "e-mail ou CPF de parceiro"))?;

        Ok(partner)
    }

    pub async fn list_partners(&self) -> Result<Vec<Partner>, AppError> {
        let partners = sqlx::query_as::<_, Partner>("SELECT * FROM partners ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(partners)
    }
}
