// src/services/client_service.rs

use bcrypt::hash;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ClientRepository,
    models::clients::{Client, CreateClientPayload, CreatePartnerPayload, Partner},
};

#[derive(Clone)]
pub struct ClientService {
    repo: ClientRepository,
    pool: PgPool,
}

impl ClientService {
    pub fn new(repo: ClientRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    /// Cadastra um cliente. Se `principal_id` vier preenchido, o novo cliente
    /// nasce como dependente daquele titular — e o titular indicado precisa
    /// ser de fato um titular: a hierarquia tem exatamente um nível, e a
    /// regra de propagação do financeiro conta com isso.
    pub async fn create_client(&self, payload: CreateClientPayload) -> Result<Client, AppError> {
        if let Some(principal_id) = payload.principal_id {
            let principal = self
                .repo
                .find_by_id(principal_id)
                .await?
                .ok_or(AppError::NotFound("Cliente titular"))?;

            if !principal.is_principal() {
                return Err(AppError::field("principal_id", "principal_is_dependent"));
            }
        }

        let password_clone = payload.password.clone();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let client = self
            .repo
            .create_client(
                &self.pool,
                &payload.full_name,
                payload.birth_date,
                payload.nationality.as_deref(),
                &payload.email,
                payload.cpf.as_deref(),
                payload.phone.as_deref(),
                &hashed_password,
                payload.principal_id,
                payload.partner_id,
            )
            .await?;

        Ok(client)
    }

    pub async fn get_client(&self, id: Uuid) -> Result<Client, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Cliente"))
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        self.repo.list_clients().await
    }

    pub async fn list_dependents(&self, principal_id: Uuid) -> Result<Vec<Client>, AppError> {
        // Confere a existência antes para distinguir "titular sem dependentes"
        // de "cliente inexistente".
        self.get_client(principal_id).await?;
        self.repo.list_dependents(&self.pool, principal_id).await
    }

    /// Apaga o cliente; se for titular, o banco leva os dependentes junto.
    pub async fn delete_client(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete_client(id).await?;
        if !deleted {
            return Err(AppError::NotFound("Cliente"));
        }
        Ok(())
    }

    pub async fn create_partner(
        &self,
        payload: CreatePartnerPayload,
    ) -> Result<Partner, AppError> {
        self.repo
            .create_partner(
                &self.pool,
                &payload.name,
                payload.email.as_deref(),
                payload.cpf.as_deref(),
                payload.phone.as_deref(),
            )
            .await
    }

    pub async fn list_partners(&self) -> Result<Vec<Partner>, AppError> {
        self.repo.list_partners().await
    }
}
