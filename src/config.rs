// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        ClientRepository, FinanceRepository, ProcessRepository, QuestionnaireRepository,
        TripRepository, UserRepository,
    },
    services::{
        auth::AuthService, client_service::ClientService, finance_service::FinanceService,
        process_service::ProcessService, questionnaire_service::QuestionnaireService,
        trip_service::TripService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub client_service: ClientService,
    pub trip_service: TripService,
    pub questionnaire_service: QuestionnaireService,
    pub process_service: ProcessService,
    pub finance_service: FinanceService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let client_repo = ClientRepository::new(db_pool.clone());
        let trip_repo = TripRepository::new(db_pool.clone());
        let questionnaire_repo = QuestionnaireRepository::new(db_pool.clone());
        let process_repo = ProcessRepository::new(db_pool.clone());
        let finance_repo = FinanceRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret, db_pool.clone());
        let client_service = ClientService::new(client_repo.clone(), db_pool.clone());
        let finance_service = FinanceService::new(
            finance_repo,
            trip_repo.clone(),
            client_repo.clone(),
            db_pool.clone(),
        );
        let trip_service = TripService::new(
            trip_repo.clone(),
            client_repo.clone(),
            finance_service.clone(),
            db_pool.clone(),
        );
        let questionnaire_service = QuestionnaireService::new(
            questionnaire_repo,
            trip_repo.clone(),
            client_repo,
            db_pool.clone(),
        );
        let process_service = ProcessService::new(process_repo, trip_repo, db_pool.clone());

        Ok(Self {
            db_pool,
            auth_service,
            client_service,
            trip_service,
            questionnaire_service,
            process_service,
            finance_service,
        })
    }
}
