// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use vistos_backend::config::AppState;
use vistos_backend::middleware::auth::auth_guard;
use vistos_backend::{docs, handlers};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let client_routes = Router::new()
        .route(
            "/",
            post(handlers::clients::create_client).get(handlers::clients::list_clients),
        )
        .route(
            "/{id}",
            get(handlers::clients::get_client).delete(handlers::clients::delete_client),
        )
        .route("/{id}/dependents", get(handlers::clients::list_dependents))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let partner_routes = Router::new()
        .route(
            "/",
            post(handlers::clients::create_partner).get(handlers::clients::list_partners),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let catalog_routes = Router::new()
        .route("/countries", get(handlers::trips::list_countries))
        .route(
            "/countries/{id}/visa-types",
            get(handlers::trips::list_visa_types),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let trip_routes = Router::new()
        .route(
            "/",
            post(handlers::trips::create_trip).get(handlers::trips::list_trips),
        )
        .route(
            "/{id}",
            get(handlers::trips::get_trip).delete(handlers::trips::delete_trip),
        )
        .route(
            "/{id}/clients",
            post(handlers::trips::add_client).get(handlers::trips::list_trip_clients),
        )
        .route(
            "/{id}/clients/{client_id}",
            delete(handlers::trips::remove_client),
        )
        .route(
            "/{id}/financial-records",
            get(handlers::finance::list_records_for_trip),
        )
        .route(
            "/{id}/financial-records/ensure",
            post(handlers::finance::ensure_records),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let questionnaire_routes = Router::new()
        .route("/", post(handlers::questionnaires::create_questionnaire))
        .route(
            "/{id}/questions",
            post(handlers::questionnaires::add_question)
                .get(handlers::questionnaires::list_questions),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let question_routes = Router::new()
        .route(
            "/{id}/options",
            post(handlers::questionnaires::add_option)
                .get(handlers::questionnaires::list_options),
        )
        .route("/{id}/answer", put(handlers::questionnaires::record_answer))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let visa_type_routes = Router::new()
        .route(
            "/{id}/questionnaire",
            get(handlers::questionnaires::get_by_visa_type),
        )
        .route(
            "/{id}/questionnaire/answers",
            get(handlers::questionnaires::answered_questionnaire),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let process_routes = Router::new()
        .route("/", post(handlers::processes::create_process))
        .route("/{id}", get(handlers::processes::get_process))
        .route(
            "/{id}/steps/materialize",
            post(handlers::processes::materialize_steps),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let process_catalog_routes = Router::new()
        .route(
            "/",
            post(handlers::processes::create_status).get(handlers::processes::list_statuses),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let step_routes = Router::new()
        .route("/{id}", patch(handlers::processes::set_step_completion))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let finance_routes = Router::new()
        .route("/{id}", get(handlers::finance::get_record).patch(handlers::finance::update_record))
        .route("/{id}/status", patch(handlers::finance::set_record_status))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/clients", client_routes)
        .nest("/api/partners", partner_routes)
        .nest("/api/catalog", catalog_routes)
        .nest("/api/trips", trip_routes)
        .nest("/api/questionnaires", questionnaire_routes)
        .nest("/api/questions", question_routes)
        .nest("/api/visa-types", visa_type_routes)
        .nest("/api/processes", process_routes)
        .nest("/api/process-statuses", process_catalog_routes)
        .nest("/api/process-steps", step_routes)
        .nest("/api/financial-records", finance_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
