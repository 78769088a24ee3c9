// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Clientes e Parceiros ---
        handlers::clients::create_client,
        handlers::clients::list_clients,
        handlers::clients::get_client,
        handlers::clients::list_dependents,
        handlers::clients::delete_client,
        handlers::clients::create_partner,
        handlers::clients::list_partners,

        // --- Catálogo e Viagens ---
        handlers::trips::list_countries,
        handlers::trips::list_visa_types,
        handlers::trips::create_trip,
        handlers::trips::list_trips,
        handlers::trips::get_trip,
        handlers::trips::add_client,
        handlers::trips::remove_client,
        handlers::trips::list_trip_clients,
        handlers::trips::delete_trip,

        // --- Questionários ---
        handlers::questionnaires::create_questionnaire,
        handlers::questionnaires::get_by_visa_type,
        handlers::questionnaires::add_question,
        handlers::questionnaires::list_questions,
        handlers::questionnaires::add_option,
        handlers::questionnaires::list_options,
        handlers::questionnaires::record_answer,
        handlers::questionnaires::answered_questionnaire,

        // --- Processos ---
        handlers::processes::create_status,
        handlers::processes::list_statuses,
        handlers::processes::create_process,
        handlers::processes::get_process,
        handlers::processes::materialize_steps,
        handlers::processes::set_step_completion,

        // --- Financeiro ---
        handlers::finance::list_records_for_trip,
        handlers::finance::ensure_records,
        handlers::finance::get_record,
        handlers::finance::set_record_status,
        handlers::finance::update_record,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Clientes ---
            models::clients::Client,
            models::clients::Partner,
            models::clients::CreateClientPayload,
            models::clients::CreatePartnerPayload,

            // --- Viagens ---
            models::trips::Country,
            models::trips::VisaType,
            models::trips::Trip,
            models::trips::CreateTripPayload,
            models::trips::LinkClientPayload,

            // --- Questionários ---
            models::questionnaire::QuestionKind,
            models::questionnaire::Questionnaire,
            models::questionnaire::Question,
            models::questionnaire::QuestionOption,
            models::questionnaire::AnswerValue,
            models::questionnaire::Answer,
            models::questionnaire::AnswerView,
            models::questionnaire::CreateQuestionnairePayload,
            models::questionnaire::CreateQuestionPayload,
            models::questionnaire::CreateOptionPayload,
            models::questionnaire::RecordAnswerPayload,

            // --- Processos ---
            models::process::ProcessStatus,
            models::process::Process,
            models::process::ProcessStep,
            models::process::ProcessWithProgress,
            models::process::CreateProcessPayload,
            models::process::CreateStatusPayload,
            models::process::MaterializeStepsPayload,
            models::process::SetStepCompletionPayload,

            // --- Financeiro ---
            models::finance::RecordStatus,
            models::finance::FinancialRecord,
            models::finance::SetRecordStatusPayload,
            models::finance::UpdateRecordNotesPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro de Assessores"),
        (name = "Clientes", description = "Clientes (titulares e dependentes) e Parceiros"),
        (name = "Viagens", description = "Catálogo de destinos/vistos e Viagens"),
        (name = "Questionários", description = "Formulários dinâmicos por tipo de visto"),
        (name = "Processos", description = "Acompanhamento de processos e etapas"),
        (name = "Financeiro", description = "Registros financeiros e propagação de pagamento")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
