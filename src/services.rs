pub mod auth;
pub mod client_service;
pub mod finance_service;
pub mod process_service;
pub mod questionnaire_service;
pub mod trip_service;
