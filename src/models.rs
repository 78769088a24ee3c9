pub mod auth;
pub mod clients;
pub mod finance;
pub mod process;
pub mod questionnaire;
pub mod trips;
