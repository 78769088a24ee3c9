pub mod auth;
pub mod clients;
pub mod finance;
pub mod processes;
pub mod questionnaires;
pub mod trips;
