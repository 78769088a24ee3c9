pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod trip_repo;
pub use trip_repo::TripRepository;
pub mod questionnaire_repo;
pub use questionnaire_repo::QuestionnaireRepository;
pub mod process_repo;
pub use process_repo::ProcessRepository;
pub mod finance_repo;
pub use finance_repo::FinanceRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
