use crate::common::error::AppError;

// ---
// Helper de unicidade: traduz violação de chave única do Postgres
// ---
// Os repositórios confiam nos índices únicos do banco (questionário por tipo de
// visto, ordem de pergunta, processo por (viagem, cliente), financeiro por
// (viagem, cliente)...). Uma corrida de duplicação chega aqui como SQLSTATE
// 23505 e sobe para o chamador como UniquenessViolation, nunca como linha dupla.
pub(crate) fn map_unique_violation(err: sqlx::Error, what: &str) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            return AppError::UniquenessViolation(what.to_string());
        }
    }
    AppError::DatabaseError(err)
}
