// src/db/questionnaire_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::map_unique_violation, error::AppError},
    models::questionnaire::{
        Answer, AnswerRow, AnswerSlots, Question, QuestionKind, QuestionOption, Questionnaire,
    },
};

#[derive(Clone)]
pub struct QuestionnaireRepository {
    pool: PgPool,
}

impl QuestionnaireRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  QUESTIONÁRIOS (um por tipo de visto)
    // =========================================================================

    pub async fn create_questionnaire<'e, E>(
        &self,
        executor: E,
        visa_type_id: Uuid,
        title: &str,
    ) -> Result<Questionnaire, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let questionnaire = sqlx::query_as::<_, Questionnaire>(
            r#"
            INSERT INTO questionnaires (visa_type_id, title)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(visa_type_id)
        .bind(title)
        .fetch_one(executor)
        .await
        .map_err(|e| map_unique_violation(e, "questionário para este tipo de visto"))?;

        Ok(questionnaire)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Questionnaire>, AppError> {
        let maybe = sqlx::query_as::<_, Questionnaire>(
            "SELECT * FROM questionnaires WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    pub async fn find_by_visa_type(
        &self,
        visa_type_id: Uuid,
    ) -> Result<Option<Questionnaire>, AppError> {
        let maybe = sqlx::query_as::<_, Questionnaire>(
            "SELECT * FROM questionnaires WHERE visa_type_id = $1",
        )
        .bind(visa_type_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    // =========================================================================
    //  PERGUNTAS E OPÇÕES
    // =========================================================================

    pub async fn create_question<'e, E>(
        &self,
        executor: E,
        questionnaire_id: Uuid,
        prompt: &str,
        kind: QuestionKind,
        position: i32,
        is_required: bool,
    ) -> Result<Question, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (questionnaire_id, prompt, kind, position, is_required)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(questionnaire_id)
        .bind(prompt)
        .bind(kind)
        .bind(position)
        .bind(is_required)
        .fetch_one(executor)
        .await
        .map_err(|e| map_unique_violation(e, "ordem de pergunta no questionário"))?;

        Ok(question)
    }

    pub async fn find_question(&self, id: Uuid) -> Result<Option<Question>, AppError> {
        let maybe = sqlx::query_as::<_, Question>("SELECT * FROM questions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    pub async fn list_questions(
        &self,
        questionnaire_id: Uuid,
    ) -> Result<Vec<Question>, AppError> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT * FROM questions WHERE questionnaire_id = $1 ORDER BY position ASC",
        )
        .bind(questionnaire_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    pub async fn create_option<'e, E>(
        &self,
        executor: E,
        question_id: Uuid,
        label: &str,
        position: i32,
    ) -> Result<QuestionOption, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let option = sqlx::query_as::<_, QuestionOption>(
            r#"
            INSERT INTO question_options (question_id, label, position)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(question_id)
        .bind(label)
        .bind(position)
        .fetch_one(executor)
        .await
        .map_err(|e| map_unique_violation(e, "ordem de opção na pergunta"))?;

        Ok(option)
    }

    pub async fn list_options<'e, E>(
        &self,
        executor: E,
        question_id: Uuid,
    ) -> Result<Vec<QuestionOption>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let options = sqlx::query_as::<_, QuestionOption>(
            "SELECT * FROM question_options WHERE question_id = $1 ORDER BY position ASC",
        )
        .bind(question_id)
        .fetch_all(executor)
        .await?;
        Ok(options)
    }

    // =========================================================================
    //  RESPOSTAS
    // =========================================================================

    /// Upsert da resposta única por (viagem, cliente, pergunta). O valor novo
    /// regrava as cinco colunas de uma vez; as que não pertencem ao `kind`
    /// voltam a nulo por construção (`AnswerSlots`).
    pub async fn upsert_answer<'e, E>(
        &self,
        executor: E,
        trip_id: Uuid,
        client_id: Uuid,
        question_id: Uuid,
        slots: AnswerSlots,
    ) -> Result<Answer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, AnswerRow>(
            r#"
            INSERT INTO answers (
                trip_id, client_id, question_id,
                value_text, value_date, value_number, value_bool, value_option_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (trip_id, client_id, question_id) DO UPDATE SET
                value_text      = EXCLUDED.value_text,
                value_date      = EXCLUDED.value_date,
                value_number    = EXCLUDED.value_number,
                value_bool      = EXCLUDED.value_bool,
                value_option_id = EXCLUDED.value_option_id,
                updated_at      = now()
            RETURNING *
            "#,
        )
        .bind(trip_id)
        .bind(client_id)
        .bind(question_id)
        .bind(slots.value_text)
        .bind(slots.value_date)
        .bind(slots.value_number)
        .bind(slots.value_bool)
        .bind(slots.value_option_id)
        .fetch_one(executor)
        .await?;

        Ok(row.into())
    }

    pub async fn list_answers(
        &self,
        trip_id: Uuid,
        client_id: Uuid,
    ) -> Result<Vec<Answer>, AppError> {
        let rows = sqlx::query_as::<_, AnswerRow>(
            r#"
            SELECT a.* FROM answers a
            JOIN questions q ON q.id = a.question_id
            WHERE a.trip_id = $1 AND a.client_id = $2
            ORDER BY q.position ASC
            "#,
        )
        .bind(trip_id)
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Answer::from).collect())
    }
}
