// src/services/questionnaire_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, QuestionnaireRepository, TripRepository},
    models::questionnaire::{
        display_answer, Answer, AnswerValue, AnswerView, CreateOptionPayload,
        CreateQuestionPayload, CreateQuestionnairePayload, Question, QuestionKind,
        QuestionOption, Questionnaire, RecordAnswerPayload,
    },
};

#[derive(Clone)]
pub struct QuestionnaireService {
    repo: QuestionnaireRepository,
    trip_repo: TripRepository,
    client_repo: ClientRepository,
    pool: PgPool,
}

impl QuestionnaireService {
    pub fn new(
        repo: QuestionnaireRepository,
        trip_repo: TripRepository,
        client_repo: ClientRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            trip_repo,
            client_repo,
            pool,
        }
    }

    // =========================================================================
    //  DEFINIÇÃO (Questionário / Perguntas / Opções)
    // =========================================================================

    /// Um questionário por tipo de visto; o índice único do banco devolve
    /// UniquenessViolation para o segundo.
    pub async fn create_questionnaire(
        &self,
        payload: CreateQuestionnairePayload,
    ) -> Result<Questionnaire, AppError> {
        self.trip_repo
            .find_visa_type(payload.visa_type_id)
            .await?
            .ok_or(AppError::NotFound("Tipo de visto"))?;

        self.repo
            .create_questionnaire(&self.pool, payload.visa_type_id, &payload.title)
            .await
    }

    pub async fn get_by_visa_type(&self, visa_type_id: Uuid) -> Result<Questionnaire, AppError> {
        self.repo
            .find_by_visa_type(visa_type_id)
            .await?
            .ok_or(AppError::NotFound("Questionário"))
    }

    pub async fn add_question(
        &self,
        questionnaire_id: Uuid,
        payload: CreateQuestionPayload,
    ) -> Result<Question, AppError> {
        self.repo
            .find_by_id(questionnaire_id)
            .await?
            .ok_or(AppError::NotFound("Questionário"))?;

        self.repo
            .create_question(
                &self.pool,
                questionnaire_id,
                &payload.prompt,
                payload.kind,
                payload.position,
                payload.is_required,
            )
            .await
    }

    pub async fn list_questions(&self, questionnaire_id: Uuid) -> Result<Vec<Question>, AppError> {
        self.repo
            .find_by_id(questionnaire_id)
            .await?
            .ok_or(AppError::NotFound("Questionário"))?;
        self.repo.list_questions(questionnaire_id).await
    }

    /// Opções só fazem sentido em pergunta de seleção única.
    pub async fn add_option(
        &self,
        question_id: Uuid,
        payload: CreateOptionPayload,
    ) -> Result<QuestionOption, AppError> {
        let question = self
            .repo
            .find_question(question_id)
            .await?
            .ok_or(AppError::NotFound("Pergunta"))?;

        if question.kind != QuestionKind::SingleSelect {
            return Err(AppError::field("kind", "options_not_allowed"));
        }

        self.repo
            .create_option(&self.pool, question_id, &payload.label, payload.position)
            .await
    }

    pub async fn list_options(&self, question_id: Uuid) -> Result<Vec<QuestionOption>, AppError> {
        self.repo
            .find_question(question_id)
            .await?
            .ok_or(AppError::NotFound("Pergunta"))?;
        self.repo.list_options(&self.pool, question_id).await
    }

    // =========================================================================
    //  RESPOSTAS
    // =========================================================================

    /// Grava (ou regrava) a resposta única de (viagem, cliente, pergunta).
    ///
    /// Ordem das verificações: vínculo do cliente com a viagem, depois
    /// obrigatoriedade, depois coerção pelo `kind`. Qualquer falha aborta sem
    /// aplicar nada; responder uma pergunta nunca toca nas outras.
    pub async fn record_answer(
        &self,
        question_id: Uuid,
        payload: RecordAnswerPayload,
    ) -> Result<Answer, AppError> {
        let question = self
            .repo
            .find_question(question_id)
            .await?
            .ok_or(AppError::NotFound("Pergunta"))?;

        self.trip_repo
            .find_by_id(payload.trip_id)
            .await?
            .ok_or(AppError::NotFound("Viagem"))?;
        self.client_repo
            .find_by_id(payload.client_id)
            .await?
            .ok_or(AppError::NotFound("Cliente"))?;

        let linked = self
            .trip_repo
            .is_client_linked(&self.pool, payload.trip_id, payload.client_id)
            .await?;
        if !linked {
            return Err(AppError::ClientNotLinked);
        }

        let raw = payload.raw_value.trim();
        if question.is_required && raw.is_empty() {
            return Err(AppError::field(&question.prompt, "required"));
        }

        let options = if question.kind == QuestionKind::SingleSelect {
            self.repo.list_options(&self.pool, question.id).await?
        } else {
            Vec::new()
        };

        let value = AnswerValue::coerce(question.kind, raw, &options)
            .map_err(|code| AppError::field(&question.prompt, code))?;

        self.repo
            .upsert_answer(
                &self.pool,
                payload.trip_id,
                payload.client_id,
                question.id,
                value.into_slots(),
            )
            .await
    }

    /// Questionário respondido de um par (viagem, cliente): cada pergunta
    /// ativa com sua resposta (se houver) e o texto de exibição resolvido.
    pub async fn answered_questionnaire(
        &self,
        visa_type_id: Uuid,
        trip_id: Uuid,
        client_id: Uuid,
    ) -> Result<Vec<AnswerView>, AppError> {
        let questionnaire = self.get_by_visa_type(visa_type_id).await?;
        let questions = self.repo.list_questions(questionnaire.id).await?;
        let answers = self.repo.list_answers(trip_id, client_id).await?;

        let mut views = Vec::with_capacity(questions.len());
        for question in questions.into_iter().filter(|q| q.is_active) {
            let answer = answers.iter().find(|a| a.question_id == question.id).cloned();
            let options = if question.kind == QuestionKind::SingleSelect {
                self.repo.list_options(&self.pool, question.id).await?
            } else {
                Vec::new()
            };
            let display =
                display_answer(answer.as_ref().and_then(|a| a.value.as_ref()), &options);
            views.push(AnswerView {
                question,
                answer,
                display,
            });
        }
        Ok(views)
    }
}
