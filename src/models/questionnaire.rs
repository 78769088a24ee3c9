// src/models/questionnaire.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- ENUMS ---

// Mapeia o CREATE TYPE question_kind do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "question_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionKind {
    Text,
    Date,
    Number,
    Boolean,
    SingleSelect,
}

// --- DEFINIÇÕES (O Molde) ---

// Um questionário por tipo de visto (um-para-um).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Questionnaire {
    pub id: Uuid,
    pub visa_type_id: Uuid,

    #[schema(example = "Formulário DS-160 (apoio)")]
    pub title: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: Uuid,
    pub questionnaire_id: Uuid,

    #[schema(example = "Qual a data prevista da entrevista?")]
    pub prompt: String,

    pub kind: QuestionKind,

    // Ordem de exibição, única dentro do questionário.
    pub position: i32,

    pub is_required: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub id: Uuid,
    pub question_id: Uuid,

    #[schema(example = "Primeira solicitação")]
    pub label: String,

    // Ordem de exibição, única dentro da pergunta.
    pub position: i32,
}

// --- RESPOSTA (O Dado) ---

/// Valor tipado de uma resposta. Exatamente uma variante por `kind` da
/// pergunta; a conversão de/para as cinco colunas anuláveis do banco vive em
/// `from_slots`/`into_slots`, então não existe "limpar os outros campos"
/// espalhado pelo código.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum AnswerValue {
    Text(String),
    Date(NaiveDate),
    Number(Decimal),
    Bool(bool),
    Selected(Uuid),
}

/// As cinco colunas de valor da tabela `answers`, como o banco as vê.
#[derive(Debug, Clone, Default)]
pub struct AnswerSlots {
    pub value_text: Option<String>,
    pub value_date: Option<NaiveDate>,
    pub value_number: Option<Decimal>,
    pub value_bool: Option<bool>,
    pub value_option_id: Option<Uuid>,
}

impl AnswerValue {
    /// Converte um valor bruto (texto vindo do formulário) no slot certo para
    /// o `kind` da pergunta. Erros voltam como código curto para o chamador
    /// apontar a pergunta ofendida.
    pub fn coerce(
        kind: QuestionKind,
        raw: &str,
        options: &[QuestionOption],
    ) -> Result<AnswerValue, &'static str> {
        let raw = raw.trim();
        match kind {
            QuestionKind::Text => Ok(AnswerValue::Text(raw.to_string())),
            QuestionKind::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(AnswerValue::Date)
                .map_err(|_| "invalid_date_format"),
            QuestionKind::Number => raw
                .parse::<Decimal>()
                .map(AnswerValue::Number)
                .map_err(|_| "invalid_number"),
            QuestionKind::Boolean => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(AnswerValue::Bool(true)),
                "false" | "0" | "no" => Ok(AnswerValue::Bool(false)),
                _ => Err("invalid_boolean"),
            },
            QuestionKind::SingleSelect => {
                let option_id: Uuid = raw.parse().map_err(|_| "invalid_option")?;
                // A opção precisa pertencer à própria pergunta.
                if options.iter().any(|o| o.id == option_id) {
                    Ok(AnswerValue::Selected(option_id))
                } else {
                    Err("invalid_option")
                }
            }
        }
    }

    /// Remonta o valor a partir das colunas do banco. `None` = sem resposta.
    pub fn from_slots(slots: &AnswerSlots) -> Option<AnswerValue> {
        if let Some(ref text) = slots.value_text {
            Some(AnswerValue::Text(text.clone()))
        } else if let Some(date) = slots.value_date {
            Some(AnswerValue::Date(date))
        } else if let Some(number) = slots.value_number {
            Some(AnswerValue::Number(number))
        } else if let Some(flag) = slots.value_bool {
            Some(AnswerValue::Bool(flag))
        } else {
            slots.value_option_id.map(AnswerValue::Selected)
        }
    }

    /// Espalha o valor na coluna correspondente, deixando as demais nulas.
    pub fn into_slots(self) -> AnswerSlots {
        let mut slots = AnswerSlots::default();
        match self {
            AnswerValue::Text(text) => slots.value_text = Some(text),
            AnswerValue::Date(date) => slots.value_date = Some(date),
            AnswerValue::Number(number) => slots.value_number = Some(number),
            AnswerValue::Bool(flag) => slots.value_bool = Some(flag),
            AnswerValue::Selected(option_id) => slots.value_option_id = Some(option_id),
        }
        slots
    }

    /// Formato humano do contrato de exibição: data em dd/mm/aaaa, booleano
    /// como "Yes"/"No", seleção vira o rótulo da opção referenciada.
    pub fn display(&self, options: &[QuestionOption]) -> String {
        match self {
            AnswerValue::Text(text) => text.clone(),
            AnswerValue::Date(date) => date.format("%d/%m/%Y").to_string(),
            AnswerValue::Number(number) => number.to_string(),
            AnswerValue::Bool(true) => "Yes".to_string(),
            AnswerValue::Bool(false) => "No".to_string(),
            AnswerValue::Selected(option_id) => options
                .iter()
                .find(|o| o.id == *option_id)
                .map(|o| o.label.clone())
                .unwrap_or_default(),
        }
    }
}

/// Conteúdo sem resposta vira string vazia, nunca pânico.
pub fn display_answer(value: Option<&AnswerValue>, options: &[QuestionOption]) -> String {
    value.map(|v| v.display(options)).unwrap_or_default()
}

// Linha crua da tabela `answers`; os repositórios leem este formato e o
// convertem para `Answer` logo na borda.
#[derive(Debug, Clone, FromRow)]
pub struct AnswerRow {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub client_id: Uuid,
    pub question_id: Uuid,
    pub value_text: Option<String>,
    pub value_date: Option<NaiveDate>,
    pub value_number: Option<Decimal>,
    pub value_bool: Option<bool>,
    pub value_option_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub client_id: Uuid,
    pub question_id: Uuid,
    pub value: Option<AnswerValue>,
    pub updated_at: DateTime<Utc>,
}

impl From<AnswerRow> for Answer {
    fn from(row: AnswerRow) -> Self {
        let slots = AnswerSlots {
            value_text: row.value_text,
            value_date: row.value_date,
            value_number: row.value_number,
            value_bool: row.value_bool,
            value_option_id: row.value_option_id,
        };
        Answer {
            id: row.id,
            trip_id: row.trip_id,
            client_id: row.client_id,
            question_id: row.question_id,
            value: AnswerValue::from_slots(&slots),
            updated_at: row.updated_at,
        }
    }
}

// Resposta acompanhada da pergunta e do texto de exibição já resolvido.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerView {
    pub question: Question,
    pub answer: Option<Answer>,
    pub display: String,
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionnairePayload {
    pub visa_type_id: Uuid,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Formulário DS-160 (apoio)")]
    pub title: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Qual a data prevista da entrevista?")]
    pub prompt: String,

    pub kind: QuestionKind,

    #[schema(example = 1)]
    pub position: i32,

    #[serde(default)]
    pub is_required: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOptionPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Primeira solicitação")]
    pub label: String,

    #[schema(example = 1)]
    pub position: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordAnswerPayload {
    pub trip_id: Uuid,
    pub client_id: Uuid,

    // Valor bruto como o formulário envia; a coerção por `kind` acontece no
    // serviço. Vazio/ausente em pergunta obrigatória é erro de validação.
    #[serde(default)]
    pub raw_value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn option(question_id: Uuid, label: &str, position: i32) -> QuestionOption {
        QuestionOption {
            id: Uuid::new_v4(),
            question_id,
            label: label.to_string(),
            position,
        }
    }

    #[test]
    fn coerce_date_accepts_iso_and_rejects_garbage() {
        let value = AnswerValue::coerce(QuestionKind::Date, "2026-01-10", &[]).unwrap();
        assert_eq!(
            value,
            AnswerValue::Date(NaiveDate::from_ymd_opt(2026, 1, 10).unwrap())
        );
        assert_eq!(
            AnswerValue::coerce(QuestionKind::Date, "10/01/2026", &[]),
            Err("invalid_date_format")
        );
    }

    #[test]
    fn coerce_number_parses_decimal() {
        let value = AnswerValue::coerce(QuestionKind::Number, "1234.56", &[]).unwrap();
        assert_eq!(value, AnswerValue::Number(dec!(1234.56)));
        assert_eq!(
            AnswerValue::coerce(QuestionKind::Number, "abc", &[]),
            Err("invalid_number")
        );
    }

    #[test]
    fn coerce_boolean_uses_fixed_tokens() {
        assert_eq!(
            AnswerValue::coerce(QuestionKind::Boolean, "true", &[]),
            Ok(AnswerValue::Bool(true))
        );
        assert_eq!(
            AnswerValue::coerce(QuestionKind::Boolean, "No", &[]),
            Ok(AnswerValue::Bool(false))
        );
        assert_eq!(
            AnswerValue::coerce(QuestionKind::Boolean, "talvez", &[]),
            Err("invalid_boolean")
        );
    }

    #[test]
    fn coerce_select_requires_option_of_the_same_question() {
        let question_id = Uuid::new_v4();
        let opts = vec![
            option(question_id, "Primeira solicitação", 1),
            option(question_id, "Renovação", 2),
        ];
        let chosen = opts[1].id;

        let value =
            AnswerValue::coerce(QuestionKind::SingleSelect, &chosen.to_string(), &opts).unwrap();
        assert_eq!(value, AnswerValue::Selected(chosen));

        // Opção de outra pergunta não passa.
        let foreign = Uuid::new_v4();
        assert_eq!(
            AnswerValue::coerce(QuestionKind::SingleSelect, &foreign.to_string(), &opts),
            Err("invalid_option")
        );
    }

    #[test]
    fn slots_round_trip_keeps_exactly_one_column() {
        let value = AnswerValue::Date(NaiveDate::from_ymd_opt(2026, 1, 10).unwrap());
        let slots = value.clone().into_slots();
        assert!(slots.value_text.is_none());
        assert!(slots.value_number.is_none());
        assert!(slots.value_bool.is_none());
        assert!(slots.value_option_id.is_none());
        assert_eq!(AnswerValue::from_slots(&slots), Some(value));
    }

    #[test]
    fn display_follows_the_contract() {
        let question_id = Uuid::new_v4();
        let opts = vec![option(question_id, "Renovação", 1)];

        let date = AnswerValue::Date(NaiveDate::from_ymd_opt(2026, 1, 10).unwrap());
        assert_eq!(date.display(&[]), "10/01/2026");

        assert_eq!(AnswerValue::Bool(true).display(&[]), "Yes");
        assert_eq!(AnswerValue::Bool(false).display(&[]), "No");

        let selected = AnswerValue::Selected(opts[0].id);
        assert_eq!(selected.display(&opts), "Renovação");

        // Sem resposta: string vazia, nunca pânico.
        assert_eq!(display_answer(None, &opts), "");
    }

    #[test]
    fn display_number_and_text_pass_through() {
        assert_eq!(AnswerValue::Number(dec!(400.00)).display(&[]), "400.00");
        assert_eq!(
            AnswerValue::Text("João".to_string()).display(&[]),
            "João"
        );
    }
}
