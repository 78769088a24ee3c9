use chrono::Utc;
use rust_decimal_macros::dec;
use uuid::Uuid;
use vistos_backend::models::{
    clients::ClientRole,
    finance::{propagation_targets, FinancialRecord, RecordStatus},
    process::{materialization_plan, progress_percent, ProcessStatus},
    questionnaire::{display_answer, AnswerValue, QuestionKind, QuestionOption},
};

fn catalog_status(position: i32, name: &str, deadline: i32) -> ProcessStatus {
    ProcessStatus {
        id: Uuid::new_v4(),
        name: name.to_string(),
        default_deadline_days: deadline,
        position,
        visa_type_id: None,
    }
}

fn record_for(trip_id: Uuid, client_id: Option<Uuid>) -> FinancialRecord {
    FinancialRecord {
        id: Uuid::new_v4(),
        trip_id,
        client_id,
        amount: dec!(400.00),
        status: RecordStatus::Pending,
        payment_date: None,
        notes: None,
        advisor_id: None,
        created_by: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn questionnaire_answers_coerce_and_display_per_kind() {
    let question_id = Uuid::new_v4();
    let options = vec![
        QuestionOption {
            id: Uuid::new_v4(),
            question_id,
            label: "Primeira solicitação".to_string(),
            position: 1,
        },
        QuestionOption {
            id: Uuid::new_v4(),
            question_id,
            label: "Renovação".to_string(),
            position: 2,
        },
    ];

    // Data em ISO na entrada, dd/mm/aaaa na saída.
    let interview = AnswerValue::coerce(QuestionKind::Date, "2026-01-10", &[])
        .expect("ISO date accepted");
    assert_eq!(interview.display(&[]), "10/01/2026");

    // Booleano com os tokens fixos do formulário.
    let traveled = AnswerValue::coerce(QuestionKind::Boolean, "YES", &[])
        .expect("token accepted");
    assert_eq!(traveled.display(&[]), "Yes");

    // Seleção única exibe o rótulo da opção escolhida.
    let chosen = options[1].id;
    let selected = AnswerValue::coerce(QuestionKind::SingleSelect, &chosen.to_string(), &options)
        .expect("own option accepted");
    assert_eq!(selected.display(&options), "Renovação");

    // Opção de outra pergunta é recusada na coerção.
    let foreign = Uuid::new_v4().to_string();
    assert_eq!(
        AnswerValue::coerce(QuestionKind::SingleSelect, &foreign, &options),
        Err("invalid_option")
    );

    // Pergunta sem resposta exibe vazio.
    assert_eq!(display_answer(None, &options), "");
}

#[test]
fn rewriting_an_answer_leaves_a_single_populated_slot() {
    let first = AnswerValue::coerce(QuestionKind::Number, "1500.00", &[])
        .expect("number accepted")
        .into_slots();
    assert!(first.value_number.is_some());
    assert!(first.value_text.is_none());

    // Regravar com outro tipo zera o slot anterior por construção.
    let rewritten = AnswerValue::coerce(QuestionKind::Text, "não se aplica", &[])
        .expect("text accepted")
        .into_slots();
    assert!(rewritten.value_text.is_some());
    assert!(rewritten.value_number.is_none());
    assert!(rewritten.value_date.is_none());
    assert!(rewritten.value_bool.is_none());
    assert!(rewritten.value_option_id.is_none());
}

#[test]
fn step_materialization_completes_a_prefix_and_progress_follows() {
    let catalog = vec![
        catalog_status(1, "Documentação recebida", 7),
        catalog_status(2, "Formulário preenchido", 14),
        catalog_status(3, "Taxa consular paga", 21),
        catalog_status(4, "Entrevista agendada", 30),
        catalog_status(5, "Visto emitido", 60),
    ];

    let plan = materialization_plan(&catalog, 0.5);
    let done: Vec<bool> = plan.iter().map(|(_, d)| *d).collect();
    // floor(5 × 0.5) = 2 etapas concluídas, sempre o prefixo.
    assert_eq!(done, vec![true, true, false, false, false]);

    let completed = done.iter().filter(|d| **d).count();
    assert_eq!(progress_percent(completed, done.len()), 40);

    // Repetir com a mesma proporção produz o mesmo plano (o upsert por
    // (processo, status) faz o resto da idempotência no banco).
    assert_eq!(materialization_plan(&catalog, 0.5), plan);
}

#[test]
fn principal_payment_cascades_only_to_existing_dependent_records() {
    let trip_id = Uuid::new_v4();
    let dependent_with_record = Uuid::new_v4();
    let dependent_without_record = Uuid::new_v4();

    let principal_record = record_for(trip_id, Some(Uuid::new_v4()));
    let dependent_record = record_for(trip_id, Some(dependent_with_record));
    let trip_records = vec![principal_record, dependent_record.clone()];

    let targets = propagation_targets(
        Some(ClientRole::Principal),
        &[dependent_with_record, dependent_without_record],
        &trip_records,
    );

    // Só o registro existente entra na cascata; nada é fabricado para o
    // dependente sem registro.
    assert_eq!(targets, vec![dependent_record.id]);
}

#[test]
fn dependent_and_clientless_payments_never_cascade() {
    let trip_id = Uuid::new_v4();
    let principal_id = Uuid::new_v4();
    let trip_records = vec![
        record_for(trip_id, Some(principal_id)),
        record_for(trip_id, None),
    ];

    let from_dependent = propagation_targets(
        Some(ClientRole::Dependent { principal_id }),
        &[],
        &trip_records,
    );
    assert!(from_dependent.is_empty());

    let from_clientless = propagation_targets(None, &[], &trip_records);
    assert!(from_clientless.is_empty());
}
