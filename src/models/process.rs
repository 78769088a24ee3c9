// src/models/process.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- CATÁLOGO DE ETAPAS ---

// Definição nomeada de etapa com prazo padrão em dias. visa_type_id nulo =
// vale para qualquer tipo de visto.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStatus {
    pub id: Uuid,

    #[schema(example = "Entrevista agendada")]
    pub name: String,

    #[schema(example = 30)]
    pub default_deadline_days: i32,

    pub position: i32,
    pub visa_type_id: Option<Uuid>,
}

// --- PROCESSO ---

// No máximo um processo por (viagem, cliente).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub client_id: Uuid,

    pub status_id: Option<Uuid>,

    // Prazo de referência; se vier zerado na criação, copia o padrão do
    // status inicial.
    pub deadline_days: i32,

    pub notes: Option<String>,
    pub advisor_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
}

// Etapa individual; copia o prazo do status no momento da criação (não fica
// vinculada ao valor atual do catálogo).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStep {
    pub id: Uuid,
    pub process_id: Uuid,
    pub status_id: Uuid,

    pub position: i32,
    pub completed: bool,

    // Preenchida se e somente se completed = true.
    #[schema(value_type = Option<String>, format = Date)]
    pub completed_at: Option<NaiveDate>,

    pub deadline_days: i32,
}

// Processo + progresso derivado, como os handlers devolvem.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessWithProgress {
    #[serde(flatten)]
    pub process: Process,

    pub total_steps: usize,
    pub completed_steps: usize,
    pub progress_percent: u32,
    pub steps: Vec<ProcessStep>,
}

/// Percentual de progresso: floor(100 * concluídas / total), 0 quando não há
/// etapas. Sempre recalculado na leitura, nunca armazenado.
pub fn progress_percent(completed_steps: usize, total_steps: usize) -> u32 {
    if total_steps == 0 {
        return 0;
    }
    (100 * completed_steps / total_steps) as u32
}

impl ProcessWithProgress {
    pub fn assemble(process: Process, steps: Vec<ProcessStep>) -> Self {
        let total_steps = steps.len();
        let completed_steps = steps.iter().filter(|s| s.completed).count();
        ProcessWithProgress {
            process,
            total_steps,
            completed_steps,
            progress_percent: progress_percent(completed_steps, total_steps),
            steps,
        }
    }
}

/// Plano de materialização de etapas: dado o catálogo aplicável (já em ordem)
/// e uma proporção p ∈ [0, 1], as primeiras floor(total × p) etapas nascem
/// concluídas e as demais pendentes. Função pura; o serviço aplica o plano
/// com upsert por (processo, status), o que a torna idempotente.
pub fn materialization_plan(
    statuses: &[ProcessStatus],
    proportion: f64,
) -> Vec<(Uuid, bool)> {
    let total = statuses.len();
    let completed_count = ((total as f64) * proportion).floor() as usize;
    statuses
        .iter()
        .enumerate()
        .map(|(idx, status)| (status.id, idx < completed_count))
        .collect()
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProcessPayload {
    pub trip_id: Uuid,
    pub client_id: Uuid,

    // Status inicial (opcional); fornece o prazo padrão quando deadline_days
    // vem ausente ou zerado.
    pub status_id: Option<Uuid>,

    #[serde(default)]
    #[schema(example = 30)]
    pub deadline_days: i32,

    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterializeStepsPayload {
    // Proporção de etapas já concluídas, entre 0 e 1.
    #[schema(example = 0.5)]
    pub proportion: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetStepCompletionPayload {
    pub completed: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStatusPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Entrevista agendada")]
    pub name: String,

    #[serde(default)]
    #[schema(example = 30)]
    pub default_deadline_days: i32,

    #[serde(default)]
    pub position: i32,

    pub visa_type_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(position: i32) -> ProcessStatus {
        ProcessStatus {
            id: Uuid::new_v4(),
            name: format!("Etapa {position}"),
            default_deadline_days: 7 * position,
            position,
            visa_type_id: None,
        }
    }

    fn step(process_id: Uuid, position: i32, completed: bool) -> ProcessStep {
        ProcessStep {
            id: Uuid::new_v4(),
            process_id,
            status_id: Uuid::new_v4(),
            position,
            completed,
            completed_at: completed.then(|| NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()),
            deadline_days: 7,
        }
    }

    #[test]
    fn progress_is_zero_without_steps() {
        assert_eq!(progress_percent(0, 0), 0);
    }

    #[test]
    fn progress_uses_floor_not_round() {
        // 1 de 3 = 33%, nunca 34%.
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 66);
        assert_eq!(progress_percent(3, 3), 100);
    }

    #[test]
    fn progress_stays_within_bounds() {
        for total in 0..=10usize {
            for completed in 0..=total {
                let p = progress_percent(completed, total);
                assert!(p <= 100);
            }
        }
    }

    #[test]
    fn assemble_counts_steps_independently_of_order() {
        let process = Process {
            id: Uuid::new_v4(),
            trip_id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            status_id: None,
            deadline_days: 30,
            notes: None,
            advisor_id: None,
            created_at: Utc::now(),
        };
        // Etapas [1, 2, 3]; só a de ordem 2 concluída — nenhuma dependência
        // sequencial entre elas.
        let steps = vec![
            step(process.id, 1, false),
            step(process.id, 2, true),
            step(process.id, 3, false),
        ];
        let view = ProcessWithProgress::assemble(process, steps);
        assert_eq!(view.total_steps, 3);
        assert_eq!(view.completed_steps, 1);
        assert_eq!(view.progress_percent, 33);
        assert!(!view.steps[0].completed);
        assert!(!view.steps[2].completed);
    }

    #[test]
    fn materialization_plan_completes_prefix_by_floor() {
        let statuses: Vec<ProcessStatus> = (1..=5).map(status).collect();

        let plan = materialization_plan(&statuses, 0.5);
        // floor(5 × 0.5) = 2 primeiras concluídas.
        let completed: Vec<bool> = plan.iter().map(|(_, done)| *done).collect();
        assert_eq!(completed, vec![true, true, false, false, false]);

        // Extremos.
        assert!(materialization_plan(&statuses, 0.0)
            .iter()
            .all(|(_, done)| !done));
        assert!(materialization_plan(&statuses, 1.0)
            .iter()
            .all(|(_, done)| *done));
    }

    #[test]
    fn materialization_plan_is_stable_on_rerun() {
        let statuses: Vec<ProcessStatus> = (1..=4).map(status).collect();
        let first = materialization_plan(&statuses, 0.75);
        let second = materialization_plan(&statuses, 0.75);
        assert_eq!(first, second);
    }
}
