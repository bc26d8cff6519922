//! Normalização dos valores contínuos do modelo para o domínio discreto do
//! contrato. Funções totais: apenas limitam/arredondam, nunca falham.

use reciclo_core::types::{SubmissionDraft, SubmissionRecord};

/// Nível usado quando o valor de sujeira não é um número finito
pub const DEFAULT_DIRTINESS_LEVEL: u8 = 3;

/// Mapeia um valor arbitrário para o nível de sujeira aceito pelo contrato.
/// Valores já em [1,5] são truncados; os demais são tratados como escala
/// 0–100 e distribuídos em cinco faixas.
pub fn normalize_dirtiness(value: f64) -> u8 {
    if !value.is_finite() {
        return DEFAULT_DIRTINESS_LEVEL;
    }
    if (1.0..=5.0).contains(&value) {
        return value.floor() as u8;
    }
    let clamped = value.floor().clamp(0.0, 100.0);
    if clamped <= 20.0 {
        1
    } else if clamped <= 40.0 {
        2
    } else if clamped <= 60.0 {
        3
    } else if clamped <= 80.0 {
        4
    } else {
        5
    }
}

/// Trunca a recompensa e garante o mínimo de 1 — o ledger rejeita
/// submissões de valor zero
pub fn normalize_reward(value: f64) -> u64 {
    if !value.is_finite() {
        return 1;
    }
    let floored = value.floor();
    if floored < 1.0 {
        1
    } else {
        floored as u64
    }
}

/// Trunca o peso estimado; ausente ou não positivo vira 1 kg
pub fn normalize_weight(value: Option<f64>) -> u64 {
    match value {
        Some(v) if v.is_finite() && v.floor() >= 1.0 => v.floor() as u64,
        _ => 1,
    }
}

/// Constrói o registro que cruza a fronteira de confiança para o ledger.
/// Nenhum registro sai daqui com sujeira fora de [1,5] ou recompensa
/// menor que 1.
pub fn normalize_submission(draft: &SubmissionDraft) -> SubmissionRecord {
    let trash_type = if draft.trash_type.trim().is_empty() {
        "unknown".to_string()
    } else {
        draft.trash_type.clone()
    };

    SubmissionRecord {
        trash_type,
        weight_kg: normalize_weight(draft.weight_kg),
        location_type: draft.location_type,
        citizen_type: draft.citizen_type,
        area_dirtiness_level: normalize_dirtiness(draft.area_dirtiness_level),
        reward_amount: normalize_reward(draft.reward_amount),
    }
}
