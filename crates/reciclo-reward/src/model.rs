use reciclo_core::types::{ClassificationResult, ReferencePoint, RewardKind, TrashCategory};
use serde::{Deserialize, Serialize};

/// Recompensa base da faixa reciclável, usada como teto de melhoria de
/// categoria
pub const RECYCLABLE_BASE_REWARD: f64 = 10.0;

/// Decomposição de uma recompensa monetária em base (por categoria de
/// resíduo) e bônus (por índice de sujeira da localização)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    pub base: f64,
    pub bonus: f64,
    pub total: f64,
    pub kind: RewardKind,
}

/// Melhor recompensa alcançável sob os pontos de referência observados.
/// As flags distinguem "já ótimo" de "melhorável" — estados materialmente
/// diferentes para quem recebe a sugestão.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotentialReward {
    pub breakdown: RewardBreakdown,
    pub category_improvable: bool,
    pub location_improvable: bool,
    pub best_reference: Option<ReferencePoint>,
}

/// Reproduz a decomposição já embutida no resultado de classificação
pub fn compute_current(result: &ClassificationResult) -> RewardBreakdown {
    RewardBreakdown {
        base: result.base_reward,
        bonus: result.cleanliness_bonus,
        total: result.base_reward + result.cleanliness_bonus,
        kind: RewardKind::from_label(&result.reward),
    }
}

/// Ponto de referência com o maior índice de sujeira; empates resolvem
/// para o primeiro da lista
pub fn max_reference(points: &[ReferencePoint]) -> Option<&ReferencePoint> {
    points.iter().fold(None, |best, point| match best {
        None => Some(point),
        Some(current) if point.score > current.score => Some(point),
        _ => best,
    })
}

/// Calcula a decomposição potencial de recompensa. Somente leitura sobre o
/// resultado e os pontos de referência; um ponto com índice exatamente igual
/// ao observado não conta como melhoria (estritamente maior).
pub fn compute_potential(
    result: &ClassificationResult,
    points: &[ReferencePoint],
) -> PotentialReward {
    let current = compute_current(result);

    let category_improvable = result.category() != TrashCategory::Recyclable;
    let base = if category_improvable {
        RECYCLABLE_BASE_REWARD
    } else {
        current.base
    };

    let best = max_reference(points);
    let best_score = best.map(|point| point.score).unwrap_or(0.0);
    let location_improvable = best_score > result.cleanliness_score;
    let bonus = if location_improvable {
        base * best_score
    } else {
        current.bonus
    };

    PotentialReward {
        breakdown: RewardBreakdown {
            base,
            bonus,
            total: base + bonus,
            kind: current.kind,
        },
        category_improvable,
        location_improvable,
        best_reference: best.cloned(),
    }
}
