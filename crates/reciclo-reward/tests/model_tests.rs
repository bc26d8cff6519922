use reciclo_core::types::{ClassificationResult, ReferencePoint, RewardKind};
use reciclo_reward::model::{compute_current, compute_potential, max_reference};

fn classification(
    trash_type: &str,
    cleanliness: f64,
    base: f64,
    bonus: f64,
    reward: &str,
) -> ClassificationResult {
    ClassificationResult {
        trash_type: trash_type.to_string(),
        reward: reward.to_string(),
        cleanliness_score: cleanliness,
        base_reward: base,
        cleanliness_bonus: bonus,
        lat: 13.0418,
        lng: 80.2337,
        detections: vec![],
        weight_kg: None,
    }
}

fn point(name: &str, score: f64) -> ReferencePoint {
    ReferencePoint {
        lat: 0.0,
        lng: 0.0,
        score,
        name: name.to_string(),
    }
}

#[test]
fn recyclable_at_best_location_is_already_optimal() {
    let result = classification("Recyclable", 0.9, 10.0, 9.0, "₹19.00 Ration Subsidy");
    let points = vec![point("T. Nagar", 0.9), point("Anna Nagar", 0.7)];

    let potential = compute_potential(&result, &points);

    assert!(!potential.category_improvable);
    assert!(!potential.location_improvable);
    assert_eq!(potential.breakdown.total, compute_current(&result).total);
    assert_eq!(potential.breakdown.base, 10.0);
    assert_eq!(potential.breakdown.bonus, 9.0);
}

#[test]
fn recycling_label_variants_count_as_already_recyclable() {
    // "recycling" cai na família "recycl": a categoria não é melhorável e
    // a base potencial permanece a atual, não o teto de 10.0 reaplicado
    let result = classification("recycling", 0.5, 8.0, 4.0, "₹12.00 Ration Subsidy");

    let potential = compute_potential(&result, &[]);

    assert!(!potential.category_improvable);
    assert_eq!(potential.breakdown.base, 8.0);
    assert_eq!(potential.breakdown.total, compute_current(&result).total);
}

#[test]
fn max_reference_ties_resolve_to_first_listed() {
    let points = vec![point("A", 0.9), point("B", 0.9), point("C", 0.5)];

    let best = max_reference(&points).expect("lista não vazia");
    assert_eq!(best.name, "A");
    assert!(points.iter().all(|p| p.score <= best.score));
}

#[test]
fn organic_submission_can_improve_category_and_location() {
    let result = classification("organic", 0.5, 5.0, 1.0, "₹6.00 Ration Subsidy");
    let points = vec![point("Market Rd", 0.9)];

    let potential = compute_potential(&result, &points);

    assert!(potential.category_improvable);
    assert!(potential.location_improvable);
    assert_eq!(potential.breakdown.base, 10.0);
    assert!((potential.breakdown.bonus - 9.0).abs() < 1e-9);
    assert!((potential.breakdown.total - 19.0).abs() < 1e-9);
    assert_eq!(
        potential.best_reference.as_ref().map(|p| p.name.as_str()),
        Some("Market Rd")
    );
}

#[test]
fn equal_reference_score_is_not_an_improvement() {
    let result = classification("Recyclable", 0.8, 10.0, 8.0, "₹18.00 Ration Subsidy");
    let points = vec![point("Adyar", 0.8)];

    let potential = compute_potential(&result, &points);

    assert!(!potential.location_improvable);
    assert_eq!(potential.breakdown.bonus, 8.0);
}

#[test]
fn empty_reference_set_counts_as_score_zero() {
    let result = classification("Trash", 0.0, 5.0, 0.0, "₹5.00 Ration Subsidy");

    let potential = compute_potential(&result, &[]);

    // 0 não excede estritamente 0: bônus permanece o atual
    assert!(!potential.location_improvable);
    assert!(potential.category_improvable);
    assert_eq!(potential.breakdown.base, 10.0);
    assert_eq!(potential.breakdown.bonus, 0.0);
    assert!(potential.best_reference.is_none());
}

#[test]
fn reward_kind_follows_the_label() {
    let taxed = classification("Recyclable", 0.5, 10.0, 2.0, "₹12.00 Tax Credit");
    let subsidized = classification("Recyclable", 0.5, 10.0, 2.0, "₹12.00 Ration Subsidy");

    assert_eq!(compute_current(&taxed).kind, RewardKind::TaxCredit);
    assert_eq!(compute_current(&subsidized).kind, RewardKind::RationSubsidy);
    assert_eq!(
        compute_potential(&taxed, &[]).breakdown.kind,
        RewardKind::TaxCredit
    );
}

#[test]
fn current_breakdown_echoes_the_classification() {
    let result = classification("Trash", 0.3, 5.0, 1.5, "₹6.50 Ration Subsidy");

    let current = compute_current(&result);
    assert_eq!(current.base, 5.0);
    assert_eq!(current.bonus, 1.5);
    assert_eq!(current.total, 6.5);
}
