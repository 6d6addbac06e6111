use super::common::*;
use crate::assessment::decision::{
    compute_decision, ImpactType, PriorityLevel, RuleSeverity, MAX_RECOMMENDATIONS, RISK_RULES,
};
use crate::assessment::domain::ConfidenceLevel;
use crate::assessment::scoring::compute_scores;

#[test]
fn golden_decision_is_moderate() {
    let record = golden_record();
    let scores = compute_scores(&record, veto_standard());
    let decision = compute_decision(&record, &scores);

    let ids: Vec<&str> = decision.triggered_risks.iter().map(|risk| risk.id).collect();
    assert_eq!(
        ids,
        vec![
            "masse_salariale_excessive",
            "score_financier_faible",
            "desequilibre_dimensions"
        ]
    );
    assert_eq!(decision.priority_level, PriorityLevel::Modere);
    assert!(decision
        .decision_summary
        .starts_with("Situation globalement maîtrisée"));

    assert_eq!(decision.quantified_recommendations.len(), 1);
    let recommendation = &decision.quantified_recommendations[0];
    assert_eq!(recommendation.id, "reduire_masse_salariale");
    assert_eq!(recommendation.impact_type, ImpactType::Couts);
    assert_eq!(recommendation.estimated_impact_min, 6_750.0);
    assert_eq!(recommendation.estimated_impact_max, 13_500.0);
    assert_eq!(recommendation.unit, "€");
}

#[test]
fn short_runway_forces_critical_priority() {
    let mut record = golden_record();
    record.finance.cash_runway_months = Some(2.0);
    let scores = compute_scores(&record, veto_standard());
    let decision = compute_decision(&record, &scores);

    assert_eq!(decision.priority_level, PriorityLevel::Critique);
    assert_eq!(decision.triggered_risks[0].id, "tresorerie_critique");
    assert_eq!(decision.triggered_risks[0].severity, RuleSeverity::Critical);
    assert!(decision.decision_summary.starts_with("Situation critique"));
}

#[test]
fn low_global_score_is_critical_without_critical_rules() {
    let record = complete_record();
    let decision = compute_decision(&record, &scores(35.0, 80.0, 80.0, 80.0, 80.0));
    assert_eq!(decision.priority_level, PriorityLevel::Critique);
}

#[test]
fn priority_ladder_follows_global_score() {
    let mut record = complete_record();
    record.costs.hr_costs_percent = 40.0;
    record.finance.cash_runway_months = Some(12.0);

    let high = compute_decision(&record, &scores(45.0, 70.0, 70.0, 70.0, 70.0));
    assert_eq!(high.priority_level, PriorityLevel::Eleve);
    assert!(high.decision_summary.contains("45.0/100"));

    let moderate = compute_decision(&record, &scores(55.0, 70.0, 70.0, 70.0, 70.0));
    assert_eq!(moderate.priority_level, PriorityLevel::Modere);

    let low = compute_decision(&record, &scores(75.0, 70.0, 70.0, 70.0, 70.0));
    assert_eq!(low.priority_level, PriorityLevel::Faible);
    assert!(low.triggered_risks.is_empty());
    assert!(low.decision_summary.starts_with("Situation saine"));
}

#[test]
fn severity_order_is_stable_and_lists_are_capped() {
    let record = distressed_record();
    let scores = compute_scores(&record, veto_standard());
    let decision = compute_decision(&record, &scores);

    let ranks: Vec<u8> = decision
        .triggered_risks
        .iter()
        .map(|risk| risk.severity.rank())
        .collect();
    let mut sorted = ranks.clone();
    sorted.sort_unstable();
    assert_eq!(ranks, sorted);

    let declaration_order = |id: &str| {
        RISK_RULES
            .iter()
            .position(|rule| rule.id == id)
            .expect("known rule")
    };
    for pair in decision.triggered_risks.windows(2) {
        if pair[0].severity == pair[1].severity {
            assert!(declaration_order(pair[0].id) < declaration_order(pair[1].id));
        }
    }

    assert_eq!(decision.priority_level, PriorityLevel::Critique);
    assert_eq!(decision.top_risks.len(), 3);
    assert_eq!(decision.top_levers.len(), 3);
    assert!(decision.quick_wins.len() <= 3);
    assert!(decision.structural_actions.len() <= 3);
    assert_eq!(decision.top_risks[0], decision.triggered_risks[0].risk);
}

#[test]
fn recommendations_keep_the_five_largest() {
    let record = distressed_record();
    let scores = compute_scores(&record, veto_standard());
    let decision = compute_decision(&record, &scores);

    let ids: Vec<&str> = decision
        .quantified_recommendations
        .iter()
        .map(|recommendation| recommendation.id)
        .collect();
    assert_eq!(ids.len(), MAX_RECOMMENDATIONS);
    assert_eq!(
        ids,
        vec![
            "optimiser_occupation",
            "optimiser_tresorerie",
            "ameliorer_productivite",
            "ameliorer_marge_brute",
            "reduire_masse_salariale"
        ]
    );

    for recommendation in &decision.quantified_recommendations {
        assert!(recommendation.estimated_impact_min <= recommendation.estimated_impact_max);
        assert!(recommendation.estimated_impact_min >= 0.0);
        assert_eq!(recommendation.estimated_impact_min.fract(), 0.0);
    }
    assert_eq!(
        decision.quantified_recommendations[1].confidence_level,
        ConfidenceLevel::Bon
    );
}

#[test]
fn decision_is_deterministic() {
    let record = distressed_record();
    let scores = compute_scores(&record, veto_standard());
    assert_eq!(
        compute_decision(&record, &scores),
        compute_decision(&record, &scores)
    );
}
