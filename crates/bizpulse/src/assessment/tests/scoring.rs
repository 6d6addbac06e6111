use super::common::*;
use crate::assessment::domain::{Dimension, Satisfaction};
use crate::assessment::scoring::{compute_breakdown, compute_scores, completeness_penalty};

#[test]
fn golden_veterinary_scores() {
    let scores = compute_scores(&golden_record(), veto_standard());

    assert_eq!(scores.financier, 48.9);
    assert_eq!(scores.operationnel, 71.2);
    assert_eq!(scores.commercial, 100.0);
    assert_eq!(scores.strategique, 76.7);
    assert_close(scores.global, 68.25, 0.051);
}

#[test]
fn golden_breakdown_tracks_missing_inputs() {
    let breakdown = compute_breakdown(&golden_record(), veto_standard());

    assert_eq!(breakdown.missing_optional_fields, 9);
    assert_eq!(breakdown.completeness_penalty, 2.0);

    let financier = &breakdown.dimensions[0];
    assert_eq!(financier.dimension, Dimension::Financier);
    assert_eq!(financier.contributions.total_weight(), 90.0);
    assert!(financier.contributions.contains("marge_brute"));
    assert!(!financier.contributions.contains("marge_nette"));
    assert!(!financier.contributions.contains("tresorerie"));

    let strategique = &breakdown.dimensions[3];
    assert_eq!(strategique.contributions.total_weight(), 60.0);
}

#[test]
fn absent_metrics_redistribute_their_weight() {
    let mut record = golden_record();
    let before = compute_scores(&record, veto_standard());

    // CSAT at the excellent tier scores 100, the current commercial average.
    record.commercial.satisfaction = Some(Satisfaction {
        csat_percent: Some(95.0),
        nps: None,
    });
    let after = compute_scores(&record, veto_standard());

    assert_eq!(before.commercial, after.commercial);
    assert_eq!(after.commercial, 100.0);
}

#[test]
fn present_optional_metric_moves_the_dimension() {
    let mut record = golden_record();
    record.finance.cash_runway_months = Some(1.0);
    let scores = compute_scores(&record, veto_standard());

    // 4400 + 20 × 5 over 95.
    assert_eq!(scores.financier, 47.4);
}

#[test]
fn complete_record_carries_no_penalty() {
    let breakdown = compute_breakdown(&complete_record(), veto_standard());
    assert_eq!(breakdown.missing_optional_fields, 0);
    assert_eq!(breakdown.completeness_penalty, 0.0);

    let weighted: f64 = Dimension::ALL
        .into_iter()
        .map(|dimension| breakdown.scores.dimension(dimension) * dimension.global_weight())
        .sum();
    assert_close(breakdown.scores.global, weighted, 0.051);
}

#[test]
fn penalty_steps_with_missing_fields() {
    assert_eq!(completeness_penalty(0), 0.0);
    assert_eq!(completeness_penalty(3), 0.0);
    assert_eq!(completeness_penalty(4), 1.0);
    assert_eq!(completeness_penalty(5), 1.0);
    assert_eq!(completeness_penalty(6), 2.0);
    assert_eq!(completeness_penalty(9), 2.0);
}

#[test]
fn distressed_scores_stay_within_bounds() {
    let scores = compute_scores(&distressed_record(), veto_standard());
    for dimension in Dimension::ALL {
        let value = scores.dimension(dimension);
        assert!((0.0..=100.0).contains(&value), "{dimension:?} = {value}");
    }
    assert!((0.0..=100.0).contains(&scores.global));
    assert!(scores.global < 40.0, "global = {}", scores.global);
}

#[test]
fn rural_variant_uses_its_own_thresholds() {
    let record = golden_record();
    let rural = crate::assessment::benchmarks::BenchmarkRepository::standard()
        .lookup("veterinaire", Some("veto_rurale"))
        .expect("rural variant present");

    let standard_scores = compute_scores(&record, veto_standard());
    let rural_scores = compute_scores(&record, rural);
    assert!(rural_scores.financier > standard_scores.financier);
}
