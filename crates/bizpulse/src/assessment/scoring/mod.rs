//! Four-dimension scoring with weight redistribution over absent inputs.

mod contribution;
pub(crate) mod metrics;

pub use contribution::{Contribution, Contributions};

use super::benchmarks::BenchmarkSet;
use super::domain::{dimension_gap, round1, AuditRecord, Dimension, Scores};
use contribution::mean_of_present;
use serde::Serialize;
use tracing::debug;

/// Number of optional inputs tracked for the completeness penalty.
pub const TRACKED_OPTIONAL_FIELDS: usize = 9;

/// Per-dimension contributions behind a [`Scores`] value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionBreakdown {
    pub dimension: Dimension,
    pub score: f64,
    pub contributions: Contributions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub scores: Scores,
    pub dimensions: Vec<DimensionBreakdown>,
    pub missing_optional_fields: usize,
    pub completeness_penalty: f64,
}

/// Compute the dimension and global scores for a normalized record.
pub fn compute_scores(record: &AuditRecord, benchmarks: &BenchmarkSet) -> Scores {
    compute_breakdown(record, benchmarks).scores
}

/// Same as [`compute_scores`], keeping every contribution for audit trails.
pub fn compute_breakdown(record: &AuditRecord, benchmarks: &BenchmarkSet) -> ScoreBreakdown {
    let revenue_per_fte = metrics::revenue_per_fte_score(record, benchmarks);

    let financier = financier_contributions(record, benchmarks, revenue_per_fte);
    let operationnel = operationnel_contributions(record, revenue_per_fte);
    let commercial = commercial_contributions(record, benchmarks);

    let financier_score = round1(financier.weighted_average());
    let operationnel_score = round1(operationnel.weighted_average());
    let commercial_score = round1(commercial.weighted_average());

    let gap = dimension_gap(financier_score, operationnel_score, commercial_score);
    let strategique = strategique_contributions(record, gap);
    let strategique_score = round1(strategique.weighted_average());

    let missing_optional_fields = record.missing_optional_count();
    let completeness_penalty = completeness_penalty(missing_optional_fields);

    let weighted = financier_score * Dimension::Financier.global_weight()
        + operationnel_score * Dimension::Operationnel.global_weight()
        + commercial_score * Dimension::Commercial.global_weight()
        + strategique_score * Dimension::Strategique.global_weight();
    let global = round1((weighted - completeness_penalty).clamp(0.0, 100.0));

    let scores = Scores {
        global,
        financier: financier_score,
        operationnel: operationnel_score,
        commercial: commercial_score,
        strategique: strategique_score,
    };

    debug!(
        global,
        financier = financier_score,
        operationnel = operationnel_score,
        commercial = commercial_score,
        strategique = strategique_score,
        missing_optional_fields,
        "scores computed"
    );

    ScoreBreakdown {
        scores,
        dimensions: vec![
            DimensionBreakdown {
                dimension: Dimension::Financier,
                score: financier_score,
                contributions: financier,
            },
            DimensionBreakdown {
                dimension: Dimension::Operationnel,
                score: operationnel_score,
                contributions: operationnel,
            },
            DimensionBreakdown {
                dimension: Dimension::Commercial,
                score: commercial_score,
                contributions: commercial,
            },
            DimensionBreakdown {
                dimension: Dimension::Strategique,
                score: strategique_score,
                contributions: strategique,
            },
        ],
        missing_optional_fields,
        completeness_penalty,
    }
}

/// Global-score deduction for sparse input.
pub fn completeness_penalty(missing_optional_fields: usize) -> f64 {
    if missing_optional_fields > 5 {
        2.0
    } else if missing_optional_fields > 3 {
        1.0
    } else {
        0.0
    }
}

fn financier_contributions(
    record: &AuditRecord,
    benchmarks: &BenchmarkSet,
    revenue_per_fte: f64,
) -> Contributions {
    let mut contributions = Contributions::new();
    contributions
        .push(
            "marge_brute",
            metrics::gross_margin_score(record, benchmarks),
            40.0,
        )
        .push("ca_par_etp", revenue_per_fte, 30.0)
        .push("ratio_rh", metrics::hr_cost_score(record, benchmarks), 20.0)
        .push_optional(
            "marge_nette",
            metrics::net_margin_score(record, benchmarks),
            5.0,
        )
        .push_optional(
            "tresorerie",
            record.cash_runway().map(metrics::cash_runway_score),
            5.0,
        );
    contributions
}

fn operationnel_contributions(record: &AuditRecord, revenue_per_fte: f64) -> Contributions {
    let quality = mean_of_present(&[
        record.return_rate().map(metrics::return_rate_score),
        record.incidents_per_month().map(metrics::incidents_score),
    ]);

    let mut contributions = Contributions::new();
    contributions
        .push(
            "taux_occupation",
            metrics::occupancy_score(record.ops.occupancy_rate_percent),
            60.0,
        )
        .push("ca_par_etp", revenue_per_fte, 25.0)
        .push_optional("qualite", quality, 15.0);
    contributions
}

fn commercial_contributions(record: &AuditRecord, benchmarks: &BenchmarkSet) -> Contributions {
    let mut contributions = Contributions::new();
    contributions
        .push(
            "digitalisation",
            metrics::digitalization_score(record, benchmarks),
            45.0,
        )
        .push_optional(
            "fidelisation",
            metrics::loyalty_score(record, benchmarks),
            35.0,
        )
        .push_optional("csat", metrics::csat_score(record, benchmarks), 10.0)
        .push_optional("nps", record.nps().map(metrics::nps_score), 10.0);
    contributions
}

fn strategique_contributions(record: &AuditRecord, gap: f64) -> Contributions {
    let hr_stability = mean_of_present(&[
        record.turnover().map(metrics::turnover_risk_score),
        record.absenteeism().map(metrics::absenteeism_risk_score),
    ]);

    let mut contributions = Contributions::new();
    contributions
        .push(
            "offre_services",
            metrics::services_score(record.nb_services),
            40.0,
        )
        .push_optional(
            "risque_tresorerie",
            record.cash_runway().map(metrics::runway_risk_score),
            20.0,
        )
        .push_optional("stabilite_rh", hr_stability, 20.0)
        .push("equilibre", metrics::imbalance_score(gap), 20.0);
    contributions
}
