use crate::assessment::benchmarks::{BenchmarkSet, MetricBenchmark, MetricKey};
use crate::assessment::domain::AuditRecord;

/// Highest score a below-critical value can reach.
pub(crate) const BELOW_CRITICAL_CAP: f64 = 49.0;

/// Scoring of values that miss the critical threshold.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Fallback {
    /// `value × factor`.
    Scaled(f64),
    /// `value / critical × 50`.
    Proportional,
    /// `50 − |value − critical| × factor`, for lower-is-better metrics.
    Penalty(f64),
}

/// Four-tier step score against a benchmark: 100, 80, 50, then the fallback.
pub(crate) fn step_score(value: f64, benchmark: &MetricBenchmark, fallback: Fallback) -> f64 {
    let t = benchmark.thresholds;
    let tier = if benchmark.unit.lower_is_better() {
        if value <= t.excellent {
            Some(100.0)
        } else if value <= t.good {
            Some(80.0)
        } else if value <= t.critical {
            Some(50.0)
        } else {
            None
        }
    } else if value >= t.excellent {
        Some(100.0)
    } else if value >= t.good {
        Some(80.0)
    } else if value >= t.critical {
        Some(50.0)
    } else {
        None
    };

    tier.unwrap_or_else(|| below_critical(value, t.critical, fallback))
}

fn below_critical(value: f64, critical: f64, fallback: Fallback) -> f64 {
    let raw = match fallback {
        Fallback::Scaled(factor) => value * factor,
        Fallback::Proportional if critical > 0.0 => value / critical * 50.0,
        Fallback::Proportional => 0.0,
        Fallback::Penalty(factor) => 50.0 - (value - critical).abs() * factor,
    };
    raw.clamp(0.0, BELOW_CRITICAL_CAP)
}

/// Walk `(threshold, score)` tiers from best to worst, returning the first
/// tier whose threshold the value reaches.
fn tier_at_least(value: f64, tiers: &[(f64, f64)]) -> Option<f64> {
    tiers
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(_, score)| *score)
}

fn tier_at_most(value: f64, tiers: &[(f64, f64)]) -> Option<f64> {
    tiers
        .iter()
        .find(|(limit, _)| value <= *limit)
        .map(|(_, score)| *score)
}

pub(crate) fn gross_margin_score(record: &AuditRecord, set: &BenchmarkSet) -> f64 {
    step_score(
        record.finance.gross_margin_percent / 100.0,
        set.metric(MetricKey::MargeBrute),
        Fallback::Scaled(90.0),
    )
}

pub(crate) fn net_margin_score(record: &AuditRecord, set: &BenchmarkSet) -> Option<f64> {
    record.net_margin().map(|net| {
        step_score(
            net / 100.0,
            set.metric(MetricKey::MargeNette),
            Fallback::Proportional,
        )
    })
}

pub(crate) fn revenue_per_fte_score(record: &AuditRecord, set: &BenchmarkSet) -> f64 {
    step_score(
        record.revenue_per_fte(),
        set.metric(MetricKey::CaParEtp),
        Fallback::Proportional,
    )
}

pub(crate) fn hr_cost_score(record: &AuditRecord, set: &BenchmarkSet) -> f64 {
    step_score(
        record.costs.hr_costs_percent / 100.0,
        set.metric(MetricKey::RatioRh),
        Fallback::Penalty(250.0),
    )
}

pub(crate) fn digitalization_score(record: &AuditRecord, set: &BenchmarkSet) -> f64 {
    step_score(
        record.commercial.digitalization_percent,
        set.metric(MetricKey::Digitalisation),
        Fallback::Scaled(1.5),
    )
}

pub(crate) fn loyalty_score(record: &AuditRecord, set: &BenchmarkSet) -> Option<f64> {
    record.loyalty().map(|loyalty| {
        step_score(
            loyalty,
            set.metric(MetricKey::Fidelisation),
            Fallback::Scaled(1.5),
        )
    })
}

pub(crate) fn csat_score(record: &AuditRecord, set: &BenchmarkSet) -> Option<f64> {
    record.csat().map(|csat| {
        step_score(
            csat,
            set.metric(MetricKey::SatisfactionClient),
            Fallback::Scaled(1.5),
        )
    })
}

pub(crate) fn cash_runway_score(months: f64) -> f64 {
    tier_at_least(months, &[(12.0, 100.0), (6.0, 80.0), (3.0, 50.0)]).unwrap_or(20.0)
}

pub(crate) fn occupancy_score(occupancy_percent: f64) -> f64 {
    let rate = occupancy_percent / 100.0;
    tier_at_least(
        rate,
        &[(0.95, 100.0), (0.85, 80.0), (0.75, 60.0), (0.60, 40.0)],
    )
    .unwrap_or_else(|| (rate * 66.0).max(0.0))
}

pub(crate) fn return_rate_score(percent: f64) -> f64 {
    tier_at_most(percent, &[(2.0, 100.0), (5.0, 80.0), (10.0, 50.0)])
        .unwrap_or_else(|| (50.0 - (percent - 10.0) * 5.0).max(0.0))
}

pub(crate) fn incidents_score(per_month: f64) -> f64 {
    tier_at_most(per_month, &[(1.0, 100.0), (3.0, 80.0), (6.0, 50.0)])
        .unwrap_or_else(|| (50.0 - (per_month - 6.0) * 5.0).max(0.0))
}

pub(crate) fn nps_score(nps: f64) -> f64 {
    tier_at_least(
        nps,
        &[
            (50.0, 100.0),
            (30.0, 80.0),
            (10.0, 65.0),
            (0.0, 50.0),
            (-20.0, 35.0),
        ],
    )
    .unwrap_or(20.0)
}

pub(crate) fn services_score(nb_services: Option<u32>) -> f64 {
    let count = f64::from(nb_services.unwrap_or(1));
    (40.0 + count * 10.0).clamp(0.0, 100.0)
}

pub(crate) fn runway_risk_score(months: f64) -> f64 {
    tier_at_least(months, &[(12.0, 100.0), (6.0, 70.0), (3.0, 40.0)]).unwrap_or(10.0)
}

pub(crate) fn turnover_risk_score(percent: f64) -> f64 {
    tier_at_most(percent, &[(10.0, 100.0), (20.0, 75.0), (35.0, 45.0)]).unwrap_or(20.0)
}

pub(crate) fn absenteeism_risk_score(percent: f64) -> f64 {
    tier_at_most(percent, &[(4.0, 100.0), (8.0, 75.0), (15.0, 45.0)]).unwrap_or(20.0)
}

pub(crate) fn imbalance_score(gap: f64) -> f64 {
    if gap > 40.0 {
        50.0
    } else if gap > 30.0 {
        70.0
    } else if gap > 20.0 {
        85.0
    } else {
        100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::benchmarks::{MetricUnit, Thresholds};

    fn normal() -> MetricBenchmark {
        MetricBenchmark {
            unit: MetricUnit::Ratio,
            thresholds: Thresholds {
                critical: 0.55,
                good: 0.70,
                excellent: 0.75,
            },
        }
    }

    fn inverse() -> MetricBenchmark {
        MetricBenchmark {
            unit: MetricUnit::InverseRatio,
            thresholds: Thresholds {
                critical: 0.50,
                good: 0.42,
                excellent: 0.38,
            },
        }
    }

    #[test]
    fn step_tiers_for_normal_metrics() {
        let benchmark = normal();
        assert_eq!(step_score(0.80, &benchmark, Fallback::Scaled(90.0)), 100.0);
        assert_eq!(step_score(0.75, &benchmark, Fallback::Scaled(90.0)), 100.0);
        assert_eq!(step_score(0.70, &benchmark, Fallback::Scaled(90.0)), 80.0);
        assert_eq!(step_score(0.68, &benchmark, Fallback::Scaled(90.0)), 50.0);
        assert!((step_score(0.50, &benchmark, Fallback::Scaled(90.0)) - 45.0).abs() < 1e-9);
    }

    #[test]
    fn step_tiers_flip_for_inverse_metrics() {
        let benchmark = inverse();
        assert_eq!(step_score(0.30, &benchmark, Fallback::Penalty(250.0)), 100.0);
        assert_eq!(step_score(0.40, &benchmark, Fallback::Penalty(250.0)), 80.0);
        assert_eq!(step_score(0.50, &benchmark, Fallback::Penalty(250.0)), 50.0);
        assert!((step_score(0.52, &benchmark, Fallback::Penalty(250.0)) - 45.0).abs() < 1e-9);
        assert_eq!(step_score(0.90, &benchmark, Fallback::Penalty(250.0)), 0.0);
    }

    #[test]
    fn below_critical_never_reaches_the_critical_tier() {
        let benchmark = MetricBenchmark {
            unit: MetricUnit::Percentage,
            thresholds: Thresholds {
                critical: 60.0,
                good: 75.0,
                excellent: 85.0,
            },
        };
        assert_eq!(step_score(59.0, &benchmark, Fallback::Scaled(1.5)), BELOW_CRITICAL_CAP);
        assert_eq!(step_score(20.0, &benchmark, Fallback::Scaled(1.5)), 30.0);
    }

    #[test]
    fn proportional_fallback_handles_zero_critical() {
        let benchmark = MetricBenchmark {
            unit: MetricUnit::Amount,
            thresholds: Thresholds {
                critical: 0.0,
                good: 1.0,
                excellent: 2.0,
            },
        };
        assert_eq!(step_score(-5.0, &benchmark, Fallback::Proportional), 0.0);
    }

    #[test]
    fn occupancy_tiers_and_linear_tail() {
        assert_eq!(occupancy_score(97.0), 100.0);
        assert_eq!(occupancy_score(85.0), 80.0);
        assert_eq!(occupancy_score(75.0), 60.0);
        assert_eq!(occupancy_score(60.0), 40.0);
        assert!((occupancy_score(50.0) - 33.0).abs() < 1e-9);
        assert_eq!(occupancy_score(-10.0), 0.0);
    }

    #[test]
    fn fixed_tiers() {
        assert_eq!(cash_runway_score(12.0), 100.0);
        assert_eq!(cash_runway_score(2.0), 20.0);
        assert_eq!(runway_risk_score(4.0), 40.0);
        assert_eq!(runway_risk_score(1.0), 10.0);
        assert_eq!(nps_score(50.0), 100.0);
        assert_eq!(nps_score(-20.0), 35.0);
        assert_eq!(nps_score(-21.0), 20.0);
        assert_eq!(services_score(Some(5)), 90.0);
        assert_eq!(services_score(Some(12)), 100.0);
        assert_eq!(services_score(None), 50.0);
        assert_eq!(return_rate_score(12.0), 40.0);
        assert_eq!(incidents_score(20.0), 0.0);
        assert_eq!(turnover_risk_score(40.0), 20.0);
        assert_eq!(absenteeism_risk_score(6.0), 75.0);
    }

    #[test]
    fn imbalance_penalty_keys_on_gap() {
        assert_eq!(imbalance_score(51.1), 50.0);
        assert_eq!(imbalance_score(35.0), 70.0);
        assert_eq!(imbalance_score(25.0), 85.0);
        assert_eq!(imbalance_score(20.0), 100.0);
    }
}
