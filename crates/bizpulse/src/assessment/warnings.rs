//! Coherence checks over a normalized record. Advisory only: nothing here
//! feeds back into scoring.

use super::domain::AuditRecord;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    Warning,
    Critical,
}

impl WarningSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Warning => "Attention",
            Self::Critical => "Critique",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
    pub severity: WarningSeverity,
    pub message: String,
    pub field: &'static str,
}

impl Warning {
    fn warning(field: &'static str, message: String) -> Self {
        Self {
            severity: WarningSeverity::Warning,
            message,
            field,
        }
    }

    fn critical(field: &'static str, message: String) -> Self {
        Self {
            severity: WarningSeverity::Critical,
            message,
            field,
        }
    }
}

const MARGIN_COGS_TOLERANCE: f64 = 8.0;
const COST_STACK_LIMIT: f64 = 115.0;
const MIN_REVENUE_PER_FTE: f64 = 30_000.0;

type Check = fn(&AuditRecord) -> Option<Warning>;

const CHECKS: &[Check] = &[
    margin_and_cogs_mismatch,
    net_above_gross_margin,
    negative_net_margin,
    cost_stack_overflow,
    saturated_occupancy,
    high_absenteeism,
    high_turnover,
    high_return_rate,
    short_cash_runway,
    negative_nps,
    low_csat,
    implausible_productivity,
];

/// Run every coherence check in a fixed order.
pub fn compute_warnings(record: &AuditRecord) -> Vec<Warning> {
    CHECKS.iter().filter_map(|check| check(record)).collect()
}

fn margin_and_cogs_mismatch(record: &AuditRecord) -> Option<Warning> {
    let cogs = record.cogs()?;
    let gross = record.finance.gross_margin_percent;
    let total = gross + cogs;
    ((total - 100.0).abs() > MARGIN_COGS_TOLERANCE).then(|| {
        Warning::warning(
            "cogsPercent",
            format!(
                "Marge brute ({gross:.1} %) et achats ({cogs:.1} %) totalisent {total:.1} % au lieu d'environ 100 %"
            ),
        )
    })
}

fn net_above_gross_margin(record: &AuditRecord) -> Option<Warning> {
    let net = record.net_margin()?;
    let gross = record.finance.gross_margin_percent;
    (net > gross).then(|| {
        Warning::warning(
            "netMarginPercent",
            format!("Marge nette ({net:.1} %) supérieure à la marge brute ({gross:.1} %) : données incohérentes"),
        )
    })
}

fn negative_net_margin(record: &AuditRecord) -> Option<Warning> {
    let net = record.net_margin()?;
    (net < 0.0).then(|| {
        Warning::warning(
            "netMarginPercent",
            format!("Marge nette négative ({net:.1} %) : l'activité est déficitaire"),
        )
    })
}

fn cost_stack_overflow(record: &AuditRecord) -> Option<Warning> {
    let total = record.costs.hr_costs_percent
        + record.cogs().unwrap_or(0.0)
        + record.fixed_costs().unwrap_or(0.0);
    (total > COST_STACK_LIMIT).then(|| {
        Warning::warning(
            "hrCostsPercent",
            format!("Charges RH, achats et charges fixes cumulent {total:.1} % du chiffre d'affaires"),
        )
    })
}

fn saturated_occupancy(record: &AuditRecord) -> Option<Warning> {
    let occupancy = record.ops.occupancy_rate_percent;
    (occupancy > 95.0).then(|| {
        Warning::warning(
            "occupancyRatePercent",
            format!("Taux d'occupation de {occupancy:.1} % : risque de saturation des capacités"),
        )
    })
}

fn high_absenteeism(record: &AuditRecord) -> Option<Warning> {
    let rate = record.absenteeism()?;
    (rate > 15.0).then(|| {
        Warning::critical(
            "absenteeismRatePercent",
            format!("Absentéisme de {rate:.1} % : niveau critique"),
        )
    })
}

fn high_turnover(record: &AuditRecord) -> Option<Warning> {
    let rate = record.turnover()?;
    (rate > 40.0).then(|| {
        Warning::critical(
            "turnoverRatePercent",
            format!("Turnover de {rate:.1} % : perte de compétences critique"),
        )
    })
}

fn high_return_rate(record: &AuditRecord) -> Option<Warning> {
    let rate = record.return_rate()?;
    (rate > 10.0).then(|| {
        Warning::warning(
            "returnRatePercent",
            format!("Taux de retour de {rate:.1} % : qualité de service à surveiller"),
        )
    })
}

fn short_cash_runway(record: &AuditRecord) -> Option<Warning> {
    let months = record.cash_runway()?;
    (months < 3.0).then(|| {
        Warning::critical(
            "cashRunwayMonths",
            format!("Trésorerie de {months:.1} mois : moins de 3 mois de visibilité"),
        )
    })
}

fn negative_nps(record: &AuditRecord) -> Option<Warning> {
    let nps = record.nps()?;
    (nps < 0.0).then(|| {
        Warning::warning(
            "nps",
            format!("NPS négatif ({nps:.0}) : plus de détracteurs que de promoteurs"),
        )
    })
}

fn low_csat(record: &AuditRecord) -> Option<Warning> {
    let csat = record.csat()?;
    (csat < 70.0).then(|| {
        Warning::warning(
            "csatPercent",
            format!("Satisfaction client de {csat:.1} % : sous le seuil de 70 %"),
        )
    })
}

fn implausible_productivity(record: &AuditRecord) -> Option<Warning> {
    let per_fte = record.revenue_per_fte();
    (per_fte < MIN_REVENUE_PER_FTE).then(|| {
        Warning::warning(
            "fte",
            format!("Chiffre d'affaires par ETP de {per_fte:.0} € : effectif ou chiffre d'affaires à vérifier"),
        )
    })
}
