//! Rule-based decision support: prioritized risks, levers and quantified
//! recommendations derived from a record and its scores.

mod policy;
mod quantified;
mod rules;

pub use policy::PriorityLevel;
pub use quantified::{
    ImpactType, QuantifiedRecommendation, QuantifiedRule, MAX_RECOMMENDATIONS, QUANTIFIED_RULES,
};
pub use rules::{RiskCategory, RiskRule, RuleSeverity, TriggeredRisk, RISK_RULES};

use super::domain::{AuditRecord, Scores};
use serde::Serialize;
use tracing::debug;

const TOP_ENTRIES: usize = 3;

/// Decision summary handed to the report layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionOutput {
    pub priority_level: PriorityLevel,
    pub top_risks: Vec<&'static str>,
    pub top_levers: Vec<&'static str>,
    pub quick_wins: Vec<&'static str>,
    pub structural_actions: Vec<&'static str>,
    pub decision_summary: String,
    pub quantified_recommendations: Vec<QuantifiedRecommendation>,
    pub triggered_risks: Vec<TriggeredRisk>,
}

/// Evaluate both rule tables against a record and its scores.
pub fn compute_decision(record: &AuditRecord, scores: &Scores) -> DecisionOutput {
    let triggered = rules::evaluate_risks(record, scores);
    let priority_level = policy::decide_priority(scores, &triggered);

    let top_risks = triggered
        .iter()
        .take(TOP_ENTRIES)
        .map(|risk| risk.risk)
        .collect();
    let top_levers = triggered
        .iter()
        .take(TOP_ENTRIES)
        .map(|risk| risk.lever)
        .collect();
    let quick_wins = triggered
        .iter()
        .filter_map(|risk| risk.quick_win)
        .take(TOP_ENTRIES)
        .collect();
    let structural_actions = triggered
        .iter()
        .filter_map(|risk| risk.structural_action)
        .take(TOP_ENTRIES)
        .collect();

    let decision_summary = policy::summarize(priority_level, scores, triggered.len());
    let quantified_recommendations = quantified::quantify(record, scores);

    debug!(
        priority = priority_level.label(),
        triggered = triggered.len(),
        recommendations = quantified_recommendations.len(),
        "decision computed"
    );

    DecisionOutput {
        priority_level,
        top_risks,
        top_levers,
        quick_wins,
        structural_actions,
        decision_summary,
        quantified_recommendations,
        triggered_risks: triggered,
    }
}
