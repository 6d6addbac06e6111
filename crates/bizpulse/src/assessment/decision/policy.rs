use super::rules::{RuleSeverity, TriggeredRisk};
use crate::assessment::domain::Scores;
use serde::Serialize;

/// Overall urgency of the action plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PriorityLevel {
    #[serde(rename = "CRITIQUE")]
    Critique,
    #[serde(rename = "ÉLEVÉ")]
    Eleve,
    #[serde(rename = "MODÉRÉ")]
    Modere,
    #[serde(rename = "FAIBLE")]
    Faible,
}

impl PriorityLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critique => "CRITIQUE",
            Self::Eleve => "ÉLEVÉ",
            Self::Modere => "MODÉRÉ",
            Self::Faible => "FAIBLE",
        }
    }
}

/// First matching condition wins.
pub(crate) fn decide_priority(scores: &Scores, triggered: &[TriggeredRisk]) -> PriorityLevel {
    let high_count = triggered
        .iter()
        .filter(|risk| risk.severity == RuleSeverity::High)
        .count();

    if scores.global < 40.0 {
        return PriorityLevel::Critique;
    }

    if triggered
        .iter()
        .any(|risk| risk.severity == RuleSeverity::Critical)
    {
        return PriorityLevel::Critique;
    }

    if scores.global < 50.0 || high_count >= 2 {
        return PriorityLevel::Eleve;
    }

    if scores.global < 60.0 || high_count >= 1 {
        return PriorityLevel::Modere;
    }

    PriorityLevel::Faible
}

pub(crate) fn summarize(priority: PriorityLevel, scores: &Scores, risk_count: usize) -> String {
    match priority {
        PriorityLevel::Critique => format!(
            "Situation critique : {risk_count} risque(s) majeur(s) exigent une action immédiate."
        ),
        PriorityLevel::Eleve => format!(
            "Vigilance élevée : score global de {:.1}/100 et {risk_count} risque(s) à traiter en priorité.",
            scores.global
        ),
        PriorityLevel::Modere => format!(
            "Situation globalement maîtrisée : {risk_count} point(s) d'amélioration à planifier."
        ),
        PriorityLevel::Faible => format!(
            "Situation saine : {risk_count} axe(s) d'optimisation pour consolider la performance."
        ),
    }
}
