//! Deterministic what-if scenarios applied to a normalized record.

mod scenarios;

use super::domain::{round1, AuditRecord, ConfidenceLevel, Scores};
use super::sector::normalize_text;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

const GENERIC_HYPOTHESIS: &str =
    "Estimation annuelle à périmètre constant, hors effets de saisonnalité";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScenarioType {
    Tresorerie,
    Rentabilite,
    Activite,
    Commercial,
    Rh,
}

impl ScenarioType {
    pub const ALL: [ScenarioType; 5] = [
        ScenarioType::Tresorerie,
        ScenarioType::Rentabilite,
        ScenarioType::Activite,
        ScenarioType::Commercial,
        ScenarioType::Rh,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Tresorerie => "TRESORERIE",
            Self::Rentabilite => "RENTABILITE",
            Self::Activite => "ACTIVITE",
            Self::Commercial => "COMMERCIAL",
            Self::Rh => "RH",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tresorerie => "Trésorerie",
            Self::Rentabilite => "Rentabilité",
            Self::Activite => "Activité",
            Self::Commercial => "Commercial",
            Self::Rh => "Ressources humaines",
        }
    }

    /// Delta keys understood by this scenario, in evaluation order.
    pub fn delta_keys(self) -> Vec<&'static str> {
        scenarios::model_for(self)
            .levers
            .iter()
            .map(|lever| lever.key)
            .collect()
    }
}

impl fmt::Display for ScenarioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown simulation scenario `{0}`")]
pub struct UnknownScenario(pub String);

impl FromStr for ScenarioType {
    type Err = UnknownScenario;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_text(raw);
        ScenarioType::ALL
            .into_iter()
            .find(|scenario| {
                normalized == scenario.id().to_ascii_lowercase()
                    || normalized == normalize_text(scenario.label())
            })
            .ok_or_else(|| UnknownScenario(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub scenario: ScenarioType,
    /// Recognised deltas, as applied.
    pub inputs: BTreeMap<String, f64>,
    pub impact_min: f64,
    pub impact_max: f64,
    pub impact_label: &'static str,
    pub secondary_effects: Vec<String>,
    pub hypotheses: Vec<String>,
    pub confidence_level: ConfidenceLevel,
    /// Share of the scenario's optional inputs that were provided.
    pub completeness: f64,
}

/// Run one scenario. Returns `None` when nothing would change.
pub fn run_simulation(
    scenario: ScenarioType,
    record: &AuditRecord,
    deltas: &BTreeMap<String, f64>,
) -> Option<SimulationResult> {
    let revenue = record.finance.annual_revenue;
    if !revenue.is_finite() || revenue <= 0.0 {
        return None;
    }

    let model = scenarios::model_for(scenario);
    let mut inputs = BTreeMap::new();
    let mut hypotheses = Vec::new();
    let (mut impact_min, mut impact_max) = (0.0_f64, 0.0_f64);

    for lever in model.levers {
        let Some(&delta) = deltas.get(lever.key) else {
            continue;
        };
        if !delta.is_finite() {
            continue;
        }
        inputs.insert(lever.key.to_string(), delta);
        if delta == 0.0 {
            continue;
        }
        let (a, b) = (lever.impact)(record, delta);
        impact_min += a.min(b);
        impact_max += a.max(b);
        hypotheses.push(lever.hypothesis.to_string());
    }

    if hypotheses.is_empty() {
        return None;
    }
    hypotheses.push(GENERIC_HYPOTHESIS.to_string());

    let impact_min = impact_min.round();
    let impact_max = impact_max.round();
    let checklist = (model.checklist)(record);
    let completeness = checklist.iter().filter(|present| **present).count() as f64
        / checklist.len().max(1) as f64;
    let confidence_level = confidence_for(completeness).min(model.confidence_cap);

    debug!(
        scenario = scenario.id(),
        impact_min,
        impact_max,
        confidence = confidence_level.label(),
        "simulation computed"
    );

    Some(SimulationResult {
        scenario: model.scenario,
        inputs,
        impact_min,
        impact_max,
        impact_label: model.impact_label,
        secondary_effects: (model.secondary_effects)(record, impact_min, impact_max),
        hypotheses,
        confidence_level,
        completeness: round1(completeness * 100.0) / 100.0,
    })
}

fn confidence_for(completeness: f64) -> ConfidenceLevel {
    if completeness >= 0.9 {
        ConfidenceLevel::Bon
    } else if completeness >= 0.7 {
        ConfidenceLevel::Moyen
    } else {
        ConfidenceLevel::Faible
    }
}

/// Scenarios worth exploring for these scores first, followed by the rest.
pub fn prioritized_scenarios(scores: &Scores) -> Vec<ScenarioType> {
    let fired = [
        (scores.global < 60.0, ScenarioType::Tresorerie),
        (
            scores.financier > 75.0 || scores.financier < 50.0,
            ScenarioType::Rentabilite,
        ),
        (scores.operationnel < 60.0, ScenarioType::Activite),
        (scores.commercial < 60.0, ScenarioType::Commercial),
        (scores.strategique < 60.0, ScenarioType::Rh),
    ];

    let mut ordered: Vec<ScenarioType> = fired
        .iter()
        .filter(|(condition, _)| *condition)
        .map(|(_, scenario)| *scenario)
        .collect();
    for scenario in ScenarioType::ALL {
        if !ordered.contains(&scenario) {
            ordered.push(scenario);
        }
    }
    ordered
}
