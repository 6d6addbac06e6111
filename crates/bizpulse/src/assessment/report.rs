use super::decision::DecisionOutput;
use super::domain::{DataOrigin, Dimension};
use super::simulation::ScenarioType;
use super::warnings::Warning;
use super::Assessment;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLevel {
    Excellent,
    Bon,
    ASurveiller,
    Critique,
}

impl ScoreLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            Self::Excellent
        } else if score >= 60.0 {
            Self::Bon
        } else if score >= 40.0 {
            Self::ASurveiller
        } else {
            Self::Critique
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Bon => "Bon",
            Self::ASurveiller => "À surveiller",
            Self::Critique => "Critique",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionView {
    pub dimension: Dimension,
    pub label: &'static str,
    pub score: f64,
    pub level: ScoreLevel,
    pub level_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioView {
    pub scenario: ScenarioType,
    pub label: &'static str,
}

/// Read-only view of an assessment, ready for export.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub business_name: String,
    pub assessed_on: NaiveDate,
    pub sector: &'static str,
    pub sector_label: &'static str,
    pub benchmark_variant: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector_warning: Option<String>,
    pub data_origin: DataOrigin,
    pub data_origin_label: &'static str,
    pub global_score: f64,
    pub global_level: ScoreLevel,
    pub global_level_label: &'static str,
    pub completeness_penalty: f64,
    pub dimensions: Vec<DimensionView>,
    pub warnings: Vec<Warning>,
    pub decision: DecisionOutput,
    pub scenarios: Vec<ScenarioView>,
}

impl AssessmentReport {
    pub fn from_assessment(assessment: &Assessment, assessed_on: NaiveDate) -> Self {
        let scores = assessment.scores;
        let dimensions = Dimension::ALL
            .into_iter()
            .map(|dimension| {
                let score = scores.dimension(dimension);
                let level = ScoreLevel::from_score(score);
                DimensionView {
                    dimension,
                    label: dimension.label(),
                    score,
                    level,
                    level_label: level.label(),
                }
            })
            .collect();
        let global_level = ScoreLevel::from_score(scores.global);

        Self {
            business_name: assessment.record.business_name.clone(),
            assessed_on,
            sector: assessment.sector.canonical_sector,
            sector_label: assessment.sector.label,
            benchmark_variant: assessment.benchmark_variant,
            sector_warning: assessment.sector.warning.clone(),
            data_origin: assessment.record.data_origin,
            data_origin_label: assessment.record.data_origin.label(),
            global_score: scores.global,
            global_level,
            global_level_label: global_level.label(),
            completeness_penalty: assessment.breakdown.completeness_penalty,
            dimensions,
            warnings: assessment.warnings.clone(),
            decision: assessment.decision.clone(),
            scenarios: assessment
                .scenarios
                .iter()
                .map(|scenario| ScenarioView {
                    scenario: *scenario,
                    label: scenario.label(),
                })
                .collect(),
        }
    }

    /// Plain-text rendering for terminals.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let name = if self.business_name.trim().is_empty() {
            "Entreprise sans nom"
        } else {
            self.business_name.as_str()
        };

        let _ = writeln!(out, "Diagnostic {name} ({})", self.assessed_on.format("%d/%m/%Y"));
        let _ = writeln!(
            out,
            "Secteur : {} [{}] | Données : {}",
            self.sector_label, self.benchmark_variant, self.data_origin_label
        );
        if let Some(warning) = &self.sector_warning {
            let _ = writeln!(out, "  ! {warning}");
        }

        let _ = writeln!(
            out,
            "\nScore global : {:.1}/100 ({})",
            self.global_score, self.global_level_label
        );
        if self.completeness_penalty > 0.0 {
            let _ = writeln!(
                out,
                "  pénalité de complétude : -{:.0} points",
                self.completeness_penalty
            );
        }
        for view in &self.dimensions {
            let _ = writeln!(
                out,
                "  - {:<13} {:>5.1} ({})",
                view.label, view.score, view.level_label
            );
        }

        if !self.warnings.is_empty() {
            let _ = writeln!(out, "\nAlertes de cohérence :");
            for warning in &self.warnings {
                let _ = writeln!(
                    out,
                    "  [{}] {} ({})",
                    warning.severity.label(),
                    warning.message,
                    warning.field
                );
            }
        }

        let decision = &self.decision;
        let _ = writeln!(out, "\nPriorité : {}", decision.priority_level.label());
        let _ = writeln!(out, "{}", decision.decision_summary);
        write_section(&mut out, "Risques principaux", &decision.top_risks);
        write_section(&mut out, "Leviers", &decision.top_levers);
        write_section(&mut out, "Actions rapides", &decision.quick_wins);
        write_section(&mut out, "Actions structurelles", &decision.structural_actions);

        if !decision.quantified_recommendations.is_empty() {
            let _ = writeln!(out, "\nGains estimés :");
            for recommendation in &decision.quantified_recommendations {
                let _ = writeln!(
                    out,
                    "  - {} [{}] : {:.0} à {:.0} {} (confiance {})",
                    recommendation.lever,
                    recommendation.impact_type.label(),
                    recommendation.estimated_impact_min,
                    recommendation.estimated_impact_max,
                    recommendation.unit,
                    recommendation.confidence_level.label()
                );
            }
        }

        let scenarios: Vec<&str> = self.scenarios.iter().map(|view| view.label).collect();
        let _ = writeln!(out, "\nSimulations suggérées : {}", scenarios.join(", "));
        out
    }
}

fn write_section(out: &mut String, title: &str, entries: &[&'static str]) {
    if entries.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{title} :");
    for entry in entries {
        let _ = writeln!(out, "  - {entry}");
    }
}
