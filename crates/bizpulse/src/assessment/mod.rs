//! Self-assessment pipeline: intake, sector resolution, benchmark-relative
//! scoring, coherence warnings, decision support and what-if simulations.
//!
//! Every stage is a pure function over the normalized [`AuditRecord`];
//! [`AssessmentEngine`] only chains them and reports the first failure.

pub mod benchmarks;
pub mod decision;
pub mod domain;
pub mod intake;
pub mod report;
pub mod router;
pub mod scoring;
pub mod sector;
pub mod simulation;
pub mod warnings;

#[cfg(test)]
mod tests;

pub use benchmarks::{BenchmarkError, BenchmarkRepository, BenchmarkSet, MetricKey};
pub use decision::{compute_decision, DecisionOutput, PriorityLevel, QuantifiedRecommendation};
pub use domain::{AuditRecord, ConfidenceLevel, DataOrigin, Dimension, Scores};
pub use intake::{validate, AuditInput, LegacyAudit, ValidationIssue};
pub use report::{AssessmentReport, ScoreLevel};
pub use router::assessment_router;
pub use scoring::{compute_breakdown, compute_scores, ScoreBreakdown};
pub use sector::{normalize_sector, Sector, SectorResolution};
pub use simulation::{prioritized_scenarios, run_simulation, ScenarioType, SimulationResult};
pub use warnings::{compute_warnings, Warning, WarningSeverity};

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Everything computed for one audit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub record: AuditRecord,
    pub sector: SectorResolution,
    pub benchmark_variant: &'static str,
    pub scores: Scores,
    pub breakdown: ScoreBreakdown,
    pub warnings: Vec<Warning>,
    pub decision: DecisionOutput,
    pub scenarios: Vec<ScenarioType>,
}

/// Error raised while turning an audit input into an [`Assessment`].
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("invalid audit input: {}", describe_issues(.0))]
    Invalid(Vec<ValidationIssue>),
    #[error(transparent)]
    Benchmark(#[from] BenchmarkError),
}

impl AssessmentError {
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            AssessmentError::Invalid(issues) => issues,
            AssessmentError::Benchmark(_) => &[],
        }
    }
}

fn describe_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{} ({})", issue.field, issue.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Stateless pipeline over a benchmark repository.
#[derive(Debug, Clone, Copy)]
pub struct AssessmentEngine {
    benchmarks: &'static BenchmarkRepository,
}

impl Default for AssessmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentEngine {
    pub fn new() -> Self {
        Self::with_repository(BenchmarkRepository::standard())
    }

    pub fn with_repository(benchmarks: &'static BenchmarkRepository) -> Self {
        Self { benchmarks }
    }

    /// Normalize, validate and resolve the sector of an input. The returned
    /// record carries the canonical sector id.
    pub fn prepare(
        &self,
        input: AuditInput,
    ) -> Result<(AuditRecord, SectorResolution), AssessmentError> {
        let mut record = input.into_record();

        let issues = validate(&record);
        if !issues.is_empty() {
            debug!(issues = issues.len(), "audit input rejected");
            return Err(AssessmentError::Invalid(issues));
        }

        let resolution = normalize_sector(Some(&record.sector));
        record.sector = resolution.canonical_sector.to_string();
        if resolution.is_fallback {
            record.variant = None;
        }
        Ok((record, resolution))
    }

    pub fn assess(&self, input: AuditInput) -> Result<Assessment, AssessmentError> {
        let (record, sector) = self.prepare(input)?;
        let benchmarks = self
            .benchmarks
            .for_sector(sector.sector, record.variant.as_deref())?;

        let breakdown = compute_breakdown(&record, benchmarks);
        let scores = breakdown.scores;
        let warnings = compute_warnings(&record);
        let decision = compute_decision(&record, &scores);
        let scenarios = prioritized_scenarios(&scores);

        info!(
            sector = sector.canonical_sector,
            variant = benchmarks.variant,
            global = scores.global,
            priority = decision.priority_level.label(),
            warnings = warnings.len(),
            "assessment completed"
        );

        Ok(Assessment {
            record,
            sector,
            benchmark_variant: benchmarks.variant,
            scores,
            breakdown,
            warnings,
            decision,
            scenarios,
        })
    }

    /// Run one scenario against a normalized input. `Ok(None)` means the
    /// deltas leave the business unchanged.
    pub fn simulate(
        &self,
        input: AuditInput,
        scenario: ScenarioType,
        deltas: &BTreeMap<String, f64>,
    ) -> Result<Option<SimulationResult>, AssessmentError> {
        let (record, _) = self.prepare(input)?;
        Ok(run_simulation(scenario, &record, deltas))
    }
}
