use bizpulse::assessment::{
    AssessmentEngine, AssessmentError, AssessmentReport, AuditInput, BenchmarkError,
    PriorityLevel, ScenarioType, Sector, WarningSeverity,
};
use chrono::NaiveDate;
use serde_json::json;
use std::collections::BTreeMap;

fn legacy_clinic(sector: &str) -> AuditInput {
    serde_json::from_value(json!({
        "nom_entreprise": "Clinique des Tilleuls",
        "secteur": sector,
        "variante": "veto_standard",
        "ca_annuel": 450000.0,
        "marge_brute": 68.0,
        "charges_rh": 52.0,
        "taux_occupation": 85.0,
        "etp": 4.5,
        "digitalisation": 85.0,
        "fidelisation": 88.0,
        "nb_services": 5
    }))
    .expect("legacy payload parses")
}

fn assessed_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid assessment date")
}

#[test]
fn legacy_veterinary_audit_matches_reference_scores() {
    let assessment = AssessmentEngine::new()
        .assess(legacy_clinic("Veterinaire"))
        .expect("assessment succeeds");

    assert_eq!(assessment.sector.sector, Sector::Veterinaire);
    assert_eq!(assessment.record.sector, "veterinaire");
    assert_eq!(assessment.benchmark_variant, "veto_standard");
    assert_eq!(assessment.scores.financier, 48.9);
    assert_eq!(assessment.scores.operationnel, 71.2);
    assert_eq!(assessment.scores.commercial, 100.0);
    assert_eq!(assessment.scores.strategique, 76.7);
    assert!((assessment.scores.global - 68.25).abs() <= 0.051);
    assert!(assessment.warnings.is_empty());
    assert_eq!(assessment.decision.priority_level, PriorityLevel::Modere);
    assert_eq!(assessment.scenarios[0], ScenarioType::Rentabilite);
}

#[test]
fn informal_sector_name_scores_like_canonical() {
    let engine = AssessmentEngine::new();
    let informal = engine
        .assess(legacy_clinic("véto"))
        .expect("informal sector assesses");
    let canonical = engine
        .assess(legacy_clinic("Veterinaire"))
        .expect("canonical sector assesses");

    assert!(!informal.sector.is_fallback);
    assert_eq!(informal.sector.sector, canonical.sector.sector);
    assert_eq!(informal.scores, canonical.scores);
}

#[test]
fn unknown_sector_falls_back_to_generic_benchmarks() {
    let assessment = AssessmentEngine::new()
        .assess(legacy_clinic("Fabrication de drones"))
        .expect("fallback still assesses");

    assert!(assessment.sector.is_fallback);
    assert_eq!(assessment.sector.sector, Sector::Autre);
    assert_eq!(assessment.record.variant, None);
    assert_eq!(assessment.benchmark_variant, "standard");

    let report = AssessmentReport::from_assessment(&assessment, assessed_on());
    let warning = report.sector_warning.expect("fallback warning reported");
    assert!(warning.contains("Fabrication de drones"));
}

#[test]
fn unknown_variant_is_rejected() {
    let mut input = legacy_clinic("restauration");
    if let AuditInput::Legacy(legacy) = &mut input {
        legacy.variante = Some("food_truck".to_string());
    }

    match AssessmentEngine::new().assess(input) {
        Err(AssessmentError::Benchmark(BenchmarkError::UnknownVariant { sector, variant })) => {
            assert_eq!(sector, "restauration");
            assert_eq!(variant, "food_truck");
        }
        other => panic!("expected unknown variant, got {other:?}"),
    }
}

#[test]
fn out_of_range_inputs_are_rejected_before_scoring() {
    let mut input = legacy_clinic("Veterinaire");
    if let AuditInput::Legacy(legacy) = &mut input {
        legacy.etp = 0.0;
        legacy.digitalisation = 140.0;
    }

    let error = AssessmentEngine::new()
        .assess(input)
        .expect_err("invalid input rejected");
    let fields: Vec<&str> = error.issues().iter().map(|issue| issue.field).collect();
    assert_eq!(fields, vec!["fte", "digitalizationPercent"]);
    assert!(error.to_string().contains("fte"));
}

#[test]
fn short_runway_escalates_to_critical() {
    let mut input = legacy_clinic("Veterinaire");
    if let AuditInput::Legacy(legacy) = &mut input {
        legacy.tresorerie_mois = Some(2.0);
    }

    let assessment = AssessmentEngine::new()
        .assess(input)
        .expect("assessment succeeds");

    assert_eq!(assessment.warnings.len(), 1);
    assert_eq!(assessment.warnings[0].field, "cashRunwayMonths");
    assert_eq!(assessment.warnings[0].severity, WarningSeverity::Critical);
    assert_eq!(assessment.decision.priority_level, PriorityLevel::Critique);
    assert_eq!(assessment.scenarios[0], ScenarioType::Rentabilite);
}

#[test]
fn report_renders_plain_text_summary() {
    let assessment = AssessmentEngine::new()
        .assess(legacy_clinic("Veterinaire"))
        .expect("assessment succeeds");
    let report = AssessmentReport::from_assessment(&assessment, assessed_on());

    assert_eq!(report.global_level_label, "Bon");
    assert_eq!(report.dimensions.len(), 4);

    let text = report.render_text();
    assert!(text.contains("Diagnostic Clinique des Tilleuls (15/03/2026)"));
    assert!(text.contains("Priorité : MODÉRÉ"));
    assert!(text.contains("Optimiser la masse salariale"));
    assert!(text.contains("pénalité de complétude : -2 points"));

    let json = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(json["assessed_on"], json!("2026-03-15"));
}

#[test]
fn engine_simulates_on_normalized_input() {
    let mut deltas = BTreeMap::new();
    deltas.insert("hausse_prix".to_string(), 3.0);
    deltas.insert("baisse_cogs".to_string(), 2.0);

    let result = AssessmentEngine::new()
        .simulate(legacy_clinic("véto"), ScenarioType::Rentabilite, &deltas)
        .expect("input is valid")
        .expect("deltas change the outcome");

    // 13 500 × [0.7, 0.95] + 9 000 × [0.8, 1.0]
    assert_eq!(result.impact_min, 16_650.0);
    assert_eq!(result.impact_max, 21_825.0);
    assert_eq!(result.inputs.len(), 2);
}
