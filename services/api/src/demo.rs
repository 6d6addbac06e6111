use crate::infra::{collect_deltas, parse_date, parse_delta};
use bizpulse::assessment::{
    AssessmentEngine, AssessmentReport, AuditInput, LegacyAudit, ScenarioType, SimulationResult,
};
use bizpulse::error::AppError;
use bizpulse::import;
use chrono::{Local, NaiveDate};
use clap::Args;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::info;

/// Lever move applied to every key of the suggested scenario in the demo.
const DEMO_DELTA: f64 = 5.0;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Audit file: JSON (structured or legacy keys) or a field/value CSV export
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    /// Assessment date printed on the report (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct SimulateArgs {
    /// Audit file: JSON (structured or legacy keys) or a field/value CSV export
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Scenario to run (TRESORERIE, RENTABILITE, ACTIVITE, COMMERCIAL, RH)
    #[arg(long)]
    pub(crate) scenario: ScenarioType,
    /// Lever move as key=value, repeatable (e.g. --delta hausse_prix=3)
    #[arg(long = "delta", value_parser = parse_delta)]
    pub(crate) deltas: Vec<(String, f64)>,
    /// Print the result as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Assessment date printed on the report (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Skip the simulation that follows the report
    #[arg(long)]
    pub(crate) skip_simulation: bool,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs { input, json, date } = args;

    let audit = import::from_path(&input)?;
    let assessment = AssessmentEngine::new().assess(audit)?;
    let report =
        AssessmentReport::from_assessment(&assessment, date.unwrap_or_else(today));

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

pub(crate) fn run_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let SimulateArgs {
        input,
        scenario,
        deltas,
        json,
    } = args;

    let deltas = collect_deltas(scenario, deltas)?;
    let audit = import::from_path(&input)?;
    let result = AssessmentEngine::new().simulate(audit, scenario, &deltas)?;

    match (result, json) {
        (Some(result), true) => println!("{}", serde_json::to_string_pretty(&result)?),
        (Some(result), false) => print!("{}", render_simulation(&result)),
        (None, _) => println!("Aucun impact : les variations saisies ne modifient pas l'activité."),
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        date,
        skip_simulation,
    } = args;

    let engine = AssessmentEngine::new();
    let assessment = engine.assess(sample_audit())?;
    let report =
        AssessmentReport::from_assessment(&assessment, date.unwrap_or_else(today));
    print!("{}", report.render_text());

    if skip_simulation {
        return Ok(());
    }

    let Some(&scenario) = assessment.scenarios.first() else {
        return Ok(());
    };
    let deltas: BTreeMap<String, f64> = scenario
        .delta_keys()
        .into_iter()
        .map(|key| (key.to_string(), DEMO_DELTA))
        .collect();
    info!(scenario = scenario.id(), "running demo simulation");

    println!("\nSimulation {} (+{DEMO_DELTA} sur chaque levier)", scenario.label());
    match engine.simulate(sample_audit(), scenario, &deltas)? {
        Some(result) => print!("{}", render_simulation(&result)),
        None => println!("Aucun impact estimé."),
    }
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn render_simulation(result: &SimulationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} : {:.0} € à {:.0} € (confiance {}, complétude {:.0} %)",
        result.impact_label,
        result.impact_min,
        result.impact_max,
        result.confidence_level.label(),
        result.completeness * 100.0
    );
    for (key, value) in &result.inputs {
        let _ = writeln!(out, "  {key} = {value}");
    }
    for effect in &result.secondary_effects {
        let _ = writeln!(out, "  > {effect}");
    }
    for hypothesis in &result.hypotheses {
        let _ = writeln!(out, "  * {hypothesis}");
    }
    out
}

/// Traditional restaurant with thin margins and a short cash runway.
fn sample_audit() -> AuditInput {
    AuditInput::Legacy(LegacyAudit {
        nom_entreprise: "Bistrot du Marché".to_string(),
        secteur: "restaurant".to_string(),
        variante: None,
        origine: None,
        ca_annuel: 380_000.0,
        marge_brute: 66.0,
        marge_nette: Some(3.5),
        tresorerie_mois: Some(2.5),
        charges_rh: 41.0,
        achats: Some(32.0),
        charges_fixes: Some(19.0),
        taux_occupation: 71.0,
        etp: 6.0,
        taux_retour: None,
        incidents_mois: Some(3.0),
        absenteisme: Some(6.0),
        turnover: Some(28.0),
        digitalisation: 35.0,
        fidelisation: 58.0,
        csat: Some(82.0),
        nps: Some(21.0),
        nb_services: Some(3),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizpulse::assessment::Sector;

    #[test]
    fn sample_audit_is_accepted_by_the_engine() {
        let assessment = AssessmentEngine::new()
            .assess(sample_audit())
            .expect("sample assesses");
        assert_eq!(assessment.sector.sector, Sector::Restauration);
        assert!(!assessment.sector.is_fallback);
        assert_eq!(assessment.scenarios.len(), ScenarioType::ALL.len());
    }

    #[test]
    fn simulation_text_lists_inputs_and_hypotheses() {
        let mut deltas = BTreeMap::new();
        deltas.insert("hausse_prix".to_string(), 2.0);
        let result = AssessmentEngine::new()
            .simulate(sample_audit(), ScenarioType::Rentabilite, &deltas)
            .expect("sample is valid")
            .expect("price rise has an impact");

        let text = render_simulation(&result);
        assert!(text.starts_with("Marge supplémentaire annuelle"));
        assert!(text.contains("hausse_prix = 2"));
        assert!(text.contains("  * "));
    }
}
