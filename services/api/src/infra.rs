use bizpulse::assessment::ScenarioType;
use bizpulse::error::AppError;
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Parse a `key=value` delta; the value accepts a decimal comma.
pub(crate) fn parse_delta(raw: &str) -> Result<(String, f64), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing delta name in '{raw}'"));
    }
    let value = value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| format!("'{}' is not a number", value.trim()))?;
    Ok((key.to_string(), value))
}

/// Check deltas against the scenario's levers before running it.
pub(crate) fn collect_deltas(
    scenario: ScenarioType,
    deltas: Vec<(String, f64)>,
) -> Result<BTreeMap<String, f64>, AppError> {
    let known = scenario.delta_keys();
    let mut collected = BTreeMap::new();
    for (key, value) in deltas {
        if !known.contains(&key.as_str()) {
            return Err(AppError::Usage(format!(
                "scenario {scenario} has no lever '{key}' (expected one of: {})",
                known.join(", ")
            )));
        }
        if collected.insert(key.clone(), value).is_some() {
            return Err(AppError::Usage(format!("delta '{key}' given twice")));
        }
    }
    if collected.is_empty() {
        return Err(AppError::Usage(format!(
            "at least one --delta is required for {scenario} ({})",
            known.join(", ")
        )));
    }
    Ok(collected)
}
