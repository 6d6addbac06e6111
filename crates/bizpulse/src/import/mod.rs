//! Audit intake from files: JSON payloads in either accepted shape and
//! two-column field/value spreadsheet exports.

mod mapping;
mod numeric;
mod parser;

use crate::assessment::domain::{
    AuditRecord, Commercial, Costs, DataOrigin, Finance, HumanResources, Operations,
    Productivity, Quality, Satisfaction,
};
use crate::assessment::AuditInput;
use mapping::{FieldKind, TargetField};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Problem found while reading a field/value export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read audit export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid audit CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid audit JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("audit export rejected: {}", describe(.0))]
    Validation(Vec<FieldIssue>),
}

impl ImportError {
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            ImportError::Validation(issues) => issues,
            _ => &[],
        }
    }
}

fn describe(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| match issue.line {
            Some(line) => format!("{} (ligne {line}) : {}", issue.field, issue.message),
            None => format!("{} : {}", issue.field, issue.message),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn from_json_str(payload: &str) -> Result<AuditInput, ImportError> {
    Ok(serde_json::from_str(payload)?)
}

pub fn from_json_reader<R: Read>(reader: R) -> Result<AuditInput, ImportError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load an audit from a file, picking the format from the extension.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<AuditInput, ImportError> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            extension.eq_ignore_ascii_case("csv") || extension.eq_ignore_ascii_case("tsv")
        });
    if is_csv {
        FieldValueImporter::from_path(path).map(AuditInput::from)
    } else {
        let file = std::fs::File::open(path)?;
        from_json_reader(std::io::BufReader::new(file))
    }
}

/// Reader for `champ;valeur` exports produced by accounting spreadsheets.
pub struct FieldValueImporter;

impl FieldValueImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<AuditRecord, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<AuditRecord, ImportError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<AuditRecord, ImportError> {
        let mut fields = CollectedFields::default();
        let mut issues = Vec::new();

        for row in parser::parse_rows(content)? {
            let Some(field) = mapping::field_for_normalized(&row.normalized_name) else {
                debug!(field = row.raw_name.as_str(), "ignoring unmapped field");
                continue;
            };
            if fields.contains(field) {
                debug!(field = field.id(), line = row.line, "duplicate field ignored");
                continue;
            }
            if let Err(message) = fields.insert(field, &row.value) {
                issues.push(FieldIssue {
                    field: field.id().to_string(),
                    line: Some(row.line),
                    message,
                });
            }
        }

        for field in TargetField::REQUIRED {
            let failed_parse = issues.iter().any(|issue| issue.field == field.id());
            if !fields.contains(field) && !failed_parse {
                issues.push(FieldIssue {
                    field: field.id().to_string(),
                    line: None,
                    message: "champ obligatoire manquant".to_string(),
                });
            }
        }

        if !issues.is_empty() {
            return Err(ImportError::Validation(issues));
        }

        let record = fields.into_record();
        debug!(
            business = record.business_name.as_str(),
            sector = record.sector.as_str(),
            "field/value export imported"
        );
        Ok(AuditInput::from(record).into_record())
    }
}

#[derive(Debug, Default)]
struct CollectedFields {
    texts: HashMap<TargetField, String>,
    numbers: HashMap<TargetField, f64>,
    counts: HashMap<TargetField, u32>,
}

impl CollectedFields {
    fn contains(&self, field: TargetField) -> bool {
        self.texts.contains_key(&field)
            || self.numbers.contains_key(&field)
            || self.counts.contains_key(&field)
    }

    /// Blank values are treated as absent.
    fn insert(&mut self, field: TargetField, raw: &str) -> Result<(), String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(());
        }
        match field.kind() {
            FieldKind::Text => {
                self.texts.insert(field, raw.to_string());
            }
            FieldKind::Number => {
                let value = numeric::parse_number(raw)
                    .ok_or_else(|| format!("valeur numérique invalide « {raw} »"))?;
                self.numbers.insert(field, value);
            }
            FieldKind::Count => {
                let value = numeric::parse_number(raw)
                    .filter(|value| *value >= 0.0 && value.fract() == 0.0 && *value <= u32::MAX as f64)
                    .ok_or_else(|| format!("nombre entier attendu, « {raw} » reçu"))?;
                self.counts.insert(field, value as u32);
            }
        }
        Ok(())
    }

    fn number(&self, field: TargetField) -> Option<f64> {
        self.numbers.get(&field).copied()
    }

    fn required(&self, field: TargetField) -> f64 {
        self.number(field).unwrap_or_default()
    }

    fn into_record(mut self) -> AuditRecord {
        AuditRecord {
            business_name: self
                .texts
                .remove(&TargetField::BusinessName)
                .unwrap_or_default(),
            sector: self.texts.remove(&TargetField::Sector).unwrap_or_default(),
            variant: self.texts.remove(&TargetField::Variant),
            data_origin: DataOrigin::Imported,
            finance: Finance {
                annual_revenue: self.required(TargetField::AnnualRevenue),
                gross_margin_percent: self.required(TargetField::GrossMargin),
                net_margin_percent: self.number(TargetField::NetMargin),
                cash_runway_months: self.number(TargetField::CashRunway),
            },
            costs: Costs {
                hr_costs_percent: self.required(TargetField::HrCosts),
                cogs_percent: self.number(TargetField::Cogs),
                fixed_costs_percent: self.number(TargetField::FixedCosts),
            },
            ops: Operations {
                occupancy_rate_percent: self.required(TargetField::Occupancy),
                productivity: Productivity {
                    fte: self.required(TargetField::Fte),
                    revenue_per_fte: None,
                },
                quality: Some(Quality {
                    return_rate_percent: self.number(TargetField::ReturnRate),
                    incidents_per_month: self.number(TargetField::Incidents),
                }),
            },
            hr: Some(HumanResources {
                absenteeism_rate_percent: self.number(TargetField::Absenteeism),
                turnover_rate_percent: self.number(TargetField::Turnover),
            }),
            commercial: Commercial {
                digitalization_percent: self.required(TargetField::Digitalization),
                loyalty_percent: self.number(TargetField::Loyalty),
                satisfaction: Some(Satisfaction {
                    csat_percent: self.number(TargetField::Csat),
                    nps: self.number(TargetField::Nps),
                }),
            },
            nb_services: self.counts.get(&TargetField::NbServices).copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const MINIMAL: &str = "champ;valeur\n\
Chiffre d'affaires;450 000 €\n\
Marge brute (%);72,5\n\
Masse salariale;48\n\
Taux d'occupation;78\n\
ETP;6\n\
Digitalisation;55\n";

    #[test]
    fn semicolon_export_with_header_imports() {
        let record = FieldValueImporter::from_reader(Cursor::new(MINIMAL)).expect("import succeeds");

        assert_eq!(record.finance.annual_revenue, 450_000.0);
        assert_eq!(record.finance.gross_margin_percent, 72.5);
        assert_eq!(record.costs.hr_costs_percent, 48.0);
        assert_eq!(record.ops.productivity.fte, 6.0);
        assert_eq!(record.data_origin, DataOrigin::Imported);
        assert_eq!(record.ops.productivity.revenue_per_fte, Some(75_000.0));
        assert!(record.hr.is_none());
        assert!(record.commercial.satisfaction.is_none());
    }

    #[test]
    fn comma_export_without_header_imports() {
        let csv = "ca_annuel,300000\nmarge_brute,60\ncharges_rh,40\ntaux_occupation,70\netp,3\ndigitalisation,20\nnps,-5\nnb_services,4\n";
        let record = FieldValueImporter::from_str(csv).expect("import succeeds");

        assert_eq!(record.nps(), Some(-5.0));
        assert_eq!(record.nb_services, Some(4));
    }

    #[test]
    fn every_problem_is_reported() {
        let csv = "champ;valeur\nChiffre d'affaires;beaucoup\nMarge brute;60\nnb_services;2,5\n";
        let error = FieldValueImporter::from_str(csv).expect_err("import fails");

        let fields: Vec<&str> = error.issues().iter().map(|issue| issue.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "annualRevenue",
                "nbServices",
                "hrCostsPercent",
                "occupancyRatePercent",
                "fte",
                "digitalizationPercent"
            ]
        );
        assert_eq!(error.issues()[0].line, Some(2));
    }

    #[test]
    fn first_occurrence_of_a_field_wins() {
        let csv = format!("{MINIMAL}CA;1\n");
        let record = FieldValueImporter::from_str(&csv).expect("import succeeds");
        assert_eq!(record.finance.annual_revenue, 450_000.0);
    }

    #[test]
    fn delimiter_is_sniffed_from_first_line() {
        assert_eq!(parser::sniff_for_tests("champ;valeur\nCA;1,5"), b';');
        assert_eq!(parser::sniff_for_tests("\n\nCA,\"1,5\""), b',');
        assert_eq!(parser::sniff_for_tests("CA\t12"), b'\t');
    }

    #[test]
    fn mapping_recognizes_labels_and_legacy_keys() {
        assert_eq!(
            mapping::lookup_for_tests("Taux d'absentéisme"),
            Some(TargetField::Absenteeism)
        );
        assert_eq!(mapping::lookup_for_tests("charges_fixes"), Some(TargetField::FixedCosts));
        assert_eq!(
            mapping::lookup_for_tests("annualRevenue"),
            Some(TargetField::AnnualRevenue)
        );
        assert_eq!(mapping::lookup_for_tests("Couleur du logo"), None);
    }

    #[test]
    fn json_payloads_accept_both_shapes() {
        let legacy = r#"{"nom_entreprise":"Salon Iris","secteur":"coiffure","ca_annuel":150000,
            "marge_brute":80,"charges_rh":55,"taux_occupation":65,"etp":3,
            "digitalisation":40,"fidelisation":75}"#;
        assert!(matches!(
            from_json_str(legacy).expect("legacy parses"),
            AuditInput::Legacy(_)
        ));

        let error = from_json_str("{\"secteur\": 3}").expect_err("invalid payload");
        assert!(matches!(error, ImportError::Json(_)));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = FieldValueImporter::from_path("./does-not-exist.csv").expect_err("io error");
        match error {
            ImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
