use super::domain::{
    AuditRecord, Commercial, Costs, DataOrigin, Finance, HumanResources, Operations,
    Productivity, Quality, Satisfaction, MIN_FTE,
};
use serde::{Deserialize, Serialize};

/// Audit payload as accepted at the boundary: either the nested shape or the
/// historical flat form keyed in French.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AuditInput {
    Structured(AuditRecord),
    Legacy(LegacyAudit),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyAudit {
    #[serde(default)]
    pub nom_entreprise: String,
    #[serde(default)]
    pub secteur: String,
    #[serde(default)]
    pub variante: Option<String>,
    #[serde(default)]
    pub origine: Option<DataOrigin>,
    pub ca_annuel: f64,
    pub marge_brute: f64,
    #[serde(default)]
    pub marge_nette: Option<f64>,
    #[serde(default)]
    pub tresorerie_mois: Option<f64>,
    pub charges_rh: f64,
    #[serde(default)]
    pub achats: Option<f64>,
    #[serde(default)]
    pub charges_fixes: Option<f64>,
    pub taux_occupation: f64,
    pub etp: f64,
    #[serde(default)]
    pub taux_retour: Option<f64>,
    #[serde(default)]
    pub incidents_mois: Option<f64>,
    #[serde(default)]
    pub absenteisme: Option<f64>,
    #[serde(default)]
    pub turnover: Option<f64>,
    pub digitalisation: f64,
    pub fidelisation: f64,
    #[serde(default)]
    pub csat: Option<f64>,
    #[serde(default)]
    pub nps: Option<f64>,
    #[serde(default)]
    pub nb_services: Option<u32>,
}

impl From<AuditRecord> for AuditInput {
    fn from(record: AuditRecord) -> Self {
        AuditInput::Structured(record)
    }
}

impl AuditInput {
    /// Convert either shape into the canonical record.
    pub fn into_record(self) -> AuditRecord {
        let record = match self {
            AuditInput::Structured(record) => record,
            AuditInput::Legacy(legacy) => legacy.into_record(),
        };
        canonicalize(record)
    }
}

impl LegacyAudit {
    fn into_record(self) -> AuditRecord {
        AuditRecord {
            business_name: self.nom_entreprise,
            sector: self.secteur,
            variant: self.variante,
            data_origin: self.origine.unwrap_or_default(),
            finance: Finance {
                annual_revenue: self.ca_annuel,
                gross_margin_percent: self.marge_brute,
                net_margin_percent: self.marge_nette,
                cash_runway_months: self.tresorerie_mois,
            },
            costs: Costs {
                hr_costs_percent: self.charges_rh,
                cogs_percent: self.achats,
                fixed_costs_percent: self.charges_fixes,
            },
            ops: Operations {
                occupancy_rate_percent: self.taux_occupation,
                productivity: Productivity {
                    fte: self.etp,
                    revenue_per_fte: None,
                },
                quality: Some(Quality {
                    return_rate_percent: self.taux_retour,
                    incidents_per_month: self.incidents_mois,
                }),
            },
            hr: Some(HumanResources {
                absenteeism_rate_percent: self.absenteisme,
                turnover_rate_percent: self.turnover,
            }),
            commercial: Commercial {
                digitalization_percent: self.digitalisation,
                loyalty_percent: Some(self.fidelisation),
                satisfaction: Some(Satisfaction {
                    csat_percent: self.csat,
                    nps: self.nps,
                }),
            },
            nb_services: self.nb_services,
        }
    }
}

fn canonicalize(mut record: AuditRecord) -> AuditRecord {
    record.ops.productivity.revenue_per_fte =
        Some(record.finance.annual_revenue / record.ops.productivity.fte.max(MIN_FTE));
    record.ops.quality = record.ops.quality.filter(|quality| !quality.is_empty());
    record.hr = record.hr.filter(|hr| !hr.is_empty());
    record.commercial.satisfaction = record
        .commercial
        .satisfaction
        .filter(|satisfaction| !satisfaction.is_empty());
    record.variant = record
        .variant
        .map(|variant| variant.trim().to_string())
        .filter(|variant| !variant.is_empty());
    record
}

/// Input problem reported against a camelCase field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: String,
}

impl ValidationIssue {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Structural checks that must hold before scoring. Business judgement on
/// the values themselves belongs to the warnings engine.
pub fn validate(record: &AuditRecord) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let revenue = record.finance.annual_revenue;
    if !revenue.is_finite() || revenue <= 0.0 {
        issues.push(ValidationIssue::new(
            "annualRevenue",
            "le chiffre d'affaires annuel doit être strictement positif",
        ));
    }

    let fte = record.ops.productivity.fte;
    if !fte.is_finite() || fte <= 0.0 {
        issues.push(ValidationIssue::new(
            "fte",
            "l'effectif en ETP doit être strictement positif",
        ));
    }

    let percentages = [
        ("grossMarginPercent", Some(record.finance.gross_margin_percent)),
        ("hrCostsPercent", Some(record.costs.hr_costs_percent)),
        ("cogsPercent", record.cogs()),
        ("fixedCostsPercent", record.fixed_costs()),
        ("occupancyRatePercent", Some(record.ops.occupancy_rate_percent)),
        ("returnRatePercent", record.return_rate()),
        ("absenteeismRatePercent", record.absenteeism()),
        ("turnoverRatePercent", record.turnover()),
        ("digitalizationPercent", Some(record.commercial.digitalization_percent)),
        ("loyaltyPercent", record.loyalty()),
        ("csatPercent", record.csat()),
    ];
    for (field, value) in percentages {
        if let Some(value) = value {
            check_range(&mut issues, field, value, 0.0, 100.0);
        }
    }

    if let Some(net) = record.net_margin() {
        check_range(&mut issues, "netMarginPercent", net, -100.0, 100.0);
    }
    if let Some(nps) = record.nps() {
        check_range(&mut issues, "nps", nps, -100.0, 100.0);
    }

    for (field, value) in [
        ("cashRunwayMonths", record.cash_runway()),
        ("incidentsPerMonth", record.incidents_per_month()),
    ] {
        if value.is_some_and(|value| !value.is_finite() || value < 0.0) {
            issues.push(ValidationIssue::new(field, "la valeur ne peut pas être négative"));
        }
    }

    if record.nb_services == Some(0) {
        issues.push(ValidationIssue::new(
            "nbServices",
            "au moins un service doit être proposé",
        ));
    }

    issues
}

fn check_range(issues: &mut Vec<ValidationIssue>, field: &'static str, value: f64, min: f64, max: f64) {
    if !value.is_finite() || value < min || value > max {
        issues.push(ValidationIssue::new(
            field,
            format!("valeur {value} hors de l'intervalle [{min}, {max}]"),
        ));
    }
}
