use serde::{Deserialize, Serialize};

/// Smallest headcount used when deriving per-FTE ratios.
pub const MIN_FTE: f64 = 0.1;

/// Provenance of the figures captured in an audit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    #[default]
    Manual,
    ClientDeclared,
    Imported,
    Estimated,
}

impl DataOrigin {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Manual => "Saisie manuelle",
            Self::ClientDeclared => "Déclaratif client",
            Self::Imported => "Import",
            Self::Estimated => "Estimation",
        }
    }
}

/// Canonical audit representation consumed by every engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub business_name: String,
    pub sector: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default)]
    pub data_origin: DataOrigin,
    pub finance: Finance,
    pub costs: Costs,
    pub ops: Operations,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hr: Option<HumanResources>,
    pub commercial: Commercial,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nb_services: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finance {
    pub annual_revenue: f64,
    pub gross_margin_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_margin_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_runway_months: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Costs {
    pub hr_costs_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cogs_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_costs_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operations {
    pub occupancy_rate_percent: f64,
    pub productivity: Productivity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Productivity {
    pub fte: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_per_fte: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quality {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_rate_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incidents_per_month: Option<f64>,
}

impl Quality {
    pub fn is_empty(&self) -> bool {
        self.return_rate_percent.is_none() && self.incidents_per_month.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanResources {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absenteeism_rate_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turnover_rate_percent: Option<f64>,
}

impl HumanResources {
    pub fn is_empty(&self) -> bool {
        self.absenteeism_rate_percent.is_none() && self.turnover_rate_percent.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commercial {
    pub digitalization_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loyalty_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satisfaction: Option<Satisfaction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Satisfaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csat_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nps: Option<f64>,
}

impl Satisfaction {
    pub fn is_empty(&self) -> bool {
        self.csat_percent.is_none() && self.nps.is_none()
    }
}

impl AuditRecord {
    /// Revenue per full-time equivalent, with the headcount floored at [`MIN_FTE`].
    pub fn revenue_per_fte(&self) -> f64 {
        self.finance.annual_revenue / self.ops.productivity.fte.max(MIN_FTE)
    }

    pub fn net_margin(&self) -> Option<f64> {
        self.finance.net_margin_percent
    }

    pub fn cash_runway(&self) -> Option<f64> {
        self.finance.cash_runway_months
    }

    pub fn cogs(&self) -> Option<f64> {
        self.costs.cogs_percent
    }

    pub fn fixed_costs(&self) -> Option<f64> {
        self.costs.fixed_costs_percent
    }

    pub fn return_rate(&self) -> Option<f64> {
        self.ops
            .quality
            .as_ref()
            .and_then(|quality| quality.return_rate_percent)
    }

    pub fn incidents_per_month(&self) -> Option<f64> {
        self.ops
            .quality
            .as_ref()
            .and_then(|quality| quality.incidents_per_month)
    }

    pub fn absenteeism(&self) -> Option<f64> {
        self.hr.as_ref().and_then(|hr| hr.absenteeism_rate_percent)
    }

    pub fn turnover(&self) -> Option<f64> {
        self.hr.as_ref().and_then(|hr| hr.turnover_rate_percent)
    }

    pub fn loyalty(&self) -> Option<f64> {
        self.commercial.loyalty_percent
    }

    pub fn csat(&self) -> Option<f64> {
        self.commercial
            .satisfaction
            .as_ref()
            .and_then(|satisfaction| satisfaction.csat_percent)
    }

    pub fn nps(&self) -> Option<f64> {
        self.commercial
            .satisfaction
            .as_ref()
            .and_then(|satisfaction| satisfaction.nps)
    }

    /// Number of tracked optional inputs left blank; drives the completeness penalty.
    pub fn missing_optional_count(&self) -> usize {
        let quality_present = self.return_rate().is_some() || self.incidents_per_month().is_some();
        [
            self.net_margin().is_some(),
            self.cash_runway().is_some(),
            self.cogs().is_some(),
            self.fixed_costs().is_some(),
            quality_present,
            self.absenteeism().is_some(),
            self.turnover().is_some(),
            self.csat().is_some(),
            self.nps().is_some(),
        ]
        .iter()
        .filter(|present| !**present)
        .count()
    }
}

/// Confidence attached to quantified estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    #[serde(rename = "FAIBLE")]
    Faible,
    #[serde(rename = "MOYEN")]
    Moyen,
    #[serde(rename = "BON")]
    Bon,
}

impl ConfidenceLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Faible => "FAIBLE",
            Self::Moyen => "MOYEN",
            Self::Bon => "BON",
        }
    }
}

/// The four scored dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Financier,
    Operationnel,
    Commercial,
    Strategique,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Financier,
        Dimension::Operationnel,
        Dimension::Commercial,
        Dimension::Strategique,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Financier => "Financier",
            Self::Operationnel => "Opérationnel",
            Self::Commercial => "Commercial",
            Self::Strategique => "Stratégique",
        }
    }

    /// Share of the global score carried by the dimension.
    pub const fn global_weight(self) -> f64 {
        match self {
            Self::Financier => 0.35,
            Self::Operationnel => 0.25,
            Self::Commercial => 0.20,
            Self::Strategique => 0.20,
        }
    }
}

/// Dimension and global scores, each on a 0-100 scale with one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub global: f64,
    pub financier: f64,
    pub operationnel: f64,
    pub commercial: f64,
    pub strategique: f64,
}

impl Scores {
    pub fn dimension(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Financier => self.financier,
            Dimension::Operationnel => self.operationnel,
            Dimension::Commercial => self.commercial,
            Dimension::Strategique => self.strategique,
        }
    }

    /// Spread between the strongest and weakest of the first three dimensions.
    pub fn imbalance_gap(&self) -> f64 {
        dimension_gap(self.financier, self.operationnel, self.commercial)
    }
}

pub(crate) fn dimension_gap(financier: f64, operationnel: f64, commercial: f64) -> f64 {
    let max = financier.max(operationnel).max(commercial);
    let min = financier.min(operationnel).min(commercial);
    max - min
}

/// Round to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
