use super::ScenarioType;
use crate::assessment::domain::{AuditRecord, ConfidenceLevel};

const DAYS_PER_YEAR: f64 = 365.0;
const DEFAULT_PURCHASES_SHARE: f64 = 0.30;
const DEFAULT_FIXED_COSTS_SHARE: f64 = 0.20;

/// One adjustable parameter of a scenario and its realization range.
pub(crate) struct Lever {
    pub(crate) key: &'static str,
    pub(crate) impact: fn(&AuditRecord, f64) -> (f64, f64),
    pub(crate) hypothesis: &'static str,
}

pub(crate) struct ScenarioModel {
    pub(crate) scenario: ScenarioType,
    pub(crate) levers: &'static [Lever],
    pub(crate) impact_label: &'static str,
    pub(crate) checklist: fn(&AuditRecord) -> Vec<bool>,
    pub(crate) confidence_cap: ConfidenceLevel,
    pub(crate) secondary_effects: fn(&AuditRecord, f64, f64) -> Vec<String>,
}

pub(crate) fn model_for(scenario: ScenarioType) -> &'static ScenarioModel {
    match scenario {
        ScenarioType::Tresorerie => &TRESORERIE,
        ScenarioType::Rentabilite => &RENTABILITE,
        ScenarioType::Activite => &ACTIVITE,
        ScenarioType::Commercial => &COMMERCIAL,
        ScenarioType::Rh => &RH,
    }
}

fn revenue(record: &AuditRecord) -> f64 {
    record.finance.annual_revenue
}

fn scaled(base: f64, low: f64, high: f64) -> (f64, f64) {
    (base * low, base * high)
}

static TRESORERIE: ScenarioModel = ScenarioModel {
    scenario: ScenarioType::Tresorerie,
    levers: &[
        Lever {
            key: "delai_client",
            impact: |record, days| scaled(days * revenue(record) / DAYS_PER_YEAR, 0.6, 0.8),
            hypothesis: "Réduction du délai client réalisée à 60-80 % de sa valeur théorique",
        },
        Lever {
            key: "delai_fournisseur",
            impact: |record, days| {
                let purchases_share = record
                    .cogs()
                    .map(|cogs| cogs / 100.0)
                    .unwrap_or(DEFAULT_PURCHASES_SHARE);
                scaled(
                    days * revenue(record) * purchases_share / DAYS_PER_YEAR,
                    0.5,
                    0.7,
                )
            },
            hypothesis: "Allongement fournisseur obtenu sur 50-70 % des achats",
        },
        Lever {
            key: "reduction_charges",
            impact: |record, percent| {
                let fixed_share = record
                    .fixed_costs()
                    .map(|fixed| fixed / 100.0)
                    .unwrap_or(DEFAULT_FIXED_COSTS_SHARE);
                scaled(
                    percent / 100.0 * revenue(record) * fixed_share,
                    0.7,
                    0.9,
                )
            },
            hypothesis: "Réduction des charges fixes effective à 70-90 % sur l'année",
        },
    ],
    impact_label: "Trésorerie libérée",
    checklist: |record| {
        vec![
            record.cash_runway().is_some(),
            record.cogs().is_some(),
            record.fixed_costs().is_some(),
            record.net_margin().is_some(),
        ]
    },
    confidence_cap: ConfidenceLevel::Bon,
    secondary_effects: |record, min, max| {
        let mut effects = vec!["Réduction du besoin en fonds de roulement".to_string()];
        if record.cash_runway().is_some() {
            let net_share = record.net_margin().unwrap_or(0.0) / 100.0;
            let monthly_outflows = revenue(record) * (1.0 - net_share) / 12.0;
            if monthly_outflows > 0.0 {
                effects.push(format!(
                    "Gain de visibilité estimé : +{:.1} à +{:.1} mois de trésorerie",
                    min / monthly_outflows,
                    max / monthly_outflows
                ));
            }
        }
        effects
    },
};

static RENTABILITE: ScenarioModel = ScenarioModel {
    scenario: ScenarioType::Rentabilite,
    levers: &[
        Lever {
            key: "hausse_prix",
            impact: |record, percent| scaled(revenue(record) * percent / 100.0, 0.7, 0.95),
            hypothesis: "Hausse de prix conservée à 70-95 % après attrition des volumes",
        },
        Lever {
            key: "baisse_cogs",
            impact: |record, points| scaled(revenue(record) * points / 100.0, 0.8, 1.0),
            hypothesis: "Baisse du coût des achats répercutée à 80-100 % sur la marge",
        },
    ],
    impact_label: "Marge supplémentaire annuelle",
    checklist: |record| {
        vec![
            record.cogs().is_some(),
            record.net_margin().is_some(),
            record.loyalty().is_some(),
            record.fixed_costs().is_some(),
        ]
    },
    confidence_cap: ConfidenceLevel::Bon,
    secondary_effects: |record, min, max| {
        let revenue = revenue(record);
        vec![format!(
            "Marge nette améliorée de +{:.1} à +{:.1} points",
            min / revenue * 100.0,
            max / revenue * 100.0
        )]
    },
};

static ACTIVITE: ScenarioModel = ScenarioModel {
    scenario: ScenarioType::Activite,
    levers: &[
        Lever {
            key: "hausse_occupation",
            impact: |record, points| {
                let occupancy = record.ops.occupancy_rate_percent;
                let growth = if occupancy > 0.0 {
                    points / occupancy
                } else {
                    points / 100.0
                };
                scaled(revenue(record) * growth, 0.5, 0.8)
            },
            hypothesis: "Créneaux supplémentaires vendus à 50-80 % du prix moyen constaté",
        },
        Lever {
            key: "gain_productivite",
            impact: |record, percent| scaled(revenue(record) * percent / 100.0, 0.4, 0.7),
            hypothesis: "Temps libéré converti en chiffre d'affaires à 40-70 %",
        },
    ],
    impact_label: "Chiffre d'affaires additionnel",
    checklist: |record| {
        vec![
            record.ops.quality.is_some(),
            record.fixed_costs().is_some(),
            record.absenteeism().is_some(),
            record.nb_services.is_some(),
        ]
    },
    confidence_cap: ConfidenceLevel::Bon,
    secondary_effects: |_, _, _| {
        vec!["Meilleure absorption des charges fixes".to_string()]
    },
};

static COMMERCIAL: ScenarioModel = ScenarioModel {
    scenario: ScenarioType::Commercial,
    levers: &[
        Lever {
            key: "hausse_fidelisation",
            impact: |record, points| scaled(revenue(record) * points / 100.0, 0.3, 0.5),
            hypothesis: "Chaque point de fidélisation conserve 30-50 % d'un point de chiffre d'affaires",
        },
        Lever {
            key: "hausse_digitalisation",
            impact: |record, points| scaled(revenue(record) * points / 100.0, 0.1, 0.25),
            hypothesis: "Canaux digitaux convertis à 10-25 % en ventes additionnelles",
        },
        Lever {
            key: "hausse_panier",
            impact: |record, percent| scaled(revenue(record) * percent / 100.0, 0.6, 0.85),
            hypothesis: "Hausse du panier moyen appliquée à 60-85 % de la clientèle",
        },
    ],
    impact_label: "Chiffre d'affaires additionnel",
    checklist: |record| {
        vec![
            record.loyalty().is_some(),
            record.csat().is_some(),
            record.nps().is_some(),
            record.nb_services.is_some(),
        ]
    },
    confidence_cap: ConfidenceLevel::Bon,
    secondary_effects: |_, _, _| {
        vec!["Hausse de la valeur vie client".to_string()]
    },
};

static RH: ScenarioModel = ScenarioModel {
    scenario: ScenarioType::Rh,
    levers: &[
        Lever {
            key: "baisse_absenteisme",
            impact: |record, points| scaled(hr_costs(record) * points / 100.0, 0.6, 0.9),
            hypothesis: "Coûts d'absence évités à 60-90 % de la masse salariale concernée",
        },
        Lever {
            key: "baisse_turnover",
            impact: |record, points| scaled(hr_costs(record) * points / 100.0, 0.15, 0.3),
            hypothesis: "Un départ évité économise 15-30 % d'un salaire annuel",
        },
    ],
    impact_label: "Économies de charges RH",
    checklist: |record| {
        vec![
            record.absenteeism().is_some(),
            record.turnover().is_some(),
            record.net_margin().is_some(),
            record.fixed_costs().is_some(),
        ]
    },
    confidence_cap: ConfidenceLevel::Moyen,
    secondary_effects: |_, _, _| {
        vec!["Amélioration du climat social et de la continuité de service".to_string()]
    },
};

fn hr_costs(record: &AuditRecord) -> f64 {
    revenue(record) * record.costs.hr_costs_percent / 100.0
}
