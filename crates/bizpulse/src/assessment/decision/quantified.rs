use crate::assessment::domain::{AuditRecord, ConfidenceLevel, Scores};
use serde::Serialize;

pub const MAX_RECOMMENDATIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImpactType {
    #[serde(rename = "CA")]
    Ca,
    #[serde(rename = "MARGE")]
    Marge,
    #[serde(rename = "TRÉSORERIE")]
    Tresorerie,
    #[serde(rename = "COÛTS")]
    Couts,
}

impl ImpactType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ca => "CA",
            Self::Marge => "MARGE",
            Self::Tresorerie => "TRÉSORERIE",
            Self::Couts => "COÛTS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantifiedRecommendation {
    pub id: &'static str,
    pub lever: &'static str,
    pub impact_type: ImpactType,
    pub estimated_impact_min: f64,
    pub estimated_impact_max: f64,
    pub unit: &'static str,
    pub assumptions: Vec<String>,
    pub confidence_level: ConfidenceLevel,
}

/// Lever with a revenue-proportional impact range.
pub struct QuantifiedRule {
    pub id: &'static str,
    pub condition: fn(&AuditRecord, &Scores) -> bool,
    pub lever: &'static str,
    pub impact_type: ImpactType,
    /// Share of annual revenue recovered, as (low, high).
    pub revenue_share: (f64, f64),
    pub assumptions: &'static [&'static str],
    pub confidence: ConfidenceLevel,
}

impl QuantifiedRule {
    /// Impact bounds in euros, rounded and ordered low to high.
    pub fn calculate_impact(&self, record: &AuditRecord) -> (f64, f64) {
        let revenue = record.finance.annual_revenue;
        let low = (revenue * self.revenue_share.0).round();
        let high = (revenue * self.revenue_share.1).round();
        (low.min(high), low.max(high))
    }

    fn recommend(&self, record: &AuditRecord) -> QuantifiedRecommendation {
        let (min, max) = self.calculate_impact(record);
        QuantifiedRecommendation {
            id: self.id,
            lever: self.lever,
            impact_type: self.impact_type,
            estimated_impact_min: min,
            estimated_impact_max: max,
            unit: "€",
            assumptions: self
                .assumptions
                .iter()
                .map(|assumption| assumption.to_string())
                .collect(),
            confidence_level: self.confidence,
        }
    }
}

/// Recommendations for every matching rule, largest upside first, at most five.
pub(crate) fn quantify(record: &AuditRecord, scores: &Scores) -> Vec<QuantifiedRecommendation> {
    let mut recommendations: Vec<QuantifiedRecommendation> = QUANTIFIED_RULES
        .iter()
        .filter(|rule| (rule.condition)(record, scores))
        .map(|rule| rule.recommend(record))
        .collect();
    recommendations.sort_by(|a, b| b.estimated_impact_max.total_cmp(&a.estimated_impact_max));
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

pub const QUANTIFIED_RULES: &[QuantifiedRule] = &[
    QuantifiedRule {
        id: "optimiser_occupation",
        condition: |record, _| record.ops.occupancy_rate_percent < 85.0,
        lever: "Augmenter le taux d'occupation des capacités",
        impact_type: ImpactType::Ca,
        revenue_share: (0.03, 0.06),
        assumptions: &[
            "Remplissage progressif des créneaux libres sur 12 mois",
            "Prix moyen constant",
        ],
        confidence: ConfidenceLevel::Moyen,
    },
    QuantifiedRule {
        id: "reduire_masse_salariale",
        condition: |record, _| record.costs.hr_costs_percent > 45.0,
        lever: "Optimiser la masse salariale",
        impact_type: ImpactType::Couts,
        revenue_share: (0.015, 0.03),
        assumptions: &[
            "Réorganisation des plannings sans licenciement",
            "Réduction des heures supplémentaires et de l'intérim",
        ],
        confidence: ConfidenceLevel::Moyen,
    },
    QuantifiedRule {
        id: "reduire_absenteisme",
        condition: |record, _| record.absenteeism().is_some_and(|rate| rate > 6.0),
        lever: "Réduire l'absentéisme",
        impact_type: ImpactType::Couts,
        revenue_share: (0.005, 0.015),
        assumptions: &[
            "Baisse de 2 à 4 points du taux d'absentéisme",
            "Coûts de remplacement évités",
        ],
        confidence: ConfidenceLevel::Faible,
    },
    QuantifiedRule {
        id: "ameliorer_marge_brute",
        condition: |record, _| record.finance.gross_margin_percent < 65.0,
        lever: "Améliorer la marge brute",
        impact_type: ImpactType::Marge,
        revenue_share: (0.02, 0.04),
        assumptions: &[
            "Renégociation des achats de 3 à 5 %",
            "Ajustement tarifaire limité aux prestations sous-valorisées",
        ],
        confidence: ConfidenceLevel::Moyen,
    },
    QuantifiedRule {
        id: "accelerer_digitalisation",
        condition: |record, _| record.commercial.digitalization_percent < 60.0,
        lever: "Accélérer la digitalisation commerciale",
        impact_type: ImpactType::Ca,
        revenue_share: (0.01, 0.03),
        assumptions: &[
            "Prise de rendez-vous et relances en ligne",
            "Effet progressif sur 12 à 18 mois",
        ],
        confidence: ConfidenceLevel::Faible,
    },
    QuantifiedRule {
        id: "optimiser_tresorerie",
        condition: |record, _| record.cash_runway().is_some_and(|months| months < 6.0),
        lever: "Optimiser le besoin en fonds de roulement",
        impact_type: ImpactType::Tresorerie,
        revenue_share: (0.02, 0.05),
        assumptions: &[
            "Réduction des délais de paiement clients",
            "Allongement négocié des délais fournisseurs",
        ],
        confidence: ConfidenceLevel::Bon,
    },
    QuantifiedRule {
        id: "ameliorer_productivite",
        condition: |record, scores| {
            record.revenue_per_fte() < 80_000.0 || scores.operationnel < 60.0
        },
        lever: "Améliorer la productivité des équipes",
        impact_type: ImpactType::Ca,
        revenue_share: (0.02, 0.05),
        assumptions: &[
            "Réallocation du temps administratif vers la production",
            "Effectif constant",
        ],
        confidence: ConfidenceLevel::Moyen,
    },
    QuantifiedRule {
        id: "reduire_turnover",
        condition: |record, _| record.turnover().is_some_and(|rate| rate > 20.0),
        lever: "Réduire le turnover",
        impact_type: ImpactType::Couts,
        revenue_share: (0.005, 0.02),
        assumptions: &[
            "Coûts de recrutement et d'intégration évités",
            "Baisse du turnover de 5 à 10 points",
        ],
        confidence: ConfidenceLevel::Faible,
    },
];
