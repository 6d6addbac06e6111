use crate::assessment::domain::{AuditRecord, Scores};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl RuleSeverity {
    /// Sort rank, most severe first.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Tresorerie,
    Rentabilite,
    RessourcesHumaines,
    Operations,
    Commercial,
    Strategie,
}

/// Declarative risk rule: a predicate and the narrative it contributes.
pub struct RiskRule {
    pub id: &'static str,
    pub condition: fn(&AuditRecord, &Scores) -> bool,
    pub risk: &'static str,
    pub lever: &'static str,
    pub category: RiskCategory,
    pub severity: RuleSeverity,
    pub quick_win: Option<&'static str>,
    pub structural_action: Option<&'static str>,
}

/// Rule that fired for a given record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggeredRisk {
    pub id: &'static str,
    pub risk: &'static str,
    pub lever: &'static str,
    pub category: RiskCategory,
    pub severity: RuleSeverity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_win: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structural_action: Option<&'static str>,
}

impl RiskRule {
    fn trigger(&self) -> TriggeredRisk {
        TriggeredRisk {
            id: self.id,
            risk: self.risk,
            lever: self.lever,
            category: self.category,
            severity: self.severity,
            quick_win: self.quick_win,
            structural_action: self.structural_action,
        }
    }
}

/// Evaluate every rule, then stable-sort the hits by severity so declaration
/// order is kept within a severity.
pub(crate) fn evaluate_risks(record: &AuditRecord, scores: &Scores) -> Vec<TriggeredRisk> {
    let mut triggered: Vec<TriggeredRisk> = RISK_RULES
        .iter()
        .filter(|rule| (rule.condition)(record, scores))
        .map(RiskRule::trigger)
        .collect();
    triggered.sort_by_key(|risk| risk.severity.rank());
    triggered
}

pub const RISK_RULES: &[RiskRule] = &[
    RiskRule {
        id: "tresorerie_critique",
        condition: |record, _| record.cash_runway().is_some_and(|months| months < 3.0),
        risk: "Trésorerie critique : moins de 3 mois de visibilité",
        lever: "Sécuriser la trésorerie à court terme",
        category: RiskCategory::Tresorerie,
        severity: RuleSeverity::Critical,
        quick_win: Some("Relancer dès cette semaine toutes les créances clients échues"),
        structural_action: Some("Mettre en place un plan de trésorerie glissant sur 13 semaines"),
    },
    RiskRule {
        id: "perte_nette",
        condition: |record, _| record.net_margin().is_some_and(|net| net < 0.0),
        risk: "Activité déficitaire : la marge nette est négative",
        lever: "Restaurer la rentabilité nette",
        category: RiskCategory::Rentabilite,
        severity: RuleSeverity::Critical,
        quick_win: None,
        structural_action: Some("Revoir la structure de coûts poste par poste avec l'expert-comptable"),
    },
    RiskRule {
        id: "marge_brute_faible",
        condition: |record, _| record.finance.gross_margin_percent < 45.0,
        risk: "Marge brute insuffisante pour couvrir les charges de structure",
        lever: "Revaloriser les prix et renégocier les achats",
        category: RiskCategory::Rentabilite,
        severity: RuleSeverity::High,
        quick_win: Some("Appliquer une hausse ciblée sur les prestations les moins margées"),
        structural_action: Some("Renégocier les conditions fournisseurs principales"),
    },
    RiskRule {
        id: "masse_salariale_excessive",
        condition: |record, _| record.costs.hr_costs_percent > 50.0,
        risk: "Masse salariale supérieure à 50 % du chiffre d'affaires",
        lever: "Optimiser l'organisation du temps de travail",
        category: RiskCategory::RessourcesHumaines,
        severity: RuleSeverity::High,
        quick_win: None,
        structural_action: Some("Revoir les plannings et la répartition des tâches par poste"),
    },
    RiskRule {
        id: "sous_occupation",
        condition: |record, _| record.ops.occupancy_rate_percent < 70.0,
        risk: "Capacité sous-utilisée : taux d'occupation inférieur à 70 %",
        lever: "Remplir les créneaux disponibles",
        category: RiskCategory::Operations,
        severity: RuleSeverity::High,
        quick_win: Some("Ouvrir la prise de rendez-vous en ligne sur les créneaux creux"),
        structural_action: None,
    },
    RiskRule {
        id: "absenteisme_eleve",
        condition: |record, _| record.absenteeism().is_some_and(|rate| rate > 12.0),
        risk: "Absentéisme élevé qui désorganise la production",
        lever: "Réduire l'absentéisme",
        category: RiskCategory::RessourcesHumaines,
        severity: RuleSeverity::High,
        quick_win: Some("Organiser des entretiens de retour systématiques"),
        structural_action: Some("Déployer un plan qualité de vie au travail"),
    },
    RiskRule {
        id: "turnover_eleve",
        condition: |record, _| record.turnover().is_some_and(|rate| rate > 30.0),
        risk: "Turnover élevé : perte de compétences et coûts de recrutement",
        lever: "Fidéliser les collaborateurs clés",
        category: RiskCategory::RessourcesHumaines,
        severity: RuleSeverity::High,
        quick_win: None,
        structural_action: Some("Construire des parcours d'évolution et une politique de rémunération lisible"),
    },
    RiskRule {
        id: "score_financier_faible",
        condition: |_, scores| scores.financier < 50.0,
        risk: "Performance financière en dessous des repères du secteur",
        lever: "Piloter la rentabilité avec des indicateurs mensuels",
        category: RiskCategory::Rentabilite,
        severity: RuleSeverity::Medium,
        quick_win: None,
        structural_action: Some("Mettre en place un tableau de bord financier mensuel"),
    },
    RiskRule {
        id: "productivite_faible",
        condition: |record, _| record.revenue_per_fte() < 70_000.0,
        risk: "Chiffre d'affaires par ETP faible",
        lever: "Améliorer la productivité par collaborateur",
        category: RiskCategory::Operations,
        severity: RuleSeverity::Medium,
        quick_win: Some("Supprimer les tâches administratives à faible valeur ajoutée"),
        structural_action: None,
    },
    RiskRule {
        id: "digitalisation_faible",
        condition: |record, _| record.commercial.digitalization_percent < 40.0,
        risk: "Digitalisation insuffisante du parcours client",
        lever: "Digitaliser la prise de contact et le suivi client",
        category: RiskCategory::Commercial,
        severity: RuleSeverity::Medium,
        quick_win: Some("Activer une fiche d'établissement et la réservation en ligne"),
        structural_action: Some("Choisir un logiciel de gestion intégrant la relation client"),
    },
    RiskRule {
        id: "fidelisation_faible",
        condition: |record, _| record.loyalty().is_some_and(|rate| rate < 60.0),
        risk: "Fidélisation client fragile",
        lever: "Structurer la relation avec la clientèle existante",
        category: RiskCategory::Commercial,
        severity: RuleSeverity::Medium,
        quick_win: Some("Lancer des rappels automatiques de rendez-vous et de renouvellement"),
        structural_action: None,
    },
    RiskRule {
        id: "satisfaction_degradee",
        condition: |record, _| {
            record.nps().is_some_and(|nps| nps < 0.0)
                || record.csat().is_some_and(|csat| csat < 70.0)
        },
        risk: "Satisfaction client dégradée",
        lever: "Traiter les irritants clients prioritaires",
        category: RiskCategory::Commercial,
        severity: RuleSeverity::Medium,
        quick_win: Some("Rappeler personnellement les clients insatisfaits du dernier mois"),
        structural_action: None,
    },
    RiskRule {
        id: "qualite_retours",
        condition: |record, _| record.return_rate().is_some_and(|rate| rate > 8.0),
        risk: "Taux de retour élevé sur les prestations",
        lever: "Fiabiliser la qualité de service",
        category: RiskCategory::Operations,
        severity: RuleSeverity::Medium,
        quick_win: Some("Mettre en place une check-list de contrôle avant livraison"),
        structural_action: None,
    },
    RiskRule {
        id: "tresorerie_tendue",
        condition: |record, _| {
            record
                .cash_runway()
                .is_some_and(|months| (3.0..6.0).contains(&months))
        },
        risk: "Trésorerie tendue : moins de 6 mois de visibilité",
        lever: "Constituer un coussin de trésorerie",
        category: RiskCategory::Tresorerie,
        severity: RuleSeverity::Low,
        quick_win: Some("Négocier l'étalement des prochaines échéances fournisseurs"),
        structural_action: None,
    },
    RiskRule {
        id: "desequilibre_dimensions",
        condition: |_, scores| scores.imbalance_gap() > 30.0,
        risk: "Performance déséquilibrée entre les dimensions",
        lever: "Rééquilibrer les efforts vers la dimension la plus faible",
        category: RiskCategory::Strategie,
        severity: RuleSeverity::Low,
        quick_win: None,
        structural_action: Some("Fixer un objectif annuel sur la dimension la plus faible"),
    },
    RiskRule {
        id: "offre_etroite",
        condition: |record, _| record.nb_services.is_some_and(|count| count <= 2),
        risk: "Offre concentrée sur un nombre réduit de services",
        lever: "Diversifier l'offre de services",
        category: RiskCategory::Strategie,
        severity: RuleSeverity::Low,
        quick_win: None,
        structural_action: Some("Étudier une ou deux prestations complémentaires à forte marge"),
    },
    RiskRule {
        id: "saturation_capacite",
        condition: |record, _| record.ops.occupancy_rate_percent > 95.0,
        risk: "Capacité saturée : croissance bridée",
        lever: "Étendre la capacité de production",
        category: RiskCategory::Operations,
        severity: RuleSeverity::Low,
        quick_win: None,
        structural_action: Some("Évaluer un recrutement ou une extension des horaires"),
    },
];
