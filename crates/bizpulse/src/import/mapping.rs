use crate::assessment::sector::normalize_text;
use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum FieldKind {
    Text,
    Number,
    Count,
}

/// Audit fields that can be filled from a field/value export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TargetField {
    BusinessName,
    Sector,
    Variant,
    AnnualRevenue,
    GrossMargin,
    NetMargin,
    CashRunway,
    HrCosts,
    Cogs,
    FixedCosts,
    Occupancy,
    Fte,
    ReturnRate,
    Incidents,
    Absenteeism,
    Turnover,
    Digitalization,
    Loyalty,
    Csat,
    Nps,
    NbServices,
}

impl TargetField {
    pub(crate) const REQUIRED: [TargetField; 6] = [
        TargetField::AnnualRevenue,
        TargetField::GrossMargin,
        TargetField::HrCosts,
        TargetField::Occupancy,
        TargetField::Fte,
        TargetField::Digitalization,
    ];

    /// camelCase name used in issues and JSON payloads.
    pub(crate) const fn id(self) -> &'static str {
        match self {
            Self::BusinessName => "businessName",
            Self::Sector => "sector",
            Self::Variant => "variant",
            Self::AnnualRevenue => "annualRevenue",
            Self::GrossMargin => "grossMarginPercent",
            Self::NetMargin => "netMarginPercent",
            Self::CashRunway => "cashRunwayMonths",
            Self::HrCosts => "hrCostsPercent",
            Self::Cogs => "cogsPercent",
            Self::FixedCosts => "fixedCostsPercent",
            Self::Occupancy => "occupancyRatePercent",
            Self::Fte => "fte",
            Self::ReturnRate => "returnRatePercent",
            Self::Incidents => "incidentsPerMonth",
            Self::Absenteeism => "absenteeismRatePercent",
            Self::Turnover => "turnoverRatePercent",
            Self::Digitalization => "digitalizationPercent",
            Self::Loyalty => "loyaltyPercent",
            Self::Csat => "csatPercent",
            Self::Nps => "nps",
            Self::NbServices => "nbServices",
        }
    }

    pub(crate) const fn kind(self) -> FieldKind {
        match self {
            Self::BusinessName | Self::Sector | Self::Variant => FieldKind::Text,
            Self::NbServices => FieldKind::Count,
            _ => FieldKind::Number,
        }
    }

    const ALL: [TargetField; 21] = [
        TargetField::BusinessName,
        TargetField::Sector,
        TargetField::Variant,
        TargetField::AnnualRevenue,
        TargetField::GrossMargin,
        TargetField::NetMargin,
        TargetField::CashRunway,
        TargetField::HrCosts,
        TargetField::Cogs,
        TargetField::FixedCosts,
        TargetField::Occupancy,
        TargetField::Fte,
        TargetField::ReturnRate,
        TargetField::Incidents,
        TargetField::Absenteeism,
        TargetField::Turnover,
        TargetField::Digitalization,
        TargetField::Loyalty,
        TargetField::Csat,
        TargetField::Nps,
        TargetField::NbServices,
    ];
}

static FIELD_MAP: OnceLock<HashMap<String, TargetField>> = OnceLock::new();

pub(crate) fn field_for_normalized(normalized_name: &str) -> Option<TargetField> {
    field_map().get(normalized_name).copied()
}

fn field_map() -> &'static HashMap<String, TargetField> {
    FIELD_MAP.get_or_init(|| {
        const SYNONYMS: &[(&str, TargetField)] = &[
            // Identity
            ("nom_entreprise", TargetField::BusinessName),
            ("Nom de l'entreprise", TargetField::BusinessName),
            ("Raison sociale", TargetField::BusinessName),
            ("Entreprise", TargetField::BusinessName),
            ("secteur", TargetField::Sector),
            ("Secteur d'activité", TargetField::Sector),
            ("Activité", TargetField::Sector),
            ("variante", TargetField::Variant),
            ("Variante sectorielle", TargetField::Variant),
            // Finance
            ("ca_annuel", TargetField::AnnualRevenue),
            ("CA", TargetField::AnnualRevenue),
            ("CA HT", TargetField::AnnualRevenue),
            ("CA annuel HT", TargetField::AnnualRevenue),
            ("Chiffre d'affaires", TargetField::AnnualRevenue),
            ("Chiffre d'affaires annuel", TargetField::AnnualRevenue),
            ("Chiffre d'affaires HT", TargetField::AnnualRevenue),
            ("marge_brute", TargetField::GrossMargin),
            ("Marge brute", TargetField::GrossMargin),
            ("Taux de marge brute", TargetField::GrossMargin),
            ("marge_nette", TargetField::NetMargin),
            ("Marge nette", TargetField::NetMargin),
            ("Résultat net", TargetField::NetMargin),
            ("tresorerie_mois", TargetField::CashRunway),
            ("Trésorerie", TargetField::CashRunway),
            ("Trésorerie en mois", TargetField::CashRunway),
            ("Mois de trésorerie", TargetField::CashRunway),
            // Costs
            ("charges_rh", TargetField::HrCosts),
            ("Charges RH", TargetField::HrCosts),
            ("Masse salariale", TargetField::HrCosts),
            ("Charges de personnel", TargetField::HrCosts),
            ("achats", TargetField::Cogs),
            ("Achats consommés", TargetField::Cogs),
            ("Coût des achats", TargetField::Cogs),
            ("charges_fixes", TargetField::FixedCosts),
            ("Charges fixes", TargetField::FixedCosts),
            ("Frais fixes", TargetField::FixedCosts),
            // Operations
            ("taux_occupation", TargetField::Occupancy),
            ("Taux d'occupation", TargetField::Occupancy),
            ("Occupation", TargetField::Occupancy),
            ("Taux de remplissage", TargetField::Occupancy),
            ("etp", TargetField::Fte),
            ("ETP", TargetField::Fte),
            ("Effectif", TargetField::Fte),
            ("Effectif ETP", TargetField::Fte),
            ("Équivalents temps plein", TargetField::Fte),
            ("taux_retour", TargetField::ReturnRate),
            ("Taux de retour", TargetField::ReturnRate),
            ("incidents_mois", TargetField::Incidents),
            ("Incidents par mois", TargetField::Incidents),
            // Human resources
            ("absenteisme", TargetField::Absenteeism),
            ("Absentéisme", TargetField::Absenteeism),
            ("Taux d'absentéisme", TargetField::Absenteeism),
            ("turnover", TargetField::Turnover),
            ("Turn-over", TargetField::Turnover),
            ("Taux de rotation", TargetField::Turnover),
            // Commercial
            ("digitalisation", TargetField::Digitalization),
            ("Digitalisation", TargetField::Digitalization),
            ("Taux de digitalisation", TargetField::Digitalization),
            ("Part du digital", TargetField::Digitalization),
            ("fidelisation", TargetField::Loyalty),
            ("Fidélisation", TargetField::Loyalty),
            ("Taux de fidélisation", TargetField::Loyalty),
            ("Clients fidèles", TargetField::Loyalty),
            ("csat", TargetField::Csat),
            ("Satisfaction client", TargetField::Csat),
            ("nps", TargetField::Nps),
            ("Net Promoter Score", TargetField::Nps),
            ("nb_services", TargetField::NbServices),
            ("Nombre de services", TargetField::NbServices),
            ("Nombre de prestations", TargetField::NbServices),
        ];

        let mut map: HashMap<String, TargetField> = SYNONYMS
            .iter()
            .map(|(name, field)| (normalize_text(name), *field))
            .collect();
        for field in TargetField::ALL {
            map.entry(normalize_text(field.id())).or_insert(field);
        }
        map
    })
}

#[cfg(test)]
pub(crate) fn lookup_for_tests(name: &str) -> Option<TargetField> {
    field_for_normalized(&normalize_text(name))
}
