//! Resolution of free-text sector names to the canonical sectors used for
//! benchmark lookup.

mod normalizer;
mod synonyms;

pub(crate) use normalizer::normalize_text;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Canonical sectors with a benchmark set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Veterinaire,
    Restauration,
    Hotellerie,
    CommerceDetail,
    CoiffureEsthetique,
    ArtisanatBtp,
    ServicesConseil,
    SanteLiberale,
    Autre,
}

impl Sector {
    pub const ALL: [Sector; 9] = [
        Sector::Veterinaire,
        Sector::Restauration,
        Sector::Hotellerie,
        Sector::CommerceDetail,
        Sector::CoiffureEsthetique,
        Sector::ArtisanatBtp,
        Sector::ServicesConseil,
        Sector::SanteLiberale,
        Sector::Autre,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Veterinaire => "veterinaire",
            Self::Restauration => "restauration",
            Self::Hotellerie => "hotellerie",
            Self::CommerceDetail => "commerce_detail",
            Self::CoiffureEsthetique => "coiffure_esthetique",
            Self::ArtisanatBtp => "artisanat_btp",
            Self::ServicesConseil => "services_conseil",
            Self::SanteLiberale => "sante_liberale",
            Self::Autre => "autre",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Veterinaire => "Vétérinaire",
            Self::Restauration => "Restauration",
            Self::Hotellerie => "Hôtellerie",
            Self::CommerceDetail => "Commerce de détail",
            Self::CoiffureEsthetique => "Coiffure & esthétique",
            Self::ArtisanatBtp => "Artisanat & BTP",
            Self::ServicesConseil => "Services & conseil",
            Self::SanteLiberale => "Santé libérale",
            Self::Autre => "Autre secteur",
        }
    }

    /// Benchmark variants, the first one being the default.
    pub const fn variants(self) -> &'static [&'static str] {
        match self {
            Self::Veterinaire => &["veto_standard", "veto_rurale"],
            Self::Restauration => &["restaurant_traditionnel", "restauration_rapide"],
            _ => &["standard"],
        }
    }

    pub const fn default_variant(self) -> &'static str {
        match self {
            Self::Veterinaire => "veto_standard",
            Self::Restauration => "restaurant_traditionnel",
            _ => "standard",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sector| sector.id() == id)
    }
}

/// Outcome of sector resolution; always names a usable sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorResolution {
    pub sector: Sector,
    pub canonical_sector: &'static str,
    pub label: &'static str,
    pub is_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl SectorResolution {
    fn matched(sector: Sector) -> Self {
        Self {
            sector,
            canonical_sector: sector.id(),
            label: sector.label(),
            is_fallback: false,
            warning: None,
        }
    }

    fn fallback(warning: String) -> Self {
        Self {
            sector: Sector::Autre,
            canonical_sector: Sector::Autre.id(),
            label: Sector::Autre.label(),
            is_fallback: true,
            warning: Some(warning),
        }
    }
}

const MIN_SUBSTRING_LEN: usize = 3;

/// Map a declared sector to its canonical form, falling back to
/// [`Sector::Autre`] with a warning when nothing matches.
pub fn normalize_sector(raw: Option<&str>) -> SectorResolution {
    let raw = raw.unwrap_or_default();
    let normalized = normalize_text(raw);

    if normalized.is_empty() {
        debug!("no sector provided, using generic benchmarks");
        return SectorResolution::fallback(
            "Secteur non renseigné : référentiel générique utilisé".to_string(),
        );
    }

    if let Some(sector) = canonical_match(&normalized) {
        return SectorResolution::matched(sector);
    }

    if let Some(sector) = synonyms::exact_synonym(&normalized) {
        return SectorResolution::matched(sector);
    }

    if normalized.len() >= MIN_SUBSTRING_LEN {
        if let Some(sector) = canonical_substring(&normalized) {
            debug!(raw, sector = sector.id(), "sector resolved by partial canonical match");
            return SectorResolution::matched(sector);
        }
        if let Some(sector) = synonyms::substring_synonym(&normalized) {
            debug!(raw, sector = sector.id(), "sector resolved by partial match");
            return SectorResolution::matched(sector);
        }
    }

    warn!(raw, "unrecognized sector, using generic benchmarks");
    SectorResolution::fallback(format!(
        "Secteur « {} » non reconnu : référentiel générique utilisé",
        raw.trim()
    ))
}

fn canonical_match(normalized: &str) -> Option<Sector> {
    Sector::ALL.into_iter().find(|sector| {
        normalize_text(sector.id()) == normalized || normalize_text(sector.label()) == normalized
    })
}

/// Partial match on canonical ids and labels. `Autre` is only reachable by
/// an exact match or the fallback.
fn canonical_substring(normalized: &str) -> Option<Sector> {
    Sector::ALL
        .into_iter()
        .filter(|sector| *sector != Sector::Autre)
        .find(|sector| {
            [normalize_text(sector.id()), normalize_text(sector.label())]
                .iter()
                .any(|key| normalized.contains(key.as_str()) || key.contains(normalized))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_ids_and_labels_match_without_warning() {
        let resolution = normalize_sector(Some("Veterinaire"));
        assert_eq!(resolution.sector, Sector::Veterinaire);
        assert!(!resolution.is_fallback);
        assert!(resolution.warning.is_none());

        assert_eq!(
            normalize_sector(Some("commerce_detail")).sector,
            Sector::CommerceDetail
        );
        assert_eq!(
            normalize_sector(Some("Coiffure & Esthétique")).sector,
            Sector::CoiffureEsthetique
        );
    }

    #[test]
    fn informal_accented_name_resolves_like_canonical() {
        let informal = normalize_sector(Some("véto"));
        let canonical = normalize_sector(Some("Veterinaire"));
        assert_eq!(informal.sector, canonical.sector);
        assert!(!informal.is_fallback);
    }

    #[test]
    fn substring_match_uses_declaration_order() {
        assert_eq!(
            normalize_sector(Some("Clinique vétérinaire des Lilas")).sector,
            Sector::Veterinaire
        );
        assert_eq!(
            normalize_sector(Some("Pizzeria Da Marco")).sector,
            Sector::Restauration
        );
        assert_eq!(normalize_sector(Some("hôt")).sector, Sector::Hotellerie);
    }

    #[test]
    fn qualified_canonical_names_keep_their_sector() {
        for (raw, expected) in [
            ("Restauration rapide", Sector::Restauration),
            ("Restauration traditionnelle", Sector::Restauration),
            ("Vétérinaire rural", Sector::Veterinaire),
            ("Hôpital vétérinaire", Sector::Veterinaire),
            ("Hôtellerie de plein air", Sector::Hotellerie),
            ("Santé libérale en cabinet", Sector::SanteLiberale),
        ] {
            let resolution = normalize_sector(Some(raw));
            assert_eq!(resolution.sector, expected, "{raw}");
            assert!(!resolution.is_fallback, "{raw}");
        }
    }

    #[test]
    fn generic_sector_is_not_matched_partially() {
        let resolution = normalize_sector(Some("Autres activités"));
        assert!(resolution.is_fallback);
        assert_eq!(resolution.sector, Sector::Autre);
    }

    #[test]
    fn empty_input_falls_back_with_warning() {
        for raw in [None, Some(""), Some("   ")] {
            let resolution = normalize_sector(raw);
            assert_eq!(resolution.sector, Sector::Autre);
            assert!(resolution.is_fallback);
            assert!(resolution
                .warning
                .as_deref()
                .is_some_and(|warning| warning.contains("non renseigné")));
        }
    }

    #[test]
    fn unknown_sector_names_the_raw_text() {
        let resolution = normalize_sector(Some("Astrophysique"));
        assert_eq!(resolution.sector, Sector::Autre);
        assert!(resolution.is_fallback);
        assert!(resolution
            .warning
            .as_deref()
            .is_some_and(|warning| warning.contains("Astrophysique")));
    }

    #[test]
    fn short_fragments_skip_substring_matching() {
        let resolution = normalize_sector(Some("ve"));
        assert!(resolution.is_fallback);
    }

    #[test]
    fn synonym_table_normalizes_its_keys() {
        assert_eq!(
            synonyms::lookup_for_tests("Chambre d’hôte"),
            Some(Sector::Hotellerie)
        );
        assert_eq!(
            synonyms::lookup_for_tests("KINÉSITHÉRAPEUTE"),
            Some(Sector::SanteLiberale)
        );
    }

    #[test]
    fn every_sector_declares_its_default_variant_first() {
        for sector in Sector::ALL {
            assert_eq!(sector.variants()[0], sector.default_variant());
            assert_eq!(Sector::from_id(sector.id()), Some(sector));
        }
    }
}
