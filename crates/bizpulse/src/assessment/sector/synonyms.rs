use super::normalizer::normalize_text;
use super::Sector;
use std::sync::OnceLock;

static SECTOR_SYNONYMS: OnceLock<Vec<(String, Sector)>> = OnceLock::new();

/// Synonym table in declaration order; substring matching walks it front to back.
pub(crate) fn sector_synonyms() -> &'static [(String, Sector)] {
    SECTOR_SYNONYMS.get_or_init(|| {
        const SYNONYMS: &[(&str, Sector)] = &[
            // Vétérinaire
            ("veterinaires", Sector::Veterinaire),
            ("veto", Sector::Veterinaire),
            ("vetos", Sector::Veterinaire),
            ("clinique veterinaire", Sector::Veterinaire),
            ("cabinet veterinaire", Sector::Veterinaire),
            ("veterinary", Sector::Veterinaire),
            ("soins animaux", Sector::Veterinaire),
            // Restauration
            ("restaurant", Sector::Restauration),
            ("restaurants", Sector::Restauration),
            ("brasserie", Sector::Restauration),
            ("bistrot", Sector::Restauration),
            ("pizzeria", Sector::Restauration),
            ("traiteur", Sector::Restauration),
            ("fast food", Sector::Restauration),
            ("crêperie", Sector::Restauration),
            // Hôtellerie
            ("hôtel", Sector::Hotellerie),
            ("hôtels", Sector::Hotellerie),
            ("hébergement", Sector::Hotellerie),
            ("chambre d'hôte", Sector::Hotellerie),
            ("chambres d'hôtes", Sector::Hotellerie),
            ("gîte", Sector::Hotellerie),
            ("camping", Sector::Hotellerie),
            // Commerce
            ("commerce", Sector::CommerceDetail),
            ("boutique", Sector::CommerceDetail),
            ("magasin", Sector::CommerceDetail),
            ("retail", Sector::CommerceDetail),
            ("épicerie", Sector::CommerceDetail),
            ("e-commerce", Sector::CommerceDetail),
            ("commerce de détail", Sector::CommerceDetail),
            // Coiffure & esthétique
            ("coiffure", Sector::CoiffureEsthetique),
            ("coiffeur", Sector::CoiffureEsthetique),
            ("salon de coiffure", Sector::CoiffureEsthetique),
            ("esthétique", Sector::CoiffureEsthetique),
            ("institut de beauté", Sector::CoiffureEsthetique),
            ("barbier", Sector::CoiffureEsthetique),
            ("onglerie", Sector::CoiffureEsthetique),
            // Artisanat & BTP
            ("artisan", Sector::ArtisanatBtp),
            ("artisanat", Sector::ArtisanatBtp),
            ("btp", Sector::ArtisanatBtp),
            ("bâtiment", Sector::ArtisanatBtp),
            ("plombier", Sector::ArtisanatBtp),
            ("électricien", Sector::ArtisanatBtp),
            ("menuisier", Sector::ArtisanatBtp),
            ("maçonnerie", Sector::ArtisanatBtp),
            // Services & conseil
            ("conseil", Sector::ServicesConseil),
            ("consulting", Sector::ServicesConseil),
            ("consultant", Sector::ServicesConseil),
            ("agence", Sector::ServicesConseil),
            ("expert comptable", Sector::ServicesConseil),
            ("services aux entreprises", Sector::ServicesConseil),
            // Santé libérale
            ("santé", Sector::SanteLiberale),
            ("médecin", Sector::SanteLiberale),
            ("cabinet médical", Sector::SanteLiberale),
            ("kiné", Sector::SanteLiberale),
            ("kinésithérapeute", Sector::SanteLiberale),
            ("dentiste", Sector::SanteLiberale),
            ("infirmier", Sector::SanteLiberale),
            ("ostéopathe", Sector::SanteLiberale),
        ];

        SYNONYMS
            .iter()
            .map(|(name, sector)| (normalize_text(name), *sector))
            .collect()
    })
}

pub(crate) fn exact_synonym(normalized: &str) -> Option<Sector> {
    sector_synonyms()
        .iter()
        .find(|(key, _)| key == normalized)
        .map(|(_, sector)| *sector)
}

pub(crate) fn substring_synonym(normalized: &str) -> Option<Sector> {
    sector_synonyms()
        .iter()
        .find(|(key, _)| normalized.contains(key.as_str()) || key.contains(normalized))
        .map(|(_, sector)| *sector)
}

#[cfg(test)]
pub(crate) fn lookup_for_tests(name: &str) -> Option<Sector> {
    exact_synonym(&normalize_text(name))
}
