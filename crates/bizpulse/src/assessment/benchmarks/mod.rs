//! Static sector benchmark thresholds.

mod table;

use super::sector::Sector;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// How a metric value compares to its thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricUnit {
    /// Fraction where higher is better (percent input divided by 100).
    Ratio,
    /// Fraction where lower is better.
    InverseRatio,
    /// Absolute currency amount.
    Amount,
    /// Raw percentage, 0-100.
    Percentage,
}

impl MetricUnit {
    pub const fn lower_is_better(self) -> bool {
        matches!(self, Self::InverseRatio)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    MargeBrute,
    CaParEtp,
    RatioRh,
    MargeNette,
    Digitalisation,
    Fidelisation,
    SatisfactionClient,
}

impl MetricKey {
    pub const ALL: [MetricKey; 7] = [
        MetricKey::MargeBrute,
        MetricKey::CaParEtp,
        MetricKey::RatioRh,
        MetricKey::MargeNette,
        MetricKey::Digitalisation,
        MetricKey::Fidelisation,
        MetricKey::SatisfactionClient,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Self::MargeBrute => "marge_brute",
            Self::CaParEtp => "ca_par_etp",
            Self::RatioRh => "ratio_rh",
            Self::MargeNette => "marge_nette",
            Self::Digitalisation => "digitalisation",
            Self::Fidelisation => "fidelisation",
            Self::SatisfactionClient => "satisfaction_client",
        }
    }

    pub const fn unit(self) -> MetricUnit {
        match self {
            Self::MargeBrute | Self::MargeNette => MetricUnit::Ratio,
            Self::CaParEtp => MetricUnit::Amount,
            Self::RatioRh => MetricUnit::InverseRatio,
            Self::Digitalisation | Self::Fidelisation | Self::SatisfactionClient => {
                MetricUnit::Percentage
            }
        }
    }
}

/// Step breakpoints; increasing for normal metrics, decreasing for inverse ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub critical: f64,
    pub good: f64,
    pub excellent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricBenchmark {
    pub unit: MetricUnit,
    pub thresholds: Thresholds,
}

/// Thresholds for every scored metric of one (sector, variant) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkSet {
    pub sector: Sector,
    pub variant: &'static str,
    pub metrics: [(MetricKey, MetricBenchmark); 7],
}

impl BenchmarkSet {
    pub fn metric(&self, key: MetricKey) -> &MetricBenchmark {
        // The table is built from MetricKey::ALL, so each key sits at its own index.
        &self.metrics[key as usize].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, &MetricBenchmark)> {
        self.metrics.iter().map(|(key, benchmark)| (*key, benchmark))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BenchmarkError {
    #[error("no benchmark set for sector '{0}'")]
    UnknownSector(String),
    #[error("sector '{sector}' has no benchmark variant '{variant}'")]
    UnknownVariant { sector: String, variant: String },
}

/// Read-only lookup over the static benchmark table.
#[derive(Debug)]
pub struct BenchmarkRepository {
    sets: HashMap<(Sector, &'static str), BenchmarkSet>,
}

static STANDARD_REPOSITORY: OnceLock<BenchmarkRepository> = OnceLock::new();

impl BenchmarkRepository {
    /// Shared repository holding the built-in sector table.
    pub fn standard() -> &'static BenchmarkRepository {
        STANDARD_REPOSITORY.get_or_init(|| {
            let sets = table::standard_sets()
                .into_iter()
                .map(|set| ((set.sector, set.variant), set))
                .collect();
            BenchmarkRepository { sets }
        })
    }

    /// Look up thresholds by canonical sector id; `None` selects the sector default variant.
    pub fn lookup(
        &self,
        sector_id: &str,
        variant: Option<&str>,
    ) -> Result<&BenchmarkSet, BenchmarkError> {
        let sector = Sector::from_id(sector_id)
            .ok_or_else(|| BenchmarkError::UnknownSector(sector_id.to_string()))?;
        self.for_sector(sector, variant)
    }

    pub fn for_sector(
        &self,
        sector: Sector,
        variant: Option<&str>,
    ) -> Result<&BenchmarkSet, BenchmarkError> {
        let variant = variant.unwrap_or(sector.default_variant());
        sector
            .variants()
            .iter()
            .find(|known| **known == variant)
            .and_then(|known| self.sets.get(&(sector, *known)))
            .ok_or_else(|| BenchmarkError::UnknownVariant {
                sector: sector.id().to_string(),
                variant: variant.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_declared_variant_has_a_set() {
        let repository = BenchmarkRepository::standard();
        for sector in Sector::ALL {
            for variant in sector.variants() {
                let set = repository
                    .for_sector(sector, Some(variant))
                    .expect("variant declared in table");
                assert_eq!(set.variant, *variant);
            }
        }
        let declared: usize = Sector::ALL.iter().map(|s| s.variants().len()).sum();
        assert_eq!(repository.len(), declared);
    }

    #[test]
    fn missing_variant_uses_sector_default() {
        let set = BenchmarkRepository::standard()
            .lookup("veterinaire", None)
            .expect("default variant");
        assert_eq!(set.variant, "veto_standard");
        let margin = set.metric(MetricKey::MargeBrute);
        assert_eq!(margin.unit, MetricUnit::Ratio);
        assert_eq!(margin.thresholds.critical, 0.55);
        assert_eq!(margin.thresholds.good, 0.70);
        assert_eq!(margin.thresholds.excellent, 0.75);
    }

    #[test]
    fn unknown_sector_is_a_lookup_error() {
        let error = BenchmarkRepository::standard()
            .lookup("Vétérinaire", None)
            .expect_err("labels are not canonical ids");
        assert_eq!(error, BenchmarkError::UnknownSector("Vétérinaire".to_string()));
    }

    #[test]
    fn unknown_variant_is_a_lookup_error() {
        let error = BenchmarkRepository::standard()
            .lookup("restauration", Some("veto_standard"))
            .expect_err("variant belongs to another sector");
        assert!(matches!(error, BenchmarkError::UnknownVariant { .. }));
    }

    #[test]
    fn thresholds_are_ordered_in_metric_direction() {
        let repository = BenchmarkRepository::standard();
        for sector in Sector::ALL {
            for variant in sector.variants() {
                let set = repository.for_sector(sector, Some(variant)).expect("set");
                for (key, benchmark) in set.iter() {
                    assert_eq!(benchmark.unit, key.unit());
                    let t = benchmark.thresholds;
                    if benchmark.unit.lower_is_better() {
                        assert!(t.critical > t.good && t.good > t.excellent, "{key:?}");
                    } else {
                        assert!(t.critical < t.good && t.good < t.excellent, "{key:?}");
                    }
                }
            }
        }
    }
}
