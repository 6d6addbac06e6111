use super::{BenchmarkSet, MetricBenchmark, MetricKey, Thresholds};
use crate::assessment::sector::Sector;

type Triple = (f64, f64, f64);

/// One row of the sector table, thresholds listed as (critical, good, excellent).
struct Row {
    sector: Sector,
    variant: &'static str,
    marge_brute: Triple,
    ca_par_etp: Triple,
    ratio_rh: Triple,
    marge_nette: Triple,
    digitalisation: Triple,
    fidelisation: Triple,
}

const SATISFACTION_CLIENT: Triple = (70.0, 80.0, 90.0);

const ROWS: &[Row] = &[
    Row {
        sector: Sector::Veterinaire,
        variant: "veto_standard",
        marge_brute: (0.55, 0.70, 0.75),
        ca_par_etp: (90_000.0, 120_000.0, 150_000.0),
        ratio_rh: (0.50, 0.42, 0.38),
        marge_nette: (0.03, 0.08, 0.12),
        digitalisation: (40.0, 60.0, 80.0),
        fidelisation: (60.0, 75.0, 85.0),
    },
    Row {
        sector: Sector::Veterinaire,
        variant: "veto_rurale",
        marge_brute: (0.45, 0.60, 0.68),
        ca_par_etp: (80_000.0, 105_000.0, 130_000.0),
        ratio_rh: (0.48, 0.40, 0.35),
        marge_nette: (0.03, 0.08, 0.12),
        digitalisation: (30.0, 50.0, 70.0),
        fidelisation: (65.0, 80.0, 90.0),
    },
    Row {
        sector: Sector::Restauration,
        variant: "restaurant_traditionnel",
        marge_brute: (0.60, 0.68, 0.72),
        ca_par_etp: (50_000.0, 65_000.0, 80_000.0),
        ratio_rh: (0.42, 0.35, 0.30),
        marge_nette: (0.02, 0.06, 0.10),
        digitalisation: (30.0, 50.0, 70.0),
        fidelisation: (40.0, 55.0, 70.0),
    },
    Row {
        sector: Sector::Restauration,
        variant: "restauration_rapide",
        marge_brute: (0.62, 0.70, 0.75),
        ca_par_etp: (60_000.0, 80_000.0, 100_000.0),
        ratio_rh: (0.35, 0.28, 0.24),
        marge_nette: (0.03, 0.07, 0.11),
        digitalisation: (50.0, 70.0, 85.0),
        fidelisation: (30.0, 45.0, 60.0),
    },
    Row {
        sector: Sector::Hotellerie,
        variant: "standard",
        marge_brute: (0.65, 0.75, 0.82),
        ca_par_etp: (55_000.0, 70_000.0, 90_000.0),
        ratio_rh: (0.40, 0.33, 0.28),
        marge_nette: (0.03, 0.07, 0.12),
        digitalisation: (50.0, 70.0, 85.0),
        fidelisation: (25.0, 40.0, 55.0),
    },
    Row {
        sector: Sector::CommerceDetail,
        variant: "standard",
        marge_brute: (0.25, 0.35, 0.45),
        ca_par_etp: (120_000.0, 180_000.0, 250_000.0),
        ratio_rh: (0.25, 0.18, 0.14),
        marge_nette: (0.01, 0.04, 0.07),
        digitalisation: (35.0, 55.0, 75.0),
        fidelisation: (35.0, 50.0, 65.0),
    },
    Row {
        sector: Sector::CoiffureEsthetique,
        variant: "standard",
        marge_brute: (0.70, 0.80, 0.85),
        ca_par_etp: (45_000.0, 60_000.0, 75_000.0),
        ratio_rh: (0.55, 0.48, 0.42),
        marge_nette: (0.03, 0.08, 0.12),
        digitalisation: (40.0, 60.0, 80.0),
        fidelisation: (55.0, 70.0, 80.0),
    },
    Row {
        sector: Sector::ArtisanatBtp,
        variant: "standard",
        marge_brute: (0.35, 0.45, 0.55),
        ca_par_etp: (80_000.0, 110_000.0, 140_000.0),
        ratio_rh: (0.45, 0.38, 0.32),
        marge_nette: (0.02, 0.05, 0.08),
        digitalisation: (20.0, 40.0, 60.0),
        fidelisation: (40.0, 55.0, 70.0),
    },
    Row {
        sector: Sector::ServicesConseil,
        variant: "standard",
        marge_brute: (0.60, 0.75, 0.85),
        ca_par_etp: (90_000.0, 130_000.0, 180_000.0),
        ratio_rh: (0.60, 0.50, 0.42),
        marge_nette: (0.05, 0.10, 0.15),
        digitalisation: (50.0, 70.0, 85.0),
        fidelisation: (50.0, 65.0, 80.0),
    },
    Row {
        sector: Sector::SanteLiberale,
        variant: "standard",
        marge_brute: (0.70, 0.80, 0.88),
        ca_par_etp: (80_000.0, 110_000.0, 140_000.0),
        ratio_rh: (0.40, 0.32, 0.26),
        marge_nette: (0.10, 0.20, 0.30),
        digitalisation: (40.0, 60.0, 80.0),
        fidelisation: (60.0, 75.0, 85.0),
    },
    Row {
        sector: Sector::Autre,
        variant: "standard",
        marge_brute: (0.30, 0.45, 0.60),
        ca_par_etp: (60_000.0, 90_000.0, 120_000.0),
        ratio_rh: (0.45, 0.38, 0.30),
        marge_nette: (0.02, 0.06, 0.10),
        digitalisation: (30.0, 50.0, 70.0),
        fidelisation: (40.0, 60.0, 75.0),
    },
];

pub(super) fn standard_sets() -> Vec<BenchmarkSet> {
    ROWS.iter().map(Row::to_set).collect()
}

impl Row {
    fn to_set(&self) -> BenchmarkSet {
        let metrics = MetricKey::ALL.map(|key| {
            let (critical, good, excellent) = match key {
                MetricKey::MargeBrute => self.marge_brute,
                MetricKey::CaParEtp => self.ca_par_etp,
                MetricKey::RatioRh => self.ratio_rh,
                MetricKey::MargeNette => self.marge_nette,
                MetricKey::Digitalisation => self.digitalisation,
                MetricKey::Fidelisation => self.fidelisation,
                MetricKey::SatisfactionClient => SATISFACTION_CLIENT,
            };
            (
                key,
                MetricBenchmark {
                    unit: key.unit(),
                    thresholds: Thresholds {
                        critical,
                        good,
                        excellent,
                    },
                },
            )
        });

        BenchmarkSet {
            sector: self.sector,
            variant: self.variant,
            metrics,
        }
    }
}
