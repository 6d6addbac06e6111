use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::assessment::benchmarks::{BenchmarkRepository, BenchmarkSet};
use crate::assessment::domain::{
    AuditRecord, Commercial, Costs, DataOrigin, Finance, HumanResources, Operations,
    Productivity, Quality, Satisfaction, Scores,
};
use crate::assessment::sector::Sector;
use crate::assessment::{assessment_router, AssessmentEngine, AuditInput};

/// Veterinary clinic with only the mandatory inputs plus loyalty and services.
pub(super) fn golden_record() -> AuditRecord {
    AuditInput::from(AuditRecord {
        business_name: "Clinique des Tilleuls".to_string(),
        sector: "Veterinaire".to_string(),
        variant: Some("veto_standard".to_string()),
        data_origin: DataOrigin::Manual,
        finance: Finance {
            annual_revenue: 450_000.0,
            gross_margin_percent: 68.0,
            net_margin_percent: None,
            cash_runway_months: None,
        },
        costs: Costs {
            hr_costs_percent: 52.0,
            cogs_percent: None,
            fixed_costs_percent: None,
        },
        ops: Operations {
            occupancy_rate_percent: 85.0,
            productivity: Productivity {
                fte: 4.5,
                revenue_per_fte: None,
            },
            quality: None,
        },
        hr: None,
        commercial: Commercial {
            digitalization_percent: 85.0,
            loyalty_percent: Some(88.0),
            satisfaction: None,
        },
        nb_services: Some(5),
    })
    .into_record()
}

/// Same clinic with every optional input filled in.
pub(super) fn complete_record() -> AuditRecord {
    let mut record = golden_record();
    record.finance.net_margin_percent = Some(10.0);
    record.finance.cash_runway_months = Some(4.0);
    record.costs.cogs_percent = Some(30.0);
    record.costs.fixed_costs_percent = Some(20.0);
    record.ops.quality = Some(Quality {
        return_rate_percent: Some(3.0),
        incidents_per_month: Some(2.0),
    });
    record.hr = Some(HumanResources {
        absenteeism_rate_percent: Some(5.0),
        turnover_rate_percent: Some(12.0),
    });
    record.commercial.satisfaction = Some(Satisfaction {
        csat_percent: Some(85.0),
        nps: Some(40.0),
    });
    record
}

/// Struggling business that trips most rules.
pub(super) fn distressed_record() -> AuditRecord {
    AuditInput::from(AuditRecord {
        business_name: "Atelier Moreau".to_string(),
        sector: "veterinaire".to_string(),
        variant: None,
        data_origin: DataOrigin::ClientDeclared,
        finance: Finance {
            annual_revenue: 200_000.0,
            gross_margin_percent: 40.0,
            net_margin_percent: Some(-5.0),
            cash_runway_months: Some(2.0),
        },
        costs: Costs {
            hr_costs_percent: 55.0,
            cogs_percent: None,
            fixed_costs_percent: None,
        },
        ops: Operations {
            occupancy_rate_percent: 60.0,
            productivity: Productivity {
                fte: 4.0,
                revenue_per_fte: None,
            },
            quality: Some(Quality {
                return_rate_percent: Some(12.0),
                incidents_per_month: None,
            }),
        },
        hr: Some(HumanResources {
            absenteeism_rate_percent: Some(14.0),
            turnover_rate_percent: Some(35.0),
        }),
        commercial: Commercial {
            digitalization_percent: 20.0,
            loyalty_percent: Some(50.0),
            satisfaction: Some(Satisfaction {
                csat_percent: Some(60.0),
                nps: Some(-10.0),
            }),
        },
        nb_services: Some(2),
    })
    .into_record()
}

pub(super) fn veto_standard() -> &'static BenchmarkSet {
    BenchmarkRepository::standard()
        .for_sector(Sector::Veterinaire, Some("veto_standard"))
        .expect("veterinary benchmarks present")
}

pub(super) fn scores(
    global: f64,
    financier: f64,
    operationnel: f64,
    commercial: f64,
    strategique: f64,
) -> Scores {
    Scores {
        global,
        financier,
        operationnel,
        commercial,
        strategique,
    }
}

pub(super) fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

pub(super) fn router() -> axum::Router {
    assessment_router(Arc::new(AssessmentEngine::new()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
