//! Shared test portfolio

use super::types::{CompanyRecord, FinancialIndicators};

pub fn company(name: &str, values: [f64; 6], at_risk: bool) -> CompanyRecord {
    CompanyRecord {
        name: name.to_string(),
        indicators: FinancialIndicators {
            revenue: values[0],
            loss_ratio: values[1],
            solvency_ratio: values[2],
            liquidity_ratio: values[3],
            branch_count: values[4] as u32,
            investment_yield: values[5],
        },
        at_risk,
    }
}

/// Twelve companies; the risky ones have high loss ratio and low solvency
pub fn sample_portfolio() -> Vec<CompanyRecord> {
    vec![
        company("Assur Atlantique", [4_200_000.0, 52.0, 165.0, 110.0, 24.0, 5.1], false),
        company("Sahel Garantie", [850_000.0, 91.0, 78.0, 45.0, 4.0, 1.3], true),
        company("Baobab Mutuelle", [2_100_000.0, 61.0, 140.0, 95.0, 15.0, 4.2], false),
        company("Lagune Assurances", [640_000.0, 88.0, 82.0, 50.0, 6.0, 1.9], true),
        company("Savane Vie", [3_300_000.0, 48.0, 180.0, 120.0, 30.0, 5.8], false),
        company("Delta Prévoyance", [410_000.0, 97.0, 65.0, 38.0, 3.0, 0.8], true),
        company("Niger Re", [5_000_000.0, 55.0, 150.0, 105.0, 28.0, 4.9], false),
        company("Côte Sûre", [720_000.0, 85.0, 90.0, 55.0, 7.0, 2.1], true),
        company("Harmattan IARD", [1_800_000.0, 63.0, 132.0, 88.0, 12.0, 3.9], false),
        company("Kora Assurances", [530_000.0, 94.0, 72.0, 42.0, 5.0, 1.1], true),
        company("Volta Garantie", [2_700_000.0, 58.0, 155.0, 100.0, 20.0, 4.6], false),
        company("Mono Mutuelle", [390_000.0, 99.0, 60.0, 35.0, 2.0, 0.6], true),
    ]
}
