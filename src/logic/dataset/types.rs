//! Dataset Types
//!
//! Typed company records, validated once at load time.

use serde::Serialize;
use thiserror::Error;

use super::layout::INDICATOR_COUNT;

// ============================================================================
// RECORDS
// ============================================================================

/// The six financial indicators of one company
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancialIndicators {
    pub revenue: f64,
    pub loss_ratio: f64,
    pub solvency_ratio: f64,
    pub liquidity_ratio: f64,
    pub branch_count: u32,
    pub investment_yield: f64,
}

impl FinancialIndicators {
    /// Feature-matrix row, in layout order
    pub fn as_array(&self) -> [f64; INDICATOR_COUNT] {
        [
            self.revenue,
            self.loss_ratio,
            self.solvency_ratio,
            self.liquidity_ratio,
            self.branch_count as f64,
            self.investment_yield,
        ]
    }
}

/// One row of the workbook
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyRecord {
    pub name: String,
    pub indicators: FinancialIndicators,
    /// Ground-truth flag used as the training label
    pub at_risk: bool,
}

impl CompanyRecord {
    pub fn label(&self) -> u8 {
        u8::from(self.at_risk)
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Fatal input errors. Row numbers are 1-based worksheet rows.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot open workbook {path}: {reason}")]
    Open { path: String, reason: String },

    #[error("workbook {0} has no worksheet")]
    NoWorksheet(String),

    #[error("worksheet has no header row")]
    MissingHeader,

    #[error("required column '{0}' is missing")]
    MissingColumn(&'static str),

    #[error("column '{0}' appears more than once")]
    DuplicateColumn(String),

    #[error("unexpected column '{0}'")]
    UnexpectedColumn(String),

    #[error("dataset has no data rows")]
    Empty,

    #[error("row {row}: column '{column}' is empty")]
    MissingValue { row: usize, column: &'static str },

    #[error("row {row}: column '{column}' is not numeric ({value})")]
    NonNumeric {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: column '{column}' has invalid value {value}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: label must be 0 or 1, got {value}")]
    NonBinaryLabel { row: usize, value: String },
}
