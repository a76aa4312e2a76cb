//! Dataset Module - Company Records
//!
//! Fixed-schema workbook → typed records.
//! The schema lives in `layout`, checked once at load time.

pub mod layout;
pub mod types;
pub mod loader;

#[cfg(test)]
pub(crate) mod fixtures;


pub use layout::{indicator_label, indicator_name, INDICATOR_COUNT};
pub use types::{CompanyRecord, DatasetError, FinancialIndicators};
pub use loader::load_companies;
