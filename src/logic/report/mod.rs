//! Report Module - Top-N Risk Report
//!
//! Features:
//! - Top-N selection by risk probability
//! - Sequential narrative generation
//! - Word (.docx) serialization

pub mod assembler;
pub mod docx;


use thiserror::Error;

pub use assembler::{build_report, select_top_n, DEFAULT_TOP_N};
pub use docx::write_docx;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot serialize report: {0}")]
    Serialize(String),
}
