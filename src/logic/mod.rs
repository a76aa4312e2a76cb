//! Logic Module - Scoring and Reporting Core
//!
//! Structure:
//! - dataset/   : Workbook schema + typed records
//! - features/  : Standardization
//! - model/     : Random forest classifier
//! - explain/   : Indicator importance
//! - scoring    : Single fit + predict pass
//! - narrative/ : AI commentary (external text generation)
//! - report/    : Top-N report assembly + .docx output
//! - session    : Owned application state

pub mod dataset;
pub mod features;
pub mod model;
pub mod explain;
pub mod format;
pub mod scoring;
pub mod narrative;
pub mod report;
pub mod session;

pub use session::{GeneratedReport, Session};
