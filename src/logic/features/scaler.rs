//! Standard Scaler
//!
//! Per-column standardization: `(value - mean) / std`.
//! Population std (ddof = 0). Zero-variance columns keep a scale of 1.

use ndarray::{Array1, Array2, ArrayView2, Axis};
use thiserror::Error;

use crate::logic::dataset::{CompanyRecord, INDICATOR_COUNT};

#[derive(Debug, Error, PartialEq)]
pub enum ScalerError {
    #[error("cannot fit a scaler on an empty matrix")]
    Empty,

    #[error("non-finite value at row {row}, column {column}")]
    NonFinite { row: usize, column: usize },

    #[error("expected {expected} columns, got {actual}")]
    ColumnMismatch { expected: usize, actual: usize },
}

/// Fitted scaling parameters, retained alongside the scaled matrix
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    /// Compute per-column mean and std
    pub fn fit(x: ArrayView2<f64>) -> Result<Self, ScalerError> {
        if x.nrows() == 0 || x.ncols() == 0 {
            return Err(ScalerError::Empty);
        }
        if let Some(((row, column), _)) = x.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ScalerError::NonFinite { row, column });
        }

        let mean = x.mean_axis(Axis(0)).ok_or(ScalerError::Empty)?;
        let scale = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > f64::EPSILON { s } else { 1.0 });

        Ok(Self { mean, scale })
    }

    /// Standardize a matrix with the fitted parameters
    pub fn transform(&self, x: ArrayView2<f64>) -> Result<Array2<f64>, ScalerError> {
        if x.ncols() != self.mean.len() {
            return Err(ScalerError::ColumnMismatch {
                expected: self.mean.len(),
                actual: x.ncols(),
            });
        }
        Ok((&x - &self.mean) / &self.scale)
    }

    pub fn fit_transform(x: ArrayView2<f64>) -> Result<(Self, Array2<f64>), ScalerError> {
        let scaler = Self::fit(x)?;
        let scaled = scaler.transform(x)?;
        Ok((scaler, scaled))
    }

    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn scale(&self) -> &Array1<f64> {
        &self.scale
    }
}

/// Build the raw feature matrix (name and label columns dropped)
pub fn feature_matrix(records: &[CompanyRecord]) -> Array2<f64> {
    let mut x = Array2::<f64>::zeros((records.len(), INDICATOR_COUNT));
    for (mut row, record) in x.axis_iter_mut(Axis(0)).zip(records) {
        for (cell, value) in row.iter_mut().zip(record.indicators.as_array()) {
            *cell = value;
        }
    }
    x
}
