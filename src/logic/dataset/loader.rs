//! Workbook Loader
//!
//! Reads the first worksheet and validates it against the layout.
//! Any schema or cell problem is fatal: the whole load fails.

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use super::layout::{
    required_columns, INDICATOR_COUNT, INDICATOR_LAYOUT, LABEL_COLUMN, NAME_COLUMN,
    BRANCH_COUNT_INDEX,
};
use super::types::{CompanyRecord, DatasetError, FinancialIndicators};

// ============================================================================
// ENTRY POINT
// ============================================================================

/// Load every company from the workbook at `path`
pub fn load_companies(path: &Path) -> Result<Vec<CompanyRecord>, DatasetError> {
    let shown = path.display().to_string();
    tracing::info!("Loading dataset from: {}", shown);

    let mut workbook = open_workbook_auto(path).map_err(|e| DatasetError::Open {
        path: shown.clone(),
        reason: e.to_string(),
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DatasetError::NoWorksheet(shown.clone()))?
        .map_err(|e| DatasetError::Open {
            path: shown.clone(),
            reason: e.to_string(),
        })?;

    // Range skips leading blank rows; keep worksheet numbering in errors
    let header_row = range.start().map_or(1, |(row, _)| row as usize + 1);
    let rows: Vec<Vec<Data>> = range.rows().map(|r| r.to_vec()).collect();
    let records = parse_sheet(&rows, header_row)?;

    tracing::info!("Loaded {} companies from {}", records.len(), shown);
    Ok(records)
}

// ============================================================================
// SCHEMA
// ============================================================================

/// Column positions resolved from the header row
#[derive(Debug)]
struct ColumnMap {
    name: usize,
    label: usize,
    indicators: [usize; INDICATOR_COUNT],
}

fn resolve_columns(header: &[Data]) -> Result<ColumnMap, DatasetError> {
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (i, cell) in header.iter().enumerate() {
        let name = match cell {
            Data::Empty => continue,
            Data::String(s) => s.trim().to_string(),
            other => cell_text(other),
        };
        if name.is_empty() {
            continue;
        }
        if positions.insert(name.clone(), i).is_some() {
            return Err(DatasetError::DuplicateColumn(name));
        }
    }

    let known: Vec<&str> = required_columns().collect();
    if let Some(extra) = positions.keys().find(|k| !known.contains(&k.as_str())) {
        return Err(DatasetError::UnexpectedColumn(extra.clone()));
    }

    let find = |column: &'static str| -> Result<usize, DatasetError> {
        positions
            .get(column)
            .copied()
            .ok_or(DatasetError::MissingColumn(column))
    };

    let mut indicators = [0usize; INDICATOR_COUNT];
    for (slot, column) in indicators.iter_mut().zip(INDICATOR_LAYOUT) {
        *slot = find(column)?;
    }

    Ok(ColumnMap {
        name: find(NAME_COLUMN)?,
        label: find(LABEL_COLUMN)?,
        indicators,
    })
}

// ============================================================================
// PARSING
// ============================================================================

/// Parse a worksheet (header row first) into typed records.
/// `header_row` is the 1-based worksheet row of the header.
pub fn parse_sheet(rows: &[Vec<Data>], header_row: usize) -> Result<Vec<CompanyRecord>, DatasetError> {
    let (header, body) = rows.split_first().ok_or(DatasetError::MissingHeader)?;
    let columns = resolve_columns(header)?;

    let mut records = Vec::with_capacity(body.len());
    for (offset, row) in body.iter().enumerate() {
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        records.push(parse_row(row, header_row + 1 + offset, &columns)?);
    }

    if records.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(records)
}

fn parse_row(row: &[Data], line: usize, columns: &ColumnMap) -> Result<CompanyRecord, DatasetError> {
    let cell = |i: usize| row.get(i).unwrap_or(&Data::Empty);

    let name = match cell(columns.name) {
        Data::Empty => {
            return Err(DatasetError::MissingValue { row: line, column: NAME_COLUMN })
        }
        other => cell_text(other).trim().to_string(),
    };
    if name.is_empty() {
        return Err(DatasetError::MissingValue { row: line, column: NAME_COLUMN });
    }

    let mut values = [0.0f64; INDICATOR_COUNT];
    for (i, (&pos, column)) in columns.indicators.iter().zip(INDICATOR_LAYOUT).enumerate() {
        values[i] = numeric_cell(cell(pos), line, column)?;
    }

    let branches = values[BRANCH_COUNT_INDEX];
    if branches < 0.0 || branches > u32::MAX as f64 {
        return Err(DatasetError::InvalidValue {
            row: line,
            column: INDICATOR_LAYOUT[BRANCH_COUNT_INDEX],
            value: branches.to_string(),
        });
    }

    let at_risk = label_cell(cell(columns.label), line)?;

    Ok(CompanyRecord {
        name,
        indicators: FinancialIndicators {
            revenue: values[0],
            loss_ratio: values[1],
            solvency_ratio: values[2],
            liquidity_ratio: values[3],
            // Truncated like an integer cast
            branch_count: branches.trunc() as u32,
            investment_yield: values[5],
        },
        at_risk,
    })
}

fn numeric_cell(cell: &Data, row: usize, column: &'static str) -> Result<f64, DatasetError> {
    let value = match cell {
        Data::Int(v) => *v as f64,
        Data::Float(v) => *v,
        Data::Empty => return Err(DatasetError::MissingValue { row, column }),
        other => {
            return Err(DatasetError::NonNumeric {
                row,
                column,
                value: cell_text(other),
            })
        }
    };

    if !value.is_finite() {
        return Err(DatasetError::InvalidValue {
            row,
            column,
            value: value.to_string(),
        });
    }
    Ok(value)
}

fn label_cell(cell: &Data, row: usize) -> Result<bool, DatasetError> {
    match cell {
        Data::Bool(b) => Ok(*b),
        Data::Int(0) => Ok(false),
        Data::Int(1) => Ok(true),
        Data::Float(v) if *v == 0.0 => Ok(false),
        Data::Float(v) if *v == 1.0 => Ok(true),
        Data::Empty => Err(DatasetError::MissingValue { row, column: LABEL_COLUMN }),
        other => Err(DatasetError::NonBinaryLabel {
            row,
            value: cell_text(other),
        }),
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Int(v) => v.to_string(),
        Data::Float(v) => v.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Empty => String::new(),
        other => format!("{:?}", other),
    }
}
