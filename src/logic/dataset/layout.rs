//! Dataset Layout - Centralized Column Definition
//!
//! **This file controls the workbook schema.**
//!
//! The indicator order below is the column order of the feature matrix,
//! of the forest importances and of every display panel.

// ============================================================================
// COLUMN NAMES (Authoritative source)
// ============================================================================

/// Identifying column, dropped before scaling
pub const NAME_COLUMN: &str = "Nom_Compagnie";

/// Ground-truth label column (0/1), dropped before scaling
pub const LABEL_COLUMN: &str = "En_risque";

/// Number of numeric indicators
/// IMPORTANT: Must match INDICATOR_LAYOUT.len()!
pub const INDICATOR_COUNT: usize = 6;

/// Indicator columns in exact feature-matrix order
pub const INDICATOR_LAYOUT: [&str; INDICATOR_COUNT] = [
    "Chiffre_affaires",          // 0: revenue (FCFA)
    "Taux_sinistralite",         // 1: loss ratio (%)
    "Ratio_solvabilite",         // 2: solvency ratio (%)
    "Ratio_liquidite",           // 3: liquidity ratio (%)
    "Nombre_agences",            // 4: branch count
    "Rendement_investissements", // 5: investment yield (%)
];

/// Human-readable labels, same order as INDICATOR_LAYOUT
const INDICATOR_LABELS: [&str; INDICATOR_COUNT] = [
    "Chiffre d'affaires",
    "Sinistralité (%)",
    "Solvabilité (%)",
    "Liquidité (%)",
    "Agences",
    "Rendement Invest. (%)",
];

/// Index of the branch count indicator
pub const BRANCH_COUNT_INDEX: usize = 4;

// ============================================================================
// LOOKUPS
// ============================================================================

/// Get column name by index
pub fn indicator_name(index: usize) -> Option<&'static str> {
    INDICATOR_LAYOUT.get(index).copied()
}

/// Get display label by index
pub fn indicator_label(index: usize) -> Option<&'static str> {
    INDICATOR_LABELS.get(index).copied()
}

/// Get index by column name
pub fn indicator_index(name: &str) -> Option<usize> {
    INDICATOR_LAYOUT.iter().position(|&n| n == name)
}

/// Every column the workbook must carry, in canonical order
pub fn required_columns() -> impl Iterator<Item = &'static str> {
    [NAME_COLUMN, LABEL_COLUMN]
        .into_iter()
        .chain(INDICATOR_LAYOUT.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_count_matches() {
        assert_eq!(INDICATOR_LAYOUT.len(), INDICATOR_COUNT);
        assert_eq!(required_columns().count(), INDICATOR_COUNT + 2);
    }

    #[test]
    fn test_lookup_roundtrip() {
        for (i, name) in INDICATOR_LAYOUT.iter().enumerate() {
            assert_eq!(indicator_index(name), Some(i));
            assert_eq!(indicator_name(i), Some(*name));
            assert!(indicator_label(i).is_some());
        }
        assert_eq!(indicator_index(NAME_COLUMN), None);
        assert_eq!(indicator_name(INDICATOR_COUNT), None);
    }

    #[test]
    fn test_named_indexes() {
        assert_eq!(indicator_name(BRANCH_COUNT_INDEX), Some("Nombre_agences"));
    }
}
