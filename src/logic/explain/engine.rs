use super::types::{ExplainResult, FeatureContribution};
use crate::logic::dataset::{indicator_label, indicator_name};

/// Rank forest importances, most influential indicator first.
/// Indexes follow the dataset layout.
pub fn rank_importances(importances: &[f64]) -> ExplainResult {
    let mut contributions: Vec<FeatureContribution> = importances
        .iter()
        .enumerate()
        .filter_map(|(i, &importance)| {
            let name = indicator_name(i)?;
            Some(FeatureContribution {
                name: name.to_string(),
                label: indicator_label(i).unwrap_or(name).to_string(),
                importance,
                description: get_description(name),
            })
        })
        .collect();

    // Stable sort keeps layout order on ties
    contributions.sort_by(|a, b| b.importance.total_cmp(&a.importance));

    ExplainResult { contributions }
}

fn get_description(name: &str) -> Option<String> {
    match name {
        "Taux_sinistralite" => Some("Charge de sinistres rapportée aux primes".to_string()),
        "Ratio_solvabilite" => Some("Marge de solvabilité (seuil réglementaire : 100 %)".to_string()),
        "Ratio_liquidite" => Some("Capacité à honorer les engagements à court terme".to_string()),
        "Rendement_investissements" => Some("Performance du portefeuille de placements".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_descending_with_names() {
        let result = rank_importances(&[0.05, 0.40, 0.30, 0.10, 0.05, 0.10]);
        let names: Vec<&str> = result.contributions.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names[0], "Taux_sinistralite");
        assert_eq!(names[1], "Ratio_solvabilite");
        // Ties keep layout order
        assert_eq!(names[2], "Ratio_liquidite");
        assert_eq!(names[3], "Rendement_investissements");
        assert_eq!(result.contributions[1].label, "Solvabilité (%)");
        assert!(result.contributions[1].description.is_some());
    }

    #[test]
    fn test_extra_entries_ignored() {
        let result = rank_importances(&[0.1; 8]);
        assert_eq!(result.contributions.len(), 6);
    }
}
