//! Prompt Template
//!
//! Fixed analyst brief embedding the six indicators and the risk score.

use crate::logic::format::{format_amount, format_probability, format_ratio};
use crate::logic::scoring::ScoredRecord;

/// Build the commentary prompt for one scored company
pub fn build_prompt(record: &ScoredRecord) -> String {
    let ind = &record.company.indicators;

    format!(
        "Tu es analyste du secteur des assurances. Rédige un commentaire professionnel de 150 mots sur cette compagnie :\n\
         \n\
         - Chiffre d'affaires : {} FCFA\n\
         - Taux de sinistralité : {} %\n\
         - Ratio de solvabilité : {} %\n\
         - Ratio de liquidité : {} %\n\
         - Nombre d'agences : {}\n\
         - Rendement des investissements : {} %\n\
         - Score IA (risque) : {}\n\
         \n\
         Analyse les risques, les points forts, et propose une recommandation claire pour les autorités de régulation.",
        format_amount(ind.revenue),
        format_ratio(ind.loss_ratio),
        format_ratio(ind.solvency_ratio),
        format_ratio(ind.liquidity_ratio),
        ind.branch_count,
        format_ratio(ind.investment_yield),
        format_probability(record.risk_probability),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::dataset::fixtures::company;

    fn scored(values: [f64; 6], probability: f64) -> ScoredRecord {
        ScoredRecord {
            row_index: 0,
            company: company("Test Assurances", values, false),
            predicted_label: u8::from(probability >= 0.5),
            risk_probability: probability,
        }
    }

    #[test]
    fn test_prompt_formats_indicators() {
        let prompt = build_prompt(&scored([1_000_000.0, 55.0, 120.0, 80.0, 12.0, 4.5], 0.42));

        for expected in ["1,000,000", "55.00", "120.00", "80.00", "12", "4.50", "42.00%"] {
            assert!(prompt.contains(expected), "missing {expected} in prompt");
        }
        assert!(prompt.contains("Nombre d'agences : 12\n"));
        assert!(prompt.contains("Chiffre d'affaires : 1,000,000 FCFA"));
    }

    #[test]
    fn test_prompt_is_stable_for_same_record() {
        let record = scored([250_000.0, 91.2, 80.0, 45.0, 3.0, 1.25], 0.87);
        assert_eq!(build_prompt(&record), build_prompt(&record));
    }
}
