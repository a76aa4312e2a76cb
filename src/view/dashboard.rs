//! Dashboard Page
//!
//! Sections:
//! 1. Company analysis: selector, indicators, verdict, solvency chart
//! 2. Top-N report: generate button, download link

use std::fmt::Write;

use super::{escape, solvency_chart};
use crate::logic::dataset::{indicator_label, FinancialIndicators, INDICATOR_COUNT};
use crate::logic::format::{format_amount, format_probability, format_ratio};
use crate::logic::scoring::{ModelSummary, ScoredRecord};
use crate::logic::GeneratedReport;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2rem auto; max-width: 1100px; color: #222; }
.metrics { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; }
.metric { border: 1px solid #ddd; border-radius: 6px; padding: .75rem 1rem; }
.metric .label { font-size: .85rem; color: #666; }
.metric .value { font-size: 1.6rem; font-weight: 600; }
.verdict { padding: 1rem; border-radius: 6px; font-weight: 600; }
.verdict.risk { background: #fde2e1; color: #9b1c1c; }
.verdict.safe { background: #dcf5e3; color: #1e6b35; }
.note { font-size: .85rem; color: #666; }
button { font-size: 1rem; padding: .5rem 1rem; }
"#;

pub struct DashboardContext<'a> {
    pub records: &'a [ScoredRecord],
    pub selected: &'a ScoredRecord,
    pub summary: &'a ModelSummary,
    pub top_n: usize,
    pub latest_report: Option<&'a GeneratedReport>,
}

/// Display strings for the six indicator cards, layout order
pub fn metric_values(ind: &FinancialIndicators) -> [String; INDICATOR_COUNT] {
    [
        format!("{} FCFA", format_amount(ind.revenue)),
        format_ratio(ind.loss_ratio),
        format_ratio(ind.solvency_ratio),
        format_ratio(ind.liquidity_ratio),
        ind.branch_count.to_string(),
        format_ratio(ind.investment_yield),
    ]
}

/// Risk verdict line and its CSS class
pub fn verdict(record: &ScoredRecord) -> (&'static str, String) {
    let probability = format_probability(record.risk_probability);
    if record.is_flagged() {
        ("risk", format!("⚠️ Risque détecté (probabilité : {})", probability))
    } else {
        ("safe", format!("✅ Aucun risque détecté (probabilité : {})", probability))
    }
}

pub fn render_dashboard(ctx: &DashboardContext) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"fr\"><head><meta charset=\"utf-8\"><title>Supervision IA - Assurances</title><style>{}</style></head><body>",
        STYLE
    );
    html.push_str("<h1>📊 Supervision IA du secteur des assurances</h1>");

    // SECTION 1: company analysis
    html.push_str("<h2>🔍 Analyse d'une compagnie</h2>");
    html.push_str(r#"<form method="get" action="/"><label for="company">Sélectionner une compagnie</label> <select id="company" name="company">"#);
    for record in ctx.records {
        let selected = if record.row_index == ctx.selected.row_index { " selected" } else { "" };
        let _ = write!(
            html,
            r#"<option value="{}"{}>{}</option>"#,
            record.row_index,
            selected,
            escape(&record.company.name)
        );
    }
    html.push_str(r#"</select> <button type="submit">Afficher</button></form>"#);

    let _ = write!(html, "<h3>{}</h3>", escape(&ctx.selected.company.name));
    html.push_str("<h3>📌 Indicateurs financiers</h3><div class=\"metrics\">");
    for (i, value) in metric_values(&ctx.selected.company.indicators).iter().enumerate() {
        let _ = write!(
            html,
            r#"<div class="metric"><div class="label">{}</div><div class="value">{}</div></div>"#,
            indicator_label(i).unwrap_or_default(),
            escape(value)
        );
    }
    html.push_str("</div>");

    let (class, text) = verdict(ctx.selected);
    let _ = write!(
        html,
        r#"<h3>🧠 Prédiction IA</h3><div class="verdict {}">{}</div>"#,
        class, text
    );

    html.push_str("<h3>📈 Ratio de solvabilité (comparaison)</h3>");
    html.push_str(&solvency_chart(ctx.records));

    let _ = write!(
        html,
        r#"<h3>🌲 Modèle</h3><p class="note">Forêt aléatoire de {} arbres (graine {}), {} compagnies, {} signalées à risque. Exactitude : {:.2} %. {}.</p><ol>"#,
        ctx.summary.n_trees,
        ctx.summary.seed,
        ctx.summary.samples,
        ctx.summary.flagged,
        ctx.summary.in_sample_accuracy * 100.0,
        escape(ctx.summary.accuracy_note)
    );
    for c in &ctx.summary.importances {
        let _ = write!(
            html,
            "<li>{} : {:.1} %</li>",
            escape(&c.label),
            c.importance * 100.0
        );
    }
    html.push_str("</ol>");

    // SECTION 2: report
    let _ = write!(
        html,
        r#"<h2>📝 Rapport IA - Top {} compagnies à risque</h2><form method="post" action="/reports"><button type="submit">📄 Générer le rapport Word</button></form>"#,
        ctx.top_n
    );
    if let Some(report) = ctx.latest_report {
        let _ = write!(
            html,
            r#"<p>Rapport généré le {} ({} compagnies, {} commentaire(s) en erreur). <a href="/reports/download" download="{}">📥 Télécharger le rapport</a></p>"#,
            report.generated_at.format("%d/%m/%Y %H:%M:%S UTC"),
            report.sections,
            report.failed_narratives,
            escape(&report.file_name)
        );
    }

    html.push_str("</body></html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::dataset::fixtures::sample_portfolio;
    use crate::logic::model::ForestConfig;
    use crate::logic::scoring::score_portfolio;

    #[test]
    fn test_metric_values_formatting() {
        let ind = FinancialIndicators {
            revenue: 1_000_000.0,
            loss_ratio: 55.0,
            solvency_ratio: 120.0,
            liquidity_ratio: 80.0,
            branch_count: 12,
            investment_yield: 4.5,
        };
        assert_eq!(
            metric_values(&ind),
            ["1,000,000 FCFA", "55.00", "120.00", "80.00", "12", "4.50"].map(String::from)
        );
    }

    #[test]
    fn test_dashboard_renders_selected_company() {
        let portfolio = score_portfolio(sample_portfolio(), &ForestConfig::default()).unwrap();
        let selected = portfolio.get(1).unwrap();
        let html = render_dashboard(&DashboardContext {
            records: portfolio.records(),
            selected,
            summary: portfolio.summary(),
            top_n: 10,
            latest_report: None,
        });

        assert!(html.contains(r#"<option value="1" selected>Sahel Garantie</option>"#));
        assert!(html.contains(r#"class="verdict risk""#));
        assert!(html.contains("Risque détecté"));
        assert!(html.contains("<svg"));
        assert!(html.contains("Top 10 compagnies"));
        assert!(!html.contains("/reports/download"));
    }
}
