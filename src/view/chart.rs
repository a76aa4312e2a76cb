//! Solvency Comparison Chart
//!
//! Horizontal SVG bar chart, one bar per company, dashed reference
//! line at the regulatory threshold.

use std::fmt::Write;

use super::escape;
use crate::logic::scoring::ScoredRecord;

/// Regulatory solvency threshold (%)
pub const SOLVENCY_THRESHOLD: f64 = 100.0;

const WIDTH: f64 = 900.0;
const LABEL_WIDTH: f64 = 200.0;
const RIGHT_MARGIN: f64 = 60.0;
const ROW_HEIGHT: f64 = 26.0;
const TOP_MARGIN: f64 = 20.0;
const AXIS_HEIGHT: f64 = 50.0;

const BELOW_COLOR: &str = "#d6604d";
const ABOVE_COLOR: &str = "#4393c3";

/// Render the chart for every record, in table order
pub fn solvency_chart(records: &[ScoredRecord]) -> String {
    let max_value = records
        .iter()
        .map(|r| r.company.indicators.solvency_ratio)
        .fold(SOLVENCY_THRESHOLD, f64::max)
        * 1.1;
    let plot_width = WIDTH - LABEL_WIDTH - RIGHT_MARGIN;
    let x = |value: f64| LABEL_WIDTH + (value.max(0.0) / max_value) * plot_width;

    let plot_height = ROW_HEIGHT * records.len() as f64;
    let height = TOP_MARGIN + plot_height + AXIS_HEIGHT;

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="12">"#,
        w = WIDTH,
        h = height
    );

    for (i, record) in records.iter().enumerate() {
        let ratio = record.company.indicators.solvency_ratio;
        let y = TOP_MARGIN + i as f64 * ROW_HEIGHT;
        let color = if ratio < SOLVENCY_THRESHOLD { BELOW_COLOR } else { ABOVE_COLOR };

        let _ = write!(
            svg,
            r#"<text x="{lx}" y="{ty}" text-anchor="end">{name}</text><rect x="{x0}" y="{ry}" width="{bw:.1}" height="{bh}" fill="{color}"><title>{name} : {ratio:.2} %</title></rect>"#,
            lx = LABEL_WIDTH - 8.0,
            ty = y + ROW_HEIGHT * 0.65,
            name = escape(&record.company.name),
            x0 = LABEL_WIDTH,
            ry = y + 3.0,
            bw = x(ratio) - LABEL_WIDTH,
            bh = ROW_HEIGHT - 6.0,
            color = color,
            ratio = ratio,
        );
    }

    let threshold_x = x(SOLVENCY_THRESHOLD);
    let axis_y = TOP_MARGIN + plot_height;
    let _ = write!(
        svg,
        r#"<line class="threshold" x1="{tx:.1}" y1="{top}" x2="{tx:.1}" y2="{bottom}" stroke="red" stroke-dasharray="6,4" stroke-width="2"/>"#,
        tx = threshold_x,
        top = TOP_MARGIN,
        bottom = axis_y,
    );
    let _ = write!(
        svg,
        r##"<line x1="{l}" y1="{ay}" x2="{r}" y2="{ay}" stroke="#333"/><text x="{tx:.1}" y="{ty}" text-anchor="middle">100</text><text x="{cx:.1}" y="{ly}" text-anchor="middle">Ratio de solvabilité (%)</text></svg>"##,
        l = LABEL_WIDTH,
        r = WIDTH - RIGHT_MARGIN,
        ay = axis_y,
        tx = threshold_x,
        ty = axis_y + 16.0,
        cx = LABEL_WIDTH + plot_width / 2.0,
        ly = axis_y + 38.0,
    );

    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::dataset::fixtures::company;

    fn scored(name: &str, solvency: f64) -> ScoredRecord {
        ScoredRecord {
            row_index: 0,
            company: company(name, [1.0, 50.0, solvency, 80.0, 3.0, 2.0], false),
            predicted_label: 0,
            risk_probability: 0.1,
        }
    }

    #[test]
    fn test_one_bar_per_company_and_threshold_line() {
        let svg = solvency_chart(&[scored("A", 80.0), scored("B & Co", 150.0)]);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<rect").count(), 2);
        assert!(svg.contains("B &amp; Co"));
        assert!(svg.contains(r#"class="threshold""#));
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.contains(BELOW_COLOR));
        assert!(svg.contains(ABOVE_COLOR));
    }

    #[test]
    fn test_threshold_inside_plot_when_all_below() {
        let svg = solvency_chart(&[scored("A", 20.0)]);
        // Scale always includes the threshold
        let expected = LABEL_WIDTH + (100.0 / 110.0) * (WIDTH - LABEL_WIDTH - RIGHT_MARGIN);
        assert!(svg.contains(&format!(r#"x1="{:.1}""#, expected)));
    }
}
