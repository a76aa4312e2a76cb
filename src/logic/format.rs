//! Display formatting shared by the dashboard, prompt and report

/// Round to an integer and group thousands with `,` (e.g. `1,000,000`)
pub fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Ratio already expressed in percent, 2 decimals (`55.00`)
pub fn format_ratio(value: f64) -> String {
    format!("{:.2}", value)
}

/// Probability in [0, 1] as a percentage (`95.00%`)
pub fn format_probability(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_grouping() {
        assert_eq!(format_amount(1_000_000.0), "1,000,000");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1234.0), "1,234");
        assert_eq!(format_amount(12_345_678.4), "12,345,678");
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(-45_000.0), "-45,000");
    }

    #[test]
    fn test_ratio_and_probability() {
        assert_eq!(format_ratio(55.0), "55.00");
        assert_eq!(format_ratio(4.5), "4.50");
        assert_eq!(format_probability(0.95), "95.00%");
        assert_eq!(format_probability(0.0), "0.00%");
        assert_eq!(format_probability(1.0), "100.00%");
    }
}
