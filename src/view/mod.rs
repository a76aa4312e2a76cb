//! View Module - Server-rendered dashboard
//!
//! Plain HTML + inline SVG; no client-side script.

pub mod chart;
pub mod dashboard;

pub use chart::solvency_chart;
pub use dashboard::{render_dashboard, DashboardContext};

/// Escape text for HTML/SVG content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<b>"A" & 'B'</b>"#), "&lt;b&gt;&quot;A&quot; &amp; &#39;B&#39;&lt;/b&gt;");
        assert_eq!(escape("Côte Sûre"), "Côte Sûre");
    }
}
