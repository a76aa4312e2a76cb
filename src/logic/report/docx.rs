//! Word Serialization
//!
//! Title, then per company: Heading 1 + paragraphs + labelled narrative.

use std::fs::{self, File};
use std::path::Path;

use docx_rs::{Docx, Paragraph, Run, Style, StyleType};

use super::assembler::{ReportDocument, NARRATIVE_LABEL};
use super::ReportError;

const TITLE_STYLE: &str = "Title";
const HEADING_STYLE: &str = "Heading1";

fn styled(style: &str, text: &str) -> Paragraph {
    Paragraph::new().style(style).add_run(Run::new().add_text(text))
}

fn plain(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

/// Build the in-memory Word document
pub fn to_docx(report: &ReportDocument) -> Docx {
    let mut docx = Docx::new()
        .add_style(
            Style::new(TITLE_STYLE, StyleType::Paragraph)
                .name("Title")
                .size(48)
                .bold(),
        )
        .add_style(
            Style::new(HEADING_STYLE, StyleType::Paragraph)
                .name("Heading 1")
                .size(32)
                .bold(),
        )
        .add_paragraph(styled(TITLE_STYLE, &report.title));

    for section in &report.sections {
        docx = docx.add_paragraph(styled(HEADING_STYLE, &section.company));
        for paragraph in &section.paragraphs {
            docx = docx.add_paragraph(plain(paragraph));
        }
        docx = docx
            .add_paragraph(plain(NARRATIVE_LABEL))
            .add_paragraph(plain(&section.narrative_text()));
    }

    docx
}

/// Serialize the report to `path`, replacing any previous file
pub fn write_docx(report: &ReportDocument, path: &Path) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    to_docx(report)
        .build()
        .pack(file)
        .map_err(|e| ReportError::Serialize(e.to_string()))?;

    tracing::info!(
        "Report written to {} ({} sections)",
        path.display(),
        report.sections.len()
    );
    Ok(())
}
