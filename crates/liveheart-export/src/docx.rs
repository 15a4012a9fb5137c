use std::io::Cursor;

use docx_rs::{
    AlignmentType, Docx, Paragraph, Run, RunFonts, Style, StyleType, Table, TableCell, TableRow,
};

use crate::error::ExportError;
use crate::styles::DocumentStyles;

/// Generate a DOCX document from a rendered protocol.
///
/// The rendered text uses a small line-based subset:
/// - `# Heading` / `## Heading` / `### Heading` → DOCX headings
/// - `| label | value |` → a row of a two-column table; consecutive rows
///   share one table
/// - `---` → a separator line
/// - `**bold**` → bold run
/// - everything else → normal paragraph
pub fn generate_docx(rendered: &str, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .add_style(heading_style("Heading1", "heading 1", styles.heading1_size))
        .add_style(heading_style("Heading2", "heading 2", styles.heading2_size))
        .add_style(heading_style("Heading3", "heading 3", styles.heading3_size));

    let mut rows: Vec<TableRow> = Vec::new();

    for line in rendered.lines() {
        let trimmed = line.trim();

        if let Some(cells) = table_cells(trimmed) {
            rows.push(table_row(&cells, styles));
            continue;
        }
        if !rows.is_empty() {
            docx = docx.add_table(Table::new(std::mem::take(&mut rows)));
        }

        if trimmed.is_empty() {
            docx = docx.add_paragraph(Paragraph::new());
        } else if let Some(text) = trimmed.strip_prefix("### ") {
            docx = docx.add_paragraph(heading_paragraph(text, "Heading3"));
        } else if let Some(text) = trimmed.strip_prefix("## ") {
            docx = docx.add_paragraph(heading_paragraph(text, "Heading2"));
        } else if let Some(text) = trimmed.strip_prefix("# ") {
            docx = docx.add_paragraph(
                heading_paragraph(text, "Heading1").align(AlignmentType::Center),
            );
        } else if trimmed == "---" {
            docx = docx.add_paragraph(body_paragraph(&"_".repeat(70), styles));
        } else {
            docx = docx.add_paragraph(body_paragraph(trimmed, styles));
        }
    }
    if !rows.is_empty() {
        docx = docx.add_table(Table::new(rows));
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

/// Split `| a | b |` into its trimmed cells.
fn table_cells(line: &str) -> Option<Vec<&str>> {
    let inner = line.strip_prefix('|')?.strip_suffix('|')?;
    Some(inner.split('|').map(str::trim).collect())
}

fn table_row(cells: &[&str], styles: &DocumentStyles) -> TableRow {
    TableRow::new(
        cells
            .iter()
            .map(|text| TableCell::new().add_paragraph(body_paragraph(text, styles)))
            .collect(),
    )
}

fn heading_style(style_id: &str, name: &str, size_pt: usize) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2) // OOXML uses half-points
        .bold()
}

fn heading_paragraph(text: &str, style_id: &str) -> Paragraph {
    Paragraph::new()
        .style(style_id)
        .add_run(Run::new().add_text(text))
}

fn body_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let mut para = Paragraph::new().align(AlignmentType::Left);
    for run in parse_inline(text, styles) {
        para = para.add_run(run);
    }
    para
}

fn styled_run(text: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(text)
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font))
}

/// Parse simple inline formatting: **bold** segments.
fn parse_inline(text: &str, styles: &DocumentStyles) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut remaining = text;

    while let Some(start) = remaining.find("**") {
        let before = &remaining[..start];
        if !before.is_empty() {
            runs.push(styled_run(before, styles));
        }

        let after_start = &remaining[start + 2..];
        match after_start.find("**") {
            Some(end) => {
                runs.push(styled_run(&after_start[..end], styles).bold());
                remaining = &after_start[end + 2..];
            }
            None => {
                // unclosed marker, keep the rest verbatim
                runs.push(styled_run(remaining, styles));
                return runs;
            }
        }
    }

    if !remaining.is_empty() {
        runs.push(styled_run(remaining, styles));
    }

    runs
}
