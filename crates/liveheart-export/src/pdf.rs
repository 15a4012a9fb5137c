use std::io::BufWriter;

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use crate::context::ProtocolContext;
use crate::error::ExportError;
use crate::styles::DocumentStyles;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const TOP: f32 = 280.0;
const BOTTOM: f32 = 20.0;
const MARGIN: f32 = 20.0;
const VALUE_COLUMN: f32 = 110.0;
const WRAP_CHARS: usize = 90;

/// Writes lines top to bottom, starting a new A4 page when the current one
/// is full.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PageWriter<'_> {
    fn advance(&mut self, height: f32) {
        self.y -= height;
        if self.y < BOTTOM {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = TOP;
        }
    }

    fn text(&self, text: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        self.text(text, size, MARGIN, bold);
        self.advance(line_height(size));
    }
}

/// Generate a PDF protocol with the same content as the DOCX export.
pub fn generate_pdf(
    context: &ProtocolContext,
    styles: &DocumentStyles,
) -> Result<Vec<u8>, ExportError> {
    let (doc, page1, layer1) =
        PdfDocument::new(&context.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let (regular, bold) = builtin_fonts(&styles.body_font);
    let regular = doc
        .add_builtin_font(regular)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(bold)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;

    let body = styles.body_size as f32;
    let heading1 = styles.heading1_size as f32;
    let heading3 = styles.heading3_size as f32;

    let mut page = PageWriter {
        layer: doc.get_page(page1).get_layer(layer1),
        doc: &doc,
        regular,
        bold,
        y: TOP,
    };

    if let Some(institution) = &context.institution {
        page.line(institution, body, true);
    }
    page.line(&context.title, heading1, true);
    page.advance(line_height(body));

    let patient = &context.patient;
    for line in [
        format!("Patient: {}    Date: {}", patient.full_name, patient.exam_date),
        format!(
            "Age: {}    Height: {}    Weight: {}",
            patient.age, patient.height, patient.weight
        ),
        format!(
            "BMI: {}    BSA: {}    Heart rate: {}",
            patient.bmi, patient.bsa, patient.heart_rate
        ),
    ] {
        page.line(&line, body, false);
    }

    for section in &context.sections {
        page.advance(line_height(body) / 2.0);
        page.line(&section.name, heading3, true);
        for row in &section.rows {
            page.text(&row.label, body, MARGIN + 5.0, false);
            page.text(&row.value, body, VALUE_COLUMN, false);
            page.advance(line_height(body));
        }
    }

    page.advance(line_height(body) / 2.0);
    page.line("Regional Wall Motion", heading3, true);
    for line in wrap_text(&context.wall_motion.conclusion, WRAP_CHARS) {
        page.line(&line, body, false);
    }
    drop(page);

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ExportError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ExportError::Pdf(format!("buffer error: {e}")))
}

/// Millimetres taken by one line of `size_pt` text.
fn line_height(size_pt: f32) -> f32 {
    size_pt * 0.45
}

/// The built-in PDF faces closest to the configured body font.
fn builtin_fonts(body_font: &str) -> (BuiltinFont, BuiltinFont) {
    let name = body_font.to_ascii_lowercase();
    if name.contains("times") {
        (BuiltinFont::TimesRoman, BuiltinFont::TimesBold)
    } else if name.contains("courier") {
        (BuiltinFont::Courier, BuiltinFont::CourierBold)
    } else {
        (BuiltinFont::Helvetica, BuiltinFont::HelveticaBold)
    }
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
