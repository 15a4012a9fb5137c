use std::path::Path;
use std::str::FromStr;

use liveheart_core::models::payload::SubmissionPayload;

use crate::context::ProtocolContext;
use crate::docx::generate_docx;
use crate::error::ExportError;
use crate::pdf::generate_pdf;
use crate::render::render_protocol;
use crate::styles::DocumentStyles;
use crate::xlsx::generate_xlsx;

/// Binary protocol formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Docx,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Docx, ExportFormat::Xlsx, ExportFormat::Pdf];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Docx => "docx",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// The format named by a file's extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        extension.parse()
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == lower)
            .ok_or_else(|| ExportError::UnsupportedFormat(s.to_string()))
    }
}

/// Produce the protocol for `payload` in `format`.
///
/// DOCX is built from `rendered` text when given (e.g. a custom template),
/// otherwise from the built-in template. XLSX and PDF lay out the structured
/// context directly.
pub fn export_protocol(
    format: ExportFormat,
    payload: &SubmissionPayload,
    rendered: Option<&str>,
    styles: &DocumentStyles,
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Docx => match rendered {
            Some(text) => generate_docx(text, styles),
            None => generate_docx(&render_protocol(payload, styles)?, styles),
        },
        ExportFormat::Xlsx => generate_xlsx(&ProtocolContext::from_payload(payload, styles)),
        ExportFormat::Pdf => generate_pdf(&ProtocolContext::from_payload(payload, styles), styles),
    }
}
