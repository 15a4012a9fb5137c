use liveheart_core::models::payload::SubmissionPayload;
use tera::{Context, Tera};

use crate::context::ProtocolContext;
use crate::error::ExportError;
use crate::styles::DocumentStyles;

/// The built-in protocol layout.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/protocol.md.tera");

pub const DEFAULT_TEMPLATE_NAME: &str = "protocol.md";

/// Render a Tera template with a protocol context.
///
/// The template name should not end in `.html`, otherwise Tera escapes the
/// output.
pub fn render_template(
    template_name: &str,
    template_content: &str,
    context: &ProtocolContext,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(context)?;
    let context = Context::from_value(value)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}

/// Render the built-in protocol for `payload`.
pub fn render_protocol(
    payload: &SubmissionPayload,
    styles: &DocumentStyles,
) -> Result<String, ExportError> {
    let context = ProtocolContext::from_payload(payload, styles);
    let rendered = render_template(DEFAULT_TEMPLATE_NAME, DEFAULT_TEMPLATE, &context)?;
    tracing::debug!(
        sections = context.sections.len(),
        bytes = rendered.len(),
        "protocol rendered"
    );
    Ok(rendered)
}
