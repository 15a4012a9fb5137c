use serde::{Deserialize, Serialize};

/// Document styling configuration for exported protocols.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// Font for body text and table cells.
    pub body_font: String,

    /// Body text font size in points.
    pub body_size: usize,

    /// Heading 1 font size in points.
    pub heading1_size: usize,

    /// Heading 2 font size in points.
    pub heading2_size: usize,

    /// Heading 3 font size in points.
    pub heading3_size: usize,

    /// Printed above the protocol title, e.g. the hospital name.
    #[serde(default)]
    pub institution: Option<String>,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Times New Roman".to_string(),
            body_size: 12,
            heading1_size: 14,
            heading2_size: 12,
            heading3_size: 12,
            institution: None,
        }
    }
}
