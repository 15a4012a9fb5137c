//! liveheart-export
//!
//! Echocardiography protocol reports: a Tera template rendered from a
//! submission payload, DOCX generation from the rendered text, and XLSX and
//! PDF layouts of the same protocol.

pub mod context;
pub mod docx;
pub mod error;
pub mod format;
pub mod pdf;
pub mod render;
pub mod styles;
pub mod xlsx;
