//! liveheart-form
//!
//! Wires the metric engine and the segment diagram to a form: field
//! accessors, the recompute orchestrator and its event loop, form files and
//! configuration for the `liveheart` command-line driver.

pub mod config;
pub mod error;
pub mod event;
pub mod fields;
pub mod form_file;
pub mod orchestrator;
