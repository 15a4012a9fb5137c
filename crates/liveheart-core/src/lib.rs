//! liveheart-core
//!
//! Pure domain types shared by every liveheart crate: measurement and metric
//! keys, protocol sections, myocardial segment states and the submission
//! payload. No computation lives here.

pub mod error;
pub mod models;
