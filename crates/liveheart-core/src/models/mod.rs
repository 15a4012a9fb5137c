pub mod measurement;
pub mod metric;
pub mod payload;
pub mod section;
pub mod segment;
