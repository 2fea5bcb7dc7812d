//! Output formatters for check results

pub mod json;
pub mod text;
