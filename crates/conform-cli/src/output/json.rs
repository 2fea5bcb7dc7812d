//! JSON output for programmatic integration.

use conform_core::Summary;
use serde::Serialize;

#[derive(Serialize)]
pub struct JsonOutput<'a> {
    pub version: &'static str,
    pub analyzed_path: &'a str,
    #[serde(flatten)]
    pub summary: &'a Summary,
}

pub fn format(summary: &Summary, analyzed_path: &str) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonOutput {
        version: env!("CARGO_PKG_VERSION"),
        analyzed_path,
        summary,
    })
}
