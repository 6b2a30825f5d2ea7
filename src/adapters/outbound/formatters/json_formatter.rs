use anyhow::Context;
use serde::Serialize;

use crate::cost_analysis::domain::{CostComparison, SubscriptionReport};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

#[derive(Serialize)]
struct JsonReport<'a> {
    report: &'a SubscriptionReport,
    resources: &'a [CostComparison],
}

/// Renders the report as pretty-printed JSON for machine consumption.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(
        &self,
        report: &SubscriptionReport,
        comparisons: &[CostComparison],
    ) -> Result<String> {
        let document = JsonReport {
            report,
            resources: comparisons,
        };
        serde_json::to_string_pretty(&document).context("Failed to serialize JSON report")
    }
}
