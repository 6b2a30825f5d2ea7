use crate::cost_analysis::domain::{CostComparison, SubscriptionReport};
use crate::shared::Result;

/// ReportFormatter port - renders the analysis result.
///
/// The core hands over plain numeric values plus a currency code;
/// currency symbols, column widths and localized number formats are
/// entirely the formatter's business.
pub trait ReportFormatter {
    fn format(
        &self,
        report: &SubscriptionReport,
        comparisons: &[CostComparison],
    ) -> Result<String>;
}
