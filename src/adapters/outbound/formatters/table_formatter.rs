use owo_colors::OwoColorize;
use std::fmt::Write as _;

use crate::cost_analysis::domain::{
    CostComparison, OptionCost, ResourceKind, SubscriptionReport,
};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// Renders the report as a plain-text table for the terminal, with
/// colored savings figures. Numbers stay raw (two decimals, currency
/// code in the header) - no symbols or locale formatting.
pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self { use_color: true }
    }

    /// Without ANSI colors, for piping to files or tests.
    pub fn plain() -> Self {
        Self { use_color: false }
    }

    fn savings_cell(&self, cost: &OptionCost) -> String {
        let cell = format!("{:>12.2}  {:>8.2}%", cost.savings, cost.savings_percent);
        if !self.use_color {
            cell
        } else if cost.savings >= 0.0 {
            cell.green().to_string()
        } else {
            cell.red().to_string()
        }
    }

    fn write_option_rows(
        &self,
        out: &mut String,
        indent: &str,
        options: &std::collections::BTreeMap<String, OptionCost>,
    ) {
        for (label, cost) in options {
            let _ = writeln!(
                out,
                "{}{:<24}{:>14.2}  {}",
                indent,
                label,
                cost.monthly_cost,
                self.savings_cell(cost)
            );
        }
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TableFormatter {
    fn format(
        &self,
        report: &SubscriptionReport,
        comparisons: &[CostComparison],
    ) -> Result<String> {
        let mut out = String::new();

        let _ = writeln!(out, "Subscription cost summary ({})", report.currency);
        let _ = writeln!(
            out,
            "  Virtual machines: {}   Managed disks: {}",
            report.vm_count, report.disk_count
        );
        let _ = writeln!(
            out,
            "  Current monthly cost: {:.2} {}",
            report.current_monthly_cost, report.currency
        );
        let _ = writeln!(out);

        if report.options.is_empty() {
            let _ = writeln!(out, "  No alternative options were priced.");
            return Ok(out);
        }

        let _ = writeln!(
            out,
            "  {:<24}{:>14}  {:>12}  {:>9}",
            "Option", "Monthly cost", "Savings", "Savings %"
        );
        self.write_option_rows(&mut out, "  ", &report.options);

        let _ = writeln!(out);
        let _ = writeln!(out, "Per-resource breakdown");
        for comparison in comparisons {
            let kind = match comparison.resource_kind {
                ResourceKind::VirtualMachine => "VM",
                ResourceKind::ManagedDisk => "Disk",
            };
            let _ = writeln!(
                out,
                "  {} ({}) - current {:.2} {}/month",
                comparison.resource_name, kind, comparison.current_monthly_cost, report.currency
            );
            self.write_option_rows(&mut out, "    ", &comparison.options);
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample() -> (SubscriptionReport, Vec<CostComparison>) {
        let mut options = BTreeMap::new();
        options.insert("Spot".to_string(), OptionCost::from_costs(100.0, 30.0));
        options.insert(
            "Savings Plan (1 Yr)".to_string(),
            OptionCost::from_costs(100.0, 110.0),
        );
        let comparison = CostComparison {
            resource_id: "/vms/web1".to_string(),
            resource_name: "web1".to_string(),
            resource_kind: ResourceKind::VirtualMachine,
            current_monthly_cost: 100.0,
            options: options.clone(),
        };
        let report = SubscriptionReport {
            currency: "USD".to_string(),
            vm_count: 1,
            disk_count: 0,
            current_monthly_cost: 100.0,
            options,
        };
        (report, vec![comparison])
    }

    #[test]
    fn test_table_contains_summary_and_breakdown() {
        let (report, comparisons) = sample();
        let output = TableFormatter::plain().format(&report, &comparisons).unwrap();

        assert!(output.contains("Subscription cost summary (USD)"));
        assert!(output.contains("Current monthly cost: 100.00 USD"));
        assert!(output.contains("Spot"));
        assert!(output.contains("web1 (VM)"));
    }

    #[test]
    fn test_negative_savings_rendered_not_hidden() {
        let (report, comparisons) = sample();
        let output = TableFormatter::plain().format(&report, &comparisons).unwrap();
        // The more-expensive savings plan shows with a negative figure.
        assert!(output.contains("-10.00"));
    }

    #[test]
    fn test_empty_report() {
        let report = SubscriptionReport::empty("EUR".to_string());
        let output = TableFormatter::plain().format(&report, &[]).unwrap();
        assert!(output.contains("No alternative options were priced."));
    }

    #[test]
    fn test_plain_output_has_no_ansi_codes() {
        let (report, comparisons) = sample();
        let output = TableFormatter::plain().format(&report, &comparisons).unwrap();
        assert!(!output.contains('\u{1b}'));
    }
}
