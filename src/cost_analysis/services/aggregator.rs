//! Subscription-level aggregation of per-resource comparisons.

use std::collections::{BTreeMap, BTreeSet};

use crate::cost_analysis::domain::{
    CostComparison, OptionCost, ResourceKind, SubscriptionReport,
};

/// Fold all comparisons into one report. Pure and single-pass; runs only
/// after every per-resource result is final, so option presence/absence
/// is settled.
///
/// For each option the total answers "what would the subscription cost if
/// every eligible resource switched": resources with the option priced
/// contribute the candidate cost, resources without it contribute their
/// current cost unchanged, keeping every option total comparable
/// one-for-one against the current total.
pub fn aggregate(comparisons: &[CostComparison], currency: &str) -> SubscriptionReport {
    let current_total: f64 = comparisons.iter().map(|c| c.current_monthly_cost).sum();

    let option_labels: BTreeSet<&str> = comparisons
        .iter()
        .flat_map(|c| c.options.keys().map(String::as_str))
        .collect();

    let mut options = BTreeMap::new();
    for label in option_labels {
        let total: f64 = comparisons
            .iter()
            .map(|c| {
                c.options
                    .get(label)
                    .map_or(c.current_monthly_cost, |o| o.monthly_cost)
            })
            .sum();
        options.insert(label.to_string(), OptionCost::from_costs(current_total, total));
    }

    SubscriptionReport {
        currency: currency.to_string(),
        vm_count: comparisons
            .iter()
            .filter(|c| c.resource_kind == ResourceKind::VirtualMachine)
            .count(),
        disk_count: comparisons
            .iter()
            .filter(|c| c.resource_kind == ResourceKind::ManagedDisk)
            .count(),
        current_monthly_cost: current_total,
        options,
    }
}
