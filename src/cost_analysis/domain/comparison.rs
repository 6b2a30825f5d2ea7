use serde::Serialize;
use std::collections::BTreeMap;

use super::resource::ResourceKind;

/// Cost of one purchasing/configuration option, relative to the current
/// monthly cost it was compared against.
///
/// Savings may be negative when the alternative is more expensive; that
/// is still a valid, reported result. An option that does not apply to a
/// resource is simply absent from the map, never present as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptionCost {
    pub monthly_cost: f64,
    pub savings: f64,
    pub savings_percent: f64,
}

impl OptionCost {
    /// Derive savings and percentage from a (current, candidate) pair.
    /// The percentage is defined as 0 when the current cost is 0.
    pub fn from_costs(current: f64, candidate: f64) -> Self {
        let savings = current - candidate;
        let savings_percent = if current > 0.0 {
            savings / current * 100.0
        } else {
            0.0
        };
        Self {
            monthly_cost: candidate,
            savings,
            savings_percent,
        }
    }
}

/// Per-resource output of the cost calculator: the current monthly cost
/// and every applicable alternative, keyed by stable option label.
#[derive(Debug, Clone, Serialize)]
pub struct CostComparison {
    pub resource_id: String,
    pub resource_name: String,
    pub resource_kind: ResourceKind,
    pub current_monthly_cost: f64,
    pub options: BTreeMap<String, OptionCost>,
}

/// Subscription-level aggregate. For each option the total is directly
/// comparable against the current total: resources without that option
/// contribute their current cost unchanged.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionReport {
    pub currency: String,
    pub vm_count: usize,
    pub disk_count: usize,
    pub current_monthly_cost: f64,
    pub options: BTreeMap<String, OptionCost>,
}

impl SubscriptionReport {
    pub fn empty(currency: String) -> Self {
        Self {
            currency,
            vm_count: 0,
            disk_count: 0,
            current_monthly_cost: 0.0,
            options: BTreeMap::new(),
        }
    }
}
