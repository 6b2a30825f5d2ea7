use crate::cost_analysis::domain::{CostComparison, Inventory, SubscriptionReport};

/// Input to the cost analysis use case.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Display currency for every figure in the result.
    pub currency: String,
}

impl AnalysisRequest {
    pub fn new(currency: String) -> Self {
        Self { currency }
    }
}

/// Output of the cost analysis use case: the aggregate report, the
/// per-resource comparisons behind it, and the inventory they were
/// computed from (so the caller can export it).
#[derive(Debug, Clone)]
pub struct AnalysisResponse {
    pub inventory: Inventory,
    pub report: SubscriptionReport,
    pub comparisons: Vec<CostComparison>,
}
