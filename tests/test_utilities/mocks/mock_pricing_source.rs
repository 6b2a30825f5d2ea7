use async_trait::async_trait;
use azsm::cost_analysis::domain::BillingUnit;
use azsm::prelude::*;
use azsm::shared::CostError;

/// Mock PricingSource built from a fixed list of price points.
///
/// The catalog is rebuilt on every `fetch_catalog` call because
/// `PriceCatalog` is single-run state, not shared state.
pub struct MockPricingSource {
    entries: Vec<PriceEntry>,
    fail: bool,
}

impl MockPricingSource {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            fail: false,
        }
    }

    /// A source whose pricing service is entirely unreachable.
    pub fn unavailable() -> Self {
        Self {
            entries: Vec::new(),
            fail: true,
        }
    }

    /// Add an hourly VM price point.
    pub fn with_hourly_price(
        mut self,
        sku: &str,
        region: &str,
        option: PurchaseOption,
        unit_price: f64,
    ) -> Self {
        self.entries.push(PriceEntry {
            sku: sku.to_string(),
            region: region.to_string(),
            unit: BillingUnit::PerHour,
            unit_price,
            option,
        });
        self
    }

    /// Add a monthly disk-tier price point.
    pub fn with_monthly_price(
        mut self,
        sku: &str,
        region: &str,
        option: PurchaseOption,
        unit_price: f64,
    ) -> Self {
        self.entries.push(PriceEntry {
            sku: sku.to_string(),
            region: region.to_string(),
            unit: BillingUnit::PerMonth,
            unit_price,
            option,
        });
        self
    }
}

impl Default for MockPricingSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PricingSource for MockPricingSource {
    async fn fetch_catalog(&self, _inventory: &Inventory) -> Result<PriceCatalog> {
        if self.fail {
            return Err(CostError::PricingServiceUnavailable {
                details: "mock pricing outage".to_string(),
            }
            .into());
        }
        let mut catalog = PriceCatalog::new();
        for entry in &self.entries {
            catalog.insert(entry.clone())?;
        }
        Ok(catalog)
    }
}
