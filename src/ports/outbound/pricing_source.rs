use async_trait::async_trait;

use crate::cost_analysis::domain::{Inventory, PriceCatalog};
use crate::shared::Result;

/// PricingSource port for building the priced catalog an analysis run
/// needs, driven by the SKUs and regions present in the inventory.
///
/// Implementations degrade to a partial catalog when individual price
/// queries fail; only a completely unreachable service surfaces as
/// `PricingServiceUnavailable`.
#[async_trait]
pub trait PricingSource {
    async fn fetch_catalog(&self, inventory: &Inventory) -> Result<PriceCatalog>;
}
