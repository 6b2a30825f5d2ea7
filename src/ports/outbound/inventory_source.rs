use async_trait::async_trait;

use crate::cost_analysis::domain::Inventory;
use crate::shared::Result;

/// InventorySource port for collecting the resource inventory of one
/// subscription.
///
/// An empty inventory means "nothing to analyze", not an error.
/// Implementations fail with `AuthenticationError` or `CollectionError`
/// when the underlying listing calls cannot complete.
#[async_trait]
pub trait InventorySource {
    async fn collect(&self) -> Result<Inventory>;
}
