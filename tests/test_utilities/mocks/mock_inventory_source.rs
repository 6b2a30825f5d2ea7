use async_trait::async_trait;
use azsm::prelude::*;
use azsm::shared::CostError;

/// Mock InventorySource that serves a pre-built inventory, or fails.
pub struct MockInventorySource {
    inventory: Option<Inventory>,
}

impl MockInventorySource {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inventory: Some(inventory),
        }
    }

    /// A source whose listing call always fails.
    pub fn failing() -> Self {
        Self { inventory: None }
    }
}

#[async_trait]
impl InventorySource for MockInventorySource {
    async fn collect(&self) -> Result<Inventory> {
        match &self.inventory {
            Some(inventory) => Ok(inventory.clone()),
            None => Err(CostError::CollectionError {
                details: "mock listing failure".to_string(),
            }
            .into()),
        }
    }
}
