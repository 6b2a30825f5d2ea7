pub mod comparison;
pub mod disk_tier;
pub mod price_entry;
pub mod resource;

pub use comparison::{CostComparison, OptionCost, SubscriptionReport};
pub use disk_tier::{DiskFamily, DiskTier};
pub use price_entry::{vm_price_sku, BillingUnit, PriceCatalog, PriceEntry, PurchaseOption};
pub use resource::{
    Inventory, InventoryMetadata, ManagedDisk, OsKind, Resource, ResourceKind, VirtualMachine,
};
