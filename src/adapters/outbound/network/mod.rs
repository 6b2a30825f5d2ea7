pub mod arm_collector;
pub mod retail_prices;

pub use arm_collector::ArmInventoryCollector;
pub use retail_prices::RetailPricesClient;
