//! azsm - Azure subscription cost analyzer
//!
//! This library collects the virtual machines and managed disks in an
//! Azure subscription, prices each one against the public retail prices
//! catalog, and reports how the current monthly spend compares to spot,
//! low-priority, savings-plan, reservation, hybrid-benefit and cheaper
//! disk-tier alternatives. It follows hexagonal architecture and
//! Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`cost_analysis`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use azsm::prelude::*;
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Create adapters
//! let inventory_source = SnapshotInventorySource::new(PathBuf::from("resources.json"));
//! let pricing_source = RetailPricesClient::new(true)?;
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = AnalyzeCostsUseCase::new(
//!     inventory_source,
//!     pricing_source,
//!     progress_reporter,
//!     CurrencyConverter::with_default_rates(),
//!     0.046,
//! );
//!
//! // Execute
//! let request = AnalysisRequest::new("USD".to_string());
//! let response = use_case.execute(request).await?;
//!
//! // Format output
//! let formatter = TableFormatter::new();
//! let output = formatter.format(&response.report, &response.comparisons)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod cost_analysis;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        read_snapshot, write_snapshot, FileSystemWriter, SnapshotInventorySource, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TableFormatter};
    pub use crate::adapters::outbound::network::{ArmInventoryCollector, RetailPricesClient};
    pub use crate::application::dto::{AnalysisRequest, AnalysisResponse};
    pub use crate::application::use_cases::AnalyzeCostsUseCase;
    pub use crate::cost_analysis::domain::{
        CostComparison, DiskFamily, DiskTier, Inventory, ManagedDisk, OptionCost, OsKind,
        PriceCatalog, PriceEntry, PurchaseOption, Resource, ResourceKind, SubscriptionReport,
        VirtualMachine,
    };
    pub use crate::cost_analysis::services::{
        aggregate, CostCalculator, CurrencyConverter, HOURS_PER_MONTH,
    };
    pub use crate::ports::outbound::{
        InventorySource, OutputPresenter, PricingSource, ProgressReporter, ReportFormatter,
    };
    pub use crate::shared::Result;
}
