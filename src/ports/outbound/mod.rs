/// Outbound ports (driven ports) - infrastructure interfaces
///
/// These ports define the interfaces the analysis core uses to reach
/// external systems (ARM inventory API, retail prices API, file system,
/// console).
pub mod inventory_source;
pub mod output_presenter;
pub mod pricing_source;
pub mod progress_reporter;
pub mod report_formatter;

pub use inventory_source::InventorySource;
pub use output_presenter::OutputPresenter;
pub use pricing_source::PricingSource;
pub use progress_reporter::ProgressReporter;
pub use report_formatter::ReportFormatter;
