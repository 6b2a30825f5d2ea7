use anyhow::bail;
use azsm::adapters::outbound::console::StderrProgressReporter;
use azsm::adapters::outbound::filesystem::{
    write_snapshot, FileSystemWriter, SnapshotInventorySource, StdoutPresenter,
};
use azsm::adapters::outbound::formatters::{JsonFormatter, TableFormatter};
use azsm::adapters::outbound::network::{ArmInventoryCollector, RetailPricesClient};
use azsm::application::dto::{AnalysisRequest, AnalysisResponse};
use azsm::application::use_cases::AnalyzeCostsUseCase;
use azsm::cli::{Args, OutputFormat};
use azsm::config::{self, ConfigFile};
use azsm::cost_analysis::services::CurrencyConverter;
use azsm::ports::outbound::{InventorySource, OutputPresenter, ReportFormatter};
use azsm::shared::{ExitCode, Result};
use std::path::Path;
use std::process;

/// Hourly Windows Server license cost per vCPU in USD, used for the
/// hybrid benefit estimate when the config file does not override it.
const DEFAULT_WINDOWS_LICENSE_PER_CORE: f64 = 0.046;

fn main() {
    if let Err(e) = run() {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

#[tokio::main]
async fn run() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    let config = load_config(&args)?;

    let currency = args
        .currency
        .clone()
        .or_else(|| config.currency.clone())
        .unwrap_or_else(|| "USD".to_string());
    let overrides = config.exchange_rates.clone().unwrap_or_default();
    let converter = CurrencyConverter::new(&overrides);
    let windows_license_per_core = config
        .windows_license_per_core
        .unwrap_or(DEFAULT_WINDOWS_LICENSE_PER_CORE);
    let amortize_reservations = config.amortize_reservations.unwrap_or(true);

    // Choose the inventory source (Dependency Injection)
    let response = if let Some(snapshot_path) = &args.snapshot {
        let inventory_source = SnapshotInventorySource::new(snapshot_path.clone());
        analyze(
            inventory_source,
            amortize_reservations,
            converter,
            windows_license_per_core,
            currency,
        )
        .await?
    } else {
        let Some(subscription) = args.subscription.clone() else {
            bail!(
                "No analysis target was given.\n\n\
                 💡 Hint: Pass --subscription <ID> to query Azure, or --snapshot <FILE> to analyze an exported inventory."
            );
        };
        let access_token = args
            .access_token
            .clone()
            .or_else(|| std::env::var("AZURE_ACCESS_TOKEN").ok());
        let Some(access_token) = access_token else {
            bail!(
                "No management-plane access token was given.\n\n\
                 💡 Hint: Pass --access-token or set AZURE_ACCESS_TOKEN (e.g., from `az account get-access-token`)."
            );
        };
        let inventory_source = ArmInventoryCollector::new(subscription, access_token)?;
        analyze(
            inventory_source,
            amortize_reservations,
            converter,
            windows_license_per_core,
            currency,
        )
        .await?
    };

    // Export the collected inventory before formatting, so a formatter
    // failure does not lose the snapshot.
    if let Some(export_path) = &args.export {
        write_snapshot(&response.inventory, export_path)?;
        eprintln!("📦 Inventory exported to {}", export_path.display());
    }

    // Create formatter; color only makes sense on a terminal
    let formatter: Box<dyn ReportFormatter> = match args.format {
        OutputFormat::Json => Box::new(JsonFormatter::new()),
        OutputFormat::Table if args.output.is_some() => Box::new(TableFormatter::plain()),
        OutputFormat::Table => Box::new(TableFormatter::new()),
    };
    let formatted_output = formatter.format(&response.report, &response.comparisons)?;

    // Present output
    let presenter: Box<dyn OutputPresenter> = if let Some(output_path) = args.output {
        Box::new(FileSystemWriter::new(output_path))
    } else {
        Box::new(StdoutPresenter::new())
    };

    presenter.present(&formatted_output)?;

    Ok(())
}

async fn analyze<IS: InventorySource>(
    inventory_source: IS,
    amortize_reservations: bool,
    converter: CurrencyConverter,
    windows_license_per_core: f64,
    currency: String,
) -> Result<AnalysisResponse> {
    let pricing_source = RetailPricesClient::new(amortize_reservations)?;
    let progress_reporter = StderrProgressReporter::new();

    let use_case = AnalyzeCostsUseCase::new(
        inventory_source,
        pricing_source,
        progress_reporter,
        converter,
        windows_license_per_core,
    );

    use_case.execute(AnalysisRequest::new(currency)).await
}

fn load_config(args: &Args) -> Result<ConfigFile> {
    match &args.config {
        Some(path) => config::load_config_from_path(path),
        None => Ok(config::discover_config(Path::new("."))?.unwrap_or_default()),
    }
}
