use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'table' or 'json'",
                s
            )),
        }
    }
}

/// Analyze an Azure subscription's compute and storage spend and compare
/// it against spot, low-priority, savings-plan, reservation, hybrid
/// benefit and cheaper disk-tier pricing.
#[derive(Parser, Debug)]
#[command(name = "azsm")]
#[command(version)]
#[command(about = "Azure subscription cost analyzer", long_about = None)]
pub struct Args {
    /// Azure subscription ID to analyze (required unless --snapshot is used)
    #[arg(short, long)]
    pub subscription: Option<String>,

    /// Analyze a previously exported inventory snapshot instead of
    /// querying ARM
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// Management-plane bearer token (falls back to the
    /// AZURE_ACCESS_TOKEN environment variable)
    #[arg(long)]
    pub access_token: Option<String>,

    /// Display currency for the report (defaults to USD, or the config
    /// file's `currency` when set)
    #[arg(short, long)]
    pub currency: Option<String>,

    /// Output format: table or json
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Export the collected inventory as a JSON snapshot
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Path to a config file (defaults to ./azsm.config.yml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
