use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts and CI systems to distinguish between
/// different kinds of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the analysis completed (possibly with an empty inventory)
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (API error, network error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for cost analysis.
///
/// Per-option failures (`UnsupportedUnit`, `SizeExceedsMaximumTier`) are
/// contained by the calculator: they drop one cell from the comparison
/// matrix, never the whole resource or the whole run. `UnsupportedCurrency`
/// and a completely empty price catalog are fatal at the run level.
#[derive(Debug, Error)]
pub enum CostError {
    #[error("Unsupported billing unit: {unit}\n\n💡 Hint: The pricing feed reported a unit of measure this version cannot normalize. The affected SKU/option is omitted from results.")]
    UnsupportedUnit { unit: String },

    #[error("Requested disk size {size_gib} GiB exceeds the largest {family} tier\n\n💡 Hint: The {family} size ladder tops out below this disk; no equivalent tier exists.")]
    SizeExceedsMaximumTier { family: String, size_gib: u64 },

    #[error("Unsupported currency: {code}\n\n💡 Hint: Add an exchange rate for '{code}' to the exchange_rates table in azsm.config.yml, or pick a supported currency.")]
    UnsupportedCurrency { code: String },

    #[error("Duplicate price point for SKU '{sku}' in {region} ({option})")]
    DuplicatePricePoint {
        sku: String,
        region: String,
        option: String,
    },

    #[error("Authentication failed: {details}\n\n💡 Hint: Provide a management-plane bearer token via --access-token or the AZURE_ACCESS_TOKEN environment variable (e.g. from `az account get-access-token`).")]
    AuthenticationError { details: String },

    #[error("Failed to collect resources: {details}")]
    CollectionError { details: String },

    #[error("Pricing service unavailable: {details}\n\n💡 Hint: Check your network connection; prices.azure.com must be reachable.")]
    PricingServiceUnavailable { details: String },

    #[error("Failed to read inventory snapshot: {}\nDetails: {details}\n\n💡 Hint: Pass a file produced by a previous run's --export flag.", path.display())]
    SnapshotError { path: PathBuf, details: String },

    #[error("Failed to write to file: {}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions.", path.display())]
    FileWriteError { path: PathBuf, details: String },
}
