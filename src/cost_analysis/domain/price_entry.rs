use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::resource::OsKind;
use crate::shared::CostError;

/// Billing unit of one price point, parsed from the feed's
/// `unitOfMeasure` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillingUnit {
    PerHour,
    PerMonth,
    PerGibMonth,
    /// Anything the normalizer does not recognize. Kept verbatim so the
    /// `UnsupportedUnit` error can name it.
    Other(String),
}

impl BillingUnit {
    /// Parse a `unitOfMeasure` string from the retail prices feed.
    pub fn parse(unit_of_measure: &str) -> Self {
        match unit_of_measure.trim() {
            "1 Hour" => BillingUnit::PerHour,
            "1/Month" | "1 Month" => BillingUnit::PerMonth,
            "1 GiB/Month" | "1 GB/Month" => BillingUnit::PerGibMonth,
            other => BillingUnit::Other(other.to_string()),
        }
    }
}

/// Purchase option tag distinguishing otherwise-identical SKUs.
///
/// `HybridBenefit` is derived by the calculator (on-demand minus the
/// Windows license component) and never appears in the price feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PurchaseOption {
    PayAsYouGo,
    Spot,
    LowPriority,
    SavingsPlan1Yr,
    SavingsPlan3Yr,
    Reservation1Yr,
    Reservation3Yr,
    HybridBenefit,
}

impl PurchaseOption {
    /// Stable display label, used as the key in comparison maps so that
    /// per-resource and aggregate rows line up.
    pub fn label(&self) -> &'static str {
        match self {
            PurchaseOption::PayAsYouGo => "Pay as you go",
            PurchaseOption::Spot => "Spot",
            PurchaseOption::LowPriority => "Low Priority",
            PurchaseOption::SavingsPlan1Yr => "Savings Plan (1 Yr)",
            PurchaseOption::SavingsPlan3Yr => "Savings Plan (3 Yr)",
            PurchaseOption::Reservation1Yr => "Reservation (1 Yr)",
            PurchaseOption::Reservation3Yr => "Reservation (3 Yr)",
            PurchaseOption::HybridBenefit => "Hybrid Benefit",
        }
    }
}

/// One quoted price point from the pricing feed, in the feed's canonical
/// currency (USD).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceEntry {
    pub sku: String,
    pub region: String,
    pub unit: BillingUnit,
    pub unit_price: f64,
    pub option: PurchaseOption,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PriceKey {
    sku: String,
    region: String,
    option: PurchaseOption,
}

/// Immutable priced catalog for one analysis run, keyed by
/// (SKU, region, option).
///
/// Built once by the pricing adapter and threaded through each call; the
/// orchestrator owns its lifecycle, there is no process-wide cache.
#[derive(Debug, Default)]
pub struct PriceCatalog {
    entries: HashMap<PriceKey, PriceEntry>,
}

impl PriceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one price point. The compound key must be unique; a second
    /// entry for the same (SKU, region, option) is rejected so a noisy
    /// feed cannot silently overwrite a price.
    pub fn insert(&mut self, entry: PriceEntry) -> Result<(), CostError> {
        let key = PriceKey {
            sku: entry.sku.clone(),
            region: entry.region.clone(),
            option: entry.option,
        };
        if self.entries.contains_key(&key) {
            return Err(CostError::DuplicatePricePoint {
                sku: entry.sku,
                region: entry.region,
                option: entry.option.label().to_string(),
            });
        }
        self.entries.insert(key, entry);
        Ok(())
    }

    pub fn get(&self, sku: &str, region: &str, option: PurchaseOption) -> Option<&PriceEntry> {
        let key = PriceKey {
            sku: sku.to_string(),
            region: region.to_string(),
            option,
        };
        self.entries.get(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Catalog SKU for a VM price point. Windows and Linux meters share the
/// same `armSkuName`, so the OS is folded into the catalog key here; the
/// pricing adapter and the calculator must both go through this helper.
pub fn vm_price_sku(size: &str, os: OsKind) -> String {
    match os {
        OsKind::Linux => size.to_string(),
        OsKind::Windows => format!("{} (Windows)", size),
    }
}
