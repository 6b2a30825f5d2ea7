use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::time::Duration;

use crate::cost_analysis::domain::{
    vm_price_sku, BillingUnit, DiskFamily, Inventory, OsKind, PriceCatalog, PriceEntry,
    PurchaseOption, Resource,
};
use crate::ports::outbound::PricingSource;
use crate::shared::{CostError, Result};

const API_URL: &str = "https://prices.azure.com/api/retail/prices";
const API_VERSION: &str = "2023-01-01-preview";

/// Concurrency cap for price queries, to avoid hammering the endpoint.
const MAX_CONCURRENT_QUERIES: usize = 10;

const HOURS_PER_YEAR: f64 = 8760.0;

/// One row of the retail prices feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RetailPriceRow {
    #[serde(default)]
    retail_price: f64,
    #[serde(default)]
    arm_sku_name: String,
    #[serde(default)]
    arm_region_name: String,
    #[serde(default)]
    meter_name: String,
    #[serde(default)]
    product_name: String,
    #[serde(rename = "type", default)]
    price_type: String,
    #[serde(default)]
    unit_of_measure: String,
    #[serde(default)]
    reservation_term: Option<String>,
    #[serde(default)]
    savings_plan: Option<Vec<SavingsPlanRow>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavingsPlanRow {
    #[serde(default)]
    retail_price: f64,
    #[serde(default)]
    term: String,
}

#[derive(Debug, Deserialize)]
struct RetailPricesPage {
    #[serde(rename = "Items", default)]
    items: Vec<RetailPriceRow>,
    #[serde(rename = "NextPageLink", default)]
    next_page_link: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryKind {
    VirtualMachine,
    Disk,
}

/// Client for the public Azure Retail Prices API.
///
/// Prices are always requested in USD, the engine's canonical currency;
/// display-currency conversion happens in the core. One OData query is
/// issued per (region, VM size) and per (region, disk tier), fanned out
/// with bounded concurrency and `NextPageLink` pagination. Individual
/// query failures degrade to a partial catalog.
pub struct RetailPricesClient {
    client: reqwest::Client,
    max_retries: u32,
    /// When set (the default), reservation rows are treated as term-total
    /// prices and amortized to an hourly rate before entering the
    /// catalog. Savings plan rows are hourly rates as quoted.
    amortize_reservations: bool,
    /// Fetched rows per filter, shared across the concurrent fan-out so a
    /// filter requested twice in one run hits the network once.
    cache: DashMap<String, Vec<RetailPriceRow>>,
}

impl RetailPricesClient {
    pub fn new(amortize_reservations: bool) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!("azsm/{}", version))
            .build()?;
        Ok(Self {
            client,
            max_retries: 3,
            amortize_reservations,
            cache: DashMap::new(),
        })
    }

    /// Fetches all pages for one filter, retrying transient failures with
    /// a linear backoff.
    async fn fetch_with_retry(&self, filter: &str) -> Result<Vec<RetailPriceRow>> {
        if let Some(rows) = self.cache.get(filter) {
            return Ok(rows.clone());
        }

        let mut last_error = None;
        for attempt in 1..=self.max_retries {
            match self.fetch_all_pages(filter).await {
                Ok(rows) => {
                    self.cache.insert(filter.to_string(), rows.clone());
                    return Ok(rows);
                }
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    }
                }
            }
        }
        Err(last_error
            .unwrap_or_else(|| anyhow::anyhow!("price query failed with no attempts made")))
    }

    async fn fetch_all_pages(&self, filter: &str) -> Result<Vec<RetailPriceRow>> {
        let mut all_rows = Vec::new();
        let mut url = format!(
            "{}?api-version={}&currencyCode=USD&$filter={}",
            API_URL,
            API_VERSION,
            urlencoding::encode(filter)
        );

        loop {
            let response = self.client.get(&url).send().await?;
            if !response.status().is_success() {
                anyhow::bail!(
                    "Retail prices API returned status code {}",
                    response.status()
                );
            }
            let page: RetailPricesPage = response.json().await?;
            all_rows.extend(page.items);

            match page.next_page_link {
                Some(next) if !next.is_empty() => url = next,
                _ => break,
            }
        }
        Ok(all_rows)
    }

    /// Collect the distinct filters the inventory needs, paired with the
    /// mapper that will interpret their rows.
    fn build_queries(inventory: &Inventory) -> Vec<(QueryKind, String)> {
        let mut vm_queries = BTreeSet::new();
        let mut disk_queries = BTreeSet::new();

        for resource in &inventory.resources {
            match resource {
                Resource::VirtualMachine(vm) => {
                    vm_queries.insert(format!(
                        "armRegionName eq '{}' and armSkuName eq '{}' and serviceName eq 'Virtual Machines'",
                        vm.region, vm.size
                    ));
                }
                Resource::ManagedDisk(disk) => {
                    // One tier query per family: the disk's own tier plus
                    // the GiB-equivalent tier in each alternative family.
                    let mut families = vec![disk.family];
                    families.extend(disk.family.others());
                    for family in families {
                        let Ok(tier) = family.resolve(disk.size_gib) else {
                            continue;
                        };
                        disk_queries.insert(format!(
                            "armRegionName eq '{}' and serviceFamily eq 'Storage' and productName eq '{}' and meterName eq '{} LRS Disk'",
                            disk.region,
                            family.product_name(),
                            tier.code
                        ));
                    }
                }
            }
        }

        vm_queries
            .into_iter()
            .map(|q| (QueryKind::VirtualMachine, q))
            .chain(disk_queries.into_iter().map(|q| (QueryKind::Disk, q)))
            .collect()
    }

    fn insert_row(&self, catalog: &mut PriceCatalog, kind: QueryKind, row: &RetailPriceRow) {
        match kind {
            QueryKind::VirtualMachine => self.insert_vm_row(catalog, row),
            QueryKind::Disk => self.insert_disk_row(catalog, row),
        }
    }

    fn insert_vm_row(&self, catalog: &mut PriceCatalog, row: &RetailPriceRow) {
        // Dev/Test rates are not generally purchasable.
        if row.price_type == "DevTestConsumption" {
            return;
        }

        let os = if row.product_name.contains("Windows") {
            OsKind::Windows
        } else {
            OsKind::Linux
        };
        let sku = vm_price_sku(&row.arm_sku_name, os);

        if row.price_type == "Consumption" {
            let option = if row.meter_name.contains("Spot") {
                PurchaseOption::Spot
            } else if row.meter_name.contains("Low Priority") {
                PurchaseOption::LowPriority
            } else {
                PurchaseOption::PayAsYouGo
            };
            let _ = catalog.insert(PriceEntry {
                sku: sku.clone(),
                region: row.arm_region_name.clone(),
                unit: BillingUnit::parse(&row.unit_of_measure),
                unit_price: row.retail_price,
                option,
            });

            // Savings plan rates ride along on the on-demand row, quoted
            // as already-discounted hourly rates.
            if option == PurchaseOption::PayAsYouGo {
                for plan in row.savings_plan.iter().flatten() {
                    let Some(option) = savings_plan_option(&plan.term) else {
                        continue;
                    };
                    let _ = catalog.insert(PriceEntry {
                        sku: sku.clone(),
                        region: row.arm_region_name.clone(),
                        unit: BillingUnit::PerHour,
                        unit_price: plan.retail_price,
                        option,
                    });
                }
            }
        } else if row.price_type == "Reservation" {
            let Some((option, years)) = reservation_option(row.reservation_term.as_deref()) else {
                return;
            };
            let unit_price = if self.amortize_reservations {
                row.retail_price / (years * HOURS_PER_YEAR)
            } else {
                row.retail_price
            };
            let _ = catalog.insert(PriceEntry {
                sku,
                region: row.arm_region_name.clone(),
                unit: BillingUnit::PerHour,
                unit_price,
                option,
            });
        }
    }

    fn insert_disk_row(&self, catalog: &mut PriceCatalog, row: &RetailPriceRow) {
        // Disk meters look like "P10 LRS Disk"; the tier code keys the
        // catalog, matching the resolver's output.
        let Some(tier_code) = row.meter_name.split_whitespace().next() else {
            return;
        };

        let option = match row.price_type.as_str() {
            "Consumption" => PurchaseOption::PayAsYouGo,
            "Reservation" if row.reservation_term.as_deref() == Some("1 Year") => {
                PurchaseOption::Reservation1Yr
            }
            _ => return,
        };

        let _ = catalog.insert(PriceEntry {
            sku: tier_code.to_string(),
            region: row.arm_region_name.clone(),
            unit: BillingUnit::parse(&row.unit_of_measure),
            unit_price: row.retail_price,
            option,
        });
    }
}

fn savings_plan_option(term: &str) -> Option<PurchaseOption> {
    match term {
        "1 Year" => Some(PurchaseOption::SavingsPlan1Yr),
        "3 Years" => Some(PurchaseOption::SavingsPlan3Yr),
        _ => None,
    }
}

fn reservation_option(term: Option<&str>) -> Option<(PurchaseOption, f64)> {
    match term {
        Some("1 Year") => Some((PurchaseOption::Reservation1Yr, 1.0)),
        Some("3 Years") => Some((PurchaseOption::Reservation3Yr, 3.0)),
        _ => None,
    }
}

#[async_trait]
impl PricingSource for RetailPricesClient {
    async fn fetch_catalog(&self, inventory: &Inventory) -> Result<PriceCatalog> {
        use futures::stream::{self, StreamExt};

        let queries = Self::build_queries(inventory);
        let total = queries.len();

        let results: Vec<(QueryKind, Result<Vec<RetailPriceRow>>)> =
            stream::iter(queries.into_iter())
                .map(|(kind, filter)| async move {
                    (kind, self.fetch_with_retry(&filter).await)
                })
                .buffer_unordered(MAX_CONCURRENT_QUERIES)
                .collect()
                .await;

        let mut catalog = PriceCatalog::new();
        let mut failures = 0usize;
        let mut last_error = None;
        for (kind, result) in results {
            match result {
                Ok(rows) => {
                    for row in &rows {
                        self.insert_row(&mut catalog, kind, row);
                    }
                }
                Err(e) => {
                    failures += 1;
                    last_error = Some(e);
                }
            }
        }

        // A partial catalog is usable; an entirely failed fetch is not.
        if catalog.is_empty() && failures > 0 && total > 0 {
            let details = last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "all price queries failed".to_string());
            return Err(CostError::PricingServiceUnavailable { details }.into());
        }

        Ok(catalog)
    }
}
