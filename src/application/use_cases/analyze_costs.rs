use crate::application::dto::{AnalysisRequest, AnalysisResponse};
use crate::cost_analysis::domain::SubscriptionReport;
use crate::cost_analysis::services::{aggregate, CostCalculator, CurrencyConverter};
use crate::ports::outbound::{InventorySource, PricingSource, ProgressReporter};
use crate::shared::Result;

/// AnalyzeCostsUseCase - the one-run orchestrator.
///
/// Collects the inventory, builds the priced catalog, runs the calculator
/// over every resource, converts to the display currency and aggregates.
/// Generic dependency injection over the infrastructure ports keeps the
/// whole pipeline testable with in-memory fakes.
///
/// # Type Parameters
/// * `IS` - InventorySource implementation
/// * `PS` - PricingSource implementation
/// * `PR` - ProgressReporter implementation
pub struct AnalyzeCostsUseCase<IS, PS, PR> {
    inventory_source: IS,
    pricing_source: PS,
    progress_reporter: PR,
    converter: CurrencyConverter,
    windows_license_per_core: f64,
}

impl<IS, PS, PR> AnalyzeCostsUseCase<IS, PS, PR>
where
    IS: InventorySource,
    PS: PricingSource,
    PR: ProgressReporter,
{
    pub fn new(
        inventory_source: IS,
        pricing_source: PS,
        progress_reporter: PR,
        converter: CurrencyConverter,
        windows_license_per_core: f64,
    ) -> Self {
        Self {
            inventory_source,
            pricing_source,
            progress_reporter,
            converter,
            windows_license_per_core,
        }
    }

    pub async fn execute(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        // Currency resolution is fatal; fail before any network work.
        self.converter.rate(&request.currency)?;

        self.progress_reporter.report("📡 Collecting resources...");
        let inventory = self.inventory_source.collect().await?;
        self.progress_reporter.report(&format!(
            "✅ Found {} virtual machine(s) and {} managed disk(s)",
            inventory.vm_count(),
            inventory.disk_count()
        ));

        // Nothing to analyze is a clean, empty result.
        if inventory.is_empty() {
            self.progress_reporter
                .report_completion("Nothing to analyze: the subscription has no resources.");
            return Ok(AnalysisResponse {
                inventory,
                report: SubscriptionReport::empty(request.currency),
                comparisons: vec![],
            });
        }

        self.progress_reporter.report("💰 Fetching price data...");
        let catalog = self.pricing_source.fetch_catalog(&inventory).await?;
        if catalog.is_empty() {
            anyhow::bail!(
                "No usable price data was retrieved for this inventory; cannot produce a report."
            );
        }
        self.progress_reporter
            .report(&format!("✅ Priced catalog holds {} entries", catalog.len()));

        let calculator = CostCalculator::new(&catalog, self.windows_license_per_core);
        let total = inventory.resources.len();
        let mut comparisons = Vec::with_capacity(total);
        for (index, resource) in inventory.resources.iter().enumerate() {
            self.progress_reporter
                .report_progress(index + 1, total, Some(resource.name()));
            match calculator.compare(resource) {
                Some(comparison) => {
                    comparisons.push(self.converter.convert_comparison(&comparison, &request.currency)?)
                }
                None => self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: no usable price for '{}' ({}); resource skipped.",
                    resource.name(),
                    resource.region()
                )),
            }
        }

        let report = aggregate(&comparisons, &request.currency);
        self.progress_reporter.report_completion(&format!(
            "Analyzed {} of {} resource(s).",
            comparisons.len(),
            total
        ));

        Ok(AnalysisResponse {
            inventory,
            report,
            comparisons,
        })
    }
}
