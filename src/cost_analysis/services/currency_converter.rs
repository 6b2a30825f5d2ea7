//! Rescaling of canonical-currency (USD) amounts into the display
//! currency.

use std::collections::HashMap;

use crate::cost_analysis::domain::{CostComparison, OptionCost};
use crate::shared::CostError;

/// The currency every price in the catalog is quoted in.
pub const CANONICAL_CURRENCY: &str = "USD";

/// Built-in USD exchange-rate table. Overridable (and extendable) through
/// the `exchange_rates` section of azsm.config.yml; rates drift, so treat
/// these as defaults for a tool, not market data.
const DEFAULT_RATES: &[(&str, f64)] = &[
    ("AUD", 1.52),
    ("BRL", 5.43),
    ("GBP", 0.76),
    ("CAD", 1.37),
    ("CNY", 7.13),
    ("DKK", 6.43),
    ("EUR", 0.86),
    ("INR", 87.6),
    ("JPY", 147.1),
    ("KRW", 1388.0),
    ("NZD", 1.69),
    ("NOK", 10.1),
    ("SEK", 9.53),
    ("CHF", 0.80),
    ("TWD", 30.4),
    ("USD", 1.0),
];

/// Converts canonical-currency amounts using a fixed rate table supplied
/// at construction. A missing target currency is fatal for report
/// generation; there is no sensible partial report in the wrong currency.
#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    rates: HashMap<String, f64>,
}

impl CurrencyConverter {
    /// Build from the default table plus any overrides.
    pub fn new(overrides: &HashMap<String, f64>) -> Self {
        let mut rates: HashMap<String, f64> = DEFAULT_RATES
            .iter()
            .map(|(code, rate)| (code.to_string(), *rate))
            .collect();
        for (code, rate) in overrides {
            rates.insert(code.to_uppercase(), *rate);
        }
        // The canonical currency is always convertible to itself.
        rates.insert(CANONICAL_CURRENCY.to_string(), 1.0);
        Self { rates }
    }

    pub fn with_default_rates() -> Self {
        Self::new(&HashMap::new())
    }

    /// Exchange rate for a target currency, or `UnsupportedCurrency`.
    pub fn rate(&self, code: &str) -> Result<f64, CostError> {
        self.rates
            .get(&code.to_uppercase())
            .copied()
            .ok_or_else(|| CostError::UnsupportedCurrency {
                code: code.to_string(),
            })
    }

    pub fn convert(&self, amount: f64, code: &str) -> Result<f64, CostError> {
        Ok(amount * self.rate(code)?)
    }

    /// Rescale every cost and savings figure in a comparison. Percentages
    /// are ratios and carry over unchanged.
    pub fn convert_comparison(
        &self,
        comparison: &CostComparison,
        code: &str,
    ) -> Result<CostComparison, CostError> {
        let rate = self.rate(code)?;
        let options = comparison
            .options
            .iter()
            .map(|(label, cost)| {
                (
                    label.clone(),
                    OptionCost {
                        monthly_cost: cost.monthly_cost * rate,
                        savings: cost.savings * rate,
                        savings_percent: cost.savings_percent,
                    },
                )
            })
            .collect();
        Ok(CostComparison {
            resource_id: comparison.resource_id.clone(),
            resource_name: comparison.resource_name.clone(),
            resource_kind: comparison.resource_kind,
            current_monthly_cost: comparison.current_monthly_cost * rate,
            options,
        })
    }
}
