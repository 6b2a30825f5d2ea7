//! Conversion of raw price points into a canonical monthly cost basis.

use crate::cost_analysis::domain::{BillingUnit, PriceEntry};
use crate::shared::CostError;

/// Average hours in a month. The single constant behind every
/// hour-to-month conversion in the engine, so all comparisons share one
/// assumption.
pub const HOURS_PER_MONTH: f64 = 730.0;

/// Convert a raw unit price into the equivalent monthly cost.
///
/// `billed_gib` is the billed capacity for per-GiB-month storage units
/// and is ignored for the other units. Unrecognized units fail with
/// `UnsupportedUnit`; the caller drops that SKU/option from its results
/// instead of defaulting to zero, which would corrupt savings
/// percentages.
pub fn to_monthly(
    unit: &BillingUnit,
    unit_price: f64,
    billed_gib: Option<u64>,
) -> Result<f64, CostError> {
    match unit {
        BillingUnit::PerHour => Ok(unit_price * HOURS_PER_MONTH),
        BillingUnit::PerMonth => Ok(unit_price),
        BillingUnit::PerGibMonth => match billed_gib {
            Some(gib) => Ok(unit_price * gib as f64),
            None => Err(CostError::UnsupportedUnit {
                unit: "1 GiB/Month without a billed size".to_string(),
            }),
        },
        BillingUnit::Other(name) => Err(CostError::UnsupportedUnit { unit: name.clone() }),
    }
}

/// Monthly cost of one price entry.
pub fn entry_monthly(entry: &PriceEntry, billed_gib: Option<u64>) -> Result<f64, CostError> {
    to_monthly(&entry.unit, entry.unit_price, billed_gib)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_hour_scales_by_month_length() {
        let monthly = to_monthly(&BillingUnit::PerHour, 0.192, None).unwrap();
        assert!((monthly - 0.192 * 730.0).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_is_idempotent() {
        let once = to_monthly(&BillingUnit::PerMonth, 17.92, None).unwrap();
        let twice = to_monthly(&BillingUnit::PerMonth, once, None).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once, 17.92);
    }

    #[test]
    fn test_per_gib_month_uses_billed_size() {
        let monthly = to_monthly(&BillingUnit::PerGibMonth, 0.05, Some(128)).unwrap();
        assert!((monthly - 6.4).abs() < 1e-9);
    }

    #[test]
    fn test_per_gib_month_without_size_fails() {
        let result = to_monthly(&BillingUnit::PerGibMonth, 0.05, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_unit_fails_with_unit_name() {
        let unit = BillingUnit::Other("10K Transactions".to_string());
        let err = to_monthly(&unit, 0.01, None).unwrap_err();
        assert!(format!("{}", err).contains("10K Transactions"));
    }
}
