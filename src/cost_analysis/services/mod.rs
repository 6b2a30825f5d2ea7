pub mod aggregator;
pub mod cost_calculator;
pub mod currency_converter;
pub mod unit_normalizer;

pub use aggregator::aggregate;
pub use cost_calculator::CostCalculator;
pub use currency_converter::CurrencyConverter;
pub use unit_normalizer::HOURS_PER_MONTH;
