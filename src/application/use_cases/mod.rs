pub mod analyze_costs;

pub use analyze_costs::AnalyzeCostsUseCase;
