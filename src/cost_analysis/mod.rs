//! The cost reconciliation engine: domain model plus the pure services
//! that turn an inventory snapshot and a priced catalog into per-resource
//! comparisons and a subscription-level report.

pub mod domain;
pub mod services;
