//! Core types and service wiring for the soprum waste-room cost analytics.

/// Running accumulators and per-property container profiles.
pub mod aggregate;
/// Bundle of ports a backend provides to the calculators.
pub mod backend;
/// Peer selection and the four comparison reports.
pub mod comparison;
/// Annual waste-management cost per property.
pub mod cost;
/// Errors surfaced by the calculators.
pub mod error;
/// Domain models and identifiers shared by all backends.
pub mod model;
/// Decimal rounding and percentage helpers.
pub mod money;
/// Traits describing the backend interfaces.
pub mod ports;
/// Derived report structures returned to clients.
pub mod report;
/// High-level service facade used by clients.
pub mod service;

#[cfg(test)]
mod testing;

pub use backend::*;
pub use comparison::*;
pub use cost::*;
pub use error::*;
pub use model::*;
pub use ports::*;
pub use report::*;
pub use service::*;
