//! Errors surfaced by the cost calculator and the comparison engine.

use crate::model::PropertyId;
use crate::ports::PortError;

#[derive(thiserror::Error, Debug)]
/// Errors returned by the analytics operations.
pub enum AnalyticsError {
    /// The requested property does not exist.
    #[error("Property {0} not found")]
    PropertyNotFound(PropertyId),
    /// The user owns no properties.
    #[error("No properties found for user {0}")]
    NoPropertiesForUser(String),
    /// A backend call failed.
    #[error(transparent)]
    Port(#[from] PortError),
}

impl AnalyticsError {
    /// Whether the error means the requested data does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AnalyticsError::PropertyNotFound(_) | AnalyticsError::NoPropertiesForUser(_)
        )
    }
}
