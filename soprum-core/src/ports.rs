//! Traits describing backend capabilities and shared query types.

use std::collections::HashMap;
use std::io::Error as IoError;

use async_trait::async_trait;
use reqwest::Error as ReqwestError;
use rust_decimal::Decimal;
use serde_json::Error as JsonError;

use crate::model::{ContainerAssignment, MunicipalityId, Property, PropertyId, PropertyType};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to backends.
pub enum PortError {
    /// Network layer failed.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Backend data could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] JsonError),
    /// Reading backend data from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
    /// Internal backend error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Query parameters for selecting comparable properties.
pub struct PeerQuery {
    /// Property type peers must share.
    pub property_type: PropertyType,
    /// Municipality peers must share.
    pub municipality_id: MunicipalityId,
    /// Lowest accepted apartment count (inclusive).
    pub min_apartments: u32,
    /// Highest accepted apartment count (inclusive).
    pub max_apartments: u32,
    /// Property left out of the result.
    pub exclude: PropertyId,
}

impl PeerQuery {
    /// Check whether `property` satisfies the query.
    #[must_use]
    pub fn matches(&self, property: &Property) -> bool {
        property.id != self.exclude
            && property.property_type == self.property_type
            && property.municipality_id == self.municipality_id
            && (self.min_apartments..=self.max_apartments).contains(&property.number_of_apartments)
    }
}

#[async_trait]
/// Property directory.
pub trait PropertyPort: Send + Sync {
    /// Load a single property, `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the backend request fails.
    async fn property(&self, id: PropertyId) -> Result<Option<Property>, PortError>;

    /// Load the candidate peers described by `query`.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the backend request fails.
    async fn peers(&self, query: &PeerQuery) -> Result<Vec<Property>, PortError>;

    /// Load every property owned by `username`.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the backend request fails.
    async fn properties_for_user(&self, username: &str) -> Result<Vec<Property>, PortError>;
}

#[async_trait]
/// Container assignment ledger joined with the container-plan catalog.
pub trait ContainerPort: Send + Sync {
    /// Containers currently assigned to one property.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the backend request fails.
    async fn assignments(&self, id: PropertyId) -> Result<Vec<ContainerAssignment>, PortError>;

    /// Containers for several properties in one round trip, keyed by property id.
    ///
    /// Properties without containers may be missing from the map.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the backend request fails.
    async fn assignments_for(
        &self,
        ids: &[PropertyId],
    ) -> Result<HashMap<PropertyId, Vec<ContainerAssignment>>, PortError>;
}

#[async_trait]
/// Municipal collection-fee lookup.
pub trait FeePort: Send + Sync {
    /// Annual collection fee for `property`, already adjusted for its access path.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when no fee can be determined.
    async fn collection_fee(&self, property: &Property) -> Result<Decimal, PortError>;
}
