//! Bundle of ports implementing one data backend.

use std::sync::Arc;

use crate::ports::{ContainerPort, FeePort, PropertyPort};

/// Collection of ports the calculators read from.
#[derive(Clone)]
pub struct Backend {
    /// Property directory and peer selection.
    pub property_port: Arc<dyn PropertyPort>,
    /// Container assignments joined with the plan catalog.
    pub container_port: Arc<dyn ContainerPort>,
    /// Collection-fee lookup.
    pub fee_port: Arc<dyn FeePort>,
}

impl Backend {
    /// Build a backend from a single store implementing every port.
    #[must_use]
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: PropertyPort + ContainerPort + FeePort + 'static,
    {
        Self {
            property_port: Arc::<S>::clone(&store),
            container_port: Arc::<S>::clone(&store),
            fee_port: store,
        }
    }
}
