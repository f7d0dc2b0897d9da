//! Backend serving properties, container plans, and fees from a JSON dataset.
//!
//! The dataset is loaded once and answered from memory. Assignments pointing at
//! a plan missing from the catalog are returned without a resolved plan.

/// Municipal collection-fee tariffs.
pub mod tariff;

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use soprum_core::{
    backend::Backend,
    model::{
        ContainerAssignment, ContainerPlan, ContainerPlanId, MunicipalityId, Property, PropertyId,
    },
    ports::{ContainerPort, FeePort, PeerQuery, PortError, PropertyPort},
};

use crate::tariff::Tariff;

/// Assignment row as stored in the dataset.
#[derive(Debug, Clone, Deserialize)]
struct AssignmentRow {
    property_id: PropertyId,
    plan_id: ContainerPlanId,
    count: u32,
}

/// Dataset file layout.
#[derive(Debug, Deserialize)]
struct Dataset {
    properties: Vec<Property>,
    #[serde(default)]
    container_plans: Vec<ContainerPlan>,
    #[serde(default)]
    assignments: Vec<AssignmentRow>,
    #[serde(default)]
    owners: HashMap<String, Vec<PropertyId>>,
    #[serde(default)]
    tariffs: Vec<Tariff>,
}

/// In-memory implementation of every backend port.
pub struct MemoryStore {
    properties: Vec<Property>,
    plans: HashMap<ContainerPlanId, ContainerPlan>,
    assignments: Vec<AssignmentRow>,
    owners: HashMap<String, Vec<PropertyId>>,
    tariffs: HashMap<MunicipalityId, Tariff>,
}

impl MemoryStore {
    /// Parse a dataset from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::Decode`] when the text is not a valid dataset.
    pub fn from_json(json: &str) -> Result<Self, PortError> {
        let dataset: Dataset = serde_json::from_str(json)?;
        debug!(
            properties = dataset.properties.len(),
            plans = dataset.container_plans.len(),
            assignments = dataset.assignments.len(),
            "loaded dataset"
        );
        Ok(Self {
            properties: dataset.properties,
            plans: dataset
                .container_plans
                .into_iter()
                .map(|plan| (plan.id, plan))
                .collect(),
            assignments: dataset.assignments,
            owners: dataset.owners,
            tariffs: dataset
                .tariffs
                .into_iter()
                .map(|tariff| (tariff.municipality_id, tariff))
                .collect(),
        })
    }

    /// Read and parse a dataset file.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::Io`] when the file cannot be read, or
    /// [`PortError::Decode`] when it is not a valid dataset.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PortError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn resolve(&self, row: &AssignmentRow) -> ContainerAssignment {
        ContainerAssignment {
            property_id: row.property_id,
            plan_id: row.plan_id,
            count: row.count,
            plan: self.plans.get(&row.plan_id).cloned(),
        }
    }
}

#[async_trait]
impl PropertyPort for MemoryStore {
    async fn property(&self, id: PropertyId) -> Result<Option<Property>, PortError> {
        Ok(self
            .properties
            .iter()
            .find(|property| property.id == id)
            .cloned())
    }

    async fn peers(&self, query: &PeerQuery) -> Result<Vec<Property>, PortError> {
        Ok(self
            .properties
            .iter()
            .filter(|property| query.matches(property))
            .cloned()
            .collect())
    }

    async fn properties_for_user(&self, username: &str) -> Result<Vec<Property>, PortError> {
        let Some(owned) = self.owners.get(username) else {
            return Ok(Vec::new());
        };
        Ok(owned
            .iter()
            .filter_map(|id| self.properties.iter().find(|property| property.id == *id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ContainerPort for MemoryStore {
    async fn assignments(&self, id: PropertyId) -> Result<Vec<ContainerAssignment>, PortError> {
        Ok(self
            .assignments
            .iter()
            .filter(|row| row.property_id == id)
            .map(|row| self.resolve(row))
            .collect())
    }

    async fn assignments_for(
        &self,
        ids: &[PropertyId],
    ) -> Result<HashMap<PropertyId, Vec<ContainerAssignment>>, PortError> {
        let mut grouped: HashMap<PropertyId, Vec<ContainerAssignment>> =
            ids.iter().map(|id| (*id, Vec::new())).collect();
        for row in &self.assignments {
            if let Some(rows) = grouped.get_mut(&row.property_id) {
                rows.push(self.resolve(row));
            }
        }
        Ok(grouped)
    }
}

#[async_trait]
impl FeePort for MemoryStore {
    async fn collection_fee(&self, property: &Property) -> Result<Decimal, PortError> {
        self.tariffs
            .get(&property.municipality_id)
            .and_then(|tariff| tariff.fee_for(property.access_path_length_m))
            .ok_or_else(|| {
                PortError::Internal(format!(
                    "No collection-fee tariff for municipality {}",
                    property.municipality_id
                ))
            })
    }
}

/// Build the backend bundle for an in-memory store.
#[must_use]
pub fn backend(store: MemoryStore) -> Backend {
    Backend::from_store(Arc::new(store))
}
