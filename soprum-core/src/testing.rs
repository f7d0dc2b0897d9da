//! In-crate fakes for the backend ports.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::backend::Backend;
use crate::model::{
    ContainerAssignment, ContainerPlan, ContainerPlanId, MunicipalityId, Property, PropertyId,
    PropertyType, ServiceType,
};
use crate::ports::{ContainerPort, FeePort, PeerQuery, PortError, PropertyPort};

pub(crate) fn property(id: i64, apartments: u32) -> Property {
    Property {
        id: PropertyId(id),
        property_type: PropertyType::Flerbostadshus,
        municipality_id: MunicipalityId(1),
        number_of_apartments: apartments,
        lock_cost: Decimal::ZERO,
        address: format!("Storgatan {id}"),
        access_path_length_m: 0,
    }
}

pub(crate) fn assignment(
    property_id: PropertyId,
    plan: i64,
    service: &str,
    size: u32,
    frequency: u32,
    count: u32,
) -> ContainerAssignment {
    ContainerAssignment {
        property_id,
        plan_id: ContainerPlanId(plan),
        count,
        plan: Some(ContainerPlan {
            id: ContainerPlanId(plan),
            unit_cost: Decimal::ZERO,
            emptying_frequency: frequency,
            container_size_liters: size,
            service_type: Some(ServiceType(service.to_owned())),
        }),
    }
}

#[derive(Default)]
pub(crate) struct FakeStore {
    pub(crate) properties: Vec<Property>,
    pub(crate) assignments: Vec<ContainerAssignment>,
    pub(crate) fees: HashMap<PropertyId, Decimal>,
    pub(crate) owners: HashMap<String, Vec<PropertyId>>,
}

impl FakeStore {
    pub(crate) fn with_property(mut self, property: Property, fee: Decimal) -> Self {
        self.fees.insert(property.id, fee);
        self.properties.push(property);
        self
    }

    pub(crate) fn with_assignment(mut self, assignment: ContainerAssignment) -> Self {
        self.assignments.push(assignment);
        self
    }

    pub(crate) fn into_backend(self) -> Backend {
        Backend::from_store(Arc::new(self))
    }
}

#[async_trait]
impl PropertyPort for FakeStore {
    async fn property(&self, id: PropertyId) -> Result<Option<Property>, PortError> {
        Ok(self.properties.iter().find(|prop| prop.id == id).cloned())
    }

    async fn peers(&self, query: &PeerQuery) -> Result<Vec<Property>, PortError> {
        Ok(self
            .properties
            .iter()
            .filter(|prop| query.matches(prop))
            .cloned()
            .collect())
    }

    async fn properties_for_user(&self, username: &str) -> Result<Vec<Property>, PortError> {
        let ids = self.owners.get(username).cloned().unwrap_or_default();
        Ok(self
            .properties
            .iter()
            .filter(|prop| ids.contains(&prop.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ContainerPort for FakeStore {
    async fn assignments(&self, id: PropertyId) -> Result<Vec<ContainerAssignment>, PortError> {
        Ok(self
            .assignments
            .iter()
            .filter(|row| row.property_id == id)
            .cloned()
            .collect())
    }

    async fn assignments_for(
        &self,
        ids: &[PropertyId],
    ) -> Result<HashMap<PropertyId, Vec<ContainerAssignment>>, PortError> {
        let mut grouped: HashMap<PropertyId, Vec<ContainerAssignment>> = HashMap::new();
        for row in self.assignments.iter().filter(|row| ids.contains(&row.property_id)) {
            grouped.entry(row.property_id).or_default().push(row.clone());
        }
        Ok(grouped)
    }
}

#[async_trait]
impl FeePort for FakeStore {
    async fn collection_fee(&self, property: &Property) -> Result<Decimal, PortError> {
        self.fees
            .get(&property.id)
            .copied()
            .ok_or_else(|| PortError::Internal(format!("no fee for {}", property.id)))
    }
}
