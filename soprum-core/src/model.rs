//! Domain data structures for properties, container plans, and assignments.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
/// Identifier for a property.
pub struct PropertyId(pub i64);

impl fmt::Display for PropertyId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Identifier for a municipality.
pub struct MunicipalityId(pub i64);

impl fmt::Display for MunicipalityId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Identifier for a container plan in the catalog.
pub struct ContainerPlanId(pub i64);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Property classification used when matching peers.
///
/// Names of [`PropertyType::Other`] keep their spelling but compare without
/// regard to case.
pub enum PropertyType {
    /// Apartment building.
    Flerbostadshus,
    /// Detached house.
    Smahus,
    /// Terraced house.
    Radhus,
    /// Commercial premises.
    Verksamhet,
    /// Backend-specific classification.
    Other(String),
}

impl PropertyType {
    /// Human-friendly name shown in reports.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            PropertyType::Flerbostadshus => "Flerbostadshus",
            PropertyType::Smahus => "Småhus",
            PropertyType::Radhus => "Radhus",
            PropertyType::Verksamhet => "Verksamhet",
            PropertyType::Other(name) => name.as_str(),
        }
    }
}

impl PartialEq for PropertyType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropertyType::Other(left), PropertyType::Other(right)) => {
                left.to_lowercase() == right.to_lowercase()
            }
            _ => mem::discriminant(self) == mem::discriminant(other),
        }
    }
}

impl Eq for PropertyType {}

impl Hash for PropertyType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        if let PropertyType::Other(name) = self {
            name.to_lowercase().hash(state);
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.display_name())
    }
}

impl From<&str> for PropertyType {
    fn from(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "flerbostadshus" => PropertyType::Flerbostadshus,
            "småhus" | "smahus" => PropertyType::Smahus,
            "radhus" => PropertyType::Radhus,
            "verksamhet" => PropertyType::Verksamhet,
            _ => PropertyType::Other(raw.trim().to_owned()),
        }
    }
}

impl From<String> for PropertyType {
    fn from(raw: String) -> Self {
        PropertyType::from(raw.as_str())
    }
}

impl From<PropertyType> for String {
    fn from(property_type: PropertyType) -> Self {
        match property_type {
            PropertyType::Other(name) => name,
            known => known.display_name().to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
/// Waste category such as “Restavfall” or “Matavfall”.
pub struct ServiceType(pub String);

impl fmt::Display for ServiceType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A property as returned by the property directory.
pub struct Property {
    /// Unique identifier.
    pub id: PropertyId,
    /// Classification used for peer matching.
    pub property_type: PropertyType,
    /// Municipality the property belongs to.
    pub municipality_id: MunicipalityId,
    /// Number of apartments; zero means unknown.
    pub number_of_apartments: u32,
    /// Annual cost of the waste-room lock type.
    pub lock_cost: Decimal,
    /// Street address.
    pub address: String,
    /// Walking distance in meters from the collection vehicle to the waste room.
    #[serde(default)]
    pub access_path_length_m: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// One purchasable waste-collection option from the municipal catalog.
pub struct ContainerPlan {
    /// Unique identifier.
    pub id: ContainerPlanId,
    /// Annual cost per container.
    pub unit_cost: Decimal,
    /// Number of emptyings per year.
    pub emptying_frequency: u32,
    /// Container volume in liters.
    pub container_size_liters: u32,
    /// Waste service the plan belongs to, absent when the catalog linkage is broken.
    pub service_type: Option<ServiceType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Containers of one plan placed at a property.
pub struct ContainerAssignment {
    /// Property the containers are assigned to.
    pub property_id: PropertyId,
    /// Plan the assignment refers to.
    pub plan_id: ContainerPlanId,
    /// Number of containers.
    pub count: u32,
    /// Resolved plan, absent when the plan id does not resolve.
    pub plan: Option<ContainerPlan>,
}

impl ContainerAssignment {
    /// Plan and service type when the whole linkage is present.
    #[must_use]
    pub fn linked(&self) -> Option<(&ContainerPlan, &ServiceType)> {
        let plan = self.plan.as_ref()?;
        let service = plan.service_type.as_ref()?;
        Some((plan, service))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_type_names_round_trip() {
        for raw in ["Flerbostadshus", "Småhus", "Radhus", "Verksamhet", "Kontor"] {
            let parsed = PropertyType::from(raw);
            assert_eq!(String::from(parsed), raw, "name should survive parsing");
        }
        assert_eq!(PropertyType::from(" smahus "), PropertyType::Smahus, "ascii alias");
    }

    #[test]
    fn other_types_match_regardless_of_case() {
        let upper = PropertyType::from("Kontor");
        let lower = PropertyType::from("kontor");
        assert_eq!(upper, lower, "same classification");
        assert_eq!(upper.display_name(), "Kontor", "spelling kept");
        assert_ne!(upper, PropertyType::from("Lager"), "different name");
        assert_ne!(
            PropertyType::from("Radhus"),
            PropertyType::from("Verksamhet"),
            "known types"
        );
    }

    #[test]
    fn linkage_requires_plan_and_service() {
        let mut assignment = ContainerAssignment {
            property_id: PropertyId(1),
            plan_id: ContainerPlanId(7),
            count: 1,
            plan: None,
        };
        assert!(assignment.linked().is_none(), "missing plan");

        assignment.plan = Some(ContainerPlan {
            id: ContainerPlanId(7),
            unit_cost: Decimal::ONE,
            emptying_frequency: 26,
            container_size_liters: 190,
            service_type: None,
        });
        assert!(assignment.linked().is_none(), "missing service");

        if let Some(plan) = assignment.plan.as_mut() {
            plan.service_type = Some(ServiceType("Matavfall".to_owned()));
        }
        assert!(assignment.linked().is_some(), "complete linkage");
    }
}
