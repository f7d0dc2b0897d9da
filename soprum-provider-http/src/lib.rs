//! Backend implementation reading from the property-management REST API.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use soprum_core::{
    backend::Backend,
    model::{
        ContainerAssignment, ContainerPlan, ContainerPlanId, MunicipalityId, Property, PropertyId,
        PropertyType, ServiceType,
    },
    ports::{ContainerPort, FeePort, PeerQuery, PortError, PropertyPort},
};

/// Property as returned by /properties
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PropertyDto {
    id: i64,
    property_type: String,
    municipality_id: i64,
    #[serde(default)]
    number_of_apartments: Option<u32>,
    lock_cost: Decimal,
    address: String,
    #[serde(default)]
    access_path_length: Option<u32>,
}

impl From<PropertyDto> for Property {
    fn from(dto: PropertyDto) -> Self {
        Property {
            id: PropertyId(dto.id),
            property_type: PropertyType::from(dto.property_type),
            municipality_id: MunicipalityId(dto.municipality_id),
            number_of_apartments: dto.number_of_apartments.unwrap_or_default(),
            lock_cost: dto.lock_cost,
            address: dto.address,
            access_path_length_m: dto.access_path_length.unwrap_or_default(),
        }
    }
}

/// Container plan nested inside an assignment
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanDto {
    id: i64,
    cost: Decimal,
    emptying_frequency_per_year: u32,
    container_size: u32,
    #[serde(default)]
    service_type_name: Option<String>,
}

/// Assignment as returned by /container-assignments
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssignmentDto {
    property_id: i64,
    container_plan_id: i64,
    count: u32,
    #[serde(default)]
    container_plan: Option<PlanDto>,
}

impl From<AssignmentDto> for ContainerAssignment {
    fn from(dto: AssignmentDto) -> Self {
        ContainerAssignment {
            property_id: PropertyId(dto.property_id),
            plan_id: ContainerPlanId(dto.container_plan_id),
            count: dto.count,
            plan: dto.container_plan.map(|plan| ContainerPlan {
                id: ContainerPlanId(plan.id),
                unit_cost: plan.cost,
                emptying_frequency: plan.emptying_frequency_per_year,
                container_size_liters: plan.container_size,
                service_type: plan
                    .service_type_name
                    .filter(|name| !name.trim().is_empty())
                    .map(ServiceType),
            }),
        }
    }
}

/// Response from /properties/{id}/collection-fee
#[derive(Debug, Deserialize)]
struct FeeResponse {
    fee: Decimal,
}

/// All backend ports served by one REST API.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend talking to the API rooted at `base_url`.
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(format!("{}{path}", self.base_url))
    }

    /// URL of `/users/{username}/properties` with the name encoded as one segment.
    fn user_properties_url(&self, username: &str) -> Result<Url, PortError> {
        let mut url = Url::parse(&format!("{}/users", self.base_url))
            .map_err(|err| PortError::Internal(format!("invalid base url: {err}")))?;
        url.path_segments_mut()
            .map_err(|()| PortError::Internal(format!("base url {} has no path", self.base_url)))?
            .push(username)
            .push("properties");
        Ok(url)
    }
}

#[async_trait]
impl PropertyPort for HttpBackend {
    async fn property(&self, id: PropertyId) -> Result<Option<Property>, PortError> {
        let resp = self.get(&format!("/properties/{id}")).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let dto: PropertyDto = resp.error_for_status()?.json().await?;
        Ok(Some(dto.into()))
    }

    async fn peers(&self, query: &PeerQuery) -> Result<Vec<Property>, PortError> {
        let municipality = query.municipality_id.to_string();
        let min = query.min_apartments.to_string();
        let max = query.max_apartments.to_string();
        let exclude = query.exclude.to_string();

        let req = self.get("/properties").query(&[
            ("type", query.property_type.display_name()),
            ("municipality", &municipality),
            ("minApartments", &min),
            ("maxApartments", &max),
            ("exclude", &exclude),
        ]);

        let peers = fetch_json::<Vec<PropertyDto>>(req).await?;
        debug!(candidates = peers.len(), "fetched peer candidates");
        Ok(peers.into_iter().map(Property::from).collect())
    }

    async fn properties_for_user(&self, username: &str) -> Result<Vec<Property>, PortError> {
        // dot segments would be dropped from the path instead of encoded
        if username.is_empty() || username == "." || username == ".." {
            debug!(username, "username cannot own properties");
            return Ok(Vec::new());
        }

        let url = self.user_properties_url(username)?;
        let resp = self.client.get(url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            debug!(username, "unknown user");
            return Ok(Vec::new());
        }
        let properties: Vec<PropertyDto> = resp.error_for_status()?.json().await?;
        Ok(properties.into_iter().map(Property::from).collect())
    }
}

#[async_trait]
impl ContainerPort for HttpBackend {
    async fn assignments(&self, id: PropertyId) -> Result<Vec<ContainerAssignment>, PortError> {
        let mut grouped = self.assignments_for(&[id]).await?;
        Ok(grouped.remove(&id).unwrap_or_default())
    }

    async fn assignments_for(
        &self,
        ids: &[PropertyId],
    ) -> Result<HashMap<PropertyId, Vec<ContainerAssignment>>, PortError> {
        let mut grouped: HashMap<PropertyId, Vec<ContainerAssignment>> =
            ids.iter().map(|id| (*id, Vec::new())).collect();
        if ids.is_empty() {
            return Ok(grouped);
        }

        let joined = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let req = self
            .get("/container-assignments")
            .query(&[("propertyIds", joined.as_str())]);

        for dto in fetch_json::<Vec<AssignmentDto>>(req).await? {
            let assignment = ContainerAssignment::from(dto);
            // the API may answer with more properties than asked for
            if let Some(rows) = grouped.get_mut(&assignment.property_id) {
                rows.push(assignment);
            }
        }
        Ok(grouped)
    }
}

#[async_trait]
impl FeePort for HttpBackend {
    async fn collection_fee(&self, property: &Property) -> Result<Decimal, PortError> {
        let req = self.get(&format!("/properties/{}/collection-fee", property.id));
        Ok(fetch_json::<FeeResponse>(req).await?.fee)
    }
}

/// Build the backend bundle for the REST API at `base_url`.
#[must_use]
pub fn backend(client: Client, base_url: impl Into<String>) -> Backend {
    Backend::from_store(Arc::new(HttpBackend::new(client, base_url)))
}

// Small helper to fetch and decode JSON with status handling.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, PortError> {
    req.send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .json()
        .await
        .map_err(PortError::from)
}
