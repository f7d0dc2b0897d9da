//! Annual waste-management cost per property.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::backend::Backend;
use crate::error::AnalyticsError;
use crate::model::{ContainerAssignment, Property, PropertyId};
use crate::money::{per_unit, round_output};
use crate::ports::{ContainerPort, FeePort, PortError, PropertyPort};
use crate::report::CostReport;

/// Sums collection fee, lock cost, and container charges.
#[derive(Clone)]
pub struct CostCalculator {
    properties: Arc<dyn PropertyPort>,
    containers: Arc<dyn ContainerPort>,
    fees: Arc<dyn FeePort>,
}

impl CostCalculator {
    /// Create a calculator reading from `backend`.
    #[must_use]
    pub fn new(backend: &Backend) -> Self {
        Self {
            properties: Arc::clone(&backend.property_port),
            containers: Arc::clone(&backend.container_port),
            fees: Arc::clone(&backend.fee_port),
        }
    }

    /// Annual cost of a single property.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::PropertyNotFound`] for an unknown id, or
    /// [`AnalyticsError::Port`] when a backend call fails.
    pub async fn annual_cost(&self, id: PropertyId) -> Result<CostReport, AnalyticsError> {
        let property = self
            .properties
            .property(id)
            .await?
            .ok_or(AnalyticsError::PropertyNotFound(id))?;
        let assignments = self.containers.assignments(id).await?;
        Ok(self.cost_of(&property, &assignments).await?)
    }

    /// Annual cost of every property owned by `username`, in lookup order.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::NoPropertiesForUser`] when the user owns nothing, or
    /// [`AnalyticsError::Port`] when a backend call fails.
    pub async fn all_costs_for_user(
        &self,
        username: &str,
    ) -> Result<Vec<CostReport>, AnalyticsError> {
        let properties = self.properties.properties_for_user(username).await?;
        if properties.is_empty() {
            return Err(AnalyticsError::NoPropertiesForUser(username.to_owned()));
        }
        debug!(username, count = properties.len(), "calculating costs for user");

        let mut reports = Vec::with_capacity(properties.len());
        for property in &properties {
            let assignments = self.containers.assignments(property.id).await?;
            reports.push(self.cost_of(property, &assignments).await?);
        }
        Ok(reports)
    }

    /// Annual cost of an already loaded property and its assignments.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the fee lookup fails.
    pub async fn cost_of(
        &self,
        property: &Property,
        assignments: &[ContainerAssignment],
    ) -> Result<CostReport, PortError> {
        let fee = self.fees.collection_fee(property).await?;
        Ok(build_cost_report(property, fee, assignments))
    }
}

/// Combine fee, lock cost, and container lines into a report.
///
/// Rounding is applied to the total and the per-apartment share only.
#[must_use]
pub fn build_cost_report(
    property: &Property,
    fee: Decimal,
    assignments: &[ContainerAssignment],
) -> CostReport {
    let containers: Decimal = assignments
        .iter()
        .filter_map(|assignment| {
            let Some(plan) = assignment.plan.as_ref() else {
                warn!(
                    property = %property.id,
                    plan = assignment.plan_id.0,
                    "skipping container assignment without a plan"
                );
                return None;
            };
            Some(plan.unit_cost * Decimal::from(assignment.count))
        })
        .sum();

    let total_cost = round_output(fee + property.lock_cost + containers);

    CostReport {
        property_id: property.id,
        address: property.address.clone(),
        total_cost,
        cost_per_apartment: per_unit(total_cost, property.number_of_apartments),
    }
}
