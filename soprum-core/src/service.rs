//! High-level service facade combining cost and comparison analytics.

use tracing::debug;

use crate::backend::Backend;
use crate::comparison::ComparisonEngine;
use crate::cost::CostCalculator;
use crate::error::AnalyticsError;
use crate::model::PropertyId;
use crate::report::{
    ComparisonReport, ContainerSizeComparison, CostComparison, CostReport, FrequencyComparison,
    WasteAmountComparison,
};

/// Public entry point for cost and comparison reports.
#[derive(Clone)]
pub struct SoprumService {
    costs: CostCalculator,
    comparisons: ComparisonEngine,
}

impl SoprumService {
    /// Create a new service reading from the provided backend.
    #[must_use]
    pub fn new(backend: &Backend) -> Self {
        Self {
            costs: CostCalculator::new(backend),
            comparisons: ComparisonEngine::new(backend),
        }
    }

    /// Annual cost of one property.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalyticsError`] if the property is unknown or a backend call fails.
    pub async fn annual_cost(&self, id: PropertyId) -> Result<CostReport, AnalyticsError> {
        debug!(property = %id, "annual cost requested");
        self.costs.annual_cost(id).await
    }

    /// Annual cost of every property owned by `username`.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalyticsError`] if the user owns no properties or a backend call fails.
    pub async fn all_costs_for_user(
        &self,
        username: &str,
    ) -> Result<Vec<CostReport>, AnalyticsError> {
        debug!(username, "costs for user requested");
        self.costs.all_costs_for_user(username).await
    }

    /// Full peer comparison of one property.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalyticsError`] if the property is unknown or a backend call fails.
    pub async fn comparison(&self, id: PropertyId) -> Result<ComparisonReport, AnalyticsError> {
        debug!(property = %id, "comparison requested");
        self.comparisons.compare(id).await
    }

    /// Cost part of the peer comparison.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalyticsError`] if the property is unknown or a backend call fails.
    pub async fn cost_comparison(&self, id: PropertyId) -> Result<CostComparison, AnalyticsError> {
        self.comparisons.cost_comparison(id).await
    }

    /// Container volume part of the peer comparison.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalyticsError`] if the property is unknown or a backend call fails.
    pub async fn container_size_comparison(
        &self,
        id: PropertyId,
    ) -> Result<ContainerSizeComparison, AnalyticsError> {
        self.comparisons.container_size_comparison(id).await
    }

    /// Waste throughput part of the peer comparison.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalyticsError`] if the property is unknown or a backend call fails.
    pub async fn waste_amount_comparisons(
        &self,
        id: PropertyId,
    ) -> Result<Vec<WasteAmountComparison>, AnalyticsError> {
        self.comparisons.waste_amount_comparisons(id).await
    }

    /// Emptying frequency part of the peer comparison.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalyticsError`] if the property is unknown or a backend call fails.
    pub async fn frequency_comparisons(
        &self,
        id: PropertyId,
    ) -> Result<Vec<FrequencyComparison>, AnalyticsError> {
        self.comparisons.frequency_comparisons(id).await
    }
}
