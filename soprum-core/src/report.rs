//! Derived reports. Nothing here is persisted.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{PropertyId, ServiceType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Annual waste-management cost of one property.
pub struct CostReport {
    /// Property the cost belongs to.
    pub property_id: PropertyId,
    /// Street address.
    pub address: String,
    /// Fee, lock cost, and container costs combined.
    pub total_cost: Decimal,
    /// Total cost split over the apartments, zero without apartments.
    pub cost_per_apartment: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Annual cost of a property against its peer group.
pub struct CostComparison {
    /// Annual cost of the compared property.
    pub property_cost: Decimal,
    /// Mean annual cost of the peers.
    pub average_cost: Decimal,
    /// Lowest peer cost.
    pub min_cost: Decimal,
    /// Highest peer cost.
    pub max_cost: Decimal,
    /// Difference to the average in percent.
    pub percentage_difference: Decimal,
    /// Number of peers.
    pub comparison_group_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Container volume classification relative to the peer average.
pub enum SizeClass {
    /// More than ten percent below the average.
    #[serde(rename = "mindre")]
    Smaller,
    /// Within ten percent of the average.
    #[serde(rename = "lika stora")]
    Similar,
    /// More than ten percent above the average.
    #[serde(rename = "större")]
    Larger,
}

impl SizeClass {
    /// Label used in reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SizeClass::Smaller => "mindre",
            SizeClass::Similar => "lika stora",
            SizeClass::Larger => "större",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Total container volume of a property against its peer group.
pub struct ContainerSizeComparison {
    /// Total container volume in liters.
    pub property_total_volume: u64,
    /// Mean peer volume in liters.
    pub average_volume: Decimal,
    /// Classification against the average.
    pub comparison: SizeClass,
    /// Number of peers.
    pub comparison_group_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Annual waste throughput for one service type.
pub struct WasteAmountComparison {
    /// Service the figures refer to.
    pub service_type: ServiceType,
    /// Liters per year collected from the compared property.
    pub property_amount: Decimal,
    /// Mean over peers having the service.
    pub average_amount: Decimal,
    /// Lowest peer amount.
    pub min_amount: Decimal,
    /// Highest peer amount.
    pub max_amount: Decimal,
    /// Difference to the average in percent.
    pub percentage_difference: Decimal,
    /// Number of peers having the service.
    pub comparison_group_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Count-weighted emptying frequency for one service type.
pub struct FrequencyComparison {
    /// Service the figures refer to.
    pub service_type: ServiceType,
    /// Emptyings per year at the compared property.
    pub property_frequency: u32,
    /// Mean over peers having the service.
    pub average_frequency: Decimal,
    /// Difference to the average in percent.
    pub percentage_difference: Decimal,
    /// Number of peers having the service.
    pub comparison_group_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Everything the comparison view shows for one property.
pub struct ComparisonReport {
    /// Compared property.
    pub property_id: PropertyId,
    /// Street address.
    pub address: String,
    /// Apartment count of the compared property.
    pub number_of_apartments: u32,
    /// Display name of the property type.
    pub property_type: String,
    /// Annual cost comparison.
    pub cost_comparison: CostComparison,
    /// Container volume comparison.
    pub container_size_comparison: ContainerSizeComparison,
    /// Waste throughput per service type, sorted by service.
    pub waste_amount_comparisons: Vec<WasteAmountComparison>,
    /// Emptying frequency per service type, sorted by service.
    pub frequency_comparisons: Vec<FrequencyComparison>,
}
