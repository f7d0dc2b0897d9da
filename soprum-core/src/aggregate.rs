//! Grouping and averaging over container assignments.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::warn;

use crate::model::{ContainerAssignment, PropertyId, ServiceType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Running weighted sum and total weight.
pub struct Accumulator {
    sum: Decimal,
    weight: Decimal,
}

impl Accumulator {
    /// Add `value` counted `weight` times.
    pub fn add(&mut self, value: Decimal, weight: u32) {
        let weight = Decimal::from(weight);
        self.sum += value * weight;
        self.weight += weight;
    }

    /// Weighted sum of everything added so far.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.sum
    }

    /// Weighted mean, `None` while the total weight is zero.
    #[must_use]
    pub fn mean(&self) -> Option<Decimal> {
        if self.weight.is_zero() {
            None
        } else {
            Some(self.sum / self.weight)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Mean and extrema of a peer sample.
pub struct SampleStats {
    /// Arithmetic mean.
    pub mean: Decimal,
    /// Smallest value.
    pub min: Decimal,
    /// Largest value.
    pub max: Decimal,
    /// Number of values.
    pub size: usize,
}

impl SampleStats {
    /// Summarize `values`; an empty sample collapses onto `fallback`.
    #[must_use]
    pub fn summarize<I>(values: I, fallback: Decimal) -> Self
    where
        I: IntoIterator<Item = Decimal>,
    {
        let mut values = values.into_iter();
        let Some(first) = values.next() else {
            return Self {
                mean: fallback,
                min: fallback,
                max: fallback,
                size: 0,
            };
        };

        let mut stats = Self {
            mean: first,
            min: first,
            max: first,
            size: 1,
        };
        let mut sum = first;
        for value in values {
            sum += value;
            stats.min = stats.min.min(value);
            stats.max = stats.max.max(value);
            stats.size += 1;
        }
        stats.mean = sum / Decimal::from(stats.size);
        stats
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Container figures of a single property.
pub struct ContainerProfile {
    /// Sum of container size times count, in liters.
    pub total_volume: u64,
    /// Liters collected per year, by service.
    pub waste_amounts: BTreeMap<ServiceType, Decimal>,
    /// Count-weighted emptyings per year, by service.
    pub frequencies: BTreeMap<ServiceType, Decimal>,
}

impl ContainerProfile {
    /// Build the profile of `property_id` from its assignments.
    ///
    /// Assignments without a complete plan and service linkage are skipped.
    #[must_use]
    pub fn from_assignments(property_id: PropertyId, assignments: &[ContainerAssignment]) -> Self {
        let mut total_volume = 0_u64;
        let mut waste: BTreeMap<ServiceType, Accumulator> = BTreeMap::new();
        let mut frequency: BTreeMap<ServiceType, Accumulator> = BTreeMap::new();

        for assignment in assignments {
            let Some((plan, service)) = assignment.linked() else {
                warn!(
                    property = %property_id,
                    plan = assignment.plan_id.0,
                    "skipping container assignment with incomplete plan linkage"
                );
                continue;
            };

            let size = Decimal::from(plan.container_size_liters);
            let emptyings = Decimal::from(plan.emptying_frequency);

            total_volume += u64::from(plan.container_size_liters) * u64::from(assignment.count);
            waste
                .entry(service.clone())
                .or_default()
                .add(size * emptyings, assignment.count);
            frequency
                .entry(service.clone())
                .or_default()
                .add(emptyings, assignment.count);
        }

        Self {
            total_volume,
            waste_amounts: waste
                .into_iter()
                .map(|(service, acc)| (service, acc.total()))
                .collect(),
            frequencies: frequency
                .into_iter()
                .filter_map(|(service, acc)| acc.mean().map(|mean| (service, mean)))
                .collect(),
        }
    }
}
