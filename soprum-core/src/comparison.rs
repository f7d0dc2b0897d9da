//! Peer selection and comparison of a property against similar properties.
//!
//! Every operation derives the peer group from scratch: same property type,
//! same municipality, and an apartment count within [`APARTMENT_BAND`] of the
//! target. Container assignments for the target and all peers are loaded in a
//! single batched call, then every comparison is computed in memory.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::iter;
use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::aggregate::{ContainerProfile, SampleStats};
use crate::backend::Backend;
use crate::cost::CostCalculator;
use crate::error::AnalyticsError;
use crate::model::{ContainerAssignment, Property, PropertyId, ServiceType};
use crate::money::{percentage_difference, round_output, round_whole};
use crate::ports::{ContainerPort, PeerQuery, PropertyPort};
use crate::report::{
    ComparisonReport, ContainerSizeComparison, CostComparison, FrequencyComparison, SizeClass,
    WasteAmountComparison,
};

/// Accepted deviation in apartment count between a property and its peers.
pub const APARTMENT_BAND: u32 = 5;

const LOWER_TOLERANCE: Decimal = dec!(0.9);
const UPPER_TOLERANCE: Decimal = dec!(1.1);

/// Peer query for `target`: same type and municipality, apartments within the band.
#[must_use]
pub fn peer_query(target: &Property) -> PeerQuery {
    let apartments = target.number_of_apartments;
    PeerQuery {
        property_type: target.property_type.clone(),
        municipality_id: target.municipality_id,
        min_apartments: apartments.saturating_sub(APARTMENT_BAND).max(1),
        max_apartments: apartments.saturating_add(APARTMENT_BAND),
        exclude: target.id,
    }
}

/// Classify `volume` against `average` with a ten percent band on either side.
#[must_use]
pub fn classify_volume(volume: Decimal, average: Decimal) -> SizeClass {
    if volume < average * LOWER_TOLERANCE {
        SizeClass::Smaller
    } else if volume > average * UPPER_TOLERANCE {
        SizeClass::Larger
    } else {
        SizeClass::Similar
    }
}

/// Compare a property's annual cost with its peers' costs.
#[must_use]
pub fn compare_costs(property_cost: Decimal, peer_costs: &[Decimal]) -> CostComparison {
    let stats = SampleStats::summarize(peer_costs.iter().copied(), property_cost);
    CostComparison {
        property_cost: round_output(property_cost),
        average_cost: round_output(stats.mean),
        min_cost: round_output(stats.min),
        max_cost: round_output(stats.max),
        percentage_difference: percentage_difference(property_cost, stats.mean),
        comparison_group_size: stats.size,
    }
}

/// Compare a property's total container volume with its peers'.
#[must_use]
pub fn compare_container_sizes(
    target: &ContainerProfile,
    peers: &[ContainerProfile],
) -> ContainerSizeComparison {
    let volume = Decimal::from(target.total_volume);
    let stats = SampleStats::summarize(
        peers.iter().map(|peer| Decimal::from(peer.total_volume)),
        volume,
    );
    ContainerSizeComparison {
        property_total_volume: target.total_volume,
        average_volume: round_output(stats.mean),
        comparison: classify_volume(volume, stats.mean),
        comparison_group_size: stats.size,
    }
}

/// Compare annual waste throughput per service type.
///
/// Peers without a service are left out of that service's sample.
#[must_use]
pub fn compare_waste_amounts(
    target: &ContainerProfile,
    peers: &[ContainerProfile],
) -> Vec<WasteAmountComparison> {
    observed_services(target, peers, |profile| &profile.waste_amounts)
        .into_iter()
        .map(|service| {
            let property_amount = target
                .waste_amounts
                .get(&service)
                .copied()
                .unwrap_or_default();
            let stats = SampleStats::summarize(
                peers
                    .iter()
                    .filter_map(|peer| peer.waste_amounts.get(&service).copied()),
                property_amount,
            );
            WasteAmountComparison {
                service_type: service,
                property_amount: round_output(property_amount),
                average_amount: round_output(stats.mean),
                min_amount: round_output(stats.min),
                max_amount: round_output(stats.max),
                percentage_difference: percentage_difference(property_amount, stats.mean),
                comparison_group_size: stats.size,
            }
        })
        .collect()
}

/// Compare count-weighted emptying frequency per service type.
///
/// Peers without a service are left out of that service's sample.
#[must_use]
pub fn compare_frequencies(
    target: &ContainerProfile,
    peers: &[ContainerProfile],
) -> Vec<FrequencyComparison> {
    observed_services(target, peers, |profile| &profile.frequencies)
        .into_iter()
        .map(|service| {
            let property_frequency = target
                .frequencies
                .get(&service)
                .copied()
                .map_or(0, round_whole);
            let property_value = Decimal::from(property_frequency);
            let stats = SampleStats::summarize(
                peers
                    .iter()
                    .filter_map(|peer| peer.frequencies.get(&service).copied()),
                property_value,
            );
            FrequencyComparison {
                service_type: service,
                property_frequency,
                average_frequency: round_output(stats.mean),
                percentage_difference: percentage_difference(property_value, stats.mean),
                comparison_group_size: stats.size,
            }
        })
        .collect()
}

fn observed_services<F, V>(
    target: &ContainerProfile,
    peers: &[ContainerProfile],
    by_service: F,
) -> BTreeSet<ServiceType>
where
    F: Fn(&ContainerProfile) -> &BTreeMap<ServiceType, V>,
{
    iter::once(target)
        .chain(peers)
        .flat_map(|profile| by_service(profile).keys().cloned())
        .collect()
}

/// Target, peers, and the containers of all of them, loaded once.
struct PeerSnapshot {
    target: Property,
    peers: Vec<Property>,
    assignments: HashMap<PropertyId, Vec<ContainerAssignment>>,
}

impl PeerSnapshot {
    fn assignments_of(&self, id: PropertyId) -> &[ContainerAssignment] {
        self.assignments.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    fn target_profile(&self) -> ContainerProfile {
        ContainerProfile::from_assignments(self.target.id, self.assignments_of(self.target.id))
    }

    fn peer_profiles(&self) -> Vec<ContainerProfile> {
        self.peers
            .iter()
            .map(|peer| ContainerProfile::from_assignments(peer.id, self.assignments_of(peer.id)))
            .collect()
    }
}

/// Compares a property against its peer group.
#[derive(Clone)]
pub struct ComparisonEngine {
    properties: Arc<dyn PropertyPort>,
    containers: Arc<dyn ContainerPort>,
    costs: CostCalculator,
}

impl ComparisonEngine {
    /// Create an engine reading from `backend`.
    #[must_use]
    pub fn new(backend: &Backend) -> Self {
        Self {
            properties: Arc::clone(&backend.property_port),
            containers: Arc::clone(&backend.container_port),
            costs: CostCalculator::new(backend),
        }
    }

    /// Full comparison report over a single peer and container load.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::PropertyNotFound`] for an unknown id, or
    /// [`AnalyticsError::Port`] when a backend call fails.
    pub async fn compare(&self, id: PropertyId) -> Result<ComparisonReport, AnalyticsError> {
        let snapshot = self.snapshot(id).await?;
        let target_profile = snapshot.target_profile();
        let peer_profiles = snapshot.peer_profiles();
        let cost_comparison = self.cost_comparison_in(&snapshot).await?;

        Ok(ComparisonReport {
            property_id: snapshot.target.id,
            address: snapshot.target.address.clone(),
            number_of_apartments: snapshot.target.number_of_apartments,
            property_type: snapshot.target.property_type.display_name().to_owned(),
            cost_comparison,
            container_size_comparison: compare_container_sizes(&target_profile, &peer_profiles),
            waste_amount_comparisons: compare_waste_amounts(&target_profile, &peer_profiles),
            frequency_comparisons: compare_frequencies(&target_profile, &peer_profiles),
        })
    }

    /// Annual cost against the peer group.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::PropertyNotFound`] for an unknown id, or
    /// [`AnalyticsError::Port`] when a backend call fails.
    pub async fn cost_comparison(&self, id: PropertyId) -> Result<CostComparison, AnalyticsError> {
        let snapshot = self.snapshot(id).await?;
        self.cost_comparison_in(&snapshot).await
    }

    /// Total container volume against the peer group.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::PropertyNotFound`] for an unknown id, or
    /// [`AnalyticsError::Port`] when a backend call fails.
    pub async fn container_size_comparison(
        &self,
        id: PropertyId,
    ) -> Result<ContainerSizeComparison, AnalyticsError> {
        let snapshot = self.snapshot(id).await?;
        Ok(compare_container_sizes(
            &snapshot.target_profile(),
            &snapshot.peer_profiles(),
        ))
    }

    /// Annual waste throughput per service type against the peer group.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::PropertyNotFound`] for an unknown id, or
    /// [`AnalyticsError::Port`] when a backend call fails.
    pub async fn waste_amount_comparisons(
        &self,
        id: PropertyId,
    ) -> Result<Vec<WasteAmountComparison>, AnalyticsError> {
        let snapshot = self.snapshot(id).await?;
        Ok(compare_waste_amounts(
            &snapshot.target_profile(),
            &snapshot.peer_profiles(),
        ))
    }

    /// Emptying frequency per service type against the peer group.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::PropertyNotFound`] for an unknown id, or
    /// [`AnalyticsError::Port`] when a backend call fails.
    pub async fn frequency_comparisons(
        &self,
        id: PropertyId,
    ) -> Result<Vec<FrequencyComparison>, AnalyticsError> {
        let snapshot = self.snapshot(id).await?;
        Ok(compare_frequencies(
            &snapshot.target_profile(),
            &snapshot.peer_profiles(),
        ))
    }

    async fn snapshot(&self, id: PropertyId) -> Result<PeerSnapshot, AnalyticsError> {
        let target = self
            .properties
            .property(id)
            .await?
            .ok_or(AnalyticsError::PropertyNotFound(id))?;

        let mut peers = self.properties.peers(&peer_query(&target)).await?;
        peers.retain(|peer| peer.id != target.id);
        debug!(property = %id, peers = peers.len(), "selected peer group");

        let ids: Vec<PropertyId> = iter::once(target.id)
            .chain(peers.iter().map(|peer| peer.id))
            .collect();
        let assignments = self.containers.assignments_for(&ids).await?;

        Ok(PeerSnapshot {
            target,
            peers,
            assignments,
        })
    }

    async fn cost_comparison_in(
        &self,
        snapshot: &PeerSnapshot,
    ) -> Result<CostComparison, AnalyticsError> {
        let target = self
            .costs
            .cost_of(&snapshot.target, snapshot.assignments_of(snapshot.target.id))
            .await?;

        let mut peer_costs = Vec::with_capacity(snapshot.peers.len());
        for peer in &snapshot.peers {
            let report = self
                .costs
                .cost_of(peer, snapshot.assignments_of(peer.id))
                .await?;
            peer_costs.push(report.total_cost);
        }

        Ok(compare_costs(target.total_cost, &peer_costs))
    }
}
