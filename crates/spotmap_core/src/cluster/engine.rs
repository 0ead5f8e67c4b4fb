//! Greedy proximity clustering.
//!
//! # Responsibility
//! - Partition spots into clusters using the zoom-banded radius policy.
//! - Track centroid, member count and mood distribution per cluster.
//!
//! # Invariants
//! - Every input spot lands in exactly one cluster per pass.
//! - Membership is tested against the seed spot's coordinates, while the
//!   centroid is updated as a running weighted average.
//! - Radius `0.0` returns no clusters; the caller renders spots one by one.
//! - Clusters borrow spots and have no identity across passes.

use crate::cluster::distribution::MoodDistribution;
use crate::cluster::policy::RadiusPolicy;
use crate::geo::distance::distance_km;
use crate::model::spot::{Mood, Spot, SpotId};

/// Output of one clustering pass for one group of nearby spots.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterData<'a> {
    /// Running centroid latitude.
    pub lat: f64,
    /// Running centroid longitude.
    pub lng: f64,
    pub count: usize,
    /// Members in fold-in order; the seed is always first.
    pub items: Vec<&'a Spot>,
    pub distribution: MoodDistribution,
    pub dominant: Mood,
    /// Radius that was active when this cluster formed. Informational only.
    pub radius_km: f64,
}

impl<'a> ClusterData<'a> {
    fn seed(spot: &'a Spot, radius_km: f64) -> Self {
        let mut distribution = MoodDistribution::new();
        distribution.increment(spot.mood);
        Self {
            lat: spot.lat,
            lng: spot.lng,
            count: 1,
            items: vec![spot],
            distribution,
            dominant: spot.mood,
            radius_km,
        }
    }

    fn absorb(&mut self, spot: &'a Spot) {
        let before = self.count as f64;
        self.count += 1;
        let after = self.count as f64;
        self.lat = (self.lat * before + spot.lat) / after;
        self.lng = (self.lng * before + spot.lng) / after;
        self.distribution.increment(spot.mood);
        self.items.push(spot);
    }

    /// Member reported when the cluster glyph is selected.
    pub fn representative(&self) -> &'a Spot {
        self.items[0]
    }

    /// Member count of the dominant mood.
    pub fn dominant_count(&self) -> usize {
        self.distribution.get(self.dominant)
    }

    pub fn member_ids(&self) -> Vec<SpotId> {
        self.items.iter().map(|spot| spot.id.clone()).collect()
    }
}

/// Clusters `spots` at `zoom` using the built-in radius table.
pub fn cluster(spots: &[Spot], zoom: impl Into<f64>) -> Vec<ClusterData<'_>> {
    cluster_with_policy(spots, zoom, RadiusPolicy::shared_default())
}

/// Clusters `spots` at `zoom` using `policy`.
///
/// Single greedy pass in input order, O(n^2) in the number of spots. Returns
/// an empty list when the policy maps `zoom` to radius `0.0`.
pub fn cluster_with_policy<'a>(
    spots: &'a [Spot],
    zoom: impl Into<f64>,
    policy: &RadiusPolicy,
) -> Vec<ClusterData<'a>> {
    let radius_km = policy.radius_for_zoom(zoom.into());
    if radius_km <= 0.0 || spots.is_empty() {
        return Vec::new();
    }

    let mut processed = vec![false; spots.len()];
    let mut clusters = Vec::new();

    for (seed_index, seed) in spots.iter().enumerate() {
        if processed[seed_index] {
            continue;
        }
        processed[seed_index] = true;
        let mut cluster = ClusterData::seed(seed, radius_km);

        for (index, candidate) in spots.iter().enumerate().skip(seed_index + 1) {
            if processed[index] {
                continue;
            }
            if distance_km(seed.lat, seed.lng, candidate.lat, candidate.lng) <= radius_km {
                processed[index] = true;
                cluster.absorb(candidate);
            }
        }

        cluster.dominant = cluster.distribution.dominant();
        clusters.push(cluster);
    }

    clusters
}

/// One drawable item of a pass.
#[derive(Debug, Clone, PartialEq)]
pub enum PassItem<'a> {
    /// A spot drawn on its own marker.
    Spot(&'a Spot),
    /// A group of two or more spots drawn as one glyph.
    Cluster(ClusterData<'a>),
}

/// Plans what to draw for `spots` at `zoom` under `policy`.
///
/// Above the clustering bands every spot becomes its own item. One-member
/// clusters are drawn as plain spots, never as cluster glyphs.
pub fn plan_items<'a>(
    spots: &'a [Spot],
    zoom: impl Into<f64>,
    policy: &RadiusPolicy,
) -> Vec<PassItem<'a>> {
    let zoom = zoom.into();
    if policy.radius_for_zoom(zoom) <= 0.0 {
        return spots.iter().map(PassItem::Spot).collect();
    }
    cluster_with_policy(spots, zoom, policy)
        .into_iter()
        .map(|cluster| {
            if cluster.count == 1 {
                PassItem::Spot(cluster.representative())
            } else {
                PassItem::Cluster(cluster)
            }
        })
        .collect()
}
