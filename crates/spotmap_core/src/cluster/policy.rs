//! Zoom-banded clustering radius policy.
//!
//! # Responsibility
//! - Map a map zoom level to the clustering radius in kilometers.
//! - Validate custom band tables before they reach the engine.
//!
//! # Invariants
//! - Bands are sorted by strictly ascending `max_zoom`.
//! - A zoom above the last band (or NaN) maps to radius `0.0`, which means
//!   "do not cluster".

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static DEFAULT_POLICY: Lazy<RadiusPolicy> = Lazy::new(RadiusPolicy::default);

/// One row of the band table: zooms `<= max_zoom` use `radius_km`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusBand {
    pub max_zoom: f64,
    pub radius_km: f64,
}

impl RadiusBand {
    pub const fn new(max_zoom: f64, radius_km: f64) -> Self {
        Self {
            max_zoom,
            radius_km,
        }
    }
}

/// Built-in band table.
pub const DEFAULT_RADIUS_BANDS: [RadiusBand; 4] = [
    RadiusBand::new(3.0, 1000.0),
    RadiusBand::new(5.0, 500.0),
    RadiusBand::new(7.0, 200.0),
    RadiusBand::new(9.0, 50.0),
];

/// Validated band table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RadiusBand>", into = "Vec<RadiusBand>")]
pub struct RadiusPolicy {
    bands: Vec<RadiusBand>,
}

impl RadiusPolicy {
    /// Creates a policy from a custom band table.
    ///
    /// # Errors
    /// - `Empty` when no band is given.
    /// - `InvalidBand` when a zoom or radius is non-finite or a radius is
    ///   negative.
    /// - `UnsortedBands` when `max_zoom` values are not strictly ascending.
    pub fn new(bands: Vec<RadiusBand>) -> Result<Self, RadiusPolicyError> {
        if bands.is_empty() {
            return Err(RadiusPolicyError::Empty);
        }
        for (index, band) in bands.iter().enumerate() {
            if !band.max_zoom.is_finite() || !band.radius_km.is_finite() || band.radius_km < 0.0
            {
                return Err(RadiusPolicyError::InvalidBand { index });
            }
        }
        if let Some(index) = bands
            .windows(2)
            .position(|pair| pair[1].max_zoom <= pair[0].max_zoom)
        {
            return Err(RadiusPolicyError::UnsortedBands { index: index + 1 });
        }
        Ok(Self { bands })
    }

    /// Shared instance of the built-in table.
    pub fn shared_default() -> &'static RadiusPolicy {
        &DEFAULT_POLICY
    }

    pub fn bands(&self) -> &[RadiusBand] {
        &self.bands
    }

    /// Radius in kilometers for `zoom`; `0.0` disables clustering.
    pub fn radius_for_zoom(&self, zoom: f64) -> f64 {
        self.bands
            .iter()
            .find(|band| zoom <= band.max_zoom)
            .map(|band| band.radius_km)
            .unwrap_or(0.0)
    }
}

impl Default for RadiusPolicy {
    fn default() -> Self {
        Self {
            bands: DEFAULT_RADIUS_BANDS.to_vec(),
        }
    }
}

impl TryFrom<Vec<RadiusBand>> for RadiusPolicy {
    type Error = RadiusPolicyError;

    fn try_from(value: Vec<RadiusBand>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RadiusPolicy> for Vec<RadiusBand> {
    fn from(value: RadiusPolicy) -> Self {
        value.bands
    }
}

/// Radius band table validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadiusPolicyError {
    Empty,
    InvalidBand { index: usize },
    UnsortedBands { index: usize },
}

impl Display for RadiusPolicyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "radius policy must contain at least one band"),
            Self::InvalidBand { index } => write!(
                f,
                "radius band {index} must have a finite zoom and a finite non-negative radius"
            ),
            Self::UnsortedBands { index } => write!(
                f,
                "radius band {index} must have a max_zoom greater than the previous band"
            ),
        }
    }
}

impl Error for RadiusPolicyError {}

/// Radius for `zoom` under the built-in table.
pub fn radius_for_zoom(zoom: impl Into<f64>) -> f64 {
    RadiusPolicy::shared_default().radius_for_zoom(zoom.into())
}
