//! Spot domain model.
//!
//! # Responsibility
//! - Define the geotagged record consumed by clustering and the marker layer.
//! - Accept the loose shapes remote payloads use for ids and coordinates.
//!
//! # Invariants
//! - Core code never mutates a `Spot`; it only reads borrowed slices.
//! - Coordinates that cannot be parsed decode as NaN instead of failing the
//!   whole payload, so the marker layer can skip just that spot.
//! - A mood of any unexpected shape decodes as `Mood::None`.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

/// Stable identifier for a spot.
///
/// Remote records use either numeric or string ids; both are normalized to
/// their string form.
pub type SpotId = String;

/// Closed set of moods a spot can be tagged with.
///
/// `None` is a real category: it is counted in distributions and rendered as
/// its own slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Chill,
    Energetic,
    Social,
    Creative,
    Romantic,
    Adventurous,
    #[default]
    None,
}

impl Mood {
    /// All moods in declaration order.
    pub const ALL: [Mood; 7] = [
        Mood::Chill,
        Mood::Energetic,
        Mood::Social,
        Mood::Creative,
        Mood::Romantic,
        Mood::Adventurous,
        Mood::None,
    ];

    /// Stable lowercase name used in tooltips and wire payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chill => "chill",
            Self::Energetic => "energetic",
            Self::Social => "social",
            Self::Creative => "creative",
            Self::Romantic => "romantic",
            Self::Adventurous => "adventurous",
            Self::None => "none",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Chill => "😌",
            Self::Energetic => "⚡",
            Self::Social => "🎉",
            Self::Creative => "🎨",
            Self::Romantic => "💕",
            Self::Adventurous => "🧭",
            Self::None => "🎯",
        }
    }

    /// Hex color used for blend arcs.
    pub fn color(self) -> &'static str {
        match self {
            Self::Chill => "#60a5fa",
            Self::Energetic => "#f97316",
            Self::Social => "#facc15",
            Self::Creative => "#a855f7",
            Self::Romantic => "#ec4899",
            Self::Adventurous => "#22c55e",
            Self::None => "#9ca3af",
        }
    }

    /// Parses a mood name, mapping unknown or empty values to `Mood::None`.
    pub fn parse_lenient(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mood| mood.as_str() == normalized)
            .unwrap_or(Self::None)
    }

    pub fn is_none(self) -> bool {
        self == Self::None
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single geotagged spot to display on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    #[serde(deserialize_with = "deserialize_spot_id")]
    pub id: SpotId,
    /// Latitude in degrees. NaN when the remote value was not numeric.
    #[serde(default = "missing_coordinate", deserialize_with = "deserialize_coordinate")]
    pub lat: f64,
    /// Longitude in degrees. NaN when the remote value was not numeric.
    #[serde(default = "missing_coordinate", deserialize_with = "deserialize_coordinate")]
    pub lng: f64,
    /// Unknown or null mood values decode as `Mood::None`.
    #[serde(default, deserialize_with = "deserialize_mood")]
    pub mood: Mood,
    /// Display title for popup content.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_owner: bool,
}

impl Spot {
    /// Creates a public, not-owned spot.
    pub fn new(id: impl Into<SpotId>, lat: f64, lng: f64, mood: Mood) -> Self {
        Self {
            id: id.into(),
            lat,
            lng,
            mood,
            name: None,
            is_private: false,
            is_owner: false,
        }
    }

    /// Sets the display title.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns whether both coordinates are finite numbers.
    pub fn has_valid_coordinates(&self) -> bool {
        crate::geo::distance::is_valid_coordinate(self.lat, self.lng)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSpotId {
    Text(String),
    Int(i64),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCoordinate {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMood {
    Text(String),
    Other(IgnoredAny),
}

fn missing_coordinate() -> f64 {
    f64::NAN
}

fn deserialize_spot_id<'de, D>(deserializer: D) -> Result<SpotId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawSpotId::deserialize(deserializer)? {
        RawSpotId::Text(value) => value,
        RawSpotId::Int(value) => value.to_string(),
    })
}

fn deserialize_coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<RawCoordinate>::deserialize(deserializer)?;
    Ok(match value {
        Some(RawCoordinate::Number(value)) => value,
        Some(RawCoordinate::Text(text)) => text.trim().parse::<f64>().unwrap_or(f64::NAN),
        Some(RawCoordinate::Other(_)) | None => f64::NAN,
    })
}

fn deserialize_mood<'de, D>(deserializer: D) -> Result<Mood, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawMood>::deserialize(deserializer)? {
        Some(RawMood::Text(value)) => Mood::parse_lenient(&value),
        Some(RawMood::Other(_)) | None => Mood::None,
    })
}

#[cfg(test)]
mod tests {
    use super::{Mood, Spot};

    #[test]
    fn mood_names_are_unique() {
        let mut names = Mood::ALL.iter().map(|mood| mood.as_str()).collect::<Vec<_>>();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Mood::ALL.len());
    }

    #[test]
    fn default_mood_is_none() {
        assert_eq!(Mood::default(), Mood::None);
        assert!(Mood::default().is_none());
    }

    #[test]
    fn parse_lenient_maps_unknown_to_none() {
        assert_eq!(Mood::parse_lenient(" Chill "), Mood::Chill);
        assert_eq!(Mood::parse_lenient("euphoric"), Mood::None);
        assert_eq!(Mood::parse_lenient(""), Mood::None);
    }

    #[test]
    fn new_spot_has_public_defaults() {
        let spot = Spot::new("a", 1.0, 2.0, Mood::Chill).with_name("Pier");
        assert_eq!(spot.name.as_deref(), Some("Pier"));
        assert!(!spot.is_private);
        assert!(!spot.is_owner);
        assert!(spot.has_valid_coordinates());
    }

    #[test]
    fn nan_coordinates_are_invalid() {
        let spot = Spot::new("a", f64::NAN, 2.0, Mood::None);
        assert!(!spot.has_valid_coordinates());
    }
}
