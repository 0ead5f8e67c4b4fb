//! Cluster glyph policy.
//!
//! # Responsibility
//! - Turn one `ClusterData` into a renderer-agnostic glyph description.
//!
//! # Invariants
//! - `describe` is pure: same cluster in, same visual out.
//! - Opacity never drops below `MIN_OPACITY`.

use crate::cluster::engine::ClusterData;
use crate::model::spot::Mood;
use serde::Serialize;

/// Lower bound for glyph opacity.
pub const MIN_OPACITY: f64 = 0.7;
const SOLID_BORDER_CONFIDENCE: f64 = 0.6;
const DASHED_BORDER_CONFIDENCE: f64 = 0.3;
const MEDIUM_CLUSTER_MIN: usize = 10;
const LARGE_CLUSTER_MIN: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub fn for_count(count: usize) -> Self {
        if count < MEDIUM_CLUSTER_MIN {
            Self::Small
        } else if count < LARGE_CLUSTER_MIN {
            Self::Medium
        } else {
            Self::Large
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Glyph diameter in CSS pixels.
    pub fn diameter_px(self) -> u32 {
        match self {
            Self::Small => 40,
            Self::Medium => 50,
            Self::Large => 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderStyle {
    Solid,
    Dashed,
    Dotted,
}

impl BorderStyle {
    pub fn for_confidence(confidence: f64) -> Self {
        if confidence > SOLID_BORDER_CONFIDENCE {
            Self::Solid
        } else if confidence > DASHED_BORDER_CONFIDENCE {
            Self::Dashed
        } else {
            Self::Dotted
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
        }
    }
}

/// One slice of a blended glyph, in degrees.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlendArc {
    pub mood: Mood,
    pub color: &'static str,
    pub count: usize,
    pub start_deg: f64,
    pub end_deg: f64,
}

/// How the glyph body is drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GlyphBody {
    /// Single mood: its emoji plus a count badge.
    Emblem {
        mood: Mood,
        emoji: &'static str,
        badge: usize,
    },
    /// Mixed moods: proportional arcs plus a plain numeric label.
    Blend { arcs: Vec<BlendArc>, label: String },
}

/// Full visual description of one cluster glyph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterVisual {
    pub size_class: SizeClass,
    pub homogeneous: bool,
    pub body: GlyphBody,
    /// Dominant mood share in `[0, 1]`.
    pub confidence: f64,
    pub opacity: f64,
    pub border: BorderStyle,
    pub tooltip: String,
}

impl ClusterVisual {
    /// CSS `conic-gradient` for blended glyphs; `None` for emblems.
    pub fn conic_gradient(&self) -> Option<String> {
        let GlyphBody::Blend { arcs, .. } = &self.body else {
            return None;
        };
        let stops = arcs
            .iter()
            .map(|arc| {
                format!(
                    "{} {}deg {}deg",
                    arc.color,
                    round_2(arc.start_deg),
                    round_2(arc.end_deg)
                )
            })
            .collect::<Vec<_>>();
        Some(format!("conic-gradient({})", stops.join(", ")))
    }

    /// CSS class of the glyph container, e.g. `mood-cluster-medium`.
    pub fn css_class(&self) -> String {
        format!("mood-cluster-{}", self.size_class.as_str())
    }
}

/// Describes how `cluster` should be drawn.
pub fn describe(cluster: &ClusterData<'_>) -> ClusterVisual {
    let count = cluster.count;
    let dominant = cluster.dominant;
    let distribution = &cluster.distribution;

    let homogeneous = distribution.distinct_tagged_moods() == 1 && !dominant.is_none();
    let confidence = if count == 0 {
        0.0
    } else {
        cluster.dominant_count() as f64 / count as f64
    };

    let body = if homogeneous {
        GlyphBody::Emblem {
            mood: dominant,
            emoji: dominant.emoji(),
            badge: count,
        }
    } else {
        GlyphBody::Blend {
            arcs: blend_arcs(cluster),
            label: count.to_string(),
        }
    };

    ClusterVisual {
        size_class: SizeClass::for_count(count),
        homogeneous,
        body,
        confidence,
        opacity: confidence.max(MIN_OPACITY),
        border: BorderStyle::for_confidence(confidence),
        tooltip: tooltip(cluster, homogeneous),
    }
}

fn blend_arcs(cluster: &ClusterData<'_>) -> Vec<BlendArc> {
    let total = cluster.count as f64;
    if total <= 0.0 {
        return Vec::new();
    }
    let mut cursor = 0.0;
    cluster
        .distribution
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(mood, count)| {
            let sweep = count as f64 / total * 360.0;
            let arc = BlendArc {
                mood,
                color: mood.color(),
                count,
                start_deg: cursor,
                end_deg: cursor + sweep,
            };
            cursor += sweep;
            arc
        })
        .collect()
}

fn tooltip(cluster: &ClusterData<'_>, homogeneous: bool) -> String {
    if homogeneous {
        return format!("{} {} vibes", cluster.count, cluster.dominant.as_str());
    }

    let mut tagged = cluster
        .distribution
        .iter()
        .filter(|(mood, count)| !mood.is_none() && *count > 0)
        .collect::<Vec<_>>();
    tagged.sort_by(|a, b| b.1.cmp(&a.1));

    let mut lines = tagged
        .into_iter()
        .map(|(mood, count)| {
            format!(
                "{} {} {}% ({})",
                mood.emoji(),
                mood.as_str(),
                percentage(count, cluster.count),
                count
            )
        })
        .collect::<Vec<_>>();

    let untagged = cluster.distribution.get(Mood::None);
    if untagged > 0 {
        lines.push(format!(
            "{} {}% ({})",
            Mood::None.emoji(),
            percentage(untagged, cluster.count),
            untagged
        ));
    }
    lines.join("\n")
}

fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}

fn round_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
