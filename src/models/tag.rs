//! Trait tag model.
//!
//! Tags mark traits that affect a student's classroom-support burden
//! (mobility support, aggression, frequent absence, ...). Each tag owns a
//! background/text color pair so the UI can render consistent badges; the
//! colors are CSS utility class names carried verbatim in snapshots.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A trait tag attachable to students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDefinition {
    /// Unique tag identifier.
    pub id: String,
    /// Display label. Unique among tags (exact, case-sensitive).
    pub label: String,
    /// Badge background class, e.g. `"bg-red-100"`.
    pub color_bg: String,
    /// Badge text class, e.g. `"text-red-800"`.
    pub color_text: String,
}

/// A background/text color pair from the badge palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagColor {
    pub bg: &'static str,
    pub text: &'static str,
}

/// Badge color palette for operator-created tags.
pub const TAG_COLORS: &[TagColor] = &[
    TagColor { bg: "bg-red-100", text: "text-red-800" },
    TagColor { bg: "bg-orange-100", text: "text-orange-800" },
    TagColor { bg: "bg-amber-100", text: "text-amber-800" },
    TagColor { bg: "bg-yellow-100", text: "text-yellow-800" },
    TagColor { bg: "bg-lime-100", text: "text-lime-800" },
    TagColor { bg: "bg-green-100", text: "text-green-800" },
    TagColor { bg: "bg-teal-100", text: "text-teal-800" },
    TagColor { bg: "bg-cyan-100", text: "text-cyan-800" },
    TagColor { bg: "bg-sky-100", text: "text-sky-800" },
    TagColor { bg: "bg-indigo-100", text: "text-indigo-800" },
    TagColor { bg: "bg-purple-100", text: "text-purple-800" },
    TagColor { bg: "bg-pink-100", text: "text-pink-800" },
];

impl TagDefinition {
    /// Creates a tag.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        color_bg: impl Into<String>,
        color_text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color_bg: color_bg.into(),
            color_text: color_text.into(),
        }
    }
}

/// The built-in tag set restored by `reset_data` and sample generation.
///
/// Labels are the support-burden traits the analysis prompt interprets:
/// risk factors (공격성, 화장실지원, 보행지원, 휠체어, 학부모예민, 분쇄식)
/// and relief factors (잦은결석, 교사보조가능).
pub fn builtin_tags() -> Vec<TagDefinition> {
    vec![
        TagDefinition::new("aggression", "공격성", "bg-red-100", "text-red-800"),
        TagDefinition::new("toilet-support", "화장실지원", "bg-amber-100", "text-amber-800"),
        TagDefinition::new("walking-support", "보행지원", "bg-orange-100", "text-orange-800"),
        TagDefinition::new("wheelchair", "휠체어", "bg-indigo-100", "text-indigo-800"),
        TagDefinition::new("sensitive-parent", "학부모예민", "bg-purple-100", "text-purple-800"),
        TagDefinition::new("blended-meal", "분쇄식", "bg-yellow-100", "text-yellow-800"),
        TagDefinition::new("frequent-absence", "잦은결석", "bg-sky-100", "text-sky-800"),
        TagDefinition::new("teacher-helper", "교사보조가능", "bg-green-100", "text-green-800"),
    ]
}

/// Picks a badge color for a new tag.
///
/// Prefers a uniform random choice among palette colors whose background
/// is not used by any existing tag; once the palette is exhausted, falls
/// back to a uniform random choice over the full palette.
pub fn pick_tag_color<R: Rng>(existing: &[TagDefinition], rng: &mut R) -> TagColor {
    let available: Vec<&TagColor> = TAG_COLORS
        .iter()
        .filter(|c| !existing.iter().any(|t| t.color_bg == c.bg))
        .collect();

    match available.choose(rng) {
        Some(color) => **color,
        // Every palette color is in use.
        None => *TAG_COLORS.choose(rng).unwrap_or(&TAG_COLORS[0]),
    }
}
