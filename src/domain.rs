use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::MorphoError;

/// Canonical strain labels every retained record is rewritten to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalStrain {
    #[serde(rename = "C57BL/6")]
    C57bl6,
    #[serde(rename = "ApoE-Knockout")]
    ApoeKnockout,
    #[serde(rename = "Humanized ApoE3")]
    HumanizedApoe3,
    #[serde(rename = "Humanized ApoE4")]
    HumanizedApoe4,
}

impl CanonicalStrain {
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalStrain::C57bl6 => "C57BL/6",
            CanonicalStrain::ApoeKnockout => "ApoE-Knockout",
            CanonicalStrain::HumanizedApoe3 => "Humanized ApoE3",
            CanonicalStrain::HumanizedApoe4 => "Humanized ApoE4",
        }
    }
}

impl fmt::Display for CanonicalStrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered (pattern, label) table for strain canonicalization.
/// Patterns are lower-case substrings, first match wins, so priority
/// is inspectable here rather than buried in conditionals.
pub const STRAIN_PATTERNS: [(&str, CanonicalStrain); 5] = [
    ("c57bl/6j", CanonicalStrain::C57bl6),
    ("c57bl/6", CanonicalStrain::C57bl6),
    ("apoe-knockout", CanonicalStrain::ApoeKnockout),
    ("humanized apoe3", CanonicalStrain::HumanizedApoe3),
    ("humanized apoe4", CanonicalStrain::HumanizedApoe4),
];

/// Free-text substrings that admit a record into the strain filter.
/// "wild type" is accepted by the filter but carries no canonical label,
/// so such records are dropped again at canonicalization.
pub const STRAIN_INCLUDE_PATTERNS: [&str; 6] = [
    "c57bl/6j",
    "c57bl/6",
    "apoe-knockout",
    "humanized apoe3",
    "humanized apoe4",
    "wild type",
];

/// Age classifications retained by normalization, matched exactly.
pub const RECOGNIZED_AGES: [&str; 3] = ["young", "young adult", "adult"];

/// Maps a free-text strain label to its canonical strain, first pattern wins.
pub fn canonicalize_strain(strain: &str) -> Option<CanonicalStrain> {
    let lowered = strain.to_lowercase();
    STRAIN_PATTERNS
        .iter()
        .find(|(pattern, _)| lowered.contains(pattern))
        .map(|(_, label)| *label)
}

/// Morphometric metrics the comparison pipeline runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Volume,
    Surface,
    SomaSurface,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Volume, Metric::Surface, Metric::SomaSurface];

    /// Field name in the remote record this metric reads.
    pub fn field(&self) -> &'static str {
        match self {
            Metric::Volume => "volume",
            Metric::Surface => "surface",
            Metric::SomaSurface => "soma_surface",
        }
    }

    /// Raw (uncoerced) text of this metric's field on a record.
    pub fn raw<'a>(&self, record: &'a RawRecord) -> Option<&'a str> {
        match self {
            Metric::Volume => record.volume.as_deref(),
            Metric::Surface => record.surface.as_deref(),
            Metric::SomaSurface => record.soma_surface.as_deref(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field())
    }
}

impl FromStr for Metric {
    type Err = MorphoError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "volume" => Ok(Metric::Volume),
            "surface" => Ok(Metric::Surface),
            "soma_surface" => Ok(Metric::SomaSurface),
            other => Err(MorphoError::UnknownMetric(other.to_string())),
        }
    }
}

/// One neuron reconstruction's metadata as returned by the remote service.
///
/// Morphometric fields stay as raw text until a metric pipeline coerces
/// them; the service emits numbers and numeric strings interchangeably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RawRecord {
    pub neuron_id: Option<u64>,
    pub neuron_name: Option<String>,
    pub species: Option<String>,
    pub strain: Option<String>,
    pub age_classification: Option<String>,
    #[serde(default)]
    pub experiment_condition: Vec<String>,
    #[serde(default)]
    pub brain_region: Vec<String>,
    pub volume: Option<String>,
    pub surface: Option<String>,
    pub soma_surface: Option<String>,
}

/// A raw record that passed every inclusion filter, with its strain
/// rewritten to a canonical label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub strain: CanonicalStrain,
    pub record: RawRecord,
}

/// One record reduced to (strain, value) for a single metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSample {
    pub strain: CanonicalStrain,
    pub value: f64,
}
