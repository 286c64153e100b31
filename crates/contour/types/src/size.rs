//! Size ranges and implementation identities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the concrete strategy backing a container instance.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ImplementationId(String);

impl ImplementationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImplementationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Upper end of a size range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeBound {
    Bounded(usize),
    /// Reached the probing ceiling without a change; presumed open-ended.
    Unbounded,
}

impl SizeBound {
    pub fn admits(&self, size: usize) -> bool {
        match self {
            Self::Bounded(max) => size <= *max,
            Self::Unbounded => true,
        }
    }
}

impl fmt::Display for SizeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounded(max) => write!(f, "{}", max),
            Self::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Contiguous band of sizes sharing one implementation identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: usize,
    pub max: SizeBound,
    pub implementation: ImplementationId,
}

impl SizeRange {
    pub fn contains(&self, size: usize) -> bool {
        size >= self.min && self.max.admits(size)
    }
}

impl fmt::Display for SizeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] {}", self.min, self.max, self.implementation)
    }
}

/// Sizes a container type can represent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedSizes {
    pub min: usize,
    pub max: SizeBound,
}

/// Ranges discovered through an alternate construction seed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededRanges {
    pub seed: String,
    pub ranges: Vec<SizeRange>,
}

/// Full outcome of size-range discovery for one container type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeProfile {
    pub supported: SupportedSizes,
    pub ranges: Vec<SizeRange>,
    /// Only seeds whose ranges differ from `ranges`.
    pub alternates: Vec<SeededRanges>,
}
