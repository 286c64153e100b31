//! Aggregated per-container-type behaviour.

use crate::effect::CapabilityKind;
use crate::finding::Finding;
use crate::size::SizeProfile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Construction strategy of a container factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactoryVariant {
    Direct,
    Wrapping,
    StreamCollecting,
    SingleElement,
    Empty,
}

/// Whether a container can hold `Element::Null`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullElementSupport {
    Yes,
    No,
    /// The factory cannot build a container large enough to hold one.
    NotApplicable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModificationCapability {
    CanModifyEntries,
    CanChangeSize,
}

/// Direction in which a backing structure and its derived container see
/// each other's mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackingInfluence {
    StructureInfluencesContainer,
    ContainerInfluencesStructure,
}

/// Mutability class derived from the modification capabilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mutability {
    Immutable,
    FixedSize,
    Resizable,
}

/// Everything learned about one container type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedBehavior {
    pub container: String,
    pub capability: CapabilityKind,
    pub variant: FactoryVariant,
    /// Largest size the factory declares it can build.
    pub size_limit: Option<usize>,
    pub sizes: SizeProfile,
    pub null_element_support: NullElementSupport,
    /// `None` when no null-argument query applied.
    pub null_argument_support: Option<bool>,
    pub modification: BTreeSet<ModificationCapability>,
    pub backing: BTreeSet<BackingInfluence>,
    /// Sequences only.
    pub random_access: Option<bool>,
    /// Wrapping factories only.
    pub self_wrapping_idempotent: Option<bool>,
    pub findings: Vec<Finding>,
}

impl AggregatedBehavior {
    pub fn can_modify_entries(&self) -> bool {
        self.modification
            .contains(&ModificationCapability::CanModifyEntries)
    }

    pub fn can_change_size(&self) -> bool {
        self.modification
            .contains(&ModificationCapability::CanChangeSize)
    }

    pub fn mutability(&self) -> Mutability {
        match (self.can_modify_entries(), self.can_change_size()) {
            (_, true) => Mutability::Resizable,
            (true, false) => Mutability::FixedSize,
            (false, false) => Mutability::Immutable,
        }
    }

    /// Findings for the given catalog probe name.
    pub fn findings_for<'a>(&'a self, probe: &'a str) -> impl Iterator<Item = &'a Finding> + 'a {
        self.findings.iter().filter(move |f| f.probe == probe)
    }
}
