//! Capabilities, operation tags and classified effects.

use crate::error::ErrorKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Public capability surface a container or operation belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityKind {
    Sequence,
    SequenceIterator,
    Set,
    Map,
}

impl CapabilityKind {
    /// Capability of the container an operation of this kind runs against.
    pub fn container_kind(&self) -> CapabilityKind {
        match self {
            Self::SequenceIterator => Self::Sequence,
            other => *other,
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sequence => "sequence",
            Self::SequenceIterator => "sequence-iterator",
            Self::Set => "set",
            Self::Map => "map",
        };
        f.write_str(name)
    }
}

/// Tags attached to catalog operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationTag {
    /// At least one argument is `Element::Null`.
    NullArgument,
    /// At least one argument is an empty slice.
    EmptyArgument,
    /// The call is a query and never mutates a well-behaved container.
    ReadOnly,
}

/// Classified consequence of running one operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    NonModifying,
    Modifying,
    SizeAltering,
    IndexOutOfBounds,
    NoSuchElement,
    IllegalState,
}

impl Effect {
    /// Effect recorded when the calibration copy itself refuses the call.
    pub fn from_error_kind(kind: ErrorKind) -> Option<Effect> {
        match kind {
            ErrorKind::IndexOutOfBounds => Some(Self::IndexOutOfBounds),
            ErrorKind::NoSuchElement => Some(Self::NoSuchElement),
            ErrorKind::IllegalState => Some(Self::IllegalState),
            _ => None,
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NonModifying => "NON_MODIFYING",
            Self::Modifying => "MODIFYING",
            Self::SizeAltering => "SIZE_ALTERING",
            Self::IndexOutOfBounds => "INDEX_OUT_OF_BOUNDS",
            Self::NoSuchElement => "NO_SUCH_ELEMENT",
            Self::IllegalState => "ILLEGAL_STATE",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterator_runs_against_sequences() {
        assert_eq!(
            CapabilityKind::SequenceIterator.container_kind(),
            CapabilityKind::Sequence
        );
        assert_eq!(CapabilityKind::Map.container_kind(), CapabilityKind::Map);
    }

    #[test]
    fn positional_errors_map_to_effects() {
        assert_eq!(
            Effect::from_error_kind(ErrorKind::NoSuchElement),
            Some(Effect::NoSuchElement)
        );
        assert_eq!(Effect::from_error_kind(ErrorKind::UnsupportedOperation), None);
    }

    #[test]
    fn capability_serializes_kebab_case() {
        let json = serde_json::to_string(&CapabilityKind::SequenceIterator).unwrap();
        assert_eq!(json, "\"sequence-iterator\"");
    }
}
