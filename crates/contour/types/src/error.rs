//! Error types.
//!
//! Three families are kept apart:
//! - [`ContainerError`]: a refusal reported by a container under test. It is
//!   probe data and never escapes the probe runner.
//! - [`FactoryError`]: a factory could not produce a container. Its
//!   `SizeNotSupported` variant is the only recoverable control-flow signal.
//! - [`ProbeError`]: an internal-consistency failure that aborts the analysis
//!   of one container type.

use crate::effect::CapabilityKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of refusal a container reports for a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    IndexOutOfBounds,
    NoSuchElement,
    IllegalState,
    UnsupportedOperation,
    NullElement,
    IllegalArgument,
}

impl ErrorKind {
    /// Bounds and state refusals, which the reference copy reproduces.
    pub fn is_positional(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfBounds | Self::NoSuchElement | Self::IllegalState
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::IndexOutOfBounds => "index out of bounds",
            Self::NoSuchElement => "no such element",
            Self::IllegalState => "illegal state",
            Self::UnsupportedOperation => "unsupported operation",
            Self::NullElement => "null element",
            Self::IllegalArgument => "illegal argument",
        };
        f.write_str(name)
    }
}

/// A refusal raised by a container method.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ContainerError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ContainerError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::new(
            ErrorKind::IndexOutOfBounds,
            format!("index {} out of bounds for length {}", index, len),
        )
    }

    pub fn no_such_element(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoSuchElement, detail)
    }

    pub fn illegal_state(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::IllegalState, detail)
    }

    pub fn unsupported(method: &str) -> Self {
        Self::new(
            ErrorKind::UnsupportedOperation,
            format!("{} is not supported", method),
        )
    }

    pub fn null_element(method: &str) -> Self {
        Self::new(
            ErrorKind::NullElement,
            format!("{} does not accept null", method),
        )
    }

    pub fn illegal_argument(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::IllegalArgument, detail)
    }
}

/// Result of a container method.
pub type ContainerResult<T> = Result<T, ContainerError>;

/// A factory failed to produce a container.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FactoryError {
    #[error("{factory} cannot hold {requested} elements (limit {limit})")]
    SizeNotSupported {
        factory: String,
        requested: usize,
        limit: usize,
    },
    #[error("{factory} rejected construction: {source}")]
    Rejected {
        factory: String,
        source: ContainerError,
    },
}

impl FactoryError {
    pub fn is_size_not_supported(&self) -> bool {
        matches!(self, Self::SizeNotSupported { .. })
    }
}

/// Fatal errors: the probe catalog's assumptions do not hold for a type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("{container}: calibration copy diverged after {operation}: reference {reference}, calibrated {calibrated}")]
    CalibrationDivergence {
        container: String,
        operation: String,
        reference: String,
        calibrated: String,
    },
    #[error("{container}: supported sizes are not contiguous ({after} is followed by {next})")]
    NonContiguousSizes {
        container: String,
        after: usize,
        next: usize,
    },
    #[error("{container}: no size between 0 and {ceiling} is supported")]
    NoSupportedSize { container: String, ceiling: usize },
    #[error("{container}: null-argument queries disagree ({succeeded} succeeded, {failed} failed)")]
    AmbiguousNullArgumentSupport {
        container: String,
        succeeded: usize,
        failed: usize,
    },
    #[error("{container}: size can change but entries cannot be modified")]
    SizeChangeWithoutModification { container: String },
    #[error("{container}: null elements are rejected but every null query succeeds")]
    NullSupportContradiction { container: String },
    #[error("{container}: operation {operation} targets {target}, container is a {actual}")]
    CapabilityMismatch {
        container: String,
        operation: String,
        target: CapabilityKind,
        actual: CapabilityKind,
    },
    #[error(transparent)]
    Factory(#[from] FactoryError),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Convenience result type for probe operations.
pub type ProbeResult<T> = Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_kinds() {
        assert!(ErrorKind::IndexOutOfBounds.is_positional());
        assert!(ErrorKind::NoSuchElement.is_positional());
        assert!(ErrorKind::IllegalState.is_positional());
        assert!(!ErrorKind::UnsupportedOperation.is_positional());
        assert!(!ErrorKind::NullElement.is_positional());
    }

    #[test]
    fn container_error_display() {
        let err = ContainerError::index_out_of_bounds(4, 4);
        assert_eq!(err.kind, ErrorKind::IndexOutOfBounds);
        assert!(err.to_string().contains("index 4 out of bounds for length 4"));
    }

    #[test]
    fn factory_error_display() {
        let err = FactoryError::SizeNotSupported {
            factory: "singleton".into(),
            requested: 3,
            limit: 1,
        };
        assert!(err.is_size_not_supported());
        assert!(err.to_string().contains("cannot hold 3 elements"));
    }

    #[test]
    fn probe_error_wraps_factory_error() {
        let err: ProbeError = FactoryError::Rejected {
            factory: "frozen".into(),
            source: ContainerError::null_element("construction"),
        }
        .into();
        assert!(err.to_string().contains("frozen rejected construction"));
    }

    #[test]
    fn mismatch_display_names_capabilities() {
        let err = ProbeError::CapabilityMismatch {
            container: "tree set".into(),
            operation: "get(0)".into(),
            target: CapabilityKind::Sequence,
            actual: CapabilityKind::Set,
        };
        let text = err.to_string();
        assert!(text.contains("targets sequence"));
        assert!(text.contains("is a set"));
    }
}
