//! Probe findings.

use crate::effect::{CapabilityKind, Effect, OperationTag};
use crate::error::ErrorKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A call observed by the recording interceptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Capability that declares the method.
    pub capability: CapabilityKind,
    pub method: String,
    pub parameter_types: Vec<String>,
    /// Arguments as rendered at call time.
    pub arguments: Vec<String>,
}

impl Invocation {
    pub fn new(
        capability: CapabilityKind,
        method: impl Into<String>,
        parameter_types: Vec<String>,
        arguments: Vec<String>,
    ) -> Self {
        Self {
            capability,
            method: method.into(),
            parameter_types,
            arguments,
        }
    }

    /// `method(type, type)`.
    pub fn signature(&self) -> String {
        format!("{}({})", self.method, self.parameter_types.join(", "))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}({})",
            self.capability,
            self.method,
            self.arguments.join(", ")
        )
    }
}

/// Result of one probe against one container type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Catalog name of the operation.
    pub probe: String,
    pub invocation: Invocation,
    pub tags: BTreeSet<OperationTag>,
    pub effect: Effect,
    /// Refusal raised by the container under test, if any.
    pub error: Option<ErrorKind>,
}

impl Finding {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    pub fn has_tag(&self, tag: OperationTag) -> bool {
        self.tags.contains(&tag)
    }

    /// The effect as observed on the container under test.
    ///
    /// `None` when the container refused the call; `effect` then holds what
    /// the reference copy did instead.
    pub fn observed_effect(&self) -> Option<Effect> {
        match self.error {
            None => Some(self.effect),
            Some(_) => None,
        }
    }
}
