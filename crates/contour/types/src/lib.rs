#![deny(unsafe_code)]
//! # contour-types
//!
//! Shared data model for black-box container characterization.
//!
//! A container type is probed with a curated catalog of operations. Each
//! probe yields a [`Finding`]; size discovery yields a [`SizeProfile`]; both
//! are folded into one [`AggregatedBehavior`] per container type.

pub mod behavior;
pub mod effect;
pub mod element;
pub mod error;
pub mod finding;
pub mod size;

pub use behavior::{
    AggregatedBehavior, BackingInfluence, FactoryVariant, ModificationCapability, Mutability,
    NullElementSupport,
};
pub use effect::{CapabilityKind, Effect, OperationTag};
pub use element::{
    generated_payload, reference_payload, render_elements, Element, REFERENCE_VALUES,
};
pub use error::{
    ContainerError, ContainerResult, ErrorKind, FactoryError, ProbeError, ProbeResult,
};
pub use finding::{Finding, Invocation};
pub use size::{ImplementationId, SeededRanges, SizeBound, SizeProfile, SizeRange, SupportedSizes};
