#![deny(unsafe_code)]
//! # contour-containers
//!
//! Capability surfaces and the container implementations the engine probes.
//!
//! - [`ReferenceSequence`], [`ReferenceSet`], [`ReferenceMap`]: permissive,
//!   mutable; used for calibration.
//! - [`FrozenSequence`], [`FrozenSet`], [`FrozenMap`]: refuse every mutator.
//! - [`SequenceView`], [`SetView`], [`MapView`]: read through to a shared
//!   source under a [`ViewPolicy`].

pub mod container;
pub mod cursor;
pub mod frozen;
pub mod reference;
pub mod traits;
pub mod view;

pub use container::{Container, SharedContainer, Snapshot};
pub use cursor::{cursor, IndexCursor};
pub use frozen::{FrozenMap, FrozenSequence, FrozenSet, IdentityRule, NullPolicy};
pub use reference::{ReferenceMap, ReferenceSequence, ReferenceSet};
pub use traits::{Map, Sequence, SequenceCursor, Set};
pub use view::{MapView, SequenceView, SetView, ViewPolicy};
