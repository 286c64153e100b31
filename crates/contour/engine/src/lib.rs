#![deny(unsafe_code)]
//! # contour-engine
//!
//! Black-box behavior characterization for container types.
//!
//! A [`ContainerFactory`] is probed with an [`OperationCatalog`]. For every
//! operation the [`ProbeRunner`] calibrates against a permissive reference
//! copy, runs the same call on the container under test and classifies the
//! outcome. The [`SizeRangeDiscoverer`] profiles which implementation each
//! size produces, and the [`BehaviorAggregator`] folds everything into an
//! [`AggregatedBehavior`](contour_types::AggregatedBehavior).
//!
//! ```text
//! factory ──▶ SizeRangeDiscoverer ──────────────┐
//!    │                                          ▼
//!    └──▶ ProbeRunner (interceptor + classifier) ──▶ BehaviorAggregator
//! ```

pub mod aggregator;
pub mod analysis;
pub mod auxiliary;
pub mod classifier;
pub mod config;
pub mod discovery;
pub mod factory;
pub mod interceptor;
pub mod operation;
pub mod runner;

pub use aggregator::BehaviorAggregator;
pub use analysis::{
    analyze, AnalysisFailure, Analyzer, CatalogSet, CharacterizationReport, FactoryRegistry,
};
pub use auxiliary::{run_auxiliary_probes, AuxiliaryFindings};
pub use classifier::{calibration_effect, classify};
pub use config::ProbeConfig;
pub use discovery::{discover_size_ranges, SizeRangeDiscoverer, DEFAULT_SIZE_CEILING};
pub use factory::{
    BackedContainer, BackingHandle, CollectingFactory, ContainerFactory, DirectFactory,
    EmptyFactory, Seed, SeedKind, SingleElementFactory, WrappingFactory,
};
pub use interceptor::{
    InvocationLog, RecordingCursor, RecordingMap, RecordingSequence, RecordingSet,
};
pub use operation::{CursorStart, Operation, OperationCall, OperationCatalog};
pub use runner::ProbeRunner;
