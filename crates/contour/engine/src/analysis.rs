//! Analysis entry points.
//!
//! [`analyze`] characterizes one container type; [`Analyzer`] runs the same
//! pipeline over a whole [`FactoryRegistry`] and produces a
//! [`CharacterizationReport`].

use crate::aggregator::BehaviorAggregator;
use crate::auxiliary::run_auxiliary_probes;
use crate::config::ProbeConfig;
use crate::discovery::SizeRangeDiscoverer;
use crate::factory::ContainerFactory;
use crate::operation::OperationCatalog;
use crate::runner::ProbeRunner;
use chrono::{DateTime, Utc};
use contour_types::{AggregatedBehavior, CapabilityKind, ProbeError, ProbeResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{error, info};
use uuid::Uuid;

/// Characterizes one container type with the default configuration.
pub fn analyze(
    factory: &ContainerFactory,
    catalog: &OperationCatalog,
) -> ProbeResult<AggregatedBehavior> {
    Analyzer::new().analyze(factory, catalog)
}

/// Ordered, name-unique collection of factories.
#[derive(Clone, Debug, Default)]
pub struct FactoryRegistry {
    factories: Vec<ContainerFactory>,
}

impl FactoryRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a factory; names must be unique.
    pub fn register(&mut self, factory: impl Into<ContainerFactory>) -> ProbeResult<()> {
        let factory = factory.into();
        if self.get(factory.name()).is_some() {
            return Err(ProbeError::InvalidConfiguration(format!(
                "factory {} registered twice",
                factory.name()
            )));
        }
        self.factories.push(factory);
        Ok(())
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, factory: impl Into<ContainerFactory>) -> ProbeResult<Self> {
        self.register(factory)?;
        Ok(self)
    }

    /// Factory registered under `name`.
    pub fn get(&self, name: &str) -> Option<&ContainerFactory> {
        self.factories.iter().find(|f| f.name() == name)
    }

    /// Factories in registration order.
    pub fn factories(&self) -> &[ContainerFactory] {
        &self.factories
    }

    /// Registered names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.iter().map(ContainerFactory::name)
    }

    /// Number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether no factory is registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

/// One catalog per capability.
#[derive(Clone, Debug, Default)]
pub struct CatalogSet {
    catalogs: BTreeMap<CapabilityKind, OperationCatalog>,
}

impl CatalogSet {
    /// Empty catalog set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the catalog for its capability.
    pub fn with(mut self, catalog: OperationCatalog) -> Self {
        self.catalogs.insert(catalog.capability(), catalog);
        self
    }

    /// Catalog registered for exactly `capability`.
    pub fn get(&self, capability: CapabilityKind) -> Option<&OperationCatalog> {
        self.catalogs.get(&capability)
    }

    /// Operations to run against containers of `capability`. Sequences get
    /// the sequence catalog followed by the cursor catalog.
    pub fn catalog_for(&self, capability: CapabilityKind) -> Option<OperationCatalog> {
        match capability.container_kind() {
            CapabilityKind::Sequence => {
                let sequence = self.get(CapabilityKind::Sequence);
                let cursor = self.get(CapabilityKind::SequenceIterator);
                match (sequence, cursor) {
                    (Some(s), Some(c)) => Some(s.merged(c)),
                    (Some(s), None) => Some(s.clone()),
                    (None, Some(c)) => Some(c.clone()),
                    (None, None) => None,
                }
            }
            other => self.get(other).cloned(),
        }
    }
}

/// A container type whose analysis was aborted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisFailure {
    pub container: String,
    pub error: String,
}

/// Outcome of a registry-wide run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterizationReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    /// In registry order.
    pub behaviors: Vec<AggregatedBehavior>,
    pub failures: Vec<AnalysisFailure>,
}

impl CharacterizationReport {
    /// Behavior recorded for `container`.
    pub fn behavior(&self, container: &str) -> Option<&AggregatedBehavior> {
        self.behaviors.iter().find(|b| b.container == container)
    }

    /// Whether every container type was characterized.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs the characterization pipeline.
#[derive(Clone, Debug, Default)]
pub struct Analyzer {
    config: ProbeConfig,
}

impl Analyzer {
    /// Analyzer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer driven by `config`.
    pub fn with_config(config: ProbeConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Size discovery, every catalog probe and the auxiliary probes for one
    /// container type, folded into its behavior.
    pub fn analyze(
        &self,
        factory: &ContainerFactory,
        catalog: &OperationCatalog,
    ) -> ProbeResult<AggregatedBehavior> {
        self.config.validate()?;
        let name = factory.name();
        let payload = &self.config.reference_payload;
        info!(
            container = %name,
            variant = ?factory.variant(),
            operations = catalog.len(),
            "analyzing container type"
        );

        let sizes = SizeRangeDiscoverer::new(self.config.size_ceiling).discover(factory)?;
        let findings = ProbeRunner::new(factory, payload).run_catalog(catalog)?;
        let auxiliary = run_auxiliary_probes(factory, payload)?;
        let behavior = BehaviorAggregator::new(name).aggregate(factory, sizes, auxiliary, findings)?;

        info!(
            container = %name,
            mutability = ?behavior.mutability(),
            ranges = behavior.sizes.ranges.len(),
            "container type characterized"
        );
        Ok(behavior)
    }

    /// Analyzes every registered factory with the catalog for its
    /// capability.
    ///
    /// A failed type is recorded and skipped, or aborts the run when
    /// `fail_fast` is set.
    pub fn analyze_registry(
        &self,
        registry: &FactoryRegistry,
        catalogs: &CatalogSet,
    ) -> ProbeResult<CharacterizationReport> {
        self.config.validate()?;
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(
            run_id = %run_id,
            containers = registry.len(),
            parallel = self.config.parallel,
            "characterization run started"
        );

        let mut behaviors = Vec::new();
        let mut failures = Vec::new();
        let mut record = |name: &str, outcome: ProbeResult<AggregatedBehavior>| -> ProbeResult<()> {
            match outcome {
                Ok(behavior) => behaviors.push(behavior),
                Err(err) => {
                    error!(run_id = %run_id, container = %name, error = %err, "container type analysis failed");
                    if self.config.fail_fast {
                        return Err(err);
                    }
                    failures.push(AnalysisFailure {
                        container: name.to_string(),
                        error: err.to_string(),
                    });
                }
            }
            Ok(())
        };

        if self.config.parallel {
            let outcomes: Vec<_> = registry
                .factories()
                .par_iter()
                .map(|factory| (factory.name(), self.analyze_entry(factory, catalogs)))
                .collect();
            for (name, outcome) in outcomes {
                record(name, outcome)?;
            }
        } else {
            for factory in registry.factories() {
                record(factory.name(), self.analyze_entry(factory, catalogs))?;
            }
        }

        let completed_at = Utc::now();
        info!(
            run_id = %run_id,
            characterized = behaviors.len(),
            failed = failures.len(),
            "characterization run completed"
        );
        Ok(CharacterizationReport {
            run_id,
            started_at,
            completed_at,
            behaviors,
            failures,
        })
    }

    fn analyze_entry(
        &self,
        factory: &ContainerFactory,
        catalogs: &CatalogSet,
    ) -> ProbeResult<AggregatedBehavior> {
        let catalog = catalogs.catalog_for(factory.capability()).ok_or_else(|| {
            ProbeError::InvalidConfiguration(format!(
                "no catalog for {} containers",
                factory.capability()
            ))
        })?;
        self.analyze(factory, &catalog)
    }
}
