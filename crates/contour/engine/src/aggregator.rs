//! Folds findings and auxiliary probes into one [`AggregatedBehavior`].

use crate::auxiliary::AuxiliaryFindings;
use crate::factory::ContainerFactory;
use contour_types::{
    AggregatedBehavior, Effect, Finding, ModificationCapability, NullElementSupport, OperationTag,
    ProbeError, ProbeResult, SizeProfile,
};
use std::collections::BTreeSet;
use tracing::warn;

/// Derives summary properties for one container type.
pub struct BehaviorAggregator<'a> {
    container: &'a str,
}

impl<'a> BehaviorAggregator<'a> {
    /// Aggregator reporting under `container`.
    pub fn new(container: &'a str) -> Self {
        Self { container }
    }

    /// Capabilities shown by calls the container accepted.
    pub fn modification(&self, findings: &[Finding]) -> ProbeResult<BTreeSet<ModificationCapability>> {
        let observed: BTreeSet<Effect> = findings.iter().filter_map(Finding::observed_effect).collect();
        let mut capabilities = BTreeSet::new();
        if observed.contains(&Effect::Modifying) {
            capabilities.insert(ModificationCapability::CanModifyEntries);
        }
        if observed.contains(&Effect::SizeAltering) {
            capabilities.insert(ModificationCapability::CanChangeSize);
        }
        if capabilities.contains(&ModificationCapability::CanChangeSize)
            && !capabilities.contains(&ModificationCapability::CanModifyEntries)
        {
            warn!(container = %self.container, "size changes observed without entry modification");
            return Err(ProbeError::SizeChangeWithoutModification {
                container: self.container.to_string(),
            });
        }
        Ok(capabilities)
    }

    /// Unanimous vote of the read-only null-argument queries.
    ///
    /// Queries refused with a positional error do not vote. `None` when no
    /// query votes; a split vote is fatal.
    pub fn null_argument_support(&self, findings: &[Finding]) -> ProbeResult<Option<bool>> {
        let (mut succeeded, mut failed) = (0, 0);
        for finding in findings.iter().filter(|f| {
            f.has_tag(OperationTag::NullArgument) && f.has_tag(OperationTag::ReadOnly)
        }) {
            match finding.error {
                None => succeeded += 1,
                Some(kind) if kind.is_positional() => {}
                Some(_) => failed += 1,
            }
        }
        match (succeeded, failed) {
            (0, 0) => Ok(None),
            (_, 0) => Ok(Some(true)),
            (0, _) => Ok(Some(false)),
            _ => {
                warn!(
                    container = %self.container,
                    succeeded,
                    failed,
                    "null-argument queries disagree"
                );
                Err(ProbeError::AmbiguousNullArgumentSupport {
                    container: self.container.to_string(),
                    succeeded,
                    failed,
                })
            }
        }
    }

    /// Assembles the behavior, rejecting contradictory null findings.
    pub fn aggregate(
        &self,
        factory: &ContainerFactory,
        sizes: SizeProfile,
        auxiliary: AuxiliaryFindings,
        findings: Vec<Finding>,
    ) -> ProbeResult<AggregatedBehavior> {
        let modification = self.modification(&findings)?;
        let null_argument_support = self.null_argument_support(&findings)?;
        if auxiliary.null_element_support == NullElementSupport::No
            && null_argument_support == Some(true)
        {
            warn!(container = %self.container, "null elements rejected but null queries accepted");
            return Err(ProbeError::NullSupportContradiction {
                container: self.container.to_string(),
            });
        }

        Ok(AggregatedBehavior {
            container: self.container.to_string(),
            capability: factory.capability(),
            variant: factory.variant(),
            size_limit: factory.size_limit(),
            sizes,
            null_element_support: auxiliary.null_element_support,
            null_argument_support,
            modification,
            backing: auxiliary.backing,
            random_access: auxiliary.random_access,
            self_wrapping_idempotent: auxiliary.self_wrapping_idempotent,
            findings,
        })
    }
}
