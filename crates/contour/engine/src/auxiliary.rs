//! Single-shot probes that complement the catalog findings.

use crate::factory::{BackedContainer, ContainerFactory, MARKER};
use contour_containers::Container;
use contour_types::{
    BackingInfluence, ContainerResult, Element, ErrorKind, FactoryError, NullElementSupport,
    ProbeResult,
};
use std::collections::BTreeSet;
use tracing::debug;

/// Outcome of the auxiliary probes for one container type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuxiliaryFindings {
    pub null_element_support: NullElementSupport,
    pub random_access: Option<bool>,
    pub backing: BTreeSet<BackingInfluence>,
    pub self_wrapping_idempotent: Option<bool>,
}

/// Runs every auxiliary probe against samples built from `payload`.
pub fn run_auxiliary_probes(
    factory: &ContainerFactory,
    payload: &[Element],
) -> ProbeResult<AuxiliaryFindings> {
    Ok(AuxiliaryFindings {
        null_element_support: probe_null_element(factory, payload)?,
        random_access: probe_random_access(factory, payload)?,
        backing: probe_backing_influence(factory, payload)?,
        self_wrapping_idempotent: probe_self_wrapping(factory, payload)?,
    })
}

/// Builds a sample whose first element is `Element::Null`.
pub fn probe_null_element(
    factory: &ContainerFactory,
    payload: &[Element],
) -> ProbeResult<NullElementSupport> {
    let len = factory.sample_slice(payload).len().max(1);
    let elements: Vec<Element> = std::iter::once(Element::Null)
        .chain(payload.iter().skip(1).take(len - 1).cloned())
        .collect();

    let support = match factory.create(&elements) {
        Ok(_) => NullElementSupport::Yes,
        Err(err) if err.is_size_not_supported() => NullElementSupport::NotApplicable,
        Err(FactoryError::Rejected { source, .. }) if source.kind == ErrorKind::NullElement => {
            NullElementSupport::No
        }
        Err(err) => return Err(err.into()),
    };
    debug!(container = %factory.name(), support = ?support, "null element probed");
    Ok(support)
}

/// Whether a sequence sample reports constant-time positional access.
pub fn probe_random_access(
    factory: &ContainerFactory,
    payload: &[Element],
) -> ProbeResult<Option<bool>> {
    Ok(factory.create_sample(payload)?.random_access())
}

/// Which way mutations travel between a wrapping factory's backing
/// structure and the container derived from it.
pub fn probe_backing_influence(
    factory: &ContainerFactory,
    payload: &[Element],
) -> ProbeResult<BTreeSet<BackingInfluence>> {
    let mut influence = BTreeSet::new();
    let payload = factory.sample_slice(payload);

    let Some(backed) = factory.create_with_backing_handle(payload)? else {
        return Ok(influence);
    };
    let before = backed.container.snapshot();
    match backed.backing.mutate_externally() {
        Ok(()) if backed.container.snapshot() != before => {
            influence.insert(BackingInfluence::StructureInfluencesContainer);
        }
        Ok(()) => {}
        Err(err) => {
            debug!(container = %factory.name(), error = %err, "backing structure refused mutation")
        }
    }

    if let Some(BackedContainer {
        mut container,
        backing,
    }) = factory.create_with_backing_handle(payload)?
    {
        let before = backing.snapshot();
        match edit_in_place(&mut container) {
            Ok(()) if backing.snapshot() != before => {
                influence.insert(BackingInfluence::ContainerInfluencesStructure);
            }
            Ok(()) => {}
            Err(err) => {
                debug!(container = %factory.name(), error = %err, "container refused in-place edit")
            }
        }
    }

    debug!(container = %factory.name(), influence = ?influence, "backing influence probed");
    Ok(influence)
}

/// Overwrites the first entry where possible, otherwise adds the marker.
fn edit_in_place(container: &mut Container) -> ContainerResult<()> {
    let marker = Element::from(MARKER);
    match container {
        Container::Sequence(s) if !s.is_empty() => s.set(0, marker).map(drop),
        Container::Sequence(s) => s.push(marker),
        Container::Set(s) => s.insert(marker).map(drop),
        Container::Map(m) => match m.entries().into_iter().next() {
            Some((key, _)) => m.replace(key, marker).map(drop),
            None => m.insert(marker.clone(), marker.paired_value()).map(drop),
        },
    }
}

/// Whether wrapping a wrapping factory's product again changes neither its
/// identity nor its view depth. `None` for other variants.
pub fn probe_self_wrapping(
    factory: &ContainerFactory,
    payload: &[Element],
) -> ProbeResult<Option<bool>> {
    if !matches!(factory, ContainerFactory::Wrapping(_)) {
        return Ok(None);
    }
    let once = factory.create_sample(payload)?;
    let (identity, depth) = (once.implementation(), once.depth());
    let Some(twice) = factory.rewrap(once)? else {
        return Ok(None);
    };
    let idempotent = twice.implementation() == identity && twice.depth() == depth;
    if !idempotent {
        debug!(
            container = %factory.name(),
            before = %identity,
            after = %twice.implementation(),
            "rewrapping stacks another layer"
        );
    }
    Ok(Some(idempotent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{DirectFactory, EmptyFactory, Seed, SeedKind, WrappingFactory};
    use contour_containers::{
        FrozenSequence, IdentityRule, NullPolicy, ReferenceSequence, SequenceView, ViewPolicy,
    };
    use contour_types::{reference_payload, CapabilityKind};

    fn array_seed() -> Seed {
        Seed::new("array", SeedKind::Array, |e| {
            Ok(Container::sequence(ReferenceSequence::new(e.to_vec())))
        })
    }

    fn view(policy: ViewPolicy) -> ContainerFactory {
        WrappingFactory::new("view", CapabilityKind::Sequence, array_seed(), move |source| {
            SequenceView::new(source, policy).map(Container::sequence)
        })
        .into()
    }

    #[test]
    fn null_rejection_is_no() {
        let factory: ContainerFactory =
            DirectFactory::new("compact", CapabilityKind::Sequence, |e| {
                FrozenSequence::compact(e.to_vec()).map(Container::sequence)
            })
            .into();
        assert_eq!(
            probe_null_element(&factory, &reference_payload()).unwrap(),
            NullElementSupport::No
        );
    }

    #[test]
    fn null_permitting_frozen_is_yes() {
        let factory: ContainerFactory =
            DirectFactory::new("frozen", CapabilityKind::Sequence, |e| {
                FrozenSequence::new(e.to_vec(), NullPolicy::Permit, IdentityRule::Fixed("Frozen"))
                    .map(Container::sequence)
            })
            .into();
        assert_eq!(
            probe_null_element(&factory, &reference_payload()).unwrap(),
            NullElementSupport::Yes
        );
    }

    #[test]
    fn empty_factory_null_is_not_applicable() {
        let factory: ContainerFactory = EmptyFactory::new("empty", CapabilityKind::Sequence, || {
            Container::sequence(ReferenceSequence::default())
        })
        .into();
        assert_eq!(
            probe_null_element(&factory, &reference_payload()).unwrap(),
            NullElementSupport::NotApplicable
        );
    }

    #[test]
    fn read_only_view_sees_structure_only() {
        let influence = probe_backing_influence(&view(ViewPolicy::ReadOnly), &reference_payload())
            .unwrap();
        assert_eq!(
            influence,
            [BackingInfluence::StructureInfluencesContainer]
                .into_iter()
                .collect()
        );
    }

    #[test]
    fn fixed_size_view_influences_both_ways() {
        let influence =
            probe_backing_influence(&view(ViewPolicy::FixedSize), &reference_payload()).unwrap();
        assert_eq!(influence.len(), 2);
    }

    #[test]
    fn self_wrapping() {
        let payload = reference_payload();
        assert_eq!(
            probe_self_wrapping(&view(ViewPolicy::ReadOnly), &payload).unwrap(),
            Some(true)
        );
        assert_eq!(
            probe_self_wrapping(&view(ViewPolicy::FixedSize), &payload).unwrap(),
            Some(false)
        );
    }

    #[test]
    fn random_access_follows_sample() {
        let findings = run_auxiliary_probes(&view(ViewPolicy::ReadOnly), &reference_payload())
            .unwrap();
        assert_eq!(findings.random_access, Some(true));
        assert_eq!(findings.null_element_support, NullElementSupport::Yes);
    }
}
