//! The standard container registry.
//!
//! Every factory here is built from the implementations in
//! `contour-containers` and characterizes cleanly against the standard
//! catalogs.

use crate::map::map_catalog;
use crate::sequence::{cursor_catalog, sequence_catalog};
use crate::set::set_catalog;
use contour_containers::{
    Container, FrozenMap, FrozenSequence, FrozenSet, IdentityRule, MapView, NullPolicy,
    ReferenceMap, ReferenceSequence, ReferenceSet, SequenceView, SetView, SharedContainer,
    ViewPolicy,
};
use contour_engine::{
    CatalogSet, CollectingFactory, DirectFactory, EmptyFactory, FactoryRegistry, Seed, SeedKind,
    SingleElementFactory, WrappingFactory,
};
use contour_types::{CapabilityKind, ContainerError, ContainerResult, ProbeResult};

/// Catalogs for every capability the standard registry uses.
pub fn standard_catalogs() -> ProbeResult<CatalogSet> {
    Ok(CatalogSet::new()
        .with(sequence_catalog()?)
        .with(cursor_catalog()?)
        .with(set_catalog()?)
        .with(map_catalog()?))
}

/// Sequence, set and map factories covering every factory variant.
pub fn standard_registry() -> ProbeResult<FactoryRegistry> {
    let mut registry = FactoryRegistry::new();
    for factory in sequence_factories() {
        registry.register(factory)?;
    }
    for factory in set_factories() {
        registry.register(factory)?;
    }
    for factory in map_factories() {
        registry.register(factory)?;
    }
    Ok(registry)
}

fn copy_into_compact(source: SharedContainer) -> ContainerResult<Container> {
    let elements = source
        .borrow()
        .as_sequence()
        .map(|s| s.elements())
        .ok_or_else(|| ContainerError::illegal_argument("copy source is not a sequence"))?;
    FrozenSequence::compact(elements).map(Container::sequence)
}

fn sequence_factories() -> Vec<contour_engine::ContainerFactory> {
    use CapabilityKind::Sequence;
    vec![
        DirectFactory::new("resizable sequence", Sequence, |e| {
            Ok(Container::sequence(ReferenceSequence::new(e.to_vec())))
        })
        .into(),
        DirectFactory::new("linked sequence", Sequence, |e| {
            Ok(Container::sequence(ReferenceSequence::linked(e.to_vec())))
        })
        .into(),
        DirectFactory::new("compact frozen sequence", Sequence, |e| {
            FrozenSequence::compact(e.to_vec()).map(Container::sequence)
        })
        .into(),
        WrappingFactory::new(
            "fixed-size array view",
            Sequence,
            Seed::new("array", SeedKind::Array, |e| {
                Ok(Container::sequence(ReferenceSequence::new(e.to_vec())))
            }),
            |source| SequenceView::new(source, ViewPolicy::FixedSize).map(Container::sequence),
        )
        .into(),
        WrappingFactory::new(
            "read-only sequence view",
            Sequence,
            Seed::new("resizable", SeedKind::Container, |e| {
                Ok(Container::sequence(ReferenceSequence::new(e.to_vec())))
            }),
            |source| SequenceView::new(source, ViewPolicy::ReadOnly).map(Container::sequence),
        )
        .with_alternate_seed(Seed::new("linked", SeedKind::Container, |e| {
            Ok(Container::sequence(ReferenceSequence::linked(e.to_vec())))
        }))
        .into(),
        WrappingFactory::new(
            "copied frozen sequence",
            Sequence,
            Seed::new("resizable", SeedKind::Container, |e| {
                Ok(Container::sequence(ReferenceSequence::new(e.to_vec())))
            }),
            copy_into_compact,
        )
        .into(),
        CollectingFactory::new("collected sequence", Sequence, |it| {
            Ok(Container::sequence(ReferenceSequence::new(it.collect())))
        })
        .into(),
        CollectingFactory::new("collected frozen sequence", Sequence, |it| {
            FrozenSequence::new(
                it.collect(),
                NullPolicy::Permit,
                IdentityRule::Fixed("UnmodifiableSequence"),
            )
            .map(Container::sequence)
        })
        .into(),
        SingleElementFactory::new("singleton sequence", Sequence, |e| {
            Ok(Container::sequence(ReferenceSequence::new(vec![e])))
        })
        .into(),
        EmptyFactory::new("empty sequence", Sequence, || {
            Container::sequence(FrozenSequence::empty(IdentityRule::Fixed("EmptySequence")))
        })
        .into(),
    ]
}

fn set_factories() -> Vec<contour_engine::ContainerFactory> {
    use CapabilityKind::Set;
    vec![
        DirectFactory::new("resizable set", Set, |e| {
            Ok(Container::set(ReferenceSet::new(e.to_vec())))
        })
        .into(),
        DirectFactory::new("compact frozen set", Set, |e| {
            FrozenSet::compact(e.to_vec()).map(Container::set)
        })
        .into(),
        WrappingFactory::new(
            "read-only set view",
            Set,
            Seed::new("resizable", SeedKind::Container, |e| {
                Ok(Container::set(ReferenceSet::new(e.to_vec())))
            }),
            |source| SetView::new(source, ViewPolicy::ReadOnly).map(Container::set),
        )
        .into(),
        CollectingFactory::new("collected set", Set, |it| {
            Ok(Container::set(ReferenceSet::new(it)))
        })
        .into(),
        EmptyFactory::new("empty set", Set, || {
            Container::set(FrozenSet::empty(IdentityRule::Fixed("EmptySet")))
        })
        .into(),
    ]
}

fn map_factories() -> Vec<contour_engine::ContainerFactory> {
    use CapabilityKind::Map;
    vec![
        DirectFactory::new("resizable map", Map, |e| {
            Ok(Container::map(ReferenceMap::from_keys(e)))
        })
        .into(),
        DirectFactory::new("compact frozen map", Map, |e| {
            FrozenMap::from_keys(e, NullPolicy::Reject, IdentityRule::Compact).map(Container::map)
        })
        .into(),
        WrappingFactory::new(
            "read-only map view",
            Map,
            Seed::new("resizable", SeedKind::Container, |e| {
                Ok(Container::map(ReferenceMap::from_keys(e)))
            }),
            |source| MapView::new(source, ViewPolicy::ReadOnly).map(Container::map),
        )
        .into(),
        SingleElementFactory::new("singleton map", Map, |e| {
            FrozenMap::from_keys(&[e], NullPolicy::Permit, IdentityRule::Fixed("SingletonMap"))
                .map(Container::map)
        })
        .into(),
        EmptyFactory::new("empty map", Map, || {
            Container::map(FrozenMap::empty(IdentityRule::Fixed("EmptyMap")))
        })
        .into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use contour_types::FactoryVariant;

    #[test]
    fn registry_covers_every_variant() {
        let registry = standard_registry().unwrap();
        assert_eq!(registry.len(), 20);
        for variant in [
            FactoryVariant::Direct,
            FactoryVariant::Wrapping,
            FactoryVariant::StreamCollecting,
            FactoryVariant::SingleElement,
            FactoryVariant::Empty,
        ] {
            assert!(
                registry.factories().iter().any(|f| f.variant() == variant),
                "no {:?} factory",
                variant
            );
        }
    }

    #[test]
    fn every_capability_has_a_catalog() {
        let registry = standard_registry().unwrap();
        let catalogs = standard_catalogs().unwrap();
        for factory in registry.factories() {
            assert!(catalogs.catalog_for(factory.capability()).is_some());
        }
    }

    #[test]
    fn copied_sequence_does_not_share_its_source() {
        let factory = registry_factory("copied frozen sequence");
        let backed = factory.create_with_backing_handle(&["a".into()]).unwrap().unwrap();
        backed.backing.mutate_externally().unwrap();
        assert_eq!(backed.container.len(), 1);
        assert_eq!(backed.backing.snapshot().len(), 2);
    }

    fn registry_factory(name: &str) -> contour_engine::ContainerFactory {
        standard_registry().unwrap().get(name).unwrap().clone()
    }
}
