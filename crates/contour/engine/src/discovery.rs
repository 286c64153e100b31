//! Size-range discovery.
//!
//! Builds containers of every size from zero up to a ceiling, records the
//! implementation identity each size produces and compresses the result
//! into contiguous [`SizeRange`]s.

use crate::factory::ContainerFactory;
use contour_containers::Container;
use contour_types::{
    generated_payload, Element, FactoryError, ImplementationId, ProbeError, ProbeResult,
    SeededRanges, SizeBound, SizeProfile, SizeRange, SupportedSizes,
};
use tracing::{debug, warn};

/// Default probing ceiling.
pub const DEFAULT_SIZE_CEILING: usize = 20;

/// Identity observed at one size.
pub type Observation = (usize, ImplementationId);

/// Profiles the sizes a factory can build.
#[derive(Clone, Copy, Debug)]
pub struct SizeRangeDiscoverer {
    ceiling: usize,
}

impl Default for SizeRangeDiscoverer {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE_CEILING)
    }
}

impl SizeRangeDiscoverer {
    /// Discoverer probing sizes `0..=ceiling`.
    pub fn new(ceiling: usize) -> Self {
        Self { ceiling }
    }

    /// Largest size probed.
    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    /// Primary ranges, plus the ranges of an alternate seed when they differ.
    pub fn discover(&self, factory: &ContainerFactory) -> ProbeResult<SizeProfile> {
        let observations = self.observe(factory.name(), |e| factory.create(e).map(Some))?;
        let limit = factory.size_limit();
        let (supported, ranges) = compress(factory.name(), &observations, self.ceiling, limit)?;

        let mut alternates = Vec::new();
        if let Some(seed) = factory.alternate_seed() {
            let seeded = self.observe(factory.name(), |e| factory.create_with_seed(seed, e))?;
            let (_, seeded_ranges) = compress(factory.name(), &seeded, self.ceiling, limit)?;
            if seeded_ranges != ranges {
                debug!(
                    container = %factory.name(),
                    seed = %seed.name(),
                    "alternate seed yields different size ranges"
                );
                alternates.push(SeededRanges {
                    seed: seed.name().to_string(),
                    ranges: seeded_ranges,
                });
            }
        }

        Ok(SizeProfile {
            supported,
            ranges,
            alternates,
        })
    }

    fn observe(
        &self,
        container: &str,
        create: impl Fn(&[Element]) -> Result<Option<Container>, FactoryError>,
    ) -> ProbeResult<Vec<Observation>> {
        let mut observations = Vec::new();
        for size in 0..=self.ceiling {
            match create(&generated_payload(size)) {
                Ok(Some(built)) => {
                    let identity = built.implementation();
                    debug!(container = %container, size, implementation = %identity, "size observed");
                    observations.push((size, identity));
                }
                Ok(None) => {}
                Err(err) if err.is_size_not_supported() => {
                    debug!(container = %container, size, "size not supported");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(observations)
    }
}

/// Compresses ascending observations into maximal runs of equal identity.
///
/// The last run is unbounded when it reaches `ceiling` without the identity
/// changing at the ceiling itself, unless `limit` already caps it there.
pub fn compress(
    container: &str,
    observations: &[Observation],
    ceiling: usize,
    limit: Option<usize>,
) -> ProbeResult<(SupportedSizes, Vec<SizeRange>)> {
    let Some((first, _)) = observations.first() else {
        return Err(ProbeError::NoSupportedSize {
            container: container.to_string(),
            ceiling,
        });
    };

    for pair in observations.windows(2) {
        let (after, next) = (pair[0].0, pair[1].0);
        if next != after + 1 {
            warn!(container = %container, after, next, "supported sizes are not contiguous");
            return Err(ProbeError::NonContiguousSizes {
                container: container.to_string(),
                after,
                next,
            });
        }
    }

    let mut ranges: Vec<SizeRange> = Vec::new();
    for (size, identity) in observations {
        match ranges.last_mut() {
            Some(range) if range.implementation == *identity => {
                range.max = SizeBound::Bounded(*size);
            }
            _ => ranges.push(SizeRange {
                min: *size,
                max: SizeBound::Bounded(*size),
                implementation: identity.clone(),
            }),
        }
    }

    let reaches_ceiling = observations.last().map(|(size, _)| *size) == Some(ceiling);
    let capped = limit.is_some_and(|limit| limit <= ceiling);
    let mut max = SizeBound::Bounded(observations[observations.len() - 1].0);
    if let Some(last) = ranges.last_mut() {
        let stable_at_ceiling = last.min < ceiling || observations.len() == 1;
        if reaches_ceiling && stable_at_ceiling && !capped {
            last.max = SizeBound::Unbounded;
            max = SizeBound::Unbounded;
        }
    }

    Ok((SupportedSizes { min: *first, max }, ranges))
}

/// Primary size ranges of `factory` up to the default ceiling.
pub fn discover_size_ranges(factory: &ContainerFactory) -> ProbeResult<Vec<SizeRange>> {
    SizeRangeDiscoverer::default()
        .discover(factory)
        .map(|profile| profile.ranges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{DirectFactory, EmptyFactory, SingleElementFactory};
    use contour_containers::{FrozenSequence, ReferenceSequence};
    use contour_types::{CapabilityKind, ContainerError};

    fn id(name: &str) -> ImplementationId {
        ImplementationId::new(name)
    }

    #[test]
    fn compact_sequence_has_three_ranges() {
        let factory: ContainerFactory =
            DirectFactory::new("compact", CapabilityKind::Sequence, |e| {
                FrozenSequence::compact(e.to_vec()).map(Container::sequence)
            })
            .into();
        let ranges = discover_size_ranges(&factory).unwrap();
        let rendered: Vec<String> = ranges.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["[0, 0] CompactN", "[1, 2] Compact12", "[3, unbounded] CompactN"]
        );
    }

    #[test]
    fn empty_factory_is_zero_only() {
        let factory: ContainerFactory = EmptyFactory::new("empty", CapabilityKind::Sequence, || {
            Container::sequence(ReferenceSequence::default())
        })
        .into();
        let profile = SizeRangeDiscoverer::default().discover(&factory).unwrap();
        assert_eq!(
            profile.supported,
            SupportedSizes {
                min: 0,
                max: SizeBound::Bounded(0)
            }
        );
        assert_eq!(profile.ranges.len(), 1);
        assert_eq!(profile.ranges[0].max, SizeBound::Bounded(0));
    }

    #[test]
    fn gap_fails_fast() {
        let observations = vec![(0, id("A")), (1, id("A")), (3, id("A"))];
        let err = compress("gappy", &observations, 20, None).unwrap_err();
        assert_eq!(
            err,
            ProbeError::NonContiguousSizes {
                container: "gappy".into(),
                after: 1,
                next: 3,
            }
        );
    }

    #[test]
    fn nothing_supported_is_fatal() {
        assert!(matches!(
            compress("none", &[], 20, None),
            Err(ProbeError::NoSupportedSize { .. })
        ));
    }

    #[test]
    fn change_at_ceiling_stays_bounded() {
        let observations = vec![(0, id("A")), (1, id("A")), (2, id("B"))];
        let (supported, ranges) = compress("late", &observations, 2, None).unwrap();
        assert_eq!(ranges[1].max, SizeBound::Bounded(2));
        assert_eq!(supported.max, SizeBound::Bounded(2));
    }

    #[test]
    fn construction_failure_is_fatal() {
        let factory: ContainerFactory =
            DirectFactory::new("broken", CapabilityKind::Sequence, |e| {
                if e.len() == 5 {
                    Err(ContainerError::illegal_argument("five"))
                } else {
                    Ok(Container::sequence(ReferenceSequence::new(e.to_vec())))
                }
            })
            .into();
        assert!(matches!(
            discover_size_ranges(&factory),
            Err(ProbeError::Factory(FactoryError::Rejected { .. }))
        ));
    }

    #[test]
    fn bounded_factory_stops_at_limit() {
        let factory: ContainerFactory =
            DirectFactory::new("small", CapabilityKind::Sequence, |e| {
                Ok(Container::sequence(ReferenceSequence::new(e.to_vec())))
            })
            .with_max_size(5)
            .into();
        let ranges = discover_size_ranges(&factory).unwrap();
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].max, SizeBound::Bounded(5));
    }

    #[test]
    fn singleton_at_ceiling_stays_bounded() {
        let factory: ContainerFactory =
            SingleElementFactory::new("singleton", CapabilityKind::Sequence, |e| {
                Ok(Container::sequence(ReferenceSequence::new(vec![e])))
            })
            .into();
        let profile = SizeRangeDiscoverer::new(1).discover(&factory).unwrap();
        assert_eq!(profile.ranges.len(), 1);
        assert_eq!(profile.ranges[0].min, 1);
        assert_eq!(profile.ranges[0].max, SizeBound::Bounded(1));
        assert_eq!(profile.supported.max, SizeBound::Bounded(1));
    }

    #[test]
    fn limit_equal_to_ceiling_stays_bounded() {
        let factory: ContainerFactory =
            DirectFactory::new("small", CapabilityKind::Sequence, |e| {
                Ok(Container::sequence(ReferenceSequence::new(e.to_vec())))
            })
            .with_max_size(5)
            .into();
        let profile = SizeRangeDiscoverer::new(5).discover(&factory).unwrap();
        assert_eq!(profile.ranges.last().unwrap().max, SizeBound::Bounded(5));
        assert_eq!(profile.supported.max, SizeBound::Bounded(5));

        let roomy = SizeRangeDiscoverer::new(4).discover(&factory).unwrap();
        assert_eq!(roomy.supported.max, SizeBound::Unbounded);
    }
}
