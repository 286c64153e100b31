//! Container factories.
//!
//! A [`ContainerFactory`] normalizes the different ways a container type is
//! constructed (directly from elements, by wrapping another structure, by
//! collecting an iterator, as a singleton, or as an always-empty instance)
//! behind one `create(elements)` contract.

use contour_containers::{Container, SharedContainer, Snapshot};
use contour_types::{
    CapabilityKind, ContainerError, ContainerResult, Element, FactoryError, FactoryVariant,
};
use std::fmt;
use std::sync::Arc;

/// Builds a container from an element slice.
pub type BuildFn = Arc<dyn Fn(&[Element]) -> ContainerResult<Container> + Send + Sync>;

/// Builds a container by draining an iterator.
pub type CollectFn =
    Arc<dyn Fn(&mut dyn Iterator<Item = Element>) -> ContainerResult<Container> + Send + Sync>;

/// Builds a container holding exactly one element.
pub type SingleFn = Arc<dyn Fn(Element) -> ContainerResult<Container> + Send + Sync>;

/// Builds a container that is always empty.
pub type EmptyFn = Arc<dyn Fn() -> Container + Send + Sync>;

/// Derives a container from a shared backing structure.
pub type WrapFn = Arc<dyn Fn(SharedContainer) -> ContainerResult<Container> + Send + Sync>;

/// Element written by [`BackingHandle::mutate_externally`].
pub const MARKER: &str = "marker";

/// Factory that builds the container directly from the elements.
#[derive(Clone)]
pub struct DirectFactory {
    name: String,
    capability: CapabilityKind,
    max_size: Option<usize>,
    build: BuildFn,
}

impl DirectFactory {
    /// Factory calling `build` with the requested elements.
    pub fn new(
        name: impl Into<String>,
        capability: CapabilityKind,
        build: impl Fn(&[Element]) -> ContainerResult<Container> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            capability,
            max_size: None,
            build: Arc::new(build),
        }
    }

    /// Largest element count the factory accepts.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }
}

/// Shape of the structure a wrapping factory derives its container from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedKind {
    /// Fixed-length storage: external mutation overwrites, never grows.
    Array,
    /// Another container: external mutation adds an element.
    Container,
}

/// One way of building the backing structure of a wrapping factory.
#[derive(Clone)]
pub struct Seed {
    name: String,
    kind: SeedKind,
    build: BuildFn,
}

impl Seed {
    /// Seed building its structure with `build`.
    pub fn new(
        name: impl Into<String>,
        kind: SeedKind,
        build: impl Fn(&[Element]) -> ContainerResult<Container> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            build: Arc::new(build),
        }
    }

    /// Seed name used in reports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How external mutation affects the seed.
    pub fn kind(&self) -> SeedKind {
        self.kind
    }
}

/// Factory whose container is derived from a separately built structure.
#[derive(Clone)]
pub struct WrappingFactory {
    name: String,
    capability: CapabilityKind,
    seed: Seed,
    alternate: Option<Seed>,
    max_size: Option<usize>,
    wrap: WrapFn,
}

impl WrappingFactory {
    /// Factory applying `wrap` to what `seed` builds.
    pub fn new(
        name: impl Into<String>,
        capability: CapabilityKind,
        seed: Seed,
        wrap: impl Fn(SharedContainer) -> ContainerResult<Container> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            capability,
            seed,
            alternate: None,
            max_size: None,
            wrap: Arc::new(wrap),
        }
    }

    /// Second construction path profiled separately during size discovery.
    pub fn with_alternate_seed(mut self, seed: Seed) -> Self {
        self.alternate = Some(seed);
        self
    }

    /// Caps the number of elements the backing structure may hold.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }
}

/// Factory that collects the elements from an iterator.
#[derive(Clone)]
pub struct CollectingFactory {
    name: String,
    capability: CapabilityKind,
    collect: CollectFn,
}

impl CollectingFactory {
    /// Factory draining the elements through `collect`.
    pub fn new(
        name: impl Into<String>,
        capability: CapabilityKind,
        collect: impl Fn(&mut dyn Iterator<Item = Element>) -> ContainerResult<Container>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            capability,
            collect: Arc::new(collect),
        }
    }
}

/// Factory that can only build one-element containers.
#[derive(Clone)]
pub struct SingleElementFactory {
    name: String,
    capability: CapabilityKind,
    build: SingleFn,
}

impl SingleElementFactory {
    /// Factory calling `build` with the first element.
    pub fn new(
        name: impl Into<String>,
        capability: CapabilityKind,
        build: impl Fn(Element) -> ContainerResult<Container> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            capability,
            build: Arc::new(build),
        }
    }
}

/// Factory that can only build empty containers.
#[derive(Clone)]
pub struct EmptyFactory {
    name: String,
    capability: CapabilityKind,
    build: EmptyFn,
}

impl EmptyFactory {
    /// Factory returning whatever `build` produces.
    pub fn new(
        name: impl Into<String>,
        capability: CapabilityKind,
        build: impl Fn() -> Container + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            capability,
            build: Arc::new(build),
        }
    }
}

/// A container produced together with the structure it was derived from.
pub struct BackedContainer {
    pub container: Container,
    pub backing: BackingHandle,
}

/// Access to the backing structure of a [`BackedContainer`].
pub struct BackingHandle {
    source: SharedContainer,
    kind: SeedKind,
}

impl BackingHandle {
    /// Current contents of the backing structure.
    pub fn snapshot(&self) -> Snapshot {
        self.source.borrow().snapshot()
    }

    /// Mutates the backing structure without going through the container.
    pub fn mutate_externally(&self) -> ContainerResult<()> {
        let marker = Element::from(MARKER);
        let mut source = self.source.borrow_mut();
        match &mut *source {
            Container::Sequence(s) => match self.kind {
                SeedKind::Array if s.is_empty() => Err(ContainerError::illegal_state(
                    "cannot overwrite an empty array",
                )),
                SeedKind::Array => s.set(0, marker).map(drop),
                SeedKind::Container => s.push(marker),
            },
            Container::Set(s) => s.insert(marker).map(drop),
            Container::Map(m) => m.insert(marker.clone(), marker.paired_value()).map(drop),
        }
    }
}

/// Closed set of factory variants.
#[derive(Clone)]
pub enum ContainerFactory {
    Direct(DirectFactory),
    Wrapping(WrappingFactory),
    StreamCollecting(CollectingFactory),
    SingleElement(SingleElementFactory),
    Empty(EmptyFactory),
}

impl ContainerFactory {
    /// Name the container type is reported under.
    pub fn name(&self) -> &str {
        match self {
            Self::Direct(f) => &f.name,
            Self::Wrapping(f) => &f.name,
            Self::StreamCollecting(f) => &f.name,
            Self::SingleElement(f) => &f.name,
            Self::Empty(f) => &f.name,
        }
    }

    /// Capability the built containers expose.
    pub fn capability(&self) -> CapabilityKind {
        match self {
            Self::Direct(f) => f.capability,
            Self::Wrapping(f) => f.capability,
            Self::StreamCollecting(f) => f.capability,
            Self::SingleElement(f) => f.capability,
            Self::Empty(f) => f.capability,
        }
    }

    /// Construction variant.
    pub fn variant(&self) -> FactoryVariant {
        match self {
            Self::Direct(_) => FactoryVariant::Direct,
            Self::Wrapping(_) => FactoryVariant::Wrapping,
            Self::StreamCollecting(_) => FactoryVariant::StreamCollecting,
            Self::SingleElement(_) => FactoryVariant::SingleElement,
            Self::Empty(_) => FactoryVariant::Empty,
        }
    }

    /// Largest element count the factory can represent, if limited.
    pub fn size_limit(&self) -> Option<usize> {
        match self {
            Self::Direct(f) => f.max_size,
            Self::Wrapping(f) => f.max_size,
            Self::SingleElement(_) => Some(1),
            Self::Empty(_) => Some(0),
            Self::StreamCollecting(_) => None,
        }
    }

    /// Whether `size` elements can be represented at all.
    pub fn supports(&self, size: usize) -> bool {
        match self {
            Self::SingleElement(_) => size == 1,
            _ => self.size_limit().map_or(true, |limit| size <= limit),
        }
    }

    /// The alternate seed of a wrapping factory.
    pub fn alternate_seed(&self) -> Option<&Seed> {
        match self {
            Self::Wrapping(f) => f.alternate.as_ref(),
            _ => None,
        }
    }

    /// Builds a container holding `elements`.
    pub fn create(&self, elements: &[Element]) -> Result<Container, FactoryError> {
        self.check_size(elements.len())?;
        let built = match self {
            Self::Direct(f) => (f.build)(elements),
            Self::Wrapping(f) => Self::wrap(f, &f.seed, elements).map(|(c, _)| c),
            Self::StreamCollecting(f) => {
                let mut iter = elements.iter().cloned();
                (f.collect)(&mut iter)
            }
            Self::SingleElement(f) => match elements.first() {
                Some(element) => (f.build)(element.clone()),
                None => Err(ContainerError::illegal_argument("no element supplied")),
            },
            Self::Empty(f) => Ok((f.build)()),
        };
        built.map_err(|source| self.rejected(source))
    }

    /// Container holding the default "a, b, c, d" payload.
    pub fn create_reference_sample(&self) -> Result<Container, FactoryError> {
        self.create_sample(&contour_types::reference_payload())
    }

    /// Container holding `payload`, truncated to what the factory supports.
    pub fn create_sample(&self, payload: &[Element]) -> Result<Container, FactoryError> {
        self.create(self.sample_slice(payload))
    }

    /// `payload` truncated to the factory's size limit.
    pub fn sample_slice<'a>(&self, payload: &'a [Element]) -> &'a [Element] {
        let len = self
            .size_limit()
            .map_or(payload.len(), |limit| limit.min(payload.len()));
        &payload[..len]
    }

    /// For wrapping factories, the container together with its backing
    /// structure. `None` for every other variant.
    pub fn create_with_backing_handle(
        &self,
        elements: &[Element],
    ) -> Result<Option<BackedContainer>, FactoryError> {
        let Self::Wrapping(f) = self else {
            return Ok(None);
        };
        self.check_size(elements.len())?;
        let (container, source) =
            Self::wrap(f, &f.seed, elements).map_err(|source| self.rejected(source))?;
        Ok(Some(BackedContainer {
            container,
            backing: BackingHandle {
                source,
                kind: f.seed.kind,
            },
        }))
    }

    /// Builds through `seed` instead of the factory's primary seed.
    pub fn create_with_seed(
        &self,
        seed: &Seed,
        elements: &[Element],
    ) -> Result<Option<Container>, FactoryError> {
        let Self::Wrapping(f) = self else {
            return Ok(None);
        };
        self.check_size(elements.len())?;
        Self::wrap(f, seed, elements)
            .map(|(c, _)| Some(c))
            .map_err(|source| self.rejected(source))
    }

    /// Applies a wrapping factory's wrapper to one of its own products.
    pub fn rewrap(&self, container: Container) -> Result<Option<Container>, FactoryError> {
        let Self::Wrapping(f) = self else {
            return Ok(None);
        };
        (f.wrap)(container.shared())
            .map(Some)
            .map_err(|source| self.rejected(source))
    }

    fn wrap(
        factory: &WrappingFactory,
        seed: &Seed,
        elements: &[Element],
    ) -> ContainerResult<(Container, SharedContainer)> {
        let source = (seed.build)(elements)?.shared();
        let container = (factory.wrap)(source.clone())?;
        Ok((container, source))
    }

    fn check_size(&self, requested: usize) -> Result<(), FactoryError> {
        if self.supports(requested) {
            return Ok(());
        }
        Err(FactoryError::SizeNotSupported {
            factory: self.name().to_string(),
            requested,
            limit: self.size_limit().unwrap_or(0),
        })
    }

    fn rejected(&self, source: ContainerError) -> FactoryError {
        FactoryError::Rejected {
            factory: self.name().to_string(),
            source,
        }
    }
}

impl fmt::Debug for ContainerFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerFactory")
            .field("name", &self.name())
            .field("capability", &self.capability())
            .field("variant", &self.variant())
            .field("size_limit", &self.size_limit())
            .finish()
    }
}

impl From<DirectFactory> for ContainerFactory {
    fn from(f: DirectFactory) -> Self {
        Self::Direct(f)
    }
}

impl From<WrappingFactory> for ContainerFactory {
    fn from(f: WrappingFactory) -> Self {
        Self::Wrapping(f)
    }
}

impl From<CollectingFactory> for ContainerFactory {
    fn from(f: CollectingFactory) -> Self {
        Self::StreamCollecting(f)
    }
}

impl From<SingleElementFactory> for ContainerFactory {
    fn from(f: SingleElementFactory) -> Self {
        Self::SingleElement(f)
    }
}

impl From<EmptyFactory> for ContainerFactory {
    fn from(f: EmptyFactory) -> Self {
        Self::Empty(f)
    }
}
