//! Probe operations and catalogs.

use crate::interceptor::{
    InvocationLog, RecordingCursor, RecordingMap, RecordingSequence, RecordingSet,
};
use contour_containers::{cursor, Container, Map, Sequence, SequenceCursor, Set};
use contour_types::{CapabilityKind, ContainerResult, OperationTag, ProbeError, ProbeResult};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

pub type SequenceCall = Arc<dyn Fn(&mut dyn Sequence) -> ContainerResult<()> + Send + Sync>;
pub type CursorCall = Arc<dyn Fn(&mut dyn SequenceCursor) -> ContainerResult<()> + Send + Sync>;
pub type SetCall = Arc<dyn Fn(&mut dyn Set) -> ContainerResult<()> + Send + Sync>;
pub type MapCall = Arc<dyn Fn(&mut dyn Map) -> ContainerResult<()> + Send + Sync>;

/// Where a cursor operation's cursor starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorStart {
    Front,
    Back,
}

/// The call an operation performs.
#[derive(Clone)]
pub enum OperationCall {
    Sequence(SequenceCall),
    Cursor { start: CursorStart, call: CursorCall },
    Set(SetCall),
    Map(MapCall),
}

/// One catalog entry: a named call against one capability.
///
/// The call only touches the container it is handed.
#[derive(Clone)]
pub struct Operation {
    name: String,
    tags: BTreeSet<OperationTag>,
    call: OperationCall,
}

impl Operation {
    fn new(name: impl Into<String>, call: OperationCall) -> Self {
        Self {
            name: name.into(),
            tags: BTreeSet::new(),
            call,
        }
    }

    /// Operation on the sequence surface.
    pub fn sequence(
        name: impl Into<String>,
        call: impl Fn(&mut dyn Sequence) -> ContainerResult<()> + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, OperationCall::Sequence(Arc::new(call)))
    }

    /// Operation on a cursor opened at `start`.
    pub fn cursor(
        name: impl Into<String>,
        start: CursorStart,
        call: impl Fn(&mut dyn SequenceCursor) -> ContainerResult<()> + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            name,
            OperationCall::Cursor {
                start,
                call: Arc::new(call),
            },
        )
    }

    /// Operation on the set surface.
    pub fn set(
        name: impl Into<String>,
        call: impl Fn(&mut dyn Set) -> ContainerResult<()> + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, OperationCall::Set(Arc::new(call)))
    }

    /// Operation on the map surface.
    pub fn map(
        name: impl Into<String>,
        call: impl Fn(&mut dyn Map) -> ContainerResult<()> + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, OperationCall::Map(Arc::new(call)))
    }

    /// Adds `tags` to the operation.
    pub fn tagged(mut self, tags: &[OperationTag]) -> Self {
        self.tags.extend(tags.iter().copied());
        self
    }

    /// Display name, as shown in findings.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tags attached to the operation.
    pub fn tags(&self) -> &BTreeSet<OperationTag> {
        &self.tags
    }

    /// Whether `tag` is attached.
    pub fn has_tag(&self, tag: OperationTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Capability that declares the call.
    pub fn capability(&self) -> CapabilityKind {
        match self.call {
            OperationCall::Sequence(_) => CapabilityKind::Sequence,
            OperationCall::Cursor { .. } => CapabilityKind::SequenceIterator,
            OperationCall::Set(_) => CapabilityKind::Set,
            OperationCall::Map(_) => CapabilityKind::Map,
        }
    }

    /// Runs the call against `container`, through recording decorators when
    /// `log` is given.
    ///
    /// The outer error is a capability mismatch; the inner result is
    /// whatever the container returned.
    pub fn invoke(
        &self,
        container_name: &str,
        container: &mut Container,
        log: Option<&InvocationLog>,
    ) -> ProbeResult<ContainerResult<()>> {
        let actual = container.capability();
        let outcome = match (&self.call, container) {
            (OperationCall::Sequence(call), Container::Sequence(seq)) => match log {
                Some(log) => call(&mut RecordingSequence::new(seq.as_mut(), log)),
                None => call(seq.as_mut()),
            },
            (OperationCall::Cursor { start, call }, Container::Sequence(seq)) => {
                let seq: &mut dyn Sequence = seq.as_mut();
                let index = match start {
                    CursorStart::Front => 0,
                    CursorStart::Back => seq.len(),
                };
                match cursor(seq, index) {
                    Ok(mut it) => match log {
                        Some(log) => call(&mut RecordingCursor::new(&mut it, log)),
                        None => call(&mut it),
                    },
                    Err(err) => Err(err),
                }
            }
            (OperationCall::Set(call), Container::Set(set)) => match log {
                Some(log) => call(&mut RecordingSet::new(set.as_mut(), log)),
                None => call(set.as_mut()),
            },
            (OperationCall::Map(call), Container::Map(map)) => match log {
                Some(log) => call(&mut RecordingMap::new(map.as_mut(), log)),
                None => call(map.as_mut()),
            },
            _ => {
                return Err(ProbeError::CapabilityMismatch {
                    container: container_name.to_string(),
                    operation: self.name.clone(),
                    target: self.capability(),
                    actual,
                })
            }
        };
        Ok(outcome)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("capability", &self.capability())
            .field("tags", &self.tags)
            .finish()
    }
}

/// Ordered operations for one capability.
#[derive(Clone, Debug)]
pub struct OperationCatalog {
    capability: CapabilityKind,
    operations: Vec<Operation>,
}

impl OperationCatalog {
    /// Empty catalog for `capability`.
    pub fn new(capability: CapabilityKind) -> Self {
        Self {
            capability,
            operations: Vec::new(),
        }
    }

    /// Catalog of `operations`, all of which must target `capability`.
    pub fn from_operations(
        capability: CapabilityKind,
        operations: impl IntoIterator<Item = Operation>,
    ) -> ProbeResult<Self> {
        operations
            .into_iter()
            .try_fold(Self::new(capability), |catalog, operation| catalog.with(operation))
    }

    /// Adds an operation; it must target this catalog's capability.
    pub fn with(mut self, operation: Operation) -> ProbeResult<Self> {
        self.push(operation)?;
        Ok(self)
    }

    /// In-place form of [`with`](Self::with).
    pub fn push(&mut self, operation: Operation) -> ProbeResult<()> {
        if operation.capability() != self.capability {
            return Err(ProbeError::InvalidConfiguration(format!(
                "operation {} targets {}, catalog is for {}",
                operation.name(),
                operation.capability(),
                self.capability
            )));
        }
        self.operations.push(operation);
        Ok(())
    }

    /// Capability every operation targets.
    pub fn capability(&self) -> CapabilityKind {
        self.capability
    }

    /// Operations in insertion order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the catalog holds no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Operations of both catalogs, this one first. The result keeps this
    /// catalog's capability; `other` may declare a different one.
    pub fn merged(&self, other: &OperationCatalog) -> OperationCatalog {
        let mut operations = self.operations.clone();
        operations.extend(other.operations.iter().cloned());
        OperationCatalog {
            capability: self.capability,
            operations,
        }
    }

    /// Number of operations carrying every tag in `tags`.
    pub fn count_tagged(&self, tags: &[OperationTag]) -> usize {
        self.operations
            .iter()
            .filter(|op| tags.iter().all(|t| op.has_tag(*t)))
            .count()
    }
}
