//! Handle bindings and the view resolver.
//!
//! Every array/object handle wraps a [`Node`]: a shared, mutable binding that
//! is either
//!
//! - `Owned`: the node owns a root cell holding its container, or
//! - `Aliased`: the node designates `slot` inside the container of a parent node.
//!
//! Nothing below a root is cached. Each operation first computes the node's
//! [`Location`] (root cell + slot path) by walking the binding chain, then
//! walks that path through the root value. A step that no longer lands on a
//! container of the expected kind makes the handle *expired*.
//!
//! Clones of a node share the binding, so re-parenting or detaching one
//! clone moves all of them. Views navigated from a node alias *through* it
//! and therefore follow it when it moves.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{JsonError, Result};
use crate::slot::{self, Slot};
use crate::value::Value;

/// Container kind of a handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Array,
    Object,
}

impl Kind {
    /// An empty container of this kind.
    pub fn empty(self) -> Value {
        match self {
            Kind::Array => Value::array(),
            Kind::Object => Value::object(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }

    /// True if `value` is a container of this kind.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Kind::Array => value.is_array(),
            Kind::Object => value.is_object(),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type Cell<T> = Arc<Mutex<T>>;

fn cell<T>(value: T) -> Cell<T> {
    Arc::new(Mutex::new(value))
}

// No operation panics while holding a lock, but a poisoned cell still holds
// consistent data, so keep going.
fn lock<T>(cell: &Mutex<T>) -> MutexGuard<'_, T> {
    cell.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) enum Binding {
    Owned(Cell<Value>),
    Aliased { parent: Node, slot: Slot },
}

/// Where a node lives right now.
pub(crate) struct Location {
    root: Cell<Value>,
    path: Vec<Slot>,
    /// `chain[i]` is the binding whose own slot is `path[i]`.
    chain: Vec<Cell<Binding>>,
}

impl Location {
    /// True if `path` under `root` is this location or lies beneath it.
    fn contains(&self, root: &Cell<Value>, path: &[Slot]) -> bool {
        Arc::ptr_eq(&self.root, root) && path.starts_with(&self.path)
    }
}

/// An array element removed while moving a node out of its old home.
///
/// Array indices after it shifted down by one; other locations may need the
/// same shift to keep designating the same container.
pub(crate) struct Removal {
    root: Cell<Value>,
    parent_path: Vec<Slot>,
    index: usize,
}

impl Removal {
    /// Position `depth` of a path under `root` that this removal shifted, if any.
    fn shifted(&self, root: &Cell<Value>, path: &[Slot]) -> Option<usize> {
        let depth = self.parent_path.len();
        if !Arc::ptr_eq(&self.root, root) || !path.starts_with(&self.parent_path) {
            return None;
        }
        match path.get(depth) {
            Some(Slot::Index(i)) if *i > self.index => Some(depth),
            _ => None,
        }
    }
}

/// Where an incoming value goes in the destination container.
pub(crate) enum Target {
    At(Slot),
    Tail,
}

#[derive(Clone)]
pub(crate) struct Node {
    kind: Kind,
    binding: Cell<Binding>,
}

impl Node {
    /// A new owning node. `value` must be a container of `kind`.
    pub(crate) fn owned(kind: Kind, value: Value) -> Self {
        debug_assert!(kind.matches(&value));
        Self {
            kind,
            binding: cell(Binding::Owned(cell(value))),
        }
    }

    /// A new view of `slot` inside `parent`.
    pub(crate) fn alias(parent: &Node, slot: Slot, kind: Kind) -> Self {
        Self {
            kind,
            binding: cell(Binding::Aliased {
                parent: parent.clone(),
                slot,
            }),
        }
    }

    pub(crate) fn is_owning(&self) -> bool {
        matches!(*lock(&self.binding), Binding::Owned(_))
    }

    /// Walk the binding chain up to the owning root.
    pub(crate) fn locate(&self) -> Location {
        let mut path = Vec::new();
        let mut chain = Vec::new();
        let mut current = self.binding.clone();
        loop {
            let next = match &*lock(&current) {
                Binding::Owned(root) => {
                    path.reverse();
                    chain.reverse();
                    return Location {
                        root: root.clone(),
                        path,
                        chain,
                    };
                }
                Binding::Aliased { parent, slot } => {
                    path.push(slot.clone());
                    chain.push(current.clone());
                    parent.binding.clone()
                }
            };
            current = next;
        }
    }

    /// Resolve and run `f` against the live container.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&Value) -> R) -> Result<R> {
        let location = self.locate();
        let root = lock(&location.root);
        match slot::walk(&root, &location.path) {
            Some(container) if self.kind.matches(container) => Ok(f(container)),
            _ => {
                log::trace!("{} view at depth {} expired", self.kind, location.path.len());
                Err(JsonError::expired(self.kind))
            }
        }
    }

    /// Resolve and run `f` against the live container, mutably.
    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut Value) -> R) -> Result<R> {
        let location = self.locate();
        let mut root = lock(&location.root);
        match slot::walk_mut(&mut root, &location.path) {
            Some(container) if self.kind.matches(container) => Ok(f(container)),
            _ => {
                log::trace!("{} view at depth {} expired", self.kind, location.path.len());
                Err(JsonError::expired(self.kind))
            }
        }
    }

    /// True if `other` is this node or lies beneath it.
    pub(crate) fn encloses(&self, other: &Node) -> bool {
        let inner = other.locate();
        self.locate().contains(&inner.root, &inner.path)
    }

    pub(crate) fn resolves(&self) -> bool {
        self.read(|_| ()).is_ok()
    }

    fn rebind(&self, binding: Binding) {
        *lock(&self.binding) = binding;
    }

    /// Take this node's content out of its current home.
    ///
    /// An owned root is left holding an empty container; an aliased node is
    /// removed from its parent. Returns `None` if the node is expired.
    fn take(&self) -> Option<(Value, Option<Removal>)> {
        let location = self.locate();
        let mut root = lock(&location.root);
        let Some((last, parent_path)) = location.path.split_last() else {
            if !self.kind.matches(&root) {
                return None;
            }
            let content = std::mem::replace(&mut *root, self.kind.empty());
            return Some((content, None));
        };

        let parent = slot::walk_mut(&mut root, parent_path)?;
        if !slot::walk(parent, std::slice::from_ref(last)).is_some_and(|v| self.kind.matches(v)) {
            return None;
        }
        let content = slot::remove_child(parent, last)?;
        let removal = last.index().map(|index| Removal {
            root: location.root.clone(),
            parent_path: parent_path.to_vec(),
            index,
        });
        Some((content, removal))
    }

    /// Convert an aliased node into an owning one, removing its content from
    /// the parent. Expired nodes become owners of an empty container.
    pub(crate) fn detach(&self) {
        if self.is_owning() {
            return;
        }
        let content = match self.take() {
            Some((content, _)) => content,
            None => {
                log::debug!("detaching expired {} view, starting empty", self.kind);
                self.kind.empty()
            }
        };
        log::debug!("detached {} view into an owning handle", self.kind);
        self.rebind(Binding::Owned(cell(content)));
    }

    /// Store a detached value at `target` of this container.
    pub(crate) fn store(&self, target: Target, value: Value) -> Result<Option<Value>> {
        self.write(|container| install(container, target, value))?
    }

    /// Move `source` into this container at `target` and re-parent it there.
    ///
    /// Fails without modifying anything when this container is expired, the
    /// slot is out of range, `source` contains the destination slot, or
    /// `source` is expired. `followers` are shifted along with this node when
    /// taking `source` out of an array moves their elements down; they may be
    /// handles already placed by the caller or handles it has yet to move.
    pub(crate) fn adopt(
        &self,
        target: Target,
        source: &Node,
        followers: &[Node],
    ) -> Result<Option<Value>> {
        let destination = self.locate();
        self.read(|container| check_target(container, &target))??;

        let source_location = source.locate();
        let mut target_path = destination.path.clone();
        if let Target::At(slot) = &target {
            target_path.push(slot.clone());
        }
        if source_location.contains(&destination.root, &target_path) {
            return Err(JsonError::SelfReference);
        }

        let (content, removal) = source.take().ok_or(JsonError::ExpiredSource)?;

        let mut target = target;
        if let Some(removal) = &removal {
            follow_removal(removal, std::iter::once(self).chain(followers));
            if let Target::At(Slot::Index(index)) = &mut target {
                if removal.shifted(&destination.root, &target_path) == Some(destination.path.len()) {
                    *index -= 1;
                }
            }
        }

        let (previous, slot) = self.write(|container| {
            let slot = match &target {
                Target::At(slot) => slot.clone(),
                Target::Tail => Slot::Index(container_len(container)),
            };
            install(container, target, content).map(|previous| (previous, slot))
        })??;

        log::debug!("re-parented {} handle to {}", source.kind, slot);
        source.rebind(Binding::Aliased {
            parent: self.clone(),
            slot,
        });
        Ok(previous)
    }
}

/// Shift `nodes` past an array removal so each keeps designating the same
/// container.
///
/// Every location is computed before any binding changes, and a binding
/// shared by several nodes (clones, or views navigated through the same
/// handle) shifts once.
fn follow_removal<'a>(removal: &Removal, nodes: impl IntoIterator<Item = &'a Node>) {
    let mut shifted: Vec<Cell<Binding>> = Vec::new();
    for node in nodes {
        let location = node.locate();
        if let Some(depth) = removal.shifted(&location.root, &location.path) {
            let binding = &location.chain[depth];
            if !shifted.iter().any(|seen| Arc::ptr_eq(seen, binding)) {
                shifted.push(binding.clone());
            }
        }
    }
    for binding in shifted {
        if let Binding::Aliased {
            slot: Slot::Index(i),
            ..
        } = &mut *lock(&binding)
        {
            *i -= 1;
        }
    }
}

fn container_len(container: &Value) -> usize {
    match container {
        Value::Array(arr) => arr.len(),
        Value::Object(map) => map.len(),
        _ => 0,
    }
}

fn check_target(container: &Value, target: &Target) -> Result<()> {
    match (target, container) {
        (Target::At(Slot::Index(index)), Value::Array(arr)) if *index >= arr.len() => {
            Err(JsonError::OutOfRange {
                index: *index,
                len: arr.len(),
            })
        }
        _ => Ok(()),
    }
}

fn install(container: &mut Value, target: Target, value: Value) -> Result<Option<Value>> {
    match (target, container) {
        (Target::At(Slot::Key(key)), Value::Object(map)) => Ok(map.insert(key, value)),
        (Target::At(Slot::Index(index)), Value::Array(arr)) => {
            let len = arr.len();
            match arr.get_mut(index) {
                Some(existing) => Ok(Some(std::mem::replace(existing, value))),
                None => Err(JsonError::OutOfRange { index, len }),
            }
        }
        (Target::Tail, Value::Array(arr)) => {
            arr.push(value);
            Ok(None)
        }
        (_, other) => Err(JsonError::type_conversion(
            "matching container",
            other.type_name(),
        )),
    }
}
