//! Iterator adapters used as the associated iterator types of the
//! [`IntoHandles`](super::IntoHandles),
//! [`IntoNeighbors`](super::IntoNeighbors) and
//! [`IntoEdges`](super::IntoEdges) implementations.
//!
//! They are plain structs rather than `std::iter::Map` wrappers so
//! that the types can be named in trait implementations.

use std::collections::{hash_map, hash_set};

use fnv::FnvHashSet;

use crate::handle::{Edge, Handle, NodeId};

/// Iterator adapter to create an Iterator over `Handle`s from an
/// iterator over &NodeId. Yields forward handles.
pub struct NodeIdRefHandles<'a, I>
where
    I: Iterator<Item = &'a NodeId> + 'a,
{
    iter: I,
}

impl<'a, I> NodeIdRefHandles<'a, I>
where
    I: Iterator<Item = &'a NodeId> + 'a,
{
    #[inline]
    pub fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<'a, I> Iterator for NodeIdRefHandles<'a, I>
where
    I: Iterator<Item = &'a NodeId> + 'a,
{
    type Item = Handle;

    #[inline]
    fn next(&mut self) -> Option<Handle> {
        let id = *self.iter.next()?;
        Some(Handle::pack(id, false))
    }
}

/// Iterator over the handles in one adjacency set. A handle without
/// any edges on the requested side produces an empty iterator.
pub struct NeighborIter<'a> {
    iter: Option<hash_set::Iter<'a, Handle>>,
}

impl<'a> NeighborIter<'a> {
    #[inline]
    pub fn new(iter: Option<hash_set::Iter<'a, Handle>>) -> Self {
        Self { iter }
    }
}

impl<'a> Iterator for NeighborIter<'a> {
    type Item = Handle;

    #[inline]
    fn next(&mut self) -> Option<Handle> {
        self.iter.as_mut()?.next().copied()
    }
}

/// Iterator over every directed edge stored in a source-keyed
/// adjacency map.
pub struct EdgesIter<'a> {
    sources: hash_map::Iter<'a, Handle, FnvHashSet<Handle>>,
    current: Option<(Handle, hash_set::Iter<'a, Handle>)>,
}

impl<'a> EdgesIter<'a> {
    #[inline]
    pub fn new(
        sources: hash_map::Iter<'a, Handle, FnvHashSet<Handle>>,
    ) -> Self {
        Self {
            sources,
            current: None,
        }
    }
}

impl<'a> Iterator for EdgesIter<'a> {
    type Item = Edge;

    #[inline]
    fn next(&mut self) -> Option<Edge> {
        loop {
            if let Some((source, targets)) = self.current.as_mut() {
                if let Some(target) = targets.next() {
                    return Some(Edge(*source, *target));
                }
            }
            let (source, targets) = self.sources.next()?;
            self.current = Some((*source, targets.iter()));
        }
    }
}
