use std::collections::hash_map;

use bstr::BString;
use fnv::{FnvHashMap, FnvHashSet};

use crate::{
    handle::{Direction, Edge, Handle, NodeId},
    handlegraph::*,
    mutablehandlegraph::*,
    pathhandlegraph::{GraphPaths, MutableGraphPaths, PathId},
};

use super::{Node, Path};

/// A handlegraph implementation using `HashMap` to represent the
/// graph topology and nodes, and each path as a `Vec` of handles.
///
/// Edges are directed and keyed by their source handle; the inverse
/// relation is kept alongside so that in-degrees are cheap to query.
#[derive(Debug, Clone)]
pub struct HashGraph {
    /// The largest node ID ever assigned in this graph.
    pub max_id: NodeId,
    pub graph: FnvHashMap<NodeId, Node>,
    pub out_edges: FnvHashMap<Handle, FnvHashSet<Handle>>,
    pub in_edges: FnvHashMap<Handle, FnvHashSet<Handle>>,
    pub path_id: FnvHashMap<Vec<u8>, PathId>,
    pub paths: FnvHashMap<PathId, Path>,
    next_path_id: u64,
}

impl Default for HashGraph {
    fn default() -> HashGraph {
        HashGraph {
            max_id: NodeId::from(0u64),
            graph: Default::default(),
            out_edges: Default::default(),
            in_edges: Default::default(),
            path_id: Default::default(),
            paths: Default::default(),
            next_path_id: 0,
        }
    }
}

impl HashGraph {
    pub fn new() -> HashGraph {
        Default::default()
    }

    pub fn get_node(&self, node_id: &NodeId) -> Option<&Node> {
        self.graph.get(node_id)
    }

    pub fn get_node_mut(&mut self, node_id: &NodeId) -> Option<&mut Node> {
        self.graph.get_mut(node_id)
    }

    pub fn get_path(&self, path_id: &PathId) -> Option<&Path> {
        self.paths.get(path_id)
    }

    /// Record the name a node was read under. Names equal to the
    /// node's ID are not stored.
    pub fn set_node_name(&mut self, node_id: NodeId, name: &[u8]) {
        let is_id = name == node_id.to_string().as_bytes();
        if let Some(node) = self.graph.get_mut(&node_id) {
            node.name = if is_id { None } else { Some(BString::from(name)) };
        }
    }

    /// The name used for the node when writing GFA: the recorded
    /// segment name if there is one, otherwise the node ID.
    pub fn node_name(&self, node_id: NodeId) -> BString {
        self.graph
            .get(&node_id)
            .and_then(|node| node.name.clone())
            .unwrap_or_else(|| BString::from(node_id.to_string()))
    }

    /// Find a node by the name it was read under.
    pub fn node_by_name(&self, name: &[u8]) -> Option<NodeId> {
        self.graph.iter().find_map(|(id, node)| {
            let matches = match &node.name {
                Some(n) => {
                    let n: &[u8] = n.as_ref();
                    n == name
                }
                None => id.to_string().as_bytes() == name,
            };
            if matches {
                Some(*id)
            } else {
                None
            }
        })
    }

    /// All edges, sorted by source and then target.
    pub fn sorted_edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self.edges().collect();
        edges.sort_unstable();
        edges
    }

    fn unlink(
        map: &mut FnvHashMap<Handle, FnvHashSet<Handle>>,
        key: Handle,
        value: Handle,
    ) -> bool {
        let mut removed = false;
        if let Some(set) = map.get_mut(&key) {
            removed = set.remove(&value);
            if set.is_empty() {
                map.remove(&key);
            }
        }
        removed
    }
}

impl HandleGraph for HashGraph {
    #[inline]
    fn has_node<I: Into<NodeId>>(&self, node_id: I) -> bool {
        self.graph.contains_key(&node_id.into())
    }

    /// Missing nodes have length 0.
    #[inline]
    fn length(&self, handle: Handle) -> usize {
        self.graph
            .get(&handle.id())
            .map_or(0, |node| node.sequence.len())
    }

    /// Missing nodes have an empty sequence.
    fn sequence(&self, handle: Handle) -> Vec<u8> {
        self.graph
            .get(&handle.id())
            .map(|node| node.oriented_sequence(handle.is_reverse()))
            .unwrap_or_default()
    }

    fn min_node_id(&self) -> NodeId {
        self.graph.keys().copied().min().unwrap_or_default()
    }

    fn max_node_id(&self) -> NodeId {
        self.max_id
    }

    #[inline]
    fn node_count(&self) -> usize {
        self.graph.len()
    }

    fn edge_count(&self) -> usize {
        self.out_edges.values().map(|targets| targets.len()).sum()
    }

    fn total_length(&self) -> usize {
        self.graph.values().map(|n| n.sequence.len()).sum()
    }

    fn degree(&self, handle: Handle, dir: Direction) -> usize {
        let map = match dir {
            Direction::Left => &self.in_edges,
            Direction::Right => &self.out_edges,
        };
        map.get(&handle).map_or(0, |set| set.len())
    }

    fn has_edge(&self, left: Handle, right: Handle) -> bool {
        self.out_edges
            .get(&left)
            .map_or(false, |targets| targets.contains(&right))
    }
}

impl<'a> IntoHandles for &'a HashGraph {
    type Handles = NodeIdRefHandles<'a, hash_map::Keys<'a, NodeId, Node>>;

    #[inline]
    fn handles(self) -> Self::Handles {
        NodeIdRefHandles::new(self.graph.keys())
    }
}

impl<'a> IntoNeighbors for &'a HashGraph {
    type Neighbors = NeighborIter<'a>;

    #[inline]
    fn neighbors(self, handle: Handle, dir: Direction) -> Self::Neighbors {
        let map = match dir {
            Direction::Left => &self.in_edges,
            Direction::Right => &self.out_edges,
        };
        NeighborIter::new(map.get(&handle).map(|set| set.iter()))
    }
}

impl<'a> IntoEdges for &'a HashGraph {
    type Edges = EdgesIter<'a>;

    #[inline]
    fn edges(self) -> Self::Edges {
        EdgesIter::new(self.out_edges.iter())
    }
}

impl AdditiveHandleGraph for HashGraph {
    fn append_handle(&mut self, sequence: &[u8]) -> Handle {
        self.create_handle(sequence, self.max_id + 1)
    }

    fn create_handle<T: Into<NodeId>>(
        &mut self,
        sequence: &[u8],
        node_id: T,
    ) -> Handle {
        let node_id: NodeId = node_id.into();
        match self.graph.get_mut(&node_id) {
            Some(node) => node.sequence = sequence.into(),
            None => {
                self.graph.insert(node_id, Node::new(sequence));
            }
        }
        self.max_id = std::cmp::max(self.max_id, node_id);
        Handle::pack(node_id, false)
    }

    fn create_edge(&mut self, Edge(left, right): Edge) {
        self.out_edges.entry(left).or_default().insert(right);
        self.in_edges.entry(right).or_default().insert(left);
    }
}

impl SubtractiveHandleGraph for HashGraph {
    fn remove_handle(&mut self, handle: Handle) -> bool {
        let id = handle.id();
        let existed = self.graph.remove(&id).is_some();

        let forward = Handle::pack(id, false);
        for h in [forward, forward.flip()] {
            if let Some(targets) = self.out_edges.remove(&h) {
                for target in targets {
                    Self::unlink(&mut self.in_edges, target, h);
                }
            }
            if let Some(sources) = self.in_edges.remove(&h) {
                for source in sources {
                    Self::unlink(&mut self.out_edges, source, h);
                }
            }
        }

        existed
    }

    fn remove_edge(&mut self, Edge(left, right): Edge) -> bool {
        let removed = Self::unlink(&mut self.out_edges, left, right);
        Self::unlink(&mut self.in_edges, right, left);
        removed
    }

    fn take_edges(&mut self) -> Vec<Edge> {
        let edges = self.sorted_edges();
        self.out_edges.clear();
        self.in_edges.clear();
        edges
    }
}

impl GraphPaths for HashGraph {
    fn path_count(&self) -> usize {
        self.paths.len()
    }

    fn path_ids(&self) -> Vec<PathId> {
        let mut ids: Vec<PathId> = self.paths.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn get_path_id(&self, name: &[u8]) -> Option<PathId> {
        self.path_id.get(name).copied()
    }

    fn get_path_name(&self, id: PathId) -> Option<&[u8]> {
        self.paths.get(&id).map(|path| {
            let name: &[u8] = path.name.as_ref();
            name
        })
    }

    fn path_steps(&self, id: PathId) -> Option<&[Handle]> {
        self.paths.get(&id).map(|path| path.nodes.as_slice())
    }
}

impl MutableGraphPaths for HashGraph {
    fn create_path(&mut self, name: &[u8], steps: Vec<Handle>) -> PathId {
        if let Some(&path_id) = self.path_id.get(name) {
            if let Some(path) = self.paths.get_mut(&path_id) {
                path.nodes = steps;
                return path_id;
            }
        }

        let path_id = PathId(self.next_path_id);
        self.next_path_id += 1;
        self.path_id.insert(name.to_vec(), path_id);
        self.paths.insert(path_id, Path::new(name, path_id, steps));
        path_id
    }

    fn destroy_path(&mut self, id: PathId) -> bool {
        match self.paths.remove(&id) {
            Some(path) => {
                let name: &[u8] = path.name.as_ref();
                self.path_id.remove(name);
                true
            }
            None => false,
        }
    }

    fn path_append_step(
        &mut self,
        id: PathId,
        handle: Handle,
    ) -> Option<usize> {
        let path = self.paths.get_mut(&id)?;
        path.nodes.push(handle);
        Some(path.nodes.len() - 1)
    }

    fn with_paths_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(PathId, &mut Vec<Handle>),
    {
        for id in self.path_ids() {
            if let Some(path) = self.paths.get_mut(&id) {
                f(id, &mut path.nodes);
            }
        }
    }
}
