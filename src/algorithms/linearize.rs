use fnv::FnvHashMap;

#[allow(unused_imports)]
use log::{debug, trace};

use crate::{
    config::Aggregation,
    error::{PangenomeError, Result},
    handle::{Edge, Handle, NodeId},
    handlegraph::*,
};

/// A coordinate for every node in a graph, along with the
/// topological order it was computed in.
///
/// Only valid for the graph it was computed from; any change to the
/// nodes or edges requires a new linearization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linearization {
    aggregation: Aggregation,
    order: Vec<NodeId>,
    distances: FnvHashMap<NodeId, usize>,
}

impl Linearization {
    #[inline]
    pub fn distance(&self, node: NodeId) -> Option<usize> {
        self.distances.get(&node).copied()
    }

    /// The nodes in topological order.
    #[inline]
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    #[inline]
    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Nodes and their coordinates, in topological order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, usize)> + '_ {
        self.order
            .iter()
            .map(move |id| (*id, self.distances.get(id).copied().unwrap_or(0)))
    }
}

/// Project every edge onto the IDs of its endpoints, ignoring
/// orientation. Successor lists are sorted and deduplicated.
fn node_adjacency<G>(graph: &G) -> Result<FnvHashMap<NodeId, Vec<NodeId>>>
where
    G: HandleGraph,
    for<'a> &'a G: IntoEdges,
{
    let mut adjacency: FnvHashMap<NodeId, Vec<NodeId>> = FnvHashMap::default();

    for Edge(left, right) in graph.edges() {
        for id in [left.id(), right.id()] {
            if !graph.has_node(id) {
                return Err(PangenomeError::DanglingReference(id));
            }
        }
        adjacency.entry(left.id()).or_default().push(right.id());
    }

    for successors in adjacency.values_mut() {
        successors.sort_unstable();
        successors.dedup();
    }

    Ok(adjacency)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

fn sort_adjacency(
    nodes: &[NodeId],
    adjacency: &FnvHashMap<NodeId, Vec<NodeId>>,
) -> Result<Vec<NodeId>> {
    let mut marks: FnvHashMap<NodeId, Mark> = FnvHashMap::default();
    let mut postorder: Vec<NodeId> = Vec::with_capacity(nodes.len());

    // (node, index of the next successor to visit)
    let mut stack: Vec<(NodeId, usize)> = Vec::new();

    let no_successors: &[NodeId] = &[];

    for &root in nodes {
        if marks.contains_key(&root) {
            continue;
        }
        marks.insert(root, Mark::Visiting);
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, next_ix) = *frame;
            let successors = adjacency
                .get(&node)
                .map_or(no_successors, |s| s.as_slice());

            match successors.get(next_ix) {
                Some(&next) => {
                    frame.1 += 1;
                    match marks.get(&next) {
                        Some(Mark::Visiting) => {
                            debug!("cycle closed at node {}", next);
                            return Err(PangenomeError::Cycle(next));
                        }
                        Some(Mark::Done) => (),
                        None => {
                            marks.insert(next, Mark::Visiting);
                            stack.push((next, 0));
                        }
                    }
                }
                None => {
                    marks.insert(node, Mark::Done);
                    postorder.push(node);
                    stack.pop();
                }
            }
        }
    }

    postorder.reverse();
    Ok(postorder)
}

/// Sort the nodes of the graph topologically, treating every edge as
/// going from its source node to its target node regardless of
/// orientation.
///
/// Roots are taken in ascending ID order, as are the successors of
/// each node, so the order is deterministic. Fails with
/// [`PangenomeError::Cycle`] naming the node that closed a cycle.
pub fn topological_order<G>(graph: &G) -> Result<Vec<NodeId>>
where
    G: HandleGraph,
    for<'a> &'a G: IntoHandles + IntoEdges,
{
    let adjacency = node_adjacency(graph)?;
    let nodes = graph.sorted_node_ids();
    sort_adjacency(&nodes, &adjacency)
}

/// Assign every node a coordinate approximating its position along
/// the graph.
///
/// Nodes are visited in topological order. Each node collects an
/// arrival cost `distance + length` from every predecessor, and its
/// own distance is the aggregate of those costs; nodes without
/// predecessors start at 0. With [`Aggregation::Mean`] the mean is
/// raised to the largest predecessor distance when it falls below
/// it, so coordinates never decrease along an edge.
pub fn linearize<G>(graph: &G, aggregation: Aggregation) -> Result<Linearization>
where
    G: HandleGraph,
    for<'a> &'a G: IntoHandles + IntoEdges,
{
    let adjacency = node_adjacency(graph)?;
    let nodes = graph.sorted_node_ids();
    let order = sort_adjacency(&nodes, &adjacency)?;

    // (arrival costs, largest predecessor distance)
    let mut arrivals: FnvHashMap<NodeId, (Vec<usize>, usize)> =
        FnvHashMap::default();
    let mut distances: FnvHashMap<NodeId, usize> = FnvHashMap::default();
    distances.reserve(order.len());

    for &node in order.iter() {
        let (costs, floor) = arrivals.remove(&node).unwrap_or_default();
        let distance = match aggregation {
            Aggregation::Max => aggregation.aggregate(&costs),
            Aggregation::Mean => aggregation.aggregate(&costs).max(floor),
        };
        distances.insert(node, distance);

        let arrival = distance + graph.length(Handle::pack(node, false));
        if let Some(successors) = adjacency.get(&node) {
            for &next in successors {
                let entry = arrivals.entry(next).or_default();
                entry.0.push(arrival);
                entry.1 = entry.1.max(distance);
            }
        }
    }

    debug!(
        "linearized {} nodes ({} mode)",
        order.len(),
        aggregation
    );

    Ok(Linearization {
        aggregation,
        order,
        distances,
    })
}
