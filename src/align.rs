/*!
Base-level alignment of a query against a graph, guided by a chain.

The [`Aligner`] routes a walk of forward handles through the nodes of
a chain and aligns the query globally against the sequence the walk
spells. The result is an edit script that consumes every query
position exactly once, which is what
[`incorporate`](crate::pangenome::incorporate) splices into the graph.
*/

use std::collections::VecDeque;

use fnv::{FnvHashMap, FnvHashSet};

#[allow(unused_imports)]
use log::{debug, trace};

use crate::{
    chain::Chain,
    error::{PangenomeError, Result},
    handle::{Direction, Handle, NodeId},
    handlegraph::*,
    hashgraph::HashGraph,
};

/// One column of an alignment between a query and a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edit {
    /// The query base equals the base at `offset` in `node`.
    Match {
        node: NodeId,
        offset: usize,
        query_pos: usize,
    },
    /// The query base is aligned to a different base.
    Mismatch {
        node: NodeId,
        offset: usize,
        query_pos: usize,
    },
    /// A query base with no counterpart in the graph.
    Insert { query_pos: usize },
    /// A graph base with no counterpart in the query.
    Delete { node: NodeId, offset: usize },
}

impl Edit {
    /// The node and offset the edit consumes, if any.
    #[inline]
    pub fn graph_pos(&self) -> Option<(NodeId, usize)> {
        match *self {
            Edit::Match { node, offset, .. }
            | Edit::Mismatch { node, offset, .. }
            | Edit::Delete { node, offset } => Some((node, offset)),
            Edit::Insert { .. } => None,
        }
    }

    /// The query position the edit consumes, if any.
    #[inline]
    pub fn query_pos(&self) -> Option<usize> {
        match *self {
            Edit::Match { query_pos, .. }
            | Edit::Mismatch { query_pos, .. }
            | Edit::Insert { query_pos } => Some(query_pos),
            Edit::Delete { .. } => None,
        }
    }
}

const MISMATCH: u32 = 1;
const GAP: u32 = 1;

pub struct Aligner<'a> {
    graph: &'a HashGraph,
}

impl<'a> Aligner<'a> {
    pub fn new(graph: &'a HashGraph) -> Self {
        Aligner { graph }
    }

    /// Align `query` against the walk routed through the chain.
    /// An empty chain inserts every query base.
    pub fn align(&self, query: &[u8], chain: &Chain) -> Result<Vec<Edit>> {
        if chain.is_empty() {
            return Ok((0..query.len())
                .map(|query_pos| Edit::Insert { query_pos })
                .collect());
        }

        let walk = self.route(&chain.nodes())?;
        trace!("aligning against walk of {} nodes", walk.len());

        let mut target: Vec<u8> = Vec::new();
        let mut positions: Vec<(NodeId, usize)> = Vec::new();
        for &handle in &walk {
            let seq = self.graph.sequence(handle);
            let id = handle.id();
            positions.extend((0..seq.len()).map(|offset| (id, offset)));
            target.extend(seq);
        }

        let edits = global_alignment(query, &target, &positions);
        debug!(
            "aligned {} bases against {} graph bases: {} edits",
            query.len(),
            target.len(),
            edits.len()
        );
        Ok(edits)
    }

    /// A walk of forward handles visiting `nodes` in order.
    ///
    /// Consecutive nodes are joined by the shortest chain of forward
    /// successors. A node that can't be reached is appended directly.
    /// Either way the new handles are dropped if any of them reaches
    /// back to the walk through edges of either orientation, so no
    /// node of the walk reaches an earlier one and threading a query
    /// along it never closes a cycle.
    pub fn route(&self, nodes: &[NodeId]) -> Result<Vec<Handle>> {
        let mut walk: Vec<Handle> = Vec::new();
        let mut visited: FnvHashSet<NodeId> = FnvHashSet::default();

        for &node in nodes {
            if !self.graph.has_node(node) {
                return Err(PangenomeError::UnknownNode(node));
            }
            if visited.contains(&node) {
                continue;
            }

            let target = Handle::pack(node, false);
            let segment = match walk.last() {
                Some(&last) => self
                    .shortest_path(last, target)
                    .unwrap_or_else(|| vec![target]),
                None => vec![target],
            };

            let ids: Vec<NodeId> = segment.iter().map(|h| h.id()).collect();
            if self.reaches_any(&ids, &visited) {
                trace!("dropping node {}: it reaches back to the walk", node);
                continue;
            }

            visited.extend(ids);
            walk.extend(segment);
        }

        Ok(walk)
    }

    /// Whether any node in `nodes` can be reached from `from`, with
    /// edges projected onto node IDs as the linearization sees them.
    fn reaches_any(
        &self,
        from: &[NodeId],
        nodes: &FnvHashSet<NodeId>,
    ) -> bool {
        let mut seen: FnvHashSet<NodeId> = from.iter().copied().collect();
        let mut stack: Vec<NodeId> = from.to_vec();
        while let Some(cur) = stack.pop() {
            for is_reverse in [false, true] {
                let handle = Handle::pack(cur, is_reverse);
                for next in self.graph.neighbors(handle, Direction::Right) {
                    let id = next.id();
                    if nodes.contains(&id) {
                        return true;
                    }
                    if seen.insert(id) {
                        stack.push(id);
                    }
                }
            }
        }
        false
    }

    /// Breadth-first search along forward handles from `from` to `to`.
    /// Returns the handles after `from`, ending with `to`.
    fn shortest_path(&self, from: Handle, to: Handle) -> Option<Vec<Handle>> {
        let mut parent: FnvHashMap<Handle, Handle> = FnvHashMap::default();
        let mut queue: VecDeque<Handle> = VecDeque::new();
        queue.push_back(from);

        while let Some(cur) = queue.pop_front() {
            if cur == to {
                let mut path = vec![cur];
                let mut at = cur;
                while let Some(&p) = parent.get(&at) {
                    if p == from {
                        break;
                    }
                    path.push(p);
                    at = p;
                }
                path.reverse();
                return Some(path);
            }

            let mut next: Vec<Handle> = self
                .graph
                .neighbors(cur, Direction::Right)
                .filter(|h| !h.is_reverse())
                .collect();
            next.sort_unstable();
            for h in next {
                if h != from && !parent.contains_key(&h) {
                    parent.insert(h, cur);
                    queue.push_back(h);
                }
            }
        }
        None
    }
}

/// Needleman-Wunsch with unit costs. `positions[j]` is the graph
/// position of `target[j]`.
fn global_alignment(
    query: &[u8],
    target: &[u8],
    positions: &[(NodeId, usize)],
) -> Vec<Edit> {
    let n = query.len();
    let m = target.len();
    let width = m + 1;

    let mut cost = vec![0u32; (n + 1) * width];
    for i in 0..=n {
        cost[i * width] = i as u32 * GAP;
    }
    for j in 0..=m {
        cost[j] = j as u32 * GAP;
    }
    for i in 1..=n {
        for j in 1..=m {
            let sub = if query[i - 1] == target[j - 1] {
                0
            } else {
                MISMATCH
            };
            let diag = cost[(i - 1) * width + j - 1] + sub;
            let del = cost[i * width + j - 1] + GAP;
            let ins = cost[(i - 1) * width + j] + GAP;
            cost[i * width + j] = diag.min(del).min(ins);
        }
    }

    let mut edits = Vec::with_capacity(n + m);
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        let here = cost[i * width + j];
        if i > 0 && j > 0 {
            let (node, offset) = positions[j - 1];
            let query_pos = i - 1;
            if query[i - 1] == target[j - 1]
                && here == cost[(i - 1) * width + j - 1]
            {
                edits.push(Edit::Match {
                    node,
                    offset,
                    query_pos,
                });
                i -= 1;
                j -= 1;
                continue;
            }
            if query[i - 1] != target[j - 1]
                && here == cost[(i - 1) * width + j - 1] + MISMATCH
            {
                edits.push(Edit::Mismatch {
                    node,
                    offset,
                    query_pos,
                });
                i -= 1;
                j -= 1;
                continue;
            }
        }
        if j > 0 && here == cost[i * width + j - 1] + GAP {
            let (node, offset) = positions[j - 1];
            edits.push(Edit::Delete { node, offset });
            j -= 1;
        } else {
            edits.push(Edit::Insert { query_pos: i - 1 });
            i -= 1;
        }
    }

    edits.reverse();
    edits
}
