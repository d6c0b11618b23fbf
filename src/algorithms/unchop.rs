use std::collections::BTreeSet;

#[allow(unused_imports)]
use log::{debug, trace};

use crate::{
    handle::{Direction, Edge, Handle, NodeId},
    handlegraph::*,
    hashgraph::HashGraph,
    mutablehandlegraph::*,
    pathhandlegraph::*,
};

/// Returns true if every path that steps on `left` steps on `right`
/// immediately after, and every step on `right` comes right after a
/// step on `left`. Both handles must be forward, and no path may
/// traverse either node in reverse.
pub fn perfect_neighbors(
    graph: &HashGraph,
    left: Handle,
    right: Handle,
) -> bool {
    for path_id in graph.path_ids() {
        let steps = match graph.path_steps(path_id) {
            Some(steps) => steps,
            None => continue,
        };

        for (ix, &step) in steps.iter().enumerate() {
            if step.id() == left.id() {
                if step != left || steps.get(ix + 1) != Some(&right) {
                    return false;
                }
            } else if step.id() == right.id()
                && (step != right || ix == 0 || steps[ix - 1] != left)
            {
                return false;
            }
        }
    }
    true
}

/// If the forward handle `left` can be merged with its successor,
/// return that successor.
///
/// `left` must have exactly one outgoing edge, to a forward handle
/// `right` on a different node that has `left` as its only incoming
/// edge. Neither node may have edges on its reverse handle, and the
/// two must be perfect neighbors on every path.
fn mergeable_successor(graph: &HashGraph, left: Handle) -> Option<Handle> {
    if left.is_reverse() || !graph.has_node(left.id()) {
        return None;
    }
    if graph.degree(left, Direction::Right) != 1 {
        return None;
    }
    let right = graph.neighbors(left, Direction::Right).next()?;

    if right.is_reverse()
        || right.id() == left.id()
        || graph.degree(right, Direction::Left) != 1
    {
        return None;
    }

    let reverse_edges = [left.flip(), right.flip()].iter().any(|&h| {
        graph.degree(h, Direction::Left) > 0
            || graph.degree(h, Direction::Right) > 0
    });
    if reverse_edges {
        return None;
    }

    if perfect_neighbors(graph, left, right) {
        Some(right)
    } else {
        None
    }
}

/// Merge `left` and `right` into a new node whose sequence is the
/// concatenation of the two. Edges into `left` and out of `right`
/// are moved to the new node, and every `left, right` pair of steps
/// on a path becomes a single step on the new node.
fn concat_nodes(graph: &mut HashGraph, left: Handle, right: Handle) -> Handle {
    let mut new_seq = graph.sequence(left);
    new_seq.extend(graph.sequence(right));
    let new_handle = graph.append_handle(&new_seq);

    let retarget = |h: Handle| {
        if h == left || h == right {
            new_handle
        } else {
            h
        }
    };

    let left_neighbors: Vec<Handle> =
        graph.neighbors(left, Direction::Left).map(retarget).collect();
    let right_neighbors: Vec<Handle> = graph
        .neighbors(right, Direction::Right)
        .map(retarget)
        .collect();

    graph.remove_handle(left);
    graph.remove_handle(right);

    for other in left_neighbors {
        graph.create_edge(Edge(other, new_handle));
    }
    for other in right_neighbors {
        graph.create_edge(Edge(new_handle, other));
    }

    graph.with_paths_mut(|_, steps| {
        let mut rewritten = Vec::with_capacity(steps.len());
        for &step in steps.iter() {
            if step == left {
                rewritten.push(new_handle);
            } else if step == right && rewritten.last() == Some(&new_handle)
            {
                continue;
            } else {
                rewritten.push(step);
            }
        }
        *steps = rewritten;
    });

    trace!(
        "merged {} and {} into {}",
        left.id(),
        right.id(),
        new_handle.id()
    );

    new_handle
}

/// Merge pairs of nodes connected only to each other until no such
/// pair remains. Returns the number of merges performed.
///
/// Candidates are tried lowest node ID first; after a merge, the new
/// node and its predecessors are tried again. The sequence spelled by
/// every path is unchanged.
pub fn unchop(graph: &mut HashGraph) -> usize {
    let mut candidates: BTreeSet<NodeId> =
        graph.handles().map(|h| h.id()).collect();
    let mut merges = 0;

    while let Some(id) = candidates.pop_first() {
        let left = Handle::pack(id, false);
        let right = match mergeable_successor(graph, left) {
            Some(right) => right,
            None => continue,
        };

        let merged = concat_nodes(graph, left, right);
        merges += 1;

        candidates.remove(&right.id());
        candidates.insert(merged.id());
        for prev in graph.neighbors(merged, Direction::Left) {
            candidates.insert(prev.id());
        }
    }

    debug!(
        "unchop: {} merges, {} nodes remaining",
        merges,
        graph.node_count()
    );
    merges
}
