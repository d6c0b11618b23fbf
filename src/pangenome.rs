/*!
Incorporating an aligned query into a pangenome graph.

[`incorporate`] takes an edit script and produces a new graph that
contains the query as a path:

1. every node touched by a match or mismatch is cut so that each
   aligned base sits at the start of its own fragment;
2. the old edges are moved onto the fragments;
3. existing paths are rewritten to step through the fragments;
4. mismatched and inserted bases become new nodes, and the query is
   threaded through the graph as a new path;
5. runs of nodes that are always traversed together are merged back
   with [`unchop`].

[`add_sequence`] runs the whole pipeline, from seeding to
incorporation.
*/

use std::collections::{BTreeMap, BTreeSet};

use fnv::FnvHashMap;

#[allow(unused_imports)]
use log::{debug, info, trace};

use crate::{
    algorithms::{linearize, unchop},
    align::{Aligner, Edit},
    chain::chain,
    config::Config,
    error::{PangenomeError, Result},
    handle::{Edge, Handle, NodeId},
    handlegraph::*,
    hashgraph::HashGraph,
    mutablehandlegraph::*,
    pathhandlegraph::*,
    seed::KmerIndex,
};

/// The fragments a cut node was split into, in sequence order, each
/// with its start offset in the original node.
#[derive(Debug, Clone, Default)]
struct Fragments {
    map: FnvHashMap<NodeId, Vec<(usize, Handle)>>,
}

impl Fragments {
    fn first(&self, id: NodeId) -> Option<Handle> {
        self.map.get(&id).and_then(|f| f.first()).map(|&(_, h)| h)
    }

    fn last(&self, id: NodeId) -> Option<Handle> {
        self.map.get(&id).and_then(|f| f.last()).map(|&(_, h)| h)
    }

    /// Where an edge leaving `handle` now leaves from.
    fn source(&self, handle: Handle) -> Handle {
        let id = handle.id();
        let mapped = if handle.is_reverse() {
            self.first(id).map(Handle::flip)
        } else {
            self.last(id)
        };
        mapped.unwrap_or(handle)
    }

    /// Where an edge entering `handle` now arrives.
    fn target(&self, handle: Handle) -> Handle {
        let id = handle.id();
        let mapped = if handle.is_reverse() {
            self.last(id).map(Handle::flip)
        } else {
            self.first(id)
        };
        mapped.unwrap_or(handle)
    }

    /// The steps that replace `handle` on a path.
    fn steps(&self, handle: Handle) -> Vec<Handle> {
        match self.map.get(&handle.id()) {
            None => vec![handle],
            Some(frags) if handle.is_reverse() => {
                frags.iter().rev().map(|&(_, h)| h.flip()).collect()
            }
            Some(frags) => frags.iter().map(|&(_, h)| h).collect(),
        }
    }

    /// The fragment of `id` starting at `offset`; the node itself if
    /// it was not cut.
    fn at(&self, id: NodeId, offset: usize) -> Option<Handle> {
        match self.map.get(&id) {
            None if offset == 0 => Some(Handle::pack(id, false)),
            None => None,
            Some(frags) => frags
                .iter()
                .find(|&&(start, _)| start == offset)
                .map(|&(_, h)| h),
        }
    }
}

fn invalid_edit(index: usize, reason: String) -> PangenomeError {
    PangenomeError::InvalidEdit { index, reason }
}

/// Check every edit against the graph and the query before anything
/// is mutated.
fn validate_edits(
    graph: &HashGraph,
    query: &[u8],
    edits: &[Edit],
) -> Result<()> {
    for (index, edit) in edits.iter().enumerate() {
        if let Some((node, offset)) = edit.graph_pos() {
            if !graph.has_node(node) {
                return Err(PangenomeError::UnknownNode(node));
            }
            let len = graph.length(Handle::pack(node, false));
            if offset >= len {
                return Err(invalid_edit(
                    index,
                    format!(
                        "offset {} past end of node {} ({})",
                        offset, node, len
                    ),
                ));
            }
        }
        if let Some(query_pos) = edit.query_pos() {
            if query_pos >= query.len() {
                return Err(invalid_edit(
                    index,
                    format!(
                        "query position {} past end of query ({})",
                        query_pos,
                        query.len()
                    ),
                ));
            }
        }
    }
    Ok(())
}

/// Cut points per node: both ends of every matched or mismatched
/// base.
fn collect_cuts(edits: &[Edit]) -> BTreeMap<NodeId, BTreeSet<usize>> {
    let mut cuts: BTreeMap<NodeId, BTreeSet<usize>> = BTreeMap::new();
    for edit in edits {
        match *edit {
            Edit::Match { node, offset, .. }
            | Edit::Mismatch { node, offset, .. } => {
                let points = cuts.entry(node).or_default();
                points.insert(offset);
                points.insert(offset + 1);
            }
            Edit::Insert { .. } | Edit::Delete { .. } => (),
        }
    }
    cuts
}

/// Split every node at its cut points. Each node that yields more
/// than one fragment is replaced by fresh nodes linked in sequence
/// order; the original node is removed.
fn cut_nodes(
    graph: &mut HashGraph,
    cuts: &BTreeMap<NodeId, BTreeSet<usize>>,
) -> Fragments {
    let mut fragments = Fragments::default();

    for (&id, points) in cuts {
        let seq = graph.sequence(Handle::pack(id, false));
        let len = seq.len();

        let mut bounds: BTreeSet<usize> =
            points.iter().copied().filter(|&p| p <= len).collect();
        bounds.insert(0);
        bounds.insert(len);
        let bounds: Vec<usize> = bounds.into_iter().collect();

        if bounds.len() <= 2 {
            continue;
        }

        let mut frags = Vec::with_capacity(bounds.len() - 1);
        for w in bounds.windows(2) {
            let handle = graph.append_handle(&seq[w[0]..w[1]]);
            frags.push((w[0], handle));
        }
        for w in frags.windows(2) {
            graph.create_edge(Edge(w[0].1, w[1].1));
        }
        graph.remove_handle(Handle::pack(id, false));

        trace!("cut node {} into {} fragments", id, frags.len());
        fragments.map.insert(id, frags);
    }

    fragments
}

/// Re-add the old edges with cut endpoints moved onto fragments.
fn rewire_edges(graph: &mut HashGraph, old: Vec<Edge>, frags: &Fragments) {
    for Edge(from, to) in old {
        graph.create_edge(Edge(frags.source(from), frags.target(to)));
    }
}

/// Replace every step on a cut node with its fragments.
fn rewrite_paths(graph: &mut HashGraph, frags: &Fragments) {
    graph.with_paths_mut(|_, steps| {
        if steps.iter().any(|h| frags.map.contains_key(&h.id())) {
            *steps = steps.iter().flat_map(|&h| frags.steps(h)).collect();
        }
    });
}

/// The handles the query walks through: matched fragments, and new
/// single-base nodes for mismatches and insertions. Consecutive
/// handles are joined by edges.
fn thread_query(
    graph: &mut HashGraph,
    query: &[u8],
    edits: &[Edit],
    frags: &Fragments,
) -> Result<Vec<Handle>> {
    let mut steps: Vec<Handle> = Vec::with_capacity(query.len());

    for (index, edit) in edits.iter().enumerate() {
        match *edit {
            Edit::Match { node, offset, .. } => {
                let handle = frags.at(node, offset).ok_or_else(|| {
                    invalid_edit(
                        index,
                        format!("no fragment of {} at {}", node, offset),
                    )
                })?;
                steps.push(handle);
            }
            Edit::Mismatch { query_pos, .. } | Edit::Insert { query_pos } => {
                let base = query[query_pos];
                steps.push(graph.append_handle(&[base]));
            }
            Edit::Delete { .. } => (),
        }
    }

    for w in steps.windows(2) {
        graph.create_edge(Edge(w[0], w[1]));
    }

    Ok(steps)
}

/// Splice `query`, aligned to `graph` by `edits`, into a copy of the
/// graph as a path called `name`. The input graph is not modified.
///
/// Every path already in the graph spells the same sequence
/// afterwards, and the new path spells `query`.
pub fn incorporate(
    graph: &HashGraph,
    query: &[u8],
    edits: &[Edit],
    name: &[u8],
) -> Result<HashGraph> {
    validate_edits(graph, query, edits)?;

    let mut graph = graph.clone();

    let cuts = collect_cuts(edits);
    let old_edges = graph.take_edges();
    let frags = cut_nodes(&mut graph, &cuts);
    rewire_edges(&mut graph, old_edges, &frags);
    rewrite_paths(&mut graph, &frags);

    let steps = thread_query(&mut graph, query, edits, &frags)?;
    graph.create_path(name, steps);

    let merges = unchop(&mut graph);
    debug!(
        "incorporated {} edits: {} nodes cut, {} merges, {} nodes",
        edits.len(),
        frags.map.len(),
        merges,
        graph.node_count()
    );

    Ok(graph)
}

/// Seed, chain, align and incorporate `query` as a new path called
/// `name`, returning the new graph.
pub fn add_sequence(
    graph: &HashGraph,
    query: &[u8],
    name: &[u8],
    config: &Config,
) -> Result<HashGraph> {
    config.validate()?;

    let index = KmerIndex::new(graph, config.kmer_size)?;
    let seeds = index.seeds(query);
    debug!("{} seeds", seeds.len());

    let linearization = linearize(graph, config.aggregation)?;
    let chain = chain(&linearization, config.reward, &seeds)?;
    debug!("chain of {} seeds, score {}", chain.len(), chain.score);

    let edits = Aligner::new(graph).align(query, &chain)?;
    let result = incorporate(graph, query, edits.as_slice(), name)?;

    info!(
        "added {} ({} bp): {} -> {} nodes, {} paths",
        String::from_utf8_lossy(name),
        query.len(),
        graph.node_count(),
        result.node_count(),
        result.path_count()
    );

    Ok(result)
}
