/*!
Exact k-mer seeds between a query and the forward strand of a graph.

Every k-mer of every node sequence is hashed into a [`KmerIndex`].
Looking up the k-mers of a query yields [`Seed`]s; candidate hits are
compared byte for byte, so hash collisions never produce a seed.
*/

use fnv::FnvHashMap;

#[allow(unused_imports)]
use log::{debug, trace};

use crate::{
    error::{PangenomeError, Result},
    handle::{Handle, NodeId},
    handlegraph::*,
    hashgraph::HashGraph,
};

const HASH_SEED: u64 = 0x9e37_79b9_7f4a_7c15;
const HASH_MULTIPLIER: u64 = 1_315_423_911;

/// An exact match of a k-mer starting at `query_pos` in the query and
/// at `offset` in the forward sequence of `node`.
///
/// Seeds order by query position first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Seed {
    pub query_pos: usize,
    pub node: NodeId,
    pub offset: usize,
}

impl Seed {
    #[inline]
    pub fn new<T: Into<NodeId>>(
        query_pos: usize,
        node: T,
        offset: usize,
    ) -> Self {
        Seed {
            query_pos,
            node: node.into(),
            offset,
        }
    }
}

/// Multiplicative hash of a k-mer, with wrapping 64-bit arithmetic.
#[inline]
pub fn kmer_hash(kmer: &[u8]) -> u64 {
    kmer.iter().fold(HASH_SEED, |h, &c| {
        h.wrapping_mul(HASH_MULTIPLIER) ^ u64::from(c)
    })
}

/// Hashes of every k-mer in `seq`, in order. Empty if `seq` is
/// shorter than `k`.
pub fn kmer_hashes(seq: &[u8], k: usize) -> Vec<u64> {
    if k == 0 || seq.len() < k {
        return Vec::new();
    }
    seq.windows(k).map(kmer_hash).collect()
}

/// Maps k-mer hashes to the node positions they occur at.
#[derive(Debug, Clone)]
pub struct KmerIndex<'a> {
    graph: &'a HashGraph,
    k: usize,
    table: FnvHashMap<u64, Vec<(NodeId, usize)>>,
}

impl<'a> KmerIndex<'a> {
    /// Index every k-mer of every node in `graph`.
    pub fn new(graph: &'a HashGraph, k: usize) -> Result<Self> {
        if k == 0 {
            return Err(PangenomeError::InvalidConfig(
                "k-mer size must be at least 1".into(),
            ));
        }

        let mut table: FnvHashMap<u64, Vec<(NodeId, usize)>> =
            FnvHashMap::default();
        for id in graph.sorted_node_ids() {
            let seq = graph.sequence(Handle::pack(id, false));
            for (offset, hash) in kmer_hashes(&seq, k).into_iter().enumerate()
            {
                table.entry(hash).or_default().push((id, offset));
            }
        }

        debug!(
            "indexed {} distinct {}-mers over {} nodes",
            table.len(),
            k,
            graph.node_count()
        );

        Ok(KmerIndex { graph, k, table })
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    /// The number of distinct k-mer hashes in the index.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// All node positions whose k-mer equals `kmer`.
    pub fn lookup(&self, kmer: &[u8]) -> Vec<(NodeId, usize)> {
        if kmer.len() != self.k {
            return Vec::new();
        }
        self.table
            .get(&kmer_hash(kmer))
            .into_iter()
            .flatten()
            .copied()
            .filter(|&(node, offset)| self.matches_at(node, offset, kmer))
            .collect()
    }

    /// Every exact k-mer match between `query` and the indexed graph,
    /// sorted.
    pub fn seeds(&self, query: &[u8]) -> Vec<Seed> {
        if query.len() < self.k {
            return Vec::new();
        }

        let mut seeds = Vec::new();
        for (query_pos, kmer) in query.windows(self.k).enumerate() {
            for (node, offset) in self.lookup(kmer) {
                seeds.push(Seed {
                    query_pos,
                    node,
                    offset,
                });
            }
        }
        seeds.sort_unstable();

        trace!("{} seeds for query of length {}", seeds.len(), query.len());
        seeds
    }

    fn matches_at(&self, node: NodeId, offset: usize, kmer: &[u8]) -> bool {
        self.graph
            .get_node(&node)
            .and_then(|n| n.sequence.get(offset..offset + kmer.len()))
            .map_or(false, |window| window == kmer)
    }
}
