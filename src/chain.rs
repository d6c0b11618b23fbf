/*!
Colinear chaining of seeds.

Each seed is placed on the graph axis at the coordinate of its node
plus its offset. A chain is a run of seeds, in query order, whose
query and graph positions advance together; every seed in the chain
earns `reward`, and every step is penalized by how far the two seeds
drift off a common diagonal.
*/

#[allow(unused_imports)]
use log::{debug, trace};

use crate::{
    algorithms::Linearization,
    error::{PangenomeError, Result},
    handle::NodeId,
    seed::Seed,
};

/// The best-scoring colinear subset of a set of seeds, sorted by
/// query position and then graph coordinate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chain {
    pub seeds: Vec<Seed>,
    pub score: i64,
}

impl Chain {
    #[inline]
    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// The nodes the chain passes through, in chain order, with
    /// consecutive repeats collapsed.
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> =
            self.seeds.iter().map(|seed| seed.node).collect();
        nodes.dedup();
        nodes
    }
}

/// A seed placed on the graph axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Anchor {
    query_pos: i64,
    coord: i64,
    seed: Seed,
}

impl Anchor {
    #[inline]
    fn diagonal(&self) -> i64 {
        self.query_pos - self.coord
    }

    #[inline]
    fn drift(&self, other: &Anchor) -> i64 {
        (self.diagonal() - other.diagonal()).abs()
    }
}

/// Chains seeds against a fixed linearization.
#[derive(Debug, Clone, Copy)]
pub struct Chainer<'a> {
    linearization: &'a Linearization,
    reward: i64,
}

impl<'a> Chainer<'a> {
    pub fn new(linearization: &'a Linearization, reward: i64) -> Self {
        Chainer {
            linearization,
            reward,
        }
    }

    fn anchors(&self, seeds: &[Seed]) -> Result<Vec<Anchor>> {
        let mut anchors = seeds
            .iter()
            .map(|&seed| {
                let dist = self
                    .linearization
                    .distance(seed.node)
                    .ok_or(PangenomeError::UnknownNode(seed.node))?;
                Ok(Anchor {
                    query_pos: seed.query_pos as i64,
                    coord: (dist + seed.offset) as i64,
                    seed,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        anchors.sort_unstable();
        Ok(anchors)
    }

    /// Select the highest-scoring chain.
    ///
    /// `dp[i]` is the best score of a chain ending at anchor `i`:
    /// either `reward` on its own, or `reward + dp[j] - drift(i, j)`
    /// for an earlier anchor `j`. Ties keep the earlier choice, so a
    /// fresh start beats an equally good extension, and the lowest
    /// `j` wins among extensions. The chain ends at the first anchor
    /// with the highest score.
    pub fn chain(&self, seeds: &[Seed]) -> Result<Chain> {
        let anchors = self.anchors(seeds)?;
        if anchors.is_empty() {
            return Ok(Chain::default());
        }

        let mut dp: Vec<i64> = Vec::with_capacity(anchors.len());
        let mut prev: Vec<Option<usize>> = Vec::with_capacity(anchors.len());

        for (i, anchor) in anchors.iter().enumerate() {
            let mut best = self.reward;
            let mut best_prev = None;
            for (j, earlier) in anchors[..i].iter().enumerate() {
                let score = self.reward + dp[j] - anchor.drift(earlier);
                if score > best {
                    best = score;
                    best_prev = Some(j);
                }
            }
            dp.push(best);
            prev.push(best_prev);
        }

        let mut end = 0;
        for (i, &score) in dp.iter().enumerate() {
            if score > dp[end] {
                end = i;
            }
        }

        let mut seeds = Vec::new();
        let mut cur = Some(end);
        while let Some(i) = cur {
            seeds.push(anchors[i].seed);
            cur = prev[i];
        }
        seeds.reverse();

        debug!(
            "chained {} of {} seeds, score {}",
            seeds.len(),
            anchors.len(),
            dp[end]
        );

        Ok(Chain {
            seeds,
            score: dp[end],
        })
    }
}

/// Chain `seeds` against `linearization`, awarding `reward` per seed.
pub fn chain(
    linearization: &Linearization,
    reward: i64,
    seeds: &[Seed],
) -> Result<Chain> {
    Chainer::new(linearization, reward).chain(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    use quickcheck::quickcheck;

    use crate::{
        algorithms::linearize,
        config::Aggregation,
        handle::Edge,
        hashgraph::HashGraph,
        mutablehandlegraph::*,
    };

    fn linear(seqs: &[&[u8]]) -> Linearization {
        let mut graph = HashGraph::new();
        let handles: Vec<_> =
            seqs.iter().map(|seq| graph.append_handle(seq)).collect();
        for w in handles.windows(2) {
            graph.create_edge(Edge(w[0], w[1]));
        }
        linearize(&graph, Aggregation::Max).unwrap()
    }

    #[test]
    fn no_seeds_is_an_empty_chain() {
        let lin = linear(&[b"GATTACA"]);
        let chain = chain(&lin, 10, &[]).unwrap();
        assert!(chain.is_empty());
        assert_eq!(chain.score, 0);
    }

    #[test]
    fn single_seed_scores_reward() {
        let lin = linear(&[b"GATTACA"]);
        let seed = Seed::new(2, 1u64, 2);
        let chain = chain(&lin, 10, &[seed]).unwrap();
        assert_eq!(chain.seeds, vec![seed]);
        assert_eq!(chain.score, 10);
    }

    #[test]
    fn colinear_seeds_across_nodes() {
        // node 2 starts at coordinate 4
        let lin = linear(&[b"GATT", b"ACA"]);
        let a = Seed::new(0, 1u64, 0);
        let b = Seed::new(5, 2u64, 1);
        let chain = chain(&lin, 10, &[b, a]).unwrap();
        assert_eq!(chain.seeds, vec![a, b]);
        assert_eq!(chain.score, 20);
        assert_eq!(chain.nodes(), vec![NodeId(1), NodeId(2)]);
    }

    #[test]
    fn incoherent_seeds_pick_one() {
        let lin = linear(&[b"GATTACA"]);
        let a = Seed::new(0, 1u64, 5);
        let b = Seed::new(5, 1u64, 0);
        let chain = chain(&lin, 10, &[a, b]).unwrap();
        assert_eq!(chain.seeds, vec![a]);
        assert_eq!(chain.score, 10);
    }

    #[test]
    fn drift_is_penalized() {
        let lin = linear(&[b"GATTACAGATTACA"]);
        let a = Seed::new(0, 1u64, 0);
        let b = Seed::new(4, 1u64, 6);
        let chain = chain(&lin, 10, &[a, b]).unwrap();
        assert_eq!(chain.seeds, vec![a, b]);
        assert_eq!(chain.score, 18);
    }

    #[test]
    fn best_chain_skips_outlier() {
        let lin = linear(&[b"GATTACAGATTACAGATTACA"]);
        let seeds = [
            Seed::new(0, 1u64, 0),
            Seed::new(3, 1u64, 3),
            Seed::new(6, 1u64, 19),
            Seed::new(9, 1u64, 9),
        ];
        let chain = chain(&lin, 10, &seeds).unwrap();
        assert_eq!(chain.seeds, vec![seeds[0], seeds[1], seeds[3]]);
        assert_eq!(chain.score, 30);
    }

    #[test]
    fn unknown_node_is_an_error() {
        let lin = linear(&[b"GATTACA"]);
        let err = chain(&lin, 10, &[Seed::new(0, 9u64, 0)]).unwrap_err();
        assert!(matches!(err, PangenomeError::UnknownNode(NodeId(9))));
    }

    quickcheck! {
        fn more_drift_never_scores_higher(q: u8, d: u8) -> bool {
            let lin = linear(&[&[b'A'; 600]]);
            let q = 1 + q as usize;
            let d = d as usize;
            let score = |drift: usize| {
                let seeds =
                    [Seed::new(0, 1u64, 0), Seed::new(q, 1u64, q + drift)];
                chain(&lin, 10, &seeds).map(|c| c.score).unwrap_or(i64::MIN)
            };
            score(d + 1) <= score(d) && score(0) == 20
        }
    }
}
