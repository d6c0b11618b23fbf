/*!
An incremental pangenome graph.

A pangenome graph stores many related sequences as shared nodes,
edges between them, and named paths spelling each sequence. New
sequences are added one at a time: each is seeded against the graph,
chained, aligned, and spliced in as a new path, after which runs of
nodes that are always traversed together are merged back.

# Overview

The graph interface follows the handlegraph model, split into three
groups of traits:

* [`handlegraph`] is for immutable access to the nodes and edges of a graph
* [`mutablehandlegraph`] is for mutable access to nodes and edges
* [`pathhandlegraph`] is for both immutable and mutable access to the paths embedded in a graph

[`HashGraph`](hashgraph::HashGraph) implements all of them.

# `Handle`s and `NodeId`s

The core types, used all over the various traits, are defined in [`handle`]:

* [`NodeId`](handle::NodeId) is a newtype used as a node identifier
* [`Handle`](handle::Handle) represents a specific orientation of a node
* [`Edge`](handle::Edge) is a newtype for edges in a specific order

# Adding sequences

* [`seed`] finds exact k-mer matches between a query and the graph
* [`algorithms::linearize`] places every node on a single axis
* [`chain`] picks the best colinear run of seeds on that axis
* [`align`] turns a chain into a base-level edit script
* [`pangenome`] splices an edit script into the graph, and runs the
  whole pipeline with [`add_sequence`](pangenome::add_sequence)

# Misc.

* [`conversion`] reads and writes GFA
* [`config`] holds the parameters of the pipeline
* [`error`] has the crate-wide error type

*/

pub mod error;

pub mod config;

pub mod handle;

pub mod handlegraph;
pub mod mutablehandlegraph;
pub mod pathhandlegraph;

pub mod hashgraph;

pub mod algorithms;
pub mod conversion;

pub mod align;
pub mod chain;
pub mod pangenome;
pub mod seed;

pub use self::config::{Aggregation, Config};
pub use self::error::{PangenomeError, Result};
pub use self::hashgraph::HashGraph;
pub use self::pangenome::{add_sequence, incorporate};
