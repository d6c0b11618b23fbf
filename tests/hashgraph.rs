use pangenome::{
    handle::{Direction, Edge, Handle, NodeId},
    handlegraph::*,
    hashgraph::HashGraph,
    mutablehandlegraph::*,
    pathhandlegraph::*,
};

static H1: Handle = Handle::from_integer(2);
static H2: Handle = Handle::from_integer(4);
static H3: Handle = Handle::from_integer(6);
static H4: Handle = Handle::from_integer(8);
static H5: Handle = Handle::from_integer(10);
static H6: Handle = Handle::from_integer(12);

fn read_test_gfa() -> HashGraph {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/bubbles.gfa");
    pangenome::conversion::read_gfa(path).unwrap()
}

fn path_graph() -> HashGraph {
    let mut graph = HashGraph::new();
    let h1 = graph.create_handle(b"1", 1u64);
    let h2 = graph.create_handle(b"2", 2u64);
    let h3 = graph.create_handle(b"3", 3u64);
    let h4 = graph.create_handle(b"4", 4u64);
    let h5 = graph.create_handle(b"5", 5u64);
    let h6 = graph.create_handle(b"6", 6u64);

    /*
    edges
    1  -> 2 -> 5 -> 6
      \-> 3 -> 4 /
     */
    graph.create_edge(Edge(h1, h2));
    graph.create_edge(Edge(h2, h5));
    graph.create_edge(Edge(h5, h6));

    graph.create_edge(Edge(h1, h3));
    graph.create_edge(Edge(h3, h4));
    graph.create_edge(Edge(h4, h6));

    graph
}

#[test]
fn can_create_handles() {
    let mut graph = HashGraph::new();
    let h1 = graph.append_handle(b"CAAATAAG");
    let h2 = graph.append_handle(b"A");
    let h3 = graph.append_handle(b"G");

    let n1 = graph.get_node(&h1.id()).unwrap();
    let n2 = graph.get_node(&h2.id()).unwrap();
    let n3 = graph.get_node(&h3.id()).unwrap();

    assert_eq!(u64::from(h1.id()), 1);
    assert_eq!(u64::from(h3.id()), 3);

    assert_eq!(n1.sequence.as_slice(), b"CAAATAAG");
    assert_eq!(n2.sequence.as_slice(), b"A");
    assert_eq!(n3.sequence.as_slice(), b"G");

    assert_eq!(graph.sequence(h1.flip()), b"CTTATTTG".to_vec());
    assert_eq!(graph.subsequence(h1, 2, 3), b"AAT".to_vec());
    assert_eq!(graph.total_length(), 10);
    assert_eq!(graph.min_node_id(), NodeId(1));
    assert_eq!(graph.max_node_id(), NodeId(3));
}

#[test]
fn can_create_edges() {
    let mut graph = HashGraph::new();
    let h1 = graph.append_handle(b"CAAATAAG");
    let h2 = graph.append_handle(b"A");
    let h3 = graph.append_handle(b"G");
    let h4 = graph.append_handle(b"TTG");

    graph.create_edge(Edge(h1, h2));
    graph.create_edge(Edge(h1, h3));
    graph.create_edge(Edge(h2, h4));
    graph.create_edge(Edge(h3, h4));

    assert!(graph.has_edge(h1, h2));
    assert!(graph.has_edge(h1, h3));
    assert!(!graph.has_edge(h2, h1));

    assert_eq!(graph.degree(h1, Direction::Right), 2);
    assert_eq!(graph.degree(h1, Direction::Left), 0);
    assert_eq!(graph.degree(h4, Direction::Left), 2);

    let mut lefts: Vec<_> = graph.neighbors(h4, Direction::Left).collect();
    lefts.sort();
    assert_eq!(lefts, vec![h2, h3]);
}

#[test]
fn degree_is_correct() {
    let graph = read_test_gfa();

    let h4 = Handle::pack(4u64, false);
    let h7 = Handle::pack(7u64, false);

    assert_eq!(graph.degree(h4, Direction::Right), 2);
    assert_eq!(graph.degree(h4, Direction::Left), 2);
    assert_eq!(graph.degree(h7, Direction::Right), 2);
    assert_eq!(graph.degree(h7, Direction::Left), 2);
    assert_eq!(graph.degree(h7.flip(), Direction::Left), 0);
}

#[test]
fn graph_has_edge() {
    let graph = read_test_gfa();

    let h16 = Handle::from_integer(16);
    let h18 = Handle::from_integer(18);

    assert_eq!(h16.id(), NodeId(8));
    assert!(graph.has_edge(h16, h18));
    assert!(!graph.has_edge(h18.flip(), h16.flip()));
}

#[test]
fn graph_neighbors_iter() {
    let mut graph = path_graph();

    graph.create_edge(Edge(H1, H4));
    graph.create_edge(Edge(H1, H6));

    let mut neighbors: Vec<_> =
        graph.neighbors(H1, Direction::Right).collect();
    neighbors.sort();

    assert_eq!(neighbors, vec![H2, H3, H4, H6]);
    assert_eq!(graph.neighbors(H6, Direction::Right).next(), None);
}

#[test]
fn graph_handles_iter() {
    let graph = path_graph();

    let nodes: Vec<_> = vec![H1, H2, H3, H4, H5, H6]
        .into_iter()
        .map(|x| x.id())
        .collect();

    let mut iter_nodes: Vec<NodeId> = vec![];

    for h in graph.handles() {
        assert!(!h.is_reverse());
        iter_nodes.push(h.id())
    }

    assert!(iter_nodes.iter().all(|n| graph.get_node(n).is_some()));
    assert!(nodes.iter().all(|n| iter_nodes.contains(n)));
    assert_eq!(graph.sorted_node_ids(), nodes);
}

#[test]
fn graph_edges_iter() {
    let mut graph = path_graph();

    graph.create_edge(Edge(H1, H4));
    graph.create_edge(Edge(H1, H6));

    graph.create_edge(Edge(H4, H2));
    graph.create_edge(Edge(H6, H2));

    graph.create_edge(Edge(H3, H5));

    let mut edges_found: Vec<_> = graph.edges().collect();

    edges_found.sort();

    let mut edges: Vec<_> = vec![
        Edge(H1, H2),
        Edge(H1, H3),
        Edge(H1, H4),
        Edge(H1, H6),
        Edge(H2, H5),
        Edge(H4, H2),
        Edge(H6, H2),
        Edge(H3, H4),
        Edge(H3, H5),
        Edge(H4, H6),
        Edge(H5, H6),
    ];

    edges.sort();

    assert_eq!(edges, edges_found);
    assert_eq!(graph.sorted_edges(), edges);
}

#[test]
fn append_path_steps() {
    let mut graph = path_graph();

    // Add a path 3 -> 5
    let p1 = graph.create_path(b"path-1", vec![]);
    graph.path_append_step(p1, H3);
    graph.path_append_step(p1, H5);

    // Add another path 1 -> 3 -> 4 -> 6
    let p2 = graph.create_path(b"path-2", vec![H1]);
    assert_eq!(graph.path_append_step(p2, H3), Some(1));
    assert_eq!(graph.path_append_step(p2, H4), Some(2));
    graph.path_append_step(p2, H6);

    assert_eq!(graph.path_count(), 2);
    assert_eq!(graph.path_ids(), vec![p1, p2]);
    assert_eq!(graph.get_path_id(b"path-2"), Some(p2));
    assert_eq!(graph.get_path_name(p1), Some(&b"path-1"[..]));

    assert_eq!(graph.path_steps(p1), Some(&[H3, H5][..]));
    assert_eq!(graph.path_len(p2), Some(4));
    assert_eq!(graph.path_sequence(p2), Some(b"1346".to_vec()));

    graph.with_paths_mut(|_, steps| steps.retain(|&h| h != H3));
    assert_eq!(graph.path_sequence(p1), Some(b"5".to_vec()));
    assert_eq!(graph.path_sequence(p2), Some(b"146".to_vec()));

    assert!(graph.destroy_path(p1));
    assert!(!graph.destroy_path(p1));
    assert_eq!(graph.path_append_step(p1, H1), None);
    assert_eq!(graph.path_count(), 1);
}

#[test]
fn removing_nodes_leaves_paths() {
    let mut graph = read_test_gfa();
    let x = graph.get_path_id(b"x").unwrap();
    let before = graph.path_steps(x).unwrap().to_vec();

    assert!(graph.remove_handle(Handle::pack(4u64, false)));
    assert_eq!(graph.node_count(), 8);
    assert_eq!(graph.edge_count(), 7);
    assert_eq!(graph.path_steps(x).unwrap(), before.as_slice());
}
