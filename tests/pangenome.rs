use pangenome::{
    add_sequence,
    algorithms::linearize,
    chain::chain,
    conversion::{gfa_string, parse_gfa},
    handle::{Edge, Handle, NodeId},
    handlegraph::*,
    hashgraph::HashGraph,
    mutablehandlegraph::*,
    pathhandlegraph::*,
    seed::{KmerIndex, Seed},
    Aggregation, Config,
};

use anyhow::Result;
use bstr::ByteSlice;

const REFERENCE: &[u8] = b"GATTACATCCAGT";
const QUERY: &[u8] = b"GATTAAGCCAGT";

fn reference_graph() -> Result<HashGraph> {
    let gfa = "H\tVN:Z:1.0\nS\t1\tGATTACATCCAGT\nP\t1\t1+\t*\n";
    Ok(parse_gfa(gfa.as_bytes())?)
}

fn path_seq(graph: &HashGraph, name: &[u8]) -> Vec<u8> {
    let id = graph.get_path_id(name).unwrap();
    graph.path_sequence(id).unwrap()
}

#[test]
fn scenario_seed_and_chain() -> Result<()> {
    let graph = reference_graph()?;
    let config = Config::new().with_kmer_size(3).with_reward(10);

    let index = KmerIndex::new(&graph, config.kmer_size)?;
    let seeds = index.seeds(QUERY);
    let first = Seed::new(0, 1u64, 0);
    assert!(seeds.contains(&first));

    let lin = linearize(&graph, Aggregation::Max)?;
    assert_eq!(lin.distance(NodeId(1)), Some(0));

    let chain = chain(&lin, config.reward, &seeds)?;
    assert!(chain.seeds.contains(&first));
    assert!(chain.score >= config.reward);
    Ok(())
}

#[test]
fn scenario_add_sequence() -> Result<()> {
    let graph = reference_graph()?;
    let config = Config::default();
    let before = gfa_string(&graph);

    let result = add_sequence(&graph, QUERY, b"query", &config)?;

    assert_eq!(path_seq(&result, b"query").as_bstr(), QUERY.as_bstr());
    assert_eq!(path_seq(&result, b"1").as_bstr(), REFERENCE.as_bstr());
    assert_eq!(gfa_string(&graph), before);

    // the old node is gone, its fragments spell it in order
    assert!(!result.has_node(1u64));
    let ref_id = result.get_path_id(b"1").unwrap();
    let spelled: Vec<u8> = result
        .path_steps(ref_id)
        .unwrap()
        .iter()
        .flat_map(|&h| result.sequence(h))
        .collect();
    assert_eq!(spelled, REFERENCE.to_vec());

    // still a DAG, in both modes
    assert!(linearize(&result, Aggregation::Max).is_ok());
    assert!(linearize(&result, Aggregation::Mean).is_ok());

    // every node is used by some path
    for handle in result.handles() {
        let used = result.path_ids().into_iter().any(|id| {
            result
                .path_steps(id)
                .unwrap()
                .iter()
                .any(|h| h.id() == handle.id())
        });
        assert!(used, "node {} is on no path", handle.id());
    }
    Ok(())
}

#[test]
fn identical_query_changes_nothing_but_paths() -> Result<()> {
    let graph = reference_graph()?;
    let result = add_sequence(&graph, REFERENCE, b"copy", &Config::default())?;

    assert_eq!(result.node_count(), 1);
    assert_eq!(result.edge_count(), 0);
    assert_eq!(path_seq(&result, b"copy"), REFERENCE.to_vec());
    assert_eq!(path_seq(&result, b"1"), REFERENCE.to_vec());

    let id = result.handles().next().unwrap().id();
    assert_eq!(result.sequence(Handle::pack(id, false)), REFERENCE.to_vec());
    Ok(())
}

#[test]
fn several_queries_grow_the_graph() -> Result<()> {
    let mut graph = reference_graph()?;
    let config = Config::default().with_aggregation("mean".parse()?);

    let queries: [(&[u8], &[u8]); 4] = [
        (b"q1", b"GATTAAGCCAGT"),
        (b"q2", b"GATTACATCCAGTT"),
        (b"q3", b"CCGATTACAGT"),
        (b"q4", b"GATTAAGCCAGT"),
    ];

    for (name, query) in queries.iter() {
        graph = add_sequence(&graph, query, name, &config)?;
        assert!(linearize(&graph, config.aggregation).is_ok());
    }

    assert_eq!(path_seq(&graph, b"1"), REFERENCE.to_vec());
    for (name, query) in queries.iter() {
        assert_eq!(path_seq(&graph, name), query.to_vec());
    }

    let reread = parse_gfa(gfa_string(&graph).as_bytes())?;
    for (name, query) in queries.iter() {
        assert_eq!(path_seq(&reread, name), query.to_vec());
    }
    Ok(())
}

#[test]
fn reverse_edge_does_not_close_a_cycle() -> Result<()> {
    let mut graph = HashGraph::new();
    let a = graph.append_handle(b"GATTACA");
    let b = graph.append_handle(b"CCTGG");
    graph.create_edge(Edge(b.flip(), a));

    let config = Config::default();
    let result = add_sequence(&graph, b"GATTACACCTGG", b"q", &config)?;
    assert!(linearize(&result, Aggregation::Max).is_ok());
    assert_eq!(path_seq(&result, b"q"), b"GATTACACCTGG".to_vec());

    let again = add_sequence(&result, b"GATTACACCTGG", b"r", &config)?;
    assert!(linearize(&again, Aggregation::Max).is_ok());
    assert_eq!(path_seq(&again, b"r"), b"GATTACACCTGG".to_vec());
    Ok(())
}
