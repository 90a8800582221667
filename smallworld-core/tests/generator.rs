//! Tests for the connected small-world generator.

mod common;

use common::{assert_simple_graph, ring_distance};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rstest::{fixture, rstest};
use smallworld_core::{
    GenerationParameters, Graph, SmallWorldError, SmallWorldGenerator, generate,
};
use smallworld_test_support::tracing::record;
use tracing::Level;

/// Seeds swept when looking for an attempt sequence with a particular shape.
/// With `k = 2` and `p = 1` on 200 nodes roughly a third of attempts are
/// connected, so a sweep this wide always contains both outcomes.
const SEED_SWEEP: std::ops::Range<u64> = 0..32;

#[fixture]
fn sparse_shortcuts() -> GenerationParameters {
    GenerationParameters::new(200, 2, 1.0)
}

#[rstest]
fn twenty_node_scenario_is_connected() {
    let graph = generate(20, 4, 0.25, 50, Some(42)).expect("generation must succeed");
    assert_eq!(graph.node_count(), 20);
    assert_eq!(graph.edge_count(), 40);
    assert!(graph.is_connected());
    assert_eq!(graph.component_count(), 1);
    assert_simple_graph(&graph);
}

#[rstest]
fn five_node_cycle_needs_one_try() {
    let graph = generate(5, 2, 0.0, 1, Some(1)).expect("the cycle is connected");
    let cycle = Graph::try_from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)])
        .expect("cycle edges are valid");
    assert_eq!(graph, cycle);
    assert!(graph.nodes().all(|node| graph.degree(node) == 2));
}

#[rstest]
fn degree_not_below_node_count_is_rejected() {
    let err = generate(10, 12, 0.25, 10, None).expect_err("k >= n must be rejected");
    assert!(matches!(err, SmallWorldError::InvalidParameters { .. }));
}

#[rstest]
#[case::zero_degree(10, 0)]
#[case::odd_degree_one(10, 1)]
fn ring_without_edges_is_rejected(#[case] node_count: usize, #[case] degree: usize) {
    let err = generate(node_count, degree, 0.5, 10, Some(1)).expect_err("must be rejected");
    assert!(matches!(err, SmallWorldError::InvalidParameters { .. }));
}

#[rstest]
fn single_node_graph_is_trivially_connected() {
    let graph = generate(1, 0, 0.7, 1, Some(5)).expect("a single node is connected");
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.is_connected());
}

#[rstest]
#[case(12, 2)]
#[case(40, 4)]
#[case(41, 5)]
#[case(101, 10)]
fn zero_probability_yields_ring_lattice(#[case] node_count: usize, #[case] degree: usize) {
    let graph = generate(node_count, degree, 0.0, 1, Some(8)).expect("rings are connected");
    let half_degree = degree / 2;
    assert_eq!(graph.edge_count(), node_count * half_degree);
    assert!(
        graph
            .edges()
            .all(|(left, right)| ring_distance(node_count, left, right) <= half_degree)
    );
    assert!(graph.nodes().all(|node| graph.degree(node) == 2 * half_degree));
}

#[rstest]
#[case(20, 4, 0.25)]
#[case(300, 6, 0.1)]
#[case(2000, 4, 0.25)]
fn identical_seeds_give_identical_graphs(
    #[case] node_count: usize,
    #[case] degree: usize,
    #[case] probability: f64,
) {
    let first = generate(node_count, degree, probability, 100, Some(1234)).expect("first run");
    let second = generate(node_count, degree, probability, 100, Some(1234)).expect("second run");
    assert_eq!(first, second);
    assert_eq!(
        first.edges().collect::<Vec<_>>(),
        second.edges().collect::<Vec<_>>()
    );
}

#[rstest]
fn different_seeds_explore_different_graphs() {
    let graphs: Vec<Graph> = (0..4)
        .map(|seed| generate(100, 4, 0.5, 100, Some(seed)).expect("generation must succeed"))
        .collect();
    assert!(graphs.windows(2).any(|pair| pair[0] != pair[1]));
}

#[rstest]
fn caller_supplied_stream_matches_seeded_generation() {
    let params = GenerationParameters::new(60, 4, 0.3).with_seed(77);
    let generator = SmallWorldGenerator::new(params).expect("parameters are valid");
    let seeded = generator.generate().expect("seeded generation");
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let streamed = generator
        .generate_with_rng(&mut rng)
        .expect("streamed generation");
    assert_eq!(seeded, streamed);
}

#[rstest]
fn unseeded_generation_still_satisfies_invariants() {
    let graph = generate(150, 6, 0.2, 100, None).expect("generation must succeed");
    assert_eq!(graph.node_count(), 150);
    assert_eq!(graph.edge_count(), 450);
    assert!(graph.is_connected());
    assert_simple_graph(&graph);
}

#[rstest]
fn exhausted_budget_reports_parameters_and_tries(sparse_shortcuts: GenerationParameters) {
    let failure = SEED_SWEEP
        .filter_map(|seed| {
            let params = sparse_shortcuts.clone().with_max_tries(1).with_seed(seed);
            SmallWorldGenerator::new(params)
                .expect("parameters are valid")
                .generate()
                .err()
        })
        .next()
        .expect("some single-attempt run must be disconnected");

    match failure {
        SmallWorldError::GenerationExhausted { parameters, tries } => {
            assert_eq!(tries, 1);
            assert_eq!(parameters.node_count(), 200);
            assert_eq!(parameters.neighbour_degree(), 2);
            assert_eq!(parameters.max_tries(), 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn retries_continue_on_the_same_stream(sparse_shortcuts: GenerationParameters) {
    let mut retried = false;
    for seed in SEED_SWEEP {
        let generator = SmallWorldGenerator::new(sparse_shortcuts.clone().with_seed(seed))
            .expect("parameters are valid");
        let (result, layer) = record(|| generator.generate());
        let graph = result.expect("100 attempts must find a connected graph");
        assert!(graph.is_connected());
        assert_eq!(graph.edge_count(), 200);

        let span = layer.span("core.generate").expect("core.generate span");
        let tries: usize = span
            .field("tries")
            .expect("tries must be recorded")
            .parse()
            .expect("tries is numeric");
        if tries > 1 {
            retried = true;
            assert!(layer.has_event(Level::DEBUG, "graph is disconnected, regenerating"));
        }
    }
    assert!(retried, "at least one seed must need a second attempt");
}

#[rstest]
fn generation_records_core_tracing() {
    let generator = SmallWorldGenerator::new(
        GenerationParameters::new(20, 4, 0.25)
            .with_max_tries(50)
            .with_seed(42),
    )
    .expect("parameters are valid");
    let (result, layer) = record(|| generator.generate());
    result.expect("generation must succeed");

    let span = layer.span("core.generate").expect("core.generate span");
    assert_eq!(span.field("node_count"), Some("20"));
    assert_eq!(span.field("neighbour_degree"), Some("4"));
    assert_eq!(span.field("rewire_probability"), Some("0.25"));
    assert_eq!(span.field("max_tries"), Some("50"));
    assert!(span.field("tries").is_some());
    assert!(layer.has_event(Level::INFO, "connected small-world graph generated"));
}

#[rstest]
fn exhaustion_logs_warning(sparse_shortcuts: GenerationParameters) {
    let exhausted = SEED_SWEEP.any(|seed| {
        let generator =
            SmallWorldGenerator::new(sparse_shortcuts.clone().with_max_tries(1).with_seed(seed))
                .expect("parameters are valid");
        let (result, layer) = record(|| generator.generate());
        if result.is_ok() {
            return false;
        }
        assert!(layer.has_event(
            Level::WARN,
            "retry budget exhausted without a connected graph"
        ));
        true
    });
    assert!(exhausted);
}
