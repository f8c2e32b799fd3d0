//! Structural invariants of generated maps
//!
//! These tests generate a thousand maps across varied parameter sets and
//! verify the properties the rest of a run depends on:
//! 1. Every node is reachable from the start
//! 2. The boss is the unique sink and every other node keeps moving forward
//! 3. Edges only ever advance the layer
//! 4. Exactly one shop and one rest room, both in middle layers
//! 5. A seed reproduces its map exactly

use poreia::{BuildError, GeneratorConfig, MapGraph, MapGraphBuilder, NodeKind};
use std::collections::VecDeque;

/// Parameter sets covering the default shape, wide and narrow layers,
/// stingy and generous connection distances
fn varied_configs() -> Vec<GeneratorConfig> {
    vec![
        GeneratorConfig::default(),
        GeneratorConfig {
            layer_count: 4,
            min_nodes_per_layer: 1,
            max_nodes_per_layer: 2,
            shop_layer_range: (1, 1),
            rest_layer_range: (2, 3),
            ..GeneratorConfig::default()
        },
        GeneratorConfig {
            layer_count: 12,
            min_nodes_per_layer: 2,
            max_nodes_per_layer: 6,
            max_connection_distance: 150.0,
            shop_layer_range: (2, 5),
            rest_layer_range: (7, 10),
            ..GeneratorConfig::default()
        },
        GeneratorConfig {
            layer_count: 8,
            min_nodes_per_layer: 4,
            max_nodes_per_layer: 4,
            max_connection_distance: 80.0,
            min_vertical_gap: 60.0,
            max_vertical_gap: 90.0,
            shop_layer_range: (1, 3),
            rest_layer_range: (4, 6),
            ..GeneratorConfig::default()
        },
        GeneratorConfig {
            layer_count: 10,
            min_nodes_per_layer: 3,
            max_nodes_per_layer: 5,
            max_connection_distance: 10_000.0,
            layer_spacing: 100.0,
            ..GeneratorConfig::default()
        },
    ]
}

/// Runs `check` against 1000 graphs: 5 parameter sets x 200 seeds
fn for_each_generated_graph(check: impl Fn(&MapGraph)) {
    for (config_index, config) in varied_configs().into_iter().enumerate() {
        let builder = MapGraphBuilder::new(config);
        for seed in 0..200u64 {
            let graph = builder
                .generate(seed)
                .unwrap_or_else(|e| panic!("config {config_index} seed {seed}: {e}"));
            check(&graph);
        }
    }
}

fn reachable_count(graph: &MapGraph) -> usize {
    let mut seen = vec![false; graph.len()];
    let mut queue = VecDeque::from([graph.start()]);
    seen[graph.start().index()] = true;
    let mut count = 1;
    while let Some(id) = queue.pop_front() {
        for &next in graph.successors(id).unwrap() {
            if !seen[next.index()] {
                seen[next.index()] = true;
                count += 1;
                queue.push_back(next);
            }
        }
    }
    count
}

#[test]
fn every_node_is_reachable_from_start() {
    for_each_generated_graph(|graph| {
        assert_eq!(reachable_count(graph), graph.len());
    });
}

#[test]
fn boss_is_the_unique_sink() {
    for_each_generated_graph(|graph| {
        for node in graph.nodes() {
            if node.id() == graph.boss() {
                assert_eq!(node.out_degree(), 0);
                assert_eq!(node.kind(), NodeKind::Boss);
            } else {
                assert!(node.out_degree() >= 1, "node {} is a dead end", node.id());
            }
        }
    });
}

#[test]
fn every_non_start_node_has_an_entrance() {
    for_each_generated_graph(|graph| {
        let degrees = graph.in_degrees();
        assert_eq!(degrees[graph.start().index()], 0);
        for node in graph.nodes() {
            if node.id() != graph.start() {
                assert!(
                    degrees[node.id().index()] >= 1,
                    "node {} has no entrance",
                    node.id()
                );
            }
        }
    });
}

#[test]
fn edges_always_advance_the_layer() {
    for_each_generated_graph(|graph| {
        for (from, to) in graph.edges() {
            let from_layer = graph.node(from).unwrap().layer();
            let to_layer = graph.node(to).unwrap().layer();
            assert!(
                to_layer > from_layer,
                "edge {from} -> {to} goes from layer {from_layer} to {to_layer}"
            );
        }
    });
}

#[test]
fn exactly_one_shop_and_one_rest_in_middle_layers() {
    for_each_generated_graph(|graph| {
        let boss_layer = graph.node(graph.boss()).unwrap().layer();
        for kind in [NodeKind::Shop, NodeKind::Rest] {
            let placed: Vec<_> = graph.nodes().filter(|n| n.kind() == kind).collect();
            assert_eq!(placed.len(), 1, "{kind} count");
            let layer = placed[0].layer();
            assert!(layer > 0 && layer < boss_layer, "{kind} in layer {layer}");
        }
    });
}

#[test]
fn generator_never_emits_elites() {
    // Elite rounds exist in the dispatcher's taxonomy but the generator
    // only places combat, shop, rest and the boss.
    for_each_generated_graph(|graph| {
        assert_eq!(graph.nodes().filter(|n| n.kind() == NodeKind::Elite).count(), 0);
    });
}

#[test]
fn generated_graphs_pass_validate() {
    for_each_generated_graph(|graph| {
        graph.validate().unwrap();
    });
}

#[test]
fn degenerate_single_node_layers_form_a_chain() {
    let config = GeneratorConfig {
        layer_count: 3,
        min_nodes_per_layer: 1,
        max_nodes_per_layer: 1,
        shop_layer_range: (1, 1),
        rest_layer_range: (2, 2),
        ..GeneratorConfig::default()
    };
    let builder = MapGraphBuilder::new(config);

    for seed in 0..50u64 {
        let graph = builder.generate(seed).unwrap();
        assert_eq!(graph.len(), 4);
        graph.validate().unwrap();

        // start -> n1 -> n2 -> boss with no forks anywhere.
        let mut current = graph.start();
        for _ in 0..3 {
            let successors = graph.successors(current).unwrap();
            assert_eq!(successors.len(), 1);
            current = successors[0];
        }
        assert_eq!(current, graph.boss());
    }
}

#[test]
fn identical_seed_reproduces_identical_graph() {
    let builder = MapGraphBuilder::new(GeneratorConfig::default());
    for seed in [0u64, 1, 42, 0xDEAD_BEEF] {
        let first = builder.generate(seed).unwrap();
        let second = builder.generate(seed).unwrap();
        assert_eq!(first, second, "seed {seed} did not reproduce its map");
    }
}

#[test]
fn different_seeds_usually_differ() {
    let builder = MapGraphBuilder::new(GeneratorConfig::default());
    let baseline = builder.generate(0).unwrap();
    let differing = (1..=20u64)
        .filter(|&seed| builder.generate(seed).unwrap() != baseline)
        .count();
    assert!(differing >= 19, "only {differing} of 20 seeds produced a new map");
}

#[test]
fn degenerate_parameters_are_construction_errors() {
    let builder = MapGraphBuilder::new(GeneratorConfig {
        min_nodes_per_layer: 0,
        ..GeneratorConfig::default()
    });
    assert!(matches!(
        builder.generate(1),
        Err(BuildError::EmptyLayer { .. })
    ));

    let builder = MapGraphBuilder::new(GeneratorConfig {
        shop_layer_range: (0, 4),
        ..GeneratorConfig::default()
    });
    assert!(matches!(
        builder.generate(1),
        Err(BuildError::SpecialRangeOutOfBounds { .. })
    ));
}
