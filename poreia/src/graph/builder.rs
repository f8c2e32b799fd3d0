//! Procedural map generation
//!
//! Synthesizes a [`MapGraph`] from a handful of shape parameters and a
//! seeded random source. Generation runs in fixed phases:
//!
//! 1. Size every layer (layer 0 always holds just the start node)
//! 2. Place nodes vertically: even spacing plus a bounded jitter
//! 3. Draw the shop and rest layers and retype each layer's middle node
//! 4. Append the boss node one layer past the ordinary columns
//! 5. Connect each node to the 1-3 vertically nearest nodes of the next layer
//! 6. Repair connectivity so every node has an entrance and an exit
//!
//! The repair phase is deliberately order-dependent: it runs only after all
//! forward edges are assigned, never interleaved with them, and performs no
//! random draws. That keeps the reachability guarantee independent of the
//! edge lottery, and keeps generation reproducible per seed.

use super::error::{BuildError, BuildResult};
use super::map::{MapGraph, Node, NodeKind};
use super::NodeId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Bound of the random vertical offset applied to each node's base position
/// so connections are not perfectly straight
const VERTICAL_JITTER: f32 = 30.0;

/// Shape parameters for map generation
///
/// The defaults reproduce the standard run layout: ten ordinary layers of
/// 3-4 nodes, a shop somewhere in layers 2-4 and a rest room in layers 5-7.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of ordinary layers, including the start layer
    pub layer_count: u32,
    /// Minimum nodes per layer (layers past the first)
    pub min_nodes_per_layer: u32,
    /// Maximum nodes per layer (layers past the first)
    pub max_nodes_per_layer: u32,
    /// Horizontal distance between adjacent layers
    pub layer_spacing: f32,
    /// Minimum vertical distance between adjacent nodes of a layer
    pub min_vertical_gap: f32,
    /// Maximum vertical distance between adjacent nodes of a layer
    pub max_vertical_gap: f32,
    /// Largest vertical distance an ordinary forward edge may span
    pub max_connection_distance: f32,
    /// Inclusive layer range the shop may land in
    pub shop_layer_range: (u32, u32),
    /// Inclusive layer range the rest room may land in
    pub rest_layer_range: (u32, u32),
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            layer_count: 10,
            min_nodes_per_layer: 3,
            max_nodes_per_layer: 4,
            layer_spacing: 250.0,
            min_vertical_gap: 100.0,
            max_vertical_gap: 200.0,
            max_connection_distance: 300.0,
            shop_layer_range: (2, 4),
            rest_layer_range: (5, 7),
        }
    }
}

impl GeneratorConfig {
    /// Checks the configuration for degenerate values
    ///
    /// Called by the builder before any node is created; a failing
    /// configuration never produces a partial map.
    pub fn validate(&self) -> BuildResult<()> {
        if self.layer_count < 2 {
            return Err(BuildError::TooFewLayers {
                layer_count: self.layer_count,
            });
        }
        if self.min_nodes_per_layer == 0 || self.min_nodes_per_layer > self.max_nodes_per_layer {
            return Err(BuildError::EmptyLayer {
                min: self.min_nodes_per_layer,
                max: self.max_nodes_per_layer,
            });
        }

        let last = self.layer_count - 1;
        check_special_range("shop", self.shop_layer_range, last)?;
        check_special_range("rest", self.rest_layer_range, last)?;

        let (shop_lo, shop_hi) = self.shop_layer_range;
        let (rest_lo, rest_hi) = self.rest_layer_range;
        if shop_lo <= rest_hi && rest_lo <= shop_hi {
            return Err(BuildError::OverlappingSpecialRanges {
                shop_lo,
                shop_hi,
                rest_lo,
                rest_hi,
            });
        }
        Ok(())
    }
}

fn check_special_range(room: &'static str, (lo, hi): (u32, u32), last: u32) -> BuildResult<()> {
    if lo > hi {
        return Err(BuildError::InvertedSpecialRange { room, lo, hi });
    }
    if lo < 1 || hi > last {
        return Err(BuildError::SpecialRangeOutOfBounds { room, lo, hi, last });
    }
    Ok(())
}

/// Generates [`MapGraph`] values satisfying every map invariant
///
/// The builder is stateless between calls: the same configuration and seed
/// always reproduce the same graph, which is what allows a host to rebuild
/// a run from its seed.
///
/// # Example
///
/// ```
/// use poreia::{GeneratorConfig, MapGraphBuilder};
///
/// let builder = MapGraphBuilder::new(GeneratorConfig::default());
/// let graph = builder.generate(42).unwrap();
/// assert_eq!(graph, builder.generate(42).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct MapGraphBuilder {
    config: GeneratorConfig,
}

impl MapGraphBuilder {
    /// Creates a builder for the given configuration
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the builder's configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a map from a seed
    pub fn generate(&self, seed: u64) -> BuildResult<MapGraph> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate_with(&mut rng)
    }

    /// Generates a map drawing from a caller-owned random source
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> BuildResult<MapGraph> {
        self.config.validate()?;
        let cfg = &self.config;

        let shop_layer = rng.gen_range(cfg.shop_layer_range.0..=cfg.shop_layer_range.1);
        let rest_layer = rng.gen_range(cfg.rest_layer_range.0..=cfg.rest_layer_range.1);
        debug!(shop_layer, rest_layer, "special room layers drawn");

        let mut nodes: Vec<Node> = Vec::new();
        let mut layers: Vec<Vec<NodeId>> = Vec::with_capacity(cfg.layer_count as usize);

        for layer in 0..cfg.layer_count {
            let count = if layer == 0 {
                1
            } else {
                rng.gen_range(cfg.min_nodes_per_layer..=cfg.max_nodes_per_layer) as usize
            };
            let x = layer as f32 * cfg.layer_spacing;
            let mut ids = Vec::with_capacity(count);
            for (slot, y) in self.vertical_positions(count, rng).into_iter().enumerate() {
                let id = NodeId::new(nodes.len());
                let kind = kind_for(layer, slot, count, shop_layer, rest_layer);
                nodes.push(Node::new(id, layer, (x, y), kind));
                ids.push(id);
            }
            layers.push(ids);
        }

        let boss = NodeId::new(nodes.len());
        let boss_x = cfg.layer_count as f32 * cfg.layer_spacing;
        nodes.push(Node::new(
            boss,
            cfg.layer_count,
            (boss_x, 0.0),
            NodeKind::Boss,
        ));
        let start = layers[0][0];

        self.connect_forward(&mut nodes, &layers, boss, rng);
        self.repair_connectivity(&mut nodes, &layers, boss);

        let graph = MapGraph::from_parts(nodes, start, boss);
        debug_assert!(graph.validate().is_ok());
        debug!(nodes = graph.len(), "map generated");
        Ok(graph)
    }

    /// Evenly spaced Y positions around zero, each nudged by a bounded jitter
    fn vertical_positions<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<f32> {
        let gap = (self.config.min_vertical_gap + self.config.max_vertical_gap) / 2.0;
        let total_height = count.saturating_sub(1) as f32 * gap;
        let first = -total_height / 2.0;
        (0..count)
            .map(|slot| first + slot as f32 * gap + rng.gen_range(-VERTICAL_JITTER..=VERTICAL_JITTER))
            .collect()
    }

    /// Connects every node to the 1-3 vertically nearest nodes of the next
    /// layer, skipping candidates beyond the connection distance
    fn connect_forward<R: Rng>(
        &self,
        nodes: &mut [Node],
        layers: &[Vec<NodeId>],
        boss: NodeId,
        rng: &mut R,
    ) {
        for (layer_index, layer) in layers.iter().enumerate() {
            let targets: &[NodeId] = match layers.get(layer_index + 1) {
                Some(next) => next,
                None => std::slice::from_ref(&boss),
            };

            for &from in layer {
                let from_y = nodes[from.index()].position().1;
                let mut candidates: Vec<(NodeId, f32)> = targets
                    .iter()
                    .map(|&to| (to, (nodes[to.index()].position().1 - from_y).abs()))
                    .filter(|&(_, distance)| distance <= self.config.max_connection_distance)
                    .collect();
                // Stable sort: equal distances keep their layer order.
                candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

                let wanted = rng.gen_range(1..=3usize).min(candidates.len());
                for &(to, _) in candidates.iter().take(wanted) {
                    nodes[from.index()].push_outgoing(to);
                }
            }
        }
    }

    /// Post-hoc repair: gives every non-start node an entrance and every
    /// non-boss node an exit, ignoring the connection distance cap
    fn repair_connectivity(&self, nodes: &mut [Node], layers: &[Vec<NodeId>], boss: NodeId) {
        let mut has_incoming = vec![false; nodes.len()];
        for node in nodes.iter() {
            for &to in node.outgoing() {
                has_incoming[to.index()] = true;
            }
        }

        // Entrances: route from the nearest node of the previous layer.
        for layer_index in 1..layers.len() {
            for &isolated in &layers[layer_index] {
                if has_incoming[isolated.index()] {
                    continue;
                }
                let y = nodes[isolated.index()].position().1;
                let from = nearest_by_y(nodes, &layers[layer_index - 1], y);
                nodes[from.index()].push_outgoing(isolated);
                has_incoming[isolated.index()] = true;
                debug!(node = %isolated, from = %from, "routed entrance to isolated node");
            }
        }

        // Exits: route to the nearest node of the next layer.
        for (layer_index, layer) in layers.iter().enumerate() {
            let targets: &[NodeId] = match layers.get(layer_index + 1) {
                Some(next) => next,
                None => std::slice::from_ref(&boss),
            };
            for &dead_end in layer {
                if nodes[dead_end.index()].out_degree() > 0 {
                    continue;
                }
                let y = nodes[dead_end.index()].position().1;
                let to = nearest_by_y(nodes, targets, y);
                nodes[dead_end.index()].push_outgoing(to);
                has_incoming[to.index()] = true;
                debug!(node = %dead_end, to = %to, "routed exit from dead-end node");
            }
        }

        // Last resort for the boss: converge the whole final layer on it.
        if !has_incoming[boss.index()] {
            // layers is never empty once the config validates
            let last_layer = layers.last().unwrap();
            for &from in last_layer {
                nodes[from.index()].push_outgoing(boss);
            }
            debug!("converged final layer on the boss");
        }
    }
}

/// Picks the encounter kind for a freshly created node
///
/// The start layer is always combat; the middle slot of the drawn shop and
/// rest layers hosts the special room; everything else fights.
fn kind_for(layer: u32, slot: usize, count: usize, shop_layer: u32, rest_layer: u32) -> NodeKind {
    if layer == 0 {
        return NodeKind::Combat;
    }
    if layer == shop_layer && slot == count / 2 {
        return NodeKind::Shop;
    }
    if layer == rest_layer && slot == count / 2 {
        return NodeKind::Rest;
    }
    NodeKind::Combat
}

/// Returns the candidate whose Y position is closest to `y`
///
/// Ties resolve to the earlier candidate. `candidates` is never empty:
/// every layer holds at least one node once the config validates.
fn nearest_by_y(nodes: &[Node], candidates: &[NodeId], y: f32) -> NodeId {
    *candidates
        .iter()
        .min_by(|&&a, &&b| {
            let da = (nodes[a.index()].position().1 - y).abs();
            let db = (nodes[b.index()].position().1 - y).abs();
            da.total_cmp(&db)
        })
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_size_layer_rejected() {
        let config = GeneratorConfig {
            min_nodes_per_layer: 0,
            ..GeneratorConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(BuildError::EmptyLayer { min: 0, max: 4 })
        );
    }

    #[test]
    fn test_inverted_node_range_rejected() {
        let config = GeneratorConfig {
            min_nodes_per_layer: 5,
            max_nodes_per_layer: 4,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(BuildError::EmptyLayer { .. })
        ));
    }

    #[test]
    fn test_special_range_touching_start_layer_rejected() {
        let config = GeneratorConfig {
            shop_layer_range: (0, 3),
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(BuildError::SpecialRangeOutOfBounds { room: "shop", .. })
        ));
    }

    #[test]
    fn test_special_range_past_last_layer_rejected() {
        let config = GeneratorConfig {
            rest_layer_range: (5, 9),
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(BuildError::SpecialRangeOutOfBounds { room: "rest", .. })
        ));
    }

    #[test]
    fn test_overlapping_special_ranges_rejected() {
        let config = GeneratorConfig {
            shop_layer_range: (2, 5),
            rest_layer_range: (5, 7),
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(BuildError::OverlappingSpecialRanges { .. })
        ));
    }

    #[test]
    fn test_too_few_layers_rejected() {
        let config = GeneratorConfig {
            layer_count: 1,
            ..GeneratorConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(BuildError::TooFewLayers { layer_count: 1 })
        );
    }

    #[test]
    fn test_kind_for_places_specials_on_middle_slot() {
        assert_eq!(kind_for(3, 1, 3, 3, 6), NodeKind::Shop);
        assert_eq!(kind_for(3, 0, 3, 3, 6), NodeKind::Combat);
        assert_eq!(kind_for(6, 2, 4, 3, 6), NodeKind::Rest);
        assert_eq!(kind_for(0, 0, 1, 3, 6), NodeKind::Combat);
    }

    #[test]
    fn test_vertical_positions_stay_near_even_spacing() {
        let builder = MapGraphBuilder::new(GeneratorConfig::default());
        let mut rng = StdRng::seed_from_u64(1);
        let positions = builder.vertical_positions(4, &mut rng);
        assert_eq!(positions.len(), 4);

        // Average gap is 150; jitter can move each node by at most 30.
        for pair in positions.windows(2) {
            let gap = pair[1] - pair[0];
            assert!((90.0..=210.0).contains(&gap), "gap {gap} out of bounds");
        }
    }

    #[test]
    fn test_generated_layers_respect_node_count_bounds() {
        let builder = MapGraphBuilder::new(GeneratorConfig::default());
        let graph = builder.generate(3).unwrap();

        for layer in 1..10u32 {
            let count = graph.nodes().filter(|n| n.layer() == layer).count();
            assert!((3..=4).contains(&count), "layer {layer} has {count} nodes");
        }
        assert_eq!(graph.nodes().filter(|n| n.layer() == 0).count(), 1);
        assert_eq!(graph.nodes().filter(|n| n.layer() == 10).count(), 1);
    }

    #[test]
    fn test_start_is_sole_entry_and_boss_is_last() {
        let builder = MapGraphBuilder::new(GeneratorConfig::default());
        let graph = builder.generate(11).unwrap();

        assert_eq!(graph.start().index(), 0);
        assert_eq!(graph.boss().index(), graph.len() - 1);
        assert_eq!(graph.node(graph.boss()).unwrap().kind(), NodeKind::Boss);
    }

    #[test]
    fn test_repair_carries_a_zero_distance_cap() {
        // A cap of zero starves the forward-edge phase completely; the
        // repair pass alone must still deliver a valid, connected map.
        let config = GeneratorConfig {
            max_connection_distance: 0.0,
            ..GeneratorConfig::default()
        };
        let graph = MapGraphBuilder::new(config).generate(5).unwrap();
        assert!(graph.validate().is_ok());
    }
}
