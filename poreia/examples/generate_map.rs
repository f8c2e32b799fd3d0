//! Map Generation Demo
//!
//! This example demonstrates:
//! - Generating a map from a seed with the default configuration
//! - Inspecting layers, kinds and edges the way a renderer would
//! - Exporting the map as Graphviz DOT for visual inspection
//!
//! ## Run with
//! ```bash
//! cargo run --example generate_map           # random-ish seed
//! cargo run --example generate_map -- 42     # fixed seed
//! ```

use poreia::{GeneratorConfig, MapGraphBuilder};
use std::time::{SystemTime, UNIX_EPOCH};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let seed = std::env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()?
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

    let builder = MapGraphBuilder::new(GeneratorConfig::default());
    let graph = builder.generate(seed)?;

    println!("seed {seed}: {} nodes, {} edges", graph.len(), graph.edges().count());
    println!("start = {}, boss = {}\n", graph.start(), graph.boss());

    let mut layer = u32::MAX;
    for node in graph.nodes() {
        if node.layer() != layer {
            layer = node.layer();
            println!("layer {layer}:");
        }
        let (x, y) = node.position();
        let targets: Vec<String> = node.outgoing().iter().map(|t| t.to_string()).collect();
        println!(
            "  {:>3} {:<6} at ({x:>6.1}, {y:>6.1}) -> [{}]",
            node.id().to_string(),
            node.kind().to_string(),
            targets.join(", ")
        );
    }

    println!("\n{}", graph.to_dot());
    Ok(())
}
