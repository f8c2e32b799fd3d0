//! Graphviz export for generated maps
//!
//! Renders a [`MapGraph`] in DOT format so a map can be inspected outside
//! the game, e.g. while tuning generation parameters.

use super::MapGraph;
use petgraph::dot::{Config, Dot};
use petgraph::graph::DiGraph;

impl MapGraph {
    /// Renders the map in Graphviz DOT format
    ///
    /// The output can be:
    /// - Printed for debugging
    /// - Saved to a .dot file
    /// - Rendered with Graphviz: `dot -Tpng map.dot -o map.png`
    ///
    /// Example:
    /// ```
    /// use poreia::{GeneratorConfig, MapGraphBuilder};
    ///
    /// let graph = MapGraphBuilder::new(GeneratorConfig::default())
    ///     .generate(1)
    ///     .unwrap();
    /// let dot = graph.to_dot();
    /// assert!(dot.contains("digraph"));
    /// ```
    pub fn to_dot(&self) -> String {
        let mut graph = DiGraph::<String, ()>::new();

        let indices: Vec<_> = self
            .nodes()
            .map(|node| graph.add_node(format!("{} {}", node.id(), node.kind())))
            .collect();

        for (from, to) in self.edges() {
            graph.add_edge(indices[from.index()], indices[to.index()], ());
        }

        format!("{:?}", Dot::with_config(&graph, &[Config::EdgeNoLabel]))
    }

    /// Saves the DOT rendering to a file
    ///
    /// Then render: `dot -Tpng map.dot -o map.png`
    pub fn save_dot(&self, path: &str) -> std::io::Result<()> {
        std::fs::write(path, self.to_dot())
    }
}
