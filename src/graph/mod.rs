pub use graph::Graph;
pub use subgraph::SubGraph;

pub mod graph;
pub mod subgraph;
