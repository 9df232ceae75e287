//! # layergraph
//!
//! Random depth-layered multigraphs with colored edges, generated in
//! parallel.
//!
//! A graph is grown as a random tree from a single root (Gray edges), then
//! decorated concurrently with self-loops (Green), edges to unconnected
//! vertices one level deeper (Yellow) and edges skipping one level (Red).
//! Many graphs can be generated at once on a bounded worker pool.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! cargo install layergraph
//! layergraph --depth 5 --new-vertices 3 --graphs 10 --threads 4
//! ```
//!
//! Each graph is logged to `./temp/log.txt` and written to
//! `./temp/graph_<index>.json`.
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use layergraph::prelude::*;
//!
//! // One graph
//! let graph = GraphGenerator::new(GeneratorParams::new(5, 3)).generate().unwrap();
//! println!("{}", printing::describe(&graph));
//!
//! // A batch
//! let mut controller = GenerationController::new(4, 10, GeneratorParams::new(5, 3));
//! let mut graphs = Vec::new();
//! controller
//!     .generate(|_| {}, |index, graph| graphs.push((index, graph)))
//!     .unwrap();
//! ```
//!
//! ## Crate Structure
//!
//! - [`layergraph-core`](https://docs.rs/layergraph-core) - Graph model, generator,
//!   controller, printing
//! - [`layergraph-storage`](https://docs.rs/layergraph-storage) - JSON output directory and run log

// Re-export core types
pub use layergraph_core::{
    Graph, Vertex, Edge, EdgeColor,
    VertexId, EdgeId, Depth,
    GraphGenerator, GeneratorParams,
    GenerationController,
    Error, Result,
};

pub use layergraph_core::printing;

// Re-export storage
pub use layergraph_storage::{OutputDirectory, RunLog};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Graph, Vertex, Edge, EdgeColor,
        GraphGenerator, GeneratorParams,
        GenerationController,
        Error, Result,
        OutputDirectory, RunLog,
        printing,
    };
}
