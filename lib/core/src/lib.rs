//! # layergraph Core
//!
//! Core library for layergraph, a generator of random depth-layered
//! multigraphs.
//!
//! This crate provides:
//!
//! - [`Graph`] - Layered multigraph with colored edges and a depth index
//! - [`GraphGenerator`] - Four-phase random generation of one graph
//! - [`GenerationController`] - Batch generation on a fixed worker pool
//! - [`printing`] - Summary and JSON renderings of a finished graph
//!
//! Every edge gets one of four colors when it is inserted:
//!
//! - **Gray**: tree edge into a brand-new vertex, sets its depth
//! - **Green**: self-loop
//! - **Yellow**: edge to a not-yet-connected vertex one level deeper
//! - **Red**: edge to a vertex two levels deeper
//!
//! ## Example
//!
//! ```rust
//! use layergraph_core::{GenerationController, GeneratorParams, Graph};
//!
//! let mut controller = GenerationController::new(2, 4, GeneratorParams::new(4, 3));
//! let mut graphs: Vec<(usize, Graph)> = Vec::new();
//! controller
//!     .generate(|_index| {}, |index, graph| graphs.push((index, graph)))
//!     .unwrap();
//! assert_eq!(graphs.len(), 4);
//! ```

pub mod error;
pub mod graph;
pub mod generator;
pub mod controller;
pub mod printing;

/// Job queue and scoped worker pool
///
/// Used by the gray tree growth inside one generation and by the batch
/// controller across generations.
pub mod background;

pub use error::{Error, Result};
pub use graph::{Depth, Edge, EdgeColor, EdgeId, Graph, Vertex, VertexId, DEFAULT_DEPTH};
pub use generator::{GeneratorParams, GraphGenerator};
pub use controller::GenerationController;
pub use background::JobQueue;
