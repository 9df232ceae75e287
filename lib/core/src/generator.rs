// Random layered graph generation
//
// Phase 1 grows a Gray tree from the root on a bounded worker pool. Phases
// 2-4 (Green, Yellow, Red) run concurrently against the finished tree.
use parking_lot::Mutex;
use rand::Rng;
use std::iter;
use tracing::{debug, trace};

use crate::background::{available_parallelism, run_workers, JobQueue};
use crate::graph::{Depth, Graph, VertexId, DEFAULT_DEPTH};
use crate::Result;

const GREEN_EDGE_PROBABILITY: f64 = 0.1;
const RED_EDGE_PROBABILITY: f64 = 0.33;
const YELLOW_DEPTH_GAP: Depth = 1;
const RED_DEPTH_GAP: Depth = 2;
/// Yellow and Red passes need at least this many levels
const MIN_DEPTH_FOR_CROSS_EDGES: Depth = 3;

/// Parameters for a single graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorParams {
    /// Maximum depth; 0 yields an empty graph
    pub depth: Depth,
    /// Branch attempts per vertex while growing the tree
    pub new_vertices_count: usize,
}

impl GeneratorParams {
    #[inline]
    #[must_use]
    pub fn new(depth: Depth, new_vertices_count: usize) -> Self {
        Self {
            depth,
            new_vertices_count,
        }
    }
}

/// One pending attempt to grow a child under `parent`
#[derive(Debug, Clone, Copy)]
struct Branch {
    parent: VertexId,
    depth: Depth,
}

/// Builds random layered graphs
#[derive(Debug, Clone)]
pub struct GraphGenerator {
    params: GeneratorParams,
}

impl GraphGenerator {
    pub fn new(params: GeneratorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    /// Generate one graph
    pub fn generate(&self) -> Result<Graph> {
        let graph = Graph::new();
        if self.params.depth == 0 {
            return Ok(graph);
        }

        let graph = self.generate_gray_edges(graph)?;
        debug!(
            vertices = graph.vertex_count(),
            depth = graph.depth(),
            "gray tree complete"
        );

        // No vertex is added past this point, so the level layout is final
        let vertex_ids: Vec<VertexId> = graph.vertices().iter().map(|v| v.id).collect();
        let levels: Vec<Vec<VertexId>> = (DEFAULT_DEPTH..=graph.depth())
            .map(|depth| graph.vertex_ids_at_depth(depth).to_vec())
            .collect();

        let graph = Mutex::new(graph);
        let (green, (yellow, red)) = rayon::join(
            || self.generate_green_edges(&graph, &vertex_ids),
            || {
                rayon::join(
                    || self.generate_yellow_edges(&graph, &levels),
                    || self.generate_red_edges(&graph, &levels),
                )
            },
        );
        green?;
        yellow?;
        red?;

        let graph = graph.into_inner();
        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "graph generated"
        );
        Ok(graph)
    }

    /// Chance that a branch at `depth` grows a child: 1 at the root, 0 at max depth
    fn branch_probability(&self, depth: Depth) -> f64 {
        let max_depth = self.params.depth as f64;
        let probability = (max_depth - depth as f64) / (max_depth - DEFAULT_DEPTH as f64);
        probability.clamp(0.0, 1.0)
    }

    fn generate_gray_edges(&self, mut graph: Graph) -> Result<Graph> {
        let root = graph.add_vertex();
        let branches = self.params.new_vertices_count;
        if self.params.depth == DEFAULT_DEPTH || branches == 0 {
            return Ok(graph);
        }

        let graph = Mutex::new(graph);
        let queue: JobQueue<Branch> = iter::repeat(Branch {
            parent: root,
            depth: DEFAULT_DEPTH,
        })
        .take(branches)
        .collect();
        let threads = available_parallelism().min(branches);

        run_workers(threads, "gray-branch", &queue, |branch| {
            self.grow_branch(&graph, &queue, branch)
        })?;

        Ok(graph.into_inner())
    }

    fn grow_branch(
        &self,
        graph: &Mutex<Graph>,
        queue: &JobQueue<Branch>,
        branch: Branch,
    ) -> Result<()> {
        if !rand::rng().random_bool(self.branch_probability(branch.depth)) {
            return Ok(());
        }

        let child = {
            let mut graph = graph.lock();
            let child = graph.add_vertex();
            graph.add_edge(branch.parent, child)?;
            child
        };

        for _ in 0..self.params.new_vertices_count {
            queue.push(Branch {
                parent: child,
                depth: branch.depth + 1,
            });
        }
        Ok(())
    }

    fn generate_green_edges(
        &self,
        graph: &Mutex<Graph>,
        vertex_ids: &[VertexId],
    ) -> Result<()> {
        let mut rng = rand::rng();
        let mut added = 0usize;
        for &vertex_id in vertex_ids {
            if rng.random_bool(GREEN_EDGE_PROBABILITY) {
                graph.lock().add_edge(vertex_id, vertex_id)?;
                added += 1;
            }
        }
        trace!(edges = added, "green pass finished");
        Ok(())
    }

    /// Candidates are filtered and the edge inserted under one lock, so a
    /// chosen pair is never already connected.
    fn generate_yellow_edges(
        &self,
        graph: &Mutex<Graph>,
        levels: &[Vec<VertexId>],
    ) -> Result<()> {
        if self.params.depth < MIN_DEPTH_FOR_CROSS_EDGES {
            return Ok(());
        }

        let graph_depth = levels.len();
        let probability_per_step = if graph_depth > DEFAULT_DEPTH + YELLOW_DEPTH_GAP {
            1.0 / (graph_depth - (DEFAULT_DEPTH + YELLOW_DEPTH_GAP)) as f64
        } else {
            1.0
        };

        let mut rng = rand::rng();
        let mut added = 0usize;
        for depth in DEFAULT_DEPTH..=graph_depth.saturating_sub(YELLOW_DEPTH_GAP) {
            let probability = (depth as f64 * probability_per_step).min(1.0);
            let targets = &levels[depth - 1 + YELLOW_DEPTH_GAP];

            for &vertex_id in &levels[depth - 1] {
                if !rng.random_bool(probability) {
                    continue;
                }

                let mut graph = graph.lock();
                let unconnected = unconnected_targets(&graph, vertex_id, targets)?;
                if unconnected.is_empty() {
                    continue;
                }
                let target = unconnected[rng.random_range(0..unconnected.len())];
                graph.add_edge(vertex_id, target)?;
                added += 1;
            }
        }
        trace!(edges = added, "yellow pass finished");
        Ok(())
    }

    /// Red edges skip the connectivity check; repeated pairs are allowed
    fn generate_red_edges(
        &self,
        graph: &Mutex<Graph>,
        levels: &[Vec<VertexId>],
    ) -> Result<()> {
        if self.params.depth < MIN_DEPTH_FOR_CROSS_EDGES {
            return Ok(());
        }

        let mut rng = rand::rng();
        let mut added = 0usize;
        for depth in DEFAULT_DEPTH..=levels.len().saturating_sub(RED_DEPTH_GAP) {
            let targets = &levels[depth - 1 + RED_DEPTH_GAP];
            if targets.is_empty() {
                continue;
            }

            for &vertex_id in &levels[depth - 1] {
                if rng.random_bool(RED_EDGE_PROBABILITY) {
                    let target = targets[rng.random_range(0..targets.len())];
                    graph.lock().add_edge(vertex_id, target)?;
                    added += 1;
                }
            }
        }
        trace!(edges = added, "red pass finished");
        Ok(())
    }
}

/// Vertices in `targets` that share no edge with `vertex_id`
fn unconnected_targets(
    graph: &Graph,
    vertex_id: VertexId,
    targets: &[VertexId],
) -> Result<Vec<VertexId>> {
    let mut unconnected = Vec::with_capacity(targets.len());
    for &candidate in targets {
        if !graph.has_edge(vertex_id, candidate)? {
            unconnected.push(candidate);
        }
    }
    Ok(unconnected)
}
