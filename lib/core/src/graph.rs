// Layered multigraph - vertices, colored edges, adjacency and depth index
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

pub type VertexId = usize;
pub type EdgeId = usize;
pub type Depth = usize;

/// Depth every vertex starts at; the root stays here forever.
pub const DEFAULT_DEPTH: Depth = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vertex {
    pub id: VertexId,
}

impl Vertex {
    #[inline]
    #[must_use]
    pub fn new(id: VertexId) -> Self {
        Self { id }
    }
}

/// Semantic edge color, derived from the graph structure at insertion time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeColor {
    /// Tree edge into a brand-new vertex
    Gray,
    /// Self-loop
    Green,
    /// Edge between unconnected vertices on adjacent levels
    Yellow,
    /// Edge skipping exactly one level
    Red,
}

impl EdgeColor {
    pub const ALL: [EdgeColor; 4] = [
        EdgeColor::Gray,
        EdgeColor::Green,
        EdgeColor::Yellow,
        EdgeColor::Red,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeColor::Gray => "gray",
            EdgeColor::Green => "green",
            EdgeColor::Yellow => "yellow",
            EdgeColor::Red => "red",
        }
    }
}

impl fmt::Display for EdgeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub from: VertexId,
    pub to: VertexId,
    pub color: EdgeColor,
}

impl Edge {
    #[inline]
    #[must_use]
    pub fn new(id: EdgeId, from: VertexId, to: VertexId, color: EdgeColor) -> Self {
        Self { id, from, to, color }
    }

    #[inline]
    pub fn is_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Depth-layered directed multigraph.
///
/// Ids are allocated sequentially, so every per-vertex and per-edge table is a
/// plain vector indexed by id. Depth buckets are indexed by `depth - 1`.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<EdgeId>>,
    vertex_depths: Vec<Depth>,
    depth_buckets: Vec<Vec<VertexId>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn has_vertex(&self, id: VertexId) -> bool {
        id < self.vertices.len()
    }

    /// Whether `first` and `second` already share an edge.
    ///
    /// For two distinct vertices this looks for an edge id present in both
    /// adjacency lists, regardless of direction. For the same vertex twice it
    /// only answers whether a Green self-loop exists. Unknown ids are an error.
    pub fn has_edge(&self, first: VertexId, second: VertexId) -> Result<bool> {
        self.ensure_vertex(first)?;
        self.ensure_vertex(second)?;
        let first_edges = &self.adjacency[first];

        let connected = if first != second {
            let second_edges = &self.adjacency[second];
            first_edges
                .iter()
                .any(|edge_id| second_edges.contains(edge_id))
        } else {
            first_edges
                .iter()
                .any(|&edge_id| self.edges[edge_id].color == EdgeColor::Green)
        };
        Ok(connected)
    }

    /// Create a vertex at the default depth and return its id
    pub fn add_vertex(&mut self) -> VertexId {
        let id = self.vertices.len();
        self.vertices.push(Vertex::new(id));
        self.adjacency.push(Vec::new());
        self.vertex_depths.push(DEFAULT_DEPTH);
        if self.depth_buckets.is_empty() {
            self.depth_buckets.push(Vec::new());
        }
        self.depth_buckets[DEFAULT_DEPTH - 1].push(id);
        id
    }

    /// Insert an edge between two existing vertices.
    ///
    /// The color is derived from the current structure. A Gray edge also
    /// promotes `to` one level below `from`.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId) -> Result<EdgeId> {
        self.ensure_vertex(from)?;
        self.ensure_vertex(to)?;

        let color = self.classify_edge(from, to)?;
        let id = self.edges.len();
        self.edges.push(Edge::new(id, from, to, color));

        self.adjacency[from].push(id);
        if color != EdgeColor::Green {
            self.adjacency[to].push(id);
        }
        if color == EdgeColor::Gray {
            self.update_depth(from, to)?;
        }
        Ok(id)
    }

    /// Move `to` from the default bucket to `depth(from) + 1`
    pub fn update_depth(&mut self, from: VertexId, to: VertexId) -> Result<()> {
        let depth = self.vertex_depth(from)? + 1;
        self.ensure_vertex(to)?;

        self.vertex_depths[to] = depth;
        while self.depth_buckets.len() < depth {
            self.depth_buckets.push(Vec::new());
        }
        self.depth_buckets[depth - 1].push(to);

        let default_bucket = &mut self.depth_buckets[DEFAULT_DEPTH - 1];
        if let Some(pos) = default_bucket.iter().position(|&id| id == to) {
            default_bucket.remove(pos);
        }
        Ok(())
    }

    fn classify_edge(&self, from: VertexId, to: VertexId) -> Result<EdgeColor> {
        let from_depth = self.vertex_depth(from)?;
        let to_depth = self.vertex_depth(to)?;

        if from == to {
            return Ok(EdgeColor::Green);
        }
        if self.adjacency[to].is_empty() {
            return Ok(EdgeColor::Gray);
        }
        if to_depth == from_depth + 1 && !self.has_edge(from, to)? {
            return Ok(EdgeColor::Yellow);
        }
        if to_depth == from_depth + 2 {
            return Ok(EdgeColor::Red);
        }
        Err(Error::UnclassifiableEdge { from, to })
    }

    #[inline]
    fn ensure_vertex(&self, id: VertexId) -> Result<()> {
        if self.has_vertex(id) {
            Ok(())
        } else {
            Err(Error::VertexNotFound(id))
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All edges, ordered by id
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> Result<&Edge> {
        self.edges.get(id).ok_or(Error::EdgeNotFound(id))
    }

    /// Ids of edges incident to `id`, in insertion order
    pub fn edge_ids_of(&self, id: VertexId) -> Result<&[EdgeId]> {
        self.adjacency
            .get(id)
            .map(Vec::as_slice)
            .ok_or(Error::VertexNotFound(id))
    }

    pub fn vertex_depth(&self, id: VertexId) -> Result<Depth> {
        self.vertex_depths
            .get(id)
            .copied()
            .ok_or(Error::VertexNotFound(id))
    }

    /// Vertices at `depth`; empty outside `1..=self.depth()`
    pub fn vertex_ids_at_depth(&self, depth: Depth) -> &[VertexId] {
        depth
            .checked_sub(1)
            .and_then(|idx| self.depth_buckets.get(idx))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of depth levels in use
    #[inline]
    pub fn depth(&self) -> Depth {
        self.depth_buckets.len()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn color_count(&self, color: EdgeColor) -> usize {
        self.edges.iter().filter(|edge| edge.color == color).count()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
