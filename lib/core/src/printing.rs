// Human-readable and JSON renderings of a finished graph
use serde::Serialize;

use crate::graph::{Depth, EdgeColor, EdgeId, Graph, VertexId, DEFAULT_DEPTH};
use crate::Result;

#[derive(Debug, Serialize)]
struct GraphJson {
    depth: Depth,
    vertices: Vec<VertexJson>,
    edges: Vec<EdgeJson>,
}

#[derive(Debug, Serialize)]
struct VertexJson {
    id: VertexId,
    edge_ids: Vec<EdgeId>,
    depth: Depth,
}

#[derive(Debug, Serialize)]
struct EdgeJson {
    id: EdgeId,
    vertex_ids: [VertexId; 2],
    color: EdgeColor,
}

impl GraphJson {
    fn from_graph(graph: &Graph) -> Result<Self> {
        let vertices = graph
            .vertices()
            .iter()
            .map(|vertex| {
                Ok(VertexJson {
                    id: vertex.id,
                    edge_ids: graph.edge_ids_of(vertex.id)?.to_vec(),
                    depth: graph.vertex_depth(vertex.id)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let edges = graph
            .edges()
            .iter()
            .map(|edge| EdgeJson {
                id: edge.id,
                vertex_ids: [edge.from, edge.to],
                color: edge.color,
            })
            .collect();

        Ok(Self {
            depth: graph.depth(),
            vertices,
            edges,
        })
    }
}

/// Render `graph` as JSON:
/// `{"depth", "vertices": [{"id", "edge_ids", "depth"}], "edges": [{"id", "vertex_ids", "color"}]}`
pub fn to_json(graph: &Graph) -> Result<String> {
    Ok(serde_json::to_string(&GraphJson::from_graph(graph)?)?)
}

/// Same as [`to_json`], indented
pub fn to_json_pretty(graph: &Graph) -> Result<String> {
    Ok(serde_json::to_string_pretty(&GraphJson::from_graph(graph)?)?)
}

/// Short summary: depth, vertex count per level and edge count per color
pub fn describe(graph: &Graph) -> String {
    let distribution: Vec<String> = (DEFAULT_DEPTH..=graph.depth())
        .map(|depth| graph.vertex_ids_at_depth(depth).len().to_string())
        .collect();

    let colors: Vec<String> = EdgeColor::ALL
        .iter()
        .map(|&color| (color, graph.color_count(color)))
        .filter(|&(_, count)| count > 0)
        .map(|(color, count)| format!("{}: {}", color, count))
        .collect();

    format!(
        "{{\n\
         \tdepth: {}\n\
         \tvertices: {{amount: {}, distribution: [{}]}},\n\
         \tedges: {{amount: {}, distribution: {{{}}}}}\n\
         }}",
        graph.depth(),
        graph.vertex_count(),
        distribution.join(", "),
        graph.edge_count(),
        colors.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn sample_graph() -> Graph {
        let mut graph = Graph::new();
        let root = graph.add_vertex();
        let a = graph.add_vertex();
        graph.add_edge(root, a).unwrap();
        let b = graph.add_vertex();
        graph.add_edge(a, b).unwrap();
        graph.add_edge(root, b).unwrap();
        graph.add_edge(a, a).unwrap();
        graph
    }

    #[test]
    fn test_json_shape() {
        let graph = sample_graph();
        let json: Value = serde_json::from_str(&to_json(&graph).unwrap()).unwrap();

        assert_eq!(json["depth"], 3);
        assert_eq!(json["vertices"].as_array().unwrap().len(), 3);
        assert_eq!(json["vertices"][1]["id"], 1);
        assert_eq!(json["vertices"][1]["depth"], 2);
        assert_eq!(json["vertices"][1]["edge_ids"], serde_json::json!([0, 1, 3]));

        let edges = json["edges"].as_array().unwrap();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[2]["vertex_ids"], serde_json::json!([0, 2]));
        assert_eq!(edges[2]["color"], "red");
        assert_eq!(edges[3]["color"], "green");
    }

    #[test]
    fn test_pretty_json_parses_to_same_value() {
        let graph = sample_graph();
        let compact: Value = serde_json::from_str(&to_json(&graph).unwrap()).unwrap();
        let pretty: Value = serde_json::from_str(&to_json_pretty(&graph).unwrap()).unwrap();
        assert_eq!(compact, pretty);
    }

    #[test]
    fn test_empty_graph_json() {
        let json: Value = serde_json::from_str(&to_json(&Graph::new()).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"depth": 0, "vertices": [], "edges": []}));
    }

    #[test]
    fn test_describe() {
        let summary = describe(&sample_graph());
        assert!(summary.contains("depth: 3"));
        assert!(summary.contains("vertices: {amount: 3, distribution: [1, 1, 1]},"));
        assert!(summary.contains("edges: {amount: 4, distribution: {gray: 2, green: 1, red: 1}}"));
        assert!(!summary.contains("yellow"));
        assert!(summary.starts_with("{\n\tdepth: 3\n"));
        assert!(summary.ends_with("}}\n}"));
    }

    #[test]
    fn test_describe_empty_graph() {
        assert_eq!(
            describe(&Graph::new()),
            "{\n\tdepth: 0\n\
             \tvertices: {amount: 0, distribution: []},\n\
             \tedges: {amount: 0, distribution: {}}\n}"
        );
    }
}
