// Integration tests for layergraph
use layergraph_core::{
    printing, EdgeColor, GenerationController, GeneratorParams, Graph, GraphGenerator,
    DEFAULT_DEPTH,
};
use layergraph_storage::{OutputDirectory, RunLog};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fs;

fn generate(depth: usize, new_vertices_count: usize) -> Graph {
    GraphGenerator::new(GeneratorParams::new(depth, new_vertices_count))
        .generate()
        .unwrap()
}

/// Depth of every vertex recomputed by walking Gray parents up to the root
fn gray_chain_depths(graph: &Graph) -> Vec<usize> {
    let mut parent = vec![None; graph.vertex_count()];
    for edge in graph.edges().iter().filter(|e| e.color == EdgeColor::Gray) {
        parent[edge.to] = Some(edge.from);
    }
    (0..graph.vertex_count())
        .map(|mut vertex| {
            let mut depth = 1;
            while let Some(p) = parent[vertex] {
                depth += 1;
                vertex = p;
            }
            depth
        })
        .collect()
}

fn assert_well_formed(graph: &Graph, max_depth: usize) {
    // Contiguous ids
    for (i, vertex) in graph.vertices().iter().enumerate() {
        assert_eq!(vertex.id, i);
    }
    for (i, edge) in graph.edges().iter().enumerate() {
        assert_eq!(edge.id, i);
    }

    if max_depth == 0 {
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        return;
    }

    // Only the root stays at depth 1
    assert_eq!(graph.vertex_ids_at_depth(DEFAULT_DEPTH), &[0]);

    let mut gray_in = vec![0usize; graph.vertex_count()];
    for edge in graph.edges() {
        let from = graph.vertex_depth(edge.from).unwrap();
        let to = graph.vertex_depth(edge.to).unwrap();
        match edge.color {
            EdgeColor::Gray => {
                gray_in[edge.to] += 1;
                assert_eq!(to, from + 1);
            }
            EdgeColor::Green => assert_eq!(edge.from, edge.to),
            EdgeColor::Yellow => assert_eq!(to, from + 1),
            EdgeColor::Red => assert_eq!(to, from + 2),
        }

        let incident_from = graph.edge_ids_of(edge.from).unwrap();
        assert!(incident_from.contains(&edge.id));
        if edge.color != EdgeColor::Green {
            assert!(graph.edge_ids_of(edge.to).unwrap().contains(&edge.id));
        }
    }
    assert_eq!(gray_in[0], 0);
    assert!(gray_in[1..].iter().all(|&n| n == 1));

    let chain_depths = gray_chain_depths(graph);
    for vertex in graph.vertices() {
        assert_eq!(graph.vertex_depth(vertex.id).unwrap(), chain_depths[vertex.id]);
    }
    let deepest = chain_depths.iter().copied().max().unwrap();
    assert_eq!(graph.depth(), deepest);
    assert!(graph.depth() <= max_depth);

    // Depth buckets partition the vertices
    let bucketed: usize = (1..=graph.depth())
        .map(|d| graph.vertex_ids_at_depth(d).len())
        .sum();
    assert_eq!(bucketed, graph.vertex_count());
}

#[test]
fn test_generated_graphs_are_well_formed() {
    for depth in 0..=6 {
        for new_vertices in [0, 1, 2, 3] {
            let graph = generate(depth, new_vertices);
            assert_well_formed(&graph, depth);
        }
    }
}

#[test]
fn test_single_vertex_graph() {
    for _ in 0..10 {
        let graph = generate(1, 4);
        assert_eq!(graph.vertex_count(), 1);
        assert!(graph.edges().iter().all(|e| e.color == EdgeColor::Green));
    }
}

#[test]
fn test_yellow_edges_never_repeat_a_connection() {
    for _ in 0..10 {
        let graph = generate(6, 3);
        let mut connected: HashSet<(usize, usize)> = HashSet::new();
        for edge in graph.edges() {
            let pair = (edge.from.min(edge.to), edge.from.max(edge.to));
            if edge.color == EdgeColor::Yellow {
                assert!(connected.insert(pair), "yellow edge over an existing connection");
            } else {
                connected.insert(pair);
            }
        }
    }
}

#[test]
fn test_json_round_trip_counts() {
    let graph = generate(5, 3);
    let json: serde_json::Value =
        serde_json::from_str(&printing::to_json(&graph).unwrap()).unwrap();

    assert_eq!(json["depth"], graph.depth());
    assert_eq!(json["vertices"].as_array().unwrap().len(), graph.vertex_count());
    let edges = json["edges"].as_array().unwrap();
    assert_eq!(edges.len(), graph.edge_count());
    for color in EdgeColor::ALL {
        let rendered = edges.iter().filter(|e| e["color"] == color.as_str()).count();
        assert_eq!(rendered, graph.color_count(color));
    }
}

#[test]
fn test_controller_reports_each_index_once() {
    let mut controller = GenerationController::new(4, 20, GeneratorParams::new(4, 3));
    let mut started = Vec::new();
    let mut finished = Vec::new();

    controller
        .generate(
            |index| started.push(index),
            |index, graph| {
                assert_well_formed(&graph, 4);
                finished.push(index);
            },
        )
        .unwrap();

    started.sort_unstable();
    finished.sort_unstable();
    assert_eq!(started, (0..20).collect::<Vec<_>>());
    assert_eq!(finished, (0..20).collect::<Vec<_>>());
}

#[test]
fn test_controller_can_run_twice() {
    let mut controller = GenerationController::new(2, 3, GeneratorParams::new(3, 2));
    for _ in 0..2 {
        let mut count = 0;
        controller.generate(|_| {}, |_, _| count += 1).unwrap();
        assert_eq!(count, 3);
    }
}

#[test]
fn test_end_to_end_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = OutputDirectory::new(dir.path().join("temp")).unwrap();
    let log = RunLog::new(output.path().join("log.txt")).unwrap();
    let written = Mutex::new(Vec::new());

    let mut controller = GenerationController::new(3, 5, GeneratorParams::new(4, 2));
    controller
        .generate(
            |index| log.log(&format!("Graph {}, Generation Started", index)).unwrap(),
            |index, graph| {
                let summary = printing::describe(&graph);
                log.log(&format!("Graph {}, Generation Finished {}", index, summary))
                    .unwrap();
                written.lock().push(output.write_graph(index, &graph).unwrap());
            },
        )
        .unwrap();

    assert_eq!(written.into_inner().len(), 5);
    for index in 0..5 {
        let contents = fs::read_to_string(output.graph_path(index)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert!(json["vertices"].as_array().unwrap().len() >= 1);
    }

    let log_contents = fs::read_to_string(log.path()).unwrap();
    assert_eq!(log_contents.matches("Generation Started").count(), 5);
    assert_eq!(log_contents.matches("Generation Finished").count(), 5);
}
