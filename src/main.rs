use clap::Parser;
use parking_lot::Mutex;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use layergraph_core::{printing, GenerationController, GeneratorParams, Graph};
use layergraph_storage::{OutputDirectory, RunLog};

/// Random layered multigraph generator
#[derive(Parser, Debug)]
#[command(name = "layergraph")]
#[command(about = "Generate random depth-layered multigraphs", long_about = None)]
struct Args {
    /// Maximum depth of each graph (0 = empty graph)
    #[arg(short, long)]
    depth: usize,

    /// Branch attempts per vertex while growing the tree
    #[arg(short, long)]
    new_vertices: usize,

    /// Number of graphs to generate
    #[arg(short, long, default_value_t = 1)]
    graphs: usize,

    /// Worker threads (capped at available parallelism)
    #[arg(short, long, default_value_t = 1)]
    threads: usize,

    /// Directory for the generated JSON files and the log
    #[arg(short, long, default_value = "./temp")]
    output_dir: PathBuf,

    /// Log file name, relative to the output directory
    #[arg(long, default_value = "log.txt")]
    log_file: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn generation_started_string(index: usize) -> String {
    format!("Graph {}, Generation Started", index)
}

fn generation_finished_string(index: usize, description: &str) -> String {
    format!("Graph {}, Generation Finished {}", index, description)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting layergraph v{}", env!("CARGO_PKG_VERSION"));
    info!("Output directory: {:?}", args.output_dir);

    let output = OutputDirectory::new(&args.output_dir)?;
    let log = RunLog::new(output.path().join(&args.log_file))?;

    let params = GeneratorParams::new(args.depth, args.new_vertices);
    let mut controller = GenerationController::new(args.threads, args.graphs, params);
    info!(
        "Generating {} graphs (depth {}, {} new vertices) on {} threads",
        controller.graphs_count(),
        params.depth,
        params.new_vertices_count,
        controller.threads_count()
    );

    let errors: Mutex<Vec<anyhow::Error>> = Mutex::new(Vec::new());
    let mut graphs: Vec<Graph> = Vec::with_capacity(args.graphs);

    controller.generate(
        |index| {
            if let Err(e) = log.log(&generation_started_string(index)) {
                errors.lock().push(e);
            }
        },
        |index, graph| {
            let description = printing::describe(&graph);
            let written = log
                .log(&generation_finished_string(index, &description))
                .and_then(|_| output.write_graph(index, &graph));
            if let Err(e) = written {
                errors.lock().push(e);
            }
            graphs.push(graph);
        },
    )?;

    if let Some(e) = errors.into_inner().into_iter().next() {
        return Err(e);
    }

    info!("Generated {} graphs into {:?}", graphs.len(), output.path());
    Ok(())
}
