use parking_lot::Mutex;
use tracing::debug;

use crate::background::{available_parallelism, run_workers, JobQueue};
use crate::generator::{GeneratorParams, GraphGenerator};
use crate::graph::Graph;
use crate::Result;

/// "Generate graph number `index`"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GenerationJob {
    index: usize,
}

/// User hooks, guarded together so no two invocations overlap
struct Callbacks<S, F> {
    on_started: S,
    on_finished: F,
}

/// Generates a batch of independent graphs on a fixed pool of workers
#[derive(Debug, Clone)]
pub struct GenerationController {
    threads_count: usize,
    graphs_count: usize,
    generator: GraphGenerator,
}

impl GenerationController {
    /// `threads_count` is capped at the available hardware parallelism
    pub fn new(threads_count: usize, graphs_count: usize, params: GeneratorParams) -> Self {
        Self {
            threads_count: threads_count.min(available_parallelism()),
            graphs_count,
            generator: GraphGenerator::new(params),
        }
    }

    pub fn threads_count(&self) -> usize {
        self.threads_count
    }

    pub fn graphs_count(&self) -> usize {
        self.graphs_count
    }

    /// Generate every graph, reporting each one through the callbacks.
    ///
    /// `on_started(i)` fires before graph `i` is generated and
    /// `on_finished(i, graph)` after. Callbacks never run concurrently with
    /// each other, but graphs complete in no particular order. Returns once
    /// every job is done, or with the first generation error.
    pub fn generate<S, F>(&mut self, on_started: S, on_finished: F) -> Result<()>
    where
        S: FnMut(usize) + Send,
        F: FnMut(usize, Graph) + Send,
    {
        let queue: JobQueue<GenerationJob> = (0..self.graphs_count)
            .map(|index| GenerationJob { index })
            .collect();
        let callbacks = Mutex::new(Callbacks {
            on_started,
            on_finished,
        });
        let generator = &self.generator;

        debug!(
            graphs = self.graphs_count,
            threads = self.threads_count,
            "starting batch generation"
        );

        run_workers(self.threads_count, "graph-gen", &queue, |job| {
            {
                let mut callbacks = callbacks.lock();
                (callbacks.on_started)(job.index);
            }
            let graph = generator.generate()?;
            debug!(index = job.index, vertices = graph.vertex_count(), "job finished");
            let mut callbacks = callbacks.lock();
            (callbacks.on_finished)(job.index, graph);
            Ok(())
        })
    }
}
