// Job queue with worker threads, shared by tree growth and batch generation
//
// Workers block on a condition variable while the queue is empty but other
// jobs are still running (they may push more work). Once the queue is empty
// and nothing is in flight, every worker returns and the pool is joined.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::thread;
use tracing::trace;

use crate::{Error, Result};

struct QueueState<J> {
    jobs: VecDeque<J>,
    in_flight: usize,
}

/// FIFO job queue with in-flight accounting
pub struct JobQueue<J> {
    state: Mutex<QueueState<J>>,
    condvar: Condvar,
}

impl<J> JobQueue<J> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                jobs: VecDeque::new(),
                in_flight: 0,
            }),
            condvar: Condvar::new(),
        }
    }

    /// Enqueue a job and wake one waiting worker
    pub fn push(&self, job: J) {
        let mut state = self.state.lock();
        state.jobs.push_back(job);
        self.condvar.notify_one();
    }

    /// Take the next job.
    ///
    /// Blocks while the queue is empty and other jobs are in flight. Returns
    /// `None` once the queue is empty and no job is running. Every `Some` must
    /// be matched by a call to [`JobQueue::done`].
    pub fn pop(&self) -> Option<J> {
        let mut state = self.state.lock();
        loop {
            if let Some(job) = state.jobs.pop_front() {
                state.in_flight += 1;
                return Some(job);
            }
            if state.in_flight == 0 {
                return None;
            }
            self.condvar.wait(&mut state);
        }
    }

    /// Mark one popped job as finished
    pub fn done(&self) {
        let mut state = self.state.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
        if state.in_flight == 0 && state.jobs.is_empty() {
            self.condvar.notify_all();
        }
    }

    /// Drop every queued job, returning how many were discarded
    pub fn clear(&self) -> usize {
        let mut state = self.state.lock();
        let dropped = state.jobs.len();
        state.jobs.clear();
        if state.in_flight == 0 {
            self.condvar.notify_all();
        }
        dropped
    }

    /// Jobs waiting to be picked up
    pub fn pending_jobs(&self) -> usize {
        self.state.lock().jobs.len()
    }

    /// Jobs popped but not yet marked done
    pub fn in_flight(&self) -> usize {
        self.state.lock().in_flight
    }
}

impl<J> Default for JobQueue<J> {
    fn default() -> Self {
        Self::new()
    }
}

impl<J> FromIterator<J> for JobQueue<J> {
    fn from_iter<I: IntoIterator<Item = J>>(iter: I) -> Self {
        let queue = Self::new();
        queue.state.lock().jobs.extend(iter);
        queue
    }
}

/// Calls `done` even if the job handler unwinds, so other workers never hang
struct InFlight<'a, J>(&'a JobQueue<J>);

impl<J> Drop for InFlight<'_, J> {
    fn drop(&mut self) {
        self.0.done();
    }
}

/// Hardware threads available to this process, at least 1
pub fn available_parallelism() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Drain `queue` with `threads` named workers and wait for all of them.
///
/// A non-empty queue always gets at least one worker. The first handler error
/// discards the remaining queued jobs; jobs already running still finish and
/// the error is returned once every worker has exited.
pub fn run_workers<J, F>(
    threads: usize,
    name: &str,
    queue: &JobQueue<J>,
    handler: F,
) -> Result<()>
where
    J: Send,
    F: Fn(J) -> Result<()> + Sync,
{
    let threads = if queue.pending_jobs() > 0 {
        threads.max(1)
    } else {
        threads
    };
    let first_error: Mutex<Option<Error>> = Mutex::new(None);

    thread::scope(|scope| -> Result<()> {
        for worker_id in 0..threads {
            let handler = &handler;
            let first_error = &first_error;
            thread::Builder::new()
                .name(format!("{}-{}", name, worker_id))
                .spawn_scoped(scope, move || {
                    trace!(worker_id, "{} worker started", name);
                    while let Some(job) = queue.pop() {
                        let _in_flight = InFlight(queue);
                        if let Err(e) = handler(job) {
                            let dropped = queue.clear();
                            trace!(worker_id, dropped, "{} worker failed: {}", name, e);
                            let mut slot = first_error.lock();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                        }
                    }
                    trace!(worker_id, "{} worker stopped", name);
                })
                .map_err(Error::WorkerSpawn)?;
        }
        Ok(())
    })?;

    match first_error.into_inner() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
