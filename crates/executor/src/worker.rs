//! The search worker: a dedicated thread serving commands in arrival order.
//!
//! Callers submit commands to a bounded inbox and receive each result as a
//! [`Response`] on a channel. The worker processes one request at a time, so a
//! search submitted after a rebuild always observes that rebuild's generation
//! (or the previous one, if the rebuild failed).

use crossbeam_channel::{Receiver, Sender};
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, error, info};
use tracksearch_core::{Error, Result, TrackPayload};
use tracksearch_engine::{IndexManager, IndexState, SearchConfig};

use crate::{Command, Executor, Output, Response};

/// Worker metrics snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerStats {
    /// Requests waiting in the inbox.
    pub queue_depth: usize,
    /// Requests currently being executed (0 or 1).
    pub in_flight: usize,
    /// Requests answered since the worker started.
    pub completed: u64,
}

struct Envelope {
    request: u64,
    command: Command,
}

struct WorkerInner {
    queue: Mutex<VecDeque<Envelope>>,
    work_ready: Condvar,
    drain_cond: Condvar,
    shutdown: AtomicBool,
    started: AtomicBool,
    sequence: AtomicU64,
    queue_depth: AtomicUsize,
    in_flight: AtomicUsize,
    capacity: usize,
    completed: AtomicU64,
}

/// Everything the worker thread takes ownership of when it starts.
pub(crate) struct Launch {
    inner: Arc<WorkerInner>,
    executor: Executor,
    outbox: Sender<Response>,
    name: String,
}

impl Launch {
    fn start(self) -> Result<JoinHandle<()>> {
        let name = self.name.clone();
        let handle = std::thread::Builder::new()
            .name(name)
            .spawn(move || worker_loop(&self.inner, &self.executor, &self.outbox))?;
        Ok(handle)
    }
}

/// Handle to a running search worker.
///
/// Dropping the handle shuts the worker down after it has answered every
/// request already accepted.
///
/// # Example
///
/// ```
/// use tracksearch_core::{DocumentId, TrackRecord};
/// use tracksearch_engine::SearchConfig;
/// use tracksearch_executor::{Output, SearchWorker};
///
/// let (worker, responses) = SearchWorker::spawn(SearchConfig::default()).unwrap();
/// worker
///     .update_index(vec![TrackRecord::new(7, "Album", "Artist", "Night Song")])
///     .unwrap();
/// let request = worker.search("night").unwrap();
///
/// let _rebuilt = responses.recv().unwrap();
/// let found = responses.recv().unwrap();
/// assert_eq!(found.request, request);
/// assert_eq!(found.output, Output::PerformSearch(vec![DocumentId::Int(7)]));
/// ```
pub struct SearchWorker {
    inner: Arc<WorkerInner>,
    manager: Arc<IndexManager>,
    handle: Mutex<Option<JoinHandle<()>>>,
    name: String,
}

impl SearchWorker {
    /// Validate `config` and start a worker thread.
    ///
    /// Returns the worker handle and the receiving end of its outbox.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for an invalid config, or `Error::Io` if
    /// the thread cannot be spawned.
    pub fn spawn(config: SearchConfig) -> Result<(SearchWorker, Receiver<Response>)> {
        let (worker, responses, launch) = Self::create(config)?;
        worker.attach(launch)?;
        Ok((worker, responses))
    }

    /// Build the worker without starting its thread.
    pub(crate) fn create(
        config: SearchConfig,
    ) -> Result<(SearchWorker, Receiver<Response>, Launch)> {
        config.validate()?;

        let inner = Arc::new(WorkerInner {
            queue: Mutex::new(VecDeque::with_capacity(config.inbox_capacity.min(64))),
            work_ready: Condvar::new(),
            drain_cond: Condvar::new(),
            shutdown: AtomicBool::new(false),
            started: AtomicBool::new(false),
            sequence: AtomicU64::new(0),
            queue_depth: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            capacity: config.inbox_capacity,
            completed: AtomicU64::new(0),
        });
        let manager = Arc::new(IndexManager::new());
        let executor = Executor::with_manager(Arc::clone(&manager), &config);
        let (outbox, responses) = crossbeam_channel::unbounded();

        let launch = Launch {
            inner: Arc::clone(&inner),
            executor,
            outbox,
            name: config.worker_name.clone(),
        };
        let worker = SearchWorker {
            inner,
            manager,
            handle: Mutex::new(None),
            name: config.worker_name,
        };
        Ok((worker, responses, launch))
    }

    /// Start the thread prepared by [`SearchWorker::create`].
    pub(crate) fn attach(&self, launch: Launch) -> Result<()> {
        let handle = launch.start()?;
        *self.handle.lock() = Some(handle);
        self.inner.started.store(true, AtomicOrdering::Release);
        info!(
            target: "tracksearch::worker",
            worker = %self.name,
            capacity = self.inner.capacity,
            "Search worker started"
        );
        Ok(())
    }

    /// Queue a command and return its request number.
    ///
    /// Request numbers start at 1 and increase by one per accepted command.
    ///
    /// # Errors
    ///
    /// Returns `Error::Backpressure` when the inbox is full and
    /// `Error::Shutdown` once the worker has been shut down. Neither consumes
    /// a request number.
    pub fn submit(&self, command: Command) -> Result<u64> {
        let request = {
            let mut queue = self.inner.queue.lock();
            if self.inner.shutdown.load(AtomicOrdering::Acquire) {
                return Err(Error::Shutdown);
            }
            if queue.len() >= self.inner.capacity {
                debug!(
                    target: "tracksearch::worker",
                    action = command.action(),
                    capacity = self.inner.capacity,
                    "Inbox full, request rejected"
                );
                return Err(Error::Backpressure {
                    capacity: self.inner.capacity,
                });
            }
            let request = self.inner.sequence.fetch_add(1, AtomicOrdering::Relaxed) + 1;
            queue.push_back(Envelope { request, command });
            self.inner.queue_depth.fetch_add(1, AtomicOrdering::Release);
            request
        };

        self.inner.work_ready.notify_one();
        Ok(request)
    }

    /// Queue a `PERFORM_SEARCH` request.
    pub fn search(&self, query: impl Into<String>) -> Result<u64> {
        self.submit(Command::PerformSearch(query.into()))
    }

    /// Queue an `UPDATE_SEARCH_INDEX` request.
    pub fn update_index(&self, payload: impl Into<TrackPayload>) -> Result<u64> {
        self.submit(Command::UpdateSearchIndex(payload.into()))
    }

    /// Block until every accepted request has been answered.
    ///
    /// The worker keeps running afterwards.
    pub fn drain(&self) {
        let mut queue = self.inner.queue.lock();
        while self.inner.queue_depth.load(AtomicOrdering::Acquire) > 0
            || self.inner.in_flight.load(AtomicOrdering::Acquire) > 0
        {
            if !self.inner.started.load(AtomicOrdering::Acquire) {
                // Nothing will ever service the queue
                return;
            }
            self.inner.drain_cond.wait(&mut queue);
        }
    }

    /// Stop accepting requests, answer the ones already queued, and join the
    /// worker thread. Calling it again is a no-op.
    pub fn shutdown(&self) {
        self.inner.shutdown.store(true, AtomicOrdering::Release);
        {
            let _queue = self.inner.queue.lock();
            self.inner.work_ready.notify_all();
        }

        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                error!(
                    target: "tracksearch::worker",
                    worker = %self.name,
                    "Search worker thread panicked"
                );
            }
            info!(
                target: "tracksearch::worker",
                worker = %self.name,
                completed = self.inner.completed.load(AtomicOrdering::Relaxed),
                "Search worker stopped"
            );
        }
    }

    /// True once `shutdown` has been called.
    pub fn is_shutdown(&self) -> bool {
        self.inner.shutdown.load(AtomicOrdering::Acquire)
    }

    /// Return a snapshot of worker metrics.
    pub fn stats(&self) -> WorkerStats {
        WorkerStats {
            queue_depth: self.inner.queue_depth.load(AtomicOrdering::Relaxed),
            in_flight: self.inner.in_flight.load(AtomicOrdering::Relaxed),
            completed: self.inner.completed.load(AtomicOrdering::Relaxed),
        }
    }

    /// Lifecycle state of the worker's index.
    pub fn index_state(&self) -> IndexState {
        self.manager.state()
    }

    /// The index manager the worker publishes to.
    ///
    /// Reading `current()` from another thread is safe at any time.
    pub fn manager(&self) -> &Arc<IndexManager> {
        &self.manager
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Decrements `in_flight` and wakes drain waiters on drop, including on unwind.
struct InFlightGuard<'a> {
    inner: &'a WorkerInner,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.inner.completed.fetch_add(1, AtomicOrdering::Relaxed);
        self.inner.in_flight.fetch_sub(1, AtomicOrdering::Release);

        if self.inner.queue_depth.load(AtomicOrdering::Acquire) == 0 {
            let _queue = self.inner.queue.lock();
            self.inner.drain_cond.notify_all();
        }
    }
}

fn panic_reason(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "(non-string panic)".to_string())
}

fn worker_loop(inner: &WorkerInner, executor: &Executor, outbox: &Sender<Response>) {
    loop {
        let envelope = {
            let mut queue = inner.queue.lock();
            loop {
                if let Some(envelope) = queue.pop_front() {
                    inner.queue_depth.fetch_sub(1, AtomicOrdering::Release);
                    inner.in_flight.fetch_add(1, AtomicOrdering::Release);
                    break envelope;
                }
                if inner.shutdown.load(AtomicOrdering::Acquire) {
                    return;
                }
                inner.work_ready.wait(&mut queue);
            }
        };

        let _guard = InFlightGuard { inner };
        let Envelope { request, command } = envelope;
        let action = command.action();

        let output = match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            executor.execute_to_output(command)
        })) {
            Ok(output) => output,
            Err(payload) => {
                let reason = panic_reason(payload.as_ref());
                error!(
                    target: "tracksearch::worker",
                    request,
                    action,
                    reason = %reason,
                    "Search request panicked"
                );
                Output::Error(Error::Internal { reason })
            }
        };

        if outbox.send(Response { request, output }).is_err() {
            debug!(
                target: "tracksearch::worker",
                request,
                action,
                "Response receiver dropped, discarding output"
            );
        }
    }
}
