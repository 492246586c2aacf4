//! Single-flight admission and lifecycle for generation jobs.
//!
//! At most one [`GenerationJob`] runs at a time. Every accepted submission
//! produces exactly one terminal [`JobEvent`] (`Completed` or `Failed`)
//! followed by exactly one `Finished`. Both are sent while the scheduler's
//! slot lock is held, together with clearing the slot, so a caller that has
//! received `Finished` can always submit again.

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures_util::FutureExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::ai::RemoteCapabilities;
use crate::job::{GenerationJob, GenerationOutcome, VariationResult};
use crate::request::GenerationRequest;

/// Description delivered for a job dropped during shutdown.
pub const ABANDONED: &str = "abandoned at shutdown";

/// Identifier of an accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Answer to [`JobScheduler::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted(JobId),
    /// Another job is still running.
    Busy,
    /// The scheduler has been shut down.
    Closed,
}

impl Admission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Admission::Accepted(_))
    }

    pub fn job_id(&self) -> Option<JobId> {
        match self {
            Admission::Accepted(id) => Some(*id),
            _ => None,
        }
    }
}

/// Notifications delivered to the submitting side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEvent {
    Completed {
        job: JobId,
        results: Vec<VariationResult>,
    },
    Failed {
        job: JobId,
        error: String,
    },
    Finished {
        job: JobId,
    },
}

impl JobEvent {
    pub fn job(&self) -> JobId {
        match self {
            JobEvent::Completed { job, .. }
            | JobEvent::Failed { job, .. }
            | JobEvent::Finished { job } => *job,
        }
    }
}

pub type JobEvents = mpsc::UnboundedReceiver<JobEvent>;

/// What [`JobScheduler::shutdown`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReport {
    Idle,
    Completed(JobId),
    Abandoned(JobId),
    /// Another shutdown call is already waiting on this job and will report
    /// how it ended.
    InProgress(JobId),
}

struct ActiveJob {
    id: JobId,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

type Slot = Arc<Mutex<Option<ActiveJob>>>;

fn lock_slot(slot: &Mutex<Option<ActiveJob>>) -> MutexGuard<'_, Option<ActiveJob>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct JobScheduler {
    capabilities: RemoteCapabilities,
    slot: Slot,
    events: mpsc::UnboundedSender<JobEvent>,
    next_id: AtomicU64,
    closed: AtomicBool,
}

impl JobScheduler {
    /// Create a scheduler and the receiver its events arrive on.
    pub fn new(capabilities: RemoteCapabilities) -> (Self, JobEvents) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            capabilities,
            slot: Arc::new(Mutex::new(None)),
            events: tx,
            next_id: AtomicU64::new(1),
            closed: AtomicBool::new(false),
        };
        (scheduler, rx)
    }

    pub fn capabilities(&self) -> &RemoteCapabilities {
        &self.capabilities
    }

    /// Start `request` in the background unless a job is already running.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self, request: GenerationRequest) -> Admission {
        if self.closed.load(Ordering::SeqCst) {
            debug!("submission after shutdown rejected");
            return Admission::Closed;
        }

        let mut slot = lock_slot(&self.slot);
        if let Some(active) = slot.as_ref() {
            debug!(running = %active.id, "scheduler busy; submission rejected");
            return Admission::Busy;
        }

        let id = JobId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let job = GenerationJob::new(request, self.capabilities.clone());
        let cancel = job.cancel_token();
        info!(
            job = %id,
            context = %job.request().context(),
            variations = job.request().variation_count(),
            "job accepted"
        );

        let task = tokio::spawn(drive(id, job, self.slot.clone(), self.events.clone()));
        *slot = Some(ActiveJob {
            id,
            cancel,
            task: Some(task),
        });
        Admission::Accepted(id)
    }

    /// Ask the running job, if any, to stop before its next remote call.
    /// Returns whether there was a job to signal.
    pub fn request_cancel(&self) -> bool {
        match lock_slot(&self.slot).as_ref() {
            Some(active) => {
                info!(job = %active.id, "cancellation requested");
                active.cancel.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_busy(&self) -> bool {
        lock_slot(&self.slot).is_some()
    }

    pub fn current_job(&self) -> Option<JobId> {
        lock_slot(&self.slot).as_ref().map(|a| a.id)
    }

    /// Stop accepting work, cancel the running job and give it `grace` to
    /// finish. A job still running after that is aborted and reported as
    /// failed with [`ABANDONED`].
    pub async fn shutdown(&self, grace: Duration) -> ShutdownReport {
        self.closed.store(true, Ordering::SeqCst);

        let (id, task) = {
            let mut slot = lock_slot(&self.slot);
            match slot.as_mut() {
                Some(active) => {
                    active.cancel.cancel();
                    (active.id, active.task.take())
                }
                None => return ShutdownReport::Idle,
            }
        };

        let Some(mut task) = task else {
            debug!(job = %id, "shutdown already waiting on job");
            return ShutdownReport::InProgress(id);
        };

        info!(job = %id, grace_ms = grace.as_millis() as u64, "waiting for running job");
        if tokio::time::timeout(grace, &mut task).await.is_ok() {
            info!(job = %id, "job finished within grace period");
            return ShutdownReport::Completed(id);
        }

        warn!(job = %id, "job did not finish in time; abandoning");
        task.abort();

        let mut slot = lock_slot(&self.slot);
        if slot.as_ref().is_some_and(|a| a.id == id) {
            *slot = None;
            let _ = self.events.send(JobEvent::Failed {
                job: id,
                error: ABANDONED.to_string(),
            });
            let _ = self.events.send(JobEvent::Finished { job: id });
            ShutdownReport::Abandoned(id)
        } else {
            // It completed between the timeout and the abort.
            ShutdownReport::Completed(id)
        }
    }
}

async fn drive(
    id: JobId,
    job: GenerationJob,
    slot: Slot,
    events: mpsc::UnboundedSender<JobEvent>,
) {
    let outcome = AssertUnwindSafe(job.run())
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| {
            let msg = panic_message(panic.as_ref());
            warn!(job = %id, panic = %msg, "job panicked");
            GenerationOutcome::FatalError(format!("internal error: {msg}"))
        });

    let terminal = match outcome {
        GenerationOutcome::Success(results) => JobEvent::Completed { job: id, results },
        GenerationOutcome::FatalError(error) => JobEvent::Failed { job: id, error },
    };

    let mut slot = lock_slot(&slot);
    if !slot.as_ref().is_some_and(|a| a.id == id) {
        // Shutdown already reported this job.
        return;
    }
    if events.send(terminal).is_err() {
        debug!(job = %id, "event receiver dropped");
    }
    *slot = None;
    let _ = events.send(JobEvent::Finished { job: id });
    info!(job = %id, "job finished");
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "job panicked".to_string()
    }
}
