//! Glue between the front end and the generation core.
//!
//! The controller owns the scheduler, the event receiver and the favorites
//! library. It submits requests, waits for the job's events and hands the
//! outcome back for rendering.

use std::future::Future;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use tracing::{debug, info};

use crate::ai::RemoteCapabilities;
use crate::error::SubmitError;
use crate::forms::BaseOptions;
use crate::job::GenerationOutcome;
use crate::library::{PromptLibrary, Upsert};
use crate::messages;
use crate::request::GenerationRequest;
use crate::scheduler::{Admission, JobEvent, JobEvents, JobId, JobScheduler, ShutdownReport};
use crate::text_utils::default_favorite_name;

pub struct Controller {
    scheduler: JobScheduler,
    events: JobEvents,
    library: PromptLibrary,
    shutdown_grace: Duration,
}

impl Controller {
    pub fn new(
        capabilities: RemoteCapabilities,
        library: PromptLibrary,
        shutdown_grace: Duration,
    ) -> Self {
        let (scheduler, events) = JobScheduler::new(capabilities);
        Self {
            scheduler,
            events,
            library,
            shutdown_grace,
        }
    }

    pub fn capabilities(&self) -> &RemoteCapabilities {
        self.scheduler.capabilities()
    }

    pub fn library(&self) -> &PromptLibrary {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut PromptLibrary {
        &mut self.library
    }

    pub fn is_busy(&self) -> bool {
        self.scheduler.is_busy()
    }

    /// The base prompt selected by `--base` or `--load`.
    pub fn resolve_base(&self, options: &BaseOptions) -> Result<Option<String>> {
        if let Some(base) = options.base.as_deref() {
            return Ok(Some(base.to_string()));
        }
        match options.load.as_deref() {
            None => Ok(None),
            Some(name) => self
                .library
                .find(name)
                .map(|entry| Some(entry.prompt.clone()))
                .ok_or_else(|| anyhow!(messages::not_found(name))),
        }
    }

    pub fn submit(&self, request: GenerationRequest) -> Result<JobId, SubmitError> {
        match self.scheduler.submit(request) {
            Admission::Accepted(id) => Ok(id),
            Admission::Busy => Err(SubmitError::Busy),
            Admission::Closed => Err(SubmitError::Closed),
        }
    }

    /// Wait for the terminal event of `job` and the `Finished` that follows it.
    ///
    /// When `interrupt` resolves the scheduler is shut down: the job is asked
    /// to stop and given the shutdown grace period, after which it is
    /// abandoned. Either way the job's own events end the wait.
    pub async fn wait_for<F>(&mut self, job: JobId, interrupt: F) -> GenerationOutcome
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(interrupt);
        let mut interrupted = false;
        let mut outcome = None;

        loop {
            tokio::select! {
                event = self.events.recv() => match event {
                    Some(JobEvent::Completed { job: id, results }) if id == job => {
                        outcome = Some(GenerationOutcome::Success(results));
                    }
                    Some(JobEvent::Failed { job: id, error }) if id == job => {
                        outcome = Some(GenerationOutcome::FatalError(error));
                    }
                    Some(JobEvent::Finished { job: id }) if id == job => break,
                    Some(other) => debug!(job = %other.job(), "ignoring event for another job"),
                    None => break,
                },
                _ = &mut interrupt, if !interrupted => {
                    interrupted = true;
                    if self.scheduler.request_cancel() {
                        eprintln!("{}", messages::CANCEL_REQUESTED);
                    }
                    let report = self.scheduler.shutdown(self.shutdown_grace).await;
                    info!(job = %job, ?report, "interrupted; scheduler stopped");
                }
            }
        }

        outcome.unwrap_or_else(|| {
            GenerationOutcome::FatalError(format!("job {job} ended without a result"))
        })
    }

    /// Submit `request` and wait for its outcome.
    pub async fn generate<F>(
        &mut self,
        request: GenerationRequest,
        interrupt: F,
    ) -> Result<GenerationOutcome, SubmitError>
    where
        F: Future<Output = ()>,
    {
        let job = self.submit(request)?;
        Ok(self.wait_for(job, interrupt).await)
    }

    /// Store the first successful text of `outcome` as a favorite.
    ///
    /// Without a name the favorite is named after the prompt's first words.
    /// Returns the status line for the user.
    pub fn save_outcome(&mut self, outcome: &GenerationOutcome, name: Option<&str>) -> Result<String> {
        let GenerationOutcome::Success(results) = outcome else {
            bail!(messages::NOTHING_TO_SAVE);
        };
        let Some(prompt) = results.iter().find_map(|r| r.text()) else {
            bail!(messages::NOTHING_TO_SAVE);
        };
        let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => default_favorite_name(prompt),
        };
        let status = match self.library.upsert(&name, prompt)? {
            Upsert::Inserted => messages::saved(&name),
            Upsert::Replaced => messages::replaced(&name),
        };
        info!(name = %name, "favorite saved");
        Ok(status)
    }

    /// Stop the scheduler, waiting up to the configured grace period.
    pub async fn shutdown(&self) -> ShutdownReport {
        self.scheduler.shutdown(self.shutdown_grace).await
    }
}
