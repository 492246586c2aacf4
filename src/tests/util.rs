use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::ai::{TextModel, VisionModel};
use crate::error::RemoteError;
use crate::request::ImageAttachment;

type Script = VecDeque<Result<String, String>>;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

fn scripted_error(msg: String) -> RemoteError {
    RemoteError::Status {
        status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        body: msg,
    }
}

/// Lets a test hold a fake model inside its remote call.
#[derive(Clone, Default)]
pub struct Gate {
    started: Arc<Notify>,
    release: Arc<Notify>,
}

impl Gate {
    /// Wait until the model has entered a call.
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    /// Let one pending (or the next) call return.
    pub fn release(&self) {
        self.release.notify_one();
    }

    async fn pass(&self) {
        self.started.notify_one();
        self.release.notified().await;
    }
}

/// Text model that replays a fixed script of replies and errors.
#[derive(Default)]
pub struct ScriptedText {
    script: Mutex<Script>,
    payloads: Mutex<Vec<String>>,
    calls: AtomicUsize,
    gate: Option<Gate>,
}

impl ScriptedText {
    /// `Err(msg)` entries become a 500 status error.
    pub fn new(script: Vec<Result<String, String>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Self::default()
        }
    }

    pub fn replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(replies.into_iter().map(|r| Ok(r.into())).collect())
    }

    /// Like [`replies`](Self::replies) but every call blocks on the returned gate.
    pub fn gated<I, S>(replies: I) -> (Self, Gate)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let gate = Gate::default();
        let mut model = Self::replies(replies);
        model.gate = Some(gate.clone());
        (model, gate)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn payloads(&self) -> Vec<String> {
        lock(&self.payloads).clone()
    }
}

#[async_trait]
impl TextModel for ScriptedText {
    async fn generate_text(&self, payload: &str) -> Result<String, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.payloads).push(payload.to_string());
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
        match lock(&self.script).pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(msg)) => Err(scripted_error(msg)),
            None => Err(RemoteError::MissingContent),
        }
    }
}

/// Vision model that replays a fixed script.
#[derive(Default)]
pub struct ScriptedVision {
    script: Mutex<Script>,
    instructions: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedVision {
    pub fn new(script: Vec<Result<String, String>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Self::default()
        }
    }

    pub fn replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(replies.into_iter().map(|r| Ok(r.into())).collect())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn instructions(&self) -> Vec<String> {
        lock(&self.instructions).clone()
    }
}

#[async_trait]
impl VisionModel for ScriptedVision {
    async fn generate_from_image(
        &self,
        instruction: &str,
        _image: &ImageAttachment,
    ) -> Result<String, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.instructions).push(instruction.to_string());
        match lock(&self.script).pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(msg)) => Err(scripted_error(msg)),
            None => Err(RemoteError::MissingContent),
        }
    }
}

/// Text model whose call never completes.
pub struct HangingText;

#[async_trait]
impl TextModel for HangingText {
    async fn generate_text(&self, _payload: &str) -> Result<String, RemoteError> {
        std::future::pending().await
    }
}

/// Text model that panics inside the call.
pub struct PanickingText;

#[async_trait]
impl TextModel for PanickingText {
    async fn generate_text(&self, _payload: &str) -> Result<String, RemoteError> {
        panic!("scripted panic in text model")
    }
}
