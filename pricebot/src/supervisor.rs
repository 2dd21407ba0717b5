//! Lifecycle of the bot process: at most one running instance, however many start requests arrive.
//!
//! Both entry points go through [`BotSupervisor::begin_start`], a single compare-and-set from
//! `Uninitialized` to `Starting`. The launch future marks the supervisor `Running` right before it
//! enters the message loop; whenever the launch returns, the supervisor is back to `Uninitialized`.

use anyhow::{Context, Result};
use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const BACKGROUND_STARTING: &str = "Bot is starting in the background.";
pub const ALREADY_RUNNING: &str = "Bot is already running.";

const RUNTIME_THREAD_NAME: &str = "pricebot-runtime";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LifecycleState {
    Uninitialized = 0,
    Starting = 1,
    Running = 2,
}

impl LifecycleState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Starting,
            2 => Self::Running,
            _ => Self::Uninitialized,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// Another start request won; carries the state it observed.
    AlreadyActive(LifecycleState),
}

impl StartOutcome {
    /// Human-readable status for the background entry point.
    pub fn status_message(&self) -> &'static str {
        match self {
            Self::Started => BACKGROUND_STARTING,
            Self::AlreadyActive(_) => ALREADY_RUNNING,
        }
    }
}

/// Returns the supervisor to `Uninitialized` when dropped, including while unwinding.
struct ResetOnExit(BotSupervisor);

impl Drop for ResetOnExit {
    fn drop(&mut self) {
        self.0.reset();
    }
}

/// Cheap to clone; clones share the same state.
#[derive(Clone, Default)]
pub struct BotSupervisor {
    state: Arc<AtomicU8>,
}

impl BotSupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LifecycleState {
        LifecycleState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Claims the start slot. Only one caller sees `Started` until [`reset`](Self::reset).
    pub fn begin_start(&self) -> StartOutcome {
        match self.state.compare_exchange(
            LifecycleState::Uninitialized as u8,
            LifecycleState::Starting as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => StartOutcome::Started,
            Err(current) => StartOutcome::AlreadyActive(LifecycleState::from_u8(current)),
        }
    }

    pub fn mark_running(&self) {
        self.state
            .store(LifecycleState::Running as u8, Ordering::Release);
        info!("Bot is running");
    }

    pub fn reset(&self) {
        self.state
            .store(LifecycleState::Uninitialized as u8, Ordering::Release);
    }

    /// Foreground start: runs `launch` to completion on the caller's runtime.
    pub async fn start<F, Fut>(&self, launch: F) -> Result<StartOutcome>
    where
        F: FnOnce(BotSupervisor) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        if let outcome @ StartOutcome::AlreadyActive(state) = self.begin_start() {
            info!(state = ?state, "Start requested while bot is active; ignoring");
            return Ok(outcome);
        }

        let _reset = ResetOnExit(self.clone());
        launch(self.clone()).await.map(|()| StartOutcome::Started)
    }

    /// Background start: spawns a named OS thread with its own tokio runtime and returns at once.
    pub fn spawn_background<F, Fut>(&self, launch: F) -> Result<StartOutcome>
    where
        F: FnOnce(BotSupervisor) -> Fut + Send + 'static,
        Fut: Future<Output = Result<()>> + 'static,
    {
        if let outcome @ StartOutcome::AlreadyActive(state) = self.begin_start() {
            info!(state = ?state, "Background start requested while bot is active; ignoring");
            return Ok(outcome);
        }

        let supervisor = self.clone();
        let spawned = std::thread::Builder::new()
            .name(RUNTIME_THREAD_NAME.to_string())
            .spawn(move || {
                let _reset = ResetOnExit(supervisor.clone());
                match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
                    Ok(runtime) => {
                        if let Err(e) = runtime.block_on(launch(supervisor.clone())) {
                            error!(error = %e, "Background bot stopped with error");
                        }
                    }
                    Err(e) => error!(error = %e, "Failed to build background runtime"),
                }
            });

        if let Err(e) = spawned {
            warn!(error = %e, "Failed to spawn bot thread");
            self.reset();
            return Err(e).context("Failed to spawn bot thread");
        }
        info!(thread = RUNTIME_THREAD_NAME, "{}", BACKGROUND_STARTING);
        Ok(StartOutcome::Started)
    }
}
