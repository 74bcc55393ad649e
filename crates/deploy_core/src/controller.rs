//! Phase state machine: Idle -> Deploying -> Success -> Idle.
//!
//! The controller owns the token draft and the per-attempt sequencer state.
//! It never touches timers; callers hand it the events produced by a
//! [`crate::DeploymentScheduler`] and cancel that scheduler when `reset`
//! reports an attempt.

use chrono::{DateTime, Utc};
use rand::Rng;
use shared::{
    domain::{AttemptId, DeploymentPhase, TokenDraft, TokenField},
    error::DraftError,
    protocol::{DeploymentReceipt, SequencerEvent},
};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::{
    address::{explorer_address_url, generate_address},
    sequencer::SequencerRuntime,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("cannot start deployment: {0}")]
    InvalidDraft(#[from] DraftError),
    #[error("deployment cannot start from phase {0:?}")]
    NotIdle(DeploymentPhase),
    #[error("nothing to reset while phase is {0:?}")]
    NotFinished(DeploymentPhase),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Revealed { index: usize, progress_percent: u8 },
    AlreadyRevealed(usize),
    Completed,
    /// Event from an attempt that is no longer running.
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct ViewController {
    draft: TokenDraft,
    phase: DeploymentPhase,
    runtime: SequencerRuntime,
    last_attempt: Option<AttemptId>,
    completed_at: Option<DateTime<Utc>>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &TokenDraft {
        &self.draft
    }

    pub fn phase(&self) -> DeploymentPhase {
        self.phase
    }

    pub fn runtime(&self) -> &SequencerRuntime {
        &self.runtime
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn is_valid(&self) -> bool {
        self.draft.is_valid()
    }

    pub fn update_field(&mut self, field: TokenField, value: impl Into<String>) {
        self.draft.set_field(field, value);
    }

    /// Enters Deploying with a fresh runtime and returns the attempt the
    /// caller must schedule. Leaves all state untouched on rejection.
    pub fn deploy(&mut self) -> Result<AttemptId, ControllerError> {
        if self.phase != DeploymentPhase::Idle {
            return Err(ControllerError::NotIdle(self.phase));
        }
        self.draft.validate()?;

        let attempt = self.last_attempt.map(AttemptId::next).unwrap_or(AttemptId(1));
        self.last_attempt = Some(attempt);
        self.runtime = SequencerRuntime::start(attempt);
        self.completed_at = None;
        self.phase = DeploymentPhase::Deploying;
        info!(%attempt, symbol = %self.draft.symbol, "deployment started");
        Ok(attempt)
    }

    pub fn apply(&mut self, event: SequencerEvent) -> EventOutcome {
        self.apply_with_rng(event, &mut rand::rng())
    }

    pub fn apply_with_rng<R: Rng + ?Sized>(
        &mut self,
        event: SequencerEvent,
        rng: &mut R,
    ) -> EventOutcome {
        if self.phase != DeploymentPhase::Deploying || self.runtime.attempt() != Some(event.attempt())
        {
            debug!(?event, phase = ?self.phase, "ignoring stale sequencer event");
            return EventOutcome::Stale;
        }

        match event {
            SequencerEvent::StepRevealed { index, .. } => {
                if self.runtime.reveal(index) {
                    EventOutcome::Revealed {
                        index,
                        progress_percent: self.runtime.progress_percent(),
                    }
                } else {
                    EventOutcome::AlreadyRevealed(index)
                }
            }
            SequencerEvent::Completed { attempt } => {
                let address = generate_address(rng);
                info!(%attempt, %address, "deployment completed");
                self.runtime.set_address(address);
                self.completed_at = Some(Utc::now());
                self.phase = DeploymentPhase::Success;
                EventOutcome::Completed
            }
        }
    }

    /// Rolls an attempt that never got scheduled back to Idle, keeping the
    /// draft. Returns false when `attempt` is not the one deploying.
    pub fn abort(&mut self, attempt: AttemptId) -> bool {
        if self.phase != DeploymentPhase::Deploying || self.runtime.attempt() != Some(attempt) {
            return false;
        }
        self.runtime = SequencerRuntime::default();
        self.completed_at = None;
        self.phase = DeploymentPhase::Idle;
        info!(%attempt, "deployment aborted before scheduling");
        true
    }

    /// Returns to Idle with the default draft. Yields the attempt whose
    /// scheduled tasks the caller must cancel.
    pub fn reset(&mut self) -> Result<Option<AttemptId>, ControllerError> {
        if !self.phase.is_terminal() {
            return Err(ControllerError::NotFinished(self.phase));
        }
        let previous = self.runtime.attempt();
        self.draft = TokenDraft::default();
        self.runtime = SequencerRuntime::default();
        self.completed_at = None;
        self.phase = DeploymentPhase::Idle;
        info!(?previous, "deployment view reset");
        Ok(previous)
    }

    pub fn receipt(&self, explorer_base: &Url) -> Option<DeploymentReceipt> {
        if self.phase != DeploymentPhase::Success {
            return None;
        }
        let attempt = self.runtime.attempt()?;
        let address = self.runtime.address()?.clone();
        let explorer_url = explorer_address_url(explorer_base, &address).ok()?;
        Some(DeploymentReceipt {
            attempt,
            token: self.draft.clone(),
            address,
            explorer_url: explorer_url.into(),
            deployed_at: self.completed_at.unwrap_or_else(Utc::now),
        })
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
