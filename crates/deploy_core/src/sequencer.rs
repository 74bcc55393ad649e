//! Timed playback of the deployment steps.
//!
//! [`DeploymentScheduler`] owns the tokio tasks of one attempt: one task per
//! step plus one completion task, each sleeping until its own deadline measured
//! from the moment the attempt was scheduled. Tasks never wait on each other.
//! [`SequencerRuntime`] is the per-attempt state those events fold into.

use std::collections::BTreeSet;

use shared::{
    domain::{AttemptId, ContractAddress, DEPLOYMENT_STEPS, DEPLOY_DURATION},
    protocol::SequencerEvent,
};
use tokio::{
    runtime::Handle,
    sync::mpsc,
    task::JoinHandle,
    time::{sleep_until, Instant},
};
use tracing::{debug, info};

pub const TOTAL_STEPS: usize = DEPLOYMENT_STEPS.len();

/// Destination for sequencer events. Returns `false` once the receiving side
/// is gone.
pub trait EventSink: Send + Sync + 'static {
    fn emit(&self, event: SequencerEvent) -> bool;
}

impl EventSink for mpsc::UnboundedSender<SequencerEvent> {
    fn emit(&self, event: SequencerEvent) -> bool {
        self.send(event).is_ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequencerRuntime {
    attempt: Option<AttemptId>,
    revealed: BTreeSet<usize>,
    address: Option<ContractAddress>,
}

impl SequencerRuntime {
    pub fn start(attempt: AttemptId) -> Self {
        Self {
            attempt: Some(attempt),
            ..Self::default()
        }
    }

    pub fn attempt(&self) -> Option<AttemptId> {
        self.attempt
    }

    /// Marks a step visible. Ordering comes from the index, not from arrival,
    /// so a late timer cannot reorder the log. Returns `false` for unknown or
    /// already revealed steps.
    pub fn reveal(&mut self, index: usize) -> bool {
        index < TOTAL_STEPS && self.revealed.insert(index)
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }

    pub fn revealed(&self) -> impl Iterator<Item = usize> + '_ {
        self.revealed.iter().copied()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    pub fn progress(&self) -> f32 {
        self.revealed.len() as f32 / TOTAL_STEPS as f32 * 100.0
    }

    pub fn progress_percent(&self) -> u8 {
        self.progress().round() as u8
    }

    pub fn address(&self) -> Option<&ContractAddress> {
        self.address.as_ref()
    }

    pub(crate) fn set_address(&mut self, address: ContractAddress) {
        self.address = Some(address);
    }
}

struct ScheduledAttempt {
    attempt: AttemptId,
    tasks: Vec<JoinHandle<()>>,
}

impl ScheduledAttempt {
    fn abort(self) -> usize {
        let mut aborted = 0;
        for task in self.tasks {
            if !task.is_finished() {
                aborted += 1;
            }
            task.abort();
        }
        aborted
    }
}

pub struct DeploymentScheduler<S> {
    sink: S,
    runtime: Handle,
    active: Option<ScheduledAttempt>,
}

impl<S: EventSink + Clone> DeploymentScheduler<S> {
    pub fn new(sink: S, runtime: Handle) -> Self {
        Self {
            sink,
            runtime,
            active: None,
        }
    }

    /// Schedules every step of `attempt` relative to now. Any attempt still
    /// running is cancelled first.
    pub fn schedule(&mut self, attempt: AttemptId) {
        self.cancel();

        let started_at = Instant::now();
        let mut tasks = Vec::with_capacity(TOTAL_STEPS + 1);
        for (index, step) in DEPLOYMENT_STEPS.iter().enumerate() {
            tasks.push(self.spawn_at(
                started_at + step.offset,
                SequencerEvent::StepRevealed { attempt, index },
            ));
        }
        tasks.push(self.spawn_at(
            started_at + DEPLOY_DURATION,
            SequencerEvent::Completed { attempt },
        ));

        info!(%attempt, steps = TOTAL_STEPS, "deployment sequence scheduled");
        self.active = Some(ScheduledAttempt { attempt, tasks });
    }

    /// Aborts all pending tasks of the running attempt, if any.
    pub fn cancel(&mut self) -> Option<AttemptId> {
        let active = self.active.take()?;
        let attempt = active.attempt;
        let aborted = active.abort();
        debug!(%attempt, aborted, "deployment sequence cancelled");
        Some(attempt)
    }

    pub fn active_attempt(&self) -> Option<AttemptId> {
        self.active.as_ref().map(|active| active.attempt)
    }

    pub fn pending_tasks(&self) -> usize {
        self.active
            .as_ref()
            .map(|active| active.tasks.iter().filter(|t| !t.is_finished()).count())
            .unwrap_or(0)
    }

    fn spawn_at(&self, deadline: Instant, event: SequencerEvent) -> JoinHandle<()> {
        let sink = self.sink.clone();
        self.runtime.spawn(async move {
            sleep_until(deadline).await;
            if !sink.emit(event) {
                debug!(?event, "sequencer event dropped: receiver closed");
            }
        })
    }
}

impl<S> Drop for DeploymentScheduler<S> {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            active.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/sequencer_tests.rs"]
mod tests;
