//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use deploy_core::{DeploymentScheduler, EventSink};
use shared::protocol::SequencerEvent;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Forwards sequencer events into the UI event queue.
#[derive(Clone)]
pub struct UiEventSink {
    ui_tx: Sender<UiEvent>,
}

impl UiEventSink {
    pub fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self { ui_tx }
    }
}

impl EventSink for UiEventSink {
    fn emit(&self, event: SequencerEvent) -> bool {
        match self.ui_tx.try_send(UiEvent::Sequencer(event)) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(?event, "dropping sequencer event: {err}");
                false
            }
        }
    }
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("deploy-timers")
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let mut scheduler =
            DeploymentScheduler::new(UiEventSink::new(ui_tx.clone()), runtime.handle().clone());
        let _ = ui_tx.try_send(UiEvent::Info("STATUS: READY".to_string()));
        tracing::info!("backend worker ready");

        while let Ok(cmd) = cmd_rx.recv() {
            handle_command(&mut scheduler, cmd);
        }

        tracing::info!(
            pending = scheduler.pending_tasks(),
            "ui command queue closed; backend worker stopping"
        );
        scheduler.cancel();
    });
}

pub(crate) fn handle_command<S: EventSink + Clone>(
    scheduler: &mut DeploymentScheduler<S>,
    cmd: BackendCommand,
) {
    match cmd {
        BackendCommand::StartDeployment { attempt } => scheduler.schedule(attempt),
        BackendCommand::CancelDeployment { attempt } => {
            if scheduler.active_attempt() == Some(attempt) {
                scheduler.cancel();
            } else {
                tracing::debug!(%attempt, "cancel for inactive attempt ignored");
            }
        }
    }
}
