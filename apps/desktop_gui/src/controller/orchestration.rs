//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd` for the backend worker. Returns false and explains why in
/// `status` when the queue cannot take it.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "backend command queue full");
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use shared::domain::AttemptId;

    use super::*;

    #[test]
    fn queues_command_when_there_is_room() {
        let (tx, rx) = bounded(1);
        let mut status = String::new();
        let cmd = BackendCommand::StartDeployment {
            attempt: AttemptId(1),
        };
        assert!(dispatch_backend_command(&tx, cmd, &mut status));
        assert_eq!(rx.try_recv().expect("queued"), cmd);
        assert!(status.is_empty());
    }

    #[test]
    fn reports_full_queue() {
        let (tx, _rx) = bounded(1);
        let mut status = String::new();
        let cmd = BackendCommand::CancelDeployment {
            attempt: AttemptId(1),
        };
        assert!(dispatch_backend_command(&tx, cmd, &mut status));
        assert!(!dispatch_backend_command(&tx, cmd, &mut status));
        assert!(status.contains("queue is full"));
    }

    #[test]
    fn reports_disconnected_worker() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut status = String::new();
        let cmd = BackendCommand::StartDeployment {
            attempt: AttemptId(2),
        };
        assert!(!dispatch_backend_command(&tx, cmd, &mut status));
        assert!(status.contains("disconnected"));
    }
}
