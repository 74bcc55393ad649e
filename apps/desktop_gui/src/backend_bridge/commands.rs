//! Backend commands queued from UI to backend worker.

use shared::domain::AttemptId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCommand {
    StartDeployment { attempt: AttemptId },
    CancelDeployment { attempt: AttemptId },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartDeployment { .. } => "start_deployment",
            Self::CancelDeployment { .. } => "cancel_deployment",
        }
    }
}
