use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AttemptId, ContractAddress, TokenDraft};

/// Events emitted by the deployment sequencer. Every event names the attempt
/// that scheduled it so consumers can drop events from cancelled attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SequencerEvent {
    StepRevealed { attempt: AttemptId, index: usize },
    Completed { attempt: AttemptId },
}

impl SequencerEvent {
    pub fn attempt(&self) -> AttemptId {
        match self {
            Self::StepRevealed { attempt, .. } | Self::Completed { attempt } => *attempt,
        }
    }
}

/// Summary of a finished (simulated) deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentReceipt {
    pub attempt: AttemptId,
    pub token: TokenDraft,
    pub address: ContractAddress,
    pub explorer_url: String,
    pub deployed_at: DateTime<Utc>,
}
