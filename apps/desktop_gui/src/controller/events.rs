//! UI/backend events and error modeling for the desktop GUI controller.

use shared::protocol::SequencerEvent;

#[derive(Debug, Clone)]
pub enum UiEvent {
    Info(String),
    Sequencer(SequencerEvent),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Deployment,
    Clipboard,
    Explorer,
}

#[derive(Debug, Clone)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Status line text, prefixed by where the failure happened.
    pub fn status_line(&self) -> String {
        let prefix = match self.context {
            UiErrorContext::BackendStartup => "BACKEND OFFLINE",
            UiErrorContext::Deployment => "DEPLOY ERROR",
            UiErrorContext::Clipboard => "CLIPBOARD ERROR",
            UiErrorContext::Explorer => "EXPLORER ERROR",
        };
        format!("{prefix}: {}", self.message)
    }
}
