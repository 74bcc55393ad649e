//! Core of the token deployment simulator: the phase controller that owns the
//! token draft, the timed step sequencer, and the small presentation helpers
//! shared by the desktop and terminal front ends.

pub mod address;
pub mod config;
pub mod controller;
pub mod effects;
pub mod launcher;
pub mod presentation;
pub mod sequencer;

pub use address::{explorer_address_url, generate_address};
pub use config::{load_settings, ConfigError, ExplorerUrlError, Settings};
pub use controller::{ControllerError, EventOutcome, ViewController};
pub use launcher::open_in_browser;
pub use sequencer::{DeploymentScheduler, EventSink, SequencerRuntime, TOTAL_STEPS};
