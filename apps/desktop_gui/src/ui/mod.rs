//! UI layer for the desktop GUI: app shell, screens, and the neon theme.

pub mod app;
pub mod theme;

pub use app::DeployerApp;
