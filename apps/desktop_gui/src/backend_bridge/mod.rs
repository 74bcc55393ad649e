//! Backend bridge: command queue from the UI and the worker thread that owns
//! the deployment scheduler.

pub mod commands;
pub mod runtime;
