//! Host application behind the boot screen.
//!
//! This crate owns the backend lifecycle: it loads configuration, plays back
//! the boot sequence as stage and progress events, owns the notification
//! list shown by the frontend, and routes bridge messages to services.

mod app;
mod config;
mod runtime;
mod services;
mod state;

pub use crate::config::ConfigError;
pub use crate::runtime::run;
