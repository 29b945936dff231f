//! Remote control client for the ScarePi haunted-house backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend exposes a handful of JSON endpoints for motion detection,
//! scare effects, show lifecycle and audience registration. This crate
//! dispatches commands against those endpoints and keeps a local cache of
//! the service state fresh by polling `/api/status` and
//! `/api/audience/stats` on two independent timers.

pub mod api;
pub mod client;
pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod notify;
pub mod poller;
pub mod state;

pub use client::{CommandResult, RemoteControlClient};
pub use command::{Command, ScareKind};
pub use config::ClientConfig;
pub use error::ClientError;
