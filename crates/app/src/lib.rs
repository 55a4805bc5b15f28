//! PiLights application
//!
//! Runs named light sequences on the LED strip: resolves the incoming sequence requests and
//! hands them to the animation scheduler that drives the strip.

// Linter configuration
#![warn(unsafe_code, clippy::pedantic, clippy::use_self)]
// Too many false positives.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::missing_const_for_fn
)]

pub use pilights_core as core;
pub use pilights_core::{Error as PiLightsError, Result as PiLightsResult};
use pilights_core::{SequencePayload, StripConfig};
use serde::{Deserialize, Serialize};

pub use crate::{
    app::App,
    device::DeviceHandle,
    scheduler::{AnimationOutcome, Completion, Scheduler, SchedulerHandle, SchedulerStatus},
};

mod app;
pub mod device;
pub mod scheduler;

/// Notifications sent to the application by the host module.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "notification", content = "payload", rename_all = "UPPERCASE")]
pub enum Notification {
    /// Initializes the LED strip with the given configuration.
    Start(StripConfig),
    /// Runs the light sequence.
    Sequence(SequencePayload),
}
