//! PiLights application context.

use pilights_core::{SequencePayload, StripConfig, RGB8};

use crate::{Completion, DeviceHandle, Notification, PiLightsResult, Scheduler, SchedulerHandle};

/// PiLights application context.
///
/// Holds the active strip configuration and the animation scheduler. Until the strip is
/// started, the scheduler runs with the inert device and sequences do nothing visible.
#[derive(Debug, Clone)]
pub struct App {
    config: StripConfig,
    scheduler: SchedulerHandle,
}

impl App {
    /// Creates a new application without the LED strip.
    ///
    /// Must be called within the Tokio runtime.
    pub fn new() -> Self {
        Self::with_device(StripConfig::default(), DeviceHandle::inert())
    }

    /// Creates a new application with the given device.
    ///
    /// Must be called within the Tokio runtime.
    pub fn with_device(config: StripConfig, device: DeviceHandle) -> Self {
        Self {
            config,
            scheduler: Scheduler::spawn(device),
        }
    }

    /// Opens the LED strip with the given configuration.
    ///
    /// If the strip cannot be opened, the application keeps working without it.
    pub fn start(&mut self, config: StripConfig) {
        log::info!("Starting LED strip {config:?}");
        let device = DeviceHandle::open(&config);
        if device.is_available() {
            log::info!("LED strip connected ok");
        }
        self.scheduler.replace_device(device);
        self.config = config;
    }

    /// Resolves the sequence and submits it to the scheduler.
    ///
    /// Returns an error only if the sequence cannot be resolved, the success means that the
    /// animation has been accepted.
    pub fn run_sequence(&self, payload: impl Into<SequencePayload>) -> PiLightsResult<Completion> {
        let request = payload.into().resolve()?;
        Ok(self.scheduler.submit(request))
    }

    /// Handles a notification from the host module.
    pub fn handle_notification(&mut self, notification: Notification) {
        match notification {
            Notification::Start(config) => self.start(config),
            Notification::Sequence(payload) => {
                if let Err(err) = self.run_sequence(payload) {
                    log::info!("Sequence error: {err}");
                }
            }
        }
    }

    /// Fills the strip with a solid color.
    pub fn fill(&self, color: RGB8) {
        self.scheduler.fill(color);
    }

    /// Turns the strip off.
    pub fn off(&self) {
        self.scheduler.off();
    }

    /// Returns the active strip configuration.
    pub fn config(&self) -> &StripConfig {
        &self.config
    }

    /// Returns the animation scheduler handle.
    pub fn scheduler(&self) -> &SchedulerHandle {
        &self.scheduler
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
