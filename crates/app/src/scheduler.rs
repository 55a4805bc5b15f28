//! Animation scheduler.
//!
//! A single task owns the LED strip device and the animation state, so at most one
//! animation writes to the strip at a time. Commands are only observed between the
//! waveform ticks: a new request marks the running animation as cancelled, the animation
//! stops without writing anything further, and only then the new request starts.
//!
//! Every command also advances a generation counter shared with the handles. A tick of
//! an animation from an older generation never writes, so `stop` takes effect as soon as
//! it returns, even before the task receives the command.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use pilights_core::{AnimationRequest, Triangle, Waveform, RGB8};
use tokio::{
    sync::{mpsc, oneshot, watch},
    time::{self, Instant},
};

use crate::device::DeviceHandle;

/// The number of pulses used when a request asks for zero iterations.
pub const DEFAULT_ITERATIONS: u32 = 2;
/// Delay between the waveform ticks used when a request has a zero step delay.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(10);

/// Observable scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerStatus {
    /// No animation is running.
    Idle,
    /// The animation with the given parameters is running.
    Running(AnimationRequest),
}

impl SchedulerStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running(_))
    }
}

/// How an animation has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOutcome {
    /// All requested pulses have been shown.
    Completed,
    /// The animation has been stopped or superseded by another command.
    Cancelled,
}

/// Completion notification of a submitted animation.
///
/// It can be dropped if the caller is not interested in the animation outcome.
#[derive(Debug)]
pub struct Completion(oneshot::Receiver<AnimationOutcome>);

impl Completion {
    /// Waits until the animation ends.
    pub async fn wait(self) -> AnimationOutcome {
        // The scheduler has been shut down before the animation ended.
        self.0.await.unwrap_or(AnimationOutcome::Cancelled)
    }
}

enum Command {
    Start {
        request: AnimationRequest,
        generation: u64,
        done: oneshot::Sender<AnimationOutcome>,
    },
    Fill(RGB8),
    Off,
    Stop,
    ReplaceDevice(DeviceHandle),
}

/// Handle to control the animation scheduler task.
///
/// All methods return immediately, the commands are executed by the scheduler task in
/// the order they were sent. Every command supersedes the running animation at once: no
/// tick which starts after the call writes a frame of the superseded animation.
#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    commands: mpsc::UnboundedSender<Command>,
    status: Arc<watch::Sender<SchedulerStatus>>,
    generation: Arc<AtomicU64>,
}

impl SchedulerHandle {
    /// Submits a new animation, the currently running animation will be cancelled.
    pub fn submit(&self, request: AnimationRequest) -> Completion {
        let (done, rx) = oneshot::channel();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.send(Command::Start {
            request,
            generation,
            done,
        });
        Completion(rx)
    }

    /// Stops the running animation, the strip keeps the last shown frame.
    ///
    /// The scheduler reports [`SchedulerStatus::Idle`] as soon as this method returns.
    pub fn stop(&self) {
        self.supersede();
        self.send(Command::Stop);
    }

    /// Stops the running animation and fills the strip with the given color.
    pub fn fill(&self, color: RGB8) {
        self.supersede();
        self.send(Command::Fill(color));
    }

    /// Stops the running animation and turns all LEDs off.
    pub fn off(&self) {
        self.supersede();
        self.send(Command::Off);
    }

    /// Stops the running animation and replaces the strip device.
    pub fn replace_device(&self, device: DeviceHandle) {
        self.supersede();
        self.send(Command::ReplaceDevice(device));
    }

    /// Returns the current scheduler status.
    pub fn status(&self) -> SchedulerStatus {
        *self.status.borrow()
    }

    /// Waits until the scheduler status satisfies the given predicate.
    pub async fn wait_status<F>(&self, mut predicate: F) -> SchedulerStatus
    where
        F: FnMut(&SchedulerStatus) -> bool,
    {
        let mut status = self.status.subscribe();
        let result = status
            .wait_for(|value| predicate(value))
            .await
            .map(|value| *value);
        result.unwrap_or(SchedulerStatus::Idle)
    }

    /// Invalidates the running animation and reports the idle state.
    fn supersede(&self) {
        self.status.send_modify(|status| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            *status = SchedulerStatus::Idle;
        });
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            log::warn!("Animation scheduler is not running, the command has been dropped");
        }
    }
}

struct Animation {
    request: AnimationRequest,
    generation: u64,
    waveform: Waveform,
    cancel_requested: bool,
    next_tick: Instant,
    done: oneshot::Sender<AnimationOutcome>,
}

enum AnimationState {
    Idle,
    Running(Animation),
}

/// Animation scheduler task state.
pub struct Scheduler {
    device: DeviceHandle,
    state: AnimationState,
    commands: mpsc::UnboundedReceiver<Command>,
    status: Arc<watch::Sender<SchedulerStatus>>,
    generation: Arc<AtomicU64>,
}

impl Scheduler {
    /// Creates a new scheduler and the handle to control it.
    ///
    /// The scheduler does nothing until [`Self::run`] is polled.
    pub fn new(device: DeviceHandle) -> (Self, SchedulerHandle) {
        let (commands_tx, commands) = mpsc::unbounded_channel();
        let (status, _) = watch::channel(SchedulerStatus::Idle);
        let status = Arc::new(status);
        let generation = Arc::new(AtomicU64::new(0));
        let scheduler = Self {
            device,
            state: AnimationState::Idle,
            commands,
            status: status.clone(),
            generation: generation.clone(),
        };
        let handle = SchedulerHandle {
            commands: commands_tx,
            status,
            generation,
        };
        (scheduler, handle)
    }

    /// Spawns a new scheduler task on the current Tokio runtime.
    pub fn spawn(device: DeviceHandle) -> SchedulerHandle {
        let (scheduler, handle) = Self::new(device);
        tokio::spawn(scheduler.run());
        handle
    }

    /// Runs the scheduler event loop until all handles are dropped.
    pub async fn run(mut self) {
        loop {
            let next_tick = match &self.state {
                AnimationState::Idle => None,
                AnimationState::Running(animation) => Some(animation.next_tick),
            };

            let command = if let Some(deadline) = next_tick {
                tokio::select! {
                    biased;
                    command = self.commands.recv() => command,
                    () = time::sleep_until(deadline) => {
                        self.tick();
                        continue;
                    }
                }
            } else {
                self.commands.recv().await
            };

            let Some(command) = command else {
                break;
            };
            self.handle_command(command);
        }

        self.cancel();
        log::debug!("Animation scheduler stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Start {
                request,
                generation,
                done,
            } => {
                if generation != self.generation.load(Ordering::SeqCst) {
                    // A later command has already superseded this request.
                    let _ = done.send(AnimationOutcome::Cancelled);
                    return;
                }
                self.cancel();
                self.start(request, generation, done);
            }
            Command::Fill(color) => {
                self.cancel();
                self.device.write_solid(color);
            }
            Command::Off => {
                self.cancel();
                self.device.clear();
            }
            Command::Stop => self.cancel(),
            Command::ReplaceDevice(device) => {
                self.cancel();
                log::info!("Replacing LED strip device with {device:?}");
                self.device = device;
            }
        }
    }

    fn start(
        &mut self,
        request: AnimationRequest,
        generation: u64,
        done: oneshot::Sender<AnimationOutcome>,
    ) {
        let request = AnimationRequest {
            iterations: if request.iterations == 0 {
                DEFAULT_ITERATIONS
            } else {
                request.iterations
            },
            step_delay: if request.step_delay.is_zero() {
                DEFAULT_STEP_DELAY
            } else {
                request.step_delay
            },
            ..request
        };

        // Checked under the status lock, so a concurrent `stop` cannot be overwritten.
        let accepted = self.status.send_if_modified(|status| {
            if self.generation.load(Ordering::SeqCst) == generation {
                *status = SchedulerStatus::Running(request);
                true
            } else {
                false
            }
        });
        if !accepted {
            let _ = done.send(AnimationOutcome::Cancelled);
            return;
        }

        log::info!(
            "Pulse ({}, {}, {}) iterations: {}, step delay: {:?}",
            request.color.r,
            request.color.g,
            request.color.b,
            request.iterations,
            request.step_delay
        );

        self.state = AnimationState::Running(Animation {
            request,
            generation,
            waveform: Waveform::new(Triangle::default()),
            cancel_requested: false,
            next_tick: Instant::now() + request.start_delay,
            done,
        });
    }

    /// Requests the running animation to stop and lets it observe the request.
    fn cancel(&mut self) {
        if let AnimationState::Running(animation) = &mut self.state {
            animation.cancel_requested = true;
            self.tick();
        }
    }

    /// Performs a single animation step.
    fn tick(&mut self) {
        let AnimationState::Running(animation) = &mut self.state else {
            return;
        };

        let level = animation.waveform.advance();
        if animation.cancel_requested
            || animation.generation != self.generation.load(Ordering::SeqCst)
        {
            self.finish(AnimationOutcome::Cancelled);
            return;
        }
        if animation.waveform.completed_cycles() > animation.request.iterations {
            self.finish(AnimationOutcome::Completed);
            return;
        }

        self.device.write_frame(animation.request.color, level);
        animation.next_tick = Instant::now() + animation.request.step_delay;
    }

    fn finish(&mut self, outcome: AnimationOutcome) {
        let AnimationState::Running(animation) =
            std::mem::replace(&mut self.state, AnimationState::Idle)
        else {
            return;
        };

        log::debug!(
            "Animation finished: {outcome:?} after {} cycles",
            animation.waveform.completed_cycles()
        );
        self.status.send_replace(SchedulerStatus::Idle);
        // The submitter may not wait for the outcome.
        let _ = animation.done.send(outcome);
    }
}
