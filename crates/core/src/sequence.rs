//! Named light sequences.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use smart_leds::RGB8;

use crate::{Error, Result};

/// The number of pulses when the caller has not specified it.
pub const DEFAULT_ITERATIONS: u32 = 2;
/// Delay between the waveform ticks of a named sequence.
pub const SEQUENCE_STEP_DELAY: Duration = Duration::from_millis(20);

/// Known sequences with their colors.
const SEQUENCES: [(&str, RGB8); 7] = [
    ("blue_pulse", RGB8 { r: 0, g: 0, b: 255 }),
    ("white_pulse", RGB8 { r: 255, g: 255, b: 255 }),
    ("lightblue_pulse", RGB8 { r: 0, g: 255, b: 255 }),
    ("red_pulse", RGB8 { r: 255, g: 0, b: 0 }),
    ("green_pulse", RGB8 { r: 0, g: 255, b: 0 }),
    ("orange_pulse", RGB8 { r: 255, g: 170, b: 0 }),
    ("pink_pulse", RGB8 { r: 255, g: 0, b: 255 }),
];

/// Returns the color of the sequence with the given name.
///
/// The lookup is exact and case-sensitive.
pub fn resolve(name: &str) -> Result<RGB8> {
    SEQUENCES
        .iter()
        .find_map(|(sequence, color)| (*sequence == name).then_some(*color))
        .ok_or_else(|| Error::UnknownSequence(name.to_owned()))
}

/// Returns the names of all known sequences.
pub fn names() -> impl Iterator<Item = &'static str> {
    SEQUENCES.iter().map(|(name, _)| *name)
}

/// A single pulse animation to be run by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationRequest {
    pub color: RGB8,
    /// The number of full pulses.
    pub iterations: u32,
    /// Delay between the waveform ticks.
    pub step_delay: Duration,
    /// Delay before the first tick.
    pub start_delay: Duration,
}

impl AnimationRequest {
    /// Creates a new pulse request of the given color with the default parameters.
    pub fn pulse(color: RGB8) -> Self {
        Self {
            color,
            iterations: DEFAULT_ITERATIONS,
            step_delay: SEQUENCE_STEP_DELAY,
            start_delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    #[must_use]
    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    #[must_use]
    pub fn with_start_delay(mut self, start_delay: Duration) -> Self {
        self.start_delay = start_delay;
        self
    }
}

/// Sequence request with the optional parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SequenceRequest {
    /// Sequence name.
    pub sequence: String,
    /// The number of pulses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u32>,
    /// Delay between the waveform ticks in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u64>,
    /// Delay before the first tick in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_delay: Option<u64>,
}

impl SequenceRequest {
    /// Creates a new request for the sequence with the given name.
    pub fn new(sequence: impl Into<String>) -> Self {
        Self {
            sequence: sequence.into(),
            ..Self::default()
        }
    }

    /// Resolves the sequence name and converts this request into the animation request.
    pub fn resolve(&self) -> Result<AnimationRequest> {
        if self.sequence.is_empty() {
            return Err(Error::SequenceNotSpecified);
        }

        let mut request = AnimationRequest::pulse(resolve(&self.sequence)?);
        if let Some(iterations) = self.iterations {
            request = request.with_iterations(iterations);
        }
        if let Some(delay) = self.delay {
            request = request.with_step_delay(Duration::from_millis(delay));
        }
        if let Some(start_delay) = self.start_delay {
            request = request.with_start_delay(Duration::from_millis(start_delay));
        }
        Ok(request)
    }
}

/// Payload of the `SEQUENCE` notification: either a bare sequence name or a request with
/// parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum SequencePayload {
    Name(String),
    Request(SequenceRequest),
}

impl SequencePayload {
    /// Resolves the payload into the animation request.
    pub fn resolve(&self) -> Result<AnimationRequest> {
        match self {
            Self::Name(name) => SequenceRequest::new(name.as_str()).resolve(),
            Self::Request(request) => request.resolve(),
        }
    }
}

impl From<&str> for SequencePayload {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<SequenceRequest> for SequencePayload {
    fn from(request: SequenceRequest) -> Self {
        Self::Request(request)
    }
}
