//! PiLights core
//!
//! Hardware independent parts of the PiLights LED strip controller: the configuration,
//! the pulse waveform, the named sequences table and the LED strip capability trait.

// Linter configuration
#![warn(unsafe_code, clippy::pedantic, clippy::use_self)]
// Too many false positives.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::missing_const_for_fn,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

pub use smart_leds::RGB8;

pub use crate::{
    config::{ChipsetKind, StripConfig, MAX_STRIP_LEN},
    errors::{Error, Result},
    sequence::{resolve, AnimationRequest, SequencePayload, SequenceRequest},
    strip::{OutputStrategy, Strip},
    waveform::{Direction, Phase, StepOutcome, Triangle, Waveform, DEFAULT_STEP},
};

pub mod color;
pub mod config;
pub mod errors;
pub mod sequence;
pub mod strip;
pub mod waveform;
