//! Test helpers

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use pilights_app::{core::ChipsetKind, DeviceHandle};
use pilights_core::{Error, Result, Strip, RGB8};

/// An event observed by the recording strip on push.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Frame { color: RGB8, level: f32 },
    Clear,
    Failed,
}

#[derive(Debug, Clone, Copy)]
enum Pending {
    Frame(RGB8, f32),
    Clear,
}

/// Shared log of the pushed frames.
pub type EventLog = Arc<Mutex<Vec<Event>>>;

/// Strip stub which records every pushed frame as a pair of color and level.
pub struct RecordingStrip {
    log: EventLog,
    brightness: f32,
    pending: Pending,
    fail_writes: bool,
}

impl Strip for RecordingStrip {
    fn set_brightness(&mut self, level: f32) -> Result<()> {
        self.brightness = level;
        Ok(())
    }

    fn fill(&mut self, color: RGB8) -> Result<()> {
        self.pending = Pending::Frame(color, self.brightness);
        Ok(())
    }

    fn fill_scaled(&mut self, color: RGB8, level: f32) -> Result<()> {
        self.pending = Pending::Frame(color, level);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.pending = Pending::Clear;
        Ok(())
    }

    fn push(&mut self) -> Result<()> {
        let event = if self.fail_writes {
            Event::Failed
        } else {
            match self.pending {
                Pending::Frame(color, level) => Event::Frame { color, level },
                Pending::Clear => Event::Clear,
            }
        };
        self.log.lock().unwrap().push(event);

        if self.fail_writes {
            Err(Error::DeviceWrite)
        } else {
            Ok(())
        }
    }
}

fn recording_device_with(
    kind: ChipsetKind,
    brightness: f32,
    fail_writes: bool,
) -> (DeviceHandle, EventLog) {
    let _ = env_logger::try_init();

    let log = EventLog::default();
    let strip = RecordingStrip {
        log: log.clone(),
        brightness: 1.0,
        pending: Pending::Clear,
        fail_writes,
    };
    (DeviceHandle::new(Box::new(strip), kind, brightness), log)
}

/// Creates a device handle backed by the recording strip.
pub fn recording_device(kind: ChipsetKind) -> (DeviceHandle, EventLog) {
    recording_device_with(kind, 1.0, false)
}

/// Creates a device handle backed by the recording strip with the given master brightness.
pub fn dimmed_recording_device(kind: ChipsetKind, brightness: f32) -> (DeviceHandle, EventLog) {
    recording_device_with(kind, brightness, false)
}

/// Creates a device handle backed by the strip which fails every write.
pub fn failing_device() -> (DeviceHandle, EventLog) {
    recording_device_with(ChipsetKind::Ws2801, 1.0, true)
}

/// Returns a snapshot of the recorded frames.
pub fn frames(log: &EventLog) -> Vec<(RGB8, f32)> {
    log.lock()
        .unwrap()
        .iter()
        .filter_map(|event| match event {
            Event::Frame { color, level } => Some((*color, *level)),
            _ => None,
        })
        .collect()
}

/// Returns the expected levels of the given number of full pulses.
pub fn pulse_levels(pulses: usize) -> Vec<f32> {
    let ramp_up = (1..=20).map(|i| i as f32 / 20.0);
    let ramp_down = (0..20).rev().map(|i| i as f32 / 20.0);
    let pulse = ramp_up.chain(ramp_down).collect::<Vec<_>>();
    pulse.repeat(pulses)
}

pub fn assert_levels(actual: &[f32], expected: &[f32]) {
    assert_eq!(actual.len(), expected.len(), "levels: {actual:?}");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < 1e-6, "level #{i}: expected {e}, got {a}");
    }
}
