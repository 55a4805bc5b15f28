//! LED strip device handle.

use pilights_core::{ChipsetKind, OutputStrategy, Strip, StripConfig, RGB8};
use pilights_drivers::BoxedStrip;

/// Opened LED strip, or a sink which discards every write if the strip is unavailable.
///
/// Write errors are never propagated: the first failed write is logged and the handle
/// becomes inert for the rest of its lifetime.
pub struct DeviceHandle {
    strip: Option<BoxedStrip>,
    strategy: OutputStrategy,
    brightness: f32,
}

impl DeviceHandle {
    /// Creates a handle for the already opened strip.
    pub fn new(strip: BoxedStrip, kind: ChipsetKind, brightness: f32) -> Self {
        Self {
            strip: Some(strip),
            strategy: kind.output_strategy(),
            brightness: brightness.clamp(0.0, 1.0),
        }
    }

    /// Creates a handle which discards all writes.
    pub fn inert() -> Self {
        Self {
            strip: None,
            strategy: ChipsetKind::default().output_strategy(),
            brightness: 1.0,
        }
    }

    /// Opens the strip described by the given configuration.
    ///
    /// If the strip cannot be opened, the handle degrades into the inert state.
    pub fn open(config: &StripConfig) -> Self {
        match pilights_drivers::open(config) {
            Ok(strip) => Self::new(strip, config.kind, config.brightness),
            Err(err) => {
                log::warn!(
                    "Unable to open SPI ({}), not supported? {err}",
                    config.device
                );
                Self::inert()
            }
        }
    }

    /// Returns true if writes reach the strip.
    pub fn is_available(&self) -> bool {
        self.strip.is_some()
    }

    /// Writes an animation frame of the given color and level.
    pub fn write_frame(&mut self, color: RGB8, level: f32) {
        let (strategy, brightness) = (self.strategy, self.brightness);
        self.write_with(|strip| strategy.write_frame(strip, color, level, brightness));
    }

    /// Fills the strip with a solid color.
    pub fn write_solid(&mut self, color: RGB8) {
        let (strategy, brightness) = (self.strategy, self.brightness);
        self.write_with(|strip| strategy.write_solid(strip, color, brightness));
    }

    /// Turns all LEDs off.
    pub fn clear(&mut self) {
        self.write_with(|strip| {
            strip.clear()?;
            strip.push()
        });
    }

    fn write_with<F>(&mut self, write: F)
    where
        F: FnOnce(&mut BoxedStrip) -> pilights_core::Result<()>,
    {
        let Some(strip) = self.strip.as_mut() else {
            return;
        };

        if let Err(err) = write(strip) {
            log::warn!("LED strip write failed, further writes will be discarded: {err}");
            self.strip = None;
        }
    }
}

impl std::fmt::Debug for DeviceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceHandle")
            .field("available", &self.is_available())
            .field("strategy", &self.strategy)
            .field("brightness", &self.brightness)
            .finish()
    }
}
