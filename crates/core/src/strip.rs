//! LED strip capability interface.

use smart_leds::RGB8;

use crate::{color, Result};

/// The capabilities required from a concrete LED strip binding.
///
/// Drawing methods only update the pending frame, the frame reaches the hardware on
/// [`Self::push`].
pub trait Strip {
    /// Sets the global brightness in the `[0, 1]` range.
    fn set_brightness(&mut self, level: f32) -> Result<()>;
    /// Sets all pixels to the given color.
    fn fill(&mut self, color: RGB8) -> Result<()>;
    /// Sets all pixels to the given color scaled by the level.
    ///
    /// It is an equivalent of the `fill` for the devices without a separate brightness register.
    fn fill_scaled(&mut self, color: RGB8, level: f32) -> Result<()> {
        self.fill(color::scale(color, level))
    }
    /// Turns all pixels off.
    fn clear(&mut self) -> Result<()>;
    /// Sends the pending frame to the hardware.
    fn push(&mut self) -> Result<()>;
}

impl<S: ?Sized + Strip> Strip for Box<S> {
    fn set_brightness(&mut self, level: f32) -> Result<()> {
        S::set_brightness(self, level)
    }

    fn fill(&mut self, color: RGB8) -> Result<()> {
        S::fill(self, color)
    }

    fn fill_scaled(&mut self, color: RGB8, level: f32) -> Result<()> {
        S::fill_scaled(self, color, level)
    }

    fn clear(&mut self) -> Result<()> {
        S::clear(self)
    }

    fn push(&mut self) -> Result<()> {
        S::push(self)
    }
}

/// The way an animation level reaches the strip.
///
/// The strategy is selected once by the chipset kind and never changes during an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStrategy {
    /// Set the brightness register, then fill with the original color.
    Register,
    /// Fill with the color scaled by the level.
    Prescaled,
}

impl OutputStrategy {
    /// Writes a single animation frame of the given color and level to the strip.
    ///
    /// The level is multiplied by the master brightness.
    pub fn write_frame<S>(self, strip: &mut S, color: RGB8, level: f32, master: f32) -> Result<()>
    where
        S: Strip + ?Sized,
    {
        let level = (level * master).clamp(0.0, 1.0);
        match self {
            Self::Register => {
                strip.set_brightness(level)?;
                strip.fill(color)?;
            }
            Self::Prescaled => strip.fill_scaled(color, level)?,
        }
        strip.push()
    }

    /// Writes a solid color frame at the master brightness.
    pub fn write_solid<S>(self, strip: &mut S, color: RGB8, master: f32) -> Result<()>
    where
        S: Strip + ?Sized,
    {
        self.write_frame(strip, color, 1.0, master)
    }
}
