//! LED strip drivers for the SPI addressed chipsets.

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

use pilights_core::{ChipsetKind, Result, Strip, StripConfig, RGB8};

pub use crate::{lpd8806::Lpd8806, spidev::SpidevBus, ws2801::Ws2801};

mod lpd8806;
mod spidev;
mod ws2801;

/// Pixels buffer of a single strip frame.
pub type FrameBuffer = heapless::Vec<RGB8, { pilights_core::MAX_STRIP_LEN }>;

/// Opened LED strip device.
pub type BoxedStrip = Box<dyn Strip + Send>;

/// Opens the LED strip described by the given configuration.
///
/// On success all LEDs are turned off.
pub fn open(config: &StripConfig) -> Result<BoxedStrip> {
    config.validate()?;

    let bus = SpidevBus::open(&config.device)?;
    let len = usize::from(config.led_count);
    let mut strip: BoxedStrip = match config.kind {
        ChipsetKind::Ws2801 => Box::new(Ws2801::new(bus, len)?),
        ChipsetKind::Lpd8806 => Box::new(Lpd8806::new(bus, len)?),
    };

    strip.clear()?;
    strip.push()?;
    log::info!(
        "Opened {} strip with {} LEDs on the {}",
        config.kind,
        config.led_count,
        config.device
    );
    Ok(strip)
}

/// Creates a frame buffer of the given length filled by the black color.
fn frame_buffer(len: usize) -> Result<FrameBuffer> {
    let mut pixels = FrameBuffer::new();
    pixels
        .resize(len, RGB8::default())
        .map_err(|()| pilights_core::Error::StripTooLong)?;
    Ok(pixels)
}
