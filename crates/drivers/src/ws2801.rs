use embedded_hal::spi::SpiBus;
use pilights_core::{color, Error, Result, Strip, RGB8};

use crate::FrameBuffer;

/// WS2801 LED strip driver.
///
/// The chip takes three bytes per pixel in the RGB order and latches the frame after the
/// clock line stays low for 500us. It has no brightness register, so the brightness is
/// applied to the colors before sending.
pub struct Ws2801<SPI> {
    spi: SPI,
    pixels: FrameBuffer,
    brightness: f32,
    tx_buf: Vec<u8>,
}

impl<SPI: SpiBus<u8>> Ws2801<SPI> {
    const BYTES_PER_PIXEL: usize = 3;

    /// Creates a new driver for the strip with the given number of LEDs.
    pub fn new(spi: SPI, len: usize) -> Result<Self> {
        Ok(Self {
            spi,
            pixels: crate::frame_buffer(len)?,
            brightness: 1.0,
            tx_buf: Vec::with_capacity(len * Self::BYTES_PER_PIXEL),
        })
    }

    /// Returns the pending frame pixels.
    pub fn pixels(&self) -> &[RGB8] {
        &self.pixels
    }

    /// Releases the underlying SPI bus.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiBus<u8>> Strip for Ws2801<SPI> {
    fn set_brightness(&mut self, level: f32) -> Result<()> {
        self.brightness = level.clamp(0.0, 1.0);
        Ok(())
    }

    fn fill(&mut self, color: RGB8) -> Result<()> {
        self.pixels.fill(color);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.fill(color::BLACK)
    }

    fn push(&mut self) -> Result<()> {
        self.tx_buf.clear();
        for pixel in &self.pixels {
            let pixel = color::scale(*pixel, self.brightness);
            self.tx_buf.extend_from_slice(&[pixel.r, pixel.g, pixel.b]);
        }

        self.spi.write(&self.tx_buf).map_err(Error::device_write)?;
        self.spi.flush().map_err(Error::device_write)
    }
}
