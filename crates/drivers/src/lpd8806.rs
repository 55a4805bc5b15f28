use embedded_hal::spi::SpiBus;
use pilights_core::{color, Error, Result, Strip, RGB8};

use crate::FrameBuffer;

/// LPD8806 LED strip driver.
///
/// Each channel is sent as a 7-bit value with the most significant bit set, in the GRB
/// order. The frame is latched by a run of zero bytes, one byte per 32 LEDs. The master
/// brightness is kept by the driver and applied on push.
pub struct Lpd8806<SPI> {
    spi: SPI,
    pixels: FrameBuffer,
    brightness: f32,
    tx_buf: Vec<u8>,
}

impl<SPI: SpiBus<u8>> Lpd8806<SPI> {
    const BYTES_PER_PIXEL: usize = 3;

    /// Creates a new driver for the strip with the given number of LEDs.
    ///
    /// The chips are reset by the latch sequence at startup.
    pub fn new(spi: SPI, len: usize) -> Result<Self> {
        let mut strip = Self {
            spi,
            pixels: crate::frame_buffer(len)?,
            brightness: 1.0,
            tx_buf: Vec::with_capacity(len * Self::BYTES_PER_PIXEL + Self::latch_len(len)),
        };

        let latch = vec![0_u8; Self::latch_len(len)];
        strip.spi.write(&latch).map_err(Error::device_write)?;
        Ok(strip)
    }

    fn latch_len(len: usize) -> usize {
        (len + 31) / 32
    }

    fn encode_channel(value: u8) -> u8 {
        0x80 | (value >> 1)
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

impl<SPI: SpiBus<u8>> Strip for Lpd8806<SPI> {
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
            self.tx_buf.extend_from_slice(&[
                Self::encode_channel(pixel.g),
                Self::encode_channel(pixel.r),
                Self::encode_channel(pixel.b),
            ]);
        }
        let latch_len = Self::latch_len(self.pixels.len());
        self.tx_buf.resize(self.tx_buf.len() + latch_len, 0);

        self.spi.write(&self.tx_buf).map_err(Error::device_write)?;
        self.spi.flush().map_err(Error::device_write)
    }
}
