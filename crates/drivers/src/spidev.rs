//! Linux `spidev` bus.

use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
};

use embedded_hal::spi::{ErrorKind, ErrorType, SpiBus};
use pilights_core::{Error, Result};

/// Error of the spidev character device.
#[derive(Debug)]
pub struct SpidevError(pub std::io::Error);

impl embedded_hal::spi::Error for SpidevError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// The `/dev/spidevX.Y` character device used as a write-only SPI bus.
///
/// Every write to the device node is performed as a single half-duplex transfer. The SPI
/// mode and clock are not configured here, the bus keeps the kernel defaults (mode 0 and
/// the `spidev` default speed) which both chipsets accept.
///
/// Writes are blocking. A frame of [`pilights_core::MAX_STRIP_LEN`] pixels takes a few
/// milliseconds at the default clock, so it is written directly from the scheduler task.
pub struct SpidevBus {
    file: File,
}

impl SpidevBus {
    /// Opens the SPI device node.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(|err| Error::device_unavailable(format_args!("{}: {err}", path.display())))?;
        Ok(Self { file })
    }
}

impl ErrorType for SpidevBus {
    type Error = SpidevError;
}

impl SpiBus<u8> for SpidevBus {
    fn read(&mut self, words: &mut [u8]) -> core::result::Result<(), Self::Error> {
        // LED strips have no data output, so there is nothing to read.
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> core::result::Result<(), Self::Error> {
        self.file.write_all(words).map_err(SpidevError)
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> core::result::Result<(), Self::Error> {
        read.fill(0);
        self.write(write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> core::result::Result<(), Self::Error> {
        self.write(words)?;
        words.fill(0);
        Ok(())
    }

    fn flush(&mut self) -> core::result::Result<(), Self::Error> {
        self.file.flush().map_err(SpidevError)
    }
}
