use core::fmt::Display;

use displaydoc::Display;

/// A specialized result type for the PiLights controller.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while handling light sequences.
#[derive(Clone, PartialEq, Eq, Display, Debug)]
pub enum Error {
    /// Unknown sequence: {0}
    UnknownSequence(String),
    /// Sequence not specified
    SequenceNotSpecified,
    /// Unable to open LED strip device: {0}
    DeviceUnavailable(String),
    /// Unable to write a frame to the LED strip device.
    DeviceWrite,
    /// The strip length exceeds the supported maximum.
    StripTooLong,
    /// Brightness must be between 0.0 and 1.0.
    InvalidBrightness,
    /// Invalid request: {0}
    InvalidRequest(String),
    /// Data decoding error.
    Decode,
    /// Network error.
    Network,
}

impl Error {
    /// Creates a new device unavailable error with the underlying reason.
    pub fn device_unavailable<E>(err: E) -> Self
    where
        E: Display,
    {
        Self::DeviceUnavailable(err.to_string())
    }

    /// Creates a new device write error.
    pub fn device_write<E>(_: E) -> Self
    where
        E: core::fmt::Debug,
    {
        Self::DeviceWrite
    }

    /// Creates a new invalid request error.
    pub fn invalid_request<E>(err: E) -> Self
    where
        E: Display,
    {
        Self::InvalidRequest(err.to_string())
    }

    pub fn network<E>(_: E) -> Self
    where
        E: Display,
    {
        Self::Network
    }

    /// Creates a new decode data error.
    pub fn decode<E>(_: E) -> Self
    where
        E: Display,
    {
        Self::Decode
    }

    /// Returns true if this error was caused by the client input rather than by the device.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownSequence(_)
                | Self::SequenceNotSpecified
                | Self::InvalidRequest(_)
                | Self::Decode
        )
    }
}

impl std::error::Error for Error {}
