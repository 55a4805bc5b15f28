//! LED strip configuration.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{strip::OutputStrategy, Error, Result};

/// The maximum number of LEDs on a single strip.
pub const MAX_STRIP_LEN: usize = 1024;

/// Supported LED strip chipsets.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChipsetKind {
    /// WS2801, three bytes per pixel without a brightness register.
    #[default]
    Ws2801,
    /// LPD8806, 7-bit channels with a software master brightness.
    Lpd8806,
}

impl ChipsetKind {
    /// Returns the way the animation level is applied to the strip of this kind.
    pub fn output_strategy(self) -> OutputStrategy {
        match self {
            Self::Ws2801 => OutputStrategy::Prescaled,
            Self::Lpd8806 => OutputStrategy::Register,
        }
    }
}

impl Display for ChipsetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ws2801 => f.write_str("ws2801"),
            Self::Lpd8806 => f.write_str("lpd8806"),
        }
    }
}

impl FromStr for ChipsetKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ws2801" => Ok(Self::Ws2801),
            "lpd8806" => Ok(Self::Lpd8806),
            other => Err(Error::InvalidRequest(format!("unsupported strip type: {other}"))),
        }
    }
}

/// LED strip configuration, it is also the payload of the `START` notification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StripConfig {
    /// The number of LEDs in the strip.
    pub led_count: u16,
    /// Strip chipset.
    #[serde(rename = "type")]
    pub kind: ChipsetKind,
    /// Path to the SPI bus device.
    pub device: String,
    /// Initial master brightness between 0.0 and 1.0.
    pub brightness: f32,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            led_count: 64,
            kind: ChipsetKind::default(),
            device: "/dev/spidev0.0".to_owned(),
            brightness: 1.0,
        }
    }
}

impl StripConfig {
    /// Checks the configuration values for the boundaries.
    pub fn validate(&self) -> Result<()> {
        if usize::from(self.led_count) > MAX_STRIP_LEN {
            return Err(Error::StripTooLong);
        }
        if !(0.0..=1.0).contains(&self.brightness) {
            return Err(Error::InvalidBrightness);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_payload_defaults() {
        let config: StripConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StripConfig::default());
        assert_eq!(config.led_count, 64);
        assert_eq!(config.kind, ChipsetKind::Ws2801);
        assert_eq!(config.device, "/dev/spidev0.0");
    }

    #[test]
    fn test_start_payload_keys() {
        let config: StripConfig = serde_json::from_str(
            r#"{"ledCount": 32, "type": "lpd8806", "device": "/dev/spidev0.1", "brightness": 0.5}"#,
        )
        .unwrap();
        assert_eq!(config.led_count, 32);
        assert_eq!(config.kind, ChipsetKind::Lpd8806);
        assert_eq!(config.device, "/dev/spidev0.1");
        assert!((config.brightness - 0.5).abs() < f32::EPSILON);
        config.validate().unwrap();
    }

    #[test]
    fn test_validate() {
        let config = StripConfig {
            brightness: 1.2,
            ..StripConfig::default()
        };
        assert_eq!(config.validate(), Err(Error::InvalidBrightness));

        let config = StripConfig {
            led_count: 2048,
            ..StripConfig::default()
        };
        assert_eq!(config.validate(), Err(Error::StripTooLong));
    }

    #[test]
    fn test_chipset_kind_from_str() {
        assert_eq!("ws2801".parse::<ChipsetKind>(), Ok(ChipsetKind::Ws2801));
        assert_eq!("lpd8806".parse::<ChipsetKind>(), Ok(ChipsetKind::Lpd8806));
        assert!("apa102".parse::<ChipsetKind>().is_err());
        assert_eq!(ChipsetKind::Lpd8806.to_string(), "lpd8806");
    }
}
