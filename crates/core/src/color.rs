//! Color helpers.

use smart_leds::RGB8;

/// Color with all channels turned off.
pub const BLACK: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// Scales the given color by the level in range `[0, 1]`.
///
/// Values outside of the range are clamped.
#[must_use]
pub fn scale(color: RGB8, level: f32) -> RGB8 {
    let level = level.clamp(0.0, 1.0);
    let channel = |value: u8| (f32::from(value) * level).round() as u8;
    RGB8 {
        r: channel(color.r),
        g: channel(color.g),
        b: channel(color.b),
    }
}

#[cfg(test)]
mod tests {
    use smart_leds::RGB8;

    use super::{scale, BLACK};

    #[test]
    fn test_scale_bounds() {
        let orange = RGB8::new(255, 170, 0);
        assert_eq!(scale(orange, 1.0), orange);
        assert_eq!(scale(orange, 0.0), BLACK);
        assert_eq!(scale(orange, 0.5), RGB8::new(128, 85, 0));
        // Out of range levels are clamped.
        assert_eq!(scale(orange, 1.5), orange);
        assert_eq!(scale(orange, -0.1), BLACK);
    }
}
