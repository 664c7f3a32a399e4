//! Ambient light to backlight level.

/// Divisor turning a raw sample into extra brightness.
pub const SAMPLE_SCALE: f32 = 7000.0;

/// Lowest backlight level, reached in the dark.
pub const MIN_LEVEL: f32 = 0.5;

/// Backlight level in `0.5..=1.0` for a raw 16-bit light sample.
pub fn backlight_level(raw: u16) -> f32 {
    let light = (f32::from(raw) / SAMPLE_SCALE).min(1.0 - MIN_LEVEL);
    MIN_LEVEL + light
}

/// Widen a 12-bit ADC reading to the 16-bit sample range.
pub fn widen_12bit(raw: u16) -> u16 {
    (raw & 0x0fff) << 4
}

/// Level as a PWM duty percentage.
pub fn duty_percent(level: f32) -> u8 {
    libm::roundf(level.clamp(0.0, 1.0) * 100.0) as u8
}
