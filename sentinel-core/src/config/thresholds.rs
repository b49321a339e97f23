//! Alert thresholds and cycle timing

/// Limits that turn a reading into an alert
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    /// Body temperature at or above which the alert fires (°C)
    pub temperature_limit_c: f32,
    /// Acceleration magnitude above which a fall is reported (g)
    pub fall_magnitude_limit_g: f32,
}

impl Thresholds {
    /// Field defaults
    pub const DEFAULT: Self = Self {
        temperature_limit_c: 38.0,
        fall_magnitude_limit_g: 2.5,
    };

    /// Create thresholds with custom limits
    pub const fn new(temperature_limit_c: f32, fall_magnitude_limit_g: f32) -> Self {
        Self {
            temperature_limit_c,
            fall_magnitude_limit_g,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Cycle timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cadence {
    /// Sleep after each completed cycle (ms)
    pub cycle_sleep_ms: u32,
}

impl Cadence {
    /// One cycle per second plus the temperature conversion time
    pub const DEFAULT: Self = Self {
        cycle_sleep_ms: 1000,
    };
}

impl Default for Cadence {
    fn default() -> Self {
        Self::DEFAULT
    }
}
