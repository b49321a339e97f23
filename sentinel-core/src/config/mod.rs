//! Configuration types
//!
//! All configuration is fixed at compile time. Nothing is persisted and
//! nothing is reloaded while running.

pub mod hardware;
pub mod thresholds;

pub use hardware::*;
pub use thresholds::*;

/// Complete monitor configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorConfig {
    /// Alert thresholds
    pub thresholds: Thresholds,
    /// I2C addresses of the bus peripherals
    pub addresses: DeviceAddresses,
    /// DS18B20 conversion resolution
    pub temperature_resolution: TemperatureResolution,
    /// Buzzer and RGB LED output levels
    pub indicator: IndicatorConfig,
    /// Cycle timing
    pub cadence: Cadence,
}

impl MonitorConfig {
    /// Board defaults
    pub const DEFAULT: Self = Self {
        thresholds: Thresholds::DEFAULT,
        addresses: DeviceAddresses::DEFAULT,
        temperature_resolution: TemperatureResolution::Bits12,
        indicator: IndicatorConfig::DEFAULT,
        cadence: Cadence::DEFAULT,
    };
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
