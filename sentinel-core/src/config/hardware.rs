//! Hardware configuration types
//!
//! Addresses, sensor resolution and output levels for the peripherals on
//! the wearable board.

/// I2C addresses of the devices on the shared bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceAddresses {
    /// MPU-6050 accelerometer (AD0 low)
    pub motion: u8,
    /// MAX30102 pulse oximeter (presence only)
    pub heart_rate: u8,
    /// SSD1306 OLED
    pub display: u8,
}

impl DeviceAddresses {
    /// Factory addresses
    pub const DEFAULT: Self = Self {
        motion: 0x68,
        heart_rate: 0x57,
        display: 0x3C,
    };
}

impl Default for DeviceAddresses {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// DS18B20 conversion resolution
///
/// Each extra bit doubles the conversion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureResolution {
    /// 0.5 °C, 93.75 ms
    Bits9,
    /// 0.25 °C, 187.5 ms
    Bits10,
    /// 0.125 °C, 375 ms
    Bits11,
    /// 0.0625 °C, 750 ms
    Bits12,
}

impl TemperatureResolution {
    /// Number of significant bits
    pub const fn bits(self) -> u8 {
        match self {
            Self::Bits9 => 9,
            Self::Bits10 => 10,
            Self::Bits11 => 11,
            Self::Bits12 => 12,
        }
    }

    /// Worst-case conversion time in milliseconds, rounded up
    pub const fn conversion_time_ms(self) -> u32 {
        match self {
            Self::Bits9 => 94,
            Self::Bits10 => 188,
            Self::Bits11 => 375,
            Self::Bits12 => 750,
        }
    }

    /// Value for the DS18B20 configuration register
    pub const fn config_register(self) -> u8 {
        ((self.bits() - 9) << 5) | 0x1F
    }

    /// Mask for the raw reading; low bits are undefined below 12 bits
    pub const fn raw_mask(self) -> u16 {
        !((1u16 << (12 - self.bits())) - 1)
    }
}

impl Default for TemperatureResolution {
    fn default() -> Self {
        Self::Bits12
    }
}

/// Buzzer and RGB LED output levels
///
/// Duties are in 10-bit units (0-1023).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorConfig {
    /// Buzzer tone (Hz)
    pub buzzer_frequency_hz: u32,
    /// Buzzer duty while sounding
    pub buzzer_duty_10bit: u16,
    /// RGB LED PWM frequency (Hz)
    pub led_frequency_hz: u32,
    /// Red channel duty while alerting
    pub led_duty_10bit: u16,
}

impl IndicatorConfig {
    /// Full scale of the 10-bit duty units
    pub const DUTY_FULL_SCALE: u16 = 1023;

    /// Board defaults
    pub const DEFAULT: Self = Self {
        buzzer_frequency_hz: 1500,
        buzzer_duty_10bit: 400,
        led_frequency_hz: 1000,
        led_duty_10bit: 1023,
    };
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
