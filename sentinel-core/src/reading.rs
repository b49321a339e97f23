//! Sensor readings and device availability
//!
//! A reading field is `None` when the sensor is absent or its transfer
//! failed this cycle. Zero is a valid measurement and never stands in for
//! a missing one.

/// Acceleration triple in g
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Acceleration {
    /// X axis (g)
    pub x: f32,
    /// Y axis (g)
    pub y: f32,
    /// Z axis (g)
    pub z: f32,
}

impl Acceleration {
    /// Create a new acceleration triple
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm of the triple (g)
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// One cycle's worth of sensor data
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReading {
    /// Body temperature (°C)
    pub temperature_c: Option<f32>,
    /// Acceleration (g)
    pub acceleration: Option<Acceleration>,
}

impl SensorReading {
    /// Nothing measured
    pub const EMPTY: Self = Self {
        temperature_c: None,
        acceleration: None,
    };

    /// Create a reading from optional fields
    pub const fn new(temperature_c: Option<f32>, acceleration: Option<Acceleration>) -> Self {
        Self {
            temperature_c,
            acceleration,
        }
    }
}

/// Which peripherals answered the startup probe
///
/// Fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceAvailability {
    /// DS18B20 found on the 1-Wire line
    pub temperature_sensor: bool,
    /// MPU-6050 acknowledged its address
    pub motion_sensor: bool,
    /// MAX30102 acknowledged its address
    pub heart_rate_sensor: bool,
    /// SSD1306 acknowledged its address
    pub display: bool,
}

impl DeviceAvailability {
    /// Nothing found
    pub const NONE: Self = Self {
        temperature_sensor: false,
        motion_sensor: false,
        heart_rate_sensor: false,
        display: false,
    };
}
