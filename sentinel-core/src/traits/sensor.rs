//! Sensor traits

use crate::reading::{Acceleration, DeviceAvailability, SensorReading};

/// Errors that can occur while reading a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transfer failed
    Transfer,
    /// Data failed its checksum
    Crc,
    /// Nothing answered the 1-Wire reset
    NoPresencePulse,
}

/// Trait for temperature sensors
pub trait TemperatureSensor {
    /// Run a conversion and return the result in degrees Celsius
    ///
    /// May block for the sensor's conversion time.
    fn read_celsius(&mut self) -> Result<f32, SensorError>;
}

/// Trait for accelerometers
pub trait MotionSensor {
    /// Read the current acceleration in g
    fn read_acceleration(&mut self) -> Result<Acceleration, SensorError>;
}

/// Source of one reading per cycle
///
/// Implementations absorb every sensor error: a failed or missing sensor
/// shows up as a `None` field, never as an error or a panic.
pub trait SensorSource {
    /// Peripherals found at startup
    fn availability(&self) -> DeviceAvailability;

    /// Take this cycle's reading
    fn read(&mut self) -> SensorReading;
}
