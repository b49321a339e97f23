//! MPU-6050 accelerometer
//!
//! Only the accelerometer is used, at the power-on full scale of ±2 g.

use embedded_hal::delay::DelayNs;
use sentinel_core::traits::{MotionSensor, SensorError};
use sentinel_core::Acceleration;
use sentinel_hal::i2c::I2cBus;

/// Default address with AD0 tied low
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// LSB per g at ±2 g full scale
pub const LSB_PER_G: f32 = 16384.0;

/// Settling time after leaving sleep
pub const WAKE_DELAY_MS: u32 = 100;

mod reg {
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    pub const PWR_MGMT_1: u8 = 0x6B;
}

/// Convert the six accelerometer bytes (X, Y, Z; big-endian) to g
pub fn raw_to_acceleration(raw: &[u8; 6]) -> Acceleration {
    let axis = |i: usize| i16::from_be_bytes([raw[i], raw[i + 1]]) as f32 / LSB_PER_G;
    Acceleration::new(axis(0), axis(2), axis(4))
}

/// MPU-6050 on an I2C bus
pub struct Mpu6050<I> {
    i2c: I,
    address: u8,
}

impl<I: I2cBus> Mpu6050<I> {
    /// Create a driver for the device at `address`
    pub fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Clear the sleep bit and wait for the sensor to settle
    pub fn wake<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &[reg::PWR_MGMT_1, 0x00])
            .map_err(|_| SensorError::Transfer)?;
        delay.delay_ms(WAKE_DELAY_MS);
        Ok(())
    }

    /// Release the bus
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2cBus> MotionSensor for Mpu6050<I> {
    fn read_acceleration(&mut self) -> Result<Acceleration, SensorError> {
        let mut raw = [0u8; 6];
        self.i2c
            .read_register(self.address, reg::ACCEL_XOUT_H, &mut raw)
            .map_err(|_| SensorError::Transfer)?;
        Ok(raw_to_acceleration(&raw))
    }
}
