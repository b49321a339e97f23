//! Sensor drivers
//!
//! - [`Ds18b20`] - body temperature over 1-Wire
//! - [`Mpu6050`] - acceleration over I2C
//! - [`SensorHub`] - startup probe and per-cycle reading

pub mod ds18b20;
pub mod hub;
pub mod mpu6050;

pub use ds18b20::Ds18b20;
pub use hub::SensorHub;
pub use mpu6050::Mpu6050;
