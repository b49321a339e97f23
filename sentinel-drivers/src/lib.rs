//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in sentinel-core for the wearable board:
//!
//! - Temperature sensor (DS18B20 on 1-Wire)
//! - Motion sensor (MPU-6050 on I2C)
//! - Sensor hub combining both with the startup probe
//! - SSD1306 OLED framebuffer and command protocol
//! - Buzzer and RGB LED alert indicator

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod display;
pub mod indicator;
pub mod sensor;

pub use display::{DisplayError, DisplayState, Ssd1306};
pub use indicator::AlertIndicator;
pub use sensor::{Ds18b20, Mpu6050, SensorHub};
