//! RP2040-specific HAL for the wearable health monitor
//!
//! Implements the `sentinel-hal` traits on top of `embassy-rp`:
//! - I2C master over the blocking I2C peripheral
//! - 1-Wire master bit-banged on a single GPIO
//! - PWM channel on one slice output

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod onewire;
pub mod pwm;

pub use i2c::RpI2c;
pub use onewire::RpOneWire;
pub use pwm::{PwmError, RpPwmChannel};
