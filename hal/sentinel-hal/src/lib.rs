//! Sentinel Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. The drivers and the monitor core only ever talk
//! to these traits, so host tests can substitute fake transports.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (sentinel-firmware)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sentinel-drivers (DS18B20, MPU-6050,   │
//! │  SSD1306, buzzer/RGB indicator)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sentinel-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!           ┌───────────────────┐
//!           │ sentinel-hal-     │
//!           │    rp2040         │
//!           └───────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations and device scan
//! - [`onewire::OneWireBus`] - 1-Wire bus operations and ROM search
//! - [`pwm::PwmOutput`] - PWM channel output
//!
//! [`shared::SharedI2c`] serializes every device on one physical I2C bus
//! behind a single mutex.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod i2c;
pub mod onewire;
pub mod pwm;
pub mod shared;

// Re-export key traits at crate root for convenience
pub use i2c::I2cBus;
pub use onewire::{crc8, OneWireBus, RomCode};
pub use pwm::{Duty, PwmOutput, PwmTiming};
pub use shared::SharedI2c;
