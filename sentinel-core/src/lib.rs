//! Board-agnostic core logic for the wearable health monitor
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Sensor reading and device availability types
//! - Alert evaluation (over-temperature, fall detection)
//! - Actuator state derivation
//! - Status screen layout and the per-cycle console report
//! - Component traits and the monitor cycle orchestrator
//! - Compile-time configuration

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod alert;
pub mod config;
pub mod monitor;
pub mod output;
pub mod reading;
pub mod status;
pub mod traits;

pub use alert::{AlertCause, AlertCauses, AlertEngine, AlertState};
pub use monitor::Monitor;
pub use output::{ActuatorState, LedColor};
pub use reading::{Acceleration, DeviceAvailability, SensorReading};
pub use status::CycleReport;
