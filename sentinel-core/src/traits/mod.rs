//! Hardware abstraction traits
//!
//! These traits define the interface between the monitor cycle and the
//! hardware-specific drivers.

pub mod display;
pub mod output;
pub mod sensor;

pub use display::StatusDisplay;
pub use output::AlertOutput;
pub use sensor::{MotionSensor, SensorError, SensorSource, TemperatureSensor};
