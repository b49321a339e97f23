//! Alert evaluation
//!
//! Turns a sensor reading into an alert. The decision is re-derived from
//! scratch every cycle: no latching, no debounce, no dwell time.

pub mod engine;

pub use engine::{evaluate, AlertCause, AlertCauses, AlertEngine, AlertState};
