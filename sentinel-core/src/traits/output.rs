//! Actuator output trait

use crate::output::ActuatorState;

/// Buzzer and LED output
///
/// `apply` has no failure path. Implementations swallow hardware errors
/// so actuation can never halt the monitor cycle.
pub trait AlertOutput {
    /// Drive the outputs to `state`
    ///
    /// Applying the same state again must not cause further hardware
    /// transitions.
    fn apply(&mut self, state: ActuatorState);
}
