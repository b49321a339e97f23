//! Monitor cycle orchestration
//!
//! One call to [`Monitor::tick`] is one complete cycle:
//!
//! ```text
//! read ──▶ evaluate ──▶ apply outputs ──▶ render status
//! ```
//!
//! Every step of cycle N finishes before cycle N+1 reads. The inter-cycle
//! sleep belongs to the caller so the cycle itself stays testable.

use crate::alert::AlertEngine;
use crate::config::Thresholds;
use crate::output::ActuatorState;
use crate::status::CycleReport;
use crate::traits::{AlertOutput, SensorSource, StatusDisplay};

/// Monitor owning the sensors, outputs and display
pub struct Monitor<S, A, D> {
    sensors: S,
    outputs: A,
    display: D,
    engine: AlertEngine,
    cycles: u32,
}

impl<S, A, D> Monitor<S, A, D>
where
    S: SensorSource,
    A: AlertOutput,
    D: StatusDisplay,
{
    /// Create a new monitor
    pub fn new(sensors: S, outputs: A, display: D, thresholds: Thresholds) -> Self {
        Self {
            sensors,
            outputs,
            display,
            engine: AlertEngine::new(thresholds),
            cycles: 0,
        }
    }

    /// Run one cycle and report what happened
    pub fn tick(&mut self) -> CycleReport {
        let reading = self.sensors.read();
        let alert = self.engine.evaluate(&reading);

        self.outputs.apply(ActuatorState::for_alert(&alert));

        let report = CycleReport {
            cycle: self.cycles,
            reading,
            alert,
            availability: self.sensors.availability(),
        };
        self.display.render(&report);

        trace!("cycle {} complete", self.cycles);
        self.cycles = self.cycles.wrapping_add(1);
        report
    }

    /// Number of completed cycles
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Get access to the outputs
    pub fn outputs(&self) -> &A {
        &self.outputs
    }

    /// Get access to the display
    pub fn display(&self) -> &D {
        &self.display
    }
}
