//! Status screen layout and per-cycle console report

use core::fmt::{self, Write};

use heapless::{String, Vec};

use crate::alert::AlertState;
use crate::reading::{DeviceAvailability, SensorReading};

/// Lines on the status screen
pub const STATUS_LINES: usize = 5;

/// Characters per line (128 px / 6 px glyphs)
pub const LINE_CAPACITY: usize = 21;

/// One rendered status line
pub type StatusLine = String<LINE_CAPACITY>;

/// Screen title
pub const TITLE: &str = "Soldier Monitor";

/// Shown in place of a missing temperature
pub const PLACEHOLDER: &str = "--";

/// Everything observable about one completed cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Cycle number, starting at 0
    pub cycle: u32,
    /// What was measured
    pub reading: SensorReading,
    /// What was decided
    pub alert: AlertState,
    /// Which peripherals were found at startup
    pub availability: DeviceAvailability,
}

impl CycleReport {
    /// Fixed status screen layout
    ///
    /// ```text
    /// Soldier Monitor
    /// Temp: 36.6C
    /// Fall: NO
    /// HR Sensor: OK
    /// Alert: NO
    /// ```
    pub fn status_lines(&self) -> Vec<StatusLine, STATUS_LINES> {
        let mut lines = Vec::new();

        let mut title = StatusLine::new();
        let _ = title.push_str(TITLE);

        let mut temp = StatusLine::new();
        let _ = match self.reading.temperature_c {
            Some(t) => write!(temp, "Temp: {:.1}C", t),
            None => write!(temp, "Temp: {}", PLACEHOLDER),
        };

        let mut fall = StatusLine::new();
        let _ = write!(fall, "Fall: {}", yes_no(self.alert.fall_detected()));

        let mut heart_rate = StatusLine::new();
        let _ = write!(
            heart_rate,
            "HR Sensor: {}",
            if self.availability.heart_rate_sensor {
                "OK"
            } else {
                "NO"
            }
        );

        let mut alert = StatusLine::new();
        let _ = write!(alert, "Alert: {}", yes_no(self.alert.active));

        for line in [title, temp, fall, heart_rate, alert] {
            // Capacity matches the layout
            let _ = lines.push(line);
        }
        lines
    }
}

/// Console line: `TEMP: 36.56 | FALL: false | ALERT: false`
impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reading.temperature_c {
            Some(t) => write!(f, "TEMP: {:.2}", t)?,
            None => write!(f, "TEMP: {}", PLACEHOLDER)?,
        }
        write!(
            f,
            " | FALL: {} | ALERT: {}",
            self.alert.fall_detected(),
            self.alert.active
        )
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "YES"
    } else {
        "NO"
    }
}
