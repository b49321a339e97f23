//! Status display trait

use crate::status::CycleReport;

/// Status screen
///
/// Best effort: an absent or failing display must never stop the cycle.
pub trait StatusDisplay {
    /// Redraw the whole status screen for this cycle
    fn render(&mut self, report: &CycleReport);
}
