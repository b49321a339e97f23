//! Alert engine implementation
//!
//! Checks body temperature and fall magnitude against fixed thresholds.

use crate::config::Thresholds;
use crate::reading::SensorReading;

/// Reason an alert is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertCause {
    /// Temperature at or above the limit
    TemperatureExceeded,
    /// Acceleration magnitude above the fall limit
    FallDetected,
}

impl AlertCause {
    /// Every cause, in reporting order
    pub const ALL: [AlertCause; 2] = [AlertCause::TemperatureExceeded, AlertCause::FallDetected];

    const fn bit(self) -> u8 {
        match self {
            Self::TemperatureExceeded => 0x01,
            Self::FallDetected => 0x02,
        }
    }
}

/// Set of alert causes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertCauses(u8);

impl AlertCauses {
    /// No causes
    pub const EMPTY: Self = Self(0);

    /// Set holding a single cause
    pub const fn only(cause: AlertCause) -> Self {
        Self(cause.bit())
    }

    /// Add a cause
    pub fn insert(&mut self, cause: AlertCause) {
        self.0 |= cause.bit();
    }

    /// Check for a cause
    pub const fn contains(&self, cause: AlertCause) -> bool {
        self.0 & cause.bit() != 0
    }

    /// Check if no cause is set
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of causes set
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate the causes in reporting order
    pub fn iter(&self) -> impl Iterator<Item = AlertCause> + '_ {
        AlertCause::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

/// Outcome of one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertState {
    /// Any cause present
    pub active: bool,
    /// Why the alert is active
    pub causes: AlertCauses,
}

impl AlertState {
    /// No alert
    pub const NORMAL: Self = Self {
        active: false,
        causes: AlertCauses::EMPTY,
    };

    /// Build a state whose `active` flag matches `causes`
    pub const fn from_causes(causes: AlertCauses) -> Self {
        Self {
            active: !causes.is_empty(),
            causes,
        }
    }

    /// Check if a fall was detected
    pub const fn fall_detected(&self) -> bool {
        self.causes.contains(AlertCause::FallDetected)
    }

    /// Check if the temperature limit was reached
    pub const fn temperature_exceeded(&self) -> bool {
        self.causes.contains(AlertCause::TemperatureExceeded)
    }
}

/// Evaluate a reading against thresholds
///
/// - `TemperatureExceeded` iff a temperature is present and `>=` the limit
/// - `FallDetected` iff an acceleration is present and its magnitude is
///   strictly `>` the limit
pub fn evaluate(reading: &SensorReading, thresholds: &Thresholds) -> AlertState {
    let mut causes = AlertCauses::EMPTY;

    if let Some(temp) = reading.temperature_c {
        if temp >= thresholds.temperature_limit_c {
            causes.insert(AlertCause::TemperatureExceeded);
        }
    }

    if let Some(accel) = reading.acceleration {
        if accel.magnitude() > thresholds.fall_magnitude_limit_g {
            causes.insert(AlertCause::FallDetected);
        }
    }

    AlertState::from_causes(causes)
}

/// Alert engine holding the configured thresholds
///
/// The thresholds are the only state carried between cycles.
#[derive(Debug, Clone)]
pub struct AlertEngine {
    thresholds: Thresholds,
}

impl Default for AlertEngine {
    fn default() -> Self {
        Self::new(Thresholds::DEFAULT)
    }
}

impl AlertEngine {
    /// Create a new alert engine
    pub const fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Configured thresholds
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Evaluate a reading
    pub fn evaluate(&self, reading: &SensorReading) -> AlertState {
        let state = evaluate(reading, &self.thresholds);
        if state.active {
            debug!("alert active: {}", state.causes);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::Acceleration;
    use proptest::prelude::*;

    fn engine() -> AlertEngine {
        AlertEngine::new(Thresholds::new(38.0, 2.5))
    }

    #[test]
    fn test_normal_operation() {
        let reading = SensorReading::new(Some(36.6), Some(Acceleration::new(0.0, 0.0, 1.0)));
        assert_eq!(engine().evaluate(&reading), AlertState::NORMAL);
    }

    #[test]
    fn test_over_temperature_without_motion_sensor() {
        let reading = SensorReading::new(Some(39.0), None);
        let state = engine().evaluate(&reading);

        assert!(state.active);
        assert!(state.temperature_exceeded());
        assert!(!state.fall_detected());
        assert_eq!(state.causes.len(), 1);
    }

    #[test]
    fn test_temperature_limit_is_inclusive() {
        let state = engine().evaluate(&SensorReading::new(Some(38.0), None));
        assert!(state.temperature_exceeded());

        let state = engine().evaluate(&SensorReading::new(Some(37.99), None));
        assert_eq!(state, AlertState::NORMAL);
    }

    #[test]
    fn test_fall_limit_is_exclusive() {
        let at_limit = SensorReading::new(None, Some(Acceleration::new(2.5, 0.0, 0.0)));
        assert!(!engine().evaluate(&at_limit).fall_detected());

        let above = SensorReading::new(None, Some(Acceleration::new(2.6, 0.0, 0.0)));
        assert!(engine().evaluate(&above).fall_detected());
    }

    #[test]
    fn test_small_motion_no_temperature() {
        let reading = SensorReading::new(None, Some(Acceleration::new(0.1, 0.1, 0.1)));
        let state = engine().evaluate(&reading);
        assert!(!state.active);
        assert!(state.causes.is_empty());
    }

    #[test]
    fn test_zero_temperature_is_a_reading() {
        // Zero at the limit alerts; zero below it is normal
        let limit_zero = AlertEngine::new(Thresholds::new(0.0, 2.5));
        let state = limit_zero.evaluate(&SensorReading::new(Some(0.0), None));
        assert!(state.temperature_exceeded());

        let state = engine().evaluate(&SensorReading::new(Some(0.0), None));
        assert!(!state.active);
        assert!(state.causes.is_empty());
    }

    #[test]
    fn test_both_causes() {
        let reading = SensorReading::new(Some(40.0), Some(Acceleration::new(0.0, 3.0, 0.0)));
        let state = engine().evaluate(&reading);
        assert!(state.active);
        assert_eq!(state.causes.len(), 2);

        let mut iter = state.causes.iter();
        assert_eq!(iter.next(), Some(AlertCause::TemperatureExceeded));
        assert_eq!(iter.next(), Some(AlertCause::FallDetected));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_no_hysteresis() {
        // Oscillating around the limit toggles every cycle
        let e = engine();
        let samples = [38.0, 37.9, 38.0, 37.9];
        let states: [bool; 4] = samples.map(|t| e.evaluate(&SensorReading::new(Some(t), None)).active);
        assert_eq!(states, [true, false, true, false]);
    }

    fn accel() -> impl Strategy<Value = Acceleration> {
        (-16.0f32..16.0, -16.0f32..16.0, -16.0f32..16.0).prop_map(|(x, y, z)| Acceleration::new(x, y, z))
    }

    proptest! {
        #[test]
        fn prop_absent_temperature_never_exceeds(
            accel in proptest::option::of(accel()),
            limit in -50.0f32..100.0,
        ) {
            let thresholds = Thresholds::new(limit, 2.5);
            let state = evaluate(&SensorReading::new(None, accel), &thresholds);
            prop_assert!(!state.causes.contains(AlertCause::TemperatureExceeded));
        }

        #[test]
        fn prop_hot_reading_is_always_active(
            excess in 0.0f32..40.0,
            accel in proptest::option::of(accel()),
        ) {
            let thresholds = Thresholds::DEFAULT;
            let temp = thresholds.temperature_limit_c + excess;
            let state = evaluate(&SensorReading::new(Some(temp), accel), &thresholds);
            prop_assert!(state.active);
            prop_assert!(state.temperature_exceeded());
        }

        #[test]
        fn prop_large_magnitude_is_a_fall(accel in accel(), temp in proptest::option::of(-20.0f32..60.0)) {
            let thresholds = Thresholds::DEFAULT;
            let state = evaluate(&SensorReading::new(temp, Some(accel)), &thresholds);
            prop_assert_eq!(
                state.fall_detected(),
                accel.magnitude() > thresholds.fall_magnitude_limit_g
            );
        }

        #[test]
        fn prop_active_iff_any_cause(
            temp in proptest::option::of(-20.0f32..60.0),
            accel in proptest::option::of(accel()),
        ) {
            let state = evaluate(&SensorReading::new(temp, accel), &Thresholds::DEFAULT);
            prop_assert_eq!(state.active, !state.causes.is_empty());
        }
    }
}
