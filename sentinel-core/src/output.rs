//! Actuator output state

use crate::alert::AlertState;

/// RGB indicator color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedColor {
    /// All channels dark
    #[default]
    Off,
    /// Red channel at full configured duty
    Red,
}

/// What the buzzer and LED should be doing
///
/// Derived from the alert every cycle; carries no memory of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorState {
    /// Buzzer sounding
    pub buzzer_on: bool,
    /// LED color
    pub led: LedColor,
}

impl ActuatorState {
    /// Everything off
    pub const QUIET: Self = Self {
        buzzer_on: false,
        led: LedColor::Off,
    };

    /// Buzzer on, LED red
    pub const ALARM: Self = Self {
        buzzer_on: true,
        led: LedColor::Red,
    };

    /// Derive outputs from an alert
    pub const fn for_alert(alert: &AlertState) -> Self {
        if alert.active {
            Self::ALARM
        } else {
            Self::QUIET
        }
    }
}

impl From<&AlertState> for ActuatorState {
    fn from(alert: &AlertState) -> Self {
        Self::for_alert(alert)
    }
}
