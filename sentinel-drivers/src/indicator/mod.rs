//! Buzzer and RGB LED alert indicator
//!
//! Four PWM channels: a piezo buzzer and the three channels of a common
//! cathode RGB LED. The indicator remembers the last state that reached
//! the hardware and skips writes when the requested state matches it, so
//! a steady alert neither restarts the tone nor flickers the LED.
//!
//! A failed channel write is logged and forgotten. The cached state is
//! cleared so the next cycle rewrites every channel.

use sentinel_core::config::IndicatorConfig;
use sentinel_core::traits::AlertOutput;
use sentinel_core::{ActuatorState, LedColor};
use sentinel_hal::pwm::{Duty, PwmOutput};

/// Buzzer plus RGB LED
pub struct AlertIndicator<B, R, G, L> {
    buzzer: B,
    red: R,
    green: G,
    blue: L,
    config: IndicatorConfig,
    applied: Option<ActuatorState>,
}

impl<B, R, G, L> AlertIndicator<B, R, G, L>
where
    B: PwmOutput,
    R: PwmOutput,
    G: PwmOutput,
    L: PwmOutput,
{
    /// Create the indicator and drive every channel quiet
    pub fn new(buzzer: B, red: R, green: G, blue: L, config: IndicatorConfig) -> Self {
        let mut indicator = Self {
            buzzer,
            red,
            green,
            blue,
            config,
            applied: None,
        };
        indicator.apply(ActuatorState::QUIET);
        indicator
    }

    /// State last written to the hardware without error
    pub fn applied(&self) -> Option<ActuatorState> {
        self.applied
    }

    fn buzzer_duty(&self, on: bool) -> Duty {
        if on {
            Duty::from_ratio(
                self.config.buzzer_duty_10bit as u32,
                IndicatorConfig::DUTY_FULL_SCALE as u32,
            )
        } else {
            Duty::OFF
        }
    }

    fn red_duty(&self, color: LedColor) -> Duty {
        match color {
            LedColor::Red => Duty::from_ratio(
                self.config.led_duty_10bit as u32,
                IndicatorConfig::DUTY_FULL_SCALE as u32,
            ),
            LedColor::Off => Duty::OFF,
        }
    }

    fn write(&mut self, state: ActuatorState) -> bool {
        let buzzer_duty = self.buzzer_duty(state.buzzer_on);
        let red_duty = self.red_duty(state.led);
        let tone = self.config.buzzer_frequency_hz;
        let led = self.config.led_frequency_hz;

        let mut ok = true;
        if self.buzzer.set(tone, buzzer_duty).is_err() {
            warn!("buzzer write failed");
            ok = false;
        }
        if self.red.set(led, red_duty).is_err() {
            warn!("red LED write failed");
            ok = false;
        }
        if self.green.set(led, Duty::OFF).is_err() {
            warn!("green LED write failed");
            ok = false;
        }
        if self.blue.set(led, Duty::OFF).is_err() {
            warn!("blue LED write failed");
            ok = false;
        }
        ok
    }

    /// Release the channels
    pub fn release(self) -> (B, R, G, L) {
        (self.buzzer, self.red, self.green, self.blue)
    }
}

impl<B, R, G, L> AlertOutput for AlertIndicator<B, R, G, L>
where
    B: PwmOutput,
    R: PwmOutput,
    G: PwmOutput,
    L: PwmOutput,
{
    fn apply(&mut self, state: ActuatorState) {
        if self.applied == Some(state) {
            return;
        }
        trace!("indicator: buzzer={} red={}", state.buzzer_on, state.led == LedColor::Red);
        self.applied = if self.write(state) { Some(state) } else { None };
    }
}
