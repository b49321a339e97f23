//! PWM channel driver for RP2040
//!
//! Each channel owns a whole slice and drives its A output. Frequency and
//! duty are converted to a divider, wrap and compare value against the
//! current system clock.

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};
use sentinel_hal::pwm::{Duty, PwmOutput, PwmTiming};

/// PWM errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmError {
    /// Frequency cannot be produced from the system clock
    UnsupportedFrequency,
}

/// PWM output on channel A of one slice
pub struct RpPwmChannel<'d> {
    pwm: Pwm<'d>,
    current: Option<(u32, Duty)>,
}

impl<'d> RpPwmChannel<'d> {
    /// Wrap a slice configured with [`Pwm::new_output_a`]
    pub fn new(pwm: Pwm<'d>) -> Self {
        Self { pwm, current: None }
    }
}

impl PwmOutput for RpPwmChannel<'_> {
    type Error = PwmError;

    fn set(&mut self, frequency_hz: u32, duty: Duty) -> Result<(), PwmError> {
        if self.current == Some((frequency_hz, duty)) {
            return Ok(());
        }

        let timing = PwmTiming::for_frequency(clk_sys_freq(), frequency_hz)
            .ok_or(PwmError::UnsupportedFrequency)?;

        let mut config = Config::default();
        config.divider = timing.divider.into();
        config.top = timing.top;
        config.compare_a = timing.compare(duty);
        self.pwm.set_config(&config);

        self.current = Some((frequency_hz, duty));
        Ok(())
    }
}
