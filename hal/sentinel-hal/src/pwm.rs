//! PWM output abstractions

/// PWM duty cycle as a fraction of the period
///
/// Stored as a 16-bit fraction so chip HALs can scale it to whatever
/// compare-register width they have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Duty(u16);

impl Duty {
    /// Output held low
    pub const OFF: Self = Self(0);

    /// Output held high
    pub const FULL: Self = Self(u16::MAX);

    /// Duty from a raw 16-bit fraction
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Duty of `num / den`, clamped to full scale
    ///
    /// A zero denominator yields [`Duty::OFF`].
    pub const fn from_ratio(num: u32, den: u32) -> Self {
        if den == 0 {
            return Self::OFF;
        }
        let num = if num > den { den } else { num };
        Self(((num as u64 * u16::MAX as u64) / den as u64) as u16)
    }

    /// Raw 16-bit fraction
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Scale to a compare value for a counter that wraps at `top`
    ///
    /// Full duty maps to `top + 1` so the output never drops low.
    pub const fn scale_to(self, top: u16) -> u32 {
        if self.0 == u16::MAX {
            top as u32 + 1
        } else {
            (self.0 as u32 * (top as u32 + 1)) / (u16::MAX as u32 + 1)
        }
    }

    /// Check if the output is fully off
    pub const fn is_off(self) -> bool {
        self.0 == 0
    }
}

/// Counter settings for one PWM frequency
///
/// The counter runs at `clock_hz / divider` and wraps after `top + 1`
/// counts. `top` never exceeds `u16::MAX - 1` so a compare value of
/// `top + 1` (full duty) still fits a 16-bit register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTiming {
    /// Integer clock divider, at least 1
    pub divider: u8,
    /// Counter wrap value
    pub top: u16,
}

impl PwmTiming {
    /// Pick the smallest divider that reaches `frequency_hz`
    ///
    /// Returns `None` for a zero frequency, a frequency above the clock, or
    /// one too low to reach even with the largest divider.
    pub const fn for_frequency(clock_hz: u32, frequency_hz: u32) -> Option<Self> {
        if frequency_hz == 0 || frequency_hz > clock_hz {
            return None;
        }
        let counts = clock_hz / frequency_hz;
        let max_top = u16::MAX as u32 - 1;
        let divider = (counts + max_top) / (max_top + 1);
        let divider = if divider == 0 { 1 } else { divider };
        if divider > u8::MAX as u32 {
            return None;
        }
        let top = counts / divider;
        let top = if top == 0 { 0 } else { top - 1 };
        Some(Self {
            divider: divider as u8,
            top: top as u16,
        })
    }

    /// Compare value for `duty` at this timing
    pub const fn compare(&self, duty: Duty) -> u16 {
        duty.scale_to(self.top) as u16
    }
}

/// A single PWM output channel
///
/// Implementations should treat a repeated identical `set` as a no-op on
/// the hardware where the peripheral allows it.
pub trait PwmOutput {
    /// Error type for PWM configuration
    type Error;

    /// Configure frequency and duty in one step
    fn set(&mut self, frequency_hz: u32, duty: Duty) -> Result<(), Self::Error>;
}

impl<T: PwmOutput + ?Sized> PwmOutput for &mut T {
    type Error = T::Error;

    fn set(&mut self, frequency_hz: u32, duty: Duty) -> Result<(), Self::Error> {
        (**self).set(frequency_hz, duty)
    }
}
