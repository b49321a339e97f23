//! Bit-banged 1-Wire master
//!
//! The data line idles high through the external 4.7 kΩ pull-up. The pin
//! emulates open drain: it is either driven low or released as an input.
//! Each time slot runs with interrupts masked so the sample point lands
//! inside the device's window.
//!
//! Standard-speed slot timing in microseconds:
//!
//! ```text
//! reset   low 480, release, sample at +70, recover 410
//! write 1 low 6,   release 64
//! write 0 low 60,  release 10
//! read    low 6,   release, sample at +9, recover 55
//! ```

use core::convert::Infallible;

use embassy_rp::gpio::{Flex, Pull};
use embassy_time::{block_for, Duration};
use sentinel_hal::onewire::OneWireBus;

mod timing {
    pub const RESET_LOW_US: u64 = 480;
    pub const PRESENCE_SAMPLE_US: u64 = 70;
    pub const RESET_RECOVERY_US: u64 = 410;
    pub const WRITE_ONE_LOW_US: u64 = 6;
    pub const WRITE_ONE_RELEASE_US: u64 = 64;
    pub const WRITE_ZERO_LOW_US: u64 = 60;
    pub const WRITE_ZERO_RELEASE_US: u64 = 10;
    pub const READ_LOW_US: u64 = 6;
    pub const READ_SAMPLE_US: u64 = 9;
    pub const READ_RECOVERY_US: u64 = 55;
}

fn wait_us(us: u64) {
    block_for(Duration::from_micros(us));
}

/// 1-Wire master on one GPIO
pub struct RpOneWire<'d> {
    pin: Flex<'d>,
}

impl<'d> RpOneWire<'d> {
    /// Take the pin and release the line
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_pull(Pull::None);
        pin.set_low();
        pin.set_as_input();
        Self { pin }
    }

    fn drive_low(&mut self) {
        self.pin.set_as_output();
    }

    fn release(&mut self) {
        self.pin.set_as_input();
    }
}

impl OneWireBus for RpOneWire<'_> {
    type Error = Infallible;

    fn reset(&mut self) -> Result<bool, Infallible> {
        let present = cortex_m::interrupt::free(|_| {
            self.drive_low();
            wait_us(timing::RESET_LOW_US);
            self.release();
            wait_us(timing::PRESENCE_SAMPLE_US);
            self.pin.is_low()
        });
        wait_us(timing::RESET_RECOVERY_US);
        Ok(present)
    }

    fn write_bit(&mut self, bit: bool) -> Result<(), Infallible> {
        let (low, release) = if bit {
            (timing::WRITE_ONE_LOW_US, timing::WRITE_ONE_RELEASE_US)
        } else {
            (timing::WRITE_ZERO_LOW_US, timing::WRITE_ZERO_RELEASE_US)
        };
        cortex_m::interrupt::free(|_| {
            self.drive_low();
            wait_us(low);
            self.release();
        });
        wait_us(release);
        Ok(())
    }

    fn read_bit(&mut self) -> Result<bool, Infallible> {
        let bit = cortex_m::interrupt::free(|_| {
            self.drive_low();
            wait_us(timing::READ_LOW_US);
            self.release();
            wait_us(timing::READ_SAMPLE_US);
            self.pin.is_high()
        });
        wait_us(timing::READ_RECOVERY_US);
        Ok(bit)
    }
}
