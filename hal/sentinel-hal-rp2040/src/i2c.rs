//! I2C bus driver for RP2040

use embassy_rp::i2c::{Blocking, Config, Error, I2c, Instance};
use embedded_hal::i2c::I2c as HalI2c;
use sentinel_hal::i2c::{I2cBus, I2cConfig};

/// Build the peripheral configuration for a bus speed
pub fn config(bus: I2cConfig) -> Config {
    let mut config = Config::default();
    config.frequency = bus.frequency;
    config
}

/// Blocking I2C master
pub struct RpI2c<'d, T: Instance> {
    i2c: I2c<'d, T, Blocking>,
}

impl<'d, T: Instance> RpI2c<'d, T> {
    /// Wrap an initialized blocking I2C peripheral
    pub fn new(i2c: I2c<'d, T, Blocking>) -> Self {
        Self { i2c }
    }
}

impl<T: Instance> I2cBus for RpI2c<'_, T> {
    type Error = Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Error> {
        HalI2c::write(&mut self.i2c, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Error> {
        HalI2c::read(&mut self.i2c, address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Error> {
        HalI2c::write_read(&mut self.i2c, address, write_data, read_buf)
    }

    /// The controller cannot issue an address-only transfer, so try a
    /// one-byte read and fall back to writing a single zero byte for
    /// write-only devices such as the SSD1306.
    fn probe(&mut self, address: u8) -> bool {
        let mut scratch = [0u8; 1];
        HalI2c::read(&mut self.i2c, address, &mut scratch).is_ok()
            || HalI2c::write(&mut self.i2c, address, &[0x00]).is_ok()
    }
}
