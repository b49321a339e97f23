//! I2C bus abstractions
//!
//! Provides traits for I2C master operations that can be implemented
//! by chip-specific HALs.

use heapless::Vec;

/// First non-reserved 7-bit address
pub const FIRST_ADDRESS: u8 = 0x08;

/// Last non-reserved 7-bit address
pub const LAST_ADDRESS: u8 = 0x77;

/// Number of addresses covered by [`I2cBus::scan`]
pub const SCAN_CAPACITY: usize = (LAST_ADDRESS - FIRST_ADDRESS + 1) as usize;

/// Addresses that answered a bus scan
pub type ScanResult = Vec<u8, SCAN_CAPACITY>;

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically register address)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Read `buf.len()` bytes starting at `register`
    fn read_register(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.write_read(address, &[register], buf)
    }

    /// Check whether a device acknowledges `address`
    ///
    /// Uses a single-byte read, which every device on this board tolerates.
    fn probe(&mut self, address: u8) -> bool {
        let mut scratch = [0u8; 1];
        self.read(address, &mut scratch).is_ok()
    }

    /// Scan the non-reserved address range and return every responder
    fn scan(&mut self) -> ScanResult {
        let mut found = ScanResult::new();
        for address in FIRST_ADDRESS..=LAST_ADDRESS {
            if self.probe(address) {
                // Capacity covers the whole range
                let _ = found.push(address);
            }
        }
        found
    }
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        (**self).write_read(address, write_data, read_buf)
    }

    fn probe(&mut self, address: u8) -> bool {
        (**self).probe(address)
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::FAST
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };
}
