//! Shared I2C bus
//!
//! The temperature, motion and display devices share one physical bus.
//! Each driver gets its own [`SharedI2c`] handle; every transaction takes
//! the same mutex, so transfers from different drivers never interleave.
//!
//! Use `NoopRawMutex` when everything runs on one executor thread and
//! `CriticalSectionRawMutex` when handles cross interrupt or core
//! boundaries.
//!
//! ```ignore
//! use core::cell::RefCell;
//! use embassy_sync::blocking_mutex::{raw::NoopRawMutex, Mutex};
//!
//! let bus = Mutex::<NoopRawMutex, _>::new(RefCell::new(i2c));
//! let sensors = SharedI2c::new(&bus);
//! let display = SharedI2c::new(&bus);
//! ```

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::i2c::I2cBus;

/// Handle to an I2C bus shared behind a mutex
pub struct SharedI2c<'a, M: RawMutex, B> {
    bus: &'a Mutex<M, RefCell<B>>,
}

impl<'a, M: RawMutex, B> SharedI2c<'a, M, B> {
    /// Create a new handle to the shared bus
    #[inline]
    pub const fn new(bus: &'a Mutex<M, RefCell<B>>) -> Self {
        Self { bus }
    }
}

impl<M: RawMutex, B> Clone for SharedI2c<'_, M, B> {
    fn clone(&self) -> Self {
        Self { bus: self.bus }
    }
}

impl<M: RawMutex, B: I2cBus> I2cBus for SharedI2c<'_, M, B> {
    type Error = B::Error;

    #[inline]
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.lock(|bus| bus.borrow_mut().write(address, data))
    }

    #[inline]
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.lock(|bus| bus.borrow_mut().read(address, buf))
    }

    #[inline]
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.bus
            .lock(|bus| bus.borrow_mut().write_read(address, write_data, read_buf))
    }

    #[inline]
    fn probe(&mut self, address: u8) -> bool {
        self.bus.lock(|bus| bus.borrow_mut().probe(address))
    }
}
