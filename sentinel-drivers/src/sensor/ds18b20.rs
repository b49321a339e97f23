//! DS18B20 digital thermometer
//!
//! One sensor on a dedicated 1-Wire line. Each reading addresses the
//! sensor by ROM code, starts a conversion, waits out the conversion time
//! for the configured resolution and reads back the CRC-protected
//! scratchpad.
//!
//! Scratchpad layout:
//!
//! ```text
//! 0: temp LSB   1: temp MSB   2: TH   3: TL   4: config
//! 5: 0xFF       6: reserved   7: 0x10 8: CRC-8 of bytes 0-7
//! ```

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use sentinel_core::config::TemperatureResolution;
use sentinel_core::traits::{SensorError, TemperatureSensor};
use sentinel_hal::onewire::{crc8, OneWireBus, RomCode};

/// DS18B20 family code
pub const FAMILY_DS18B20: u8 = 0x28;

/// DS1822 family code (same command set)
pub const FAMILY_DS1822: u8 = 0x22;

/// Most devices examined during the startup search
pub const MAX_DEVICES: usize = 4;

/// Scratchpad length including CRC
pub const SCRATCHPAD_LEN: usize = 9;

/// °C per LSB of the raw reading
const CELSIUS_PER_LSB: f32 = 1.0 / 16.0;

/// Function commands
mod cmd {
    pub const CONVERT_T: u8 = 0x44;
    pub const WRITE_SCRATCHPAD: u8 = 0x4E;
    pub const READ_SCRATCHPAD: u8 = 0xBE;
}

/// Alarm registers written alongside the configuration byte
///
/// TH = +127 °C and TL = -128 °C so the alarm search never matches.
const ALARM_HIGH: u8 = 0x7F;
const ALARM_LOW: u8 = 0x80;

/// Check whether a family code speaks the DS18B20 command set
pub const fn is_supported_family(family: u8) -> bool {
    matches!(family, FAMILY_DS18B20 | FAMILY_DS1822)
}

/// Convert a raw scratchpad reading to °C
///
/// Bits below the configured resolution are undefined and get masked off.
pub fn raw_to_celsius(raw: i16, resolution: TemperatureResolution) -> f32 {
    let masked = (raw as u16 & resolution.raw_mask()) as i16;
    masked as f32 * CELSIUS_PER_LSB
}

/// DS18B20 on a 1-Wire bus
pub struct Ds18b20<W, D> {
    wire: W,
    delay: D,
    rom: RomCode,
    resolution: TemperatureResolution,
}

impl<W, D> Ds18b20<W, D>
where
    W: OneWireBus,
    D: DelayNs,
{
    /// Create a driver for a known device
    ///
    /// Does not touch the bus; call [`configure`](Self::configure) to push
    /// the resolution to the device.
    pub fn new(wire: W, delay: D, rom: RomCode, resolution: TemperatureResolution) -> Self {
        Self {
            wire,
            delay,
            rom,
            resolution,
        }
    }

    /// Search the bus and bind to the first supported device
    ///
    /// Returns `None` if the search fails or finds no DS18B20/DS1822.
    /// If the resolution cannot be written the device keeps its power-on
    /// 12-bit setting and the driver waits accordingly.
    pub fn probe(mut wire: W, delay: D, resolution: TemperatureResolution) -> Option<Self> {
        let mut roms: Vec<RomCode, MAX_DEVICES> = Vec::new();
        if wire.search(&mut roms).is_err() {
            warn!("1-Wire search failed");
            return None;
        }

        let rom = roms
            .iter()
            .copied()
            .find(|rom| is_supported_family(rom.family()))?;
        debug!("DS18B20 found, {} device(s) on the wire", roms.len());

        let mut sensor = Self::new(wire, delay, rom, resolution);
        if let Err(e) = sensor.configure() {
            warn!("DS18B20 resolution write failed: {:?}", e);
            sensor.resolution = TemperatureResolution::Bits12;
        }
        Some(sensor)
    }

    /// Write the configured resolution to the device scratchpad
    pub fn configure(&mut self) -> Result<(), SensorError> {
        self.select()?;
        self.wire
            .write_bytes(&[
                cmd::WRITE_SCRATCHPAD,
                ALARM_HIGH,
                ALARM_LOW,
                self.resolution.config_register(),
            ])
            .map_err(|_| SensorError::Transfer)
    }

    /// ROM code of the bound device
    pub fn rom(&self) -> RomCode {
        self.rom
    }

    /// Resolution the driver waits for
    pub fn resolution(&self) -> TemperatureResolution {
        self.resolution
    }

    /// Start a conversion and block until it is done
    pub fn convert(&mut self) -> Result<(), SensorError> {
        self.select()?;
        self.wire
            .write_byte(cmd::CONVERT_T)
            .map_err(|_| SensorError::Transfer)?;
        self.delay.delay_ms(self.resolution.conversion_time_ms());
        Ok(())
    }

    /// Read and verify the scratchpad
    pub fn read_scratchpad(&mut self) -> Result<[u8; SCRATCHPAD_LEN], SensorError> {
        self.select()?;
        self.wire
            .write_byte(cmd::READ_SCRATCHPAD)
            .map_err(|_| SensorError::Transfer)?;

        let mut pad = [0u8; SCRATCHPAD_LEN];
        self.wire
            .read_bytes(&mut pad)
            .map_err(|_| SensorError::Transfer)?;

        // An all-zero pad passes the CRC but means the line is stuck low
        if pad.iter().all(|&b| b == 0) {
            return Err(SensorError::Transfer);
        }
        if crc8(&pad[..SCRATCHPAD_LEN - 1]) != pad[SCRATCHPAD_LEN - 1] {
            return Err(SensorError::Crc);
        }
        Ok(pad)
    }

    /// Release the bus and delay
    pub fn release(self) -> (W, D) {
        (self.wire, self.delay)
    }

    fn select(&mut self) -> Result<(), SensorError> {
        match self.wire.select(&self.rom) {
            Ok(true) => Ok(()),
            Ok(false) => Err(SensorError::NoPresencePulse),
            Err(_) => Err(SensorError::Transfer),
        }
    }
}

impl<W, D> TemperatureSensor for Ds18b20<W, D>
where
    W: OneWireBus,
    D: DelayNs,
{
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        self.convert()?;
        let pad = self.read_scratchpad()?;
        let raw = i16::from_le_bytes([pad[0], pad[1]]);
        Ok(raw_to_celsius(raw, self.resolution))
    }
}
