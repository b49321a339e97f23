//! 1-Wire bus abstractions
//!
//! Chip HALs only provide the three bus primitives (reset, bit write,
//! bit read). Byte transfers, device selection and the ROM search are
//! built on top of them here so every platform gets the same behavior.

use heapless::Vec;

/// ROM command: address every device with the following ROM code
pub const MATCH_ROM: u8 = 0x55;

/// ROM command: enumerate devices bit by bit
pub const SEARCH_ROM: u8 = 0xF0;

/// 64-bit device identifier
///
/// Byte 0 is the family code, bytes 1-6 the serial number and byte 7
/// the CRC-8 of the first seven bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RomCode([u8; 8]);

impl RomCode {
    /// Wrap raw ROM bytes (LSB first, as transmitted on the wire)
    pub const fn new(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// Family code identifying the device type
    pub const fn family(&self) -> u8 {
        self.0[0]
    }

    /// Raw bytes in wire order
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// Check the embedded CRC
    pub fn is_valid(&self) -> bool {
        crc8(&self.0[..7]) == self.0[7]
    }
}

/// Dallas/Maxim CRC-8 (polynomial x^8 + x^5 + x^4 + 1, reflected)
///
/// Running the CRC over data followed by its own CRC yields zero.
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in data {
        let mut b = byte;
        for _ in 0..8 {
            let mix = (crc ^ b) & 0x01;
            crc >>= 1;
            if mix != 0 {
                crc ^= 0x8C;
            }
            b >>= 1;
        }
    }
    crc
}

/// 1-Wire bus master
pub trait OneWireBus {
    /// Error type for bus operations
    type Error;

    /// Issue a reset pulse
    ///
    /// Returns `true` if at least one device answered with a presence pulse.
    fn reset(&mut self) -> Result<bool, Self::Error>;

    /// Write a single time slot
    fn write_bit(&mut self, bit: bool) -> Result<(), Self::Error>;

    /// Read a single time slot
    fn read_bit(&mut self) -> Result<bool, Self::Error>;

    /// Write a byte, least significant bit first
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        for i in 0..8 {
            self.write_bit(byte & (1 << i) != 0)?;
        }
        Ok(())
    }

    /// Read a byte, least significant bit first
    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut byte = 0u8;
        for i in 0..8 {
            if self.read_bit()? {
                byte |= 1 << i;
            }
        }
        Ok(byte)
    }

    /// Write a sequence of bytes
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &b in bytes {
            self.write_byte(b)?;
        }
        Ok(())
    }

    /// Fill `buf` with bytes read from the bus
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        for b in buf.iter_mut() {
            *b = self.read_byte()?;
        }
        Ok(())
    }

    /// Reset the bus and address a single device
    ///
    /// Returns `false` if nothing answered the reset.
    fn select(&mut self, rom: &RomCode) -> Result<bool, Self::Error> {
        if !self.reset()? {
            return Ok(false);
        }
        self.write_byte(MATCH_ROM)?;
        self.write_bytes(rom.as_bytes())?;
        Ok(true)
    }

    /// Enumerate every device on the bus
    ///
    /// Standard binary-tree search: each pass follows the previous path up
    /// to the last unexplored discrepancy and then takes the 1 branch there.
    /// ROM codes that fail their CRC are dropped. Stops early when `found`
    /// is full, or when a pass yields the all-zero ROM (line held low).
    fn search<const N: usize>(&mut self, found: &mut Vec<RomCode, N>) -> Result<(), Self::Error> {
        let mut rom = [0u8; 8];
        let mut last_discrepancy: Option<u8> = None;

        loop {
            if !self.reset()? {
                return Ok(());
            }
            self.write_byte(SEARCH_ROM)?;

            let mut last_zero: Option<u8> = None;
            for bit_index in 0..64u8 {
                let byte = (bit_index / 8) as usize;
                let mask = 1u8 << (bit_index % 8);

                let id_bit = self.read_bit()?;
                let cmp_bit = self.read_bit()?;

                if id_bit && cmp_bit {
                    // Every device dropped out mid-search
                    return Ok(());
                }

                let direction = if id_bit != cmp_bit {
                    id_bit
                } else {
                    let taken = match last_discrepancy {
                        Some(last) if bit_index < last => rom[byte] & mask != 0,
                        Some(last) if bit_index == last => true,
                        _ => false,
                    };
                    if !taken {
                        last_zero = Some(bit_index);
                    }
                    taken
                };

                if direction {
                    rom[byte] |= mask;
                } else {
                    rom[byte] &= !mask;
                }
                self.write_bit(direction)?;
            }

            if rom == [0; 8] {
                // Family 0x00 does not exist; a shorted line reads zeros forever
                return Ok(());
            }

            let code = RomCode::new(rom);
            if code.is_valid() && found.push(code).is_err() {
                return Ok(());
            }

            last_discrepancy = last_zero;
            if last_discrepancy.is_none() {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rom(family: u8, serial: u8) -> [u8; 8] {
        let mut bytes = [family, serial, 0x5A, serial ^ 0xFF, 0, 0, 0x01, 0];
        bytes[7] = crc8(&bytes[..7]);
        bytes
    }

    #[derive(Clone, Copy, PartialEq)]
    enum Phase {
        Idle,
        Command,
        Search,
    }

    /// Bit-level simulation of up to four devices on one wire
    struct SimulatedWire {
        roms: Vec<[u8; 8], 4>,
        active: [bool; 4],
        phase: Phase,
        command: u8,
        command_bits: u8,
        bit_index: u8,
        step: u8,
        resets: usize,
    }

    impl SimulatedWire {
        fn new(roms: &[[u8; 8]]) -> Self {
            let mut list = Vec::new();
            for r in roms {
                list.push(*r).unwrap();
            }
            Self {
                roms: list,
                active: [false; 4],
                phase: Phase::Idle,
                command: 0,
                command_bits: 0,
                bit_index: 0,
                step: 0,
                resets: 0,
            }
        }

        fn bit_of(rom: &[u8; 8], index: u8) -> bool {
            rom[(index / 8) as usize] & (1 << (index % 8)) != 0
        }

        fn active_roms(&self) -> impl Iterator<Item = &[u8; 8]> {
            self.roms
                .iter()
                .enumerate()
                .filter(|(i, _)| self.active[*i])
                .map(|(_, r)| r)
        }
    }

    impl OneWireBus for SimulatedWire {
        type Error = ();

        fn reset(&mut self) -> Result<bool, ()> {
            self.resets += 1;
            self.phase = Phase::Command;
            self.command = 0;
            self.command_bits = 0;
            self.active = [false; 4];
            for i in 0..self.roms.len() {
                self.active[i] = true;
            }
            Ok(!self.roms.is_empty())
        }

        fn write_bit(&mut self, bit: bool) -> Result<(), ()> {
            match self.phase {
                Phase::Command => {
                    if bit {
                        self.command |= 1 << self.command_bits;
                    }
                    self.command_bits += 1;
                    if self.command_bits == 8 {
                        self.phase = if self.command == SEARCH_ROM {
                            Phase::Search
                        } else {
                            Phase::Idle
                        };
                        self.bit_index = 0;
                        self.step = 0;
                    }
                }
                Phase::Search if self.step == 2 => {
                    for i in 0..self.roms.len() {
                        if Self::bit_of(&self.roms[i], self.bit_index) != bit {
                            self.active[i] = false;
                        }
                    }
                    self.bit_index += 1;
                    self.step = 0;
                }
                _ => {}
            }
            Ok(())
        }

        fn read_bit(&mut self) -> Result<bool, ()> {
            if self.phase != Phase::Search {
                return Ok(true);
            }
            let index = self.bit_index;
            // Wired-AND: any device driving 0 pulls the line low
            let value = match self.step {
                0 => self.active_roms().all(|r| Self::bit_of(r, index)),
                _ => self.active_roms().all(|r| !Self::bit_of(r, index)),
            };
            self.step += 1;
            Ok(value)
        }
    }

    #[test]
    fn test_crc8_reference_rom() {
        // Example ROM from the Maxim 1-Wire CRC application note
        assert_eq!(crc8(&[0x02, 0x1C, 0xB8, 0x01, 0x00, 0x00, 0x00]), 0xA2);
    }

    #[test]
    fn test_rom_code_accessors() {
        let code = RomCode::new(rom(0x28, 7));
        assert_eq!(code.family(), 0x28);
        assert!(code.is_valid());

        let mut corrupted = rom(0x28, 7);
        corrupted[3] ^= 0x10;
        assert!(!RomCode::new(corrupted).is_valid());
    }

    #[test]
    fn test_byte_round_trip_lsb_first() {
        struct Loopback {
            bits: Vec<bool, 16>,
        }

        impl OneWireBus for Loopback {
            type Error = ();
            fn reset(&mut self) -> Result<bool, ()> {
                Ok(true)
            }
            fn write_bit(&mut self, bit: bool) -> Result<(), ()> {
                self.bits.push(bit).map_err(|_| ())
            }
            fn read_bit(&mut self) -> Result<bool, ()> {
                if self.bits.is_empty() {
                    return Err(());
                }
                Ok(self.bits.remove(0))
            }
        }

        let mut wire = Loopback { bits: Vec::new() };
        wire.write_byte(0x44).unwrap();
        assert_eq!(
            wire.bits.as_slice(),
            &[false, false, true, false, false, false, true, false]
        );
        assert_eq!(wire.read_byte().unwrap(), 0x44);
    }

    #[test]
    fn test_search_empty_bus() {
        let mut wire = SimulatedWire::new(&[]);
        let mut found: Vec<RomCode, 4> = Vec::new();
        wire.search(&mut found).unwrap();
        assert!(found.is_empty());
        assert_eq!(wire.resets, 1);
    }

    #[test]
    fn test_search_line_stuck_low() {
        struct StuckLow {
            resets: usize,
        }

        impl OneWireBus for StuckLow {
            type Error = ();
            fn reset(&mut self) -> Result<bool, ()> {
                self.resets += 1;
                Ok(true)
            }
            fn write_bit(&mut self, _bit: bool) -> Result<(), ()> {
                Ok(())
            }
            fn read_bit(&mut self) -> Result<bool, ()> {
                Ok(false)
            }
        }

        let mut wire = StuckLow { resets: 0 };
        let mut found: Vec<RomCode, 4> = Vec::new();
        wire.search(&mut found).unwrap();
        assert!(found.is_empty());
        assert_eq!(wire.resets, 1);
    }

    #[test]
    fn test_search_single_device() {
        let device = rom(0x28, 0x11);
        let mut wire = SimulatedWire::new(&[device]);
        let mut found: Vec<RomCode, 4> = Vec::new();
        wire.search(&mut found).unwrap();
        assert_eq!(found.as_slice(), &[RomCode::new(device)]);
    }

    #[test]
    fn test_search_finds_every_device() {
        let a = rom(0x28, 0x01);
        let b = rom(0x28, 0x02);
        let c = rom(0x22, 0x80);
        let mut wire = SimulatedWire::new(&[a, b, c]);
        let mut found: Vec<RomCode, 4> = Vec::new();
        wire.search(&mut found).unwrap();

        assert_eq!(found.len(), 3);
        for expected in [a, b, c] {
            assert!(found.contains(&RomCode::new(expected)));
        }
    }

    #[test]
    fn test_search_stops_when_list_full() {
        let mut wire = SimulatedWire::new(&[rom(0x28, 1), rom(0x28, 2), rom(0x28, 3)]);
        let mut found: Vec<RomCode, 2> = Vec::new();
        wire.search(&mut found).unwrap();
        assert_eq!(found.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_crc_of_data_plus_crc_is_zero(data in proptest::collection::vec(any::<u8>(), 0..16)) {
            let crc = crc8(&data);
            let mut framed: Vec<u8, 17> = Vec::new();
            framed.extend_from_slice(&data).unwrap();
            framed.push(crc).unwrap();
            prop_assert_eq!(crc8(&framed), 0);
        }
    }
}
