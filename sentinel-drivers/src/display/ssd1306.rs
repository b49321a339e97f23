//! SSD1306 OLED display driver
//!
//! Driver for SSD1306-based monochrome OLEDs on I2C. Every command byte is
//! its own write prefixed with the command control byte, and every
//! framebuffer byte is its own write prefixed with the data control byte.
//! The panel runs in horizontal addressing mode, so a frame is one column
//! and page window followed by the whole buffer in page order.
//!
//! A display that is absent at startup or fails initialization is
//! disabled for good; drawing and flushing then do nothing.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use sentinel_core::status::CycleReport;
use sentinel_core::traits::StatusDisplay;
use sentinel_hal::i2c::I2cBus;

use super::Framebuffer;

/// Default address with SA0 low
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Control byte preceding a single command
pub const COMMAND_PREFIX: u8 = 0x80;

/// Control byte preceding display data
pub const DATA_PREFIX: u8 = 0x40;

/// Vertical distance between text rows
pub const LINE_PITCH: i32 = 10;

/// SSD1306 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_MEM_ADDR_MODE: u8 = 0x20;
    pub const SET_COL_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const ENTIRE_ON_RESUME: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Number of bytes in the initialization sequence
pub const INIT_SEQUENCE_LEN: usize = 23;

/// Power-up command stream for a panel `height` rows tall
pub const fn init_sequence(height: usize) -> [u8; INIT_SEQUENCE_LEN] {
    [
        cmd::DISPLAY_OFF,
        cmd::SET_MEM_ADDR_MODE,
        0x00, // Horizontal addressing
        cmd::SET_START_LINE,
        cmd::SET_SEG_REMAP,
        cmd::SET_MUX_RATIO,
        (height - 1) as u8,
        cmd::SET_COM_SCAN_DEC,
        cmd::SET_DISPLAY_OFFSET,
        0x00,
        cmd::SET_COM_PINS,
        0x12,
        cmd::SET_CLOCK_DIV,
        0x80,
        cmd::SET_PRECHARGE,
        0xF1,
        cmd::SET_VCOM_DETECT,
        0x40,
        cmd::ENTIRE_ON_RESUME,
        cmd::SET_NORMAL,
        cmd::SET_CHARGE_PUMP,
        0x14, // Internal charge pump on
        cmd::DISPLAY_ON,
    ]
}

/// Driver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayState {
    /// Not yet initialized
    Uninitialized,
    /// Initialized and accepting frames
    Ready,
    /// Absent or failed; never leaves this state
    Disabled,
}

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Display was absent or failed initialization
    Disabled,
    /// [`Ssd1306::init`] has not run yet
    NotInitialized,
    /// A bus write failed
    Transfer,
}

/// SSD1306 OLED driver
///
/// `W` is the panel width in pixels and `PAGES` the height in 8-row pages.
pub struct Ssd1306<I, const W: usize = 128, const PAGES: usize = 8> {
    i2c: I,
    address: u8,
    state: DisplayState,
    buffer: Framebuffer<W, PAGES>,
}

impl<I, const W: usize, const PAGES: usize> Ssd1306<I, W, PAGES>
where
    I: I2cBus,
{
    /// Create a new SSD1306 driver
    pub fn new(i2c: I, address: u8) -> Self {
        Self {
            i2c,
            address,
            state: DisplayState::Uninitialized,
            buffer: Framebuffer::new(),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> DisplayState {
        self.state
    }

    /// Initialize the display
    ///
    /// `present` is the startup probe result. An absent display, or any
    /// failed command write, disables the driver permanently. Calling this
    /// again once ready is a no-op.
    pub fn init(&mut self, present: bool) -> Result<(), DisplayError> {
        match self.state {
            DisplayState::Ready => return Ok(()),
            DisplayState::Disabled => return Err(DisplayError::Disabled),
            DisplayState::Uninitialized => {}
        }

        if !present {
            info!("display not found, disabled");
            self.state = DisplayState::Disabled;
            return Err(DisplayError::Disabled);
        }

        for &c in init_sequence(Framebuffer::<W, PAGES>::HEIGHT).iter() {
            if let Err(e) = self.command(c) {
                warn!("display init failed, disabled");
                self.state = DisplayState::Disabled;
                return Err(e);
            }
        }

        self.state = DisplayState::Ready;
        debug!("display ready");
        Ok(())
    }

    /// Send a command to the display
    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[COMMAND_PREFIX, cmd])
            .map_err(|_| DisplayError::Transfer)
    }

    /// Set every framebuffer byte to `value`
    pub fn fill(&mut self, value: u8) {
        if self.state == DisplayState::Disabled {
            return;
        }
        self.buffer.fill(value);
    }

    /// Draw text lines starting at the top-left corner
    ///
    /// Line `i` starts at x = 0, y = `i * LINE_PITCH`. Glyph pixels that
    /// fall outside the panel are dropped.
    pub fn draw_text<L>(&mut self, lines: L)
    where
        L: IntoIterator,
        L::Item: AsRef<str>,
    {
        if self.state == DisplayState::Disabled {
            return;
        }

        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let mut y = 0;
        for line in lines {
            // Drawing into the framebuffer cannot fail
            let _ = Text::with_baseline(line.as_ref(), Point::new(0, y), style, Baseline::Top)
                .draw(&mut self.buffer);
            y += LINE_PITCH;
        }
    }

    /// Send the framebuffer to the panel
    ///
    /// The frame is abandoned at the first failed write.
    pub fn show(&mut self) -> Result<(), DisplayError> {
        match self.state {
            DisplayState::Disabled => return Err(DisplayError::Disabled),
            DisplayState::Uninitialized => return Err(DisplayError::NotInitialized),
            DisplayState::Ready => {}
        }

        let window = [
            cmd::SET_COL_ADDR,
            0,
            (W - 1) as u8,
            cmd::SET_PAGE_ADDR,
            0,
            (PAGES - 1) as u8,
        ];
        for c in window {
            self.command(c)?;
        }

        for byte in self.buffer.bytes() {
            self.i2c
                .write(self.address, &[DATA_PREFIX, byte])
                .map_err(|_| DisplayError::Transfer)?;
        }
        Ok(())
    }

    /// The framebuffer
    pub fn framebuffer(&self) -> &Framebuffer<W, PAGES> {
        &self.buffer
    }

    /// Mutable access for custom drawing
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer<W, PAGES> {
        &mut self.buffer
    }

    /// Release the bus
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I, const W: usize, const PAGES: usize> StatusDisplay for Ssd1306<I, W, PAGES>
where
    I: I2cBus,
{
    fn render(&mut self, report: &CycleReport) {
        if self.state != DisplayState::Ready {
            return;
        }

        self.fill(0x00);
        self.draw_text(report.status_lines().iter().map(|line| line.as_str()));
        if let Err(e) = self.show() {
            debug!("frame dropped: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;
    use sentinel_core::{AlertState, DeviceAvailability, SensorReading};

    /// Records every write; optionally fails the Nth one
    struct RecordingBus {
        writes: std::vec::Vec<(u8, std::vec::Vec<u8>)>,
        fail_at: Option<usize>,
    }

    impl RecordingBus {
        fn new() -> Self {
            Self {
                writes: std::vec::Vec::new(),
                fail_at: None,
            }
        }

        fn failing_at(index: usize) -> Self {
            Self {
                fail_at: Some(index),
                ..Self::new()
            }
        }
    }

    impl I2cBus for RecordingBus {
        type Error = ();

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
            if self.fail_at == Some(self.writes.len()) {
                return Err(());
            }
            self.writes.push((address, data.to_vec()));
            Ok(())
        }

        fn read(&mut self, _address: u8, _buf: &mut [u8]) -> Result<(), ()> {
            Ok(())
        }

        fn write_read(&mut self, _address: u8, _w: &[u8], _r: &mut [u8]) -> Result<(), ()> {
            Ok(())
        }
    }

    type Display = Ssd1306<RecordingBus>;

    fn ready() -> Display {
        let mut d = Display::new(RecordingBus::new(), DEFAULT_ADDRESS);
        d.init(true).unwrap();
        d.i2c.writes.clear();
        d
    }

    fn report() -> CycleReport {
        CycleReport {
            cycle: 0,
            reading: SensorReading::new(Some(36.6), None),
            alert: AlertState::NORMAL,
            availability: DeviceAvailability::NONE,
        }
    }

    #[test]
    fn test_init_sequence_bytes() {
        let mut d = Display::new(RecordingBus::new(), DEFAULT_ADDRESS);
        d.init(true).unwrap();
        assert_eq!(d.state(), DisplayState::Ready);

        let expected = [
            0xAE, 0x20, 0x00, 0x40, 0xA1, 0xA8, 0x3F, 0xC8, 0xD3, 0x00, 0xDA, 0x12, 0xD5, 0x80,
            0xD9, 0xF1, 0xDB, 0x40, 0xA4, 0xA6, 0x8D, 0x14, 0xAF,
        ];
        let writes = &d.i2c.writes;
        assert_eq!(writes.len(), expected.len());
        for (write, &c) in writes.iter().zip(expected.iter()) {
            assert_eq!(write.0, 0x3C);
            assert_eq!(write.1, [0x80, c]);
        }
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut d = ready();
        d.init(true).unwrap();
        assert!(d.i2c.writes.is_empty());
    }

    #[test]
    fn test_absent_display_disabled() {
        let mut d = Display::new(RecordingBus::new(), DEFAULT_ADDRESS);
        assert_eq!(d.init(false), Err(DisplayError::Disabled));
        assert_eq!(d.state(), DisplayState::Disabled);

        d.fill(0xFF);
        d.draw_text(["Soldier Monitor"]);
        assert_eq!(d.show(), Err(DisplayError::Disabled));
        d.render(&report());

        assert!(d.i2c.writes.is_empty());
        assert!(d.framebuffer().bytes().all(|b| b == 0));

        // Disabled is terminal
        assert_eq!(d.init(true), Err(DisplayError::Disabled));
    }

    #[test]
    fn test_init_failure_disables() {
        let mut d = Display::new(RecordingBus::failing_at(4), DEFAULT_ADDRESS);
        assert_eq!(d.init(true), Err(DisplayError::Transfer));
        assert_eq!(d.state(), DisplayState::Disabled);
        assert_eq!(d.i2c.writes.len(), 4);
    }

    #[test]
    fn test_show_before_init() {
        let mut d = Display::new(RecordingBus::new(), DEFAULT_ADDRESS);
        assert_eq!(d.show(), Err(DisplayError::NotInitialized));
        assert!(d.i2c.writes.is_empty());
    }

    #[test]
    fn test_show_protocol() {
        let mut d = ready();
        d.framebuffer_mut().set_pixel(0, 0, true);
        d.framebuffer_mut().set_pixel(127, 63, true);
        d.show().unwrap();

        let writes = &d.i2c.writes;
        assert_eq!(writes.len(), 6 + 1024);

        let window: Vec<u8, 6> = writes[..6].iter().map(|w| w.1[1]).collect();
        assert_eq!(window.as_slice(), &[0x21, 0x00, 0x7F, 0x22, 0x00, 0x07]);
        assert!(writes[..6].iter().all(|w| w.1[0] == COMMAND_PREFIX));

        assert!(writes[6..].iter().all(|w| w.1.len() == 2 && w.1[0] == DATA_PREFIX));
        assert_eq!(writes[6].1[1], 0x01);
        assert_eq!(writes[6 + 1023].1[1], 0x80);
    }

    #[test]
    fn test_show_aborts_on_failed_write() {
        let mut d = ready();
        d.i2c.fail_at = Some(10);
        assert_eq!(d.show(), Err(DisplayError::Transfer));
        assert_eq!(d.i2c.writes.len(), 10);
        // A failed frame does not disable the panel
        assert_eq!(d.state(), DisplayState::Ready);
    }

    #[test]
    fn test_fill_then_show_sends_pattern() {
        for value in [0x00, 0xFF] {
            let mut d = ready();
            d.fill(value);
            d.show().unwrap();
            let data = &d.i2c.writes[6..];
            assert_eq!(data.len(), 128 * 8);
            assert!(data.iter().all(|w| w.1 == [DATA_PREFIX, value]));
        }
    }

    #[test]
    fn test_draw_text_rows() {
        let mut d = ready();
        d.draw_text(["HH", "", "HH"]);
        let fb = d.framebuffer();

        let lit_in = |rows: core::ops::Range<usize>| {
            (0..12).any(|x| rows.clone().any(|y| fb.pixel(x, y)))
        };
        assert!(lit_in(0..10));
        assert!(!lit_in(10..20));
        assert!(lit_in(20..30));
        // Nothing past the second glyph
        assert!(!(12..128).any(|x| (0..64).any(|y| fb.pixel(x, y))));
    }

    #[test]
    fn test_draw_text_clips_at_panel_edge() {
        let mut d = ready();
        let long = "WWWWWWWWWWWWWWWWWWWWWWWWWWWWWW";
        d.draw_text([long, long, long, long, long, long, long]);
        let fb = d.framebuffer();
        assert!((0..128).any(|x| (60..64).any(|y| fb.pixel(x, y))));
    }

    #[test]
    fn test_render_draws_status_screen() {
        let mut d = ready();
        d.fill(0xFF);
        d.render(&report());

        // Screen regenerated: stale fill gone, title present
        let fb = d.framebuffer();
        assert!(fb.bytes().any(|b| b == 0));
        assert!((0..10).any(|y| (0..6).any(|x| fb.pixel(x, y))));
        assert_eq!(d.i2c.writes.len(), 6 + 1024);
    }

    #[test]
    fn test_render_absorbs_transfer_errors() {
        let mut d = ready();
        d.i2c.fail_at = Some(0);
        d.render(&report());
        assert_eq!(d.state(), DisplayState::Ready);
    }
}
