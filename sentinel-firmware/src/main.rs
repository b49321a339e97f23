//! Sentinel - wearable health monitor firmware
//!
//! Reads body temperature and motion once per cycle, sounds a local alarm
//! on fever or a fall, and mirrors the state on a small OLED and the
//! debug console.
//!
//! Board wiring:
//!
//! | Signal      | GPIO | Peripheral      |
//! |-------------|------|-----------------|
//! | I2C SDA     | 4    | I2C0, 400 kHz   |
//! | I2C SCL     | 5    | I2C0            |
//! | 1-Wire data | 2    | bit-banged      |
//! | Buzzer      | 16   | PWM slice 0 A   |
//! | LED red     | 10   | PWM slice 5 A   |
//! | LED green   | 12   | PWM slice 6 A   |
//! | LED blue    | 14   | PWM slice 7 A   |
//!
//! The MPU-6050, MAX30102 and SSD1306 share the I2C bus.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::Flex;
use embassy_rp::i2c::I2c;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use sentinel_core::config::MonitorConfig;
use sentinel_core::Monitor;
use sentinel_drivers::{AlertIndicator, SensorHub, Ssd1306};
use sentinel_hal::i2c::I2cConfig;
use sentinel_hal::SharedI2c;
use sentinel_hal_rp2040::{RpI2c, RpOneWire, RpPwmChannel};

/// Board configuration
const CONFIG: MonitorConfig = MonitorConfig::DEFAULT;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Sentinel firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Shared I2C bus: sensors and display take turns through the mutex
    let i2c = I2c::new_blocking(
        p.I2C0,
        p.PIN_5,
        p.PIN_4,
        sentinel_hal_rp2040::i2c::config(I2cConfig::FAST),
    );
    let bus = Mutex::<NoopRawMutex, _>::new(RefCell::new(RpI2c::new(i2c)));

    let wire = RpOneWire::new(Flex::new(p.PIN_2));

    let hub = SensorHub::probe(SharedI2c::new(&bus), wire, Delay, &CONFIG);
    let availability = hub.availability();

    let mut display: Ssd1306<_> = Ssd1306::new(SharedI2c::new(&bus), CONFIG.addresses.display);
    if let Err(e) = display.init(availability.display) {
        warn!("Display unavailable: {:?}", e);
    }

    let indicator = AlertIndicator::new(
        RpPwmChannel::new(Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, PwmConfig::default())),
        RpPwmChannel::new(Pwm::new_output_a(p.PWM_SLICE5, p.PIN_10, PwmConfig::default())),
        RpPwmChannel::new(Pwm::new_output_a(p.PWM_SLICE6, p.PIN_12, PwmConfig::default())),
        RpPwmChannel::new(Pwm::new_output_a(p.PWM_SLICE7, p.PIN_14, PwmConfig::default())),
        CONFIG.indicator,
    );

    let mut monitor = Monitor::new(hub, indicator, display, CONFIG.thresholds);
    info!("System ready");

    loop {
        let report = monitor.tick();
        info!("{}", Display2Format(&report));
        Timer::after_millis(CONFIG.cadence.cycle_sleep_ms as u64).await;
    }
}
