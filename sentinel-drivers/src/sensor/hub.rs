//! Sensor hub
//!
//! Owns every sensor driver and decides at startup which ones exist. After
//! [`SensorHub::probe`] the set of present devices never changes; a
//! sensor that later stops answering just yields `None` for that cycle.

use embedded_hal::delay::DelayNs;
use sentinel_core::config::MonitorConfig;
use sentinel_core::traits::{MotionSensor, SensorSource, TemperatureSensor};
use sentinel_core::{Acceleration, DeviceAvailability, SensorReading};
use sentinel_hal::i2c::I2cBus;
use sentinel_hal::onewire::OneWireBus;

use super::{Ds18b20, Mpu6050};

/// Temperature and motion sensors behind one reading interface
pub struct SensorHub<I, W, D> {
    temperature: Option<Ds18b20<W, D>>,
    motion: Option<Mpu6050<I>>,
    availability: DeviceAvailability,
}

impl<I, W, D> SensorHub<I, W, D>
where
    I: I2cBus,
    W: OneWireBus,
    D: DelayNs,
{
    /// Discover the peripherals and bring up the ones that were found
    ///
    /// Scans the I2C bus once for the motion sensor, heart-rate sensor and
    /// display, then searches the 1-Wire line for a DS18B20. A motion
    /// sensor that answers the scan but rejects the wake command is still
    /// counted as present.
    pub fn probe(mut i2c: I, wire: W, mut delay: D, config: &MonitorConfig) -> Self {
        let addresses = config.addresses;
        let found = i2c.scan();
        debug!("I2C scan found {} device(s)", found.len());

        let motion = if found.contains(&addresses.motion) {
            let mut mpu = Mpu6050::new(i2c, addresses.motion);
            if let Err(e) = mpu.wake(&mut delay) {
                warn!("MPU-6050 wake failed: {:?}", e);
            }
            Some(mpu)
        } else {
            None
        };

        let temperature = Ds18b20::probe(wire, delay, config.temperature_resolution);

        let availability = DeviceAvailability {
            temperature_sensor: temperature.is_some(),
            motion_sensor: motion.is_some(),
            heart_rate_sensor: found.contains(&addresses.heart_rate),
            display: found.contains(&addresses.display),
        };

        info!(
            "probe: temp={} motion={} hr={} display={}",
            availability.temperature_sensor,
            availability.motion_sensor,
            availability.heart_rate_sensor,
            availability.display
        );

        Self {
            temperature,
            motion,
            availability,
        }
    }
}

impl<I, W, D> SensorHub<I, W, D> {
    /// Peripherals found at startup
    pub fn availability(&self) -> DeviceAvailability {
        self.availability
    }
}

impl<I, W, D> SensorHub<I, W, D>
where
    I: I2cBus,
    W: OneWireBus,
    D: DelayNs,
{
    /// Current body temperature, if the sensor exists and answered
    pub fn read_temperature(&mut self) -> Option<f32> {
        let sensor = self.temperature.as_mut()?;
        match sensor.read_celsius() {
            Ok(t) => Some(t),
            Err(e) => {
                debug!("temperature read failed: {:?}", e);
                None
            }
        }
    }

    /// Current acceleration, if the sensor exists and answered
    pub fn read_motion(&mut self) -> Option<Acceleration> {
        let sensor = self.motion.as_mut()?;
        match sensor.read_acceleration() {
            Ok(a) => Some(a),
            Err(e) => {
                debug!("motion read failed: {:?}", e);
                None
            }
        }
    }
}

impl<I, W, D> SensorSource for SensorHub<I, W, D>
where
    I: I2cBus,
    W: OneWireBus,
    D: DelayNs,
{
    fn availability(&self) -> DeviceAvailability {
        self.availability
    }

    fn read(&mut self) -> SensorReading {
        SensorReading::new(self.read_temperature(), self.read_motion())
    }
}
