use embedded_hal::delay::DelayNs;

use crate::capture::{PulseTrain, capture};
use crate::clock::MonotonicClock;
use crate::config::ReadConfig;
use crate::error::DhtError;
use crate::frame::DataFrame;
use crate::pin::IoPin;
use crate::priority::{NoPriorityHint, PriorityGuard, PriorityHint};
use crate::sensor::SensorVariant;

/// Driver for the DHT11 and DHT22 temperature and humidity sensors.
pub struct Dht<PIN, D, C, H = NoPriorityHint> {
    pin: PIN,
    delay: D,
    clock: C,
    priority: H,
    variant: SensorVariant,
    config: ReadConfig,
}

/// Reading returned by the sensor.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    /// Temperature in degrees Fahrenheit.
    pub temperature: f32,
    /// Relative humidity in percent.
    pub relative_humidity: f32,
}

impl Reading {
    /// Temperature in degrees Celsius.
    pub fn temperature_celsius(&self) -> f32 {
        (self.temperature - 32.0) / 1.8
    }
}

impl<PIN, D, C> Dht<PIN, D, C>
where
    PIN: IoPin,
    D: DelayNs,
    C: MonotonicClock,
{
    /// Creates a new instance of the DHT driver.
    ///
    /// # Arguments
    ///
    /// * `pin` - The GPIO pin connected to the data line. Must support switching
    ///   between input and output.
    /// * `delay` - A delay provider implementing the `DelayNs` trait.
    /// * `clock` - A microsecond timestamp source used to time the pulses.
    /// * `variant` - Which sensor model is attached.
    pub fn new(pin: PIN, delay: D, clock: C, variant: SensorVariant) -> Self {
        Dht {
            pin,
            delay,
            clock,
            priority: NoPriorityHint,
            variant,
            config: ReadConfig::default(),
        }
    }
}

impl<PIN, D, C, H> Dht<PIN, D, C, H>
where
    PIN: IoPin,
    D: DelayNs,
    C: MonotonicClock,
    H: PriorityHint,
{
    /// Raises the thread priority with `priority` while the pulses are captured.
    pub fn with_priority_hint<H2: PriorityHint>(self, priority: H2) -> Dht<PIN, D, C, H2> {
        Dht {
            pin: self.pin,
            delay: self.delay,
            clock: self.clock,
            priority,
            variant: self.variant,
            config: self.config,
        }
    }

    pub fn with_config(mut self, config: ReadConfig) -> Self {
        self.config = config;
        self
    }

    pub fn variant(&self) -> SensorVariant {
        self.variant
    }

    pub fn config(&self) -> &ReadConfig {
        &self.config
    }

    /// Releases the pin, delay, clock and priority hint.
    pub fn release(self) -> (PIN, D, C, H) {
        (self.pin, self.delay, self.clock, self.priority)
    }

    /// Reads a temperature and humidity measurement from the sensor.
    ///
    /// This performs one complete transaction: start signal, pulse capture,
    /// frame assembly, checksum validation and conversion. Nothing is retried;
    /// DHT sensors regularly miss a read on non-realtime hosts, so callers
    /// usually retry after a couple of seconds.
    ///
    /// With `debug` set, the captured pulses, frame bytes and checksum
    /// arithmetic are logged at debug level. The result is the same either way.
    ///
    /// # Returns
    ///
    /// * `Ok(Reading)` if the read is successful and the checksum is valid.
    /// * `Err(DhtError)` if too few pulses were seen, the checksum is wrong,
    ///   or the pin failed.
    pub fn read(&mut self, debug: bool) -> Result<Reading, DhtError<PIN::Error>> {
        let train = self.capture_pulses()?;

        if debug {
            debug!(
                "low pulse timings ({}): {:?}",
                train.low().len(),
                train.low()
            );
            debug!(
                "high pulse timings ({}): {:?}",
                train.high().len(),
                train.high()
            );
        }

        let frame = DataFrame::from_high_durations(train.high())?;

        if debug {
            let [b0, b1, b2, b3, checksum] = frame.bytes();
            debug!(
                "computed checksum: {} = ({} + {} + {} + {}) & 0xFF",
                frame.computed_checksum(),
                b0,
                b1,
                b2,
                b3
            );
            debug!("  actual checksum: {}", checksum);
        }

        frame.validate()?;
        Ok(self.variant.convert(&frame))
    }

    /// Runs the capture with the priority raised for its duration only.
    fn capture_pulses(&mut self) -> Result<PulseTrain, DhtError<PIN::Error>> {
        let _priority = PriorityGuard::acquire(&mut self.priority);
        capture(&mut self.pin, &mut self.delay, &mut self.clock, &self.config)
            .map_err(DhtError::PinError)
    }
}
