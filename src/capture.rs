//! Pulse capture.
//!
//! The host pulls the line low to wake the sensor, releases it, and then
//! samples it as fast as it can. Every level change closes a phase whose
//! length is recorded in microseconds. No bits are interpreted here; that is
//! the job of [`crate::frame`].

use embedded_hal::delay::DelayNs;

use crate::clock::MonotonicClock;
use crate::config::ReadConfig;
use crate::pin::{Direction, IoPin};

/// Number of pulses the sensor sends: one 80us response pulse followed by
/// 40 data pulses.
pub const DHT_PULSES: usize = 41;

/// Phases recorded per level. One extra slot because the pull-up high phase
/// before the sensor answers is sometimes caught too.
pub const PULSE_CAPACITY: usize = DHT_PULSES + 1;

/// Durations of the low and high phases seen during one capture.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PulseTrain {
    low: [u32; PULSE_CAPACITY],
    high: [u32; PULSE_CAPACITY],
    low_count: usize,
    high_count: usize,
}

impl PulseTrain {
    pub const fn new() -> Self {
        PulseTrain {
            low: [0; PULSE_CAPACITY],
            high: [0; PULSE_CAPACITY],
            low_count: 0,
            high_count: 0,
        }
    }

    /// Builds a train from already measured phases.
    ///
    /// Phases beyond [`PULSE_CAPACITY`] are dropped, the same as during a
    /// capture.
    pub fn from_phases(low: &[u32], high: &[u32]) -> Self {
        let mut train = Self::new();
        for &duration in low {
            train.push(false, duration);
        }
        for &duration in high {
            train.push(true, duration);
        }
        train
    }

    /// Recorded low-phase durations, in order.
    pub fn low(&self) -> &[u32] {
        &self.low[..self.low_count]
    }

    /// Recorded high-phase durations, in order.
    pub fn high(&self) -> &[u32] {
        &self.high[..self.high_count]
    }

    /// Whether the high-phase sequence has no room left.
    pub fn is_full(&self) -> bool {
        self.high_count == PULSE_CAPACITY
    }

    /// Records a phase that was held at `level` for `duration` microseconds.
    fn push(&mut self, level: bool, duration: u32) {
        let (slots, count) = if level {
            (&mut self.high, &mut self.high_count)
        } else {
            (&mut self.low, &mut self.low_count)
        };
        if let Some(slot) = slots.get_mut(*count) {
            *slot = duration;
            *count += 1;
        }
    }
}

impl Default for PulseTrain {
    fn default() -> Self {
        Self::new()
    }
}

/// Sends the start signal and records the phases that follow.
///
/// The line is held low for `config.settle_time_ms`, released, and then
/// sampled at most `config.poll_budget` times. Sampling stops early once the
/// high-phase sequence is full. A short train is not an error here; the
/// decoder decides whether enough was captured.
pub fn capture<PIN, D, C>(
    pin: &mut PIN,
    delay: &mut D,
    clock: &mut C,
    config: &ReadConfig,
) -> Result<PulseTrain, PIN::Error>
where
    PIN: IoPin,
    D: DelayNs,
    C: MonotonicClock,
{
    // Host start signal. The line is never driven high again; releasing it
    // straight into input mode is what lets the host catch the response.
    pin.set_direction(Direction::Output)?;
    pin.set_low()?;
    delay.delay_ms(config.settle_time_ms);
    pin.set_direction(Direction::Input)?;

    let mut train = PulseTrain::new();
    let mut previous = true;
    let mut anchor = clock.now_us();

    for _ in 0..config.poll_budget {
        let level = pin.is_high()?;
        if level == previous {
            continue;
        }

        let now = clock.now_us();
        let elapsed = u32::try_from(now.saturating_sub(anchor)).unwrap_or(u32::MAX);
        train.push(previous, elapsed);
        previous = level;
        anchor = now;

        if train.is_full() {
            break;
        }
    }

    Ok(train)
}
