//! Test doubles shared by the unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin, OutputPin};
use embedded_hal_mock::eh1::digital::Mock as PinMock;

use crate::clock::MonotonicClock;
use crate::pin::{Direction, IoPin};
use crate::priority::PriorityHint;

/// The digital pin mock has no notion of direction; accept every change.
impl IoPin for PinMock {
    fn set_direction(&mut self, _direction: Direction) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

/// Appends the checksum byte to four data bytes.
pub fn with_checksum(data: [u8; 4]) -> [u8; 5] {
    let checksum = data.iter().fold(0u8, |sum, v| sum.wrapping_add(*v));
    [data[0], data[1], data[2], data[3], checksum]
}

fn bit_duration(bytes: &[u8; 5], bit: usize) -> u32 {
    if bytes[bit / 8] & (0x80 >> (bit % 8)) != 0 {
        70
    } else {
        26
    }
}

/// High-phase durations for `bytes`, preceded by `preamble` 80us pulses.
pub fn high_durations(bytes: [u8; 5], preamble: usize) -> Vec<u32> {
    let mut high = vec![80; preamble];
    high.extend((0..40).map(|bit| bit_duration(&bytes, bit)));
    high
}

/// The line levels a sensor produces after the host releases the line, as
/// `(level, microseconds)` segments.
///
/// With `pullup` the line first idles high for 20us before the sensor answers.
pub fn dht_waveform(bytes: [u8; 5], pullup: bool) -> Vec<(bool, u32)> {
    let mut waveform = Vec::new();
    if pullup {
        waveform.push((true, 20));
    }
    // response
    waveform.push((false, 80));
    waveform.push((true, 80));
    for bit in 0..40 {
        waveform.push((false, 50));
        waveform.push((true, bit_duration(&bytes, bit)));
    }
    // end of frame, then the line is released
    waveform.push((false, 50));
    waveform
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimFault;

impl digital::Error for SimFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

#[derive(Default)]
struct LineState {
    now_us: u64,
    released_at: Option<u64>,
    waveform: Vec<(bool, u32)>,
    directions: Vec<Direction>,
    driven_low: bool,
    samples: u32,
    fail_reads: bool,
}

impl LineState {
    fn level(&self) -> bool {
        let Some(released_at) = self.released_at else {
            return !self.driven_low;
        };
        let mut offset = self.now_us - released_at;
        for &(level, duration) in &self.waveform {
            if offset < u64::from(duration) {
                return level;
            }
            offset -= u64::from(duration);
        }
        true
    }
}

/// A simulated one-wire line with a sensor that replays a waveform.
///
/// Time only moves when the pin is sampled: every sample costs one
/// microsecond.
#[derive(Clone, Default)]
pub struct SimLine {
    state: Rc<RefCell<LineState>>,
}

impl SimLine {
    pub fn new(waveform: Vec<(bool, u32)>) -> Self {
        SimLine {
            state: Rc::new(RefCell::new(LineState {
                waveform,
                ..LineState::default()
            })),
        }
    }

    pub fn pin(&self) -> SimPin {
        SimPin(self.state.clone())
    }

    pub fn clock(&self) -> SimClock {
        SimClock(self.state.clone())
    }

    pub fn fail_reads(&self) {
        self.state.borrow_mut().fail_reads = true;
    }

    pub fn directions(&self) -> Vec<Direction> {
        self.state.borrow().directions.clone()
    }

    pub fn was_driven_low(&self) -> bool {
        self.state.borrow().driven_low
    }

    pub fn samples(&self) -> u32 {
        self.state.borrow().samples
    }
}

pub struct SimPin(Rc<RefCell<LineState>>);

impl ErrorType for SimPin {
    type Error = SimFault;
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let mut state = self.0.borrow_mut();
        if state.fail_reads {
            return Err(SimFault);
        }
        state.samples += 1;
        state.now_us += 1;
        Ok(state.level())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().driven_low = true;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().driven_low = false;
        Ok(())
    }
}

impl IoPin for SimPin {
    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error> {
        let mut state = self.0.borrow_mut();
        let now = state.now_us;
        state.directions.push(direction);
        state.released_at = match direction {
            Direction::Input => Some(now),
            Direction::Output => None,
        };
        Ok(())
    }
}

pub struct SimClock(Rc<RefCell<LineState>>);

impl MonotonicClock for SimClock {
    fn now_us(&mut self) -> u64 {
        self.0.borrow().now_us
    }
}

/// Replays fixed timestamps, then keeps returning the last one.
pub struct ScriptedClock {
    stamps: Vec<u64>,
    next: usize,
}

impl ScriptedClock {
    pub fn new(stamps: &[u64]) -> Self {
        ScriptedClock {
            stamps: stamps.to_vec(),
            next: 0,
        }
    }
}

impl MonotonicClock for ScriptedClock {
    fn now_us(&mut self) -> u64 {
        let stamp = self
            .stamps
            .get(self.next)
            .or(self.stamps.last())
            .copied()
            .unwrap_or(0);
        self.next += 1;
        stamp
    }
}

#[derive(Default)]
struct HintState {
    elevated: bool,
    elevations: u32,
    restores: u32,
    refuse: bool,
}

/// Priority hint that records what was done to it.
pub struct TrackingHint(Rc<RefCell<HintState>>);

impl TrackingHint {
    pub fn new() -> Self {
        TrackingHint(Rc::default())
    }

    /// A hint whose `elevate` always fails, like `sched_setscheduler`
    /// without `CAP_SYS_NICE`.
    pub fn refusing() -> Self {
        let hint = Self::new();
        hint.0.borrow_mut().refuse = true;
        hint
    }

    pub fn probe(&self) -> HintProbe {
        HintProbe(self.0.clone())
    }
}

impl PriorityHint for TrackingHint {
    type Error = &'static str;

    fn elevate(&mut self) -> Result<(), Self::Error> {
        let mut state = self.0.borrow_mut();
        if state.refuse {
            return Err("permission denied");
        }
        state.elevated = true;
        state.elevations += 1;
        Ok(())
    }

    fn restore(&mut self) -> Result<(), Self::Error> {
        let mut state = self.0.borrow_mut();
        state.elevated = false;
        state.restores += 1;
        Ok(())
    }
}

pub struct HintProbe(Rc<RefCell<HintState>>);

impl HintProbe {
    pub fn is_elevated(&self) -> bool {
        self.0.borrow().elevated
    }

    pub fn elevations(&self) -> u32 {
        self.0.borrow().elevations
    }

    pub fn restores(&self) -> u32 {
        self.0.borrow().restores
    }
}
