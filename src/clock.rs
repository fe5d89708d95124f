//! Timestamp source for pulse measurement.

/// A monotonic microsecond counter.
///
/// Only differences between two calls are used, so the epoch is arbitrary.
pub trait MonotonicClock {
    /// Current time in microseconds.
    fn now_us(&mut self) -> u64;
}

impl<T: MonotonicClock + ?Sized> MonotonicClock for &mut T {
    fn now_us(&mut self) -> u64 {
        T::now_us(self)
    }
}

#[cfg(feature = "std")]
pub use self::host::{StdClock, StdDelay};

#[cfg(feature = "std")]
mod host {
    use std::time::{Duration, Instant};

    use embedded_hal::delay::DelayNs;

    use super::MonotonicClock;

    /// [`MonotonicClock`] backed by [`Instant`].
    #[derive(Clone, Copy, Debug)]
    pub struct StdClock {
        origin: Instant,
    }

    impl StdClock {
        pub fn new() -> Self {
            StdClock {
                origin: Instant::now(),
            }
        }
    }

    impl Default for StdClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MonotonicClock for StdClock {
        fn now_us(&mut self) -> u64 {
            u64::try_from(self.origin.elapsed().as_micros()).unwrap_or(u64::MAX)
        }
    }

    /// [`DelayNs`] backed by [`std::thread::sleep`].
    #[derive(Clone, Copy, Debug, Default)]
    pub struct StdDelay;

    impl DelayNs for StdDelay {
        fn delay_ns(&mut self, ns: u32) {
            std::thread::sleep(Duration::from_nanos(u64::from(ns)));
        }
    }

}
