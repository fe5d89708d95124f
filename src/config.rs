/// How long the start signal holds the line low, in milliseconds.
pub const DEFAULT_SETTLE_TIME_MS: u32 = 10;

/// Iteration ceiling for the capture loop.
///
/// This is a count of pin samples, not a time bound. How long it takes
/// depends on how fast the host can read the pin.
pub const DEFAULT_POLL_BUDGET: u32 = 5_000_000;

/// Tuning for a single read.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadConfig {
    /// Duration of the start signal in milliseconds.
    pub settle_time_ms: u32,
    /// Maximum number of pin samples taken while listening for the frame.
    pub poll_budget: u32,
}

impl ReadConfig {
    pub const fn new() -> Self {
        ReadConfig {
            settle_time_ms: DEFAULT_SETTLE_TIME_MS,
            poll_budget: DEFAULT_POLL_BUDGET,
        }
    }

    pub const fn with_settle_time_ms(mut self, settle_time_ms: u32) -> Self {
        self.settle_time_ms = settle_time_ms;
        self
    }

    pub const fn with_poll_budget(mut self, poll_budget: u32) -> Self {
        self.poll_budget = poll_budget;
        self
    }
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self::new()
    }
}
