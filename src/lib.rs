//! DHT11 / DHT22 Sensor Driver for Rust
//!
//! This crate reads temperature and humidity from DHT11 and DHT22 (AM2302)
//! sensors by bit-banging their single data line, built on top of the
//! [`embedded-hal`] traits. It is aimed at hosts without a hardware timer for
//! the line, such as a Raspberry Pi running Linux: the host sends the start
//! signal, then samples the line as fast as it can and timestamps every level
//! change. The resulting pulse train is decoded afterwards.
//!
//! # Features
//! - Blocking synchronous API using `embedded-hal` traits
//! - `no_std` unless the `std` feature is enabled
//! - Pure, separately usable decoder ([`decode`])
//! - Optional thread-priority boost around the timing-critical capture
//!
//! # Dependencies
//! The driver needs:
//! - an [`IoPin`]: [`InputPin`] + [`OutputPin`] that can switch direction
//! - [`DelayNs`] for the start signal
//! - a [`MonotonicClock`] with microsecond resolution
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` and logs through `defmt`
//! - `log`: Logs through the `log` facade
//! - `std`: [`StdClock`] and [`StdDelay`]
//! - `linux-sched`: [`SchedFifo`] priority hint for Linux
//!
//! # Example
//!
//! ```ignore
//! use dhtxx::{Dht, SensorVariant, StdClock, StdDelay};
//!
//! let mut dht = Dht::new(pin, StdDelay, StdClock::new(), SensorVariant::Dht22);
//! match dht.read(false) {
//!     Ok(r) => println!("{:.1}F {:.1}%", r.temperature, r.relative_humidity),
//!     Err(e) => println!("read failed: {e}"),
//! }
//! ```
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`InputPin`]: embedded_hal::digital::InputPin
//! [`OutputPin`]: embedded_hal::digital::OutputPin
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[macro_use]
mod fmt;

pub mod capture;
pub mod clock;
pub mod config;
pub mod dht;
pub mod error;
pub mod frame;
pub mod pin;
pub mod priority;
pub mod sensor;

#[cfg(test)]
mod testing;

pub use capture::PulseTrain;
pub use clock::MonotonicClock;
#[cfg(feature = "std")]
pub use clock::{StdClock, StdDelay};
pub use config::ReadConfig;
pub use dht::{Dht, Reading};
pub use error::{DecodeError, DhtError};
pub use frame::DataFrame;
pub use pin::{Direction, IoPin};
#[cfg(all(feature = "linux-sched", target_os = "linux"))]
pub use priority::SchedFifo;
pub use priority::{NoPriorityHint, PriorityHint};
pub use sensor::{SensorVariant, decode};
