//! Turning high-phase durations into the five data bytes.

use crate::error::DecodeError;

/// Number of data bits in a frame.
pub const FRAME_BITS: usize = 40;

/// High phases at least this long (in microseconds) are 1 bits.
///
/// The datasheet gives ~28us for a 0 bit and ~70us for a 1 bit.
pub const ONE_BIT_THRESHOLD_US: u32 = 30;

/// The five bytes sent by the sensor: humidity high and low, temperature high
/// and low, checksum.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataFrame([u8; 5]);

impl DataFrame {
    pub const fn from_bytes(bytes: [u8; 5]) -> Self {
        DataFrame(bytes)
    }

    /// Assembles a frame from the recorded high-phase durations.
    ///
    /// Only the last 40 durations carry data. Anything before them is the
    /// pull-up or response preamble and is skipped.
    ///
    /// When exactly 40 durations were recorded the first one is forced to a
    /// 0 bit. Hosts that start listening late tend to miss the first pulse
    /// edge, which makes that measurement unreliable. The checksum still has
    /// the final say on whether the frame is good.
    ///
    /// # Errors
    ///
    /// [`DecodeError::InvalidNumberOfPulses`] if fewer than 40 durations are
    /// given.
    pub fn from_high_durations(high: &[u32]) -> Result<Self, DecodeError> {
        let skip = high
            .len()
            .checked_sub(FRAME_BITS)
            .ok_or(DecodeError::InvalidNumberOfPulses {
                captured: high.len(),
            })?;

        let mut bits = [0u32; FRAME_BITS];
        bits.copy_from_slice(&high[skip..]);
        if skip == 0 {
            bits[0] = 0;
        }

        let mut bytes = [0u8; 5];
        for (i, duration) in bits.iter().enumerate() {
            let byte = &mut bytes[i / 8];
            *byte <<= 1;
            if *duration >= ONE_BIT_THRESHOLD_US {
                *byte |= 1;
            }
        }

        Ok(DataFrame(bytes))
    }

    pub fn bytes(&self) -> [u8; 5] {
        self.0
    }

    /// The checksum byte as sent.
    pub fn checksum(&self) -> u8 {
        self.0[4]
    }

    /// Low 8 bits of the sum of the four data bytes.
    pub fn computed_checksum(&self) -> u8 {
        self.0[..4].iter().fold(0u8, |sum, v| sum.wrapping_add(*v))
    }

    /// # Errors
    ///
    /// [`DecodeError::InvalidChecksum`] if the sent and computed checksums differ.
    pub fn validate(&self) -> Result<(), DecodeError> {
        let computed = self.computed_checksum();
        if computed != self.checksum() {
            return Err(DecodeError::InvalidChecksum {
                received: self.checksum(),
                computed,
            });
        }
        Ok(())
    }
}
