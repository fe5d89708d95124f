use core::fmt;

/// Reasons a captured pulse train could not be turned into a reading.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer than 40 high phases were recorded before the poll budget ran out.
    InvalidNumberOfPulses {
        /// Number of high phases actually recorded.
        captured: usize,
    },
    /// The fifth byte did not match the low 8 bits of the sum of the first four.
    InvalidChecksum {
        /// Checksum byte sent by the sensor.
        received: u8,
        /// Checksum computed from the data bytes.
        computed: u8,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumberOfPulses { captured } => {
                write!(f, "invalid number of pulses: captured {captured}, need 40")
            }
            Self::InvalidChecksum { received, computed } => write!(
                f,
                "invalid checksum: received {received:#04x}, computed {computed:#04x}"
            ),
        }
    }
}

impl core::error::Error for DecodeError {}

/// Possible errors from the DHT driver.
#[derive(Debug, PartialEq, Eq)]
pub enum DhtError<E> {
    /// Not enough high phases were captured to assemble a frame.
    InvalidNumberOfPulses { captured: usize },
    /// Checksum did not match the received data.
    InvalidChecksum { received: u8, computed: u8 },
    /// Error from the GPIO pin (direction, input or output).
    PinError(E),
}

impl<E> From<DecodeError> for DhtError<E> {
    fn from(value: DecodeError) -> Self {
        match value {
            DecodeError::InvalidNumberOfPulses { captured } => {
                Self::InvalidNumberOfPulses { captured }
            }
            DecodeError::InvalidChecksum { received, computed } => {
                Self::InvalidChecksum { received, computed }
            }
        }
    }
}

impl<E: fmt::Debug> fmt::Display for DhtError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decode = match self {
            Self::InvalidNumberOfPulses { captured } => DecodeError::InvalidNumberOfPulses {
                captured: *captured,
            },
            Self::InvalidChecksum { received, computed } => DecodeError::InvalidChecksum {
                received: *received,
                computed: *computed,
            },
            Self::PinError(e) => return write!(f, "pin error: {e:?}"),
        };
        fmt::Display::fmt(&decode, f)
    }
}
