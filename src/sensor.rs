use crate::dht::Reading;
use crate::error::DecodeError;
use crate::frame::DataFrame;

/// The supported sensor models.
///
/// Both speak the same wire protocol; they differ in how the data bytes map
/// to physical values.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SensorVariant {
    /// DHT11: whole-number humidity and temperature in the high bytes.
    Dht11,
    /// DHT22 / AM2302: 16-bit values in tenths.
    #[default]
    Dht22,
}

impl SensorVariant {
    /// Converts a validated frame into a reading.
    ///
    /// The checksum is not looked at here; see [`DataFrame::validate`].
    pub fn convert(self, frame: &DataFrame) -> Reading {
        let [hum_hi, hum_lo, temp_hi, temp_lo, _] = frame.bytes();

        let (relative_humidity, mut celsius) = match self {
            SensorVariant::Dht11 => (f32::from(hum_hi), f32::from(temp_hi)),
            SensorVariant::Dht22 => {
                let humidity = u16::from_be_bytes([hum_hi, hum_lo]);
                let temp = u16::from_be_bytes([temp_hi & 0b0111_1111, temp_lo]);
                (f32::from(humidity) / 10.0, f32::from(temp) / 10.0)
            }
        };

        // The sign bit is honoured for every variant, DHT11 included.
        if temp_hi & 0b1000_0000 != 0 {
            celsius = -celsius;
        }

        Reading {
            temperature: celsius * 1.8 + 32.0,
            relative_humidity,
        }
    }
}

/// Decodes a list of high-phase durations into a reading.
///
/// This is a pure function of its inputs: assemble the frame, check the
/// checksum, convert.
pub fn decode(high: &[u32], variant: SensorVariant) -> Result<Reading, DecodeError> {
    let frame = DataFrame::from_high_durations(high)?;
    frame.validate()?;
    Ok(variant.convert(&frame))
}
