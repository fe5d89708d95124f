use embedded_hal::digital::{InputPin, OutputPin};

/// Direction of the single data line.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Released; the pull-up and the sensor drive the line.
    Input,
    /// Driven by the host.
    Output,
}

/// A GPIO pin that can be switched between input and output at runtime.
///
/// `embedded-hal` 1.0 has no trait for reconfigurable pins, so HAL pins need a
/// small wrapper implementing this on top of [`InputPin`] and [`OutputPin`].
pub trait IoPin: InputPin + OutputPin {
    /// Switches the pin direction.
    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error>;
}
