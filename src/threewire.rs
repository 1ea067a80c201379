use embedded_hal::digital::{Error, ErrorType, InputPin, OutputPin};

/// The DS1620 3-wire bus: a clock line, a bidirectional data line and a
/// reset/select line, each bound explicitly at construction.
pub trait ThreeWire {
    type Error: Error;

    /// Drives the clock line high
    fn clock_high(&mut self) -> Result<(), Self::Error>;

    /// Drives the clock line low
    fn clock_low(&mut self) -> Result<(), Self::Error>;

    /// Asserts the reset/select line (active high on the DS1620)
    fn reset_high(&mut self) -> Result<(), Self::Error>;

    /// Deasserts the reset/select line
    fn reset_low(&mut self) -> Result<(), Self::Error>;

    /// Drives the data line high
    ///
    /// *NOTE* the actual electrical state of the line may not actually be
    /// high, e.g. due to external electrical sources
    fn data_high(&mut self) -> Result<(), Self::Error>;

    /// Drives the data line low
    fn data_low(&mut self) -> Result<(), Self::Error>;

    /// Switches the data line to output mode before shifting bits out
    fn data_output(&mut self) -> Result<(), Self::Error>;

    /// Releases the data line so the chip can drive it
    fn data_input(&mut self) -> Result<(), Self::Error>;

    /// Samples the data line; only meaningful while released for input
    fn read_data(&mut self) -> Result<bool, Self::Error>;
}

/// Pin tuple config wrapper, ordered (data, clock, reset).
///
/// The data pin must be usable as both input and output, which on most HALs
/// means an open-drain pin with an external pull-up; releasing the line is
/// the input-mode switch. Targets with true direction control implement
/// [`ThreeWire`] on their own port type instead.
impl<E, DQ, CLK, RST> ThreeWire for (DQ, CLK, RST)
where
    E: Error,
    DQ: ErrorType<Error = E> + InputPin + OutputPin,
    CLK: ErrorType<Error = E> + OutputPin,
    RST: ErrorType<Error = E> + OutputPin,
{
    type Error = E;

    fn clock_high(&mut self) -> Result<(), Self::Error> {
        self.1.set_high()
    }

    fn clock_low(&mut self) -> Result<(), Self::Error> {
        self.1.set_low()
    }

    fn reset_high(&mut self) -> Result<(), Self::Error> {
        self.2.set_high()
    }

    fn reset_low(&mut self) -> Result<(), Self::Error> {
        self.2.set_low()
    }

    fn data_high(&mut self) -> Result<(), Self::Error> {
        self.0.set_high()
    }

    fn data_low(&mut self) -> Result<(), Self::Error> {
        self.0.set_low()
    }

    fn data_output(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn data_input(&mut self) -> Result<(), Self::Error> {
        self.0.set_high()
    }

    fn read_data(&mut self) -> Result<bool, Self::Error> {
        self.0.is_high()
    }
}
