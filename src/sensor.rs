use crate::temp::{celsius_to_fahrenheit, decode_celsius, encode_celsius};
use crate::{Command, Config, Driver, Error, Exclusion, ThreeWire, Unguarded};
use core::fmt::Debug;
use embedded_hal::delay::DelayNs;

/// Settle time after a write to one of the chip's non-volatile registers.
const WRITE_SETTLE_MS: u32 = 20;

/// Register-level interface to a single DS1620.
///
/// Every method is a fully synchronous, blocking transaction against the
/// chip; there is no buffering and no retry. The handle owns its three bus
/// lines exclusively, so two handles can never alias a chip, and a handle
/// can only exist once [`Ds1620::new`] has driven the bus to a known state.
pub struct Ds1620<W: ThreeWire, X: Exclusion = Unguarded> {
    driver: Driver<W, X>,
}

impl<E: Debug, W: ThreeWire<Error = E>, X: Exclusion> Ds1620<W, X> {
    /// Sets up the bus lines for the chip and returns the handle.
    pub fn new(bus: W) -> Result<Self, Error<E>> {
        Ok(Ds1620 {
            driver: Driver::new(bus)?,
        })
    }

    /// Releases the bus lines.
    pub fn release(self) -> W {
        self.driver.release()
    }

    /// Starts a temperature conversion. In one-shot mode this blocks until
    /// the chip flags the conversion done, with no bound; an unresponsive
    /// chip blocks forever. Use [`Ds1620::start_conversion_with`] to put a
    /// limit on the wait.
    pub fn start_conversion(&mut self, delay: &mut impl DelayNs) -> Result<(), Error<E>> {
        self.start_conversion_with(delay, |_| true)
    }

    /// Starts a temperature conversion, polling the config register's done
    /// bit while `keep_polling` (called with the number of polls so far)
    /// returns true. Gives up with [`Error::ConversionTimeout`] otherwise.
    ///
    /// Polling only happens in one-shot mode; in continuous mode the command
    /// returns immediately.
    pub fn start_conversion_with(
        &mut self,
        delay: &mut impl DelayNs,
        mut keep_polling: impl FnMut(u32) -> bool,
    ) -> Result<(), Error<E>> {
        X::free(|| {
            self.command_only(delay, Command::StartConvert)?;

            if self.read_config(delay)?.one_shot() {
                let mut polls = 0;
                while !self.read_config(delay)?.done() {
                    polls += 1;
                    if !keep_polling(polls) {
                        return Err(Error::ConversionTimeout);
                    }
                }
            }
            Ok(())
        })
    }

    /// Halts continuous conversion.
    pub fn stop_conversion(&mut self, delay: &mut impl DelayNs) -> Result<(), Error<E>> {
        self.command_only(delay, Command::StopConvert)
    }

    /// Reads the last conversion result in whole degrees Celsius.
    pub fn read_celsius(&mut self, delay: &mut impl DelayNs) -> Result<i16, Error<E>> {
        Ok(decode_celsius(self.read_raw(delay)?))
    }

    /// Reads the last conversion result in whole degrees Fahrenheit.
    pub fn read_fahrenheit(&mut self, delay: &mut impl DelayNs) -> Result<i16, Error<E>> {
        Ok(celsius_to_fahrenheit(self.read_celsius(delay)?))
    }

    /// Reads the raw 9-bit conversion result, half-degree units, untouched.
    pub fn read_raw(&mut self, delay: &mut impl DelayNs) -> Result<i16, Error<E>> {
        self.read_register(delay, Command::ReadTemperature)
    }

    /// Reads the thermostat high trip point in degrees Celsius.
    pub fn read_high_threshold(&mut self, delay: &mut impl DelayNs) -> Result<i16, Error<E>> {
        Ok(decode_celsius(
            self.read_register(delay, Command::ReadHighThreshold)?,
        ))
    }

    /// Reads the thermostat low trip point in degrees Celsius.
    pub fn read_low_threshold(&mut self, delay: &mut impl DelayNs) -> Result<i16, Error<E>> {
        Ok(decode_celsius(
            self.read_register(delay, Command::ReadLowThreshold)?,
        ))
    }

    /// Sets the thermostat high trip point, whole degrees Celsius.
    pub fn set_high_threshold(
        &mut self,
        delay: &mut impl DelayNs,
        celsius: i16,
    ) -> Result<(), Error<E>> {
        self.write_register(delay, Command::WriteHighThreshold, encode_celsius(celsius))
    }

    /// Sets the thermostat low trip point, whole degrees Celsius.
    pub fn set_low_threshold(
        &mut self,
        delay: &mut impl DelayNs,
        celsius: i16,
    ) -> Result<(), Error<E>> {
        self.write_register(delay, Command::WriteLowThreshold, encode_celsius(celsius))
    }

    /// Reads the remaining-count register, for the datasheet's
    /// higher-resolution arithmetic.
    pub fn read_counter(&mut self, delay: &mut impl DelayNs) -> Result<i16, Error<E>> {
        self.read_register(delay, Command::ReadCounter)
    }

    /// Reads the slope register, for the datasheet's higher-resolution
    /// arithmetic.
    pub fn read_slope(&mut self, delay: &mut impl DelayNs) -> Result<i16, Error<E>> {
        self.read_register(delay, Command::ReadSlope)
    }

    /// Reads the CONFIG/STATUS register.
    pub fn read_config(&mut self, delay: &mut impl DelayNs) -> Result<Config, Error<E>> {
        let bits = self.read_register(delay, Command::ReadConfig)?;
        Ok(Config::from(bits as u8))
    }

    /// Writes the CONFIG register and waits out the chip's non-volatile
    /// write time before returning.
    pub fn write_config(
        &mut self,
        delay: &mut impl DelayNs,
        config: Config,
    ) -> Result<(), Error<E>> {
        X::free(|| {
            self.write_register(delay, Command::WriteConfig, config.bits() as u16)?;
            delay.delay_ms(WRITE_SETTLE_MS);
            Ok(())
        })
    }

    fn read_register(&mut self, delay: &mut impl DelayNs, cmd: Command) -> Result<i16, Error<E>> {
        Ok(self
            .driver
            .read_transaction(delay, cmd, cmd.payload_bits())?)
    }

    fn write_register(
        &mut self,
        delay: &mut impl DelayNs,
        cmd: Command,
        payload: u16,
    ) -> Result<(), Error<E>> {
        self.driver
            .write_transaction(delay, cmd, payload, cmd.payload_bits())?;
        Ok(())
    }

    /// Start/stop carry no payload; the same framing as a read setup, with
    /// the select line dropped straight after the command.
    fn command_only(&mut self, delay: &mut impl DelayNs, cmd: Command) -> Result<(), Error<E>> {
        self.driver.read_transaction(delay, cmd, 0)?;
        Ok(())
    }
}
