use crate::{Exclusion, OpCode, ThreeWire, Unguarded};
use core::fmt::Debug;
use core::marker::PhantomData;
use embedded_hal::delay::DelayNs;

/// Minimum time each clock phase is held, in microseconds.
const CLOCK_DUTY_US: u32 = 1;
/// Every transaction opens with an 8-bit command, LSB first.
const COMMAND_BITS: u8 = 8;

/// Bus transaction engine: clocks commands and register payloads over a
/// [`ThreeWire`] bus, one bit per clock pulse, LSB first.
///
/// The engine fully trusts the caller on payload widths; the chip defines
/// them per command (0, 8 or 9, see [`crate::Command::payload_bits`]) and
/// the bus gives the engine no way to learn them on its own.
pub struct Driver<W: ThreeWire, X: Exclusion = Unguarded> {
    bus: W,
    exclusion: PhantomData<X>,
}

impl<E: Debug, W: ThreeWire<Error = E>, X: Exclusion> Driver<W, X> {
    /// Takes exclusive ownership of the bus and drives the lines to their
    /// idle levels: clock high, data high as output, reset deasserted.
    pub fn new(mut bus: W) -> Result<Self, E> {
        X::free(|| {
            bus.data_output()?;
            bus.clock_high()?;
            bus.data_high()?;
            bus.reset_low()
        })?;
        Ok(Driver {
            bus,
            exclusion: PhantomData,
        })
    }

    /// Releases the bus lines.
    pub fn release(self) -> W {
        self.bus
    }

    /// Clocks out `cmd` followed by the low `bits` bits of `payload`.
    ///
    /// The reset/select line is deasserted at the end only when `bits` is
    /// nonzero; a zero-width write leaves it asserted as the first half of a
    /// read transaction.
    pub fn write_transaction(
        &mut self,
        delay: &mut impl DelayNs,
        cmd: impl OpCode,
        payload: u16,
        bits: u8,
    ) -> Result<(), E> {
        self.write_raw(delay, cmd.op_code(), payload, bits)
    }

    /// Clocks out `cmd`, releases the data line, then samples `bits` bits on
    /// rising clock edges, LSB first. Upper bits of the result are zero;
    /// sign interpretation is the caller's concern.
    pub fn read_transaction(
        &mut self,
        delay: &mut impl DelayNs,
        cmd: impl OpCode,
        bits: u8,
    ) -> Result<i16, E> {
        let op = cmd.op_code();
        X::free(|| {
            self.bus.clock_high()?;
            self.write_raw(delay, op, 0, 0)?;
            self.bus.data_input()?;

            let mut value = 0_i16;
            for index in 0..bits {
                self.bus.clock_low()?;
                delay.delay_us(CLOCK_DUTY_US);
                self.bus.clock_high()?;
                if self.bus.read_data()? {
                    value |= 1 << index;
                }
                delay.delay_us(CLOCK_DUTY_US);
            }

            self.bus.reset_low()?;
            Ok(value)
        })
    }

    fn write_raw(
        &mut self,
        delay: &mut impl DelayNs,
        op: u8,
        payload: u16,
        bits: u8,
    ) -> Result<(), E> {
        X::free(|| {
            self.bus.reset_high()?;
            delay.delay_us(CLOCK_DUTY_US);
            self.bus.clock_high()?;
            self.bus.data_output()?;
            self.shift_out(delay, op as u16, COMMAND_BITS)?;
            self.shift_out(delay, payload, bits)?;
            if bits != 0 {
                self.bus.reset_low()?;
            }
            Ok(())
        })
    }

    fn shift_out(&mut self, delay: &mut impl DelayNs, value: u16, bits: u8) -> Result<(), E> {
        let mut value = value;
        for _ in 0..bits {
            if value & 0x01 == 0x01 {
                self.bus.data_high()?;
            } else {
                self.bus.data_low()?;
            }
            // data is held steady across the full low/high clock pulse
            self.bus.clock_low()?;
            delay.delay_us(CLOCK_DUTY_US);
            self.bus.clock_high()?;
            delay.delay_us(CLOCK_DUTY_US);
            value >>= 1;
        }
        Ok(())
    }
}
