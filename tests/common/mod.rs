//! A simulated DS1620 sitting on the far end of the 3-wire bus, for spying
//! on whatever the driver clocks out.

use core::convert::Infallible;
use core::sync::atomic::{AtomicI32, AtomicU32, Ordering};
use std::collections::{HashMap, VecDeque};

use ds1620::{Exclusion, ThreeWire};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::ErrorKind;

/// One completed select/deselect cycle as seen by the chip.
#[derive(Clone, Debug)]
pub struct Transaction {
    pub command: u8,
    pub payload: u16,
    /// Number of payload bits the master drove (0 for reads).
    pub payload_bits: u8,
    /// Total rising clock edges while selected, command bits included.
    pub pulses: u32,
    /// Every bit latched from the master, in wire order.
    pub bits: Vec<bool>,
}

pub struct SimChip {
    pub clock: bool,
    pub reset: bool,
    pub data: bool,
    input_mode: bool,
    rx: Vec<bool>,
    pulses: u32,
    read_value: u16,
    read_pos: u8,
    read_queue: HashMap<u8, VecDeque<u16>>,
    pub transactions: Vec<Transaction>,
}

impl SimChip {
    pub fn new() -> Self {
        SimChip {
            clock: false,
            reset: false,
            data: false,
            input_mode: false,
            rx: Vec::new(),
            pulses: 0,
            read_value: 0,
            read_pos: 0,
            read_queue: HashMap::new(),
            transactions: Vec::new(),
        }
    }

    /// Queues a value to serve for the given read command. Values are
    /// consumed in order; the last one repeats.
    pub fn set_register(&mut self, command: u8, value: u16) {
        self.read_queue.entry(command).or_default().push_back(value);
    }

    pub fn selected(&self) -> bool {
        self.reset
    }

    fn lookup(&mut self, command: u8) -> u16 {
        match self.read_queue.get_mut(&command) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().copied().unwrap_or(0),
            None => 0,
        }
    }

    fn finalize(&mut self) {
        if self.rx.len() >= 8 {
            let command = bits_to_u16(&self.rx[..8]) as u8;
            let payload = bits_to_u16(&self.rx[8..]);
            self.transactions.push(Transaction {
                command,
                payload,
                payload_bits: (self.rx.len() - 8) as u8,
                pulses: self.pulses,
                bits: self.rx.clone(),
            });
        }
        self.rx.clear();
        self.pulses = 0;
    }
}

fn bits_to_u16(bits: &[bool]) -> u16 {
    bits.iter()
        .enumerate()
        .fold(0, |acc, (i, bit)| acc | ((*bit as u16) << i))
}

impl ThreeWire for SimChip {
    type Error = Infallible;

    fn clock_high(&mut self) -> Result<(), Self::Error> {
        if !self.clock && self.reset {
            self.pulses += 1;
            if !self.input_mode {
                self.rx.push(self.data);
            }
        }
        self.clock = true;
        Ok(())
    }

    fn clock_low(&mut self) -> Result<(), Self::Error> {
        self.clock = false;
        Ok(())
    }

    fn reset_high(&mut self) -> Result<(), Self::Error> {
        self.reset = true;
        Ok(())
    }

    fn reset_low(&mut self) -> Result<(), Self::Error> {
        if self.reset {
            self.reset = false;
            self.finalize();
        }
        Ok(())
    }

    fn data_high(&mut self) -> Result<(), Self::Error> {
        self.data = true;
        Ok(())
    }

    fn data_low(&mut self) -> Result<(), Self::Error> {
        self.data = false;
        Ok(())
    }

    fn data_output(&mut self) -> Result<(), Self::Error> {
        self.input_mode = false;
        Ok(())
    }

    fn data_input(&mut self) -> Result<(), Self::Error> {
        self.input_mode = true;
        // command is complete at this point; latch the register to serve
        if self.rx.len() >= 8 {
            let command = bits_to_u16(&self.rx[..8]) as u8;
            self.read_value = self.lookup(command);
            self.read_pos = 0;
        }
        Ok(())
    }

    fn read_data(&mut self) -> Result<bool, Self::Error> {
        let bit = (self.read_value >> self.read_pos) & 1 == 1;
        if self.read_pos < 15 {
            self.read_pos += 1;
        }
        Ok(bit)
    }
}

/// Bus wrapper that starts failing after a set number of pin operations.
pub struct FailingBus {
    inner: SimChip,
    remaining: u32,
}

#[derive(Debug)]
pub struct PinError;

impl embedded_hal::digital::Error for PinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl FailingBus {
    pub fn new(inner: SimChip, ops_before_failure: u32) -> Self {
        FailingBus {
            inner,
            remaining: ops_before_failure,
        }
    }

    fn tick(&mut self) -> Result<(), PinError> {
        if self.remaining == 0 {
            return Err(PinError);
        }
        self.remaining -= 1;
        Ok(())
    }
}

impl ThreeWire for FailingBus {
    type Error = PinError;

    fn clock_high(&mut self) -> Result<(), Self::Error> {
        self.tick()?;
        self.inner.clock_high().unwrap();
        Ok(())
    }

    fn clock_low(&mut self) -> Result<(), Self::Error> {
        self.tick()?;
        self.inner.clock_low().unwrap();
        Ok(())
    }

    fn reset_high(&mut self) -> Result<(), Self::Error> {
        self.tick()?;
        self.inner.reset_high().unwrap();
        Ok(())
    }

    fn reset_low(&mut self) -> Result<(), Self::Error> {
        self.tick()?;
        self.inner.reset_low().unwrap();
        Ok(())
    }

    fn data_high(&mut self) -> Result<(), Self::Error> {
        self.tick()?;
        self.inner.data_high().unwrap();
        Ok(())
    }

    fn data_low(&mut self) -> Result<(), Self::Error> {
        self.tick()?;
        self.inner.data_low().unwrap();
        Ok(())
    }

    fn data_output(&mut self) -> Result<(), Self::Error> {
        self.tick()?;
        self.inner.data_output().unwrap();
        Ok(())
    }

    fn data_input(&mut self) -> Result<(), Self::Error> {
        self.tick()?;
        self.inner.data_input().unwrap();
        Ok(())
    }

    fn read_data(&mut self) -> Result<bool, Self::Error> {
        self.tick()?;
        Ok(self.inner.read_data().unwrap())
    }
}

/// Tracks enter/exit balance of the exclusion region across all uses.
pub struct CountingExclusion;

pub static DEPTH: AtomicI32 = AtomicI32::new(0);
pub static ENTERS: AtomicU32 = AtomicU32::new(0);

impl Exclusion for CountingExclusion {
    fn free<R>(f: impl FnOnce() -> R) -> R {
        DEPTH.fetch_add(1, Ordering::SeqCst);
        ENTERS.fetch_add(1, Ordering::SeqCst);
        let result = f();
        DEPTH.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// The simulator has no real-time behavior to wait on.
pub struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
