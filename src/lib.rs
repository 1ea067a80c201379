#![no_std]
#![doc = include_str!("../README.md")]

mod command;
mod config;
mod driver;
mod exclusion;
mod result;
mod sensor;
mod temp;
mod threewire;

pub use command::{Command, OpCode};
pub use config::Config;
pub use driver::Driver;
#[cfg(feature = "cortexm")]
pub use exclusion::InterruptFree;
pub use exclusion::{Exclusion, Unguarded};
pub use result::Error;
pub use sensor::Ds1620;
pub use temp::{celsius_to_fahrenheit, decode_celsius, encode_celsius};
pub use threewire::ThreeWire;
