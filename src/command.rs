pub trait OpCode {
    fn op_code(&self) -> u8;
}

/// DS1620 protocol commands, one per chip register operation.
#[derive(Clone, Copy, Debug)]
#[repr(u8)]
pub enum Command {
    ReadTemperature = 0xAA,
    WriteHighThreshold = 0x01,
    WriteLowThreshold = 0x02,
    ReadHighThreshold = 0xA1,
    ReadLowThreshold = 0xA2,
    ReadCounter = 0xA0,
    ReadSlope = 0xA9,
    StartConvert = 0xEE,
    StopConvert = 0x22,
    WriteConfig = 0x0C,
    ReadConfig = 0xAC,
}

impl Command {
    /// Width in bits of the register behind this command: 9 for the
    /// temperature registers (sign bit included), 8 for counter, slope and
    /// config, 0 for the command-only start/stop operations.
    pub fn payload_bits(&self) -> u8 {
        match self {
            Command::ReadTemperature
            | Command::WriteHighThreshold
            | Command::WriteLowThreshold
            | Command::ReadHighThreshold
            | Command::ReadLowThreshold => 9,
            Command::ReadCounter
            | Command::ReadSlope
            | Command::WriteConfig
            | Command::ReadConfig => 8,
            Command::StartConvert | Command::StopConvert => 0,
        }
    }
}

impl OpCode for Command {
    fn op_code(&self) -> u8 {
        *self as _
    }
}
