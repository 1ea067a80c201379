/// The DS1620 CONFIG/STATUS register as independent boolean flags.
///
/// Bit assignments follow the original register map: 1SHOT at bit 0, CPU at
/// bit 1, bits 2 and 3 reserved, NVB at bit 4, TLF at bit 5, THF at bit 6
/// and DONE at bit 7. Reports exist of parts where the documented order
/// reads reversed; the assignments here are kept as documented rather than
/// guessed at, so check against your silicon if status reads look inverted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config(u8);

const ONE_SHOT: u8 = 1 << 0;
const CPU: u8 = 1 << 1;
const NVB: u8 = 1 << 4;
const TLF: u8 = 1 << 5;
const THF: u8 = 1 << 6;
const DONE: u8 = 1 << 7;

impl Config {
    pub const fn new() -> Self {
        Config(0)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// One-shot conversion mode; continuous conversion when clear
    pub const fn one_shot(&self) -> bool {
        self.0 & ONE_SHOT != 0
    }

    pub const fn with_one_shot(self, on: bool) -> Self {
        self.update(ONE_SHOT, on)
    }

    /// CPU-driven mode: conversions start on command rather than standalone
    pub const fn cpu_mode(&self) -> bool {
        self.0 & CPU != 0
    }

    pub const fn with_cpu_mode(self, on: bool) -> Self {
        self.update(CPU, on)
    }

    /// A write to one of the non-volatile registers is still in progress
    pub const fn nonvolatile_busy(&self) -> bool {
        self.0 & NVB != 0
    }

    /// Sticky low-temperature flag; write it back clear to reset
    pub const fn low_flag(&self) -> bool {
        self.0 & TLF != 0
    }

    pub const fn with_low_flag(self, on: bool) -> Self {
        self.update(TLF, on)
    }

    /// Sticky high-temperature flag; write it back clear to reset
    pub const fn high_flag(&self) -> bool {
        self.0 & THF != 0
    }

    pub const fn with_high_flag(self, on: bool) -> Self {
        self.update(THF, on)
    }

    /// Last requested conversion has finished
    pub const fn done(&self) -> bool {
        self.0 & DONE != 0
    }

    const fn update(self, mask: u8, on: bool) -> Self {
        if on {
            Config(self.0 | mask)
        } else {
            Config(self.0 & !mask)
        }
    }
}

impl From<u8> for Config {
    fn from(bits: u8) -> Self {
        Config(bits)
    }
}

impl From<Config> for u8 {
    fn from(config: Config) -> Self {
        config.0
    }
}
