/// Order in which the bits of each byte go out on the data line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BitOrder {
    /// Bit 7 first, so bit 0 of a slot lands on output Q0.
    #[default]
    MsbFirst,
    /// Bit 0 first, for boards that wire the outputs in reverse. Pin numbers
    /// then follow that reversed wiring: bit 0 of a slot lands on Q7, not Q0.
    LsbFirst,
}

impl BitOrder {
    /// Bit of `byte` sent at clock `step` (0..8).
    pub(crate) fn bit(self, byte: u8, step: u8) -> bool {
        let shift = match self {
            BitOrder::MsbFirst => 7 - step,
            BitOrder::LsbFirst => step,
        };
        (byte >> shift) & 1 != 0
    }
}

/// Construction-time driver options.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub bit_order: BitOrder,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            bit_order: BitOrder::MsbFirst,
        }
    }

    pub const fn bit_order(mut self, bit_order: BitOrder) -> Self {
        self.bit_order = bit_order;
        self
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BitOrder {
    fn format(&self, f: defmt::Formatter) {
        match self {
            BitOrder::MsbFirst => defmt::write!(f, "MsbFirst"),
            BitOrder::LsbFirst => defmt::write!(f, "LsbFirst"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Config {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Config {{ bit_order: {} }}", self.bit_order)
    }
}
