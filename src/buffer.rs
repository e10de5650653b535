//! Fixed-size bit buffer mirroring the outputs of a register chain.

/// Desired output state of `N` cascaded 8-bit stages.
///
/// Pin `p` lives in byte `p / 8`, bit `p % 8`, bit 0 being the least
/// significant bit. Accesses past the end of the chain never fail: reads
/// yield `false`/`0` and writes are dropped.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BitBuffer<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> Default for BitBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> BitBuffer<N> {
    /// Number of addressable pins.
    pub const PINS: usize = N * 8;

    /// Creates a buffer with every pin low.
    pub const fn new() -> Self {
        Self { bytes: [0; N] }
    }

    /// Creates a buffer holding `bytes`, slot 0 first.
    pub const fn from_bytes(bytes: [u8; N]) -> Self {
        Self { bytes }
    }

    /// Returns the number of pins, `8 * N`.
    pub const fn len(&self) -> usize {
        Self::PINS
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Reads one pin. Pins past the end of the chain read low.
    pub fn get(&self, pin: usize) -> bool {
        match self.bytes.get(pin / 8) {
            Some(byte) => (byte >> (pin % 8)) & 1 != 0,
            None => false,
        }
    }

    /// Reads one byte slot, `0` when out of range.
    pub fn get_byte(&self, index: usize) -> u8 {
        self.bytes.get(index).copied().unwrap_or(0)
    }

    /// Writes one pin. Returns `false` if `pin` is past the end of the chain,
    /// in which case nothing changed.
    pub fn set_pin(&mut self, pin: usize, value: bool) -> bool {
        let Some(byte) = self.bytes.get_mut(pin / 8) else {
            return false;
        };
        let mask = 1 << (pin % 8);
        if value {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
        true
    }

    /// Writes one byte slot. Returns `false` if `index` is out of range.
    pub fn set_byte(&mut self, index: usize, value: u8) -> bool {
        match self.bytes.get_mut(index) {
            Some(byte) => {
                *byte = value;
                true
            }
            None => false,
        }
    }

    pub fn set_all_bytes(&mut self, value: u8) {
        self.bytes.fill(value);
    }

    pub fn set_all_bits(&mut self, value: bool) {
        self.set_all_bytes(if value { 0xFF } else { 0x00 });
    }

    /// Replaces the whole buffer.
    pub fn load_from(&mut self, bytes: &[u8; N]) {
        self.bytes.copy_from_slice(bytes);
    }

    /// Flips one pin. Returns `false` if `pin` is out of range.
    pub fn toggle(&mut self, pin: usize) -> bool {
        match self.bytes.get_mut(pin / 8) {
            Some(byte) => {
                *byte ^= 1 << (pin % 8);
                true
            }
            None => false,
        }
    }

    pub fn toggle_all(&mut self) {
        for byte in &mut self.bytes {
            *byte ^= 0xFF;
        }
    }

    /// Shifts every pin `count` positions toward pin 0, filling the top with
    /// low pins.
    ///
    /// Afterwards pin `p` holds what pin `p + count` held before. Shifting by
    /// `8 * N` or more clears the buffer.
    ///
    /// ```
    /// use hc595::BitBuffer;
    ///
    /// let mut buffer = BitBuffer::from_bytes([0x00, 0xFF]);
    /// buffer.shift(1);
    /// assert_eq!(buffer.as_bytes(), &[0x80, 0x7F]);
    /// ```
    pub fn shift(&mut self, count: usize) {
        if count >= Self::PINS {
            self.bytes.fill(0);
            return;
        }

        let byte_shift = count / 8;
        let bit_shift = count % 8;

        if byte_shift > 0 {
            self.bytes.copy_within(byte_shift.., 0);
            self.bytes[N - byte_shift..].fill(0);
        }

        if bit_shift > 0 {
            for i in 0..N {
                let carry = self.bytes.get(i + 1).copied().unwrap_or(0);
                self.bytes[i] = (self.bytes[i] >> bit_shift) | (carry << (8 - bit_shift));
            }
        }
    }

    /// Number of high pins.
    pub fn count_ones(&self) -> u32 {
        self.bytes.iter().map(|b| b.count_ones()).sum()
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; N] {
        &mut self.bytes
    }
}

impl<const N: usize> From<[u8; N]> for BitBuffer<N> {
    fn from(bytes: [u8; N]) -> Self {
        Self::from_bytes(bytes)
    }
}
