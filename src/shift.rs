use embedded_hal::digital::v2::OutputPin;

use crate::buffer::BitBuffer;
use crate::config::Config;
use crate::pin::Pin;

/// A chain of `N` 74HC595-style registers driven over three output pins.
///
/// Mutators take an `auto_commit` flag. When set, the buffer is shifted out
/// and latched before the call returns; otherwise the change stays in the
/// buffer until the next [`commit`](Self::commit).
pub struct ShiftRegister<DATA, CLOCK, LATCH, const N: usize> {
    data: DATA,
    clock: CLOCK,
    latch: LATCH,
    buffer: BitBuffer<N>,
    config: Config,
}

impl<DATA, CLOCK, LATCH, E, const N: usize> ShiftRegister<DATA, CLOCK, LATCH, N>
where
    DATA: OutputPin<Error = E>,
    CLOCK: OutputPin<Error = E>,
    LATCH: OutputPin<Error = E>,
{
    /// Takes ownership of the three lines and drives them low. The buffer
    /// starts with every pin low; nothing is shifted out until the first
    /// commit.
    pub fn new(data: DATA, clock: CLOCK, latch: LATCH) -> Result<Self, E> {
        Self::with_config(data, clock, latch, Config::new())
    }

    pub fn with_config(data: DATA, clock: CLOCK, latch: LATCH, config: Config) -> Result<Self, E> {
        let mut register = Self {
            data,
            clock,
            latch,
            buffer: BitBuffer::new(),
            config,
        };
        register.latch.set_low()?;
        register.data.set_low()?;
        register.clock.set_low()?;
        Ok(register)
    }

    /// Gives the pins back.
    pub fn release(self) -> (DATA, CLOCK, LATCH) {
        (self.data, self.clock, self.latch)
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// Shifts the whole buffer out and latches it onto the outputs.
    ///
    /// The last slot goes out first so that slot 0 ends up in the register
    /// closest to the microcontroller. The outputs keep showing the previous
    /// state until the final latch pulse.
    pub fn commit(&mut self) -> Result<(), E> {
        #[cfg(feature = "defmt")]
        defmt::trace!("commit {} stage(s): {}", N, self.buffer);

        let bytes = *self.buffer.as_bytes();
        self.latch.set_low()?;
        for &byte in bytes.iter().rev() {
            self.shift_out(byte)?;
        }
        self.latch.set_high()?;
        self.latch.set_low()
    }

    fn shift_out(&mut self, byte: u8) -> Result<(), E> {
        for step in 0..8 {
            match self.config.bit_order.bit(byte, step) {
                false => self.data.set_low()?,
                true => self.data.set_high()?,
            }

            self.clock.set_high()?;
            self.clock.set_low()?;
        }
        Ok(())
    }

    fn finish(&mut self, auto_commit: bool) -> Result<(), E> {
        if auto_commit {
            self.commit()?;
        }
        Ok(())
    }

    pub fn get(&self, pin: usize) -> bool {
        self.buffer.get(pin)
    }

    pub fn get_byte(&self, index: usize) -> u8 {
        self.buffer.get_byte(index)
    }

    /// Sets one output. An out-of-range `pin` changes nothing and does not
    /// commit.
    pub fn set_pin(&mut self, pin: usize, value: bool, auto_commit: bool) -> Result<(), E> {
        if !self.buffer.set_pin(pin, value) {
            out_of_range("pin", pin);
            return Ok(());
        }
        self.finish(auto_commit)
    }

    /// Sets the eight outputs of one stage. An out-of-range `index` changes
    /// nothing and does not commit.
    pub fn set_byte(&mut self, index: usize, value: u8, auto_commit: bool) -> Result<(), E> {
        if !self.buffer.set_byte(index, value) {
            out_of_range("byte", index);
            return Ok(());
        }
        self.finish(auto_commit)
    }

    pub fn set_all_bytes(&mut self, value: u8, auto_commit: bool) -> Result<(), E> {
        self.buffer.set_all_bytes(value);
        self.finish(auto_commit)
    }

    /// Drives every output high or low.
    pub fn set_all(&mut self, value: bool, auto_commit: bool) -> Result<(), E> {
        self.buffer.set_all_bits(value);
        self.finish(auto_commit)
    }

    pub fn load_from(&mut self, bytes: &[u8; N], auto_commit: bool) -> Result<(), E> {
        self.buffer.load_from(bytes);
        self.finish(auto_commit)
    }

    /// Moves every output `count` positions toward pin 0. See
    /// [`BitBuffer::shift`].
    pub fn shift(&mut self, count: usize, auto_commit: bool) -> Result<(), E> {
        self.buffer.shift(count);
        self.finish(auto_commit)
    }

    pub fn toggle(&mut self, pin: usize, auto_commit: bool) -> Result<(), E> {
        if !self.buffer.toggle(pin) {
            out_of_range("pin", pin);
            return Ok(());
        }
        self.finish(auto_commit)
    }

    pub fn toggle_all(&mut self, auto_commit: bool) -> Result<(), E> {
        self.buffer.toggle_all();
        self.finish(auto_commit)
    }

    /// Handle for a single output, see [`Pin`].
    pub fn pin(&mut self, index: usize) -> Pin<'_, DATA, CLOCK, LATCH, N> {
        Pin::new(self, index)
    }

    pub fn buffer(&self) -> &BitBuffer<N> {
        &self.buffer
    }

    pub fn raw_buffer(&self) -> &[u8; N] {
        self.buffer.as_bytes()
    }

    /// Direct access to the stored bytes. Changes made here reach the
    /// outputs only after an explicit [`commit`](Self::commit).
    pub fn raw_buffer_mut(&mut self) -> &mut [u8; N] {
        self.buffer.as_bytes_mut()
    }
}

#[cfg_attr(not(feature = "defmt"), allow(unused_variables))]
fn out_of_range(what: &'static str, index: usize) {
    #[cfg(feature = "defmt")]
    defmt::warn!("{} {} is out of range, ignored", what, index);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BitOrder;
    use core::convert::Infallible;

    /// Counts edges on a pin and remembers its level.
    #[derive(Default)]
    struct CountingPin {
        high: bool,
        rising: usize,
    }

    impl OutputPin for CountingPin {
        type Error = Infallible;

        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            if !self.high {
                self.rising += 1;
            }
            self.high = true;
            Ok(())
        }
    }

    type Register<const N: usize> = ShiftRegister<CountingPin, CountingPin, CountingPin, N>;

    fn register<const N: usize>() -> Register<N> {
        ShiftRegister::new(
            CountingPin::default(),
            CountingPin::default(),
            CountingPin::default(),
        )
        .unwrap()
    }

    fn pulses<const N: usize>(register: Register<N>) -> (usize, usize) {
        let (_, clock, latch) = register.release();
        (clock.rising, latch.rising)
    }

    #[test]
    fn new_drives_lines_low_and_buffer_empty() {
        let register = register::<2>();
        assert_eq!(register.raw_buffer(), &[0, 0]);
        let (data, clock, latch) = register.release();
        assert!(!data.high && !clock.high && !latch.high);
        assert_eq!((clock.rising, latch.rising), (0, 0));
    }

    #[test]
    fn commit_pulses_clock_per_bit_and_latch_once() {
        let mut register = register::<3>();
        register.commit().unwrap();
        assert_eq!(pulses(register), (24, 1));
    }

    #[test]
    fn deferred_mutators_do_not_touch_the_bus() {
        let mut register = register::<2>();
        register.set_pin(3, true, false).unwrap();
        register.set_byte(1, 0xAA, false).unwrap();
        register.set_all_bytes(0x0F, false).unwrap();
        register.set_all(true, false).unwrap();
        register.load_from(&[1, 2], false).unwrap();
        register.shift(3, false).unwrap();
        register.toggle(0, false).unwrap();
        register.toggle_all(false).unwrap();
        assert_eq!(pulses(register), (0, 0));
    }

    #[test]
    fn auto_commit_latches_each_change() {
        let mut register = register::<1>();
        register.set_pin(0, true, true).unwrap();
        register.toggle(0, true).unwrap();
        register.set_all(true, true).unwrap();
        assert_eq!(pulses(register), (24, 3));
    }

    #[test]
    fn out_of_range_writes_do_not_commit() {
        let mut register = register::<1>();
        register.set_pin(8, true, true).unwrap();
        register.set_byte(1, 0xFF, true).unwrap();
        register.toggle(9, true).unwrap();
        assert_eq!(register.raw_buffer(), &[0]);
        assert_eq!(pulses(register), (0, 0));
    }

    #[test]
    fn reads_follow_the_buffer() {
        let mut register = register::<2>();
        register.load_from(&[0x01, 0x80], false).unwrap();
        assert!(register.get(0));
        assert!(register.get(15));
        assert!(!register.get(16));
        assert_eq!(register.get_byte(1), 0x80);
        register.shift(1, false).unwrap();
        assert_eq!(register.raw_buffer(), &[0x00, 0x40]);
    }

    #[test]
    fn raw_buffer_mut_needs_manual_commit() {
        let mut register = register::<1>();
        register.raw_buffer_mut()[0] = 0xFF;
        assert_eq!(register.buffer().count_ones(), 8);
        assert!(register.get(7));
        assert_eq!(pulses(register), (0, 0));
    }

    #[test]
    fn keeps_config() {
        let register = ShiftRegister::<_, _, _, 1>::with_config(
            CountingPin::default(),
            CountingPin::default(),
            CountingPin::default(),
            Config::new().bit_order(BitOrder::LsbFirst),
        )
        .unwrap();
        assert_eq!(register.config().bit_order, BitOrder::LsbFirst);
    }
}
