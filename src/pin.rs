use embedded_hal::digital::v2::OutputPin;

use crate::shift::ShiftRegister;

/// A single output of a [`ShiftRegister`], obtained with
/// [`ShiftRegister::pin`].
///
/// Writes through the handle always commit.
///
/// ```
/// # use core::convert::Infallible;
/// # use embedded_hal::digital::v2::OutputPin;
/// # struct Line;
/// # impl OutputPin for Line {
/// #     type Error = Infallible;
/// #     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
/// # }
/// use hc595::ShiftRegister;
///
/// let mut register = ShiftRegister::<_, _, _, 2>::new(Line, Line, Line).unwrap();
/// register.pin(9).set(true).unwrap();
/// assert_eq!(register.raw_buffer(), &[0x00, 0x02]);
/// ```
pub struct Pin<'a, DATA, CLOCK, LATCH, const N: usize> {
    register: &'a mut ShiftRegister<DATA, CLOCK, LATCH, N>,
    index: usize,
}

impl<'a, DATA, CLOCK, LATCH, E, const N: usize> Pin<'a, DATA, CLOCK, LATCH, N>
where
    DATA: OutputPin<Error = E>,
    CLOCK: OutputPin<Error = E>,
    LATCH: OutputPin<Error = E>,
{
    pub(crate) fn new(
        register: &'a mut ShiftRegister<DATA, CLOCK, LATCH, N>,
        index: usize,
    ) -> Self {
        Self { register, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self) -> bool {
        self.register.get(self.index)
    }

    pub fn set(&mut self, value: bool) -> Result<(), E> {
        self.register.set_pin(self.index, value, true)
    }

    pub fn set_high(&mut self) -> Result<(), E> {
        self.set(true)
    }

    pub fn set_low(&mut self) -> Result<(), E> {
        self.set(false)
    }

    pub fn toggle(&mut self) -> Result<(), E> {
        self.register.toggle(self.index, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    struct Line;

    impl OutputPin for Line {
        type Error = Infallible;

        fn set_low(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn register() -> ShiftRegister<Line, Line, Line, 2> {
        ShiftRegister::new(Line, Line, Line).unwrap()
    }

    #[test]
    fn set_delegates_to_register() {
        let mut register = register();
        register.pin(3).set(true).unwrap();
        register.pin(8).set_high().unwrap();
        assert_eq!(register.raw_buffer(), &[0x08, 0x01]);
        register.pin(3).set_low().unwrap();
        assert_eq!(register.raw_buffer(), &[0x00, 0x01]);
    }

    #[test]
    fn get_and_toggle() {
        let mut register = register();
        let mut pin = register.pin(15);
        assert_eq!(pin.index(), 15);
        assert!(!pin.get());
        pin.toggle().unwrap();
        assert!(pin.get());
        pin.toggle().unwrap();
        assert!(!pin.get());
    }

    #[test]
    fn out_of_range_handle_is_inert() {
        let mut register = register();
        let mut pin = register.pin(16);
        pin.set(true).unwrap();
        assert!(!pin.get());
        assert_eq!(register.raw_buffer(), &[0, 0]);
    }
}
