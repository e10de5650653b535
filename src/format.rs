//! Printing the buffer over `ufmt` serial writers and `defmt`.

use ufmt::{uDebug, uDisplay, uWrite, Formatter};

use crate::buffer::BitBuffer;

/// Raw slot values, slot 0 first: `[1, 128]`.
impl<const N: usize> uDebug for BitBuffer<N> {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.debug_list()?.entries(self.as_bytes().iter())?.finish()
    }
}

/// Bit pattern as it sits on the outputs: one group per stage, slot 0 first,
/// Q7 on the left of each group, e.g. `00000001 10000000`.
impl<const N: usize> uDisplay for BitBuffer<N> {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        for (i, &byte) in self.as_bytes().iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            for bit in (0..8u8).rev() {
                f.write_str(if (byte >> bit) & 1 != 0 { "1" } else { "0" })?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl<const N: usize> defmt::Format for BitBuffer<N> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "BitBuffer({=[u8]:#x})", &self.as_bytes()[..])
    }
}
