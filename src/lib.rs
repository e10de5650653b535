//! Driver for daisy-chained 74HC595 shift registers, bit-banged over three
//! `embedded-hal` output pins (data, clock, latch).
//!
//! The driver keeps the desired state of all `8 * N` outputs in a
//! [`BitBuffer`] and shifts it out on [`ShiftRegister::commit`]. Because the
//! chips only copy their shift stage to the outputs on the latch pulse, the
//! outputs never show a half-written pattern.
//!
//! ```
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::v2::OutputPin;
//! # struct Line;
//! # impl OutputPin for Line {
//! #     type Error = Infallible;
//! #     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # let (data, clock, latch) = (Line, Line, Line);
//! use hc595::ShiftRegister;
//!
//! // two chips, 16 outputs
//! let mut leds = ShiftRegister::<_, _, _, 2>::new(data, clock, latch).unwrap();
//! leds.set_pin(0, true, false).unwrap();
//! leds.set_pin(15, true, false).unwrap();
//! leds.commit().unwrap();
//!
//! // walk the pattern down one output
//! leds.shift(1, true).unwrap();
//! assert_eq!(leds.raw_buffer(), &[0x00, 0x40]);
//! ```
//!
//! # Features
//!
//! - **`defmt`**: trace each commit, warn on ignored out-of-range accesses
//!   and implement `defmt::Format` for the public types.

#![no_std]

mod buffer;
mod config;
mod format;
mod pin;
mod shift;

pub use buffer::BitBuffer;
pub use config::{BitOrder, Config};
pub use pin::Pin;
pub use shift::ShiftRegister;
