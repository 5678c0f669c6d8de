//! Line drivers
//!
//! A [`LineDriver`] sets one *logical* line to a level. What a logical line physically is
//! (an MCU pin, an output of an I/O expander, one stage of a shift register) is up to the
//! implementation, so [`ParallelSender`](crate::sender::ParallelSender) never needs to know
//! how the LCD is wired.
//!
//! If you want to drive LCD through another kind of device, you will need to implement
//! [`LineDriver`] for it.

use core::fmt::Debug;

mod native;
mod pcf8574;
mod shift_register;

pub use native::NativePins;
pub use pcf8574::Pcf8574Lines;
pub use shift_register::ShiftRegisterLines;

/// Something that can set a numbered logical line high or low
pub trait LineDriver {
    /// Error reported when a line can't be changed
    type Error: Debug;

    /// How many lines this driver provides, valid lines are `0..line_count()`
    fn line_count(&self) -> u8;

    /// Set `line` to `level` (`true` is high)
    ///
    /// `line` must be less than [`LineDriver::line_count()`],
    /// an implementation may panic otherwise.
    fn set_line(&mut self, line: u8, level: bool) -> Result<(), Self::Error>;
}

// lend a driver to a sender, and keep ownership elsewhere
impl<T: LineDriver + ?Sized> LineDriver for &mut T {
    type Error = T::Error;

    fn line_count(&self) -> u8 {
        T::line_count(self)
    }

    fn set_line(&mut self, line: u8, level: bool) -> Result<(), Self::Error> {
        T::set_line(self, line, level)
    }
}
