//! Built-in sender
//! If you want to create a new sender, you will need to implement [`SendCommand`] trait

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;

use crate::{
    command::{DataWidth, RegisterSelection, State},
    state::DisplayFunction,
};

mod parallel_sender;

pub use parallel_sender::ParallelSender;

/// [`SendCommand`] is the trait a sender should implement to communicate with the hardware
///
/// A sender only moves bytes and nibbles, all the controller state lives in [`Lcd`](crate::lcd::Lcd).
pub trait SendCommand<Delayer: DelayNs> {
    /// Error reported by the wires under this sender
    type Error: Debug;

    /// Bus width of this sender, it won't change during sender's lifetime
    fn data_width(&self) -> DataWidth;

    /// Power-on reset of the controller, and bus width negotiation
    ///
    /// Should end with a "Function Set" carrying `function`.
    fn config(&mut self, function: DisplayFunction, delayer: &mut Delayer)
        -> Result<(), Self::Error>;

    /// Send a full byte, as a command or as data
    fn send(
        &mut self,
        value: u8,
        rs: RegisterSelection,
        delayer: &mut Delayer,
    ) -> Result<(), Self::Error>;

    /// Latch the low 4 bits of `value` on DB7..DB4
    fn write_4bits(&mut self, value: u8, delayer: &mut Delayer) -> Result<(), Self::Error>;

    /// Wait specific duration, and send
    fn delay_and_send(
        &mut self,
        value: u8,
        rs: RegisterSelection,
        delayer: &mut Delayer,
        delay_us: u32,
    ) -> Result<(), Self::Error> {
        delayer.delay_us(delay_us);
        self.send(value, rs, delayer)
    }

    /// Set the backlight
    ///
    /// Note:
    /// If a driver doesn't support change backlight, just silently bypass it
    #[allow(unused_variables)]
    fn set_backlight(&mut self, backlight: State) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::{vec, vec::Vec};

    use super::*;
    use crate::testing::{RecordingDelay, RecordingSender, Sent};

    #[test]
    fn delay_then_send_and_nibble() {
        let mut sender = RecordingSender::new(DataWidth::Bit4);
        let mut delayer = RecordingDelay::default();

        sender
            .delay_and_send(0x41, RegisterSelection::Data, &mut delayer, 37)
            .unwrap();
        sender.write_4bits(0xA3, &mut delayer).unwrap();

        assert_eq!(sender.sent(), &[Sent::Data(0x41), Sent::Nibble(0x3)]);
        assert_eq!(delayer.waits_us().collect::<Vec<_>>(), vec![37]);
    }
}
