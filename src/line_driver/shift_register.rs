use embedded_hal::digital::OutputPin;

use super::LineDriver;
use crate::utils::{BitOps, BitState};

/// Lines are the parallel outputs of `REG_CNT` daisy-chained serial-in/parallel-out
/// shift registers with an output latch (74HC595 or alike)
///
/// Line `n` is output `n % 8` of register `n / 8`, register 0 being the one whose serial
/// input is wired to the MCU. Every line change shifts the whole chain out again and
/// latches it, so the registers keep a shadow copy.
pub struct ShiftRegisterLines<Data, Clock, Latch, const REG_CNT: usize>
where
    Data: OutputPin,
    Clock: OutputPin<Error = Data::Error>,
    Latch: OutputPin<Error = Data::Error>,
{
    data: Data,
    clock: Clock,
    latch: Latch,
    outputs: [u8; REG_CNT],
}

impl<Data, Clock, Latch, const REG_CNT: usize> ShiftRegisterLines<Data, Clock, Latch, REG_CNT>
where
    Data: OutputPin,
    Clock: OutputPin<Error = Data::Error>,
    Latch: OutputPin<Error = Data::Error>,
{
    /// All outputs are considered low until the first write
    pub fn new(data: Data, clock: Clock, latch: Latch) -> Self {
        assert!(
            REG_CNT > 0 && REG_CNT * 8 <= u8::MAX as usize,
            "register count should between 1 and 31"
        );

        Self {
            data,
            clock,
            latch,
            outputs: [0; REG_CNT],
        }
    }

    /// Give the pins back, as `(data, clock, latch)`
    pub fn release(self) -> (Data, Clock, Latch) {
        (self.data, self.clock, self.latch)
    }

    fn shift_out(&mut self, outputs: &[u8; REG_CNT]) -> Result<(), Data::Error> {
        // the last register in the chain receives the first byte
        for &byte in outputs.iter().rev() {
            for bit in (0..8).rev() {
                match byte.check_bit(bit) {
                    BitState::Set => self.data.set_high()?,
                    BitState::Clear => self.data.set_low()?,
                }
                self.clock.set_high()?;
                self.clock.set_low()?;
            }
        }

        // storage register is updated on the rising edge
        self.latch.set_high()?;
        self.latch.set_low()
    }
}

impl<Data, Clock, Latch, const REG_CNT: usize> LineDriver
    for ShiftRegisterLines<Data, Clock, Latch, REG_CNT>
where
    Data: OutputPin,
    Clock: OutputPin<Error = Data::Error>,
    Latch: OutputPin<Error = Data::Error>,
{
    type Error = Data::Error;

    fn line_count(&self) -> u8 {
        (REG_CNT * 8) as u8
    }

    /// # Panics
    ///
    /// if `line` is not less than `REG_CNT * 8`
    fn set_line(&mut self, line: u8, level: bool) -> Result<(), Self::Error> {
        let mut outputs = self.outputs;
        outputs[(line / 8) as usize].put_bit(line % 8, level);

        self.shift_out(&outputs)?;
        self.outputs = outputs;

        Ok(())
    }
}
