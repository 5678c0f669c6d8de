use embedded_hal::digital::OutputPin;

use super::LineDriver;

/// Lines are MCU output pins, line `n` is the `n`-th pin of the array
///
/// Pins should have the same type, most HALs provide an `.erase()` (or similar) method
/// to turn a typed pin into a generic one.
pub struct NativePins<P: OutputPin, const PIN_CNT: usize> {
    pins: [P; PIN_CNT],
}

impl<P: OutputPin, const PIN_CNT: usize> NativePins<P, PIN_CNT> {
    #[allow(missing_docs)]
    pub fn new(pins: [P; PIN_CNT]) -> Self {
        assert!(PIN_CNT <= u8::MAX as usize, "too many pins");

        Self { pins }
    }

    /// Give the pins back
    pub fn release(self) -> [P; PIN_CNT] {
        self.pins
    }
}

impl<P: OutputPin, const PIN_CNT: usize> LineDriver for NativePins<P, PIN_CNT> {
    type Error = P::Error;

    fn line_count(&self) -> u8 {
        PIN_CNT as u8
    }

    /// # Panics
    ///
    /// if `line` is not less than `PIN_CNT`
    fn set_line(&mut self, line: u8, level: bool) -> Result<(), Self::Error> {
        let pin = &mut self.pins[line as usize];
        match level {
            true => pin.set_high(),
            false => pin.set_low(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    #[test]
    fn line_index_selects_pin() {
        let pins = [
            PinMock::new(&[]),
            PinMock::new(&[
                PinTransaction::set(PinState::High),
                PinTransaction::set(PinState::Low),
            ]),
            PinMock::new(&[PinTransaction::set(PinState::High)]),
        ];

        let mut lines = NativePins::new(pins);
        assert_eq!(lines.line_count(), 3);

        lines.set_line(1, true).unwrap();
        lines.set_line(2, true).unwrap();
        lines.set_line(1, false).unwrap();

        for mut pin in lines.release() {
            pin.done();
        }
    }
}
