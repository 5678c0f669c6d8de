/*!
# HD44780 Driver

Drive HD44780 (and compatible) character LCDs, over whatever wires you have.

Basic Usage:

1. Pick a "line driver" <br/>
    This crate include 3 line drivers, all implement [`line_driver::LineDriver`]:
    * MCU output pins [`line_driver::NativePins`]
    * PCF8574 I2C I/O expander [`line_driver::Pcf8574Lines`]
    * 74HC595 shift register chain [`line_driver::ShiftRegisterLines`]

    Or implement [`line_driver::LineDriver`] for your own.
<br/>
<br/>
2. Wire LCD pins to lines with a [`sender::ParallelSender`] (4-pin or 8-pin data bus) <br/>
    Any other transport implementing [`sender::SendCommand`] works too.
<br/>
<br/>
3. Use [`lcd::Lcd::new()`] to create a [`lcd::Lcd`], and [`lcd::Lcd::begin()`] to initialize the hardware
<br/>
<br/>
4. use any methods provide by [`lcd::Lcd`] to control the display, it also implements [`core::fmt::Write`]

```ignore
let lines = NativePins::new([rs, en, d4, d5, d6, d7]);
let mut sender = ParallelSender::new_4pin(lines, 0, 1, [2, 3, 4, 5]);
let mut lcd = Lcd::new(&mut sender, &mut delayer);

lcd.begin(16, 2, Font::Font5x8)?;
write!(lcd, "hello, world")?;
```
*/

#![no_std]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod lcd;
pub mod line_driver;
pub mod sender;
pub mod state;
pub mod utils;

#[cfg(test)]
mod testing;
