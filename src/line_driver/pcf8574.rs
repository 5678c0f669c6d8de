use embedded_hal::i2c::{I2c, SevenBitAddress};

use super::LineDriver;
use crate::utils::BitOps;

/// Lines are the 8 quasi-bidirectional outputs P0..P7 of a PCF8574 I2C expander
///
/// Every line change rewrites the whole output byte, so the expander keeps a shadow copy.
///
/// Common LCD1602 "I2C backpacks" are wired as the `P*` constants say:
///
/// ```text
/// P7  P6  P5  P4  P3  P2  P1  P0
/// DB7 DB6 DB5 DB4 BL  EN  RW  RS
/// ```
pub struct Pcf8574Lines<I2C: I2c> {
    i2c: I2C,
    addr: SevenBitAddress,
    output: u8,
}

impl<I2C: I2c> Pcf8574Lines<I2C> {
    /// usual backpack wiring: register select
    pub const P_RS: u8 = 0;
    /// usual backpack wiring: read/write
    pub const P_RW: u8 = 1;
    /// usual backpack wiring: enable
    pub const P_EN: u8 = 2;
    /// usual backpack wiring: backlight transistor
    pub const P_BL: u8 = 3;
    /// usual backpack wiring: DB4..DB7
    pub const P_DB: [u8; 4] = [4, 5, 6, 7];

    /// All outputs are considered low until the first write
    pub fn new(i2c: I2C, addr: SevenBitAddress) -> Self {
        Self {
            i2c,
            addr,
            output: 0,
        }
    }

    /// The byte last written to the expander
    pub fn get_output(&self) -> u8 {
        self.output
    }

    /// Give the I2C bus back
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> LineDriver for Pcf8574Lines<I2C> {
    type Error = I2C::Error;

    fn line_count(&self) -> u8 {
        8
    }

    fn set_line(&mut self, line: u8, level: bool) -> Result<(), Self::Error> {
        let mut output = self.output;
        output.put_bit(line, level);

        self.i2c.write(self.addr, &[output])?;
        self.output = output;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const ADDR: u8 = 0x27;

    #[test]
    fn each_line_change_rewrites_whole_byte() {
        let expectations = [
            I2cTransaction::write(ADDR, std::vec![0b0000_0100]),
            I2cTransaction::write(ADDR, std::vec![0b0000_1100]),
            I2cTransaction::write(ADDR, std::vec![0b1000_1100]),
            I2cTransaction::write(ADDR, std::vec![0b1000_1000]),
        ];

        let mut lines = Pcf8574Lines::new(I2cMock::new(&expectations), ADDR);
        assert_eq!(lines.line_count(), 8);

        lines.set_line(Pcf8574Lines::<I2cMock>::P_EN, true).unwrap();
        lines.set_line(Pcf8574Lines::<I2cMock>::P_BL, true).unwrap();
        lines.set_line(7, true).unwrap();
        lines.set_line(Pcf8574Lines::<I2cMock>::P_EN, false).unwrap();

        assert_eq!(lines.get_output(), 0b1000_1000);

        lines.release().done();
    }
}
