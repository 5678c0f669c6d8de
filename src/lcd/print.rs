use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::{lcd::Lcd, sender::SendCommand};

impl<'a, 'b, Sender, Delayer> Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Write every byte at cursor position, returns how many were written
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<usize, Sender::Error> {
        let mut written = 0;
        for &byte in bytes {
            written += self.write(byte)?;
        }
        Ok(written)
    }

    /// Write the UTF-8 bytes of `text` as character codes
    ///
    /// Only ASCII maps to the same glyph on the usual A00 character ROM.
    pub fn print(&mut self, text: &str) -> Result<usize, Sender::Error> {
        self.write_bytes(text.as_bytes())
    }
}

impl<'a, 'b, Sender, Delayer> fmt::Write for Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s).map(|_| ()).map_err(|_| fmt::Error)
    }
}

#[cfg(feature = "ufmt")]
impl<'a, 'b, Sender, Delayer> ufmt::uWrite for Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    type Error = Sender::Error;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.print(s).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::fmt::Write;
    use std::vec::Vec;

    use crate::{
        command::{DataWidth, Font},
        lcd::Lcd,
        testing::{RecordingSender, Sent},
    };
    use embedded_hal_mock::eh1::delay::NoopDelay;

    fn data(text: &[u8]) -> Vec<Sent> {
        text.iter().map(|&byte| Sent::Data(byte)).collect()
    }

    #[test]
    fn formatted_text_goes_out_as_data() {
        let mut sender = RecordingSender::new(DataWidth::Bit4);
        let mut delayer = NoopDelay::new();

        let mut lcd = Lcd::new(&mut sender, &mut delayer);
        lcd.begin(16, 2, Font::Font5x8).unwrap();
        write!(lcd, "T={}C", 25).unwrap();
        drop(lcd);

        let sent = sender.take();
        assert_eq!(sent[4..], data(b"T=25C")[..]);
    }

    #[test]
    fn print_counts_bytes() {
        let mut sender = RecordingSender::new(DataWidth::Bit4);
        let mut delayer = NoopDelay::new();

        let mut lcd = Lcd::new(&mut sender, &mut delayer);
        lcd.begin(16, 2, Font::Font5x8).unwrap();

        assert_eq!(lcd.print("hello"), Ok(5));
        assert_eq!(lcd.print(""), Ok(0));
    }

    #[test]
    fn refused_write_is_a_fmt_error() {
        let mut sender = RecordingSender::new(DataWidth::Bit4);
        let mut delayer = NoopDelay::new();

        let mut lcd = Lcd::new(&mut sender, &mut delayer);
        lcd.begin(16, 2, Font::Font5x8).unwrap();
        lcd.sender.refuse();

        assert!(write!(lcd, "x").is_err());
    }
}
