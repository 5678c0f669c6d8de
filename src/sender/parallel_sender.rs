use embedded_hal::delay::DelayNs;
use log::{debug, trace};

use crate::{
    command::{CommandSet, DataWidth, RegisterSelection, State},
    error::Error,
    line_driver::LineDriver,
    sender::SendCommand,
    state::DisplayFunction,
    utils::BitOps,
};

// HD44780 needs more than 40 ms after Vcc rises to 2.7 V
const POWER_ON_WAIT_US: u32 = 50_000;
const RESET_WAIT_LONG_US: u32 = 4_500;
const RESET_WAIT_SHORT_US: u32 = 150;
// enable pulse width should be more than 450 ns
const ENABLE_PULSE_US: u32 = 1;
// most commands need more than 37 us to settle
const COMMAND_SETTLE_US: u32 = 100;

/// Drive HD44780 on a 4 or 8 line parallel bus, every line going through a [`LineDriver`]
///
/// `PIN_CNT` is the number of data lines, decided by the constructor used:
/// [`new_4pin`](ParallelSender::new_4pin), [`new_4pin_rw`](ParallelSender::new_4pin_rw),
/// [`new_8pin`](ParallelSender::new_8pin) or [`new_8pin_rw`](ParallelSender::new_8pin_rw).
///
/// Without a RW line, the RW pin of the LCD should be tied to ground.
pub struct ParallelSender<Lines: LineDriver, const PIN_CNT: usize> {
    lines: Lines,
    rs_line: u8,
    rw_line: Option<u8>,
    en_line: u8,
    db_lines: [u8; PIN_CNT],
    backlight_line: Option<u8>,
}

impl<Lines: LineDriver> ParallelSender<Lines, 4> {
    /// 4 data lines, `db` are the lines wired to DB4..DB7, RW tied low
    pub fn new_4pin(lines: Lines, rs: u8, en: u8, db: [u8; 4]) -> Self {
        Self::from_lines(lines, rs, None, en, db)
    }

    /// 4 data lines, `db` are the lines wired to DB4..DB7
    pub fn new_4pin_rw(lines: Lines, rs: u8, rw: u8, en: u8, db: [u8; 4]) -> Self {
        Self::from_lines(lines, rs, Some(rw), en, db)
    }
}

impl<Lines: LineDriver> ParallelSender<Lines, 8> {
    /// 8 data lines, `db` are the lines wired to DB0..DB7, RW tied low
    pub fn new_8pin(lines: Lines, rs: u8, en: u8, db: [u8; 8]) -> Self {
        Self::from_lines(lines, rs, None, en, db)
    }

    /// 8 data lines, `db` are the lines wired to DB0..DB7
    pub fn new_8pin_rw(lines: Lines, rs: u8, rw: u8, en: u8, db: [u8; 8]) -> Self {
        Self::from_lines(lines, rs, Some(rw), en, db)
    }

    /// Latch a full byte on DB0..DB7
    pub fn write_8bits(
        &mut self,
        value: u8,
        delayer: &mut impl DelayNs,
    ) -> Result<(), Error<Lines::Error>> {
        self.write_byte(value, delayer)
    }
}

impl<Lines: LineDriver, const PIN_CNT: usize> ParallelSender<Lines, PIN_CNT> {
    fn from_lines(lines: Lines, rs: u8, rw: Option<u8>, en: u8, db: [u8; PIN_CNT]) -> Self {
        Self {
            lines,
            rs_line: rs,
            rw_line: rw,
            en_line: en,
            db_lines: db,
            backlight_line: None,
        }
    }

    /// Wire the backlight (usually through a transistor) to `line`
    pub fn with_backlight(mut self, line: u8) -> Self {
        self.backlight_line = Some(line);
        self
    }

    /// Turn backlight on or off, do nothing if there is no backlight line
    pub fn backlight(&mut self, on: bool) -> Result<(), Error<Lines::Error>> {
        match self.backlight_line {
            Some(line) => {
                self.check_line(line)?;
                self.set_line(line, on)
            }
            None => Ok(()),
        }
    }

    /// Turn backlight off, do nothing if there is no backlight line
    pub fn no_backlight(&mut self) -> Result<(), Error<Lines::Error>> {
        self.backlight(false)
    }

    /// Borrow the line driver
    pub fn lines(&self) -> &Lines {
        &self.lines
    }

    /// Give the line driver back
    pub fn release(self) -> Lines {
        self.lines
    }

    fn check_line(&self, line: u8) -> Result<(), Error<Lines::Error>> {
        let count = self.lines.line_count();
        match line < count {
            true => Ok(()),
            false => Err(Error::NoSuchLine { line, count }),
        }
    }

    fn check_all_lines(&self) -> Result<(), Error<Lines::Error>> {
        [Some(self.rs_line), self.rw_line, Some(self.en_line), self.backlight_line]
            .into_iter()
            .flatten()
            .chain(self.db_lines.iter().copied())
            .try_for_each(|line| self.check_line(line))
    }

    fn set_line(&mut self, line: u8, level: bool) -> Result<(), Error<Lines::Error>> {
        self.lines.set_line(line, level).map_err(Error::LineDriver)
    }

    // bit 0 of `raw_bits` goes to `db_lines[first_db]`, and so on up to the last data line
    fn push_bits(&mut self, raw_bits: u8, first_db: usize) -> Result<(), Error<Lines::Error>> {
        (first_db..PIN_CNT)
            .enumerate()
            .try_for_each(|(index, db_index)| {
                let line = self.db_lines[db_index];
                self.set_line(line, raw_bits.check_bit(index as u8).into())
            })
    }

    fn pulse_enable(&mut self, delayer: &mut impl DelayNs) -> Result<(), Error<Lines::Error>> {
        self.set_line(self.en_line, false)?;
        delayer.delay_us(ENABLE_PULSE_US);
        self.set_line(self.en_line, true)?;
        delayer.delay_us(ENABLE_PULSE_US);
        self.set_line(self.en_line, false)?;
        delayer.delay_us(COMMAND_SETTLE_US);
        Ok(())
    }

    // bit `i` of `value` onto data line `i`
    fn write_byte(
        &mut self,
        value: u8,
        delayer: &mut impl DelayNs,
    ) -> Result<(), Error<Lines::Error>> {
        self.push_bits(value, 0)?;
        self.pulse_enable(delayer)
    }

    fn nibble(&mut self, value: u8, delayer: &mut impl DelayNs) -> Result<(), Error<Lines::Error>> {
        trace!("nibble {:#03x}", value & 0x0F);

        // DB4..DB7 are the last 4 data lines, whatever the bus width
        self.push_bits(value & 0x0F, PIN_CNT - 4)?;
        self.pulse_enable(delayer)
    }
}

impl<Lines, const PIN_CNT: usize, Delayer> SendCommand<Delayer> for ParallelSender<Lines, PIN_CNT>
where
    Lines: LineDriver,
    Delayer: DelayNs,
{
    type Error = Error<Lines::Error>;

    fn data_width(&self) -> DataWidth {
        match PIN_CNT {
            4 => DataWidth::Bit4,
            8 => DataWidth::Bit8,
            _ => unreachable!(),
        }
    }

    fn config(
        &mut self,
        function: DisplayFunction,
        delayer: &mut Delayer,
    ) -> Result<(), Self::Error> {
        self.check_all_lines()?;

        debug!(
            "reset HD44780 on {} data lines, function set {:#04x}",
            PIN_CNT,
            u8::from(CommandSet::FunctionSet(function))
        );

        delayer.delay_us(POWER_ON_WAIT_US);

        self.set_line(self.rs_line, false)?;
        self.set_line(self.en_line, false)?;
        if let Some(rw) = self.rw_line {
            self.set_line(rw, false)?;
        }

        // in initialization process, we'd better use "raw command", to strictly follow datasheet
        let function_set: u8 = CommandSet::FunctionSet(function).into();

        match PIN_CNT {
            4 => {
                // controller may be in 8 bit mode, or half way through a 4 bit transfer,
                // three 0x3 bring it back to 8 bit mode in both cases
                self.write_4bits(0x03, delayer)?;
                delayer.delay_us(RESET_WAIT_LONG_US);
                self.write_4bits(0x03, delayer)?;
                delayer.delay_us(RESET_WAIT_LONG_US);
                self.write_4bits(0x03, delayer)?;
                delayer.delay_us(RESET_WAIT_SHORT_US);
                self.write_4bits(0x02, delayer)?;
            }

            8 => {
                self.send(function_set, RegisterSelection::Command, delayer)?;
                self.delay_and_send(
                    function_set,
                    RegisterSelection::Command,
                    delayer,
                    RESET_WAIT_LONG_US,
                )?;
                self.delay_and_send(
                    function_set,
                    RegisterSelection::Command,
                    delayer,
                    RESET_WAIT_SHORT_US,
                )?;
            }

            _ => unreachable!(),
        }

        self.send(function_set, RegisterSelection::Command, delayer)
    }

    fn send(
        &mut self,
        value: u8,
        rs: RegisterSelection,
        delayer: &mut Delayer,
    ) -> Result<(), Self::Error> {
        trace!("send {:#04x} as {:?}", value, rs);

        self.set_line(self.rs_line, rs == RegisterSelection::Data)?;

        if let Some(rw) = self.rw_line {
            self.set_line(rw, false)?;
        }

        match PIN_CNT {
            4 => {
                self.write_4bits(value >> 4, delayer)?;
                self.write_4bits(value, delayer)
            }
            8 => self.write_byte(value, delayer),
            _ => unreachable!(),
        }
    }

    fn write_4bits(&mut self, value: u8, delayer: &mut Delayer) -> Result<(), Self::Error> {
        self.nibble(value, delayer)
    }

    fn set_backlight(&mut self, backlight: State) -> Result<(), Self::Error> {
        self.backlight(backlight.into())
    }
}
