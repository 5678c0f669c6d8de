//! The HD44780 controller, and everything it can do without reading back

use embedded_hal::delay::DelayNs;
use log::trace;

use crate::{
    command::{CommandSet, MoveDirection, RAMType, RegisterSelection, ShiftType, State},
    sender::SendCommand,
    state::{DisplayControl, DisplayFunction, EntryMode, LcdState},
};

mod init;
mod print;

// DDRAM address of the first character of each row
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];
// "Clear Display" and "Return Home" take 1.52 ms
const CLEAR_HOME_WAIT_US: u32 = 2_000;

/// [`Lcd`] is the main struct to drive a HD44780 (or compatible) character display
///
/// It borrows a sender and a delayer for its whole life, and keeps a shadow of
/// the controller state, since nothing is ever read back from the display.
///
/// Call [`begin`](Lcd::begin) before anything else.
pub struct Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    sender: &'a mut Sender,
    delayer: &'b mut Delayer,
    state: LcdState,
}

impl<'a, 'b, Sender, Delayer> Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Create a [`Lcd`], no I/O happens until [`begin`](Lcd::begin)
    pub fn new(sender: &'a mut Sender, delayer: &'b mut Delayer) -> Self {
        Self {
            sender,
            delayer,
            state: LcdState::default(),
        }
    }

    fn assert_initialized(&self) {
        debug_assert!(self.state.is_initialized(), "call begin() first");
    }

    fn send_command(&mut self, command: CommandSet) -> Result<(), Sender::Error> {
        self.sender
            .send(command.into(), RegisterSelection::Command, self.delayer)
    }

    /// Clear entire display, and move cursor to (0, 0)
    pub fn clear(&mut self) -> Result<(), Sender::Error> {
        self.assert_initialized();

        self.send_command(CommandSet::ClearDisplay)?;
        self.delayer.delay_us(CLEAR_HOME_WAIT_US);

        self.state.set_ddram_addr(0);
        self.state.set_current_line(0);
        self.state.set_ram_type(RAMType::DDRam);

        // controller switches itself to increment mode on clear
        let mode = self.state.get_entry_mode();
        if mode.get_direction() == MoveDirection::RightToLeft {
            if let Err(e) = self.send_command(CommandSet::EntryModeSet(mode)) {
                let mut forward = mode;
                forward.set_direction(MoveDirection::LeftToRight);
                self.state.set_entry_mode(forward);
                return Err(e);
            }
        }

        Ok(())
    }

    /// Move cursor to (0, 0), and undo any display shift
    pub fn home(&mut self) -> Result<(), Sender::Error> {
        self.assert_initialized();

        self.send_command(CommandSet::ReturnHome)?;
        self.delayer.delay_us(CLEAR_HOME_WAIT_US);

        self.state.set_ddram_addr(0);
        self.state.set_current_line(0);
        self.state.set_ram_type(RAMType::DDRam);

        Ok(())
    }

    fn update_display_control(
        &mut self,
        update: impl FnOnce(&mut DisplayControl),
    ) -> Result<(), Sender::Error> {
        self.assert_initialized();

        let mut control = self.state.get_display_control();
        update(&mut control);

        self.send_command(CommandSet::DisplayOnOff(control))?;
        self.state.set_display_control(control);

        Ok(())
    }

    /// Turn display off, DDRAM content is kept
    pub fn no_display(&mut self) -> Result<(), Sender::Error> {
        self.update_display_control(|control| control.set_display(State::Off))
    }

    #[allow(missing_docs)]
    pub fn display(&mut self) -> Result<(), Sender::Error> {
        self.update_display_control(|control| control.set_display(State::On))
    }

    #[allow(missing_docs)]
    pub fn no_cursor(&mut self) -> Result<(), Sender::Error> {
        self.update_display_control(|control| control.set_cursor(State::Off))
    }

    /// Show the underline cursor
    pub fn cursor(&mut self) -> Result<(), Sender::Error> {
        self.update_display_control(|control| control.set_cursor(State::On))
    }

    #[allow(missing_docs)]
    pub fn no_blink(&mut self) -> Result<(), Sender::Error> {
        self.update_display_control(|control| control.set_blink(State::Off))
    }

    /// Blink the character at cursor position
    pub fn blink(&mut self) -> Result<(), Sender::Error> {
        self.update_display_control(|control| control.set_blink(State::On))
    }

    /// Shift the whole display one character to the left, without touching DDRAM
    pub fn scroll_display_left(&mut self) -> Result<(), Sender::Error> {
        self.assert_initialized();
        self.send_command(CommandSet::CursorOrDisplayShift(
            ShiftType::CursorAndDisplay,
            MoveDirection::RightToLeft,
        ))
    }

    /// Shift the whole display one character to the right, without touching DDRAM
    pub fn scroll_display_right(&mut self) -> Result<(), Sender::Error> {
        self.assert_initialized();
        self.send_command(CommandSet::CursorOrDisplayShift(
            ShiftType::CursorAndDisplay,
            MoveDirection::LeftToRight,
        ))
    }

    fn update_entry_mode(
        &mut self,
        update: impl FnOnce(&mut EntryMode),
    ) -> Result<(), Sender::Error> {
        self.assert_initialized();

        let mut mode = self.state.get_entry_mode();
        update(&mut mode);

        self.send_command(CommandSet::EntryModeSet(mode))?;
        self.state.set_entry_mode(mode);

        Ok(())
    }

    /// Text flows from left to right
    pub fn left_to_right(&mut self) -> Result<(), Sender::Error> {
        self.update_entry_mode(|mode| mode.set_direction(MoveDirection::LeftToRight))
    }

    /// Text flows from right to left
    pub fn right_to_left(&mut self) -> Result<(), Sender::Error> {
        self.update_entry_mode(|mode| mode.set_direction(MoveDirection::RightToLeft))
    }

    /// The display shifts on every write, so the cursor seems to stay still
    pub fn autoscroll(&mut self) -> Result<(), Sender::Error> {
        self.update_entry_mode(|mode| mode.set_shift_type(ShiftType::CursorAndDisplay))
    }

    #[allow(missing_docs)]
    pub fn no_autoscroll(&mut self) -> Result<(), Sender::Error> {
        self.update_entry_mode(|mode| mode.set_shift_type(ShiftType::CursorOnly))
    }

    /// Fill one of the 8 custom characters (5x8) in CGRAM
    ///
    /// `index` is masked to 0..=7, only the lower 5 bits of each row are used.
    /// The cursor stays where it was, so the next [`write`](Lcd::write) lands in DDRAM.
    pub fn create_char(&mut self, index: u8, pattern: &[u8; 8]) -> Result<(), Sender::Error> {
        self.assert_initialized();

        let index = index & 0b0111;
        trace!("create char {}", index);

        // rows should land from top to bottom, whatever the text direction is
        let mode = self.state.get_entry_mode();
        let direction_flipped = mode.get_direction() == MoveDirection::RightToLeft;
        if direction_flipped {
            let mut forward = mode;
            forward.set_direction(MoveDirection::LeftToRight);
            self.send_command(CommandSet::EntryModeSet(forward))?;
        }

        // leave CGRAM even if a row failed, so writes keep landing at the cursor
        let filled = self.fill_cgram(index, pattern);
        let restored = self.leave_cgram(mode, direction_flipped);

        filled.and(restored)
    }

    fn fill_cgram(&mut self, index: u8, pattern: &[u8; 8]) -> Result<(), Sender::Error> {
        self.send_command(CommandSet::SetCGRAM(index << 3))?;
        self.state.set_ram_type(RAMType::CGRam);

        for &row in pattern {
            self.sender
                .send(row & 0b0001_1111, RegisterSelection::Data, self.delayer)?;
        }

        Ok(())
    }

    fn leave_cgram(
        &mut self,
        mode: EntryMode,
        direction_flipped: bool,
    ) -> Result<(), Sender::Error> {
        if direction_flipped {
            if let Err(e) = self.send_command(CommandSet::EntryModeSet(mode)) {
                // controller is still writing left to right
                let mut forward = mode;
                forward.set_direction(MoveDirection::LeftToRight);
                self.state.set_entry_mode(forward);
                return Err(e);
            }
        }

        self.send_command(CommandSet::SetDDRAM(self.state.get_ddram_addr()))?;
        self.state.set_ram_type(RAMType::DDRam);

        Ok(())
    }

    /// Move cursor to `col` of `row`
    ///
    /// `row` larger than the last line is clamped to the last line.
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Sender::Error> {
        self.assert_initialized();

        let row = row.min(self.state.get_num_lines().saturating_sub(1));
        let addr = ROW_OFFSETS[row as usize].wrapping_add(col);

        self.state.set_ddram_addr(addr);
        self.state.set_current_line(row);
        self.state.set_ram_type(RAMType::DDRam);

        self.send_command(CommandSet::SetDDRAM(addr))
    }

    /// Write a character code at cursor position, always returns `Ok(1)`
    ///
    /// Codes 0..=7 show the custom characters.
    pub fn write(&mut self, byte: u8) -> Result<usize, Sender::Error> {
        self.assert_initialized();

        self.sender.send(byte, RegisterSelection::Data, self.delayer)?;

        if self.state.get_ram_type() == RAMType::DDRam {
            self.state.advance_ddram_addr();
        }

        Ok(1)
    }

    /// Send a raw instruction byte
    ///
    /// The shadow state is not updated, getters may not reflect what the byte did.
    pub fn command(&mut self, byte: u8) -> Result<(), Sender::Error> {
        self.assert_initialized();

        self.sender
            .send(byte, RegisterSelection::Command, self.delayer)
    }

    /// Wait with the delayer this [`Lcd`] borrows
    pub fn delay_ms(&mut self, ms: u32) {
        self.delayer.delay_ms(ms);
    }

    #[allow(missing_docs)]
    pub fn delay_us(&mut self, us: u32) {
        self.delayer.delay_us(us);
    }

    /// Turn backlight on
    ///
    /// Note:
    /// Due to sender implementation, this function may have actual effect, or not
    pub fn backlight(&mut self) -> Result<(), Sender::Error> {
        self.set_backlight(State::On)
    }

    /// Turn backlight off, see [`backlight`](Lcd::backlight)
    pub fn no_backlight(&mut self) -> Result<(), Sender::Error> {
        self.set_backlight(State::Off)
    }

    fn set_backlight(&mut self, backlight: State) -> Result<(), Sender::Error> {
        self.sender.set_backlight(backlight)?;
        self.state.set_backlight(backlight);
        Ok(())
    }

    #[allow(missing_docs)]
    pub fn get_backlight(&self) -> State {
        self.state.get_backlight()
    }

    #[allow(missing_docs)]
    pub fn get_display_function(&self) -> DisplayFunction {
        self.state.get_display_function()
    }

    #[allow(missing_docs)]
    pub fn get_display_control(&self) -> DisplayControl {
        self.state.get_display_control()
    }

    #[allow(missing_docs)]
    pub fn get_entry_mode(&self) -> EntryMode {
        self.state.get_entry_mode()
    }

    /// Line count given to [`begin`](Lcd::begin), clamped to 1..=4
    pub fn get_num_lines(&self) -> u8 {
        self.state.get_num_lines()
    }

    /// Row of the last [`set_cursor`](Lcd::set_cursor), [`clear`](Lcd::clear) or [`home`](Lcd::home)
    pub fn get_current_line(&self) -> u8 {
        self.state.get_current_line()
    }

    #[allow(missing_docs)]
    pub fn get_columns(&self) -> u8 {
        self.state.get_columns()
    }

    #[allow(missing_docs)]
    pub fn is_initialized(&self) -> bool {
        self.state.is_initialized()
    }
}
