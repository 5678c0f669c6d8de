use embedded_hal::delay::DelayNs;
use log::debug;

use crate::{
    command::{CommandSet, Font, LineMode, MoveDirection, ShiftType, State},
    lcd::Lcd,
    sender::SendCommand,
    state::{DisplayControl, DisplayFunction, EntryMode, LcdState},
};

impl<'a, 'b, Sender, Delayer> Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Reset and initialize the display hardware
    ///
    /// `rows > 1` selects two-line mode. [`Font::Font5x10`] is only honoured on a
    /// one-line display, otherwise [`Font::Font5x8`] is used.
    ///
    /// After this, display is on, cursor and blink are off, text flows left to right,
    /// and the screen is cleared. It can be called again to re-initialize.
    pub fn begin(&mut self, cols: u8, rows: u8, font: Font) -> Result<(), Sender::Error> {
        let line_mode = match rows > 1 {
            true => LineMode::TwoLine,
            false => LineMode::OneLine,
        };

        // 5x10 dots need the space of a second line
        let font = match line_mode {
            LineMode::OneLine => font,
            LineMode::TwoLine => Font::Font5x8,
        };

        let function = DisplayFunction::new(self.sender.data_width(), line_mode, font);

        debug!(
            "begin {}x{} display, {:?} {:?} {:?}",
            cols,
            rows,
            function.get_data_width(),
            line_mode,
            font
        );

        let mut state = LcdState::default();
        state.set_columns(cols);
        state.set_num_lines(rows.clamp(1, 4));
        state.set_current_line(0);
        state.set_display_function(function);
        state.set_backlight(self.state.get_backlight());
        self.state = state;

        self.sender.config(function, self.delayer)?;
        self.state.set_initialized(true);

        let control = DisplayControl::new(State::On, State::Off, State::Off);
        self.send_command(CommandSet::DisplayOnOff(control))?;
        self.state.set_display_control(control);

        let mode = EntryMode::new(MoveDirection::LeftToRight, ShiftType::CursorOnly);
        self.send_command(CommandSet::EntryModeSet(mode))?;
        self.state.set_entry_mode(mode);

        self.clear()
    }
}
