//! Controller flag sets, and the shadow state kept in step with the controller

use crate::{
    command::{DataWidth, Font, LineMode, MoveDirection, RAMType, ShiftType, State},
    utils::BitOps,
};

/// Flags of the "Function Set" instruction
///
/// Bit layout matches the instruction: `DL` (bit 4), `N` (bit 3), `F` (bit 2).
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct DisplayFunction(u8);

impl DisplayFunction {
    const DATA_WIDTH_BIT: u8 = 4;
    const LINE_BIT: u8 = 3;
    const FONT_BIT: u8 = 2;

    #[allow(missing_docs)]
    pub fn new(data_width: DataWidth, line: LineMode, font: Font) -> Self {
        let mut function = Self::default();
        function.set_data_width(data_width);
        function.set_line_mode(line);
        function.set_font(font);
        function
    }

    /// raw flag bits, without the instruction code
    pub fn bits(self) -> u8 {
        self.0
    }

    #[allow(missing_docs)]
    pub fn get_data_width(self) -> DataWidth {
        match bool::from(self.0.check_bit(Self::DATA_WIDTH_BIT)) {
            true => DataWidth::Bit8,
            false => DataWidth::Bit4,
        }
    }

    #[allow(missing_docs)]
    pub fn set_data_width(&mut self, data_width: DataWidth) {
        self.0
            .put_bit(Self::DATA_WIDTH_BIT, data_width == DataWidth::Bit8);
    }

    #[allow(missing_docs)]
    pub fn get_line_mode(self) -> LineMode {
        match bool::from(self.0.check_bit(Self::LINE_BIT)) {
            true => LineMode::TwoLine,
            false => LineMode::OneLine,
        }
    }

    #[allow(missing_docs)]
    pub fn set_line_mode(&mut self, line: LineMode) {
        self.0.put_bit(Self::LINE_BIT, line == LineMode::TwoLine);
    }

    #[allow(missing_docs)]
    pub fn get_font(self) -> Font {
        match bool::from(self.0.check_bit(Self::FONT_BIT)) {
            true => Font::Font5x10,
            false => Font::Font5x8,
        }
    }

    #[allow(missing_docs)]
    pub fn set_font(&mut self, font: Font) {
        self.0.put_bit(Self::FONT_BIT, font == Font::Font5x10);
    }
}

/// Flags of the "Display On/Off Control" instruction
///
/// Bit layout: `D` (bit 2), `C` (bit 1), `B` (bit 0).
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct DisplayControl(u8);

impl DisplayControl {
    const DISPLAY_BIT: u8 = 2;
    const CURSOR_BIT: u8 = 1;
    const BLINK_BIT: u8 = 0;

    #[allow(missing_docs)]
    pub fn new(display: State, cursor: State, blink: State) -> Self {
        let mut control = Self::default();
        control.set_display(display);
        control.set_cursor(cursor);
        control.set_blink(blink);
        control
    }

    /// raw flag bits, without the instruction code
    pub fn bits(self) -> u8 {
        self.0
    }

    #[allow(missing_docs)]
    pub fn get_display(self) -> State {
        bool::from(self.0.check_bit(Self::DISPLAY_BIT)).into()
    }

    #[allow(missing_docs)]
    pub fn set_display(&mut self, display: State) {
        self.0.put_bit(Self::DISPLAY_BIT, display.into());
    }

    #[allow(missing_docs)]
    pub fn get_cursor(self) -> State {
        bool::from(self.0.check_bit(Self::CURSOR_BIT)).into()
    }

    #[allow(missing_docs)]
    pub fn set_cursor(&mut self, cursor: State) {
        self.0.put_bit(Self::CURSOR_BIT, cursor.into());
    }

    #[allow(missing_docs)]
    pub fn get_blink(self) -> State {
        bool::from(self.0.check_bit(Self::BLINK_BIT)).into()
    }

    #[allow(missing_docs)]
    pub fn set_blink(&mut self, blink: State) {
        self.0.put_bit(Self::BLINK_BIT, blink.into());
    }
}

/// Flags of the "Entry Mode Set" instruction
///
/// Bit layout: `I/D` (bit 1, set = left to right), `S` (bit 0, set = display shifts on write).
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct EntryMode(u8);

impl EntryMode {
    const DIRECTION_BIT: u8 = 1;
    const SHIFT_BIT: u8 = 0;

    #[allow(missing_docs)]
    pub fn new(direction: MoveDirection, shift: ShiftType) -> Self {
        let mut mode = Self::default();
        mode.set_direction(direction);
        mode.set_shift_type(shift);
        mode
    }

    /// raw flag bits, without the instruction code
    pub fn bits(self) -> u8 {
        self.0
    }

    #[allow(missing_docs)]
    pub fn get_direction(self) -> MoveDirection {
        match bool::from(self.0.check_bit(Self::DIRECTION_BIT)) {
            true => MoveDirection::LeftToRight,
            false => MoveDirection::RightToLeft,
        }
    }

    #[allow(missing_docs)]
    pub fn set_direction(&mut self, direction: MoveDirection) {
        self.0
            .put_bit(Self::DIRECTION_BIT, direction == MoveDirection::LeftToRight);
    }

    #[allow(missing_docs)]
    pub fn get_shift_type(self) -> ShiftType {
        match bool::from(self.0.check_bit(Self::SHIFT_BIT)) {
            true => ShiftType::CursorAndDisplay,
            false => ShiftType::CursorOnly,
        }
    }

    #[allow(missing_docs)]
    pub fn set_shift_type(&mut self, shift: ShiftType) {
        self.0
            .put_bit(Self::SHIFT_BIT, shift == ShiftType::CursorAndDisplay);
    }
}

// last DDRAM address of each line mode
const ONE_LINE_LAST_ADDR: u8 = 0x4F;
const FIRST_LINE_LAST_ADDR: u8 = 0x27;
const SECOND_LINE_FIRST_ADDR: u8 = 0x40;
const SECOND_LINE_LAST_ADDR: u8 = 0x67;

#[derive(Default)]
pub(crate) struct LcdState {
    display_function: DisplayFunction,
    display_control: DisplayControl,
    entry_mode: EntryMode,
    columns: u8,
    num_lines: u8,
    current_line: u8,
    initialized: bool,
    ram_type: RAMType,
    ddram_addr: u8,
    backlight: State,
}

impl LcdState {
    pub(crate) fn get_display_function(&self) -> DisplayFunction {
        self.display_function
    }

    pub(crate) fn set_display_function(&mut self, function: DisplayFunction) {
        self.display_function = function;
    }

    pub(crate) fn get_display_control(&self) -> DisplayControl {
        self.display_control
    }

    pub(crate) fn set_display_control(&mut self, control: DisplayControl) {
        self.display_control = control;
    }

    pub(crate) fn get_entry_mode(&self) -> EntryMode {
        self.entry_mode
    }

    pub(crate) fn set_entry_mode(&mut self, mode: EntryMode) {
        self.entry_mode = mode;
    }

    pub(crate) fn get_columns(&self) -> u8 {
        self.columns
    }

    pub(crate) fn set_columns(&mut self, columns: u8) {
        self.columns = columns;
    }

    pub(crate) fn get_num_lines(&self) -> u8 {
        self.num_lines
    }

    pub(crate) fn set_num_lines(&mut self, num_lines: u8) {
        self.num_lines = num_lines;
    }

    pub(crate) fn get_current_line(&self) -> u8 {
        self.current_line
    }

    pub(crate) fn set_current_line(&mut self, line: u8) {
        self.current_line = line;
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(crate) fn set_initialized(&mut self, initialized: bool) {
        self.initialized = initialized;
    }

    pub(crate) fn get_ram_type(&self) -> RAMType {
        self.ram_type
    }

    pub(crate) fn set_ram_type(&mut self, ram_type: RAMType) {
        self.ram_type = ram_type;
    }

    pub(crate) fn get_ddram_addr(&self) -> u8 {
        self.ddram_addr
    }

    pub(crate) fn set_ddram_addr(&mut self, addr: u8) {
        self.ddram_addr = addr & 0b0111_1111;
    }

    pub(crate) fn get_backlight(&self) -> State {
        self.backlight
    }

    pub(crate) fn set_backlight(&mut self, backlight: State) {
        self.backlight = backlight;
    }

    /// mimic the controller's address counter after a DDRAM write
    pub(crate) fn advance_ddram_addr(&mut self) {
        let addr = self.ddram_addr;

        let next = match (
            self.entry_mode.get_direction(),
            self.display_function.get_line_mode(),
        ) {
            (MoveDirection::LeftToRight, LineMode::OneLine) => {
                if addr >= ONE_LINE_LAST_ADDR {
                    0
                } else {
                    addr + 1
                }
            }
            (MoveDirection::LeftToRight, LineMode::TwoLine) => match addr {
                FIRST_LINE_LAST_ADDR => SECOND_LINE_FIRST_ADDR,
                addr if addr >= SECOND_LINE_LAST_ADDR => 0,
                addr => addr + 1,
            },
            (MoveDirection::RightToLeft, LineMode::OneLine) => match addr {
                0 => ONE_LINE_LAST_ADDR,
                addr => addr - 1,
            },
            (MoveDirection::RightToLeft, LineMode::TwoLine) => match addr {
                0 => SECOND_LINE_LAST_ADDR,
                SECOND_LINE_FIRST_ADDR => FIRST_LINE_LAST_ADDR,
                addr => addr - 1,
            },
        };

        self.ddram_addr = next;
    }
}
