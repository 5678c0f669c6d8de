//! HD44780 instruction set

use crate::{
    state::{DisplayControl, DisplayFunction, EntryMode},
    utils::BitOps,
};

/// One instruction of the HD44780, before it's encoded into a byte
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum CommandSet {
    /// Clear entire display, and set DDRAM address to 0
    ClearDisplay,
    /// Set DDRAM address to 0, and return a shifted display to its original position
    ReturnHome,
    /// Cursor move direction, and whether the display shifts on write
    EntryModeSet(EntryMode),
    /// Display, cursor and cursor blink on/off
    DisplayOnOff(DisplayControl),
    /// Move cursor or shift display, without changing DDRAM content
    CursorOrDisplayShift(ShiftType, MoveDirection),
    /// Interface data width, line count and font
    FunctionSet(DisplayFunction),
    /// Set CGRAM address (6 bits)
    SetCGRAM(u8),
    /// Set DDRAM address (7 bits)
    SetDDRAM(u8),
}

/// Which direction the cursor (or the display) moves
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum MoveDirection {
    #[allow(missing_docs)]
    RightToLeft,
    #[allow(missing_docs)]
    #[default]
    LeftToRight,
}

/// Whether only the cursor moves, or the whole display moves with it
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum ShiftType {
    #[allow(missing_docs)]
    #[default]
    CursorOnly,
    #[allow(missing_docs)]
    CursorAndDisplay,
}

/// A generic on/off
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum State {
    #[allow(missing_docs)]
    Off,
    #[allow(missing_docs)]
    #[default]
    On,
}

impl From<bool> for State {
    fn from(on: bool) -> Self {
        match on {
            true => State::On,
            false => State::Off,
        }
    }
}

impl From<State> for bool {
    fn from(state: State) -> Self {
        state == State::On
    }
}

/// Width of the data bus between the driver and the HD44780
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum DataWidth {
    #[allow(missing_docs)]
    #[default]
    Bit4,
    #[allow(missing_docs)]
    Bit8,
}

/// How many lines the controller drives
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum LineMode {
    #[allow(missing_docs)]
    OneLine,
    #[allow(missing_docs)]
    #[default]
    TwoLine,
}

/// Character font
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Font {
    #[allow(missing_docs)]
    #[default]
    Font5x8,
    /// only available in [`LineMode::OneLine`]
    Font5x10,
}

/// The type of memory to access
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum RAMType {
    /// Display Data RAM
    #[default]
    DDRam,
    /// Character Generator RAM
    CGRam,
}

/// What the byte on the bus means to the controller, selected by the RS line
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RegisterSelection {
    /// RS low: an instruction
    Command,
    /// RS high: character data
    Data,
}

impl From<CommandSet> for u8 {
    fn from(command: CommandSet) -> Self {
        match command {
            CommandSet::ClearDisplay => 0b0000_0001,

            CommandSet::ReturnHome => 0b0000_0010,

            CommandSet::EntryModeSet(mode) => 0b0000_0100 | mode.bits(),

            CommandSet::DisplayOnOff(control) => 0b0000_1000 | control.bits(),

            CommandSet::CursorOrDisplayShift(st, dir) => {
                let mut raw_bits: u8 = 0b0001_0000;

                raw_bits.put_bit(3, st == ShiftType::CursorAndDisplay);
                raw_bits.put_bit(2, dir == MoveDirection::LeftToRight);

                raw_bits
            }

            CommandSet::FunctionSet(function) => 0b0010_0000 | function.bits(),

            CommandSet::SetCGRAM(addr) => 0b0100_0000 | (addr & 0b0011_1111),

            CommandSet::SetDDRAM(addr) => 0b1000_0000 | (addr & 0b0111_1111),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_fixed_instructions() {
        assert_eq!(u8::from(CommandSet::ClearDisplay), 0x01);
        assert_eq!(u8::from(CommandSet::ReturnHome), 0x02);
    }

    #[test]
    fn encodes_shift_direction() {
        let left = CommandSet::CursorOrDisplayShift(
            ShiftType::CursorAndDisplay,
            MoveDirection::RightToLeft,
        );
        let right = CommandSet::CursorOrDisplayShift(
            ShiftType::CursorAndDisplay,
            MoveDirection::LeftToRight,
        );
        let cursor_right =
            CommandSet::CursorOrDisplayShift(ShiftType::CursorOnly, MoveDirection::LeftToRight);

        assert_eq!(u8::from(left), 0x18);
        assert_eq!(u8::from(right), 0x1C);
        assert_eq!(u8::from(cursor_right), 0x14);
    }

    #[test]
    fn addresses_are_masked() {
        assert_eq!(u8::from(CommandSet::SetCGRAM(24)), 0x58);
        assert_eq!(u8::from(CommandSet::SetCGRAM(0xFF)), 0x7F);
        assert_eq!(u8::from(CommandSet::SetDDRAM(0x45)), 0xC5);
        assert_eq!(u8::from(CommandSet::SetDDRAM(0xFF)), 0xFF);
    }

    #[test]
    fn encodes_flag_sets() {
        let function = DisplayFunction::new(DataWidth::Bit4, LineMode::TwoLine, Font::Font5x8);
        assert_eq!(u8::from(CommandSet::FunctionSet(function)), 0x28);

        let function = DisplayFunction::new(DataWidth::Bit8, LineMode::OneLine, Font::Font5x10);
        assert_eq!(u8::from(CommandSet::FunctionSet(function)), 0x34);

        let control = DisplayControl::new(State::On, State::Off, State::Off);
        assert_eq!(u8::from(CommandSet::DisplayOnOff(control)), 0x0C);

        let mode = EntryMode::new(MoveDirection::LeftToRight, ShiftType::CursorOnly);
        assert_eq!(u8::from(CommandSet::EntryModeSet(mode)), 0x06);
    }
}
