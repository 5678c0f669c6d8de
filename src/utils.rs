//! Common tools

/// The state of a bit,
/// It's either [`BitState::Clear`] to represent a 0
/// or [`BitState::Set`] to represent a 1
#[derive(PartialEq, Debug)]
pub enum BitState {
    /// Bit is 0
    Clear,
    /// Bit is 1
    Set,
}

impl From<BitState> for bool {
    fn from(state: BitState) -> Self {
        state == BitState::Set
    }
}

/// Simple bit ops
pub trait BitOps {
    #[allow(missing_docs)]
    fn set_bit(&mut self, pos: u8) -> Self;
    #[allow(missing_docs)]
    fn clear_bit(&mut self, pos: u8) -> Self;
    #[allow(missing_docs)]
    fn check_bit(&self, pos: u8) -> BitState;
    /// set or clear a bit, depending on `set`
    fn put_bit(&mut self, pos: u8, set: bool) -> Self;
}

impl BitOps for u8 {
    fn set_bit(&mut self, pos: u8) -> Self {
        assert!(pos <= 7, "bit offset larger than 7");
        *self |= 1u8 << pos;
        *self
    }

    fn clear_bit(&mut self, pos: u8) -> Self {
        assert!(pos <= 7, "bit offset larger than 7");
        *self &= !(1u8 << pos);
        *self
    }

    fn check_bit(&self, pos: u8) -> BitState {
        assert!(pos <= 7, "bit offset larger than 7");

        match (*self >> pos) & 1 == 1 {
            true => BitState::Set,
            false => BitState::Clear,
        }
    }

    fn put_bit(&mut self, pos: u8, set: bool) -> Self {
        match set {
            true => self.set_bit(pos),
            false => self.clear_bit(pos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clear_and_check() {
        let mut byte = 0u8;
        byte.set_bit(3);
        assert_eq!(byte, 0b0000_1000);
        assert_eq!(byte.check_bit(3), BitState::Set);
        assert_eq!(byte.check_bit(2), BitState::Clear);

        byte.put_bit(7, true);
        byte.put_bit(3, false);
        assert_eq!(byte, 0b1000_0000);
    }

    #[test]
    #[should_panic(expected = "bit offset larger than 7")]
    fn offset_out_of_range() {
        0u8.check_bit(8);
    }
}
