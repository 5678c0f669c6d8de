//! Errors reported by the built-in senders

use core::fmt::Debug;

use thiserror::Error;

/// Failure while driving the lines of a [`ParallelSender`](crate::sender::ParallelSender)
///
/// The HD44780 itself never reports anything back, so the only things that can go wrong
/// are on our side of the wires.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error<E: Debug> {
    /// The line driver refused to change a line
    #[error("line driver failed: {0:?}")]
    LineDriver(E),
    /// A line was wired to an index the line driver doesn't provide
    #[error("line {line} is out of range, the line driver only has {count} lines")]
    NoSuchLine {
        /// the offending logical line
        line: u8,
        /// number of lines the driver provides
        count: u8,
    },
}
