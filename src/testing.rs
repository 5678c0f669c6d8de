//! Recording doubles shared by the unit tests

extern crate std;

use core::convert::Infallible;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::{
    command::{DataWidth, RegisterSelection, State},
    line_driver::LineDriver,
    sender::SendCommand,
    state::DisplayFunction,
};

/// What the controller sampled on a falling edge of EN
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Latch {
    pub(crate) rs: RegisterSelection,
    pub(crate) value: u8,
}

impl Latch {
    pub(crate) fn command(value: u8) -> Self {
        Self {
            rs: RegisterSelection::Command,
            value,
        }
    }

    pub(crate) fn data(value: u8) -> Self {
        Self {
            rs: RegisterSelection::Data,
            value,
        }
    }
}

/// A line driver that never fails, and remembers every level change
pub(crate) struct RecordingLines {
    count: u8,
    levels: Vec<bool>,
    events: Vec<(u8, bool)>,
}

impl RecordingLines {
    pub(crate) fn new(count: u8) -> Self {
        Self {
            count,
            levels: std::vec![false; count as usize],
            events: Vec::new(),
        }
    }

    pub(crate) fn events(&self) -> &[(u8, bool)] {
        &self.events
    }

    pub(crate) fn level(&self, line: u8) -> bool {
        self.levels[line as usize]
    }

    pub(crate) fn never_high(&self, line: u8) -> bool {
        self.events.iter().all(|&(l, level)| l != line || !level)
    }

    /// Replay the events, and sample `db` (lowest bit first) and `rs` on every EN falling edge
    pub(crate) fn latches(&self, rs: u8, en: u8, db: &[u8]) -> Vec<Latch> {
        let mut levels = std::vec![false; self.count as usize];
        let mut latches = Vec::new();

        for &(line, level) in &self.events {
            let falling = line == en && levels[line as usize] && !level;
            levels[line as usize] = level;

            if falling {
                let value = db
                    .iter()
                    .enumerate()
                    .filter(|&(_, &db_line)| levels[db_line as usize])
                    .fold(0u8, |acc, (bit, _)| acc | (1 << bit));

                latches.push(Latch {
                    rs: match levels[rs as usize] {
                        true => RegisterSelection::Data,
                        false => RegisterSelection::Command,
                    },
                    value,
                });
            }
        }

        latches
    }
}

impl LineDriver for RecordingLines {
    type Error = Infallible;

    fn line_count(&self) -> u8 {
        self.count
    }

    fn set_line(&mut self, line: u8, level: bool) -> Result<(), Self::Error> {
        self.levels[line as usize] = level;
        self.events.push((line, level));
        Ok(())
    }
}

/// A delay that returns at once, and keeps every requested wait in nanoseconds
#[derive(Default)]
pub(crate) struct RecordingDelay {
    waits_ns: Vec<u64>,
}

impl RecordingDelay {
    pub(crate) fn waits_us(&self) -> impl Iterator<Item = u32> + '_ {
        self.waits_ns.iter().map(|&ns| (ns / 1_000) as u32)
    }

    pub(crate) fn total_us(&self) -> u64 {
        self.waits_ns.iter().sum::<u64>() / 1_000
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_ns.push(ns as u64);
    }

    fn delay_us(&mut self, us: u32) {
        self.waits_ns.push(us as u64 * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ns.push(ms as u64 * 1_000_000);
    }
}

/// What a [`RecordingSender`] was asked to do
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Sent {
    Config(u8),
    Command(u8),
    Data(u8),
    Nibble(u8),
    Backlight(State),
}

/// The error of a [`RecordingSender`] that was told to refuse
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Refused;

/// A transport that only writes down what it's asked
pub(crate) struct RecordingSender {
    data_width: DataWidth,
    attempts: usize,
    refuse_from: Option<usize>,
    refuse_once: Option<usize>,
    sent: Vec<Sent>,
}

impl RecordingSender {
    pub(crate) fn new(data_width: DataWidth) -> Self {
        Self {
            data_width,
            attempts: 0,
            refuse_from: None,
            refuse_once: None,
            sent: Vec::new(),
        }
    }

    /// every following operation fails with [`Refused`]
    pub(crate) fn refuse(&mut self) {
        self.refuse_after(0);
    }

    /// let `count` operations through, then fail every following one
    pub(crate) fn refuse_after(&mut self, count: usize) {
        self.refuse_from = Some(self.attempts + count);
    }

    /// let `count` operations through, then fail only the next one
    pub(crate) fn refuse_once_after(&mut self, count: usize) {
        self.refuse_once = Some(self.attempts + count);
    }

    pub(crate) fn sent(&self) -> &[Sent] {
        &self.sent
    }

    pub(crate) fn take(&mut self) -> Vec<Sent> {
        core::mem::take(&mut self.sent)
    }

    fn record(&mut self, sent: Sent) -> Result<(), Refused> {
        let attempt = self.attempts;
        self.attempts += 1;

        let refused = self.refuse_once == Some(attempt)
            || self.refuse_from.is_some_and(|from| attempt >= from);

        match refused {
            true => Err(Refused),
            false => {
                self.sent.push(sent);
                Ok(())
            }
        }
    }
}

impl<Delayer: DelayNs> SendCommand<Delayer> for RecordingSender {
    type Error = Refused;

    fn data_width(&self) -> DataWidth {
        self.data_width
    }

    fn config(
        &mut self,
        function: DisplayFunction,
        _delayer: &mut Delayer,
    ) -> Result<(), Self::Error> {
        self.record(Sent::Config(
            crate::command::CommandSet::FunctionSet(function).into(),
        ))
    }

    fn send(
        &mut self,
        value: u8,
        rs: RegisterSelection,
        _delayer: &mut Delayer,
    ) -> Result<(), Self::Error> {
        self.record(match rs {
            RegisterSelection::Command => Sent::Command(value),
            RegisterSelection::Data => Sent::Data(value),
        })
    }

    fn write_4bits(&mut self, value: u8, _delayer: &mut Delayer) -> Result<(), Self::Error> {
        self.record(Sent::Nibble(value & 0x0F))
    }

    fn set_backlight(&mut self, backlight: State) -> Result<(), Self::Error> {
        self.record(Sent::Backlight(backlight))
    }
}
