//! Test doubles: recording pins, a counting delay and a pin provider

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::interface::{Interface, NoDelay};
use crate::provider::PinProvider;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    Clk,
    Din,
}

pub type Event = (Line, bool);

const START: [Event; 3] = [(Line::Clk, true), (Line::Din, true), (Line::Din, false)];
const END: [Event; 4] = [
    (Line::Clk, false),
    (Line::Din, false),
    (Line::Clk, true),
    (Line::Din, true),
];

/// Shared record of pin changes across both lines
#[derive(Clone, Debug, Default)]
pub struct Log(Rc<RefCell<Vec<Event>>>);

impl Log {
    pub fn take(&self) -> Vec<Event> {
        self.0.take()
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl embedded_hal::digital::Error for MockError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

#[derive(Debug)]
pub struct RecordingPin {
    line: Line,
    log: Log,
    /// Writes allowed before failing; `None` never fails
    remaining: Option<usize>,
    /// Handle count owned by a provider, lowered on drop
    live: Option<Rc<Cell<usize>>>,
}

impl RecordingPin {
    pub fn new(line: Line, log: Log) -> Self {
        Self {
            line,
            log,
            remaining: None,
            live: None,
        }
    }

    pub fn failing_after(mut self, writes: usize) -> Self {
        self.remaining = Some(writes);
        self
    }

    fn record(&mut self, level: bool) -> Result<(), MockError> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return Err(MockError);
            }
            *remaining -= 1;
        }
        self.log.push((self.line, level));
        Ok(())
    }
}

impl Drop for RecordingPin {
    fn drop(&mut self) {
        if let Some(live) = &self.live {
            live.set(live.get() - 1);
        }
    }
}

impl ErrorType for RecordingPin {
    type Error = MockError;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.record(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.record(true)
    }
}

/// Counts delay calls; clones share the counters
#[derive(Clone, Debug, Default)]
pub struct MockDelay {
    calls: Rc<Cell<usize>>,
    total_ns: Rc<Cell<u64>>,
}

impl MockDelay {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn total_ns(&self) -> u64 {
        self.total_ns.get()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls.set(self.calls.get() + 1);
        self.total_ns.set(self.total_ns.get() + u64::from(ns));
    }
}

pub fn pins() -> (RecordingPin, RecordingPin, Log) {
    let log = Log::default();
    (
        RecordingPin::new(Line::Clk, log.clone()),
        RecordingPin::new(Line::Din, log.clone()),
        log,
    )
}

pub fn interface() -> (Interface<RecordingPin, RecordingPin, NoDelay>, Log) {
    let (clk, din, log) = pins();
    (Interface::new(clk, din, NoDelay), log)
}

/// Split a pin log into command transfers, checking the framing of each
///
/// Panics if the log is not a clean series of start, bytes, end.
pub fn decode(events: &[Event]) -> Vec<Vec<u8>> {
    let mut transfers = Vec::new();
    let mut i = 0;
    while i < events.len() {
        assert_eq!(events[i..i + 3], START, "expected start at event {i}");
        i += 3;
        let mut bytes = Vec::new();
        while !events[i..].starts_with(&END) {
            let mut byte = 0u8;
            for bit in 0..8 {
                assert_eq!(events[i], (Line::Clk, false), "event {i}");
                let (line, level) = events[i + 1];
                assert_eq!(line, Line::Din, "event {}", i + 1);
                assert_eq!(events[i + 2], (Line::Clk, true), "event {}", i + 2);
                if level {
                    byte |= 1 << bit;
                }
                i += 3;
            }
            assert_eq!(events[i], (Line::Clk, false), "event {i}");
            i += 1;
            bytes.push(byte);
        }
        i += END.len();
        transfers.push(bytes);
    }
    transfers
}

/// Hands out recording pins by identifier
#[derive(Debug, Default)]
pub struct MockProvider {
    pub log: Log,
    /// Identifier handed out as the clock line; any other is data
    pub clk_id: u8,
    /// Identifier whose claim fails
    pub unavailable: Option<u8>,
    pub claimed: Vec<u8>,
    pub released: Vec<u8>,
    /// Pin handles handed out and not yet dropped
    pub live: Rc<Cell<usize>>,
    /// Value of `live` at each release
    pub live_at_release: Vec<usize>,
}

impl MockProvider {
    pub fn new(clk_id: u8) -> Self {
        Self {
            clk_id,
            ..Self::default()
        }
    }
}

impl PinProvider for MockProvider {
    type Pin = RecordingPin;
    type Error = MockError;

    fn claim(&mut self, id: u8) -> Result<RecordingPin, MockError> {
        if self.unavailable == Some(id) || self.claimed.contains(&id) {
            return Err(MockError);
        }
        self.claimed.push(id);
        self.live.set(self.live.get() + 1);
        let line = if id == self.clk_id { Line::Clk } else { Line::Din };
        let mut pin = RecordingPin::new(line, self.log.clone());
        pin.live = Some(self.live.clone());
        Ok(pin)
    }

    fn release(&mut self, id: u8) {
        if let Some(index) = self.claimed.iter().position(|&claimed| claimed == id) {
            self.claimed.remove(index);
            self.released.push(id);
            self.live_at_release.push(self.live.get());
        }
    }
}
