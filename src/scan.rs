//! Restartable per-pin status enumeration.
//!
//! The line-oriented consumer protocol: a session starts with a banner
//! line, then yields one step per pin in index order, then terminates with
//! a single `None` that rearms the cursor for the next session. Pins in an
//! alternate-function mode still consume a step but carry no report.

use alloc::format;
use alloc::string::String;

use crate::controller::PinController;
use crate::low::io::RegisterIo;
use crate::{Function, Level, NUM_PINS};

/// Status record for one input or output pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinReport {
    /// Pin index.
    pub index: u32,
    /// Decoded function mode; always `Input` or `Output` in a report.
    pub mode: Function,
    /// Current level.
    pub level: Level,
}

/// One step of an enumeration session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStep {
    /// Leading banner, produced once per session before any pin data.
    Banner,
    /// Status of an input or output pin.
    Report(PinReport),
    /// A pin in an alternate-function mode; consumes the step, reports
    /// nothing.
    Skipped,
}

impl ScanStep {
    /// Render the step as the line a text consumer sees. A skipped pin
    /// renders as zero bytes.
    pub fn render(&self) -> String {
        match self {
            ScanStep::Banner => String::from("GPIO:"),
            ScanStep::Report(r) => {
                format!("  {} {}: {}", r.index, r.mode.label(), r.level.bit())
            }
            ScanStep::Skipped => String::new(),
        }
    }
}

/// Cursor state for one enumeration session.
///
/// One session may be in flight per cursor at a time; independent sessions
/// need independent `PinScan` values (the cursor is explicit state here,
/// not process-wide). `None` is the start sentinel.
pub struct PinScan {
    cursor: Option<u32>,
}

impl PinScan {
    /// A scan at the start sentinel.
    pub const fn new() -> Self {
        Self { cursor: None }
    }

    /// Produce the next step of the session.
    ///
    /// The first call yields [`ScanStep::Banner`]; each following call
    /// inspects exactly one pin and advances, whether or not that pin was
    /// reported. After the last pin, one `None` is returned and the cursor
    /// resets, so the same value can run a fresh session.
    pub fn next<R: RegisterIo>(&mut self, ctl: &PinController<R>) -> Option<ScanStep> {
        let pin = match self.cursor {
            None => {
                self.cursor = Some(0);
                return Some(ScanStep::Banner);
            }
            Some(pin) if pin < NUM_PINS => pin,
            Some(_) => {
                self.cursor = None;
                return None;
            }
        };
        self.cursor = Some(pin + 1);

        let mode = ctl.mode_of(pin);
        if !mode.is_io() {
            return Some(ScanStep::Skipped);
        }
        Some(ScanStep::Report(PinReport {
            index: pin,
            mode,
            level: ctl.level_of(pin),
        }))
    }
}

impl Default for PinScan {
    fn default() -> Self {
        Self::new()
    }
}
