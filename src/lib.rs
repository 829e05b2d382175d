//! gpio-bank — a register-bank GPIO control engine for no_std environments.
//!
//! This crate drives a BCM2835-class GPIO register block: it maps a pin
//! index to the right offsets and bit positions inside the four register
//! families (function-select, set, clear, level), performs the
//! read-modify-write or write-1-to-act operations those families require,
//! and exposes a small textual command language for driving pins and
//! observing their levels.
//!
//! The crate owns no hardware resources itself. The host maps the physical
//! register range, hands the core a validated base address and length (see
//! [`MmioRegion`]), and serializes concurrent access; everything above that
//! boundary (device exposure, user/kernel copies, process lifecycle) is
//! the host's business.
//!
//! Layering, leaves first:
//! - [`low::bank`] — pure offset/bit-position arithmetic per register family.
//! - [`low::io`] — the only component that touches the mapped region.
//! - [`PinController`] — semantic pin operations over the two layers below.
//! - [`PinScan`] — a restartable one-record-per-call status enumerator.
//! - [`command`] — the textual command dispatcher and per-pin status query.
//! - [`BindingTable`] — named per-pin command endpoints.

#![no_std]

extern crate alloc;

pub mod bindings;
pub mod command;
pub mod controller;
pub mod low;
pub mod scan;

#[cfg(test)]
mod testutil;

pub use bindings::{Binding, BindingTable};
pub use controller::PinController;
pub use low::bank::{self, Bank};
pub use low::io::{MmioRegion, REGION_LEN, RegisterIo};
pub use scan::{PinReport, PinScan, ScanStep};

use thiserror::Error;

/// Number of pins in the bank (54 on the reference BCM2835 block).
pub const NUM_PINS: u32 = 54;

/// Error type for this crate.
///
/// Parse and range errors are recoverable: they reject the single offending
/// command or call and leave all register state unchanged. A hardware fault
/// is not: it means the host handed the core a register region it cannot
/// legally access, and must be treated as fatal at process level.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Pin index outside `[0, NUM_PINS)`.
    #[error("pin {0} out of range (bank has {NUM_PINS} pins)")]
    OutOfRange(u32),
    /// Unparseable or unrecognized command; no register state was touched.
    #[error("invalid command")]
    InvalidCommand,
    /// The mapped register region cannot back the full register block.
    #[error("hardware fault: register region inaccessible")]
    HardwareFault,
}

/// Logical level of a GPIO pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Logical low / 0.
    Low,
    /// Logical high / 1.
    High,
}

impl Level {
    /// The single-bit register encoding of the level.
    #[inline]
    pub const fn bit(self) -> u32 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }

    /// Decode a level from bit 0 of `bits`.
    #[inline]
    pub const fn from_bit(bits: u32) -> Self {
        if bits & 1 != 0 { Level::High } else { Level::Low }
    }
}

/// Function mode of a pin, decoded from its 3-bit function-select field.
///
/// The alternate-function encodings are non-monotonic (`Alt0` is `0b100`,
/// `Alt5` is `0b010`). That is the hardware's numbering, preserved exactly;
/// do not "fix" it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Function {
    Input = 0b000,
    Output = 0b001,
    Alt0 = 0b100,
    Alt1 = 0b101,
    Alt2 = 0b110,
    Alt3 = 0b111,
    Alt4 = 0b011,
    Alt5 = 0b010,
}

impl Function {
    /// Decode a function mode from the low 3 bits of `bits`.
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0b111 {
            0b000 => Function::Input,
            0b001 => Function::Output,
            0b100 => Function::Alt0,
            0b101 => Function::Alt1,
            0b110 => Function::Alt2,
            0b111 => Function::Alt3,
            0b011 => Function::Alt4,
            _ => Function::Alt5,
        }
    }

    /// The 3-bit field encoding of the mode.
    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Whether the pin is in plain input or output mode (as opposed to an
    /// alternate hardware function).
    #[inline]
    pub const fn is_io(self) -> bool {
        matches!(self, Function::Input | Function::Output)
    }

    /// Lower-case label used by the status and enumeration text forms.
    pub const fn label(self) -> &'static str {
        match self {
            Function::Input => "input",
            Function::Output => "output",
            Function::Alt0 => "alt0",
            Function::Alt1 => "alt1",
            Function::Alt2 => "alt2",
            Function::Alt3 => "alt3",
            Function::Alt4 => "alt4",
            Function::Alt5 => "alt5",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_encoding_matches_hardware() {
        // The quirky part of the map: Alt0..Alt5 are 4, 5, 6, 7, 3, 2.
        assert_eq!(Function::Alt0.bits(), 0b100);
        assert_eq!(Function::Alt1.bits(), 0b101);
        assert_eq!(Function::Alt2.bits(), 0b110);
        assert_eq!(Function::Alt3.bits(), 0b111);
        assert_eq!(Function::Alt4.bits(), 0b011);
        assert_eq!(Function::Alt5.bits(), 0b010);
    }

    #[test]
    fn function_decode_round_trips() {
        for bits in 0..8 {
            assert_eq!(Function::from_bits(bits).bits(), bits);
        }
    }

    #[test]
    fn only_input_and_output_are_io() {
        for bits in 0..8 {
            let mode = Function::from_bits(bits);
            assert_eq!(mode.is_io(), bits == 0b000 || bits == 0b001);
        }
    }

    #[test]
    fn level_bits() {
        assert_eq!(Level::High.bit(), 1);
        assert_eq!(Level::Low.bit(), 0);
        assert_eq!(Level::from_bit(0b1110), Level::Low);
        assert_eq!(Level::from_bit(0b0111), Level::High);
    }
}
