//! Semantic pin operations over the register layers.

use log::{debug, trace};

use crate::low::bank::Bank;
use crate::low::io::RegisterIo;
use crate::{Error, Function, Level, NUM_PINS};

/// Pin controller over a register block.
///
/// Owns the register handle for its lifetime and is the only writer the
/// crate routes through. Function-select updates are read-modify-write and
/// therefore not atomic against other writers of the same physical
/// register: the host must serialize all configure calls, not just calls
/// for the same pin. Set/clear writes are single-bit and independently
/// idempotent, but must not be interleaved with a concurrent
/// function-select read-modify-write.
pub struct PinController<R: RegisterIo> {
    regs: R,
}

impl<R: RegisterIo> PinController<R> {
    /// Build a controller over a register handle.
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Hand the register handle back to the host.
    pub fn into_inner(self) -> R {
        self.regs
    }

    fn check(pin: u32) -> Result<(), Error> {
        if pin < NUM_PINS {
            Ok(())
        } else {
            Err(Error::OutOfRange(pin))
        }
    }

    /// Read-modify-write `pin`'s 3-bit function-select field, preserving
    /// the fields of every other pin sharing the register.
    fn write_function(&mut self, pin: u32, mode: Function) {
        let offset = Bank::Fsel.offset_of(pin);
        let shift = Bank::Fsel.shift_of(pin);
        let cur = self.regs.read32(offset);
        let next = (cur & !(Bank::Fsel.field_mask() << shift)) | (mode.bits() << shift);
        self.regs.write32(offset, next);
    }

    /// Single-bit write into the set or clear family. These registers are
    /// write-1-to-act: never read-modify-write them, and never assert more
    /// than the one target bit.
    fn strobe_level(&mut self, pin: u32, level: Level) {
        let bank = match level {
            Level::High => Bank::Set,
            Level::Low => Bank::Clr,
        };
        self.regs.write32(bank.offset_of(pin), 1 << bank.shift_of(pin));
    }

    /// Configure `pin` as an input (function field `0b000`).
    pub fn configure_input(&mut self, pin: u32) -> Result<(), Error> {
        Self::check(pin)?;
        self.write_function(pin, Function::Input);
        debug!("pin {pin} configured as input");
        Ok(())
    }

    /// Configure `pin` as an output driving `initial`.
    ///
    /// The function field is written first, then the level, so external
    /// probing never observes an output pin with an indeterminate
    /// function. Re-asserting the function on an already-output pin is
    /// idempotent and deliberately not skipped.
    pub fn configure_output(&mut self, pin: u32, initial: Level) -> Result<(), Error> {
        Self::check(pin)?;
        self.write_function(pin, Function::Output);
        self.strobe_level(pin, initial);
        debug!("pin {pin} configured as output, {initial:?}");
        Ok(())
    }

    /// Drive `pin`'s output level.
    pub fn set_level(&mut self, pin: u32, level: Level) -> Result<(), Error> {
        Self::check(pin)?;
        self.strobe_level(pin, level);
        debug!("pin {pin} set {level:?}");
        Ok(())
    }

    /// Read `pin`'s decoded function mode.
    pub fn read_function(&self, pin: u32) -> Result<Function, Error> {
        Self::check(pin)?;
        Ok(self.mode_of(pin))
    }

    /// Read `pin`'s current level.
    pub fn read_level(&self, pin: u32) -> Result<Level, Error> {
        Self::check(pin)?;
        Ok(self.level_of(pin))
    }

    /// Decode the function field of an in-range pin.
    pub(crate) fn mode_of(&self, pin: u32) -> Function {
        debug_assert!(pin < NUM_PINS);
        let bits = self.regs.read32(Bank::Fsel.offset_of(pin)) >> Bank::Fsel.shift_of(pin);
        let mode = Function::from_bits(bits);
        trace!("pin {pin} function {}", mode.label());
        mode
    }

    /// Decode the level bit of an in-range pin.
    pub(crate) fn level_of(&self, pin: u32) -> Level {
        debug_assert!(pin < NUM_PINS);
        let bits = self.regs.read32(Bank::Lev.offset_of(pin)) >> Bank::Lev.shift_of(pin);
        Level::from_bit(bits)
    }
}
