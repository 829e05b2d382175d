//! Mock register block for tests.

use alloc::vec::Vec;

use crate::low::bank::Bank;
use crate::low::io::RegisterIo;

/// In-memory register block emulating the hardware contract: function
/// fields are plain storage, the set/clear registers are write-1-to-act
/// and latch into the level registers, and set/clear read back as zero.
pub(crate) struct FakeRegs {
    pub fsel: [u32; 6],
    pub lev: [u32; 2],
    /// Every value written into the set or clear families, in order.
    pub strobed_bits: Vec<u32>,
}

impl FakeRegs {
    pub fn new() -> Self {
        Self {
            fsel: [0; 6],
            lev: [0; 2],
            strobed_bits: Vec::new(),
        }
    }

    /// Plant a raw 3-bit function field, bypassing the controller (the
    /// crate has no public way to select alternate functions).
    pub fn set_function_bits(&mut self, pin: u32, bits: u32) {
        let reg = (pin / 10) as usize;
        let shift = (pin % 10) * 3;
        self.fsel[reg] = (self.fsel[reg] & !(0b111 << shift)) | ((bits & 0b111) << shift);
    }
}

// SAFETY: a faithful in-memory emulation of the register block.
unsafe impl RegisterIo for FakeRegs {
    fn read32(&self, offset: u32) -> u32 {
        match offset {
            0x00 | 0x04 | 0x08 | 0x0C | 0x10 | 0x14 => self.fsel[(offset / 4) as usize],
            // Set/clear have no readable state.
            0x1C | 0x20 | 0x28 | 0x2C => 0,
            0x34 => self.lev[0],
            0x38 => self.lev[1],
            other => panic!("read of unexpected register offset {other:#x}"),
        }
    }

    fn write32(&mut self, offset: u32, value: u32) {
        match offset {
            0x00 | 0x04 | 0x08 | 0x0C | 0x10 | 0x14 => {
                self.fsel[(offset / 4) as usize] = value;
            }
            0x1C | 0x20 => {
                self.strobed_bits.push(value);
                self.lev[((offset - Bank::Set.base()) / 4) as usize] |= value;
            }
            0x28 | 0x2C => {
                self.strobed_bits.push(value);
                self.lev[((offset - Bank::Clr.base()) / 4) as usize] &= !value;
            }
            0x34 | 0x38 => panic!("write to read-only level register {offset:#x}"),
            other => panic!("write to unexpected register offset {other:#x}"),
        }
    }
}
