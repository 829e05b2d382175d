//! Low-level GPIO building blocks used by the `gpio-bank` crate.
//!
//! This module defines the platform-facing bottom of the stack: pure
//! register-address arithmetic in [`bank`] and the memory-mapped access
//! layer in [`io`]. It intentionally exposes a minimal, unsafe boundary
//! (one raw pointer, held by [`io::MmioRegion`]) so the rest of the crate
//! can stay entirely safe.
//!
//! Safety notes:
//! - The base pointer given to [`io::MmioRegion::new`] must point at a
//!   mapped register block that stays valid for the region's lifetime.
//!   Dereferencing an invalid pointer is undefined behavior.
//! - All register accesses are volatile, full 32-bit, and naturally
//!   aligned. Partial-register writes are never issued: the set/clear
//!   families act on every 1 bit written, so unrelated bits must go out
//!   as 0.
//! - Concurrent access (interrupts, other cores, other processes sharing
//!   the mapping) must be serialized by the host; this layer adds no
//!   locking of its own.

/// Register-address arithmetic for the four register families.
///
/// Everything in here is pure and `const`-evaluable: given a pin index and
/// a family, it produces the byte offset of the 32-bit register holding
/// that pin's field and the bit position of the field inside it. The
/// function-select family packs 10 pins of 3 bits each per register; the
/// single-bit families pack 32. The two layouts share nothing; treating
/// them uniformly is the classic off-by-one trap with this block.
pub mod bank {
    use crate::{Error, NUM_PINS};

    /// One of the four register families of the block.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Bank {
        /// Function select: 3 bits per pin, 10 pins per register.
        Fsel,
        /// Pin output set: write-1-to-act, 1 bit per pin.
        Set,
        /// Pin output clear: write-1-to-act, 1 bit per pin.
        Clr,
        /// Pin level readback: 1 bit per pin.
        Lev,
    }

    impl Bank {
        /// Byte offset of the family's first register.
        pub const fn base(self) -> u32 {
            match self {
                Bank::Fsel => 0x00,
                Bank::Set => 0x1C,
                Bank::Clr => 0x28,
                Bank::Lev => 0x34,
            }
        }

        /// How many pins one 32-bit register of this family covers.
        pub const fn pins_per_reg(self) -> u32 {
            match self {
                Bank::Fsel => 10,
                Bank::Set | Bank::Clr | Bank::Lev => 32,
            }
        }

        /// Width in bits of one pin's field.
        pub const fn bits_per_pin(self) -> u32 {
            match self {
                Bank::Fsel => 3,
                Bank::Set | Bank::Clr | Bank::Lev => 1,
            }
        }

        /// Mask covering one pin's field, before shifting.
        pub const fn field_mask(self) -> u32 {
            (1 << self.bits_per_pin()) - 1
        }

        /// Byte offset of the register holding `pin`'s field.
        ///
        /// Callers must have range-checked `pin`; [`address_of`] is the
        /// checked entry point.
        pub const fn offset_of(self, pin: u32) -> u32 {
            self.base() + (pin / self.pins_per_reg()) * 4
        }

        /// Bit position of `pin`'s field inside its register.
        pub const fn shift_of(self, pin: u32) -> u32 {
            (pin % self.pins_per_reg()) * self.bits_per_pin()
        }
    }

    /// Compute `(register byte offset, bit offset)` for `pin` in `bank`.
    ///
    /// Fails with [`Error::OutOfRange`] for `pin >= NUM_PINS`; total for
    /// every in-range pin. A returned field never crosses its 32-bit
    /// register boundary.
    pub fn address_of(pin: u32, bank: Bank) -> Result<(u32, u32), Error> {
        if pin >= NUM_PINS {
            return Err(Error::OutOfRange(pin));
        }
        Ok((bank.offset_of(pin), bank.shift_of(pin)))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::low::io::REGION_LEN;

        const ALL: [Bank; 4] = [Bank::Fsel, Bank::Set, Bank::Clr, Bank::Lev];

        #[test]
        fn fields_never_cross_a_register_boundary() {
            for pin in 0..NUM_PINS {
                for bank in ALL {
                    let (offset, shift) = address_of(pin, bank).unwrap();
                    assert_eq!(offset % 4, 0, "pin {pin} {bank:?}");
                    assert!((offset as usize) + 4 <= REGION_LEN, "pin {pin} {bank:?}");
                    assert!(shift + bank.bits_per_pin() <= 32, "pin {pin} {bank:?}");
                }
            }
        }

        #[test]
        fn known_hardware_positions() {
            // Pin 17 lives in FSEL1 bits 23:21 (the red-LED pin of the
            // reference board), pin 26 in FSEL2 bits 20:18.
            assert_eq!(address_of(17, Bank::Fsel).unwrap(), (0x04, 21));
            assert_eq!(address_of(26, Bank::Fsel).unwrap(), (0x08, 18));
            // Single-bit families roll over to their second register at 32.
            assert_eq!(address_of(31, Bank::Set).unwrap(), (0x1C, 31));
            assert_eq!(address_of(32, Bank::Set).unwrap(), (0x20, 0));
            assert_eq!(address_of(40, Bank::Clr).unwrap(), (0x2C, 8));
            assert_eq!(address_of(53, Bank::Lev).unwrap(), (0x38, 21));
        }

        #[test]
        fn out_of_range_pin_is_rejected() {
            for bank in ALL {
                assert_eq!(address_of(NUM_PINS, bank), Err(Error::OutOfRange(NUM_PINS)));
                assert_eq!(address_of(u32::MAX, bank), Err(Error::OutOfRange(u32::MAX)));
            }
        }

        #[test]
        fn family_geometry() {
            assert_eq!(Bank::Fsel.field_mask(), 0b111);
            assert_eq!(Bank::Lev.field_mask(), 0b1);
            // FSEL covers 54 pins in six registers; the others in two.
            assert_eq!(Bank::Fsel.offset_of(53), 0x14);
            assert_eq!(Bank::Lev.offset_of(53), 0x38);
        }
    }
}

/// Memory-mapped register access.
///
/// [`RegisterIo`] is the seam the rest of the crate is written against:
/// full-width 32-bit reads and writes at a byte offset into the register
/// block. [`MmioRegion`] is the production implementation over a
/// host-mapped region; tests substitute a mock block that emulates the
/// hardware contract.
pub mod io {
    use core::ptr::{read_volatile, write_volatile};

    use crate::Error;

    /// Byte length of the full register block the host must map (the
    /// reference device tree maps `0xB4` bytes at the block's bus address).
    pub const REGION_LEN: usize = 0xB4;

    /// Represents 32-bit register access into the mapped block.
    ///
    /// # Safety
    ///
    /// Implementers must ensure that `read32`/`write32` reach a real (or
    /// faithfully emulated) register block for every naturally aligned
    /// offset below [`REGION_LEN`], and that the accesses have their
    /// architectural side effects. An access either completes or the host
    /// collapses; there is no recoverable failure at this layer.
    pub unsafe trait RegisterIo {
        /// Read the 32-bit register at `offset`.
        fn read32(&self, offset: u32) -> u32;

        /// Write `value` to the 32-bit register at `offset`.
        ///
        /// Side effect: physical register state change, observable
        /// externally (e.g. voltage on a pin).
        fn write32(&mut self, offset: u32, value: u32);
    }

    /// Exclusive handle to a host-mapped GPIO register region.
    ///
    /// The handle borrows the mapping for its own lifetime: it never
    /// unmaps, remaps, or frees the region, and the raw base pointer never
    /// leaves this module.
    pub struct MmioRegion {
        base: *mut u8,
        len: usize,
    }

    impl MmioRegion {
        /// Wrap a host-mapped register region.
        ///
        /// Fails with [`Error::HardwareFault`] if `len` cannot back the
        /// full register block ([`REGION_LEN`] bytes).
        ///
        /// # Safety
        ///
        /// `base` must point to a live mapping of at least `len` bytes of
        /// the GPIO register block, 4-byte aligned, valid for volatile
        /// reads and writes for the lifetime of the returned handle, and
        /// not accessed concurrently except as the host serializes.
        pub unsafe fn new(base: *mut u8, len: usize) -> Result<Self, Error> {
            if len < REGION_LEN {
                return Err(Error::HardwareFault);
            }
            Ok(Self { base, len })
        }

        #[inline]
        fn reg(&self, offset: u32) -> *mut u32 {
            let offset = offset as usize;
            // A bad offset here is a crate bug, not a recoverable
            // condition: collapse rather than touch a neighbouring
            // peripheral.
            assert!(offset % 4 == 0 && offset + 4 <= self.len);
            // SAFETY: in bounds of the mapping per the constructor
            // contract and the assert above.
            unsafe { self.base.add(offset) as *mut u32 }
        }
    }

    // SAFETY: offsets are bounds-checked against the mapping the
    // constructor vouched for; accesses are volatile and full-width.
    unsafe impl RegisterIo for MmioRegion {
        #[inline]
        fn read32(&self, offset: u32) -> u32 {
            // SAFETY: `reg` yields an aligned, in-bounds register pointer.
            unsafe { read_volatile(self.reg(offset)) }
        }

        #[inline]
        fn write32(&mut self, offset: u32, value: u32) {
            // SAFETY: as above; the write's hardware side effect is the
            // point.
            unsafe { write_volatile(self.reg(offset), value) }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use alloc::vec;

        #[test]
        fn rejects_a_short_mapping() {
            let mut backing = vec![0u32; REGION_LEN / 4];
            let base = backing.as_mut_ptr() as *mut u8;
            assert_eq!(
                unsafe { MmioRegion::new(base, REGION_LEN - 1) }.err(),
                Some(Error::HardwareFault)
            );
        }

        #[test]
        fn reads_and_writes_reach_the_backing_words() {
            let mut backing = vec![0u32; REGION_LEN / 4];
            backing[0x34 / 4] = 0xdead_beef;
            let base = backing.as_mut_ptr() as *mut u8;
            let mut region = unsafe { MmioRegion::new(base, REGION_LEN) }.unwrap();

            assert_eq!(region.read32(0x34), 0xdead_beef);
            region.write32(0x1C, 1 << 17);
            region.write32(0xB0, 0x55aa_55aa);
            drop(region);
            assert_eq!(backing[0x1C / 4], 1 << 17);
            assert_eq!(backing[0xB0 / 4], 0x55aa_55aa);
        }

        #[test]
        #[should_panic]
        fn unaligned_offset_collapses() {
            let mut backing = vec![0u32; REGION_LEN / 4];
            let base = backing.as_mut_ptr() as *mut u8;
            let region = unsafe { MmioRegion::new(base, REGION_LEN) }.unwrap();
            let _ = region.read32(0x1D);
        }
    }
}
