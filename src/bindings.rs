//! Named per-pin command endpoints.
//!
//! At configuration time the host supplies an ordered list of pin numbers;
//! each becomes a binding from a stable name (`gpio<N>`) to that pin, the
//! target the single-token command form resolves against. Deduplication is
//! the caller's business: duplicates in the list produce duplicate
//! bindings, which is accepted. The table lives as long as the controller
//! configuration does, and drops as one unit; the host serializes teardown
//! against in-flight dispatch.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use log::debug;

use crate::{Error, NUM_PINS};

/// One named command endpoint bound to a pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    name: String,
    pin: u32,
}

impl Binding {
    /// The endpoint name, `gpio<N>`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The bound pin index.
    pub fn pin(&self) -> u32 {
        self.pin
    }
}

/// Binding table built from the host's requested-pin list.
pub struct BindingTable {
    entries: Vec<Binding>,
    by_name: BTreeMap<String, u32>,
}

impl BindingTable {
    /// Build one binding per requested pin, in order.
    ///
    /// Fails with [`Error::OutOfRange`] if any requested pin is outside
    /// the bank; nothing is built in that case.
    pub fn new(pins: &[u32]) -> Result<Self, Error> {
        if let Some(&bad) = pins.iter().find(|&&pin| pin >= NUM_PINS) {
            return Err(Error::OutOfRange(bad));
        }
        let mut entries = Vec::with_capacity(pins.len());
        let mut by_name = BTreeMap::new();
        for &pin in pins {
            let name = format!("gpio{pin}");
            debug!("binding {name} -> pin {pin}");
            by_name.insert(name.clone(), pin);
            entries.push(Binding { name, pin });
        }
        Ok(Self { entries, by_name })
    }

    /// Resolve an endpoint name to its pin.
    pub fn resolve(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }

    /// The bindings in request order, duplicates included.
    pub fn bindings(&self) -> &[Binding] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
