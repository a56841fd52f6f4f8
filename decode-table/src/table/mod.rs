//! Merging and validation of decode table entries.
//!
//! The [`TableEmitter`] collects entries from every source first and only
//! produces a [`DecodeTable`] once the whole batch has been checked for opcode
//! uniqueness. A collision aborts generation; no partial table is returned.
use std::collections::{btree_map, BTreeMap};
use std::fmt;

use tracing::{debug, instrument, warn};

use crate::error::GenerationError;
use crate::families::Family;
use crate::operation::OperationDescriptor;

/// One opcode and what it does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DecodeTableEntry {
    pub opcode: u8,
    pub descriptor: OperationDescriptor,
}

impl DecodeTableEntry {
    pub const fn new(opcode: u8, descriptor: OperationDescriptor) -> Self {
        Self { opcode, descriptor }
    }
}

/// Where an entry came from, reported on collisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntrySource {
    Family(Family),
    Irregular,
}

impl fmt::Display for EntrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Family(family) => write!(f, "family `{family}`"),
            Self::Irregular => f.write_str("irregular literal"),
        }
    }
}

/// Accumulates entries and validates them as one batch.
#[derive(Debug, Default)]
pub struct TableEmitter {
    pending: Vec<(EntrySource, DecodeTableEntry)>,
}

impl TableEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source: EntrySource, entry: DecodeTableEntry) {
        self.pending.push((source, entry));
    }

    pub fn extend<I>(&mut self, source: EntrySource, entries: I)
    where
        I: IntoIterator<Item = DecodeTableEntry>,
    {
        self.pending
            .extend(entries.into_iter().map(|entry| (source, entry)));
    }

    /// Entries collected so far, in insertion order
    pub fn pending(&self) -> &[(EntrySource, DecodeTableEntry)] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Checks every opcode is produced exactly once and builds the table.
    #[instrument(skip(self), fields(pending = self.pending.len()), level = "debug")]
    pub fn emit(self) -> Result<DecodeTable, GenerationError> {
        let mut claimed: [Option<EntrySource>; 256] = [None; 256];
        for (source, entry) in &self.pending {
            let slot = &mut claimed[entry.opcode as usize];
            if let Some(first) = *slot {
                warn!(
                    opcode = entry.opcode,
                    %first,
                    second = %source,
                    "opcode collision, aborting table generation"
                );
                return Err(GenerationError::OpcodeCollision {
                    opcode: entry.opcode,
                    first,
                    second: *source,
                });
            }
            *slot = Some(*source);
        }

        let entries: BTreeMap<u8, OperationDescriptor> = self
            .pending
            .into_iter()
            .map(|(_, entry)| (entry.opcode, entry.descriptor))
            .collect();
        debug!(entries = entries.len(), "decode table emitted");
        Ok(DecodeTable { entries })
    }
}

/// Validated, immutable opcode lookup for one instruction group.
///
/// Opcodes absent from the table belong to other instruction groups.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DecodeTable {
    entries: BTreeMap<u8, OperationDescriptor>,
}

impl DecodeTable {
    pub fn get(&self, opcode: u8) -> Option<&OperationDescriptor> {
        self.entries.get(&opcode)
    }

    pub fn contains(&self, opcode: u8) -> bool {
        self.entries.contains_key(&opcode)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending opcode order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Opcodes in ascending order
    pub fn opcodes(&self) -> impl Iterator<Item = u8> + '_ {
        self.entries.keys().copied()
    }
}

impl<'a> IntoIterator for &'a DecodeTable {
    type Item = DecodeTableEntry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over a [`DecodeTable`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, u8, OperationDescriptor>,
}

impl Iterator for Iter<'_> {
    type Item = DecodeTableEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(&opcode, &descriptor)| DecodeTableEntry::new(opcode, descriptor))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

#[cfg(test)]
mod tests;
