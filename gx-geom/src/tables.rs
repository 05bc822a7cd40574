//! Indexed-attribute tables
//!
//! Indexed slots store a table index in the vertex record instead of inline
//! components. The table itself belongs to the containing asset:
//! [`AttributeTables`] is the read-only lookup the decoder borrows, and
//! [`AttributeSink`] is the interning writer the encoder borrows when it
//! rebuilds indexed data.
//!
//! [`TableSet`] implements both. Interning deduplicates by exact bit pattern,
//! so a set seeded by decoding a stream hands the same indices back when that
//! stream's components are re-encoded.

use gx_common::SlotId;
use hashbrown::HashMap;

/// Read-only component lookup for indexed attributes.
pub trait AttributeTables {
    /// The components of entry `index` in `slot`'s table, or `None` when the
    /// index is out of bounds.
    fn lookup(&self, slot: SlotId, index: u32) -> Option<&[f32]>;

    /// Number of entries in `slot`'s table.
    fn table_len(&self, slot: SlotId) -> usize;
}

/// Interning writer for indexed attributes.
pub trait AttributeSink {
    /// Return the index of an entry with exactly these components, appending
    /// a new entry when none exists.
    fn intern(&mut self, slot: SlotId, components: &[f32]) -> u32;
}

/// Owned per-slot attribute tables with bit-pattern interning.
#[derive(Debug, Clone, Default)]
pub struct TableSet {
    entries: HashMap<SlotId, Vec<Vec<f32>>>,
    interned: HashMap<(SlotId, Vec<u32>), u32>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries of one slot's table, in index order.
    pub fn entries(&self, slot: SlotId) -> &[Vec<f32>] {
        self.entries.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    fn key(slot: SlotId, components: &[f32]) -> (SlotId, Vec<u32>) {
        (slot, components.iter().map(|c| c.to_bits()).collect())
    }
}

impl AttributeTables for TableSet {
    fn lookup(&self, slot: SlotId, index: u32) -> Option<&[f32]> {
        self.entries
            .get(&slot)?
            .get(index as usize)
            .map(Vec::as_slice)
    }

    fn table_len(&self, slot: SlotId) -> usize {
        self.entries.get(&slot).map(Vec::len).unwrap_or(0)
    }
}

impl AttributeSink for TableSet {
    fn intern(&mut self, slot: SlotId, components: &[f32]) -> u32 {
        let key = Self::key(slot, components);
        if let Some(&index) = self.interned.get(&key) {
            return index;
        }
        let table = self.entries.entry(slot).or_default();
        let index = table.len() as u32;
        table.push(components.to_vec());
        self.interned.insert(key, index);
        index
    }
}
