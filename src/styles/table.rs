//! Append-only interning table shared by every positional record kind.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{Result, StyleError, TableKind};

/// Ordered sequence of distinct records plus a record -> index map.
///
/// Records are never removed or changed once stored, so an index handed
/// out by [`InternTable::intern`] stays valid for the life of the table.
#[derive(Debug, Clone)]
pub struct InternTable<T> {
    kind: TableKind,
    records: Vec<T>,
    index: HashMap<T, usize>,
}

impl<T> InternTable<T>
where
    T: Clone + Eq + Hash + Debug,
{
    pub fn new(kind: TableKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert (or reuse) a record, returning its index.
    pub fn intern(&mut self, record: T) -> usize {
        if let Some(&index) = self.index.get(&record) {
            log::trace!("reusing {} record {}", self.kind, index);
            return index;
        }

        let index = self.records.len();
        self.records.push(record.clone());
        self.index.insert(record, index);
        log::debug!("appended {} record {}", self.kind, index);
        index
    }

    /// Append a record from a loaded document without deduplication.
    ///
    /// Later calls to `intern` resolve to the first of any duplicates.
    pub fn seed(&mut self, record: T) -> usize {
        let index = self.records.len();
        self.index.entry(record.clone()).or_insert(index);
        self.records.push(record);
        index
    }

    /// Index of a structurally equal record, if stored.
    #[inline]
    pub fn find(&self, record: &T) -> Option<usize> {
        self.index.get(record).copied()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.records.get(index)
    }

    /// Get a record, failing with `StyleNotFound` when out of range.
    pub fn resolve(&self, index: usize) -> Result<&T> {
        self.records
            .get(index)
            .ok_or_else(|| StyleError::not_found(self.kind, index))
    }

    #[inline]
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in index order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.records
    }
}
