//! Session-scoped ordered record store.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::normalize::apply_line_numbers;
use crate::spec::{PprError, SpecPprRecord, SpecStoreSnapshot};

/// Ordered, mutable record sequence.
///
/// Every structural mutation renumbers the whole sequence, so line numbers
/// are always `00001..` without gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowStore {
    l_records: Vec<SpecPprRecord>,
}

impl RowStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current records in store order.
    pub fn records(&self) -> &[SpecPprRecord] {
        &self.l_records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.l_records.len()
    }

    /// Whether the store holds no record.
    pub fn is_empty(&self) -> bool {
        self.l_records.is_empty()
    }

    /// Presentation flag for dependent actions.
    pub fn has_data(&self) -> bool {
        !self.is_empty()
    }

    /// First record, which names the export file.
    pub fn first(&self) -> Option<&SpecPprRecord> {
        self.l_records.first()
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> SpecStoreSnapshot {
        SpecStoreSnapshot {
            records: self.l_records.clone(),
            has_data: self.has_data(),
        }
    }

    /// Replace the whole content.
    pub fn replace_all(&mut self, records: Vec<SpecPprRecord>) {
        self.l_records = records;
        self.renumber();
    }

    /// Remove the record at a 0-based `position`.
    pub fn delete_at(&mut self, position: usize) -> Result<SpecPprRecord, PprError> {
        if position >= self.l_records.len() {
            warn!(position, len = self.l_records.len(), "delete_at out of range");
            return Err(PprError::IndexOutOfRange {
                position,
                len: self.l_records.len(),
            });
        }

        let record = self.l_records.remove(position);
        self.renumber();
        Ok(record)
    }

    /// Remove all records at `positions` in one batch.
    ///
    /// Positions refer to the state before the batch; duplicates collapse.
    /// The batch is rejected as a whole if any position is out of range.
    pub fn delete_many(&mut self, positions: &[usize]) -> Result<usize, PprError> {
        if positions.is_empty() {
            return Err(PprError::NoSelection);
        }

        let set_positions: BTreeSet<usize> = positions.iter().copied().collect();
        if let Some(&n_pos_max) = set_positions.last()
            && n_pos_max >= self.l_records.len()
        {
            warn!(
                position = n_pos_max,
                len = self.l_records.len(),
                "delete_many out of range"
            );
            return Err(PprError::IndexOutOfRange {
                position: n_pos_max,
                len: self.l_records.len(),
            });
        }

        let mut n_pos_cursor = 0;
        self.l_records.retain(|_| {
            let if_keep = !set_positions.contains(&n_pos_cursor);
            n_pos_cursor += 1;
            if_keep
        });
        self.renumber();
        Ok(set_positions.len())
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.l_records.clear();
    }

    fn renumber(&mut self) {
        apply_line_numbers(&mut self.l_records);
        debug!(len = self.l_records.len(), "renumbered store");
    }
}
