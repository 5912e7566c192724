//! Cell storage: the single source of truth for what each cell holds.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::address::Coordinate;

/// What an occupied cell holds.
///
/// Only occupied cells have a record; `quantity` is never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyRecord {
    pub product: String,
    pub quantity: u32,
}

impl OccupancyRecord {
    pub fn new(product: impl Into<String>, quantity: u32) -> Self {
        Self {
            product: product.into(),
            quantity,
        }
    }
}

/// Key/value store of occupied cells.
pub trait CellStore {
    fn get(&self, coordinate: &Coordinate) -> Option<OccupancyRecord>;
    /// Insert or replace the record for a cell.
    fn put(&mut self, coordinate: Coordinate, record: OccupancyRecord);
    /// Remove the record for a cell; no-op if the cell is already empty.
    fn delete(&mut self, coordinate: &Coordinate);
    /// Number of occupied cells.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory cell store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryCellStore {
    cells: HashMap<Coordinate, OccupancyRecord>,
}

impl InMemoryCellStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CellStore for InMemoryCellStore {
    fn get(&self, coordinate: &Coordinate) -> Option<OccupancyRecord> {
        self.cells.get(coordinate).cloned()
    }

    fn put(&mut self, coordinate: Coordinate, record: OccupancyRecord) {
        self.cells.insert(coordinate, record);
    }

    fn delete(&mut self, coordinate: &Coordinate) {
        self.cells.remove(coordinate);
    }

    fn len(&self) -> usize {
        self.cells.len()
    }
}
