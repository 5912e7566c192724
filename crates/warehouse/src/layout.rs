//! Warehouse bounds and the deterministic cell scan order.

use serde::Serialize;

use crate::address::Coordinate;

/// The single supported zone.
pub const ZONE: char = 'A';
/// Racks per zone.
pub const RACKS: i32 = 10;
/// Sections per rack.
pub const SECTIONS: i32 = 7;
/// Shelves per section.
pub const SHELVES: i32 = 4;
/// Per-cell capacity in units.
pub const MAX_ITEMS: u32 = 10;

/// Physical layout of the warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarehouseLayout {
    zones: Vec<char>,
    racks: i32,
    sections: i32,
    shelves: i32,
    max_items: u32,
}

impl WarehouseLayout {
    /// One zone (`A`), 10 racks × 7 sections × 4 shelves, 10 units per cell.
    pub fn standard() -> Self {
        Self {
            zones: vec![ZONE],
            racks: RACKS,
            sections: SECTIONS,
            shelves: SHELVES,
            max_items: MAX_ITEMS,
        }
    }

    /// Same grid and capacity, repeated for each of `zones`.
    pub fn with_zones(zones: impl IntoIterator<Item = char>) -> Self {
        Self {
            zones: zones.into_iter().collect(),
            ..Self::standard()
        }
    }

    pub fn zones(&self) -> &[char] {
        &self.zones
    }

    pub fn max_items(&self) -> u32 {
        self.max_items
    }

    pub fn cells_per_zone(&self) -> usize {
        (self.racks * self.sections * self.shelves) as usize
    }

    pub fn total_cells(&self) -> usize {
        self.zones.len() * self.cells_per_zone()
    }

    /// Range check only; says nothing about occupancy.
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.zones.contains(&coordinate.zone())
            && (1..=self.racks).contains(&coordinate.rack())
            && (1..=self.sections).contains(&coordinate.section())
            && (1..=self.shelves).contains(&coordinate.shelf())
    }

    /// Every cell of one zone: rack ascending, then section, then shelf.
    pub fn zone_cells(&self, zone: char) -> impl Iterator<Item = Coordinate> + '_ {
        (1..=self.racks).flat_map(move |rack| {
            (1..=self.sections).flat_map(move |section| {
                (1..=self.shelves).map(move |shelf| Coordinate::new(zone, rack, section, shelf))
            })
        })
    }

    /// Every cell of the warehouse, zone by zone.
    pub fn scan(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.zones.iter().flat_map(move |&zone| self.zone_cells(zone))
    }
}

impl Default for WarehouseLayout {
    fn default() -> Self {
        Self::standard()
    }
}
