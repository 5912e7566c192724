//! Occupancy reporting: a full, deterministic scan of every cell.

use core::fmt;

use serde::Serialize;

use crate::address::Coordinate;
use crate::layout::WarehouseLayout;
use crate::store::CellStore;

/// One occupied cell in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupiedCell {
    pub coordinate: Coordinate,
    pub product: String,
    pub quantity: u32,
}

/// Occupancy of a single zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneOccupancy {
    pub zone: char,
    pub occupied: usize,
    pub total: usize,
    pub occupancy_percent: f64,
}

/// Snapshot of the whole warehouse.
///
/// `occupied` and `empty` are in scan order (zone, rack, section, shelf).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarehouseReport {
    pub occupied_cells: usize,
    pub total_cells: usize,
    pub total_units: u64,
    pub occupancy_percent: f64,
    pub zones: Vec<ZoneOccupancy>,
    pub occupied: Vec<OccupiedCell>,
    pub empty: Vec<Coordinate>,
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / whole as f64
}

/// Scan every cell of `layout` against `store`.
pub fn report<S: CellStore + ?Sized>(layout: &WarehouseLayout, store: &S) -> WarehouseReport {
    let mut zones = Vec::with_capacity(layout.zones().len());
    let mut occupied = Vec::new();
    let mut empty = Vec::new();
    let mut total_units = 0u64;

    for &zone in layout.zones() {
        let mut zone_occupied = 0;
        for coordinate in layout.zone_cells(zone) {
            match store.get(&coordinate) {
                Some(record) => {
                    zone_occupied += 1;
                    total_units += u64::from(record.quantity);
                    occupied.push(OccupiedCell {
                        coordinate,
                        product: record.product,
                        quantity: record.quantity,
                    });
                }
                None => empty.push(coordinate),
            }
        }

        let total = layout.cells_per_zone();
        zones.push(ZoneOccupancy {
            zone,
            occupied: zone_occupied,
            total,
            occupancy_percent: percent(zone_occupied, total),
        });
    }

    let total_cells = layout.total_cells();
    WarehouseReport {
        occupied_cells: occupied.len(),
        total_cells,
        total_units,
        occupancy_percent: percent(occupied.len(), total_cells),
        zones,
        occupied,
        empty,
    }
}

impl WarehouseReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for WarehouseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GENERAL INFORMATION")?;
        writeln!(f, "Warehouse occupancy: {:.2}%", self.occupancy_percent)?;
        writeln!(f, "Occupied cells: {} of {}", self.occupied_cells, self.total_cells)?;
        writeln!(f, "Total units: {}", self.total_units)?;

        writeln!(f)?;
        writeln!(f, "ZONE OCCUPANCY")?;
        for zone in &self.zones {
            writeln!(f, "Zone {}: {:.2}%", zone.zone, zone.occupancy_percent)?;
        }

        writeln!(f)?;
        writeln!(f, "OCCUPIED CELLS")?;
        if self.occupied.is_empty() {
            writeln!(f, "No occupied cells")?;
        }
        for cell in &self.occupied {
            writeln!(f, "{}: {}, {} unit(s)", cell.coordinate, cell.product, cell.quantity)?;
        }

        writeln!(f)?;
        writeln!(f, "EMPTY CELLS")?;
        if self.empty.is_empty() {
            writeln!(f, "No empty cells")?;
        }
        for coordinate in &self.empty {
            writeln!(f, "{coordinate}")?;
        }
        Ok(())
    }
}
