//! Warehouse cell inventory domain.
//!
//! This crate contains the business rules for a sparse grid of addressed
//! storage cells, implemented purely as deterministic domain logic (no
//! terminal IO, no persistence).

pub mod address;
pub mod inventory;
pub mod layout;
pub mod report;
pub mod store;

pub use address::{Coordinate, parse, parse_valid, validate};
pub use inventory::{
    AddStock, InventoryCommand, InventoryEvent, RemoveStock, StockAdded, StockRemoved, Warehouse,
};
pub use layout::{MAX_ITEMS, RACKS, SECTIONS, SHELVES, WarehouseLayout, ZONE};
pub use report::{OccupiedCell, WarehouseReport, ZoneOccupancy};
pub use store::{CellStore, InMemoryCellStore, OccupancyRecord};
