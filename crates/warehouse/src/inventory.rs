use core::fmt;

use serde::{Deserialize, Serialize};

use cellstock_core::{Aggregate, DomainError, DomainResult};

use crate::address::{Coordinate, parse_valid};
use crate::layout::WarehouseLayout;
use crate::report::{WarehouseReport, report};
use crate::store::{CellStore, InMemoryCellStore, OccupancyRecord};

/// Command: AddStock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddStock {
    pub product: String,
    pub quantity: i64,
    pub address: String,
}

/// Command: RemoveStock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveStock {
    pub product: String,
    pub quantity: i64,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryCommand {
    AddStock(AddStock),
    RemoveStock(RemoveStock),
}

/// Event: StockAdded. `resulting` is the cell quantity after the add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdded {
    pub coordinate: Coordinate,
    pub product: String,
    pub quantity: u32,
    pub resulting: u32,
}

/// Event: StockRemoved. A `remaining` of zero empties the cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRemoved {
    pub coordinate: Coordinate,
    pub product: String,
    pub quantity: u32,
    pub remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    StockAdded(StockAdded),
    StockRemoved(StockRemoved),
}

impl InventoryEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::StockAdded(_) => "warehouse.cell.stock_added",
            InventoryEvent::StockRemoved(_) => "warehouse.cell.stock_removed",
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        match self {
            InventoryEvent::StockAdded(e) => e.coordinate,
            InventoryEvent::StockRemoved(e) => e.coordinate,
        }
    }
}

/// User-facing confirmation line.
impl fmt::Display for InventoryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryEvent::StockAdded(e) => write!(
                f,
                "added {} unit(s) of '{}' to cell {}",
                e.quantity, e.product, e.coordinate
            ),
            InventoryEvent::StockRemoved(e) => write!(
                f,
                "removed {} unit(s) of '{}' from cell {}",
                e.quantity, e.product, e.coordinate
            ),
        }
    }
}

/// Aggregate root: the warehouse and every cell in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warehouse<S = InMemoryCellStore> {
    layout: WarehouseLayout,
    store: S,
    version: u64,
}

impl Warehouse<InMemoryCellStore> {
    /// Empty warehouse with the standard layout.
    pub fn new() -> Self {
        Self::with_store(WarehouseLayout::standard(), InMemoryCellStore::new())
    }
}

impl Default for Warehouse<InMemoryCellStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: CellStore> Warehouse<S> {
    pub fn with_store(layout: WarehouseLayout, store: S) -> Self {
        Self {
            layout,
            store,
            version: 0,
        }
    }

    pub fn layout(&self) -> &WarehouseLayout {
        &self.layout
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current contents of a cell, if any.
    pub fn cell(&self, coordinate: &Coordinate) -> Option<OccupancyRecord> {
        self.store.get(coordinate)
    }

    /// Put `quantity` units of `product` into the cell at `address`.
    pub fn add(&mut self, product: &str, quantity: i64, address: &str) -> DomainResult<InventoryEvent> {
        self.execute_one(InventoryCommand::AddStock(AddStock {
            product: product.to_string(),
            quantity,
            address: address.to_string(),
        }))
    }

    /// Take `quantity` units of `product` out of the cell at `address`.
    pub fn remove(&mut self, product: &str, quantity: i64, address: &str) -> DomainResult<InventoryEvent> {
        self.execute_one(InventoryCommand::RemoveStock(RemoveStock {
            product: product.to_string(),
            quantity,
            address: address.to_string(),
        }))
    }

    /// Inventory commands emit exactly one event each.
    fn execute_one(&mut self, command: InventoryCommand) -> DomainResult<InventoryEvent> {
        self.execute(&command)?
            .pop()
            .ok_or_else(|| DomainError::validation(format!("{command:?} produced no event")))
    }

    /// Full scan of the warehouse.
    pub fn report(&self) -> WarehouseReport {
        report(&self.layout, &self.store)
    }

    fn decide_add(&self, product: &str, quantity: i64, address: &str) -> DomainResult<StockAdded> {
        let coordinate = parse_valid(&self.layout, address)?;
        let requested = positive_quantity(quantity)?;
        ensure_product_name(product)?;

        let max = self.layout.max_items();
        let current = match self.store.get(&coordinate) {
            Some(record) if record.product != product => {
                return Err(DomainError::product_mismatch(record.product));
            }
            Some(record) => record.quantity,
            None => 0,
        };

        let resulting = u64::from(current) + requested;
        if resulting > u64::from(max) {
            return Err(DomainError::CapacityExceeded { max, current });
        }

        Ok(StockAdded {
            coordinate,
            product: product.to_string(),
            // Both bounded by `max` after the capacity check.
            quantity: requested as u32,
            resulting: resulting as u32,
        })
    }

    fn decide_remove(&self, product: &str, quantity: i64, address: &str) -> DomainResult<StockRemoved> {
        let coordinate = parse_valid(&self.layout, address)?;
        let requested = positive_quantity(quantity)?;
        ensure_product_name(product)?;

        let record = self.store.get(&coordinate).ok_or(DomainError::EmptyCell)?;
        if record.product != product {
            return Err(DomainError::product_mismatch(record.product));
        }
        if u64::from(record.quantity) < requested {
            return Err(DomainError::InsufficientStock {
                available: record.quantity,
                requested,
            });
        }

        // requested <= record.quantity here.
        let removed = requested as u32;
        Ok(StockRemoved {
            coordinate,
            product: product.to_string(),
            quantity: removed,
            remaining: record.quantity - removed,
        })
    }
}

fn positive_quantity(quantity: i64) -> DomainResult<u64> {
    u64::try_from(quantity)
        .ok()
        .filter(|&q| q > 0)
        .ok_or_else(|| DomainError::validation("quantity must be positive"))
}

fn ensure_product_name(product: &str) -> DomainResult<()> {
    if product.trim().is_empty() {
        return Err(DomainError::validation("product name cannot be empty"));
    }
    Ok(())
}

impl<S: CellStore> Aggregate for Warehouse<S> {
    type Command = InventoryCommand;
    type Event = InventoryEvent;
    type Error = DomainError;

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InventoryEvent::StockAdded(e) => {
                self.store
                    .put(e.coordinate, OccupancyRecord::new(e.product.clone(), e.resulting));
            }
            InventoryEvent::StockRemoved(e) if e.remaining == 0 => {
                self.store.delete(&e.coordinate);
            }
            InventoryEvent::StockRemoved(e) => {
                self.store
                    .put(e.coordinate, OccupancyRecord::new(e.product.clone(), e.remaining));
            }
        }

        self.version += 1;
        tracing::debug!(
            event = event.event_type(),
            cell = %event.coordinate(),
            version = self.version,
            occupied_cells = self.store.len(),
            "applied inventory event"
        );
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let event = match command {
            InventoryCommand::AddStock(cmd) => {
                InventoryEvent::StockAdded(self.decide_add(&cmd.product, cmd.quantity, &cmd.address)?)
            }
            InventoryCommand::RemoveStock(cmd) => InventoryEvent::StockRemoved(self.decide_remove(
                &cmd.product,
                cmd.quantity,
                &cmd.address,
            )?),
        };
        Ok(vec![event])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellstock_core::ErrorCategory;

    fn a111() -> Coordinate {
        Coordinate::new('A', 1, 1, 1)
    }

    fn quantity_at(warehouse: &Warehouse, coordinate: &Coordinate) -> Option<u32> {
        warehouse.cell(coordinate).map(|r| r.quantity)
    }

    #[test]
    fn add_to_empty_cell_creates_record() {
        let mut warehouse = Warehouse::new();
        let event = warehouse.add("Bolts", 5, "A-1-1-1").unwrap();

        assert_eq!(event.to_string(), "added 5 unit(s) of 'Bolts' to cell A-1-1-1");
        assert_eq!(warehouse.cell(&a111()), Some(OccupancyRecord::new("Bolts", 5)));
        assert_eq!(warehouse.version(), 1);
    }

    #[test]
    fn adds_accumulate_up_to_capacity() {
        let mut warehouse = Warehouse::new();
        warehouse.add("Bolts", 5, "A-1-1-1").unwrap();

        let err = warehouse.add("Bolts", 6, "A-1-1-1").unwrap_err();
        assert_eq!(err, DomainError::CapacityExceeded { max: 10, current: 5 });
        assert_eq!(quantity_at(&warehouse, &a111()), Some(5));

        warehouse.add("Bolts", 5, "A-1-1-1").unwrap();
        assert_eq!(quantity_at(&warehouse, &a111()), Some(10));
    }

    #[test]
    fn add_more_than_capacity_to_empty_cell_is_rejected() {
        let mut warehouse = Warehouse::new();
        let err = warehouse.add("Bolts", 11, "A-1-1-1").unwrap_err();
        assert_eq!(err, DomainError::CapacityExceeded { max: 10, current: 0 });
        assert!(warehouse.store().is_empty());
    }

    #[test]
    fn add_huge_quantity_does_not_overflow() {
        let mut warehouse = Warehouse::new();
        warehouse.add("Bolts", 1, "A-1-1-1").unwrap();
        let err = warehouse.add("Bolts", i64::MAX, "A-1-1-1").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Capacity);
    }

    #[test]
    fn add_different_product_is_a_conflict() {
        let mut warehouse = Warehouse::new();
        warehouse.add("Bolts", 3, "A-1-1-1").unwrap();

        let err = warehouse.add("Nuts", 1, "A-1-1-1").unwrap_err();
        assert_eq!(err, DomainError::product_mismatch("Bolts"));
        assert_eq!(warehouse.cell(&a111()), Some(OccupancyRecord::new("Bolts", 3)));
    }

    #[test]
    fn address_checks_precede_quantity_checks() {
        let mut warehouse = Warehouse::new();
        assert_eq!(
            warehouse.add("Bolts", 0, "A-1-1").unwrap_err().category(),
            ErrorCategory::Format
        );
        assert_eq!(
            warehouse.add("Bolts", -1, "A-11-1-1").unwrap_err().category(),
            ErrorCategory::Range
        );
        assert_eq!(
            warehouse.add("Bolts", 0, "A-1-1-1").unwrap_err(),
            DomainError::validation("quantity must be positive")
        );
        assert_eq!(warehouse.version(), 0);
    }

    #[test]
    fn blank_product_name_is_rejected() {
        let mut warehouse = Warehouse::new();
        let expected = DomainError::validation("product name cannot be empty");

        assert_eq!(warehouse.add("", 1, "A-1-1-1").unwrap_err(), expected);
        assert_eq!(warehouse.add("  ", 1, "A-1-1-1").unwrap_err(), expected);
        assert_eq!(warehouse.remove(" ", 1, "A-1-1-1").unwrap_err(), expected);
        assert!(warehouse.store().is_empty());
        assert_eq!(warehouse.version(), 0);
    }

    #[test]
    fn unsupported_zone_is_rejected() {
        let mut warehouse = Warehouse::new();
        let err = warehouse.add("Bolts", 1, "B-1-1-1").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Range);
    }

    #[test]
    fn remove_from_empty_cell_fails() {
        let mut warehouse = Warehouse::new();
        assert_eq!(warehouse.remove("Bolts", 1, "A-1-1-1").unwrap_err(), DomainError::EmptyCell);
    }

    #[test]
    fn remove_checks_product_then_stock() {
        let mut warehouse = Warehouse::new();
        warehouse.add("Bolts", 4, "A-1-1-1").unwrap();

        assert_eq!(
            warehouse.remove("Nuts", 9, "A-1-1-1").unwrap_err(),
            DomainError::product_mismatch("Bolts")
        );
        assert_eq!(
            warehouse.remove("Bolts", 9, "A-1-1-1").unwrap_err(),
            DomainError::InsufficientStock {
                available: 4,
                requested: 9
            }
        );
        assert_eq!(quantity_at(&warehouse, &a111()), Some(4));
    }

    #[test]
    fn partial_remove_keeps_record() {
        let mut warehouse = Warehouse::new();
        warehouse.add("Bolts", 4, "A-1-1-1").unwrap();
        let event = warehouse.remove("Bolts", 3, "A-1-1-1").unwrap();

        assert_eq!(event.to_string(), "removed 3 unit(s) of 'Bolts' from cell A-1-1-1");
        assert_eq!(quantity_at(&warehouse, &a111()), Some(1));
    }

    #[test]
    fn remove_to_zero_deletes_record() {
        let mut warehouse = Warehouse::new();
        warehouse.add("Bolts", 4, "A-1-1-1").unwrap();
        warehouse.remove("Bolts", 4, "A-1-1-1").unwrap();

        assert_eq!(warehouse.cell(&a111()), None);
        assert!(warehouse.store().is_empty());
    }

    #[test]
    fn handle_does_not_mutate() {
        let mut warehouse = Warehouse::new();
        warehouse.add("Bolts", 2, "A-1-1-1").unwrap();
        let before = warehouse.clone();

        let cmd = InventoryCommand::AddStock(AddStock {
            product: "Bolts".to_string(),
            quantity: 3,
            address: "A-1-1-1".to_string(),
        });
        let events1 = warehouse.handle(&cmd).unwrap();
        let events2 = warehouse.handle(&cmd).unwrap();

        assert_eq!(warehouse, before);
        assert_eq!(events1, events2);
    }

    #[test]
    fn execute_applies_events() {
        let mut warehouse = Warehouse::new();
        let cmd = InventoryCommand::AddStock(AddStock {
            product: "Bolts".to_string(),
            quantity: 3,
            address: "A-1-1-1".to_string(),
        });
        let events = warehouse.execute(&cmd).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(warehouse.version(), 1);
        assert_eq!(quantity_at(&warehouse, &a111()), Some(3));

        let cmd = InventoryCommand::RemoveStock(RemoveStock {
            product: "Bolts".to_string(),
            quantity: 3,
            address: "A-1-1-1".to_string(),
        });
        warehouse.execute(&cmd).unwrap();
        assert!(warehouse.store().is_empty());
        assert_eq!(warehouse.version(), 2);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use crate::layout::MAX_ITEMS;
        use proptest::prelude::*;

        fn address() -> impl Strategy<Value = String> {
            (1i32..=10, 1i32..=7, 1i32..=4).prop_map(|(r, s, h)| format!("A-{r}-{s}-{h}"))
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: add then remove of the same stock restores the prior state.
            #[test]
            fn add_then_remove_round_trips(
                seeded in prop::collection::vec((address(), 1i64..=5), 0..8),
                target in address(),
                quantity in 1i64..=10,
            ) {
                let mut warehouse = Warehouse::new();
                for (addr, q) in &seeded {
                    let _ = warehouse.add("Seed", *q, addr);
                }
                let before = warehouse.store().clone();

                if warehouse.add("Probe", quantity, &target).is_ok() {
                    warehouse.remove("Probe", quantity, &target).unwrap();
                }

                prop_assert_eq!(warehouse.store(), &before);
            }

            /// Property: no sequence of adds ever pushes a cell past capacity,
            /// and a rejected add leaves the quantity unchanged.
            #[test]
            fn adds_never_exceed_capacity(quantities in prop::collection::vec(-3i64..=12, 1..20)) {
                let mut warehouse = Warehouse::new();
                let cell = Coordinate::new('A', 1, 1, 1);

                for q in quantities {
                    let before = warehouse.cell(&cell).map(|r| r.quantity).unwrap_or(0);
                    let accepted = warehouse.add("Bolts", q, "A-1-1-1").is_ok();
                    let now = warehouse.cell(&cell).map(|r| r.quantity).unwrap_or(0);
                    if accepted {
                        prop_assert_eq!(now, before + q as u32);
                    } else {
                        prop_assert_eq!(now, before);
                    }
                    prop_assert!(now <= MAX_ITEMS);
                }
            }

            /// Property: over-removal never mutates and reports exact counts.
            #[test]
            fn over_removal_reports_counts(stocked in 1i64..=10, extra in 1i64..=50) {
                let mut warehouse = Warehouse::new();
                warehouse.add("Bolts", stocked, "A-2-2-2").unwrap();
                let before = warehouse.clone();

                let err = warehouse.remove("Bolts", stocked + extra, "A-2-2-2").unwrap_err();
                prop_assert_eq!(err, DomainError::InsufficientStock {
                    available: stocked as u32,
                    requested: (stocked + extra) as u64,
                });
                prop_assert_eq!(warehouse, before);
            }
        }
    }
}
