//! Cell address codec: `<Zone>-<rack>-<section>-<shelf>`, e.g. `A-1-1-1`.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use cellstock_core::{DomainError, DomainResult, ValueObject};

use crate::layout::WarehouseLayout;

/// Address of a single storage cell.
///
/// Serializes as its textual form so reports read the same in JSON and text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Coordinate {
    zone: char,
    rack: i32,
    section: i32,
    shelf: i32,
}

impl Coordinate {
    pub const fn new(zone: char, rack: i32, section: i32, shelf: i32) -> Self {
        Self {
            zone,
            rack,
            section,
            shelf,
        }
    }

    pub fn zone(&self) -> char {
        self.zone
    }

    pub fn rack(&self) -> i32 {
        self.rack
    }

    pub fn section(&self) -> i32 {
        self.section
    }

    pub fn shelf(&self) -> i32 {
        self.shelf
    }
}

impl ValueObject for Coordinate {}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}-{}", self.zone, self.rack, self.section, self.shelf)
    }
}

impl FromStr for Coordinate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl From<Coordinate> for String {
    fn from(value: Coordinate) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Coordinate {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse(&value)
    }
}

/// Parse the textual form of an address.
///
/// Exactly four `-`-separated fields: one uppercase ASCII letter, then three
/// integers. Bounds are not checked here; see [`validate`].
pub fn parse(text: &str) -> DomainResult<Coordinate> {
    let fields: Vec<&str> = text.split('-').collect();
    let [zone, rack, section, shelf] = fields.as_slice() else {
        return Err(DomainError::format(format!(
            "cell address '{text}' must have 4 fields, found {}",
            fields.len()
        )));
    };

    let mut chars = zone.chars();
    let zone = match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => c,
        _ => {
            return Err(DomainError::format(format!(
                "zone '{zone}' in '{text}' must be a single uppercase letter"
            )));
        }
    };

    Ok(Coordinate::new(
        zone,
        parse_number(rack, "rack", text)?,
        parse_number(section, "section", text)?,
        parse_number(shelf, "shelf", text)?,
    ))
}

fn parse_number(field: &str, name: &str, text: &str) -> DomainResult<i32> {
    field
        .parse::<i32>()
        .map_err(|e| DomainError::format(format!("{name} '{field}' in '{text}': {e}")))
}

/// Pure range check against the warehouse bounds.
pub fn validate(layout: &WarehouseLayout, coordinate: &Coordinate) -> bool {
    layout.contains(coordinate)
}

/// Parse, then reject coordinates outside the layout.
pub fn parse_valid(layout: &WarehouseLayout, text: &str) -> DomainResult<Coordinate> {
    let coordinate = parse(text)?;
    if !validate(layout, &coordinate) {
        return Err(DomainError::range(format!(
            "cell {coordinate} is outside the warehouse"
        )));
    }
    Ok(coordinate)
}
