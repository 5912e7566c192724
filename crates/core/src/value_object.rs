//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two cell
/// coordinates naming the same zone, rack, section and shelf are the same
/// coordinate, which is what lets them key a map.
///
/// The trait requires:
/// - **Clone**: value objects are cheap to copy
/// - **Eq + Hash**: comparison and hashing cover every field
/// - **Debug**: helpful for logging and tests
pub trait ValueObject: Clone + Eq + core::hash::Hash + core::fmt::Debug {}
