//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** — they
/// represent concepts where identity doesn't matter, only the values do.
/// A pricing rule with the same parameters is the same pricing rule; an
/// order line for the same product and quantity is the same order line.
///
/// To "modify" a value object, create a new one with the new values.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
