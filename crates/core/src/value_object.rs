//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**: two value objects with the same values
//! are equal. They are immutable; to "modify" one, build a new value.

/// Marker trait for value objects.
///
/// - **Value Object**: `Price(1999)`, `Email("a@b.io")`
/// - **Entity**: `Item { id: ItemId(1), .. }`
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Price(u64);
///
/// impl ValueObject for Price {}
///
/// assert_eq!(Price(100), Price(100));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
