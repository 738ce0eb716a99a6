//! Product identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a product in the catalog.
///
/// Serialized as a bare JSON number so the persisted cart stays
/// `[{"id": 5, "quantity": 2}]`. Any integer is a valid id; the cart never
/// checks it against a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Create a new ID.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw integer.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<i32> for ProductId {
    fn from(id: i32) -> Self {
        Self(id.into())
    }
}

impl From<ProductId> for i64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_int() {
        let id: ProductId = 5.into();
        assert_eq!(id.get(), 5);
        assert_eq!(ProductId::from(-3i64), ProductId::new(-3));
    }

    #[test]
    fn test_id_display() {
        assert_eq!(ProductId::new(42).to_string(), "42");
    }

    #[test]
    fn test_id_serializes_as_number() {
        let json = serde_json::to_string(&ProductId::new(7)).unwrap();
        assert_eq!(json, "7");

        let id: ProductId = serde_json::from_str("12").unwrap();
        assert_eq!(id, ProductId::new(12));
    }
}
