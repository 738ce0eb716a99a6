//! Cart line items.

use serde::{Deserialize, Serialize};

use crate::ProductId;

/// A product in the cart and how many of it.
///
/// A cart holds at most one line item per product, and a line item only
/// exists while its quantity is positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineItem {
    /// Product being bought.
    pub id: ProductId,
    /// Quantity, always at least 1.
    pub quantity: i64,
}

impl LineItem {
    /// A line item for a single unit of `id`.
    pub fn new(id: impl Into<ProductId>) -> Self {
        Self {
            id: id.into(),
            quantity: 1,
        }
    }

    /// The same line item with `quantity` replaced.
    pub fn with_quantity(self, quantity: i64) -> Self {
        Self { quantity, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_at_one() {
        let item = LineItem::new(3);
        assert_eq!(item.id, ProductId::new(3));
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_wire_format() {
        let item = LineItem::new(5).with_quantity(2);
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"id":5,"quantity":2}"#);
    }
}
