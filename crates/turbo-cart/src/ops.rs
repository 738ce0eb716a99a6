//! Pure cart operations.
//!
//! Each mutation takes the current snapshot and returns a new one. The input
//! is never modified, so the container can compare old and new snapshots to
//! decide whether anything changed.

use crate::{LineItem, ProductId};

/// Quantity of `id` in `items`, or 0 if it is not in the cart.
pub fn quantity_of(items: &[LineItem], id: ProductId) -> i64 {
    items
        .iter()
        .find(|item| item.id == id)
        .map_or(0, |item| item.quantity)
}

/// Sum of all quantities, saturating at `i64::MAX`.
pub fn total_quantity(items: &[LineItem]) -> i64 {
    items
        .iter()
        .fold(0i64, |acc, item| acc.saturating_add(item.quantity))
}

/// Add one unit of `id`, appending a new line item if needed.
pub fn increase(items: &[LineItem], id: ProductId) -> Vec<LineItem> {
    if !items.iter().any(|item| item.id == id) {
        let mut next = items.to_vec();
        next.push(LineItem::new(id));
        return next;
    }

    items
        .iter()
        .map(|item| {
            if item.id == id {
                item.with_quantity(item.quantity.saturating_add(1))
            } else {
                *item
            }
        })
        .collect()
}

/// Take one unit of `id` away, dropping the line item when it reaches zero.
///
/// Unknown ids leave the snapshot unchanged.
pub fn decrease(items: &[LineItem], id: ProductId) -> Vec<LineItem> {
    if quantity_of(items, id) == 1 {
        return remove(items, id);
    }

    items
        .iter()
        .map(|item| {
            if item.id == id {
                item.with_quantity(item.quantity - 1)
            } else {
                *item
            }
        })
        .collect()
}

/// Drop any line item for `id`.
pub fn remove(items: &[LineItem], id: ProductId) -> Vec<LineItem> {
    items.iter().filter(|item| item.id != id).copied().collect()
}

/// Restore the line item invariants on a snapshot read from outside.
///
/// Line items with a non-positive quantity are dropped. Repeated ids are
/// merged into the first occurrence with their quantities summed.
pub fn normalize(items: &[LineItem]) -> Vec<LineItem> {
    let mut next: Vec<LineItem> = Vec::with_capacity(items.len());
    for item in items.iter().filter(|item| item.quantity > 0) {
        match next.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None => next.push(*item),
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, quantity: i64) -> LineItem {
        LineItem::new(id).with_quantity(quantity)
    }

    fn pid(id: i64) -> ProductId {
        ProductId::new(id)
    }

    #[test]
    fn test_quantity_of() {
        let items = [item(1, 2), item(2, 5)];
        assert_eq!(quantity_of(&items, pid(2)), 5);
        assert_eq!(quantity_of(&items, pid(3)), 0);
    }

    #[test]
    fn test_increase_appends_new_item_last() {
        let items = [item(1, 2)];
        assert_eq!(increase(&items, pid(9)), vec![item(1, 2), item(9, 1)]);
    }

    #[test]
    fn test_increase_keeps_position() {
        let items = [item(1, 2), item(2, 1), item(3, 1)];
        assert_eq!(
            increase(&items, pid(2)),
            vec![item(1, 2), item(2, 2), item(3, 1)]
        );
    }

    #[test]
    fn test_increase_saturates() {
        let items = [item(1, i64::MAX)];
        assert_eq!(increase(&items, pid(1)), vec![item(1, i64::MAX)]);
    }

    #[test]
    fn test_decrease_removes_last_unit() {
        let items = [item(1, 1), item(2, 4)];
        assert_eq!(decrease(&items, pid(1)), vec![item(2, 4)]);
    }

    #[test]
    fn test_decrease_decrements_only_target() {
        let items = [item(1, 3), item(2, 4)];
        assert_eq!(decrease(&items, pid(2)), vec![item(1, 3), item(2, 3)]);
    }

    #[test]
    fn test_decrease_unknown_id_is_noop() {
        let items = [item(1, 3)];
        assert_eq!(decrease(&items, pid(-7)), items.to_vec());
    }

    #[test]
    fn test_remove() {
        let items = [item(1, 3), item(2, 1)];
        assert_eq!(remove(&items, pid(1)), vec![item(2, 1)]);
        assert_eq!(remove(&items, pid(5)), items.to_vec());
    }

    #[test]
    fn test_input_is_untouched() {
        let items = vec![item(1, 1)];
        let _ = increase(&items, pid(1));
        let _ = decrease(&items, pid(1));
        assert_eq!(items, vec![item(1, 1)]);
    }

    #[test]
    fn test_total_quantity_saturates() {
        let items = vec![LineItem::new(1).with_quantity(i64::MAX), LineItem::new(2)];
        assert_eq!(total_quantity(&items), i64::MAX);
        assert_eq!(total_quantity(&[]), 0);
    }

    #[test]
    fn test_normalize() {
        let items = [item(1, 2), item(2, 0), item(1, 3), item(3, -1), item(4, 1)];
        assert_eq!(normalize(&items), vec![item(1, 5), item(4, 1)]);
    }

    #[test]
    fn test_normalize_clean_snapshot_is_identity() {
        let items = vec![item(3, 1), item(1, 2)];
        assert_eq!(normalize(&items), items);
    }
}
