//! Derived per-order aggregates.
//!
//! Totals are never stored: they are recomputed from the current line items on
//! every read.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use poview_core::{DomainError, DomainResult};

use crate::order::PurchaseOrderLineItem;

/// Sum of quantities and of `unit_cost × quantity` over an order's line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderTotals {
    pub quantity: i64,
    pub total_cost: Decimal,
}

/// Single linear pass over the line items. An empty slice yields zero totals.
///
/// Expects line items of an order that passed `PurchaseOrder::validate`, which
/// rejects orders whose totals do not fit in a `Decimal`.
pub fn compute_totals(items: &[PurchaseOrderLineItem]) -> OrderTotals {
    items.iter().fold(OrderTotals::default(), |acc, item| OrderTotals {
        quantity: acc.quantity + i64::from(item.quantity),
        total_cost: acc.total_cost + line_total(item),
    })
}

/// `unit_cost × quantity` for one line.
pub fn line_total(item: &PurchaseOrderLineItem) -> Decimal {
    item.unit_cost * Decimal::from(item.quantity)
}

/// Overflow-checked `compute_totals`, for line items that have not been validated.
pub fn checked_totals(items: &[PurchaseOrderLineItem]) -> DomainResult<OrderTotals> {
    items.iter().try_fold(OrderTotals::default(), |acc, item| {
        let line = checked_line_total(item)?;
        let total_cost = acc.total_cost.checked_add(line).ok_or_else(|| {
            DomainError::validation(format!(
                "purchase order {}: total cost overflows",
                item.purchase_order_id
            ))
        })?;
        Ok(OrderTotals {
            quantity: acc.quantity + i64::from(item.quantity),
            total_cost,
        })
    })
}

/// Overflow-checked `line_total`.
pub fn checked_line_total(item: &PurchaseOrderLineItem) -> DomainResult<Decimal> {
    item.unit_cost
        .checked_mul(Decimal::from(item.quantity))
        .ok_or_else(|| DomainError::validation(format!("line item {}: line total overflows", item.id)))
}

/// Parse a string-encoded decimal unit cost (e.g. `"10.50"`).
pub fn parse_unit_cost(raw: &str) -> DomainResult<Decimal> {
    let value = Decimal::from_str(raw.trim())
        .map_err(|e| DomainError::validation(format!("invalid unit_cost {raw:?}: {e}")))?;
    if value < Decimal::ZERO {
        return Err(DomainError::validation(format!(
            "unit_cost must not be negative (got {raw})"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use poview_core::{ItemId, LineItemId, PurchaseOrderId};
    use rust_decimal_macros::dec;

    fn item(quantity: i32, unit_cost: &str) -> PurchaseOrderLineItem {
        PurchaseOrderLineItem {
            id: LineItemId::new(1),
            purchase_order_id: PurchaseOrderId::new(1),
            item_id: ItemId::new(1),
            quantity,
            unit_cost: parse_unit_cost(unit_cost).unwrap(),
        }
    }

    #[test]
    fn sums_parsed_costs_not_strings() {
        let totals = compute_totals(&[item(2, "10.50"), item(1, "5")]);
        assert_eq!(totals.quantity, 3);
        assert_eq!(totals.total_cost, dec!(26.0));
    }

    #[test]
    fn empty_order_has_zero_totals() {
        let totals = compute_totals(&[]);
        assert_eq!(totals.quantity, 0);
        assert_eq!(totals.total_cost, Decimal::ZERO);
    }

    #[test]
    fn zero_quantity_lines_contribute_nothing() {
        let totals = compute_totals(&[item(0, "99.99"), item(4, "0.25")]);
        assert_eq!(totals.quantity, 4);
        assert_eq!(totals.total_cost, dec!(1.00));
    }

    #[test]
    fn line_total_multiplies_cost_by_quantity() {
        assert_eq!(line_total(&item(3, "1.10")), dec!(3.30));
    }

    #[test]
    fn checked_totals_reject_overflow_instead_of_panicking() {
        let max = Decimal::MAX.to_string();
        assert!(matches!(
            checked_line_total(&item(2, &max)),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            checked_totals(&[item(1, &max), item(1, "1")]),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(checked_totals(&[item(1, &max)]).unwrap().total_cost, Decimal::MAX);
    }

    #[test]
    fn parse_unit_cost_rejects_garbage_and_negatives() {
        assert!(matches!(parse_unit_cost("ten"), Err(DomainError::Validation(_))));
        assert!(matches!(parse_unit_cost("-1.00"), Err(DomainError::Validation(_))));
        assert_eq!(parse_unit_cost(" 5 ").unwrap(), dec!(5));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: totals equal the independent per-line sums over parsed decimals.
            #[test]
            fn totals_match_independent_sum(
                lines in prop::collection::vec((0i32..10_000, 0u32..1_000_000u32), 0..40)
            ) {
                let items: Vec<PurchaseOrderLineItem> = lines
                    .iter()
                    .map(|(qty, cents)| item(*qty, &Decimal::new(i64::from(*cents), 2).to_string()))
                    .collect();

                let totals = compute_totals(&items);
                prop_assert_eq!(checked_totals(&items).unwrap(), totals);

                let expected_qty: i64 = lines.iter().map(|(q, _)| i64::from(*q)).sum();
                let expected_cost: Decimal = lines
                    .iter()
                    .map(|(q, c)| Decimal::new(i64::from(*c), 2) * Decimal::from(*q))
                    .sum();

                prop_assert_eq!(totals.quantity, expected_qty);
                prop_assert_eq!(totals.total_cost, expected_cost);
            }
        }
    }
}
