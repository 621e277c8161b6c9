//! Price calculation
//!
//! Pure functions for applying per-item discount overlays to base
//! prices. All amounts are [`Decimal`] with two fractional digits.

use rust_decimal::Decimal;

use crate::models::menu::DiscountKind;

/// Compute the discounted price for a base price and discount overlay.
///
/// Returns `None` when no discount applies (caller uses the base
/// price). Results are rounded to two decimal places and never drop
/// below zero.
///
/// - `Percent`: `base * (1 - value/100)`
/// - `Fixed`: `base - value`
pub fn effective_price(
    base: Decimal,
    kind: Option<DiscountKind>,
    value: Option<Decimal>,
) -> Option<Decimal> {
    let (kind, value) = match (kind, value) {
        (Some(k), Some(v)) => (k, v),
        _ => return None,
    };

    let hundred = Decimal::from(100);
    let result = match kind {
        DiscountKind::Percent => base * (Decimal::ONE - value / hundred),
        DiscountKind::Fixed => base - value,
    };

    Some(result.round_dp(2).max(Decimal::ZERO))
}

/// Discounted price only when it is visibly lower than the base price.
///
/// A zero-value discount produces an equal price and is not shown.
pub fn visible_discount(
    base: Decimal,
    kind: Option<DiscountKind>,
    value: Option<Decimal>,
) -> Option<Decimal> {
    effective_price(base, kind, value).filter(|e| *e < base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_fixed_discount() {
        assert_eq!(
            effective_price(dec("20.00"), Some(DiscountKind::Fixed), Some(dec("5.00"))),
            Some(dec("15.00"))
        );
        assert_eq!(
            effective_price(dec("10.00"), Some(DiscountKind::Fixed), Some(dec("15.00"))),
            Some(dec("0.00"))
        );
        assert_eq!(
            effective_price(dec("9.99"), Some(DiscountKind::Fixed), Some(dec("0.50"))),
            Some(dec("9.49"))
        );
    }

    #[test]
    fn test_percent_discount() {
        assert_eq!(
            effective_price(dec("20.00"), Some(DiscountKind::Percent), Some(dec("25"))),
            Some(dec("15.00"))
        );
        assert_eq!(
            effective_price(dec("10.00"), Some(DiscountKind::Percent), Some(dec("100"))),
            Some(dec("0.00"))
        );
        assert_eq!(
            effective_price(dec("10.00"), Some(DiscountKind::Percent), Some(dec("0"))),
            Some(dec("10.00"))
        );
    }

    #[test]
    fn test_percent_monotonically_non_increasing() {
        let base = dec("50.00");
        let mut last = base;
        for pct in 0..=100 {
            let e = effective_price(base, Some(DiscountKind::Percent), Some(Decimal::from(pct)))
                .unwrap();
            assert!(e <= last, "percent {pct} increased the price");
            assert!(e >= Decimal::ZERO);
            last = e;
        }
    }

    #[test]
    fn test_no_discount_returns_none() {
        assert_eq!(effective_price(dec("20.00"), None, None), None);
        assert_eq!(
            effective_price(dec("20.00"), Some(DiscountKind::Percent), None),
            None
        );
        assert_eq!(effective_price(dec("20.00"), None, Some(dec("5"))), None);
    }

    #[test]
    fn test_fixed_never_negative() {
        for (base, value) in [("0.00", "1.00"), ("3.50", "100.00"), ("20.00", "20.00")] {
            let e = effective_price(dec(base), Some(DiscountKind::Fixed), Some(dec(value))).unwrap();
            assert!(e >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_visible_discount_hides_equal_price() {
        // zero-value discount yields an equal price: not visible
        assert_eq!(
            visible_discount(dec("10.00"), Some(DiscountKind::Percent), Some(dec("0"))),
            None
        );
        assert_eq!(
            visible_discount(dec("10.00"), Some(DiscountKind::Fixed), Some(dec("0"))),
            None
        );
        assert_eq!(
            visible_discount(dec("10.00"), Some(DiscountKind::Fixed), Some(dec("2.50"))),
            Some(dec("7.50"))
        );
        assert_eq!(visible_discount(dec("10.00"), None, None), None);
    }
}
