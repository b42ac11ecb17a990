use crate::storage::RoundConfig;

/// Discounted unit price for a requested waiting term
///
/// Formula: price = max(basic_price - term_length × discount_per_term_unit, min_price)
///
/// Example:
/// - basic_price: 1.0, discount_per_term_unit: 0.01, min_price: 0.001
/// - At term_length 20: price = 1.0 - 0.2 = 0.8
/// - At term_length 200: raw subtraction goes negative, clamps to 0.001
///
/// An immediate purchase is term_length 0, i.e. the basic price. The term
/// length is deliberately unbounded: a buyer picking an absurd term gets a
/// price pinned at the floor, not an error.
pub fn price_for(config: &RoundConfig, term_length: u32) -> Option<i128> {
    let discount = i128::from(term_length).checked_mul(config.discount_per_term_unit)?;
    let discounted = config.basic_price.checked_sub(discount)?;
    Some(discounted.max(config.min_price))
}

/// Total payment required for `amount` units at `price`
pub fn required_payment(price: i128, amount: u32) -> Option<i128> {
    price.checked_mul(i128::from(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCALE: i128 = 10_000_000;

    fn config() -> RoundConfig {
        RoundConfig {
            start_time: 0,
            basic_price: SCALE,                  // 1.0
            min_price: SCALE / 1000,             // 0.001
            discount_per_term_unit: SCALE / 100, // 0.01
            term_unit: 4000,
            sync_supply: true,
        }
    }

    #[test]
    fn test_price_at_term_zero() {
        let price = price_for(&config(), 0).unwrap();
        assert_eq!(price, SCALE); // 1.0
    }

    #[test]
    fn test_price_discounts_linearly() {
        let price = price_for(&config(), 20).unwrap();
        assert_eq!(price, 8 * SCALE / 10); // 1.0 - 0.2 = 0.8
    }

    #[test]
    fn test_price_clamps_to_floor() {
        let price = price_for(&config(), 200).unwrap();
        assert_eq!(price, SCALE / 1000); // 0.001

        // far past the floor, still the floor
        let price = price_for(&config(), u32::MAX).unwrap();
        assert_eq!(price, SCALE / 1000);
    }

    #[test]
    fn test_price_monotonically_non_increasing() {
        let cfg = config();
        let mut last = price_for(&cfg, 0).unwrap();
        for term in [1u32, 50, 99, 100, 101, 1000] {
            let price = price_for(&cfg, term).unwrap();
            assert!(price <= last);
            assert!(price >= cfg.min_price);
            last = price;
        }
    }

    #[test]
    fn test_required_payment() {
        assert_eq!(required_payment(SCALE, 3), Some(3 * SCALE));
        assert_eq!(required_payment(i128::MAX, 2), None);
    }
}
