//! Unit conversions between base units and display amounts

use crate::error::RelayError;
use alloy::primitives::U256;

/// Decimals of ether
pub const ETHER_DECIMALS: usize = 18;

/// Render `value / 10^decimals` as an exact decimal string.
///
/// Trailing zeros of the fraction are dropped, so `1.500` prints as `1.5`
/// and a whole amount prints without a point.
pub fn format_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }

    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals + 1 - digits.len()), digits)
    } else {
        digits
    };

    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}

/// Parse a decimal ether amount (e.g. `"1"`, `"0.25"`) into wei
pub fn parse_ether(amount: &str) -> Result<U256, RelayError> {
    let invalid = || RelayError::InvalidAmount(amount.to_string());
    let trimmed = amount.trim();

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if fraction.len() > ETHER_DECIMALS {
        return Err(invalid());
    }

    let padded_fraction = format!("{:0<width$}", fraction, width = ETHER_DECIMALS);
    let raw = format!("{}{}", whole, padded_fraction);
    let raw = raw.trim_start_matches('0');
    if raw.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(raw, 10).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ether(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18))
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(U256::from(1_500_000_000_000_000_000u128), 18), "1.5");
        assert_eq!(format_units(ether(1), 18), "1");
        assert_eq!(format_units(U256::ZERO, 18), "0");
        assert_eq!(format_units(U256::from(5), 2), "0.05");
        assert_eq!(format_units(U256::from(42), 0), "42");
        assert_eq!(format_units(U256::from(1), 18), "0.000000000000000001");
        assert_eq!(format_units(U256::from(123_456_789u64), 6), "123.456789");
    }

    #[test]
    fn test_format_units_matches_division() {
        // exact v / 10^d for a spread of decimals
        for v in [U256::ZERO, U256::from(7u64), U256::from(987_654_321_000u64), U256::from(1_000_000u64)] {
            for d in 0u8..=20 {
                let divisor = U256::from(10u64).pow(U256::from(d));
                let whole = (v / divisor).to_string();
                let remainder = (v % divisor).to_string();
                let fraction = format!("{:0>width$}", remainder, width = d as usize);
                let fraction = fraction.trim_end_matches('0');

                let expected = if fraction.is_empty() {
                    whole
                } else {
                    format!("{}.{}", whole, fraction)
                };
                assert_eq!(format_units(v, d), expected, "v={} d={}", v, d);
            }
        }
    }

    #[test]
    fn test_format_units_max_value() {
        let rendered = format_units(U256::MAX, 18);
        assert!(rendered.starts_with("115792089237316195423570985008687907853269984665640564039457"));
        assert!(rendered.contains('.'));
    }

    #[test]
    fn test_parse_ether() {
        assert_eq!(parse_ether("1").unwrap(), ether(1));
        assert_eq!(parse_ether("0.5").unwrap(), U256::from(500_000_000_000_000_000u128));
        assert_eq!(parse_ether(".25").unwrap(), U256::from(250_000_000_000_000_000u128));
        assert_eq!(parse_ether("2.").unwrap(), ether(2));
        assert_eq!(parse_ether(" 3 ").unwrap(), ether(3));
        assert_eq!(parse_ether("0").unwrap(), U256::ZERO);
        assert_eq!(parse_ether("0.000000000000000001").unwrap(), U256::from(1));
    }

    #[test]
    fn test_parse_ether_rejects_garbage() {
        for bad in ["", ".", "abc", "-1", "1e18", "1.2.3", "0.0000000000000000001", "1,5"] {
            assert!(
                matches!(parse_ether(bad), Err(RelayError::InvalidAmount(_))),
                "accepted {:?}",
                bad
            );
        }
    }
}
