//! Display formatting for balances and addresses.

use alloy::primitives::U256;

/// Minimum fractional digits shown.
const MIN_FRACTION_DIGITS: usize = 2;
/// Maximum fractional digits shown.
const MAX_FRACTION_DIGITS: usize = 5;

/// Format a raw integer balance for display.
///
/// Scales by `decimals`, groups the integer part with thousands
/// separators, and shows between 2 and 5 fractional digits (rounding half
/// up at the fifth). The input must be the raw on-chain integer as a
/// decimal string; returns `None` if it is not.
pub fn format_units(raw: &str, decimals: u8) -> Option<String> {
    // U256 parses the empty string as zero; an absent balance is not zero
    if raw.is_empty() {
        return None;
    }
    let value: U256 = raw.parse().ok()?;

    let scale = U256::from(10u64).pow(U256::from(decimals as u64));
    let mut integer = value / scale;
    let fraction = value % scale;

    // Scale the fraction to MAX_FRACTION_DIGITS digits, rounding half up
    // on the digit below, and carry into the integer part on overflow.
    let digits = decimals as usize;
    let mut frac_str = if digits <= MAX_FRACTION_DIGITS {
        let mut s = format!("{:0width$}", fraction, width = digits);
        s.push_str(&"0".repeat(MAX_FRACTION_DIGITS - digits));
        s
    } else {
        let drop = U256::from(10u64).pow(U256::from((digits - MAX_FRACTION_DIGITS - 1) as u64));
        let with_round_digit = fraction / drop;
        let rounded = (with_round_digit + U256::from(5u64)) / U256::from(10u64);
        let cap = U256::from(10u64).pow(U256::from(MAX_FRACTION_DIGITS as u64));
        if rounded >= cap {
            integer += U256::from(1u64);
            "0".repeat(MAX_FRACTION_DIGITS)
        } else {
            format!("{:0width$}", rounded, width = MAX_FRACTION_DIGITS)
        }
    };

    // Trim trailing zeros down to the minimum width
    while frac_str.len() > MIN_FRACTION_DIGITS && frac_str.ends_with('0') {
        frac_str.pop();
    }

    Some(format!("{}.{}", group_thousands(&integer.to_string()), frac_str))
}

/// Insert comma separators into a decimal integer string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Shorten an address for display: `0x1234...abcd`.
///
/// The input comes from upstream responses verbatim, so slicing must not
/// assume ASCII.
pub fn truncate_address(address: &str) -> String {
    if address.len() <= 10 {
        return address.to_string();
    }
    match (address.get(..6), address.get(address.len() - 4..)) {
        (Some(head), Some(tail)) => format!("{}...{}", head, tail),
        _ => address.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole_amounts() {
        assert_eq!(format_units("0", 18).unwrap(), "0.00");
        assert_eq!(format_units("1000000", 6).unwrap(), "1.00");
        assert_eq!(
            format_units("1234567000000", 6).unwrap(),
            "1,234,567.00"
        );
    }

    #[test]
    fn test_format_fractional_amounts() {
        // 1.5 USDC
        assert_eq!(format_units("1500000", 6).unwrap(), "1.50");
        // 0.123456 rounds half-up at the 5th fractional digit
        assert_eq!(format_units("123456", 6).unwrap(), "0.12346");
        // 1.000001 ETH truncates to minimum digits
        assert_eq!(format_units("1000001000000000000", 18).unwrap(), "1.00");
    }

    #[test]
    fn test_format_rounding_carries_into_integer() {
        // 1.999999 with 6 decimals rounds up to 2.00
        assert_eq!(format_units("1999999", 6).unwrap(), "2.00");
    }

    #[test]
    fn test_format_small_decimals() {
        assert_eq!(format_units("5", 0).unwrap(), "5.00");
        assert_eq!(format_units("15", 1).unwrap(), "1.50");
    }

    #[test]
    fn test_format_rejects_non_integer_input() {
        assert!(format_units("1.5", 6).is_none());
        assert!(format_units("abc", 6).is_none());
        assert!(format_units("", 6).is_none());
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_truncate_address() {
        assert_eq!(
            truncate_address("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"),
            "0xf39f...2266"
        );
        assert_eq!(truncate_address("0xshort"), "0xshort");
    }

    #[test]
    fn test_truncate_address_tolerates_non_ascii_input() {
        // Upstream strings are relayed verbatim, so slicing must not panic
        // on multi-byte characters straddling the cut points
        let head_cut = "0x123é567890abcdefgh"; // é spans bytes 5..7
        assert_eq!(truncate_address(head_cut), head_cut);

        let tail_cut = "0x1234567890abcdé123"; // é spans the len-4 boundary
        assert_eq!(truncate_address(tail_cut), tail_cut);

        // Multi-byte characters away from the cuts still truncate
        assert_eq!(truncate_address("0xабвгдежзиклмнопрст"), "0xаб...ст");
    }
}
