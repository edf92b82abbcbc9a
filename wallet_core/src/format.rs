//! Presentation helpers used by renderers of a [`crate::WalletView`].

use chrono::{DateTime, Local, TimeZone, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

pub const DEFAULT_HEAD_LEN: usize = 6;
pub const DEFAULT_TAIL_LEN: usize = 4;

/// Short date + short time, e.g. `1/2/24, 3:04 PM`
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%-m/%-d/%y, %-I:%M %p";

const ELLIPSIS: char = '…';

/// Digit grouping rules for amounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    pub group_separator: String,
    pub decimal_separator: String,
    pub max_fraction_digits: u32,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            group_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            max_fraction_digits: 3,
        }
    }
}

/// Group integer digits and cap the fraction at `max_fraction_digits`,
/// dropping trailing zeros.
pub fn format_amount(amount: Decimal, format: &NumberFormat) -> String {
    let rounded = amount
        .round_dp_with_strategy(format.max_fraction_digits, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    let digits = rounded.abs().to_string();
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }

    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(&format.group_separator);
        }
        out.push(ch);
    }

    if let Some(frac) = frac_part.filter(|f| !f.is_empty()) {
        out.push_str(&format.decimal_separator);
        out.push_str(frac);
    }
    out
}

/// Render epoch seconds in the local timezone
pub fn format_timestamp(secs: i64, pattern: &str) -> String {
    format_timestamp_in(secs, &Local, pattern)
}

/// Render epoch seconds in `tz`. Out-of-range values render as the epoch and
/// an unusable pattern falls back to RFC 3339.
pub fn format_timestamp_in<Tz>(secs: i64, tz: &Tz, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let instant: DateTime<Utc> = Utc.timestamp_opt(secs, 0).single().unwrap_or_default();
    let local = instant.with_timezone(tz);

    let mut out = String::new();
    if write!(out, "{}", local.format(pattern)).is_err() {
        return local.to_rfc3339();
    }
    out
}

/// Shorten an address to `head…tail`, e.g. `ORB.ABCDEF…1234`.
///
/// Lengths are counted in characters. Addresses no longer than
/// `head + tail + 1` are returned unchanged.
pub fn truncate_address(addr: Option<&str>, head: usize, tail: usize) -> String {
    let addr = match addr {
        Some(a) if !a.is_empty() => a,
        _ => return String::new(),
    };

    let len = addr.chars().count();
    if len <= head.saturating_add(tail).saturating_add(1) {
        return addr.to_string();
    }

    let mut out = String::with_capacity(len.min(head.saturating_add(tail)) + ELLIPSIS.len_utf8());
    out.extend(addr.chars().take(head));
    out.push(ELLIPSIS);
    out.extend(addr.chars().skip(len - tail));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_amount_groups_digits() {
        let nf = NumberFormat::default();
        assert_eq!(format_amount(dec!(1234567.891), &nf), "1,234,567.891");
        assert_eq!(format_amount(dec!(1000), &nf), "1,000");
        assert_eq!(format_amount(dec!(999), &nf), "999");
        assert_eq!(format_amount(dec!(100), &nf), "100");
        assert_eq!(format_amount(Decimal::ZERO, &nf), "0");
    }

    #[test]
    fn test_format_amount_caps_fraction() {
        let nf = NumberFormat::default();
        assert_eq!(format_amount(dec!(0.12345), &nf), "0.123");
        assert_eq!(format_amount(dec!(2.0005), &nf), "2.001");
        assert_eq!(format_amount(dec!(1.50), &nf), "1.5");
        assert_eq!(format_amount(dec!(0.0001), &nf), "0");
    }

    #[test]
    fn test_format_amount_negative() {
        let nf = NumberFormat::default();
        assert_eq!(format_amount(dec!(-1234.5), &nf), "-1,234.5");
        assert_eq!(format_amount(dec!(-0.0001), &nf), "0");
    }

    #[test]
    fn test_format_amount_custom_separators() {
        let nf = NumberFormat {
            group_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
            max_fraction_digits: 2,
        };
        assert_eq!(format_amount(dec!(1234567.891), &nf), "1.234.567,89");
    }

    #[test]
    fn test_format_timestamp_in_fixed_zone() {
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(format_timestamp_in(0, &utc, DEFAULT_TIMESTAMP_FORMAT), "1/1/70, 12:00 AM");
        assert_eq!(
            format_timestamp_in(1_700_000_000, &utc, DEFAULT_TIMESTAMP_FORMAT),
            "11/14/23, 10:13 PM"
        );

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            format_timestamp_in(1_700_000_000, &plus_two, DEFAULT_TIMESTAMP_FORMAT),
            "11/15/23, 12:13 AM"
        );
    }

    #[test]
    fn test_format_timestamp_out_of_range_is_epoch() {
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(
            format_timestamp_in(i64::MAX, &utc, DEFAULT_TIMESTAMP_FORMAT),
            "1/1/70, 12:00 AM"
        );
    }

    #[test]
    fn test_format_timestamp_local_matches_local_zone() {
        let expected = format_timestamp_in(86_400, &Local, "%Y-%m-%d %H:%M");
        assert_eq!(format_timestamp(86_400, "%Y-%m-%d %H:%M"), expected);
    }

    #[test]
    fn test_truncate_address() {
        assert_eq!(truncate_address(Some("ORB1234567890"), 6, 4), "ORB123…7890");
        assert_eq!(truncate_address(Some("abc"), 6, 4), "abc");
        assert_eq!(truncate_address(None, 6, 4), "");
        assert_eq!(truncate_address(Some(""), 6, 4), "");
    }

    #[test]
    fn test_truncate_address_boundary() {
        // 11 characters is exactly head + tail + 1
        assert_eq!(truncate_address(Some("ABCDEFGHIJK"), 6, 4), "ABCDEFGHIJK");
        assert_eq!(truncate_address(Some("ABCDEFGHIJKL"), 6, 4), "ABCDEF…IJKL");
    }

    #[test]
    fn test_truncate_address_huge_lengths() {
        assert_eq!(truncate_address(Some("ORB1234567890"), usize::MAX, usize::MAX), "ORB1234567890");
        assert_eq!(truncate_address(Some("ORB1234567890"), usize::MAX, 0), "ORB1234567890");
    }

    #[test]
    fn test_truncate_address_counts_chars() {
        let addr = "ÅÅÅÅÅÅxxxxxxØØØØ";
        assert_eq!(
            truncate_address(Some(addr), DEFAULT_HEAD_LEN, DEFAULT_TAIL_LEN),
            "ÅÅÅÅÅÅ…ØØØØ"
        );
    }
}
