//! Compact formatting of large counts ("1.2K", "3M").

const UNITS: [(u64, &str); 4] = [
    (1_000, "K"),
    (1_000_000, "M"),
    (1_000_000_000, "B"),
    (1_000_000_000_000, "T"),
];

/// Format a count with at most one fractional digit and a magnitude suffix.
///
/// `None` formats as `"0"`. Values below 1000 are printed as-is.
pub fn format_compact(value: Option<u64>) -> String {
    let n = match value {
        Some(n) => n,
        None => return "0".to_string(),
    };
    if n < UNITS[0].0 {
        return n.to_string();
    }

    let mut idx = UNITS
        .iter()
        .rposition(|&(size, _)| n >= size)
        .unwrap_or(0);
    let mut tenths = rounded_tenths(n, UNITS[idx].0);
    // 999_950 rounds to 1000.0K, which reads better as 1M
    if tenths >= 10_000 && idx + 1 < UNITS.len() {
        idx += 1;
        tenths = rounded_tenths(n, UNITS[idx].0);
    }

    let (whole, frac) = (tenths / 10, tenths % 10);
    if frac == 0 {
        format!("{}{}", whole, UNITS[idx].1)
    } else {
        format!("{}.{}{}", whole, frac, UNITS[idx].1)
    }
}

fn rounded_tenths(n: u64, unit: u64) -> u128 {
    let n = n as u128;
    let unit = unit as u128;
    (n * 10 + unit / 2) / unit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values_are_plain() {
        assert_eq!(format_compact(Some(0)), "0");
        assert_eq!(format_compact(Some(7)), "7");
        assert_eq!(format_compact(Some(999)), "999");
        assert_eq!(format_compact(None), "0");
    }

    #[test]
    fn thousands() {
        assert_eq!(format_compact(Some(1000)), "1K");
        assert_eq!(format_compact(Some(1234)), "1.2K");
        assert_eq!(format_compact(Some(1500)), "1.5K");
        assert_eq!(format_compact(Some(12_345)), "12.3K");
        assert_eq!(format_compact(Some(999_949)), "999.9K");
    }

    #[test]
    fn rounding_promotes_to_next_unit() {
        assert_eq!(format_compact(Some(999_950)), "1M");
        assert_eq!(format_compact(Some(1_000_000)), "1M");
        assert_eq!(format_compact(Some(2_560_000)), "2.6M");
        assert_eq!(format_compact(Some(7_000_000_000)), "7B");
    }

    #[test]
    fn huge_values_do_not_overflow() {
        assert!(format_compact(Some(u64::MAX)).ends_with('T'));
    }
}
