//! Number formatting for the dashboard
//!
//! All helpers are pure: the same input always yields the same string.

/// Format with en-US thousands separators and a fixed number of decimals
pub fn format_number(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Dollar amount with two decimals
pub fn format_currency(value: f64) -> String {
    format!("${}", format_number(value, 2))
}

/// Two decimals with an explicit `+` for non-negative values
pub fn format_signed(value: f64) -> String {
    let prefix = if value >= 0.0 { "+" } else { "" };
    format!("{}{}", prefix, format_number(value, 2))
}

/// Signed percentage, e.g. `+1.45%`
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_signed(value))
}

/// Compact volume: `1.5B`, `30.0M`, `2.5K` or the plain count
pub fn format_volume(volume: u64) -> String {
    let v = volume as f64;
    if volume >= 1_000_000_000 {
        format!("{:.1}B", v / 1_000_000_000.0)
    } else if volume >= 1_000_000 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if volume >= 1_000 {
        format!("{:.1}K", v / 1_000.0)
    } else {
        volume.to_string()
    }
}

/// Volume always expressed in millions, as the summary cards show it
pub fn format_millions(volume: u64) -> String {
    format!("{:.1}M", volume as f64 / 1_000_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_groups_thousands() {
        assert_eq!(format_number(1234.5, 2), "1,234.50");
        assert_eq!(format_number(2750.5, 2), "2,750.50");
        assert_eq!(format_number(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(-1500.0, 2), "-1,500.00");
    }

    #[test]
    fn test_format_signed_and_percent() {
        assert_eq!(format_signed(2.15), "+2.15");
        assert_eq!(format_signed(-12.75), "-12.75");
        assert_eq!(format_signed(0.0), "+0.00");
        assert_eq!(format_percent(1.45), "+1.45%");
        assert_eq!(format_percent(-0.39), "-0.39%");
    }

    #[test]
    fn test_format_volume_thresholds() {
        assert_eq!(format_volume(999), "999");
        assert_eq!(format_volume(1_000), "1.0K");
        assert_eq!(format_volume(2_500), "2.5K");
        assert_eq!(format_volume(50_000_000), "50.0M");
        assert_eq!(format_volume(1_500_000_000), "1.5B");
    }

    #[test]
    fn test_format_millions() {
        assert_eq!(format_millions(160_000_000), "160.0M");
        assert_eq!(format_millions(0), "0.0M");
    }

    #[test]
    fn test_formatters_are_idempotent_on_formatted_magnitudes() {
        // Magnitudes already below the unit threshold pass through untouched
        for v in [0u64, 7, 42, 999] {
            assert_eq!(format_volume(v), v.to_string());
            assert_eq!(format_volume(v), format_volume(v));
        }

        // A value already rounded to two decimals formats to the same digits
        for v in [1.45, -0.39, 0.56, -1.48] {
            let once = format_percent(v);
            let reparsed: f64 = once.trim_end_matches('%').parse().unwrap();
            assert_eq!(format_percent(reparsed), once);
        }
    }
}
