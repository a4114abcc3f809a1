//! Presentation helpers for screening output.

/// Format a dollar amount with thousands separators, e.g. `S$1,234,567`.
///
/// Rounds to whole dollars.
pub fn format_sgd(amount: f64) -> String {
    if !amount.is_finite() {
        return "S$-".to_string();
    }

    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-S${grouped}")
    } else {
        format!("S${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_sgd() {
        assert_eq!(format_sgd(0.0), "S$0");
        assert_eq!(format_sgd(999.0), "S$999");
        assert_eq!(format_sgd(1000.0), "S$1,000");
        assert_eq!(format_sgd(85_000.0), "S$85,000");
        assert_eq!(format_sgd(1_234_567.4), "S$1,234,567");
        assert_eq!(format_sgd(-50_000.0), "-S$50,000");
    }

    #[test]
    fn test_format_sgd_non_finite() {
        assert_eq!(format_sgd(f64::NAN), "S$-");
    }
}
