/// Number of decimals kept when writing coordinates and sizes
pub const PRECISION_DECIMALS: i32 = 4;

/// Format a number rounded to [`PRECISION_DECIMALS`], without trailing zeros.
///
/// Negative zero is written as `0` so that output stays byte-stable.
pub fn format_number(value: f64) -> String {
    let factor = 10f64.powi(PRECISION_DECIMALS);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{:.*}", PRECISION_DECIMALS as usize, rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Round to two decimals, used for quantitative tick label values
pub fn round_label(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2.0, "2")]
    #[case(0.5, "0.5")]
    #[case(-1.234_56, "-1.2346")]
    #[case(0.000_01, "0")]
    #[case(-0.0, "0")]
    #[case(10.0, "10")]
    fn test_format_number(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_number(value), expected);
    }

    #[test]
    fn test_round_label() {
        assert_eq!(round_label(3.14159), 3.14);
        assert_eq!(round_label(4.0), 4.0);
    }
}
