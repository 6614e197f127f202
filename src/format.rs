//! Human-readable labels for populations and rates.

/// Abbreviates a population count for axis and tooltip labels.
pub fn format_population(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{}M", one_decimal(value / 1_000_000.0))
    } else if value >= 1_000.0 {
        format!("{}K", one_decimal(value / 1_000.0))
    } else {
        format!("{value}")
    }
}

/// Growth rate as a percentage, e.g. `0.05` -> `5.0%`.
pub fn format_rate(rate: f64) -> String {
    format!("{}%", one_decimal(rate * 100.0))
}

// `{:.1}` rounds the exact binary value, ties to even; exact ties (odd
// multiples of 0.25) round away from zero instead, so 1250 reads as 1.3K
fn one_decimal(value: f64) -> String {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return format!("{:.1}", (value * 10.0).round() / 10.0);
    }
    format!("{value:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviates_thousands_and_millions() {
        assert_eq!(format_population(999.0), "999");
        assert_eq!(format_population(1_000.0), "1.0K");
        assert_eq!(format_population(1_250.0), "1.3K");
        assert_eq!(format_population(10_000.0), "10.0K");
        assert_eq!(format_population(2_345_678.0), "2.3M");
    }

    #[test]
    fn near_half_values_round_on_their_binary_value() {
        assert_eq!(format_population(1_150.0), "1.1K");
        assert_eq!(format_population(1_450.0), "1.4K");
        assert_eq!(format_population(1_650.0), "1.6K");
        assert_eq!(format_population(2_050.0), "2.0K");
        assert_eq!(format_population(3_150.0), "3.1K");
    }

    #[test]
    fn exact_ties_round_up() {
        assert_eq!(format_population(1_750.0), "1.8K");
        assert_eq!(format_population(2_250_000.0), "2.3M");
        assert_eq!(format_rate(0.0075), "0.8%");
    }

    #[test]
    fn rates_render_as_percentages() {
        assert_eq!(format_rate(0.05), "5.0%");
        assert_eq!(format_rate(0.125), "12.5%");
        assert_eq!(format_rate(0.2), "20.0%");
    }
}
