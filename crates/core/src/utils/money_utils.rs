/// Rounds a currency amount to whole cents.
///
/// Persisted series records are stored at cent precision so that re-running
/// an extension over the same inputs appends byte-identical rows.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::round_cents;

    #[test]
    fn rounds_to_whole_cents() {
        assert_eq!(round_cents(1.23456), 1.23);
        assert_eq!(round_cents(9.876), 9.88);
        assert_eq!(round_cents(-1.234), -1.23);
    }

    #[test]
    fn whole_amounts_are_untouched() {
        assert_eq!(round_cents(1200.0), 1200.0);
        assert_eq!(round_cents(0.0), 0.0);
    }
}
