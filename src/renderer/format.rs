use crate::models::Sample;

/// `"value symbol"` when the symbol is non-empty, otherwise just `"value"`.
pub fn format_sample(value: &str, symbol: Option<&str>) -> String {
    match symbol {
        Some(symbol) if !symbol.is_empty() => format!("{} {}", value, symbol),
        _ => value.to_string(),
    }
}

/// Every sample formatted, joined with a single space.
pub fn format_samples(samples: &[Sample]) -> String {
    samples
        .iter()
        .map(|sample| format_sample(&sample.value, Some(&sample.symbol)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_symbol() {
        assert_eq!(format_sample("5.0", Some("mg/L")), "5.0 mg/L");
        assert_eq!(format_sample("53", Some("%")), "53 %");
    }

    #[test]
    fn test_empty_or_absent_symbol() {
        assert_eq!(format_sample("7.1", Some("")), "7.1");
        assert_eq!(format_sample("7.1", None), "7.1");
    }

    #[test]
    fn test_value_is_opaque() {
        assert_eq!(format_sample("007.100", Some("pH")), "007.100 pH");
        assert_eq!(format_sample("not a number", None), "not a number");
        assert_eq!(format_sample("", Some("mV")), " mV");
    }

    #[test]
    fn test_join() {
        let samples = vec![Sample::new("5.0", "mg/L"), Sample::new("53", "%")];
        assert_eq!(format_samples(&samples), "5.0 mg/L 53 %");

        let mixed = vec![Sample::new("1413", "μS/cm"), Sample::new("0.7", ""), Sample::new("1.0", "")];
        assert_eq!(format_samples(&mixed), "1413 μS/cm 0.7 1.0");

        assert_eq!(format_samples(&[]), "");
    }
}
