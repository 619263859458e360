use crate::geofile::feature::AttributeValue;

/// Shown wherever a value needed for display is missing.
pub const PLACEHOLDER: &str = "n/a";

/// Name value that the park source data uses to mean "no name".
const UNNAMED_SENTINEL: &str = "1";

/// Resolve the display label of a feature.
///
/// The primary name wins unless it is null, blank or the "no name" sentinel `"1"`, in which
/// case the fallback identifier is displayed. If the identifier is null or blank as well the
/// placeholder is returned.
pub fn resolve_label(
    primary_name: &AttributeValue,
    fallback_identifier: &AttributeValue,
) -> String {
    non_blank(primary_name)
        .filter(|name| name.trim() != UNNAMED_SENTINEL)
        .or_else(|| non_blank(fallback_identifier))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn non_blank(value: &AttributeValue) -> Option<String> {
    value.display().filter(|text| !text.trim().is_empty())
}

/// Format a duration as `"<minutes> minutes <seconds> secondes"`.
///
/// The input is rounded to whole seconds first. Callers must not pass negative or NaN values,
/// see `format_walking_time` for the guarded variant.
pub fn format_duration(total_seconds: f64) -> String {
    let total_seconds = total_seconds.round() as u64;
    format!("{} minutes {} secondes", total_seconds / 60, total_seconds % 60)
}

/// Formatted duration, or `None` when the value is missing or negative.
pub fn format_walking_time(total_seconds: Option<f64>) -> Option<String> {
    match total_seconds {
        Some(seconds) if seconds >= 0.0 => Some(format_duration(seconds)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::geofile::feature::AttributeValue;

    use super::{format_duration, format_walking_time, resolve_label};

    #[rstest]
    #[case(AttributeValue::Null, "P42")]
    #[case(AttributeValue::from(""), "P42")]
    #[case(AttributeValue::from("1"), "P42")]
    #[case(AttributeValue::Number(1.0), "P42")]
    #[case(AttributeValue::from(" 1 "), "P42")]
    #[case(AttributeValue::from("Jardin Royal"), "Jardin Royal")]
    fn test_resolve_label(#[case] primary: AttributeValue, #[case] expected: &str) {
        assert_eq!(resolve_label(&primary, &AttributeValue::from("P42")), expected);
    }

    #[test]
    fn test_resolve_label_numeric_fallback() {
        assert_eq!(
            resolve_label(&AttributeValue::Null, &AttributeValue::Number(17.0)),
            "17"
        );
    }

    #[test]
    fn test_resolve_label_without_any_value() {
        assert_eq!(
            resolve_label(&AttributeValue::Null, &AttributeValue::Null),
            "n/a"
        );
    }

    #[rstest]
    #[case(AttributeValue::from("1"), AttributeValue::from(""))]
    #[case(AttributeValue::Null, AttributeValue::from("   "))]
    #[case(AttributeValue::from(""), AttributeValue::Null)]
    fn test_resolve_label_blank_identifier_gets_placeholder(
        #[case] primary: AttributeValue,
        #[case] identifier: AttributeValue,
    ) {
        assert_eq!(resolve_label(&primary, &identifier), "n/a");
    }

    #[rstest]
    #[case(125.0, "2 minutes 5 secondes")]
    #[case(60.0, "1 minutes 0 secondes")]
    #[case(0.0, "0 minutes 0 secondes")]
    #[case(59.6, "1 minutes 0 secondes")]
    #[case(754.2, "12 minutes 34 secondes")]
    fn test_format_duration(#[case] seconds: f64, #[case] expected: &str) {
        assert_eq!(format_duration(seconds), expected);
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(-5.0), None)]
    #[case(Some(90.0), Some("1 minutes 30 secondes"))]
    fn test_format_walking_time(#[case] seconds: Option<f64>, #[case] expected: Option<&str>) {
        assert_eq!(format_walking_time(seconds).as_deref(), expected);
    }
}
