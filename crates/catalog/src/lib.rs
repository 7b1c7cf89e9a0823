mod command;
mod query;

pub use command::*;
pub use query::*;

/// Parses a faction reference coming from a form field.
///
/// Empty, blank or non-numeric values mean "no faction".
pub fn parse_faction_id(value: Option<&str>) -> Option<i64> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_faction_id() {
        assert_eq!(parse_faction_id(Some("12")), Some(12));
        assert_eq!(parse_faction_id(Some(" 3 ")), Some(3));
        assert_eq!(parse_faction_id(Some("")), None);
        assert_eq!(parse_faction_id(Some("   ")), None);
        assert_eq!(parse_faction_id(Some("abc")), None);
        assert_eq!(parse_faction_id(None), None);
    }
}
