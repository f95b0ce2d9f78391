//! Artist name cleanup.
//!
//! The catalog appends a numeral in parentheses (e.g. "Boards of Canada (2)")
//! when several artists share a display name.

const DISAMBIGUATION_MARKER: &str = " (";

/// Returns the part of `name` before the first `" ("`, or `name` unchanged.
pub fn strip_disambiguation(name: &str) -> &str {
    name.split_once(DISAMBIGUATION_MARKER)
        .map_or(name, |(head, _)| head)
}

/// Renders names as `[A, B, C]`; an empty list renders as `[]`.
pub fn format_list<S: AsRef<str>>(names: &[S]) -> String {
    let joined = names
        .iter()
        .map(|name| name.as_ref())
        .collect::<Vec<&str>>()
        .join(", ");
    format!("[{joined}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_numeral_suffix() {
        assert_eq!(strip_disambiguation("Boards of Canada (2)"), "Boards of Canada");
        assert_eq!(strip_disambiguation("Low (3) (Live)"), "Low");
    }

    #[test]
    fn test_strip_unchanged_without_marker() {
        assert_eq!(strip_disambiguation("Stereolab"), "Stereolab");
        assert_eq!(strip_disambiguation("Sunn O)))"), "Sunn O)))");
        assert_eq!(strip_disambiguation("(hed) p.e."), "(hed) p.e.");
    }

    #[test]
    fn test_format_list() {
        assert_eq!(format_list(&["A", "B", "C"]), "[A, B, C]");
        assert_eq!(format_list(&["Solo"]), "[Solo]");
    }

    #[test]
    fn test_format_empty_list() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(format_list(&empty), "[]");
    }
}
