//! Key path segments.

/// One `.`-separated piece of a key path.
///
/// A segment made only of ASCII digits is numeric and may address a list
/// element; any segment can still address a map entry by its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Raw segment text
    text: &'a str,
    /// Parsed list index for numeric segments
    index: Option<usize>,
}

impl<'a> Segment<'a> {
    #[must_use]
    pub fn parse(text: &'a str) -> Self {
        let index = if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            // Out-of-range digit strings stay numeric in spirit but can never
            // match a list element.
            text.parse().ok()
        } else {
            None
        };
        Self { text, index }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.text
    }

    /// List index, when the segment is numeric.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.index
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        self.index.is_some()
    }
}

/// Splits a dotted key path into segments.
pub fn split_key_path(key_path: &str) -> impl Iterator<Item = Segment<'_>> {
    key_path.split('.').map(Segment::parse)
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    #[case("0", Some(0))]
    #[case("2", Some(2))]
    #[case("007", Some(7))]
    #[case("title", None)]
    #[case("2nd", None)]
    #[case("-1", None)]
    #[case("+1", None)]
    #[case("", None)]
    #[case("99999999999999999999999999", None)]
    fn segment_index(#[case] text: &str, #[case] expected: Option<usize>) {
        assert_that!(Segment::parse(text).index(), eq(expected));
    }

    #[rstest]
    fn split_key_path_keeps_order() {
        let segments: Vec<&str> = split_key_path("services.2.name").map(|s| s.as_str()).collect();

        assert_eq!(segments, vec!["services", "2", "name"]);
    }

    #[rstest]
    fn split_key_path_empty_segments() {
        let segments: Vec<&str> = split_key_path("a..b").map(|s| s.as_str()).collect();

        assert_eq!(segments, vec!["a", "", "b"]);
    }
}
