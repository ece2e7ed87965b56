/// Spreadsheet-column label for a 1-based vertex id.
///
/// `1 -> "A"`, `26 -> "Z"`, `27 -> "AA"`, `28 -> "AB"`. Vertex `0` has no
/// label and yields an empty string.
#[must_use]
pub fn vertex_label(vertex: usize) -> String {
    let mut letters = Vec::new();
    let mut rest = vertex;
    while rest > 0 {
        rest -= 1;
        let digit = u8::try_from(rest % 26).unwrap_or_default();
        letters.push(char::from(b'A' + digit));
        rest /= 26;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::vertex_label;

    #[test]
    fn single_letters() {
        assert_eq!(vertex_label(1), "A");
        assert_eq!(vertex_label(2), "B");
        assert_eq!(vertex_label(26), "Z");
    }

    #[test]
    fn double_letters() {
        assert_eq!(vertex_label(27), "AA");
        assert_eq!(vertex_label(28), "AB");
        assert_eq!(vertex_label(52), "AZ");
        assert_eq!(vertex_label(53), "BA");
        assert_eq!(vertex_label(702), "ZZ");
        assert_eq!(vertex_label(703), "AAA");
    }

    #[test]
    fn labels_are_independent_values() {
        let a = vertex_label(1);
        let b = vertex_label(2);
        assert_eq!((a.as_str(), b.as_str()), ("A", "B"));
    }

    #[test]
    fn zero_has_no_label() {
        assert_eq!(vertex_label(0), "");
    }
}
