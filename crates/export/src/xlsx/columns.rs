//! Spreadsheet column letters
//!
//! Bijective base 26: `A`..`Z`, `AA`..`AZ`, `BA`.. with no zero digit.

/// Letter name of a zero-based column index
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let digit = (n - 1) % 26;
        letters.push(b'A' + digit as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Zero-based index of a column name; `None` for anything but `A-Z` letters
pub fn column_index(name: &str) -> Option<usize> {
    if name.is_empty() {
        return None;
    }
    let mut n: usize = 0;
    for byte in name.bytes() {
        let byte = byte.to_ascii_uppercase();
        if !byte.is_ascii_uppercase() {
            return None;
        }
        n = n.checked_mul(26)?.checked_add(usize::from(byte - b'A') + 1)?;
    }
    Some(n - 1)
}

/// `A1`-style reference for a zero-based column and one-based row
pub fn cell_reference(column: usize, row: usize) -> String {
    format!("{}{row}", column_letter(column))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_letters() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(51), "AZ");
        assert_eq!(column_letter(52), "BA");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn test_letters_round_trip() {
        for name in ["A", "Z", "AA", "AZ", "BA", "ZZ", "AAA"] {
            let index = column_index(name).unwrap();
            assert_eq!(column_letter(index), name);
        }
    }

    #[test]
    fn test_rejects_non_letters() {
        assert_eq!(column_index(""), None);
        assert_eq!(column_index("A1"), None);
        assert_eq!(column_index("Ä"), None);
        assert_eq!(column_index("aa"), Some(26));
    }

    #[test]
    fn test_cell_reference() {
        assert_eq!(cell_reference(2, 7), "C7");
        assert_eq!(cell_reference(27, 1), "AB1");
    }

    proptest! {
        #[test]
        fn prop_index_round_trip(index in 0usize..1_000_000) {
            prop_assert_eq!(column_index(&column_letter(index)), Some(index));
        }
    }
}
