// Per-character helpers and cheap word predicates.
//
// The predicates short-circuit expensive processing when a word is already
// known to be simple (pure ASCII, BMP-only, or a number).

/// True when the character is uppercase.
pub fn is_upper(c: char) -> bool {
    c.is_uppercase()
}

/// True when the character is lowercase.
pub fn is_lower(c: char) -> bool {
    c.is_lowercase()
}

/// True when the character carries case at all. Digits, punctuation and
/// caseless scripts are neutral and never break a casing run.
pub fn is_cased(c: char) -> bool {
    c.is_uppercase() || c.is_lowercase()
}

/// Single-scalar uppercase map. Characters whose uppercase form expands
/// to multiple scalars (such as ß) are left unchanged.
pub fn simple_upper(c: char) -> char {
    let mut it = c.to_uppercase();
    match (it.next(), it.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Single-scalar lowercase map, the counterpart of [`simple_upper`].
pub fn simple_lower(c: char) -> char {
    let mut it = c.to_lowercase();
    match (it.next(), it.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// True when the text contains only ASCII bytes.
pub fn is_all_ascii(s: &str) -> bool {
    s.is_ascii()
}

/// True when every character lies in the Basic Multilingual Plane.
pub fn is_all_bmp(word: &[char]) -> bool {
    word.iter().all(|&c| (c as u32) <= 0xFFFF)
}

/// True when the word is a number: an optional leading minus sign, then
/// digit runs separated by single `.` or `,` separators, ending in a
/// digit. `"1,000.00"` is a number, `"1,,0"` and `"10."` are not.
pub fn is_number(word: &[char]) -> bool {
    let digits = match word {
        ['-', rest @ ..] => rest,
        _ => word,
    };
    if digits.is_empty() {
        return false;
    }
    let mut prev_was_digit = false;
    for &c in digits {
        if c.is_ascii_digit() {
            prev_was_digit = true;
        } else if (c == '.' || c == ',') && prev_was_digit {
            prev_was_digit = false;
        } else {
            return false;
        }
    }
    prev_was_digit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn case_predicates() {
        assert!(is_upper('A') && !is_upper('a'));
        assert!(is_lower('ä') && !is_lower('Ä'));
        assert!(is_cased('a') && is_cased('Ü'));
        assert!(!is_cased('1') && !is_cased('-'));
    }

    #[test]
    fn simple_maps() {
        assert_eq!(simple_upper('a'), 'A');
        assert_eq!(simple_lower('Ö'), 'ö');
        // ß uppercases to "SS"; the single-scalar map leaves it alone
        assert_eq!(simple_upper('ß'), 'ß');
        assert_eq!(simple_upper('1'), '1');
    }

    #[test]
    fn ascii_and_bmp() {
        assert!(is_all_ascii("plain words"));
        assert!(!is_all_ascii("naïve"));
        assert!(is_all_bmp(&chars("naïve")));
        assert!(!is_all_bmp(&chars("ok\u{1F600}")));
    }

    #[test]
    fn number_recognition() {
        assert!(is_number(&chars("54")));
        assert!(is_number(&chars("-1,000.00")));
        assert!(is_number(&chars("0")));
        assert!(!is_number(&chars("")));
        assert!(!is_number(&chars("-")));
        assert!(!is_number(&chars("1,ooo")));
        assert!(!is_number(&chars("100,,000")));
        assert!(!is_number(&chars("10.")));
        assert!(!is_number(&chars(".5")));
    }
}
