// Word casing classification and locale-aware case transforms.
//
// The classifier decides which alternate-casing variants of a surface word
// are worth testing against the affix tables. The transforms take an
// explicit locale value; there is no ambient locale state anywhere in the
// engine.

use crate::character::{is_lower, is_upper, simple_lower, simple_upper};

/// Casing shape of a word, ignoring neutral (caseless) characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Casing {
    /// All lower case or neutral, e.g. "lowercase" or "123".
    Small,
    /// First letter upper case, rest lower, e.g. "Initcap".
    InitCapital,
    /// All upper case, e.g. "UPPERCASE" or "ALL4ONE".
    AllCapital,
    /// Lower start with internal capitals, e.g. "camelCase".
    Camel,
    /// Upper start with internal capitals, e.g. "PascalCase".
    Pascal,
}

/// Locale handle for case mapping.
///
/// Case mapping is not a fixed per-character table: Turkic languages pair
/// the dotted and dotless i differently from every other Latin-script
/// language. Only the distinctions the engine needs are modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// Default Unicode case mapping.
    #[default]
    Root,
    /// Turkish/Azerbaijani: i maps to İ and I maps to ı.
    Turkic,
}

/// Classify the casing shape of a word.
///
/// Caseless characters are neutral: they neither establish nor break a
/// run of uniform casing. Camel and Pascal are distinguished from the
/// uniform classes only when an internal character's case differs from
/// the run established by the first character.
pub fn classify_casing(word: &[char]) -> Casing {
    let upper = word.iter().filter(|&&c| is_upper(c)).count();
    if upper == 0 {
        return Casing::Small;
    }
    let first_capital = word.first().is_some_and(|&c| is_upper(c));
    if first_capital && upper == 1 {
        return Casing::InitCapital;
    }
    let lower = word.iter().filter(|&&c| is_lower(c)).count();
    if lower == 0 {
        return Casing::AllCapital;
    }
    if first_capital {
        Casing::Pascal
    } else {
        Casing::Camel
    }
}

/// Whether position `i` begins a new component of a compound word with
/// non-neutral uppercase.
///
/// Used to decide whether an internal capital is linguistically expected
/// (a compound boundary, "weekDays") rather than an error signal. The
/// lowercase-after-capitals branch covers boundaries like "XMLfile",
/// where the new component starts lowercase after an uppercase run.
pub fn has_uppercase_at_compound_word_boundary(word: &[char], i: usize) -> bool {
    if i == 0 || i >= word.len() {
        return false;
    }
    if is_upper(word[i]) {
        is_lower(word[i - 1])
    } else if is_lower(word[i]) && is_upper(word[i - 1]) {
        i >= 2 && is_upper(word[i - 2])
    } else {
        false
    }
}

/// Uppercase a whole word under the given locale. Uses the full Unicode
/// mapping, so the result may be longer than the input (ß becomes SS).
pub fn to_upper(word: &str, locale: Locale) -> String {
    let mut out = String::with_capacity(word.len());
    for c in word.chars() {
        match (locale, c) {
            (Locale::Turkic, 'i') => out.push('\u{0130}'),
            (Locale::Turkic, '\u{0131}') => out.push('I'),
            _ => out.extend(c.to_uppercase()),
        }
    }
    out
}

/// Lowercase a whole word under the given locale.
pub fn to_lower(word: &str, locale: Locale) -> String {
    let mut out = String::with_capacity(word.len());
    for c in word.chars() {
        match (locale, c) {
            (Locale::Turkic, 'I') => out.push('\u{0131}'),
            (Locale::Turkic, '\u{0130}') => out.push('i'),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Titlecase a word: first character upper, rest lower.
pub fn to_title(word: &str, locale: Locale) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.push(simple_upper_locale(first, locale));
            out.push_str(&to_lower(chars.as_str(), locale));
            out
        }
        None => String::new(),
    }
}

/// Lowercase the single character at `i`, in place. Uses the simple
/// single-scalar mapping so the word length never changes.
pub fn to_lower_char_at(word: &mut [char], i: usize, locale: Locale) {
    if let Some(c) = word.get_mut(i) {
        *c = simple_lower_locale(*c, locale);
    }
}

/// Uppercase the single character at `i`, in place.
pub fn to_title_char_at(word: &mut [char], i: usize, locale: Locale) {
    if let Some(c) = word.get_mut(i) {
        *c = simple_upper_locale(*c, locale);
    }
}

/// Single-scalar locale-aware uppercase map.
pub fn simple_upper_locale(c: char, locale: Locale) -> char {
    match (locale, c) {
        (Locale::Turkic, 'i') => '\u{0130}', // İ
        (Locale::Turkic, '\u{0131}') => 'I', // ı -> I
        _ => simple_upper(c),
    }
}

/// Single-scalar locale-aware lowercase map.
pub fn simple_lower_locale(c: char, locale: Locale) -> char {
    match (locale, c) {
        (Locale::Turkic, 'I') => '\u{0131}', // ı
        (Locale::Turkic, '\u{0130}') => 'i', // İ -> i
        _ => simple_lower(c),
    }
}
