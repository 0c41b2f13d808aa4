// Affix flags and flag sets.
//
// A flag names a grammatical property a stem may carry ("allows plural
// suffix"). Dictionary stems and affix rules each carry a FlagSet; the
// checker intersects them to accept or reject a candidate decomposition.

use std::fmt;

/// An opaque 16-bit flag identifier.
///
/// Flags have no structure beyond equality and ordering. The 16-bit range
/// covers every textual flag scheme: single characters, two-character
/// pairs, decimal numbers up to 65535 and BMP code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Flag(pub u16);

impl Flag {
    /// Convert a character to a flag, failing for characters outside the
    /// 16-bit range (supplementary-plane code points).
    pub fn from_char(c: char) -> Option<Flag> {
        u16::try_from(c as u32).ok().map(Flag)
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match char::from_u32(u32::from(self.0)) {
            Some(c) if !c.is_control() => write!(f, "{c}"),
            _ => write!(f, "#{}", self.0),
        }
    }
}

/// A set of flags, stored sorted and deduplicated.
///
/// Membership testing is a linear scan. Flag sets are typically
/// single-digit to low-double-digit size, where a scan over a compact
/// vector beats a hash lookup; this is a measured design constraint of
/// the engine, not an oversight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    flags: Vec<Flag>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add flags to the set. Duplicates are discarded and the set stays
    /// sorted; inserting already-present flags is a no-op.
    pub fn insert(&mut self, flags: &[Flag]) {
        self.flags.extend_from_slice(flags);
        self.flags.sort_unstable();
        self.flags.dedup();
    }

    /// Remove a flag. Returns whether it was present.
    pub fn erase(&mut self, flag: Flag) -> bool {
        match self.flags.iter().position(|&f| f == flag) {
            Some(i) => {
                self.flags.remove(i);
                true
            }
            None => false,
        }
    }

    /// Membership test. Intentionally a linear scan, see the type docs.
    pub fn contains(&self, flag: Flag) -> bool {
        self.flags.iter().any(|&f| f == flag)
    }

    /// Number of occurrences of `flag` (0 or 1).
    pub fn count(&self, flag: Flag) -> usize {
        usize::from(self.contains(flag))
    }

    /// True when every flag of `other` is present in `self`.
    pub fn contains_all(&self, other: &FlagSet) -> bool {
        other.iter().all(|&f| self.contains(f))
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Iterate flags in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, Flag> {
        self.flags.iter()
    }

    pub fn as_slice(&self) -> &[Flag] {
        &self.flags
    }
}

impl From<&[Flag]> for FlagSet {
    fn from(flags: &[Flag]) -> Self {
        let mut set = FlagSet::new();
        set.insert(flags);
        set
    }
}

impl<const N: usize> From<[Flag; N]> for FlagSet {
    fn from(flags: [Flag; N]) -> Self {
        FlagSet::from(flags.as_slice())
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        let mut flags: Vec<Flag> = iter.into_iter().collect();
        flags.sort_unstable();
        flags.dedup();
        FlagSet { flags }
    }
}

impl<'a> IntoIterator for &'a FlagSet {
    type Item = &'a Flag;
    type IntoIter = std::slice::Iter<'a, Flag>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.iter()
    }
}

// ---------------------------------------------------------------------------
// Textual flag schemes
// ---------------------------------------------------------------------------

/// How flag fields in rule and dictionary files encode flags.
///
/// Selected by the `FLAG` directive of the rule file; its absence means
/// the single-character scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlagParsingScheme {
    /// One flag per character (`FLAG` directive absent).
    #[default]
    Single,
    /// Two ASCII characters per flag (`FLAG long`).
    Double,
    /// Comma-separated decimal numbers (`FLAG num`).
    Numeric,
    /// One flag per Unicode scalar, restricted to the BMP (`FLAG UTF-8`).
    /// Identical to `Single` once the input is decoded; the distinction
    /// only matters at the byte level of the source file.
    Utf8,
}

/// Error for malformed flag text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlagParseError {
    #[error("flag character U+{0:04X} is outside the 16-bit range")]
    OutsideBmp(u32),
    #[error("double-character flag text {0:?} has odd length")]
    OddLength(String),
    #[error("double-character flags must be ASCII, found {0:?}")]
    NonAsciiPair(String),
    #[error("invalid numeric flag {0:?}")]
    BadNumber(String),
}

/// Parse a flag field into individual flags, using the given scheme.
///
/// The result preserves input order and multiplicity; collapse it through
/// [`FlagSet`] to obtain the compact set representation.
pub fn parse_flags(text: &str, scheme: FlagParsingScheme) -> Result<Vec<Flag>, FlagParseError> {
    match scheme {
        FlagParsingScheme::Single | FlagParsingScheme::Utf8 => text
            .chars()
            .map(|c| Flag::from_char(c).ok_or(FlagParseError::OutsideBmp(c as u32)))
            .collect(),
        FlagParsingScheme::Double => {
            if !text.is_ascii() {
                return Err(FlagParseError::NonAsciiPair(text.to_string()));
            }
            let bytes = text.as_bytes();
            if bytes.len() % 2 != 0 {
                return Err(FlagParseError::OddLength(text.to_string()));
            }
            Ok(bytes
                .chunks_exact(2)
                .map(|pair| Flag(u16::from(pair[0]) << 8 | u16::from(pair[1])))
                .collect())
        }
        FlagParsingScheme::Numeric => text
            .split(',')
            .map(|num| {
                num.trim()
                    .parse::<u16>()
                    .map(Flag)
                    .map_err(|_| FlagParseError::BadNumber(num.to_string()))
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- FlagSet algebra --

    #[test]
    fn insert_then_exists() {
        let mut f = FlagSet::new();
        f.insert(&[Flag(b'A' as u16)]);
        assert!(f.contains(Flag(b'A' as u16)));
        assert!(!f.contains(Flag(b'B' as u16)));
    }

    #[test]
    fn insert_is_idempotent() {
        let mut f = FlagSet::new();
        f.insert(&[Flag(7), Flag(3)]);
        assert_eq!(f.len(), 2);
        f.insert(&[Flag(7)]);
        assert_eq!(f.len(), 2);
    }

    #[test]
    fn erase_reports_presence() {
        let mut f = FlagSet::from([Flag(1), Flag(2)]);
        assert!(f.erase(Flag(1)));
        assert!(!f.contains(Flag(1)));
        assert!(!f.erase(Flag(1)));
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn iteration_is_ascending() {
        let f: FlagSet = [Flag(9), Flag(2), Flag(5), Flag(2)].into_iter().collect();
        let order: Vec<u16> = f.iter().map(|f| f.0).collect();
        assert_eq!(order, vec![2, 5, 9]);
    }

    #[test]
    fn count_is_zero_or_one() {
        let mut f = FlagSet::new();
        f.insert(&[Flag(4), Flag(4), Flag(4)]);
        assert_eq!(f.count(Flag(4)), 1);
        assert_eq!(f.count(Flag(5)), 0);
    }

    #[test]
    fn contains_all_subset() {
        let big = FlagSet::from([Flag(1), Flag(2), Flag(3)]);
        let sub = FlagSet::from([Flag(1), Flag(3)]);
        assert!(big.contains_all(&sub));
        assert!(!sub.contains_all(&big));
        assert!(big.contains_all(&FlagSet::new()));
    }

    #[test]
    fn value_semantics() {
        let a = FlagSet::from([Flag(1), Flag(2)]);
        let mut b = a.clone();
        assert_eq!(a, b);
        b.erase(Flag(1));
        assert_ne!(a, b);
        assert!(a.contains(Flag(1)));
    }

    // -- flag text schemes --

    #[test]
    fn single_scheme() {
        let flags = parse_flags("AbZ", FlagParsingScheme::Single).unwrap();
        assert_eq!(flags, vec![Flag(65), Flag(98), Flag(90)]);
    }

    #[test]
    fn single_scheme_rejects_supplementary_plane() {
        let err = parse_flags("\u{1F600}", FlagParsingScheme::Utf8).unwrap_err();
        assert_eq!(err, FlagParseError::OutsideBmp(0x1F600));
    }

    #[test]
    fn double_scheme() {
        let flags = parse_flags("aabb", FlagParsingScheme::Double).unwrap();
        assert_eq!(flags.len(), 2);
        assert_eq!(flags[0], Flag((b'a' as u16) << 8 | b'a' as u16));
        assert_eq!(flags[1], Flag((b'b' as u16) << 8 | b'b' as u16));
    }

    #[test]
    fn double_scheme_odd_length() {
        assert_eq!(
            parse_flags("abc", FlagParsingScheme::Double),
            Err(FlagParseError::OddLength("abc".to_string()))
        );
    }

    #[test]
    fn double_scheme_non_ascii() {
        assert!(matches!(
            parse_flags("ä1", FlagParsingScheme::Double),
            Err(FlagParseError::NonAsciiPair(_))
        ));
    }

    #[test]
    fn numeric_scheme() {
        let flags = parse_flags("1,65535,42", FlagParsingScheme::Numeric).unwrap();
        assert_eq!(flags, vec![Flag(1), Flag(65535), Flag(42)]);
    }

    #[test]
    fn numeric_scheme_bad_number() {
        assert!(matches!(
            parse_flags("1,banana", FlagParsingScheme::Numeric),
            Err(FlagParseError::BadNumber(_))
        ));
        assert!(matches!(
            parse_flags("70000", FlagParsingScheme::Numeric),
            Err(FlagParseError::BadNumber(_))
        ));
    }

    #[test]
    fn flag_display() {
        assert_eq!(Flag(b'S' as u16).to_string(), "S");
        assert_eq!(Flag(1).to_string(), "#1");
    }
}
