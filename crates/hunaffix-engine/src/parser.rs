// Rule-file (.aff) and dictionary (.dic) parsing.
//
// The parser consumes the textual Hunspell subset the engine needs: SET,
// FLAG, ICONV/OCONV tables and PFX/SFX rule groups. Unknown directives
// are skipped; malformed lines in known directives fail the whole load,
// so a partially built table never escapes.

use hashbrown::HashMap;
use hunaffix_core::encoding::Encoding;
use hunaffix_core::flags::{Flag, FlagParsingScheme, FlagSet, parse_flags};
use hunaffix_core::replacer::SubstrReplacer;

use crate::ParseError;
use crate::affix::{AffixKind, AffixRule, AffixTable};
use crate::condition::Condition;

/// Everything the affix engine needs from a parsed rule file.
#[derive(Debug, Clone)]
pub struct AffData {
    /// Byte encoding of the rule and dictionary files (SET line).
    pub encoding: Encoding,
    /// Textual flag scheme (FLAG line; absent means single-character).
    pub flag_scheme: FlagParsingScheme,
    /// Input conversion table (ICONV), applied to every checked word.
    pub iconv: SubstrReplacer,
    /// Output conversion table (OCONV), applied to produced stems.
    pub oconv: SubstrReplacer,
    pub prefixes: AffixTable,
    pub suffixes: AffixTable,
}

impl AffData {
    /// Parse a rule file from decoded text.
    pub fn parse(text: &str) -> Result<AffData, ParseError> {
        let lines: Vec<&str> = text.lines().collect();
        let mut encoding = Encoding::default();
        let mut flag_scheme = FlagParsingScheme::default();
        let mut iconv_pairs = Vec::new();
        let mut oconv_pairs = Vec::new();
        let mut prefix_rules = Vec::new();
        let mut suffix_rules = Vec::new();

        let mut i = 0;
        while i < lines.len() {
            let lineno = i + 1;
            let fields = fields_of(lines[i]);
            let Some(&directive) = fields.first() else {
                i += 1;
                continue;
            };
            match directive {
                "SET" => {
                    require_fields(lineno, &fields, 2)?;
                    encoding = Encoding::from_name(fields[1])?;
                    i += 1;
                }
                "FLAG" => {
                    require_fields(lineno, &fields, 2)?;
                    flag_scheme = match fields[1] {
                        "long" => FlagParsingScheme::Double,
                        "num" => FlagParsingScheme::Numeric,
                        "UTF-8" => FlagParsingScheme::Utf8,
                        other => {
                            return Err(ParseError::BadFlagScheme {
                                line: lineno,
                                found: other.to_string(),
                            });
                        }
                    };
                    i += 1;
                }
                "ICONV" => iconv_pairs = parse_conv_group("ICONV", &lines, &mut i)?,
                "OCONV" => oconv_pairs = parse_conv_group("OCONV", &lines, &mut i)?,
                "PFX" => {
                    parse_affix_group(AffixKind::Prefix, flag_scheme, &lines, &mut i, &mut prefix_rules)?
                }
                "SFX" => {
                    parse_affix_group(AffixKind::Suffix, flag_scheme, &lines, &mut i, &mut suffix_rules)?
                }
                // Directives outside the affix engine's scope (TRY, REP,
                // compounding, suggestion tuning) are skipped.
                _ => i += 1,
            }
        }

        Ok(AffData {
            encoding,
            flag_scheme,
            iconv: SubstrReplacer::new(iconv_pairs),
            oconv: SubstrReplacer::new(oconv_pairs),
            prefixes: AffixTable::from_rules(AffixKind::Prefix, prefix_rules),
            suffixes: AffixTable::from_rules(AffixKind::Suffix, suffix_rules),
        })
    }

    /// Parse a rule file from raw bytes: sniff the SET line to learn the
    /// encoding, decode, then parse.
    pub fn parse_bytes(bytes: &[u8]) -> Result<AffData, ParseError> {
        let encoding = sniff_encoding(bytes)?;
        let text = encoding.decode(bytes)?;
        Self::parse(&text)
    }
}

/// Locate the SET directive by widening bytes as Latin-1, which is total
/// and agrees with every supported encoding on the ASCII range the
/// directive itself uses. Absent or incomplete SET lines fall back to
/// UTF-8 and are re-validated by the main parse.
fn sniff_encoding(bytes: &[u8]) -> Result<Encoding, ParseError> {
    for raw in bytes.split(|&b| b == b'\n') {
        let line: String = raw.iter().map(|&b| char::from(b)).collect();
        let fields = fields_of(&line);
        if fields.first() == Some(&"SET") {
            if let Some(name) = fields.get(1) {
                return Ok(Encoding::from_name(name)?);
            }
            break;
        }
    }
    Ok(Encoding::default())
}

/// Whitespace-separated fields up to a trailing `#` comment.
fn fields_of(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    for field in line.split_whitespace() {
        if field.starts_with('#') {
            break;
        }
        fields.push(field);
    }
    fields
}

fn require_fields(line: usize, fields: &[&str], expected: usize) -> Result<(), ParseError> {
    if fields.len() < expected {
        Err(ParseError::FieldCount {
            line,
            expected,
            found: fields.len(),
        })
    } else {
        Ok(())
    }
}

/// `"0"` denotes the empty string in strip, append and conversion fields.
fn unescape_zero(field: &str) -> String {
    if field == "0" {
        String::new()
    } else {
        field.to_string()
    }
}

fn parse_single_flag(
    line: usize,
    text: &str,
    scheme: FlagParsingScheme,
) -> Result<Flag, ParseError> {
    let flags = parse_flags(text, scheme).map_err(|source| ParseError::BadFlag {
        line,
        text: text.to_string(),
        source,
    })?;
    match flags.as_slice() {
        [flag] => Ok(*flag),
        _ => Err(ParseError::NotSingleFlag {
            line,
            text: text.to_string(),
            found: flags.len(),
        }),
    }
}

/// Parse an ICONV/OCONV group: a count header, then that many
/// `DIRECTIVE pattern replacement` lines.
fn parse_conv_group(
    directive: &'static str,
    lines: &[&str],
    i: &mut usize,
) -> Result<Vec<(String, String)>, ParseError> {
    let lineno = *i + 1;
    let header = fields_of(lines[*i]);
    require_fields(lineno, &header, 2)?;
    let declared: usize = header[1].parse().map_err(|_| ParseError::BadCount {
        line: lineno,
        found: header[1].to_string(),
    })?;
    *i += 1;

    let mut pairs = Vec::with_capacity(declared);
    while pairs.len() < declared && *i < lines.len() {
        let lineno = *i + 1;
        let fields = fields_of(lines[*i]);
        if fields.is_empty() {
            *i += 1;
            continue;
        }
        if fields[0] != directive {
            break;
        }
        require_fields(lineno, &fields, 3)?;
        pairs.push((unescape_zero(fields[1]), unescape_zero(fields[2])));
        *i += 1;
    }
    if pairs.len() != declared {
        return Err(ParseError::ConvCountMismatch {
            directive,
            declared,
            defined: pairs.len(),
        });
    }
    Ok(pairs)
}

/// Parse a PFX/SFX group: `DIRECTIVE flag Y/N count` header, then that
/// many `DIRECTIVE flag strip append [condition]` rule lines.
fn parse_affix_group(
    kind: AffixKind,
    scheme: FlagParsingScheme,
    lines: &[&str],
    i: &mut usize,
    out: &mut Vec<AffixRule>,
) -> Result<(), ParseError> {
    let directive = match kind {
        AffixKind::Prefix => "PFX",
        AffixKind::Suffix => "SFX",
    };
    let lineno = *i + 1;
    let header = fields_of(lines[*i]);
    require_fields(lineno, &header, 4)?;
    let flag = parse_single_flag(lineno, header[1], scheme)?;
    let cross_product = match header[2] {
        "Y" => true,
        "N" => false,
        other => {
            return Err(ParseError::BadCrossProduct {
                line: lineno,
                found: other.to_string(),
            });
        }
    };
    let declared: usize = header[3].parse().map_err(|_| ParseError::BadCount {
        line: lineno,
        found: header[3].to_string(),
    })?;
    *i += 1;

    let mut defined = 0;
    while defined < declared && *i < lines.len() {
        let lineno = *i + 1;
        let fields = fields_of(lines[*i]);
        if fields.is_empty() {
            *i += 1;
            continue;
        }
        if fields[0] != directive {
            break;
        }
        require_fields(lineno, &fields, 4)?;
        let rule_flag = parse_single_flag(lineno, fields[1], scheme)?;
        if rule_flag != flag {
            return Err(ParseError::FlagMismatch {
                line: lineno,
                expected: flag,
                found: rule_flag,
            });
        }
        let stripping = unescape_zero(fields[2]);
        // Continuation classes after '/' carry affix-on-affix flags,
        // which this engine does not model; the appending itself stays.
        let appending_field = match fields[3].split_once('/') {
            Some((appending, _)) => appending,
            None => fields[3],
        };
        let appending = unescape_zero(appending_field);
        let cond_text = fields.get(4).copied().unwrap_or(".");
        let condition = Condition::parse(cond_text).map_err(|source| ParseError::BadCondition {
            line: lineno,
            pattern: cond_text.to_string(),
            source,
        })?;
        out.push(AffixRule {
            flag,
            cross_product,
            stripping,
            appending,
            condition,
        });
        defined += 1;
        *i += 1;
    }
    if defined != declared {
        return Err(ParseError::RuleCountMismatch {
            flag,
            declared,
            defined,
        });
    }
    Ok(())
}

/// The dictionary side of the minimal matching driver: stems with their
/// flag sets. Duplicate stems merge by flag union.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashMap<String, FlagSet>,
}

impl WordList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `.dic` file: an optional word-count header, then one
    /// `stem/FLAGS` entry per line. Tab-separated morphological fields
    /// and lines starting with a tab are skipped.
    pub fn parse(text: &str, scheme: FlagParsingScheme) -> Result<WordList, ParseError> {
        let mut list = WordList::new();
        let mut saw_entry = false;
        for (idx, raw) in text.lines().enumerate() {
            let lineno = idx + 1;
            if raw.starts_with('\t') {
                continue;
            }
            let entry = match raw.split_once('\t') {
                Some((entry, _morphology)) => entry,
                None => raw,
            };
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            if !saw_entry {
                saw_entry = true;
                // leading count header
                if entry.chars().all(|c| c.is_ascii_digit()) {
                    continue;
                }
            }
            let (stem, flag_text) = match entry.split_once('/') {
                Some((stem, flags)) => (stem, Some(flags)),
                None => (entry, None),
            };
            let stem = stem.trim();
            if stem.is_empty() {
                continue;
            }
            let flags = match flag_text {
                Some(text) => {
                    parse_flags(text, scheme).map_err(|source| ParseError::BadFlag {
                        line: lineno,
                        text: text.to_string(),
                        source,
                    })?
                }
                None => Vec::new(),
            };
            list.insert(stem, &flags);
        }
        Ok(list)
    }

    pub fn insert(&mut self, stem: &str, flags: &[Flag]) {
        self.words
            .entry(stem.to_string())
            .or_default()
            .insert(flags);
    }

    pub fn contains(&self, stem: &str) -> bool {
        self.words.contains_key(stem)
    }

    pub fn flags_of(&self, stem: &str) -> Option<&FlagSet> {
        self.words.get(stem)
    }

    pub fn has_flag(&self, stem: &str, flag: Flag) -> bool {
        self.words.get(stem).is_some_and(|f| f.contains(flag))
    }

    /// True when the stem exists and carries every required flag.
    pub fn has_all_flags(&self, stem: &str, required: &FlagSet) -> bool {
        self.words.get(stem).is_some_and(|f| f.contains_all(required))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_AFF: &str = "\
# plural suffixes
SET UTF-8

SFX S Y 2
SFX S 0 s [^sxy]
SFX S y ies [^aeiou]y

PFX U Y 1
PFX U 0 un .
";

    // -- .aff parsing --

    #[test]
    fn parse_simple_aff() {
        let data = AffData::parse(SIMPLE_AFF).unwrap();
        assert_eq!(data.encoding, Encoding::Utf8);
        assert_eq!(data.flag_scheme, FlagParsingScheme::Single);
        assert_eq!(data.suffixes.len(), 2);
        assert_eq!(data.prefixes.len(), 1);

        let s_rules = data.suffixes.rules_for("s");
        assert_eq!(s_rules.len(), 1);
        assert_eq!(s_rules[0].flag, Flag(b'S' as u16));
        assert!(s_rules[0].stripping.is_empty());

        let ies_rules = data.suffixes.rules_for("ies");
        assert_eq!(ies_rules.len(), 1);
        assert_eq!(ies_rules[0].stripping, "y");
    }

    #[test]
    fn zero_means_empty_strip() {
        let data = AffData::parse("SFX A Y 1\nSFX A 0 er .\n").unwrap();
        assert!(data.suffixes.rules_for("er")[0].stripping.is_empty());
    }

    #[test]
    fn missing_condition_defaults_to_dot() {
        let data = AffData::parse("SFX A Y 1\nSFX A 0 s\n").unwrap();
        let rule = &data.suffixes.rules_for("s")[0];
        assert!(rule.check_condition(AffixKind::Suffix, "anything"));
    }

    #[test]
    fn continuation_class_is_dropped_from_append() {
        let data = AffData::parse("SFX A Y 1\nSFX A 0 s/XY .\n").unwrap();
        assert_eq!(data.suffixes.rules_for("s").len(), 1);
    }

    #[test]
    fn long_flag_scheme() {
        let data = AffData::parse("FLAG long\nSFX aa Y 1\nSFX aa 0 s .\n").unwrap();
        let expected = Flag((b'a' as u16) << 8 | b'a' as u16);
        assert_eq!(data.suffixes.rules_for("s")[0].flag, expected);
    }

    #[test]
    fn numeric_flag_scheme() {
        let data = AffData::parse("FLAG num\nSFX 501 Y 1\nSFX 501 0 s .\n").unwrap();
        assert_eq!(data.suffixes.rules_for("s")[0].flag, Flag(501));
    }

    #[test]
    fn iconv_group() {
        let aff = "ICONV 2\nICONV \u{2019} '\nICONV \u{FB01} fi\n";
        let data = AffData::parse(aff).unwrap();
        assert_eq!(data.iconv.replace("\u{FB01}n\u{2019}"), "fin'");
    }

    #[test]
    fn unknown_directives_are_skipped() {
        let data = AffData::parse("TRY esianrtolcd\nREP 1\nREP f ph\nWORDCHARS 0123456789\n").unwrap();
        assert!(data.suffixes.is_empty());
        assert!(data.prefixes.is_empty());
    }

    // -- .aff errors --

    #[test]
    fn bad_cross_product_field() {
        let err = AffData::parse("SFX A Q 1\nSFX A 0 s .\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::BadCrossProduct { line: 1, ref found } if found == "Q"
        ));
    }

    #[test]
    fn declared_count_enforced() {
        let err = AffData::parse("SFX A Y 3\nSFX A 0 s .\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::RuleCountMismatch {
                declared: 3,
                defined: 1,
                ..
            }
        ));
    }

    #[test]
    fn rule_flag_must_match_group() {
        let err = AffData::parse("SFX A Y 1\nSFX B 0 s .\n").unwrap_err();
        assert!(matches!(err, ParseError::FlagMismatch { line: 2, .. }));
    }

    #[test]
    fn bad_condition_is_rejected() {
        let err = AffData::parse("SFX A Y 1\nSFX A 0 s [^aeiou\n").unwrap_err();
        assert!(matches!(err, ParseError::BadCondition { line: 2, .. }));
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        assert!(matches!(
            AffData::parse("SET KOI8-R\n").unwrap_err(),
            ParseError::Encoding(_)
        ));
    }

    #[test]
    fn bad_flag_scheme_is_rejected() {
        assert!(matches!(
            AffData::parse("FLAG short\n").unwrap_err(),
            ParseError::BadFlagScheme { line: 1, .. }
        ));
    }

    #[test]
    fn conv_count_enforced() {
        let err = AffData::parse("ICONV 2\nICONV a b\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::ConvCountMismatch {
                directive: "ICONV",
                declared: 2,
                defined: 1,
            }
        ));
    }

    // -- byte-level entry --

    #[test]
    fn parse_bytes_latin1() {
        let mut bytes = b"SET ISO8859-1\nSFX A Y 1\nSFX A 0 ".to_vec();
        bytes.push(0xE9); // é in Latin-1
        bytes.extend_from_slice(b" .\n");
        let data = AffData::parse_bytes(&bytes).unwrap();
        assert_eq!(data.encoding, Encoding::Latin1);
        assert_eq!(data.suffixes.rules_for("é").len(), 1);
    }

    #[test]
    fn parse_bytes_defaults_to_utf8() {
        let data = AffData::parse_bytes("SFX A Y 1\nSFX A 0 s .\n".as_bytes()).unwrap();
        assert_eq!(data.encoding, Encoding::Utf8);
    }

    #[test]
    fn parse_bytes_rejects_mismatched_bytes() {
        // declared UTF-8 but contains a bare Latin-1 byte
        let mut bytes = b"SET UTF-8\nSFX A Y 1\nSFX A 0 ".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b" .\n");
        assert!(matches!(
            AffData::parse_bytes(&bytes).unwrap_err(),
            ParseError::Encoding(_)
        ));
    }

    // -- .dic parsing --

    #[test]
    fn parse_word_list() {
        let dic = "3\ncat/S\nhello\nre-load/US\n";
        let words = WordList::parse(dic, FlagParsingScheme::Single).unwrap();
        assert_eq!(words.len(), 3);
        assert!(words.has_flag("cat", Flag(b'S' as u16)));
        assert!(words.contains("hello"));
        assert!(words.flags_of("hello").unwrap().is_empty());
        assert!(words.has_flag("re-load", Flag(b'U' as u16)));
        assert!(!words.contains("3"));
    }

    #[test]
    fn duplicate_stems_merge_flags() {
        let dic = "cat/S\ncat/X\n";
        let words = WordList::parse(dic, FlagParsingScheme::Single).unwrap();
        assert_eq!(words.len(), 1);
        assert!(words.has_flag("cat", Flag(b'S' as u16)));
        assert!(words.has_flag("cat", Flag(b'X' as u16)));
    }

    #[test]
    fn morphology_fields_and_comments_skipped() {
        let dic = "2\ncat/S\tpo:noun\n\tcomment line\ndog\n";
        let words = WordList::parse(dic, FlagParsingScheme::Single).unwrap();
        assert_eq!(words.len(), 2);
        assert!(words.has_flag("cat", Flag(b'S' as u16)));
        assert!(words.contains("dog"));
    }

    #[test]
    fn bad_dic_flags_fail_the_load() {
        let err = WordList::parse("cat/1,x\n", FlagParsingScheme::Numeric).unwrap_err();
        assert!(matches!(err, ParseError::BadFlag { line: 1, .. }));
    }

    #[test]
    fn has_all_flags_requires_every_flag() {
        let words = WordList::parse("cat/SX\n", FlagParsingScheme::Single).unwrap();
        let both = FlagSet::from([Flag(b'S' as u16), Flag(b'X' as u16)]);
        let more = FlagSet::from([Flag(b'S' as u16), Flag(b'Z' as u16)]);
        assert!(words.has_all_flags("cat", &both));
        assert!(!words.has_all_flags("cat", &more));
        assert!(!words.has_all_flags("dog", &FlagSet::new()));
    }
}
