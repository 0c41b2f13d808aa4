// Candidate generation and the minimal dictionary-matching driver.
//
// Given a surface word, the engine answers which stems and rules could
// have produced it. It never consults the dictionary itself: each match
// yields the stem plus the flags that stem must carry, and the caller
// (here, the Checker driver) confirms stem existence and flag membership.

use hunaffix_core::casing::{Casing, Locale, classify_casing, to_lower, to_title};
use hunaffix_core::flags::{Flag, FlagSet};

use crate::ParseError;
use crate::affix::{AffixKind, AffixRule};
use crate::parser::{AffData, WordList};

/// One possible decomposition of a surface word: the candidate stem and
/// the flags the dictionary entry must carry for it to be valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub stem: String,
    /// Flags required on the stem (the applied rules' flags).
    pub flags: FlagSet,
    /// Flag of the applied prefix rule, if any.
    pub prefix: Option<Flag>,
    /// Flag of the applied suffix rule, if any.
    pub suffix: Option<Flag>,
}

/// The affix engine: read-only rule tables plus candidate generation.
///
/// Built once from a parsed rule file; afterwards it is immutable and
/// safe to share across threads checking words concurrently.
pub struct AffixEngine {
    data: AffData,
}

impl AffixEngine {
    pub fn new(data: AffData) -> Self {
        Self { data }
    }

    pub fn from_aff(text: &str) -> Result<Self, ParseError> {
        Ok(Self::new(AffData::parse(text)?))
    }

    pub fn data(&self) -> &AffData {
        &self.data
    }

    /// Normalize a word through the input conversion table.
    pub fn normalize(&self, word: &str) -> String {
        self.data.iconv.replace(word)
    }

    /// All candidate decompositions of a surface word: suffix matches,
    /// prefix matches, and cross-product combinations where both rules
    /// permit them. A word that is itself a stem yields no candidate;
    /// exact matching is the dictionary layer's job.
    pub fn candidates(&self, word: &str) -> Vec<Candidate> {
        self.candidates_of(&self.normalize(word))
    }

    /// Candidate generation over an already-normalized word.
    fn candidates_of(&self, word: &str) -> Vec<Candidate> {
        let mut out = Vec::new();
        self.suffix_candidates(word, &mut out);
        self.prefix_candidates(word, &mut out);
        out
    }

    fn suffix_candidates(&self, word: &str, out: &mut Vec<Candidate>) {
        let table = &self.data.suffixes;
        if table.is_empty() {
            return;
        }
        let (min, max) = table.affix_len_range();
        // every trailing substring at a char boundary, shortest last;
        // start 0 (the whole word as affix) would leave no stem material
        for start in char_boundaries(word) {
            if start == 0 {
                continue;
            }
            let affix = &word[start..];
            if affix.len() < min || affix.len() > max {
                continue;
            }
            for rule in table.rules_for(affix) {
                let Some(stem) = rule.to_root(AffixKind::Suffix, word) else {
                    continue;
                };
                if stem.is_empty() || !rule.check_condition(AffixKind::Suffix, &stem) {
                    continue;
                }
                if rule.cross_product {
                    self.cross_product_candidates(&stem, rule, out);
                }
                out.push(Candidate {
                    stem,
                    flags: FlagSet::from([rule.flag]),
                    prefix: None,
                    suffix: Some(rule.flag),
                });
            }
        }
    }

    fn prefix_candidates(&self, word: &str, out: &mut Vec<Candidate>) {
        let table = &self.data.prefixes;
        if table.is_empty() {
            return;
        }
        let (min, max) = table.affix_len_range();
        for end in char_boundaries(word) {
            if end == word.len() {
                continue;
            }
            let affix = &word[..end];
            if affix.len() < min || affix.len() > max {
                continue;
            }
            for rule in table.rules_for(affix) {
                let Some(stem) = rule.to_root(AffixKind::Prefix, word) else {
                    continue;
                };
                if stem.is_empty() || !rule.check_condition(AffixKind::Prefix, &stem) {
                    continue;
                }
                out.push(Candidate {
                    stem,
                    flags: FlagSet::from([rule.flag]),
                    prefix: Some(rule.flag),
                    suffix: None,
                });
            }
        }
    }

    /// Cross-product pairs are generated once, from the suffix side:
    /// after a cross-product suffix rule strips, cross-product prefix
    /// rules are probed against the intermediate form. Both rules'
    /// conditions must hold on the fully stripped stem, since conditions
    /// describe dictionary stems.
    fn cross_product_candidates(
        &self,
        intermediate: &str,
        sfx: &AffixRule,
        out: &mut Vec<Candidate>,
    ) {
        let table = &self.data.prefixes;
        if table.is_empty() {
            return;
        }
        let (min, max) = table.affix_len_range();
        for end in char_boundaries(intermediate) {
            if end == intermediate.len() {
                continue;
            }
            let affix = &intermediate[..end];
            if affix.len() < min || affix.len() > max {
                continue;
            }
            for rule in table.rules_for(affix) {
                if !rule.cross_product {
                    continue;
                }
                let Some(stem) = rule.to_root(AffixKind::Prefix, intermediate) else {
                    continue;
                };
                if stem.is_empty()
                    || !rule.check_condition(AffixKind::Prefix, &stem)
                    || !sfx.check_condition(AffixKind::Suffix, &stem)
                {
                    continue;
                }
                out.push(Candidate {
                    stem,
                    flags: FlagSet::from([rule.flag, sfx.flag]),
                    prefix: Some(rule.flag),
                    suffix: Some(sfx.flag),
                });
            }
        }
    }
}

/// Byte positions of every char boundary in `word`, including 0 and the
/// full length.
fn char_boundaries(word: &str) -> impl Iterator<Item = usize> + '_ {
    word.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(word.len()))
}

/// Alternate-casing lookup variants of a word, the word itself first.
///
/// ALL_CAPITAL words also try their title and lower forms; INIT_CAPITAL
/// and PASCAL words also try lower. SMALL and CAMEL words have no
/// case-insensitive reading beyond themselves.
pub fn casing_variants(word: &str, locale: Locale) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut variants = vec![word.to_string()];
    match classify_casing(&chars) {
        Casing::Small | Casing::Camel => {}
        Casing::InitCapital | Casing::Pascal => variants.push(to_lower(word, locale)),
        Casing::AllCapital => {
            variants.push(to_title(word, locale));
            variants.push(to_lower(word, locale));
        }
    }
    variants.dedup();
    variants
}

/// Minimal dictionary-matching driver: an engine plus a word list.
///
/// The engine proposes (stem, required flags) candidates; the checker
/// confirms stem existence and flag membership and makes the final
/// accept/reject decision, trying alternate casings along the way.
pub struct Checker {
    engine: AffixEngine,
    words: WordList,
    locale: Locale,
}

impl Checker {
    pub fn new(engine: AffixEngine, words: WordList) -> Self {
        Self {
            engine,
            words,
            locale: Locale::default(),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Build a checker from rule-file and dictionary text.
    pub fn from_texts(aff: &str, dic: &str) -> Result<Self, ParseError> {
        let data = AffData::parse(aff)?;
        let words = WordList::parse(dic, data.flag_scheme)?;
        Ok(Self::new(AffixEngine::new(data), words))
    }

    /// Build a checker from raw file bytes; the dictionary is decoded
    /// with the encoding the rule file declares.
    pub fn from_bytes(aff: &[u8], dic: &[u8]) -> Result<Self, ParseError> {
        let data = AffData::parse_bytes(aff)?;
        let dic_text = data.encoding.decode(dic)?;
        let words = WordList::parse(&dic_text, data.flag_scheme)?;
        Ok(Self::new(AffixEngine::new(data), words))
    }

    pub fn engine(&self) -> &AffixEngine {
        &self.engine
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Accept/reject decision for a surface word.
    pub fn spell(&self, word: &str) -> bool {
        let word = self.engine.normalize(word);
        for variant in casing_variants(&word, self.locale) {
            if self.words.contains(&variant) {
                return true;
            }
            if self
                .engine
                .candidates_of(&variant)
                .iter()
                .any(|c| self.words.has_all_flags(&c.stem, &c.flags))
            {
                return true;
            }
        }
        false
    }

    /// The candidate decompositions that survive the dictionary filter,
    /// across all casing variants.
    pub fn analyze(&self, word: &str) -> Vec<Candidate> {
        let word = self.engine.normalize(word);
        let mut out = Vec::new();
        for variant in casing_variants(&word, self.locale) {
            out.extend(
                self.engine
                    .candidates_of(&variant)
                    .into_iter()
                    .filter(|c| self.words.has_all_flags(&c.stem, &c.flags)),
            );
        }
        out
    }
}
