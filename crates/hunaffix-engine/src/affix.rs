// Affix rules and the reverse-lookup affix tables.
//
// A rule describes one stripping/appending transformation; a table files
// rules under their appended substring so that, given a surface word,
// only the rules whose appending is actually a suffix (or prefix) of the
// word are ever inspected.

use hashbrown::HashMap;
use hunaffix_core::flags::Flag;

use crate::condition::Condition;

/// Which end of the word a rule operates on. Direction-specific anchor
/// logic is selected by this tag; there is one rule record, not a type
/// hierarchy, because the transforms run per candidate per word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AffixKind {
    Prefix,
    Suffix,
}

/// One immutable affix rule, created when the rule file is parsed and
/// owned exclusively by its table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffixRule {
    /// The flag this rule is filed under; a stem must carry it for the
    /// rule to apply.
    pub flag: Flag,
    /// Whether this rule may combine with a rule of the opposite affix
    /// class in the same word.
    pub cross_product: bool,
    /// Substring removed from the stem before appending.
    pub stripping: String,
    /// Substring appended to form the surface form; the table key.
    pub appending: String,
    /// Applicability pattern over the stem, anchored per [`AffixKind`].
    pub condition: Condition,
}

impl AffixRule {
    /// Undo this rule on a derived (surface) word: remove the appended
    /// substring from the relevant end and re-insert the stripped one.
    /// Returns `None` when the word does not actually carry the appending
    /// at that end.
    pub fn to_root(&self, kind: AffixKind, derived: &str) -> Option<String> {
        match kind {
            AffixKind::Prefix => derived.strip_prefix(self.appending.as_str()).map(|rest| {
                let mut stem = String::with_capacity(self.stripping.len() + rest.len());
                stem.push_str(&self.stripping);
                stem.push_str(rest);
                stem
            }),
            AffixKind::Suffix => derived.strip_suffix(self.appending.as_str()).map(|rest| {
                let mut stem = String::with_capacity(rest.len() + self.stripping.len());
                stem.push_str(rest);
                stem.push_str(&self.stripping);
                stem
            }),
        }
    }

    /// Apply this rule to a stem: remove the stripped substring from the
    /// relevant end and append the rule's appending. Returns `None` when
    /// the stem does not carry the stripping at that end.
    pub fn to_derived(&self, kind: AffixKind, stem: &str) -> Option<String> {
        match kind {
            AffixKind::Prefix => stem.strip_prefix(self.stripping.as_str()).map(|rest| {
                let mut derived = String::with_capacity(self.appending.len() + rest.len());
                derived.push_str(&self.appending);
                derived.push_str(rest);
                derived
            }),
            AffixKind::Suffix => stem.strip_suffix(self.stripping.as_str()).map(|rest| {
                let mut derived = String::with_capacity(rest.len() + self.appending.len());
                derived.push_str(rest);
                derived.push_str(&self.appending);
                derived
            }),
        }
    }

    /// Evaluate the applicability pattern against a candidate stem,
    /// anchored at the word start for prefixes and the word end for
    /// suffixes. A failed condition is an ordinary negative result.
    pub fn check_condition(&self, kind: AffixKind, stem: &str) -> bool {
        match kind {
            AffixKind::Prefix => self.condition.matches_prefix(stem),
            AffixKind::Suffix => self.condition.matches_suffix(stem),
        }
    }
}

/// Multi-valued mapping from appended substring to the rules appending
/// exactly that substring.
///
/// Construction is O(rules); a lookup touches only the rules filed under
/// that exact key, never the whole table. Read-only after the load
/// phase, so concurrent lookups need no locking.
#[derive(Debug, Clone)]
pub struct AffixTable {
    kind: AffixKind,
    by_appending: HashMap<String, Vec<AffixRule>>,
    rule_count: usize,
    min_affix_len: usize,
    max_affix_len: usize,
}

impl AffixTable {
    pub fn new(kind: AffixKind) -> Self {
        Self {
            kind,
            by_appending: HashMap::new(),
            rule_count: 0,
            min_affix_len: usize::MAX,
            max_affix_len: 0,
        }
    }

    pub fn from_rules(kind: AffixKind, rules: Vec<AffixRule>) -> Self {
        let mut table = Self::new(kind);
        for rule in rules {
            table.insert(rule);
        }
        table
    }

    /// File a rule under its appended substring.
    pub fn insert(&mut self, rule: AffixRule) {
        self.min_affix_len = self.min_affix_len.min(rule.appending.len());
        self.max_affix_len = self.max_affix_len.max(rule.appending.len());
        self.rule_count += 1;
        self.by_appending
            .entry(rule.appending.clone())
            .or_default()
            .push(rule);
    }

    pub fn kind(&self) -> AffixKind {
        self.kind
    }

    /// Total number of rules in the table.
    pub fn len(&self) -> usize {
        self.rule_count
    }

    pub fn is_empty(&self) -> bool {
        self.rule_count == 0
    }

    /// All rules whose appending equals `affix` exactly. Callers probe
    /// with the word's trailing (or leading) substrings, test each
    /// rule's condition, and call `to_root` on success.
    pub fn rules_for(&self, affix: &str) -> &[AffixRule] {
        self.by_appending
            .get(affix)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Byte-length range `(min, max)` of the appended substrings, used
    /// to bound probing. `(0, 0)` for an empty table.
    pub fn affix_len_range(&self) -> (usize, usize) {
        if self.rule_count == 0 {
            (0, 0)
        } else {
            (self.min_affix_len, self.max_affix_len)
        }
    }
}
