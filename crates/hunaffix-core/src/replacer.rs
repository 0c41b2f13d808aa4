// Ordered greedy longest-match substring rewriting.
//
// Backs the input/output character-set remapping tables (ICONV/OCONV)
// declared in rule files. Built once at load time, read-only afterwards.

/// A table of (pattern, replacement) pairs applied greedily.
///
/// `replace` scans the input left to right. At each position the longest
/// pattern matching there is applied atomically; if none matches, one
/// character is copied through. An empty table is the identity transform.
///
/// Duplicate patterns are deduplicated at construction with
/// first-definition-wins semantics: the pair that appears first in the
/// source table is kept, matching conventional rule-file behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstrReplacer {
    /// Pairs sorted by pattern for binary-search lookup.
    table: Vec<(String, String)>,
    /// Longest pattern length in bytes, bounds the per-position probe.
    max_pattern_len: usize,
}

impl SubstrReplacer {
    /// Build a replacer from raw pairs. Empty patterns are discarded;
    /// duplicate patterns keep their first definition.
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        let mut table: Vec<(String, String)> =
            pairs.into_iter().filter(|(p, _)| !p.is_empty()).collect();
        // Stable sort, then dedup keeps the first-seen replacement.
        table.sort_by(|a, b| a.0.cmp(&b.0));
        table.dedup_by(|b, a| a.0 == b.0);
        let max_pattern_len = table.iter().map(|(p, _)| p.len()).max().unwrap_or(0);
        Self {
            table,
            max_pattern_len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Apply the table to `text`, producing a new string. Total over all
    /// inputs: always terminates and consumes the whole input.
    pub fn replace(&self, text: &str) -> String {
        if self.table.is_empty() {
            return text.to_string();
        }
        let mut out = String::with_capacity(text.len());
        let mut i = 0;
        while i < text.len() {
            let rest = &text[i..];
            if let Some((pattern, replacement)) = self.find_match(rest) {
                out.push_str(replacement);
                i += pattern.len();
            } else if let Some(c) = rest.chars().next() {
                out.push(c);
                i += c.len_utf8();
            }
        }
        out
    }

    /// Longest pattern that is a prefix of `rest`, if any. Probes prefix
    /// lengths from longest to shortest, binary-searching the sorted
    /// table for each: O(L log n) per position with L bounded by the
    /// longest pattern, never a scan over all pairs.
    fn find_match(&self, rest: &str) -> Option<&(String, String)> {
        let limit = rest.len().min(self.max_pattern_len);
        for end in (1..=limit).rev() {
            if !rest.is_char_boundary(end) {
                continue;
            }
            let prefix = &rest[..end];
            if let Ok(pos) = self
                .table
                .binary_search_by(|(p, _)| p.as_str().cmp(prefix))
            {
                return Some(&self.table[pos]);
            }
        }
        None
    }
}

impl From<Vec<(String, String)>> for SubstrReplacer {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}
