// Rule applicability conditions.
//
// A condition constrains which stems an affix rule may legally apply to.
// The rule-file pattern is regex-like but tiny: literal characters, the
// `.` wildcard, and (negated) character classes. It is compiled once at
// load time into a flat item sequence; matching is a per-character walk
// anchored at the relevant end of the word. This runs on every affix
// table hit for every input word, so no general regex engine is involved.

/// Error for malformed condition patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConditionError {
    #[error("unterminated character class")]
    UnterminatedClass,
    #[error("empty character class")]
    EmptyClass,
}

/// One compiled pattern element, matching exactly one character.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    /// `.` -- any character.
    Any,
    /// A literal character.
    Char(char),
    /// `[abc]` -- any of the listed characters.
    Class(Vec<char>),
    /// `[^abc]` -- any character not listed.
    NegClass(Vec<char>),
}

impl Item {
    fn matches(&self, c: char) -> bool {
        match self {
            Item::Any => true,
            Item::Char(lit) => *lit == c,
            Item::Class(set) => set.contains(&c),
            Item::NegClass(set) => !set.contains(&c),
        }
    }
}

/// A compiled applicability condition.
///
/// `"."` compiles to a single wildcard and is the conventional
/// always-true pattern of rule files. A word shorter than the condition
/// never matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Condition {
    items: Vec<Item>,
}

impl Condition {
    /// Compile a rule-file condition pattern.
    pub fn parse(pattern: &str) -> Result<Condition, ConditionError> {
        let mut items = Vec::new();
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            match c {
                '.' => items.push(Item::Any),
                '[' => {
                    let mut negated = false;
                    let mut set = Vec::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '^' && set.is_empty() && !negated {
                            negated = true;
                        } else if c == ']' {
                            closed = true;
                            break;
                        } else {
                            set.push(c);
                        }
                    }
                    if !closed {
                        return Err(ConditionError::UnterminatedClass);
                    }
                    if set.is_empty() {
                        return Err(ConditionError::EmptyClass);
                    }
                    items.push(if negated {
                        Item::NegClass(set)
                    } else {
                        Item::Class(set)
                    });
                }
                _ => items.push(Item::Char(c)),
            }
        }
        Ok(Condition { items })
    }

    /// Number of characters the condition inspects.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Match anchored at the start of the word.
    pub fn matches_prefix(&self, word: &str) -> bool {
        let mut chars = word.chars();
        for item in &self.items {
            match chars.next() {
                Some(c) if item.matches(c) => {}
                _ => return false,
            }
        }
        true
    }

    /// Match anchored at the end of the word.
    pub fn matches_suffix(&self, word: &str) -> bool {
        let mut chars = word.chars().rev();
        for item in self.items.iter().rev() {
            match chars.next() {
                Some(c) if item.matches(c) => {}
                _ => return false,
            }
        }
        true
    }
}
