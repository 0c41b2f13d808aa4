//! Hunspell-compatible affix rule engine.
//!
//! Loads prefix/suffix rule tables from `.aff` rule files and answers,
//! for a surface word, which dictionary stems and rules could have
//! produced it. The final accept/reject decision belongs to the
//! dictionary layer; a minimal [`engine::Checker`] driver is provided
//! for it.
//!
//! # Architecture
//!
//! - [`condition`] -- rule applicability patterns, compiled at load time
//! - [`affix`] -- prefix/suffix rules and the reverse-lookup tables
//! - [`parser`] -- `.aff` / `.dic` parsing into [`parser::AffData`]
//! - [`engine`] -- candidate generation and the checker driver
//!
//! All tables follow a build-then-read lifecycle: loading either fully
//! succeeds or fails with [`ParseError`]; a built table is immutable and
//! safe for concurrent lookups without locking.

pub mod affix;
pub mod condition;
pub mod engine;
pub mod parser;

pub use affix::{AffixKind, AffixRule, AffixTable};
pub use condition::Condition;
pub use engine::{AffixEngine, Candidate, Checker};
pub use parser::{AffData, WordList};

use hunaffix_core::encoding::EncodingError;
use hunaffix_core::flags::{Flag, FlagParseError};

/// Error type for rule-file and dictionary loading.
///
/// Any malformed line fails the whole load; a partially built table is
/// never installed.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: expected at least {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: bad flag field {text:?}: {source}")]
    BadFlag {
        line: usize,
        text: String,
        #[source]
        source: FlagParseError,
    },
    #[error("line {line}: expected a single flag, found {found} in {text:?}")]
    NotSingleFlag {
        line: usize,
        text: String,
        found: usize,
    },
    #[error("line {line}: cross-product field must be Y or N, found {found:?}")]
    BadCrossProduct { line: usize, found: String },
    #[error("line {line}: bad condition pattern {pattern:?}: {source}")]
    BadCondition {
        line: usize,
        pattern: String,
        #[source]
        source: condition::ConditionError,
    },
    #[error("line {line}: bad count field {found:?}")]
    BadCount { line: usize, found: String },
    #[error("line {line}: rule flag {found} does not match group flag {expected}")]
    FlagMismatch {
        line: usize,
        expected: Flag,
        found: Flag,
    },
    #[error("affix group for flag {flag} declares {declared} rules but defines {defined}")]
    RuleCountMismatch {
        flag: Flag,
        declared: usize,
        defined: usize,
    },
    #[error("{directive} table declares {declared} pairs but defines {defined}")]
    ConvCountMismatch {
        directive: &'static str,
        declared: usize,
        defined: usize,
    },
    #[error("line {line}: unknown flag scheme {found:?}")]
    BadFlagScheme { line: usize, found: String },
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}
