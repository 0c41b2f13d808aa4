//! Text primitives shared by the hunaffix affix engine.
//!
//! All components here follow a build-then-read lifecycle: values are
//! constructed once when a dictionary's rule file is parsed and are
//! immutable, lock-free shared data afterwards.
//!
//! - [`flags`] -- affix flags, flag sets and the textual flag schemes
//! - [`casing`] -- word casing classification and locale-aware transforms
//! - [`character`] -- per-character helpers and cheap word predicates
//! - [`replacer`] -- ordered greedy longest-match substring rewriting
//! - [`encoding`] -- byte encoding bridge and the scoped neutral context

pub mod casing;
pub mod character;
pub mod encoding;
pub mod flags;
pub mod replacer;
