// Byte encoding bridge and the scoped neutral text context.
//
// Rule files declare their encoding in a SET line; dictionary bytes are
// decoded into the canonical String form all other components operate on,
// and encoded back for byte-oriented consumers.

use crate::casing::Locale;

/// Error for encoding resolution and conversion failures.
///
/// Conversion failures occur on ordinary untrusted input and are handled
/// per word; they never abort a whole run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("unknown character encoding {0:?}")]
    UnknownName(String),
    #[error("invalid {encoding} byte sequence at offset {offset}")]
    Malformed {
        encoding: &'static str,
        offset: usize,
    },
    #[error("character {0:?} is not representable in {1}")]
    Unrepresentable(char, &'static str),
}

/// A named byte encoding the bridge can convert from and to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// UTF-8, the canonical and default encoding.
    #[default]
    Utf8,
    /// ISO 8859-1: each byte widens to the code point of the same value.
    Latin1,
}

impl Encoding {
    /// Resolve an encoding from the spellings found in rule-file SET
    /// lines. Case-insensitive; hyphens, underscores and spaces in the
    /// name are ignored. Unknown names fail immediately and abort only
    /// the requested conversion, not the caller's whole run.
    pub fn from_name(name: &str) -> Result<Encoding, EncodingError> {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_uppercase())
            .collect();
        match normalized.as_str() {
            "UTF8" => Ok(Encoding::Utf8),
            "ISO88591" | "LATIN1" | "88591" => Ok(Encoding::Latin1),
            _ => Err(EncodingError::UnknownName(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Latin1 => "ISO8859-1",
        }
    }

    /// Decode bytes into the canonical form, failing on malformed input.
    pub fn decode(self, bytes: &[u8]) -> Result<String, EncodingError> {
        match self {
            Encoding::Utf8 => std::str::from_utf8(bytes).map(str::to_owned).map_err(|e| {
                EncodingError::Malformed {
                    encoding: "UTF-8",
                    offset: e.valid_up_to(),
                }
            }),
            // Latin-1 bytes widen directly to code points; total.
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }

    /// Decode into a caller-supplied buffer, substituting U+FFFD for
    /// malformed sequences. Returns whether the input was fully valid.
    pub fn decode_lossy_into(self, bytes: &[u8], out: &mut String) -> bool {
        match self {
            Encoding::Utf8 => {
                let mut valid = true;
                let mut rest = bytes;
                loop {
                    match std::str::from_utf8(rest) {
                        Ok(s) => {
                            out.push_str(s);
                            return valid;
                        }
                        Err(e) => {
                            valid = false;
                            let (good, bad) = rest.split_at(e.valid_up_to());
                            // good is valid by construction
                            out.push_str(&String::from_utf8_lossy(good));
                            out.push('\u{FFFD}');
                            let skip = e.error_len().unwrap_or(bad.len());
                            rest = &bad[skip.min(bad.len())..];
                            if rest.is_empty() {
                                return valid;
                            }
                        }
                    }
                }
            }
            Encoding::Latin1 => {
                out.extend(bytes.iter().map(|&b| char::from(b)));
                true
            }
        }
    }

    /// Encode text into the target encoding, failing on the first
    /// unrepresentable character.
    pub fn encode(self, text: &str) -> Result<Vec<u8>, EncodingError> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(c as u32)
                        .map_err(|_| EncodingError::Unrepresentable(c, "ISO8859-1"))
                })
                .collect(),
        }
    }

    /// Encode into a caller-supplied buffer, substituting `?` for
    /// unrepresentable characters. Returns whether everything fit.
    pub fn encode_into(self, text: &str, out: &mut Vec<u8>) -> bool {
        match self {
            Encoding::Utf8 => {
                out.extend_from_slice(text.as_bytes());
                true
            }
            Encoding::Latin1 => {
                let mut fit = true;
                for c in text.chars() {
                    match u8::try_from(c as u32) {
                        Ok(b) => out.push(b),
                        Err(_) => {
                            out.push(b'?');
                            fit = false;
                        }
                    }
                }
                fit
            }
        }
    }
}

/// The explicit, passed-down text context: which byte encoding and which
/// case-mapping locale are in effect for the current operation.
///
/// Replaces ambient global locale state. Operations that must not be
/// affected by the surrounding context run inside [`TextContext::neutral_scope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextContext {
    pub encoding: Encoding,
    pub locale: Locale,
}

impl TextContext {
    pub fn new(encoding: Encoding, locale: Locale) -> Self {
        Self { encoding, locale }
    }

    /// Force the context into the neutral state (UTF-8, root locale) for
    /// the lifetime of the returned guard. The prior state is restored
    /// unconditionally when the guard drops, including on unwind paths.
    pub fn neutral_scope(&mut self) -> NeutralScope<'_> {
        let saved = *self;
        self.encoding = Encoding::Utf8;
        self.locale = Locale::Root;
        NeutralScope { ctx: self, saved }
    }
}

/// Guard returned by [`TextContext::neutral_scope`]. Exclusively borrows
/// the context, so no other code can observe or change it while the
/// neutral state is in effect.
pub struct NeutralScope<'a> {
    ctx: &'a mut TextContext,
    saved: TextContext,
}

impl NeutralScope<'_> {
    pub fn context(&self) -> &TextContext {
        self.ctx
    }
}

impl Drop for NeutralScope<'_> {
    fn drop(&mut self) {
        *self.ctx = self.saved;
    }
}
