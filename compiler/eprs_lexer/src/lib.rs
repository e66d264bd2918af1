//! Byte-classifying tokenizer for the EPRS grammar engine.
//!
//! Turns source text into a dense array of [`Token`]s. Each token is either
//! a caller-registered word (longest match wins) or a single byte classified
//! through a fixed 128-entry table. Tokens partition the source exactly: no
//! gaps, no overlaps, and the last token ends at the source length.
//!
//! Lexing never fails. Bytes the table does not map, including every
//! non-ASCII byte, become single `UNKNOWN` tokens.
//!
//! # Example
//!
//! ```
//! use eprs_lexer::{Lexer, TokenType};
//!
//! let lexer = Lexer::with_words("if x", "input", 0, ["if"]);
//! assert_eq!(lexer.token_count(), 3);
//! assert!(lexer.get_token(0).is(TokenType::WORD));
//! assert!(lexer.get_token(99).ty.is_eof());
//! ```

mod classify;
mod location;
mod token;
mod words;

use std::borrow::Cow;

pub use classify::classify;
pub use location::TokenLocation;
pub use token::{Span, Token, TokenType};
pub use words::WordList;

/// Tokenized source plus the metadata needed to describe it in diagnostics.
///
/// Built once, then read-only: the parser borrows it for the whole parse.
#[derive(Clone, Debug)]
pub struct Lexer {
    source: String,
    file_name: String,
    line_offset: u32,
    tokens: Vec<Token>,
}

impl Lexer {
    /// Tokenize `source` with no registered words.
    ///
    /// `file_name` and `line_offset` are only used for diagnostics;
    /// `line_offset` is the number of lines preceding `source` in its file.
    pub fn tokenize(source: &str, file_name: &str, line_offset: u32) -> Self {
        Self::with_word_list(source, file_name, line_offset, &WordList::default())
    }

    /// Tokenize `source`, emitting each occurrence of a registered word as a
    /// single `WORD` token.
    pub fn with_words<I, S>(source: &str, file_name: &str, line_offset: u32, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_word_list(source, file_name, line_offset, &WordList::new(words))
    }

    /// Tokenize `source` against a prebuilt word list.
    pub fn with_word_list(source: &str, file_name: &str, line_offset: u32, words: &WordList) -> Self {
        let tokens = scan(source.as_bytes(), words);
        tracing::debug!(
            file = file_name,
            bytes = source.len(),
            tokens = tokens.len(),
            words = words.len(),
            "tokenized source"
        );
        Lexer {
            source: source.to_owned(),
            file_name: file_name.to_owned(),
            line_offset,
            tokens,
        }
    }

    /// The full source text.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// File name used in diagnostics.
    #[inline]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Number of lines preceding the source in its file.
    #[inline]
    pub fn line_offset(&self) -> u32 {
        self.line_offset
    }

    /// Number of real tokens (the EOF sentinel is not counted).
    #[inline]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// All real tokens, in source order.
    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Get the token at `index`.
    ///
    /// At or past the end this returns the EOF sentinel, so callers never
    /// special-case end of input.
    #[inline]
    pub fn get_token(&self, index: usize) -> Token {
        match self.tokens.get(index) {
            Some(tok) => *tok,
            None => Token::eof(self.source_len()),
        }
    }

    /// Raw bytes of the token at `index` (empty for EOF).
    #[inline]
    pub fn token_bytes(&self, index: usize) -> &[u8] {
        self.span_bytes(self.get_token(index).span())
    }

    /// Text of the token at `index`.
    ///
    /// A token holding part of a multi-byte character is rendered lossily.
    pub fn token_text(&self, index: usize) -> Cow<'_, str> {
        String::from_utf8_lossy(self.token_bytes(index))
    }

    /// Raw bytes covered by `span`, clamped to the source.
    #[inline]
    pub fn span_bytes(&self, span: Span) -> &[u8] {
        let bytes = self.source.as_bytes();
        let end = (span.end as usize).min(bytes.len());
        let start = (span.start as usize).min(end);
        &bytes[start..end]
    }

    /// Location of the token at `index`.
    ///
    /// O(n) in the source length: scans from the start every time.
    /// Intended for diagnostics only.
    pub fn get_token_loc(&self, index: usize) -> TokenLocation {
        let tok = self.get_token(index);
        location::locate(self.source.as_bytes(), tok.start as usize, self.line_offset)
    }

    /// Text of the line described by `loc`, without its terminator.
    pub fn line_text(&self, loc: &TokenLocation) -> Cow<'_, str> {
        let start = loc.line_offset;
        String::from_utf8_lossy(self.span_bytes(Span::new(start, start + loc.line_length)))
    }

    fn source_len(&self) -> u32 {
        u32::try_from(self.source.len()).unwrap_or(u32::MAX)
    }
}

/// Partition `bytes` into tokens.
fn scan(bytes: &[u8], words: &WordList) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(bytes.len());
    let mut pos = 0usize;
    while pos < bytes.len() {
        let rest = &bytes[pos..];
        let (ty, len) = match words.longest_match(rest) {
            Some(len) => (TokenType::WORD, len),
            None => (classify(rest[0]), 1),
        };
        let (Ok(start), Ok(len32)) = (u32::try_from(pos), u32::try_from(len)) else {
            tracing::warn!(
                offset = pos,
                bytes = bytes.len(),
                "source exceeds 4 GiB; remaining bytes are not tokenized"
            );
            break;
        };
        tokens.push(Token::new(ty, start, len32));
        pos += len;
    }
    tokens
}
