//! Token representation: spans, category bitmasks, and tokens.

use std::fmt;

use bitflags::bitflags;

/// Source location span.
///
/// Layout: 8 bytes total
/// - start: u32 - byte offset from source start
/// - end: u32 - byte offset (exclusive)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Empty span at the start of the source.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Create an empty span at a position.
    #[inline]
    pub const fn point(pos: u32) -> Self {
        Span {
            start: pos,
            end: pos,
        }
    }

    /// Length in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Check if the span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

bitflags! {
    /// Token category bitmask.
    ///
    /// A token may belong to several categories at once: an upper-case
    /// letter is `ALPHA | UPPER`, a newline is `WS | NL`. Grammar token
    /// terms match when their requested mask intersects the token's mask.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TokenType: u32 {
        /// `0-9`
        const DIGIT = 1 << 0;
        /// Any ASCII letter.
        const ALPHA = 1 << 1;
        /// `A-Z`
        const UPPER = 1 << 2;
        /// `a-z`
        const LOWER = 1 << 3;
        /// Printable ASCII punctuation other than quotes and brackets.
        const SYMBOL = 1 << 4;
        /// `'`, `"`, and backtick.
        const QUOTE = 1 << 5;
        /// `()[]{}`
        const PAREN = 1 << 6;
        /// Any whitespace byte.
        const WS = 1 << 7;
        const SPACE = 1 << 8;
        const TAB = 1 << 9;
        const CR = 1 << 10;
        const NL = 1 << 11;
        /// Literal `\0` byte.
        const NULL = 1 << 12;
        /// A caller-registered word.
        const WORD = 1 << 13;
        /// Control bytes, DEL, and non-ASCII bytes.
        const UNKNOWN = 1 << 14;
        /// End-of-input sentinel.
        const EOF = 1 << 15;

        const ALNUM = Self::DIGIT.bits() | Self::ALPHA.bits();
        const PUNCT = Self::SYMBOL.bits() | Self::QUOTE.bits() | Self::PAREN.bits();
        const NEWLINE = Self::CR.bits() | Self::NL.bits();
    }
}

/// Single-bit categories in display order.
const CATEGORY_NAMES: [(TokenType, &str); 16] = [
    (TokenType::DIGIT, "DIGIT"),
    (TokenType::ALPHA, "ALPHA"),
    (TokenType::UPPER, "UPPER"),
    (TokenType::LOWER, "LOWER"),
    (TokenType::SYMBOL, "SYMBOL"),
    (TokenType::QUOTE, "QUOTE"),
    (TokenType::PAREN, "PAREN"),
    (TokenType::WS, "WS"),
    (TokenType::SPACE, "SPACE"),
    (TokenType::TAB, "TAB"),
    (TokenType::CR, "CR"),
    (TokenType::NL, "NL"),
    (TokenType::NULL, "NULL"),
    (TokenType::WORD, "WORD"),
    (TokenType::UNKNOWN, "UNKNOWN"),
    (TokenType::EOF, "EOF"),
];

impl TokenType {
    /// Check if this is the end-of-input sentinel.
    #[inline]
    pub fn is_eof(self) -> bool {
        self.contains(TokenType::EOF)
    }
}

impl fmt::Display for TokenType {
    /// Upper-case category names joined with `|`, e.g. `ALPHA|UPPER`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (ty, name) in CATEGORY_NAMES {
            if self.contains(ty) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if first {
            f.write_str("NONE")?;
        }
        Ok(())
    }
}

/// A classified span of source text.
///
/// `start + len` never exceeds the source length. The EOF sentinel has
/// `len == 0` and starts at the end of the source.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub ty: TokenType,
    pub start: u32,
    pub len: u32,
}

impl Token {
    /// Create a new token.
    #[inline]
    pub const fn new(ty: TokenType, start: u32, len: u32) -> Self {
        Token { ty, start, len }
    }

    /// The end-of-input sentinel for a source of `source_len` bytes.
    #[inline]
    pub const fn eof(source_len: u32) -> Self {
        Token {
            ty: TokenType::EOF,
            start: source_len,
            len: 0,
        }
    }

    /// Byte offset one past the token's last byte.
    #[inline]
    pub const fn end(&self) -> u32 {
        self.start + self.len
    }

    /// The token's byte span.
    #[inline]
    pub const fn span(&self) -> Span {
        Span::new(self.start, self.start + self.len)
    }

    /// Check if the token's category mask intersects `ty`.
    #[inline]
    pub fn is(&self, ty: TokenType) -> bool {
        self.ty.intersects(ty)
    }
}
