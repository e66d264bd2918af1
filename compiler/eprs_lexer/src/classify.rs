//! Fixed byte classification table.
//!
//! Every ASCII byte maps to a category mask through a 128-entry table
//! built at compile time. Bytes at or above `0x80` are `UNKNOWN`; the
//! lexer never decodes UTF-8, so each byte of a multi-byte character
//! becomes its own token.

use crate::TokenType;

/// Category mask for every ASCII byte.
static TABLE: [TokenType; 128] = build_table();

const fn build_table() -> [TokenType; 128] {
    let mut table = [TokenType::UNKNOWN; 128];
    let mut byte: u8 = 0;
    while byte < 128 {
        table[byte as usize] = classify_ascii(byte);
        byte += 1;
    }
    table
}

const fn classify_ascii(byte: u8) -> TokenType {
    match byte {
        b'0'..=b'9' => TokenType::DIGIT,
        b'A'..=b'Z' => TokenType::ALPHA.union(TokenType::UPPER),
        b'a'..=b'z' => TokenType::ALPHA.union(TokenType::LOWER),
        b'\'' | b'"' | b'`' => TokenType::QUOTE,
        b'(' | b')' | b'[' | b']' | b'{' | b'}' => TokenType::PAREN,
        b' ' => TokenType::WS.union(TokenType::SPACE),
        b'\t' => TokenType::WS.union(TokenType::TAB),
        b'\r' => TokenType::WS.union(TokenType::CR),
        b'\n' => TokenType::WS.union(TokenType::NL),
        0 => TokenType::NULL,
        b'!'..=b'/' | b':'..=b'@' | b'\\' | b'^' | b'_' | b'|' | b'~' => TokenType::SYMBOL,
        _ => TokenType::UNKNOWN,
    }
}

/// Classify a single byte.
#[inline]
pub fn classify(byte: u8) -> TokenType {
    TABLE
        .get(usize::from(byte))
        .copied()
        .unwrap_or(TokenType::UNKNOWN)
}
