//! Line and column lookup for diagnostics.
//!
//! Locations are recomputed by scanning from the start of the source on
//! every call. They are only needed when rendering a diagnostic, so no
//! line table is built or cached.

/// Where a token sits in its source line.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct TokenLocation {
    /// Byte offset of the start of the line.
    pub line_offset: u32,
    /// Length of the line in bytes, excluding `\n` or `\r\n`.
    pub line_length: u32,
    /// 1-based line number, shifted by the lexer's starting line offset.
    pub line_number: u32,
    /// 0-based byte column within the line.
    pub column: u32,
}

impl TokenLocation {
    /// 1-based column, for display.
    #[inline]
    pub fn display_column(&self) -> u32 {
        self.column + 1
    }
}

/// Compute the location of byte `offset` by linear scan.
///
/// `offset` is clamped to the source length. `first_line` is the number of
/// lines that precede the source (0 for a standalone file).
pub(crate) fn locate(source: &[u8], offset: usize, first_line: u32) -> TokenLocation {
    let offset = offset.min(source.len());

    let mut line_start = 0usize;
    let mut line_number = first_line.saturating_add(1);
    for (i, &byte) in source[..offset].iter().enumerate() {
        if byte == b'\n' {
            line_number = line_number.saturating_add(1);
            line_start = i + 1;
        }
    }

    let mut line_end = source[line_start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(source.len(), |p| line_start + p);
    if line_end > line_start && source[line_end - 1] == b'\r' {
        line_end -= 1;
    }

    TokenLocation {
        line_offset: to_u32(line_start),
        line_length: to_u32(line_end - line_start),
        line_number,
        column: to_u32(offset - line_start),
    }
}

#[inline]
fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
