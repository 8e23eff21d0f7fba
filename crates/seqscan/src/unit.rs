//! Textual element types.
//!
//! A [`TextUnit`] is an element the scanner can interpret as a character: it
//! knows whether it is a line break and whether it is whitespace. Scanners
//! over text units track line numbers; scanners over arbitrary values do not.
//!
//! Supported widths:
//! - `u8`: UTF-8 code units. Multi-byte sequences never match, so only ASCII
//!   whitespace is recognised.
//! - `u16`: UTF-16 code units. Every Unicode whitespace character lives in the
//!   BMP; surrogate halves are never whitespace.
//! - `u32` and `char`: code points. `u32` values outside the scalar range are
//!   inert.

/// A line terminator element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineBreak {
    /// `\n`
    Lf,
    /// `\r`
    Cr,
}

/// Capability of an element type to be treated as a textual character.
pub trait TextUnit {
    /// Returns the line terminator this element represents, if any.
    fn line_break(&self) -> Option<LineBreak>;

    /// Whether this element is Unicode whitespace.
    fn is_whitespace(&self) -> bool;
}

#[inline]
fn classify_scalar(c: u32) -> Option<LineBreak> {
    match c {
        0x0A => Some(LineBreak::Lf),
        0x0D => Some(LineBreak::Cr),
        _ => None,
    }
}

impl TextUnit for char {
    #[inline]
    fn line_break(&self) -> Option<LineBreak> {
        classify_scalar(u32::from(*self))
    }

    #[inline]
    fn is_whitespace(&self) -> bool {
        char::is_whitespace(*self)
    }
}

impl TextUnit for u32 {
    #[inline]
    fn line_break(&self) -> Option<LineBreak> {
        classify_scalar(*self)
    }

    #[inline]
    fn is_whitespace(&self) -> bool {
        char::from_u32(*self).is_some_and(char::is_whitespace)
    }
}

impl TextUnit for u16 {
    #[inline]
    fn line_break(&self) -> Option<LineBreak> {
        classify_scalar(u32::from(*self))
    }

    #[inline]
    fn is_whitespace(&self) -> bool {
        char::from_u32(u32::from(*self)).is_some_and(char::is_whitespace)
    }
}

impl TextUnit for u8 {
    #[inline]
    fn line_break(&self) -> Option<LineBreak> {
        classify_scalar(u32::from(*self))
    }

    // Matches `char::is_whitespace` restricted to single-byte UTF-8, which
    // includes the vertical tab unlike `u8::is_ascii_whitespace`.
    #[inline]
    fn is_whitespace(&self) -> bool {
        matches!(*self, b'\t' | b'\n' | 0x0B | 0x0C | b'\r' | b' ')
    }
}
