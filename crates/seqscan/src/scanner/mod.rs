//! Scanner: owner of the source sequence, the cursor and line state.
//!
//! What it does
//! - Holds an immutable sequence of elements and a cursor into it. Every
//!   operation inspects the element under the cursor with a caller predicate
//!   and either consumes it or leaves the scanner untouched.
//! - Offers four families on top of that single step: `step` (one element),
//!   `match_while`/`match_until` (greedy runs, returned as borrowed slices of
//!   the sequence), `skip*` (discarding forms that return `&mut Self` for
//!   chaining), and `enforce_*` (forms that turn "nothing matched" into a
//!   [`MatchFailure`]).
//! - Counts lines for textual element types. LF, CR and CRLF each count as
//!   one logical line break.
//!
//! Scope
//! - The scanner does not tokenize, backtrack or recover. A failed step
//!   mutates nothing; trying an alternative predicate is up to the caller.
//!
//! Invariants
//! - `cursor <= sequence.len()`, and the cursor never moves backwards.
//! - `pending_cr` is only ever set right after consuming a CR, and only while
//!   line tracking is active.
//! - Line tracking is decided once, at construction, by storing a classifier
//!   function or `None`.
//!
//! Example (word loop)
//! ```
//! use seqscan::Scanner;
//!
//! let mut s = Scanner::<char>::from("let x = 42;");
//! let mut words = Vec::new();
//! while s.skip_whitespace().has_more() {
//!     let word: String = s.match_until(|c: &char| c.is_whitespace()).iter().collect();
//!     words.push(word);
//! }
//! assert_eq!(words, ["let", "x", "=", "42;"]);
//! ```

use alloc::{boxed::Box, vec::Vec};
use core::fmt;

use tracing::trace;

use crate::{
    error::{FailureReason, MatchFailure},
    options::{LineTracking, ScannerOptions},
    unit::{LineBreak, TextUnit},
};

type Classifier<T> = fn(&T) -> Option<LineBreak>;

/// A cursor over an owned sequence of elements with predicate-driven
/// consumption.
///
/// Typical loop:
/// ```
/// use seqscan::Scanner;
///
/// let mut s = Scanner::<char>::from("key = value");
/// let mut key = String::new();
/// let mut value = String::new();
/// s.enforce_match_into(|c: &char| c.is_alphanumeric(), &mut key)?
///     .skip_whitespace()
///     .enforce_step(|c| *c == '=')?;
/// s.skip_whitespace()
///     .enforce_match_into(|c: &char| c.is_alphanumeric(), &mut value)?;
/// assert_eq!((key.as_str(), value.as_str()), ("key", "value"));
/// assert!(s.is_exhausted());
/// # Ok::<(), seqscan::MatchFailure>(())
/// ```
pub struct Scanner<T> {
    sequence: Box<[T]>,
    cursor: usize,

    // Line state
    line: usize,
    pending_cr: bool,
    classify: Option<Classifier<T>>,
}

impl<T: fmt::Debug> fmt::Debug for Scanner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("position", &self.cursor)
            .field("line", &self.line)
            .field("pending_cr", &self.pending_cr)
            .field("tracks_lines", &self.tracks_lines())
            .field("remaining", &self.remaining())
            .finish()
    }
}

/// An empty scanner, configured like [`Scanner::new`].
impl<T: TextUnit> Default for Scanner<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: TextUnit> Scanner<T> {
    /// Creates a scanner over textual elements with line tracking enabled.
    #[must_use]
    pub fn new(sequence: impl Into<Box<[T]>>) -> Self {
        Self::with_options(sequence, ScannerOptions::default())
    }

    /// Creates a scanner over textual elements.
    #[must_use]
    pub fn with_options(sequence: impl Into<Box<[T]>>, options: ScannerOptions) -> Self {
        let classify: Option<Classifier<T>> = match options.line_tracking {
            LineTracking::Enabled => Some(T::line_break as Classifier<T>),
            LineTracking::Disabled => None,
        };
        Self::from_parts(sequence.into(), classify)
    }

    /// Skips a run of Unicode whitespace.
    #[inline]
    pub fn skip_whitespace(&mut self) -> &mut Self {
        self.skip(T::is_whitespace)
    }
}

impl Scanner<u8> {
    /// Creates a scanner over raw bytes. `0x0A` and `0x0D` are ordinary
    /// bytes and the line number stays at `1`.
    #[must_use]
    pub fn binary(bytes: impl Into<Box<[u8]>>) -> Self {
        Self::with_options(bytes, ScannerOptions::binary())
    }
}

impl Scanner<char> {
    /// Decodes UTF-8 into a code point scanner, replacing invalid sequences
    /// with U+FFFD.
    #[must_use]
    pub fn from_utf8_lossy(bytes: &[u8]) -> Self {
        use bstr::ByteSlice;

        Self::new(bytes.chars().collect::<Vec<_>>())
    }
}

impl<T> Scanner<T> {
    /// Creates a scanner over arbitrary values, such as pre-lexed tokens.
    /// Line tracking is inactive.
    #[must_use]
    pub fn tokens(sequence: impl Into<Box<[T]>>) -> Self {
        Self::from_parts(sequence.into(), None)
    }

    fn from_parts(sequence: Box<[T]>, classify: Option<Classifier<T>>) -> Self {
        Self {
            sequence,
            cursor: 0,
            line: 1,
            pending_cr: false,
            classify,
        }
    }

    // --- Inspection ---------------------------------------------------------

    /// Whether any element is left to consume.
    #[inline]
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.cursor < self.sequence.len()
    }

    /// Whether the cursor has reached the end of the sequence.
    #[inline]
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        !self.has_more()
    }

    /// The element under the cursor, without consuming it.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.sequence.get(self.cursor)
    }

    /// Current cursor position, in elements.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Current 1-based line number.
    #[inline]
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Whether this scanner counts line breaks.
    #[must_use]
    pub fn tracks_lines(&self) -> bool {
        self.classify.is_some()
    }

    /// Length of the whole sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Whether the whole sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// The unread tail of the sequence.
    #[must_use]
    pub fn remaining(&self) -> &[T] {
        &self.sequence[self.cursor..]
    }

    /// Everything consumed so far.
    #[must_use]
    pub fn consumed(&self) -> &[T] {
        &self.sequence[..self.cursor]
    }

    /// The whole sequence.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.sequence
    }

    /// Gives back the owned sequence.
    #[must_use]
    pub fn into_inner(self) -> Box<[T]> {
        self.sequence
    }

    /// Cursor, line number and pending-CR flag.
    #[cfg(any(test, feature = "fuzzing"))]
    #[must_use]
    pub fn debug_state(&self) -> (usize, usize, bool) {
        (self.cursor, self.line, self.pending_cr)
    }

    // --- Stepping -----------------------------------------------------------

    /// Consumes the element under the cursor if `predicate` accepts it.
    ///
    /// Returns `None` when exhausted or when the predicate refuses the
    /// element; in both cases neither the cursor nor the line state changes.
    #[inline]
    pub fn step(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Option<T>
    where
        T: Clone,
    {
        let at = self.cursor;
        if self.accept(&mut predicate) {
            Some(self.sequence[at].clone())
        } else {
            None
        }
    }

    /// Consumes one element unconditionally.
    #[inline]
    pub fn next_element(&mut self) -> Option<T>
    where
        T: Clone,
    {
        self.step(|_| true)
    }

    /// Like [`step`](Self::step), but a refusal is an error.
    ///
    /// # Errors
    ///
    /// [`FailureReason::Exhausted`] at the end of input,
    /// [`FailureReason::Rejected`] when the predicate refuses the element.
    pub fn enforce_step(&mut self, predicate: impl FnMut(&T) -> bool) -> Result<T, MatchFailure>
    where
        T: Clone,
    {
        if self.is_exhausted() {
            return Err(self.failure(FailureReason::Exhausted));
        }
        self.step(predicate)
            .ok_or_else(|| self.failure(FailureReason::Rejected))
    }

    /// Chaining form of [`enforce_step`](Self::enforce_step): the element is
    /// written to `out`.
    ///
    /// # Errors
    ///
    /// See [`enforce_step`](Self::enforce_step). `out` is untouched on error.
    pub fn enforce_step_into(
        &mut self,
        predicate: impl FnMut(&T) -> bool,
        out: &mut T,
    ) -> Result<&mut Self, MatchFailure>
    where
        T: Clone,
    {
        *out = self.enforce_step(predicate)?;
        Ok(self)
    }

    // --- Matching -----------------------------------------------------------

    /// Greedily consumes elements while `predicate` holds and returns them.
    ///
    /// The result borrows the sequence; it is empty when nothing matched.
    pub fn match_while(&mut self, mut predicate: impl FnMut(&T) -> bool) -> &[T] {
        let start = self.cursor;
        while self.accept(&mut predicate) {}
        &self.sequence[start..self.cursor]
    }

    /// Consumes elements up to, not including, the first one for which
    /// `predicate` holds, or to the end of input.
    pub fn match_until(&mut self, mut predicate: impl FnMut(&T) -> bool) -> &[T] {
        self.match_while(|e| !predicate(e))
    }

    /// Like [`match_while`](Self::match_while), but an empty run is an error.
    ///
    /// # Errors
    ///
    /// [`FailureReason::Empty`] when no element matched.
    pub fn enforce_match(
        &mut self,
        predicate: impl FnMut(&T) -> bool,
    ) -> Result<&[T], MatchFailure> {
        let start = self.cursor;
        self.match_while(predicate);
        self.non_empty_since(start)
    }

    /// Like [`match_until`](Self::match_until), but an empty run is an error.
    ///
    /// # Errors
    ///
    /// [`FailureReason::Empty`] when the cursor already sits on an element
    /// satisfying `predicate`, or at the end of input.
    pub fn enforce_until(
        &mut self,
        predicate: impl FnMut(&T) -> bool,
    ) -> Result<&[T], MatchFailure> {
        let start = self.cursor;
        self.match_until(predicate);
        self.non_empty_since(start)
    }

    /// Chaining form of [`enforce_match`](Self::enforce_match): the run is
    /// appended to `out`.
    ///
    /// # Errors
    ///
    /// See [`enforce_match`](Self::enforce_match).
    pub fn enforce_match_into(
        &mut self,
        predicate: impl FnMut(&T) -> bool,
        out: &mut impl Extend<T>,
    ) -> Result<&mut Self, MatchFailure>
    where
        T: Clone,
    {
        out.extend(self.enforce_match(predicate)?.iter().cloned());
        Ok(self)
    }

    /// Chaining form of [`enforce_until`](Self::enforce_until): the run is
    /// appended to `out`.
    ///
    /// # Errors
    ///
    /// See [`enforce_until`](Self::enforce_until).
    pub fn enforce_until_into(
        &mut self,
        predicate: impl FnMut(&T) -> bool,
        out: &mut impl Extend<T>,
    ) -> Result<&mut Self, MatchFailure>
    where
        T: Clone,
    {
        out.extend(self.enforce_until(predicate)?.iter().cloned());
        Ok(self)
    }

    // --- Skipping -----------------------------------------------------------

    /// Discards a run of elements satisfying `predicate`.
    #[inline]
    pub fn skip(&mut self, predicate: impl FnMut(&T) -> bool) -> &mut Self {
        self.match_while(predicate);
        self
    }

    /// Discards elements up to the first one satisfying `predicate`.
    #[inline]
    pub fn skip_until(&mut self, predicate: impl FnMut(&T) -> bool) -> &mut Self {
        self.match_until(predicate);
        self
    }

    /// Discards the element under the cursor if `predicate` accepts it.
    #[inline]
    pub fn skip_step(&mut self, mut predicate: impl FnMut(&T) -> bool) -> &mut Self {
        self.accept(&mut predicate);
        self
    }

    /// Discards one element, if any.
    #[inline]
    pub fn skip_one(&mut self) -> &mut Self {
        self.accept(&mut |_: &T| true);
        self
    }

    // --- Internals ----------------------------------------------------------

    /// Single point of consumption. Mutates nothing unless the predicate
    /// accepts the element under the cursor.
    #[inline]
    fn accept(&mut self, predicate: &mut impl FnMut(&T) -> bool) -> bool {
        let accepted = self.sequence.get(self.cursor).is_some_and(|e| predicate(e));
        if accepted {
            self.bump_pos();
        }
        accepted
    }

    #[inline]
    fn bump_pos(&mut self) {
        if let Some(classify) = self.classify {
            match classify(&self.sequence[self.cursor]) {
                Some(LineBreak::Lf) if !self.pending_cr => self.line += 1,
                Some(LineBreak::Cr) => {
                    self.line += 1;
                    self.pending_cr = true;
                }
                // Plain elements and the LF of a CRLF pair.
                _ => self.pending_cr = false,
            }
        }
        self.cursor += 1;
    }

    fn non_empty_since(&self, start: usize) -> Result<&[T], MatchFailure> {
        if self.cursor == start {
            return Err(self.failure(FailureReason::Empty));
        }
        Ok(&self.sequence[start..self.cursor])
    }

    #[cold]
    fn failure(&self, reason: FailureReason) -> MatchFailure {
        trace!(%reason, position = self.cursor, line = self.line, "enforced match failed");
        MatchFailure::new(reason, self.cursor, self.line)
    }
}

impl From<&str> for Scanner<char> {
    fn from(s: &str) -> Self {
        Self::new(s.chars().collect::<Vec<_>>())
    }
}

impl From<&str> for Scanner<u32> {
    fn from(s: &str) -> Self {
        Self::new(s.chars().map(u32::from).collect::<Vec<_>>())
    }
}

impl From<&str> for Scanner<u16> {
    fn from(s: &str) -> Self {
        Self::new(s.encode_utf16().collect::<Vec<_>>())
    }
}

impl From<&str> for Scanner<u8> {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl<T: TextUnit> From<Vec<T>> for Scanner<T> {
    fn from(sequence: Vec<T>) -> Self {
        Self::new(sequence)
    }
}

impl<T: TextUnit> FromIterator<T> for Scanner<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests;
