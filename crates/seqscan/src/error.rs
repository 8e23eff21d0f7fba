use thiserror::Error;

/// Raised by the `enforce_*` family when a required match does not happen.
///
/// Carries the cursor position and line number at the point of failure. The
/// scanner state is left exactly as it was before the failing call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{reason} at position {position} (line {line})")]
pub struct MatchFailure {
    pub(crate) reason: FailureReason,
    pub(crate) position: usize,
    pub(crate) line: usize,
}

/// Why an enforced match failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureReason {
    /// The scanner had no element left to inspect.
    #[error("unexpected end of input")]
    Exhausted,
    /// The predicate refused the element under the cursor.
    #[error("element did not match")]
    Rejected,
    /// A greedy match (or until-match) consumed nothing.
    #[error("empty match")]
    Empty,
}

impl MatchFailure {
    pub(crate) fn new(reason: FailureReason, position: usize, line: usize) -> Self {
        Self {
            reason,
            position,
            line,
        }
    }

    /// The kind of failure.
    #[must_use]
    pub fn reason(&self) -> FailureReason {
        self.reason
    }

    /// Cursor position at which the failure was raised.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Line number at which the failure was raised. Always `1` for scanners
    /// without line tracking.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }
}
