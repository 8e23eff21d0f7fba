//! A generic, stateful sequential scanner for hand-written parsers.
//!
//! [`Scanner`] wraps an owned sequence of elements (bytes, UTF-16 code units,
//! code points, or arbitrary token values) and a cursor. Parsers are written
//! by composing predicate-driven primitives: step one element, match a run
//! while or until a predicate holds, skip whitespace, and enforce that
//! something matched.
//!
//! ```rust
//! use seqscan::Scanner;
//!
//! let mut s = Scanner::<char>::from("a fox jumped");
//! let mut words = Vec::new();
//! while s.skip_whitespace().has_more() {
//!     let word: String = s.match_while(|c: &char| c.is_alphabetic()).iter().collect();
//!     words.push(word);
//! }
//! assert_eq!(words, ["a", "fox", "jumped"]);
//! ```
//!
//! Failed `enforce_*` calls emit a `tracing` event at `TRACE` level with the
//! failure reason, position and line.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod options;
mod scanner;
mod unit;


pub use error::{FailureReason, MatchFailure};
pub use options::{LineTracking, ScannerOptions};
pub use scanner::Scanner;
pub use unit::{LineBreak, TextUnit};
