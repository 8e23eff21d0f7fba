use alloc::{string::String, vec, vec::Vec};

use super::*;

fn text(s: &str) -> Scanner<char> {
    Scanner::from(s)
}

fn collect(run: &[char]) -> String {
    run.iter().collect()
}

#[test]
fn step_consumes_only_on_match() {
    let mut s = text("hello");
    assert_eq!(s.step(|c| *c == 'h'), Some('h'));
    assert_eq!(s.position(), 1);
    // Rejected: nothing moves.
    assert_eq!(s.step(|c| *c == 'l'), None);
    assert_eq!(s.position(), 1);
    assert_eq!(s.step(|c| *c == 'e'), Some('e'));
    assert_eq!(s.peek(), Some(&'l'));
}

#[test]
fn rejected_step_keeps_pending_cr() {
    let mut s = text("\r\n");
    assert_eq!(s.next_element(), Some('\r'));
    let before = s.debug_state();
    assert_eq!(before, (1, 2, true));
    assert_eq!(s.step(|c| *c == 'x'), None);
    assert_eq!(s.debug_state(), before);
    // The LF still belongs to the CRLF pair.
    assert_eq!(s.next_element(), Some('\n'));
    assert_eq!(s.debug_state(), (2, 2, false));
}

#[test]
fn line_numbers_per_element() {
    let mut s = text("one\ntwo\r\nthree\rfour");
    let mut lines = Vec::new();
    while s.next_element().is_some() {
        lines.push(s.line_number());
    }
    assert_eq!(
        lines,
        vec![1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4]
    );
    assert_eq!(s.line_number(), 4);
}

#[test]
fn consecutive_breaks() {
    // LF LF, CR CR, CRLF CRLF, LF CR.
    for (input, expected) in [
        ("\n\n", 3),
        ("\r\r", 3),
        ("\r\n\r\n", 3),
        ("\n\r", 3),
        ("\r\n\n", 3),
    ] {
        let mut s = text(input);
        s.skip(|_| true);
        assert_eq!(s.line_number(), expected, "input {input:?}");
    }
}

#[test]
fn match_while_is_greedy_and_returns_run() {
    let mut s = text("abc123");
    assert_eq!(collect(s.match_while(|c| c.is_ascii_alphabetic())), "abc");
    assert_eq!(s.position(), 3);
    assert_eq!(collect(s.match_while(|c| c.is_ascii_alphabetic())), "");
    assert_eq!(collect(s.match_while(|c| c.is_ascii_digit())), "123");
    assert!(s.is_exhausted());
    // Exhausted: still no error.
    assert!(s.match_while(|_| true).is_empty());
    assert_eq!(s.step(|_| true), None);
}

#[test]
fn match_until_stops_before_delimiter() {
    let mut s = text("key=value");
    assert_eq!(collect(s.match_until(|c| *c == '=')), "key");
    assert_eq!(s.peek(), Some(&'='));
    // Already on the delimiter.
    assert!(s.match_until(|c| *c == '=').is_empty());
    s.skip_one();
    assert_eq!(collect(s.match_until(|c| *c == '=')), "value");
    assert!(s.is_exhausted());
}

#[test]
fn enforce_step_reasons() {
    let mut s = text("a");
    let err = s.enforce_step(|c| *c == 'b').unwrap_err();
    assert_eq!(err.reason(), FailureReason::Rejected);
    assert_eq!(err.position(), 0);
    assert_eq!(s.enforce_step(|c| *c == 'a'), Ok('a'));
    let err = s.enforce_step(|_| true).unwrap_err();
    assert_eq!(err.reason(), FailureReason::Exhausted);
    assert_eq!(err.position(), 1);
}

#[test]
fn enforce_match_and_until_fail_on_empty() {
    let mut s = text("  x\ny");
    let err = s.enforce_match(|c| c.is_alphabetic()).unwrap_err();
    assert_eq!(err.reason(), FailureReason::Empty);
    assert_eq!(s.position(), 0);

    assert_eq!(s.enforce_match(|c| *c == ' ').map(<[char]>::len), Ok(2));
    assert_eq!(
        s.enforce_until(|c| *c == '\n').map(collect),
        Ok(String::from("x"))
    );
    let err = s.enforce_until(|c| *c == '\n').unwrap_err();
    assert_eq!(err.reason(), FailureReason::Empty);
    assert_eq!((err.position(), err.line()), (3, 1));

    s.skip_one();
    assert_eq!(s.line_number(), 2);
    assert_eq!(s.enforce_until(|c| *c == '\n').map(collect), Ok(String::from("y")));
    let err = s.enforce_until(|c| *c == '\n').unwrap_err();
    assert_eq!((err.reason(), err.line()), (FailureReason::Empty, 2));
}

#[test]
fn chaining_observes_previous_cursor() {
    let mut s = text("  name: value");
    let mut name = String::new();
    let mut colon = ' ';
    let mut value = String::new();
    s.skip_whitespace()
        .enforce_match_into(|c| c.is_alphabetic(), &mut name)
        .and_then(|s| s.enforce_step_into(|c| *c == ':', &mut colon))
        .map(Scanner::skip_whitespace)
        .and_then(|s| s.enforce_until_into(|c| *c == ';', &mut value))
        .unwrap();
    assert_eq!((name.as_str(), colon, value.as_str()), ("name", ':', "value"));
    assert!(s.is_exhausted());
}

#[test]
fn failed_chain_leaves_slot_untouched() {
    let mut s = text("ab");
    let mut slot = '?';
    let err = s
        .skip_step(|c| *c == 'a')
        .enforce_step_into(|c| *c == 'a', &mut slot)
        .unwrap_err();
    assert_eq!(slot, '?');
    assert_eq!(err.position(), 1);
    assert_eq!(s.remaining(), &['b']);
}

#[test]
fn failed_run_chain_leaves_slot_untouched() {
    let mut s = text("ab;");
    let mut slot = String::from("kept");
    let err = s
        .enforce_match_into(|c| c.is_ascii_digit(), &mut slot)
        .unwrap_err();
    assert_eq!((err.reason(), err.position()), (FailureReason::Empty, 0));
    assert_eq!(slot, "kept");

    s.skip(|c| c.is_alphabetic());
    let err = s.enforce_until_into(|c| *c == ';', &mut slot).unwrap_err();
    assert_eq!((err.reason(), err.position()), (FailureReason::Empty, 2));
    assert_eq!(slot, "kept");
    assert_eq!(s.remaining(), &[';']);
}

#[test]
fn collected_scanner_tracks_lines() {
    let mut s = "a\rb".chars().collect::<Scanner<char>>();
    assert!(s.tracks_lines());
    assert_eq!(s.as_slice(), &['a', '\r', 'b']);
    s.skip_until(|c| *c == 'b');
    assert_eq!(s.line_number(), 2);
    // The whole sequence stays visible regardless of the cursor.
    assert_eq!(s.as_slice().len(), s.consumed().len() + s.remaining().len());
    assert_eq!(s.as_slice(), &['a', '\r', 'b']);
}

#[test]
fn skip_variants() {
    let mut s = text("xx--yy");
    s.skip_step(|c| *c == 'y');
    assert_eq!(s.position(), 0);
    s.skip_step(|c| *c == 'x').skip(|c| *c == 'x');
    assert_eq!(s.position(), 2);
    s.skip_until(|c| *c == 'y').skip_one();
    assert_eq!(s.consumed(), &['x', 'x', '-', '-', 'y']);
    s.skip_one().skip_one();
    assert!(s.is_exhausted());
}

#[test]
fn default_is_empty_and_exhausted() {
    let mut s = Scanner::<char>::default();
    assert!(s.is_empty());
    assert_eq!(s.tracks_lines(), Scanner::<char>::new(Vec::new()).tracks_lines());
    assert!(!s.has_more());
    assert_eq!(s.line_number(), 1);
    assert!(s.match_while(|_| true).is_empty());
    assert_eq!(
        s.enforce_match(|_| true).unwrap_err().reason(),
        FailureReason::Empty
    );
}

#[test]
fn binary_mode_ignores_breaks() {
    let mut s = Scanner::binary(&b"\r\n\n\r"[..]);
    assert!(!s.tracks_lines());
    s.skip(|_| true);
    assert_eq!(s.debug_state(), (4, 1, false));

    let mut s = Scanner::<char>::from("\r\n\n\r");
    assert!(s.tracks_lines());
    s.skip(|_| true);
    assert_eq!(s.line_number(), 3);
}

#[test]
fn utf16_units() {
    let mut s = Scanner::<u16>::from("a\u{3000}b\r\nc");
    s.skip_step(|u| *u == u16::from(b'a')).skip_whitespace();
    assert_eq!(s.step(|_| true), Some(u16::from(b'b')));
    s.skip_whitespace();
    assert_eq!(s.line_number(), 2);
    assert_eq!(s.remaining(), &[u16::from(b'c')]);
}

#[test]
fn utf8_units_only_skip_ascii_whitespace() {
    // NO-BREAK SPACE is two bytes in UTF-8.
    let mut s = Scanner::<u8>::from(" \u{a0}x");
    s.skip_whitespace();
    assert_eq!(s.position(), 1);
    assert_eq!(s.peek(), Some(&0xC2));
}

#[test]
fn code_points_as_u32() {
    let mut s = Scanner::<u32>::from("\u{2003}\u{1F600}\r");
    s.skip_whitespace();
    assert_eq!(s.next_element(), Some(0x1F600));
    s.skip_one();
    assert_eq!(s.line_number(), 2);
}

#[test]
fn lossy_utf8_replaces_invalid() {
    let mut s = Scanner::from_utf8_lossy(b"ok\xFFgo");
    assert_eq!(collect(s.match_while(|c| c.is_ascii())), "ok");
    assert_eq!(s.next_element(), Some('\u{FFFD}'));
    assert_eq!(collect(s.remaining()), "go");
}

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Ident(&'static str),
    Num(i64),
    Plus,
}

#[test]
fn token_sequences() {
    let mut s = Scanner::tokens(vec![Tok::Num(1), Tok::Plus, Tok::Num(2), Tok::Ident("x")]);
    assert!(!s.tracks_lines());
    let lhs = s.enforce_step(|t| matches!(t, Tok::Num(_))).unwrap();
    assert_eq!(lhs, Tok::Num(1));
    s.enforce_step(|t| *t == Tok::Plus).unwrap();
    let rest = s.match_until(|t| matches!(t, Tok::Ident(_))).to_vec();
    assert_eq!(rest, vec![Tok::Num(2)]);
    assert_eq!(s.peek(), Some(&Tok::Ident("x")));
    assert_eq!(s.line_number(), 1);
}

#[test]
fn with_options_disables_tracking() {
    let options = ScannerOptions {
        line_tracking: LineTracking::Disabled,
    };
    let mut s = Scanner::with_options(vec!['\n', '\r'], options);
    s.skip_one().skip_one();
    assert_eq!(s.line_number(), 1);
    assert_eq!(&*s.into_inner(), &['\n', '\r']);
}

#[test]
fn failure_display() {
    let mut s = text("\n?");
    s.skip_one();
    let err = s.enforce_step(char::is_ascii_digit).unwrap_err();
    assert_eq!(
        alloc::format!("{err}"),
        "element did not match at position 1 (line 2)"
    );
}
