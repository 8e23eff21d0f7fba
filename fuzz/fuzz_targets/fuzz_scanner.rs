#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use seqscan::{FailureReason, Scanner, TextUnit};

/// Predicate over a single element, evaluated through `u32` so the same
/// program drives every element width.
#[derive(Debug, Clone, Copy, Arbitrary)]
enum Pred {
    Any,
    Never,
    Whitespace,
    LineBreak,
    Ascii,
    Below(u32),
    Exactly(u32),
}

impl Pred {
    fn test(self, v: u32, ws: bool) -> bool {
        match self {
            Pred::Any => true,
            Pred::Never => false,
            Pred::Whitespace => ws,
            Pred::LineBreak => v == 0x0A || v == 0x0D,
            Pred::Ascii => v < 0x80,
            Pred::Below(n) => v < n,
            Pred::Exactly(n) => v == n,
        }
    }
}

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Op {
    Step(Pred),
    Match(Pred),
    Until(Pred),
    EnforceStep(Pred),
    EnforceMatch(Pred),
    EnforceUntil(Pred),
    SkipOne,
    SkipWhitespace,
}

#[derive(Debug, Arbitrary)]
struct Input {
    text: Vec<u8>,
    ops: Vec<Op>,
    binary: bool,
}

/// Counts every CR and every LF not directly after a CR.
fn expected_line<T: Copy + Into<u32>>(consumed: &[T]) -> usize {
    let mut line = 1;
    let mut prev = 0u32;
    for &u in consumed {
        let v = u.into();
        if v == 0x0D || (v == 0x0A && prev != 0x0D) {
            line += 1;
        }
        prev = v;
    }
    line
}

fn run<T>(mut s: Scanner<T>, ops: &[Op])
where
    T: TextUnit + Copy + Into<u32> + std::fmt::Debug,
{
    let tracking = s.tracks_lines();
    for &op in ops {
        let before = s.debug_state();
        let at = s.peek().copied();
        let pred = |p: Pred| move |e: &T| p.test((*e).into(), e.is_whitespace());
        let moved = match op {
            Op::Step(p) => s.step(pred(p)).is_some(),
            Op::Match(p) => !s.match_while(pred(p)).is_empty(),
            Op::Until(p) => !s.match_until(pred(p)).is_empty(),
            Op::EnforceStep(p) => match s.enforce_step(pred(p)) {
                Ok(_) => true,
                Err(e) => {
                    let reason = if at.is_none() {
                        FailureReason::Exhausted
                    } else {
                        FailureReason::Rejected
                    };
                    assert_eq!(e.reason(), reason);
                    assert_eq!((e.position(), e.line()), (before.0, before.1));
                    false
                }
            },
            Op::EnforceMatch(p) => s.enforce_match(pred(p)).is_ok(),
            Op::EnforceUntil(p) => s.enforce_until(pred(p)).is_ok(),
            Op::SkipOne => s.skip_one().position() != before.0,
            Op::SkipWhitespace => s.skip_whitespace().position() != before.0,
        };

        let after = s.debug_state();
        if moved {
            assert!(after.0 > before.0, "{op:?} reported progress without moving");
        } else {
            assert_eq!(after, before, "{op:?} mutated state without consuming");
        }
        assert!(after.0 <= s.len());
        let line = if tracking {
            expected_line(s.consumed())
        } else {
            1
        };
        assert_eq!(after.1, line, "{op:?} line drift");
    }
}

fuzz_target!(|input: Input| {
    if input.binary {
        run(Scanner::binary(input.text.as_slice()), &input.ops);
        return;
    }
    let text: &str = &String::from_utf8_lossy(&input.text);
    run(Scanner::<u8>::from(text), &input.ops);
    run(Scanner::<u16>::from(text), &input.ops);
    run(Scanner::<u32>::from(text), &input.ops);
    run(Scanner::from_utf8_lossy(&input.text), &input.ops);
});
