// repeat_test.rs - Integration tests for repetition strategy selection.

use std::sync::Arc;

use statrex::expr::MAX_REPEAT;
use statrex::grammar;
use statrex::matcher::*;
use statrex::prelude::*;
use statrex::visitor::{Visitor, DEFAULT_DEPTH_LIMIT};

fn visitor() -> Visitor {
    Visitor::new(Arc::new(UnicodeTraits), false, DEFAULT_DEPTH_LIMIT)
}

/// Compile and report how many hidden marks were allocated.
fn compile(expr: &Expr) -> (Sequence, u32) {
    assert!(statrex::validate::is_valid(expr), "{:?}", expr);
    let mut v = visitor();
    let seq = grammar::compile(expr, None, &mut v).unwrap();
    (seq, v.hidden_mark_count())
}

fn names(seq: &Sequence) -> Vec<&'static str> {
    seq.iter().map(Matcher::name).collect()
}

fn simple(seq: &Sequence) -> &SimpleRepeatMatcher {
    match seq.head() {
        Matcher::SimpleRepeat(rep) => rep,
        other => panic!("expected simple repeat, got {:?}", other),
    }
}

// === Simple Strategy ===

#[test]
fn star_over_pure_literal() {
    let (seq, hidden) = compile(&star('a'));
    let rep = simple(&seq);
    assert_eq!((rep.min, rep.max, rep.width), (0, MAX_REPEAT, 1));
    assert!(rep.greedy);
    assert_eq!(names(&rep.xpr), ["literal", "true"]);
    assert_eq!(hidden, 0);
}

#[test]
fn plus_and_bounded_bounds() {
    let (seq, _) = compile(&plus(digit()));
    assert_eq!((simple(&seq).min, simple(&seq).max), (1, MAX_REPEAT));

    let (seq, _) = compile(&repeat(2, 4, "ab"));
    let rep = simple(&seq);
    assert_eq!((rep.min, rep.max, rep.width), (2, 4, 2));
    assert_eq!(seq.width(), Width::Unknown);

    let (seq, _) = compile(&repeat_n(3, "ab"));
    assert_eq!(seq.width(), Width::Fixed(6));
}

#[test]
fn non_greedy_simple() {
    let (seq, hidden) = compile(&-star('a'));
    assert!(!simple(&seq).greedy);
    assert_eq!(hidden, 0);
}

#[test]
fn optional_over_pure_literal_is_optional_node() {
    for greedy in [true, false] {
        let e = if greedy { !lit('a') } else { -!lit('a') };
        let (seq, hidden) = compile(&e);
        match seq.head() {
            Matcher::Optional(opt) => {
                assert_eq!(opt.greedy, greedy);
                assert_eq!(names(&opt.xpr), ["literal", "alternate_end"]);
            }
            other => panic!("expected optional, got {:?}", other),
        }
        assert_eq!(hidden, 0);
    }
}

#[test]
fn zero_to_one_repeat_over_pure_literal_is_simple() {
    let (seq, hidden) = compile(&repeat(0, 1, 'a'));
    let rep = simple(&seq);
    assert_eq!((rep.min, rep.max), (0, 1));
    assert_eq!(hidden, 0);
}

// === Bracketed Strategy ===

#[test]
fn operand_containing_capture_allocates_one_mark() {
    let (seq, hidden) = compile(&plus(lit('a') >> capture(1, 'b')));
    assert_eq!(hidden, 1);
    assert_eq!(
        names(&seq),
        [
            "repeat_begin",
            "mark_begin",
            "literal",
            "mark_begin",
            "literal",
            "mark_end",
            "mark_end",
            "repeat_end"
        ]
    );
    assert_eq!(seq.head(), &Matcher::RepeatBegin(-1));
    assert_eq!(
        seq.iter().last(),
        Some(&Matcher::RepeatEnd(RepeatEndMatcher {
            mark: -1,
            min: 1,
            max: MAX_REPEAT,
            greedy: true
        }))
    );
    assert!(!seq.is_pure());
}

#[test]
fn top_level_capture_reuses_its_mark() {
    let (seq, hidden) = compile(&star(capture(2, 'a')));
    assert_eq!(hidden, 0);
    assert_eq!(
        seq.matchers()[..2],
        [&Matcher::RepeatBegin(2), &Matcher::MarkBegin(2)]
    );
}

#[test]
fn variable_width_operand_is_bracketed() {
    let (seq, hidden) = compile(&-repeat(2, 3, logical_newline()));
    assert_eq!(hidden, 1);
    match seq.iter().last() {
        Some(Matcher::RepeatEnd(end)) => {
            assert_eq!((end.min, end.max), (2, 3));
            assert!(!end.greedy);
        }
        other => panic!("expected repeat end, got {:?}", other),
    }
}

#[test]
fn nested_hidden_marks_number_outer_first() {
    let (seq, hidden) = compile(&plus(plus(logical_newline()) >> 'a'));
    assert_eq!(hidden, 2);
    let begins: Vec<i32> = seq
        .iter()
        .filter_map(|m| match m {
            Matcher::RepeatBegin(mark) => Some(*mark),
            _ => None,
        })
        .collect();
    assert_eq!(begins, [-1, -2]);
}

#[test]
fn alternation_numbers_rightmost_first() {
    let (seq, hidden) = compile(&(plus(logical_newline()) | plus(logical_newline() >> 'x')));
    assert_eq!(hidden, 2);
    let Matcher::Alternate(alt) = seq.head() else {
        panic!("expected alternation");
    };
    let firsts: Vec<&Matcher> = alt.alternates.iter().map(Sequence::head).collect();
    assert_eq!(firsts, [&Matcher::RepeatBegin(-2), &Matcher::RepeatBegin(-1)]);
}

// === Optional ===

#[test]
fn optional_never_allocates_a_mark() {
    let cases = [
        !capture(1, 'a'),
        -!capture(1, 'a'),
        !(lit('a') >> capture(1, 'b')),
        -!(lit('a') >> capture(1, 'b')),
        repeat(0, 1, logical_newline()),
        -repeat(0, 1, logical_newline()),
    ];
    for e in &cases {
        let (_, hidden) = compile(e);
        assert_eq!(hidden, 0, "{:?}", e);
    }
}

#[test]
fn optional_over_capture_keeps_mark() {
    let (seq, _) = compile(&-!capture(3, logical_newline()));
    match seq.head() {
        Matcher::OptionalMark(opt) => {
            assert_eq!(opt.mark, 3);
            assert!(!opt.greedy);
            assert_eq!(
                names(&opt.xpr),
                ["mark_begin", "logical_newline", "mark_end", "alternate_end"]
            );
        }
        other => panic!("expected optional mark, got {:?}", other),
    }
}

#[test]
fn greedy_optional_stays_greedy() {
    let (seq, _) = compile(&!logical_newline());
    match seq.head() {
        Matcher::Optional(opt) => assert!(opt.greedy),
        other => panic!("expected optional, got {:?}", other),
    }
}

#[test]
fn zero_to_n_is_optional_one_to_n() {
    let (seq, hidden) = compile(&repeat(0, 5, capture(1, logical_newline())));
    assert_eq!(hidden, 0);
    match seq.head() {
        Matcher::Optional(opt) => {
            assert!(opt.greedy);
            assert_eq!(opt.xpr.head(), &Matcher::RepeatBegin(1));
            let end = opt.xpr.iter().find_map(|m| match m {
                Matcher::RepeatEnd(end) => Some((end.min, end.max)),
                _ => None,
            });
            assert_eq!(end, Some((1, 5)));
        }
        other => panic!("expected optional, got {:?}", other),
    }
}
