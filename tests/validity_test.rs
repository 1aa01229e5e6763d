// validity_test.rs - Integration tests for the validity oracle.

use statrex::expr::Expr;
use statrex::prelude::*;
use statrex::validate::{check, is_valid};
use statrex::visitor::DEFAULT_DEPTH_LIMIT;

fn valid_expressions() -> Vec<Expr> {
    vec![
        lit('a'),
        lit("hello"),
        nil(),
        lit('a') >> 'b' >> 'c',
        lit('a') | 'b' | "cd",
        star(any()),
        plus(capture(1, word())),
        -repeat(1, 3, lit('a') >> logical_newline()),
        !capture(2, digit()),
        capture(1, 'a') >> mark(1),
        set_of(range('a', 'z') | range('0', '9') | '_' | space()),
        set_of(set_of(lit('a') | 'b') | 'c'),
        set_list(&['x', 'y', 'z']),
        complement(word_boundary()),
        complement('a'),
        complement(logical_newline()),
        complement(xdigit()),
        complement(range('a', 'f')),
        complement(before("ab")),
        complement(after('a')),
        complement(set_of(alpha() | '-')),
        complement(set_of(digit())),
        complement(set_list(&['a', 'b'])),
        set_of(complement(digit()) | 'a'),
        set_of(complement(logical_newline()) | 'a'),
        set_of(complement(set_of(alpha())) | '_'),
        keep(plus('a')),
        before(star('a') >> 'b'),
        after(lit("ab") >> digit()),
        icase(lit("abc") >> upper()),
        bol() >> bos() >> bow() >> word() >> eow() >> eos() >> eol(),
    ]
}

#[test]
fn valid_expressions_compile() {
    for e in valid_expressions() {
        assert!(is_valid(&e), "{:?}", e);
        assert!(StaticRegex::new(&e).is_ok(), "{:?}", e);
    }
}

fn assert_invalid(e: Expr) {
    let err = check(&e, DEFAULT_DEPTH_LIMIT).unwrap_err();
    assert!(matches!(err, RegexError::InvalidExpression { .. }), "{:?}: {:?}", e, err);
    assert!(!is_valid(&e));
    assert_eq!(StaticRegex::new(&e).unwrap_err(), err);
}

fn assert_unsupported(e: Expr) {
    let err = check(&e, DEFAULT_DEPTH_LIMIT).unwrap_err();
    assert!(matches!(err, RegexError::Unsupported { .. }), "{:?}: {:?}", e, err);
    assert!(!is_valid(&e));
    assert_eq!(StaticRegex::new(&e).unwrap_err(), err);
}

// === Structural Rejections ===

#[test]
fn standalone_set_placeholder() {
    assert_invalid(set());
    assert_invalid(lit('a') >> set());
}

#[test]
fn unknown_class_name() {
    assert_invalid(posix("vowel"));
    assert_invalid(set_of(posix("vowel") | 'a'));
    assert_invalid(complement(posix("vowel")));
}

#[test]
fn reversed_range() {
    assert_invalid(range('z', 'a'));
}

#[test]
fn minus_without_quantifier() {
    assert_invalid(-lit('a'));
    assert_invalid(-capture(1, 'a'));
}

#[test]
fn complement_of_non_class() {
    assert_invalid(complement("ab"));
    assert_invalid(complement(any()));
    assert_invalid(complement(bol()));
    assert_invalid(complement(capture(1, 'a')));
    assert_invalid(complement(star('a')));
}

#[test]
fn bad_assignments() {
    assert_invalid(Expr::assign(lit('a'), lit('b')));
    assert_invalid(Expr::assign(set(), lit("ab")));
    assert_invalid(capture(0, 'a'));
}

#[test]
fn bad_subscripts() {
    assert_invalid(Expr::subscript(lit('a'), lit('b')));
    assert_invalid(set_of(lit("ab")));
    assert_invalid(set_of(capture(1, 'a') | 'b'));
}

#[test]
fn word_boundary_is_not_a_set_element() {
    assert_invalid(set_of(word_boundary()));
    assert_invalid(complement(set_of(word_boundary())));
}

#[test]
fn non_positive_backref() {
    assert_invalid(mark(-1));
    assert_invalid(mark(0));
    assert_invalid(capture(1, 'a') >> mark(-1));
}

#[test]
fn stray_comma() {
    assert_invalid(Expr::comma(lit('a'), lit('b')));
}

#[test]
fn bad_bounds() {
    assert_invalid(repeat(3, 2, 'a'));
    assert_invalid(repeat(0, 0, 'a'));
}

// === Unsupported Combinations ===

#[test]
fn variable_width_lookbehind() {
    assert_unsupported(after(plus('a')));
    assert_unsupported(after(lit('a') | "bc"));
    assert_unsupported(complement(after(logical_newline())));
}

#[test]
fn quantified_zero_width() {
    assert_unsupported(star(bol()));
    assert_unsupported(plus(before('a')));
    assert_unsupported(!nil());
    assert_unsupported(repeat(1, 3, capture(1, word_boundary())));
}

#[test]
fn negated_set_elements() {
    assert_unsupported(set_of(complement('a') | 'b'));
    assert_unsupported(set_of(lit('b') | complement(range('0', '9'))));
    assert_unsupported(set_of(complement(set_of(lit('a') | 'b')) | 'c'));
}

#[test]
fn modifier_inside_set() {
    assert_unsupported(set_of(icase(range('a', 'z')) | '0'));
}

// === Depth ===

#[test]
fn depth_limit_over() {
    let mut e = lit('a');
    for _ in 0..63 {
        e = keep(e);
    }
    assert!(check(&e, 64).is_ok());
    assert_eq!(check(&e, 63), Err(RegexError::DepthLimitOver { limit: 63 }));
    let err = StaticRegex::builder(e).depth_limit(63).build().unwrap_err();
    assert!(!err.is_static_rejection());
}

#[test]
fn first_failure_wins() {
    // Left operand fails before the right one is looked at.
    let e = set() >> after(plus('a'));
    assert!(matches!(
        check(&e, DEFAULT_DEPTH_LIMIT),
        Err(RegexError::InvalidExpression { .. })
    ));
}
