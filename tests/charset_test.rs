// charset_test.rs - Integration tests for set[...] compilation.

use std::sync::Arc;

use statrex::charset::Charset;
use statrex::matcher::*;
use statrex::prelude::*;
use statrex::traits::ClassMask;

fn build(expr: &Expr, traits: Arc<dyn RegexTraits>) -> StaticRegex {
    StaticRegex::builder(expr.clone()).traits(traits).build().unwrap()
}

fn head_charset(re: &StaticRegex) -> &CharsetMatcher {
    match re.program().head() {
        Matcher::Charset(cs) => cs,
        other => panic!("expected charset, got {:?}", other),
    }
}

// === Narrow Sets ===

#[test]
fn narrow_set_uses_bitmap() {
    let re = build(&set_of(range('a', 'f') | '_' | digit()), Arc::new(AsciiTraits));
    let cs = head_charset(&re);
    assert!(matches!(cs.charset, Charset::Basic(_)));
    for ch in ['a', 'f', '_', '0', '9'] {
        assert!(cs.test(ch, re.traits()), "{:?}", ch);
    }
    for ch in ['g', 'A', '-', ' '] {
        assert!(!cs.test(ch, re.traits()), "{:?}", ch);
    }
}

#[test]
fn complemented_set_inverts_membership() {
    let positive = build(&set_of(range('a', 'z')), Arc::new(AsciiTraits));
    let negative = build(&complement(set_of(range('a', 'z') | '0')), Arc::new(AsciiTraits));
    let plain = build(&set_of(range('a', 'z') | '0'), Arc::new(AsciiTraits));
    assert!(matches!(positive.program().head(), Matcher::Range(_)));

    let neg = head_charset(&negative);
    let pos = head_charset(&plain);
    for code in 0u8..=255 {
        let ch = code as char;
        assert_eq!(
            neg.test(ch, negative.traits()),
            !pos.test(ch, plain.traits()),
            "{:?}",
            ch
        );
    }
}

#[test]
fn narrow_set_ignores_wide_chars() {
    let re = build(&set_of(lit('a') | 'ā'), Arc::new(AsciiTraits));
    let cs = head_charset(&re);
    assert!(cs.test('a', re.traits()));
    assert!(!cs.test('ā', re.traits()));
}

// === Wide Sets ===

#[test]
fn wide_set_uses_compound() {
    let re = build(&set_of(range('а', 'я') | 'x' | space()), Arc::new(UnicodeTraits));
    let cs = head_charset(&re);
    assert!(matches!(cs.charset, Charset::Compound(_)));
    for ch in ['б', 'x', ' ', '\u{3000}'] {
        assert!(cs.test(ch, re.traits()), "{:?}", ch);
    }
    assert!(!cs.test('Б', re.traits()));
    assert!(!cs.test('y', re.traits()));
}

#[test]
fn wide_complement_inverts_membership() {
    let set = range('a', 'z') | range('α', 'ω') | digit();
    let plain = build(&set_of(set.clone()), Arc::new(UnicodeTraits));
    let negated = build(&complement(set_of(set)), Arc::new(UnicodeTraits));
    let pos = head_charset(&plain);
    let neg = head_charset(&negated);
    for ch in ['a', 'q', 'Z', 'β', 'Ω', '٣', '7', '!', '\u{10000}'] {
        assert_eq!(neg.test(ch, negated.traits()), !pos.test(ch, plain.traits()), "{:?}", ch);
    }
}

#[test]
fn icase_set_folds() {
    let re = StaticRegex::builder(set_of(range('a', 'c') | 'Ж'))
        .case_insensitive(true)
        .build()
        .unwrap();
    let cs = head_charset(&re);
    assert!(cs.icase);
    for ch in ['A', 'b', 'C', 'ж', 'Ж'] {
        assert!(cs.test(ch, re.traits()), "{:?}", ch);
    }
    assert!(!cs.test('d', re.traits()));
}

#[test]
fn logical_newline_in_set_is_one_newline() {
    let re = build(&set_of(logical_newline() | 'x'), Arc::new(UnicodeTraits));
    let cs = head_charset(&re);
    assert!(cs.test('\n', re.traits()));
    assert!(cs.test('\u{2028}', re.traits()));
    assert!(!cs.test('y', re.traits()));
}

#[test]
fn nested_sets_union() {
    let inner = set_of(lit('a') | 'b');
    let re = build(&set_of(inner | 'c' | set_list(&['x', 'y'])), Arc::new(AsciiTraits));
    let cs = head_charset(&re);
    for ch in ['a', 'b', 'c', 'x', 'y'] {
        assert!(cs.test(ch, re.traits()), "{:?}", ch);
    }
    assert!(!cs.test('d', re.traits()));
}

#[test]
fn class_operands_union() {
    let re = build(&set_of(digit() | alpha()), Arc::new(UnicodeTraits));
    let cs = head_charset(&re);
    assert!(cs.test('a', re.traits()));
    assert!(cs.test('5', re.traits()));
    assert!(cs.test('é', re.traits()));
    assert!(!cs.test('-', re.traits()));
}

#[test]
fn negated_class_operand_keeps_polarity() {
    let all: [Arc<dyn RegexTraits>; 2] = [Arc::new(AsciiTraits), Arc::new(UnicodeTraits)];
    for traits in all {
        let re = build(&set_of(complement(digit()) | 'a'), traits);
        let cs = head_charset(&re);
        assert!(cs.test('a', re.traits()));
        assert!(cs.test('x', re.traits()));
        assert!(cs.test('-', re.traits()));
        assert!(!cs.test('5', re.traits()));
    }
}

#[test]
fn negated_newline_operand() {
    let re = build(&set_of(complement(logical_newline()) | 'a'), Arc::new(UnicodeTraits));
    let cs = head_charset(&re);
    assert!(cs.test('z', re.traits()));
    assert!(!cs.test('\n', re.traits()));
}

#[test]
fn icase_wide_ranges_match_their_folds() {
    let e = set_of(range('\u{178}', '\u{178}') | range('\u{212A}', '\u{212A}') | 'q');
    let re = StaticRegex::builder(e).case_insensitive(true).build().unwrap();
    let cs = head_charset(&re);
    for ch in ['\u{178}', '\u{FF}', '\u{212A}', 'k', 'K', 'q', 'Q'] {
        assert!(cs.test(ch, re.traits()), "{:?}", ch);
    }
    assert!(!cs.test('j', re.traits()));
    assert!(!cs.test('\u{FE}', re.traits()));
}

// === Single-Element Sets ===

#[test]
fn single_element_sets_compile_to_element() {
    let re = StaticRegex::new(&set_of('a')).unwrap();
    assert!(matches!(re.program().head(), Matcher::Literal(LiteralMatcher { ch: 'a', not: false, .. })));

    let re = StaticRegex::new(&set_of(digit())).unwrap();
    assert_eq!(
        re.program().head(),
        &Matcher::Posix(PosixCharsetMatcher { mask: ClassMask::DIGIT, not: false })
    );

    let re = StaticRegex::new(&complement(set_of('a'))).unwrap();
    assert!(matches!(re.program().head(), Matcher::Literal(LiteralMatcher { ch: 'a', not: true, .. })));

    let re = StaticRegex::new(&complement(set_list(&['q']))).unwrap();
    assert!(matches!(re.program().head(), Matcher::Literal(LiteralMatcher { ch: 'q', not: true, .. })));
}

#[test]
fn list_set_complement() {
    let re = StaticRegex::new(&complement(set_list(&['a', 'b', 'c']))).unwrap();
    match re.program().head() {
        Matcher::Set(set) => {
            assert!(set.not);
            assert!(!set.test('b', re.traits()));
            assert!(set.test('d', re.traits()));
        }
        other => panic!("expected set, got {:?}", other),
    }
}

// === Rejections ===

#[test]
fn negated_literal_inside_set_is_rejected() {
    let err = StaticRegex::new(&set_of(complement('a') | 'b')).unwrap_err();
    assert!(matches!(err, RegexError::Unsupported { .. }));
}

#[test]
fn modifier_inside_set_is_rejected() {
    let err = StaticRegex::new(&set_of(icase('a') | 'b')).unwrap_err();
    assert!(matches!(err, RegexError::Unsupported { .. }));
}

#[test]
fn non_character_operand_is_rejected() {
    let err = StaticRegex::new(&set_of(lit("ab") | 'c')).unwrap_err();
    assert!(matches!(err, RegexError::InvalidExpression { .. }));
    let err = StaticRegex::new(&set_of(star('a') | 'c')).unwrap_err();
    assert!(matches!(err, RegexError::InvalidExpression { .. }));
}
