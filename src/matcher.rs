// matcher.rs - Compiled matcher nodes.
//
// The closed set of matcher variants the compiler emits, plus the linked
// `Sequence` that chains them. Width and purity are computed once when a
// sequence cell is built and cached on it.

use std::fmt;

use smallvec::SmallVec;

use crate::alternates::AlternatesList;
use crate::charset::Charset;
use crate::expr::MarkIndex;
use crate::oracle::Width;
use crate::traits::{ClassMask, RegexTraits};

// === Single-Character Matchers ===

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiteralMatcher {
    /// Already translated (case-folded when `icase`).
    pub ch: char,
    pub icase: bool,
    pub not: bool,
}

impl LiteralMatcher {
    pub fn test(&self, ch: char, traits: &dyn RegexTraits) -> bool {
        let ch = if self.icase { traits.translate_nocase(ch) } else { traits.translate(ch) };
        (ch == self.ch) != self.not
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringMatcher {
    pub chars: Vec<char>,
    pub icase: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeMatcher {
    pub min: char,
    pub max: char,
    pub icase: bool,
    pub not: bool,
}

impl RangeMatcher {
    pub fn test(&self, ch: char, traits: &dyn RegexTraits) -> bool {
        let found = if self.icase {
            traits.in_range_nocase(self.min, self.max, ch)
        } else {
            (self.min..=self.max).contains(&ch)
        };
        found != self.not
    }
}

/// Small explicit set from a list initializer: `(set= 'a','b','c')`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetMatcher {
    pub chars: SmallVec<[char; 8]>,
    pub icase: bool,
    pub not: bool,
}

impl SetMatcher {
    pub fn inverse(&mut self) {
        self.not = !self.not;
    }

    pub fn test(&self, ch: char, traits: &dyn RegexTraits) -> bool {
        let ch = if self.icase { traits.translate_nocase(ch) } else { traits.translate(ch) };
        self.chars.contains(&ch) != self.not
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PosixCharsetMatcher {
    pub mask: ClassMask,
    pub not: bool,
}

impl PosixCharsetMatcher {
    pub fn test(&self, ch: char, traits: &dyn RegexTraits) -> bool {
        traits.isctype(ch, self.mask) != self.not
    }
}

/// Sealed character class built by the charset builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharsetMatcher {
    pub charset: Charset,
    pub icase: bool,
}

impl CharsetMatcher {
    /// Flip membership of every character.
    pub fn inverse(&mut self) {
        self.charset.inverse();
    }

    pub fn test(&self, ch: char, traits: &dyn RegexTraits) -> bool {
        self.charset.test(ch, self.icase, traits)
    }
}

// === Assertions ===

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssertKind {
    Bol,
    Eol,
    Bos,
    Eos,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordCond {
    Boundary,
    Begin,
    End,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssertWordMatcher {
    pub cond: WordCond,
    pub not: bool,
    pub word: ClassMask,
}

// === Compound Matchers ===

#[derive(Clone, Debug, PartialEq)]
pub struct AlternateMatcher {
    pub alternates: AlternatesList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimpleRepeatMatcher {
    pub xpr: Box<Sequence>,
    pub min: u32,
    pub max: u32,
    /// Width of one iteration.
    pub width: usize,
    pub greedy: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OptionalMatcher {
    pub xpr: Box<Sequence>,
    pub greedy: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OptionalMarkMatcher {
    pub xpr: Box<Sequence>,
    pub mark: MarkIndex,
    pub greedy: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeeperMatcher {
    pub xpr: Box<Sequence>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LookaheadMatcher {
    pub xpr: Box<Sequence>,
    pub not: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LookbehindMatcher {
    pub xpr: Box<Sequence>,
    pub width: usize,
    pub not: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepeatEndMatcher {
    pub mark: MarkIndex,
    pub min: u32,
    pub max: u32,
    pub greedy: bool,
}

// === Matcher ===

#[derive(Clone, Debug, PartialEq)]
pub enum Matcher {
    Literal(LiteralMatcher),
    String(StringMatcher),
    Any,
    Range(RangeMatcher),
    Set(SetMatcher),
    Charset(CharsetMatcher),
    Posix(PosixCharsetMatcher),
    LogicalNewline,
    Backref { mark: MarkIndex, icase: bool },
    Assert(AssertKind),
    AssertWord(AssertWordMatcher),
    Epsilon,
    Alternate(AlternateMatcher),
    SimpleRepeat(SimpleRepeatMatcher),
    Optional(OptionalMatcher),
    OptionalMark(OptionalMarkMatcher),
    Keeper(KeeperMatcher),
    Lookahead(LookaheadMatcher),
    Lookbehind(LookbehindMatcher),
    MarkBegin(MarkIndex),
    MarkEnd(MarkIndex),
    RepeatBegin(MarkIndex),
    RepeatEnd(RepeatEndMatcher),
    /// Terminates an independent sub-expression.
    True,
    /// Terminates the whole regex.
    End,
    /// Terminates one alternative.
    AlternateEnd,
}

impl Matcher {
    pub fn name(&self) -> &'static str {
        match self {
            Matcher::Literal(_) => "literal",
            Matcher::String(_) => "string",
            Matcher::Any => "any",
            Matcher::Range(_) => "range",
            Matcher::Set(_) => "set",
            Matcher::Charset(_) => "charset",
            Matcher::Posix(_) => "posix_charset",
            Matcher::LogicalNewline => "logical_newline",
            Matcher::Backref { .. } => "backref",
            Matcher::Assert(_) => "assert",
            Matcher::AssertWord(_) => "assert_word",
            Matcher::Epsilon => "epsilon",
            Matcher::Alternate(_) => "alternate",
            Matcher::SimpleRepeat(_) => "simple_repeat",
            Matcher::Optional(_) => "optional",
            Matcher::OptionalMark(_) => "optional_mark",
            Matcher::Keeper(_) => "keeper",
            Matcher::Lookahead(_) => "lookahead",
            Matcher::Lookbehind(_) => "lookbehind",
            Matcher::MarkBegin(_) => "mark_begin",
            Matcher::MarkEnd(_) => "mark_end",
            Matcher::RepeatBegin(_) => "repeat_begin",
            Matcher::RepeatEnd(_) => "repeat_end",
            Matcher::True => "true",
            Matcher::End => "end",
            Matcher::AlternateEnd => "alternate_end",
        }
    }

    pub fn width(&self) -> Width {
        match self {
            Matcher::Literal(_)
            | Matcher::Any
            | Matcher::Range(_)
            | Matcher::Set(_)
            | Matcher::Charset(_)
            | Matcher::Posix(_) => Width::Fixed(1),
            Matcher::String(s) => Width::Fixed(s.chars.len()),
            Matcher::LogicalNewline | Matcher::Backref { .. } => Width::Unknown,
            Matcher::Assert(_)
            | Matcher::AssertWord(_)
            | Matcher::Epsilon
            | Matcher::MarkBegin(_)
            | Matcher::MarkEnd(_)
            | Matcher::RepeatBegin(_)
            | Matcher::True
            | Matcher::End
            | Matcher::AlternateEnd => Width::ZERO,
            Matcher::RepeatEnd(_) | Matcher::Optional(_) | Matcher::OptionalMark(_) => Width::Unknown,
            Matcher::Alternate(alt) => alt.alternates.width(),
            Matcher::SimpleRepeat(rep) => {
                if rep.min == rep.max {
                    Width::Fixed(rep.width).times(rep.min)
                } else {
                    Width::Unknown
                }
            }
            Matcher::Keeper(k) => k.xpr.width(),
            Matcher::Lookahead(_) | Matcher::Lookbehind(_) => Width::ZERO,
        }
    }

    pub fn is_pure(&self) -> bool {
        match self {
            Matcher::MarkBegin(_)
            | Matcher::MarkEnd(_)
            | Matcher::RepeatBegin(_)
            | Matcher::RepeatEnd(_)
            | Matcher::OptionalMark(_) => false,
            Matcher::Alternate(alt) => alt.alternates.is_pure(),
            Matcher::SimpleRepeat(rep) => rep.xpr.is_pure(),
            Matcher::Optional(opt) => opt.xpr.is_pure(),
            Matcher::Keeper(k) => k.xpr.is_pure(),
            Matcher::Lookahead(la) => la.xpr.is_pure(),
            Matcher::Lookbehind(lb) => lb.xpr.is_pure(),
            _ => true,
        }
    }

    /// Single-character membership test, for matchers that consume exactly
    /// one character from a fixed class.
    pub fn test_char(&self, ch: char, traits: &dyn RegexTraits) -> Option<bool> {
        match self {
            Matcher::Literal(m) => Some(m.test(ch, traits)),
            Matcher::Range(m) => Some(m.test(ch, traits)),
            Matcher::Set(m) => Some(m.test(ch, traits)),
            Matcher::Posix(m) => Some(m.test(ch, traits)),
            Matcher::Charset(m) => Some(m.test(ch, traits)),
            Matcher::Any => Some(true),
            _ => None,
        }
    }
}

// === Sequence ===

/// A chain of matchers in match order, with the width and purity of the
/// whole chain cached.
///
/// Cells after the head are kept in reverse order so that prepending a
/// matcher in front of a continuation is a push. Long programs therefore
/// clone, compare and drop without recursing once per cell.
#[derive(Clone, PartialEq)]
pub struct Sequence {
    head: Matcher,
    rest: Vec<Matcher>,
    width: Width,
    pure: bool,
}

impl Sequence {
    /// Place `head` in front of `next`.
    pub fn new(head: Matcher, next: Option<Sequence>) -> Sequence {
        match next {
            Some(tail) => Sequence {
                width: head.width() + tail.width,
                pure: head.is_pure() && tail.pure,
                rest: {
                    let mut rest = tail.rest;
                    rest.push(tail.head);
                    rest
                },
                head,
            },
            None => Sequence {
                width: head.width(),
                pure: head.is_pure(),
                rest: Vec::new(),
                head,
            },
        }
    }

    pub fn single(head: Matcher) -> Sequence {
        Sequence::new(head, None)
    }

    pub fn head(&self) -> &Matcher {
        &self.head
    }

    pub fn width(&self) -> Width {
        self.width
    }

    pub fn is_pure(&self) -> bool {
        self.pure
    }

    pub fn iter(&self) -> SequenceIter<'_> {
        SequenceIter {
            head: Some(&self.head),
            rest: self.rest.iter().rev(),
        }
    }

    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    /// A sequence always holds at least one matcher.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn matchers(&self) -> Vec<&Matcher> {
        self.iter().collect()
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

pub struct SequenceIter<'a> {
    head: Option<&'a Matcher>,
    rest: std::iter::Rev<std::slice::Iter<'a, Matcher>>,
}

impl<'a> Iterator for SequenceIter<'a> {
    type Item = &'a Matcher;

    fn next(&mut self) -> Option<&'a Matcher> {
        self.head.take().or_else(|| self.rest.next())
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Matcher;
    type IntoIter = SequenceIter<'a>;

    fn into_iter(self) -> SequenceIter<'a> {
        self.iter()
    }
}
