// grammar.rs - Case dispatcher.
//
// Walks an expression tree and rewrites each node into matchers, threading
// a continuation: `compile(x, next)` returns the matchers for `x` placed in
// front of `next`. Exactly one case applies per node shape; the validity
// oracle in validate.rs accepts exactly the shapes handled here.

use smallvec::SmallVec;

use crate::alternates::compile_alternates;
use crate::charset::compile_set;
use crate::error::RegexError;
use crate::expr::{Expr, Terminal};
use crate::matcher::{
    AlternateMatcher, AssertKind, AssertWordMatcher, KeeperMatcher, LiteralMatcher, LookaheadMatcher,
    LookbehindMatcher, Matcher, PosixCharsetMatcher, RangeMatcher, Sequence, SetMatcher, StringMatcher,
    WordCond,
};
use crate::oracle::Width;
use crate::repeat::{compile_optional, compile_repeat};
use crate::traits::ClassMask;
use crate::visitor::Visitor;

// === Entry Points ===

/// Compile `expr` in front of the continuation `next`.
pub fn compile(expr: &Expr, next: Option<Sequence>, visitor: &mut Visitor) -> Result<Sequence, RegexError> {
    visitor.enter()?;
    let result = dispatch(expr, next, visitor);
    visitor.leave();
    result
}

/// Compile `expr` as a self-contained unit terminated by the true matcher.
pub fn compile_independent(expr: &Expr, visitor: &mut Visitor) -> Result<Sequence, RegexError> {
    compile(expr, Some(Sequence::single(Matcher::True)), visitor)
}

/// Compile `expr` as one branch terminated by the alternate-end matcher.
pub fn compile_alternate(expr: &Expr, visitor: &mut Visitor) -> Result<Sequence, RegexError> {
    compile(expr, Some(Sequence::single(Matcher::AlternateEnd)), visitor)
}

// === Dispatch ===

fn dispatch(expr: &Expr, next: Option<Sequence>, visitor: &mut Visitor) -> Result<Sequence, RegexError> {
    log::trace!("compile case {:?}", expr.tag());
    match expr {
        Expr::Terminal(t) => Ok(Sequence::new(as_matcher(t, visitor)?, next)),

        // Right side first so the left lands in front of it; nested `>>`
        // chains come out as one flat linked sequence.
        Expr::Sequence(left, right) => {
            let rest = compile(right, next, visitor)?;
            compile(left, Some(rest), visitor)
        }

        Expr::Alternate(..) => {
            let alternates = compile_alternates(expr, visitor)?;
            Ok(Sequence::new(Matcher::Alternate(AlternateMatcher { alternates }), next))
        }

        Expr::Quant(tag, operand) => {
            let (min, max) = tag.bounds();
            compile_repeat(operand, min, max, true, next, visitor)
        }

        // `!x` is always an optional node, never a repeat.
        Expr::Optional(operand) => compile_optional(operand, true, next, visitor),

        Expr::Negate(operand) => match &**operand {
            Expr::Quant(tag, inner) => {
                let (min, max) = tag.bounds();
                compile_repeat(inner, min, max, false, next, visitor)
            }
            Expr::Optional(inner) => compile_optional(inner, false, next, visitor),
            _ => Err(RegexError::invalid("unary minus on a non-quantified expression")),
        },

        Expr::Complement(operand) => {
            let matcher = compile_complement(operand, visitor)?;
            Ok(Sequence::new(matcher, next))
        }

        // Mark placeholder wins over set placeholder.
        Expr::Assign(left, right) => {
            if let Some((mark, body)) = expr.as_marked_sub_expr() {
                let tail = Sequence::new(Matcher::MarkEnd(mark), next);
                let inner = compile(body, Some(tail), visitor)?;
                return Ok(Sequence::new(Matcher::MarkBegin(mark), Some(inner)));
            }
            if left.is_set_initializer() {
                if let Expr::Terminal(Terminal::Char(ch)) = &**right {
                    return Ok(Sequence::new(literal_matcher(*ch, false, visitor), next));
                }
            }
            Err(RegexError::invalid("assignment to something other than a mark or set"))
        }

        Expr::Comma(..) => {
            let set = list_set_matcher(expr, visitor)?;
            Ok(Sequence::new(Matcher::Set(set), next))
        }

        Expr::Subscript(left, right) => {
            if !left.is_set_initializer() {
                return Err(RegexError::invalid("subscript of something other than set"));
            }
            let matcher = match &**right {
                Expr::Terminal(t) => set_element_matcher(t, visitor)?,
                _ => Matcher::Charset(compile_set(right, visitor)?),
            };
            Ok(Sequence::new(matcher, next))
        }

        Expr::Keep(operand) => {
            let xpr = Box::new(compile_independent(operand, visitor)?);
            Ok(Sequence::new(Matcher::Keeper(KeeperMatcher { xpr }), next))
        }

        Expr::Before(operand) => {
            let matcher = lookahead(operand, false, visitor)?;
            Ok(Sequence::new(matcher, next))
        }

        Expr::After(operand) => {
            let matcher = lookbehind(operand, false, visitor)?;
            Ok(Sequence::new(matcher, next))
        }

        Expr::Modified(modifier, operand) => {
            let mut scope = visitor.push(modifier);
            compile(operand, next, &mut scope)
        }
    }
}

// === Terminals ===

fn literal_matcher(ch: char, not: bool, visitor: &Visitor) -> Matcher {
    let icase = visitor.icase();
    let traits = visitor.traits();
    let ch = if icase { traits.translate_nocase(ch) } else { traits.translate(ch) };
    Matcher::Literal(LiteralMatcher { ch, icase, not })
}

fn posix_mask(name: &str, visitor: &Visitor) -> Result<ClassMask, RegexError> {
    let mask = visitor.traits().lookup_classname(name, visitor.icase());
    if mask.is_empty() {
        return Err(RegexError::invalid("unknown character class name"));
    }
    Ok(mask)
}

fn word_assert(cond: WordCond, not: bool, visitor: &Visitor) -> Matcher {
    let word = visitor.traits().lookup_classname("w", visitor.icase());
    Matcher::AssertWord(AssertWordMatcher { cond, not, word })
}

/// Matcher for a standalone terminal.
fn as_matcher(t: &Terminal, visitor: &Visitor) -> Result<Matcher, RegexError> {
    let matcher = match t {
        Terminal::Char(ch) => literal_matcher(*ch, false, visitor),
        Terminal::Str(s) => {
            let icase = visitor.icase();
            let traits = visitor.traits();
            let chars = s
                .chars()
                .map(|ch| if icase { traits.translate_nocase(ch) } else { traits.translate(ch) })
                .collect();
            Matcher::String(StringMatcher { chars, icase })
        }
        Terminal::Any => Matcher::Any,
        Terminal::Bol => Matcher::Assert(AssertKind::Bol),
        Terminal::Eol => Matcher::Assert(AssertKind::Eol),
        Terminal::Bos => Matcher::Assert(AssertKind::Bos),
        Terminal::Eos => Matcher::Assert(AssertKind::Eos),
        Terminal::WordBoundary => word_assert(WordCond::Boundary, false, visitor),
        Terminal::WordBegin => word_assert(WordCond::Begin, false, visitor),
        Terminal::WordEnd => word_assert(WordCond::End, false, visitor),
        Terminal::LogicalNewline => Matcher::LogicalNewline,
        Terminal::Posix(name) => Matcher::Posix(PosixCharsetMatcher {
            mask: posix_mask(name, visitor)?,
            not: false,
        }),
        Terminal::Range { min, max } => Matcher::Range(RangeMatcher {
            min: *min,
            max: *max,
            icase: visitor.icase(),
            not: false,
        }),
        Terminal::Mark(mark) if *mark <= 0 => {
            return Err(RegexError::invalid("back-reference to a non-positive mark"))
        }
        Terminal::Mark(mark) => Matcher::Backref {
            mark: *mark,
            icase: visitor.icase(),
        },
        Terminal::SetInitializer => return Err(RegexError::invalid("set placeholder used on its own")),
        Terminal::Epsilon => Matcher::Epsilon,
    };
    Ok(matcher)
}

/// Matcher for the sole element of `set[t]`. `_ln` stands for a single
/// newline character here.
fn set_element_matcher(t: &Terminal, visitor: &Visitor) -> Result<Matcher, RegexError> {
    match t {
        Terminal::Char(_) | Terminal::Range { .. } | Terminal::Posix(_) => as_matcher(t, visitor),
        Terminal::LogicalNewline => Ok(Matcher::Posix(PosixCharsetMatcher {
            mask: ClassMask::NEWLINE,
            not: false,
        })),
        _ => Err(RegexError::invalid("set element is not a character, range or class")),
    }
}

// === List Sets ===

/// Collect the characters of `(set= 'a', 'b', ...)`. Comma binds looser
/// than assignment, so the set placeholder sits on the leftmost leaf.
pub(crate) fn collect_list_set(expr: &Expr, out: &mut SmallVec<[char; 8]>) -> bool {
    match expr {
        Expr::Comma(left, right) => match &**right {
            Expr::Terminal(Terminal::Char(ch)) => {
                if !collect_list_set(left, out) {
                    return false;
                }
                out.push(*ch);
                true
            }
            _ => false,
        },
        Expr::Assign(left, right) if left.is_set_initializer() => match &**right {
            Expr::Terminal(Terminal::Char(ch)) => {
                out.push(*ch);
                true
            }
            _ => false,
        },
        _ => false,
    }
}

fn list_set_matcher(expr: &Expr, visitor: &Visitor) -> Result<SetMatcher, RegexError> {
    let mut raw = SmallVec::new();
    if !collect_list_set(expr, &mut raw) {
        return Err(RegexError::invalid("comma outside a list set"));
    }
    let icase = visitor.icase();
    let traits = visitor.traits();
    let chars = raw
        .into_iter()
        .map(|ch| if icase { traits.translate_nocase(ch) } else { traits.translate(ch) })
        .collect();
    Ok(SetMatcher { chars, icase, not: false })
}

// === Lookaround ===

fn lookahead(operand: &Expr, not: bool, visitor: &mut Visitor) -> Result<Matcher, RegexError> {
    let xpr = Box::new(compile_independent(operand, visitor)?);
    Ok(Matcher::Lookahead(LookaheadMatcher { xpr, not }))
}

fn lookbehind(operand: &Expr, not: bool, visitor: &mut Visitor) -> Result<Matcher, RegexError> {
    let xpr = compile_independent(operand, visitor)?;
    let width = match xpr.width() {
        Width::Fixed(n) => n,
        Width::Unknown => return Err(RegexError::unsupported("variable-width lookbehind")),
    };
    Ok(Matcher::Lookbehind(LookbehindMatcher {
        xpr: Box::new(xpr),
        width,
        not,
    }))
}

// === Complement ===

/// `~x`: the negated-polarity form of `x`. Compound sets are compiled first
/// and then inverted as a whole.
fn compile_complement(operand: &Expr, visitor: &mut Visitor) -> Result<Matcher, RegexError> {
    match operand {
        Expr::Terminal(t) => complement_terminal(t, visitor),
        Expr::Before(inner) => lookahead(inner, true, visitor),
        Expr::After(inner) => lookbehind(inner, true, visitor),
        Expr::Subscript(left, right) if left.is_set_initializer() => match &**right {
            Expr::Terminal(
                t @ (Terminal::Char(_) | Terminal::Range { .. } | Terminal::Posix(_) | Terminal::LogicalNewline),
            ) => complement_terminal(t, visitor),
            Expr::Terminal(_) => Err(RegexError::invalid("set element is not a character, range or class")),
            _ => {
                let mut charset = compile_set(right, visitor)?;
                charset.inverse();
                Ok(Matcher::Charset(charset))
            }
        },
        Expr::Assign(left, right) if left.is_set_initializer() => match &**right {
            Expr::Terminal(t @ Terminal::Char(_)) => complement_terminal(t, visitor),
            _ => Err(RegexError::invalid("set assignment of a non-character")),
        },
        Expr::Comma(..) => {
            let mut set = list_set_matcher(operand, visitor)?;
            set.inverse();
            Ok(Matcher::Set(set))
        }
        _ => Err(RegexError::invalid("complement of an expression that is not a character class")),
    }
}

fn complement_terminal(t: &Terminal, visitor: &Visitor) -> Result<Matcher, RegexError> {
    match t {
        Terminal::WordBoundary => Ok(word_assert(WordCond::Boundary, true, visitor)),
        Terminal::Char(ch) => Ok(literal_matcher(*ch, true, visitor)),
        Terminal::LogicalNewline => Ok(Matcher::Posix(PosixCharsetMatcher {
            mask: ClassMask::NEWLINE,
            not: true,
        })),
        Terminal::Posix(name) => Ok(Matcher::Posix(PosixCharsetMatcher {
            mask: posix_mask(name, visitor)?,
            not: true,
        })),
        Terminal::Range { min, max } => Ok(Matcher::Range(RangeMatcher {
            min: *min,
            max: *max,
            icase: visitor.icase(),
            not: true,
        })),
        _ => Err(RegexError::invalid("complement of a terminal that is not a character class")),
    }
}
