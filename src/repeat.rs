// repeat.rs - Repetition compiler.
//
// Picks one of three strategies for a quantified operand:
//   simple     - fixed non-zero width and pure: one SimpleRepeat node,
//                no marks touched.
//   optional   - bounds (0,1) on an operand the simple strategy can't take:
//                an optional node around the operand compiled as an
//                alternative. Never allocates a mark. `!x` always lands here.
//   bracketed  - everything else: repeat_begin/mark_begin ... mark_end/
//                repeat_end around the operand, anchored on the operand's own
//                mark or a freshly allocated hidden one.
// (0,N) with N > 1 is an optional node wrapping a bracketed (1,N) repeat.

use crate::error::RegexError;
use crate::expr::Expr;
use crate::grammar;
use crate::matcher::{
    Matcher, OptionalMarkMatcher, OptionalMatcher, RepeatEndMatcher, Sequence, SimpleRepeatMatcher,
};
use crate::oracle::{self, Width};
use crate::visitor::Visitor;

/// Compile `operand{min,max}` in front of `next`.
pub fn compile_repeat(
    operand: &Expr,
    min: u32,
    max: u32,
    greedy: bool,
    next: Option<Sequence>,
    visitor: &mut Visitor,
) -> Result<Sequence, RegexError> {
    if oracle::use_simple_repeat(operand) {
        return compile_simple(operand, min, max, greedy, next, visitor);
    }
    match (min, max) {
        (0, 1) => compile_optional(operand, greedy, next, visitor),
        (0, _) => {
            let body = compile_bracketed(
                operand,
                1,
                max,
                greedy,
                Some(Sequence::single(Matcher::AlternateEnd)),
                visitor,
            )?;
            let optional = OptionalMatcher {
                xpr: Box::new(body),
                greedy,
            };
            Ok(Sequence::new(Matcher::Optional(optional), next))
        }
        _ => compile_bracketed(operand, min, max, greedy, next, visitor),
    }
}

fn compile_simple(
    operand: &Expr,
    min: u32,
    max: u32,
    greedy: bool,
    next: Option<Sequence>,
    visitor: &mut Visitor,
) -> Result<Sequence, RegexError> {
    let width = match oracle::width_of(operand) {
        Width::Fixed(n) => n,
        Width::Unknown => return Err(RegexError::unsupported("simple repeat of a variable-width operand")),
    };
    let xpr = grammar::compile_independent(operand, visitor)?;
    let repeat = SimpleRepeatMatcher {
        xpr: Box::new(xpr),
        min,
        max,
        width,
        greedy,
    };
    Ok(Sequence::new(Matcher::SimpleRepeat(repeat), next))
}

/// `!x` / `-!x`. A marked operand keeps its mark number on the node so the
/// capture can be cleared when the optional branch is skipped.
pub fn compile_optional(
    operand: &Expr,
    greedy: bool,
    next: Option<Sequence>,
    visitor: &mut Visitor,
) -> Result<Sequence, RegexError> {
    let xpr = Box::new(grammar::compile_alternate(operand, visitor)?);
    let matcher = match operand.as_marked_sub_expr() {
        Some((mark, _)) => Matcher::OptionalMark(OptionalMarkMatcher { xpr, mark, greedy }),
        None => Matcher::Optional(OptionalMatcher { xpr, greedy }),
    };
    Ok(Sequence::new(matcher, next))
}

fn compile_bracketed(
    operand: &Expr,
    min: u32,
    max: u32,
    greedy: bool,
    next: Option<Sequence>,
    visitor: &mut Visitor,
) -> Result<Sequence, RegexError> {
    let (mark, body) = match operand.as_marked_sub_expr() {
        Some((mark, body)) => (mark, body),
        None => (visitor.get_hidden_mark(), operand),
    };
    let end = RepeatEndMatcher {
        mark,
        min,
        max,
        greedy,
    };
    let tail = Sequence::new(
        Matcher::MarkEnd(mark),
        Some(Sequence::new(Matcher::RepeatEnd(end), next)),
    );
    let inner = grammar::compile(body, Some(tail), visitor)?;
    Ok(Sequence::new(
        Matcher::RepeatBegin(mark),
        Some(Sequence::new(Matcher::MarkBegin(mark), Some(inner))),
    ))
}
