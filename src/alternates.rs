// alternates.rs - Alternation list builder.
//
// `a | b | c` becomes one linked list of compiled alternatives in source
// order. Alternatives are compiled last-first and prepended, so hidden marks
// are numbered from the rightmost alternative.

use crate::error::RegexError;
use crate::expr::Expr;
use crate::grammar;
use crate::matcher::{Matcher, Sequence};
use crate::oracle::Width;
use crate::visitor::Visitor;

/// Compiled alternatives with aggregate width and purity.
///
/// Alternatives after the first are kept in reverse source order, so
/// prepending the next alternative compiled is a push.
#[derive(Clone, Debug, PartialEq)]
pub struct AlternatesList {
    head: Box<Sequence>,
    rest: Vec<Sequence>,
    width: Width,
    pure: bool,
}

impl AlternatesList {
    pub fn new(head: Sequence, tail: Option<AlternatesList>) -> AlternatesList {
        match tail {
            Some(t) => AlternatesList {
                width: head.width().unify(t.width),
                pure: head.is_pure() && t.pure,
                rest: {
                    let mut rest = t.rest;
                    rest.push(*t.head);
                    rest
                },
                head: Box::new(head),
            },
            None => AlternatesList {
                width: head.width(),
                pure: head.is_pure(),
                rest: Vec::new(),
                head: Box::new(head),
            },
        }
    }

    pub fn head(&self) -> &Sequence {
        &self.head
    }

    /// Common width of every alternative, or `Unknown`.
    pub fn width(&self) -> Width {
        self.width
    }

    pub fn is_pure(&self) -> bool {
        self.pure
    }

    pub fn iter(&self) -> AlternatesIter<'_> {
        AlternatesIter {
            head: Some(&*self.head),
            rest: self.rest.iter().rev(),
        }
    }

    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

pub struct AlternatesIter<'a> {
    head: Option<&'a Sequence>,
    rest: std::iter::Rev<std::slice::Iter<'a, Sequence>>,
}

impl<'a> Iterator for AlternatesIter<'a> {
    type Item = &'a Sequence;

    fn next(&mut self) -> Option<&'a Sequence> {
        self.head.take().or_else(|| self.rest.next())
    }
}

/// Collect the operands of a `|` chain in source order, whichever side
/// the nesting leans to.
pub fn flatten_alternates<'e>(expr: &'e Expr, out: &mut Vec<&'e Expr>) {
    match expr {
        Expr::Alternate(left, right) => {
            flatten_alternates(left, out);
            flatten_alternates(right, out);
        }
        _ => out.push(expr),
    }
}

/// Compile every alternative of `expr` against an alternate-end
/// continuation.
pub fn compile_alternates(expr: &Expr, visitor: &mut Visitor) -> Result<AlternatesList, RegexError> {
    let mut leaves = Vec::new();
    flatten_alternates(expr, &mut leaves);

    let mut list: Option<AlternatesList> = None;
    for leaf in leaves.into_iter().rev() {
        let alt = grammar::compile(leaf, Some(Sequence::single(Matcher::AlternateEnd)), visitor)?;
        list = Some(AlternatesList::new(alt, list));
    }
    list.ok_or(RegexError::invalid("empty alternation"))
}
