// dsl.rs - Combinator front end.
//
// Builds expression trees with Rust operators and small constructor
// functions:
//
//   lit('a') >> 'b'          sequence
//   lit('a') | 'b'           alternation
//   !x                       optional (greedy)
//   -star(x), -!x            non-greedy repeat / optional
//   capture(1, x)            (s1= x)
//   set_of(range('a','z') | digit())   set[...]
//
// Mark numbers are chosen by the caller; the compiler never renumbers them.

use std::ops::{BitOr, Neg, Not, Shr};
use std::sync::Arc;

use crate::expr::{Expr, MarkIndex, Modifier, QuantTag, Terminal};
use crate::traits::RegexTraits;

// === Operators ===

impl<R: Into<Expr>> Shr<R> for Expr {
    type Output = Expr;

    fn shr(self, rhs: R) -> Expr {
        Expr::sequence(self, rhs.into())
    }
}

impl<R: Into<Expr>> BitOr<R> for Expr {
    type Output = Expr;

    fn bitor(self, rhs: R) -> Expr {
        Expr::alternate(self, rhs.into())
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::optional(self)
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::negate(self)
    }
}

// === Literals ===

pub fn lit(x: impl Into<Expr>) -> Expr {
    x.into()
}

/// Matches the empty string.
pub fn nil() -> Expr {
    Expr::from(Terminal::Epsilon)
}

pub fn any() -> Expr {
    Expr::from(Terminal::Any)
}

pub fn range(min: char, max: char) -> Expr {
    Expr::from(Terminal::Range { min, max })
}

// === Assertions ===

pub fn bol() -> Expr {
    Expr::from(Terminal::Bol)
}

pub fn eol() -> Expr {
    Expr::from(Terminal::Eol)
}

pub fn bos() -> Expr {
    Expr::from(Terminal::Bos)
}

pub fn eos() -> Expr {
    Expr::from(Terminal::Eos)
}

pub fn word_boundary() -> Expr {
    Expr::from(Terminal::WordBoundary)
}

pub fn bow() -> Expr {
    Expr::from(Terminal::WordBegin)
}

pub fn eow() -> Expr {
    Expr::from(Terminal::WordEnd)
}

pub fn logical_newline() -> Expr {
    Expr::from(Terminal::LogicalNewline)
}

// === Classes ===

/// A named class. Unknown names are rejected at build time.
pub fn posix(name: &'static str) -> Expr {
    Expr::from(Terminal::Posix(name))
}

pub fn alnum() -> Expr {
    posix("alnum")
}

pub fn alpha() -> Expr {
    posix("alpha")
}

pub fn blank() -> Expr {
    posix("blank")
}

pub fn cntrl() -> Expr {
    posix("cntrl")
}

pub fn digit() -> Expr {
    posix("digit")
}

pub fn graph() -> Expr {
    posix("graph")
}

pub fn lower() -> Expr {
    posix("lower")
}

pub fn print() -> Expr {
    posix("print")
}

pub fn punct() -> Expr {
    posix("punct")
}

pub fn space() -> Expr {
    posix("space")
}

pub fn upper() -> Expr {
    posix("upper")
}

pub fn word() -> Expr {
    posix("w")
}

pub fn xdigit() -> Expr {
    posix("xdigit")
}

// === Quantifiers ===

/// `*x`
pub fn star(x: impl Into<Expr>) -> Expr {
    Expr::quant(QuantTag::ZeroOrMore, x.into())
}

/// `+x`
pub fn plus(x: impl Into<Expr>) -> Expr {
    Expr::quant(QuantTag::OneOrMore, x.into())
}

/// `repeat<min, max>(x)`
pub fn repeat(min: u32, max: u32, x: impl Into<Expr>) -> Expr {
    Expr::quant(QuantTag::Generic { min, max }, x.into())
}

/// `repeat<n>(x)`
pub fn repeat_n(n: u32, x: impl Into<Expr>) -> Expr {
    repeat(n, n, x)
}

// === Marks and Sets ===

/// `sN`: a capture placeholder, or a back-reference when used on its own.
pub fn mark(n: MarkIndex) -> Expr {
    Expr::from(Terminal::Mark(n))
}

/// `(sN= x)`
pub fn capture(n: MarkIndex, x: impl Into<Expr>) -> Expr {
    Expr::assign(mark(n), x.into())
}

/// The bare `set` placeholder.
pub fn set() -> Expr {
    Expr::from(Terminal::SetInitializer)
}

/// `set[x]`
pub fn set_of(x: impl Into<Expr>) -> Expr {
    Expr::subscript(set(), x.into())
}

/// `(set= 'a', 'b', ...)`. An empty slice yields the bare placeholder, which
/// the grammar rejects.
pub fn set_list(chars: &[char]) -> Expr {
    let mut iter = chars.iter();
    let Some(&first) = iter.next() else {
        return set();
    };
    iter.fold(Expr::assign(set(), Expr::from(first)), |acc, &ch| {
        Expr::comma(acc, Expr::from(ch))
    })
}

/// `~x`
pub fn complement(x: impl Into<Expr>) -> Expr {
    Expr::complement(x.into())
}

// === Groups and Lookaround ===

pub fn keep(x: impl Into<Expr>) -> Expr {
    Expr::keep(x.into())
}

pub fn before(x: impl Into<Expr>) -> Expr {
    Expr::before(x.into())
}

pub fn after(x: impl Into<Expr>) -> Expr {
    Expr::after(x.into())
}

// === Modifiers ===

pub fn icase(x: impl Into<Expr>) -> Expr {
    Expr::modified(Modifier::ICase, x.into())
}

pub fn case_sensitive(x: impl Into<Expr>) -> Expr {
    Expr::modified(Modifier::Case, x.into())
}

pub fn imbue(traits: Arc<dyn RegexTraits>, x: impl Into<Expr>) -> Expr {
    Expr::modified(Modifier::Imbue(traits), x.into())
}
