// expr.rs - Expression nodes produced by the combinator front end.
//
// An expression is an immutable tree. Each node carries an operator tag and
// zero, one or two operands; leaves carry a terminal payload. The compiler
// only ever reads these trees.

use std::fmt;
use std::sync::Arc;

use crate::traits::RegexTraits;

// === Mark Numbers ===
// User marks are positive and assigned by the front end. Hidden marks are
// negative and allocated by the compiler.
pub type MarkIndex = i32;

/// Upper bound used by the unbounded quantifiers (`*`, `+`).
pub const MAX_REPEAT: u32 = u32::MAX - 1;

// === Terminal Payloads ===
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Terminal {
    Char(char),
    Str(String),
    /// `_`: any single character.
    Any,
    Bol,
    Eol,
    Bos,
    Eos,
    /// `_b`
    WordBoundary,
    WordBegin,
    WordEnd,
    /// `_ln`: `\r\n` or any single newline character.
    LogicalNewline,
    /// A named POSIX class (`alpha`, `digit`, ...).
    Posix(&'static str),
    Range { min: char, max: char },
    /// `sN`: a capture placeholder. Standalone it is a back-reference.
    Mark(MarkIndex),
    /// `set`: only meaningful on the left of `=` or `[]`.
    SetInitializer,
    /// Matches the empty string.
    Epsilon,
}

// === Modifiers ===
#[derive(Clone)]
pub enum Modifier {
    ICase,
    Case,
    Imbue(Arc<dyn RegexTraits>),
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::ICase => write!(f, "ICase"),
            Modifier::Case => write!(f, "Case"),
            Modifier::Imbue(traits) => f.debug_tuple("Imbue").field(traits).finish(),
        }
    }
}

// === Quantifier Tags ===
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuantTag {
    /// `*x`
    ZeroOrMore,
    /// `+x`
    OneOrMore,
    /// `repeat<min, max>(x)`
    Generic { min: u32, max: u32 },
}

// === Operator Tags ===
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    Terminal,
    ShiftRight,
    BitwiseOr,
    Dereference,
    Posit,
    GenericQuant { min: u32, max: u32 },
    LogicalNot,
    Negate,
    Complement,
    Assign,
    Comma,
    Subscript,
    Keeper,
    Lookahead,
    Lookbehind,
    Modifier,
}

// === Expression Node ===
#[derive(Clone, Debug)]
pub enum Expr {
    Terminal(Terminal),
    /// `a >> b`
    Sequence(Box<Expr>, Box<Expr>),
    /// `a | b`
    Alternate(Box<Expr>, Box<Expr>),
    Quant(QuantTag, Box<Expr>),
    /// `!x`
    Optional(Box<Expr>),
    /// `-x`
    Negate(Box<Expr>),
    /// `~x`
    Complement(Box<Expr>),
    Assign(Box<Expr>, Box<Expr>),
    Comma(Box<Expr>, Box<Expr>),
    Subscript(Box<Expr>, Box<Expr>),
    Keep(Box<Expr>),
    Before(Box<Expr>),
    After(Box<Expr>),
    Modified(Modifier, Box<Expr>),
}

impl Expr {
    pub fn terminal(t: Terminal) -> Expr {
        Expr::Terminal(t)
    }

    pub fn sequence(left: Expr, right: Expr) -> Expr {
        Expr::Sequence(Box::new(left), Box::new(right))
    }

    pub fn alternate(left: Expr, right: Expr) -> Expr {
        Expr::Alternate(Box::new(left), Box::new(right))
    }

    pub fn quant(tag: QuantTag, operand: Expr) -> Expr {
        Expr::Quant(tag, Box::new(operand))
    }

    pub fn optional(operand: Expr) -> Expr {
        Expr::Optional(Box::new(operand))
    }

    pub fn negate(operand: Expr) -> Expr {
        Expr::Negate(Box::new(operand))
    }

    pub fn complement(operand: Expr) -> Expr {
        Expr::Complement(Box::new(operand))
    }

    pub fn assign(left: Expr, right: Expr) -> Expr {
        Expr::Assign(Box::new(left), Box::new(right))
    }

    pub fn comma(left: Expr, right: Expr) -> Expr {
        Expr::Comma(Box::new(left), Box::new(right))
    }

    pub fn subscript(left: Expr, right: Expr) -> Expr {
        Expr::Subscript(Box::new(left), Box::new(right))
    }

    pub fn keep(operand: Expr) -> Expr {
        Expr::Keep(Box::new(operand))
    }

    pub fn before(operand: Expr) -> Expr {
        Expr::Before(Box::new(operand))
    }

    pub fn after(operand: Expr) -> Expr {
        Expr::After(Box::new(operand))
    }

    pub fn modified(modifier: Modifier, operand: Expr) -> Expr {
        Expr::Modified(modifier, Box::new(operand))
    }

    /// The operator tag of this node.
    pub fn tag(&self) -> Tag {
        match self {
            Expr::Terminal(_) => Tag::Terminal,
            Expr::Sequence(..) => Tag::ShiftRight,
            Expr::Alternate(..) => Tag::BitwiseOr,
            Expr::Quant(QuantTag::ZeroOrMore, _) => Tag::Dereference,
            Expr::Quant(QuantTag::OneOrMore, _) => Tag::Posit,
            Expr::Quant(QuantTag::Generic { min, max }, _) => Tag::GenericQuant {
                min: *min,
                max: *max,
            },
            Expr::Optional(_) => Tag::LogicalNot,
            Expr::Negate(_) => Tag::Negate,
            Expr::Complement(_) => Tag::Complement,
            Expr::Assign(..) => Tag::Assign,
            Expr::Comma(..) => Tag::Comma,
            Expr::Subscript(..) => Tag::Subscript,
            Expr::Keep(_) => Tag::Keeper,
            Expr::Before(_) => Tag::Lookahead,
            Expr::After(_) => Tag::Lookbehind,
            Expr::Modified(..) => Tag::Modifier,
        }
    }

    pub fn as_terminal(&self) -> Option<&Terminal> {
        match self {
            Expr::Terminal(t) => Some(t),
            _ => None,
        }
    }

    /// `(sN= x)`: the mark number and marked operand of a capture assignment.
    pub fn as_marked_sub_expr(&self) -> Option<(MarkIndex, &Expr)> {
        match self {
            Expr::Assign(left, right) => match left.as_terminal() {
                Some(Terminal::Mark(n)) => Some((*n, &**right)),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn is_set_initializer(&self) -> bool {
        matches!(self, Expr::Terminal(Terminal::SetInitializer))
    }

    /// Operands in left-to-right order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Terminal(_) => Vec::new(),
            Expr::Sequence(l, r)
            | Expr::Alternate(l, r)
            | Expr::Assign(l, r)
            | Expr::Comma(l, r)
            | Expr::Subscript(l, r) => vec![&**l, &**r],
            Expr::Quant(_, x)
            | Expr::Optional(x)
            | Expr::Negate(x)
            | Expr::Complement(x)
            | Expr::Keep(x)
            | Expr::Before(x)
            | Expr::After(x)
            | Expr::Modified(_, x) => vec![&**x],
        }
    }

    /// Highest user mark number referenced anywhere in the tree (0 if none).
    pub fn max_mark(&self) -> MarkIndex {
        let own = match self {
            Expr::Terminal(Terminal::Mark(n)) => *n,
            _ => 0,
        };
        self.children()
            .into_iter()
            .map(Expr::max_mark)
            .fold(own.max(0), MarkIndex::max)
    }
}

impl From<char> for Expr {
    fn from(ch: char) -> Expr {
        Expr::Terminal(Terminal::Char(ch))
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Expr {
        Expr::Terminal(Terminal::Str(s.to_string()))
    }
}

impl From<Terminal> for Expr {
    fn from(t: Terminal) -> Expr {
        Expr::Terminal(t)
    }
}
