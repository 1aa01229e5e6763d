// oracle.rs - Static width, purity and quantifier-bound queries.
//
// Every expression shape the grammar accepts has a width and purity rule
// here. The matcher module reports the same properties on compiled nodes;
// the two must agree for every valid expression.

use std::ops::Add;

use crate::expr::{Expr, QuantTag, Tag, Terminal, MAX_REPEAT};

// === Width ===

/// Statically known count of characters a matcher consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Width {
    Fixed(usize),
    Unknown,
}

impl Width {
    pub const ZERO: Width = Width::Fixed(0);

    /// Common width of two alternatives, `Unknown` if they differ.
    pub fn unify(self, other: Width) -> Width {
        if self == other {
            self
        } else {
            Width::Unknown
        }
    }

    /// Width of `count` back-to-back copies, capping overflow at `Unknown`.
    pub fn times(self, count: u32) -> Width {
        match self {
            Width::Fixed(n) => n
                .checked_mul(count as usize)
                .map_or(Width::Unknown, Width::Fixed),
            Width::Unknown => Width::Unknown,
        }
    }
}

impl Add for Width {
    type Output = Width;

    fn add(self, rhs: Width) -> Width {
        match (self, rhs) {
            (Width::Fixed(a), Width::Fixed(b)) => a.checked_add(b).map_or(Width::Unknown, Width::Fixed),
            _ => Width::Unknown,
        }
    }
}

// === Quantifier Bounds ===

/// Canonical (min, max) bounds for a quantifying tag. Non-quantifier tags
/// have no bounds.
pub fn bounds_of(tag: Tag) -> Option<(u32, u32)> {
    match tag {
        Tag::Posit => Some((1, MAX_REPEAT)),
        Tag::Dereference => Some((0, MAX_REPEAT)),
        Tag::LogicalNot => Some((0, 1)),
        Tag::GenericQuant { min, max } => Some((min, max)),
        _ => None,
    }
}

impl QuantTag {
    pub fn bounds(self) -> (u32, u32) {
        match self {
            QuantTag::ZeroOrMore => (0, MAX_REPEAT),
            QuantTag::OneOrMore => (1, MAX_REPEAT),
            QuantTag::Generic { min, max } => (min, max),
        }
    }
}

// === Width of Expressions ===

/// Width of a terminal's matcher.
pub fn terminal_width(t: &Terminal) -> Width {
    match t {
        Terminal::Char(_) | Terminal::Any | Terminal::Posix(_) | Terminal::Range { .. } => {
            Width::Fixed(1)
        }
        Terminal::Str(s) => Width::Fixed(s.chars().count()),
        Terminal::Bol
        | Terminal::Eol
        | Terminal::Bos
        | Terminal::Eos
        | Terminal::WordBoundary
        | Terminal::WordBegin
        | Terminal::WordEnd
        | Terminal::Epsilon => Width::ZERO,
        Terminal::LogicalNewline | Terminal::Mark(_) | Terminal::SetInitializer => Width::Unknown,
    }
}

/// Static width of a (valid) expression.
pub fn width_of(expr: &Expr) -> Width {
    match expr {
        Expr::Terminal(t) => terminal_width(t),
        Expr::Sequence(left, right) => width_of(left) + width_of(right),
        Expr::Alternate(left, right) => width_of(left).unify(width_of(right)),
        Expr::Quant(tag, operand) => {
            let (min, max) = tag.bounds();
            if use_simple_repeat(operand) && min == max {
                width_of(operand).times(min)
            } else {
                Width::Unknown
            }
        }
        Expr::Optional(_) => Width::Unknown,
        Expr::Negate(operand) => width_of(operand),
        Expr::Complement(operand) => match &**operand {
            Expr::Terminal(Terminal::WordBoundary) | Expr::Before(_) | Expr::After(_) => Width::ZERO,
            _ => Width::Fixed(1),
        },
        Expr::Assign(left, right) => {
            if left.is_set_initializer() {
                Width::Fixed(1)
            } else {
                width_of(right)
            }
        }
        // Every set form matches exactly one character, `_ln` included.
        Expr::Comma(..) | Expr::Subscript(..) => Width::Fixed(1),
        Expr::Keep(operand) | Expr::Modified(_, operand) => width_of(operand),
        Expr::Before(_) | Expr::After(_) => Width::ZERO,
    }
}

// === Purity of Expressions ===

/// Does the expression leave no persistent state (capture writes, repeat
/// counters) behind when it matches?
pub fn is_pure(expr: &Expr) -> bool {
    match expr {
        Expr::Terminal(_) => true,
        Expr::Sequence(left, right) | Expr::Alternate(left, right) => is_pure(left) && is_pure(right),
        Expr::Quant(tag, operand) => {
            if use_simple_repeat(operand) {
                return true;
            }
            // (0,1) falls back to the optional matcher; every other bound
            // goes through hidden-mark bookkeeping.
            tag.bounds() == (0, 1) && is_pure(operand)
        }
        Expr::Optional(operand) | Expr::Negate(operand) => is_pure(operand),
        Expr::Complement(operand) => match &**operand {
            Expr::Before(inner) | Expr::After(inner) => is_pure(inner),
            _ => true,
        },
        Expr::Assign(left, _) => left.is_set_initializer(),
        Expr::Comma(..) | Expr::Subscript(..) => true,
        Expr::Keep(operand) | Expr::Before(operand) | Expr::After(operand) => is_pure(operand),
        Expr::Modified(_, operand) => is_pure(operand),
    }
}

/// Can `operand` be repeated without mark bookkeeping? It must have a known,
/// non-zero width and be pure.
pub fn use_simple_repeat(operand: &Expr) -> bool {
    matches!(width_of(operand), Width::Fixed(n) if n != 0) && is_pure(operand)
}
