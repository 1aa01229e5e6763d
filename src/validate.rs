// validate.rs - Validity oracle.
//
// Walks the same cases as the grammar without a visitor and reports the
// first shape the compiler would reject. Structural mismatches come back
// as `InvalidExpression`; shapes that parse but cannot be folded come back as
// `Unsupported`. Nesting deeper than the limit is `DepthLimitOver`.

use smallvec::SmallVec;

use crate::alternates::flatten_alternates;
use crate::error::RegexError;
use crate::expr::{Expr, Terminal};
use crate::grammar::collect_list_set;
use crate::oracle::{self, Width};
use crate::traits::is_class_name;
use crate::visitor::DEFAULT_DEPTH_LIMIT;

/// True when `expr` belongs to the grammar (default depth limit).
pub fn is_valid(expr: &Expr) -> bool {
    check(expr, DEFAULT_DEPTH_LIMIT).is_ok()
}

/// Check `expr` against the grammar, short-circuiting on the first failure.
pub fn check(expr: &Expr, depth_limit: u32) -> Result<(), RegexError> {
    Checker { depth_limit }.node(expr, 1)
}

struct Checker {
    depth_limit: u32,
}

impl Checker {
    fn enter(&self, depth: u32) -> Result<(), RegexError> {
        if depth > self.depth_limit {
            return Err(RegexError::DepthLimitOver {
                limit: self.depth_limit,
            });
        }
        Ok(())
    }

    fn node(&self, expr: &Expr, depth: u32) -> Result<(), RegexError> {
        self.enter(depth)?;
        let depth = depth + 1;
        match expr {
            Expr::Terminal(t) => check_terminal(t),

            Expr::Sequence(left, right) => {
                self.node(left, depth)?;
                self.node(right, depth)
            }

            Expr::Alternate(..) => {
                let mut leaves = Vec::new();
                flatten_alternates(expr, &mut leaves);
                leaves.into_iter().try_for_each(|leaf| self.node(leaf, depth))
            }

            Expr::Quant(tag, operand) => {
                let (min, max) = tag.bounds();
                self.quantified(operand, min, max, depth)
            }
            Expr::Optional(operand) => self.quantified(operand, 0, 1, depth),

            Expr::Negate(operand) => match &**operand {
                Expr::Quant(..) | Expr::Optional(..) => self.node(operand, depth),
                _ => Err(RegexError::invalid("unary minus on a non-quantified expression")),
            },

            Expr::Complement(operand) => self.complement(operand, depth),

            Expr::Assign(left, right) => {
                if let Some((mark, body)) = expr.as_marked_sub_expr() {
                    if mark <= 0 {
                        return Err(RegexError::invalid("mark numbers must be positive"));
                    }
                    return self.node(body, depth);
                }
                if left.is_set_initializer() {
                    return match &**right {
                        Expr::Terminal(Terminal::Char(_)) => Ok(()),
                        _ => Err(RegexError::invalid("set assignment of a non-character")),
                    };
                }
                Err(RegexError::invalid("assignment to something other than a mark or set"))
            }

            Expr::Comma(..) => check_list_set(expr),

            Expr::Subscript(left, right) => {
                if !left.is_set_initializer() {
                    return Err(RegexError::invalid("subscript of something other than set"));
                }
                self.set_body(right, depth)
            }

            Expr::Keep(operand) | Expr::Before(operand) => self.node(operand, depth),

            Expr::After(operand) => {
                self.node(operand, depth)?;
                if oracle::width_of(operand) == Width::Unknown {
                    return Err(RegexError::unsupported("variable-width lookbehind"));
                }
                Ok(())
            }

            Expr::Modified(_, operand) => self.node(operand, depth),
        }
    }

    fn quantified(&self, operand: &Expr, min: u32, max: u32, depth: u32) -> Result<(), RegexError> {
        if min > max || max == 0 {
            return Err(RegexError::invalid("quantifier bounds"));
        }
        self.node(operand, depth)?;
        if oracle::width_of(operand) == Width::ZERO {
            return Err(RegexError::unsupported("quantified zero-width expression"));
        }
        Ok(())
    }

    /// Operand of `set[...]`: one element, or a `|` chain of elements.
    fn set_body(&self, body: &Expr, depth: u32) -> Result<(), RegexError> {
        if let Expr::Terminal(t) = body {
            return check_set_terminal(t);
        }
        let mut leaves = Vec::new();
        flatten_alternates(body, &mut leaves);
        leaves.into_iter().try_for_each(|leaf| self.set_element(leaf, depth))
    }

    fn set_element(&self, leaf: &Expr, depth: u32) -> Result<(), RegexError> {
        match leaf {
            Expr::Terminal(t) => {
                self.enter(depth)?;
                check_set_terminal(t)
            }
            Expr::Assign(left, _) if !left.is_set_initializer() => {
                Err(RegexError::invalid("capture inside a character set"))
            }
            Expr::Subscript(..) | Expr::Comma(..) | Expr::Assign(..) => self.node(leaf, depth),
            Expr::Complement(inner) => {
                self.enter(depth)?;
                self.negated_set_element(inner)
            }
            Expr::Modified(..) => Err(RegexError::unsupported("modifier inside a character set")),
            _ => Err(RegexError::invalid("character set element")),
        }
    }

    /// `~x` inside `set[...]`: only classes carry a polarity the
    /// accumulator can fold.
    fn negated_set_element(&self, inner: &Expr) -> Result<(), RegexError> {
        match inner {
            Expr::Terminal(t @ (Terminal::Posix(_) | Terminal::LogicalNewline)) => check_terminal(t),
            Expr::Subscript(left, right) if left.is_set_initializer() => match &**right {
                Expr::Terminal(t @ (Terminal::Posix(_) | Terminal::LogicalNewline)) => check_terminal(t),
                _ => Err(RegexError::unsupported("negated element inside a character set")),
            },
            _ => Err(RegexError::unsupported("negated element inside a character set")),
        }
    }

    fn complement(&self, operand: &Expr, depth: u32) -> Result<(), RegexError> {
        match operand {
            Expr::Terminal(t) => check_complement_terminal(t),
            Expr::Before(_) | Expr::After(_) => self.node(operand, depth),
            Expr::Subscript(left, right) if left.is_set_initializer() => match &**right {
                Expr::Terminal(t) => check_set_terminal(t),
                _ => self.node(operand, depth),
            },
            Expr::Assign(left, _) if left.is_set_initializer() => self.node(operand, depth),
            Expr::Comma(..) => check_list_set(operand),
            _ => Err(RegexError::invalid("complement of an expression that is not a character class")),
        }
    }
}

fn check_terminal(t: &Terminal) -> Result<(), RegexError> {
    match t {
        Terminal::Posix(name) if !is_class_name(name) => {
            Err(RegexError::invalid("unknown character class name"))
        }
        Terminal::Range { min, max } if min > max => Err(RegexError::invalid("reversed character range")),
        Terminal::SetInitializer => Err(RegexError::invalid("set placeholder used on its own")),
        Terminal::Mark(n) if *n <= 0 => Err(RegexError::invalid("back-reference to a non-positive mark")),
        _ => Ok(()),
    }
}

fn check_set_terminal(t: &Terminal) -> Result<(), RegexError> {
    match t {
        Terminal::Char(_) | Terminal::Range { .. } | Terminal::Posix(_) | Terminal::LogicalNewline => {
            check_terminal(t)
        }
        _ => Err(RegexError::invalid("set element is not a character, range or class")),
    }
}

fn check_complement_terminal(t: &Terminal) -> Result<(), RegexError> {
    match t {
        Terminal::WordBoundary
        | Terminal::Char(_)
        | Terminal::LogicalNewline
        | Terminal::Posix(_)
        | Terminal::Range { .. } => check_terminal(t),
        _ => Err(RegexError::invalid("complement of a terminal that is not a character class")),
    }
}

fn check_list_set(expr: &Expr) -> Result<(), RegexError> {
    let mut chars: SmallVec<[char; 8]> = SmallVec::new();
    if collect_list_set(expr, &mut chars) {
        Ok(())
    } else {
        Err(RegexError::invalid("comma outside a list set"))
    }
}
