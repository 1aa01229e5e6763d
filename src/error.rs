// error.rs - Error types for static regex compilation.
//
// Three failure classes: the expression does not fit the grammar, the shape
// fits but cannot be folded, or the tree is deeper than the configured limit.

use std::fmt;

// === Error Codes ===
pub const ERR_INVALID_EXPRESSION: i32 = -100;
pub const ERR_UNSUPPORTED_COMBINATION: i32 = -200;
pub const ERR_DEPTH_LIMIT_OVER: i32 = -16;

/// Error type for static regex validation and compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegexError {
    /// No grammar case accepts this expression shape.
    InvalidExpression { shape: &'static str },
    /// The shape is recognised but the compiler cannot fold it
    /// (e.g. a negated literal inside a positive set, a variable-width lookbehind).
    Unsupported { reason: &'static str },
    /// Expression nesting exceeds the configured depth limit.
    DepthLimitOver { limit: u32 },
}

impl fmt::Display for RegexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegexError::InvalidExpression { shape } => {
                write!(f, "invalid regular expression: {}", shape)
            }
            RegexError::Unsupported { reason } => {
                write!(f, "unsupported combination: {}", reason)
            }
            RegexError::DepthLimitOver { limit } => {
                write!(f, "expression depth limit over ({})", limit)
            }
        }
    }
}

impl std::error::Error for RegexError {}

impl RegexError {
    pub(crate) fn invalid(shape: &'static str) -> Self {
        RegexError::InvalidExpression { shape }
    }

    pub(crate) fn unsupported(reason: &'static str) -> Self {
        RegexError::Unsupported { reason }
    }

    /// Returns the numeric error code.
    pub fn code(&self) -> i32 {
        match self {
            RegexError::InvalidExpression { .. } => ERR_INVALID_EXPRESSION,
            RegexError::Unsupported { .. } => ERR_UNSUPPORTED_COMBINATION,
            RegexError::DepthLimitOver { .. } => ERR_DEPTH_LIMIT_OVER,
        }
    }

    /// True for rejections that the validity oracle reports statically.
    pub fn is_static_rejection(&self) -> bool {
        matches!(
            self,
            RegexError::InvalidExpression { .. } | RegexError::Unsupported { .. }
        )
    }
}
