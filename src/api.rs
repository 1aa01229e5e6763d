// api.rs - Public entry point for static regex compilation.
//
// Wraps validate + compile behind StaticRegex and RegexBuilder: validation
// runs first, and a program is only produced for expressions that pass it.

use std::sync::Arc;

use crate::error::RegexError;
use crate::expr::{Expr, MarkIndex};
use crate::grammar;
use crate::matcher::{Matcher, Sequence};
use crate::oracle::Width;
use crate::traits::{RegexTraits, UnicodeTraits};
use crate::validate;
use crate::visitor::{Visitor, DEFAULT_DEPTH_LIMIT};

/// A compiled static regular expression.
///
/// # Examples
///
/// ```
/// use statrex::prelude::*;
///
/// let re = StaticRegex::new(&(lit('a') >> 'b')).unwrap();
/// assert_eq!(re.width(), Width::Fixed(2));
/// assert!(re.is_pure());
/// assert_eq!(re.program().len(), 3); // 'a', 'b', end
/// ```
pub struct StaticRegex {
    program: Sequence,
    traits: Arc<dyn RegexTraits>,
    mark_count: MarkIndex,
    hidden_mark_count: u32,
}

impl StaticRegex {
    /// Validate and compile `expr` with default options (Unicode traits,
    /// case-sensitive, default depth limit).
    pub fn new(expr: &Expr) -> Result<StaticRegex, RegexError> {
        RegexBuilder::new(expr.clone()).build()
    }

    /// Create a [`RegexBuilder`] for fine-grained control over compilation.
    pub fn builder(expr: impl Into<Expr>) -> RegexBuilder {
        RegexBuilder::new(expr.into())
    }

    /// The compiled matcher chain, terminated by [`Matcher::End`].
    pub fn program(&self) -> &Sequence {
        &self.program
    }

    /// Width of the whole program.
    pub fn width(&self) -> Width {
        self.program.width()
    }

    pub fn is_pure(&self) -> bool {
        self.program.is_pure()
    }

    /// Highest user mark number in the expression.
    pub fn mark_count(&self) -> MarkIndex {
        self.mark_count
    }

    /// Hidden marks allocated for repetition bookkeeping.
    pub fn hidden_mark_count(&self) -> u32 {
        self.hidden_mark_count
    }

    pub fn traits(&self) -> &dyn RegexTraits {
        self.traits.as_ref()
    }
}

impl std::fmt::Debug for StaticRegex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticRegex")
            .field("marks", &self.mark_count)
            .field("hidden_marks", &self.hidden_mark_count)
            .finish_non_exhaustive()
    }
}

// === RegexBuilder ===

/// Builder for compiling a [`StaticRegex`] with custom options.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use statrex::prelude::*;
///
/// let re = StaticRegex::builder(set_of(range('a', 'z') | digit()))
///     .traits(Arc::new(AsciiTraits))
///     .case_insensitive(true)
///     .build()
///     .unwrap();
/// assert!(re.program().head().test_char('Q', re.traits()).unwrap());
/// ```
pub struct RegexBuilder {
    expr: Expr,
    traits: Arc<dyn RegexTraits>,
    icase: bool,
    depth_limit: u32,
}

impl RegexBuilder {
    /// Create a new builder for the given expression.
    pub fn new(expr: Expr) -> Self {
        RegexBuilder {
            expr,
            traits: Arc::new(UnicodeTraits),
            icase: false,
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }

    /// Select the character traits (default: [`UnicodeTraits`]).
    pub fn traits(mut self, traits: Arc<dyn RegexTraits>) -> Self {
        self.traits = traits;
        self
    }

    /// Start compilation case-insensitive. `icase`/`case_sensitive`
    /// modifiers inside the expression still apply to their operands.
    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.icase = yes;
        self
    }

    /// Maximum expression nesting depth (default: 4096).
    pub fn depth_limit(mut self, limit: u32) -> Self {
        self.depth_limit = limit;
        self
    }

    /// Validate and compile the expression into a [`StaticRegex`].
    pub fn build(self) -> Result<StaticRegex, RegexError> {
        validate::check(&self.expr, self.depth_limit)?;

        log::debug!("compiling static regex (depth limit {})", self.depth_limit);
        let mut visitor = Visitor::new(Arc::clone(&self.traits), self.icase, self.depth_limit);
        let program = grammar::compile(&self.expr, Some(Sequence::single(Matcher::End)), &mut visitor)?;
        let hidden_mark_count = visitor.hidden_mark_count();
        log::debug!(
            "compiled {} matchers, {} hidden marks",
            program.len(),
            hidden_mark_count
        );

        Ok(StaticRegex {
            program,
            traits: self.traits,
            mark_count: self.expr.max_mark(),
            hidden_mark_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::*;

    #[test]
    fn invalid_expression_produces_no_program() {
        let err = StaticRegex::new(&set()).unwrap_err();
        assert!(matches!(err, RegexError::InvalidExpression { .. }));
    }

    #[test]
    fn counts_marks() {
        let re = StaticRegex::new(&(capture(1, 'a') >> plus(capture(2, logical_newline())))).unwrap();
        assert_eq!(re.mark_count(), 2);
        assert_eq!(re.hidden_mark_count(), 0);
        let re = StaticRegex::new(&plus(lit('a') >> logical_newline())).unwrap();
        assert_eq!(re.hidden_mark_count(), 1);
    }

    #[test]
    fn depth_limit_is_configurable() {
        let e = keep(keep(keep('a')));
        assert!(StaticRegex::builder(e.clone()).depth_limit(4).build().is_ok());
        let err = StaticRegex::builder(e).depth_limit(3).build().unwrap_err();
        assert_eq!(err, RegexError::DepthLimitOver { limit: 3 });
    }
}
