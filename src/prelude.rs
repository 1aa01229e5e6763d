// prelude.rs - Convenient re-exports for building and compiling expressions.
//
//! # Prelude
//!
//! ```
//! use statrex::prelude::*;
//!
//! let re = StaticRegex::new(&(capture(1, plus(digit())) >> '-' >> mark(1))).unwrap();
//! assert_eq!(re.mark_count(), 1);
//! ```

pub use crate::api::{RegexBuilder, StaticRegex};
pub use crate::dsl::*;
pub use crate::error::RegexError;
pub use crate::expr::{Expr, Terminal};
pub use crate::matcher::{Matcher, Sequence};
pub use crate::oracle::Width;
pub use crate::traits::{AsciiTraits, RegexTraits, UnicodeTraits};
