//! # Statrex
//!
//! Static regular-expression grammar compiler. Expressions are built from
//! combinators (`>>`, `|`, quantifiers, sets, marks, lookaround, modifiers),
//! checked against a closed grammar, and compiled ahead of any matching into
//! a linked chain of typed matcher nodes with width and purity worked out.
//!
//! ## Quick Start
//!
//! ```rust
//! use statrex::prelude::*;
//!
//! let expr = capture(1, 'a') >> star(digit()) >> !lit("xyz");
//! let re = StaticRegex::new(&expr).unwrap();
//!
//! let names: Vec<&str> = re.program().iter().map(Matcher::name).collect();
//! assert_eq!(
//!     names,
//!     ["mark_begin", "literal", "mark_end", "simple_repeat", "optional", "end"]
//! );
//! ```
//!
//! Ill-formed expressions are rejected before any matcher exists:
//!
//! ```rust
//! use statrex::prelude::*;
//!
//! // Lookbehind needs a fixed width.
//! let err = StaticRegex::new(&after(plus('a'))).unwrap_err();
//! assert!(matches!(err, RegexError::Unsupported { .. }));
//! assert!(!statrex::validate::is_valid(&after(plus('a'))));
//! ```
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`expr`] | Expression tree |
//! | [`dsl`] | Operators and constructor functions |
//! | [`traits`] | Character traits (`AsciiTraits`, `UnicodeTraits`) |
//! | [`oracle`] | Width, purity and quantifier bounds |
//! | [`matcher`] | Compiled matcher nodes and sequences |
//! | [`charset`] | Character-set builder |
//! | [`alternates`] | Alternation list builder |
//! | [`repeat`] | Repetition compiler |
//! | [`visitor`] | Per-compilation context |
//! | [`grammar`] | Case dispatcher |
//! | [`validate`] | Validity oracle |
//! | [`api`] | `StaticRegex` and `RegexBuilder` |

pub mod alternates;
pub mod api;
pub mod charset;
pub mod dsl;
pub mod error;
pub mod expr;
pub mod grammar;
pub mod matcher;
pub mod oracle;
pub mod prelude;
pub mod repeat;
pub mod traits;
pub mod validate;
pub mod visitor;
