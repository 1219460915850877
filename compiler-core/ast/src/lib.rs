//! The node taxonomy of name-resolved and fully-typed programs.
//!
//! [`named`] is produced by the naming phase: every expression and pattern
//! carries a type variable slot, and declarations are kept in source order.
//! [`typed`] is produced by inference: every expression and pattern carries
//! its resolved [`types::Type`], and declarations are indexed by symbol.

pub mod named;
pub mod typed;

mod syntax;

pub use syntax::*;
