//! Example grammars built from the public combinators.

pub mod email;
pub mod expression;
