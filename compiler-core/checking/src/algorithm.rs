pub mod annotation;
pub mod declaration;
pub mod expression;
pub mod pattern;
pub mod predicate;
