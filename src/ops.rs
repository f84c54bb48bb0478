//! Operators: each one is a struct holding its source that implements
//! [`Observable`](crate::observable::Observable) by subscribing the source
//! with an observer of its own, which carries the per-subscription state.
pub mod fork_join;
pub mod skip;
pub mod take;
