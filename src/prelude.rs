//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Errors
pub use crate::error::RxError;
// Core traits and sources
pub use crate::observable::{
  self, create, empty, from_iter, never, of, throw, Create, Emitter, Empty, FromIter, Never,
  Observable, ObservableExt, Throw,
};
// Observers
pub use crate::observer::{
  BoxObserver, DynObserver, FnMutObserver, Observer, ObserverAll, ObserverErr, Subscriber,
};
// Operators
pub use crate::ops::{
  fork_join::{fork_join, fork_join_all, ForkJoin},
  skip::Skip,
  take::Take,
};
// Scheduler
pub use crate::scheduler::{Scheduler, SchedulerRef, Task};
// Subscription
pub use crate::subscription::*;
