//! # rxrust-core: the reactive core of Reactive Extensions for Rust
//!
//! A small, thread-safe subset of [Reactive Extensions](http://reactivex.io/):
//! the Observable / Observer / Subscription contract, the `skip` and `take`
//! operators, `fork_join`, and a pluggable [`Scheduler`] seam.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use rxrust_core::prelude::*;
//!
//! let result = Arc::new(Mutex::new(Vec::new()));
//! let c_result = result.clone();
//! fork_join((observable::from_iter(0..10).skip(2).take(3), observable::of('z')))
//!   .subscribe(move |v| c_result.lock().unwrap().push(v));
//! assert_eq!(*result.lock().unwrap(), vec![(4, 'z')]);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | A description of a sequence, consumed by each subscribe |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Subscription`] | Handle to cancel an active subscription |
//! | [`Scheduler`] | Where sources run their emission work |
//!
//! ## Feature Flags
//!
//! - **`futures-scheduler`** (default): implements [`Scheduler`] for
//!   `futures::executor::ThreadPool`
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`Scheduler`]: scheduler::Scheduler

pub mod error;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod scheduler;
pub mod subscription;

// Re-export the prelude module
pub use prelude::*;
