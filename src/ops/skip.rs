//! Skip operator implementation
//!
//! This module contains the Skip operator, which ignores the first `count`
//! values emitted by the source Observable, then emits the rest.

use crate::{observable::Observable, observer::Observer, scheduler::SchedulerRef};

/// Skip operator: Ignores the first `count` values from the source observable
///
/// If the source completes before emitting `count` values, `skip` completes
/// without emitting any values. Errors and completion pass through untouched.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use rxrust_core::prelude::*;
///
/// let result = Arc::new(Mutex::new(Vec::new()));
/// let c_result = result.clone();
/// observable::from_iter([1, 2, 3, 4, 5])
///   .skip(2)
///   .subscribe(move |v| c_result.lock().unwrap().push(v));
/// assert_eq!(*result.lock().unwrap(), vec![3, 4, 5]);
/// ```
#[derive(Clone)]
pub struct Skip<S> {
  pub source: S,
  pub count: usize,
}

/// Counts down `remaining` before letting values through.
pub struct SkipObserver<O> {
  observer: O,
  remaining: usize,
}

impl<O, Item, Err> Observer<Item, Err> for SkipObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, v: Item) {
    if self.remaining > 0 {
      self.remaining -= 1;
    } else {
      self.observer.next(v);
    }
  }

  fn error(self, e: Err) { self.observer.error(e); }

  fn complete(self) { self.observer.complete(); }

  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

impl<S: Observable> Observable for Skip<S> {
  type Item = S::Item;
  type Err = S::Err;
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O, scheduler: Option<SchedulerRef>) -> Self::Unsub
  where
    O: Observer<Self::Item, Self::Err> + Send + 'static,
  {
    let Skip { source, count } = self;
    source.actual_subscribe(SkipObserver { observer, remaining: count }, scheduler)
  }
}
