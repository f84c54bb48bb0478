//! The Observable contract and the public subscribe surface.
//!
//! An observable is a description of how to produce a sequence for one
//! subscriber. `actual_subscribe` consumes the description and allocates the
//! per-subscription state; subscribing again means cloning the description
//! first, and every clone produces an independent stream.

use std::convert::Infallible;

use crate::{
  error::{non_negative, RxError},
  observer::{FnMutObserver, Observer, ObserverAll, ObserverErr, Subscriber},
  ops::{fork_join::ForkJoin, skip::Skip, take::Take},
  scheduler::SchedulerRef,
  subscription::{SharedSubscription, SingleSubscription, Subscription, SubscriptionWrapper},
};

pub mod create;
pub mod from_iter;
pub mod trivial;

pub use create::*;
pub use from_iter::*;
pub use trivial::*;

/// A representation of any set of values over any amount of time. This is the
/// most basic building block of rx.
pub trait Observable: Sized {
  type Item;
  type Err;
  type Unsub: Subscription + Send + 'static;

  /// Subscribe `observer` to this sequence.
  ///
  /// `scheduler` is forwarded untouched to every upstream source; `None`
  /// means notifications are produced in the caller's own context.
  fn actual_subscribe<O>(self, observer: O, scheduler: Option<SchedulerRef>) -> Self::Unsub
  where
    O: Observer<Self::Item, Self::Err> + Send + 'static;
}

/// Subscribe helpers and operator builders available on every observable.
pub trait ObservableExt: Observable {
  /// Subscribe with a full observer, optionally on a scheduler.
  ///
  /// Unsubscribing the returned handle stops every further notification to
  /// `observer`, and is safe to repeat or to call after the stream ended.
  fn subscribe_with<O>(
    self, observer: O, scheduler: Option<SchedulerRef>,
  ) -> SubscriptionWrapper<SharedSubscription>
  where
    O: Observer<Self::Item, Self::Err> + Send + 'static,
  {
    let stopped = SingleSubscription::default();
    let subscription = SharedSubscription::default();
    subscription.add(stopped.clone());
    let unsub = self.actual_subscribe(Subscriber::new(observer, stopped), scheduler);
    subscription.add(unsub);
    SubscriptionWrapper(subscription)
  }

  /// Subscribe to a sequence that can't fail, handling values only.
  fn subscribe<N>(self, next: N) -> SubscriptionWrapper<SharedSubscription>
  where
    Self: Observable<Err = Infallible>,
    N: FnMut(Self::Item) + Send + 'static,
  {
    self.subscribe_with(FnMutObserver(next), None)
  }

  fn subscribe_err<N, E>(self, next: N, error: E) -> SubscriptionWrapper<SharedSubscription>
  where
    N: FnMut(Self::Item) + Send + 'static,
    E: FnOnce(Self::Err) + Send + 'static,
  {
    self.subscribe_with(ObserverErr { next, error }, None)
  }

  fn subscribe_all<N, E, C>(
    self, next: N, error: E, complete: C,
  ) -> SubscriptionWrapper<SharedSubscription>
  where
    N: FnMut(Self::Item) + Send + 'static,
    E: FnOnce(Self::Err) + Send + 'static,
    C: FnOnce() + Send + 'static,
  {
    self.subscribe_with(ObserverAll { next, error, complete }, None)
  }

  /// Ignore the first `count` values.
  #[inline]
  fn skip(self, count: usize) -> Skip<Self> { Skip { source: self, count } }

  /// Like [`skip`](ObservableExt::skip), for counts coming from signed
  /// arithmetic. A negative count is rejected here, before anything is
  /// subscribed.
  fn try_skip(self, count: i64) -> Result<Skip<Self>, RxError> {
    non_negative("count", count).map(|count| self.skip(count))
  }

  /// Emit only the first `count` values, then complete.
  #[inline]
  fn take(self, count: usize) -> Take<Self> { Take { source: self, count } }

  /// Like [`take`](ObservableExt::take), rejecting negative counts before
  /// anything is subscribed.
  fn try_take(self, count: i64) -> Result<Take<Self>, RxError> {
    non_negative("count", count).map(|count| self.take(count))
  }

  /// Wait for both `self` and `other` to complete, then emit their last
  /// values as a pair.
  #[inline]
  fn fork_join<B>(self, other: B) -> ForkJoin<(Self, B)>
  where
    B: Observable<Err = Self::Err>,
  {
    ForkJoin::new((self, other))
  }
}

impl<T: Observable> ObservableExt for T {}

#[cfg(test)]
mod tests {
  use std::sync::{Arc, Mutex};

  use super::*;

  #[test]
  fn subscribe_twice_yields_independent_streams() {
    let first = Arc::new(Mutex::new(vec![]));
    let second = Arc::new(Mutex::new(vec![]));
    let (c_first, c_second) = (first.clone(), second.clone());

    let source = from_iter(vec![1, 2, 3]).skip(1);
    source.clone().subscribe(move |v| c_first.lock().unwrap().push(v));
    source.subscribe(move |v| c_second.lock().unwrap().push(v));

    assert_eq!(*first.lock().unwrap(), vec![2, 3]);
    assert_eq!(*second.lock().unwrap(), vec![2, 3]);
  }

  #[test]
  fn negative_counts_fail_at_build_time() {
    let subscribed = Arc::new(Mutex::new(false));
    let c_subscribed = subscribed.clone();
    let source = create(move |_: Emitter<i32, Infallible>| {
      *c_subscribed.lock().unwrap() = true;
    });

    assert!(matches!(
      source.clone().try_skip(-1),
      Err(RxError::ArgumentOutOfRange { value: -1, .. })
    ));
    assert!(matches!(
      source.clone().try_take(-3),
      Err(RxError::ArgumentOutOfRange { value: -3, .. })
    ));
    assert!(!*subscribed.lock().unwrap());

    assert!(source.clone().try_skip(0).is_ok());
    assert!(source.try_take(2).is_ok());
  }

  #[test]
  fn subscribe_all_sees_completion() {
    let completed = Arc::new(Mutex::new(false));
    let c_completed = completed.clone();
    from_iter::<_, ()>(0..3).subscribe_all(
      |_| {},
      |_| {},
      move || *c_completed.lock().unwrap() = true,
    );
    assert!(*completed.lock().unwrap());
  }
}
