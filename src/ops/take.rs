//! Take operator implementation
//!
//! Emits only the first `count` values emitted by the source Observable.

use crate::{
  observable::{empty, Observable},
  observer::Observer,
  scheduler::SchedulerRef,
  subscription::{SharedSubscription, Subscription},
};

/// Emits only the first `count` values emitted by the source Observable.
///
/// If the source emits fewer than `count` values then all of its values are
/// emitted. After the `count`-th value it completes on its own, regardless of
/// whether the source completes, and releases the upstream subscription.
///
/// `take(0)` never subscribes to its source: it completes right away.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use rxrust_core::prelude::*;
///
/// let result = Arc::new(Mutex::new(Vec::new()));
/// let c_result = result.clone();
/// observable::from_iter(0..10)
///   .take(5)
///   .subscribe(move |v| c_result.lock().unwrap().push(v));
/// assert_eq!(*result.lock().unwrap(), vec![0, 1, 2, 3, 4]);
/// ```
#[derive(Clone)]
pub struct Take<S> {
  pub source: S,
  pub count: usize,
}

pub struct TakeObserver<O> {
  observer: Option<O>,
  remaining: usize,
  upstream: SharedSubscription,
}

impl<O, Item, Err> Observer<Item, Err> for TakeObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if self.remaining == 0 {
      return;
    }
    if let Some(observer) = self.observer.as_mut() {
      self.remaining -= 1;
      observer.next(value);
      if self.remaining == 0 {
        tracing::trace!("take reached its count, completing early");
        if let Some(observer) = self.observer.take() {
          observer.complete();
        }
        self.upstream.unsubscribe();
      }
    }
  }

  fn error(self, err: Err) { Observer::<Item, Err>::error(self.observer, err) }

  fn complete(self) { Observer::<Item, Err>::complete(self.observer) }

  fn is_finished(&self) -> bool { Observer::<Item, Err>::is_finished(&self.observer) }
}

impl<S: Observable> Observable for Take<S> {
  type Item = S::Item;
  type Err = S::Err;
  type Unsub = SharedSubscription;

  fn actual_subscribe<O>(self, observer: O, scheduler: Option<SchedulerRef>) -> Self::Unsub
  where
    O: Observer<Self::Item, Self::Err> + Send + 'static,
  {
    let Take { source, count } = self;
    let upstream = SharedSubscription::default();
    if count == 0 {
      upstream.add(empty::<S::Item, S::Err>().actual_subscribe(observer, scheduler));
      return upstream;
    }

    let take_observer =
      TakeObserver { observer: Some(observer), remaining: count, upstream: upstream.clone() };
    // A synchronous source may already have been cut short by now; `add` then
    // releases its subscription on arrival.
    upstream.add(source.actual_subscribe(take_observer, scheduler));
    upstream
  }
}

#[cfg(test)]
mod tests {
  use std::{
    convert::Infallible,
    sync::{Arc, Mutex},
  };

  use bencher::{benchmark_group, Bencher};

  use crate::{prelude::*, subscription::ClosureSubscription};

  fn collect<S>(source: S) -> (Vec<S::Item>, bool)
  where
    S: Observable<Err = Infallible>,
    S::Item: Send + 'static,
  {
    let result = Arc::new(Mutex::new(Vec::new()));
    let completed = Arc::new(Mutex::new(0));
    let (c_result, c_completed) = (result.clone(), completed.clone());
    source.subscribe_all(
      move |v| c_result.lock().unwrap().push(v),
      |e| match e {},
      move || *c_completed.lock().unwrap() += 1,
    );
    let values = std::mem::take(&mut *result.lock().unwrap());
    let completed = *completed.lock().unwrap();
    assert!(completed <= 1, "completed {} times", completed);
    (values, completed == 1)
  }

  #[test]
  fn base_function() {
    let (values, completed) = collect(observable::from_iter(0..100).take(5));
    assert_eq!(values, vec![0, 1, 2, 3, 4]);
    assert!(completed);
  }

  #[test]
  fn take_emits_min_of_count_and_length() {
    for len in 0..6usize {
      for n in 1..8usize {
        let (values, completed) = collect(observable::from_iter(0..len).take(n));
        assert_eq!(values, (0..n.min(len)).collect::<Vec<_>>());
        assert!(completed);
      }
    }
  }

  #[test]
  fn take_zero_never_subscribes() {
    let source = observable::create(|_: Emitter<i32, Infallible>| -> () {
      panic!("take(0) must not subscribe to its source");
    });
    assert_eq!(collect(source.take(0)), (vec![], true));
  }

  #[test]
  fn take_completes_before_source_does() {
    let torn_down = Arc::new(Mutex::new(false));
    let emitted_after = Arc::new(Mutex::new(false));
    let (c_torn_down, c_emitted_after) = (torn_down.clone(), emitted_after.clone());

    let source = observable::create(move |mut e: Emitter<i32, Infallible>| {
      e.next(1);
      e.next(2);
      *c_emitted_after.lock().unwrap() = !e.is_closed();
      e.next(3);
      ClosureSubscription::new(move || *c_torn_down.lock().unwrap() = true)
    });

    assert_eq!(collect(source.take(2)), (vec![1, 2], true));
    // The upstream teardown runs as soon as `take` has its values.
    assert!(*torn_down.lock().unwrap());
    assert!(!*emitted_after.lock().unwrap());
  }

  #[test]
  fn take_forwards_errors_while_open() {
    let error = Arc::new(Mutex::new(None));
    let c_error = error.clone();
    observable::throw::<i32, _>("boom").take(3).subscribe_err(
      |_| {},
      move |e| *c_error.lock().unwrap() = Some(e),
    );
    assert_eq!(*error.lock().unwrap(), Some("boom"));
  }

  #[test]
  fn take_state_is_per_subscription() {
    let take = observable::from_iter(0..10).take(3);
    assert_eq!(collect(take.clone()).0, vec![0, 1, 2]);
    assert_eq!(collect(take).0, vec![0, 1, 2]);
  }

  #[test]
  fn take_chaining_with_skip() {
    let (values, completed) = collect(observable::from_iter(0..100).skip(10).take(3).skip(1));
    assert_eq!(values, vec![11, 12]);
    assert!(completed);
  }

  #[test]
  fn take_unsubscribe_stops_delivery() {
    let result = Arc::new(Mutex::new(Vec::new()));
    let completed = Arc::new(Mutex::new(false));
    let (c_result, c_completed) = (result.clone(), completed.clone());
    let emitter = Arc::new(Mutex::new(None));
    let c_emitter = emitter.clone();

    let mut subscription = observable::create(move |e: Emitter<i32, Infallible>| {
      *c_emitter.lock().unwrap() = Some(e);
    })
    .take(5)
    .subscribe_all(
      move |v| c_result.lock().unwrap().push(v),
      |e| match e {},
      move || *c_completed.lock().unwrap() = true,
    );

    let mut e = emitter.lock().unwrap().take().unwrap();
    e.next(1);
    subscription.unsubscribe();
    e.next(2);
    subscription.unsubscribe();
    e.complete();

    assert_eq!(*result.lock().unwrap(), vec![1]);
    assert!(!*completed.lock().unwrap());
  }

  #[test]
  fn bench() { do_bench(); }

  benchmark_group!(do_bench, bench_take);

  fn bench_take(b: &mut Bencher) { b.iter(|| collect(observable::from_iter(0..).take(500))); }
}
