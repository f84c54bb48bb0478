//! ForkJoin operator implementation
//!
//! ForkJoin subscribes to several observables at once, waits for every one of
//! them to complete and then emits their last values together, in source
//! order.

use std::mem;

use smallvec::{smallvec, SmallVec};

use crate::{
  observable::{empty, Observable},
  observer::Observer,
  rc::{MutArc, RcDeref, RcDerefMut},
  scheduler::SchedulerRef,
  subscription::{SharedSubscription, Subscription},
};

/// Wait for all `sources` to complete, then emit a tuple of the last value
/// each of them emitted.
///
/// * If any source completes without having emitted a value, the result
///   completes at that moment without emitting.
/// * If any source errors, the result errors at that moment.
///
/// In both cases every other source subscription is released. Works on tuples
/// of one to six observables sharing the same error type.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use rxrust_core::prelude::*;
///
/// let result = Arc::new(Mutex::new(None));
/// let c_result = result.clone();
/// fork_join((observable::from_iter([1, 2]), observable::of("x")))
///   .subscribe(move |v| *c_result.lock().unwrap() = Some(v));
/// assert_eq!(*result.lock().unwrap(), Some((2, "x")));
/// ```
pub fn fork_join<Sources>(sources: Sources) -> ForkJoin<Sources> { ForkJoin::new(sources) }

/// [`fork_join`] over any number of observables of the same type; emits a
/// `Vec` of their last values. An empty list completes right away.
pub fn fork_join_all<S: Observable>(sources: Vec<S>) -> ForkJoin<Vec<S>> { ForkJoin::new(sources) }

#[derive(Clone)]
pub struct ForkJoin<Sources> {
  sources: Sources,
}

impl<Sources> ForkJoin<Sources> {
  pub fn new(sources: Sources) -> Self { ForkJoin { sources } }
}

// ==================== Shared State ====================

/// Join state of one subscription, behind a single lock. Whoever takes
/// `observer` out of it owns the terminal notification.
struct JoinState<Values, Output, O> {
  observer: Option<O>,
  values: Values,
  emitted: SmallVec<[bool; 4]>,
  completed: SmallVec<[bool; 4]>,
  outstanding: usize,
  finish: fn(Values) -> Option<Output>,
}

/// What a completing source decided, acted on once the lock is released.
enum Verdict<O, Output> {
  Pending,
  Empty(O),
  Joined(O, Option<Output>),
}

impl<Values: Default, Output, O> JoinState<Values, Output, O> {
  fn on_complete(&mut self, index: usize) -> Verdict<O, Output> {
    if self.observer.is_none() || self.completed[index] {
      return Verdict::Pending;
    }
    self.completed[index] = true;
    if !self.emitted[index] {
      return self.observer.take().map_or(Verdict::Pending, Verdict::Empty);
    }
    self.outstanding -= 1;
    if self.outstanding > 0 {
      return Verdict::Pending;
    }
    match self.observer.take() {
      Some(observer) => {
        let values = mem::take(&mut self.values);
        Verdict::Joined(observer, (self.finish)(values))
      }
      None => Verdict::Pending,
    }
  }
}

// ==================== Observer ====================

/// Observer for the source at `index`.
pub struct ForkJoinObserver<Values, Output, O, Item> {
  index: usize,
  state: MutArc<JoinState<Values, Output, O>>,
  store: fn(&mut Values, usize, Item),
  subscription: SharedSubscription,
}

impl<Values, Output, O, Item, Err> Observer<Item, Err> for ForkJoinObserver<Values, Output, O, Item>
where
  O: Observer<Output, Err>,
  Values: Default,
{
  fn next(&mut self, value: Item) {
    let mut guard = self.state.rc_deref_mut();
    let state = &mut *guard;
    if state.observer.is_some() {
      (self.store)(&mut state.values, self.index, value);
      state.emitted[self.index] = true;
    }
  }

  fn error(self, err: Err) {
    let observer = self.state.rc_deref_mut().observer.take();
    if let Some(observer) = observer {
      tracing::debug!(source = self.index, "fork_join source errored, releasing the other sources");
      let mut subscription = self.subscription;
      subscription.unsubscribe();
      observer.error(err);
    }
  }

  fn complete(self) {
    let verdict = self.state.rc_deref_mut().on_complete(self.index);
    let mut subscription = self.subscription;
    match verdict {
      Verdict::Pending => {}
      Verdict::Empty(observer) => {
        tracing::debug!(source = self.index, "fork_join source completed empty, completing early");
        subscription.unsubscribe();
        observer.complete();
      }
      Verdict::Joined(mut observer, output) => {
        tracing::debug!("fork_join all sources completed");
        if let Some(output) = output {
          observer.next(output);
        }
        observer.complete();
        subscription.unsubscribe();
      }
    }
  }

  fn is_finished(&self) -> bool {
    Observer::<Output, Err>::is_finished(&self.state.rc_deref().observer)
  }
}

// ==================== Subscription plumbing ====================

struct Join<Values, Output, O> {
  state: MutArc<JoinState<Values, Output, O>>,
  subscription: SharedSubscription,
}

impl<Values, Output, O> Join<Values, Output, O>
where
  Values: Default + Send + 'static,
  Output: 'static,
  O: Send + 'static,
{
  fn new(observer: O, len: usize, values: Values, finish: fn(Values) -> Option<Output>) -> Self {
    let state = JoinState {
      observer: Some(observer),
      values,
      emitted: smallvec![false; len],
      completed: smallvec![false; len],
      outstanding: len,
      finish,
    };
    Join { state: MutArc::own(state), subscription: SharedSubscription::default() }
  }

  /// Subscribe the source at `index`, unless the join is already over.
  fn subscribe_source<S>(
    &self, source: S, index: usize, store: fn(&mut Values, usize, S::Item),
    scheduler: &Option<SchedulerRef>,
  ) where
    S: Observable,
    S::Item: 'static,
    O: Observer<Output, S::Err>,
  {
    if self.subscription.is_closed() || self.state.rc_deref().observer.is_none() {
      tracing::trace!(source = index, "fork_join already terminated, source left unsubscribed");
      return;
    }
    let observer = ForkJoinObserver {
      index,
      state: self.state.clone(),
      store,
      subscription: self.subscription.clone(),
    };
    self.subscription.add(source.actual_subscribe(observer, scheduler.clone()));
  }

  fn into_subscription(self) -> SharedSubscription { self.subscription }
}

// ==================== Observable Implementations ====================

macro_rules! impl_fork_join_tuple {
  ($len:expr; $($S:ident $idx:tt),+) => {
    impl_fork_join_tuple!(@impl $len; ($(Option<$S::Item>,)+); $($S $idx),+);
  };
  (@impl $len:expr; $values:ty; $($S:ident $idx:tt),+) => {
    impl<Err, $($S),+> Observable for ForkJoin<($($S,)+)>
    where
      $($S: Observable<Err = Err>, $S::Item: Send + 'static,)+
    {
      type Item = ($($S::Item,)+);
      type Err = Err;
      type Unsub = SharedSubscription;

      fn actual_subscribe<O>(self, observer: O, scheduler: Option<SchedulerRef>) -> Self::Unsub
      where
        O: Observer<Self::Item, Err> + Send + 'static,
      {
        let finish: fn($values) -> Option<Self::Item> = |values| Some(($(values.$idx?,)+));
        let join = Join::new(observer, $len, <$values>::default(), finish);
        $(
          join.subscribe_source(
            self.sources.$idx,
            $idx,
            |values: &mut $values, _, v| values.$idx = Some(v),
            &scheduler,
          );
        )+
        join.into_subscription()
      }
    }
  };
}

impl_fork_join_tuple!(1; A 0);
impl_fork_join_tuple!(2; A 0, B 1);
impl_fork_join_tuple!(3; A 0, B 1, C 2);
impl_fork_join_tuple!(4; A 0, B 1, C 2, D 3);
impl_fork_join_tuple!(5; A 0, B 1, C 2, D 3, E 4);
impl_fork_join_tuple!(6; A 0, B 1, C 2, D 3, E 4, F 5);

impl<S> Observable for ForkJoin<Vec<S>>
where
  S: Observable,
  S::Item: Send + 'static,
{
  type Item = Vec<S::Item>;
  type Err = S::Err;
  type Unsub = SharedSubscription;

  fn actual_subscribe<O>(self, observer: O, scheduler: Option<SchedulerRef>) -> Self::Unsub
  where
    O: Observer<Self::Item, Self::Err> + Send + 'static,
  {
    let len = self.sources.len();
    if len == 0 {
      let subscription = SharedSubscription::default();
      subscription.add(empty::<Self::Item, Self::Err>().actual_subscribe(observer, scheduler));
      return subscription;
    }

    let values: Vec<Option<S::Item>> = (0..len).map(|_| None).collect();
    let finish: fn(Vec<Option<S::Item>>) -> Option<Vec<S::Item>> =
      |values| values.into_iter().collect();
    let join = Join::new(observer, len, values, finish);
    for (index, source) in self.sources.into_iter().enumerate() {
      join.subscribe_source(
        source,
        index,
        |values: &mut Vec<Option<S::Item>>, index, v| values[index] = Some(v),
        &scheduler,
      );
    }
    join.into_subscription()
  }
}

// ==================== Tests ====================
