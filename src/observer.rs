//! Observer trait and implementations
//!
//! The Observer trait defines the consumer of data in the reactive pattern.
//! It provides three methods: next (for values), error (for errors), and
//! complete (for stream completion).

use std::convert::Infallible;

use crate::subscription::{SingleSubscription, Subscription};

// ============================================================================
// Observer Trait
// ============================================================================

/// Observer trait: The consumer of data in reactive programming
///
/// An Observer receives values, errors, and completion notifications from
/// an Observable. `error` and `complete` consume the observer, so whoever owns
/// it can deliver at most one terminal notification. Producers that share an
/// observer keep it in an `Option` and `take()` it to terminate.
pub trait Observer<Item, Err> {
  /// Receive the next value from the observable
  fn next(&mut self, value: Item);

  /// Handle an error from the observable
  fn error(self, err: Err);

  /// Handle completion of the observable
  fn complete(self);

  /// Checks if the observer will accept no more values.
  ///
  /// Sources poll this to stop emitting early, e.g. when a downstream `take`
  /// has already completed.
  fn is_finished(&self) -> bool;
}

// ============================================================================
// DynObserver Trait - Object-safe Observer
// ============================================================================

/// Helper trait to enable object-safe Observers (Box<dyn Observer>)
///
/// Standard Observer trait is not object-safe because methods take `self` by
/// value. DynObserver mirrors the interface but adapts it for vtables.
pub trait DynObserver<Item, Err> {
  fn box_next(&mut self, value: Item);
  fn box_error(self: Box<Self>, err: Err);
  fn box_complete(self: Box<Self>);
  fn box_is_finished(&self) -> bool;
}

impl<T, Item, Err> DynObserver<Item, Err> for T
where
  T: Observer<Item, Err>,
{
  fn box_next(&mut self, value: Item) { self.next(value); }
  fn box_error(self: Box<Self>, err: Err) { self.error(err); }
  fn box_complete(self: Box<Self>) { self.complete(); }
  fn box_is_finished(&self) -> bool { self.is_finished() }
}

/// Boxed observer that may cross threads.
pub type BoxObserver<Item, Err> = Box<dyn DynObserver<Item, Err> + Send>;

impl<Item, Err> Observer<Item, Err> for BoxObserver<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { (**self).box_next(value) }

  #[inline]
  fn error(self, err: Err) { self.box_error(err) }

  #[inline]
  fn complete(self) { self.box_complete() }

  #[inline]
  fn is_finished(&self) -> bool { (**self).box_is_finished() }
}

// ============================================================================
// Closure adapters
// ============================================================================

/// Observer built from a `next` closure; the stream can't fail.
#[derive(Clone)]
pub struct FnMutObserver<F>(pub F);

impl<F, Item> Observer<Item, Infallible> for FnMutObserver<F>
where
  F: FnMut(Item),
{
  #[inline]
  fn next(&mut self, v: Item) { (self.0)(v); }

  #[inline]
  fn error(self, err: Infallible) { match err {} }

  #[inline]
  fn complete(self) {}

  #[inline]
  fn is_finished(&self) -> bool { false }
}

/// Observer built from `next` and `error` closures.
#[derive(Clone)]
pub struct ObserverErr<N, E> {
  pub next: N,
  pub error: E,
}

impl<Item, Err, N, E> Observer<Item, Err> for ObserverErr<N, E>
where
  N: FnMut(Item),
  E: FnOnce(Err),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value); }

  #[inline]
  fn error(self, err: Err) { (self.error)(err); }

  #[inline]
  fn complete(self) {}

  #[inline]
  fn is_finished(&self) -> bool { false }
}

/// Observer built from `next`, `error` and `complete` closures.
#[derive(Clone)]
pub struct ObserverAll<N, E, C> {
  pub next: N,
  pub error: E,
  pub complete: C,
}

impl<Item, Err, N, E, C> Observer<Item, Err> for ObserverAll<N, E, C>
where
  N: FnMut(Item),
  E: FnOnce(Err),
  C: FnOnce(),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value); }

  #[inline]
  fn error(self, err: Err) { (self.error)(err); }

  #[inline]
  fn complete(self) { (self.complete)(); }

  #[inline]
  fn is_finished(&self) -> bool { false }
}

// ============================================================================
// Option observer
// ============================================================================

/// Option observer - None ignores all events, Some delegates to inner
impl<O, Item, Err> Observer<Item, Err> for Option<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if let Some(inner) = self {
      inner.next(value);
    }
  }

  fn error(self, err: Err) {
    if let Some(inner) = self {
      inner.error(err);
    }
  }

  fn complete(self) {
    if let Some(inner) = self {
      inner.complete();
    }
  }

  fn is_finished(&self) -> bool { self.as_ref().is_none_or(Observer::is_finished) }
}

// ============================================================================
// Subscriber
// ============================================================================

/// The outermost observer of every public `subscribe` call.
///
/// It shares a closed flag with the subscription handed back to the caller.
/// Once that subscription is unsubscribed, nothing reaches the wrapped
/// observer anymore, whatever the upstream producer keeps doing.
pub struct Subscriber<O> {
  observer: O,
  stopped: SingleSubscription,
}

impl<O> Subscriber<O> {
  pub fn new(observer: O, stopped: SingleSubscription) -> Self { Subscriber { observer, stopped } }
}

impl<Item, Err, O> Observer<Item, Err> for Subscriber<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if self.stopped.is_closed() {
      tracing::trace!("value dropped, subscriber already unsubscribed");
    } else {
      self.observer.next(value);
    }
  }

  fn error(self, err: Err) {
    if self.stopped.close() {
      self.observer.error(err);
    }
  }

  fn complete(self) {
    if self.stopped.close() {
      self.observer.complete();
    }
  }

  fn is_finished(&self) -> bool { self.stopped.is_closed() || self.observer.is_finished() }
}
