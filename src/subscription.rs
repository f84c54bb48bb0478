use std::{
  fmt::{Debug, Formatter},
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
  },
};

use smallvec::SmallVec;

use crate::rc::{MutArc, RcDeref, RcDerefMut};

/// Subscription returns from `Observable.subscribe(Subscriber)` to allow
///  unsubscribing.
///
/// `unsubscribe` is idempotent: calling it twice, or after the stream has
/// already terminated on its own, is a no-op.
pub trait Subscription {
  /// This allows deregistering an stream before it has finished receiving all
  /// events (i.e. before onCompleted is called).
  fn unsubscribe(&mut self);

  fn is_closed(&self) -> bool;
}

/// The no-op subscription for sources that hold nothing worth releasing.
impl Subscription for () {
  #[inline]
  fn unsubscribe(&mut self) {}

  #[inline]
  fn is_closed(&self) -> bool { true }
}

impl<T: ?Sized> Subscription for Box<T>
where
  T: Subscription,
{
  #[inline]
  fn unsubscribe(&mut self) {
    let s = &mut **self;
    s.unsubscribe()
  }

  #[inline]
  fn is_closed(&self) -> bool {
    let s = &**self;
    s.is_closed()
  }
}

impl<T: Subscription> Subscription for Option<T> {
  fn unsubscribe(&mut self) {
    if let Some(inner) = self {
      inner.unsubscribe();
    }
  }

  fn is_closed(&self) -> bool { self.as_ref().is_none_or(Subscription::is_closed) }
}

/// Type-erased subscription.
pub type BoxSubscription = Box<dyn Subscription + Send>;

impl Debug for dyn Subscription + Send {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("dyn Subscription")
      .field("is_closed", &self.is_closed())
      .finish()
  }
}

// ============================================================================
// SingleSubscription
// ============================================================================

/// A shared closed flag. Every clone observes the same state, so a producer
/// can keep one clone to poll while the subscriber holds another to close it.
#[derive(Clone, Debug, Default)]
pub struct SingleSubscription(Arc<AtomicBool>);

impl SingleSubscription {
  /// Closes the flag, returning `true` only for the call that closed it.
  #[inline]
  pub fn close(&self) -> bool { !self.0.swap(true, Ordering::AcqRel) }
}

impl Subscription for SingleSubscription {
  #[inline]
  fn unsubscribe(&mut self) { self.0.store(true, Ordering::Release); }

  #[inline]
  fn is_closed(&self) -> bool { self.0.load(Ordering::Acquire) }
}

// ============================================================================
// ClosureSubscription
// ============================================================================

/// Runs a teardown closure the first time it is unsubscribed.
pub struct ClosureSubscription<F>(Option<F>);

impl<F: FnOnce()> ClosureSubscription<F> {
  pub fn new(f: F) -> Self { ClosureSubscription(Some(f)) }
}

impl<F: FnOnce()> Subscription for ClosureSubscription<F> {
  fn unsubscribe(&mut self) {
    if let Some(f) = self.0.take() {
      f();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.0.is_none() }
}

// ============================================================================
// SharedSubscription
// ============================================================================

/// A thread-safe composite subscription. Unsubscribing it unsubscribes every
/// teardown added to it; adding to an already closed one unsubscribes the new
/// teardown immediately.
///
/// The latter is what lets an operator hand out its upstream handle before the
/// upstream `actual_subscribe` has returned: a synchronous source may finish
/// (or be cut short) while still inside the call, and the subscription it
/// returns afterwards is then released on arrival.
#[derive(Clone, Default)]
pub struct SharedSubscription(MutArc<Inner>);

struct Inner {
  closed: bool,
  teardown: SmallVec<[BoxSubscription; 1]>,
}

impl Default for Inner {
  fn default() -> Self { Inner { closed: false, teardown: SmallVec::new() } }
}

impl SharedSubscription {
  pub fn add<S: Subscription + Send + 'static>(&self, subscription: S) {
    let mut subscription: BoxSubscription = Box::new(subscription);
    {
      let mut inner = self.0.rc_deref_mut();
      if !inner.closed {
        inner.teardown.retain(|v| !v.is_closed());
        inner.teardown.push(subscription);
        return;
      }
    }
    tracing::trace!("subscription added after close, releasing it immediately");
    subscription.unsubscribe();
  }

  /// Number of live teardowns currently held.
  pub fn teardown_size(&self) -> usize { self.0.rc_deref().teardown.len() }
}

impl Subscription for SharedSubscription {
  fn unsubscribe(&mut self) {
    // Teardowns run outside the lock: they may re-enter this subscription.
    let teardown = {
      let mut inner = self.0.rc_deref_mut();
      if inner.closed {
        return;
      }
      inner.closed = true;
      std::mem::take(&mut inner.teardown)
    };
    for mut v in teardown {
      v.unsubscribe();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.0.rc_deref().closed }
}

impl Debug for SharedSubscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let inner = self.0.rc_deref();
    f.debug_struct("SharedSubscription")
      .field("closed", &inner.closed)
      .field("teardown_count", &inner.teardown.len())
      .finish()
  }
}

// ============================================================================
// Wrapper & Guard
// ============================================================================

/// Wrapper around a subscription which provides the
/// `unsubscribe_when_dropped()` method.
#[derive(Debug)]
pub struct SubscriptionWrapper<T: Subscription>(pub(crate) T);

impl<T: Subscription> SubscriptionWrapper<T> {
  /// Activates "RAII" behavior for this subscription. That means
  /// `unsubscribe()` will be called automatically as soon as the returned
  /// value goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// `unsubscribe()` is called immediately, which is probably not what you
  /// want!
  pub fn unsubscribe_when_dropped(self) -> SubscriptionGuard<T> { SubscriptionGuard(self.0) }

  /// Consumes this wrapper and returns the underlying subscription.
  pub fn into_inner(self) -> T { self.0 }
}

impl<T: Subscription> Subscription for SubscriptionWrapper<T> {
  #[inline]
  fn unsubscribe(&mut self) { self.0.unsubscribe() }

  #[inline]
  fn is_closed(&self) -> bool { self.0.is_closed() }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be unsubscribed.
///
/// If you want to drop it immediately, wrap it in its own scope
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard<T: Subscription>(pub(crate) T);

impl<T: Subscription> SubscriptionGuard<T> {
  /// Wraps an existing subscription with a guard to enable RAII behavior for
  /// it.
  pub fn new(subscription: T) -> SubscriptionGuard<T> { SubscriptionGuard(subscription) }
}

impl<T: Subscription> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) { self.0.unsubscribe() }
}
