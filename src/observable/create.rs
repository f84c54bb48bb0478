use std::{collections::VecDeque, marker::PhantomData};

use crate::{
  observable::Observable,
  observer::{BoxObserver, Observer},
  rc::{MutArc, RcDeref, RcDerefMut},
  scheduler::SchedulerRef,
  subscription::{SharedSubscription, SingleSubscription, Subscription},
};

/// Creates an observable from a producer function.
///
/// `f` is called once per subscription with an [`Emitter`] and returns the
/// teardown to run when that subscription is unsubscribed. The emitter is
/// owned and `Send`, so the producer may move it (or clones of it) to other
/// threads and keep emitting after `f` has returned.
///
/// # Examples
///
/// ```
/// use std::convert::Infallible;
/// use rxrust_core::prelude::*;
///
/// observable::create(|mut emitter: Emitter<i32, Infallible>| {
///   emitter.next(1);
///   emitter.next(2);
///   emitter.complete();
/// })
/// .subscribe(|v| println!("{}", v));
/// ```
pub fn create<F, Item, Err, U>(f: F) -> Create<F, Item, Err>
where
  F: FnOnce(Emitter<Item, Err>) -> U,
  U: Subscription,
{
  Create { f, _marker: PhantomData }
}

/// Observable created from a function.
pub struct Create<F, Item, Err> {
  f: F,
  _marker: PhantomData<fn() -> (Item, Err)>,
}

impl<F: Clone, Item, Err> Clone for Create<F, Item, Err> {
  fn clone(&self) -> Self { Create { f: self.f.clone(), _marker: PhantomData } }
}

/// The producer side of a [`create`]d observable.
///
/// Notifications from every clone are serialized. The first `error` or
/// `complete` wins; anything after it, or after the subscription has been
/// unsubscribed, is dropped.
///
/// No lock is held while the downstream observer runs. A notification sent
/// while another one is being delivered, from another thread or from inside
/// a downstream callback, is queued and delivered by the thread already
/// emitting, right after the current one.
pub struct Emitter<Item, Err> {
  state: MutArc<EmitterState<Item, Err>>,
  closed: SingleSubscription,
}

struct EmitterState<Item, Err> {
  /// `None` while a thread is delivering, and for good once released.
  observer: Option<BoxObserver<Item, Err>>,
  emitting: bool,
  terminated: bool,
  pending: VecDeque<Notification<Item, Err>>,
}

enum Notification<Item, Err> {
  Next(Item),
  Error(Err),
  Complete,
}

impl<Item, Err> Clone for Emitter<Item, Err> {
  fn clone(&self) -> Self { Emitter { state: self.state.clone(), closed: self.closed.clone() } }
}

impl<Item, Err> Emitter<Item, Err> {
  fn new(observer: BoxObserver<Item, Err>, closed: SingleSubscription) -> Self {
    let state = EmitterState {
      observer: Some(observer),
      emitting: false,
      terminated: false,
      pending: VecDeque::new(),
    };
    Emitter { state: MutArc::own(state), closed }
  }

  pub fn next(&mut self, value: Item) { self.push(Notification::Next(value)) }

  pub fn error(self, err: Err) { self.push(Notification::Error(err)) }

  pub fn complete(self) { self.push(Notification::Complete) }

  /// `true` once the stream terminated, was unsubscribed, or the downstream
  /// will accept no more values. Long-running producers should poll this.
  pub fn is_closed(&self) -> bool {
    if self.closed.is_closed() {
      return true;
    }
    let state = self.state.rc_deref();
    state.terminated || state.observer.as_ref().is_some_and(|o| o.is_finished())
  }

  fn push(&self, notification: Notification<Item, Err>) {
    if self.closed.is_closed() {
      self.release();
      return;
    }
    let mut observer = {
      let mut state = self.state.rc_deref_mut();
      if state.terminated {
        return;
      }
      if !matches!(notification, Notification::Next(_)) {
        state.terminated = true;
      }
      if state.emitting {
        state.pending.push_back(notification);
        return;
      }
      match state.observer.take() {
        Some(observer) => {
          state.emitting = true;
          observer
        }
        None => return,
      }
    };

    let mut notification = notification;
    loop {
      if self.closed.is_closed() {
        tracing::trace!("emitter unsubscribed while delivering, dropping queued notifications");
        self.state.rc_deref_mut().pending.clear();
        return;
      }
      match notification {
        Notification::Next(value) => observer.next(value),
        Notification::Error(err) => {
          if self.closed.close() {
            observer.error(err);
          }
          return;
        }
        Notification::Complete => {
          if self.closed.close() {
            observer.complete();
          }
          return;
        }
      }
      let mut state = self.state.rc_deref_mut();
      match state.pending.pop_front() {
        Some(queued) => notification = queued,
        None => {
          state.observer = Some(observer);
          state.emitting = false;
          return;
        }
      }
    }
  }

  /// Drops the downstream chain once unsubscribed, outside the lock.
  fn release(&self) {
    let released = {
      let mut state = self.state.rc_deref_mut();
      state.pending.clear();
      state.observer.take()
    };
    drop(released);
  }
}

impl<F, Item, Err, U> Observable for Create<F, Item, Err>
where
  F: FnOnce(Emitter<Item, Err>) -> U + Send + 'static,
  U: Subscription + Send + 'static,
  Item: Send + 'static,
  Err: Send + 'static,
{
  type Item = Item;
  type Err = Err;
  type Unsub = SharedSubscription;

  fn actual_subscribe<O>(self, observer: O, scheduler: Option<SchedulerRef>) -> Self::Unsub
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    let closed = SingleSubscription::default();
    let observer: BoxObserver<Item, Err> = Box::new(observer);
    let emitter = Emitter::new(observer, closed.clone());

    let subscription = SharedSubscription::default();
    subscription.add(closed);
    let teardown = subscription.clone();
    let f = self.f;
    let task = move || teardown.add(f(emitter));
    match scheduler {
      Some(scheduler) => subscription.add(scheduler.schedule(Box::new(task))),
      None => task(),
    }
    subscription
  }
}
