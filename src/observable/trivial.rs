use std::marker::PhantomData;

use crate::{
  observable::Observable,
  observer::Observer,
  scheduler::SchedulerRef,
  subscription::BoxSubscription,
};

/// Runs `task` on `scheduler`, or right away when there is none.
fn run_on(scheduler: Option<SchedulerRef>, task: impl FnOnce() + Send + 'static) -> Option<BoxSubscription> {
  match scheduler {
    Some(scheduler) => Some(scheduler.schedule(Box::new(task))),
    None => {
      task();
      None
    }
  }
}

/// Creates an observable that produces no values.
///
/// Completes immediately. Never emits an error. The value is zero-sized and
/// stateless, so building one costs nothing and every copy is equivalent.
///
/// # Examples
/// ```
/// use rxrust_core::prelude::*;
///
/// observable::empty().subscribe(|v: i32| println!("{},", v));
///
/// // Result: no thing printed
/// ```
pub fn empty<Item, Err>() -> Empty<Item, Err> { Empty(PhantomData) }

pub struct Empty<Item, Err>(PhantomData<fn() -> (Item, Err)>);

impl<Item, Err> Clone for Empty<Item, Err> {
  fn clone(&self) -> Self { *self }
}

impl<Item, Err> Copy for Empty<Item, Err> {}

impl<Item, Err> Default for Empty<Item, Err> {
  fn default() -> Self { empty() }
}

impl<Item, Err> Observable for Empty<Item, Err> {
  type Item = Item;
  type Err = Err;
  type Unsub = Option<BoxSubscription>;

  fn actual_subscribe<O>(self, observer: O, scheduler: Option<SchedulerRef>) -> Self::Unsub
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    run_on(scheduler, move || observer.complete())
  }
}

/// Creates an observable that never emits anything.
///
/// Neither emits a value, nor completes, nor emits an error.
pub fn never<Item, Err>() -> Never<Item, Err> { Never(PhantomData) }

pub struct Never<Item, Err>(PhantomData<fn() -> (Item, Err)>);

impl<Item, Err> Clone for Never<Item, Err> {
  fn clone(&self) -> Self { *self }
}

impl<Item, Err> Copy for Never<Item, Err> {}

impl<Item, Err> Observable for Never<Item, Err> {
  type Item = Item;
  type Err = Err;
  type Unsub = ();

  fn actual_subscribe<O>(self, _: O, _: Option<SchedulerRef>) -> Self::Unsub
  where
    O: Observer<Item, Err> + Send + 'static,
  {
  }
}

/// Creates an observable that emits no items, just terminates with an error.
///
/// # Arguments
///
/// * `e` - An error to emit and terminate with
pub fn throw<Item, Err>(e: Err) -> Throw<Item, Err> { Throw(e, PhantomData) }

pub struct Throw<Item, Err>(Err, PhantomData<fn() -> Item>);

impl<Item, Err: Clone> Clone for Throw<Item, Err> {
  fn clone(&self) -> Self { Throw(self.0.clone(), PhantomData) }
}

impl<Item, Err> Observable for Throw<Item, Err>
where
  Err: Send + 'static,
{
  type Item = Item;
  type Err = Err;
  type Unsub = Option<BoxSubscription>;

  fn actual_subscribe<O>(self, observer: O, scheduler: Option<SchedulerRef>) -> Self::Unsub
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    let err = self.0;
    run_on(scheduler, move || observer.error(err))
  }
}
