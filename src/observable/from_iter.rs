use std::{iter, marker::PhantomData};

use crate::{
  observable::Observable,
  observer::Observer,
  scheduler::SchedulerRef,
  subscription::{SharedSubscription, SingleSubscription, Subscription},
};

/// Creates an observable that produces values from an iterator.
///
/// Completes when all elements have been emitted. Never emits an error; `Err`
/// only names the error type of the chain it takes part in.
///
/// # Examples
///
/// ```
/// use rxrust_core::prelude::*;
///
/// observable::from_iter(vec![0, 1, 2, 3]).subscribe(|v| println!("{},", v));
/// ```
pub fn from_iter<Iter, Err>(iter: Iter) -> FromIter<Iter, Err>
where
  Iter: IntoIterator,
{
  FromIter { iter, _hint: PhantomData }
}

/// Creates an observable producing a single value.
///
/// Completes immediately after emitting the value given.
pub fn of<Item, Err>(v: Item) -> FromIter<iter::Once<Item>, Err> { from_iter(iter::once(v)) }

pub struct FromIter<Iter, Err> {
  iter: Iter,
  _hint: PhantomData<fn() -> Err>,
}

impl<Iter: Clone, Err> Clone for FromIter<Iter, Err> {
  fn clone(&self) -> Self { FromIter { iter: self.iter.clone(), _hint: PhantomData } }
}

impl<Iter, Err> Observable for FromIter<Iter, Err>
where
  Iter: IntoIterator + Send + 'static,
{
  type Item = Iter::Item;
  type Err = Err;
  type Unsub = SharedSubscription;

  fn actual_subscribe<O>(self, mut observer: O, scheduler: Option<SchedulerRef>) -> Self::Unsub
  where
    O: Observer<Self::Item, Err> + Send + 'static,
  {
    let subscription = SharedSubscription::default();
    let stopped = SingleSubscription::default();
    subscription.add(stopped.clone());

    let iter = self.iter;
    let task = move || {
      for v in iter {
        if stopped.is_closed() || observer.is_finished() {
          return;
        }
        observer.next(v);
      }
      if !stopped.is_closed() {
        observer.complete();
      }
    };
    match scheduler {
      Some(scheduler) => subscription.add(scheduler.schedule(Box::new(task))),
      None => task(),
    }
    subscription
  }
}

#[cfg(test)]
mod tests {
  use std::{
    convert::Infallible,
    sync::{Arc, Mutex},
  };

  use super::*;
  use crate::observable::ObservableExt;

  #[test]
  fn emits_all_then_completes() {
    let values = Arc::new(Mutex::new(vec![]));
    let completed = Arc::new(Mutex::new(false));
    let (c_values, c_completed) = (values.clone(), completed.clone());

    from_iter::<_, ()>(0..5).subscribe_all(
      move |v| c_values.lock().unwrap().push(v),
      |_| {},
      move || *c_completed.lock().unwrap() = true,
    );

    assert_eq!(*values.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    assert!(*completed.lock().unwrap());
  }

  #[test]
  fn of_emits_one_value() {
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    of("x").subscribe(move |v| c_values.lock().unwrap().push(v));
    assert_eq!(*values.lock().unwrap(), vec!["x"]);
  }

  #[test]
  fn stops_when_downstream_is_finished() {
    struct StopAfterTwo(Arc<Mutex<Vec<i32>>>);

    impl Observer<i32, Infallible> for StopAfterTwo {
      fn next(&mut self, value: i32) { self.0.lock().unwrap().push(value); }
      fn error(self, _: Infallible) {}
      fn complete(self) { panic!("must not complete a finished observer"); }
      fn is_finished(&self) -> bool { self.0.lock().unwrap().len() >= 2 }
    }

    let values = Arc::new(Mutex::new(vec![]));
    from_iter::<_, Infallible>(0..).actual_subscribe(StopAfterTwo(values.clone()), None);
    assert_eq!(*values.lock().unwrap(), vec![0, 1]);
  }
}
