//! Running sources on a `futures` thread pool through the `Scheduler` seam.
#![cfg(feature = "futures-scheduler")]

use std::{
  convert::Infallible,
  sync::{mpsc, Arc},
  thread,
  time::Duration,
};

use futures::executor::ThreadPool;
use rxrust_core::prelude::*;

fn pool() -> Option<SchedulerRef> {
  let pool: SchedulerRef = Arc::new(ThreadPool::new().unwrap());
  Some(pool)
}

#[test]
fn fork_join_on_thread_pool() {
  let (tx, rx) = mpsc::channel();
  let caller = thread::current().id();

  let observer = ObserverAll {
    next: {
      let tx = tx.clone();
      move |v: (i32, char)| tx.send(Ok((v, thread::current().id()))).unwrap()
    },
    error: |e: Infallible| match e {},
    complete: move || tx.send(Err(())).unwrap(),
  };
  fork_join((observable::from_iter(0..100).skip(90), observable::from_iter("rx".chars()).take(1)))
    .subscribe_with(observer, pool());

  let (value, emitted_on) = rx.recv_timeout(Duration::from_secs(5)).unwrap().unwrap();
  assert_eq!(value, (99, 'r'));
  assert_ne!(emitted_on, caller);
  assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(Err(())));
}

#[test]
fn create_runs_its_producer_on_the_pool() {
  let (tx, rx) = mpsc::channel();
  let caller = thread::current().id();

  observable::create(move |emitter: Emitter<(), Infallible>| {
    tx.send(thread::current().id()).unwrap();
    emitter.complete();
  })
  .subscribe_with(ObserverAll { next: |_| {}, error: |e: Infallible| match e {}, complete: || {} }, pool());

  assert_ne!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), caller);
}

#[test]
fn throw_is_delivered_from_the_pool() {
  let (tx, rx) = mpsc::channel();
  observable::throw::<i32, _>("late")
    .take(3)
    .skip(1)
    .subscribe_with(ObserverErr { next: |_| {}, error: move |e| tx.send(e).unwrap() }, pool());
  assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok("late"));
}
