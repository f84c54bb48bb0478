use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub trait RcDeref {
  type Target<'a>
  where
    Self: 'a;
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref<'a>(&'a self) -> Self::Target<'a>;
}

pub trait RcDerefMut {
  type Target<'a>
  where
    Self: 'a;
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref_mut<'a>(&'a self) -> Self::Target<'a>;
}

/// Thread-safe shared mutable cell used for per-subscription state.
///
/// A poisoned lock is recovered rather than propagated: a panic inside one
/// observer must not turn every later `unsubscribe` into a panic as well.
#[derive(Default)]
pub struct MutArc<T>(Arc<Mutex<T>>);

impl<T> MutArc<T> {
  pub fn own(t: T) -> Self { Self(Arc::new(Mutex::new(t))) }

  fn lock(&self) -> MutexGuard<'_, T> { self.0.lock().unwrap_or_else(PoisonError::into_inner) }
}

impl<T> RcDeref for MutArc<T> {
  type Target<'a>
    = MutexGuard<'a, T>
  where
    Self: 'a;

  #[inline]
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref<'a>(&'a self) -> Self::Target<'a> { self.lock() }
}

impl<T> RcDerefMut for MutArc<T> {
  type Target<'a>
    = MutexGuard<'a, T>
  where
    Self: 'a;

  #[inline]
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref_mut<'a>(&'a self) -> Self::Target<'a> { self.lock() }
}

impl<T> Clone for MutArc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

#[cfg(test)]
mod tests {
  use std::thread;

  use super::*;

  #[test]
  fn clones_share_state() {
    let a = MutArc::own(1);
    let b = a.clone();
    *b.rc_deref_mut() += 1;
    assert_eq!(*a.rc_deref(), 2);
  }

  #[test]
  fn survives_poisoned_lock() {
    let a = MutArc::own(vec![1]);
    let b = a.clone();
    let _ = thread::spawn(move || {
      let _guard = b.rc_deref_mut();
      panic!("poison the lock");
    })
    .join();

    a.rc_deref_mut().push(2);
    assert_eq!(*a.rc_deref(), vec![1, 2]);
  }
}
