//! The scheduler seam.
//!
//! Nothing in this crate runs its own event loop or thread pool. Operators
//! only carry an optional [`SchedulerRef`] through to the sources, and sources
//! hand their emission work to it. `None` means the work runs right away in
//! the caller's context.

use std::sync::Arc;

use crate::subscription::BoxSubscription;

/// A unit of work handed to a scheduler.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// A Scheduler is an object to order task and schedule their execution.
pub trait Scheduler: Send + Sync {
  /// Queue `task` for execution. Unsubscribing the returned subscription
  /// before the task starts must prevent it from running.
  fn schedule(&self, task: Task) -> BoxSubscription;
}

/// Shared handle to a scheduler, cheap to clone into every source.
pub type SchedulerRef = Arc<dyn Scheduler>;

#[cfg(feature = "futures-scheduler")]
mod futures_scheduler {
  use futures::executor::ThreadPool;

  use super::{Scheduler, Task};
  use crate::subscription::{BoxSubscription, SingleSubscription, Subscription};

  impl Scheduler for ThreadPool {
    fn schedule(&self, task: Task) -> BoxSubscription {
      let handle = SingleSubscription::default();
      let cancelled = handle.clone();
      self.spawn_ok(async move {
        if cancelled.is_closed() {
          tracing::trace!("scheduled task cancelled before it started");
        } else {
          task();
        }
      });
      Box::new(handle)
    }
  }
}
