#![forbid(unsafe_code)]

//! Deferred one-shot tasks with generation guards.
//!
//! Panels defer work (content measurement after layout, latch release after
//! a click grace period, geometry reset after the exit transition). Each task
//! is stamped with the owner's [`Generation`] at scheduling time. When the
//! owner re-opens or closes it bumps its generation, and any task still in
//! flight is discarded when it comes due instead of mutating fresh state.
//!
//! # Invariants
//!
//! - `drain_due` yields tasks in due-time order; equal due times keep
//!   scheduling order.
//! - A task is yielded at most once.

use web_time::{Duration, Instant};

/// Liveness stamp for deferred work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Generation(u64);

impl Generation {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The next generation.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Scheduled<T> {
    due: Instant,
    seq: u64,
    generation: Generation,
    task: T,
}

/// A due task popped from the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueTask<T> {
    pub generation: Generation,
    pub task: T,
}

/// Single-threaded timer queue.
#[derive(Debug, Clone)]
pub struct DeferredQueue<T> {
    tasks: Vec<Scheduled<T>>,
    next_seq: u64,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DeferredQueue<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_seq: 0,
        }
    }

    /// Schedule `task` to come due `delay` after `now`. A zero delay means
    /// "next tick", never "now".
    pub fn schedule(&mut self, now: Instant, delay: Duration, generation: Generation, task: T) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.tasks.push(Scheduled {
            due: now + delay,
            seq,
            generation,
            task,
        });
    }

    /// Remove and return every task whose due time is `<= now`.
    pub fn drain_due(&mut self, now: Instant) -> Vec<DueTask<T>> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            if self.tasks[i].due <= now {
                due.push(self.tasks.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.due.cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter()
            .map(|s| DueTask {
                generation: s.generation,
                task: s.task,
            })
            .collect()
    }

    /// Earliest due time, if any task is pending.
    pub fn next_due(&self) -> Option<Instant> {
        self.tasks.iter().map(|s| s.due).min()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
