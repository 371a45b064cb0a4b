use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::cmp::Reverse;
use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// A deferred entry; ordered by release time so the heap yields the
/// earliest deadline first (via `Reverse`).
#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct Deferred {
    at: Instant,
    item: String,
}

#[derive(Default)]
struct Inner {
    /// Items ready for a worker, FIFO.
    ready: VecDeque<String>,
    /// Membership index over `ready`.
    ready_set: HashSet<String>,
    /// Deferred entries; superseded ones are skipped on pop via `deadlines`.
    deferred: BinaryHeap<Reverse<Deferred>>,
    /// Authoritative release time per delayed item.
    deadlines: HashMap<String, Instant>,
    shutting_down: bool,
}

/// FIFO work queue with deferred insertion.
///
/// An item is in the queue at most once, whether waiting or delayed; `add`
/// and `add_after` are idempotent and the earliest release time wins.
/// Consumers block in `get` and deliver due deferred items themselves by
/// waiting with a deadline, so no timer thread is needed.
pub struct DelayingQueue {
    inner: Mutex<Inner>,
    wakeup: Condvar,
}

impl DelayingQueue {
    pub fn new() -> DelayingQueue {
        DelayingQueue {
            inner: Mutex::new(Inner::default()),
            wakeup: Condvar::new(),
        }
    }

    /// Enqueue immediately. A pending delay for the item is superseded.
    /// No-op while shutting down or when the item is already waiting.
    pub fn add(&self, item: &str) {
        let mut inner = self.inner.lock().unwrap();
        if inner.shutting_down || inner.ready_set.contains(item) {
            return;
        }
        inner.deadlines.remove(item); // a stale heap entry is skipped on pop
        inner.ready_set.insert(item.to_string());
        inner.ready.push_back(item.to_string());
        self.wakeup.notify_one();
    }

    /// Enqueue only when the item is neither waiting nor delayed.
    ///
    /// Unlike `add`, a pending delay is left untouched. This is the
    /// re-injection path: a tenant that fell out of the queue entirely
    /// comes back, one still serving its scrape delay keeps it. Returns
    /// whether the item was enqueued.
    pub fn add_if_absent(&self, item: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.shutting_down
            || inner.ready_set.contains(item)
            || inner.deadlines.contains_key(item)
        {
            return false;
        }
        inner.ready_set.insert(item.to_string());
        inner.ready.push_back(item.to_string());
        self.wakeup.notify_one();
        true
    }

    /// Enqueue once `delay` has elapsed. If the item is already waiting or
    /// delayed, the earliest release time wins.
    pub fn add_after(&self, item: &str, delay: Duration) {
        if delay == Duration::from_secs(0) {
            return self.add(item);
        }
        let mut inner = self.inner.lock().unwrap();
        if inner.shutting_down || inner.ready_set.contains(item) {
            return;
        }
        let at = Instant::now() + delay;
        if let Some(&existing) = inner.deadlines.get(item) {
            if existing <= at {
                return;
            }
        }
        inner.deadlines.insert(item.to_string(), at);
        inner.deferred.push(Reverse(Deferred { at, item: item.to_string() }));
        // waiters recompute their deadline
        self.wakeup.notify_all();
    }

    /// Block until an item is ready, or until the queue is shut down and
    /// the ready backlog is drained; `None` tells the worker to exit.
    pub fn get(&self) -> Option<String> {
        let mut inner = self.inner.lock().unwrap();
        loop {
            let now = Instant::now();
            Self::release_due(&mut inner, now);

            if let Some(item) = inner.ready.pop_front() {
                inner.ready_set.remove(&item);
                return Some(item);
            }
            if inner.shutting_down {
                return None;
            }

            let next_deadline = inner
                .deferred
                .peek()
                .map(|Reverse(deferred)| deferred.at.saturating_duration_since(now));
            inner = match next_deadline {
                Some(timeout) => self.wakeup.wait_timeout(inner, timeout).unwrap().0,
                None => self.wakeup.wait(inner).unwrap(),
            };
        }
    }

    /// Move every due deferred entry into the ready FIFO.
    fn release_due(inner: &mut Inner, now: Instant) {
        loop {
            match inner.deferred.peek() {
                Some(Reverse(head)) if head.at <= now => {}
                _ => break,
            }
            let Reverse(entry) = inner.deferred.pop().unwrap();
            // only the entry matching the authoritative deadline is live
            if inner.deadlines.get(&entry.item) != Some(&entry.at) {
                continue;
            }
            inner.deadlines.remove(&entry.item);
            if !inner.ready_set.contains(&entry.item) {
                inner.ready_set.insert(entry.item.clone());
                inner.ready.push_back(entry.item);
            }
        }
    }

    /// Wake every consumer; `get` drains the ready backlog then reports
    /// shutdown. Deferred items that have not come due are dropped.
    pub fn shut_down(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.shutting_down = true;
        self.wakeup.notify_all();
    }

    /// Number of items currently ready (delayed ones excluded).
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().ready.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DelayingQueue {
    fn default() -> DelayingQueue {
        DelayingQueue::new()
    }
}
