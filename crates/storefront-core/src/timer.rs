//! Host-driven timers.
//!
//! Nothing here reads a clock. Hosts pass `now` (time since page load) into
//! every call and poll for due work, so tests advance time by hand.
use std::collections::BTreeMap;
use std::time::Duration;

/// A single cancellable deadline carrying a payload.
///
/// Scheduling while pending replaces the previous deadline and payload.
#[derive(Debug, Clone)]
pub struct Deadline<T> {
    slot: Option<(Duration, T)>,
}

impl<T> Default for Deadline<T> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<T> Deadline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the deadline at `now + delay` (saturating), returning the payload it replaced.
    pub fn schedule(&mut self, now: Duration, delay: Duration, payload: T) -> Option<T> {
        self.slot.replace((now.saturating_add(delay), payload)).map(|(_, p)| p)
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.slot.take().map(|(_, p)| p)
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    pub fn due_at(&self) -> Option<Duration> {
        self.slot.as_ref().map(|(at, _)| *at)
    }

    /// Take the payload if the deadline has passed. Fires at most once.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        if self.due_at().is_some_and(|at| at <= now) {
            self.cancel()
        } else {
            None
        }
    }
}

/// Trailing-edge debounce: every push restarts the delay and only the latest
/// value is ever released.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Deadline<T>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: Deadline::new() }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a new value; any value still waiting is dropped.
    pub fn push(&mut self, now: Duration, value: T) {
        self.pending.schedule(now, self.delay, value);
    }

    pub fn poll(&mut self, now: Duration) -> Option<T> {
        self.pending.poll(now)
    }

    /// Release the waiting value immediately, regardless of the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.cancel()
    }

    pub fn cancel(&mut self) {
        self.pending.cancel();
    }

    pub fn due_at(&self) -> Option<Duration> {
        self.pending.due_at()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }
}

/// Independent deadlines keyed by `K`, one per key.
///
/// Re-scheduling a key replaces its deadline; other keys are untouched.
#[derive(Debug, Clone)]
pub struct TimerSet<K: Ord, T> {
    entries: BTreeMap<K, (Duration, T)>,
}

impl<K: Ord, T> Default for TimerSet<K, T> {
    fn default() -> Self {
        Self { entries: BTreeMap::new() }
    }
}

impl<K: Ord + Clone, T> TimerSet<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, key: K, now: Duration, delay: Duration, payload: T) -> Option<T> {
        self.entries.insert(key, (now.saturating_add(delay), payload)).map(|(_, p)| p)
    }

    pub fn cancel(&mut self, key: &K) -> Option<T> {
        self.entries.remove(key).map(|(_, p)| p)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return every entry whose deadline is at or before `now`,
    /// ordered by deadline then key.
    pub fn poll_due(&mut self, now: Duration) -> Vec<(K, T)> {
        let mut due: Vec<(Duration, K)> = self
            .entries
            .iter()
            .filter(|(_, (at, _))| *at <= now)
            .map(|(k, (at, _))| (*at, k.clone()))
            .collect();
        due.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        due.into_iter()
            .filter_map(|(_, k)| self.entries.remove(&k).map(|(_, p)| (k, p)))
            .collect()
    }

    /// Remove every entry regardless of deadline.
    pub fn drain(&mut self) -> Vec<(K, T)> {
        std::mem::take(&mut self.entries).into_iter().map(|(k, (_, p))| (k, p)).collect()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.entries.values().map(|(at, _)| *at).min()
    }
}

/// Earliest of several optional deadlines.
pub fn earliest<I>(deadlines: I) -> Option<Duration>
where
    I: IntoIterator<Item = Option<Duration>>,
{
    deadlines.into_iter().flatten().min()
}
