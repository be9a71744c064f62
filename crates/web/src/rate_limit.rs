use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Idle clients are swept once the table grows past this many keys.
const SWEEP_THRESHOLD: usize = 1_024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: usize },
    Limited { retry_after: Duration },
}

/// Sliding-window limiter keyed by client address.
#[derive(Debug, Clone)]
pub struct SubmissionLimiter {
    inner: Arc<Mutex<HashMap<String, VecDeque<Instant>>>>,
    window: Duration,
    max_submissions: usize,
}

impl SubmissionLimiter {
    pub fn new(window: Duration, max_submissions: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            window,
            max_submissions,
        }
    }

    pub fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> RateDecision {
        let mut guard = self.inner.lock();

        if guard.len() > SWEEP_THRESHOLD {
            let window = self.window;
            guard.retain(|_, queue| {
                queue
                    .back()
                    .is_some_and(|last| now.duration_since(*last) <= window)
            });
        }

        let queue = guard.entry(key.to_string()).or_default();
        while let Some(front) = queue.front() {
            if now.duration_since(*front) > self.window {
                queue.pop_front();
            } else {
                break;
            }
        }

        if queue.len() >= self.max_submissions {
            let retry_after = match queue.front() {
                Some(oldest) => self.window.saturating_sub(now.duration_since(*oldest)),
                None => self.window,
            };
            return RateDecision::Limited { retry_after };
        }

        queue.push_back(now);
        RateDecision::Allowed {
            remaining: self.max_submissions - queue.len(),
        }
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.inner.lock().len()
    }
}
