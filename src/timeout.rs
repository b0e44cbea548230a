use std::time::{Duration, Instant};

/// Wall-clock budget for a single solve, captured when the solve starts.
/// `check` is probed between separator iterations; an expired deadline
/// unwinds the whole search.
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    start: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    pub fn start(limit: Option<Duration>) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn expired(&self) -> bool {
        match self.limit {
            Some(limit) => self.start.elapsed() > limit,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::timeout::Deadline;
    use std::time::Duration;

    #[test]
    fn unlimited_never_expires() {
        let deadline = Deadline::start(None);
        assert!(!deadline.expired());
    }

    #[test]
    fn zero_budget_expires() {
        let deadline = Deadline::start(Some(Duration::from_secs(0)));
        std::thread::sleep(Duration::from_millis(2));
        assert!(deadline.expired());
    }
}
