use time::{Duration, OffsetDateTime};

/// How long a cached feed stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    max_age: Duration,
}

impl CachePolicy {
    pub const DEFAULT_MAX_AGE: Duration = Duration::days(7);

    pub fn new(max_age: Duration) -> Self {
        Self { max_age }
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// A snapshot saved at `timestamp` is valid at `now` while strictly
    /// younger than the maximum age.
    pub fn validate(&self, timestamp: OffsetDateTime, now: OffsetDateTime) -> bool {
        now < timestamp + self.max_age
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_AGE)
    }
}
