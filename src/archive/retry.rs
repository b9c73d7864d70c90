//! Tiered retry policy for archive requests.
//!
//! A location is fetched in at most `tiers.len()` attempts. Attempt `n` uses
//! the timeout of tier `n` and, from the second attempt on, first waits for
//! that tier's delay. Whether a failed attempt is followed by another one is
//! decided by [`RetryPolicy::should_retry`].

use crate::archive::error::Classification;
use std::time::Duration;

/// Timeout budget and pre-attempt delay of one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryTier {
    /// Upper bound for the whole request, body included.
    pub timeout: Duration,
    /// Wait before this attempt starts. Ignored for the first attempt.
    pub delay_before: Duration,
}

impl RetryTier {
    pub const fn new(timeout: Duration, delay_before: Duration) -> Self {
        Self {
            timeout,
            delay_before,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    // Never empty.
    tiers: Vec<RetryTier>,
}

impl Default for RetryPolicy {
    /// 60s first attempt, then 90s after a 10s pause, then 120s after a 30s pause.
    fn default() -> Self {
        Self::new(
            RetryTier::new(Duration::from_secs(60), Duration::ZERO),
            [
                RetryTier::new(Duration::from_secs(90), Duration::from_secs(10)),
                RetryTier::new(Duration::from_secs(120), Duration::from_secs(30)),
            ],
        )
    }
}

impl RetryPolicy {
    pub fn new(first: RetryTier, escalations: impl IntoIterator<Item = RetryTier>) -> Self {
        let mut tiers = vec![first];
        tiers.extend(escalations);
        Self { tiers }
    }

    pub fn tiers(&self) -> &[RetryTier] {
        &self.tiers
    }

    pub fn max_attempts(&self) -> usize {
        self.tiers.len()
    }

    /// Tier of the 1-based `attempt`, clamped to the first and last tier.
    pub fn tier(&self, attempt: usize) -> RetryTier {
        let index = attempt.saturating_sub(1).min(self.tiers.len() - 1);
        self.tiers[index]
    }

    /// Highest attempt number a chain started by `classification` may reach.
    ///
    /// Timeouts get one retry, rate limiting gets two; all other classes are
    /// final on the first attempt.
    pub fn attempt_ceiling(classification: Classification) -> usize {
        match classification {
            Classification::Timeout => 2,
            Classification::RateLimited => 3,
            Classification::NetworkError
            | Classification::EmptyResponse
            | Classification::ParseError
            | Classification::NoData => 1,
        }
    }

    /// Decides whether another attempt follows a failed one.
    ///
    /// * `trigger` - classification of the first attempt's failure.
    /// * `latest` - classification of the attempt that just failed.
    /// * `attempts` - number of attempts made so far, including the latest.
    ///
    /// A chain only continues while every failure has the class that started
    /// it, so a rate-limited retry that then times out is final, and so is a
    /// timeout retry that then hits the rate limit.
    pub fn should_retry(
        &self,
        trigger: Classification,
        latest: Classification,
        attempts: usize,
    ) -> bool {
        latest == trigger
            && attempts < Self::attempt_ceiling(trigger)
            && attempts < self.max_attempts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Classification::*;

    #[test]
    fn test_default_tiers_escalate() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.max_attempts(), 3);
        let timeouts: Vec<u64> = policy.tiers().iter().map(|t| t.timeout.as_secs()).collect();
        assert_eq!(timeouts, [60, 90, 120]);
        assert_eq!(policy.tier(2).delay_before, Duration::from_secs(10));
        assert_eq!(policy.tier(3).delay_before, Duration::from_secs(30));
        assert_eq!(policy.tier(7), policy.tier(3));
        assert_eq!(policy.tier(0), policy.tier(1));
    }

    #[test]
    fn test_timeout_retries_once() {
        let policy = RetryPolicy::default();

        assert!(policy.should_retry(Timeout, Timeout, 1));
        assert!(!policy.should_retry(Timeout, Timeout, 2));
        assert!(!policy.should_retry(Timeout, RateLimited, 2));
    }

    #[test]
    fn test_rate_limit_retries_twice() {
        let policy = RetryPolicy::default();

        assert!(policy.should_retry(RateLimited, RateLimited, 1));
        assert!(policy.should_retry(RateLimited, RateLimited, 2));
        assert!(!policy.should_retry(RateLimited, RateLimited, 3));
        assert!(!policy.should_retry(RateLimited, Timeout, 2));
        assert!(!policy.should_retry(RateLimited, NetworkError, 2));
    }

    #[test]
    fn test_other_classes_are_final() {
        let policy = RetryPolicy::default();

        for class in [NetworkError, EmptyResponse, ParseError, NoData] {
            assert!(!policy.should_retry(class, class, 1), "{class}");
        }
    }

    #[test]
    fn test_short_policy_caps_attempts() {
        let policy = RetryPolicy::new(
            RetryTier::new(Duration::from_secs(5), Duration::ZERO),
            [RetryTier::new(Duration::from_secs(10), Duration::from_secs(1))],
        );

        assert!(policy.should_retry(RateLimited, RateLimited, 1));
        assert!(!policy.should_retry(RateLimited, RateLimited, 2));
    }
}
