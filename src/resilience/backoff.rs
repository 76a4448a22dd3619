//! Exponential backoff with an optional jitter.

use std::time::Duration;

use rand::Rng;

/// How a computed delay is randomized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Jitter {
    /// Delay is exactly the computed value.
    #[default]
    None,
    /// Uniform in `[0, delay]`.
    Full,
}

/// Exponential delay schedule: `factor * base^n`, capped at `max_delay`.
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    pub base: f64,
    pub factor: Duration,
    pub max_delay: Duration,
    pub jitter: Jitter,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            base: 2.0,
            factor: Duration::from_millis(1500),
            max_delay: Duration::from_secs(60),
            jitter: Jitter::None,
        }
    }
}

impl BackoffPolicy {
    /// Delay before retry number `retry` (0 = first retry), before jitter.
    pub fn base_delay(&self, retry: u32) -> Duration {
        let max_secs = self.max_delay.as_secs_f64();
        let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
        let secs = self.factor.as_secs_f64() * self.base.powi(exponent);
        // powi overflows to inf for large retry counts
        if !secs.is_finite() || secs >= max_secs {
            return self.max_delay;
        }
        // negative bases alternate sign
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
    }

    /// Delay before retry number `retry`, jitter applied.
    pub fn delay(&self, retry: u32) -> Duration {
        let capped = self.base_delay(retry);
        match self.jitter {
            Jitter::None => capped,
            Jitter::Full => {
                let secs = rand::thread_rng().gen_range(0.0..=capped.as_secs_f64());
                Duration::from_secs_f64(secs)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_calculation() {
        let policy = BackoffPolicy::default();
        let secs: Vec<f64> = (0..9).map(|n| policy.delay(n).as_secs_f64()).collect();
        assert_eq!(secs, vec![1.5, 3.0, 6.0, 12.0, 24.0, 48.0, 60.0, 60.0, 60.0]);
    }

    #[test]
    fn test_negative_base_never_panics() {
        let policy = BackoffPolicy {
            base: -2.0,
            ..BackoffPolicy::default()
        };
        assert_eq!(policy.delay(0), Duration::from_millis(1500));
        assert_eq!(policy.delay(1), Duration::ZERO);
        assert_eq!(policy.delay(2), Duration::from_secs(6));

        let jittered = BackoffPolicy {
            jitter: Jitter::Full,
            ..policy
        };
        assert_eq!(jittered.delay(1), Duration::ZERO);
    }

    #[test]
    fn test_huge_retry_count_stays_capped() {
        let policy = BackoffPolicy::default();
        assert_eq!(policy.delay(10_000), Duration::from_secs(60));
        assert_eq!(policy.delay(u32::MAX), Duration::from_secs(60));
    }

    #[test]
    fn test_non_decreasing_without_jitter() {
        let policy = BackoffPolicy {
            base: 1.7,
            factor: Duration::from_millis(10),
            max_delay: Duration::from_secs(5),
            jitter: Jitter::None,
        };
        let delays: Vec<_> = (0..40).map(|n| policy.delay(n)).collect();
        assert!(delays.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*delays.last().unwrap(), Duration::from_secs(5));
    }

    #[test]
    fn test_full_jitter_bounded() {
        let policy = BackoffPolicy {
            jitter: Jitter::Full,
            ..BackoffPolicy::default()
        };
        for n in 0..10 {
            let d = policy.delay(n);
            assert!(d <= policy.base_delay(n));
        }
    }
}
