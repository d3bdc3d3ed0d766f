use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Per-provider rate limiter using a token bucket algorithm. Each
/// provider gets its own bucket with its configured refill rate.
pub struct ProviderRateLimiter {
    buckets: Mutex<HashMap<String, TokenBucket>>,
    rates: HashMap<String, f64>,
    default_rate: f64,
}

struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
    rate: f64, // tokens per second
}

impl TokenBucket {
    fn new(rate: f64) -> Self {
        Self {
            tokens: rate, // Start with a full bucket.
            last_refill: Instant::now(),
            rate,
        }
    }

    fn refill(&mut self) {
        let elapsed = self.last_refill.elapsed().as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.rate).min(self.rate * 2.0);
        self.last_refill = Instant::now();
    }

    fn try_acquire(&mut self) -> bool {
        self.refill();
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    fn time_until_available(&mut self) -> Duration {
        self.refill();
        if self.tokens >= 1.0 {
            Duration::ZERO
        } else {
            let needed = 1.0 - self.tokens;
            Duration::from_secs_f64(needed / self.rate)
        }
    }
}

impl ProviderRateLimiter {
    /// Create a limiter with per-provider rates (requests per second).
    /// Unknown providers fall back to `default_rate`.
    pub fn new(rates: HashMap<String, f64>, default_rate: f64) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            rates,
            default_rate,
        }
    }

    /// Acquire a permit for the given provider, waiting until one is
    /// available or `timeout` has elapsed.
    pub async fn acquire(&self, provider: &str, timeout: Duration) -> Result<(), String> {
        let deadline = Instant::now() + timeout;

        loop {
            let wait_time = {
                let mut buckets = self.buckets.lock().await;
                let rate = self
                    .rates
                    .get(provider)
                    .copied()
                    .unwrap_or(self.default_rate);
                let bucket = buckets
                    .entry(provider.to_string())
                    .or_insert_with(|| TokenBucket::new(rate));

                if bucket.try_acquire() {
                    return Ok(());
                }

                bucket.time_until_available()
            };

            if Instant::now() + wait_time > deadline {
                metrics::counter!("search.rate_limit.timeouts", "provider" => provider.to_string())
                    .increment(1);
                return Err(format!("Rate limit timeout for provider: {}", provider));
            }

            tokio::time::sleep(wait_time).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_acquire_within_rate() {
        let limiter = ProviderRateLimiter::new(
            HashMap::from([("google_fact_check".to_string(), 10.0)]),
            1.0,
        );
        for _ in 0..5 {
            assert!(limiter
                .acquire("google_fact_check", Duration::from_millis(100))
                .await
                .is_ok());
        }
    }

    #[tokio::test]
    async fn test_exhausted_bucket_times_out() {
        let limiter = ProviderRateLimiter::new(HashMap::new(), 1.0);
        // Bucket starts with one token at rate 1.0; drain it.
        assert!(limiter
            .acquire("news", Duration::from_millis(10))
            .await
            .is_ok());
        let denied = limiter.acquire("news", Duration::from_millis(10)).await;
        assert!(denied.is_err());
    }

    #[tokio::test]
    async fn test_providers_have_independent_buckets() {
        let limiter = ProviderRateLimiter::new(
            HashMap::from([
                ("a".to_string(), 1.0),
                ("b".to_string(), 1.0),
            ]),
            1.0,
        );
        assert!(limiter.acquire("a", Duration::from_millis(10)).await.is_ok());
        // "a" is drained, "b" still has a full bucket.
        assert!(limiter.acquire("a", Duration::from_millis(10)).await.is_err());
        assert!(limiter.acquire("b", Duration::from_millis(10)).await.is_ok());
    }
}
