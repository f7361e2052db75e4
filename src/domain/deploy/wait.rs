//! How the orchestrator waits for the infra stack before reading its outputs

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Backoff settings for polling a stack's status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Maximum number of status checks
    pub max_attempts: u32,
    /// Delay before the second check
    pub initial_delay_ms: u64,
    /// Upper bound for any single delay
    pub max_delay_ms: u64,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            initial_delay_ms: 5_000,
            max_delay_ms: 30_000,
            backoff_multiplier: 2.0,
        }
    }
}

impl PollConfig {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Default::default()
        }
    }

    pub fn with_initial_delay(mut self, ms: u64) -> Self {
        self.initial_delay_ms = ms;
        self
    }

    pub fn with_max_delay(mut self, ms: u64) -> Self {
        self.max_delay_ms = ms;
        self
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Calculate delay after a given attempt number (0-indexed)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::from_millis(self.initial_delay_ms.min(self.max_delay_ms));
        }

        let delay = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(attempt as i32);
        let delay_ms = delay.min(self.max_delay_ms as f64) as u64;

        Duration::from_millis(delay_ms)
    }
}

/// Strategy for waiting on the infra stack between the two deployments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WaitStrategy {
    /// Sleep a fixed time; the stack may still be provisioning afterwards
    Fixed {
        #[serde(default = "default_fixed_delay_secs")]
        delay_secs: u64,
    },
    /// Poll the stack status until it settles or attempts run out
    Poll(PollConfig),
}

fn default_fixed_delay_secs() -> u64 {
    20
}

impl Default for WaitStrategy {
    fn default() -> Self {
        Self::Poll(PollConfig::default())
    }
}

impl WaitStrategy {
    pub fn fixed(delay_secs: u64) -> Self {
        Self::Fixed { delay_secs }
    }

    pub fn poll(config: PollConfig) -> Self {
        Self::Poll(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_grows_exponentially_until_capped() {
        let config = PollConfig::new(10)
            .with_initial_delay(1_000)
            .with_max_delay(5_000)
            .with_backoff_multiplier(2.0);

        assert_eq!(config.delay_for_attempt(0), Duration::from_millis(1_000));
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(2_000));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(4_000));
        assert_eq!(config.delay_for_attempt(3), Duration::from_millis(5_000));
        assert_eq!(config.delay_for_attempt(9), Duration::from_millis(5_000));
    }

    #[test]
    fn test_default_is_polling() {
        assert!(matches!(WaitStrategy::default(), WaitStrategy::Poll(_)));
    }

    #[test]
    fn test_deserialize_fixed_with_default_delay() {
        let strategy: WaitStrategy = serde_json::from_str(r#"{"mode": "fixed"}"#).unwrap();
        assert_eq!(strategy, WaitStrategy::fixed(20));
    }

    #[test]
    fn test_deserialize_poll_with_overrides() {
        let strategy: WaitStrategy =
            serde_json::from_str(r#"{"mode": "poll", "max_attempts": 3}"#).unwrap();
        match strategy {
            WaitStrategy::Poll(config) => {
                assert_eq!(config.max_attempts, 3);
                assert_eq!(config.initial_delay_ms, 5_000);
            }
            other => panic!("unexpected strategy {:?}", other),
        }
    }
}
