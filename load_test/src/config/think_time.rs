use std::time::Duration;

use rand::Rng;
use serde::Serialize;

use crate::error::ConfigError;

/// Uniform random wait, in seconds, before each task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThinkTime {
    pub min: f64,
    pub max: f64,
}

impl ThinkTime {
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        let think_time = Self { min, max };
        think_time.validate()?;
        Ok(think_time)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "think-time bounds must be non-negative numbers, got {}..{}",
                self.min, self.max
            )));
        }
        if self.min > self.max {
            return Err(ConfigError::InvalidThinkTime {
                min: self.min,
                max: self.max,
            });
        }
        if Duration::try_from_secs_f64(self.max).is_err() {
            return Err(ConfigError::Invalid(format!(
                "think-time max {}s is too large",
                self.max
            )));
        }
        Ok(())
    }

    /// Draw one wait. Bounds that do not fit a `Duration` saturate.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let secs = if self.max <= self.min {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        };
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}

impl Default for ThinkTime {
    fn default() -> Self {
        Self { min: 1.0, max: 10.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_samples_stay_in_range() {
        let think_time = ThinkTime::new(1.0, 10.0).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let wait = think_time.sample(&mut rng);
            assert!(wait >= Duration::from_secs(1));
            assert!(wait <= Duration::from_secs(10));
        }
    }

    #[test]
    fn test_zero_range() {
        let think_time = ThinkTime::new(0.0, 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(think_time.sample(&mut rng), Duration::ZERO);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = ThinkTime::new(5.0, 1.0).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThinkTime { .. }));
    }

    #[test]
    fn test_max_beyond_duration_range_rejected() {
        assert!(ThinkTime::new(0.0, 1e30).is_err());
    }

    #[test]
    fn test_unvalidated_huge_range_saturates() {
        let think_time = ThinkTime { min: 1e30, max: 1e30 };
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(think_time.sample(&mut rng), Duration::MAX);
    }

    #[test]
    fn test_negative_rejected() {
        assert!(ThinkTime::new(-1.0, 1.0).is_err());
    }
}
