use crate::config::Config;

/// Per-round values the ramp raises and the physics step reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tunables {
    pub speed: f32,
    pub gravity: f32,
}

impl Tunables {
    pub fn baseline(config: &Config) -> Self {
        Self::at_bucket(config, 0)
    }

    /// Values after `bucket` increments. Computed from the baseline so that
    /// repeated steps never accumulate rounding error.
    pub fn at_bucket(config: &Config, bucket: u64) -> Self {
        let k = bucket as f32;
        Self {
            speed: config.base_speed + k * config.speed_step,
            gravity: config.base_gravity + k * config.gravity_step,
        }
    }
}

/// Step function of elapsed round time: one increment per bucket.
#[derive(Debug, Clone)]
pub struct DifficultyRamp {
    start_ms: u64,
    bucket: u64,
}

impl DifficultyRamp {
    pub fn new(now_ms: u64) -> Self {
        Self {
            start_ms: now_ms,
            bucket: 0,
        }
    }

    /// Whole seconds since the round started.
    pub fn elapsed_secs(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.start_ms) / 1000
    }

    /// Raise `tunables` if `now_ms` falls in a later bucket than the last one
    /// applied. Returns the new bucket when it changed. A stall spanning
    /// several buckets applies all of them at once.
    pub fn advance(&mut self, config: &Config, now_ms: u64, tunables: &mut Tunables) -> Option<u64> {
        let bucket = self.elapsed_secs(now_ms) / config.bucket_secs.max(1);
        if bucket <= self.bucket {
            return None;
        }
        self.bucket = bucket;
        *tunables = Tunables::at_bucket(config, bucket);
        Some(bucket)
    }
}
