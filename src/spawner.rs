use rand::Rng;

use crate::config::Config;
use crate::entity::Obstacle;

/// Periodic pipe-pair spawner. The interval is measured from the previous
/// spawn, and re-armed each time it fires.
#[derive(Debug, Clone)]
pub struct Spawner {
    last_spawn_ms: u64,
}

impl Spawner {
    pub fn new(now_ms: u64) -> Self {
        Self {
            last_spawn_ms: now_ms,
        }
    }

    pub fn last_spawn_ms(&self) -> u64 {
        self.last_spawn_ms
    }

    /// Returns true and re-arms when more than the spawn interval has passed.
    pub fn due(&mut self, config: &Config, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_spawn_ms) > config.pipe_spawn_time_ms {
            self.last_spawn_ms = now_ms;
            true
        } else {
            false
        }
    }
}

/// Create a top/bottom pair sharing one random gap centre just past the right
/// edge. Returns the gap centre used.
pub fn spawn_pair<R: Rng>(config: &Config, rng: &mut R, obstacles: &mut Vec<Obstacle>) -> i32 {
    let (lo, hi) = config.gap_center_range();
    let y = rng.gen_range(lo..=hi);
    let x = config.screen_width + config.pipe_spawn_offset;
    obstacles.push(Obstacle::new(config, x, y as f32, true));
    obstacles.push(Obstacle::new(config, x, y as f32, false));
    y
}
