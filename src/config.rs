/// Fixed game tuning. The world is measured in screen pixels.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Screen
    pub const SCREEN_WIDTH: f32 = 1020.0;
    pub const SCREEN_HEIGHT: f32 = 760.0;
    pub const FPS: u32 = 80;

    // Player
    pub const PLAYER_SIZE: f32 = 48.0; // 16px tile scaled x3
    pub const PLAYER_START_X: f32 = 200.0;
    pub const JUMP_SPEED: f32 = -12.0;
    pub const ANIMATION_FRAMES: u8 = 4;
    pub const ANIMATION_INTERVAL_MS: u64 = 120;

    // Pipes
    pub const PIPE_WIDTH: f32 = 100.0;
    pub const PIPE_HEIGHT: f32 = 600.0;
    pub const PIPE_GAP: f32 = 250.0;
    pub const PIPE_SPAWN_TIME_MS: u64 = 1500;
    pub const PIPE_SPAWN_OFFSET: f32 = 50.0;
    pub const GAP_MARGIN: i32 = 200;

    // Difficulty
    pub const GRAVITY: f32 = 1.0;
    pub const PIPE_SPEED: f32 = 6.0;
    pub const BUCKET_SECS: u64 = 10;
    pub const SPEED_STEP: f32 = 1.0;
    pub const GRAVITY_STEP: f32 = 0.2;
}

/// Game configuration, defaulting to [`Params`].
#[derive(Debug, Clone)]
pub struct Config {
    pub screen_width: f32,
    pub screen_height: f32,
    pub fps: u32,
    pub player_size: f32,
    pub player_start_x: f32,
    pub jump_speed: f32,
    pub animation_frames: u8,
    pub animation_interval_ms: u64,
    pub pipe_width: f32,
    pub pipe_height: f32,
    pub pipe_gap: f32,
    pub pipe_spawn_time_ms: u64,
    pub pipe_spawn_offset: f32,
    pub gap_margin: i32,
    pub base_gravity: f32,
    pub base_speed: f32,
    pub bucket_secs: u64,
    pub speed_step: f32,
    pub gravity_step: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: Params::SCREEN_WIDTH,
            screen_height: Params::SCREEN_HEIGHT,
            fps: Params::FPS,
            player_size: Params::PLAYER_SIZE,
            player_start_x: Params::PLAYER_START_X,
            jump_speed: Params::JUMP_SPEED,
            animation_frames: Params::ANIMATION_FRAMES,
            animation_interval_ms: Params::ANIMATION_INTERVAL_MS,
            pipe_width: Params::PIPE_WIDTH,
            pipe_height: Params::PIPE_HEIGHT,
            pipe_gap: Params::PIPE_GAP,
            pipe_spawn_time_ms: Params::PIPE_SPAWN_TIME_MS,
            pipe_spawn_offset: Params::PIPE_SPAWN_OFFSET,
            gap_margin: Params::GAP_MARGIN,
            base_gravity: Params::GRAVITY,
            base_speed: Params::PIPE_SPEED,
            bucket_secs: Params::BUCKET_SECS,
            speed_step: Params::SPEED_STEP,
            gravity_step: Params::GRAVITY_STEP,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Player start centre: fixed x, vertically centred.
    pub fn player_start(&self) -> (f32, f32) {
        (self.player_start_x, (self.screen_height / 2.0).floor())
    }

    /// Inclusive range the gap centre is drawn from.
    pub fn gap_center_range(&self) -> (i32, i32) {
        let lo = self.gap_margin;
        let hi = (self.screen_height as i32 - self.gap_margin).max(lo);
        (lo, hi)
    }

    /// Target duration of one frame in milliseconds.
    pub fn frame_ms(&self) -> u64 {
        1000 / u64::from(self.fps.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_params() {
        let config = Config::new();
        assert_eq!(config.screen_width, 1020.0);
        assert_eq!(config.screen_height, 760.0);
        assert_eq!(config.fps, 80);
        assert_eq!(config.pipe_gap, 250.0);
        assert_eq!(config.pipe_spawn_time_ms, 1500);
        assert_eq!(config.player_start(), (200.0, 380.0));
    }

    #[test]
    fn gap_range_leaves_margin_on_both_sides() {
        let config = Config::new();
        assert_eq!(config.gap_center_range(), (200, 560));
    }

    #[test]
    fn frame_ms_at_80_fps() {
        assert_eq!(Config::new().frame_ms(), 12);
    }
}
