use crate::config::Config;
use crate::geometry::Rect;

// ── Player ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub velocity_y: f32,
    pub alive: bool,
    frame: u8,
    frame_timer_ms: u64,
}

impl Player {
    pub fn new(config: &Config, now_ms: u64) -> Self {
        let (cx, cy) = config.player_start();
        Self {
            rect: Rect::from_center(cx, cy, config.player_size, config.player_size),
            velocity_y: 0.0,
            alive: true,
            frame: 0,
            frame_timer_ms: now_ms,
        }
    }

    /// Set the upward impulse. Returns false (and does nothing) once dead.
    pub fn flap(&mut self, config: &Config) -> bool {
        if !self.alive {
            return false;
        }
        self.velocity_y = config.jump_speed;
        true
    }

    /// One physics step. Returns true on the step the player hits the floor.
    ///
    /// The ceiling clamps position only; velocity keeps its value.
    pub fn apply_gravity_and_move(&mut self, config: &Config, gravity: f32) -> bool {
        if self.alive {
            self.velocity_y += gravity;
            self.rect.y += self.velocity_y;
            if self.rect.top() < 0.0 {
                self.rect.set_top(0.0);
            }
        }

        if self.rect.bottom() > config.screen_height {
            self.rect.set_bottom(config.screen_height);
            let grounded = self.alive;
            self.alive = false;
            return grounded;
        }
        false
    }

    /// Advance the wing animation when its interval has passed.
    pub fn animate(&mut self, config: &Config, now_ms: u64) {
        if now_ms.saturating_sub(self.frame_timer_ms) > config.animation_interval_ms {
            self.frame = (self.frame + 1) % config.animation_frames.max(1);
            self.frame_timer_ms = now_ms;
        }
    }

    pub fn frame(&self) -> u8 {
        self.frame
    }
}

// ── Obstacles ───────────────────────────────────────────────────────────────

/// One member of a pipe pair. A flipped pipe hangs from above the gap.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub rect: Rect,
    pub flipped: bool,
}

impl Obstacle {
    pub fn new(config: &Config, cx: f32, gap_center: f32, flipped: bool) -> Self {
        let half_gap = (config.pipe_gap / 2.0).floor();
        let rect = if flipped {
            Rect::from_mid_bottom(cx, gap_center - half_gap, config.pipe_width, config.pipe_height)
        } else {
            Rect::from_mid_top(cx, gap_center + half_gap, config.pipe_width, config.pipe_height)
        };
        Self { rect, flipped }
    }

    pub fn scroll(&mut self, speed: f32) {
        self.rect.x -= speed;
    }

    pub fn is_off_screen(&self) -> bool {
        self.rect.right() < 0.0
    }
}

/// Move every obstacle left and drop the ones that have left the screen.
pub fn scroll_obstacles(obstacles: &mut Vec<Obstacle>, speed: f32) {
    for o in obstacles.iter_mut() {
        o.scroll(speed);
    }
    obstacles.retain(|o| !o.is_off_screen());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_starts_centred() {
        let config = Config::new();
        let p = Player::new(&config, 0);
        assert_eq!(p.rect, Rect::new(176.0, 356.0, 48.0, 48.0));
        assert!(p.alive);
        assert_eq!(p.velocity_y, 0.0);
    }

    #[test]
    fn gravity_accelerates_then_moves() {
        let config = Config::new();
        let mut p = Player::new(&config, 0);
        p.apply_gravity_and_move(&config, 1.0);
        assert_eq!(p.velocity_y, 1.0);
        assert_eq!(p.rect.y, 357.0);
        p.apply_gravity_and_move(&config, 1.0);
        assert_eq!(p.velocity_y, 2.0);
        assert_eq!(p.rect.y, 359.0);
    }

    #[test]
    fn ceiling_clamps_position_not_velocity() {
        let config = Config::new();
        let mut p = Player::new(&config, 0);
        p.rect.y = 5.0;
        p.velocity_y = -30.0;
        p.apply_gravity_and_move(&config, 1.0);
        assert_eq!(p.rect.top(), 0.0);
        assert_eq!(p.velocity_y, -29.0);
        assert!(p.alive);
    }

    #[test]
    fn floor_kills_exactly_once() {
        let config = Config::new();
        let mut p = Player::new(&config, 0);
        p.rect.set_bottom(755.0);
        p.velocity_y = 20.0;
        assert!(p.apply_gravity_and_move(&config, 1.0));
        assert!(!p.alive);
        assert_eq!(p.rect.bottom(), 760.0);

        let y = p.rect.y;
        assert!(!p.apply_gravity_and_move(&config, 1.0));
        assert_eq!(p.rect.y, y);
        assert!(!p.alive);
    }

    #[test]
    fn flap_ignored_when_dead() {
        let config = Config::new();
        let mut p = Player::new(&config, 0);
        assert!(p.flap(&config));
        assert_eq!(p.velocity_y, -12.0);

        p.alive = false;
        p.velocity_y = 3.0;
        assert!(!p.flap(&config));
        assert_eq!(p.velocity_y, 3.0);
    }

    #[test]
    fn animation_cycles_after_interval() {
        let config = Config::new();
        let mut p = Player::new(&config, 0);
        p.animate(&config, 120);
        assert_eq!(p.frame(), 0);
        for (i, now) in [121, 242, 363, 484].into_iter().enumerate() {
            p.animate(&config, now);
            assert_eq!(p.frame(), ((i + 1) % 4) as u8);
        }
    }

    #[test]
    fn pipe_pair_leaves_exact_gap() {
        let config = Config::new();
        let top = Obstacle::new(&config, 1070.0, 400.0, true);
        let bottom = Obstacle::new(&config, 1070.0, 400.0, false);
        assert_eq!(top.rect.bottom(), 275.0);
        assert_eq!(bottom.rect.top(), 525.0);
        assert_eq!(bottom.rect.top() - top.rect.bottom(), 250.0);
        assert_eq!(top.rect.left(), 1020.0);
        assert!(!top.rect.intersects(&bottom.rect));
    }

    #[test]
    fn obstacles_removed_once_right_edge_is_negative() {
        let config = Config::new();
        let mut obstacles = vec![Obstacle::new(&config, 0.0, 400.0, true)];
        // right edge at 50
        scroll_obstacles(&mut obstacles, 50.0);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].rect.right(), 0.0);
        scroll_obstacles(&mut obstacles, 0.5);
        assert!(obstacles.is_empty());
    }
}
