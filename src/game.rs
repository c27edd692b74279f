use rand::Rng;
use tracing::{debug, info};

use crate::collision::check_collision;
use crate::config::Config;
use crate::difficulty::{DifficultyRamp, Tunables};
use crate::entity::{Obstacle, Player, scroll_obstacles};
use crate::spawner::{Spawner, spawn_pair};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}

/// Logical input, already decoded from whatever device produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Quit,
    /// Flap while playing, start a new round after game over.
    Primary,
}

/// Things that happened during input handling or an update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    RoundStarted,
    Flapped,
    PairSpawned { gap_center: i32 },
    DifficultyRaised { bucket: u64 },
    /// Player touched the floor. The round keeps going until a pipe is hit.
    Grounded,
    Crashed,
}

pub struct Game<R> {
    config: Config,
    rng: R,
    tunables: Tunables,
    player: Player,
    obstacles: Vec<Obstacle>,
    ramp: DifficultyRamp,
    spawner: Spawner,
    game_over: bool,
    quit: bool,
    events: Vec<GameEvent>,
}

impl<R: Rng> Game<R> {
    pub fn new(config: Config, rng: R, now_ms: u64) -> Self {
        let mut game = Game {
            tunables: Tunables::baseline(&config),
            player: Player::new(&config, now_ms),
            obstacles: Vec::new(),
            ramp: DifficultyRamp::new(now_ms),
            spawner: Spawner::new(now_ms),
            game_over: false,
            quit: false,
            events: Vec::new(),
            config,
            rng,
        };
        game.setup(now_ms);
        game
    }

    /// Start a fresh round: new player, no pipes, baseline tunables, timers
    /// restarted at `now_ms`.
    pub fn setup(&mut self, now_ms: u64) {
        self.tunables = Tunables::baseline(&self.config);
        self.player = Player::new(&self.config, now_ms);
        self.obstacles.clear();
        self.ramp = DifficultyRamp::new(now_ms);
        self.spawner = Spawner::new(now_ms);
        self.game_over = false;
        self.events.push(GameEvent::RoundStarted);
        info!(now_ms, "round started");
    }

    pub fn handle_input(&mut self, input: Input, now_ms: u64) {
        match input {
            Input::Quit => self.quit = true,
            Input::Primary => match self.phase() {
                Phase::Playing => {
                    if self.player.flap(&self.config) {
                        self.events.push(GameEvent::Flapped);
                    }
                }
                Phase::GameOver => self.setup(now_ms),
            },
        }
    }

    /// One frame of simulation. Does nothing once the round is over.
    pub fn update(&mut self, now_ms: u64) {
        if self.game_over {
            return;
        }

        if self
            .player
            .apply_gravity_and_move(&self.config, self.tunables.gravity)
        {
            debug!(y = self.player.rect.y, "player hit the floor");
            self.events.push(GameEvent::Grounded);
        }
        self.player.animate(&self.config, now_ms);
        scroll_obstacles(&mut self.obstacles, self.tunables.speed);

        if let Some(bucket) = self.ramp.advance(&self.config, now_ms, &mut self.tunables) {
            debug!(
                bucket,
                speed = self.tunables.speed,
                gravity = self.tunables.gravity,
                "difficulty raised"
            );
            self.events.push(GameEvent::DifficultyRaised { bucket });
        }

        if self.spawner.due(&self.config, now_ms) {
            let gap_center = spawn_pair(&self.config, &mut self.rng, &mut self.obstacles);
            debug!(gap_center, active = self.obstacles.len(), "pipe pair spawned");
            self.events.push(GameEvent::PairSpawned { gap_center });
        }

        if check_collision(&self.player, &self.obstacles) {
            self.game_over = true;
            self.player.alive = false;
            info!(elapsed = self.elapsed_secs(now_ms), "game over");
            self.events.push(GameEvent::Crashed);
        }
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else {
            Phase::Playing
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Whole seconds since the current round started.
    pub fn elapsed_secs(&self, now_ms: u64) -> u64 {
        self.ramp.elapsed_secs(now_ms)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tunables(&self) -> Tunables {
        self.tunables
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Direct access for scripted scenarios.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn obstacles_mut(&mut self) -> &mut Vec<Obstacle> {
        &mut self.obstacles
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn game() -> Game<StdRng> {
        Game::new(Config::new(), StdRng::seed_from_u64(1), 0)
    }

    #[test]
    fn starts_playing() {
        let mut g = game();
        assert_eq!(g.phase(), Phase::Playing);
        assert!(g.player().alive);
        assert!(g.obstacles().is_empty());
        assert_eq!(g.drain_events().collect::<Vec<_>>(), vec![GameEvent::RoundStarted]);
    }

    #[test]
    fn primary_flaps_while_playing() {
        let mut g = game();
        g.drain_events().for_each(drop);
        g.handle_input(Input::Primary, 10);
        assert_eq!(g.player().velocity_y, -12.0);
        assert_eq!(g.drain_events().collect::<Vec<_>>(), vec![GameEvent::Flapped]);
    }

    #[test]
    fn quit_sets_flag_only() {
        let mut g = game();
        g.handle_input(Input::Quit, 10);
        assert!(g.quit_requested());
        assert_eq!(g.phase(), Phase::Playing);
    }

    #[test]
    fn first_pair_waits_for_interval() {
        let mut g = game();
        g.update(1_500);
        assert!(g.obstacles().is_empty());
        g.update(1_501);
        assert_eq!(g.obstacles().len(), 2);
    }

    #[test]
    fn new_pair_is_not_scrolled_on_its_spawn_frame() {
        let mut g = game();
        g.update(1_600);
        assert_eq!(g.obstacles()[0].rect.left(), 1020.0);
        g.update(1_612);
        assert_eq!(g.obstacles()[0].rect.left(), 1014.0);
    }

    #[test]
    fn collision_ends_round_and_freezes_update() {
        let mut g = game();
        let config = g.config().clone();
        g.obstacles_mut().push(Obstacle::new(&config, 200.0, 200.0, false));
        g.update(12);
        assert_eq!(g.phase(), Phase::GameOver);
        assert!(!g.player().alive);
        assert!(g.drain_events().any(|e| e == GameEvent::Crashed));

        let y = g.player().rect.y;
        let x = g.obstacles()[0].rect.x;
        g.update(24);
        assert_eq!(g.player().rect.y, y);
        assert_eq!(g.obstacles()[0].rect.x, x);
    }

    #[test]
    fn primary_after_game_over_resets() {
        let mut g = game();
        let config = g.config().clone();
        g.update(20_000);
        assert_eq!(g.tunables().speed, 8.0);
        g.obstacles_mut().push(Obstacle::new(&config, 200.0, 200.0, false));
        g.update(20_012);
        assert!(g.is_game_over());

        g.handle_input(Input::Primary, 30_000);
        assert_eq!(g.phase(), Phase::Playing);
        assert!(g.obstacles().is_empty());
        assert!(g.player().alive);
        assert_eq!(g.elapsed_secs(30_000), 0);
        assert_eq!(g.tunables(), Tunables::baseline(&config));
        assert_eq!(g.player().velocity_y, 0.0);
    }
}
