use std::collections::VecDeque;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::info;

use crate::game::{Game, GameEvent, Input};

/// Monotonic millisecond clock plus frame pacing.
pub trait Clock {
    fn now_ms(&mut self) -> u64;

    /// Block until `frame_ms` has passed since `frame_start_ms`.
    fn wait_frame(&mut self, frame_start_ms: u64, frame_ms: u64);
}

pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&mut self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn wait_frame(&mut self, frame_start_ms: u64, frame_ms: u64) {
        let elapsed = self.now_ms().saturating_sub(frame_start_ms);
        if elapsed < frame_ms {
            std::thread::sleep(Duration::from_millis(frame_ms - elapsed));
        }
    }
}

/// Where inputs come from and frames go to.
pub trait Frontend {
    type Error;

    /// Append every pending input to `queue`. Must not block.
    fn poll_inputs(&mut self, queue: &mut VecDeque<Input>) -> Result<(), Self::Error>;

    /// Show the current state. `events` holds what happened this frame.
    fn present<R: Rng>(
        &mut self,
        game: &Game<R>,
        events: &[GameEvent],
        now_ms: u64,
    ) -> Result<(), Self::Error>;
}

/// Poll, update, present, pace; until a quit input arrives.
/// Returns the number of frames presented.
pub fn run<R, F, C>(game: &mut Game<R>, frontend: &mut F, clock: &mut C) -> Result<u64, F::Error>
where
    R: Rng,
    F: Frontend,
    C: Clock,
{
    let frame_ms = game.config().frame_ms();
    let mut queue = VecDeque::new();
    let mut events = Vec::new();
    let mut frames = 0;

    loop {
        let frame_start = clock.now_ms();

        // Input
        frontend.poll_inputs(&mut queue)?;
        while let Some(input) = queue.pop_front() {
            game.handle_input(input, frame_start);
        }
        if game.quit_requested() {
            break;
        }

        // Update
        game.update(frame_start);
        events.clear();
        events.extend(game.drain_events());

        // Render
        frontend.present(game, &events, frame_start)?;
        frames += 1;

        // Frame pacing
        clock.wait_frame(frame_start, frame_ms);
    }

    info!(frames, "quit requested");
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::game::Phase;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::convert::Infallible;

    struct ManualClock {
        now: u64,
    }

    impl Clock for ManualClock {
        fn now_ms(&mut self) -> u64 {
            self.now
        }

        fn wait_frame(&mut self, frame_start_ms: u64, frame_ms: u64) {
            self.now = frame_start_ms + frame_ms;
        }
    }

    #[derive(Default)]
    struct Scripted {
        script: VecDeque<Vec<Input>>,
        seen: Vec<(Phase, usize, Vec<GameEvent>)>,
    }

    impl Frontend for Scripted {
        type Error = Infallible;

        fn poll_inputs(&mut self, queue: &mut VecDeque<Input>) -> Result<(), Infallible> {
            match self.script.pop_front() {
                Some(inputs) => queue.extend(inputs),
                None => queue.push_back(Input::Quit),
            }
            Ok(())
        }

        fn present<R: Rng>(
            &mut self,
            game: &Game<R>,
            events: &[GameEvent],
            _now_ms: u64,
        ) -> Result<(), Infallible> {
            self.seen
                .push((game.phase(), game.obstacles().len(), events.to_vec()));
            Ok(())
        }
    }

    #[test]
    fn runs_until_quit() {
        let mut game = Game::new(Config::new(), StdRng::seed_from_u64(3), 0);
        let mut frontend = Scripted {
            script: vec![vec![]; 5].into(),
            ..Default::default()
        };
        let mut clock = ManualClock { now: 0 };

        let frames = run(&mut game, &mut frontend, &mut clock).unwrap();
        assert_eq!(frames, 5);
        assert_eq!(frontend.seen.len(), 5);
        assert_eq!(clock.now, 60);
        assert!(frontend.seen[0].2.contains(&GameEvent::RoundStarted));
    }

    #[test]
    fn inputs_are_applied_before_update() {
        let mut game = Game::new(Config::new(), StdRng::seed_from_u64(3), 0);
        let mut frontend = Scripted {
            script: vec![vec![], vec![Input::Primary]].into(),
            ..Default::default()
        };
        let mut clock = ManualClock { now: 0 };

        run(&mut game, &mut frontend, &mut clock).unwrap();
        assert!(frontend.seen[1].2.contains(&GameEvent::Flapped));
        // flap then one gravity step
        assert_eq!(game.player().velocity_y, -11.0);
    }

    #[test]
    fn pipes_appear_after_spawn_interval() {
        let mut game = Game::new(Config::new(), StdRng::seed_from_u64(3), 0);
        // 130 frames of 12ms
        let mut frontend = Scripted {
            script: vec![vec![]; 130].into(),
            ..Default::default()
        };
        let mut clock = ManualClock { now: 0 };

        run(&mut game, &mut frontend, &mut clock).unwrap();
        let first = frontend
            .seen
            .iter()
            .position(|(_, n, _)| *n > 0)
            .unwrap();
        // first frame later than 1500ms is frame 126 (t = 1512)
        assert_eq!(first, 126);
        assert!(
            frontend.seen[first]
                .2
                .iter()
                .any(|e| matches!(e, GameEvent::PairSpawned { .. }))
        );
    }
}
