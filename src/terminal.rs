use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute, terminal,
};
use rand::Rng;
use std::collections::VecDeque;
use std::io::{self, IsTerminal, Stdout, Write, stdout};
use std::time::Duration;
use tracing::debug;

use crate::error::{FrontendError, Result};
use crate::frontend::Frontend;
use crate::game::{Game, GameEvent, Input};
use crate::render::Renderer;

#[cfg(feature = "sound")]
use crate::sound::Sound;

pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 15;

/// Fail early when the terminal cannot show a frame.
pub fn check_terminal() -> Result<(u16, u16)> {
    if !stdout().is_terminal() {
        return Err(FrontendError::NotATerminal);
    }
    let (cols, rows) = terminal::size()?;
    check_size(cols, rows)?;
    Ok((cols, rows))
}

pub fn check_size(cols: u16, rows: u16) -> Result<()> {
    if cols < MIN_COLS || rows < MIN_ROWS {
        return Err(FrontendError::TerminalTooSmall {
            cols,
            rows,
            min_cols: MIN_COLS,
            min_rows: MIN_ROWS,
        });
    }
    Ok(())
}

/// Decode one terminal event. Anything unrecognized maps to `None`.
pub fn map_event(ev: &Event) -> Option<Input> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Quit),
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => Some(Input::Primary),
            _ => None,
        },
        Event::Mouse(m) if m.kind == MouseEventKind::Down(MouseButton::Left) => {
            Some(Input::Primary)
        }
        _ => None,
    }
}

/// Raw mode and alternate screen for as long as it lives.
pub struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            EnableMouseCapture,
        )?;
        Ok(Self { out })
    }

    pub fn out(&mut self) -> &mut Stdout {
        &mut self.out
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = terminal::disable_raw_mode();
    }
}

pub struct TerminalFrontend {
    guard: TerminalGuard,
    renderer: Renderer,
    #[cfg(feature = "sound")]
    sound: Option<Sound>,
}

impl TerminalFrontend {
    pub fn new(guard: TerminalGuard, cols: u16, rows: u16, world_w: f32, world_h: f32) -> Self {
        Self {
            guard,
            renderer: Renderer::new(cols, rows, world_w, world_h),
            #[cfg(feature = "sound")]
            sound: Sound::open(),
        }
    }
}

impl Frontend for TerminalFrontend {
    type Error = FrontendError;

    fn poll_inputs(&mut self, queue: &mut VecDeque<Input>) -> Result<()> {
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            if let Event::Resize(cols, rows) = ev {
                debug!(cols, rows, "terminal resized");
                self.renderer.resize(cols, rows);
                continue;
            }
            if let Some(input) = map_event(&ev) {
                queue.push_back(input);
            }
        }
        Ok(())
    }

    fn present<R: Rng>(&mut self, game: &Game<R>, events: &[GameEvent], now_ms: u64) -> Result<()> {
        #[cfg(feature = "sound")]
        if let Some(sound) = &self.sound {
            for e in events {
                sound.play(e);
            }
        }
        #[cfg(not(feature = "sound"))]
        let _ = events;

        self.renderer.draw(game, now_ms);
        let out = self.guard.out();
        self.renderer.render(out)?;
        out.flush()?;
        Ok(())
    }
}
