//! Terminal presentation: the world (screen pixels) scaled into a half-block
//! pixel buffer.

mod font;
mod pixel;

pub use font::{draw_text, draw_text_centered, text_width};
pub use pixel::{PixelBuf, Rgb};

use rand::Rng;
use std::io::{self, Write};

use crate::entity::{Obstacle, Player};
use crate::game::{Game, Phase};
use crate::geometry::Rect;

// ── Colors ──────────────────────────────────────────────────────────────────

const SKY_TOP: Rgb = Rgb(70, 180, 200);
const SKY_BOT: Rgb = Rgb(190, 232, 245);
const PIPE_L: Rgb = Rgb(74, 122, 26);
const PIPE_M: Rgb = Rgb(100, 170, 40);
const PIPE_R: Rgb = Rgb(115, 191, 46);
const PIPE_HI: Rgb = Rgb(145, 215, 62);
const CAP_DARK: Rgb = Rgb(60, 100, 20);
const BIRD_Y: Rgb = Rgb(245, 200, 66);
const BIRD_HI: Rgb = Rgb(255, 225, 100);
const BIRD_WING: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(20, 20, 20);
const BIRD_BEAK: Rgb = Rgb(225, 75, 35);
const HILL_FAR: Rgb = Rgb(120, 195, 75);
const HILL_NEAR: Rgb = Rgb(95, 175, 55);
const PANEL: Rgb = Rgb(210, 185, 110);
const PANEL_IN: Rgb = Rgb(220, 195, 120);
const WHITE: Rgb = Rgb(255, 255, 255);
const RED: Rgb = Rgb(230, 40, 40);
const SHADOW: Rgb = Rgb(30, 30, 30);

/// Wing offset per animation frame.
const WING_OFFSETS: [i32; 4] = [-1, 0, 1, 0];

// ── Scene ───────────────────────────────────────────────────────────────────

/// Maps world coordinates onto the buffer and draws one frame.
pub struct Renderer {
    buf: PixelBuf,
    world_w: f32,
    world_h: f32,
    scroll: f64,
}

impl Renderer {
    pub fn new(cols: u16, rows: u16, world_w: f32, world_h: f32) -> Self {
        Self {
            buf: PixelBuf::for_terminal(cols, rows),
            world_w,
            world_h,
            scroll: 0.0,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.buf.resize(cols as usize, rows as usize * 2);
    }

    pub fn buffer(&self) -> &PixelBuf {
        &self.buf
    }

    fn sx(&self) -> f32 {
        self.buf.width() as f32 / self.world_w
    }

    fn sy(&self) -> f32 {
        self.buf.height() as f32 / self.world_h
    }

    /// World rectangle to buffer `(x, y, w, h)`, at least one pixel each way.
    fn project(&self, r: &Rect) -> (i32, i32, i32, i32) {
        let (sx, sy) = (self.sx(), self.sy());
        let x0 = (r.left() * sx).round() as i32;
        let y0 = (r.top() * sy).round() as i32;
        let x1 = (r.right() * sx).round() as i32;
        let y1 = (r.bottom() * sy).round() as i32;
        (x0, y0, (x1 - x0).max(1), (y1 - y0).max(1))
    }

    /// Glyph scale that keeps HUD text legible on big terminals.
    fn text_scale(&self) -> i32 {
        (self.buf.height() as i32 / 60).max(1)
    }

    pub fn draw<R: Rng>(&mut self, game: &Game<R>, now_ms: u64) {
        if game.phase() == Phase::Playing {
            self.scroll += f64::from(game.tunables().speed * self.sx());
        }

        self.draw_sky();
        self.draw_hills();
        for o in game.obstacles() {
            self.draw_pipe(o);
        }
        self.draw_bird(game.player());
        self.draw_time(game.elapsed_secs(now_ms));

        if game.phase() == Phase::GameOver {
            self.draw_game_over(game.elapsed_secs(now_ms));
        }
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        self.buf.render(out)
    }

    fn draw_sky(&mut self) {
        let (w, h) = (self.buf.width(), self.buf.height());
        for y in 0..h {
            let t = (y * 256 / h.max(1)) as u16;
            let c = Rgb::lerp(SKY_TOP, SKY_BOT, t);
            for x in 0..w {
                self.buf.set(x as i32, y as i32, c);
            }
        }
    }

    fn draw_hills(&mut self) {
        let base = self.buf.height() as i32;
        let s = f64::from(self.sy()) * 8.0;
        let layers = [(HILL_FAR, 0.2, 0.04, 6.0, 1.7, 3.0, 4.0), (HILL_NEAR, 0.4, 0.06, 4.0, 2.3, 2.0, 2.0)];
        for (color, parallax, freq, amp1, mul2, amp2, lift) in layers {
            for x in 0..self.buf.width() as i32 {
                let fx = (f64::from(x) + self.scroll * parallax) * freq;
                let h = (fx.sin() * amp1 + (fx * mul2).sin() * amp2 + lift) * s;
                for y in (base - h as i32)..base {
                    self.buf.set(x, y, color);
                }
            }
        }
    }

    fn draw_pipe(&mut self, pipe: &Obstacle) {
        let (px, py, pw, ph) = self.project(&pipe.rect);
        let cap_extra = (pw / 8).max(1);
        let cap_h = ((30.0 * self.sy()).round() as i32).clamp(1, ph);

        for x in 0..pw {
            let c = pipe_shade(x, pw);
            for y in py..py + ph {
                self.buf.set(px + x, y, c);
            }
        }

        // The cap sits on the gap side.
        let cap_y = if pipe.flipped { py + ph - cap_h } else { py };
        let total = pw + cap_extra * 2;
        for x in -cap_extra..(pw + cap_extra) {
            let c = pipe_shade(x + cap_extra, total);
            for y in cap_y..cap_y + cap_h {
                self.buf.set(px + x, y, c);
            }
            self.buf.set(px + x, cap_y, CAP_DARK);
            self.buf.set(px + x, cap_y + cap_h - 1, CAP_DARK);
        }
    }

    fn draw_bird(&mut self, player: &Player) {
        let (x, y, w, h) = self.project(&player.rect);
        let cx = x + w / 2;
        let cy = y + h / 2;
        let s = f64::from(h) / 4.0;

        let tilt = (f64::from(player.velocity_y) / 12.0).clamp(-1.0, 1.0) as i32;

        // Body
        let bw = (w / 2).max(1);
        let bh = (h / 2).max(1);
        self.buf.fill_rect(cx - bw, cy - bh, bw * 2, bh * 2, BIRD_Y);
        self.buf
            .fill_rect(cx - bw + 1, cy - bh, (bw * 2 - 2).max(1), 1, BIRD_HI);

        // Wing
        let wing_y = WING_OFFSETS[player.frame() as usize % WING_OFFSETS.len()];
        let wing_w = (1.5 * s).max(1.0) as i32;
        let wing_h = (s * 0.8).max(1.0) as i32;
        self.buf
            .fill_rect(cx - bw + 1, cy + wing_y + tilt, wing_w, wing_h, BIRD_WING);

        // Eye
        let eye = (0.6 * s).max(1.0) as i32;
        let ex = cx + bw - eye - 1;
        let ey = cy - bh + 1;
        self.buf.fill_rect(ex, ey, eye, eye, BIRD_EYE);
        self.buf.set(ex + eye - 1, ey + eye - 1, BIRD_PUPIL);

        // Beak
        let beak_w = (s * 0.8).max(1.0) as i32;
        self.buf
            .fill_rect(cx + bw, cy + tilt, beak_w, (bh / 2).max(1), BIRD_BEAK);
    }

    fn draw_time(&mut self, secs: u64) {
        let scale = self.text_scale();
        let text = format!("TIME {secs}");
        draw_text(&mut self.buf, 2 * scale, 2 * scale, &text, WHITE, SHADOW, scale);
    }

    fn draw_game_over(&mut self, secs: u64) {
        self.buf.dim_all();

        let scale = self.text_scale();
        let title = "GAME OVER";
        let cx = self.buf.width() as i32 / 2;
        let cy = self.buf.height() as i32 / 2;
        let panel_w = text_width(title, scale) + 6 * scale;
        let panel_h = 20 * scale;
        let px = cx - panel_w / 2;
        let py = cy - panel_h / 2;

        self.buf
            .fill_rect(px - 1, py - 1, panel_w + 2, panel_h + 2, SHADOW);
        self.buf.fill_rect(px, py, panel_w, panel_h, PANEL);
        self.buf
            .fill_rect(px + 1, py + 1, panel_w - 2, panel_h - 2, PANEL_IN);

        draw_text_centered(&mut self.buf, cx, py + 3 * scale, title, RED, SHADOW, scale);
        draw_text_centered(&mut self.buf, cx, py + 11 * scale, &secs.to_string(), WHITE, SHADOW, scale);
    }
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}
