use fundsp::prelude::*;
use rodio::{OutputStream, OutputStreamHandle, Sink, buffer::SamplesBuffer};
use tracing::warn;

use crate::game::GameEvent;

const SAMPLE_RATE: u32 = 44_100;

/// Short synthesized effects on the default output device.
pub struct Sound {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl Sound {
    /// Opens the default device; `None` (and a warning) when there is none.
    pub fn open() -> Option<Self> {
        match OutputStream::try_default() {
            Ok((stream, handle)) => Some(Self {
                _stream: stream,
                handle,
            }),
            Err(e) => {
                warn!(error = %e, "no audio output, running silent");
                None
            }
        }
    }

    pub fn play(&self, event: &GameEvent) {
        match event {
            GameEvent::Flapped => self.play_samples(flap()),
            GameEvent::Crashed => self.play_samples(crash()),
            _ => {}
        }
    }

    fn play_samples(&self, samples: Vec<f32>) {
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
                sink.detach();
            }
            Err(e) => warn!(error = %e, "could not start sound"),
        }
    }
}

fn sample_count(secs: f32) -> usize {
    (SAMPLE_RATE as f32 * secs).round() as usize
}

// Rising sine chirp, 600Hz to 900Hz.
fn flap() -> Vec<f32> {
    let freq = lfo(|t: f32| lerp(600.0, 900.0, (t / 0.08).min(1.0)));
    let gain = lfo(|t: f32| lerp(0.12, 0.0, (t / 0.1).min(1.0)));
    let mut sound = (freq >> sine()) * gain;
    sound.set_sample_rate(f64::from(SAMPLE_RATE));
    (0..sample_count(0.1)).map(|_| sound.get_mono()).collect()
}

// Falling sawtooth, 400Hz to 80Hz.
fn crash() -> Vec<f32> {
    let freq = lfo(|t: f32| lerp(400.0, 80.0, (t / 0.4).min(1.0)));
    let gain = lfo(|t: f32| lerp(0.15, 0.0, (t / 0.5).min(1.0)));
    let mut sound = (freq >> saw()) * gain;
    sound.set_sample_rate(f64::from(SAMPLE_RATE));
    (0..sample_count(0.5)).map(|_| sound.get_mono()).collect()
}
