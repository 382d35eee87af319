//! Audio callback — runs on the cpal audio thread.
//!
//! Drains commands from the ring buffer, mixes active voices into the
//! output, and applies master volume plus a hard ceiling.

use ringbuf::traits::Consumer;
use ringbuf::HeapCons;

use super::AudioCommand;

/// Hard output ceiling; anything louder is clamped.
const CEILING: f32 = 0.95;

/// Concurrent voice limit. The oldest voice is evicted when exceeded.
const MAX_VOICES: usize = 8;

/// A playing mono buffer and its read position.
struct Voice {
    samples: Vec<f32>,
    pos: usize,
}

/// State that lives on the audio thread. Accessed only from the cpal callback.
pub struct AudioCallback {
    consumer: HeapCons<AudioCommand>,
    voices: Vec<Voice>,
    volume: f32,
    channels: u16,
}

impl AudioCallback {
    /// Create a new audio callback with the given ring buffer consumer.
    pub fn new(consumer: HeapCons<AudioCommand>, channels: u16, volume: f32) -> Self {
        Self {
            consumer,
            voices: Vec::new(),
            volume: volume.clamp(0.0, 1.0),
            channels,
        }
    }

    /// Called by cpal for each output block. Fills `output` with samples.
    pub fn process(&mut self, output: &mut [f32]) {
        while let Some(cmd) = self.consumer.try_pop() {
            match cmd {
                AudioCommand::Play(samples) => {
                    if self.voices.len() >= MAX_VOICES {
                        self.voices.remove(0);
                    }
                    self.voices.push(Voice { samples, pos: 0 });
                }
                AudioCommand::SetVolume(v) => {
                    self.volume = v.clamp(0.0, 1.0);
                }
                AudioCommand::Stop => {
                    self.voices.clear();
                }
            }
        }

        let channels = self.channels as usize;
        for frame in output.chunks_mut(channels) {
            let mut sum = 0.0_f32;
            for voice in &mut self.voices {
                if voice.pos < voice.samples.len() {
                    sum += voice.samples[voice.pos];
                    voice.pos += 1;
                }
            }
            let sample = (sum * self.volume).clamp(-CEILING, CEILING);
            for out in frame {
                *out = sample;
            }
        }

        self.voices.retain(|v| v.pos < v.samples.len());
    }
}
