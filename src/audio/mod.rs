//! Playback service — chord strums and metronome clicks through cpal.
//!
//! The engine talks to a [`Playback`] implementation and never learns
//! whether sound actually came out: failures are advisory. [`CpalPlayer`]
//! owns the cpal output stream and communicates with its audio thread via a
//! lock-free ring buffer; [`NullPlayback`] is the silent stand-in used when
//! no output device is available or audio is disabled.

pub mod callback;
pub mod synth;

use std::collections::HashMap;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::{
    traits::{Producer, Split},
    HeapRb,
};

use crate::catalog::ChordDefinition;
use callback::AudioCallback;

/// Ring buffer capacity (number of commands).
const RING_BUFFER_CAPACITY: usize = 64;

/// Metronome click frequencies: accented downbeat and regular beat.
const CLICK_ACCENT_HZ: f64 = 1200.0;
const CLICK_BEAT_HZ: f64 = 800.0;

/// Commands sent from the main thread to the audio thread via ring buffer.
#[derive(Debug)]
pub enum AudioCommand {
    /// Start playing a mono sample buffer as a new voice.
    Play(Vec<f32>),
    /// Set master volume (0.0 to 1.0).
    SetVolume(f32),
    /// Stop all voices.
    Stop,
}

/// Errors building the audio engine.
#[derive(Debug)]
pub enum AudioError {
    /// No audio output device found.
    NoOutputDevice,
    /// Failed to query device configuration.
    DeviceConfig(String),
    /// Failed to build the audio stream.
    StreamBuild(String),
    /// Failed to start the audio stream.
    StreamPlay(String),
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::NoOutputDevice => write!(f, "no audio output device found"),
            AudioError::DeviceConfig(e) => write!(f, "device config error: {e}"),
            AudioError::StreamBuild(e) => write!(f, "stream build error: {e}"),
            AudioError::StreamPlay(e) => write!(f, "stream play error: {e}"),
        }
    }
}

impl std::error::Error for AudioError {}

/// A playback request that could not be carried out. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The command ring buffer is full — audio thread is not draining.
    QueueFull,
}

impl std::fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackError::QueueFull => write!(f, "audio command queue is full"),
        }
    }
}

impl std::error::Error for PlaybackError {}

/// The playback capability the session engine holds.
///
/// Both operations are fire-and-forget: a `PlaybackError` is reported to
/// the UI layer and never alters session state.
pub trait Playback {
    /// Request a strum of the given chord.
    fn play_chord(&mut self, chord: &ChordDefinition) -> Result<(), PlaybackError>;

    /// Request a metronome click; `accent` marks the downbeat.
    fn play_click(&mut self, accent: bool) -> Result<(), PlaybackError>;
}

/// Silent playback used when audio is absent or disabled. Always succeeds.
#[derive(Debug, Default)]
pub struct NullPlayback;

impl Playback for NullPlayback {
    fn play_chord(&mut self, _chord: &ChordDefinition) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn play_click(&mut self, _accent: bool) -> Result<(), PlaybackError> {
        Ok(())
    }
}

/// Real playback through the default cpal output device.
///
/// Strum buffers are synthesized on demand and cached per chord name; click
/// buffers are generated once up front.
pub struct CpalPlayer {
    _stream: cpal::Stream,
    producer: ringbuf::HeapProd<AudioCommand>,
    sample_rate: u32,
    seed: u64,
    strum_cache: HashMap<&'static str, Vec<f32>>,
    click_accent: Vec<f32>,
    click_beat: Vec<f32>,
}

impl CpalPlayer {
    /// Create and start the player on the default output device.
    pub fn new(volume: f32, seed: u64) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;

        let config = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceConfig(e.to_string()))?;
        let sample_rate = config.sample_rate().0;
        let channels = config.channels();

        let rb = HeapRb::<AudioCommand>::new(RING_BUFFER_CAPACITY);
        let (producer, consumer) = rb.split();
        let mut audio_callback = AudioCallback::new(consumer, channels, volume);

        let stream_config = cpal::StreamConfig {
            channels,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let err_fn = |err: cpal::StreamError| {
            eprintln!("audio stream error: {err}");
        };

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _| audio_callback.process(data),
                err_fn,
                None,
            )
            .map_err(|e| AudioError::StreamBuild(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamPlay(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            producer,
            sample_rate,
            seed,
            strum_cache: HashMap::new(),
            click_accent: synth::generate_click(CLICK_ACCENT_HZ, sample_rate),
            click_beat: synth::generate_click(CLICK_BEAT_HZ, sample_rate),
        })
    }

    fn send(&mut self, cmd: AudioCommand) -> Result<(), PlaybackError> {
        self.producer
            .try_push(cmd)
            .map_err(|_| PlaybackError::QueueFull)
    }
}

impl Playback for CpalPlayer {
    fn play_chord(&mut self, chord: &ChordDefinition) -> Result<(), PlaybackError> {
        let (sample_rate, seed) = (self.sample_rate, self.seed);
        let buf = self
            .strum_cache
            .entry(chord.name)
            .or_insert_with(|| synth::generate_strum(chord, sample_rate, seed))
            .clone();
        self.send(AudioCommand::Play(buf))
    }

    fn play_click(&mut self, accent: bool) -> Result<(), PlaybackError> {
        let buf = if accent {
            self.click_accent.clone()
        } else {
            self.click_beat.clone()
        };
        self.send(AudioCommand::Play(buf))
    }
}
