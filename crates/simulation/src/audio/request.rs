use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Oscillator shape of a voice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// Per-voice filter response. `AllPass` is the flat setting used when a note
/// asks for no filtering; the stage stays in the chain either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    #[default]
    AllPass,
    LowPass,
    HighPass,
    BandPass,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub kind: FilterKind,
    /// Cutoff (or centre) frequency in Hz.
    pub cutoff: f32,
}

impl FilterSpec {
    pub const MIN_CUTOFF: f32 = 10.0;
    pub const MAX_CUTOFF: f32 = 20_000.0;

    pub const BYPASS: FilterSpec = FilterSpec {
        kind: FilterKind::AllPass,
        cutoff: Self::MAX_CUTOFF,
    };

    pub const fn new(kind: FilterKind, cutoff: f32) -> Self {
        Self { kind, cutoff }
    }
}

/// Everything a voice needs to play one note.
///
/// Sent as an event by the vehicle simulation and consumed in order by the
/// voice dispatcher. Unset sends fall back to the active effect preset, an
/// unset onset plays immediately.
#[derive(Event, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRequest {
    pub waveform: Waveform,
    /// Oscillator frequency in Hz.
    pub pitch: f32,
    /// Seconds from peak to silence.
    pub decay: f32,
    /// Amplitude multiplier on the voice base level.
    pub velocity: f32,
    /// Seconds from onset to peak; 0 starts at peak.
    pub attack: f32,
    pub filter: Option<FilterSpec>,
    pub send_delay: Option<f32>,
    pub send_reverb: Option<f32>,
    /// Absolute audio-clock time the note should start at.
    pub onset: Option<f64>,
}

impl Default for NoteRequest {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            pitch: 440.0,
            decay: 0.5,
            velocity: 1.0,
            attack: 0.0,
            filter: None,
            send_delay: None,
            send_reverb: None,
            onset: None,
        }
    }
}

impl NoteRequest {
    pub fn new(waveform: Waveform, pitch: f32) -> Self {
        Self {
            waveform,
            pitch,
            ..default()
        }
    }

    pub fn with_envelope(mut self, attack: f32, decay: f32) -> Self {
        self.attack = attack;
        self.decay = decay;
        self
    }

    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_sends(mut self, delay: f32, reverb: f32) -> Self {
        self.send_delay = Some(delay);
        self.send_reverb = Some(reverb);
        self
    }

    pub fn at(mut self, onset: f64) -> Self {
        self.onset = Some(onset);
        self
    }

    /// Replace values a voice cannot play with the defaults and clamp the rest
    /// into range.
    pub fn sanitized(&self) -> NoteRequest {
        let defaults = NoteRequest::default();
        let positive = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };
        let non_negative = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let unit = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };

        NoteRequest {
            waveform: self.waveform,
            pitch: positive(self.pitch, defaults.pitch),
            decay: positive(self.decay, defaults.decay),
            velocity: if self.velocity.is_finite() {
                self.velocity.max(0.0)
            } else {
                defaults.velocity
            },
            attack: non_negative(self.attack),
            filter: self.filter.map(|f| FilterSpec {
                kind: f.kind,
                cutoff: if f.cutoff.is_finite() {
                    f.cutoff.clamp(FilterSpec::MIN_CUTOFF, FilterSpec::MAX_CUTOFF)
                } else {
                    FilterSpec::MAX_CUTOFF
                },
            }),
            send_delay: self.send_delay.map(unit),
            send_reverb: self.send_reverb.map(unit),
            onset: self.onset.filter(|t| t.is_finite()),
        }
    }
}
