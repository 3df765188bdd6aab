use super::param::AudioParam;
use super::request::{FilterSpec, Waveform};

/// Gain below which a voice is treated as inaudible.
pub const SILENCE_THRESHOLD: f32 = 1e-3;

/// One reusable slot of the voice pool: oscillator -> filter -> envelope,
/// with the envelope output tapped into two effect sends.
///
/// The chain topology never changes after construction; a note only rewrites
/// parameters and automation.
#[derive(Debug, Clone)]
pub struct Voice {
    pub waveform: Waveform,
    pub frequency: AudioParam,
    pub filter: FilterSpec,
    pub gain: AudioParam,
    pub delay_send: AudioParam,
    pub reverb_send: AudioParam,
    /// Audio-clock time after which the current note is inaudible.
    pub busy_until: f64,
    /// Whether the send taps have been wired into the shared busses.
    pub sends_connected: bool,
}

impl Default for Voice {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            frequency: AudioParam::new(440.0),
            filter: FilterSpec::BYPASS,
            gain: AudioParam::new(0.0),
            delay_send: AudioParam::new(0.0),
            reverb_send: AudioParam::new(0.0),
            busy_until: 0.0,
            sends_connected: false,
        }
    }
}

impl Voice {
    pub fn is_idle(&self, now: f64) -> bool {
        self.busy_until <= now
    }

    pub fn is_audible(&self, time: f64) -> bool {
        self.gain.value_at(time) > SILENCE_THRESHOLD
    }
}
