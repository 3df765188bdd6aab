//! The voice pool: allocation, stealing, envelope scheduling and send routing.

use bevy::prelude::*;

use super::drone::AmbientDrone;
use super::effects::{eighth_note_seconds, EffectsChain};
use super::request::{FilterSpec, NoteRequest};
use super::voice::Voice;
use crate::config::MAX_VOICES;

/// Voice level at velocity 1.0.
pub const BASE_LEVEL: f32 = 0.4;
/// Floor a stolen voice is pulled down to before it is reused.
pub const STEAL_FLOOR: f32 = 1e-4;
/// Length of the fade applied to a voice that is stolen mid-note.
pub const STEAL_RAMP_SECONDS: f64 = 0.005;
/// Start/end level of the amplitude envelope (exponential ramps cannot hit 0).
pub const ENVELOPE_FLOOR: f32 = 1e-3;
/// Gap between the end of the decay ramp and the hard zero.
pub const NOTE_OFF_GAP: f64 = 0.05;
/// Extra time a voice stays reserved after its decay, for the release tail.
pub const GUARD_BAND_SECONDS: f64 = 0.1;

pub const MASTER_GAIN: f32 = 0.8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DeviceState {
    #[default]
    Uninitialized,
    Running,
    Suspended,
}

/// The sound output facility: its state and its own clock.
///
/// The clock is the time base for note scheduling and keeps running while
/// the simulation is paused, so notes already scheduled play out.
#[derive(Debug, Clone, Default)]
pub struct OutputDevice {
    state: DeviceState,
    current_time: f64,
}

impl OutputDevice {
    pub fn state(&self) -> DeviceState {
        self.state
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn is_ready(&self) -> bool {
        self.state == DeviceState::Running
    }
}

/// Result of a successful [`VoiceEngine::trigger`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledNote {
    pub voice: usize,
    pub onset: f64,
    pub stolen: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct VoiceEngine {
    device: OutputDevice,
    capacity: usize,
    voices: Vec<Voice>,
    effects: Option<EffectsChain>,
    drone: Option<AmbientDrone>,
    master_gain: f32,
    steals: u64,
}

impl Default for VoiceEngine {
    fn default() -> Self {
        Self::with_capacity(MAX_VOICES)
    }
}

impl VoiceEngine {
    /// An engine whose pool will hold `capacity` voices once initialized.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            device: OutputDevice::default(),
            capacity: capacity.max(1),
            voices: Vec::new(),
            effects: None,
            drone: None,
            master_gain: MASTER_GAIN,
            steals: 0,
        }
    }

    /// Open the output device and build the pool and effect chain.
    /// Calling it again is a no-op.
    pub fn init(&mut self, bpm: f32) {
        if self.device.state != DeviceState::Uninitialized {
            return;
        }
        self.voices = (0..self.capacity).map(|_| Voice::default()).collect();
        self.effects = Some(EffectsChain::new(bpm));
        self.device.state = DeviceState::Running;
        info!(
            "Voice engine running with {} voices at t={:.3}",
            self.capacity, self.device.current_time
        );
    }

    pub fn suspend(&mut self) {
        if self.device.state == DeviceState::Running {
            self.device.state = DeviceState::Suspended;
        }
    }

    pub fn resume(&mut self) {
        if self.device.state == DeviceState::Suspended {
            self.device.state = DeviceState::Running;
        }
    }

    pub fn is_ready(&self) -> bool {
        self.device.is_ready()
    }

    pub fn device(&self) -> &OutputDevice {
        &self.device
    }

    pub fn now(&self) -> f64 {
        self.device.current_time
    }

    /// Advance the output clock. Runs whether or not the simulation is paused.
    pub fn advance_clock(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 && self.device.state != DeviceState::Uninitialized {
            self.device.current_time += dt;
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn effects(&self) -> Option<&EffectsChain> {
        self.effects.as_ref()
    }

    pub fn effects_mut(&mut self) -> Option<&mut EffectsChain> {
        self.effects.as_mut()
    }

    pub fn master_gain(&self) -> f32 {
        self.master_gain
    }

    pub fn set_master_gain(&mut self, gain: f32) {
        if gain.is_finite() {
            self.master_gain = gain.clamp(0.0, 1.0);
        }
    }

    /// Total number of voices reassigned while still busy.
    pub fn steal_count(&self) -> u64 {
        self.steals
    }

    /// Voices whose amplitude is above the silence threshold at `time`.
    pub fn audible_voices(&self, time: f64) -> usize {
        self.voices.iter().filter(|v| v.is_audible(time)).count()
    }

    pub fn drone(&self) -> Option<&AmbientDrone> {
        self.drone.as_ref()
    }

    /// Retarget the ambient drone for the current number of buildings,
    /// creating it the first time the town has one.
    pub fn update_drone(&mut self, building_count: usize) {
        if !self.device.is_ready() {
            return;
        }
        let now = self.device.current_time;
        match self.drone.as_mut() {
            Some(drone) => drone.retarget(building_count, now),
            None if building_count > 0 => {
                let mut drone = AmbientDrone::default();
                drone.retarget(building_count, now);
                self.drone = Some(drone);
            }
            None => {}
        }
    }

    /// Re-derive the echo spacing from the tempo. No-op before init.
    pub fn sync_delay_to_tempo(&mut self, bpm: f32) {
        if let Some(effects) = self.effects.as_mut() {
            effects.set_delay_time(eighth_note_seconds(bpm));
        }
    }

    /// Index of the voice the next note would use: the first idle voice, or
    /// the one whose note finishes earliest.
    pub fn select_voice(&self) -> Option<usize> {
        let now = self.device.current_time;
        if let Some(idle) = self.voices.iter().position(|v| v.is_idle(now)) {
            return Some(idle);
        }
        self.voices
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, v)| match best {
                Some((_, busy)) if busy <= v.busy_until => best,
                _ => Some((i, v.busy_until)),
            })
            .map(|(i, _)| i)
    }

    /// Schedule one note. Silently does nothing (returns `None`) when the
    /// output device is not running.
    pub fn trigger(&mut self, request: &NoteRequest) -> Option<ScheduledNote> {
        if !self.device.is_ready() {
            return None;
        }
        let req = request.sanitized();
        let now = self.device.current_time;
        let index = self.select_voice()?;
        let default_sends = self
            .effects
            .as_ref()
            .map_or((0.0, 0.0), |fx| fx.preset().sends());

        let voice = self.voices.get_mut(index)?;
        let stolen = !voice.is_idle(now);

        // Pull whatever is still sounding down to the floor before reuse.
        let fade_end = if stolen { now + STEAL_RAMP_SECONDS } else { now };
        for param in [&mut voice.gain, &mut voice.delay_send, &mut voice.reverb_send] {
            let held = param.hold_at(now);
            if stolen {
                param.linear_ramp_to_value_at_time(STEAL_FLOOR.min(held), fade_end);
            }
        }

        let onset = req.onset.map_or(now, |t| t.max(now)).max(fade_end);

        voice.waveform = req.waveform;
        voice.frequency.hold_at(now);
        voice.frequency.set_value_at_time(req.pitch, onset);
        voice.filter = req.filter.unwrap_or(FilterSpec::BYPASS);

        let attack = f64::from(req.attack);
        let decay = f64::from(req.decay);
        let peak = BASE_LEVEL * req.velocity;
        if req.attack > 0.0 {
            voice.gain.set_value_at_time(ENVELOPE_FLOOR, onset);
            voice.gain.linear_ramp_to_value_at_time(peak, onset + attack);
        } else {
            voice.gain.set_value_at_time(peak, onset);
        }
        voice
            .gain
            .exponential_ramp_to_value_at_time(ENVELOPE_FLOOR, onset + attack + decay);
        let note_off = onset + attack + decay + NOTE_OFF_GAP;
        voice.gain.set_value_at_time(0.0, note_off);

        if !voice.sends_connected {
            if let Some(fx) = self.effects.as_mut() {
                fx.delay_input.connect(index);
                fx.reverb_input.connect(index);
                voice.sends_connected = true;
            }
        }
        let send_delay = req.send_delay.unwrap_or(default_sends.0);
        let send_reverb = req.send_reverb.unwrap_or(default_sends.1);
        voice.delay_send.set_value_at_time(send_delay, onset);
        voice.delay_send.set_value_at_time(0.0, note_off);
        voice.reverb_send.set_value_at_time(send_reverb, onset);
        voice.reverb_send.set_value_at_time(0.0, note_off);

        voice.busy_until = onset + attack + decay + GUARD_BAND_SECONDS;

        if stolen {
            self.steals += 1;
            debug!("stole voice {} at t={:.3} for onset {:.3}", index, now, onset);
        }

        Some(ScheduledNote {
            voice: index,
            onset,
            stolen,
        })
    }
}
