use super::param::AudioParam;
use super::request::Waveform;

/// C2, under everything else in the town.
pub const DRONE_PITCH: f32 = 65.41;
pub const DRONE_GAIN_PER_BUILDING: f32 = 0.003;
pub const DRONE_MAX_GAIN: f32 = 0.04;
const DRONE_RISE_TIME_CONSTANT: f64 = 1.5;
const DRONE_FALL_TIME_CONSTANT: f64 = 0.8;

/// Low sustained tone whose level follows how built-up the town is.
///
/// Created the first time a building exists and never torn down; with no
/// buildings it fades to silence instead.
#[derive(Debug, Clone)]
pub struct AmbientDrone {
    pub waveform: Waveform,
    pub frequency: f32,
    pub gain: AudioParam,
}

impl Default for AmbientDrone {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            frequency: DRONE_PITCH,
            gain: AudioParam::new(0.0),
        }
    }
}

impl AmbientDrone {
    pub fn target_gain(building_count: usize) -> f32 {
        (building_count as f32 * DRONE_GAIN_PER_BUILDING).min(DRONE_MAX_GAIN)
    }

    /// Glide towards the level for `building_count` starting at `now`.
    pub fn retarget(&mut self, building_count: usize, now: f64) {
        self.gain.hold_at(now);
        let (target, tau) = if building_count == 0 {
            (0.0, DRONE_FALL_TIME_CONSTANT)
        } else {
            (Self::target_gain(building_count), DRONE_RISE_TIME_CONSTANT)
        };
        self.gain.set_target_at_time(target, now, tau);
    }
}
