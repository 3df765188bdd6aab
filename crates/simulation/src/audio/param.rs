//! Automation timeline for a single audio parameter.
//!
//! Parameters are not rendered sample by sample; instead each one keeps a
//! time-ordered list of scheduled changes and can be evaluated at any time.
//! The sound backend consumes the schedule, tests evaluate it directly.

/// One scheduled change on an [`AudioParam`] timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Automation {
    /// Jump to `value` at `time`.
    Set { value: f32, time: f64 },
    /// Linear ramp from the previous event's value, reaching `value` at `time`.
    LinearRamp { value: f32, time: f64 },
    /// Exponential ramp from the previous event's value, reaching `value` at `time`.
    ExponentialRamp { value: f32, time: f64 },
    /// Exponential approach towards `target` starting at `time`.
    Target {
        target: f32,
        time: f64,
        time_constant: f64,
    },
}

impl Automation {
    pub fn time(&self) -> f64 {
        match *self {
            Automation::Set { time, .. }
            | Automation::LinearRamp { time, .. }
            | Automation::ExponentialRamp { time, .. }
            | Automation::Target { time, .. } => time,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TargetCurve {
    target: f32,
    start: f64,
    time_constant: f64,
}

impl TargetCurve {
    fn value_at(self, from: f32, time: f64) -> f32 {
        if self.time_constant <= 0.0 {
            return self.target;
        }
        let elapsed = (time - self.start).max(0.0);
        let k = (-elapsed / self.time_constant).exp() as f32;
        self.target + (from - self.target) * k
    }
}

#[derive(Debug, Clone)]
pub struct AudioParam {
    default_value: f32,
    events: Vec<Automation>,
}

impl AudioParam {
    pub fn new(default_value: f32) -> Self {
        Self {
            default_value,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[Automation] {
        &self.events
    }

    /// Insert keeping time order; equal times keep scheduling order.
    fn schedule(&mut self, event: Automation) {
        let at = event.time();
        let idx = self.events.partition_point(|e| e.time() <= at);
        self.events.insert(idx, event);
    }

    pub fn set_value_at_time(&mut self, value: f32, time: f64) {
        self.schedule(Automation::Set { value, time });
    }

    pub fn linear_ramp_to_value_at_time(&mut self, value: f32, time: f64) {
        self.schedule(Automation::LinearRamp { value, time });
    }

    pub fn exponential_ramp_to_value_at_time(&mut self, value: f32, time: f64) {
        self.schedule(Automation::ExponentialRamp { value, time });
    }

    pub fn set_target_at_time(&mut self, target: f32, time: f64, time_constant: f64) {
        self.schedule(Automation::Target {
            target,
            time,
            time_constant,
        });
    }

    /// Drop every event scheduled at or after `time`.
    pub fn cancel_scheduled_values(&mut self, time: f64) {
        self.events.retain(|e| e.time() < time);
    }

    /// Freeze the parameter at whatever it evaluates to at `time` and forget
    /// the rest of the timeline. Keeps the event list bounded on reused voices.
    pub fn hold_at(&mut self, time: f64) -> f32 {
        let value = self.value_at(time);
        self.events.clear();
        self.set_value_at_time(value, time);
        value
    }

    pub fn value_at(&self, time: f64) -> f32 {
        let mut value = self.default_value;
        let mut anchor = 0.0_f64;
        let mut curve: Option<TargetCurve> = None;

        for event in &self.events {
            let at = event.time();
            if at > time {
                return match *event {
                    Automation::LinearRamp { value: end, time: end_time } => {
                        let t = ramp_progress(anchor, end_time, time);
                        value + (end - value) * t
                    }
                    Automation::ExponentialRamp { value: end, time: end_time } => {
                        let t = ramp_progress(anchor, end_time, time);
                        exponential_interp(value, end, t)
                    }
                    _ => curve.map_or(value, |c| c.value_at(value, time)),
                };
            }
            if let Some(c) = curve.take() {
                value = c.value_at(value, at);
            }
            match *event {
                Automation::Set { value: v, .. }
                | Automation::LinearRamp { value: v, .. }
                | Automation::ExponentialRamp { value: v, .. } => value = v,
                Automation::Target {
                    target,
                    time_constant,
                    ..
                } => {
                    curve = Some(TargetCurve {
                        target,
                        start: at,
                        time_constant,
                    });
                }
            }
            anchor = at;
        }

        curve.map_or(value, |c| c.value_at(value, time))
    }
}

fn ramp_progress(start: f64, end: f64, time: f64) -> f32 {
    if end <= start {
        return 1.0;
    }
    ((time - start) / (end - start)).clamp(0.0, 1.0) as f32
}

/// Geometric interpolation; holds `from` when the endpoints are not both
/// strictly positive or both strictly negative.
fn exponential_interp(from: f32, to: f32, t: f32) -> f32 {
    if from == 0.0 || to == 0.0 || (from < 0.0) != (to < 0.0) {
        return from;
    }
    from * (to / from).powf(t)
}
