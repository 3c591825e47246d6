use egui::emath::easing;

/// Default duration of an animated snap, in seconds.
pub const DEFAULT_SNAP_SECS: f32 = 0.4;

/// An eased move of the displayed position from one value to another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    from: f32,
    to: f32,
    start: f64,
    duration: f32,
}

impl Transition {
    pub fn new(from: f32, to: f32, start: f64, duration: f32) -> Self {
        Self {
            from,
            to,
            start,
            duration: duration.max(0.0),
        }
    }

    fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / f64::from(self.duration)).clamp(0.0, 1.0) as f32
    }

    /// Displayed value at time `now` (seconds, same clock as `start`).
    pub fn value_at(&self, now: f64) -> f32 {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * easing::cubic_out(t)
    }

    pub fn is_finished(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }
}
