//! Outbound seams of the timer: the render callback and the alarm sound

/// Receives the remaining time on every qualifying tick
pub trait Render: Send + Sync {
    fn render(&self, hours: i64, minutes: i64, seconds: i64);
}

impl<F> Render for F
where
    F: Fn(i64, i64, i64) + Send + Sync,
{
    fn render(&self, hours: i64, minutes: i64, seconds: i64) {
        self(hours, minutes, seconds)
    }
}

/// Plays one alarm sound. Fire-and-forget: failures stay with the implementor.
pub trait AlarmSound: Send + Sync {
    fn play(&self);
}
