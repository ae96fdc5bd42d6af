use std::time::{Duration, Instant};

const REPORT_WINDOW: Duration = Duration::from_secs(1);

#[derive(Copy, Clone, Debug)]
pub struct FrameReport {
    pub frames: u32,
    pub fps: f32,
    pub avg_frame_ms: f32,
}

/// Minimal frame timer. `tick` returns the time since the previous tick
/// and folds a once-per-second profiling summary on the side.
pub struct FrameClock {
    last: Instant,
    window_start: Instant,
    frames: u32,
    report: Option<FrameReport>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            last: now,
            window_start: now,
            frames: 0,
            report: None,
        }
    }

    pub fn tick(&mut self) -> Duration {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> Duration {
        let dt = now.saturating_duration_since(self.last);
        self.last = now;
        self.frames += 1;

        let window = now.saturating_duration_since(self.window_start);
        if window >= REPORT_WINDOW {
            let secs = window.as_secs_f32();
            self.report = Some(FrameReport {
                frames: self.frames,
                fps: self.frames as f32 / secs,
                avg_frame_ms: secs * 1000.0 / self.frames as f32,
            });
            self.frames = 0;
            self.window_start = now;
        }

        dt
    }

    pub fn take_report(&mut self) -> Option<FrameReport> {
        self.report.take()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_measures_elapsed_time() {
        let base = Instant::now();
        let mut clock = FrameClock::starting_at(base);

        let dt = clock.tick_at(base + Duration::from_millis(16));
        assert_eq!(dt, Duration::from_millis(16));

        let dt = clock.tick_at(base + Duration::from_millis(48));
        assert_eq!(dt, Duration::from_millis(32));

        assert!(clock.take_report().is_none());
    }

    #[test]
    fn report_folds_once_per_second() {
        let base = Instant::now();
        let mut clock = FrameClock::starting_at(base);
        let mut now = base;

        for _ in 0..50 {
            now += Duration::from_millis(20);
            clock.tick_at(now);
        }

        let report = clock.take_report().expect("one second elapsed");
        assert_eq!(report.frames, 50);
        assert!((report.fps - 50.0).abs() < 0.5);
        assert!((report.avg_frame_ms - 20.0).abs() < 0.5);

        // Window restarts after a report.
        assert!(clock.take_report().is_none());
        now += Duration::from_millis(20);
        clock.tick_at(now);
        assert!(clock.take_report().is_none());
    }

    #[test]
    fn backwards_time_yields_zero_delta() {
        let base = Instant::now() + Duration::from_secs(10);
        let mut clock = FrameClock::starting_at(base);

        let dt = clock.tick_at(base - Duration::from_secs(1));
        assert_eq!(dt, Duration::ZERO);
    }
}
