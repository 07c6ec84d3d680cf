use log::info;
use std::time::{Duration, Instant};

/// Sliding-window frame time measurer with a throttled FPS report: samples
/// every presented frame, logs at most once per reporting interval.
pub(crate) struct FrameStatistics {
    frame_time_window: Vec<Duration>,
    next_sample_position: usize,
    last_frame_mark: Instant,

    report_interval: Duration,
    last_report_mark: Instant,
}

impl FrameStatistics {
    #[must_use]
    pub(crate) fn new(window_size: usize, report_interval: Duration) -> Self {
        assert!(window_size > 0);
        let now = Instant::now();
        Self {
            frame_time_window: vec![Duration::ZERO; window_size],
            next_sample_position: 0,
            last_frame_mark: now,
            report_interval,
            last_report_mark: now,
        }
    }

    /// Forgets the time passed since the last frame. Call after a pause,
    /// like a resize, so the first delta does not include the stall.
    pub(crate) fn restart(&mut self) {
        self.last_frame_mark = Instant::now();
    }

    pub(crate) fn frame_presented(&mut self) {
        let now = Instant::now();
        self.frame_time_window[self.next_sample_position] = now.duration_since(self.last_frame_mark);
        self.next_sample_position = (self.next_sample_position + 1) % self.frame_time_window.len();
        self.last_frame_mark = now;

        if now.duration_since(self.last_report_mark) > self.report_interval {
            info!("CPU observed FPS: {}", self.frames_per_second());
            self.last_report_mark = now;
        }
    }

    #[must_use]
    pub(crate) fn average_frame_time(&self) -> Duration {
        let total: Duration = self.frame_time_window.iter().sum();
        total / self.frame_time_window.len() as u32
    }

    #[must_use]
    pub(crate) fn frames_per_second(&self) -> f32 {
        let average = self.average_frame_time();
        if average.is_zero() {
            return 0.0;
        }
        1.0 / average.as_secs_f32()
    }
}
