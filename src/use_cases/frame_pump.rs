// Frame timing: clamped per-frame delta, throttled input sampling, FPS window.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct FramePumpSettings {
    /// Upper bound on a single frame's delta.
    pub max_dt: Duration,
    /// Minimum spacing between outbound input samples.
    pub input_period: Duration,
    /// Number of instantaneous FPS samples averaged for display.
    pub fps_window: usize,
}

impl Default for FramePumpSettings {
    fn default() -> Self {
        Self {
            max_dt: Duration::from_millis(100),
            input_period: Duration::from_millis(50),
            fps_window: 60,
        }
    }
}

/// Per-frame handle passed to the tick callback.
#[derive(Debug)]
pub struct Frame {
    /// Clamped seconds since the previous frame (zero on the first frame).
    pub dt: f32,
    /// Whether the input throttle allows a sample this frame.
    pub input_due: bool,
    stop_requested: bool,
}

impl Frame {
    /// Stops the pump once the current callback returns.
    pub fn stop(&mut self) {
        self.stop_requested = true;
    }
}

#[derive(Debug)]
pub struct FramePump {
    settings: FramePumpSettings,
    running: bool,
    last_frame: Option<Instant>,
    next_input_at: Option<Instant>,
    fps_samples: VecDeque<f32>,
}

impl FramePump {
    pub fn new(settings: FramePumpSettings) -> Self {
        Self {
            settings,
            running: false,
            last_frame: None,
            next_input_at: None,
            fps_samples: VecDeque::with_capacity(settings.fps_window),
        }
    }

    /// Returns false when the pump was already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Stops the pump and forgets frame history so a restart begins at dt = 0.
    pub fn stop(&mut self) {
        self.running = false;
        self.last_frame = None;
        self.next_input_at = None;
        self.fps_samples.clear();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Records a frame at `now` and returns its clamped delta in seconds.
    /// Returns `None` while stopped.
    pub fn advance(&mut self, now: Instant) -> Option<f32> {
        if !self.running {
            return None;
        }

        let raw = match self.last_frame.replace(now) {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };

        if !raw.is_zero() {
            self.record_fps(1.0 / raw.as_secs_f32());
        }

        Some(raw.min(self.settings.max_dt).as_secs_f32())
    }

    /// Advances one frame and runs `tick` with it. The callback may stop the
    /// pump through [`Frame::stop`]; the stop takes effect after it returns.
    pub fn run_frame<F>(&mut self, now: Instant, tick: F) -> bool
    where
        F: FnOnce(&mut Frame),
    {
        let Some(dt) = self.advance(now) else {
            return false;
        };

        let mut frame = Frame {
            dt,
            input_due: self.input_due(now),
            stop_requested: false,
        };
        tick(&mut frame);

        if frame.stop_requested {
            self.stop();
        }
        true
    }

    pub fn input_due(&self, now: Instant) -> bool {
        self.next_input_at.is_none_or(|at| now >= at)
    }

    pub fn mark_input_sent(&mut self, now: Instant) {
        self.next_input_at = Some(now + self.settings.input_period);
    }

    /// Rolling average of recent instantaneous frame rates.
    pub fn average_fps(&self) -> Option<f32> {
        if self.fps_samples.is_empty() {
            return None;
        }
        let sum: f32 = self.fps_samples.iter().sum();
        Some(sum / self.fps_samples.len() as f32)
    }

    fn record_fps(&mut self, fps: f32) {
        if self.settings.fps_window == 0 {
            return;
        }
        if self.fps_samples.len() == self.settings.fps_window {
            self.fps_samples.pop_front();
        }
        self.fps_samples.push_back(fps);
    }
}

impl Default for FramePump {
    fn default() -> Self {
        Self::new(FramePumpSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn when_stopped_then_no_frame_is_produced() {
        let mut pump = FramePump::default();
        assert_eq!(pump.advance(Instant::now()), None);
        assert!(!pump.run_frame(Instant::now(), |_| panic!("must not tick")));
    }

    #[test]
    fn when_first_frame_then_dt_is_zero() {
        let mut pump = FramePump::default();
        pump.start();
        let t0 = Instant::now();
        assert_eq!(pump.advance(t0), Some(0.0));
        let dt = pump.advance(t0 + ms(16)).expect("running");
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn when_frame_stalls_then_dt_is_clamped() {
        let mut pump = FramePump::default();
        pump.start();
        let t0 = Instant::now();
        pump.advance(t0);
        let dt = pump.advance(t0 + ms(750)).expect("running");
        assert!((dt - 0.1).abs() < 1e-6);
    }

    #[test]
    fn when_started_twice_then_second_start_is_noop() {
        let mut pump = FramePump::default();
        let t0 = Instant::now();
        assert!(pump.start());
        pump.advance(t0);
        assert!(!pump.start());
        let dt = pump.advance(t0 + ms(20)).expect("running");
        assert!((dt - 0.02).abs() < 1e-6);
    }

    #[test]
    fn when_restarted_after_stop_then_no_stale_dt() {
        let mut pump = FramePump::default();
        pump.start();
        let t0 = Instant::now();
        pump.advance(t0);
        pump.stop();
        pump.start();
        assert_eq!(pump.advance(t0 + Duration::from_secs(5)), Some(0.0));
    }

    #[test]
    fn when_callback_stops_then_pump_does_not_tick_again() {
        let mut pump = FramePump::default();
        pump.start();
        let t0 = Instant::now();
        let mut ticks = 0;
        pump.run_frame(t0, |frame| {
            ticks += 1;
            frame.stop();
        });
        assert!(!pump.is_running());
        assert!(!pump.run_frame(t0 + ms(16), |_| ticks += 1));
        assert_eq!(ticks, 1);
    }

    #[test]
    fn when_input_sent_then_next_sample_waits_for_period() {
        let mut pump = FramePump::default();
        pump.start();
        let t0 = Instant::now();
        assert!(pump.input_due(t0));
        pump.mark_input_sent(t0);
        assert!(!pump.input_due(t0 + ms(16)));
        assert!(!pump.input_due(t0 + ms(49)));
        assert!(pump.input_due(t0 + ms(50)));
    }

    #[test]
    fn when_frames_are_steady_then_average_fps_matches() {
        let mut pump = FramePump::default();
        pump.start();
        let t0 = Instant::now();
        assert_eq!(pump.average_fps(), None);
        for i in 0..=100 {
            pump.advance(t0 + ms(20 * i));
        }
        let fps = pump.average_fps().expect("samples");
        assert!((fps - 50.0).abs() < 0.01);
        assert_eq!(pump.fps_samples.len(), 60);
    }
}
