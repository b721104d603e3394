// Frame clock: turns a frame counter into the animation inputs the
// calculator reads.
//
// `t` oscillates in [0, 1] as `sin(frame · wave_speed) · 0.5 + 0.5` and
// drives the easing curves; `elapsed_seconds` advances linearly at `fps`
// and drives the Wave method's travelling sine. The clock is deterministic
// (frame-counted, not wall-clock) so headless runs and replays render the
// same frames every time.

use serde::{Deserialize, Serialize};

/// Animation inputs for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameTime {
    /// Oscillating animation parameter in [0, 1].
    pub t: f64,
    /// Seconds since the first frame.
    pub elapsed_seconds: f64,
}

impl FrameTime {
    pub const fn new(t: f64, elapsed_seconds: f64) -> Self {
        Self { t, elapsed_seconds }
    }
}

pub const DEFAULT_WAVE_SPEED: f64 = 0.025;
pub const DEFAULT_FPS: f64 = 60.0;

#[derive(Clone, Debug, PartialEq)]
pub struct FrameClock {
    wave_speed: f64,
    fps: f64,
    frame: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_WAVE_SPEED, DEFAULT_FPS)
    }
}

impl FrameClock {
    /// A non-positive or non-finite `fps` is replaced by the default.
    pub fn new(wave_speed: f64, fps: f64) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 {
            fps
        } else {
            tracing::warn!(fps, "invalid fps, using {}", DEFAULT_FPS);
            DEFAULT_FPS
        };
        Self {
            wave_speed,
            fps,
            frame: 0,
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Inputs for an arbitrary frame, without moving the clock.
    pub fn at(&self, frame: u64) -> FrameTime {
        let f = frame as f64;
        FrameTime {
            t: (f * self.wave_speed).sin() * 0.5 + 0.5,
            elapsed_seconds: f / self.fps,
        }
    }

    /// Inputs for the current frame.
    pub fn now(&self) -> FrameTime {
        self.at(self.frame)
    }

    /// Advance one frame and return the new frame's inputs.
    pub fn tick(&mut self) -> FrameTime {
        self.frame += 1;
        self.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_zero_sits_mid_swing() {
        let clock = FrameClock::default();
        assert_eq!(clock.now(), FrameTime::new(0.5, 0.0));
    }

    #[test]
    fn t_stays_in_unit_range() {
        let clock = FrameClock::new(0.1, 30.0);
        for frame in 0..500 {
            let t = clock.at(frame).t;
            assert!((0.0..=1.0).contains(&t), "frame {frame}: {t}");
        }
    }

    #[test]
    fn tick_advances_elapsed_by_frame_period() {
        let mut clock = FrameClock::new(0.025, 50.0);
        let first = clock.tick();
        let second = clock.tick();
        assert_eq!(clock.frame(), 2);
        assert!((first.elapsed_seconds - 0.02).abs() < 1e-12);
        assert!((second.elapsed_seconds - 0.04).abs() < 1e-12);
        assert!((second.t - ((2.0f64 * 0.025).sin() * 0.5 + 0.5)).abs() < 1e-12);
    }

    #[test]
    fn bad_fps_uses_default() {
        assert_eq!(FrameClock::new(0.025, 0.0).fps(), DEFAULT_FPS);
        assert_eq!(FrameClock::new(0.025, f64::NAN).fps(), DEFAULT_FPS);
    }
}
