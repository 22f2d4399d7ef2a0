use bevy::prelude::*;

use crate::constants::FRAME_TIME_STEP;

/// Animation clock advanced by a fixed step per rendered frame.
///
/// Time follows the frame count, not the wall clock, so playback speed scales
/// with the display refresh rate.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedTime {
    frames: u64,
}

impl SimulatedTime {
    pub fn advance(&mut self) {
        self.frames = self.frames.saturating_add(1);
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Elapsed simulated time, `frames * FRAME_TIME_STEP`.
    pub fn elapsed(&self) -> f64 {
        self.frames as f64 * FRAME_TIME_STEP
    }

    /// Elapsed time narrowed for shader uniforms.
    pub fn elapsed_f32(&self) -> f32 {
        self.elapsed() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let time = SimulatedTime::default();
        assert_eq!(time.frames(), 0);
        assert_eq!(time.elapsed(), 0.0);
    }

    #[test]
    fn test_elapsed_after_n_frames() {
        let mut time = SimulatedTime::default();
        for _ in 0..600 {
            time.advance();
        }
        assert_eq!(time.frames(), 600);
        assert_eq!(time.elapsed(), 600.0 * FRAME_TIME_STEP);
        assert!((time.elapsed() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_is_reproducible() {
        let run = |n: u32| {
            let mut time = SimulatedTime::default();
            (0..n).for_each(|_| time.advance());
            time.elapsed()
        };
        assert_eq!(run(12_345), run(12_345));
    }

    #[test]
    fn test_is_monotonic() {
        let mut time = SimulatedTime::default();
        let mut previous = time.elapsed();
        for _ in 0..1000 {
            time.advance();
            assert!(time.elapsed() > previous);
            previous = time.elapsed();
        }
    }
}
