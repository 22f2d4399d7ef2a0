use bevy::prelude::*;

/// Per-frame ordering of the render loop. Runs in `Update`, chained.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Scroll and other host input
    Input,
    /// Simulated time and sun direction
    Simulate,
    /// Copies simulation state into materials before the frame is submitted
    Shade,
}

