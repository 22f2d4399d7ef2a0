//! Ordered description of the post-processing chain.

use std::fmt;

use bevy::ecs::resource::Resource;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderPassKind {
    /// Base render of scene and camera
    Scene,
    Bloom,
    /// Subpixel morphological anti-aliasing
    Smaa,
}

impl RenderPassKind {
    /// Position of the pass in the renderer's fixed graph.
    pub fn rank(self) -> u8 {
        match self {
            RenderPassKind::Scene => 0,
            RenderPassKind::Bloom => 1,
            RenderPassKind::Smaa => 2,
        }
    }
}

impl fmt::Display for RenderPassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderPassKind::Scene => "scene",
            RenderPassKind::Bloom => "bloom",
            RenderPassKind::Smaa => "smaa",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomSettings {
    pub intensity: f32,
    /// Luminance above which pixels contribute to bloom
    pub threshold: f32,
    /// Spread of the glow, 0..1
    pub radius: f32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self {
            intensity: 0.1,
            threshold: 0.1,
            radius: 0.1,
        }
    }
}

/// Passes executed every frame, in order. Built once at startup.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FramePipeline {
    passes: Vec<RenderPassKind>,
    bloom: BloomSettings,
}

impl Default for FramePipeline {
    fn default() -> Self {
        Self {
            passes: vec![RenderPassKind::Scene],
            bloom: BloomSettings::default(),
        }
    }
}

impl FramePipeline {
    /// Validates and builds a pipeline.
    ///
    /// The scene pass must come first, passes may not repeat, and bloom must
    /// precede anti-aliasing.
    pub fn new(passes: Vec<RenderPassKind>, bloom: BloomSettings) -> Result<Self, PipelineError> {
        let Some(first) = passes.first() else {
            return Err(PipelineError::Empty);
        };
        if *first != RenderPassKind::Scene {
            return Err(PipelineError::ScenePassNotFirst(*first));
        }

        for (index, pass) in passes.iter().enumerate() {
            if passes[..index].contains(pass) {
                return Err(PipelineError::DuplicatePass(*pass));
            }
        }

        for pair in passes.windows(2) {
            if pair[1].rank() < pair[0].rank() {
                return Err(PipelineError::OutOfOrder {
                    found: pair[1],
                    must_precede: pair[0],
                });
            }
        }

        Ok(Self { passes, bloom })
    }

    pub fn passes(&self) -> &[RenderPassKind] {
        &self.passes
    }

    pub fn has(&self, pass: RenderPassKind) -> bool {
        self.passes.contains(&pass)
    }

    /// Bloom settings, if the bloom pass is enabled.
    pub fn bloom(&self) -> Option<&BloomSettings> {
        self.has(RenderPassKind::Bloom).then_some(&self.bloom)
    }
}
