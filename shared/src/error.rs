use std::path::PathBuf;

use thiserror::Error;

use crate::assets::SceneAsset;

/// Errors that can occur while configuring the frame pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("pipeline has no passes")]
    Empty,
    #[error("the scene pass must come first, found {0} at index 0")]
    ScenePassNotFirst(crate::pipeline::RenderPassKind),
    #[error("pass {0} appears more than once")]
    DuplicatePass(crate::pipeline::RenderPassKind),
    /// `found` appears after `must_precede` but has to run before it.
    #[error("pass {found} must run before {must_precede}")]
    OutOfOrder {
        found: crate::pipeline::RenderPassKind,
        must_precede: crate::pipeline::RenderPassKind,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{}: {path}: {source}", crate::CONFIG_READ_ERROR)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: {path}: {source}", crate::CONFIG_WRITE_ERROR)]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scene configuration: {0}")]
    Parse(#[from] ron::Error),
}

/// Failure classes of the scene.
///
/// `AssetLoadFailure` is non-fatal: the affected node stays absent.
/// `RenderSubmissionFailure` terminates the frame loop.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to load {asset} from {path}: {reason}")]
    AssetLoadFailure {
        asset: SceneAsset,
        path: String,
        reason: String,
    },
    #[error("render submission failed: {0}")]
    RenderSubmissionFailure(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl SceneError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, SceneError::RenderSubmissionFailure(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::RenderPassKind;

    #[test]
    fn test_only_render_failures_are_fatal() {
        assert!(SceneError::RenderSubmissionFailure("camera gone".into()).is_fatal());
        assert!(!SceneError::Pipeline(PipelineError::Empty).is_fatal());
        assert!(!SceneError::AssetLoadFailure {
            asset: SceneAsset::Model,
            path: "models/model.glb".into(),
            reason: "not found".into(),
        }
        .is_fatal());
    }

    #[test]
    fn test_pipeline_messages_name_passes() {
        let error = PipelineError::OutOfOrder {
            found: RenderPassKind::Bloom,
            must_precede: RenderPassKind::Smaa,
        };
        assert_eq!(error.to_string(), "pass bloom must run before smaa");
    }

    #[test]
    fn test_config_errors_are_not_fatal() {
        let parse = crate::config::parse_config("(sun: 4)").unwrap_err();
        let error = SceneError::from(parse);
        assert!(matches!(error, SceneError::Config(ConfigError::Parse(_))));
        assert!(!error.is_fatal());
        assert!(error.to_string().starts_with("invalid scene configuration"));
    }
}
