//! Load bookkeeping for the scene's asynchronous assets.
//!
//! Frames keep rendering while assets are pending; a failed asset leaves its
//! node absent and is reported once.

use std::{collections::BTreeMap, fmt};

use bevy::prelude::*;

use crate::error::SceneError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SceneAsset {
    EnvironmentMap,
    Backdrop,
    Model,
    WaterNormals,
}

impl fmt::Display for SceneAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SceneAsset::EnvironmentMap => "environment map",
            SceneAsset::Backdrop => "backdrop texture",
            SceneAsset::Model => "model",
            SceneAsset::WaterNormals => "water normal map",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetStatus {
    Pending,
    Ready,
    Failed(String),
}

/// What the asset server reported for an asset during a poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    StillLoading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone)]
struct TrackedAsset {
    path: String,
    status: AssetStatus,
}

#[derive(Resource, Debug, Default, Clone)]
pub struct AssetTracker {
    assets: BTreeMap<SceneAsset, TrackedAsset>,
}

impl AssetTracker {
    pub fn track(&mut self, asset: SceneAsset, path: impl Into<String>) {
        self.assets.insert(
            asset,
            TrackedAsset {
                path: path.into(),
                status: AssetStatus::Pending,
            },
        );
    }

    pub fn status(&self, asset: SceneAsset) -> Option<&AssetStatus> {
        self.assets.get(&asset).map(|tracked| &tracked.status)
    }

    pub fn is_ready(&self, asset: SceneAsset) -> bool {
        matches!(self.status(asset), Some(AssetStatus::Ready))
    }

    pub fn pending(&self) -> impl Iterator<Item = SceneAsset> + '_ {
        self.assets
            .iter()
            .filter(|(_, tracked)| tracked.status == AssetStatus::Pending)
            .map(|(asset, _)| *asset)
    }

    /// True once no tracked asset is still pending.
    pub fn all_settled(&self) -> bool {
        self.pending().next().is_none()
    }

    /// Applies a poll result. Only transitions out of `Pending` are recorded,
    /// so a failure is returned the first time it is seen and never again.
    pub fn record(&mut self, asset: SceneAsset, outcome: LoadOutcome) -> Option<SceneError> {
        let tracked = self.assets.get_mut(&asset)?;
        if tracked.status != AssetStatus::Pending {
            return None;
        }

        match outcome {
            LoadOutcome::StillLoading => None,
            LoadOutcome::Loaded => {
                log::debug!("{asset} ready ({})", tracked.path);
                tracked.status = AssetStatus::Ready;
                None
            }
            LoadOutcome::Failed(reason) => {
                tracked.status = AssetStatus::Failed(reason.clone());
                Some(SceneError::AssetLoadFailure {
                    asset,
                    path: tracked.path.clone(),
                    reason,
                })
            }
        }
    }
}

impl AssetTracker {
    /// Marks an asset as failed after the fact, e.g. when a loaded asset
    /// turns out to be unusable. Returns the error unless it already failed.
    pub fn mark_failed(&mut self, asset: SceneAsset, reason: impl Into<String>) -> Option<SceneError> {
        let tracked = self.assets.get_mut(&asset)?;
        if matches!(tracked.status, AssetStatus::Failed(_)) {
            return None;
        }
        let reason = reason.into();
        log::debug!("{asset} marked failed after loading: {reason}");
        tracked.status = AssetStatus::Failed(reason.clone());
        Some(SceneError::AssetLoadFailure {
            asset,
            path: tracked.path.clone(),
            reason,
        })
    }
}
