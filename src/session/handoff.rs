//! The record passed from the scan step to the playback step.

use crate::facelets::{FaceletError, FaceletState, FaceletString};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("failed to access handoff file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode handoff record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid handoff record: {0}")]
    Facelets(#[from] FaceletError),
    #[error("handoff cube string does not match its state")]
    Inconsistent,
}

/// Confirmed scan: the grid plus its solver string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handoff {
    pub state: FaceletState,
    #[serde(rename = "cubeString")]
    pub cube_string: String,
}

impl Handoff {
    pub fn new(state: FaceletState, facelets: &FaceletString) -> Self {
        Self {
            state,
            cube_string: facelets.to_string(),
        }
    }

    /// Parsed solver string.
    pub fn facelets(&self) -> Result<FaceletString, FaceletError> {
        FaceletString::parse(&self.cube_string)
    }

    /// Checks that the string is well formed and agrees with the grid.
    pub fn validate(&self) -> Result<FaceletString, HandoffError> {
        let facelets = self.facelets()?;
        if self.state.to_facelet_string()? != facelets {
            return Err(HandoffError::Inconsistent);
        }
        Ok(facelets)
    }

    pub fn to_json(&self) -> Result<String, HandoffError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, HandoffError> {
        let handoff: Handoff = serde_json::from_str(text)?;
        handoff.validate()?;
        Ok(handoff)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), HandoffError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        tracing::info!(path = %path.as_ref().display(), "Handoff record written");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, HandoffError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }
}
