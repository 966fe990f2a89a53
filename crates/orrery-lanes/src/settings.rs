// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Settings of the rendering context that geometry updaters draw into.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading [`SceneSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The text is not valid RON for the settings layout.
    #[error("failed to parse scene settings: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// The supported line width range is empty or not positive.
    #[error("invalid line width range [{minimum}, {maximum}]")]
    InvalidLineWidthRange {
        /// The configured lower bound.
        minimum: f32,
        /// The configured upper bound.
        maximum: f32,
    },
}

/// Capabilities of the rendering context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// The thinnest line the context can rasterize, in pixels.
    pub minimum_line_width: f32,
    /// The widest line the context can rasterize, in pixels.
    pub maximum_line_width: f32,
}

impl SceneSettings {
    /// Parses settings from RON text. Missing fields keep their defaults.
    pub fn from_ron(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = ron::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks that the line width range is usable.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.minimum_line_width > 0.0 && self.minimum_line_width <= self.maximum_line_width {
            Ok(())
        } else {
            Err(SettingsError::InvalidLineWidthRange {
                minimum: self.minimum_line_width,
                maximum: self.maximum_line_width,
            })
        }
    }
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            minimum_line_width: 1.0,
            maximum_line_width: 10.0,
        }
    }
}
