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

//! The rendering context geometry updaters are bound to.

use crate::settings::SceneSettings;

/// The rendering context a geometry updater produces geometry for.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    settings: SceneSettings,
}

impl Scene {
    /// Creates a context with the given capabilities.
    pub fn new(settings: SceneSettings) -> Self {
        Self { settings }
    }

    /// The capabilities of this context.
    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    /// Clamps a requested line width to the range the context supports.
    pub fn clamp_line_width(&self, width: f32) -> f32 {
        // Not `f32::clamp`, which panics on an inverted range.
        width
            .max(self.settings.minimum_line_width)
            .min(self.settings.maximum_line_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_line_width() {
        let scene = Scene::default();
        assert_eq!(scene.clamp_line_width(0.5), 1.0);
        assert_eq!(scene.clamp_line_width(8.0), 8.0);
        assert_eq!(scene.clamp_line_width(32.0), 10.0);
    }
}
