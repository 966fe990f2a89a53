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

//! Render primitives and the shared collection that owns them.
//!
//! A [`PrimitiveCollection`] is shared between many dynamic updaters. Each
//! updater keeps the [`PrimitiveId`]s it inserted and removes exactly those.

mod collection;

pub use collection::{PrimitiveCollection, SharedPrimitives};

use crate::geometry_lane::GeometryInstance;
use orrery_core::material::Material;

/// Identifies one insertion into a [`PrimitiveCollection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(pub(crate) u64);

/// How a primitive is shaded.
#[derive(Debug, Clone, PartialEq)]
pub enum Appearance {
    /// Shaded with a material.
    Material {
        /// The material sampled for this frame.
        material: Material,
        /// Whether blending is required.
        translucent: bool,
        /// Whether back faces can be culled.
        closed: bool,
    },
    /// Shaded with the per-instance color attribute.
    PerInstanceColor {
        /// Unlit shading.
        flat: bool,
        /// Whether blending is required.
        translucent: bool,
    },
}

impl Appearance {
    /// Returns `true` if the primitive must be drawn in the translucent pass.
    pub fn is_translucent(&self) -> bool {
        match self {
            Appearance::Material { translucent, .. } => *translucent,
            Appearance::PerInstanceColor { translucent, .. } => *translucent,
        }
    }
}

/// A geometry instance ready to be drawn, with its shading.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    /// The instance to draw.
    pub geometry_instance: GeometryInstance,
    /// How to shade it.
    pub appearance: Appearance,
    /// Line width in pixels, for line geometry.
    pub line_width: Option<f32>,
}
