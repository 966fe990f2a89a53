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

//! # Orrery Lanes
//!
//! Hot-path pipelines that turn entity shape descriptions into drawable geometry.
//!
//! The [`geometry_lane`] decides what geometry a box produces and when it has to
//! be rebuilt. Static boxes are exported as [`GeometryInstance`]s; dynamic boxes
//! are kept in a shared [`PrimitiveCollection`] by a per-frame updater.
//!
//! [`GeometryInstance`]: geometry_lane::GeometryInstance
//! [`PrimitiveCollection`]: primitive::PrimitiveCollection

#![warn(missing_docs)]

pub mod error;
pub mod geometry_lane;
pub mod primitive;
pub mod scene;
pub mod settings;

pub use error::{GeometryError, GeometryResult};
pub use geometry_lane::{
    BoxGeometryUpdater, DynamicBoxUpdater, DynamicUpdater, GeometryChange, GeometryStrategy,
    StaticGeometryProvider,
};
pub use primitive::{PrimitiveCollection, SharedPrimitives};
pub use scene::Scene;
pub use settings::{SceneSettings, SettingsError};
