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

//! Geometry lane - turns time-dynamic shape descriptions into drawable geometry.
//!
//! A visualizer creates one [`BoxGeometryUpdater`] per entity and asks it for a
//! [`GeometryStrategy`]. Static shapes are batched from the instances a
//! [`StaticGeometryProvider`] builds once per time interval; dynamic shapes get a
//! [`DynamicUpdater`] that rebuilds its primitives every frame.

mod box_updater;
mod dynamic_updater;
mod instance;

pub use box_updater::*;
pub use dynamic_updater::*;
pub use instance::*;

use crate::error::GeometryResult;
use orrery_core::time::JulianDate;

/// Builds geometry instances for shapes that only change between time intervals.
pub trait StaticGeometryProvider {
    /// Returns `true` if the shape has a fill.
    fn fill_enabled(&self) -> bool;

    /// Returns `true` if the shape has an outline.
    fn outline_enabled(&self) -> bool;

    /// Returns `true` if fill visibility and appearance never change over time.
    fn has_constant_fill(&self) -> bool;

    /// Returns `true` if outline visibility and color never change over time.
    fn has_constant_outline(&self) -> bool;

    /// Returns `true` if the fill is visible at `time`.
    fn is_filled(&self, time: JulianDate) -> GeometryResult<bool>;

    /// Returns `true` if the outline is visible at `time`.
    fn is_outline_visible(&self, time: JulianDate) -> GeometryResult<bool>;

    /// Builds the fill instance for `time`.
    fn create_fill_geometry_instance(&self, time: JulianDate) -> GeometryResult<GeometryInstance>;

    /// Builds the outline instance for `time`.
    fn create_outline_geometry_instance(&self, time: JulianDate) -> GeometryResult<GeometryInstance>;
}

/// Keeps the primitives of one dynamic shape in sync with the clock.
pub trait DynamicUpdater {
    /// Rebuilds the primitives for `time`. `None` is rejected as an invalid argument.
    fn update(&mut self, time: Option<JulianDate>) -> GeometryResult<()>;

    /// Returns `true` once [`DynamicUpdater::destroy`] has been called.
    fn is_destroyed(&self) -> bool;

    /// Removes every primitive this updater added.
    fn destroy(&mut self) -> GeometryResult<()>;
}

/// The update model chosen for one shape.
pub enum GeometryStrategy<'a> {
    /// Instances are built per time interval and batched with other static shapes.
    Static(&'a dyn StaticGeometryProvider),
    /// Primitives are rebuilt every frame.
    Dynamic(Box<dyn DynamicUpdater>),
}

impl GeometryStrategy<'_> {
    /// Returns `true` for [`GeometryStrategy::Dynamic`].
    pub fn is_dynamic(&self) -> bool {
        matches!(self, GeometryStrategy::Dynamic(_))
    }
}
