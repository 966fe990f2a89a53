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

//! Immutable geometry instances handed to the batching stage.

use orrery_core::math::{Aabb, LinearRgba, Vec3};
use uuid::Uuid;

/// The vertex attributes a box mesh must be generated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexFormat {
    /// Positions and normals only; the color comes from a per-instance attribute.
    PerInstanceColor,
    /// Positions, normals and texture coordinates, for arbitrary materials.
    Textured,
}

/// A solid box between two corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    /// The corner with the smallest coordinates.
    pub minimum_corner: Vec3,
    /// The corner with the largest coordinates.
    pub maximum_corner: Vec3,
    /// The vertex layout to generate.
    pub vertex_format: VertexFormat,
}

impl BoxGeometry {
    /// Creates a box geometry from its corners.
    pub fn new(minimum_corner: Vec3, maximum_corner: Vec3, vertex_format: VertexFormat) -> Self {
        Self {
            minimum_corner,
            maximum_corner,
            vertex_format,
        }
    }

    /// The axis-aligned bounds of the box.
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_min_max(self.minimum_corner, self.maximum_corner)
    }
}

/// The twelve edges of a box between two corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxOutlineGeometry {
    /// The corner with the smallest coordinates.
    pub minimum_corner: Vec3,
    /// The corner with the largest coordinates.
    pub maximum_corner: Vec3,
}

impl BoxOutlineGeometry {
    /// Creates an outline geometry from its corners.
    pub fn new(minimum_corner: Vec3, maximum_corner: Vec3) -> Self {
        Self {
            minimum_corner,
            maximum_corner,
        }
    }

    /// The axis-aligned bounds of the outline.
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_min_max(self.minimum_corner, self.maximum_corner)
    }
}

/// A geometry description produced by an updater.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// A solid box.
    Box(BoxGeometry),
    /// A box outline.
    BoxOutline(BoxOutlineGeometry),
}

impl Geometry {
    /// The two corners the geometry was built from.
    pub fn corners(&self) -> (Vec3, Vec3) {
        match self {
            Geometry::Box(geometry) => (geometry.minimum_corner, geometry.maximum_corner),
            Geometry::BoxOutline(geometry) => (geometry.minimum_corner, geometry.maximum_corner),
        }
    }

    /// The axis-aligned bounds of the geometry.
    pub fn bounding_box(&self) -> Aabb {
        match self {
            Geometry::Box(geometry) => geometry.bounding_box(),
            Geometry::BoxOutline(geometry) => geometry.bounding_box(),
        }
    }
}

/// Per-instance visibility, encoded as one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct ShowGeometryInstanceAttribute {
    /// `1` when shown, `0` when hidden.
    pub value: [u8; 1],
}

impl ShowGeometryInstanceAttribute {
    /// Creates the attribute for `show`.
    pub fn new(show: bool) -> Self {
        Self {
            value: Self::to_value(show),
        }
    }

    /// Encodes `show` the way the attribute stores it.
    pub fn to_value(show: bool) -> [u8; 1] {
        [u8::from(show)]
    }
}

/// Per-instance color, encoded as four normalized bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct ColorGeometryInstanceAttribute {
    /// Red, green, blue and alpha bytes.
    pub value: [u8; 4],
}

impl ColorGeometryInstanceAttribute {
    /// Creates the attribute for `color`.
    pub fn new(color: LinearRgba) -> Self {
        Self {
            value: Self::to_value(color),
        }
    }

    /// Encodes `color` the way the attribute stores it.
    pub fn to_value(color: LinearRgba) -> [u8; 4] {
        color.to_bytes()
    }
}

/// The per-instance attributes of a [`GeometryInstance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryAttributes {
    /// Visibility of the instance.
    pub show: ShowGeometryInstanceAttribute,
    /// Color of the instance, present only when drawn with a per-instance color.
    pub color: Option<ColorGeometryInstanceAttribute>,
}

/// A geometry paired with its per-instance attributes at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryInstance {
    /// The id of the entity the instance was built for.
    pub id: Uuid,
    /// The geometry to draw.
    pub geometry: Geometry,
    /// Attributes applied to this instance only.
    pub attributes: GeometryAttributes,
}
