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

use super::{Primitive, PrimitiveId};
use std::cell::RefCell;
use std::rc::Rc;

/// A primitive collection shared between its owner and any number of updaters.
pub type SharedPrimitives = Rc<RefCell<PrimitiveCollection>>;

/// An ordered collection of render primitives.
#[derive(Debug, Default)]
pub struct PrimitiveCollection {
    primitives: Vec<(PrimitiveId, Primitive)>,
    next_id: u64,
}

impl PrimitiveCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty collection wrapped for sharing.
    pub fn shared() -> SharedPrimitives {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Appends a primitive and returns the id of this insertion.
    pub fn add(&mut self, primitive: Primitive) -> PrimitiveId {
        let id = PrimitiveId(self.next_id);
        self.next_id += 1;
        self.primitives.push((id, primitive));
        id
    }

    /// Removes the primitive inserted under `id`.
    pub fn remove(&mut self, id: PrimitiveId) -> Option<Primitive> {
        let index = self.primitives.iter().position(|(entry, _)| *entry == id)?;
        Some(self.primitives.remove(index).1)
    }

    /// The primitive inserted under `id`, if it is still present.
    pub fn get(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.primitives
            .iter()
            .find(|(entry, _)| *entry == id)
            .map(|(_, primitive)| primitive)
    }

    /// Returns `true` if the primitive inserted under `id` is still present.
    pub fn contains(&self, id: PrimitiveId) -> bool {
        self.get(id).is_some()
    }

    /// The number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Returns `true` if the collection holds no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Iterates over the primitives in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (PrimitiveId, &Primitive)> {
        self.primitives.iter().map(|(id, primitive)| (*id, primitive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry_lane::{
        BoxOutlineGeometry, Geometry, GeometryAttributes, GeometryInstance,
        ShowGeometryInstanceAttribute,
    };
    use crate::primitive::Appearance;
    use orrery_core::math::Vec3;
    use uuid::Uuid;

    fn outline() -> Primitive {
        Primitive {
            geometry_instance: GeometryInstance {
                id: Uuid::new_v4(),
                geometry: Geometry::BoxOutline(BoxOutlineGeometry::new(Vec3::ZERO, Vec3::ONE)),
                attributes: GeometryAttributes {
                    show: ShowGeometryInstanceAttribute::new(true),
                    color: None,
                },
            },
            appearance: Appearance::PerInstanceColor {
                flat: true,
                translucent: false,
            },
            line_width: Some(1.0),
        }
    }

    #[test]
    fn test_add_remove_by_id() {
        let mut primitives = PrimitiveCollection::new();
        let first = primitives.add(outline());
        let second = primitives.add(outline());
        assert_ne!(first, second);
        assert_eq!(primitives.len(), 2);

        assert!(primitives.remove(first).is_some());
        assert!(primitives.remove(first).is_none());
        assert!(!primitives.contains(first));
        assert!(primitives.contains(second));
        assert_eq!(primitives.iter().map(|(id, _)| id).collect::<Vec<_>>(), vec![second]);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut primitives = PrimitiveCollection::new();
        let first = primitives.add(outline());
        primitives.remove(first);
        let second = primitives.add(outline());
        assert_ne!(first, second);
        assert!(primitives.get(first).is_none());
        assert!(primitives.get(second).is_some());
    }
}
