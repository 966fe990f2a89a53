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

//! # Orrery Data
//!
//! Scene description data: entities and the declarative shape descriptions they
//! carry, with every change propagated through the core [`Event`] primitive.
//!
//! [`Event`]: orrery_core::Event

#![warn(missing_docs)]

pub mod entity;
pub mod graphics;

pub use entity::{Entity, EntityChange, EntityProperty};
pub use graphics::{BoxGraphics, BoxGraphicsChange, BoxProperty};
