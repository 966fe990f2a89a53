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

//! Provides the synchronous observer primitive used for change notification.
//!
//! Properties, shape descriptions, entities and geometry updaters each own an
//! [`Event`] and raise it when their definition changes. Consumers that prefer
//! pulling notifications can bridge an event into a `flume` channel with
//! [`Event::subscribe_channel`].

mod observer;
mod subscription;

pub use self::observer::{Event, ListenerId};
pub use self::subscription::Subscription;
