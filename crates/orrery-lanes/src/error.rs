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

//! Errors reported by the geometry lane.

use thiserror::Error;

/// A misuse of a geometry updater.
///
/// Every variant carries a short description of the violated precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// A required argument was absent.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The operation is not valid for the updater's current derived state.
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),
    /// The updater has been destroyed.
    #[error("object disposed: {0}")]
    ObjectDisposed(&'static str),
}

/// A specialized `Result` for geometry lane operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
