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

//! Stable identities shared between the document side and the renderer side.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of an object in the authoring document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentObjectId(pub Uuid);

impl DocumentObjectId {
    /// Builds an id from a raw 128-bit value. Handy for fixed, well-known objects.
    pub const fn from_u128(v: u128) -> Self {
        Self(Uuid::from_u128(v))
    }

    /// Generates a fresh random id.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for DocumentObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One triangulated piece of a document object: `(object, sub-mesh index)`.
///
/// Stable for the lifetime of the source object and reused when the same
/// object is triangulated again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeshKey {
    /// The owning document object.
    pub object: DocumentObjectId,
    /// The sub-mesh index within that object.
    pub index: u32,
}

impl MeshKey {
    /// Creates a new key.
    pub const fn new(object: DocumentObjectId, index: u32) -> Self {
        Self { object, index }
    }
}

impl fmt::Display for MeshKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.object, self.index)
    }
}

/// Renderer-facing 32-bit instance id, assigned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Folds a UUID down to an instance id.
    ///
    /// Used for objects this crate creates on the caller's behalf (linear
    /// light tubes), which have a document identity but no caller-assigned
    /// instance id.
    pub fn from_uuid(id: &Uuid) -> Self {
        let v = id.as_u128();
        Self((v as u32) ^ ((v >> 32) as u32) ^ ((v >> 64) as u32) ^ ((v >> 96) as u32))
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deterministic 32-bit content hash of a material's baked parameters.
///
/// `u32::MAX` is reserved for [`ShaderHash::NONE`] and is never produced by
/// the material hasher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShaderHash(pub u32);

impl ShaderHash {
    /// Sentinel meaning "no shader bound".
    pub const NONE: Self = Self(u32::MAX);

    /// True for the [`ShaderHash::NONE`] sentinel.
    #[inline]
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl Default for ShaderHash {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for ShaderHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "none")
        } else {
            write!(f, "{:#x}", self.0)
        }
    }
}

/// Identifier of a light in the authoring document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LightId(pub Uuid);

impl LightId {
    /// Builds an id from a raw 128-bit value.
    pub const fn from_u128(v: u128) -> Self {
        Self(Uuid::from_u128(v))
    }
}

impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
