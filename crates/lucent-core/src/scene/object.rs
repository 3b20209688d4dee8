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

//! Object instances.

use super::ids::{InstanceId, MeshKey, ShaderHash};
use super::material::MaterialBinding;
use crate::math::Transform;
use serde::{Deserialize, Serialize};

/// Per-instance display flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceFlags {
    /// Whether the instance is shown at all.
    pub visible: bool,
    /// Whether it casts shadows.
    pub cast_shadow: bool,
    /// Whether it only catches shadows (camera-visible, otherwise invisible).
    pub shadow_catcher: bool,
    /// Whether it ignores its own shadow.
    pub no_self_shadow: bool,
}

impl Default for InstanceFlags {
    fn default() -> Self {
        Self {
            visible: true,
            cast_shadow: true,
            shadow_catcher: false,
            no_self_shadow: false,
        }
    }
}

/// An instance add-or-change notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceChange {
    /// Caller-assigned instance id.
    pub id: InstanceId,
    /// The mesh this instance draws.
    pub mesh: MeshKey,
    /// World transform.
    pub transform: Transform,
    /// Material the document wants on this instance.
    pub material: MaterialBinding,
    /// Display flags.
    pub flags: InstanceFlags,
}

/// A staged object instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectInstance {
    /// Caller-assigned instance id.
    pub id: InstanceId,
    /// The mesh this instance draws.
    pub mesh: MeshKey,
    /// World transform.
    pub transform: Transform,
    /// Hash of the material the document wants on this instance.
    pub material: ShaderHash,
    /// Display flags.
    pub flags: InstanceFlags,
}

impl From<&InstanceChange> for ObjectInstance {
    fn from(change: &InstanceChange) -> Self {
        Self {
            id: change.id,
            mesh: change.mesh,
            transform: change.transform,
            material: change.material.hash,
            flags: change.flags,
        }
    }
}

/// A material-changed notification: `material` is now used by `instance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialChange {
    /// The affected instance.
    pub instance: InstanceId,
    /// The material it now wears.
    pub material: MaterialBinding,
}

/// A transform-only update used while the user drags objects around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DynamicTransform {
    /// The moved instance.
    pub id: InstanceId,
    /// Its new world transform.
    pub transform: Transform,
}
