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

//! The ground plane: an infinite-looking floor owned by the render settings.

use super::ids::{DocumentObjectId, InstanceId, MeshKey};
use super::material::MaterialBinding;
use crate::math::Vec2;
use serde::{Deserialize, Serialize};

/// Fixed document identity of the ground plane.
pub const GROUND_PLANE_OBJECT: DocumentObjectId =
    DocumentObjectId::from_u128(0x306690EC_6E86_4676_B55B_1A50066D7432);
/// Mesh key of the ground plane.
pub const GROUND_PLANE_MESH: MeshKey = MeshKey::new(GROUND_PLANE_OBJECT, 0);
/// Instance id of the ground plane.
pub const GROUND_PLANE_INSTANCE: InstanceId = InstanceId(1);
/// Half extent of the ground plane square.
pub const GROUND_PLANE_EXTENT: f32 = 1.0e6;

/// Ground plane settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundPlane {
    /// Whether the plane is shown.
    pub enabled: bool,
    /// Height of the plane along Z.
    pub altitude: f32,
    /// Only catch shadows.
    pub shadow_only: bool,
    /// Material of the plane.
    pub material: MaterialBinding,
    /// Texture repeat.
    pub texture_scale: Vec2,
    /// Texture offset.
    pub texture_offset: Vec2,
    /// Texture rotation in radians.
    pub texture_rotation: f32,
}
