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

//! Ground plane staging.
//!
//! The ground plane is an ordinary mesh and instance under a fixed identity.
//! Re-tessellating it is not free, so the agent remembers a fingerprint of
//! the last plane it staged and skips identical ones.

use super::agent::SyncAgent;
use lucent_core::scene::{
    GroundPlane, InstanceFlags, ObjectInstance, GROUND_PLANE_INSTANCE, GROUND_PLANE_MESH,
};
use lucent_lanes::mesh_lane::{ground_plane, ground_plane_transform};
use lucent_lanes::LaneError;

impl SyncAgent {
    /// Stages the ground plane.
    ///
    /// Nothing is staged when the plane and its enabled flag match the last
    /// call, or when a plane that was never uploaded arrives disabled.
    ///
    /// # Errors
    ///
    /// Returns a [`LaneError`] if the tessellated plane fails validation.
    pub fn apply_ground_plane(&mut self, plane: &GroundPlane) -> Result<(), LaneError> {
        let fingerprint = ground_fingerprint(plane);
        let cached = (fingerprint, plane.enabled);
        if self.ground_cache == Some(cached) {
            log::trace!("Ground plane unchanged");
            return Ok(());
        }
        if self.ground_cache.is_none() && !plane.enabled {
            self.ground_cache = Some(cached);
            return Ok(());
        }

        log::debug!(
            "Staging ground plane (enabled: {}, altitude: {})",
            plane.enabled,
            plane.altitude
        );
        let source = ground_plane(plane, self.config.ground_plane_subdivisions);
        self.apply_mesh(GROUND_PLANE_MESH, &source, plane.material.hash)?;
        self.stage_binding(GROUND_PLANE_INSTANCE, &plane.material);
        self.objects.add_or_update(ObjectInstance {
            id: GROUND_PLANE_INSTANCE,
            mesh: GROUND_PLANE_MESH,
            transform: ground_plane_transform(plane),
            material: plane.material.hash,
            flags: InstanceFlags {
                visible: plane.enabled,
                cast_shadow: false,
                shadow_catcher: plane.shadow_only,
                no_self_shadow: false,
            },
        });
        self.ground_cache = Some(cached);
        Ok(())
    }

    /// Stages only the ground plane's transform, for interactive edits of
    /// its altitude.
    pub fn apply_dynamic_ground_plane(&mut self, plane: &GroundPlane) {
        self.objects
            .set_dynamic_transform(GROUND_PLANE_INSTANCE, ground_plane_transform(plane));
    }
}

/// Fingerprint of everything about the plane except its enabled flag.
fn ground_fingerprint(plane: &GroundPlane) -> u64 {
    let fields = [
        plane.altitude,
        plane.texture_scale.x,
        plane.texture_scale.y,
        plane.texture_offset.x,
        plane.texture_offset.y,
        plane.texture_rotation,
        if plane.shadow_only { 1.0 } else { 0.0 },
    ];
    let mut hasher = blake3::Hasher::new();
    hasher.update(bytemuck::cast_slice(&fields));
    hasher.update(&plane.material.hash.0.to_le_bytes());
    let digest = hasher.finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(head)
}
