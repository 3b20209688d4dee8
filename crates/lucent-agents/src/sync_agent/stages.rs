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

//! Geometry stages: material shaders, meshes and object instances.

use super::agent::SyncAgent;
use super::report::UploadOutcome;
use lucent_core::event::SyncEvent;
use lucent_core::renderer::{
    CancelToken, MeshHandle, PathRay, RenderScene, ShadowFlags, SyncError,
};
use lucent_core::scene::{InstanceFlags, MaterialBinding, MeshBuffers};

impl SyncAgent {
    /// Compiles every newly registered material, one shader per hash.
    pub(super) fn upload_materials(
        &mut self,
        scene: &mut dyn RenderScene,
        cancel: &CancelToken,
    ) -> Result<UploadOutcome, SyncError> {
        let pending = self.registry.pending().to_vec();
        if pending.is_empty() {
            return Ok(UploadOutcome::Completed);
        }
        log::debug!("Compiling {} material shader(s)", pending.len());
        let gamma = self.flush_gamma();

        for hash in pending {
            if cancel.is_cancelled() {
                log::debug!("Material stage cancelled before {hash}");
                return Ok(UploadOutcome::Cancelled);
            }
            let Some(record) = self.registry.record(hash) else {
                continue;
            };
            let binding = MaterialBinding::with_hash(hash, record.material.clone());
            let description = self.material_lane.compile(&binding, gamma);
            let shader = scene.create_material_shader(&description)?;
            let scene_id = scene.add_shader_to_scene(shader);
            scene.tag_shader(shader);
            self.registry.record_handle(hash, shader);
            self.registry.record_scene_id(hash, scene_id);
            self.fresh_materials.insert(hash);
            log::trace!("Compiled '{}' ({hash}) as {shader}", description.name);
        }
        Ok(UploadOutcome::Completed)
    }

    /// Deletes, then uploads, meshes. Cancellation is polled before each
    /// deleted object and each mesh; a mesh whose content the renderer
    /// already holds costs nothing.
    pub(super) fn upload_meshes(
        &mut self,
        scene: &mut dyn RenderScene,
        cancel: &CancelToken,
    ) -> Result<UploadOutcome, SyncError> {
        for object in self.geometry.pending_deletions() {
            if cancel.is_cancelled() {
                log::debug!("Mesh stage cancelled before deleting {object}");
                return Ok(UploadOutcome::Cancelled);
            }
            for (key, mesh) in self.geometry.uploaded_for_object(object) {
                log::debug!("Clearing mesh {key}");
                scene.clear_mesh(mesh);
                scene.tag_mesh_rebuild(mesh);
                self.geometry.mark_cleared(key);
                for id in self.objects.instances_using_mesh(key) {
                    if let Some(handle) = self.objects.find_object_relation(id) {
                        scene.set_object_visibility(handle, PathRay::HIDDEN);
                        scene.tag_object_update(handle);
                    }
                    self.objects.invalidate(id);
                }
            }
            self.geometry.complete_deletion(object);
        }

        let keys = self.geometry.staged_keys();
        if !keys.is_empty() {
            log::debug!("Uploading {} mesh(es)", keys.len());
        }
        for key in keys {
            if cancel.is_cancelled() {
                log::debug!(
                    "Mesh stage cancelled with {} mesh(es) staged",
                    self.geometry.staged_len()
                );
                return Ok(UploadOutcome::Cancelled);
            }
            let Some(record) = self.geometry.staged(key) else {
                continue;
            };
            if self.geometry.is_uploaded_unchanged(record) {
                log::trace!("Mesh {key} unchanged");
                self.geometry.take_staged(key);
                continue;
            }
            let mesh = match self.geometry.find_mesh_relation(key) {
                Some(mesh) => mesh,
                None => scene.create_mesh()?,
            };
            let Some(record) = self.geometry.take_staged(key) else {
                continue;
            };
            upload_buffers(scene, mesh, &record.buffers);
            self.geometry
                .record_mesh_relation(key, mesh, record.fingerprint);
            log::trace!("Uploaded mesh {key} into {mesh}");
        }
        Ok(UploadOutcome::Completed)
    }

    /// Hides deleted instances, then uploads staged ones. An instance whose
    /// mesh or shader is not on the renderer yet is deferred to the next
    /// flush.
    pub(super) fn upload_objects(&mut self, scene: &mut dyn RenderScene) -> Result<(), SyncError> {
        for id in self.objects.pending_deletions() {
            if let Some(handle) = self.objects.find_object_relation(id) {
                log::debug!("Hiding deleted instance {id}");
                scene.set_object_visibility(handle, PathRay::HIDDEN);
                scene.tag_object_update(handle);
            }
            self.objects.invalidate(id);
            self.object_shaders.remove_instance(id);
            self.objects.complete_deletion(id);
        }

        for id in self.objects.staged_ids() {
            let Some(instance) = self.objects.staged(id).cloned() else {
                continue;
            };
            let mesh = self
                .geometry
                .find_mesh_relation(instance.mesh)
                .filter(|_| self.geometry.has_live_mesh(instance.mesh));
            let shader = self.registry.shader_from_hash(instance.material);
            let (Some(mesh), Some(shader)) = (mesh, shader) else {
                log::debug!(
                    "Deferring instance {id}: mesh {} or shader {} not uploaded",
                    instance.mesh,
                    instance.material
                );
                if let Some(instance) = self.objects.take_staged(id) {
                    self.objects.defer(instance);
                }
                continue;
            };

            let reassigned = self.registry.reassignment(id).is_some();
            if !reassigned && self.objects.is_uploaded_unchanged(&instance) {
                log::trace!("Instance {id} unchanged");
                self.objects.take_staged(id);
                continue;
            }

            let handle = match self.objects.find_object_relation(id) {
                Some(handle) => handle,
                None => scene.create_object()?,
            };
            scene.set_object_mesh(handle, mesh);
            scene.set_object_shader(handle, shader);
            scene.set_object_transform(handle, &instance.transform);
            scene.set_object_visibility(handle, visibility(&instance.flags));
            scene.set_object_shadow_flags(handle, shadow_flags(&instance.flags));
            scene.tag_object_update(handle);

            if let Some(edge) = self.registry.complete_reassignment(id) {
                log::trace!("Instance {id} now wears {} (was {})", edge.new, edge.old);
                self.events.push(SyncEvent::ObjectShaderReassigned {
                    instance: id,
                    old: edge.old,
                    new: edge.new,
                    old_shader: self.registry.shader_from_hash(edge.old),
                    shader,
                });
            }
            self.object_shaders
                .record_relation(instance.material, instance.mesh, id);
            self.objects.take_staged(id);
            self.objects.record_object(instance, handle);
        }

        self.upload_dynamic_transforms(scene);
        Ok(())
    }

    /// Sends staged transform-only updates of uploaded instances.
    pub(super) fn upload_dynamic_transforms(&mut self, scene: &mut dyn RenderScene) {
        for (id, transform) in self.objects.dynamic_transforms() {
            match self.objects.find_object_relation(id) {
                Some(handle) => {
                    scene.set_object_transform(handle, &transform);
                    scene.tag_object_update(handle);
                    self.objects.record_transform(id, transform);
                }
                None => log::debug!("Dropping dynamic transform of unknown instance {id}"),
            }
            self.objects.complete_dynamic(id);
        }
    }
}

/// Replays a mesh into the renderer: resize, vertices, triangles, then the
/// optional attributes, then a rebuild tag.
fn upload_buffers(scene: &mut dyn RenderScene, mesh: MeshHandle, buffers: &MeshBuffers) {
    let smooth = buffers.normals.is_some();
    scene.resize_mesh(mesh, buffers.vertex_count(), buffers.triangle_count());
    scene.set_vertices(mesh, &buffers.vertices);
    scene.set_triangles(mesh, &buffers.triangles, smooth);
    if let Some(normals) = &buffers.normals {
        scene.set_normals(mesh, normals);
    }
    if let Some(uvs) = &buffers.uvs {
        scene.set_uvs(mesh, uvs);
    }
    scene.tag_mesh_rebuild(mesh);
}

/// Ray visibility of an instance.
pub(super) fn visibility(flags: &InstanceFlags) -> PathRay {
    if !flags.visible {
        return PathRay::HIDDEN;
    }
    let rays = if flags.shadow_catcher {
        PathRay::CAMERA
    } else {
        PathRay::ALL_VISIBILITY
    };
    if flags.cast_shadow {
        rays
    } else {
        rays.without(PathRay::SHADOW)
    }
}

fn shadow_flags(flags: &InstanceFlags) -> ShadowFlags {
    ShadowFlags {
        shadow_catcher: flags.shadow_catcher,
        mesh_light_no_cast_shadow: !flags.cast_shadow,
        no_self_shadow: flags.no_self_shadow,
    }
}
