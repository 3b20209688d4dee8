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

//! The renderer-engine collaborator, as seen by the synchronizer.

use super::error::SceneError;
use super::flags::{PathRay, ShadowFlags};
use super::handles::{LightHandle, MeshHandle, ObjectHandle, SceneShaderId, ShaderHandle};
use crate::math::Transform;
use crate::scene::light::LightRecord;
use crate::scene::settings::IntegratorSettings;
use crate::scene::view::CameraParams;
use crate::shader::{ShaderDescription, ShaderGraph};

/// A retained-mode renderer scene.
///
/// Every method is a direct mutation of renderer-owned state. The
/// synchronizer calls them only from its upload stages, from a single
/// thread, in dependency order: shaders exist before objects use them,
/// meshes are filled before objects point at them.
///
/// Creation can fail; mutations of existing resources are fire-and-forget.
pub trait RenderScene {
    /// Creates an empty mesh.
    fn create_mesh(&mut self) -> Result<MeshHandle, SceneError>;
    /// Resizes the mesh buffers.
    fn resize_mesh(&mut self, mesh: MeshHandle, vertex_count: usize, triangle_count: usize);
    /// Replaces the vertex positions (flat `xyz`).
    fn set_vertices(&mut self, mesh: MeshHandle, vertices: &[f32]);
    /// Replaces the triangle indices (flat triples).
    fn set_triangles(&mut self, mesh: MeshHandle, triangles: &[u32], smooth: bool);
    /// Replaces the vertex normals (flat `xyz`).
    fn set_normals(&mut self, mesh: MeshHandle, normals: &[f32]);
    /// Replaces the per-corner UVs (flat `uv` pairs).
    fn set_uvs(&mut self, mesh: MeshHandle, uvs: &[f32]);
    /// Drops all geometry of the mesh.
    fn clear_mesh(&mut self, mesh: MeshHandle);
    /// Marks the mesh for a BVH rebuild.
    fn tag_mesh_rebuild(&mut self, mesh: MeshHandle);

    /// Compiles a surface shader from a normalised description.
    fn create_material_shader(
        &mut self,
        description: &ShaderDescription,
    ) -> Result<ShaderHandle, SceneError>;
    /// Recompiles an existing surface shader in place.
    fn rebuild_material_shader(
        &mut self,
        shader: ShaderHandle,
        description: &ShaderDescription,
    ) -> Result<(), SceneError>;
    /// Lowers a validated node graph into a new shader.
    fn create_graph_shader(&mut self, graph: &ShaderGraph) -> Result<ShaderHandle, SceneError>;
    /// Replaces the node graph of an existing shader.
    fn rebuild_graph_shader(
        &mut self,
        shader: ShaderHandle,
        graph: &ShaderGraph,
    ) -> Result<(), SceneError>;
    /// Registers a shader with the scene and returns the id it was given.
    fn add_shader_to_scene(&mut self, shader: ShaderHandle) -> SceneShaderId;
    /// Marks a shader as needing an update.
    fn tag_shader(&mut self, shader: ShaderHandle);

    /// Creates an object instance.
    fn create_object(&mut self) -> Result<ObjectHandle, SceneError>;
    /// Points an object at a mesh.
    fn set_object_mesh(&mut self, object: ObjectHandle, mesh: MeshHandle);
    /// Assigns a surface shader to an object.
    fn set_object_shader(&mut self, object: ObjectHandle, shader: ShaderHandle);
    /// Sets the object's world transform.
    fn set_object_transform(&mut self, object: ObjectHandle, transform: &Transform);
    /// Sets which ray types see the object.
    fn set_object_visibility(&mut self, object: ObjectHandle, visibility: PathRay);
    /// Sets shadow behaviour.
    fn set_object_shadow_flags(&mut self, object: ObjectHandle, flags: ShadowFlags);
    /// Marks an object as needing an update.
    fn tag_object_update(&mut self, object: ObjectHandle);

    /// Creates a light driven by the given emission shader.
    fn create_light(&mut self, shader: ShaderHandle) -> Result<LightHandle, SceneError>;
    /// Copies every field of `record` onto the light.
    fn update_light(&mut self, light: LightHandle, record: &LightRecord);
    /// Marks a light as needing an update.
    fn tag_light_update(&mut self, light: LightHandle);

    /// Swaps the world background shader.
    fn set_background_shader(&mut self, shader: ShaderHandle);
    /// Replaces the camera.
    fn set_camera(&mut self, camera: &CameraParams);
    /// Applies integrator settings.
    fn apply_integrator(&mut self, settings: &IntegratorSettings);
    /// Marks the film as needing recomputation.
    fn tag_film_update(&mut self);
}
