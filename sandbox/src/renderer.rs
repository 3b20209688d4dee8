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

//! A renderer that only logs what it is asked to do.

use lucent_core::math::Transform;
use lucent_core::renderer::{
    LightHandle, MeshHandle, ObjectHandle, PathRay, RenderScene, SceneError, SceneShaderId,
    ShaderHandle, ShadowFlags,
};
use lucent_core::scene::{CameraParams, IntegratorSettings, LightRecord};
use lucent_core::shader::{ShaderDescription, ShaderGraph};

/// Hands out handles, counts resources and logs every call at `debug`.
#[derive(Debug, Default)]
pub struct LoggingScene {
    next_handle: u32,
    calls: usize,
    meshes: usize,
    shaders: usize,
    objects: usize,
    lights: usize,
    triangles: usize,
}

impl LoggingScene {
    fn handle(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }

    fn call(&mut self) {
        self.calls += 1;
    }

    /// Calls received since the last time this was asked.
    pub fn take_call_count(&mut self) -> usize {
        std::mem::take(&mut self.calls)
    }

    /// One-line inventory of the renderer scene.
    pub fn summary(&self) -> String {
        format!(
            "Renderer scene: {} meshes ({} triangles), {} shaders, {} objects, {} lights",
            self.meshes, self.triangles, self.shaders, self.objects, self.lights
        )
    }
}

impl RenderScene for LoggingScene {
    fn create_mesh(&mut self) -> Result<MeshHandle, SceneError> {
        self.call();
        self.meshes += 1;
        let mesh = MeshHandle(self.handle());
        log::debug!("create {mesh}");
        Ok(mesh)
    }

    fn resize_mesh(&mut self, mesh: MeshHandle, vertex_count: usize, triangle_count: usize) {
        self.call();
        self.triangles += triangle_count;
        log::debug!("resize {mesh}: {vertex_count} vertices, {triangle_count} triangles");
    }

    fn set_vertices(&mut self, _mesh: MeshHandle, _vertices: &[f32]) {
        self.call();
    }

    fn set_triangles(&mut self, _mesh: MeshHandle, _triangles: &[u32], _smooth: bool) {
        self.call();
    }

    fn set_normals(&mut self, _mesh: MeshHandle, _normals: &[f32]) {
        self.call();
    }

    fn set_uvs(&mut self, _mesh: MeshHandle, _uvs: &[f32]) {
        self.call();
    }

    fn clear_mesh(&mut self, mesh: MeshHandle) {
        self.call();
        log::debug!("clear {mesh}");
    }

    fn tag_mesh_rebuild(&mut self, _mesh: MeshHandle) {
        self.call();
    }

    fn create_material_shader(
        &mut self,
        description: &ShaderDescription,
    ) -> Result<ShaderHandle, SceneError> {
        self.call();
        self.shaders += 1;
        let shader = ShaderHandle(self.handle());
        log::debug!(
            "compile {shader} '{}' ({}, gamma {})",
            description.name,
            description.hash,
            description.gamma
        );
        Ok(shader)
    }

    fn rebuild_material_shader(
        &mut self,
        shader: ShaderHandle,
        description: &ShaderDescription,
    ) -> Result<(), SceneError> {
        self.call();
        log::debug!("recompile {shader} at gamma {}", description.gamma);
        Ok(())
    }

    fn create_graph_shader(&mut self, graph: &ShaderGraph) -> Result<ShaderHandle, SceneError> {
        self.call();
        self.shaders += 1;
        let shader = ShaderHandle(self.handle());
        log::debug!(
            "lower {shader} '{}' ({} nodes)",
            graph.name(),
            graph.nodes().len()
        );
        Ok(shader)
    }

    fn rebuild_graph_shader(
        &mut self,
        shader: ShaderHandle,
        graph: &ShaderGraph,
    ) -> Result<(), SceneError> {
        self.call();
        log::debug!("relower {shader} '{}'", graph.name());
        Ok(())
    }

    fn add_shader_to_scene(&mut self, shader: ShaderHandle) -> SceneShaderId {
        self.call();
        SceneShaderId(shader.0)
    }

    fn tag_shader(&mut self, _shader: ShaderHandle) {
        self.call();
    }

    fn create_object(&mut self) -> Result<ObjectHandle, SceneError> {
        self.call();
        self.objects += 1;
        Ok(ObjectHandle(self.handle()))
    }

    fn set_object_mesh(&mut self, object: ObjectHandle, mesh: MeshHandle) {
        self.call();
        log::debug!("{object} draws {mesh}");
    }

    fn set_object_shader(&mut self, object: ObjectHandle, shader: ShaderHandle) {
        self.call();
        log::debug!("{object} wears {shader}");
    }

    fn set_object_transform(&mut self, object: ObjectHandle, transform: &Transform) {
        self.call();
        log::trace!("{object} moved to {:?}", transform.translation());
    }

    fn set_object_visibility(&mut self, object: ObjectHandle, visibility: PathRay) {
        self.call();
        if visibility.is_hidden() {
            log::debug!("{object} hidden");
        }
    }

    fn set_object_shadow_flags(&mut self, _object: ObjectHandle, _flags: ShadowFlags) {
        self.call();
    }

    fn tag_object_update(&mut self, _object: ObjectHandle) {
        self.call();
    }

    fn create_light(&mut self, shader: ShaderHandle) -> Result<LightHandle, SceneError> {
        self.call();
        self.lights += 1;
        let light = LightHandle(self.handle());
        log::debug!("create {light} driven by {shader}");
        Ok(light)
    }

    fn update_light(&mut self, light: LightHandle, record: &LightRecord) {
        self.call();
        log::debug!("{light}: {:?} at strength {}", record.kind, record.strength);
    }

    fn tag_light_update(&mut self, _light: LightHandle) {
        self.call();
    }

    fn set_background_shader(&mut self, shader: ShaderHandle) {
        self.call();
        log::debug!("background is {shader}");
    }

    fn set_camera(&mut self, camera: &CameraParams) {
        self.call();
        log::debug!(
            "camera {}x{}, fov {:.3}",
            camera.size.width,
            camera.size.height,
            camera.fov
        );
    }

    fn apply_integrator(&mut self, settings: &IntegratorSettings) {
        self.call();
        log::debug!("integrator: {} samples", settings.samples);
    }

    fn tag_film_update(&mut self) {
        self.call();
    }
}
