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

//! Shared fixtures for the sync agent integration tests: a renderer that
//! records every call, and small scene builders.

#![allow(dead_code)]

use lucent_core::math::{LinearRgba, Transform, Vec2, Vec3};
use lucent_core::renderer::{
    CancelToken, LightHandle, MeshHandle, ObjectHandle, PathRay, RenderScene, SceneError,
    SceneShaderId, ShaderHandle, ShadowFlags,
};
use lucent_core::scene::{
    CameraParams, DocumentObjectId, InstanceChange, InstanceFlags, InstanceId, IntegratorSettings,
    LightRecord, MaterialBinding, MaterialDescription, MeshKey, MeshSource, NativeMaterial,
    ShaderHash,
};
use lucent_core::shader::{ShaderDescription, ShaderGraph};
use std::collections::{BTreeSet, HashMap};

/// One renderer call, with the arguments the tests care about.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateMesh(MeshHandle),
    ResizeMesh(MeshHandle, usize, usize),
    SetVertices(MeshHandle, usize),
    SetTriangles(MeshHandle, usize, bool),
    SetNormals(MeshHandle),
    SetUvs(MeshHandle, usize),
    ClearMesh(MeshHandle),
    TagMeshRebuild(MeshHandle),
    CreateMaterialShader(ShaderHandle, ShaderHash),
    RebuildMaterialShader(ShaderHandle, f32),
    CreateGraphShader(ShaderHandle, String),
    RebuildGraphShader(ShaderHandle, String),
    AddShaderToScene(ShaderHandle),
    TagShader(ShaderHandle),
    CreateObject(ObjectHandle),
    SetObjectMesh(ObjectHandle, MeshHandle),
    SetObjectShader(ObjectHandle, ShaderHandle),
    SetObjectTransform(ObjectHandle, Transform),
    SetObjectVisibility(ObjectHandle, PathRay),
    SetObjectShadowFlags(ObjectHandle, ShadowFlags),
    TagObjectUpdate(ObjectHandle),
    CreateLight(LightHandle, ShaderHandle),
    UpdateLight(LightHandle, LightRecord),
    TagLightUpdate(LightHandle),
    SetBackgroundShader(ShaderHandle),
    SetCamera(CameraParams),
    ApplyIntegrator(IntegratorSettings),
    TagFilmUpdate,
}

/// A renderer that hands out sequential handles and records every call.
///
/// It can cancel a token once a given number of meshes finished uploading,
/// to simulate a session cancelled mid-batch.
#[derive(Debug, Default)]
pub struct RecordingScene {
    pub calls: Vec<Call>,
    next_handle: u32,
    /// Meshes holding geometry.
    pub live_meshes: BTreeSet<MeshHandle>,
    /// Shader handle to the name of the graph it was built from.
    pub graph_names: HashMap<ShaderHandle, String>,
    /// Gamma each material shader was last built with.
    pub material_gammas: HashMap<ShaderHandle, f32>,
    cleared: BTreeSet<MeshHandle>,
    cancel_after: Option<(usize, CancelToken)>,
    meshes_uploaded: usize,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels `token` right after the `count`-th mesh upload completes.
    pub fn cancel_after_meshes(count: usize, token: CancelToken) -> Self {
        Self {
            cancel_after: Some((count, token)),
            ..Self::default()
        }
    }

    fn next(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }

    /// Forgets recorded calls, keeping handles and live meshes.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn position(&self, pred: impl Fn(&Call) -> bool) -> Option<usize> {
        self.calls.iter().position(pred)
    }

    pub fn last_position(&self, pred: impl Fn(&Call) -> bool) -> Option<usize> {
        self.calls.iter().rposition(pred)
    }
}

impl RenderScene for RecordingScene {
    fn create_mesh(&mut self) -> Result<MeshHandle, SceneError> {
        let h = MeshHandle(self.next());
        self.calls.push(Call::CreateMesh(h));
        Ok(h)
    }

    fn resize_mesh(&mut self, mesh: MeshHandle, vertex_count: usize, triangle_count: usize) {
        self.calls
            .push(Call::ResizeMesh(mesh, vertex_count, triangle_count));
    }

    fn set_vertices(&mut self, mesh: MeshHandle, vertices: &[f32]) {
        self.calls.push(Call::SetVertices(mesh, vertices.len()));
    }

    fn set_triangles(&mut self, mesh: MeshHandle, triangles: &[u32], smooth: bool) {
        self.calls
            .push(Call::SetTriangles(mesh, triangles.len(), smooth));
    }

    fn set_normals(&mut self, mesh: MeshHandle, _normals: &[f32]) {
        self.calls.push(Call::SetNormals(mesh));
    }

    fn set_uvs(&mut self, mesh: MeshHandle, uvs: &[f32]) {
        self.calls.push(Call::SetUvs(mesh, uvs.len()));
    }

    fn clear_mesh(&mut self, mesh: MeshHandle) {
        self.live_meshes.remove(&mesh);
        self.cleared.insert(mesh);
        self.calls.push(Call::ClearMesh(mesh));
    }

    fn tag_mesh_rebuild(&mut self, mesh: MeshHandle) {
        self.calls.push(Call::TagMeshRebuild(mesh));
        if self.cleared.remove(&mesh) {
            return;
        }
        self.live_meshes.insert(mesh);
        self.meshes_uploaded += 1;
        if let Some((count, token)) = &self.cancel_after {
            if self.meshes_uploaded == *count {
                token.cancel();
            }
        }
    }

    fn create_material_shader(
        &mut self,
        description: &ShaderDescription,
    ) -> Result<ShaderHandle, SceneError> {
        let h = ShaderHandle(self.next());
        self.material_gammas.insert(h, description.gamma);
        self.calls
            .push(Call::CreateMaterialShader(h, description.hash));
        Ok(h)
    }

    fn rebuild_material_shader(
        &mut self,
        shader: ShaderHandle,
        description: &ShaderDescription,
    ) -> Result<(), SceneError> {
        self.material_gammas.insert(shader, description.gamma);
        self.calls
            .push(Call::RebuildMaterialShader(shader, description.gamma));
        Ok(())
    }

    fn create_graph_shader(&mut self, graph: &ShaderGraph) -> Result<ShaderHandle, SceneError> {
        let h = ShaderHandle(self.next());
        self.graph_names.insert(h, graph.name().to_string());
        self.calls
            .push(Call::CreateGraphShader(h, graph.name().to_string()));
        Ok(h)
    }

    fn rebuild_graph_shader(
        &mut self,
        shader: ShaderHandle,
        graph: &ShaderGraph,
    ) -> Result<(), SceneError> {
        self.calls
            .push(Call::RebuildGraphShader(shader, graph.name().to_string()));
        Ok(())
    }

    fn add_shader_to_scene(&mut self, shader: ShaderHandle) -> SceneShaderId {
        self.calls.push(Call::AddShaderToScene(shader));
        SceneShaderId(shader.0)
    }

    fn tag_shader(&mut self, shader: ShaderHandle) {
        self.calls.push(Call::TagShader(shader));
    }

    fn create_object(&mut self) -> Result<ObjectHandle, SceneError> {
        let h = ObjectHandle(self.next());
        self.calls.push(Call::CreateObject(h));
        Ok(h)
    }

    fn set_object_mesh(&mut self, object: ObjectHandle, mesh: MeshHandle) {
        self.calls.push(Call::SetObjectMesh(object, mesh));
    }

    fn set_object_shader(&mut self, object: ObjectHandle, shader: ShaderHandle) {
        self.calls.push(Call::SetObjectShader(object, shader));
    }

    fn set_object_transform(&mut self, object: ObjectHandle, transform: &Transform) {
        self.calls
            .push(Call::SetObjectTransform(object, *transform));
    }

    fn set_object_visibility(&mut self, object: ObjectHandle, visibility: PathRay) {
        self.calls
            .push(Call::SetObjectVisibility(object, visibility));
    }

    fn set_object_shadow_flags(&mut self, object: ObjectHandle, flags: ShadowFlags) {
        self.calls.push(Call::SetObjectShadowFlags(object, flags));
    }

    fn tag_object_update(&mut self, object: ObjectHandle) {
        self.calls.push(Call::TagObjectUpdate(object));
    }

    fn create_light(&mut self, shader: ShaderHandle) -> Result<LightHandle, SceneError> {
        let h = LightHandle(self.next());
        self.calls.push(Call::CreateLight(h, shader));
        Ok(h)
    }

    fn update_light(&mut self, light: LightHandle, record: &LightRecord) {
        self.calls.push(Call::UpdateLight(light, record.clone()));
    }

    fn tag_light_update(&mut self, light: LightHandle) {
        self.calls.push(Call::TagLightUpdate(light));
    }

    fn set_background_shader(&mut self, shader: ShaderHandle) {
        self.calls.push(Call::SetBackgroundShader(shader));
    }

    fn set_camera(&mut self, camera: &CameraParams) {
        self.calls.push(Call::SetCamera(camera.clone()));
    }

    fn apply_integrator(&mut self, settings: &IntegratorSettings) {
        self.calls.push(Call::ApplyIntegrator(settings.clone()));
    }

    fn tag_film_update(&mut self) {
        self.calls.push(Call::TagFilmUpdate);
    }
}

// ─── Scene builders ─────────────────────────────────────────────────────────

/// A document object id derived from a small number.
pub fn object(n: u128) -> DocumentObjectId {
    DocumentObjectId::from_u128(0x1000 + n)
}

/// Sub-mesh 0 of `object(n)`.
pub fn mesh_key(n: u128) -> MeshKey {
    MeshKey::new(object(n), 0)
}

/// A single triangle with per-vertex UVs, lifted to height `z`.
pub fn triangle(z: f32) -> MeshSource {
    MeshSource {
        vertices: vec![
            Vec3::new(0.0, 0.0, z),
            Vec3::new(1.0, 0.0, z),
            Vec3::new(0.0, 1.0, z),
        ],
        triangles: vec![[0, 1, 2]],
        uvs: Some(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)]),
        normals: None,
    }
}

/// A diffuse material bound to a fixed hash.
pub fn material(hash: u32, name: &str) -> MaterialBinding {
    MaterialBinding::with_hash(
        ShaderHash(hash),
        MaterialDescription::native(
            name,
            NativeMaterial::Diffuse {
                color: LinearRgba::rgb(0.8, 0.2, 0.1),
            },
        ),
    )
}

/// An instance of `mesh_key(mesh)` wearing `binding`.
pub fn instance(id: u32, mesh: u128, binding: MaterialBinding) -> InstanceChange {
    InstanceChange {
        id: InstanceId(id),
        mesh: mesh_key(mesh),
        transform: Transform::from_translation(Vec3::new(id as f32, 0.0, 0.0)),
        material: binding,
        flags: InstanceFlags::default(),
    }
}

/// Every call touching `mesh`'s geometry.
pub fn is_mesh_upload(call: &Call) -> bool {
    matches!(
        call,
        Call::ResizeMesh(..) | Call::SetVertices(..) | Call::SetTriangles(..) | Call::SetUvs(..)
    )
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
