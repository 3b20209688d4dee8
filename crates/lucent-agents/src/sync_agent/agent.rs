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

//! The reconciliation agent: staging entry points and the flush driver.

use super::report::{FlushReport, State, UploadOutcome};
use lucent_core::config::SyncSettings;
use lucent_core::event::{EventBus, SyncEvent};
use lucent_core::lane::Lane;
use lucent_core::renderer::{
    CancelToken, FlushFlag, RenderScene, SceneError, ShaderHandle, SyncError,
};
use lucent_core::scene::{
    BackgroundStyle, ChangeKind, DocumentObjectId, DynamicTransform, EnvironmentTexture,
    EnvironmentUsage, InstanceChange, InstanceId, LightDescription, LightId, LightSourceKind,
    MaterialBinding, MaterialChange, MeshKey, MeshSource, ObjectInstance, RenderSettingsRecord,
    RenderSize, ShaderHash, ViewRecord, SUN_LIGHT_ID,
};
use lucent_data::{
    CameraStore, EnvironmentStore, GeometryStore, LightStore, MeshRecord, ObjectShaderStore,
    ObjectStore, RelationEdge, RenderSettingsStore, ShaderRegistry,
};
use lucent_lanes::mesh_lane::cylinder;
use lucent_lanes::{BackgroundLane, LaneError, LightLane, MaterialLane, MeshLane};
use std::collections::HashSet;

/// Reconciles the scene document with a renderer scene.
///
/// The `apply_*` methods stage changes and never touch the renderer. The
/// renderer is only mutated by [`SyncAgent::flush`] and
/// [`SyncAgent::flush_dynamic`].
pub struct SyncAgent {
    /// Settings the lanes were configured from.
    pub(super) config: SyncSettings,

    // --- Stores ---
    pub(super) registry: ShaderRegistry,
    pub(super) object_shaders: ObjectShaderStore,
    pub(super) geometry: GeometryStore,
    pub(super) objects: ObjectStore,
    pub(super) lights: LightStore,
    pub(super) camera: CameraStore,
    pub(super) environment: EnvironmentStore,
    pub(super) settings: RenderSettingsStore,

    // --- Lanes ---
    pub(super) material_lane: MaterialLane,
    pub(super) background_lane: BackgroundLane,
    pub(super) light_lane: LightLane,
    pub(super) mesh_lane: MeshLane,

    /// Events raised by the running flush.
    pub(super) events: Vec<SyncEvent>,
    bus: EventBus<SyncEvent>,
    state: State,
    flush_flag: FlushFlag,

    // --- State carried between flushes ---
    /// Fingerprint and enabled flag of the last staged ground plane.
    pub(super) ground_cache: Option<(u64, bool)>,
    /// Render size of the last uploaded camera.
    pub(super) render_size: Option<RenderSize>,
    /// Fixed output size of a modal session.
    pub(super) modal_size: Option<RenderSize>,
    /// Gamma every compiled shader was built with.
    pub(super) gamma: f32,
    /// Material hashes compiled by the running flush, already at its gamma.
    pub(super) fresh_materials: HashSet<ShaderHash>,
    /// Lights created or rebuilt by the running flush.
    pub(super) fresh_lights: HashSet<LightId>,
    /// The world background shader, once created.
    pub(super) background_shader: Option<ShaderHandle>,
    /// The configured integrator preset has not reached the renderer yet.
    pub(super) integrator_pending: bool,
}

impl SyncAgent {
    /// Creates an agent with empty stores and lanes configured from
    /// `settings`.
    pub fn new(settings: SyncSettings) -> Self {
        log::info!(
            "Creating sync agent ({:?} session, {} ground plane subdivisions)",
            settings.session,
            settings.ground_plane_subdivisions
        );
        let background_lane = if settings.preview_background {
            BackgroundLane::preview()
        } else {
            BackgroundLane::new(&settings)
        };
        let material_lane = MaterialLane::new(&settings);
        let light_lane = LightLane::new(&settings);
        let mesh_lane = MeshLane;
        let lanes: [&dyn Lane; 4] = [&material_lane, &background_lane, &light_lane, &mesh_lane];
        for lane in lanes {
            log::debug!("{} lane: {}", lane.lane_kind(), lane.strategy_name());
        }

        let mut environment = EnvironmentStore::new();
        // The renderer needs a background shader after the first flush.
        environment.mark_modified();

        Self {
            registry: ShaderRegistry::new(),
            object_shaders: ObjectShaderStore::new(),
            geometry: GeometryStore::new(),
            objects: ObjectStore::new(),
            lights: LightStore::new(),
            camera: CameraStore::new(),
            environment,
            settings: RenderSettingsStore::new(),
            material_lane,
            background_lane,
            light_lane,
            mesh_lane,
            events: Vec::new(),
            bus: EventBus::new(),
            state: State::Waiting,
            flush_flag: FlushFlag::new(),
            ground_cache: None,
            render_size: None,
            modal_size: None,
            gamma: 1.0,
            fresh_materials: HashSet::new(),
            fresh_lights: HashSet::new(),
            background_shader: None,
            integrator_pending: true,
            config: settings,
        }
    }

    // --- Staging ---

    /// Stages the geometry of one sub-mesh, replacing anything staged for
    /// the same key.
    ///
    /// # Arguments
    ///
    /// * `key`: The document object and sub-mesh index.
    /// * `source`: Triangulated geometry with per-vertex attributes.
    /// * `material`: Hash of the material the mesh was triangulated with.
    ///
    /// # Errors
    ///
    /// Returns a [`LaneError`] when the geometry is malformed. Nothing is
    /// staged in that case.
    pub fn apply_mesh(
        &mut self,
        key: MeshKey,
        source: &MeshSource,
        material: ShaderHash,
    ) -> Result<(), LaneError> {
        let buffers = self.mesh_lane.prepare(source)?;
        log::trace!(
            "Staging mesh {key}: {} vertices, {} triangles",
            buffers.vertex_count(),
            buffers.triangle_count()
        );
        self.geometry
            .add_mesh(MeshRecord::new(key, buffers, material));
        Ok(())
    }

    /// Stages the removal of every sub-mesh of a document object.
    pub fn apply_mesh_deletion(&mut self, object: DocumentObjectId) {
        self.geometry.delete_mesh(object);
    }

    /// Stages an instance add-or-change together with its material.
    pub fn apply_instance(&mut self, change: InstanceChange) {
        let instance = ObjectInstance::from(&change);
        self.stage_binding(change.id, &change.material);
        self.objects.add_or_update(instance);
    }

    /// Stages the deletion of an instance. The instance is hidden, its mesh
    /// is left alone.
    pub fn apply_instance_deletion(&mut self, id: InstanceId) {
        if self.objects.staged(id).is_none() {
            self.registry.complete_reassignment(id);
        }
        self.objects.delete(id);
    }

    /// Stages a material reassignment of an existing instance.
    pub fn apply_material_change(&mut self, change: MaterialChange) {
        let id = change.instance;
        let known = self
            .objects
            .staged(id)
            .cloned()
            .or_else(|| self.objects.deferred(id).cloned())
            .or_else(|| self.objects.uploaded(id).and_then(|u| u.state.clone()));
        let Some(mut instance) = known else {
            log::warn!("Material change for unknown instance {id}; ignoring it");
            return;
        };
        self.stage_binding(id, &change.material);
        instance.material = change.material.hash;
        self.objects.add_or_update(instance);
    }

    /// Stages a light change. Linear lights become a tube mesh with an
    /// emissive material and an instance drawing it.
    ///
    /// # Errors
    ///
    /// Only linear lights can fail, when their tube cannot be tessellated.
    pub fn apply_light(
        &mut self,
        light: LightDescription,
        change: ChangeKind,
    ) -> Result<(), LaneError> {
        if light.kind == LightSourceKind::Linear {
            return self.stage_linear_light(&light, change);
        }
        log::trace!("Staging {change:?} of light '{}' ({})", light.name, light.id);
        self.lights.stage(light, change);
        Ok(())
    }

    /// Stages the sun. It is a distant light with a fixed identity.
    pub fn apply_sun(&mut self, sun: &LightDescription) {
        let change = if self.lights.uploaded(SUN_LIGHT_ID).is_some() {
            ChangeKind::Modified
        } else {
            ChangeKind::Added
        };
        let sun = LightDescription {
            id: SUN_LIGHT_ID,
            kind: LightSourceKind::Directional,
            ..sun.clone()
        };
        self.lights.stage(sun, change);
    }

    /// Switches skylight on or off and sets its strength.
    pub fn apply_skylight(&mut self, enabled: bool, strength: f32) {
        self.environment.set_skylight_enabled(enabled);
        self.environment.set_skylight_strength(strength);
    }

    /// Assigns or clears the environment used for one purpose.
    pub fn apply_environment(&mut self, usage: EnvironmentUsage, env: Option<EnvironmentTexture>) {
        self.environment.set_environment(usage, env);
    }

    /// Switches planar projection of environment textures.
    pub fn apply_planar_projection(&mut self, planar: bool) {
        self.environment.set_planar_projection(planar);
    }

    /// Stages a render-settings snapshot. An identical snapshot is ignored.
    pub fn apply_render_settings(&mut self, snapshot: RenderSettingsRecord) {
        let delta = self.settings.apply(snapshot);
        if !delta.any() {
            log::trace!("Render settings unchanged");
            return;
        }
        let Some(current) = self.settings.current() else {
            return;
        };
        let style = current.background_style;
        let (top, bottom) = (current.gradient_top, current.gradient_bottom);
        let wallpaper = current.wallpaper.clone().unwrap_or_default();
        let scale_to_fit = current.scale_to_fit;
        let focal_blur = current.focal_blur;
        log::debug!("Render settings changed: {delta:?}");

        if delta.background {
            self.environment.set_background_data(style, top, bottom);
            let name = if style == BackgroundStyle::WallpaperImage {
                wallpaper.as_str()
            } else {
                ""
            };
            self.environment.set_wallpaper(name, scale_to_fit);
        }
        if delta.focal_blur {
            self.camera.set_focal_blur(focal_blur);
        }
    }

    /// Stages a new view.
    pub fn apply_view(&mut self, view: ViewRecord) {
        self.camera.set_view(view);
    }

    /// Fixes the output size of a modal session. Interactive sessions keep
    /// following the viewport.
    pub fn apply_modal_render_size(&mut self, size: RenderSize) {
        self.modal_size = Some(size);
    }

    /// Stages transform-only updates of uploaded instances.
    pub fn apply_dynamic_object_transforms(&mut self, transforms: &[DynamicTransform]) {
        for t in transforms {
            self.objects.set_dynamic_transform(t.id, t.transform);
        }
    }

    /// Stages a camera move during interactive manipulation.
    pub fn apply_dynamic_camera(&mut self, view: ViewRecord) {
        self.camera.set_view(view);
    }

    /// Registers `binding` and records the reassignment of `instance` against
    /// the shader the renderer currently shows on it.
    pub(super) fn stage_binding(&mut self, instance: InstanceId, binding: &MaterialBinding) {
        if self.registry.add_shader(binding) {
            log::debug!(
                "New material '{}' ({})",
                binding.material.name,
                binding.hash
            );
        }
        let old = self.object_shaders.find_or_default(instance);
        self.registry.add_reassignment(RelationEdge {
            instance,
            old,
            new: binding.hash,
        });
    }

    fn stage_linear_light(
        &mut self,
        light: &LightDescription,
        change: ChangeKind,
    ) -> Result<(), LaneError> {
        let key = LightLane::linear_mesh_key(light);
        let instance_id = LightLane::linear_instance_id(light);

        if change == ChangeKind::Deleted {
            log::debug!("Deleting linear light '{}' ({})", light.name, light.id);
            self.lights.forget_linear(light.id);
            self.apply_instance_deletion(instance_id);
            self.geometry.delete_mesh(key.object);
            return Ok(());
        }

        let (start, axis, radius) = LightLane::linear_tube(light);
        let tube = cylinder(start, axis, radius, self.config.linear_light_segments);
        let binding = self.light_lane.linear_material(light);
        self.apply_mesh(key, &tube, binding.hash)?;
        self.stage_binding(instance_id, &binding);
        self.objects
            .add_or_update(self.light_lane.linear_instance(light));
        self.lights.record_linear(light.id, binding.hash);
        Ok(())
    }

    // --- Flushing ---

    /// Pushes everything staged into `scene`.
    ///
    /// Stages run in dependency order and `cancel` is polled between units of
    /// work. Staging is reset only when every stage completed; a cancelled
    /// flush keeps the unfinished work for the next call.
    ///
    /// # Errors
    ///
    /// Fails when a renderer call fails or a generated shader graph is
    /// invalid, and with [`SyncError::AlreadyUploading`] when another flush
    /// holds the flush flag.
    pub fn flush(
        &mut self,
        scene: &mut dyn RenderScene,
        cancel: &CancelToken,
    ) -> Result<FlushReport, SyncError> {
        if self.state == State::Stopped {
            log::warn!("Flush requested on a stopped session; ignoring it");
            return Ok(self.report(UploadOutcome::Cancelled));
        }
        if !self.flush_flag.try_claim() {
            return Err(SyncError::AlreadyUploading);
        }
        self.state = State::Uploading;
        self.objects.promote_deferred();

        let result = self.run_stages(scene, cancel);
        self.flush_flag.clear();

        match result {
            Ok(UploadOutcome::Completed) => {
                self.reset();
                self.state = State::Rendering;
                let report = self.report(UploadOutcome::Completed);
                log::debug!("Flush completed with {} event(s)", report.events.len());
                Ok(report)
            }
            Ok(UploadOutcome::Cancelled) => {
                self.state = State::Waiting;
                log::info!(
                    "Flush cancelled; {} mesh(es) and {} shader(s) left staged",
                    self.geometry.staged_len(),
                    self.registry.pending().len()
                );
                Ok(self.report(UploadOutcome::Cancelled))
            }
            Err(e) => {
                self.state = State::Waiting;
                log::warn!("Flush failed: {e}");
                let raised = std::mem::take(&mut self.events);
                self.bus.publish_all(raised);
                Err(e)
            }
        }
    }

    /// Sends only transform-only updates: staged dynamic object transforms
    /// and the camera. Meshes, materials and lights are left staged.
    ///
    /// # Errors
    ///
    /// Fails with [`SyncError::AlreadyUploading`] when a full flush is
    /// running.
    pub fn flush_dynamic(
        &mut self,
        scene: &mut dyn RenderScene,
        cancel: &CancelToken,
    ) -> Result<FlushReport, SyncError> {
        if self.state == State::Stopped {
            return Ok(self.report(UploadOutcome::Cancelled));
        }
        if !self.flush_flag.try_claim() {
            return Err(SyncError::AlreadyUploading);
        }
        let outcome = if cancel.is_cancelled() {
            UploadOutcome::Cancelled
        } else {
            self.upload_dynamic_transforms(scene);
            self.upload_camera(scene);
            UploadOutcome::Completed
        };
        self.flush_flag.clear();
        Ok(self.report(outcome))
    }

    fn run_stages(
        &mut self,
        scene: &mut dyn RenderScene,
        cancel: &CancelToken,
    ) -> Result<UploadOutcome, SyncError> {
        self.fresh_materials.clear();
        self.fresh_lights.clear();
        if self.upload_materials(scene, cancel)?.is_cancelled()
            || self.upload_meshes(scene, cancel)?.is_cancelled()
            || self.upload_lights(scene, cancel)?.is_cancelled()
        {
            return Ok(UploadOutcome::Cancelled);
        }
        if cancel.is_cancelled() {
            return Ok(UploadOutcome::Cancelled);
        }
        self.upload_environment(scene)?;
        self.upload_camera(scene);
        self.upload_objects(scene)?;
        self.upload_gamma(scene)?;
        self.upload_settings(scene);
        Ok(UploadOutcome::Completed)
    }

    /// Drains the events of this flush into a report and publishes them.
    fn report(&mut self, outcome: UploadOutcome) -> FlushReport {
        let events = std::mem::take(&mut self.events);
        self.bus.publish_all(events.iter().cloned());
        FlushReport { outcome, events }
    }

    pub(super) fn reset(&mut self) {
        self.registry.reset();
        self.geometry.reset();
        self.objects.reset();
        self.lights.reset();
        self.camera.reset();
        self.environment.reset();
        self.settings.reset();
    }

    // --- Session ---

    /// True when anything is staged for the next flush.
    pub fn has_changes(&self) -> bool {
        self.registry.has_changes()
            || self.geometry.has_changes()
            || self.objects.has_changes()
            || self.lights.has_changes()
            || self.camera.is_modified()
            || self.environment.is_modified()
            || self.settings.is_modified()
            || self.integrator_pending
    }

    /// Marks the session as rendering without a flush, e.g. after the
    /// renderer restarted its sampling loop.
    pub fn start_rendering(&mut self) {
        if self.state != State::Stopped {
            self.state = State::Rendering;
        }
    }

    /// Ends the session. Later flushes are refused.
    pub fn stop(&mut self) {
        log::info!("Sync agent stopped");
        self.state = State::Stopped;
    }

    /// Current session state.
    pub fn state(&self) -> State {
        self.state
    }

    /// The flag guarding flushes. Clones share the flag, so the renderer
    /// thread can observe it.
    pub fn flush_flag(&self) -> FlushFlag {
        self.flush_flag.clone()
    }

    /// The bus every flush publishes its events on.
    pub fn event_bus(&self) -> &EventBus<SyncEvent> {
        &self.bus
    }

    /// The settings the agent was created with.
    pub fn settings(&self) -> &SyncSettings {
        &self.config
    }

    /// Gamma the compiled shaders currently use.
    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    /// The world background shader, once uploaded.
    pub fn background_shader(&self) -> Option<ShaderHandle> {
        self.background_shader
    }

    /// The shader registry.
    pub fn registry(&self) -> &ShaderRegistry {
        &self.registry
    }

    /// The instance / shader relations as the renderer sees them.
    pub fn object_shaders(&self) -> &ObjectShaderStore {
        &self.object_shaders
    }

    /// The geometry store.
    pub fn geometry(&self) -> &GeometryStore {
        &self.geometry
    }

    /// The object store.
    pub fn objects(&self) -> &ObjectStore {
        &self.objects
    }

    /// The light store.
    pub fn lights(&self) -> &LightStore {
        &self.lights
    }
}

impl Default for SyncAgent {
    fn default() -> Self {
        Self::new(SyncSettings::default())
    }
}

/// Maps a lane failure raised during upload onto the flush error.
pub(super) fn lane_failure(e: LaneError) -> SyncError {
    match e {
        LaneError::Graph { source, .. } => SyncError::Graph(source),
        other => SyncError::Scene(SceneError::CreationFailed {
            kind: "shader",
            details: other.to_string(),
        }),
    }
}
