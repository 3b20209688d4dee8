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

//! Shading stages: lights, the world background and the gamma pass.

use super::agent::{lane_failure, SyncAgent};
use super::report::UploadOutcome;
use lucent_core::event::SyncEvent;
use lucent_core::math::EPSILON;
use lucent_core::renderer::{CancelToken, RenderScene, ShaderHandle, SyncError};
use lucent_core::scene::{ChangeKind, MaterialBinding};
use lucent_data::UploadedLight;

impl SyncAgent {
    /// Gamma the running flush ends with: the pending linear workflow when a
    /// settings snapshot changed it, otherwise the current one.
    pub(super) fn flush_gamma(&self) -> f32 {
        if self.settings.pending().linear_workflow {
            self.settings.linear_workflow().effective_gamma()
        } else {
            self.gamma
        }
    }

    /// Creates or updates staged lights, rebuilding their emission shaders.
    /// Cancellation is polled before each light.
    pub(super) fn upload_lights(
        &mut self,
        scene: &mut dyn RenderScene,
        cancel: &CancelToken,
    ) -> Result<UploadOutcome, SyncError> {
        let ids = self.lights.staged_ids();
        if !ids.is_empty() {
            log::debug!("Uploading {} light(s)", ids.len());
        }
        for id in ids {
            if cancel.is_cancelled() {
                log::debug!("Light stage cancelled before {id}");
                return Ok(UploadOutcome::Cancelled);
            }
            let Some(staged) = self.lights.staged(id) else {
                continue;
            };
            let change = staged.change;
            let Some(record) = self.light_lane.convert(&staged.light, change) else {
                log::warn!("Light {id} has no renderer light; dropping the change");
                self.lights.take_staged(id);
                continue;
            };
            let uploaded = self.lights.uploaded(id).cloned();
            if uploaded.is_none() && change == ChangeKind::Deleted {
                self.lights.take_staged(id);
                continue;
            }

            let graph = self
                .light_lane
                .emission_graph(&record, self.flush_gamma())
                .map_err(lane_failure)?;
            let (light, shader) = match uploaded {
                Some(u) => {
                    scene.rebuild_graph_shader(u.shader, &graph)?;
                    scene.tag_shader(u.shader);
                    self.events.push(SyncEvent::LightShaderChanged {
                        light: id,
                        shader: u.shader,
                    });
                    (u.light, u.shader)
                }
                None => {
                    let shader = scene.create_graph_shader(&graph)?;
                    scene.add_shader_to_scene(shader);
                    scene.tag_shader(shader);
                    (scene.create_light(shader)?, shader)
                }
            };
            scene.update_light(light, &record);
            scene.tag_light_update(light);
            log::trace!("Uploaded {:?} light {id} as {light}", record.kind);

            self.lights.take_staged(id);
            self.lights.record_uploaded(
                id,
                UploadedLight {
                    light,
                    shader,
                    record,
                },
            );
            self.fresh_lights.insert(id);
        }
        Ok(UploadOutcome::Completed)
    }

    /// Recompiles the background network when the environment changed.
    pub(super) fn upload_environment(
        &mut self,
        scene: &mut dyn RenderScene,
    ) -> Result<(), SyncError> {
        if !self.environment.is_modified() {
            return Ok(());
        }
        self.upload_background(scene)?;
        self.environment.reset();
        Ok(())
    }

    fn upload_background(&mut self, scene: &mut dyn RenderScene) -> Result<(), SyncError> {
        let description = self.environment.description();
        log::debug!(
            "Compiling background ({:?}, {:?})",
            description.style,
            description.branch()
        );
        let graph = self
            .background_lane
            .compile(description)
            .map_err(lane_failure)?;
        let shader = match self.background_shader {
            Some(shader) => {
                scene.rebuild_graph_shader(shader, &graph)?;
                shader
            }
            None => {
                let shader = scene.create_graph_shader(&graph)?;
                scene.add_shader_to_scene(shader);
                self.background_shader = Some(shader);
                shader
            }
        };
        scene.tag_shader(shader);
        scene.set_background_shader(shader);
        Ok(())
    }

    /// Applies a linear-workflow change.
    ///
    /// When the effective gamma moves, the background and every compiled
    /// material and light shader are rebuilt with it, except those the
    /// running flush already built at that gamma. Geometry is untouched.
    pub(super) fn upload_gamma(&mut self, scene: &mut dyn RenderScene) -> Result<(), SyncError> {
        if !self.settings.pending().linear_workflow {
            return Ok(());
        }
        let workflow = self.settings.linear_workflow();
        let gamma = workflow.effective_gamma();

        if (gamma - self.gamma).abs() > EPSILON {
            log::info!("Gamma changed from {} to {gamma}; rebuilding shaders", self.gamma);
            self.gamma = gamma;
            self.environment.set_gamma(gamma);
            self.upload_background(scene)?;
            self.environment.reset();

            let compiled: Vec<(MaterialBinding, ShaderHandle)> = self
                .registry
                .compiled()
                .into_iter()
                .filter(|r| !self.fresh_materials.contains(&r.hash))
                .filter_map(|r| {
                    r.handle
                        .map(|h| (MaterialBinding::with_hash(r.hash, r.material.clone()), h))
                })
                .collect();
            for (binding, shader) in compiled {
                let description = self.material_lane.compile(&binding, gamma);
                scene.rebuild_material_shader(shader, &description)?;
                scene.tag_shader(shader);
                self.events.push(SyncEvent::MaterialShaderChanged {
                    hash: binding.hash,
                    shader,
                });
            }

            let lights: Vec<_> = self
                .lights
                .uploaded_lights()
                .into_iter()
                .filter(|(id, _)| !self.fresh_lights.contains(id))
                .collect();
            for (id, uploaded) in lights {
                let graph = self
                    .light_lane
                    .emission_graph(&uploaded.record, gamma)
                    .map_err(lane_failure)?;
                scene.rebuild_graph_shader(uploaded.shader, &graph)?;
                scene.tag_shader(uploaded.shader);
                scene.tag_light_update(uploaded.light);
                self.events.push(SyncEvent::LightShaderChanged {
                    light: id,
                    shader: uploaded.shader,
                });
            }
        }

        self.events.push(SyncEvent::LinearWorkflowChanged(workflow));
        self.events.push(SyncEvent::FilmNeedsRecompute);
        scene.tag_film_update();
        self.settings.complete_linear_workflow();
        Ok(())
    }
}
