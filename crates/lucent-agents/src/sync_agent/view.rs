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

//! View stages: camera and render settings.

use super::agent::SyncAgent;
use lucent_core::config::SessionKind;
use lucent_core::event::SyncEvent;
use lucent_core::renderer::RenderScene;
use lucent_core::scene::{CameraParams, FocalBlur, RenderSize, ViewRecord, FAR_CLIP};

impl SyncAgent {
    /// Sends the camera when the view or the focal blur changed, and raises
    /// [`SyncEvent::ViewChanged`].
    pub(super) fn upload_camera(&mut self, scene: &mut dyn RenderScene) {
        if !self.camera.is_modified() {
            return;
        }
        let Some(view) = self.camera.view().cloned() else {
            log::debug!("Camera settings changed before any view arrived");
            return;
        };
        let size = match (self.config.session, self.modal_size) {
            (SessionKind::Modal, Some(fixed)) => fixed,
            _ => view.size,
        };
        let params = camera_params(&view, size, self.camera.focal_blur());
        log::trace!("Camera: {}x{}, fov {}", size.width, size.height, params.fov);
        scene.set_camera(&params);

        let size_changed = self.render_size != Some(size);
        self.render_size = Some(size);
        self.events.push(SyncEvent::ViewChanged {
            view,
            size_changed,
            size,
        });
        self.camera.reset();
    }

    /// Applies the integrator preset: the snapshot's when one changed it,
    /// otherwise the configured preset once per session.
    pub(super) fn upload_settings(&mut self, scene: &mut dyn RenderScene) {
        let integrator = if self.settings.pending().integrator {
            Some(self.settings.integrator())
        } else if self.integrator_pending {
            Some(self.config.integrator.clone())
        } else {
            None
        };
        if let Some(integrator) = integrator {
            log::debug!(
                "Applying integrator: {} samples, {} bounces",
                integrator.samples,
                integrator.max_bounce
            );
            scene.apply_integrator(&integrator);
            scene.tag_film_update();
            self.integrator_pending = false;
        }
    }
}

/// Derives renderer camera parameters from a view.
///
/// The field of view follows the longer side of the image: the horizontal
/// lens angle for landscape output, the vertical one otherwise. Orthographic
/// and two-point views pass their frustum through as the view plane.
pub(super) fn camera_params(view: &ViewRecord, size: RenderSize, blur: FocalBlur) -> CameraParams {
    let angle = if size.width > size.height {
        view.angles.horizontal
    } else {
        view.angles.vertical
    };
    let fov = (angle.tan() / size.aspect()).atan() * 2.0;
    let (focal_distance, aperture) = if blur.enabled {
        (blur.distance, blur.aperture)
    } else {
        (0.0, 0.0)
    };

    CameraParams {
        camera_to_world: view.camera_to_world,
        size,
        fov,
        near_clip: view.frustum.near,
        far_clip: FAR_CLIP,
        ortho: view.ortho,
        viewplane: (view.ortho || view.two_point).then_some(view.frustum),
        focal_distance,
        aperture,
    }
}
