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

//! Camera state passed through from the document to the renderer.

use crate::math::Transform;
use serde::{Deserialize, Serialize};

/// Far clipping distance handed to the renderer camera.
pub const FAR_CLIP: f32 = 1.0e14;

/// Output size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RenderSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl RenderSize {
    /// Creates a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height, `1.0` for a degenerate size.
    pub fn aspect(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// View frustum bounds on the near plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Frustum {
    /// Left bound.
    pub left: f32,
    /// Right bound.
    pub right: f32,
    /// Top bound.
    pub top: f32,
    /// Bottom bound.
    pub bottom: f32,
    /// Near distance.
    pub near: f32,
    /// Far distance.
    pub far: f32,
}

/// Lens angles of the document camera, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LensAngles {
    /// Half diagonal angle.
    pub diagonal: f32,
    /// Half vertical angle.
    pub vertical: f32,
    /// Half horizontal angle.
    pub horizontal: f32,
}

/// A complete snapshot of the active view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRecord {
    /// Camera to world transform.
    pub camera_to_world: Transform,
    /// Lens half-angles.
    pub angles: LensAngles,
    /// Viewport size in pixels.
    pub size: RenderSize,
    /// Frustum on the near plane.
    pub frustum: Frustum,
    /// Parallel projection.
    pub ortho: bool,
    /// Two-point perspective.
    pub two_point: bool,
}

impl Default for ViewRecord {
    fn default() -> Self {
        Self {
            camera_to_world: Transform::IDENTITY,
            angles: LensAngles::default(),
            size: RenderSize::default(),
            frustum: Frustum::default(),
            ortho: false,
            two_point: false,
        }
    }
}

/// Depth-of-field settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FocalBlur {
    /// Whether depth of field is on.
    pub enabled: bool,
    /// Focal distance.
    pub distance: f32,
    /// Aperture size.
    pub aperture: f32,
}

/// The camera as the renderer receives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraParams {
    /// Camera to world transform.
    pub camera_to_world: Transform,
    /// Output size.
    pub size: RenderSize,
    /// Full field of view along the short side, radians.
    pub fov: f32,
    /// Near clip.
    pub near_clip: f32,
    /// Far clip.
    pub far_clip: f32,
    /// Orthographic projection.
    pub ortho: bool,
    /// Explicit viewplane for parallel and two-point views.
    pub viewplane: Option<Frustum>,
    /// Focal distance, `0.0` when depth of field is off.
    pub focal_distance: f32,
    /// Aperture, `0.0` when depth of field is off.
    pub aperture: f32,
}
