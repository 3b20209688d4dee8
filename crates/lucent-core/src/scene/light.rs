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

//! Light descriptions (document side) and light records (renderer side).

use super::ids::LightId;
use crate::math::{LinearRgba, Vec3};
use serde::{Deserialize, Serialize};

/// Fixed identity of the sun light.
pub const SUN_LIGHT_ID: LightId = LightId::from_u128(0x82FE2C29_9632_473D_982B_9121E150E1D2);

/// How a document light is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightSourceKind {
    /// Omnidirectional point light.
    Point,
    /// Cone-shaped spot light.
    Spot,
    /// Parallel light from infinitely far away.
    Directional,
    /// Rectangular area light spanned by `width` and `length`.
    Rectangular,
    /// Tube light along `length` with radius `|width|`. Rendered as an
    /// emissive cylinder mesh rather than a renderer light.
    Linear,
}

/// A light as described by the document, already in world space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightDescription {
    /// Document identity.
    pub id: LightId,
    /// Display name.
    pub name: String,
    /// The light's shape.
    pub kind: LightSourceKind,
    /// Position, or the start corner/point for area and linear lights.
    pub location: Vec3,
    /// Emission direction.
    pub direction: Vec3,
    /// Width vector (area lights) or radius vector (linear lights).
    pub width: Vec3,
    /// Length vector (area and linear lights).
    pub length: Vec3,
    /// Light colour, display referred.
    pub diffuse_color: LinearRgba,
    /// Intensity multiplier.
    pub intensity: f32,
    /// Whether the light is switched on.
    pub enabled: bool,
    /// Spot cone half-angle in radians.
    pub spot_angle: f32,
    /// Spot hot-spot fraction, `0..=1`.
    pub hot_spot: f32,
    /// Shadow intensity, `0..=1`.
    pub shadow_intensity: f32,
}

impl Default for LightDescription {
    fn default() -> Self {
        Self {
            id: LightId::from_u128(0),
            name: String::new(),
            kind: LightSourceKind::Point,
            location: Vec3::ZERO,
            direction: -Vec3::Z,
            width: Vec3::ZERO,
            length: Vec3::ZERO,
            diffuse_color: LinearRgba::WHITE,
            intensity: 1.0,
            enabled: true,
            spot_angle: std::f32::consts::FRAC_PI_4,
            hot_spot: 0.5,
            shadow_intensity: 1.0,
        }
    }
}

/// What happened to a light since the last flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    /// Newly added.
    Added,
    /// Parameters changed.
    Modified,
    /// Removed from the document.
    Deleted,
}

/// Renderer light types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightKind {
    /// Point light.
    Point,
    /// Spot light.
    Spot,
    /// Distant (sun) light.
    Distant,
    /// Rectangular area light.
    Area,
}

/// A fully resolved renderer light. Always holds the complete state; there is
/// no partial update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightRecord {
    /// Document identity.
    pub id: LightId,
    /// Renderer light type.
    pub kind: LightKind,
    /// Position (area lights: the centre).
    pub location: Vec3,
    /// Normalised emission direction.
    pub direction: Vec3,
    /// Emission colour, display referred. Gamma is applied in the emission
    /// shader.
    pub color: LinearRgba,
    /// Emission strength, already multiplied by the per-type factor.
    pub strength: f32,
    /// Soft-shadow radius for point and spot lights.
    pub size: f32,
    /// First area axis (unit).
    pub axis_u: Vec3,
    /// Extent along `axis_u`.
    pub size_u: f32,
    /// Second area axis (unit).
    pub axis_v: Vec3,
    /// Extent along `axis_v`.
    pub size_v: f32,
    /// Full spot cone angle in radians.
    pub spot_angle: f32,
    /// Spot edge smoothness.
    pub spot_smooth: f32,
    /// Whether the light casts shadows.
    pub cast_shadow: bool,
    /// Whether multiple importance sampling is used.
    pub use_mis: bool,
    /// Light samples.
    pub samples: u32,
    /// Maximum bounces of light from this source.
    pub max_bounces: u32,
}

impl Default for LightRecord {
    fn default() -> Self {
        Self {
            id: LightId::from_u128(0),
            kind: LightKind::Point,
            location: Vec3::ZERO,
            direction: -Vec3::Z,
            color: LinearRgba::WHITE,
            strength: 1.0,
            size: 0.0,
            axis_u: Vec3::X,
            size_u: 0.0,
            axis_v: Vec3::Y,
            size_v: 0.0,
            spot_angle: 0.0,
            spot_smooth: 0.0,
            cast_shadow: true,
            use_mis: false,
            samples: 1,
            max_bounces: 1024,
        }
    }
}
