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

//! The light lane: converts document lights into renderer light records,
//! builds their emission networks, and describes the emissive tube that
//! stands in for a linear light.

use crate::error::LaneError;
use crate::material_lane::truncate;
use lucent_core::config::SyncSettings;
use lucent_core::lane::{Lane, LaneKind};
use lucent_core::math::{Transform, Vec3};
use lucent_core::scene::{
    ChangeKind, DocumentObjectId, InstanceFlags, InstanceId, LightDescription, LightKind,
    LightRecord, LightSourceKind, MaterialBinding, MaterialDescription, MeshKey, NativeMaterial,
    ObjectInstance, ShaderHash,
};
use lucent_core::shader::socket::{COLOR, EMISSION, STRENGTH, SURFACE};
use lucent_core::shader::{NodeKind, ShaderGraph, ShaderGraphBuilder, ShaderNode};

/// Seed mixed into the material hash of linear-light tubes.
pub const LINEAR_LIGHT_SEED: u32 = 0xBABE_CAFE;

/// Shadow intensity below which a tube ignores its own shadow.
const NO_SELF_SHADOW_THRESHOLD: f32 = 1.0e-5;

/// Smallest hot-spot used when deriving spot smoothness.
const MIN_HOT_SPOT: f32 = 0.001;

/// Converts lights using the per-type strength factors.
#[derive(Debug, Clone)]
pub struct LightLane {
    point_factor: f32,
    spot_factor: f32,
    sun_factor: f32,
    area_factor: f32,
}

impl Default for LightLane {
    fn default() -> Self {
        Self::new(&SyncSettings::default())
    }
}

impl Lane for LightLane {
    fn strategy_name(&self) -> &'static str {
        "LightConversion"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Light
    }
}

impl LightLane {
    /// Creates a lane using the factors from `settings`.
    pub fn new(settings: &SyncSettings) -> Self {
        Self {
            point_factor: settings.point_light_factor,
            spot_factor: settings.spot_light_factor,
            sun_factor: settings.sun_light_factor,
            area_factor: settings.area_light_factor,
        }
    }

    /// Converts a document light into a renderer light record.
    ///
    /// Returns `None` for linear lights, which are rendered as geometry. A
    /// deleted light is converted with zero strength so the renderer light
    /// goes dark.
    pub fn convert(&self, light: &LightDescription, change: ChangeKind) -> Option<LightRecord> {
        let enabled = if light.enabled { 1.0 } else { 0.0 };
        let mut record = LightRecord {
            id: light.id,
            location: light.location,
            direction: light.direction.normalize(),
            color: light.diffuse_color,
            ..LightRecord::default()
        };

        match light.kind {
            LightSourceKind::Point => {
                record.kind = LightKind::Point;
                record.strength = light.intensity * self.point_factor * enabled;
            }
            LightSourceKind::Directional => {
                record.kind = LightKind::Distant;
                record.strength = light.intensity * self.sun_factor * enabled;
            }
            LightSourceKind::Spot => {
                record.kind = LightKind::Spot;
                record.strength = light.intensity * self.spot_factor * enabled;
                record.spot_angle = light.spot_angle * 2.0;
                record.spot_smooth = 1.0 / light.hot_spot.max(MIN_HOT_SPOT) - 1.0;
            }
            LightSourceKind::Rectangular => {
                record.kind = LightKind::Area;
                record.strength = light.intensity * self.area_factor * enabled;
                record.size = 1.0;
                record.size_u = light.width.length();
                record.size_v = light.length.length();
                record.location = light.location + light.width * 0.5 + light.length * 0.5;
                record.axis_u = light.width.normalize();
                record.axis_v = light.length.normalize();
                record.use_mis = true;
            }
            LightSourceKind::Linear => return None,
        }

        if change == ChangeKind::Deleted {
            record.strength = 0.0;
        }
        Some(record)
    }

    /// Builds the emission network of a light: `Emission -> Output`, with the
    /// colour gamma corrected.
    pub fn emission_graph(
        &self,
        record: &LightRecord,
        gamma: f32,
    ) -> Result<ShaderGraph, LaneError> {
        let name = format!("light_{}", record.id);
        let mut b = ShaderGraphBuilder::new(name.clone());
        b.add(
            ShaderNode::new("emission", NodeKind::Emission)
                .with(COLOR, record.color.apply_gamma(gamma))
                .with(STRENGTH, record.strength),
        )
        .add(ShaderNode::new("output", NodeKind::Output))
        .connect("emission", EMISSION, "output", SURFACE);
        b.build().map_err(|e| LaneError::graph(&name, e))
    }

    /// Content hash of a linear light's tube material.
    pub fn linear_hash(&self, light: &LightDescription) -> ShaderHash {
        let c = light.diffuse_color;
        let fields = [
            c.r,
            c.g,
            c.b,
            light.intensity,
            light.shadow_intensity,
            if light.enabled { 1.0 } else { 0.0 },
        ];
        let mut hasher = blake3::Hasher::new();
        hasher.update(&LINEAR_LIGHT_SEED.to_le_bytes());
        hasher.update(bytemuck::cast_slice(&fields));
        truncate(hasher.finalize())
    }

    /// The emissive material worn by a linear light's tube.
    pub fn linear_material(&self, light: &LightDescription) -> MaterialBinding {
        let strength = if light.enabled { light.intensity } else { 0.0 };
        MaterialBinding::with_hash(
            self.linear_hash(light),
            MaterialDescription::native(
                light.name.clone(),
                NativeMaterial::Emissive {
                    color: light.diffuse_color,
                    strength,
                },
            ),
        )
    }

    /// The mesh key of a linear light's tube.
    pub fn linear_mesh_key(light: &LightDescription) -> MeshKey {
        MeshKey::new(DocumentObjectId(light.id.0), 0)
    }

    /// The instance id of a linear light's tube.
    pub fn linear_instance_id(light: &LightDescription) -> InstanceId {
        InstanceId::from_uuid(&light.id.0)
    }

    /// The object instance drawing a linear light's tube.
    pub fn linear_instance(&self, light: &LightDescription) -> ObjectInstance {
        ObjectInstance {
            id: Self::linear_instance_id(light),
            mesh: Self::linear_mesh_key(light),
            transform: Transform::IDENTITY,
            material: self.linear_hash(light),
            flags: InstanceFlags {
                visible: light.enabled,
                cast_shadow: false,
                shadow_catcher: false,
                no_self_shadow: light.shadow_intensity < NO_SELF_SHADOW_THRESHOLD,
            },
        }
    }

    /// Axis of a linear light's tube: start point, direction with length, and
    /// radius.
    pub fn linear_tube(light: &LightDescription) -> (Vec3, Vec3, f32) {
        (light.location, light.length, light.width.length())
    }
}
