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

//! The scripted document: what a user might do in the first minute of a
//! session.

use anyhow::Result;
use lucent_agents::SyncAgent;
use lucent_core::math::{LinearRgba, Transform, Vec2, Vec3};
use lucent_core::scene::{
    ChangeKind, DocumentObjectId, DynamicTransform, EnvironmentTexture, EnvironmentUsage,
    GroundPlane, InstanceChange, InstanceFlags, InstanceId, LensAngles, LightDescription, LightId,
    LightSourceKind, LinearWorkflow, MaterialChange, MaterialDescription, MeshKey, MeshSource,
    NativeMaterial, RenderSettingsRecord, RenderSize, ViewRecord,
};
use lucent_lanes::material_lane::bind;

const BOX: DocumentObjectId = DocumentObjectId::from_u128(0xB0);
const LAMP: LightId = LightId::from_u128(0x1A);
const TUBE: LightId = LightId::from_u128(0x7B);

fn red() -> MaterialDescription {
    MaterialDescription::native(
        "red plastic",
        NativeMaterial::Plastic {
            diffuse: LinearRgba::rgb(0.8, 0.1, 0.1),
            frost: 0.0,
            polish: 0.8,
            reflectivity: 0.3,
            transparency: 0.0,
        },
    )
}

fn glass() -> MaterialDescription {
    MaterialDescription::native(
        "clear glass",
        NativeMaterial::Glass {
            color: LinearRgba::WHITE,
            frost: 0.0,
            ior: 1.5,
        },
    )
}

/// An axis-aligned unit box with one quad per face.
fn unit_box() -> MeshSource {
    let corners = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(0.0, 1.0, 1.0),
    ];
    let faces: [[u32; 4]; 6] = [
        [0, 3, 2, 1],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [1, 2, 6, 5],
        [2, 3, 7, 6],
        [3, 0, 4, 7],
    ];
    let triangles = faces
        .iter()
        .flat_map(|[a, b, c, d]| [[*a, *b, *c], [*a, *c, *d]])
        .collect();
    let uvs = corners.iter().map(|c| Vec2::new(c.x, c.y + c.z)).collect();
    MeshSource {
        vertices: corners.to_vec(),
        triangles,
        uvs: Some(uvs),
        normals: None,
    }
}

fn box_instance(id: u32, x: f32, material: MaterialDescription) -> InstanceChange {
    InstanceChange {
        id: InstanceId(id),
        mesh: MeshKey::new(BOX, 0),
        transform: Transform::from_translation(Vec3::new(x, 0.0, 0.0)),
        material: bind(material),
        flags: InstanceFlags::default(),
    }
}

fn settings(gamma: f32) -> RenderSettingsRecord {
    RenderSettingsRecord {
        linear_workflow: LinearWorkflow {
            enabled: gamma != 1.0,
            gamma,
        },
        ..RenderSettingsRecord::default()
    }
}

/// Stages the opening document: two red boxes, a lamp, a neon tube, the
/// sun, a ground plane, a sky and a view.
pub fn populate(agent: &mut SyncAgent) -> Result<()> {
    let red = bind(red());
    agent.apply_mesh(MeshKey::new(BOX, 0), &unit_box(), red.hash)?;
    agent.apply_instance(box_instance(1, 0.0, red.material.clone()));
    agent.apply_instance(box_instance(2, 2.0, red.material));

    agent.apply_light(
        LightDescription {
            id: LAMP,
            name: "lamp".into(),
            location: Vec3::new(1.0, -2.0, 3.0),
            intensity: 0.8,
            ..LightDescription::default()
        },
        ChangeKind::Added,
    )?;
    agent.apply_light(
        LightDescription {
            id: TUBE,
            name: "neon".into(),
            kind: LightSourceKind::Linear,
            location: Vec3::new(-1.0, 0.0, 2.0),
            length: Vec3::new(3.0, 0.0, 0.0),
            width: Vec3::new(0.0, 0.02, 0.0),
            diffuse_color: LinearRgba::rgb(0.2, 0.6, 1.0),
            intensity: 4.0,
            ..LightDescription::default()
        },
        ChangeKind::Added,
    )?;
    agent.apply_sun(&LightDescription {
        direction: Vec3::new(-0.3, 0.4, -1.0),
        ..LightDescription::default()
    });

    agent.apply_ground_plane(&GroundPlane {
        enabled: true,
        altitude: 0.0,
        shadow_only: false,
        material: bind(MaterialDescription::native(
            "ground",
            NativeMaterial::Diffuse {
                color: LinearRgba::gray(0.6),
            },
        )),
        texture_scale: Vec2::ONE,
        texture_offset: Vec2::ZERO,
        texture_rotation: 0.0,
    })?;

    agent.apply_skylight(true, 1.0);
    agent.apply_environment(
        EnvironmentUsage::Skylighting,
        Some(EnvironmentTexture {
            name: "overcast".into(),
            color: LinearRgba::rgb(0.7, 0.75, 0.8),
            ..EnvironmentTexture::default()
        }),
    );
    agent.apply_render_settings(settings(1.0));
    agent.apply_view(ViewRecord {
        camera_to_world: Transform::from_translation(Vec3::new(1.0, -8.0, 2.0)),
        angles: LensAngles {
            diagonal: 0.5,
            vertical: 0.3,
            horizontal: 0.4,
        },
        size: RenderSize::new(800, 450),
        ..ViewRecord::default()
    });
    Ok(())
}

/// Drags the second box along X.
pub fn drag(agent: &mut SyncAgent) {
    agent.apply_dynamic_object_transforms(&[DynamicTransform {
        id: InstanceId(2),
        transform: Transform::from_translation(Vec3::new(3.5, 0.0, 0.0)),
    }]);
}

/// Turns the second box into glass and switches to a 2.2 gamma workflow.
pub fn edit(agent: &mut SyncAgent) -> Result<()> {
    agent.apply_material_change(MaterialChange {
        instance: InstanceId(2),
        material: bind(glass()),
    });
    agent.apply_render_settings(settings(2.2));
    agent.apply_light(
        LightDescription {
            id: LAMP,
            name: "lamp".into(),
            location: Vec3::new(1.0, -2.0, 3.0),
            intensity: 1.2,
            ..LightDescription::default()
        },
        ChangeKind::Modified,
    )?;
    Ok(())
}

/// Re-meshes the box at a higher resolution of the same shape.
pub fn retessellate(agent: &mut SyncAgent) -> Result<()> {
    let mut mesh = unit_box();
    for v in &mut mesh.vertices {
        *v = Vec3::new(v.x * 1.5, v.y, v.z);
    }
    agent.apply_mesh(MeshKey::new(BOX, 0), &mesh, bind(red()).hash)?;
    Ok(())
}
