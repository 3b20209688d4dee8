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

//! Integration tests for lights, the world background and the linear
//! workflow pass of the sync agent.

mod common;

use approx::assert_relative_eq;
use common::{init_logging, instance, is_mesh_upload, material, mesh_key, triangle, Call, RecordingScene};
use lucent_agents::SyncAgent;
use lucent_core::math::{LinearRgba, Vec3};
use lucent_core::renderer::{CancelToken, PathRay};
use lucent_core::scene::{
    BackgroundStyle, ChangeKind, EnvironmentTexture, EnvironmentUsage, LightDescription, LightId,
    LightKind, LightRecord, LightSourceKind, LinearWorkflow, RenderSettingsRecord, ShaderHash,
    SUN_LIGHT_ID,
};
use lucent_core::SyncEvent;

fn warmed_up() -> (SyncAgent, RecordingScene) {
    init_logging();
    let mut agent = SyncAgent::default();
    let mut scene = RecordingScene::new();
    agent
        .flush(&mut scene, &CancelToken::new())
        .expect("empty flush");
    scene.clear_calls();
    (agent, scene)
}

fn lamp(n: u128, intensity: f32) -> LightDescription {
    LightDescription {
        id: LightId::from_u128(0x2000 + n),
        name: format!("lamp {n}"),
        intensity,
        ..LightDescription::default()
    }
}

fn tube(n: u128) -> LightDescription {
    LightDescription {
        id: LightId::from_u128(0x3000 + n),
        name: format!("tube {n}"),
        kind: LightSourceKind::Linear,
        location: Vec3::new(0.0, 0.0, 1.0),
        length: Vec3::new(0.0, 0.0, 2.0),
        width: Vec3::new(0.1, 0.0, 0.0),
        intensity: 5.0,
        shadow_intensity: 0.0,
        ..LightDescription::default()
    }
}

fn light_updates(scene: &RecordingScene) -> Vec<LightRecord> {
    scene
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::UpdateLight(_, record) => Some(record.clone()),
            _ => None,
        })
        .collect()
}

// ─── Lights ─────────────────────────────────────────────────────────────────

#[test]
fn test_new_light_gets_an_emission_shader_and_a_renderer_light() {
    let (mut agent, mut scene) = warmed_up();
    let light = lamp(1, 2.0);
    agent.apply_light(light.clone(), ChangeKind::Added).unwrap();

    let report = agent.flush(&mut scene, &CancelToken::new()).unwrap();

    let name = format!("light_{}", light.id);
    let shader = scene
        .calls
        .iter()
        .find_map(|c| match c {
            Call::CreateGraphShader(h, n) if *n == name => Some(*h),
            _ => None,
        })
        .expect("emission shader");
    assert!(scene
        .calls
        .iter()
        .any(|c| matches!(c, Call::CreateLight(_, s) if *s == shader)));
    let records = light_updates(&scene);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, LightKind::Point);
    assert_relative_eq!(records[0].strength, 2.0 * 40.0);
    assert_eq!(records[0].samples, 1);
    assert_eq!(records[0].max_bounces, 1024);
    assert!(report
        .events
        .iter()
        .all(|e| !matches!(e, SyncEvent::LightShaderChanged { .. })));
}

#[test]
fn test_modified_light_rebuilds_its_shader_in_place() {
    let (mut agent, mut scene) = warmed_up();
    agent.apply_light(lamp(1, 2.0), ChangeKind::Added).unwrap();
    agent.flush(&mut scene, &CancelToken::new()).unwrap();
    scene.clear_calls();

    agent.apply_light(lamp(1, 3.0), ChangeKind::Modified).unwrap();
    let report = agent.flush(&mut scene, &CancelToken::new()).unwrap();

    let uploaded = agent.lights().uploaded(lamp(1, 0.0).id).unwrap().clone();
    assert_eq!(scene.count(|c| matches!(c, Call::CreateLight(..))), 0);
    assert_eq!(
        scene.count(|c| matches!(c, Call::RebuildGraphShader(s, _) if *s == uploaded.shader)),
        1
    );
    assert_relative_eq!(light_updates(&scene)[0].strength, 3.0 * 40.0);
    assert!(report.events.contains(&SyncEvent::LightShaderChanged {
        light: lamp(1, 0.0).id,
        shader: uploaded.shader,
    }));
}

#[test]
fn test_deleted_light_is_uploaded_dark() {
    let (mut agent, mut scene) = warmed_up();
    agent.apply_light(lamp(1, 2.0), ChangeKind::Added).unwrap();
    agent.flush(&mut scene, &CancelToken::new()).unwrap();
    scene.clear_calls();

    agent.apply_light(lamp(1, 2.0), ChangeKind::Deleted).unwrap();
    agent.flush(&mut scene, &CancelToken::new()).unwrap();

    assert_relative_eq!(light_updates(&scene)[0].strength, 0.0);
}

#[test]
fn test_light_added_and_deleted_in_one_cycle_never_reaches_the_renderer() {
    let (mut agent, mut scene) = warmed_up();
    agent.apply_light(lamp(1, 2.0), ChangeKind::Added).unwrap();
    agent.apply_light(lamp(1, 2.0), ChangeKind::Deleted).unwrap();

    agent.flush(&mut scene, &CancelToken::new()).unwrap();

    assert!(scene.calls.is_empty(), "Unexpected calls: {:?}", scene.calls);
}

#[test]
fn test_sun_is_a_distant_light_with_a_fixed_identity() {
    let (mut agent, mut scene) = warmed_up();
    agent.apply_sun(&lamp(9, 1.0));
    agent.flush(&mut scene, &CancelToken::new()).unwrap();

    let records = light_updates(&scene);
    assert_eq!(records[0].id, SUN_LIGHT_ID);
    assert_eq!(records[0].kind, LightKind::Distant);
    assert_relative_eq!(records[0].strength, 3.2);

    scene.clear_calls();
    agent.apply_sun(&lamp(9, 2.0));
    agent.flush(&mut scene, &CancelToken::new()).unwrap();
    assert_eq!(scene.count(|c| matches!(c, Call::CreateLight(..))), 0);
    assert_relative_eq!(light_updates(&scene)[0].strength, 6.4);
}

#[test]
fn test_linear_light_becomes_an_emissive_tube() {
    let (mut agent, mut scene) = warmed_up();
    let light = tube(1);
    agent.apply_light(light.clone(), ChangeKind::Added).unwrap();

    agent.flush(&mut scene, &CancelToken::new()).unwrap();

    assert_eq!(scene.count(|c| matches!(c, Call::CreateLight(..))), 0);
    assert_eq!(scene.count(|c| matches!(c, Call::CreateMesh(_))), 1);
    assert!(
        scene
            .calls
            .iter()
            .any(|c| matches!(c, Call::ResizeMesh(_, 34, 64))),
        "A 16-segment tube has 34 vertices and 64 triangles"
    );
    assert_eq!(scene.count(|c| matches!(c, Call::CreateObject(_))), 1);
    assert!(scene.calls.iter().any(|c| matches!(
        c,
        Call::SetObjectVisibility(_, v) if *v == PathRay::ALL_VISIBILITY.without(PathRay::SHADOW)
    )));
    assert!(scene.calls.iter().any(|c| matches!(
        c,
        Call::SetObjectShadowFlags(_, f) if f.mesh_light_no_cast_shadow && f.no_self_shadow
    )));
    let hash = agent.lights().linear_hash(light.id).unwrap();
    assert!(agent.registry().shader_from_hash(hash).is_some());
}

#[test]
fn test_deleting_a_linear_light_removes_its_tube() {
    let (mut agent, mut scene) = warmed_up();
    agent.apply_light(tube(1), ChangeKind::Added).unwrap();
    agent.flush(&mut scene, &CancelToken::new()).unwrap();
    scene.clear_calls();

    agent.apply_light(tube(1), ChangeKind::Deleted).unwrap();
    agent.flush(&mut scene, &CancelToken::new()).unwrap();

    assert_eq!(scene.count(|c| matches!(c, Call::ClearMesh(_))), 1);
    assert!(scene
        .calls
        .iter()
        .any(|c| matches!(c, Call::SetObjectVisibility(_, v) if v.is_hidden())));
    assert!(agent.lights().linear_hash(tube(1).id).is_none());
}

// ─── Background ─────────────────────────────────────────────────────────────

#[test]
fn test_first_flush_installs_a_background() {
    init_logging();
    let mut agent = SyncAgent::default();
    let mut scene = RecordingScene::new();

    agent.flush(&mut scene, &CancelToken::new()).unwrap();

    let shader = agent.background_shader().expect("background shader");
    assert!(scene
        .calls
        .contains(&Call::CreateGraphShader(shader, "background".into())));
    assert!(scene.calls.contains(&Call::SetBackgroundShader(shader)));
}

#[test]
fn test_environment_change_rebuilds_the_background_in_place() {
    let (mut agent, mut scene) = warmed_up();
    let shader = agent.background_shader().unwrap();

    agent.apply_skylight(true, 0.5);
    agent.apply_environment(
        EnvironmentUsage::ReflectionAndRefraction,
        Some(EnvironmentTexture {
            name: "studio".into(),
            color: LinearRgba::RED,
            ..EnvironmentTexture::default()
        }),
    );
    agent.flush(&mut scene, &CancelToken::new()).unwrap();

    assert_eq!(
        scene.calls,
        vec![
            Call::RebuildGraphShader(shader, "background".into()),
            Call::TagShader(shader),
            Call::SetBackgroundShader(shader),
        ]
    );

    scene.clear_calls();
    agent.apply_skylight(true, 0.5);
    agent.flush(&mut scene, &CancelToken::new()).unwrap();
    assert!(scene.calls.is_empty(), "An unchanged environment is not resent");
}

#[test]
fn test_background_style_from_settings_reaches_the_background() {
    let (mut agent, mut scene) = warmed_up();
    agent.apply_render_settings(RenderSettingsRecord {
        background_style: BackgroundStyle::Gradient,
        gradient_top: LinearRgba::BLUE,
        gradient_bottom: LinearRgba::WHITE,
        ..RenderSettingsRecord::default()
    });

    agent.flush(&mut scene, &CancelToken::new()).unwrap();

    let shader = agent.background_shader().unwrap();
    assert!(scene
        .calls
        .contains(&Call::RebuildGraphShader(shader, "background".into())));
}

// ─── Linear workflow ────────────────────────────────────────────────────────

#[test]
fn test_gamma_change_rebuilds_shaders_but_not_geometry() {
    let (mut agent, mut scene) = warmed_up();
    agent
        .apply_mesh(mesh_key(1), &triangle(0.0), ShaderHash(0xABC))
        .unwrap();
    agent.apply_instance(instance(1, 1, material(0xABC, "red")));
    agent.apply_light(lamp(1, 2.0), ChangeKind::Added).unwrap();
    agent.flush(&mut scene, &CancelToken::new()).unwrap();
    scene.clear_calls();

    let workflow = LinearWorkflow {
        enabled: true,
        gamma: 2.2,
    };
    agent.apply_render_settings(RenderSettingsRecord {
        linear_workflow: workflow,
        ..RenderSettingsRecord::default()
    });
    let report = agent.flush(&mut scene, &CancelToken::new()).unwrap();

    let material_shader = agent.registry().shader_from_hash(ShaderHash(0xABC)).unwrap();
    let light_shader = agent.lights().uploaded(lamp(1, 0.0).id).unwrap().shader;
    assert!(scene
        .calls
        .contains(&Call::RebuildMaterialShader(material_shader, 2.2)));
    assert!(scene
        .calls
        .iter()
        .any(|c| matches!(c, Call::RebuildGraphShader(s, _) if *s == light_shader)));
    assert_eq!(scene.count(is_mesh_upload), 0, "Geometry is not recomputed");
    assert_eq!(
        scene.count(|c| matches!(c, Call::CreateMaterialShader(..))),
        0
    );
    assert!(scene.calls.contains(&Call::TagFilmUpdate));
    assert_relative_eq!(agent.gamma(), 2.2);

    let at = |wanted: &SyncEvent| report.events.iter().position(|e| e == wanted);
    let material_changed = at(&SyncEvent::MaterialShaderChanged {
        hash: ShaderHash(0xABC),
        shader: material_shader,
    })
    .expect("material shader changed");
    let light_changed = at(&SyncEvent::LightShaderChanged {
        light: lamp(1, 0.0).id,
        shader: light_shader,
    })
    .expect("light shader changed");
    let workflow_changed = at(&SyncEvent::LinearWorkflowChanged(workflow)).unwrap();
    let film = at(&SyncEvent::FilmNeedsRecompute).unwrap();
    assert!(material_changed < workflow_changed);
    assert!(light_changed < workflow_changed);
    assert!(workflow_changed < film);
}

#[test]
fn test_shaders_built_alongside_a_gamma_change_are_compiled_once() {
    let (mut agent, mut scene) = warmed_up();
    agent
        .apply_mesh(mesh_key(1), &triangle(0.0), ShaderHash(0xABC))
        .unwrap();
    agent.apply_instance(instance(1, 1, material(0xABC, "red")));
    agent.apply_light(lamp(1, 2.0), ChangeKind::Added).unwrap();
    agent.apply_render_settings(RenderSettingsRecord {
        linear_workflow: LinearWorkflow {
            enabled: true,
            gamma: 2.2,
        },
        ..RenderSettingsRecord::default()
    });

    let report = agent.flush(&mut scene, &CancelToken::new()).unwrap();

    let material_shader = agent.registry().shader_from_hash(ShaderHash(0xABC)).unwrap();
    let light_shader = agent.lights().uploaded(lamp(1, 0.0).id).unwrap().shader;
    assert_eq!(
        scene.count(|c| matches!(c, Call::RebuildMaterialShader(..))),
        0
    );
    assert_relative_eq!(scene.material_gammas[&material_shader], 2.2);
    assert!(!scene
        .calls
        .iter()
        .any(|c| matches!(c, Call::RebuildGraphShader(s, _) if *s == light_shader)));
    assert!(!report.events.iter().any(|e| matches!(
        e,
        SyncEvent::MaterialShaderChanged { .. } | SyncEvent::LightShaderChanged { .. }
    )));
    assert_relative_eq!(agent.gamma(), 2.2);
}

#[test]
fn test_disabled_linear_workflow_keeps_shaders() {
    let (mut agent, mut scene) = warmed_up();
    agent
        .apply_mesh(mesh_key(1), &triangle(0.0), ShaderHash(0xABC))
        .unwrap();
    agent.apply_instance(instance(1, 1, material(0xABC, "red")));
    agent.flush(&mut scene, &CancelToken::new()).unwrap();
    scene.clear_calls();

    agent.apply_render_settings(RenderSettingsRecord {
        linear_workflow: LinearWorkflow {
            enabled: false,
            gamma: 2.2,
        },
        ..RenderSettingsRecord::default()
    });
    let report = agent.flush(&mut scene, &CancelToken::new()).unwrap();

    assert_eq!(
        scene.count(|c| matches!(c, Call::RebuildMaterialShader(..))),
        0
    );
    assert_relative_eq!(agent.gamma(), 1.0);
    assert!(report
        .events
        .iter()
        .any(|e| matches!(e, SyncEvent::LinearWorkflowChanged(_))));
}

#[test]
fn test_identical_settings_snapshot_is_ignored() {
    let (mut agent, mut scene) = warmed_up();
    let snapshot = RenderSettingsRecord {
        linear_workflow: LinearWorkflow {
            enabled: true,
            gamma: 2.2,
        },
        ..RenderSettingsRecord::default()
    };
    agent.apply_render_settings(snapshot.clone());
    agent.flush(&mut scene, &CancelToken::new()).unwrap();
    scene.clear_calls();

    agent.apply_render_settings(snapshot);
    let report = agent.flush(&mut scene, &CancelToken::new()).unwrap();

    assert!(scene.calls.is_empty(), "Unexpected calls: {:?}", scene.calls);
    assert!(report.events.is_empty());
}
