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

//! Integration tests for the camera, interactive updates, the ground plane
//! and render settings.

mod common;

use approx::assert_relative_eq;
use common::{init_logging, instance, is_mesh_upload, material, mesh_key, triangle, Call, RecordingScene};
use lucent_agents::SyncAgent;
use lucent_core::config::SessionKind;
use lucent_core::math::{LinearRgba, Transform, Vec2, Vec3};
use lucent_core::renderer::{CancelToken, PathRay};
use lucent_core::scene::{
    DynamicTransform, FocalBlur, GroundPlane, InstanceId, IntegratorSettings, LensAngles,
    MaterialBinding, MaterialDescription, NativeMaterial, RenderSettingsRecord, RenderSize,
    ShaderHash, ViewRecord, GROUND_PLANE_INSTANCE, GROUND_PLANE_MESH,
};
use lucent_core::{SyncEvent, SyncSettings};

fn warmed_up_with(settings: SyncSettings) -> (SyncAgent, RecordingScene) {
    init_logging();
    let mut agent = SyncAgent::new(settings);
    let mut scene = RecordingScene::new();
    agent
        .flush(&mut scene, &CancelToken::new())
        .expect("empty flush");
    scene.clear_calls();
    (agent, scene)
}

fn warmed_up() -> (SyncAgent, RecordingScene) {
    warmed_up_with(SyncSettings::default())
}

fn view(width: u32, height: u32) -> ViewRecord {
    ViewRecord {
        angles: LensAngles {
            diagonal: 0.7,
            vertical: 0.4,
            horizontal: 0.6,
        },
        size: RenderSize::new(width, height),
        ..ViewRecord::default()
    }
}

fn cameras(scene: &RecordingScene) -> Vec<lucent_core::scene::CameraParams> {
    scene
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::SetCamera(p) => Some(p.clone()),
            _ => None,
        })
        .collect()
}

fn view_events(events: &[SyncEvent]) -> Vec<(bool, RenderSize)> {
    events
        .iter()
        .filter_map(|e| match e {
            SyncEvent::ViewChanged {
                size_changed, size, ..
            } => Some((*size_changed, *size)),
            _ => None,
        })
        .collect()
}

fn ground(enabled: bool, altitude: f32) -> GroundPlane {
    GroundPlane {
        enabled,
        altitude,
        shadow_only: false,
        material: MaterialBinding::with_hash(
            ShaderHash(0x600D),
            MaterialDescription::native(
                "ground",
                NativeMaterial::Diffuse {
                    color: LinearRgba::gray(0.8),
                },
            ),
        ),
        texture_scale: Vec2::ONE,
        texture_offset: Vec2::ZERO,
        texture_rotation: 0.0,
    }
}

// ─── Camera ─────────────────────────────────────────────────────────────────

#[test]
fn test_view_change_reports_size_changes() {
    let (mut agent, mut scene) = warmed_up();
    agent.apply_view(view(200, 100));

    let report = agent.flush(&mut scene, &CancelToken::new()).unwrap();

    let sent = cameras(&scene);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].size, RenderSize::new(200, 100));
    assert_relative_eq!(sent[0].far_clip, 1.0e14);
    assert_eq!(
        view_events(&report.events),
        vec![(true, RenderSize::new(200, 100))]
    );

    scene.clear_calls();
    let mut moved = view(200, 100);
    moved.camera_to_world = Transform::from_translation(Vec3::new(0.0, -5.0, 1.0));
    agent.apply_view(moved);
    let report = agent.flush(&mut scene, &CancelToken::new()).unwrap();
    assert_eq!(
        view_events(&report.events),
        vec![(false, RenderSize::new(200, 100))],
        "Moving the camera keeps the size"
    );
}

#[test]
fn test_identical_view_is_not_resent() {
    let (mut agent, mut scene) = warmed_up();
    agent.apply_view(view(200, 100));
    agent.flush(&mut scene, &CancelToken::new()).unwrap();
    scene.clear_calls();

    agent.apply_view(view(200, 100));
    let report = agent.flush(&mut scene, &CancelToken::new()).unwrap();

    assert!(cameras(&scene).is_empty());
    assert!(view_events(&report.events).is_empty());
}

#[test]
fn test_modal_session_renders_at_its_fixed_size() {
    let (mut agent, mut scene) = warmed_up_with(SyncSettings {
        session: SessionKind::Modal,
        ..SyncSettings::default()
    });
    agent.apply_modal_render_size(RenderSize::new(1920, 1080));
    agent.apply_view(view(200, 100));

    let report = agent.flush(&mut scene, &CancelToken::new()).unwrap();

    assert_eq!(cameras(&scene)[0].size, RenderSize::new(1920, 1080));
    assert_eq!(
        view_events(&report.events),
        vec![(true, RenderSize::new(1920, 1080))]
    );
}

#[test]
fn test_interactive_session_ignores_the_modal_size() {
    let (mut agent, mut scene) = warmed_up();
    agent.apply_modal_render_size(RenderSize::new(1920, 1080));
    agent.apply_view(view(200, 100));

    agent.flush(&mut scene, &CancelToken::new()).unwrap();

    assert_eq!(cameras(&scene)[0].size, RenderSize::new(200, 100));
}

#[test]
fn test_focal_blur_from_settings_reaches_the_camera() {
    let (mut agent, mut scene) = warmed_up();
    agent.apply_view(view(200, 100));
    agent.flush(&mut scene, &CancelToken::new()).unwrap();
    scene.clear_calls();

    agent.apply_render_settings(RenderSettingsRecord {
        focal_blur: FocalBlur {
            enabled: true,
            distance: 5.0,
            aperture: 0.2,
        },
        ..RenderSettingsRecord::default()
    });
    agent.flush(&mut scene, &CancelToken::new()).unwrap();

    let sent = cameras(&scene);
    assert_eq!(sent.len(), 1);
    assert_relative_eq!(sent[0].focal_distance, 5.0);
    assert_relative_eq!(sent[0].aperture, 0.2);
}

// ─── Interactive updates ────────────────────────────────────────────────────

#[test]
fn test_dynamic_flush_sends_only_transforms() {
    let (mut agent, mut scene) = warmed_up();
    agent
        .apply_mesh(mesh_key(1), &triangle(0.0), ShaderHash(0xABC))
        .unwrap();
    agent.apply_instance(instance(1, 1, material(0xABC, "red")));
    agent.flush(&mut scene, &CancelToken::new()).unwrap();
    let handle = agent.objects().uploaded(InstanceId(1)).unwrap().handle;
    scene.clear_calls();

    agent
        .apply_mesh(mesh_key(2), &triangle(1.0), ShaderHash(0xABC))
        .unwrap();
    let moved = Transform::from_translation(Vec3::new(4.0, 0.0, 0.0));
    agent.apply_dynamic_object_transforms(&[DynamicTransform {
        id: InstanceId(1),
        transform: moved,
    }]);
    let report = agent.flush_dynamic(&mut scene, &CancelToken::new()).unwrap();

    assert!(report.is_completed());
    assert_eq!(
        scene.calls,
        vec![
            Call::SetObjectTransform(handle, moved),
            Call::TagObjectUpdate(handle),
        ]
    );
    assert_eq!(agent.geometry().staged_len(), 1, "Meshes wait for a full flush");
    assert_eq!(
        agent
            .objects()
            .uploaded(InstanceId(1))
            .and_then(|o| o.state.as_ref())
            .map(|s| s.transform),
        Some(moved)
    );
}

#[test]
fn test_dynamic_transform_of_unknown_instance_is_dropped() {
    let (mut agent, mut scene) = warmed_up();
    agent.apply_dynamic_object_transforms(&[DynamicTransform {
        id: InstanceId(99),
        transform: Transform::IDENTITY,
    }]);

    agent.flush_dynamic(&mut scene, &CancelToken::new()).unwrap();

    assert!(scene.calls.is_empty());
}

#[test]
fn test_dynamic_camera_is_sent_by_a_dynamic_flush() {
    let (mut agent, mut scene) = warmed_up();
    agent.apply_dynamic_camera(view(320, 240));

    let report = agent.flush_dynamic(&mut scene, &CancelToken::new()).unwrap();

    assert_eq!(cameras(&scene).len(), 1);
    assert_eq!(view_events(&report.events).len(), 1);
}

// ─── Ground plane ───────────────────────────────────────────────────────────

fn small_grid() -> SyncSettings {
    SyncSettings {
        ground_plane_subdivisions: 4,
        ..SyncSettings::default()
    }
}

#[test]
fn test_ground_plane_is_uploaded_once() {
    let (mut agent, mut scene) = warmed_up_with(small_grid());
    agent.apply_ground_plane(&ground(true, -1.0)).unwrap();

    agent.flush(&mut scene, &CancelToken::new()).unwrap();

    assert!(scene
        .calls
        .iter()
        .any(|c| matches!(c, Call::ResizeMesh(_, 25, 32))));
    let object = agent
        .objects()
        .uploaded(GROUND_PLANE_INSTANCE)
        .expect("ground instance")
        .handle;
    assert!(scene.calls.contains(&Call::SetObjectTransform(
        object,
        Transform::from_translation(Vec3::new(0.0, 0.0, -1.0))
    )));
    assert!(scene.calls.contains(&Call::SetObjectVisibility(
        object,
        PathRay::ALL_VISIBILITY.without(PathRay::SHADOW)
    )));
    assert!(agent.geometry().uploaded(GROUND_PLANE_MESH).is_some());

    scene.clear_calls();
    agent.apply_ground_plane(&ground(true, -1.0)).unwrap();
    agent.flush(&mut scene, &CancelToken::new()).unwrap();
    assert!(scene.calls.is_empty(), "Unexpected calls: {:?}", scene.calls);
}

#[test]
fn test_disabled_ground_plane_is_never_uploaded() {
    let (mut agent, mut scene) = warmed_up_with(small_grid());
    agent.apply_ground_plane(&ground(false, 0.0)).unwrap();

    agent.flush(&mut scene, &CancelToken::new()).unwrap();

    assert!(scene.calls.is_empty(), "Unexpected calls: {:?}", scene.calls);
}

#[test]
fn test_disabling_the_ground_plane_hides_it_without_touching_geometry() {
    let (mut agent, mut scene) = warmed_up_with(small_grid());
    agent.apply_ground_plane(&ground(true, 0.0)).unwrap();
    agent.flush(&mut scene, &CancelToken::new()).unwrap();
    let object = agent.objects().uploaded(GROUND_PLANE_INSTANCE).unwrap().handle;
    scene.clear_calls();

    agent.apply_ground_plane(&ground(false, 0.0)).unwrap();
    agent.flush(&mut scene, &CancelToken::new()).unwrap();

    assert!(scene
        .calls
        .contains(&Call::SetObjectVisibility(object, PathRay::HIDDEN)));
    assert_eq!(scene.count(is_mesh_upload), 0);
}

#[test]
fn test_shadow_only_ground_plane_is_a_camera_visible_catcher() {
    let (mut agent, mut scene) = warmed_up_with(small_grid());
    let mut plane = ground(true, 0.0);
    plane.shadow_only = true;
    agent.apply_ground_plane(&plane).unwrap();

    agent.flush(&mut scene, &CancelToken::new()).unwrap();

    let object = agent.objects().uploaded(GROUND_PLANE_INSTANCE).unwrap().handle;
    assert!(scene
        .calls
        .contains(&Call::SetObjectVisibility(object, PathRay::CAMERA)));
    assert!(scene.calls.iter().any(|c| matches!(
        c,
        Call::SetObjectShadowFlags(o, f) if *o == object && f.shadow_catcher
    )));
}

#[test]
fn test_dynamic_ground_plane_moves_only_the_transform() {
    let (mut agent, mut scene) = warmed_up_with(small_grid());
    agent.apply_ground_plane(&ground(true, 0.0)).unwrap();
    agent.flush(&mut scene, &CancelToken::new()).unwrap();
    let object = agent.objects().uploaded(GROUND_PLANE_INSTANCE).unwrap().handle;
    scene.clear_calls();

    agent.apply_dynamic_ground_plane(&ground(true, 2.5));
    agent.flush_dynamic(&mut scene, &CancelToken::new()).unwrap();

    let lifted = Transform::from_translation(Vec3::new(0.0, 0.0, 2.5));
    assert_eq!(
        scene.calls,
        vec![
            Call::SetObjectTransform(object, lifted),
            Call::TagObjectUpdate(object),
        ]
    );
}

// ─── Render settings ────────────────────────────────────────────────────────

#[test]
fn test_configured_integrator_is_applied_on_the_first_flush_only() {
    init_logging();
    let preset = IntegratorSettings {
        samples: 64,
        ..IntegratorSettings::default()
    };
    let mut agent = SyncAgent::new(SyncSettings {
        integrator: preset.clone(),
        ..SyncSettings::default()
    });
    let mut scene = RecordingScene::new();

    agent.flush(&mut scene, &CancelToken::new()).unwrap();
    assert!(scene.calls.contains(&Call::ApplyIntegrator(preset)));
    assert!(scene.calls.contains(&Call::TagFilmUpdate));

    scene.clear_calls();
    agent.flush(&mut scene, &CancelToken::new()).unwrap();
    assert_eq!(scene.count(|c| matches!(c, Call::ApplyIntegrator(_))), 0);
}

#[test]
fn test_settings_snapshot_integrator_replaces_the_preset() {
    let (mut agent, mut scene) = warmed_up();
    let integrator = IntegratorSettings {
        samples: 16,
        no_caustics: true,
        ..IntegratorSettings::default()
    };
    agent.apply_render_settings(RenderSettingsRecord {
        integrator: integrator.clone(),
        ..RenderSettingsRecord::default()
    });

    agent.flush(&mut scene, &CancelToken::new()).unwrap();

    assert_eq!(
        scene.count(|c| matches!(c, Call::ApplyIntegrator(_))),
        1
    );
    assert!(scene.calls.contains(&Call::ApplyIntegrator(integrator)));
}
