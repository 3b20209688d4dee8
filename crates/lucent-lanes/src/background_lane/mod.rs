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

//! The background lane: compiles a [`BackgroundDescription`] into a shading
//! network.
//!
//! The renderer's shading nodes have no control flow, so the choice between
//! the direct background, the reflection override and the sky is encoded as
//! blend weights computed from the light-path signals of each sample:
//!
//! ```text
//! base        = mix(bg * bg_strength * non_sky, gradient, use_gradient)
//! refl_switch = use_custom_reflection * glossy * reflection
//! reflected   = mix(base, refl * refl_strength * non_sky, refl_switch)
//! sky         = sky_source * sky_strength * skylight_enabled
//! lit         = mix(base, sky, 1 - camera)
//! result      = mix(reflected, lit, (1 - refl_switch) * (1 - (camera + transmission)))
//! ```
//!
//! When neither a reflection override nor a custom sky is active only the
//! `base` part is built, with a constant strength when skylight is on and a
//! strength of `max(camera, glossy, transmission, singular)` when it is off.

mod projection;

pub use self::projection::environment_projection;

use crate::error::LaneError;
use lucent_core::config::SyncSettings;
use lucent_core::lane::{Lane, LaneKind};
use lucent_core::math::Vec3;
use lucent_core::scene::{
    BackgroundBranch, BackgroundDescription, BackgroundStyle, EnvironmentProjection,
    EnvironmentTexture, EnvironmentTransform,
};
use lucent_core::shader::socket::*;
use lucent_core::shader::{
    BlendMode, ColorStop, MathOp, NodeKind, ShaderGraph, ShaderGraphBuilder, ShaderNode,
};
use std::f32::consts::FRAC_PI_2;

/// Name given to every compiled background network.
pub const BACKGROUND_GRAPH: &str = "background";

/// Names of the environment texture nodes, as used by [`SampleInputs`].
///
/// [`SampleInputs`]: lucent_core::shader::eval::SampleInputs
pub mod nodes {
    /// Direct background texture.
    pub const BG_TEXTURE: &str = "bg_env_texture";
    /// Reflection override texture.
    pub const REFLECTION_TEXTURE: &str = "refl_env_texture";
    /// Sky texture.
    pub const SKY_TEXTURE: &str = "sky_env_texture";
    /// Background closure of the reduced network.
    pub const NO_CUSTOMS: &str = "bg_no_customs";
    /// Background closure of the full network.
    pub const FINAL: &str = "final_bg";
    /// Graph output.
    pub const OUTPUT: &str = "output";
}

use self::nodes::*;

fn as_float(flag: bool) -> f32 {
    if flag {
        1.0
    } else {
        0.0
    }
}

fn mix(name: &str, blend: BlendMode) -> ShaderNode {
    ShaderNode::new(name, NodeKind::Mix { blend, clamp: false })
}

fn math(name: &str, op: MathOp, clamp: bool) -> ShaderNode {
    ShaderNode::new(name, NodeKind::Math { op, clamp })
}

/// Scales a colour by a scalar coming from another node.
fn factored(name: &str) -> ShaderNode {
    mix(name, BlendMode::Multiply).with(FAC, 1.0)
}

/// Compiles background descriptions.
#[derive(Debug, Clone, Default)]
pub struct BackgroundLane {
    preview: bool,
}

impl Lane for BackgroundLane {
    fn strategy_name(&self) -> &'static str {
        if self.preview {
            "PreviewBackground"
        } else {
            "RayClassifiedBackground"
        }
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Background
    }
}

impl BackgroundLane {
    /// Creates a lane honouring the preview flag of `settings`.
    pub fn new(settings: &SyncSettings) -> Self {
        Self {
            preview: settings.preview_background,
        }
    }

    /// Creates a lane that always emits the minimal preview network.
    pub fn preview() -> Self {
        Self { preview: true }
    }

    /// Compiles `desc` into a validated shading network.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::Graph`] if the generated network fails validation.
    pub fn compile(&self, desc: &BackgroundDescription) -> Result<ShaderGraph, LaneError> {
        let builder = if self.preview {
            preview_graph(desc)
        } else {
            let branch = desc.branch();
            log::debug!("Compiling background network ({branch:?})");
            full_graph(desc, branch)
        };
        builder
            .build()
            .map_err(|e| LaneError::graph(BACKGROUND_GRAPH, e))
    }
}

fn texture_projection(env: Option<&EnvironmentTexture>) -> EnvironmentProjection {
    env.map_or(EnvironmentProjection::EnvironmentMap, |e| {
        environment_projection(e.projection)
    })
}

fn env_texture(
    name: &str,
    image: Option<&str>,
    env: Option<&EnvironmentTexture>,
    projection: EnvironmentProjection,
) -> ShaderNode {
    ShaderNode::new(
        name,
        NodeKind::EnvironmentTexture {
            image: image.map(str::to_string),
            projection,
            transform: env.map(|e| e.transform).unwrap_or_default(),
        },
    )
}

/// Only the direct background shows the wallpaper; reflection and sky keep
/// their own projections.
fn background_texture(desc: &BackgroundDescription) -> ShaderNode {
    let env = desc.background_env.as_ref();
    let projection = if desc.style == BackgroundStyle::WallpaperImage {
        EnvironmentProjection::Wallpaper
    } else {
        texture_projection(env)
    };
    env_texture(BG_TEXTURE, desc.background_image(), env, projection)
}

fn preview_graph(desc: &BackgroundDescription) -> ShaderGraphBuilder {
    let mut b = ShaderGraphBuilder::new(BACKGROUND_GRAPH);
    b.add(
        ShaderNode::new(FINAL, NodeKind::Background)
            .with(COLOR, desc.background_color().apply_gamma(desc.gamma))
            .with(STRENGTH, desc.background_strength()),
    )
    .add(ShaderNode::new(OUTPUT, NodeKind::Output))
    .connect(FINAL, BACKGROUND, OUTPUT, SURFACE);
    if desc.has_background_texture() {
        b.add(background_texture(desc))
            .connect(BG_TEXTURE, COLOR, FINAL, COLOR);
    }
    b
}

fn full_graph(desc: &BackgroundDescription, branch: BackgroundBranch) -> ShaderGraphBuilder {
    let gamma = desc.gamma;
    let non_sky = desc.non_sky_strength_factor();
    let mut b = ShaderGraphBuilder::new(BACKGROUND_GRAPH);

    // Base: solid colour or texture, or the gradient.
    b.add(ShaderNode::new("texcoord", NodeKind::TextureCoordinate))
        .add(background_texture(desc))
        .add(
            mix("bg_color_or_texture", BlendMode::Blend)
                .with(COLOR1, desc.background_color().apply_gamma(gamma))
                .with(FAC, as_float(desc.has_background_texture())),
        )
        .add(
            math("bg_strength_factor", MathOp::Multiply, false)
                .with(VALUE1, desc.background_strength())
                .with(VALUE2, non_sky),
        )
        .add(factored("factored_bg_color"))
        .add(ShaderNode::new(
            "gradient_texture",
            NodeKind::GradientTexture {
                rotation: Vec3::new(0.0, 0.0, FRAC_PI_2),
            },
        ))
        .add(ShaderNode::new(
            "gradient_ramp",
            NodeKind::ColorRamp {
                stops: vec![
                    ColorStop {
                        position: 0.0,
                        color: desc.color2.apply_gamma(gamma),
                    },
                    ColorStop {
                        position: 1.0,
                        color: desc.color1.apply_gamma(gamma),
                    },
                ],
            },
        ))
        .add(mix("gradient_or_other", BlendMode::Blend).with(FAC, as_float(desc.use_gradient())))
        .add(ShaderNode::new("light_path", NodeKind::LightPath))
        .add(ShaderNode::new(OUTPUT, NodeKind::Output))
        .connect("texcoord", GENERATED, BG_TEXTURE, VECTOR)
        .connect(BG_TEXTURE, COLOR, "bg_color_or_texture", COLOR2)
        .connect("bg_color_or_texture", COLOR, "factored_bg_color", COLOR1)
        .connect("bg_strength_factor", VALUE, "factored_bg_color", COLOR2)
        .connect("texcoord", WINDOW, "gradient_texture", VECTOR)
        .connect("gradient_texture", FAC, "gradient_ramp", FAC)
        .connect("factored_bg_color", COLOR, "gradient_or_other", COLOR1)
        .connect("gradient_ramp", COLOR, "gradient_or_other", COLOR2);

    match branch {
        BackgroundBranch::NoCustomsSkylightOn => {
            b.add(ShaderNode::new(NO_CUSTOMS, NodeKind::Background).with(STRENGTH, 1.0))
                .connect("gradient_or_other", COLOR, NO_CUSTOMS, COLOR)
                .connect(NO_CUSTOMS, BACKGROUND, OUTPUT, SURFACE);
        }
        BackgroundBranch::NoCustomsSkylightOff => {
            b.add(math("max_camera_glossy", MathOp::Maximum, true))
                .add(math("max_transmission", MathOp::Maximum, true))
                .add(math("max_singular", MathOp::Maximum, true))
                .add(ShaderNode::new(NO_CUSTOMS, NodeKind::Background))
                .connect("light_path", IS_CAMERA_RAY, "max_camera_glossy", VALUE1)
                .connect("light_path", IS_GLOSSY_RAY, "max_camera_glossy", VALUE2)
                .connect("max_camera_glossy", VALUE, "max_transmission", VALUE1)
                .connect("light_path", IS_TRANSMISSION_RAY, "max_transmission", VALUE2)
                .connect("max_transmission", VALUE, "max_singular", VALUE1)
                .connect("light_path", IS_SINGULAR_RAY, "max_singular", VALUE2)
                .connect("gradient_or_other", COLOR, NO_CUSTOMS, COLOR)
                .connect("max_singular", VALUE, NO_CUSTOMS, STRENGTH)
                .connect(NO_CUSTOMS, BACKGROUND, OUTPUT, SURFACE);
        }
        BackgroundBranch::FullCustomization => add_customizations(&mut b, desc),
    }
    b
}

fn add_customizations(b: &mut ShaderGraphBuilder, desc: &BackgroundDescription) {
    let gamma = desc.gamma;
    let non_sky = desc.non_sky_strength_factor();
    let refl_image = desc
        .reflection_env
        .as_ref()
        .filter(|_| desc.has_reflection_texture())
        .and_then(|e| e.image.as_deref());
    let sky_image = desc
        .sky_env
        .as_ref()
        .filter(|_| desc.has_sky_texture())
        .and_then(|e| e.image.as_deref());

    // Reflection override source.
    let refl_env = desc.reflection_env.as_ref();
    b.add(env_texture(
        REFLECTION_TEXTURE,
        refl_image,
        refl_env,
        texture_projection(refl_env),
    ))
    .add(
        mix("refl_color_or_texture", BlendMode::Blend)
            .with(COLOR1, desc.reflection_color().apply_gamma(gamma))
            .with(FAC, as_float(desc.has_reflection_texture())),
    )
    .add(
        math("refl_strength_factor", MathOp::Multiply, false)
            .with(VALUE1, desc.reflection_strength())
            .with(VALUE2, non_sky),
    )
    .add(factored("factored_refl_color"))
    .add(math("glossy_and_reflection", MathOp::Multiply, false))
    .add(
        math("refl_env_when_enabled", MathOp::Multiply, false)
            .with(VALUE1, as_float(desc.use_custom_reflection())),
    )
    .connect("texcoord", GENERATED, REFLECTION_TEXTURE, VECTOR)
    .connect(REFLECTION_TEXTURE, COLOR, "refl_color_or_texture", COLOR2)
    .connect("refl_color_or_texture", COLOR, "factored_refl_color", COLOR1)
    .connect("refl_strength_factor", VALUE, "factored_refl_color", COLOR2)
    .connect("light_path", IS_GLOSSY_RAY, "glossy_and_reflection", VALUE1)
    .connect("light_path", IS_REFLECTION_RAY, "glossy_and_reflection", VALUE2)
    .connect("glossy_and_reflection", VALUE, "refl_env_when_enabled", VALUE2);

    // Sky source: custom sky colour or texture, otherwise the base.
    b.add(
        mix("sky_color_or_base", BlendMode::Blend)
            .with(COLOR2, desc.sky_color().apply_gamma(gamma))
            .with(FAC, as_float(desc.use_custom_sky())),
    )
    .add(env_texture(
        SKY_TEXTURE,
        sky_image,
        desc.sky_env.as_ref(),
        texture_projection(desc.sky_env.as_ref()),
    ))
    .add(
        mix("sky_color_or_texture", BlendMode::Blend)
            .with(FAC, as_float(desc.has_sky_texture())),
    )
    .add(
        math("sky_or_not", MathOp::Multiply, false)
            .with(VALUE1, desc.sky_strength())
            .with(VALUE2, as_float(desc.skylight_enabled)),
    )
    .add(factored("factored_sky_color"))
    .connect("gradient_or_other", COLOR, "sky_color_or_base", COLOR1)
    .connect("texcoord", GENERATED, SKY_TEXTURE, VECTOR)
    .connect("sky_color_or_base", COLOR, "sky_color_or_texture", COLOR1)
    .connect(SKY_TEXTURE, COLOR, "sky_color_or_texture", COLOR2)
    .connect("sky_color_or_texture", COLOR, "factored_sky_color", COLOR1)
    .connect("sky_or_not", VALUE, "factored_sky_color", COLOR2);

    // Ray classification.
    b.add(math("non_camera_rays", MathOp::Subtract, false).with(VALUE1, 1.0))
        .add(math("camera_and_transmission", MathOp::Add, false))
        .add(math("invert_refl_switch", MathOp::Subtract, false).with(VALUE1, 1.0))
        .add(math("invert_cam_and_transm", MathOp::Subtract, false).with(VALUE1, 1.0))
        .add(math("not_cam_transm_nor_glossy_refl", MathOp::Multiply, false))
        .connect("light_path", IS_CAMERA_RAY, "non_camera_rays", VALUE2)
        .connect("light_path", IS_CAMERA_RAY, "camera_and_transmission", VALUE1)
        .connect("light_path", IS_TRANSMISSION_RAY, "camera_and_transmission", VALUE2)
        .connect("refl_env_when_enabled", VALUE, "invert_refl_switch", VALUE2)
        .connect("camera_and_transmission", VALUE, "invert_cam_and_transm", VALUE2)
        .connect("invert_refl_switch", VALUE, "not_cam_transm_nor_glossy_refl", VALUE1)
        .connect("invert_cam_and_transm", VALUE, "not_cam_transm_nor_glossy_refl", VALUE2);

    // Final blend.
    b.add(mix("refl_bg_or_custom_env", BlendMode::Blend))
        .add(mix("light_with_bg_or_sky", BlendMode::Blend))
        .add(mix("final_mix", BlendMode::Blend))
        .add(ShaderNode::new(FINAL, NodeKind::Background).with(STRENGTH, 1.0))
        .connect("gradient_or_other", COLOR, "refl_bg_or_custom_env", COLOR1)
        .connect("factored_refl_color", COLOR, "refl_bg_or_custom_env", COLOR2)
        .connect("refl_env_when_enabled", VALUE, "refl_bg_or_custom_env", FAC)
        .connect("gradient_or_other", COLOR, "light_with_bg_or_sky", COLOR1)
        .connect("factored_sky_color", COLOR, "light_with_bg_or_sky", COLOR2)
        .connect("non_camera_rays", VALUE, "light_with_bg_or_sky", FAC)
        .connect("refl_bg_or_custom_env", COLOR, "final_mix", COLOR1)
        .connect("light_with_bg_or_sky", COLOR, "final_mix", COLOR2)
        .connect("not_cam_transm_nor_glossy_refl", VALUE, "final_mix", FAC)
        .connect("final_mix", COLOR, FINAL, COLOR)
        .connect(FINAL, BACKGROUND, OUTPUT, SURFACE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lucent_core::math::LinearRgba;
    use lucent_core::scene::ProjectionMode;
    use lucent_core::shader::eval::{evaluate_surface, RaySignals, SampleInputs};
    use std::collections::HashMap;

    const BG: LinearRgba = LinearRgba::rgb(0.1, 0.2, 0.3);
    const REFL: LinearRgba = LinearRgba::rgb(0.9, 0.1, 0.1);
    const SKY: LinearRgba = LinearRgba::rgb(0.2, 0.4, 0.6);

    fn plain() -> BackgroundDescription {
        BackgroundDescription {
            color1: BG,
            ..Default::default()
        }
    }

    fn env(color: LinearRgba, strength: f32) -> Option<EnvironmentTexture> {
        Some(EnvironmentTexture {
            name: "env".into(),
            color,
            strength,
            ..Default::default()
        })
    }

    fn sample(graph: &ShaderGraph, rays: RaySignals) -> LinearRgba {
        evaluate_surface(
            graph,
            &SampleInputs {
                rays,
                ..Default::default()
            },
        )
    }

    fn assert_color(actual: LinearRgba, expected: LinearRgba) {
        assert_relative_eq!(actual.r, expected.r, epsilon = 1e-5);
        assert_relative_eq!(actual.g, expected.g, epsilon = 1e-5);
        assert_relative_eq!(actual.b, expected.b, epsilon = 1e-5);
    }

    fn compile(desc: &BackgroundDescription) -> ShaderGraph {
        BackgroundLane::default().compile(desc).unwrap()
    }

    #[test]
    fn no_customs_without_skylight_only_lights_direct_rays() {
        let graph = compile(&plain());
        assert!(graph.node(NO_CUSTOMS).is_some());
        assert!(graph.node(FINAL).is_none());
        assert_color(sample(&graph, RaySignals::camera()), BG);
        assert_color(sample(&graph, RaySignals::glossy()), BG);
        assert_color(sample(&graph, RaySignals::diffuse()), LinearRgba::BLACK);
    }

    #[test]
    fn no_customs_with_skylight_uses_constant_strength() {
        let desc = BackgroundDescription {
            skylight_enabled: true,
            skylight_strength: 0.5,
            ..plain()
        };
        let graph = compile(&desc);
        assert!(graph.link_into(NO_CUSTOMS, STRENGTH).is_none());
        assert_color(sample(&graph, RaySignals::diffuse()), BG.scaled(0.5));
        assert_color(sample(&graph, RaySignals::camera()), BG.scaled(0.5));
    }

    fn reflection_override() -> BackgroundDescription {
        BackgroundDescription {
            reflection_env: env(REFL, 2.0),
            ..plain()
        }
    }

    #[test]
    fn camera_rays_see_the_base_background() {
        let graph = compile(&reflection_override());
        assert!(graph.node(FINAL).is_some());
        assert_color(sample(&graph, RaySignals::camera()), BG);
    }

    #[test]
    fn glossy_reflections_see_the_reflection_override() {
        let graph = compile(&reflection_override());
        assert_color(sample(&graph, RaySignals::glossy_reflection()), REFL.scaled(2.0));
    }

    #[test]
    fn transmission_rays_never_see_sky_or_override() {
        let desc = BackgroundDescription {
            skylight_enabled: true,
            sky_env: env(SKY, 3.0),
            ..reflection_override()
        };
        let graph = compile(&desc);
        assert_color(sample(&graph, RaySignals::transmission()), BG);

        let mut rays = RaySignals::transmission();
        rays.camera = true;
        assert_color(sample(&graph, rays), BG);
    }

    #[test]
    fn glossy_rays_see_the_sky_when_skylight_is_on() {
        let desc = BackgroundDescription {
            skylight_enabled: true,
            sky_env: env(SKY, 2.0),
            ..plain()
        };
        let graph = compile(&desc);
        assert_color(sample(&graph, RaySignals::glossy()), SKY.scaled(2.0));
        assert_color(sample(&graph, RaySignals::glossy_reflection()), SKY.scaled(2.0));
        assert_color(sample(&graph, RaySignals::diffuse()), SKY.scaled(2.0));
        assert_color(sample(&graph, RaySignals::camera()), BG);
    }

    #[test]
    fn sky_goes_dark_when_skylight_is_off() {
        let desc = BackgroundDescription {
            skylight_enabled: false,
            sky_env: env(SKY, 2.0),
            ..plain()
        };
        let graph = compile(&desc);
        assert_color(sample(&graph, RaySignals::glossy()), LinearRgba::BLACK);
        assert_color(sample(&graph, RaySignals::camera()), BG);
    }

    #[test]
    fn skylight_strength_scales_non_sky_sources() {
        let desc = BackgroundDescription {
            skylight_enabled: true,
            skylight_strength: 0.25,
            reflection_env: env(REFL, 2.0),
            ..plain()
        };
        let graph = compile(&desc);
        assert_color(sample(&graph, RaySignals::camera()), BG.scaled(0.25));
        assert_color(
            sample(&graph, RaySignals::glossy_reflection()),
            REFL.scaled(0.5),
        );
    }

    #[test]
    fn gradient_spans_bottom_to_top() {
        let desc = BackgroundDescription {
            style: BackgroundStyle::Gradient,
            color1: LinearRgba::WHITE,
            color2: LinearRgba::BLACK,
            ..Default::default()
        };
        let graph = compile(&desc);
        let at = |gradient: f32| {
            evaluate_surface(
                &graph,
                &SampleInputs {
                    rays: RaySignals::camera(),
                    gradient,
                    ..Default::default()
                },
            )
        };
        assert_color(at(1.0), LinearRgba::WHITE);
        assert_color(at(0.0), LinearRgba::BLACK);
        assert_color(at(0.5), LinearRgba::gray(0.5));
    }

    #[test]
    fn background_texture_replaces_colour() {
        let texel = LinearRgba::rgb(0.3, 0.6, 0.9);
        let desc = BackgroundDescription {
            style: BackgroundStyle::Environment,
            background_env: Some(EnvironmentTexture {
                name: "hdr".into(),
                image: Some("studio.hdr".into()),
                strength: 2.0,
                projection: ProjectionMode::LightProbe,
                ..Default::default()
            }),
            ..Default::default()
        };
        let graph = compile(&desc);
        let Some(NodeKind::EnvironmentTexture {
            image, projection, ..
        }) =
            graph.node(BG_TEXTURE).map(|n| n.kind.clone())
        else {
            panic!("missing background texture node");
        };
        assert_eq!(image.as_deref(), Some("studio.hdr"));
        assert_eq!(projection, EnvironmentProjection::LightProbe);

        let color = evaluate_surface(
            &graph,
            &SampleInputs {
                rays: RaySignals::camera(),
                textures: HashMap::from([(BG_TEXTURE.to_string(), texel)]),
                ..Default::default()
            },
        );
        assert_color(color, texel.scaled(2.0));
    }

    #[test]
    fn wallpaper_uses_wallpaper_projection() {
        let desc = BackgroundDescription {
            style: BackgroundStyle::WallpaperImage,
            wallpaper: Some(lucent_core::scene::Wallpaper {
                image: "clouds.png".into(),
                scale_to_fit: true,
            }),
            ..Default::default()
        };
        let graph = compile(&desc);
        assert!(matches!(
            graph.node(BG_TEXTURE).map(|n| &n.kind),
            Some(NodeKind::EnvironmentTexture {
                projection: EnvironmentProjection::Wallpaper,
                ..
            })
        ));
    }

    #[test]
    fn wallpaper_leaves_reflection_and_sky_projections_alone() {
        let desc = BackgroundDescription {
            style: BackgroundStyle::WallpaperImage,
            wallpaper: Some(lucent_core::scene::Wallpaper {
                image: "clouds.png".into(),
                scale_to_fit: false,
            }),
            skylight_enabled: true,
            reflection_env: Some(EnvironmentTexture {
                name: "refl".into(),
                image: Some("refl.hdr".into()),
                projection: ProjectionMode::LightProbe,
                ..Default::default()
            }),
            sky_env: Some(EnvironmentTexture {
                name: "sky".into(),
                image: Some("sky.hdr".into()),
                projection: ProjectionMode::Spherical,
                ..Default::default()
            }),
            ..Default::default()
        };
        let graph = compile(&desc);
        let projection_of = |name: &str| match graph.node(name).map(|n| &n.kind) {
            Some(NodeKind::EnvironmentTexture { projection, .. }) => Some(*projection),
            _ => None,
        };
        assert_eq!(
            projection_of(BG_TEXTURE),
            Some(EnvironmentProjection::Wallpaper)
        );
        assert_eq!(
            projection_of(REFLECTION_TEXTURE),
            Some(EnvironmentProjection::LightProbe)
        );
        assert_eq!(
            projection_of(SKY_TEXTURE),
            Some(EnvironmentProjection::Spherical)
        );
    }

    #[test]
    fn environment_transforms_reach_their_texture_nodes() {
        let rotated = EnvironmentTransform {
            translation: Vec3::new(0.0, 0.0, 0.5),
            scale: Vec3::new(2.0, 2.0, 1.0),
            rotation: Vec3::new(0.0, 0.0, FRAC_PI_2),
        };
        let desc = BackgroundDescription {
            style: BackgroundStyle::Environment,
            background_env: Some(EnvironmentTexture {
                name: "bg".into(),
                image: Some("bg.hdr".into()),
                transform: rotated,
                ..Default::default()
            }),
            reflection_env: Some(EnvironmentTexture {
                name: "refl".into(),
                image: Some("refl.hdr".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let graph = compile(&desc);
        let transform_of = |name: &str| match graph.node(name).map(|n| &n.kind) {
            Some(NodeKind::EnvironmentTexture { transform, .. }) => Some(*transform),
            _ => None,
        };
        assert_eq!(transform_of(BG_TEXTURE), Some(rotated));
        assert_eq!(
            transform_of(REFLECTION_TEXTURE),
            Some(EnvironmentTransform::default())
        );
        assert_eq!(
            transform_of(SKY_TEXTURE),
            Some(EnvironmentTransform::default())
        );
    }

    #[test]
    fn colours_are_gamma_corrected() {
        let desc = BackgroundDescription {
            gamma: 2.0,
            ..plain()
        };
        let graph = compile(&desc);
        assert_color(sample(&graph, RaySignals::camera()), BG.apply_gamma(2.0));
    }

    #[test]
    fn preview_network_is_minimal() {
        let desc = BackgroundDescription {
            style: BackgroundStyle::Environment,
            background_env: env(SKY, 4.0),
            reflection_env: env(REFL, 1.0),
            ..Default::default()
        };
        let graph = BackgroundLane::preview().compile(&desc).unwrap();
        assert_eq!(graph.nodes().len(), 2);
        assert_color(sample(&graph, RaySignals::diffuse()), SKY.scaled(4.0));
    }
}
