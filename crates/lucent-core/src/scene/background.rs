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

//! Background and environment descriptions.

use crate::math::{LinearRgba, Vec3};
use serde::{Deserialize, Serialize};

/// How the viewport background is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BackgroundStyle {
    /// A single colour.
    #[default]
    SolidColor,
    /// A vertical two-colour gradient.
    Gradient,
    /// An environment texture or colour.
    Environment,
    /// A wallpaper image stretched over the viewport.
    WallpaperImage,
}

/// Projection modes as the document names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectionMode {
    /// Let the renderer decide; treated as an environment map.
    #[default]
    Automatic,
    /// Equirectangular environment map.
    EnvironmentMap,
    /// Box projection.
    Box,
    /// Light probe.
    LightProbe,
    /// Six-face cube map.
    Cube,
    /// Horizontal-cross cube map.
    HorizontalCrossCube,
    /// Vertical-cross cube map.
    VerticalCrossCube,
    /// Hemispherical.
    Hemispherical,
    /// Spherical.
    Spherical,
    /// Planar.
    Planar,
    /// Cylindrical.
    Cylindrical,
}

/// Projection modes the renderer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvironmentProjection {
    /// Equirectangular environment map.
    EnvironmentMap,
    /// Box.
    Box,
    /// Light probe.
    LightProbe,
    /// Cube map.
    CubeMap,
    /// Horizontal-cross cube map.
    CubeMapHorizontal,
    /// Vertical-cross cube map.
    CubeMapVertical,
    /// Hemispherical.
    Hemispherical,
    /// Spherical.
    Spherical,
    /// Screen-space wallpaper (planar).
    Wallpaper,
}

/// What an environment is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvironmentUsage {
    /// Seen directly by camera rays.
    Background,
    /// Lights the scene.
    Skylighting,
    /// Seen in reflections and refractions.
    ReflectionAndRefraction,
}

/// Placement of an environment image on its projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentTransform {
    /// Offset of the image.
    pub translation: Vec3,
    /// Per-axis scale of the image.
    pub scale: Vec3,
    /// Euler rotation in radians.
    pub rotation: Vec3,
}

impl Default for EnvironmentTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
        }
    }
}

/// One environment: a colour, optionally textured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentTexture {
    /// Display name.
    pub name: String,
    /// Image identity, `None` for a plain colour environment.
    pub image: Option<String>,
    /// Base colour, display referred.
    pub color: LinearRgba,
    /// Strength multiplier.
    pub strength: f32,
    /// Whether this environment is switched on.
    pub enabled: bool,
    /// Document projection mode.
    pub projection: ProjectionMode,
    /// Image placement.
    pub transform: EnvironmentTransform,
}

impl Default for EnvironmentTexture {
    fn default() -> Self {
        Self {
            name: String::new(),
            image: None,
            color: LinearRgba::BLACK,
            strength: 1.0,
            enabled: true,
            projection: ProjectionMode::Automatic,
            transform: EnvironmentTransform::default(),
        }
    }
}

/// Wallpaper image settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wallpaper {
    /// Image identity.
    pub image: String,
    /// Scale the image to fit the viewport instead of centring it.
    pub scale_to_fit: bool,
}

/// Which network topology the background compiler builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackgroundBranch {
    /// No reflection override, no custom sky, skylight on.
    NoCustomsSkylightOn,
    /// No reflection override, no custom sky, skylight off.
    NoCustomsSkylightOff,
    /// Reflection override or custom sky present.
    FullCustomization,
}

/// Everything the background compiler needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundDescription {
    /// Fill style.
    pub style: BackgroundStyle,
    /// First colour: solid colour, or gradient top.
    pub color1: LinearRgba,
    /// Second colour: gradient bottom.
    pub color2: LinearRgba,
    /// Gamma applied to every colour.
    pub gamma: f32,
    /// Whether skylight is on.
    pub skylight_enabled: bool,
    /// Skylight intensity used when no custom sky environment is set.
    pub skylight_strength: f32,
    /// Environment for [`EnvironmentUsage::Background`].
    pub background_env: Option<EnvironmentTexture>,
    /// Environment for [`EnvironmentUsage::ReflectionAndRefraction`].
    pub reflection_env: Option<EnvironmentTexture>,
    /// Environment for [`EnvironmentUsage::Skylighting`].
    pub sky_env: Option<EnvironmentTexture>,
    /// Wallpaper image, used with [`BackgroundStyle::WallpaperImage`].
    pub wallpaper: Option<Wallpaper>,
    /// Whether environment textures use a planar projection.
    pub planar_projection: bool,
}

impl Default for BackgroundDescription {
    fn default() -> Self {
        Self {
            style: BackgroundStyle::SolidColor,
            color1: LinearRgba::gray(0.5),
            color2: LinearRgba::gray(0.5),
            gamma: 1.0,
            skylight_enabled: false,
            skylight_strength: 1.0,
            background_env: None,
            reflection_env: None,
            sky_env: None,
            wallpaper: None,
            planar_projection: false,
        }
    }
}

impl BackgroundDescription {
    /// Background environment, only when the style actually uses it.
    fn active_background_env(&self) -> Option<&EnvironmentTexture> {
        match self.style {
            BackgroundStyle::Environment => self.background_env.as_ref().filter(|e| e.enabled),
            _ => None,
        }
    }

    /// Image feeding the direct background, environment or wallpaper.
    pub fn background_image(&self) -> Option<&str> {
        match self.style {
            BackgroundStyle::Environment => self
                .active_background_env()
                .and_then(|e| e.image.as_deref()),
            BackgroundStyle::WallpaperImage => self.wallpaper.as_ref().map(|w| w.image.as_str()),
            _ => None,
        }
    }

    /// True when the direct background samples an image.
    pub fn has_background_texture(&self) -> bool {
        self.background_image().is_some()
    }

    /// Strength of the direct background.
    pub fn background_strength(&self) -> f32 {
        self.active_background_env().map_or(1.0, |e| e.strength)
    }

    /// Colour of the direct background when no texture is sampled.
    pub fn background_color(&self) -> LinearRgba {
        match self.active_background_env() {
            Some(env) => env.color,
            None => self.color1,
        }
    }

    /// True when the gradient fill is used.
    pub fn use_gradient(&self) -> bool {
        self.style == BackgroundStyle::Gradient
    }

    /// True when a dedicated reflection environment overrides the background
    /// in glossy reflections.
    pub fn use_custom_reflection(&self) -> bool {
        self.reflection_env.as_ref().is_some_and(|e| e.enabled)
    }

    /// True when the reflection override samples an image.
    pub fn has_reflection_texture(&self) -> bool {
        self.use_custom_reflection()
            && self
                .reflection_env
                .as_ref()
                .is_some_and(|e| e.image.is_some())
    }

    /// True when a non-default sky environment is set.
    pub fn use_custom_sky(&self) -> bool {
        self.sky_env.as_ref().is_some_and(|e| e.enabled)
    }

    /// True when the custom sky samples an image.
    pub fn has_sky_texture(&self) -> bool {
        self.use_custom_sky() && self.sky_env.as_ref().is_some_and(|e| e.image.is_some())
    }

    /// Neither reflection override nor custom sky is active.
    pub fn no_customization(&self) -> bool {
        !self.use_custom_reflection() && !self.use_custom_sky()
    }

    /// The topology branch selected by the current flags.
    pub fn branch(&self) -> BackgroundBranch {
        match (self.no_customization(), self.skylight_enabled) {
            (true, true) => BackgroundBranch::NoCustomsSkylightOn,
            (true, false) => BackgroundBranch::NoCustomsSkylightOff,
            (false, _) => BackgroundBranch::FullCustomization,
        }
    }

    /// Reflection override colour (black when unused).
    pub fn reflection_color(&self) -> LinearRgba {
        self.reflection_env
            .as_ref()
            .filter(|e| e.enabled)
            .map_or(LinearRgba::BLACK, |e| e.color)
    }

    /// Reflection override strength.
    pub fn reflection_strength(&self) -> f32 {
        self.reflection_env
            .as_ref()
            .filter(|e| e.enabled)
            .map_or(1.0, |e| e.strength)
    }

    /// Sky colour (black when no custom sky is set).
    pub fn sky_color(&self) -> LinearRgba {
        self.sky_env
            .as_ref()
            .filter(|e| e.enabled)
            .map_or(LinearRgba::BLACK, |e| e.color)
    }

    /// Sky strength: the custom sky's strength, or the plain skylight strength.
    pub fn sky_strength(&self) -> f32 {
        self.sky_env
            .as_ref()
            .filter(|e| e.enabled)
            .map_or(self.skylight_strength, |e| e.strength)
    }

    /// Factor applied to non-sky sources. When the background itself acts as
    /// the skylight, the skylight strength scales it.
    pub fn non_sky_strength_factor(&self) -> f32 {
        if self.skylight_enabled && !self.use_custom_sky() {
            self.skylight_strength
        } else {
            1.0
        }
    }
}
