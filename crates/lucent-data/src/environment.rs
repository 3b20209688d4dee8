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

//! The environment store: the background description under construction.
//!
//! Every setter compares before writing, so re-sending an unchanged value does
//! not trigger a background recompile.

use lucent_core::math::LinearRgba;
use lucent_core::scene::{
    BackgroundDescription, BackgroundStyle, EnvironmentTexture, EnvironmentUsage, Wallpaper,
};

/// Staging store for the background.
#[derive(Debug, Default)]
pub struct EnvironmentStore {
    description: BackgroundDescription,
    modified: bool,
}

impl EnvironmentStore {
    /// Creates a store holding the default background.
    pub fn new() -> Self {
        Self::default()
    }

    fn update<T: PartialEq>(modified: &mut bool, slot: &mut T, value: T) {
        if *slot != value {
            *slot = value;
            *modified = true;
        }
    }

    /// Switches skylight on or off.
    pub fn set_skylight_enabled(&mut self, enabled: bool) {
        Self::update(
            &mut self.modified,
            &mut self.description.skylight_enabled,
            enabled,
        );
    }

    /// Sets the skylight intensity used without a custom sky environment.
    pub fn set_skylight_strength(&mut self, strength: f32) {
        Self::update(
            &mut self.modified,
            &mut self.description.skylight_strength,
            strength,
        );
    }

    /// Sets fill style and the two colours.
    pub fn set_background_data(
        &mut self,
        style: BackgroundStyle,
        color1: LinearRgba,
        color2: LinearRgba,
    ) {
        let d = &mut self.description;
        Self::update(&mut self.modified, &mut d.style, style);
        Self::update(&mut self.modified, &mut d.color1, color1);
        Self::update(&mut self.modified, &mut d.color2, color2);
    }

    /// Assigns or clears the environment for one usage.
    pub fn set_environment(&mut self, usage: EnvironmentUsage, env: Option<EnvironmentTexture>) {
        let d = &mut self.description;
        let slot = match usage {
            EnvironmentUsage::Background => &mut d.background_env,
            EnvironmentUsage::Skylighting => &mut d.sky_env,
            EnvironmentUsage::ReflectionAndRefraction => &mut d.reflection_env,
        };
        Self::update(&mut self.modified, slot, env);
    }

    /// Sets the wallpaper. An empty name clears it.
    pub fn set_wallpaper(&mut self, name: &str, scale_to_fit: bool) {
        let wallpaper = (!name.is_empty()).then(|| Wallpaper {
            image: name.to_owned(),
            scale_to_fit,
        });
        Self::update(
            &mut self.modified,
            &mut self.description.wallpaper,
            wallpaper,
        );
    }

    /// Sets the gamma applied to background colours.
    pub fn set_gamma(&mut self, gamma: f32) {
        Self::update(&mut self.modified, &mut self.description.gamma, gamma);
    }

    /// Switches planar projection of environment textures.
    pub fn set_planar_projection(&mut self, planar: bool) {
        Self::update(
            &mut self.modified,
            &mut self.description.planar_projection,
            planar,
        );
    }

    /// The current description.
    pub fn description(&self) -> &BackgroundDescription {
        &self.description
    }

    /// True when the background changed since the last reset.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Forces a recompile on the next upload.
    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    /// Clears the modified flag.
    pub fn reset(&mut self) {
        self.modified = false;
    }
}
