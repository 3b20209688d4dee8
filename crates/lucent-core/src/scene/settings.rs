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

//! Render settings snapshots.

use super::background::BackgroundStyle;
use super::view::FocalBlur;
use crate::math::LinearRgba;
use serde::{Deserialize, Serialize};

/// Gamma / linear workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearWorkflow {
    /// Whether the linear workflow is active.
    pub enabled: bool,
    /// Gamma applied to document colours.
    pub gamma: f32,
}

impl Default for LinearWorkflow {
    fn default() -> Self {
        Self {
            enabled: false,
            gamma: 1.0,
        }
    }
}

impl LinearWorkflow {
    /// The gamma actually applied: `1.0` while the workflow is off.
    pub fn effective_gamma(&self) -> f32 {
        if self.enabled {
            self.gamma
        } else {
            1.0
        }
    }
}

/// Path-tracing integrator settings.
///
/// The default is a balanced preview preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegratorSettings {
    /// Samples per pixel.
    pub samples: u32,
    /// Global bounce limit.
    pub max_bounce: u32,
    /// Diffuse bounce limit.
    pub max_diffuse_bounce: u32,
    /// Glossy bounce limit.
    pub max_glossy_bounce: u32,
    /// Transmission bounce limit.
    pub max_transmission_bounce: u32,
    /// Volume bounce limit.
    pub max_volume_bounce: u32,
    /// Transparent bounce limit.
    pub transparent_max_bounce: u32,
    /// Disable caustics.
    pub no_caustics: bool,
    /// Clamp for direct samples, `0.0` disables clamping.
    pub sample_clamp_direct: f32,
    /// Clamp for indirect samples, `0.0` disables clamping.
    pub sample_clamp_indirect: f32,
    /// Glossy filter.
    pub filter_glossy: f32,
    /// Light sampling threshold.
    pub light_sampling_threshold: f32,
}

impl Default for IntegratorSettings {
    fn default() -> Self {
        Self {
            samples: 500,
            max_bounce: 32,
            max_diffuse_bounce: 32,
            max_glossy_bounce: 32,
            max_transmission_bounce: 32,
            max_volume_bounce: 32,
            transparent_max_bounce: 32,
            no_caustics: false,
            sample_clamp_direct: 0.0,
            sample_clamp_indirect: 0.0,
            filter_glossy: 0.0,
            light_sampling_threshold: 0.05,
        }
    }
}

/// A snapshot of the document's render settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettingsRecord {
    /// Background fill style.
    pub background_style: BackgroundStyle,
    /// Solid colour or gradient top.
    pub gradient_top: LinearRgba,
    /// Gradient bottom.
    pub gradient_bottom: LinearRgba,
    /// Wallpaper image identity, when the style is a wallpaper.
    pub wallpaper: Option<String>,
    /// Scale the wallpaper to fit.
    pub scale_to_fit: bool,
    /// Gamma / linear workflow.
    pub linear_workflow: LinearWorkflow,
    /// Depth of field.
    pub focal_blur: FocalBlur,
    /// Integrator preset.
    pub integrator: IntegratorSettings,
}

impl Default for RenderSettingsRecord {
    fn default() -> Self {
        Self {
            background_style: BackgroundStyle::SolidColor,
            gradient_top: LinearRgba::gray(0.5),
            gradient_bottom: LinearRgba::gray(0.5),
            wallpaper: None,
            scale_to_fit: false,
            linear_workflow: LinearWorkflow::default(),
            focal_blur: FocalBlur::default(),
            integrator: IntegratorSettings::default(),
        }
    }
}
