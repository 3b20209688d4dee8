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

//! Normalised surface shader descriptions, the output of material compilation.

use crate::math::LinearRgba;
use crate::scene::ShaderHash;
use serde::{Deserialize, Serialize};

/// A texture bound to a shader slot, with its blend amount resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureBinding {
    /// Image identity.
    pub image: String,
    /// Blend amount, `0..=1`.
    pub amount: f32,
    /// Use the image's alpha channel.
    pub use_alpha: bool,
}

/// Parameters of a generic (simulated legacy) surface.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenericSurface {
    /// Diffuse colour.
    pub diffuse_color: LinearRgba,
    /// Specular colour.
    pub specular_color: LinearRgba,
    /// Reflection colour.
    pub reflection_color: LinearRgba,
    /// Roughness of reflections.
    pub reflection_roughness: f32,
    /// Refraction colour.
    pub refraction_color: LinearRgba,
    /// Roughness of refractions.
    pub refraction_roughness: f32,
    /// Transparency colour.
    pub transparency_color: LinearRgba,
    /// Emission colour.
    pub emission_color: LinearRgba,
    /// Fresnel index of refraction.
    pub fresnel_ior: f32,
    /// Index of refraction.
    pub ior: f32,
    /// Surface roughness.
    pub roughness: f32,
    /// Reflectivity.
    pub reflectivity: f32,
    /// Transparency.
    pub transparency: f32,
    /// Shine, `0..=2`.
    pub shine: f32,
    /// Fresnel reflections on.
    pub fresnel_reflections: bool,
    /// Lighting disabled.
    pub shadeless: bool,
    /// Diffuse texture.
    pub diffuse_texture: Option<TextureBinding>,
    /// Bump texture.
    pub bump_texture: Option<TextureBinding>,
    /// Transparency texture.
    pub transparency_texture: Option<TextureBinding>,
}

/// The shading model and its parameters. Colours are already gamma corrected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShaderBody {
    /// Pure diffuse.
    Diffuse {
        /// Base colour.
        color: LinearRgba,
    },
    /// Glass.
    Glass {
        /// Transmission tint.
        color: LinearRgba,
        /// Frost.
        frost: f32,
        /// Index of refraction.
        ior: f32,
    },
    /// Plastic.
    Plastic {
        /// Base colour.
        diffuse: LinearRgba,
        /// Frost.
        frost: f32,
        /// Polish.
        polish: f32,
        /// Reflectivity.
        reflectivity: f32,
        /// Transparency.
        transparency: f32,
    },
    /// Emissive surface.
    Emissive {
        /// Emission colour.
        color: LinearRgba,
        /// Strength.
        strength: f32,
    },
    /// Generic surface from a simulated legacy material.
    Generic(GenericSurface),
}

/// A compiled, renderer-ready surface shader description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderDescription {
    /// Content hash of the source material.
    pub hash: ShaderHash,
    /// Display name.
    pub name: String,
    /// Gamma that was applied to the colours.
    pub gamma: f32,
    /// Shading model.
    pub body: ShaderBody,
}
