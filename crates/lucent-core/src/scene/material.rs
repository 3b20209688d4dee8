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

//! Material descriptions as handed over by the document.
//!
//! A material is either *native* (it knows which built-in shading model it
//! wants) or *legacy* (a fixed-parameter description). Legacy materials come
//! in a closed set of families, each with its own statically typed field set.
//! Every legacy field is optional: an absent field falls back to its default
//! during compilation instead of failing the whole conversion.

use super::ids::ShaderHash;
use crate::math::LinearRgba;
use serde::{Deserialize, Serialize};

/// A material as seen by the synchronizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescription {
    /// Display name. Not part of the content hash.
    pub name: String,
    /// The appearance parameters.
    pub kind: MaterialKind,
}

impl MaterialDescription {
    /// Convenience constructor for a native material.
    pub fn native(name: impl Into<String>, material: NativeMaterial) -> Self {
        Self {
            name: name.into(),
            kind: MaterialKind::Native(material),
        }
    }

    /// Convenience constructor for a legacy material.
    pub fn legacy(name: impl Into<String>, material: LegacyMaterial) -> Self {
        Self {
            name: name.into(),
            kind: MaterialKind::Legacy(material),
        }
    }
}

/// A material paired with its content hash.
///
/// The hash is the material's identity for deduplication: two bindings with
/// the same hash share one compiled shader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialBinding {
    /// Content hash of `material`.
    pub hash: ShaderHash,
    /// The material itself.
    pub material: MaterialDescription,
}

impl MaterialBinding {
    /// Pairs a material with a hash computed elsewhere.
    pub fn with_hash(hash: ShaderHash, material: MaterialDescription) -> Self {
        Self { hash, material }
    }
}

/// Native or legacy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MaterialKind {
    /// A material that maps straight onto a built-in shading model.
    Native(NativeMaterial),
    /// A fixed-parameter material that has to be normalised first.
    Legacy(LegacyMaterial),
}

/// Built-in shading models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NativeMaterial {
    /// Pure diffuse.
    Diffuse {
        /// Base colour.
        color: LinearRgba,
    },
    /// Dielectric glass.
    Glass {
        /// Transmission tint.
        color: LinearRgba,
        /// Surface frost (roughness), `0..=1`.
        frost: f32,
        /// Index of refraction.
        ior: f32,
    },
    /// Simple plastic.
    Plastic {
        /// Base colour.
        diffuse: LinearRgba,
        /// Surface frost, `0..=1`.
        frost: f32,
        /// Polish amount, `0..=1`.
        polish: f32,
        /// Reflectivity, `0..=1`.
        reflectivity: f32,
        /// Transparency, `0..=1`.
        transparency: f32,
    },
    /// A light-emitting surface.
    Emissive {
        /// Emission colour.
        color: LinearRgba,
        /// Emission strength.
        strength: f32,
    },
}

/// The closed set of legacy material families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegacyFamily {
    /// Plaster, remapped to a diffuse material.
    Plaster,
    /// Glass, remapped to the glass model.
    Glass,
    /// Plastic, remapped to the plastic model.
    Plastic,
    /// Anything else, handled by generic extraction.
    Generic,
}

impl LegacyFamily {
    /// Recognises a legacy type name. First match wins; unknown names are
    /// [`LegacyFamily::Generic`].
    ///
    /// # Examples
    ///
    /// ```
    /// use lucent_core::scene::material::LegacyFamily;
    /// assert_eq!(LegacyFamily::from_type_name("Plaster"), LegacyFamily::Plaster);
    /// assert_eq!(LegacyFamily::from_type_name("Metal"), LegacyFamily::Generic);
    /// ```
    pub fn from_type_name(type_name: &str) -> Self {
        const KNOWN: [(&str, LegacyFamily); 3] = [
            ("Plaster", LegacyFamily::Plaster),
            ("Glass", LegacyFamily::Glass),
            ("Plastic", LegacyFamily::Plastic),
        ];
        KNOWN
            .iter()
            .find(|(name, _)| *name == type_name)
            .map(|(_, family)| *family)
            .unwrap_or(LegacyFamily::Generic)
    }
}

/// A legacy material, one variant per family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LegacyMaterial {
    /// "Plaster" material.
    Plaster(PlasterFields),
    /// "Glass" material.
    Glass(GlassFields),
    /// "Plastic" material.
    Plastic(PlasticFields),
    /// Any other material, described by its simulated basic parameters.
    Generic(GenericFields),
}

impl LegacyMaterial {
    /// The family this material belongs to.
    pub fn family(&self) -> LegacyFamily {
        match self {
            LegacyMaterial::Plaster(_) => LegacyFamily::Plaster,
            LegacyMaterial::Glass(_) => LegacyFamily::Glass,
            LegacyMaterial::Plastic(_) => LegacyFamily::Plastic,
            LegacyMaterial::Generic(_) => LegacyFamily::Generic,
        }
    }
}

/// Fields of a plaster material.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlasterFields {
    /// `diffuse`
    pub diffuse: Option<LinearRgba>,
}

/// Fields of a glass material.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GlassFields {
    /// `transparency-color`
    pub transparency_color: Option<LinearRgba>,
    /// `frost-amount`
    pub frost_amount: Option<f32>,
    /// `ior`
    pub ior: Option<f32>,
}

/// Fields of a plastic material.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlasticFields {
    /// `diffuse`
    pub diffuse: Option<LinearRgba>,
    /// `frost-amount`
    pub frost_amount: Option<f32>,
    /// `polish-amount`
    pub polish_amount: Option<f32>,
    /// `reflectivity`
    pub reflectivity: Option<f32>,
    /// `transparency`
    pub transparency: Option<f32>,
}

/// A texture assigned to one of the legacy slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyTextureSlot {
    /// Identity of the image (file name or embedded name). Decoding happens
    /// in the renderer.
    pub image: String,
    /// Slot amount in percent, as shown in the document's material editor.
    pub amount_percent: f32,
}

/// Simulated basic parameters of a generic legacy material.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenericFields {
    /// Diffuse colour.
    pub diffuse: Option<LinearRgba>,
    /// Specular colour.
    pub specular: Option<LinearRgba>,
    /// Reflection colour.
    pub reflection: Option<LinearRgba>,
    /// Transparent colour, also used for refraction.
    pub transparent: Option<LinearRgba>,
    /// Emission colour.
    pub emission: Option<LinearRgba>,
    /// Shine, `0..=255`.
    pub shine: Option<f32>,
    /// Reflectivity, `0..=1`.
    pub reflectivity: Option<f32>,
    /// Transparency, `0..=1`.
    pub transparency: Option<f32>,
    /// Index of refraction.
    pub ior: Option<f32>,
    /// Fresnel index of refraction.
    pub fresnel_ior: Option<f32>,
    /// Reflection glossiness, `0..=1`.
    pub reflection_glossiness: Option<f32>,
    /// Refraction glossiness, `0..=1`.
    pub refraction_glossiness: Option<f32>,
    /// Whether fresnel reflections are on.
    pub fresnel_reflections: Option<bool>,
    /// Whether lighting is disabled (shadeless).
    pub disable_lighting: Option<bool>,
    /// Whether the diffuse texture's alpha drives transparency.
    pub alpha_transparency: Option<bool>,
    /// Diffuse texture slot.
    pub diffuse_texture: Option<LegacyTextureSlot>,
    /// Bump texture slot.
    pub bump_texture: Option<LegacyTextureSlot>,
    /// Transparency texture slot.
    pub transparency_texture: Option<LegacyTextureSlot>,
}
