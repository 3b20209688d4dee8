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

//! The material lane: normalises document materials into shader descriptions.
//!
//! Legacy materials are dispatched on their family. Plaster, glass and plastic
//! are remapped onto the matching built-in models; every other legacy material
//! goes through generic extraction of its simulated basic parameters. Fields
//! missing from a legacy material fall back to a neutral value (black for
//! colours, zero for scalars, `1.0` for indices of refraction) instead of
//! failing the conversion.

mod hash;

pub use self::hash::{bind, content_hash};
pub(crate) use self::hash::truncate;

use lucent_core::config::SyncSettings;
use lucent_core::lane::{Lane, LaneKind};
use lucent_core::math::LinearRgba;
use lucent_core::scene::{
    GenericFields, LegacyMaterial, LegacyTextureSlot, MaterialBinding, MaterialKind,
    NativeMaterial,
};
use lucent_core::shader::description::GenericSurface;
use lucent_core::shader::{ShaderBody, ShaderDescription, TextureBinding};

const DEFAULT_IOR: f32 = 1.0;

/// Compiles materials into [`ShaderDescription`]s.
#[derive(Debug, Clone)]
pub struct MaterialLane {
    polish_factor: f32,
    max_shine: f32,
}

impl Default for MaterialLane {
    fn default() -> Self {
        Self::new(&SyncSettings::default())
    }
}

impl Lane for MaterialLane {
    fn strategy_name(&self) -> &'static str {
        "MaterialNormalization"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Material
    }
}

impl MaterialLane {
    /// Creates a lane using the factors from `settings`.
    pub fn new(settings: &SyncSettings) -> Self {
        Self {
            polish_factor: settings.polish_factor,
            max_shine: if settings.max_shine > 0.0 {
                settings.max_shine
            } else {
                255.0
            },
        }
    }

    /// Compiles `binding` with every colour gamma corrected by `gamma`.
    pub fn compile(&self, binding: &MaterialBinding, gamma: f32) -> ShaderDescription {
        let body = match &binding.material.kind {
            MaterialKind::Native(native) => native_body(native, gamma),
            MaterialKind::Legacy(legacy) => {
                log::trace!(
                    "Normalising legacy {:?} material '{}'",
                    legacy.family(),
                    binding.material.name
                );
                self.legacy_body(legacy, gamma)
            }
        };
        ShaderDescription {
            hash: binding.hash,
            name: binding.material.name.clone(),
            gamma,
            body,
        }
    }

    fn legacy_body(&self, legacy: &LegacyMaterial, gamma: f32) -> ShaderBody {
        let color = |c: Option<LinearRgba>| c.unwrap_or(LinearRgba::BLACK).apply_gamma(gamma);
        match legacy {
            LegacyMaterial::Plaster(f) => ShaderBody::Diffuse {
                color: color(f.diffuse),
            },
            LegacyMaterial::Glass(f) => ShaderBody::Glass {
                color: color(f.transparency_color),
                frost: f.frost_amount.unwrap_or(0.0),
                ior: f.ior.unwrap_or(DEFAULT_IOR),
            },
            LegacyMaterial::Plastic(f) => ShaderBody::Plastic {
                diffuse: color(f.diffuse),
                frost: f.frost_amount.unwrap_or(0.0),
                polish: f.polish_amount.unwrap_or(0.0),
                reflectivity: f.reflectivity.unwrap_or(0.0),
                transparency: f.transparency.unwrap_or(0.0),
            },
            LegacyMaterial::Generic(f) => ShaderBody::Generic(self.generic_surface(f, gamma)),
        }
    }

    fn generic_surface(&self, f: &GenericFields, gamma: f32) -> GenericSurface {
        let color = |c: Option<LinearRgba>| c.unwrap_or(LinearRgba::BLACK).apply_gamma(gamma);
        let transparent = color(f.transparent);
        let reflectivity = f.reflectivity.unwrap_or(0.0);

        GenericSurface {
            diffuse_color: color(f.diffuse),
            specular_color: color(f.specular),
            reflection_color: color(f.reflection),
            reflection_roughness: f.reflection_glossiness.unwrap_or(0.0) * self.polish_factor,
            refraction_color: transparent,
            refraction_roughness: f.refraction_glossiness.unwrap_or(0.0),
            transparency_color: transparent,
            emission_color: color(f.emission),
            fresnel_ior: f.fresnel_ior.unwrap_or(DEFAULT_IOR),
            ior: f.ior.unwrap_or(DEFAULT_IOR),
            // Legacy materials carry no roughness of their own.
            roughness: reflectivity,
            reflectivity,
            transparency: f.transparency.unwrap_or(0.0),
            shine: f.shine.unwrap_or(0.0) / self.max_shine * 2.0,
            fresnel_reflections: f.fresnel_reflections.unwrap_or(false),
            shadeless: f.disable_lighting.unwrap_or(false),
            diffuse_texture: texture(
                f.diffuse_texture.as_ref(),
                f.alpha_transparency.unwrap_or(false),
            ),
            bump_texture: texture(f.bump_texture.as_ref(), false),
            transparency_texture: texture(f.transparency_texture.as_ref(), false),
        }
    }
}

fn native_body(native: &NativeMaterial, gamma: f32) -> ShaderBody {
    match native {
        NativeMaterial::Diffuse { color } => ShaderBody::Diffuse {
            color: color.apply_gamma(gamma),
        },
        NativeMaterial::Glass { color, frost, ior } => ShaderBody::Glass {
            color: color.apply_gamma(gamma),
            frost: *frost,
            ior: *ior,
        },
        NativeMaterial::Plastic {
            diffuse,
            frost,
            polish,
            reflectivity,
            transparency,
        } => ShaderBody::Plastic {
            diffuse: diffuse.apply_gamma(gamma),
            frost: *frost,
            polish: *polish,
            reflectivity: *reflectivity,
            transparency: *transparency,
        },
        NativeMaterial::Emissive { color, strength } => ShaderBody::Emissive {
            color: color.apply_gamma(gamma),
            strength: *strength,
        },
    }
}

fn texture(slot: Option<&LegacyTextureSlot>, use_alpha: bool) -> Option<TextureBinding> {
    slot.map(|s| TextureBinding {
        image: s.image.clone(),
        amount: (s.amount_percent / 100.0).min(1.0),
        use_alpha,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lucent_core::scene::{GlassFields, MaterialDescription, PlasterFields, PlasticFields};

    fn compile(legacy: LegacyMaterial, gamma: f32) -> ShaderBody {
        let binding = bind(MaterialDescription::legacy("m", legacy));
        MaterialLane::default().compile(&binding, gamma).body
    }

    #[test]
    fn plaster_becomes_diffuse() {
        let body = compile(
            LegacyMaterial::Plaster(PlasterFields {
                diffuse: Some(LinearRgba::rgb(0.2, 0.4, 0.6)),
            }),
            1.0,
        );
        assert_eq!(
            body,
            ShaderBody::Diffuse {
                color: LinearRgba::rgb(0.2, 0.4, 0.6)
            }
        );
    }

    #[test]
    fn glass_keeps_color_frost_and_ior() {
        let body = compile(
            LegacyMaterial::Glass(GlassFields {
                transparency_color: Some(LinearRgba::WHITE),
                frost_amount: Some(0.25),
                ior: Some(1.52),
            }),
            1.0,
        );
        assert_eq!(
            body,
            ShaderBody::Glass {
                color: LinearRgba::WHITE,
                frost: 0.25,
                ior: 1.52
            }
        );
    }

    #[test]
    fn missing_plastic_fields_fall_back_to_zero() {
        let body = compile(
            LegacyMaterial::Plastic(PlasticFields {
                polish_amount: Some(0.7),
                ..Default::default()
            }),
            1.0,
        );
        assert_eq!(
            body,
            ShaderBody::Plastic {
                diffuse: LinearRgba::BLACK,
                frost: 0.0,
                polish: 0.7,
                reflectivity: 0.0,
                transparency: 0.0
            }
        );
    }

    #[test]
    fn colours_are_gamma_corrected() {
        let body = compile(
            LegacyMaterial::Plaster(PlasterFields {
                diffuse: Some(LinearRgba::rgb(0.5, 0.5, 0.5)),
            }),
            2.2,
        );
        let ShaderBody::Diffuse { color } = body else {
            panic!("expected a diffuse body");
        };
        assert_relative_eq!(color.r, 0.5f32.powf(2.2), epsilon = 1e-6);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn generic_extraction_scales_polish_shine_and_slot_amounts() {
        let fields = GenericFields {
            diffuse: Some(LinearRgba::RED),
            reflection_glossiness: Some(0.5),
            shine: Some(127.5),
            reflectivity: Some(0.3),
            ior: Some(1.33),
            alpha_transparency: Some(true),
            diffuse_texture: Some(LegacyTextureSlot {
                image: "wood.png".into(),
                amount_percent: 150.0,
            }),
            bump_texture: Some(LegacyTextureSlot {
                image: "bump.png".into(),
                amount_percent: 40.0,
            }),
            ..Default::default()
        };
        let ShaderBody::Generic(s) = compile(LegacyMaterial::Generic(fields), 1.0) else {
            panic!("expected a generic body");
        };
        assert_relative_eq!(s.reflection_roughness, 0.05, epsilon = 1e-6);
        assert_relative_eq!(s.shine, 1.0, epsilon = 1e-6);
        assert_eq!(s.roughness, 0.3);
        assert_eq!(s.ior, 1.33);
        assert_eq!(s.fresnel_ior, DEFAULT_IOR);
        assert_eq!(s.diffuse_color, LinearRgba::RED);

        let diffuse = s.diffuse_texture.unwrap();
        assert_eq!(diffuse.amount, 1.0);
        assert!(diffuse.use_alpha);
        let bump = s.bump_texture.unwrap();
        assert_relative_eq!(bump.amount, 0.4, epsilon = 1e-6);
        assert!(!bump.use_alpha);
        assert!(s.transparency_texture.is_none());
    }

    #[test]
    fn compile_carries_hash_and_gamma() {
        let binding = MaterialBinding::with_hash(
            lucent_core::scene::ShaderHash(0xABC),
            MaterialDescription::native(
                "lamp",
                NativeMaterial::Emissive {
                    color: LinearRgba::WHITE,
                    strength: 3.0,
                },
            ),
        );
        let desc = MaterialLane::default().compile(&binding, 2.2);
        assert_eq!(desc.hash.0, 0xABC);
        assert_eq!(desc.gamma, 2.2);
        assert_eq!(desc.name, "lamp");
    }
}
