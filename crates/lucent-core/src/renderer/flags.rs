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

//! Ray visibility masks and shadow flags for renderer objects.

use std::ops::BitOr;

/// The ray types an object is visible to.
///
/// Multiple ray types can be combined with `|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathRay {
    bits: u32,
}

impl PathRay {
    /// Visible to nothing.
    pub const HIDDEN: Self = Self { bits: 0 };
    /// Camera rays.
    pub const CAMERA: Self = Self { bits: 1 << 0 };
    /// Diffuse bounces.
    pub const DIFFUSE: Self = Self { bits: 1 << 1 };
    /// Glossy bounces.
    pub const GLOSSY: Self = Self { bits: 1 << 2 };
    /// Transmission bounces.
    pub const TRANSMISSION: Self = Self { bits: 1 << 3 };
    /// Shadow rays.
    pub const SHADOW: Self = Self { bits: 1 << 4 };
    /// Singular bounces.
    pub const SINGULAR: Self = Self { bits: 1 << 5 };
    /// Volume scattering.
    pub const VOLUME_SCATTER: Self = Self { bits: 1 << 6 };
    /// Every ray type.
    pub const ALL_VISIBILITY: Self = Self {
        bits: Self::CAMERA.bits
            | Self::DIFFUSE.bits
            | Self::GLOSSY.bits
            | Self::TRANSMISSION.bits
            | Self::SHADOW.bits
            | Self::SINGULAR.bits
            | Self::VOLUME_SCATTER.bits,
    };

    /// Creates a mask from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Returns the raw bits.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Combines two masks.
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Removes the ray types of `other`.
    pub const fn without(self, other: Self) -> Self {
        Self {
            bits: self.bits & !other.bits,
        }
    }

    /// True when every ray type of `other` is in `self`.
    pub const fn contains(&self, other: Self) -> bool {
        self.bits & other.bits == other.bits
    }

    /// True when visible to nothing.
    pub const fn is_hidden(&self) -> bool {
        self.bits == 0
    }
}

impl BitOr for PathRay {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Shadow behaviour of a renderer object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShadowFlags {
    /// Object only catches shadows.
    pub shadow_catcher: bool,
    /// A mesh light that casts no shadow.
    pub mesh_light_no_cast_shadow: bool,
    /// Object does not shadow itself.
    pub no_self_shadow: bool,
}
