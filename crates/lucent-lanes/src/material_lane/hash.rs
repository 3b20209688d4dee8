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

//! Content hashing of materials.
//!
//! The hash is computed over the canonical `bincode` encoding of the material
//! parameters, so it is stable across runs and platforms. The display name is
//! not part of it: two identically configured materials with different names
//! share one compiled shader.

use lucent_core::scene::{MaterialBinding, MaterialDescription, MaterialKind, ShaderHash};

/// Folds a blake3 digest down to a 32-bit shader hash, steering clear of the
/// [`ShaderHash::NONE`] sentinel.
pub(crate) fn truncate(digest: blake3::Hash) -> ShaderHash {
    let b = digest.as_bytes();
    let v = u32::from_le_bytes([b[0], b[1], b[2], b[3]]);
    if v == ShaderHash::NONE.0 {
        ShaderHash(v - 1)
    } else {
        ShaderHash(v)
    }
}

/// Computes the content hash of a material's parameters.
pub fn content_hash(kind: &MaterialKind) -> ShaderHash {
    let bytes = match bincode::serde::encode_to_vec(kind, bincode::config::standard()) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("Falling back to debug encoding for material hash: {e}");
            format!("{kind:?}").into_bytes()
        }
    };
    truncate(blake3::hash(&bytes))
}

/// Pairs a material with its content hash.
pub fn bind(material: MaterialDescription) -> MaterialBinding {
    let hash = content_hash(&material.kind);
    MaterialBinding { hash, material }
}
