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

//! Geometry as it arrives from the document and as the renderer wants it.

use crate::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Triangulated geometry as produced by the document's meshing kernel.
///
/// UVs and normals are indexed per vertex, like the positions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshSource {
    /// Vertex positions.
    pub vertices: Vec<Vec3>,
    /// Triangle corner indices into `vertices`.
    pub triangles: Vec<[u32; 3]>,
    /// Per-vertex texture coordinates, `None` when the source has no UV channel.
    pub uvs: Option<Vec<Vec2>>,
    /// Per-vertex normals.
    pub normals: Option<Vec<Vec3>>,
}

/// Renderer-ready mesh buffers.
///
/// Positions and normals are flat `xyz` triples, triangles are flat index
/// triples, and UVs are stored **per triangle corner** (`uv` pair for every
/// entry of `triangles`), because the renderer's mesh type has no per-vertex
/// texture coordinates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshBuffers {
    /// Flat vertex positions.
    pub vertices: Vec<f32>,
    /// Flat triangle indices.
    pub triangles: Vec<u32>,
    /// Per-corner UV pairs, omitted when the source has no UVs.
    pub uvs: Option<Vec<f32>>,
    /// Flat per-vertex normals.
    pub normals: Option<Vec<f32>>,
}

impl MeshBuffers {
    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// True when there is nothing to draw.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// A 64-bit fingerprint of the buffer contents.
    ///
    /// Two buffers with the same fingerprint are treated as the same upload.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"vertices");
        hasher.update(bytemuck::cast_slice(&self.vertices));
        hasher.update(b"triangles");
        hasher.update(bytemuck::cast_slice(&self.triangles));
        match &self.uvs {
            Some(uvs) => {
                hasher.update(b"uvs");
                hasher.update(bytemuck::cast_slice(uvs));
            }
            None => {
                hasher.update(b"no-uvs");
            }
        }
        match &self.normals {
            Some(normals) => {
                hasher.update(b"normals");
                hasher.update(bytemuck::cast_slice(normals));
            }
            None => {
                hasher.update(b"no-normals");
            }
        }
        let digest = hasher.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }
}
