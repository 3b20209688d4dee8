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

//! The mesh lane: turns indexed mesh sources into renderer buffers.
//!
//! The renderer wants texture coordinates per triangle corner, so per-vertex
//! UVs are expanded through the index buffer. A source without a UV channel
//! yields no UV buffer at all.

mod primitives;

pub use self::primitives::{cylinder, ground_plane, ground_plane_transform};

use crate::error::LaneError;
use lucent_core::lane::{Lane, LaneKind};
use lucent_core::math::{Vec2, Vec3};
use lucent_core::scene::{MeshBuffers, MeshSource};

/// Prepares mesh buffers for upload.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshLane;

impl Lane for MeshLane {
    fn strategy_name(&self) -> &'static str {
        "PerCornerExpansion"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Geometry
    }
}

impl MeshLane {
    /// Validates `source` and flattens it into renderer buffers.
    ///
    /// # Errors
    ///
    /// Fails when a triangle points past the vertex array or a per-vertex
    /// attribute has the wrong length.
    pub fn prepare(&self, source: &MeshSource) -> Result<MeshBuffers, LaneError> {
        let vertex_count = source.vertices.len();
        for (triangle, corners) in source.triangles.iter().enumerate() {
            if let Some(&index) = corners.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(LaneError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }
        check_count("normals", source.normals.as_ref().map(Vec::len), vertex_count)?;
        check_count("uvs", source.uvs.as_ref().map(Vec::len), vertex_count)?;

        let uvs = source
            .uvs
            .as_ref()
            .map(|uvs| expand_per_corner(uvs, &source.triangles));

        Ok(MeshBuffers {
            vertices: flatten(&source.vertices),
            triangles: source.triangles.iter().flatten().copied().collect(),
            uvs,
            normals: source.normals.as_deref().map(flatten),
        })
    }
}

fn check_count(
    attribute: &'static str,
    count: Option<usize>,
    vertex_count: usize,
) -> Result<(), LaneError> {
    match count {
        Some(count) if count != vertex_count => Err(LaneError::AttributeCountMismatch {
            attribute,
            count,
            vertex_count,
        }),
        _ => Ok(()),
    }
}

fn flatten(v: &[Vec3]) -> Vec<f32> {
    bytemuck::cast_slice::<Vec3, f32>(v).to_vec()
}

/// One UV pair per triangle corner, in index-buffer order.
fn expand_per_corner(uvs: &[Vec2], triangles: &[[u32; 3]]) -> Vec<f32> {
    let mut out = Vec::with_capacity(triangles.len() * 6);
    for &index in triangles.iter().flatten() {
        let uv = uvs[index as usize];
        out.push(uv.x);
        out.push(uv.y);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(uvs: bool) -> MeshSource {
        MeshSource {
            vertices: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            triangles: vec![[0, 1, 2], [0, 2, 3]],
            uvs: uvs.then(|| {
                vec![
                    Vec2::new(0.0, 0.0),
                    Vec2::new(1.0, 0.0),
                    Vec2::new(1.0, 1.0),
                    Vec2::new(0.0, 1.0),
                ]
            }),
            normals: None,
        }
    }

    #[test]
    fn uvs_are_expanded_per_corner() {
        let buffers = MeshLane.prepare(&quad(true)).unwrap();
        assert_eq!(
            buffers.uvs.unwrap(),
            vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0]
        );
        assert_eq!(buffers.triangles, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(buffers.vertices.len(), 12);
    }

    #[test]
    fn missing_uv_channel_is_omitted_not_zero_filled() {
        let buffers = MeshLane.prepare(&quad(false)).unwrap();
        assert!(buffers.uvs.is_none());
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut source = quad(false);
        source.triangles.push([0, 3, 9]);
        let err = MeshLane.prepare(&source).unwrap_err();
        assert!(matches!(
            err,
            LaneError::IndexOutOfRange {
                triangle: 2,
                index: 9,
                vertex_count: 4
            }
        ));
    }

    #[test]
    fn normal_count_must_match_vertices() {
        let mut source = quad(false);
        source.normals = Some(vec![Vec3::Z; 3]);
        assert!(matches!(
            MeshLane.prepare(&source),
            Err(LaneError::AttributeCountMismatch {
                attribute: "normals",
                ..
            })
        ));
    }

    #[test]
    fn generated_meshes_prepare_cleanly() {
        let tube = cylinder(Vec3::ZERO, Vec3::Z, 0.1, 12);
        let buffers = MeshLane.prepare(&tube).unwrap();
        assert_eq!(buffers.triangle_count(), 48);
        assert!(buffers.normals.is_some());
    }
}
