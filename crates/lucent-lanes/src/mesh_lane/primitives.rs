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

//! Procedural meshes: linear-light tubes and the ground plane.

use lucent_core::math::{Transform, Vec2, Vec3};
use lucent_core::scene::{GroundPlane, MeshSource, GROUND_PLANE_EXTENT};
use std::f32::consts::TAU;

/// A closed cylinder from `start` to `start + axis`.
///
/// `segments` is clamped to at least three. Vertices are two rings followed by
/// the two cap centres.
pub fn cylinder(start: Vec3, axis: Vec3, radius: f32, segments: u32) -> MeshSource {
    let n = segments.max(3);
    let u = axis.any_orthonormal();
    let v = axis.normalize().cross(u);
    let end = start + axis;

    let mut vertices = Vec::with_capacity(2 * n as usize + 2);
    let mut normals = Vec::with_capacity(vertices.capacity());
    for ring in [start, end] {
        for i in 0..n {
            let angle = TAU * i as f32 / n as f32;
            let (s, c) = angle.sin_cos();
            let radial = u * c + v * s;
            vertices.push(ring + radial * radius);
            normals.push(radial);
        }
    }
    let bottom_centre = 2 * n;
    let top_centre = 2 * n + 1;
    vertices.push(start);
    normals.push(-axis.normalize());
    vertices.push(end);
    normals.push(axis.normalize());

    let mut triangles = Vec::with_capacity(4 * n as usize);
    for i in 0..n {
        let j = (i + 1) % n;
        let (b0, b1, t0, t1) = (i, j, n + i, n + j);
        triangles.push([b0, b1, t1]);
        triangles.push([b0, t1, t0]);
        triangles.push([bottom_centre, b1, b0]);
        triangles.push([top_centre, t0, t1]);
    }

    MeshSource {
        vertices,
        triangles,
        uvs: None,
        normals: Some(normals),
    }
}

/// A flat square of half-extent [`GROUND_PLANE_EXTENT`] at `z = 0`, split into
/// a `subdivisions` by `subdivisions` grid, with planar UVs in world units
/// rotated, scaled and offset by the plane's texture mapping.
pub fn ground_plane(plane: &GroundPlane, subdivisions: u32) -> MeshSource {
    let n = subdivisions.max(1);
    let row = n + 1;
    let step = 2.0 * GROUND_PLANE_EXTENT / n as f32;
    let (s, c) = plane.texture_rotation.sin_cos();

    let count = (row * row) as usize;
    let mut vertices = Vec::with_capacity(count);
    let mut uvs = Vec::with_capacity(count);
    for iy in 0..row {
        for ix in 0..row {
            let x = -GROUND_PLANE_EXTENT + ix as f32 * step;
            let y = -GROUND_PLANE_EXTENT + iy as f32 * step;
            vertices.push(Vec3::new(x, y, 0.0));
            let (ru, rv) = (x * c - y * s, x * s + y * c);
            uvs.push(Vec2::new(
                ru * plane.texture_scale.x + plane.texture_offset.x,
                rv * plane.texture_scale.y + plane.texture_offset.y,
            ));
        }
    }

    let mut triangles = Vec::with_capacity(2 * (n * n) as usize);
    for iy in 0..n {
        for ix in 0..n {
            let a = iy * row + ix;
            let b = a + 1;
            let d = a + row;
            let e = d + 1;
            triangles.push([a, b, e]);
            triangles.push([a, e, d]);
        }
    }

    MeshSource {
        normals: Some(vec![Vec3::Z; vertices.len()]),
        vertices,
        triangles,
        uvs: Some(uvs),
    }
}

/// World transform of the ground plane.
pub fn ground_plane_transform(plane: &GroundPlane) -> Transform {
    Transform::from_translation(Vec3::new(0.0, 0.0, plane.altitude))
}
