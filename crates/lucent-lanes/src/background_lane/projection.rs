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

//! Translation of document projection modes to renderer projections.

use lucent_core::scene::{EnvironmentProjection, ProjectionMode};

/// Maps a document projection mode onto the renderer's environment
/// projection. Modes without a renderer counterpart use the wallpaper
/// projection.
pub fn environment_projection(mode: ProjectionMode) -> EnvironmentProjection {
    match mode {
        ProjectionMode::Automatic | ProjectionMode::EnvironmentMap => {
            EnvironmentProjection::EnvironmentMap
        }
        ProjectionMode::Box => EnvironmentProjection::Box,
        ProjectionMode::LightProbe => EnvironmentProjection::LightProbe,
        ProjectionMode::Cube => EnvironmentProjection::CubeMap,
        ProjectionMode::HorizontalCrossCube => EnvironmentProjection::CubeMapHorizontal,
        ProjectionMode::VerticalCrossCube => EnvironmentProjection::CubeMapVertical,
        ProjectionMode::Hemispherical => EnvironmentProjection::Hemispherical,
        ProjectionMode::Spherical => EnvironmentProjection::Spherical,
        ProjectionMode::Planar | ProjectionMode::Cylindrical => EnvironmentProjection::Wallpaper,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_modes_map_one_to_one() {
        let cases = [
            (ProjectionMode::Automatic, EnvironmentProjection::EnvironmentMap),
            (ProjectionMode::EnvironmentMap, EnvironmentProjection::EnvironmentMap),
            (ProjectionMode::Box, EnvironmentProjection::Box),
            (ProjectionMode::LightProbe, EnvironmentProjection::LightProbe),
            (ProjectionMode::Cube, EnvironmentProjection::CubeMap),
            (ProjectionMode::HorizontalCrossCube, EnvironmentProjection::CubeMapHorizontal),
            (ProjectionMode::VerticalCrossCube, EnvironmentProjection::CubeMapVertical),
            (ProjectionMode::Hemispherical, EnvironmentProjection::Hemispherical),
            (ProjectionMode::Spherical, EnvironmentProjection::Spherical),
        ];
        for (mode, expected) in cases {
            assert_eq!(environment_projection(mode), expected, "{mode:?}");
        }
    }

    #[test]
    fn unsupported_modes_fall_back_to_wallpaper() {
        assert_eq!(
            environment_projection(ProjectionMode::Planar),
            EnvironmentProjection::Wallpaper
        );
        assert_eq!(
            environment_projection(ProjectionMode::Cylindrical),
            EnvironmentProjection::Wallpaper
        );
    }
}
