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

//! Scene value types exchanged with the document and the renderer.

pub mod background;
pub mod ground;
pub mod ids;
pub mod light;
pub mod material;
pub mod mesh;
pub mod object;
pub mod settings;
pub mod view;

pub use self::background::{
    BackgroundBranch, BackgroundDescription, BackgroundStyle, EnvironmentProjection,
    EnvironmentTexture, EnvironmentTransform, EnvironmentUsage, ProjectionMode, Wallpaper,
};
pub use self::ground::{
    GroundPlane, GROUND_PLANE_EXTENT, GROUND_PLANE_INSTANCE, GROUND_PLANE_MESH,
    GROUND_PLANE_OBJECT,
};
pub use self::ids::{DocumentObjectId, InstanceId, LightId, MeshKey, ShaderHash};
pub use self::light::{
    ChangeKind, LightDescription, LightKind, LightRecord, LightSourceKind, SUN_LIGHT_ID,
};
pub use self::material::{
    GenericFields, GlassFields, LegacyFamily, LegacyMaterial, LegacyTextureSlot,
    MaterialBinding, MaterialDescription, MaterialKind, NativeMaterial, PlasterFields,
    PlasticFields,
};
pub use self::mesh::{MeshBuffers, MeshSource};
pub use self::object::{
    DynamicTransform, InstanceChange, InstanceFlags, MaterialChange, ObjectInstance,
};
pub use self::settings::{IntegratorSettings, LinearWorkflow, RenderSettingsRecord};
pub use self::view::{
    CameraParams, FocalBlur, Frustum, LensAngles, RenderSize, ViewRecord, FAR_CLIP,
};
