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

//! # Lucent Data
//!
//! Per-domain staging stores and the relation tables that tie document
//! identities to renderer handles.
//!
//! Every store follows the same shape: `apply`-side methods record the latest
//! state and raise a modified flag without touching the renderer; the sync
//! agent drains them during upload and calls `reset` once a flush completes.

#![warn(missing_docs)]

pub mod camera;
pub mod environment;
pub mod geometry;
pub mod lights;
pub mod object_shader;
pub mod objects;
pub mod settings;
pub mod shaders;

pub use camera::CameraStore;
pub use environment::EnvironmentStore;
pub use geometry::{GeometryStore, MeshRecord, UploadedMesh};
pub use lights::{LightStore, StagedLight, UploadedLight};
pub use object_shader::ObjectShaderStore;
pub use objects::{ObjectStore, UploadedObject};
pub use settings::{RenderSettingsStore, SettingsDelta};
pub use shaders::{RelationEdge, ShaderRecord, ShaderRegistry};
