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

//! The renderer boundary: handles, the scene trait, flags and errors.

pub mod cancel;
pub mod error;
pub mod flags;
pub mod handles;
pub mod scene;

pub use self::cancel::{CancelToken, FlushFlag};
pub use self::error::{SceneError, SyncError};
pub use self::flags::{PathRay, ShadowFlags};
pub use self::handles::{LightHandle, MeshHandle, ObjectHandle, SceneShaderId, ShaderHandle};
pub use self::scene::RenderScene;
