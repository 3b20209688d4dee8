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

//! Events raised by a flush.

use crate::renderer::ShaderHandle;
use crate::scene::settings::LinearWorkflow;
use crate::scene::view::{RenderSize, ViewRecord};
use crate::scene::{InstanceId, LightId, ShaderHash};

/// Something observers of the renderer session may need to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// A material shader was recompiled in place.
    MaterialShaderChanged {
        /// Content hash of the material.
        hash: ShaderHash,
        /// The renderer shader that changed.
        shader: ShaderHandle,
    },
    /// A light's emission shader was rebuilt.
    LightShaderChanged {
        /// The light.
        light: LightId,
        /// Its emission shader.
        shader: ShaderHandle,
    },
    /// The gamma / linear workflow changed.
    LinearWorkflowChanged(LinearWorkflow),
    /// The view changed.
    ViewChanged {
        /// The new view.
        view: ViewRecord,
        /// Whether the render size changed.
        size_changed: bool,
        /// The render size now in effect.
        size: RenderSize,
    },
    /// The film needs to be recomputed.
    FilmNeedsRecompute,
    /// An instance now wears a different shader.
    ObjectShaderReassigned {
        /// The instance.
        instance: InstanceId,
        /// Previously bound hash, [`ShaderHash::NONE`] for a new instance.
        old: ShaderHash,
        /// Newly bound hash.
        new: ShaderHash,
        /// Renderer shader of `old`, if it was ever compiled.
        old_shader: Option<ShaderHandle>,
        /// Renderer shader of `new`.
        shader: ShaderHandle,
    },
}
