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

//! Acts as the **[A]gent** reconciling a scene document with a renderer.
//!
//! The agent receives change notifications through its `apply_*` methods,
//! which only stage data, and pushes the staged state into a
//! [`RenderScene`](lucent_core::renderer::RenderScene) when flushed. A flush
//! runs the upload stages in a fixed order, each stage reading what the
//! earlier ones produced:
//!
//! 1. materials (compile newly registered shaders)
//! 2. meshes (deletions first, then uploads)
//! 3. lights
//! 4. environment (background shader)
//! 5. camera
//! 6. objects (mesh, shader, transform, visibility)
//! 7. gamma / linear workflow
//! 8. render settings
//!
//! Cancellation is polled between meshes, shaders and lights. A cancelled
//! flush leaves the unfinished work staged so the next flush resumes it.

mod agent;
mod ground;
mod report;
mod shading;
mod stages;
mod view;

pub use self::agent::SyncAgent;
pub use self::report::{FlushReport, State, UploadOutcome};
