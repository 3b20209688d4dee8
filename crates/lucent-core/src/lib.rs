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

//! # Lucent Core
//!
//! Foundational crate containing the value types, renderer contracts and
//! shader-graph primitives shared by every layer of the scene synchronizer.
//!
//! Nothing in this crate talks to a renderer directly. The renderer is an
//! external collaborator reached through the [`renderer::RenderScene`] trait.

#![warn(missing_docs)]

pub mod config;
pub mod event;
pub mod lane;
pub mod math;
pub mod renderer;
pub mod scene;
pub mod shader;

pub use config::SyncSettings;
pub use event::{EventBus, SyncEvent};
