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

//! # Lucent Lanes
//!
//! Pure, stateless compilers. Each lane turns a document-side description into
//! something the renderer understands: materials into shader descriptions,
//! backgrounds into shading networks, document lights into renderer light
//! records, and mesh sources into per-corner buffers.
//!
//! Lanes never touch the renderer and never hold staging state; the sync agent
//! calls them during upload.

#![warn(missing_docs)]

pub mod background_lane;
pub mod error;
pub mod light_lane;
pub mod material_lane;
pub mod mesh_lane;

pub use background_lane::{environment_projection, BackgroundLane};
pub use error::LaneError;
pub use light_lane::LightLane;
pub use material_lane::{content_hash, MaterialLane};
pub use mesh_lane::MeshLane;
