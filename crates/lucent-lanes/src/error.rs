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

//! Errors raised by the lanes.

use lucent_core::shader::GraphError;
use thiserror::Error;

/// A lane could not produce its output.
#[derive(Debug, Error)]
pub enum LaneError {
    /// A generated shading network failed validation.
    #[error("Shader graph '{name}' is invalid: {source}")]
    Graph {
        /// Name of the graph.
        name: String,
        /// The validation failure.
        #[source]
        source: GraphError,
    },
    /// A triangle points past the end of the vertex array.
    #[error("Triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        /// Triangle index.
        triangle: usize,
        /// Offending vertex index.
        index: u32,
        /// Number of vertices.
        vertex_count: usize,
    },
    /// A per-vertex attribute does not have one entry per vertex.
    #[error("Mesh has {vertex_count} vertices but {count} {attribute}")]
    AttributeCountMismatch {
        /// `"uvs"` or `"normals"`.
        attribute: &'static str,
        /// Entries found.
        count: usize,
        /// Vertices in the mesh.
        vertex_count: usize,
    },
}

impl LaneError {
    pub(crate) fn graph(name: &str, source: GraphError) -> Self {
        LaneError::Graph {
            name: name.to_string(),
            source,
        }
    }
}
