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

//! Defines the error types of the renderer boundary and of a sync pass.

use super::handles::{LightHandle, MeshHandle, ObjectHandle, ShaderHandle};
use crate::shader::GraphError;
use std::fmt;

/// An error reported by the renderer scene.
#[derive(Debug)]
pub enum SceneError {
    /// The renderer does not know this mesh.
    UnknownMesh(MeshHandle),
    /// The renderer does not know this shader.
    UnknownShader(ShaderHandle),
    /// The renderer does not know this object.
    UnknownObject(ObjectHandle),
    /// The renderer does not know this light.
    UnknownLight(LightHandle),
    /// The renderer failed to create a resource.
    CreationFailed {
        /// What was being created ("mesh", "shader", ...).
        kind: &'static str,
        /// Backend-specific details.
        details: String,
    },
    /// A shader graph handed to the renderer was rejected.
    InvalidGraph(GraphError),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::UnknownMesh(h) => write!(f, "Renderer has no {h}"),
            SceneError::UnknownShader(h) => write!(f, "Renderer has no {h}"),
            SceneError::UnknownObject(h) => write!(f, "Renderer has no {h}"),
            SceneError::UnknownLight(h) => write!(f, "Renderer has no {h}"),
            SceneError::CreationFailed { kind, details } => {
                write!(f, "Renderer failed to create {kind}: {details}")
            }
            SceneError::InvalidGraph(e) => write!(f, "Renderer rejected shader graph: {e}"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::InvalidGraph(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GraphError> for SceneError {
    fn from(e: GraphError) -> Self {
        SceneError::InvalidGraph(e)
    }
}

/// An error that aborts a sync pass.
///
/// Cancellation and missing relations are not errors; they are reported
/// through the upload outcome and handled by retrying on the next flush.
#[derive(Debug)]
pub enum SyncError {
    /// A renderer call failed.
    Scene(SceneError),
    /// A generated shader graph failed validation.
    Graph(GraphError),
    /// Another flush is already running.
    AlreadyUploading,
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Scene(e) => write!(f, "Scene upload failed: {e}"),
            SyncError::Graph(e) => write!(f, "Shader graph compilation failed: {e}"),
            SyncError::AlreadyUploading => write!(f, "A flush is already in progress"),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::Scene(e) => Some(e),
            SyncError::Graph(e) => Some(e),
            SyncError::AlreadyUploading => None,
        }
    }
}

impl From<SceneError> for SyncError {
    fn from(e: SceneError) -> Self {
        SyncError::Scene(e)
    }
}

impl From<GraphError> for SyncError {
    fn from(e: GraphError) -> Self {
        SyncError::Graph(e)
    }
}
