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

//! Synchronizer configuration, loadable from JSON.

use crate::scene::settings::IntegratorSettings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Whether the renderer session is interactive (viewport) or modal (final
/// render to a fixed size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionKind {
    /// Viewport rendering; the render size follows the view.
    #[default]
    Interactive,
    /// Final rendering; the render size is fixed by the caller.
    Modal,
}

/// Tunables of the synchronizer.
///
/// Missing JSON fields take their [`Default`] value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Strength multiplier for point lights.
    pub point_light_factor: f32,
    /// Strength multiplier for spot lights.
    pub spot_light_factor: f32,
    /// Strength multiplier for the sun and directional lights.
    pub sun_light_factor: f32,
    /// Strength multiplier for rectangular area lights.
    pub area_light_factor: f32,
    /// Maps legacy reflection glossiness onto reflection roughness.
    pub polish_factor: f32,
    /// Largest legacy shine value.
    pub max_shine: f32,
    /// Grid resolution of the ground plane, per side.
    pub ground_plane_subdivisions: u32,
    /// Segments around a linear light tube.
    pub linear_light_segments: u32,
    /// Build the minimal preview background network instead of the full one.
    pub preview_background: bool,
    /// Interactive or modal session.
    pub session: SessionKind,
    /// Integrator preset applied until the document sends its own.
    pub integrator: IntegratorSettings,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            point_light_factor: 40.0,
            spot_light_factor: 40.0,
            sun_light_factor: 3.2,
            area_light_factor: 17.2,
            polish_factor: 0.1,
            max_shine: 255.0,
            ground_plane_subdivisions: 100,
            linear_light_segments: 16,
            preview_background: false,
            session: SessionKind::Interactive,
            integrator: IntegratorSettings::default(),
        }
    }
}

/// Loading or saving [`SyncSettings`] failed.
#[derive(Debug)]
pub enum ConfigError {
    /// Reading or writing the file failed.
    Io(std::io::Error),
    /// The JSON was malformed.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Settings I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "Settings parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl SyncSettings {
    /// Parses settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the settings to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads settings from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Writes the settings to a JSON file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
