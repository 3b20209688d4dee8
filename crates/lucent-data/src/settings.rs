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

//! The render-settings store: the last settings snapshot and which parts of
//! it changed.

use lucent_core::scene::{IntegratorSettings, LinearWorkflow, RenderSettingsRecord};

/// Which parts of a snapshot differ from the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettingsDelta {
    /// Style, gradient colours or wallpaper changed.
    pub background: bool,
    /// Gamma or the linear workflow switch changed.
    pub linear_workflow: bool,
    /// Depth of field changed.
    pub focal_blur: bool,
    /// Integrator preset changed.
    pub integrator: bool,
}

impl SettingsDelta {
    /// True when anything changed.
    pub fn any(&self) -> bool {
        self.background || self.linear_workflow || self.focal_blur || self.integrator
    }

    fn merge(&mut self, other: SettingsDelta) {
        self.background |= other.background;
        self.linear_workflow |= other.linear_workflow;
        self.focal_blur |= other.focal_blur;
        self.integrator |= other.integrator;
    }
}

/// Staging store for render settings.
#[derive(Debug, Default)]
pub struct RenderSettingsStore {
    current: Option<RenderSettingsRecord>,
    delta: SettingsDelta,
}

impl RenderSettingsStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a snapshot and returns what it changed. The first snapshot
    /// changes everything; an identical one changes nothing.
    pub fn apply(&mut self, snapshot: RenderSettingsRecord) -> SettingsDelta {
        let delta = match &self.current {
            None => SettingsDelta {
                background: true,
                linear_workflow: true,
                focal_blur: true,
                integrator: true,
            },
            Some(prev) if *prev == snapshot => return SettingsDelta::default(),
            Some(prev) => SettingsDelta {
                background: prev.background_style != snapshot.background_style
                    || prev.gradient_top != snapshot.gradient_top
                    || prev.gradient_bottom != snapshot.gradient_bottom
                    || prev.wallpaper != snapshot.wallpaper
                    || prev.scale_to_fit != snapshot.scale_to_fit,
                linear_workflow: prev.linear_workflow != snapshot.linear_workflow,
                focal_blur: prev.focal_blur != snapshot.focal_blur,
                integrator: prev.integrator != snapshot.integrator,
            },
        };
        self.current = Some(snapshot);
        self.delta.merge(delta);
        delta
    }

    /// The last applied snapshot.
    pub fn current(&self) -> Option<&RenderSettingsRecord> {
        self.current.as_ref()
    }

    /// Current linear workflow, the default when no snapshot arrived yet.
    pub fn linear_workflow(&self) -> LinearWorkflow {
        self.current
            .as_ref()
            .map(|s| s.linear_workflow)
            .unwrap_or_default()
    }

    /// Current integrator preset.
    pub fn integrator(&self) -> IntegratorSettings {
        self.current
            .as_ref()
            .map(|s| s.integrator.clone())
            .unwrap_or_default()
    }

    /// Changes accumulated since the last reset.
    pub fn pending(&self) -> SettingsDelta {
        self.delta
    }

    /// Marks the gamma stage as done.
    pub fn complete_linear_workflow(&mut self) {
        self.delta.linear_workflow = false;
    }

    /// True when changes are pending.
    pub fn is_modified(&self) -> bool {
        self.delta.any()
    }

    /// Clears pending changes.
    pub fn reset(&mut self) {
        self.delta = SettingsDelta::default();
    }
}
