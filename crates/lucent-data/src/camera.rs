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

//! The camera store: latest view and depth-of-field state.

use lucent_core::scene::{FocalBlur, ViewRecord};

/// Staging store for the view and focal blur.
#[derive(Debug, Default)]
pub struct CameraStore {
    view: Option<ViewRecord>,
    view_modified: bool,
    focal_blur: FocalBlur,
    focal_blur_modified: bool,
}

impl CameraStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a new view. An identical view is not a change.
    pub fn set_view(&mut self, view: ViewRecord) {
        if self.view.as_ref() == Some(&view) {
            return;
        }
        self.view = Some(view);
        self.view_modified = true;
    }

    /// The latest view, if any arrived yet.
    pub fn view(&self) -> Option<&ViewRecord> {
        self.view.as_ref()
    }

    /// Stages new focal-blur settings.
    pub fn set_focal_blur(&mut self, blur: FocalBlur) {
        if self.focal_blur == blur {
            return;
        }
        self.focal_blur = blur;
        self.focal_blur_modified = true;
    }

    /// Current focal-blur settings.
    pub fn focal_blur(&self) -> FocalBlur {
        self.focal_blur
    }

    /// True when the view or focal blur changed since the last reset.
    pub fn is_modified(&self) -> bool {
        self.view_modified || self.focal_blur_modified
    }

    /// Clears the modified flags.
    pub fn reset(&mut self) {
        self.view_modified = false;
        self.focal_blur_modified = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lucent_core::scene::RenderSize;

    #[test]
    fn identical_view_is_not_a_change() {
        let mut store = CameraStore::new();
        let view = ViewRecord {
            size: RenderSize::new(640, 480),
            ..Default::default()
        };
        store.set_view(view.clone());
        assert!(store.is_modified());
        store.reset();
        store.set_view(view);
        assert!(!store.is_modified());
    }

    #[test]
    fn focal_blur_marks_modified() {
        let mut store = CameraStore::new();
        store.set_focal_blur(FocalBlur {
            enabled: true,
            distance: 5.0,
            aperture: 0.1,
        });
        assert!(store.is_modified());
        assert!(store.focal_blur().enabled);
    }
}
