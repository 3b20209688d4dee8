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

//! The light store: staged light changes and what each light currently is on
//! the renderer side.

use lucent_core::renderer::{LightHandle, ShaderHandle};
use lucent_core::scene::{ChangeKind, LightDescription, LightId, LightRecord, ShaderHash};
use std::collections::{BTreeMap, HashMap};

/// A staged light change.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedLight {
    /// Full new state of the light.
    pub light: LightDescription,
    /// What happened to it.
    pub change: ChangeKind,
}

/// A light that lives in the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedLight {
    /// Renderer light.
    pub light: LightHandle,
    /// Its emission shader.
    pub shader: ShaderHandle,
    /// Last record sent.
    pub record: LightRecord,
}

/// Staging and relation store for lights.
#[derive(Debug, Default)]
pub struct LightStore {
    staged: BTreeMap<LightId, StagedLight>,
    uploaded: HashMap<LightId, UploadedLight>,
    linear: HashMap<LightId, ShaderHash>,
}

impl LightStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a light change. Several changes to one light in a cycle fold
    /// into one: an add followed by a modification stays an add, and an add
    /// followed by a deletion of a light the renderer never saw cancels out.
    pub fn stage(&mut self, light: LightDescription, change: ChangeKind) {
        let id = light.id;
        let folded = match (self.staged.get(&id).map(|s| s.change), change) {
            (Some(ChangeKind::Added), ChangeKind::Modified) => ChangeKind::Added,
            (Some(ChangeKind::Added), ChangeKind::Deleted) if !self.is_known(id) => {
                self.staged.remove(&id);
                log::debug!("Light {id} added and deleted in one cycle; dropping it");
                return;
            }
            (_, c) => c,
        };
        self.staged.insert(
            id,
            StagedLight {
                light,
                change: folded,
            },
        );
    }

    /// Ids of staged lights, in id order.
    pub fn staged_ids(&self) -> Vec<LightId> {
        self.staged.keys().copied().collect()
    }

    /// The staged change for `id`.
    pub fn staged(&self, id: LightId) -> Option<&StagedLight> {
        self.staged.get(&id)
    }

    /// Removes a staged change once it has been dealt with.
    pub fn take_staged(&mut self, id: LightId) -> Option<StagedLight> {
        self.staged.remove(&id)
    }

    /// The renderer side of `id`.
    pub fn uploaded(&self, id: LightId) -> Option<&UploadedLight> {
        self.uploaded.get(&id)
    }

    /// Records a light the renderer now holds.
    pub fn record_uploaded(&mut self, id: LightId, uploaded: UploadedLight) {
        self.uploaded.insert(id, uploaded);
    }

    /// Every uploaded light with its emission shader, in id order.
    pub fn uploaded_lights(&self) -> Vec<(LightId, UploadedLight)> {
        let mut out: Vec<(LightId, UploadedLight)> = self
            .uploaded
            .iter()
            .map(|(id, u)| (*id, u.clone()))
            .collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }

    /// The material hash of the emissive tube of linear light `id`.
    pub fn linear_hash(&self, id: LightId) -> Option<ShaderHash> {
        self.linear.get(&id).copied()
    }

    /// Remembers the tube material of a linear light.
    pub fn record_linear(&mut self, id: LightId, hash: ShaderHash) {
        self.linear.insert(id, hash);
    }

    /// Forgets a deleted linear light.
    pub fn forget_linear(&mut self, id: LightId) -> Option<ShaderHash> {
        self.linear.remove(&id)
    }

    fn is_known(&self, id: LightId) -> bool {
        self.uploaded.contains_key(&id) || self.linear.contains_key(&id)
    }

    /// True when light changes are staged.
    pub fn has_changes(&self) -> bool {
        !self.staged.is_empty()
    }

    /// Clears the staging queue.
    pub fn reset(&mut self) {
        self.staged.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light(id: u128) -> LightDescription {
        LightDescription {
            id: LightId::from_u128(id),
            ..Default::default()
        }
    }

    #[test]
    fn add_then_modify_stays_an_add() {
        let mut store = LightStore::new();
        store.stage(light(1), ChangeKind::Added);
        let mut brighter = light(1);
        brighter.intensity = 4.0;
        store.stage(brighter, ChangeKind::Modified);
        let staged = store.staged(LightId::from_u128(1)).unwrap();
        assert_eq!(staged.change, ChangeKind::Added);
        assert_eq!(staged.light.intensity, 4.0);
    }

    #[test]
    fn add_then_delete_of_unknown_light_cancels_out() {
        let mut store = LightStore::new();
        store.stage(light(1), ChangeKind::Added);
        store.stage(light(1), ChangeKind::Deleted);
        assert!(!store.has_changes());
    }

    #[test]
    fn delete_of_uploaded_light_is_kept() {
        let mut store = LightStore::new();
        store.record_uploaded(
            LightId::from_u128(1),
            UploadedLight {
                light: LightHandle(0),
                shader: ShaderHandle(0),
                record: LightRecord::default(),
            },
        );
        store.stage(light(1), ChangeKind::Added);
        store.stage(light(1), ChangeKind::Deleted);
        assert_eq!(
            store.staged(LightId::from_u128(1)).map(|s| s.change),
            Some(ChangeKind::Deleted)
        );
    }

    #[test]
    fn reset_clears_staging_only() {
        let mut store = LightStore::new();
        store.stage(light(1), ChangeKind::Modified);
        store.record_linear(LightId::from_u128(2), ShaderHash(7));
        store.reset();
        assert!(!store.has_changes());
        assert_eq!(store.linear_hash(LightId::from_u128(2)), Some(ShaderHash(7)));
    }
}
