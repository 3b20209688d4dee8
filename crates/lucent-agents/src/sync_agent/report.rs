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

//! What a flush hands back to its caller.

use lucent_core::SyncEvent;

/// How far a flush got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Every stage ran and staging was reset.
    Completed,
    /// The cancellation token fired; unfinished work is still staged.
    Cancelled,
}

impl UploadOutcome {
    /// True for [`UploadOutcome::Cancelled`].
    pub fn is_cancelled(&self) -> bool {
        matches!(self, UploadOutcome::Cancelled)
    }
}

/// Result of a flush: the outcome plus the events it raised, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct FlushReport {
    /// Whether the flush ran to completion.
    pub outcome: UploadOutcome,
    /// Events raised by the flush. The same events are published on the
    /// agent's event bus.
    pub events: Vec<SyncEvent>,
}

impl FlushReport {
    /// True when the flush ran to completion.
    pub fn is_completed(&self) -> bool {
        self.outcome == UploadOutcome::Completed
    }
}

/// Lifecycle of the renderer session as seen by the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// Nothing uploaded yet, or the last flush was cancelled.
    #[default]
    Waiting,
    /// A flush is running.
    Uploading,
    /// The renderer holds an up-to-date scene.
    Rendering,
    /// The session is over; flushes are refused.
    Stopped,
}
