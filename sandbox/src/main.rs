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

// Lucent Sandbox
// Replays a small scripted document through the synchronizer and logs every
// renderer call it produces.

mod renderer;
mod script;

use anyhow::{Context, Result};
use lucent_agents::SyncAgent;
use lucent_core::renderer::CancelToken;
use lucent_core::SyncSettings;
use renderer::LoggingScene;

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => SyncSettings::from_file(&path)
            .with_context(|| format!("loading settings from {path}"))?,
        None => SyncSettings::default(),
    };

    let mut agent = SyncAgent::new(settings);
    let events = agent.event_bus().subscribe();
    let mut scene = LoggingScene::default();
    let cancel = CancelToken::new();

    log::info!("Sandbox: staging the opening document...");
    script::populate(&mut agent)?;
    let report = agent.flush(&mut scene, &cancel)?;
    log::info!(
        " -> First flush {:?}: {} renderer calls, {} event(s)",
        report.outcome,
        scene.take_call_count(),
        report.events.len()
    );
    agent.start_rendering();

    log::info!("Sandbox: dragging an object...");
    script::drag(&mut agent);
    agent.flush_dynamic(&mut scene, &cancel)?;
    log::info!(" -> Dynamic flush: {} renderer calls", scene.take_call_count());

    log::info!("Sandbox: editing materials and gamma...");
    script::edit(&mut agent)?;
    let report = agent.flush(&mut scene, &cancel)?;
    log::info!(
        " -> Edit flush {:?}: {} renderer calls",
        report.outcome,
        scene.take_call_count()
    );

    log::info!("Sandbox: cancelling a flush mid-way...");
    script::retessellate(&mut agent)?;
    cancel.cancel();
    let report = agent.flush(&mut scene, &cancel)?;
    log::info!(
        " -> Cancelled flush {:?}, work left: {}",
        report.outcome,
        agent.has_changes()
    );
    cancel.reset();
    let report = agent.flush(&mut scene, &cancel)?;
    log::info!(
        " -> Resumed flush {:?}: {} renderer calls",
        report.outcome,
        scene.take_call_count()
    );

    for event in events.try_iter() {
        log::info!("Event: {event:?}");
    }

    agent.stop();
    log::info!("{}", scene.summary());
    Ok(())
}
