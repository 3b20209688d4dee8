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

//! A generic, thread-safe event channel for observers of the synchronizer.

/// Manages an unbounded flume channel carrying events of type `T`.
///
/// The synchronizer publishes the events of every flush here, in the same
/// order it returns them. Observers either hold a cloned [`flume::Receiver`]
/// or drain the bus from the owning thread.
#[derive(Debug)]
pub struct EventBus<T: Clone + Send + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Clone + Send + 'static> EventBus<T> {
    /// Creates a bus with an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        log::debug!("Event bus initialized.");
        Self { sender, receiver }
    }

    /// Sends one event, logging if every receiver is gone.
    ///
    /// ## Arguments
    /// * `event` - The event to be sent over the channel.
    pub fn publish(&self, event: T) {
        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to publish event: {e}. Receiver likely disconnected.");
        }
    }

    /// Sends a batch of events, preserving their order.
    pub fn publish_all(&self, events: impl IntoIterator<Item = T>) {
        for event in events {
            self.publish(event);
        }
    }

    /// Returns a clone of the sender end of the channel.
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// Returns a clone of the receiver end, for an observer on another thread.
    pub fn subscribe(&self) -> flume::Receiver<T> {
        self.receiver.clone()
    }

    /// Takes every event currently queued, without blocking.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }
}

impl<T: Clone + Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{thread, time::Duration};

    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        Resized { width: u32, height: u32 },
        Recompute,
    }

    #[test]
    fn drain_returns_events_in_publish_order() {
        let bus = EventBus::<TestEvent>::new();
        bus.publish_all([
            TestEvent::Resized {
                width: 4,
                height: 3,
            },
            TestEvent::Recompute,
        ]);
        assert_eq!(
            bus.drain(),
            vec![
                TestEvent::Resized {
                    width: 4,
                    height: 3
                },
                TestEvent::Recompute
            ]
        );
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn subscriber_on_another_thread_receives_events() {
        let bus = EventBus::<TestEvent>::new();
        let rx = bus.subscribe();
        let handle = thread::spawn(move || rx.recv_timeout(Duration::from_millis(500)));
        bus.publish(TestEvent::Recompute);
        assert_eq!(handle.join().unwrap(), Ok(TestEvent::Recompute));
    }

    #[test]
    fn external_senders_share_the_channel() {
        let bus = EventBus::<TestEvent>::new();
        let tx = bus.sender();
        tx.send(TestEvent::Recompute).unwrap();
        assert_eq!(bus.drain(), vec![TestEvent::Recompute]);
    }
}
