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

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Identifies a listener registered on an [`Event`], used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<A> = Rc<dyn Fn(&A)>;

/// An ordered list of listeners invoked synchronously when the event is raised.
///
/// The event is generic over the argument type `A` it hands to each listener.
/// Listeners run on the raising thread, in registration order, before
/// [`Event::raise`] returns.
pub struct Event<A: 'static> {
    listeners: RefCell<Vec<(ListenerId, Listener<A>)>>,
    next_id: Cell<u64>,
}

impl<A: 'static> Event<A> {
    /// Creates an event with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Registers a listener and returns the id needed to remove it.
    pub fn add_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&A) + 'static,
    {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    /// The number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Invokes every listener with `args`.
    ///
    /// The listener list is snapshotted first, so listeners may register or remove
    /// listeners while the event is being raised. A listener removed by an earlier
    /// listener in the same raise is skipped.
    pub fn raise(&self, args: &A) {
        let snapshot: Vec<(ListenerId, Listener<A>)> = self.listeners.borrow().clone();
        log::trace!("Raising event to {} listener(s).", snapshot.len());
        for (id, listener) in snapshot {
            if self.is_registered(id) {
                listener(args);
            }
        }
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners
            .borrow()
            .iter()
            .any(|(listener_id, _)| *listener_id == id)
    }
}

impl<A: Clone + Send + 'static> Event<A> {
    /// Bridges the event into a channel.
    ///
    /// Every raise sends a clone of the argument to the returned receiver. The
    /// listener stays registered until removed with the returned id; sends to a
    /// dropped receiver are logged and discarded.
    pub fn subscribe_channel(&self) -> (ListenerId, flume::Receiver<A>) {
        let (sender, receiver) = flume::unbounded();
        let id = self.add_listener(move |args: &A| {
            if let Err(e) = sender.send(args.clone()) {
                log::trace!("Dropping event for a disconnected channel: {e}.");
            }
        });
        (id, receiver)
    }
}

impl<A: 'static> Default for Event<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: 'static> fmt::Debug for Event<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
