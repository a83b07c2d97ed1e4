//! Synchronous in-process event bus.
//!
//! Handlers run on the publishing call stack, in subscription order. A
//! subscription lives exactly as long as its [`Subscription`] guard, so only
//! components that are currently mounted receive events.

use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use super::page::ProfileSubPageId;

/// Events exchanged between sibling pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalEvent {
    /// Some page asked the profile page to show a specific sub-section.
    ProfileSubPageRequested(ProfileSubPageId),
}

type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Registry<E> {
    next_id: u64,
    handlers: Vec<(u64, Handler<E>)>,
}

pub struct EventBus<E> {
    inner: Arc<Mutex<Registry<E>>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registry {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: 'static> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<E: 'static> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Dropping the returned guard unsubscribes it.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = match self.inner.lock() {
            Ok(mut registry) => {
                let id = registry.next_id;
                registry.next_id += 1;
                registry.handlers.push((id, Arc::new(handler)));
                Some(id)
            }
            Err(_) => {
                tracing::warn!("Event bus lock poisoned, subscription dropped");
                None
            }
        };

        let weak: Weak<Mutex<Registry<E>>> = Arc::downgrade(&self.inner);
        let unsubscribe: Box<dyn FnOnce() + Send + Sync> = Box::new(move || {
            let (Some(id), Some(registry)) = (id, weak.upgrade()) else {
                return;
            };
            let guard = registry.lock();
            if let Ok(mut registry) = guard {
                registry.handlers.retain(|(handler_id, _)| *handler_id != id);
            }
        });

        Subscription {
            unsubscribe: Some(unsubscribe),
        }
    }

    /// Deliver `event` to every live subscriber.
    ///
    /// Returns the number of handlers invoked; zero when nobody is listening
    /// or the bus is unusable.
    pub fn publish(&self, event: &E) -> usize {
        let handlers: Vec<Handler<E>> = match self.inner.lock() {
            Ok(registry) => registry
                .handlers
                .iter()
                .map(|(_, handler)| Arc::clone(handler))
                .collect(),
            Err(_) => {
                tracing::warn!("Event bus lock poisoned, event dropped");
                return 0;
            }
        };

        // Lock released: handlers may subscribe or publish themselves.
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .map(|registry| registry.handlers.len())
            .unwrap_or(0)
    }
}

/// Guard tying a handler's lifetime to its owner.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}
