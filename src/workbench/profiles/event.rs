//! Publish/subscribe for profile lifecycle events.
//!
//! "Will" events are joinable: a listener may hand back pending work with
//! [`JoinableProfileEvent::join`]. The service waits for every joined future
//! to finish before committing, and the first failure (in join order) vetoes
//! the operation. Joined work runs in no particular order relative to other
//! listeners' work.

use super::Profile;
use crate::error::Result;
use futures::executor::block_on;
use futures::future::{join_all, LocalBoxFuture};
use futures::FutureExt;
use std::cell::RefCell;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_LISTENER: AtomicU64 = AtomicU64::new(1);

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        Self(NEXT_LISTENER.fetch_add(1, Ordering::Relaxed))
    }
}

type Listener<E> = Box<dyn Fn(&E)>;

pub struct Emitter<E> {
    listeners: Vec<(ListenerId, Listener<E>)>,
}

impl<E> Default for Emitter<E> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }
}

impl<E> Emitter<E> {
    pub fn subscribe(&mut self, listener: impl Fn(&E) + 'static) -> ListenerId {
        let id = ListenerId::next();
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when `id` is not subscribed here.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn fire(&self, event: &E) {
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Fired before a profile is created or removed.
pub struct JoinableProfileEvent {
    pub profile: Profile,
    joiners: RefCell<Vec<LocalBoxFuture<'static, Result<()>>>>,
}

impl JoinableProfileEvent {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            joiners: RefCell::new(Vec::new()),
        }
    }

    /// Delay the operation until `work` completes. An error vetoes it.
    pub fn join<F>(&self, work: F)
    where
        F: Future<Output = Result<()>> + 'static,
    {
        self.joiners.borrow_mut().push(work.boxed_local());
    }

    pub fn pending(&self) -> usize {
        self.joiners.borrow().len()
    }

    /// Drive every joined future to completion, then report the first error.
    pub fn settle(self) -> Result<()> {
        let joiners = self.joiners.into_inner();
        if joiners.is_empty() {
            return Ok(());
        }
        block_on(join_all(joiners)).into_iter().collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DidChangeProfilesEvent {
    pub added: Vec<Profile>,
    pub removed: Vec<Profile>,
    pub updated: Vec<Profile>,
    pub all: Vec<Profile>,
}
