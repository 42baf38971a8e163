//! Change notification to the host.
//!
//! Wraps the optional `onChange` handler so the tool can call it without
//! checking for presence everywhere. [`SnapshotQueue`] defers delivery for
//! hosts that must not be called back while the tool is borrowed.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crate::model::Snapshot;

/// Optional host callback receiving a [`Snapshot`] after every mutation.
///
/// The callback runs synchronously inside the mutating call. Nothing is
/// caught: a panic in the handler unwinds through that call.
pub struct ChangeNotifier {
    f: Option<Box<dyn FnMut(&Snapshot)>>,
}

impl ChangeNotifier {
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut(&Snapshot) + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Notifier without a handler.
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Deliver `snapshot` to the handler, if any.
    pub fn notify(&mut self, snapshot: &Snapshot) {
        if let Some(f) = self.f.as_mut() {
            f(snapshot);
        }
    }

    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("set", &self.is_some())
            .finish()
    }
}

/// Shared FIFO of snapshots awaiting delivery.
///
/// Clones share the same queue, so one clone can sit inside a
/// [`ChangeNotifier`] while another is drained after the mutating call returns.
#[derive(Debug, Clone, Default)]
pub struct SnapshotQueue {
    inner: Rc<RefCell<VecDeque<Snapshot>>>,
}

impl SnapshotQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, snapshot: &Snapshot) {
        self.inner.borrow_mut().push_back(*snapshot);
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    /// Hand queued snapshots to `deliver` in order.
    ///
    /// The queue is not borrowed while `deliver` runs, so snapshots pushed
    /// during delivery go out in the same call. The first error stops
    /// delivery, drops whatever is still queued and is returned as is.
    pub fn drain_with<E, F>(&self, mut deliver: F) -> Result<(), E>
    where
        F: FnMut(Snapshot) -> Result<(), E>,
    {
        loop {
            let next = self.inner.borrow_mut().pop_front();
            let Some(snapshot) = next else {
                return Ok(());
            };
            if let Err(e) = deliver(snapshot) {
                self.clear();
                return Err(e);
            }
        }
    }
}
