//! Structural change notifications
//!
//! A [`LayoutTree`](super::LayoutTree) announces every successful mutation
//! once, after its lock has been released. Consumers either register a
//! [`TreeListener`] (any `Fn(&TreeChange) + Send + Sync` closure qualifies)
//! or take a channel with [`subscribe`](super::LayoutTree::subscribe).

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use parking_lot::Mutex;

use super::node::Node;

/// What kind of change happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeChangeAction {
    /// A leaf entered the tree.
    Add,
    /// A leaf left the tree.
    Remove,
    /// A split's ratio changed.
    RatioChanged,
}

/// A change notification.
///
/// `node` is a snapshot taken when the change was made: the added leaf, the
/// removed leaf, or the updated split.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeChange {
    /// Kind of change.
    pub action: TreeChangeAction,
    /// Affected node.
    pub node: Option<Node>,
}

impl TreeChange {
    pub(crate) fn new(action: TreeChangeAction, node: impl Into<Node>) -> Self {
        Self {
            action,
            node: Some(node.into()),
        }
    }
}

/// Receives tree change notifications.
///
/// Listeners run on the mutating thread after the tree's lock is released.
/// They may read the tree; a mutation issued from a listener is a separate
/// operation, not part of the one being announced.
pub trait TreeListener: Send + Sync {
    /// Called once per successful mutation.
    fn on_change(&self, change: &TreeChange);
}

impl<F> TreeListener for F
where
    F: Fn(&TreeChange) + Send + Sync,
{
    fn on_change(&self, change: &TreeChange) {
        self(change);
    }
}

/// Handle returned by [`add_listener`](super::LayoutTree::add_listener).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(ListenerId, Arc<dyn TreeListener>)>,
    senders: Vec<Sender<TreeChange>>,
}

/// Listener and channel registry owned by a tree.
#[derive(Default)]
pub(crate) struct ChangeNotifier {
    registry: Mutex<Registry>,
}

impl ChangeNotifier {
    pub(crate) fn add_listener(&self, listener: Arc<dyn TreeListener>) -> ListenerId {
        let mut registry = self.registry.lock();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.push((id, listener));
        id
    }

    pub(crate) fn remove_listener(&self, id: ListenerId) -> bool {
        let mut registry = self.registry.lock();
        let before = registry.listeners.len();
        registry.listeners.retain(|(listener_id, _)| *listener_id != id);
        registry.listeners.len() != before
    }

    pub(crate) fn subscribe(&self) -> Receiver<TreeChange> {
        let (sender, receiver) = mpsc::channel();
        self.registry.lock().senders.push(sender);
        receiver
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self) -> usize {
        let registry = self.registry.lock();
        registry.listeners.len() + registry.senders.len()
    }

    /// Delivers a change to every listener and channel.
    ///
    /// Listeners are called outside the registry lock, so a listener may
    /// register or remove listeners without deadlocking.
    pub(crate) fn notify(&self, change: &TreeChange) {
        let listeners: Vec<Arc<dyn TreeListener>> = {
            let mut registry = self.registry.lock();
            registry
                .senders
                .retain(|sender| sender.send(change.clone()).is_ok());
            registry
                .listeners
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect()
        };

        for listener in listeners {
            listener.on_change(change);
        }
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.lock();
        f.debug_struct("ChangeNotifier")
            .field("listeners", &registry.listeners.len())
            .field("channels", &registry.senders.len())
            .finish()
    }
}
