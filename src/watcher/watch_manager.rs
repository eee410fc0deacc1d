use crate::watcher::{EventType, KeeperState, WatchedEvent, Watcher};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// WatchManager tracks one-shot watch registrations by node path.
///
/// Callbacks run after the registry lock is released, so a watcher may re-register from inside
/// `process()`.
pub struct WatchManager {
    logger: slog::Logger,
    watches: Mutex<HashMap<String, Vec<Arc<dyn Watcher>>>>,
}

impl WatchManager {
    pub fn new(logger: slog::Logger) -> Self {
        WatchManager {
            logger,
            watches: Mutex::new(HashMap::new()),
        }
    }

    /// `add_watch()` registers interest in the next change to `path`. Registering the same watcher
    /// on the same path twice still fires once. Returns false if it was already registered.
    pub fn add_watch(&self, path: &str, watcher: Arc<dyn Watcher>) -> bool {
        let mut watches = self.lock();
        let watchers = watches.entry(path.to_string()).or_insert_with(Vec::new);
        if watchers.iter().any(|w| same_watcher(w, &watcher)) {
            return false;
        }
        watchers.push(watcher);
        true
    }

    /// `trigger_watch()` consumes every registration on `path` and notifies each watcher exactly
    /// once. Returns how many watchers were notified.
    pub fn trigger_watch(&self, path: &str, event_type: EventType) -> usize {
        let watchers = match self.lock().remove(path) {
            Some(watchers) => watchers,
            None => {
                slog::trace!(self.logger, "No watches on {} for {:?}", path, event_type);
                return 0;
            }
        };

        let event = WatchedEvent::new(event_type, KeeperState::SyncConnected, Some(path.to_string()));
        slog::debug!(
            self.logger,
            "Triggering {} watch(es) on {} for {:?}",
            watchers.len(),
            path,
            event_type
        );
        for watcher in watchers.iter() {
            watcher.process(event.clone());
        }

        watchers.len()
    }

    /// `process_state_change()` tells every registered watcher about a connection state change.
    /// Registrations are not consumed; they are about nodes, not the connection.
    pub fn process_state_change(&self, state: KeeperState) -> usize {
        let mut distinct: Vec<Arc<dyn Watcher>> = vec![];
        for watcher in self.lock().values().flatten() {
            if !distinct.iter().any(|w| same_watcher(w, watcher)) {
                distinct.push(watcher.clone());
            }
        }

        let event = WatchedEvent::state_change(state);
        for watcher in distinct.iter() {
            watcher.process(event.clone());
        }

        distinct.len()
    }

    /// `remove_watcher()` drops every registration held by `watcher`, e.g. when its session closes.
    pub fn remove_watcher(&self, watcher: &Arc<dyn Watcher>) -> usize {
        let mut removed = 0;
        let mut watches = self.lock();
        watches.retain(|_, watchers| {
            let before = watchers.len();
            watchers.retain(|w| !same_watcher(w, watcher));
            removed += before - watchers.len();
            !watchers.is_empty()
        });

        removed
    }

    pub fn watch_count(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<Arc<dyn Watcher>>>> {
        self.watches.lock().expect("WatchManager mutex guard poison")
    }
}

// Compare data pointers only; vtable pointers for the same type can differ between codegen units.
fn same_watcher(a: &Arc<dyn Watcher>, b: &Arc<dyn Watcher>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}
