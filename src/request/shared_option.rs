use std::sync::{Arc, Mutex};

/// A slot that can be filled in after the owning value has been shared.
#[derive(Clone)]
pub(crate) struct SharedOption<T> {
    data: Arc<Mutex<Option<T>>>,
}

impl<T> SharedOption<T> {
    pub(crate) fn new() -> Self {
        SharedOption {
            data: Arc::new(Mutex::new(None)),
        }
    }

    pub(crate) fn replace(&self, new_data: T) -> Option<T> {
        self.data
            .lock()
            .expect("SharedOption.replace() mutex guard poison")
            .replace(new_data)
    }

    /// Store `new_data` only if the slot is empty. Returns false if a value was already present.
    pub(crate) fn set_if_empty(&self, new_data: T) -> bool {
        let mut guard = self.data.lock().expect("SharedOption.set_if_empty() mutex guard poison");
        if guard.is_some() {
            return false;
        }
        guard.replace(new_data);
        true
    }
}

impl<T: Clone> SharedOption<T> {
    pub(crate) fn get(&self) -> Option<T> {
        self.data.lock().expect("SharedOption.get() mutex guard poison").clone()
    }
}
