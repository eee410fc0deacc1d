use crate::request::{OpCode, Request};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, thiserror::Error)]
pub enum PendingSyncError {
    #[error("Only sync requests can be pending syncs, got {0:?}")]
    NotSync(OpCode),
    #[error("Sync request is already pending: {0:?}")]
    AlreadyPending(Arc<Request>),
}

/// PendingSyncs holds the sync requests this follower has sent to the leader and not yet heard
/// back about, oldest first. A request is added once and removed once; membership is by identity.
#[derive(Default)]
pub struct PendingSyncs {
    requests: Mutex<VecDeque<Arc<Request>>>,
}

impl PendingSyncs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, request: Arc<Request>) -> Result<(), PendingSyncError> {
        if !request.op_code().is_sync() {
            return Err(PendingSyncError::NotSync(request.op_code()));
        }

        let mut requests = self.lock();
        if requests.iter().any(|r| Arc::ptr_eq(r, &request)) {
            return Err(PendingSyncError::AlreadyPending(request));
        }
        requests.push_back(request);

        Ok(())
    }

    /// `take_oldest()` removes and returns the sync that was sent to the leader first.
    pub fn take_oldest(&self) -> Option<Arc<Request>> {
        self.lock().pop_front()
    }

    /// `remove()` removes `request` wherever it is. Returns false if it wasn't pending.
    pub fn remove(&self, request: &Arc<Request>) -> bool {
        let mut requests = self.lock();
        match requests.iter().position(|r| Arc::ptr_eq(r, request)) {
            Some(index) => {
                requests.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, request: &Arc<Request>) -> bool {
        self.lock().iter().any(|r| Arc::ptr_eq(r, request))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Arc<Request>>> {
        self.requests.lock().expect("PendingSyncs mutex guard poison")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn sync_request(cxid: i32) -> Arc<Request> {
        Arc::new(Request::new(1, cxid, OpCode::Sync, Bytes::from_static(b"/")))
    }

    #[test]
    fn add_and_take_in_order() {
        let pending = PendingSyncs::new();
        let first = sync_request(1);
        let second = sync_request(2);
        pending.add(first.clone()).unwrap();
        pending.add(second.clone()).unwrap();
        assert_eq!(pending.len(), 2);

        assert!(Arc::ptr_eq(&pending.take_oldest().unwrap(), &first));
        assert!(Arc::ptr_eq(&pending.take_oldest().unwrap(), &second));
        assert!(pending.take_oldest().is_none());
        assert!(pending.is_empty());
    }

    #[test]
    fn same_request_cannot_be_added_twice() {
        let pending = PendingSyncs::new();
        let request = sync_request(1);
        pending.add(request.clone()).unwrap();

        match pending.add(request.clone()) {
            Err(PendingSyncError::AlreadyPending(r)) => assert!(Arc::ptr_eq(&r, &request)),
            other => panic!("Unexpected result: {:?}", other),
        }
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn equal_looking_requests_are_distinct() {
        let pending = PendingSyncs::new();
        pending.add(sync_request(1)).unwrap();
        pending.add(sync_request(1)).unwrap();
        assert_eq!(pending.len(), 2);
    }

    #[test]
    fn non_sync_is_rejected() {
        let pending = PendingSyncs::new();
        let create = Arc::new(Request::new(1, 1, OpCode::Create, Bytes::new()));
        match pending.add(create) {
            Err(PendingSyncError::NotSync(OpCode::Create)) => {}
            other => panic!("Unexpected result: {:?}", other),
        }
        assert!(pending.is_empty());
    }

    #[test]
    fn remove_by_identity() {
        let pending = PendingSyncs::new();
        let first = sync_request(1);
        let second = sync_request(2);
        pending.add(first.clone()).unwrap();
        pending.add(second.clone()).unwrap();

        assert!(pending.remove(&second));
        assert!(!pending.remove(&second));
        assert!(pending.contains(&first));
        assert!(!pending.contains(&second));
    }

    #[test]
    fn concurrent_adds_are_all_kept() {
        let pending = Arc::new(PendingSyncs::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let pending = pending.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        pending.add(sync_request(t * 100 + i)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(pending.len(), 800);
    }
}
