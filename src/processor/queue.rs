use crate::processor::ProcessorError;
use crate::request::Request;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// QueuedRequest is what a stage's worker takes off its queue: real work, or the request of death
/// telling it to stop. Nothing queued behind the request of death is ever processed.
#[derive(Debug)]
pub enum QueuedRequest {
    Work(Arc<Request>),
    RequestOfDeath,
}

/// `request_queue()` creates a FIFO queue of requests. With a capacity, `put()` waits while the
/// queue is full; without one it never waits.
pub fn request_queue(capacity: Option<usize>) -> (RequestQueue, RequestQueueReceiver) {
    let (sender, receiver) = match capacity {
        Some(capacity) => {
            let (tx, rx) = mpsc::channel(capacity);
            (QueueSender::Bounded(tx), QueueReceiver::Bounded(rx))
        }
        None => {
            let (tx, rx) = mpsc::unbounded_channel();
            (QueueSender::Unbounded(tx), QueueReceiver::Unbounded(rx))
        }
    };

    (
        RequestQueue {
            sender,
            send_guard: Mutex::new(()),
            death_enqueued: AtomicBool::new(false),
        },
        RequestQueueReceiver { receiver },
    )
}

enum QueueSender {
    Bounded(mpsc::Sender<QueuedRequest>),
    Unbounded(mpsc::UnboundedSender<QueuedRequest>),
}

enum QueueReceiver {
    Bounded(mpsc::Receiver<QueuedRequest>),
    Unbounded(mpsc::UnboundedReceiver<QueuedRequest>),
}

/// Producer side. Shared by every connection handler feeding the stage.
pub struct RequestQueue {
    sender: QueueSender,
    // Held from the shutdown check until the item is in the channel, so an accepted request is
    // always ahead of the request of death.
    send_guard: Mutex<()>,
    death_enqueued: AtomicBool,
}

impl RequestQueue {
    pub async fn put(&self, request: Arc<Request>) -> Result<(), ProcessorError> {
        let _guard = self.send_guard.lock().await;
        if self.death_enqueued.load(Ordering::Acquire) {
            return Err(ProcessorError::ShuttingDown);
        }
        self.send(QueuedRequest::Work(request)).await
    }

    /// `put_request_of_death()` enqueues the stop marker behind everything already queued. Only
    /// the first call enqueues it; returns whether this call did.
    pub async fn put_request_of_death(&self) -> bool {
        let _guard = self.send_guard.lock().await;
        if self.death_enqueued.swap(true, Ordering::AcqRel) {
            return false;
        }
        // If the worker is already gone there is nothing left to stop.
        let _ = self.send(QueuedRequest::RequestOfDeath).await;
        true
    }

    pub fn is_shutting_down(&self) -> bool {
        self.death_enqueued.load(Ordering::Acquire)
    }

    async fn send(&self, item: QueuedRequest) -> Result<(), ProcessorError> {
        let result = match &self.sender {
            QueueSender::Bounded(tx) => tx.send(item).await.map_err(|_| ()),
            QueueSender::Unbounded(tx) => tx.send(item).map_err(|_| ()),
        };
        result.map_err(|_| ProcessorError::WorkerExited)
    }
}

/// Consumer side. Owned by the stage's single worker.
pub struct RequestQueueReceiver {
    receiver: QueueReceiver,
}

impl RequestQueueReceiver {
    /// `take()` waits for the next queued item. Returns None once every `RequestQueue` handle is
    /// dropped and the queue is empty.
    pub async fn take(&mut self) -> Option<QueuedRequest> {
        match &mut self.receiver {
            QueueReceiver::Bounded(rx) => rx.recv().await,
            QueueReceiver::Unbounded(rx) => rx.recv().await,
        }
    }
}
