use tokio::sync::watch;

/// ProcessorState is the health of a stage's worker. A worker that is not `Running` will never
/// take another request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProcessorState {
    Running,
    Finished,
    Failed(String),
}

pub(super) fn new(initial_state: ProcessorState) -> (ProcessorStateNotifier, ProcessorStateListener) {
    let (snd, rcv) = watch::channel(initial_state);

    (ProcessorStateNotifier { snd }, ProcessorStateListener { rcv })
}

pub(super) struct ProcessorStateNotifier {
    snd: watch::Sender<ProcessorState>,
}

impl ProcessorStateNotifier {
    pub(super) fn notify_new_state(&self, new_state: ProcessorState) {
        let _ = self.snd.send(new_state);
    }
}

#[derive(Clone)]
pub struct ProcessorStateListener {
    rcv: watch::Receiver<ProcessorState>,
}

impl ProcessorStateListener {
    pub fn current(&self) -> ProcessorState {
        self.rcv.borrow().clone()
    }

    /// `next()` waits for the next state change. None means the worker is gone.
    pub async fn next(&mut self) -> Option<ProcessorState> {
        match self.rcv.changed().await {
            Ok(_) => Some(self.rcv.borrow().clone()),
            Err(_) => None,
        }
    }

    /// `wait_for_exit()` waits until the worker has stopped running and returns how it stopped.
    pub async fn wait_for_exit(&mut self) -> ProcessorState {
        loop {
            let state = self.current();
            if state != ProcessorState::Running {
                return state;
            }
            if self.rcv.changed().await.is_err() {
                return self.current();
            }
        }
    }
}
