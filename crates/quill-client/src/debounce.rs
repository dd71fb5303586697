//! Trailing-edge debouncer.
//!
//! Every [`trigger`](Debouncer::trigger) replaces the pending value and restarts
//! the quiet-period timer. When the timer runs out the latest value is handed to
//! the action. [`flush`](Debouncer::flush) skips the wait. Fired actions run
//! on their own task and are never cancelled; nothing de-duplicates them beyond
//! the quiet period. [`shutdown`](Debouncer::shutdown) fires whatever is
//! pending and waits for every fired action to finish. Dropping the debouncer
//! instead discards a pending value unfired.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};

enum Command<T> {
    Trigger(T),
    Flush(T),
    Shutdown,
}

pub struct Debouncer<T> {
    commands: mpsc::UnboundedSender<Command<T>>,
    worker: JoinHandle<()>,
    delay: Duration,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the timer task. Must be called inside a tokio runtime.
    pub fn new<F, Fut>(delay: Duration, action: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (commands, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run(rx, delay, Arc::new(action)));
        Self {
            commands,
            worker,
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `value`, replacing anything pending and restarting the timer.
    pub fn trigger(&self, value: T) {
        let _ = self.commands.send(Command::Trigger(value));
    }

    /// Fire `value` immediately and drop anything pending.
    pub fn flush(&self, value: T) {
        let _ = self.commands.send(Command::Flush(value));
    }

    /// Fire the pending value, if any, and wait until every fired action has
    /// completed.
    pub async fn shutdown(self) {
        let Self {
            commands, worker, ..
        } = self;
        let _ = commands.send(Command::Shutdown);
        drop(commands);
        if let Err(e) = worker.await {
            tracing::warn!(error = %e, "Debouncer task failed");
        }
    }
}

async fn run<T, F, Fut>(mut rx: mpsc::UnboundedReceiver<Command<T>>, delay: Duration, action: Arc<F>)
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let mut pending: Option<T> = None;
    let mut running: Vec<JoinHandle<()>> = Vec::new();
    let timer = sleep(delay);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            command = rx.recv() => match command {
                Some(Command::Trigger(value)) => {
                    pending = Some(value);
                    timer.as_mut().reset(Instant::now() + delay);
                }
                Some(Command::Flush(value)) => {
                    pending = None;
                    fire(&mut running, action.as_ref(), value);
                }
                Some(Command::Shutdown) => {
                    if let Some(value) = pending.take() {
                        fire(&mut running, action.as_ref(), value);
                    }
                    for handle in running.drain(..) {
                        if let Err(e) = handle.await {
                            tracing::warn!(error = %e, "Debounced action failed");
                        }
                    }
                    break;
                }
                None => break,
            },
            () = &mut timer, if pending.is_some() => {
                if let Some(value) = pending.take() {
                    fire(&mut running, action.as_ref(), value);
                }
            }
        }
    }
}

fn fire<T, F, Fut>(running: &mut Vec<JoinHandle<()>>, action: &F, value: T)
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = ()> + Send + 'static,
{
    running.retain(|handle| !handle.is_finished());
    running.push(tokio::spawn(action(value)));
}
