//! Cancellable periodic background work.

use anyhow::{Context, Result};
use std::{
    sync::mpsc::{self, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

/// Runs a closure on its own thread every `period`.
pub struct ScheduledTask;

impl ScheduledTask {
    /// Start ticking; the first tick runs one `period` after spawning.
    pub fn spawn<F>(name: &str, period: Duration, mut tick: F) -> Result<StopHandle>
    where
        F: FnMut() + Send + 'static,
    {
        let (stop, signal) = mpsc::channel::<()>();
        let thread = thread::Builder::new()
            .name(name.to_owned())
            .spawn(move || {
                loop {
                    match signal.recv_timeout(period) {
                        Err(RecvTimeoutError::Timeout) => tick(),
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })
            .with_context(|| format!("failed to spawn `{name}` task"))?;

        Ok(StopHandle {
            stop: Some(stop),
            thread: Some(thread),
        })
    }
}

/// Stops the task when [`StopHandle::stop`] is called or on drop.
pub struct StopHandle {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl StopHandle {
    /// Signal the task and wait for the running tick to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|thread| !thread.is_finished())
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop.send(()).ok();
        }
        if let Some(thread) = self.thread.take() {
            thread.join().ok();
        }
    }
}

impl Drop for StopHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    #[test]
    fn test_ticks_until_stopped() {
        let count = Arc::new(AtomicUsize::new(0));
        let ticks = Arc::clone(&count);
        let handle = ScheduledTask::spawn("test", Duration::from_millis(5), move || {
            ticks.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        while count.load(Ordering::SeqCst) < 3 {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(handle.is_running());
        handle.stop();

        let stopped_at = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), stopped_at);
    }

    #[test]
    fn test_drop_stops_task() {
        let handle = ScheduledTask::spawn("idle", Duration::from_secs(3600), || {}).unwrap();
        drop(handle);
    }
}
