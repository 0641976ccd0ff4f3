use crate::error::WfResult;
use std::{
    cell::Cell,
    sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError},
    thread,
    time::Duration,
};

/// Sending half, held by whoever requests the shutdown.
#[derive(Clone, Debug)]
pub struct ShutdownHandle(Sender<()>);

impl ShutdownHandle {
    pub fn trigger(&self) {
        let _ = self.0.send(());
    }
}

/// Receiving half, checked by the watch loop around its blocking points.
#[derive(Debug)]
pub struct Shutdown {
    rx: Receiver<()>,
    requested: Cell<bool>,
}

impl Shutdown {
    pub fn channel() -> (ShutdownHandle, Shutdown) {
        let (tx, rx) = channel();
        let shutdown = Shutdown {
            rx,
            requested: Cell::new(false),
        };

        (ShutdownHandle(tx), shutdown)
    }

    /// Routes Ctrl+C, and on unix SIGTERM and SIGHUP, into a shutdown request.
    pub fn on_interrupt() -> WfResult<Shutdown> {
        let (handle, shutdown) = Self::channel();
        ctrlc::set_handler(move || handle.trigger())?;

        Ok(shutdown)
    }

    /// Blocks for `timeout`, returning early with `true` once a shutdown is requested.
    pub fn wait(&self, timeout: Duration) -> bool {
        if self.requested.get() {
            return true;
        }

        match self.rx.recv_timeout(timeout) {
            Ok(()) => self.requested.set(true),
            Err(RecvTimeoutError::Timeout) => {}
            // no handle left to ever send, so this is a plain sleep
            Err(RecvTimeoutError::Disconnected) => thread::sleep(timeout),
        }

        self.requested.get()
    }

    pub fn is_requested(&self) -> bool {
        if !self.requested.get() {
            match self.rx.try_recv() {
                Ok(()) => self.requested.set(true),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => {}
            }
        }

        self.requested.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_wait_times_out_without_request() {
        let (_handle, shutdown) = Shutdown::channel();
        assert!(!shutdown.wait(Duration::from_millis(10)));
        assert!(!shutdown.is_requested());
    }

    #[test]
    fn test_wait_returns_early_on_request() {
        let (handle, shutdown) = Shutdown::channel();
        let trigger = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            handle.trigger();
        });

        let started = Instant::now();
        assert!(shutdown.wait(Duration::from_secs(30)));
        assert!(started.elapsed() < Duration::from_secs(10));
        trigger.join().unwrap();
    }

    #[test]
    fn test_request_is_sticky() {
        let (handle, shutdown) = Shutdown::channel();
        handle.trigger();

        assert!(shutdown.is_requested());
        assert!(shutdown.is_requested());
        assert!(shutdown.wait(Duration::from_secs(30)));
    }

    #[test]
    fn test_interrupt_handler_registers() {
        let shutdown = Shutdown::on_interrupt().unwrap();
        assert!(!shutdown.is_requested());
    }

    #[test]
    fn test_dropped_handle_still_sleeps() {
        let (handle, shutdown) = Shutdown::channel();
        drop(handle);

        let started = Instant::now();
        assert!(!shutdown.wait(Duration::from_millis(20)));
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
