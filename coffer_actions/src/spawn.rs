// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where asynchronous work runs.
//!
//! Async actions and async item clicks are handed to a [`Spawner`] and the
//! caller moves on without waiting. [`Worker`] is a named background thread
//! draining a `crossbeam-channel` queue; [`Immediate`] runs jobs inline,
//! which keeps tests deterministic.

use std::fmt;
use std::io;
use std::sync::{Arc, OnceLock};
use std::thread;

use crossbeam_channel::{Sender, unbounded};
use tracing::warn;

/// A unit of fire-and-forget work.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Runs jobs somewhere.
pub trait Spawner: Send + Sync {
    /// Hand off `job`. Must not wait for it to finish.
    fn spawn(&self, job: Job);
}

/// Runs each job on the calling thread before returning.
#[derive(Copy, Clone, Debug, Default)]
pub struct Immediate;

impl Spawner for Immediate {
    fn spawn(&self, job: Job) {
        job();
    }
}

/// A background thread running jobs in submission order.
///
/// The thread exits once every handle is dropped.
#[derive(Clone)]
pub struct Worker {
    tx: Sender<Job>,
}

impl fmt::Debug for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Worker")
            .field("queued", &self.tx.len())
            .finish_non_exhaustive()
    }
}

impl Worker {
    /// Start a worker thread called `name`.
    pub fn start(name: impl Into<String>) -> io::Result<Self> {
        let (tx, rx) = unbounded::<Job>();
        thread::Builder::new().name(name.into()).spawn(move || {
            for job in rx.iter() {
                job();
            }
        })?;
        Ok(Self { tx })
    }
}

impl Spawner for Worker {
    fn spawn(&self, job: Job) {
        if let Err(err) = self.tx.send(job) {
            warn!("worker thread is gone; running job inline");
            (err.into_inner())();
        }
    }
}

/// The process-wide spawner used by registries that were not given one.
///
/// Starts a [`Worker`] on first use, falling back to [`Immediate`] if the
/// thread cannot be created.
pub fn default_spawner() -> Arc<dyn Spawner> {
    static SHARED: OnceLock<Arc<dyn Spawner>> = OnceLock::new();
    SHARED
        .get_or_init(|| match Worker::start("coffer-actions") {
            Ok(worker) => Arc::new(worker),
            Err(err) => {
                warn!(%err, "could not start the action worker; async actions run inline");
                Arc::new(Immediate)
            }
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use std::time::Duration;

    #[test]
    fn immediate_runs_before_returning() {
        let (tx, rx) = bounded(1);
        Immediate.spawn(Box::new(move || tx.send(7).unwrap()));
        assert_eq!(rx.try_recv(), Ok(7));
    }

    #[test]
    fn worker_runs_jobs_in_order() {
        let worker = Worker::start("test-worker").unwrap();
        let (tx, rx) = unbounded();
        for i in 0..5 {
            let tx = tx.clone();
            worker.spawn(Box::new(move || {
                tx.send((i, thread::current().name().map(String::from)))
                    .unwrap();
            }));
        }
        for i in 0..5 {
            let (got, name) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
            assert_eq!(got, i);
            assert_eq!(name.as_deref(), Some("test-worker"));
        }
    }

    #[test]
    fn default_spawner_is_shared() {
        let a = default_spawner();
        let b = default_spawner();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
