//! Batches of deferred native calls produced on the script thread and executed, in submission
//! order, on the thread which owns the GL context.
//!
//! The script side pushes invocations with [`BatchQueue::add_to_next_batch`] and hands the pending
//! batch over with [`BatchQueue::end_next_batch`]. The GL side drains submitted batches with
//! [`BatchReceiver::flush`] once per frame, or runs them continuously on a [`GlThread`].

use std::{fmt, mem, thread};

use anyhow::Context as _;
use exgl_marshal::BoxedInvocation;
use smol::channel;
use thiserror::Error;

// === Config === //

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BatchConfig {
    /// The pending batch is ended automatically once it holds this many invocations.
    pub max_batch_len: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_batch_len: 4096,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum BatchError {
    #[error("the GL side of the batch queue has shut down")]
    Disconnected,
}

// === Batch === //

#[derive(Default)]
pub struct Batch {
    ops: Vec<BoxedInvocation>,
}

impl fmt::Debug for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Batch").field("len", &self.len()).finish()
    }
}

impl Batch {
    pub fn push(&mut self, op: impl Into<BoxedInvocation>) {
        self.ops.push(op.into());
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Runs every invocation in insertion order and returns how many ran.
    pub fn run(self) -> usize {
        let len = self.len();

        for op in self.ops {
            op.invoke();
        }

        len
    }
}

// === Queue === //

pub fn batch_queue(config: BatchConfig) -> (BatchQueue, BatchReceiver) {
    let (tx, rx) = channel::unbounded();

    (
        BatchQueue {
            config,
            next: Batch::default(),
            tx,
        },
        BatchReceiver { rx },
    )
}

/// The script-thread end of the queue.
///
/// Dropping the queue submits whatever is still pending.
#[derive(Debug)]
pub struct BatchQueue {
    config: BatchConfig,
    next: Batch,
    tx: channel::Sender<Batch>,
}

impl BatchQueue {
    pub fn config(&self) -> BatchConfig {
        self.config
    }

    pub fn pending_len(&self) -> usize {
        self.next.len()
    }

    pub fn add_to_next_batch(&mut self, op: impl Into<BoxedInvocation>) -> Result<(), BatchError> {
        self.next.push(op);

        if self.next.len() >= self.config.max_batch_len {
            self.end_next_batch()?;
        }

        Ok(())
    }

    /// Appends `op`, submits the pending batch, and blocks until the GL side has run it.
    ///
    /// Something must be draining the [`BatchReceiver`] on another thread or this never returns.
    pub fn add_blocking_to_next_batch<O: 'static + Send>(
        &mut self,
        op: impl Into<BoxedInvocation<O>>,
    ) -> Result<O, BatchError> {
        let op = op.into();
        let (result_tx, result_rx) = channel::bounded(1);

        self.next.push(BoxedInvocation::new(move || {
            // The waiting side may have given up already.
            let _ = result_tx.send_blocking(op.invoke());
        }));

        self.end_next_batch()?;

        result_rx
            .recv_blocking()
            .map_err(|_| BatchError::Disconnected)
    }

    /// Submits the pending batch to the GL side. Does nothing if no invocation is pending.
    pub fn end_next_batch(&mut self) -> Result<(), BatchError> {
        if self.next.is_empty() {
            return Ok(());
        }

        let batch = mem::take(&mut self.next);
        tracing::debug!(len = batch.len(), "submitting batch");

        self.tx
            .send_blocking(batch)
            .map_err(|_| BatchError::Disconnected)
    }
}

impl Drop for BatchQueue {
    fn drop(&mut self) {
        if let Err(err) = self.end_next_batch() {
            tracing::warn!("failed to submit pending batch on drop: {err}");
        }
    }
}

/// The GL-thread end of the queue.
#[derive(Debug)]
pub struct BatchReceiver {
    rx: channel::Receiver<Batch>,
}

impl BatchReceiver {
    /// Runs every batch submitted so far and returns how many invocations ran.
    pub fn flush(&self) -> usize {
        let mut count = 0;

        while let Ok(batch) = self.rx.try_recv() {
            count += Self::run_batch(batch);
        }

        count
    }

    /// Runs batches as they are submitted until the [`BatchQueue`] is dropped.
    pub fn run(&self) -> usize {
        let mut count = 0;

        while let Ok(batch) = self.rx.recv_blocking() {
            count += Self::run_batch(batch);
        }

        count
    }

    fn run_batch(batch: Batch) -> usize {
        let len = batch.run();
        tracing::debug!(len, "executed batch");
        len
    }
}

// === GlThread === //

/// A dedicated thread executing a [`BatchReceiver`] until its queue is dropped.
#[derive(Debug)]
pub struct GlThread {
    handle: thread::JoinHandle<usize>,
}

impl GlThread {
    pub fn spawn(receiver: BatchReceiver) -> anyhow::Result<Self> {
        let handle = thread::Builder::new()
            .name("exgl-gl".to_string())
            .spawn(move || receiver.run())
            .context("failed to spawn GL thread")?;

        Ok(Self { handle })
    }

    /// Waits for the queue to be dropped and drained, returning how many invocations ran.
    pub fn join(self) -> anyhow::Result<usize> {
        self.handle
            .join()
            .map_err(|_| anyhow::anyhow!("GL thread panicked"))
    }
}

#[cfg(test)]
mod tests;
