use exgl_batch::BatchQueue;
use exgl_marshal::Runtime;

use crate::{DispatchError, MethodTable};

/// Converts named calls into invocations and appends them to the next batch.
#[derive(Debug)]
pub struct Dispatcher<R: Runtime> {
    table: MethodTable<R>,
    queue: BatchQueue,
}

impl<R: 'static + Runtime> Dispatcher<R> {
    pub fn new(table: MethodTable<R>, queue: BatchQueue) -> Self {
        Self { table, queue }
    }

    pub fn table(&self) -> &MethodTable<R> {
        &self.table
    }

    pub fn queue(&self) -> &BatchQueue {
        &self.queue
    }

    /// Queues `name(values...)`.
    ///
    /// A call the table rejects queues nothing. [`DispatchError::Batch`] means the GL side has
    /// shut down; the pending batch, including this call, is dropped with it.
    pub fn call(&mut self, rt: &R, name: &str, values: &[R::Value]) -> Result<(), DispatchError> {
        let call = self.table.generate(rt, name, values)?;
        self.queue.add_to_next_batch(call)?;

        tracing::trace!(name, "queued native call");

        Ok(())
    }

    /// Hands everything queued so far to the GL side.
    pub fn end_batch(&mut self) -> Result<(), DispatchError> {
        self.queue.end_next_batch()?;
        Ok(())
    }

    pub fn into_queue(self) -> BatchQueue {
        self.queue
    }
}
