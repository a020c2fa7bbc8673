#![cfg(test)]

use std::sync::{Arc, Mutex};

use exgl_marshal::bind;

use super::*;

type Log = Arc<Mutex<Vec<u32>>>;

fn push_op(log: &Log, id: u32) -> BoxedInvocation {
    let log = log.clone();
    bind(move |id: u32| log.lock().unwrap().push(id), (id,)).boxed()
}

fn config(max_batch_len: usize) -> BatchConfig {
    BatchConfig { max_batch_len }
}

#[test]
fn batches_run_in_submission_order() {
    let log = Log::default();
    let (mut queue, receiver) = batch_queue(BatchConfig::default());

    queue.add_to_next_batch(push_op(&log, 1)).unwrap();
    queue.add_to_next_batch(push_op(&log, 2)).unwrap();
    queue.end_next_batch().unwrap();
    queue.add_to_next_batch(push_op(&log, 3)).unwrap();
    queue.end_next_batch().unwrap();

    assert!(log.lock().unwrap().is_empty());
    assert_eq!(receiver.flush(), 3);
    assert_eq!(*log.lock().unwrap(), vec![1, 2, 3]);
}

#[test]
fn pending_ops_wait_for_end_of_batch() {
    let log = Log::default();
    let (mut queue, receiver) = batch_queue(BatchConfig::default());

    queue.add_to_next_batch(push_op(&log, 1)).unwrap();

    assert_eq!(queue.pending_len(), 1);
    assert_eq!(receiver.flush(), 0);
    assert!(log.lock().unwrap().is_empty());

    queue.end_next_batch().unwrap();

    assert_eq!(queue.pending_len(), 0);
    assert_eq!(receiver.flush(), 1);
    assert_eq!(receiver.flush(), 0, "invocations run exactly once");
}

#[test]
fn full_batches_end_automatically() {
    let log = Log::default();
    let (mut queue, receiver) = batch_queue(config(2));

    for id in 0..5 {
        queue.add_to_next_batch(push_op(&log, id)).unwrap();
    }

    assert_eq!(queue.pending_len(), 1);
    assert_eq!(receiver.flush(), 4);
    assert_eq!(*log.lock().unwrap(), vec![0, 1, 2, 3]);
}

#[test]
fn ending_an_empty_batch_submits_nothing() {
    let (mut queue, receiver) = batch_queue(BatchConfig::default());

    queue.end_next_batch().unwrap();
    drop(queue);

    assert_eq!(receiver.rx.len(), 0);
    assert_eq!(receiver.run(), 0);
}

#[test]
fn dropping_the_queue_submits_pending_ops() {
    let log = Log::default();
    let (mut queue, receiver) = batch_queue(BatchConfig::default());

    queue.add_to_next_batch(push_op(&log, 7)).unwrap();
    drop(queue);

    assert_eq!(receiver.run(), 1);
    assert_eq!(*log.lock().unwrap(), vec![7]);
}

#[test]
fn gl_thread_runs_until_queue_dropped() {
    let log = Log::default();
    let (mut queue, receiver) = batch_queue(config(3));
    let gl = GlThread::spawn(receiver).unwrap();

    for id in 0..10 {
        queue.add_to_next_batch(push_op(&log, id)).unwrap();
    }
    drop(queue);

    assert_eq!(gl.join().unwrap(), 10);
    assert_eq!(*log.lock().unwrap(), (0..10).collect::<Vec<_>>());
}

#[test]
fn blocking_ops_return_their_result() {
    let log = Log::default();
    let (mut queue, receiver) = batch_queue(BatchConfig::default());
    let gl = GlThread::spawn(receiver).unwrap();

    queue.add_to_next_batch(push_op(&log, 1)).unwrap();

    let seen = queue
        .add_blocking_to_next_batch(bind(
            {
                let log = log.clone();
                move || log.lock().unwrap().len()
            },
            (),
        ))
        .unwrap();

    assert_eq!(seen, 1, "earlier invocations run before the blocking one");

    drop(queue);
    assert_eq!(gl.join().unwrap(), 2);
}

#[test]
fn disconnected_receiver_is_reported() {
    let log = Log::default();
    let (mut queue, receiver) = batch_queue(BatchConfig::default());
    drop(receiver);

    queue.add_to_next_batch(push_op(&log, 1)).unwrap();

    assert_eq!(queue.end_next_batch(), Err(BatchError::Disconnected));
    assert_eq!(
        queue.add_blocking_to_next_batch(BoxedInvocation::new(|| 5)),
        Err(BatchError::Disconnected)
    );
}
