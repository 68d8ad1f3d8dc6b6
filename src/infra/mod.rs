//! Concurrency plumbing: the shared order queue and per-order pickup channels.

pub mod order_queue;
pub mod result_channel;

pub use order_queue::OrderQueue;
pub use result_channel::{result_channel, ResultReceiver, ResultSender};
