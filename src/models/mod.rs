mod job;
pub mod partition;
pub mod processor;
pub mod ready_queue;
pub mod scheduler;
pub mod task;
pub mod taskset;

pub use job::Job;
pub use partition::Partition;
pub use processor::{Interval, Processor, Slot};
pub use ready_queue::ReadyQueue;
pub use task::Task;
pub use taskset::TaskSet;

pub type TimeStep = usize;

pub type ID = u32;
