pub mod engine;
pub mod partition_scheduler;
pub mod scheduler;
pub mod uni_scheduler;

pub use engine::{DeadlineMiss, Simulation, SimulationReport};
pub use partition_scheduler::FirstFitScheduler;
pub use scheduler::{scheduler_for, Scheduler};
pub use uni_scheduler::UniprocessorScheduler;
