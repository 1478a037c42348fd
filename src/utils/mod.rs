pub mod bound;
pub mod constants;
pub mod errors;
pub mod lcm;
pub mod logger;

pub use bound::liu_layland_bound;
pub use constants::SchedulingCode;
pub use errors::SchedulingError;
pub use lcm::multiple_lcm;
