//! Workload generation: synthetic text, run counters and the request loop.

pub mod driver;
pub mod stats;
pub mod textgen;

pub use driver::Driver;
pub use stats::RunStats;
pub use textgen::TextGenerator;
