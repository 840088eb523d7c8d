pub mod job;
pub mod runner;
pub mod tracker;

pub use job::*;
pub use runner::*;
pub use tracker::*;
